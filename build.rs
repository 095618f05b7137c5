fn main() {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    println!("cargo:rerun-if-changed=.env");

    for key in ["BASE_RPC_URL", "BASE_SEPOLIA_RPC_URL"] {
        println!("cargo:rerun-if-env-changed={}", key);
        match std::env::var(key) {
            Ok(val) if !val.trim().is_empty() => {
                println!("cargo:rustc-env={}={}", key, val.trim());
            }
            _ => {
                // Public endpoint is used at runtime.
            }
        }
    }
}
