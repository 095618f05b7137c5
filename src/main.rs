#[cfg(target_arch = "wasm32")]
fn main() {
    use aurora_probe::app::App;
    use leptos::*;

    console_error_panic_hook::set_once();
    mount_to_body(|| view! { <App/> })
}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use anyhow::Result;
    use clap::Parser;
    use tracing::warn;

    use aurora_probe::address::ProbeAddress;
    use aurora_probe::config::{ProbeConfig, APP_NAME};
    use aurora_probe::context::MemoryLog;
    use aurora_probe::network::NetworkProfile;
    use aurora_probe::rpc::{ChainReader, RpcClient};
    use aurora_probe::wallet::{LocalWalletProvider, WalletProvider};
    use aurora_probe::{run_and_report, ClientFactory, ProbeError, ProbeRequest};

    #[derive(Parser, Debug)]
    #[command(name = "aurora-probe")]
    #[command(about = APP_NAME, long_about = None)]
    struct Args {
        /// Network to probe (base or baseSepolia)
        #[arg(short, long, default_value = "baseSepolia")]
        network: String,

        /// Contract address to link on the explorer
        #[arg(short, long, default_value = "")]
        contract: String,

        /// ERC-20 token to read metadata and balance from
        #[arg(short, long, default_value = "")]
        token: String,

        /// Watch-only account, used when no private key is configured
        #[arg(short, long)]
        address: Option<String>,

        /// Hex private key for a key-backed session
        #[arg(long, env = "PROBE_PRIVATE_KEY", hide_env_values = true)]
        private_key: Option<String>,
    }

    struct NativeClients {
        address: Option<ProbeAddress>,
        private_key: Option<String>,
    }

    impl ClientFactory for NativeClients {
        fn wallet(&self, profile: &NetworkProfile) -> Result<Box<dyn WalletProvider>, ProbeError> {
            let provider = match (&self.private_key, &self.address) {
                (Some(key), watch) => {
                    if watch.is_some() {
                        warn!("both a private key and --address given; using the key");
                    }
                    LocalWalletProvider::from_private_key(key, profile.chain_id)?
                }
                (None, Some(a)) => LocalWalletProvider::WatchOnly(a.address()),
                (None, None) => LocalWalletProvider::Disconnected,
            };
            Ok(Box::new(provider))
        }

        fn reader(&self, profile: &NetworkProfile) -> Result<Box<dyn ChainReader>, ProbeError> {
            Ok(Box::new(RpcClient::for_profile(profile)))
        }
    }

    #[tokio::main]
    pub async fn main() -> Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_writer(std::io::stderr)
            .init();

        let args = Args::parse();
        let clients = NativeClients {
            address: args.address.as_deref().map(ProbeAddress::parse).transpose()?,
            private_key: args.private_key.filter(|k| !k.trim().is_empty()),
        };
        let request = ProbeRequest::new(args.network)
            .contract(args.contract)
            .token(args.token);

        let ctx = MemoryLog::echoing();
        let config = ProbeConfig::from_env();
        // Failures are already in the log; only the exit code is left to set.
        if run_and_report(&ctx, &config, &clients, &request).await.is_err() {
            std::process::exit(1);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::main()
}
