use crate::network::{NetworkKey, NetworkProfile};

pub const APP_NAME: &str = "AuroraProbe (Built for Base)";
pub const APP_LOGO_URL: &str = "https://base.org/favicon.ico";

pub const BASE_RPC_ENV: &str = "BASE_RPC_URL";
pub const BASE_SEPOLIA_RPC_ENV: &str = "BASE_SEPOLIA_RPC_URL";

/// RPC endpoint overrides. Unset entries fall back to the public endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeConfig {
    pub base_rpc_url: Option<String>,
    pub base_sepolia_rpc_url: Option<String>,
}

impl ProbeConfig {
    /// Runtime env (native only), then values baked in by build.rs from `.env`.
    pub fn from_env() -> Self {
        Self {
            base_rpc_url: lookup(BASE_RPC_ENV, option_env!("BASE_RPC_URL")),
            base_sepolia_rpc_url: lookup(BASE_SEPOLIA_RPC_ENV, option_env!("BASE_SEPOLIA_RPC_URL")),
        }
    }

    pub fn rpc_url(&self, key: NetworkKey) -> &str {
        let over = match key {
            NetworkKey::Base => self.base_rpc_url.as_deref(),
            NetworkKey::BaseSepolia => self.base_sepolia_rpc_url.as_deref(),
        };
        over.unwrap_or_else(|| key.default_rpc_url())
    }

    pub fn profile(&self, key: NetworkKey) -> NetworkProfile {
        NetworkProfile::new(key, self.rpc_url(key))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn lookup(name: &str, baked: Option<&'static str>) -> Option<String> {
    non_empty(std::env::var(name).ok()).or_else(|| non_empty(baked.map(str::to_string)))
}

#[cfg(target_arch = "wasm32")]
fn lookup(_name: &str, baked: Option<&'static str>) -> Option<String> {
    non_empty(baked.map(str::to_string))
}

fn non_empty(v: Option<String>) -> Option<String> {
    v.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_endpoints() {
        let cfg = ProbeConfig::default();
        assert_eq!(cfg.rpc_url(NetworkKey::Base), "https://mainnet.base.org");
        assert_eq!(cfg.rpc_url(NetworkKey::BaseSepolia), "https://sepolia.base.org");
    }

    #[test]
    fn overrides_apply_per_network() {
        let cfg = ProbeConfig {
            base_rpc_url: Some("https://base.example/rpc".into()),
            base_sepolia_rpc_url: None,
        };
        let p = cfg.profile(NetworkKey::Base);
        assert_eq!(p.rpc_url, "https://base.example/rpc");
        assert_eq!(p.chain_id, 8453);
        assert_eq!(cfg.rpc_url(NetworkKey::BaseSepolia), "https://sepolia.base.org");
    }

    #[test]
    fn blank_values_count_as_unset() {
        assert_eq!(non_empty(Some("   ".into())), None);
        assert_eq!(non_empty(Some(" http://x ".into())), Some("http://x".into()));
    }
}
