use std::fmt;
use std::str::FromStr;

use crate::error::ProbeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NetworkKey {
    Base,
    #[default]
    BaseSepolia,
}

impl NetworkKey {
    pub const ALL: [NetworkKey; 2] = [NetworkKey::Base, NetworkKey::BaseSepolia];

    /// Selector value as used by the page and the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            NetworkKey::Base => "base",
            NetworkKey::BaseSepolia => "baseSepolia",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            NetworkKey::Base => 8453,
            NetworkKey::BaseSepolia => 84532,
        }
    }

    pub fn chain_name(&self) -> &'static str {
        match self {
            NetworkKey::Base => "Base",
            NetworkKey::BaseSepolia => "Base Sepolia",
        }
    }

    pub fn explorer_url(&self) -> &'static str {
        match self {
            NetworkKey::Base => "https://basescan.org",
            NetworkKey::BaseSepolia => "https://sepolia.basescan.org",
        }
    }

    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            NetworkKey::Base => "https://mainnet.base.org",
            NetworkKey::BaseSepolia => "https://sepolia.base.org",
        }
    }
}

impl fmt::Display for NetworkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkKey {
    type Err = ProbeError;

    /// Unknown selectors are rejected rather than routed to the test network.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "base" => Ok(NetworkKey::Base),
            "baseSepolia" => Ok(NetworkKey::BaseSepolia),
            other => Err(ProbeError::Configuration(format!(
                "unsupported network {:?} (expected \"base\" or \"baseSepolia\")",
                other
            ))),
        }
    }
}

/// Everything a run needs to know about the target chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkProfile {
    pub key: NetworkKey,
    pub name: &'static str,
    pub chain_id: u64,
    pub rpc_url: String,
    pub explorer_base_url: &'static str,
}

impl NetworkProfile {
    pub fn new(key: NetworkKey, rpc_url: impl Into<String>) -> Self {
        Self {
            key,
            name: key.chain_name(),
            chain_id: key.chain_id(),
            rpc_url: rpc_url.into(),
            explorer_base_url: key.explorer_url(),
        }
    }

    pub fn address_url(&self, address: &str) -> String {
        format!("{}/address/{}", self.explorer_base_url, address)
    }

    pub fn verified_source_url(&self, address: &str) -> String {
        format!("{}#code", self.address_url(address))
    }
}
