use async_trait::async_trait;
use ethers_core::types::Address;
use ethers_signers::{LocalWallet, Signer};

use super::WalletProvider;
use crate::error::ProbeError;

/// Native stand-in for a browser wallet.
#[derive(Debug, Clone)]
pub enum LocalWalletProvider {
    /// Key-backed session, bound to the expected chain id.
    Signer(LocalWallet),
    WatchOnly(Address),
    /// No account configured; the session yields nothing.
    Disconnected,
}

impl LocalWalletProvider {
    pub fn from_private_key(key: &str, chain_id: u64) -> Result<Self, ProbeError> {
        let pk = key.trim().trim_start_matches("0x");
        let wallet: LocalWallet = pk
            .parse()
            .map_err(|e| ProbeError::Configuration(format!("invalid private key: {}", e)))?;
        Ok(Self::Signer(wallet.with_chain_id(chain_id)))
    }

    pub fn chain_id(&self) -> Option<u64> {
        match self {
            Self::Signer(w) => Some(w.chain_id()),
            _ => None,
        }
    }
}

#[async_trait(?Send)]
impl WalletProvider for LocalWalletProvider {
    async fn request_addresses(&self) -> Result<Vec<Address>, ProbeError> {
        Ok(match self {
            Self::Signer(w) => vec![w.address()],
            Self::WatchOnly(a) => vec![*a],
            Self::Disconnected => vec![],
        })
    }
}
