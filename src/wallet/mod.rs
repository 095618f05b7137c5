use async_trait::async_trait;
use ethers_core::types::Address;
use serde_json::{json, Value};

use crate::error::ProbeError;
use crate::network::NetworkProfile;

#[cfg(target_arch = "wasm32")]
pub mod injected;
#[cfg(not(target_arch = "wasm32"))]
pub mod local;

#[cfg(target_arch = "wasm32")]
pub use injected::InjectedWallet;
#[cfg(not(target_arch = "wasm32"))]
pub use local::LocalWalletProvider;

/// A connected (or connectable) wallet. Asking for addresses may prompt the
/// user out-of-band.
#[async_trait(?Send)]
pub trait WalletProvider {
    async fn request_addresses(&self) -> Result<Vec<Address>, ProbeError>;
}

/// Signing-capable client: a wallet provider bound to one chain profile.
pub struct WalletClient {
    provider: Box<dyn WalletProvider>,
    profile: NetworkProfile,
}

impl WalletClient {
    pub fn new(provider: Box<dyn WalletProvider>, profile: NetworkProfile) -> Self {
        Self { provider, profile }
    }

    pub fn profile(&self) -> &NetworkProfile {
        &self.profile
    }

    pub async fn request_addresses(&self) -> Result<Vec<Address>, ProbeError> {
        self.provider.request_addresses().await
    }

    /// First account the session hands back.
    pub async fn primary_address(&self) -> Result<Address, ProbeError> {
        self.request_addresses()
            .await?
            .into_iter()
            .next()
            .ok_or(ProbeError::NoAddress)
    }
}

/// EIP-1193 error code for "unrecognized chain" on `wallet_switchEthereumChain`.
pub const UNRECOGNIZED_CHAIN: i64 = 4902;

/// `0x`-prefixed hex chain id, as wallets expect it.
pub fn hex_chain_id(chain_id: u64) -> String {
    format!("0x{:x}", chain_id)
}

/// EIP-3085 `wallet_addEthereumChain` params offering the profile's chain,
/// including its RPC URL, to the wallet.
pub fn add_chain_params(profile: &NetworkProfile) -> Value {
    json!([{
        "chainId": hex_chain_id(profile.chain_id),
        "chainName": profile.name,
        "rpcUrls": [profile.rpc_url],
        "blockExplorerUrls": [profile.explorer_base_url],
        "nativeCurrency": {
            "name": "Ether",
            "symbol": "ETH",
            "decimals": 18,
        },
    }])
}
