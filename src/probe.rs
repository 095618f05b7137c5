//! The probe run: resolve the network, connect the wallet, read chain state,
//! then optionally describe a contract and an ERC-20 token.

use ethers_core::types::{Address, U256};
use tracing::{error, info, warn};

use crate::address::{checksummed, ProbeAddress};
use crate::config::ProbeConfig;
use crate::context::RunContext;
use crate::erc20::{Erc20, TokenMetadata};
use crate::error::ProbeError;
use crate::format::{format_ether, format_token_amount};
use crate::network::{NetworkKey, NetworkProfile};
use crate::rpc::ChainReader;
use crate::wallet::{WalletClient, WalletProvider};

pub const STATUS_INIT: &str = "Initializing wallet...";
pub const STATUS_CONNECT: &str = "Requesting wallet connection...";
pub const STATUS_READ: &str = "Reading onchain state...";
pub const STATUS_TOKEN: &str = "Reading ERC-20 metadata & balance...";
pub const STATUS_DONE: &str = "Done.";
pub const STATUS_ERROR: &str = "Error";

/// Builds the two clients a run needs for a given chain profile.
pub trait ClientFactory {
    fn wallet(&self, profile: &NetworkProfile) -> Result<Box<dyn WalletProvider>, ProbeError>;
    fn reader(&self, profile: &NetworkProfile) -> Result<Box<dyn ChainReader>, ProbeError>;
}

/// Raw form inputs, exactly as the page or CLI hands them over.
#[derive(Debug, Clone, Default)]
pub struct ProbeRequest {
    pub network: String,
    pub contract: String,
    pub token: String,
}

impl ProbeRequest {
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            ..Self::default()
        }
    }

    pub fn contract(mut self, raw: impl Into<String>) -> Self {
        self.contract = raw.into();
        self
    }

    pub fn token(mut self, raw: impl Into<String>) -> Self {
        self.token = raw.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenReport {
    pub address: ProbeAddress,
    pub metadata: TokenMetadata,
    pub formatted_balance: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub profile: NetworkProfile,
    pub account: Address,
    pub rpc_chain_id: u64,
    pub block_number: u64,
    pub native_balance: U256,
    pub contract: Option<ProbeAddress>,
    pub token: Option<TokenReport>,
}

impl ProbeReport {
    pub fn chain_id_matches(&self) -> bool {
        self.rpc_chain_id == self.profile.chain_id
    }
}

fn optional_address(raw: &str) -> Result<Option<ProbeAddress>, ProbeError> {
    let t = raw.trim();
    if t.is_empty() {
        return Ok(None);
    }
    ProbeAddress::parse(t).map(Some)
}

/// One full run. Any error aborts the remaining steps and is returned as-is;
/// reporting it is the caller's job (see [`run_and_report`]).
pub async fn run_probe(
    ctx: &dyn RunContext,
    config: &ProbeConfig,
    clients: &dyn ClientFactory,
    request: &ProbeRequest,
) -> Result<ProbeReport, ProbeError> {
    ctx.clear();

    let key: NetworkKey = request.network.parse()?;
    let profile = config.profile(key);
    let expected_chain_id = profile.chain_id;
    info!(network = %key, chain_id = expected_chain_id, rpc = %profile.rpc_url, "starting probe");

    ctx.set_status(STATUS_INIT);
    let wallet = WalletClient::new(clients.wallet(&profile)?, profile.clone());
    let reader = clients.reader(&profile)?;

    ctx.append_line(&format!(
        "Built for Base: target={} chainId={}",
        profile.name, expected_chain_id
    ));
    ctx.append_line(&format!("Explorer: {}", profile.explorer_base_url));
    ctx.append_line(&format!("RPC: {}", profile.rpc_url));

    ctx.set_status(STATUS_CONNECT);
    let account = wallet.primary_address().await?;
    let account_text = checksummed(&account);
    ctx.append_line(&format!("Connected address: {}", account_text));
    ctx.append_line(&format!("Basescan address: {}", profile.address_url(&account_text)));

    ctx.set_status(STATUS_READ);
    let (rpc_chain_id, block_number, native_balance) = futures::try_join!(
        reader.chain_id(),
        reader.block_number(),
        reader.balance(account)
    )?;

    ctx.append_line(&format!("RPC chainId: {}", rpc_chain_id));
    ctx.append_line(&format!("Latest block: {}", block_number));
    ctx.append_line(&format!("Native balance: {} ETH", format_ether(native_balance)));

    if rpc_chain_id != expected_chain_id {
        warn!(expected_chain_id, rpc_chain_id, "rpc chain id mismatch");
        ctx.append_line(&format!(
            "Warning: expected chainId {}, but RPC returned {}.",
            expected_chain_id, rpc_chain_id
        ));
    }

    let contract = optional_address(&request.contract)?;
    if let Some(ca) = &contract {
        ctx.append_line(&format!("Contract address: {}", ca));
        ctx.append_line(&format!("Basescan contract: {}", profile.address_url(ca.as_str())));
        ctx.append_line(&format!(
            "Basescan verification: {}",
            profile.verified_source_url(ca.as_str())
        ));
    }

    let token = match optional_address(&request.token)? {
        Some(token) => {
            ctx.set_status(STATUS_TOKEN);
            let metadata = Erc20::new(&*reader, token.address())
                .metadata(account)
                .await?;
            let formatted_balance = format_token_amount(metadata.balance, metadata.decimals);

            ctx.append_line(&format!("Token: {}", token));
            ctx.append_line(&format!("Token Basescan: {}", profile.address_url(token.as_str())));
            ctx.append_line(&format!("Token name: {}", metadata.name));
            ctx.append_line(&format!("Token symbol: {}", metadata.symbol));
            ctx.append_line(&format!("Token decimals: {}", metadata.decimals));
            ctx.append_line(&format!("Token balance (approx): {}", formatted_balance));

            Some(TokenReport {
                address: token,
                metadata,
                formatted_balance,
            })
        }
        None => None,
    };

    ctx.set_status(STATUS_DONE);
    info!(block_number, "probe finished");

    Ok(ProbeReport {
        profile,
        account,
        rpc_chain_id,
        block_number,
        native_balance,
        contract,
        token,
    })
}

/// Top-level handler: runs the probe and turns any failure into the
/// "Error" status plus a log line.
pub async fn run_and_report(
    ctx: &dyn RunContext,
    config: &ProbeConfig,
    clients: &dyn ClientFactory,
    request: &ProbeRequest,
) -> Result<ProbeReport, ProbeError> {
    let result = run_probe(ctx, config, clients, request).await;
    if let Err(e) = &result {
        error!(error = %e, "probe failed");
        ctx.set_status(STATUS_ERROR);
        ctx.append_line(&format!("Error: {}", e));
    }
    result
}
