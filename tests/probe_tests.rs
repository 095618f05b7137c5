//! End-to-end probe runs against in-memory wallet and chain fakes.

use std::collections::HashMap;

use async_trait::async_trait;
use ethers_core::abi::{encode, Token};
use ethers_core::types::{Address, Bytes, U256};
use ethers_core::utils::id;

use aurora_probe::config::ProbeConfig;
use aurora_probe::context::{MemoryLog, RunContext};
use aurora_probe::network::NetworkProfile;
use aurora_probe::probe::{STATUS_DONE, STATUS_ERROR};
use aurora_probe::rpc::ChainReader;
use aurora_probe::wallet::WalletProvider;
use aurora_probe::{run_and_report, ClientFactory, ProbeError, ProbeRequest};

const ACCOUNT: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
const USDC: &str = "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913";
const CONTRACT: &str = "0x4200000000000000000000000000000000000006";

fn addr(s: &str) -> Address {
    s.parse().unwrap()
}

#[derive(Clone)]
struct FakeToken {
    name: &'static str,
    symbol: &'static str,
    decimals: u64,
    balance: U256,
}

#[derive(Clone)]
struct FakeChain {
    chain_id: Option<u64>,
    block: u64,
    balance: U256,
    tokens: HashMap<Address, FakeToken>,
}

impl FakeChain {
    fn new(chain_id: u64) -> Self {
        Self {
            chain_id: Some(chain_id),
            block: 12_345_678,
            balance: U256::exp10(18) * 3 / 2,
            tokens: HashMap::new(),
        }
    }

    fn with_token(mut self, at: &str, token: FakeToken) -> Self {
        self.tokens.insert(addr(at), token);
        self
    }
}

#[async_trait(?Send)]
impl ChainReader for FakeChain {
    async fn chain_id(&self) -> Result<u64, ProbeError> {
        self.chain_id
            .ok_or_else(|| ProbeError::network("eth_chainId failed (-32603): upstream unavailable"))
    }

    async fn block_number(&self) -> Result<u64, ProbeError> {
        Ok(self.block)
    }

    async fn balance(&self, address: Address) -> Result<U256, ProbeError> {
        assert_eq!(address, addr(ACCOUNT));
        Ok(self.balance)
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ProbeError> {
        // Unknown contracts answer like an EOA: empty return data.
        let Some(t) = self.tokens.get(&to) else {
            return Ok(Bytes::new());
        };
        let selector = &data[..4];
        let out = if selector == id("name()") {
            encode(&[Token::String(t.name.into())])
        } else if selector == id("symbol()") {
            encode(&[Token::String(t.symbol.into())])
        } else if selector == id("decimals()") {
            encode(&[Token::Uint(U256::from(t.decimals))])
        } else if selector == id("balanceOf(address)") {
            assert_eq!(&data[16..36], addr(ACCOUNT).as_bytes());
            encode(&[Token::Uint(t.balance)])
        } else {
            return Err(ProbeError::network("execution reverted"));
        };
        Ok(Bytes::from(out))
    }
}

struct FakeWallet(Vec<Address>);

#[async_trait(?Send)]
impl WalletProvider for FakeWallet {
    async fn request_addresses(&self) -> Result<Vec<Address>, ProbeError> {
        Ok(self.0.clone())
    }
}

struct FakeClients {
    accounts: Vec<Address>,
    chain: FakeChain,
}

impl FakeClients {
    fn new(chain: FakeChain) -> Self {
        Self {
            accounts: vec![addr(ACCOUNT)],
            chain,
        }
    }
}

impl ClientFactory for FakeClients {
    fn wallet(&self, _profile: &NetworkProfile) -> Result<Box<dyn WalletProvider>, ProbeError> {
        Ok(Box::new(FakeWallet(self.accounts.clone())))
    }

    fn reader(&self, _profile: &NetworkProfile) -> Result<Box<dyn ChainReader>, ProbeError> {
        Ok(Box::new(self.chain.clone()))
    }
}

fn usdc() -> FakeToken {
    FakeToken {
        name: "USD Coin",
        symbol: "USDC",
        decimals: 4,
        balance: U256::from(1_234_567u64),
    }
}

async fn run(clients: &FakeClients, request: ProbeRequest) -> (MemoryLog, Result<aurora_probe::ProbeReport, ProbeError>) {
    let log = MemoryLog::new();
    let result = run_and_report(&log, &ProbeConfig::default(), clients, &request).await;
    (log, result)
}

// ---------------------------------------------------------------------------
// Successful runs
// ---------------------------------------------------------------------------

mod success {
    use super::*;

    #[tokio::test]
    async fn full_run_on_base() {
        let clients = FakeClients::new(FakeChain::new(8453).with_token(USDC, usdc()));
        let request = ProbeRequest::new("base").contract(CONTRACT).token(USDC);
        let (log, result) = run(&clients, request).await;

        let report = result.unwrap();
        assert_eq!(log.status(), STATUS_DONE);
        assert_eq!(report.profile.chain_id, 8453);
        assert_eq!(report.block_number, 12_345_678);
        assert!(report.chain_id_matches());

        let expected = vec![
            "Built for Base: target=Base chainId=8453".to_string(),
            "Explorer: https://basescan.org".into(),
            "RPC: https://mainnet.base.org".into(),
            format!("Connected address: {ACCOUNT}"),
            format!("Basescan address: https://basescan.org/address/{ACCOUNT}"),
            "RPC chainId: 8453".into(),
            "Latest block: 12345678".into(),
            "Native balance: 1.5 ETH".into(),
            format!("Contract address: {CONTRACT}"),
            format!("Basescan contract: https://basescan.org/address/{CONTRACT}"),
            format!("Basescan verification: https://basescan.org/address/{CONTRACT}#code"),
            format!("Token: {USDC}"),
            format!("Token Basescan: https://basescan.org/address/{USDC}"),
            "Token name: USD Coin".into(),
            "Token symbol: USDC".into(),
            "Token decimals: 4".into(),
            "Token balance (approx): 123.4567".into(),
        ];
        assert_eq!(log.lines(), expected);

        let token = report.token.unwrap();
        assert_eq!(token.metadata.symbol, "USDC");
        assert_eq!(token.formatted_balance, "123.4567");
    }

    #[tokio::test]
    async fn chain_id_mismatch_only_warns() {
        let clients = FakeClients::new(FakeChain::new(1));
        let (log, result) = run(&clients, ProbeRequest::new("baseSepolia")).await;

        let report = result.unwrap();
        assert!(!report.chain_id_matches());
        assert!(log.contains("Warning: expected chainId 84532, but RPC returned 1."));
        assert_eq!(log.status(), STATUS_DONE);
    }

    #[tokio::test]
    async fn blank_fields_skip_their_sections() {
        let clients = FakeClients::new(FakeChain::new(84532));
        let request = ProbeRequest::new("baseSepolia").contract("").token("   ");
        let (log, result) = run(&clients, request).await;

        let report = result.unwrap();
        assert!(report.contract.is_none());
        assert!(report.token.is_none());
        assert!(!log.contains("Contract"));
        assert!(!log.contains("Token"));
        assert!(!log.contains("Warning"));
        assert_eq!(log.lines().len(), 8);
        assert_eq!(log.status(), STATUS_DONE);
    }

    #[tokio::test]
    async fn tiny_balance_is_zero_padded() {
        let token = FakeToken {
            name: "Dust",
            symbol: "DST",
            decimals: 6,
            balance: U256::from(5u64),
        };
        let clients = FakeClients::new(FakeChain::new(84532).with_token(USDC, token));
        let (log, result) = run(&clients, ProbeRequest::new("baseSepolia").token(USDC)).await;

        assert!(result.is_ok());
        assert!(log.contains("Token balance (approx): 0.000005"));
    }

    #[tokio::test]
    async fn rpc_override_is_reported() {
        let clients = FakeClients::new(FakeChain::new(84532));
        let config = ProbeConfig {
            base_rpc_url: None,
            base_sepolia_rpc_url: Some("https://sepolia.example/rpc".into()),
        };
        let log = MemoryLog::new();
        let report = run_and_report(&log, &config, &clients, &ProbeRequest::new("baseSepolia"))
            .await
            .unwrap();

        assert_eq!(report.profile.rpc_url, "https://sepolia.example/rpc");
        assert!(log.contains("RPC: https://sepolia.example/rpc"));
    }
}

// ---------------------------------------------------------------------------
// Failed runs
// ---------------------------------------------------------------------------

mod failure {
    use super::*;

    fn last_line(log: &MemoryLog) -> String {
        log.lines().last().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn chain_read_failure_fails_the_group() {
        let mut chain = FakeChain::new(8453);
        chain.chain_id = None;
        let clients = FakeClients::new(chain);
        let (log, result) = run(&clients, ProbeRequest::new("base")).await;

        assert!(matches!(result, Err(ProbeError::Network(_))));
        assert_eq!(log.status(), STATUS_ERROR);
        assert!(!log.contains("Latest block"));
        assert!(!log.contains("Native balance"));
        assert!(last_line(&log).starts_with("Error: Network error: eth_chainId failed"));
    }

    #[tokio::test]
    async fn empty_wallet_session() {
        let mut clients = FakeClients::new(FakeChain::new(8453));
        clients.accounts.clear();
        let (log, result) = run(&clients, ProbeRequest::new("base")).await;

        assert!(matches!(result, Err(ProbeError::NoAddress)));
        assert_eq!(log.status(), STATUS_ERROR);
        assert_eq!(last_line(&log), "Error: No address returned from wallet");
        assert!(!log.contains("RPC chainId"));
    }

    #[tokio::test]
    async fn malformed_contract_address() {
        let clients = FakeClients::new(FakeChain::new(8453).with_token(USDC, usdc()));
        let request = ProbeRequest::new("base").contract("0x1234").token(USDC);
        let (log, result) = run(&clients, request).await;

        assert!(matches!(result, Err(ProbeError::InvalidAddress(_))));
        assert_eq!(log.status(), STATUS_ERROR);
        assert!(!log.contains("Token"));
    }

    #[tokio::test]
    async fn non_erc20_token_fails_whole_read() {
        let clients = FakeClients::new(FakeChain::new(8453));
        let (log, result) = run(&clients, ProbeRequest::new("base").token(CONTRACT)).await;

        assert!(matches!(result, Err(ProbeError::Network(_))));
        assert_eq!(log.status(), STATUS_ERROR);
        assert!(!log.contains("Token name"));
    }

    #[tokio::test]
    async fn decimals_above_u8_are_rejected() {
        let mut token = usdc();
        token.decimals = 300;
        let clients = FakeClients::new(FakeChain::new(8453).with_token(USDC, token));
        let (log, result) = run(&clients, ProbeRequest::new("base").token(USDC)).await;

        assert!(result.is_err());
        assert!(last_line(&log).contains("decimals"));
    }

    #[tokio::test]
    async fn unknown_network_fails_closed_after_clearing() {
        let clients = FakeClients::new(FakeChain::new(8453));
        let log = MemoryLog::new();
        log.append_line("left over from the previous run");

        let result = run_and_report(&log, &ProbeConfig::default(), &clients, &ProbeRequest::new("optimism")).await;

        assert!(matches!(result, Err(ProbeError::Configuration(_))));
        assert_eq!(log.lines().len(), 1);
        assert!(last_line(&log).starts_with("Error: Configuration error"));
        assert_eq!(log.status(), STATUS_ERROR);
    }
}
