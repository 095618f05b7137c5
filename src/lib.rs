//! Base network probe: connects a wallet, reads chain state over JSON-RPC and
//! describes an optional contract and ERC-20 token.

pub mod address;
pub mod config;
pub mod context;
pub mod erc20;
pub mod error;
pub mod format;
pub mod network;
pub mod probe;
pub mod rpc;
pub mod wallet;

#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod probe_view;

pub use error::ProbeError;
pub use probe::{run_and_report, run_probe, ClientFactory, ProbeReport, ProbeRequest};
