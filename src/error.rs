use thiserror::Error;

/// Everything that can stop a probe run. There are no recovery tiers: any
/// variant aborts the run and is reported once by the top-level handler.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Invalid EVM address: {0:?}")]
    InvalidAddress(String),
    #[error("No address returned from wallet")]
    NoAddress,
    #[error("Network error: {0}")]
    Network(String),
}

impl ProbeError {
    pub fn network(msg: impl Into<String>) -> Self {
        Self::Network(msg.into())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for ProbeError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<gloo_net::Error> for ProbeError {
    fn from(e: gloo_net::Error) -> Self {
        Self::Network(e.to_string())
    }
}
