use std::sync::atomic::{AtomicU64, Ordering};

use alloy_primitives::hex;
use async_trait::async_trait;
use ethers_core::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::ProbeError;
use crate::network::NetworkProfile;

/// Read-only view of the chain. Reads never need the wallet.
#[async_trait(?Send)]
pub trait ChainReader {
    async fn chain_id(&self) -> Result<u64, ProbeError>;
    async fn block_number(&self) -> Result<u64, ProbeError>;
    async fn balance(&self, address: Address) -> Result<U256, ProbeError>;
    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ProbeError>;
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    method: &'a str,
    params: Value,
    id: u64,
}

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

/// JSON-RPC 2.0 over HTTP POST, bound to a single endpoint.
pub struct RpcClient {
    url: String,
    next_id: AtomicU64,
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

impl RpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            next_id: AtomicU64::new(1),
            #[cfg(not(target_arch = "wasm32"))]
            http: reqwest::Client::new(),
        }
    }

    pub fn for_profile(profile: &NetworkProfile) -> Self {
        Self::new(profile.rpc_url.clone())
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn request(&self, method: &str, params: Value) -> Result<Value, ProbeError> {
        let body = RpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
        };
        debug!(method, id = body.id, url = %self.url, "rpc request");
        let resp = self.post(&body).await?;
        unwrap_response(method, resp)
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn post(&self, body: &RpcRequest<'_>) -> Result<RpcResponse, ProbeError> {
        let resp = self
            .http
            .post(&self.url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }

    #[cfg(target_arch = "wasm32")]
    async fn post(&self, body: &RpcRequest<'_>) -> Result<RpcResponse, ProbeError> {
        use gloo_net::http::Request;

        let payload = serde_json::to_string(body).map_err(|e| ProbeError::network(e.to_string()))?;
        let resp = Request::post(&self.url)
            .header("Content-Type", "application/json")
            .body(payload)?
            .send()
            .await?;
        if !resp.ok() {
            return Err(ProbeError::network(format!(
                "{} returned HTTP {}",
                self.url,
                resp.status()
            )));
        }
        Ok(resp.json().await?)
    }
}

#[async_trait(?Send)]
impl ChainReader for RpcClient {
    async fn chain_id(&self) -> Result<u64, ProbeError> {
        let v = self.request("eth_chainId", json!([])).await?;
        parse_u64("eth_chainId", &v)
    }

    async fn block_number(&self) -> Result<u64, ProbeError> {
        let v = self.request("eth_blockNumber", json!([])).await?;
        parse_u64("eth_blockNumber", &v)
    }

    async fn balance(&self, address: Address) -> Result<U256, ProbeError> {
        let v = self
            .request("eth_getBalance", json!([format!("{:#x}", address), "latest"]))
            .await?;
        parse_u256("eth_getBalance", &v)
    }

    async fn call(&self, to: Address, data: Bytes) -> Result<Bytes, ProbeError> {
        let tx = json!({
            "to": format!("{:#x}", to),
            "data": format!("0x{}", hex::encode(&data)),
        });
        let v = self.request("eth_call", json!([tx, "latest"])).await?;
        parse_bytes("eth_call", &v)
    }
}

fn unwrap_response(method: &str, resp: RpcResponse) -> Result<Value, ProbeError> {
    if let Some(err) = resp.error {
        let mut msg = format!("{} failed ({}): {}", method, err.code, err.message);
        if let Some(data) = err.data {
            msg.push_str(&format!(" [{}]", data));
        }
        return Err(ProbeError::Network(msg));
    }
    match resp.result {
        Some(v) if !v.is_null() => Ok(v),
        _ => Err(ProbeError::network(format!("{} returned no result", method))),
    }
}

fn hex_str<'a>(method: &str, v: &'a Value) -> Result<&'a str, ProbeError> {
    v.as_str()
        .and_then(|s| s.strip_prefix("0x"))
        .ok_or_else(|| ProbeError::network(format!("{} returned non-hex value {}", method, v)))
}

fn parse_u64(method: &str, v: &Value) -> Result<u64, ProbeError> {
    let digits = hex_str(method, v)?;
    u64::from_str_radix(digits, 16)
        .map_err(|e| ProbeError::network(format!("{} returned bad quantity {}: {}", method, v, e)))
}

fn parse_u256(method: &str, v: &Value) -> Result<U256, ProbeError> {
    let digits = hex_str(method, v)?;
    if digits.is_empty() {
        return Err(ProbeError::network(format!("{} returned empty quantity", method)));
    }
    U256::from_str_radix(digits, 16)
        .map_err(|e| ProbeError::network(format!("{} returned bad quantity {}: {}", method, v, e)))
}

fn parse_bytes(method: &str, v: &Value) -> Result<Bytes, ProbeError> {
    let digits = hex_str(method, v)?;
    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| ProbeError::network(format!("{} returned bad data: {}", method, e)))
}
