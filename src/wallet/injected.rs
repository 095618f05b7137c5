use async_trait::async_trait;
use ethers_core::types::Address;
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::{JsCast, JsValue};

use super::{add_chain_params, hex_chain_id, WalletProvider, UNRECOGNIZED_CHAIN};
use crate::error::ProbeError;
use crate::network::NetworkProfile;

#[derive(Serialize)]
struct Eip1193Request<'a> {
    method: &'a str,
    params: Value,
}

/// A request the wallet rejected, with its EIP-1193 error code when present.
#[derive(Debug)]
struct Rejected {
    code: Option<i64>,
    message: String,
}

impl Rejected {
    fn into_probe_error(self, method: &str) -> ProbeError {
        match self.code {
            Some(code) => ProbeError::network(format!("{} rejected ({}): {}", method, code, self.message)),
            None => ProbeError::network(format!("{} rejected: {}", method, self.message)),
        }
    }
}

/// The page's injected EIP-1193 provider (`window.ethereum`), bound to one
/// chain profile.
pub struct InjectedWallet {
    profile: NetworkProfile,
}

impl InjectedWallet {
    pub fn new(profile: &NetworkProfile) -> Result<Self, ProbeError> {
        browser_provider()?;
        Ok(Self {
            profile: profile.clone(),
        })
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ProbeError> {
        match self.dispatch(method, params).await? {
            Ok(v) => Ok(v),
            Err(rejected) => Err(rejected.into_probe_error(method)),
        }
    }

    /// Outer error: the request could not be made. Inner error: the wallet said no.
    async fn dispatch(&self, method: &str, params: Value) -> Result<Result<Value, Rejected>, ProbeError> {
        let provider = browser_provider()?;
        let request_fn = get_prop(&provider, "request")?
            .dyn_into::<js_sys::Function>()
            .map_err(|_| ProbeError::Configuration("window.ethereum.request is unavailable".into()))?;

        let ser = serde_wasm_bindgen::Serializer::json_compatible();
        let request_js = Eip1193Request { method, params }
            .serialize(&ser)
            .map_err(|e| ProbeError::network(format!("failed to encode {}: {}", method, e)))?;
        let promise = request_fn
            .call1(&provider, &request_js)
            .map_err(|e| ProbeError::network(format!("{} dispatch failed: {:?}", method, e)))?
            .dyn_into::<js_sys::Promise>()
            .map_err(|_| ProbeError::network(format!("{} did not return a Promise", method)))?;
        let result = match wasm_bindgen_futures::JsFuture::from(promise).await {
            Ok(v) => v,
            Err(e) => return Ok(Err(rejection(&e))),
        };
        serde_wasm_bindgen::from_value(result)
            .map(Ok)
            .map_err(|e| ProbeError::network(format!("failed to decode {} result: {}", method, e)))
    }

    /// Move the wallet to the profile's chain, offering the chain (with the
    /// profile's RPC URL) when the wallet does not know it. A refusal is not
    /// fatal: reads go through the RPC endpoint and the mismatch check reports it.
    async fn bind_chain(&self) -> Result<(), ProbeError> {
        let wanted = hex_chain_id(self.profile.chain_id);
        let current = self.request("eth_chainId", json!([])).await?;
        if matches!(&current, Value::String(c) if c.eq_ignore_ascii_case(&wanted)) {
            return Ok(());
        }
        match self
            .dispatch("wallet_switchEthereumChain", json!([{ "chainId": wanted }]))
            .await?
        {
            Ok(_) => Ok(()),
            Err(Rejected { code: Some(UNRECOGNIZED_CHAIN), .. }) => self
                .request("wallet_addEthereumChain", add_chain_params(&self.profile))
                .await
                .map(|_| ()),
            Err(rejected) => Err(rejected.into_probe_error("wallet_switchEthereumChain")),
        }
    }
}

#[async_trait(?Send)]
impl WalletProvider for InjectedWallet {
    async fn request_addresses(&self) -> Result<Vec<Address>, ProbeError> {
        let accounts = self.request("eth_requestAccounts", json!([])).await?;
        let list = accounts
            .as_array()
            .ok_or_else(|| ProbeError::network("eth_requestAccounts result must be an array"))?;
        let parsed = list
            .iter()
            .map(|v| {
                v.as_str()
                    .ok_or_else(|| ProbeError::network("eth_requestAccounts item must be a string"))?
                    .parse::<Address>()
                    .map_err(|e| ProbeError::network(format!("wallet returned a bad address: {}", e)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if !parsed.is_empty() {
            if let Err(e) = self.bind_chain().await {
                leptos::logging::warn!("wallet stayed on another chain: {}", e);
            }
        }
        Ok(parsed)
    }
}

fn browser_provider() -> Result<JsValue, ProbeError> {
    let window = web_sys::window()
        .ok_or_else(|| ProbeError::Configuration("missing window".into()))?;
    let provider = get_prop(&window.into(), "ethereum")?;
    if provider.is_null() || provider.is_undefined() {
        return Err(ProbeError::Configuration(
            "no injected wallet found (window.ethereum missing)".into(),
        ));
    }
    Ok(provider)
}

fn get_prop(target: &JsValue, key: &str) -> Result<JsValue, ProbeError> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .map_err(|e| ProbeError::Configuration(format!("read provider property {} failed: {:?}", key, e)))
}

/// EIP-1193 rejections are `{ code, message }` objects.
fn rejection(e: &JsValue) -> Rejected {
    let code = get_prop(e, "code").ok().and_then(|c| c.as_f64()).map(|c| c as i64);
    let message = get_prop(e, "message")
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", e));
    Rejected { code, message }
}
