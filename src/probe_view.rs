use leptos::*;

use crate::config::{ProbeConfig, APP_NAME};
use crate::context::RunContext;
use crate::error::ProbeError;
use crate::network::{NetworkKey, NetworkProfile};
use crate::probe::{run_and_report, ClientFactory, ProbeRequest};
use crate::rpc::{ChainReader, RpcClient};
use crate::wallet::{InjectedWallet, WalletProvider};

/// Routes run output into the page's log and status signals.
#[derive(Clone, Copy)]
pub struct SignalLog {
    set_out: WriteSignal<String>,
    set_status: WriteSignal<String>,
}

impl SignalLog {
    pub fn new(set_out: WriteSignal<String>, set_status: WriteSignal<String>) -> Self {
        Self { set_out, set_status }
    }
}

impl RunContext for SignalLog {
    fn clear(&self) {
        self.set_out.set(String::new());
    }

    fn append_line(&self, line: &str) {
        self.set_out.update(|out| {
            out.push_str(line);
            out.push('\n');
        });
    }

    fn set_status(&self, status: &str) {
        self.set_status.set(status.to_string());
    }
}

/// Injected wallet plus a direct HTTP reader against the profile's RPC URL.
pub struct BrowserClients;

impl ClientFactory for BrowserClients {
    fn wallet(&self, profile: &NetworkProfile) -> Result<Box<dyn WalletProvider>, ProbeError> {
        Ok(Box::new(InjectedWallet::new(profile)?))
    }

    fn reader(&self, profile: &NetworkProfile) -> Result<Box<dyn ChainReader>, ProbeError> {
        Ok(Box::new(RpcClient::for_profile(profile)))
    }
}

#[component]
pub fn ProbeView() -> impl IntoView {
    let (network, set_network) = create_signal(NetworkKey::default().as_str().to_string());
    let (contract, set_contract) = create_signal(String::new());
    let (token, set_token) = create_signal(String::new());

    let (out, set_out) = create_signal(String::new());
    let (status, set_status) = create_signal("Ready".to_string());
    let (running, set_running) = create_signal(false);

    let on_run = move |_| {
        if running.get_untracked() {
            return;
        }
        set_running.set(true);

        let request = ProbeRequest::new(network.get_untracked())
            .contract(contract.get_untracked())
            .token(token.get_untracked());
        let ctx = SignalLog::new(set_out, set_status);

        spawn_local(async move {
            let config = ProbeConfig::from_env();
            if let Err(e) = run_and_report(&ctx, &config, &BrowserClients, &request).await {
                leptos::logging::error!("probe failed: {}", e);
            }
            set_running.set(false);
        });
    };

    view! {
        <h1>{APP_NAME}</h1>

        <div class="field">
            <label for="network">"Network"</label>
            <select
                id="network"
                on:change=move |ev| set_network.set(event_target_value(&ev))
                prop:value=move || network.get()
            >
                {NetworkKey::ALL
                    .into_iter()
                    .map(|k| view! { <option value=k.as_str()>{k.chain_name()}</option> })
                    .collect_view()}
            </select>
        </div>

        <div class="field">
            <label for="contract">"Contract address (optional)"</label>
            <input
                id="contract"
                type="text"
                placeholder="0x..."
                on:input=move |ev| set_contract.set(event_target_value(&ev))
                prop:value=move || contract.get()
            />
        </div>

        <div class="field">
            <label for="token">"ERC-20 token address (optional)"</label>
            <input
                id="token"
                type="text"
                placeholder="0x..."
                on:input=move |ev| set_token.set(event_target_value(&ev))
                prop:value=move || token.get()
            />
        </div>

        <button id="run" on:click=on_run disabled=move || running.get()>
            "Run probe"
        </button>

        <div id="status" class="status">{move || status.get()}</div>
        <pre id="out" class="log">{move || out.get()}</pre>
    }
}
