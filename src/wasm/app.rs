//! TipJarApp: the page-facing object
//!
//! Every method resolves to a snapshot (`{connected, account, balance,
//! balanceWei, status, failed}`); failures land in `status`, never as a
//! rejected promise. A trigger that arrives while another operation is still
//! pending is dropped and the current snapshot is returned.

use serde::Serialize;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use super::{log, log_warn, BrowserTransport};
use crate::config::TipJarConfig;
use crate::provider::RpcWallet;
use crate::session::{Exclusive, SessionSnapshot, WalletSession};

type BrowserSession = WalletSession<RpcWallet<BrowserTransport>>;

#[wasm_bindgen]
pub struct TipJarApp {
    session: Exclusive<BrowserSession>,
    last: RefCell<SessionSnapshot>,
}

#[wasm_bindgen]
impl TipJarApp {
    /// Detect `window.ethereum` and bind the bundled contract.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<TipJarApp, JsValue> {
        let config = TipJarConfig::from_bundled().map_err(|e| JsValue::from_str(&e.to_string()))?;
        let provider = detect_wallet(&config);
        log!("[TipJar] contract {} (wallet {})", config.contract_address, if provider.is_some() { "found" } else { "missing" });
        let session = WalletSession::new(provider, config);
        let last = session.snapshot();
        Ok(Self { session: Exclusive::new(session), last: RefCell::new(last) })
    }

    #[wasm_bindgen(getter)]
    pub fn snapshot(&self) -> JsValue {
        to_js(&self.last.borrow())
    }

    #[wasm_bindgen(getter)]
    pub fn busy(&self) -> bool {
        self.session.is_held()
    }

    pub async fn connect(&self) -> JsValue {
        let Some(mut session) = self.acquire("connect") else { return self.snapshot() };
        // extensions may inject after the page loaded
        if session.provider().is_none() {
            if let Some(wallet) = detect_wallet(session.config()) {
                log!("[TipJar] wallet found");
                session.set_provider(Some(wallet));
            }
        }
        let _ = session.connect().await;
        self.release(session)
    }

    #[wasm_bindgen(js_name = "loadBalance")]
    pub async fn load_balance(&self) -> JsValue {
        let Some(mut session) = self.acquire("loadBalance") else { return self.snapshot() };
        let _ = session.fetch_balance().await;
        self.release(session)
    }

    #[wasm_bindgen(js_name = "sendTip")]
    pub async fn send_tip(&self, amount: String) -> JsValue {
        let Some(mut session) = self.acquire("sendTip") else { return self.snapshot() };
        let _ = session.send_tip(&amount).await;
        self.release(session)
    }

    #[wasm_bindgen(js_name = "withdrawTips")]
    pub async fn withdraw_tips(&self) -> JsValue {
        let Some(mut session) = self.acquire("withdrawTips") else { return self.snapshot() };
        let _ = session.withdraw().await;
        self.release(session)
    }
}

impl TipJarApp {
    fn acquire(&self, op: &str) -> Option<BrowserSession> {
        let session = self.session.acquire(op);
        if session.is_none() {
            log_warn!("[TipJar] {} ignored: another operation is pending", op);
        }
        session
    }

    fn release(&self, session: BrowserSession) -> JsValue {
        let snapshot = session.snapshot();
        log!("[TipJar] {}", snapshot.status);
        *self.last.borrow_mut() = snapshot;
        self.session.release(session);
        self.snapshot()
    }
}

fn detect_wallet(config: &TipJarConfig) -> Option<RpcWallet<BrowserTransport>> {
    BrowserTransport::detect().map(|t| RpcWallet::from_config(t, config))
}

fn to_js(snapshot: &SessionSnapshot) -> JsValue {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_maps_as_objects(true);
    snapshot.serialize(&serializer).unwrap_or(JsValue::NULL)
}
