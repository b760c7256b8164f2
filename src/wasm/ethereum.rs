//! BrowserTransport - EIP-1193 `window.ethereum`.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

use super::log_warn;
use crate::provider::{ProviderError, Transport};

#[wasm_bindgen]
extern "C" {
    /// Injected provider object.
    #[derive(Clone)]
    pub type Eip1193;

    #[wasm_bindgen(method, catch)]
    async fn request(this: &Eip1193, args: JsValue) -> Result<JsValue, JsValue>;
}

#[derive(Serialize)]
struct RequestArguments<'a> {
    method: &'a str,
    params: &'a Value,
}

/// Holds the window it was found on, so timers always have a host.
#[derive(Clone)]
pub struct BrowserTransport {
    window: web_sys::Window,
    ethereum: Eip1193,
}

impl BrowserTransport {
    /// `None` when the page has no injected wallet.
    pub fn detect() -> Option<Self> {
        let window = web_sys::window()?;
        let ethereum = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum")).ok()?;
        if ethereum.is_undefined() || ethereum.is_null() {
            return None;
        }
        Some(Self { window, ethereum: ethereum.unchecked_into() })
    }
}

fn to_provider_error(err: JsValue) -> ProviderError {
    let field = |name: &str| js_sys::Reflect::get(&err, &JsValue::from_str(name)).ok();
    let message = field("message")
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    match field("code").and_then(|c| c.as_f64()) {
        Some(code) => ProviderError::rpc(code as i64, message),
        None => ProviderError::Other(message),
    }
}

#[async_trait(?Send)]
impl Transport for BrowserTransport {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let args = RequestArguments { method, params: &params }
            .serialize(&serializer)
            .map_err(|e| ProviderError::Other(e.to_string()))?;
        let result = self.ethereum.request(args).await.map_err(to_provider_error)?;
        if result.is_undefined() {
            return Ok(Value::Null);
        }
        serde_wasm_bindgen::from_value(result)
            .map_err(|e| ProviderError::Malformed { method: method.into(), reason: e.to_string() })
    }

    async fn sleep(&self, duration: Duration) {
        let millis = duration.as_millis().min(i32::MAX as u128) as i32;
        let promise = js_sys::Promise::new(&mut |resolve, _reject| {
            if let Err(err) = self.window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis) {
                // resolve now rather than leave the poll loop hanging
                log_warn!("[TipJar] setTimeout failed: {:?}", err);
                let _ = resolve.call0(&JsValue::UNDEFINED);
            }
        });
        let _ = JsFuture::from(promise).await;
    }
}
