//! WASM module: the tip jar page's logic, exported to JavaScript.
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          TipJarApp (JS API)             │
//! │  connect, loadBalance, sendTip,         │
//! │  withdrawTips, snapshot                 │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │     WalletSession<RpcWallet<...>>       │
//! └─────────────────┬───────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────┐
//! │   BrowserTransport → window.ethereum    │
//! │   request({method, params}), setTimeout │
//! └─────────────────────────────────────────┘
//! ```

mod app;
mod ethereum;

pub use app::TipJarApp;
pub use ethereum::BrowserTransport;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

pub fn console_log(s: &str) {
    web_sys::console::log_1(&JsValue::from_str(s));
}

pub fn console_warn(s: &str) {
    web_sys::console::warn_1(&JsValue::from_str(s));
}

macro_rules! log {
    ($($t:tt)*) => {
        crate::wasm::console_log(&format!($($t)*))
    }
}

macro_rules! log_warn {
    ($($t:tt)*) => {
        crate::wasm::console_warn(&format!($($t)*))
    }
}

pub(crate) use log;
pub(crate) use log_warn;
