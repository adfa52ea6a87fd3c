//! WASM bindings for the weaver isolated editor canvas.
//!
//! Lets JavaScript/TypeScript hosts render editor content inside a
//! same-origin iframe, with head styles synchronized and keyboard and drag
//! events forwarded to the embedding element.

mod frame;
mod types;

pub use frame::*;
pub use types::*;

use tracing::Level;
use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Route `tracing` output to the browser console.
///
/// `level` is one of `trace`, `debug`, `info`, `warn`, `error`. Defaults to
/// `debug` in debug builds and `info` otherwise. Only the first call installs
/// a subscriber.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) -> Result<(), JsError> {
    use tracing::subscriber::set_global_default;
    use tracing_subscriber::Registry;
    use tracing_subscriber::layer::SubscriberExt;

    let console_level = match level.as_deref() {
        Some(level) => level
            .parse::<Level>()
            .map_err(|e| JsError::new(&format!("Invalid log level: {}", e)))?,
        None if cfg!(debug_assertions) => Level::DEBUG,
        None => Level::INFO,
    };

    let wasm_layer = tracing_wasm::WASMLayer::new(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(console_level)
            .build(),
    );

    if set_global_default(Registry::default().with(wasm_layer)).is_err() {
        tracing::debug!("logging already initialized");
    }
    Ok(())
}
