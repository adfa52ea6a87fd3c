//! Browser DOM layer for the weaver isolated editor canvas.
//!
//! This crate hosts editor content inside a same-origin `<iframe>`,
//! implementing the `weaver-frame-core` platform traits over `web-sys`. It
//! assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `document`: nested and host document access (head sync, stylesheet scan)
//! - `events`: nested event snapshots, re-dispatch on the iframe, listener guards
//! - `frame`: `IsolatedFrame`, the iframe element and its context lifecycle
//!
//! # Re-exports
//!
//! This crate re-exports `weaver-frame-core` for convenience, so consumers
//! only need to depend on `weaver-frame-browser`.

// Re-export core crate
pub use weaver_frame_core;
pub use weaver_frame_core::*;

pub mod document;
pub mod events;
pub mod frame;

pub use document::{BrowserHostDocument, BrowserNestedDocument, BrowserStylesheet};
pub use events::{BridgeListeners, FrameTarget, NestedEvent, build_event, install_bridge};
pub use frame::IsolatedFrame;

/// Convert a thrown JS value into a platform error with some context.
pub(crate) fn js_error(context: &str, err: wasm_bindgen::JsValue) -> PlatformError {
    PlatformError(format!("{context}: {err:?}"))
}
