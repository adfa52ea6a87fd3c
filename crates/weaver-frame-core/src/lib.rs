//! weaver-frame-core: isolated editor canvas logic without DOM dependencies.
//!
//! This crate provides:
//! - `FrameConfig` - embedding element attributes, head markup and stylesheets
//! - `sync_head` - one-shot population of a nested document's head
//! - `SheetKey` - identity for host stylesheets mirrored into the frame
//! - `BridgedEvent` / `bridge_event` - explicit snapshots of nested input events
//!   re-dispatched on the embedding element
//! - `FrameLifecycle` - per-document generations with symmetric setup/teardown
//!
//! Everything DOM-shaped goes through the traits in `platform`, so the same
//! logic runs in the browser crate and against the in-memory fakes in tests.

pub mod bridge;
pub mod error;
pub mod event;
pub mod head;
pub mod lifecycle;
pub mod platform;
pub mod stylesheet;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use bridge::{DispatchOutcome, bridge_event};
pub use error::{FrameError, PlatformError, SheetAccessError};
pub use event::{
    BridgedEvent, BridgedEventKind, EventFamily, EventFlags, EventInit, FrameOffset,
    KeyboardFields, Modifiers, PointerFields,
};
pub use head::{HeadSyncReport, sync_head};
pub use lifecycle::{ContextId, FrameLifecycle, Transition};
pub use platform::{BridgeTarget, HostDocument, HostStylesheet, NestedDocument, SourceEvent};
pub use smol_str::SmolStr;
pub use stylesheet::{
    HostScan, MIRROR_ATTRIBUTE, SheetKey, SheetMatch, classify_sheet, scan_host_stylesheets,
    targets_marker,
};
pub use types::{
    DEFAULT_FRAME_NAME, DEFAULT_FRAME_TITLE, FrameConfig, FrameStyle, MARKER_CLASS,
    MARKER_SELECTOR,
};
