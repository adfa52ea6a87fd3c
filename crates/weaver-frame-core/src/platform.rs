//! Platform abstraction traits for frame hosting.
//!
//! These traits are the seam between the frame logic and the DOM. The browser
//! crate implements them over `web-sys` types; tests implement them over an
//! in-memory document.

use crate::bridge::DispatchOutcome;
use crate::error::{FrameError, PlatformError, SheetAccessError};
use crate::event::{BridgedEvent, FrameOffset};
use crate::stylesheet::SheetKey;

/// The document inside the nested browsing context.
///
/// Written only by the head synchronizer.
pub trait NestedDocument {
    /// Node type that can be mirrored from the host into this document.
    type Node;

    /// Set the body's class attribute (replacing any existing classes).
    fn set_body_class(&self, class: &str) -> Result<(), PlatformError>;

    /// Set the body's inline margin.
    fn set_body_margin(&self, margin: &str) -> Result<(), PlatformError>;

    /// Set the document's `dir`.
    fn set_dir(&self, dir: &str);

    /// Replace the head contents with pre-rendered markup.
    fn replace_head(&self, markup: &str) -> Result<(), PlatformError>;

    /// Append a `<style>` element with the given text to the head.
    fn append_style(&self, css: &str) -> Result<(), PlatformError>;

    /// Whether the stylesheet behind `key` is already in the document.
    ///
    /// True for a node tagged with the key, and, for keys derived from an
    /// owner id, for any element carrying that id (e.g. one supplied by the
    /// caller's head markup).
    fn has_mirrored(&self, key: &SheetKey) -> bool;

    /// Copy a host stylesheet's owner node into the head, tagged with `key`.
    /// The host node stays where it is.
    fn mirror_into_head(&self, node: &Self::Node, key: &SheetKey) -> Result<(), PlatformError>;
}

/// The hosting page's document. Read-only to the frame.
pub trait HostDocument {
    type Sheet: HostStylesheet;

    /// The document's `dir` attribute, empty when unset.
    fn dir(&self) -> String;

    /// Every stylesheet currently attached to the document, in document order.
    fn stylesheets(&self) -> Vec<Self::Sheet>;
}

/// One stylesheet of the host document.
pub trait HostStylesheet {
    type Node;

    /// Selector text of each top-level rule, `None` for rules without one
    /// (`@media`, `@font-face`, ...).
    ///
    /// Fails for sheets whose rules cannot be read, e.g. cross-origin sheets.
    fn rule_selectors(&self) -> Result<Vec<Option<String>>, SheetAccessError>;

    /// The `<style>` or `<link>` element that owns the sheet.
    fn owner_node(&self) -> Option<Self::Node>;

    /// The owner node's `id` attribute.
    fn owner_id(&self) -> Option<String>;

    /// The sheet's `href`, for linked sheets.
    fn href(&self) -> Option<String>;
}

/// An event observed inside the nested document.
pub trait SourceEvent {
    type Payload;

    /// Capture the event's bridged fields.
    fn snapshot(&self) -> Result<BridgedEvent<Self::Payload>, FrameError>;

    /// Suppress the event's default action.
    fn prevent_default(&self);
}

/// The embedding element that receives re-dispatched events.
pub trait BridgeTarget {
    type Payload;

    /// Current on-screen offset of the element.
    fn frame_offset(&self) -> FrameOffset;

    /// Construct and dispatch an event built from `event`.
    fn dispatch(&self, event: &BridgedEvent<Self::Payload>) -> Result<DispatchOutcome, FrameError>;
}
