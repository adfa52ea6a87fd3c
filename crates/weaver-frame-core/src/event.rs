//! Snapshots of nested-document input events.
//!
//! Events observed inside the frame are captured into a `BridgedEvent` with an
//! explicit field list per event family, then rebuilt on the host side. Only
//! the fields listed here survive the trip; engine-specific or custom
//! properties on the original event are not carried over.

use smol_str::SmolStr;

use crate::FrameError;

/// The closed set of event types re-dispatched on the embedding element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgedEventKind {
    KeyDown,
    KeyPress,
    DragOver,
}

impl BridgedEventKind {
    /// All bridged kinds, in registration order.
    pub const ALL: [BridgedEventKind; 3] = [Self::KeyDown, Self::KeyPress, Self::DragOver];

    /// DOM event type name.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::KeyDown => "keydown",
            Self::KeyPress => "keypress",
            Self::DragOver => "dragover",
        }
    }

    /// Look up the kind for a DOM event type name.
    pub fn from_event_type(event_type: &str) -> Result<Self, FrameError> {
        match event_type {
            "keydown" => Ok(Self::KeyDown),
            "keypress" => Ok(Self::KeyPress),
            "dragover" => Ok(Self::DragOver),
            other => Err(FrameError::UnsupportedEvent(other.to_string())),
        }
    }

    /// Which event constructor rebuilds this kind.
    pub fn family(&self) -> EventFamily {
        match self {
            Self::KeyDown | Self::KeyPress => EventFamily::Keyboard,
            Self::DragOver => EventFamily::Drag,
        }
    }
}

impl std::fmt::Display for BridgedEventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.event_type())
    }
}

/// Event constructor families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFamily {
    /// `KeyboardEvent`
    Keyboard,
    /// `DragEvent`, a pointer-family event.
    Drag,
}

impl EventFamily {
    /// Pointer-family events carry viewport coordinates that need translating.
    pub fn is_pointer(&self) -> bool {
        matches!(self, Self::Drag)
    }
}

/// `EventInit` flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EventFlags {
    pub bubbles: bool,
    pub cancelable: bool,
    pub composed: bool,
}

/// Modifier key state, shared by keyboard and pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyboardFields {
    pub key: SmolStr,
    pub code: SmolStr,
    pub location: u32,
    pub repeat: bool,
    pub is_composing: bool,
    /// Legacy fields, still read by older shortcut handlers.
    pub char_code: u32,
    pub key_code: u32,
    pub which: u32,
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerFields {
    pub client_x: i32,
    pub client_y: i32,
    pub screen_x: i32,
    pub screen_y: i32,
    pub button: i16,
    pub buttons: u16,
    pub modifiers: Modifiers,
}

/// Family-specific init data. `P` is the platform's drag payload handle.
#[derive(Debug, Clone, PartialEq)]
pub enum EventInit<P> {
    Keyboard(KeyboardFields),
    Drag {
        pointer: PointerFields,
        data_transfer: Option<P>,
    },
}

/// Position of the embedding element's top-left corner in host viewport
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameOffset {
    pub left: f64,
    pub top: f64,
}

impl FrameOffset {
    pub fn new(left: f64, top: f64) -> Self {
        Self { left, top }
    }
}

/// One nested-document event, captured for re-dispatch on the host.
#[derive(Debug, Clone, PartialEq)]
pub struct BridgedEvent<P> {
    pub kind: BridgedEventKind,
    pub flags: EventFlags,
    pub init: EventInit<P>,
}

impl<P> BridgedEvent<P> {
    pub fn keyboard(kind: BridgedEventKind, flags: EventFlags, fields: KeyboardFields) -> Self {
        Self {
            kind,
            flags,
            init: EventInit::Keyboard(fields),
        }
    }

    pub fn drag(
        kind: BridgedEventKind,
        flags: EventFlags,
        pointer: PointerFields,
        data_transfer: Option<P>,
    ) -> Self {
        Self {
            kind,
            flags,
            init: EventInit::Drag {
                pointer,
                data_transfer,
            },
        }
    }

    pub fn family(&self) -> EventFamily {
        self.kind.family()
    }

    /// Map nested viewport coordinates into the host viewport.
    ///
    /// Pointer-family client coordinates are shifted by the frame offset and
    /// truncated toward zero, matching a WebIDL `long` conversion. Screen
    /// coordinates are already global and stay as they are.
    pub fn translated(mut self, offset: FrameOffset) -> Self {
        if let EventInit::Drag { pointer, .. } = &mut self.init {
            pointer.client_x = shift(pointer.client_x, offset.left);
            pointer.client_y = shift(pointer.client_y, offset.top);
        }
        self
    }

    /// Pointer fields, if this is a pointer-family event.
    pub fn pointer(&self) -> Option<&PointerFields> {
        match &self.init {
            EventInit::Drag { pointer, .. } => Some(pointer),
            EventInit::Keyboard(_) => None,
        }
    }

    pub fn keyboard_fields(&self) -> Option<&KeyboardFields> {
        match &self.init {
            EventInit::Keyboard(fields) => Some(fields),
            EventInit::Drag { .. } => None,
        }
    }
}

fn shift(coordinate: i32, by: f64) -> i32 {
    (f64::from(coordinate) + by).trunc() as i32
}
