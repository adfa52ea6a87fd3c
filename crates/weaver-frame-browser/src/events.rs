//! Keyboard and drag event bridging from the frame to the host page.
//!
//! Listeners on the nested document snapshot each bridged event, rebuild it
//! with the host's constructors and dispatch it on the iframe element, so
//! page-level shortcut and drop-zone handlers see input that happens inside
//! the frame.

use std::rc::Rc;

use gloo_events::{EventListener, EventListenerOptions};
use wasm_bindgen::JsCast;
use web_sys::{
    DataTransfer, Document, DragEvent, DragEventInit, Event, HtmlIFrameElement, KeyboardEvent,
    KeyboardEventInit,
};
use weaver_frame_core::{
    BridgeTarget, BridgedEvent, BridgedEventKind, DispatchOutcome, EventFamily, EventFlags,
    EventInit, FrameError, FrameOffset, KeyboardFields, Modifiers, PointerFields, SourceEvent,
    bridge_event,
};

use crate::js_error;

/// An event delivered to a listener on the nested document.
pub struct NestedEvent<'a> {
    event: &'a Event,
}

impl<'a> NestedEvent<'a> {
    pub fn new(event: &'a Event) -> Self {
        Self { event }
    }
}

impl SourceEvent for NestedEvent<'_> {
    type Payload = DataTransfer;

    fn snapshot(&self) -> Result<BridgedEvent<DataTransfer>, FrameError> {
        let kind = BridgedEventKind::from_event_type(&self.event.type_())?;
        let flags = EventFlags {
            bubbles: self.event.bubbles(),
            cancelable: self.event.cancelable(),
            composed: self.event.composed(),
        };

        // The event comes from the frame's realm, so host `instanceof` checks
        // would fail; the type name already fixes the interface.
        Ok(match kind.family() {
            EventFamily::Keyboard => {
                let event = self.event.unchecked_ref::<KeyboardEvent>();
                BridgedEvent::keyboard(kind, flags, keyboard_fields(event))
            }
            EventFamily::Drag => {
                let event = self.event.unchecked_ref::<DragEvent>();
                BridgedEvent::drag(kind, flags, pointer_fields(event), event.data_transfer())
            }
        })
    }

    fn prevent_default(&self) {
        self.event.prevent_default();
    }
}

fn keyboard_fields(event: &KeyboardEvent) -> KeyboardFields {
    KeyboardFields {
        key: event.key().into(),
        code: event.code().into(),
        location: event.location(),
        repeat: event.repeat(),
        is_composing: event.is_composing(),
        char_code: event.char_code(),
        key_code: event.key_code(),
        which: event.which(),
        modifiers: Modifiers {
            ctrl: event.ctrl_key(),
            shift: event.shift_key(),
            alt: event.alt_key(),
            meta: event.meta_key(),
        },
    }
}

fn pointer_fields(event: &DragEvent) -> PointerFields {
    PointerFields {
        client_x: event.client_x(),
        client_y: event.client_y(),
        screen_x: event.screen_x(),
        screen_y: event.screen_y(),
        button: event.button(),
        buttons: event.buttons(),
        modifiers: Modifiers {
            ctrl: event.ctrl_key(),
            shift: event.shift_key(),
            alt: event.alt_key(),
            meta: event.meta_key(),
        },
    }
}

/// Construct a host-realm DOM event from a snapshot.
pub fn build_event(event: &BridgedEvent<DataTransfer>) -> Result<Event, FrameError> {
    let event_type = event.kind.event_type();
    let flags = event.flags;

    match &event.init {
        EventInit::Keyboard(fields) => {
            let init = KeyboardEventInit::new();
            init.set_bubbles(flags.bubbles);
            init.set_cancelable(flags.cancelable);
            init.set_composed(flags.composed);
            init.set_key(&fields.key);
            init.set_code(&fields.code);
            init.set_location(fields.location);
            init.set_repeat(fields.repeat);
            init.set_is_composing(fields.is_composing);
            init.set_char_code(fields.char_code);
            init.set_key_code(fields.key_code);
            init.set_which(fields.which);
            init.set_ctrl_key(fields.modifiers.ctrl);
            init.set_shift_key(fields.modifiers.shift);
            init.set_alt_key(fields.modifiers.alt);
            init.set_meta_key(fields.modifiers.meta);

            KeyboardEvent::new_with_keyboard_event_init_dict(event_type, &init)
                .map(Event::from)
                .map_err(|e| js_error("construct KeyboardEvent", e).into())
        }
        EventInit::Drag {
            pointer,
            data_transfer,
        } => {
            let init = DragEventInit::new();
            init.set_bubbles(flags.bubbles);
            init.set_cancelable(flags.cancelable);
            init.set_composed(flags.composed);
            init.set_client_x(pointer.client_x);
            init.set_client_y(pointer.client_y);
            init.set_screen_x(pointer.screen_x);
            init.set_screen_y(pointer.screen_y);
            init.set_button(pointer.button);
            init.set_buttons(pointer.buttons);
            init.set_ctrl_key(pointer.modifiers.ctrl);
            init.set_shift_key(pointer.modifiers.shift);
            init.set_alt_key(pointer.modifiers.alt);
            init.set_meta_key(pointer.modifiers.meta);
            init.set_data_transfer(data_transfer.as_ref());

            DragEvent::new_with_event_init_dict(event_type, &init)
                .map(Event::from)
                .map_err(|e| js_error("construct DragEvent", e).into())
        }
    }
}

/// The iframe element as the dispatch target for bridged events.
#[derive(Debug, Clone)]
pub struct FrameTarget {
    element: HtmlIFrameElement,
}

impl FrameTarget {
    pub fn new(element: HtmlIFrameElement) -> Self {
        Self { element }
    }
}

impl BridgeTarget for FrameTarget {
    type Payload = DataTransfer;

    fn frame_offset(&self) -> FrameOffset {
        let rect = self.element.get_bounding_client_rect();
        FrameOffset::new(rect.left(), rect.top())
    }

    fn dispatch(&self, event: &BridgedEvent<DataTransfer>) -> Result<DispatchOutcome, FrameError> {
        let built = build_event(event)?;
        let not_cancelled = self
            .element
            .dispatch_event(&built)
            .map_err(|e| js_error("dispatch bridged event", e))?;
        Ok(DispatchOutcome::from_dispatch_result(not_cancelled))
    }
}

/// Listeners for every bridged event type on one nested document.
///
/// Dropping this removes all of them at once.
pub struct BridgeListeners {
    listeners: Vec<EventListener>,
}

impl BridgeListeners {
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// Register the bridge on `nested`, dispatching onto `target`.
pub fn install_bridge(nested: &Document, target: FrameTarget) -> BridgeListeners {
    let target = Rc::new(target);

    let listeners = BridgedEventKind::ALL
        .iter()
        .map(|kind| {
            let target = target.clone();
            // Not passive: cancellation on the host must reach the original.
            EventListener::new_with_options(
                nested,
                kind.event_type(),
                EventListenerOptions::enable_prevent_default(),
                move |event| {
                    let source = NestedEvent::new(event);
                    if let Err(err) = bridge_event(&source, target.as_ref()) {
                        tracing::error!(
                            %err,
                            event_type = %event.type_(),
                            "frame event bridge failed"
                        );
                        wasm_bindgen::throw_str(&err.to_string());
                    }
                },
            )
        })
        .collect();

    BridgeListeners { listeners }
}
