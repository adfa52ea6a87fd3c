//! The iframe host for isolated editor content.
//!
//! `IsolatedFrame` owns an `<iframe>` in the host page. Each time the iframe
//! presents a new content document, the previous generation's listeners are
//! removed, the new document's head is populated, any projected content tree
//! is moved into its body and the event bridge is installed.

use std::cell::RefCell;
use std::rc::Rc;

use gloo_events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlIFrameElement, Node};
use weaver_frame_core::{
    ContextId, FrameConfig, FrameError, FrameLifecycle, HeadSyncReport, PlatformError, Transition,
    sync_head,
};

use crate::document::{BrowserHostDocument, BrowserNestedDocument};
use crate::events::{BridgeListeners, FrameTarget, install_bridge};
use crate::js_error;

struct FrameState {
    config: FrameConfig,
    lifecycle: FrameLifecycle<Document, BridgeListeners>,
    /// Caller's content tree, replayed into each new content document.
    projected: Option<Node>,
    last_report: Option<HeadSyncReport>,
}

/// An iframe hosting editor content in its own document.
pub struct IsolatedFrame {
    element: HtmlIFrameElement,
    host: Document,
    state: Rc<RefCell<FrameState>>,
    load_listener: Option<EventListener>,
}

impl IsolatedFrame {
    /// Create the iframe inside `container` and attach to its document.
    ///
    /// The initial document is usually available as soon as the iframe is in
    /// the page; if it is not, the frame stays inert until its `load` event.
    pub fn mount(container: &Element, config: FrameConfig) -> Result<Self, FrameError> {
        let host = gloo_utils::document();
        let element = host
            .create_element("iframe")
            .map_err(|e| js_error("create iframe", e))?
            .dyn_into::<HtmlIFrameElement>()
            .map_err(|_| PlatformError::from("created element is not an iframe"))?;
        apply_attributes(&element, None, &config)?;

        let state = Rc::new(RefCell::new(FrameState {
            config,
            lifecycle: FrameLifecycle::new(),
            projected: None,
            last_report: None,
        }));

        let load_listener = {
            let state = Rc::downgrade(&state);
            let frame_element = element.clone();
            let host = host.clone();
            EventListener::new(&element, "load", move |_| {
                let Some(state) = state.upgrade() else {
                    return;
                };
                if let Err(err) = refresh_state(&state, &frame_element, &host) {
                    tracing::warn!(%err, "frame refresh after load failed");
                }
            })
        };

        container
            .append_child(&element)
            .map_err(|e| js_error("append iframe", e))?;

        let frame = Self {
            element,
            host,
            state,
            load_listener: Some(load_listener),
        };
        frame.refresh()?;
        Ok(frame)
    }

    /// Reconcile with the iframe's current content document.
    pub fn refresh(&self) -> Result<Transition, FrameError> {
        refresh_state(&self.state, &self.element, &self.host)
    }

    /// The embedding element in the host page.
    pub fn element(&self) -> &HtmlIFrameElement {
        &self.element
    }

    /// Mount point for the caller's content tree.
    pub fn content_root(&self) -> Option<HtmlElement> {
        self.state.borrow().lifecycle.current_key()?.body()
    }

    /// Current context generation, if a document is attached.
    pub fn context(&self) -> Option<ContextId> {
        self.state.borrow().lifecycle.current()
    }

    /// What the last head synchronization did.
    pub fn last_report(&self) -> Option<HeadSyncReport> {
        self.state.borrow().last_report.clone()
    }

    pub fn config(&self) -> FrameConfig {
        self.state.borrow().config.clone()
    }

    /// Hand a content tree over to the frame.
    ///
    /// The node is moved into the content root, replacing any previously
    /// projected tree, and is moved again into every later content document.
    pub fn project(&self, node: &Node) -> Result<(), FrameError> {
        let mut state = self.state.borrow_mut();
        if let Some(previous) = state.projected.take() {
            if let Some(parent) = previous.parent_node() {
                parent
                    .remove_child(&previous)
                    .map_err(|e| js_error("remove projected content", e))?;
            }
        }
        if let Some(document) = state.lifecycle.current_key() {
            BrowserNestedDocument::new(document.clone()).project(node)?;
        }
        state.projected = Some(node.clone());
        Ok(())
    }

    /// Update the embedding element's attributes.
    ///
    /// Head markup and styles are applied to the next content document only;
    /// the current one is not re-synchronized.
    pub fn set_config(&self, config: FrameConfig) -> Result<(), FrameError> {
        let mut state = self.state.borrow_mut();
        apply_attributes(&self.element, Some(&state.config), &config)?;
        state.config = config;
        Ok(())
    }

    /// Remove the bridge listeners and the iframe.
    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        self.load_listener.take();
        match self.state.try_borrow_mut() {
            Ok(mut state) => {
                state.lifecycle.detach();
                state.projected = None;
            }
            Err(_) => tracing::warn!("frame state busy during teardown"),
        }
        self.element.remove();
    }
}

impl Drop for IsolatedFrame {
    fn drop(&mut self) {
        if self.load_listener.is_some() {
            self.teardown();
        }
    }
}

fn refresh_state(
    state: &RefCell<FrameState>,
    element: &HtmlIFrameElement,
    host: &Document,
) -> Result<Transition, FrameError> {
    let mut state = state.borrow_mut();
    let FrameState {
        config,
        lifecycle,
        projected,
        last_report,
    } = &mut *state;

    let transition = lifecycle.observe(element.content_document(), |document, context| {
        let nested = BrowserNestedDocument::new(document.clone());
        let report = sync_head(&nested, &BrowserHostDocument::new(host.clone()), config)?;
        if let Some(node) = projected.as_ref() {
            nested.project(node)?;
        }
        *last_report = Some(report);
        tracing::debug!(%context, "frame document ready");
        Ok(install_bridge(document, FrameTarget::new(element.clone())))
    })?;

    Ok(transition)
}

/// Apply `config`'s attributes, removing ones only `previous` set.
fn apply_attributes(
    element: &Element,
    previous: Option<&FrameConfig>,
    config: &FrameConfig,
) -> Result<(), FrameError> {
    let attributes = config.element_attributes()?;

    if let Some(previous) = previous {
        for (name, _) in previous.element_attributes()? {
            if !attributes.iter().any(|(current, _)| *current == name) {
                element
                    .remove_attribute(name)
                    .map_err(|e| js_error("remove frame attribute", e))?;
            }
        }
    }

    for (name, value) in attributes {
        element
            .set_attribute(name, value)
            .map_err(|e| js_error("set frame attribute", e))?;
    }
    Ok(())
}
