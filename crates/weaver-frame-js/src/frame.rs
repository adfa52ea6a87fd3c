//! JsIsolatedFrame - the iframe host wrapper for JavaScript.

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlElement, HtmlIFrameElement, Node};

use weaver_frame_browser::{FrameError, IsolatedFrame};

use crate::types::{JsFrameConfig, JsHeadSyncReport, transition_name};

fn frame_error(err: FrameError) -> JsError {
    JsError::new(&err.to_string())
}

/// An editor canvas rendered in its own document.
///
/// Created with `JsIsolatedFrame.mount`; every method fails once
/// `unmount` has been called.
#[wasm_bindgen]
pub struct JsIsolatedFrame {
    inner: Option<IsolatedFrame>,
}

impl JsIsolatedFrame {
    fn frame(&self) -> Result<&IsolatedFrame, JsError> {
        self.inner
            .as_ref()
            .ok_or_else(|| frame_error(FrameError::NotMounted))
    }
}

#[wasm_bindgen]
impl JsIsolatedFrame {
    /// Create the iframe inside `container`.
    pub fn mount(container: &Element, config: JsFrameConfig) -> Result<JsIsolatedFrame, JsError> {
        let frame = IsolatedFrame::mount(container, config.into()).map_err(frame_error)?;
        Ok(Self { inner: Some(frame) })
    }

    /// Re-check the iframe's document.
    ///
    /// Returns `"inert"`, `"unchanged"`, `"attached"`, `"replaced"` or `"detached"`.
    pub fn refresh(&self) -> Result<String, JsError> {
        let transition = self.frame()?.refresh().map_err(frame_error)?;
        Ok(transition_name(&transition).to_string())
    }

    /// The iframe element in the host page.
    pub fn element(&self) -> Result<HtmlIFrameElement, JsError> {
        Ok(self.frame()?.element().clone())
    }

    /// The nested body, where editor content belongs.
    #[wasm_bindgen(js_name = contentRoot)]
    pub fn content_root(&self) -> Result<Option<HtmlElement>, JsError> {
        Ok(self.frame()?.content_root())
    }

    /// Move a content tree into the frame.
    pub fn project(&self, node: &Node) -> Result<(), JsError> {
        self.frame()?.project(node).map_err(frame_error)
    }

    /// Update the iframe's attributes. Head and styles apply to the next document.
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&self, config: JsFrameConfig) -> Result<(), JsError> {
        self.frame()?.set_config(config.into()).map_err(frame_error)
    }

    /// Generation number of the attached document, if any.
    pub fn context(&self) -> Result<Option<f64>, JsError> {
        Ok(self.frame()?.context().map(|id| id.get() as f64))
    }

    /// Report from the last head synchronization, or `null`.
    #[wasm_bindgen(js_name = lastReport)]
    pub fn last_report(&self) -> Result<JsValue, JsError> {
        match self.frame()?.last_report() {
            Some(report) => serde_wasm_bindgen::to_value(&JsHeadSyncReport::from(report))
                .map_err(|e| JsError::new(&format!("Serialization error: {}", e))),
            None => Ok(JsValue::NULL),
        }
    }

    /// Remove the iframe and every listener it installed.
    pub fn unmount(&mut self) {
        if let Some(frame) = self.inner.take() {
            frame.unmount();
        }
    }

    #[wasm_bindgen(getter, js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.inner.is_some()
    }
}
