//! Types exposed to JavaScript via wasm-bindgen.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;
use wasm_bindgen::prelude::*;
use weaver_frame_browser::{
    DEFAULT_FRAME_NAME, DEFAULT_FRAME_TITLE, FrameConfig, FrameStyle, HeadSyncReport, Transition,
};

/// Frame configuration as passed from JavaScript.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsFrameConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Extra attributes forwarded to the iframe element.
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Markup for the nested document's `<head>`.
    pub head: String,
    pub styles: Vec<JsFrameStyle>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct JsFrameStyle {
    pub css: String,
}

impl From<JsFrameConfig> for FrameConfig {
    fn from(config: JsFrameConfig) -> Self {
        FrameConfig {
            class_name: config.class_name,
            style: config.style,
            attributes: config.attributes,
            title: config.title.unwrap_or_else(|| DEFAULT_FRAME_TITLE.to_string()),
            name: config.name.unwrap_or_else(|| DEFAULT_FRAME_NAME.to_string()),
            head: config.head,
            styles: config
                .styles
                .into_iter()
                .map(|style| FrameStyle::new(style.css))
                .collect(),
        }
    }
}

/// Summary of the last head synchronization pass.
#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
#[serde(rename_all = "camelCase")]
pub struct JsHeadSyncReport {
    pub styles_injected: usize,
    /// Keys of host stylesheets copied in by this pass.
    pub mirrored: Vec<String>,
    pub already_mirrored: usize,
    /// Host stylesheets whose rules could not be read.
    pub inaccessible: usize,
}

impl From<HeadSyncReport> for JsHeadSyncReport {
    fn from(report: HeadSyncReport) -> Self {
        Self {
            styles_injected: report.styles_injected,
            mirrored: report.mirrored.iter().map(|key| key.to_string()).collect(),
            already_mirrored: report.already_mirrored,
            inaccessible: report.inaccessible,
        }
    }
}

/// Name of a lifecycle transition as reported to JavaScript.
pub fn transition_name(transition: &Transition) -> &'static str {
    match transition {
        Transition::Inert => "inert",
        Transition::Unchanged(_) => "unchanged",
        Transition::Attached(_) => "attached",
        Transition::Replaced { .. } => "replaced",
        Transition::Detached(_) => "detached",
    }
}
