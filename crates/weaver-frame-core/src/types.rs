//! Frame configuration and shared constants.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Class set on the nested document's body.
///
/// Host styles written against this class are mirrored into the frame.
pub const MARKER_CLASS: &str = "editor-styles-wrapper";

/// Selector fragment searched for in host stylesheet rules.
pub const MARKER_SELECTOR: &str = ".editor-styles-wrapper";

pub const DEFAULT_FRAME_TITLE: &str = "Editor canvas";
pub const DEFAULT_FRAME_NAME: &str = "editor-canvas";

/// A literal stylesheet injected into the frame head.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameStyle {
    pub css: String,
}

impl FrameStyle {
    pub fn new(css: impl Into<String>) -> Self {
        Self { css: css.into() }
    }
}

/// Everything the caller supplies when mounting a frame.
///
/// `class_name`, `style` and `attributes` are forwarded to the embedding
/// element. `head` and `styles` populate the nested document once per
/// context generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Inline style text for the embedding element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Extra attributes, applied in name order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_name")]
    pub name: String,
    /// Pre-rendered head markup.
    #[serde(default)]
    pub head: String,
    /// Stylesheets appended after the head markup; later entries win.
    #[serde(default)]
    pub styles: Vec<FrameStyle>,
}

fn default_title() -> String {
    DEFAULT_FRAME_TITLE.to_string()
}

fn default_name() -> String {
    DEFAULT_FRAME_NAME.to_string()
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            class_name: None,
            style: None,
            attributes: BTreeMap::new(),
            title: default_title(),
            name: default_name(),
            head: String::new(),
            styles: Vec::new(),
        }
    }
}

impl FrameConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_head(mut self, head: impl Into<String>) -> Self {
        self.head = head.into();
        self
    }

    pub fn with_styles(mut self, styles: impl IntoIterator<Item = FrameStyle>) -> Self {
        self.styles.extend(styles);
        self
    }

    /// Attributes for the embedding element, in application order.
    ///
    /// `title` and `name` come last so pass-through attributes cannot
    /// override them. Names reserved for the frame itself are rejected.
    pub fn element_attributes(&self) -> Result<Vec<(&str, &str)>, crate::FrameError> {
        let mut attrs = Vec::with_capacity(self.attributes.len() + 4);
        for (name, value) in &self.attributes {
            let lower = name.to_ascii_lowercase();
            if name.is_empty() || lower == "src" || lower == "srcdoc" {
                return Err(crate::FrameError::InvalidConfig(format!(
                    "attribute {name:?} cannot be passed through"
                )));
            }
            attrs.push((name.as_str(), value.as_str()));
        }
        if let Some(class_name) = &self.class_name {
            attrs.push(("class", class_name.as_str()));
        }
        if let Some(style) = &self.style {
            attrs.push(("style", style.as_str()));
        }
        attrs.push(("title", self.title.as_str()));
        attrs.push(("name", self.name.as_str()));
        Ok(attrs)
    }
}
