//! DOM access for the nested and host documents.

use wasm_bindgen::JsCast;
use web_sys::{CssStyleRule, CssStyleSheet, Document, Element, HtmlElement, HtmlHeadElement, Node};
use weaver_frame_core::{
    HostDocument, HostStylesheet, MIRROR_ATTRIBUTE, NestedDocument, PlatformError,
    SheetAccessError, SheetKey,
};

use crate::js_error;

/// The iframe's content document.
#[derive(Debug, Clone)]
pub struct BrowserNestedDocument {
    document: Document,
}

impl BrowserNestedDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn body(&self) -> Result<HtmlElement, PlatformError> {
        self.document
            .body()
            .ok_or_else(|| PlatformError::from("nested document has no body"))
    }

    fn head(&self) -> Result<HtmlHeadElement, PlatformError> {
        self.document
            .head()
            .ok_or_else(|| PlatformError::from("nested document has no head"))
    }

    /// Move a content tree into the body.
    ///
    /// Appending adopts the node, so it leaves whatever document it was in.
    pub fn project(&self, node: &Node) -> Result<(), PlatformError> {
        self.body()?
            .append_child(node)
            .map_err(|e| js_error("project content", e))?;
        Ok(())
    }

    /// Elements in the head carrying a mirror key.
    pub fn mirrored_elements(&self) -> Vec<Element> {
        let Ok(list) = self
            .document
            .query_selector_all(&format!("[{MIRROR_ATTRIBUTE}]"))
        else {
            return Vec::new();
        };
        // Nodes belong to the frame's realm, where host `instanceof` checks fail.
        (0..list.length())
            .filter_map(|i| list.item(i))
            .map(|node| node.unchecked_into::<Element>())
            .collect()
    }
}

impl NestedDocument for BrowserNestedDocument {
    type Node = Node;

    fn set_body_class(&self, class: &str) -> Result<(), PlatformError> {
        self.body()?.set_class_name(class);
        Ok(())
    }

    fn set_body_margin(&self, margin: &str) -> Result<(), PlatformError> {
        self.body()?
            .style()
            .set_property("margin", margin)
            .map_err(|e| js_error("set body margin", e))
    }

    fn set_dir(&self, dir: &str) {
        self.document.set_dir(dir);
    }

    fn replace_head(&self, markup: &str) -> Result<(), PlatformError> {
        self.head()?.set_inner_html(markup);
        Ok(())
    }

    fn append_style(&self, css: &str) -> Result<(), PlatformError> {
        let style = self
            .document
            .create_element("style")
            .map_err(|e| js_error("create style element", e))?;
        style.set_text_content(Some(css));
        self.head()?
            .append_child(&style)
            .map_err(|e| js_error("append style element", e))?;
        Ok(())
    }

    fn has_mirrored(&self, key: &SheetKey) -> bool {
        if key
            .owner_id()
            .is_some_and(|id| self.document.get_element_by_id(id).is_some())
        {
            return true;
        }
        // Compared by value rather than by selector; keys may contain quotes.
        self.mirrored_elements()
            .iter()
            .any(|el| el.get_attribute(MIRROR_ATTRIBUTE).as_deref() == Some(key.as_str()))
    }

    /// Appends a deep clone; the host's own node is left in place.
    fn mirror_into_head(&self, node: &Node, key: &SheetKey) -> Result<(), PlatformError> {
        let copy = node
            .clone_node_with_deep(true)
            .map_err(|e| js_error("clone stylesheet owner", e))?;
        let element = copy
            .dyn_ref::<Element>()
            .ok_or_else(|| PlatformError::from("stylesheet owner is not an element"))?;
        element
            .set_attribute(MIRROR_ATTRIBUTE, key.as_str())
            .map_err(|e| js_error("tag mirrored stylesheet", e))?;
        self.head()?
            .append_child(&copy)
            .map_err(|e| js_error("append mirrored stylesheet", e))?;
        Ok(())
    }
}

/// The page hosting the iframe. Only read.
#[derive(Debug, Clone)]
pub struct BrowserHostDocument {
    document: Document,
}

impl BrowserHostDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl HostDocument for BrowserHostDocument {
    type Sheet = BrowserStylesheet;

    fn dir(&self) -> String {
        self.document.dir()
    }

    fn stylesheets(&self) -> Vec<BrowserStylesheet> {
        let list = self.document.style_sheets();
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|sheet| sheet.dyn_into::<CssStyleSheet>().ok())
            .map(BrowserStylesheet::new)
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct BrowserStylesheet {
    sheet: CssStyleSheet,
}

impl BrowserStylesheet {
    pub fn new(sheet: CssStyleSheet) -> Self {
        Self { sheet }
    }
}

impl HostStylesheet for BrowserStylesheet {
    type Node = Node;

    fn rule_selectors(&self) -> Result<Vec<Option<String>>, SheetAccessError> {
        // Throws a SecurityError for cross-origin sheets.
        let rules = self
            .sheet
            .css_rules()
            .map_err(|e| SheetAccessError::new(format!("{e:?}")))?;

        Ok((0..rules.length())
            .filter_map(|i| rules.item(i))
            .map(|rule| {
                rule.dyn_ref::<CssStyleRule>()
                    .map(|style_rule| style_rule.selector_text())
            })
            .collect())
    }

    fn owner_node(&self) -> Option<Node> {
        self.sheet.owner_node()
    }

    fn owner_id(&self) -> Option<String> {
        self.sheet
            .owner_node()?
            .dyn_ref::<Element>()
            .map(|element| element.id())
    }

    fn href(&self) -> Option<String> {
        self.sheet.href().ok().flatten()
    }
}
