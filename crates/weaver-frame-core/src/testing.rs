//! In-memory platform implementations for unit tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::bridge::DispatchOutcome;
use crate::error::{FrameError, PlatformError, SheetAccessError};
use crate::event::{BridgedEvent, FrameOffset};
use crate::platform::{BridgeTarget, HostDocument, HostStylesheet, NestedDocument, SourceEvent};
use crate::stylesheet::SheetKey;

/// Owner node of a fake host stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeOwner;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadEntry {
    Markup(String),
    Style(String),
    Mirror(String),
}

#[derive(Default)]
pub struct FakeNested {
    head: RefCell<Vec<HeadEntry>>,
    body_class: RefCell<String>,
    body_margin: RefCell<String>,
    dir: RefCell<String>,
    keep_mirrors: Cell<bool>,
    fail_styles: Cell<bool>,
}

impl FakeNested {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn head(&self) -> Vec<HeadEntry> {
        self.head.borrow().clone()
    }

    pub fn body_class(&self) -> String {
        self.body_class.borrow().clone()
    }

    pub fn body_margin(&self) -> String {
        self.body_margin.borrow().clone()
    }

    pub fn dir(&self) -> String {
        self.dir.borrow().clone()
    }

    pub fn style_count(&self) -> usize {
        self.head
            .borrow()
            .iter()
            .filter(|e| matches!(e, HeadEntry::Style(_)))
            .count()
    }

    pub fn mirrored_keys(&self) -> Vec<String> {
        self.head
            .borrow()
            .iter()
            .filter_map(|e| match e {
                HeadEntry::Mirror(key) => Some(key.clone()),
                _ => None,
            })
            .collect()
    }

    /// Keep mirrored entries when the head is replaced.
    pub fn keep_mirrors_on_replace(&self, keep: bool) {
        self.keep_mirrors.set(keep);
    }

    pub fn fail_styles(&self, fail: bool) {
        self.fail_styles.set(fail);
    }
}

impl NestedDocument for FakeNested {
    type Node = FakeOwner;

    fn set_body_class(&self, class: &str) -> Result<(), PlatformError> {
        *self.body_class.borrow_mut() = class.to_string();
        Ok(())
    }

    fn set_body_margin(&self, margin: &str) -> Result<(), PlatformError> {
        *self.body_margin.borrow_mut() = margin.to_string();
        Ok(())
    }

    fn set_dir(&self, dir: &str) {
        *self.dir.borrow_mut() = dir.to_string();
    }

    fn replace_head(&self, markup: &str) -> Result<(), PlatformError> {
        let mut head = self.head.borrow_mut();
        if self.keep_mirrors.get() {
            head.retain(|e| matches!(e, HeadEntry::Mirror(_)));
        } else {
            head.clear();
        }
        if !markup.is_empty() {
            head.push(HeadEntry::Markup(markup.to_string()));
        }
        Ok(())
    }

    fn append_style(&self, css: &str) -> Result<(), PlatformError> {
        if self.fail_styles.get() {
            return Err("style element rejected".into());
        }
        self.head.borrow_mut().push(HeadEntry::Style(css.to_string()));
        Ok(())
    }

    fn has_mirrored(&self, key: &SheetKey) -> bool {
        let id_attr = key.owner_id().map(|id| format!("id=\"{id}\""));
        self.head.borrow().iter().any(|e| match e {
            HeadEntry::Mirror(k) => k == key.as_str(),
            HeadEntry::Markup(markup) => id_attr
                .as_deref()
                .is_some_and(|attr| markup.contains(attr)),
            HeadEntry::Style(_) => false,
        })
    }

    fn mirror_into_head(&self, _node: &FakeOwner, key: &SheetKey) -> Result<(), PlatformError> {
        self.head
            .borrow_mut()
            .push(HeadEntry::Mirror(key.as_str().to_string()));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct FakeSheet {
    selectors: Result<Vec<Option<String>>, SheetAccessError>,
    id: Option<String>,
    href: Option<String>,
    has_owner: bool,
}

impl FakeSheet {
    pub fn new(selectors: Vec<Option<String>>) -> Self {
        Self {
            selectors: Ok(selectors),
            id: None,
            href: None,
            has_owner: true,
        }
    }

    /// A sheet that refuses rule access, like a cross-origin sheet.
    pub fn inaccessible() -> Self {
        Self {
            selectors: Err(SheetAccessError::new("SecurityError")),
            id: None,
            href: Some("https://fonts.example.com/sheet.css".to_string()),
            has_owner: true,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn without_owner(mut self) -> Self {
        self.has_owner = false;
        self
    }
}

impl HostStylesheet for FakeSheet {
    type Node = FakeOwner;

    fn rule_selectors(&self) -> Result<Vec<Option<String>>, SheetAccessError> {
        self.selectors.clone()
    }

    fn owner_node(&self) -> Option<FakeOwner> {
        self.has_owner.then_some(FakeOwner)
    }

    fn owner_id(&self) -> Option<String> {
        self.id.clone()
    }

    fn href(&self) -> Option<String> {
        self.href.clone()
    }
}

pub struct FakeHost {
    dir: String,
    sheets: Vec<FakeSheet>,
}

impl FakeHost {
    pub fn new(dir: &str) -> Self {
        Self {
            dir: dir.to_string(),
            sheets: Vec::new(),
        }
    }

    pub fn with_sheet(mut self, sheet: FakeSheet) -> Self {
        self.sheets.push(sheet);
        self
    }
}

impl HostDocument for FakeHost {
    type Sheet = FakeSheet;

    fn dir(&self) -> String {
        self.dir.clone()
    }

    fn stylesheets(&self) -> Vec<FakeSheet> {
        self.sheets.clone()
    }
}

/// Drag payload stand-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakePayload(pub &'static str);

pub struct FakeSource {
    pub event: Result<BridgedEvent<FakePayload>, FrameError>,
    pub prevented: Cell<bool>,
}

impl FakeSource {
    pub fn new(event: BridgedEvent<FakePayload>) -> Self {
        Self {
            event: Ok(event),
            prevented: Cell::new(false),
        }
    }

    pub fn failing(err: FrameError) -> Self {
        Self {
            event: Err(err),
            prevented: Cell::new(false),
        }
    }
}

impl SourceEvent for FakeSource {
    type Payload = FakePayload;

    fn snapshot(&self) -> Result<BridgedEvent<FakePayload>, FrameError> {
        self.event.clone()
    }

    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

/// Embedding element stand-in recording everything dispatched on it.
pub struct FakeTarget {
    pub offset: FrameOffset,
    pub cancel: bool,
    pub dispatched: RefCell<Vec<BridgedEvent<FakePayload>>>,
}

impl FakeTarget {
    pub fn new(offset: FrameOffset) -> Self {
        Self {
            offset,
            cancel: false,
            dispatched: RefCell::new(Vec::new()),
        }
    }

    pub fn cancelling(mut self) -> Self {
        self.cancel = true;
        self
    }
}

impl BridgeTarget for FakeTarget {
    type Payload = FakePayload;

    fn frame_offset(&self) -> FrameOffset {
        self.offset
    }

    fn dispatch(
        &self,
        event: &BridgedEvent<FakePayload>,
    ) -> Result<DispatchOutcome, FrameError> {
        self.dispatched.borrow_mut().push(event.clone());
        Ok(if self.cancel && event.flags.cancelable {
            DispatchOutcome::Cancelled
        } else {
            DispatchOutcome::Delivered
        })
    }
}

/// Per-generation guard counting live registrations.
pub struct FakeGuard {
    live: Rc<Cell<usize>>,
    count: usize,
}

impl FakeGuard {
    pub fn register(live: &Rc<Cell<usize>>, count: usize) -> Self {
        live.set(live.get() + count);
        Self {
            live: live.clone(),
            count,
        }
    }
}

impl Drop for FakeGuard {
    fn drop(&mut self) {
        self.live.set(self.live.get() - self.count);
    }
}
