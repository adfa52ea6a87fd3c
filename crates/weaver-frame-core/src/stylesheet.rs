//! Host stylesheet scanning and mirror identity.
//!
//! Host stylesheets that contain a rule targeting the marker class are copied
//! into the frame head so editor-level styles apply inside the frame too.
//! Copies are tagged with a `SheetKey` so repeated passes never duplicate them.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use smol_str::{SmolStr, format_smolstr};

use crate::error::SheetAccessError;
use crate::platform::{HostDocument, HostStylesheet};
use crate::types::MARKER_SELECTOR;

/// Attribute carrying the `SheetKey` on mirrored nodes.
pub const MIRROR_ATTRIBUTE: &str = "data-weaver-mirror";

/// Stable identity for a mirrored host stylesheet.
///
/// The owner node's `id` when it has a non-empty one, otherwise a hash of the
/// sheet's href and selector list. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SheetKey(SmolStr);

impl SheetKey {
    pub fn from_owner_id(id: &str) -> Option<Self> {
        let id = id.trim();
        if id.is_empty() {
            None
        } else {
            Some(Self(format_smolstr!("id:{}", id)))
        }
    }

    pub fn from_content(href: Option<&str>, selectors: &[Option<String>]) -> Self {
        let mut hasher = DefaultHasher::new();
        href.hash(&mut hasher);
        selectors.hash(&mut hasher);
        Self(format_smolstr!("hash:{:016x}", hasher.finish()))
    }

    /// Key for a sheet whose selectors have already been read.
    pub fn for_sheet<S: HostStylesheet>(sheet: &S, selectors: &[Option<String>]) -> Self {
        sheet
            .owner_id()
            .as_deref()
            .and_then(Self::from_owner_id)
            .unwrap_or_else(|| Self::from_content(sheet.href().as_deref(), selectors))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The owner element's id, for keys derived from one.
    pub fn owner_id(&self) -> Option<&str> {
        self.0.strip_prefix("id:")
    }
}

impl std::fmt::Display for SheetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of inspecting one host stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetMatch {
    /// At least one rule targets the marker class.
    Matched(SheetKey),
    NoMatch,
    /// Rules could not be read; skipped.
    Inaccessible(SheetAccessError),
}

/// Whether any selector mentions the marker class.
pub fn targets_marker(selectors: &[Option<String>]) -> bool {
    selectors
        .iter()
        .flatten()
        .any(|selector| selector.contains(MARKER_SELECTOR))
}

/// Inspect a single host stylesheet.
pub fn classify_sheet<S: HostStylesheet>(sheet: &S) -> SheetMatch {
    match sheet.rule_selectors() {
        Ok(selectors) if targets_marker(&selectors) => {
            SheetMatch::Matched(SheetKey::for_sheet(sheet, &selectors))
        }
        Ok(_) => SheetMatch::NoMatch,
        Err(e) => SheetMatch::Inaccessible(e),
    }
}

/// Host sheets to mirror, plus how many could not be read.
pub struct HostScan<N> {
    pub matches: Vec<(SheetKey, N)>,
    pub inaccessible: usize,
}

/// Scan every host stylesheet for rules targeting the marker class.
///
/// Inaccessible sheets are counted and skipped; the scan always covers every
/// sheet. Matching sheets without an owner node cannot be mirrored and are
/// dropped. Duplicate keys keep their first occurrence.
pub fn scan_host_stylesheets<H>(host: &H) -> HostScan<<H::Sheet as HostStylesheet>::Node>
where
    H: HostDocument,
{
    let mut matches: Vec<(SheetKey, _)> = Vec::new();
    let mut inaccessible = 0;

    for sheet in host.stylesheets() {
        match classify_sheet(&sheet) {
            SheetMatch::Matched(key) => {
                if matches.iter().any(|(existing, _)| *existing == key) {
                    continue;
                }
                match sheet.owner_node() {
                    Some(node) => matches.push((key, node)),
                    None => tracing::debug!(%key, "matching stylesheet has no owner node"),
                }
            }
            SheetMatch::NoMatch => {}
            SheetMatch::Inaccessible(e) => {
                tracing::trace!(href = ?sheet.href(), error = %e, "skipping stylesheet");
                inaccessible += 1;
            }
        }
    }

    HostScan {
        matches,
        inaccessible,
    }
}
