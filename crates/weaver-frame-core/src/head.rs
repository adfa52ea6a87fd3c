//! One-shot population of the nested document.
//!
//! Runs once per context generation, after the nested document exists:
//!
//! 1. body class := marker class, body margin := 0, `dir` copied from the host
//! 2. head := caller's pre-rendered markup
//! 3. caller's stylesheets appended in order, so later entries cascade over
//!    earlier ones and over markup-supplied styles
//! 4. host stylesheets targeting the marker class mirrored in, keyed by
//!    `SheetKey`
//!
//! Step 2 replaces the head wholesale, so a repeated pass against the same
//! document leaves a single copy of every injected style.

use crate::error::FrameError;
use crate::platform::{HostDocument, HostStylesheet, NestedDocument};
use crate::stylesheet::{SheetKey, scan_host_stylesheets};
use crate::types::{FrameConfig, MARKER_CLASS};

/// What a synchronization pass did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadSyncReport {
    /// Caller stylesheets appended.
    pub styles_injected: usize,
    /// Host stylesheets newly mirrored, in order.
    pub mirrored: Vec<SheetKey>,
    /// Matching host stylesheets already present in the frame.
    pub already_mirrored: usize,
    /// Host stylesheets whose rules could not be read.
    pub inaccessible: usize,
}

/// Populate `nested` from `config` and the host document.
pub fn sync_head<N, H>(
    nested: &N,
    host: &H,
    config: &FrameConfig,
) -> Result<HeadSyncReport, FrameError>
where
    N: NestedDocument,
    H: HostDocument,
    H::Sheet: HostStylesheet<Node = N::Node>,
{
    nested.set_body_class(MARKER_CLASS)?;
    nested.set_body_margin("0px")?;
    nested.set_dir(&host.dir());

    nested.replace_head(&config.head)?;

    let mut report = HeadSyncReport::default();
    for style in &config.styles {
        nested.append_style(&style.css)?;
        report.styles_injected += 1;
    }

    let scan = scan_host_stylesheets(host);
    report.inaccessible = scan.inaccessible;
    for (key, node) in scan.matches {
        if nested.has_mirrored(&key) {
            report.already_mirrored += 1;
            continue;
        }
        nested.mirror_into_head(&node, &key)?;
        report.mirrored.push(key);
    }

    tracing::debug!(
        styles = report.styles_injected,
        mirrored = report.mirrored.len(),
        already_mirrored = report.already_mirrored,
        inaccessible = report.inaccessible,
        "frame head synchronized"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeHost, FakeNested, FakeSheet, HeadEntry};
    use crate::types::FrameStyle;

    fn sel(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    fn config(head: &str, styles: &[&str]) -> FrameConfig {
        FrameConfig::new()
            .with_head(head)
            .with_styles(styles.iter().map(|css| FrameStyle::new(*css)))
    }

    #[test]
    fn test_meta_then_style_scenario() {
        let nested = FakeNested::new();
        let host = FakeHost::new("ltr");

        sync_head(&nested, &host, &config("<meta>", &["body{color:red}"])).unwrap();

        assert_eq!(
            nested.head(),
            vec![
                HeadEntry::Markup("<meta>".to_string()),
                HeadEntry::Style("body{color:red}".to_string()),
            ]
        );
    }

    #[test]
    fn test_body_and_direction() {
        let nested = FakeNested::new();
        let host = FakeHost::new("rtl");

        sync_head(&nested, &host, &FrameConfig::default()).unwrap();

        assert_eq!(nested.body_class(), "editor-styles-wrapper");
        assert_eq!(nested.body_margin(), "0px");
        assert_eq!(nested.dir(), "rtl");
    }

    #[test]
    fn test_style_order_preserved_after_markup() {
        let nested = FakeNested::new();
        let host = FakeHost::new("ltr");

        let report = sync_head(&nested, &host, &config("<link>", &["A", "B", "C"])).unwrap();

        assert_eq!(report.styles_injected, 3);
        assert_eq!(
            nested.head(),
            vec![
                HeadEntry::Markup("<link>".to_string()),
                HeadEntry::Style("A".to_string()),
                HeadEntry::Style("B".to_string()),
                HeadEntry::Style("C".to_string()),
            ]
        );
    }

    #[test]
    fn test_mirrors_only_matching_sheet() {
        let nested = FakeNested::new();
        let host = FakeHost::new("ltr")
            .with_sheet(FakeSheet::new(vec![sel("body"), sel("a:hover")]).with_id("admin"))
            .with_sheet(FakeSheet::inaccessible())
            .with_sheet(
                FakeSheet::new(vec![sel("p"), sel(".editor-styles-wrapper p")]).with_id("theme"),
            )
            .with_sheet(FakeSheet::new(vec![None, sel("h1")]));

        let report = sync_head(&nested, &host, &config("", &[])).unwrap();

        assert_eq!(report.mirrored.len(), 1);
        assert_eq!(report.mirrored[0].as_str(), "id:theme");
        assert_eq!(report.inaccessible, 1);
        assert_eq!(nested.mirrored_keys(), vec!["id:theme".to_string()]);
    }

    #[test]
    fn test_repeated_pass_is_idempotent() {
        let nested = FakeNested::new();
        let host = FakeHost::new("ltr")
            .with_sheet(FakeSheet::new(vec![sel(".editor-styles-wrapper")]).with_id("theme"));
        let config = config("<meta>", &["A", "B"]);

        sync_head(&nested, &host, &config).unwrap();
        let first = nested.head();
        sync_head(&nested, &host, &config).unwrap();

        assert_eq!(nested.head(), first);
        assert_eq!(nested.style_count(), 2);
        assert_eq!(nested.mirrored_keys(), vec!["id:theme".to_string()]);
    }

    #[test]
    fn test_surviving_mirror_is_not_duplicated() {
        let nested = FakeNested::new();
        let host = FakeHost::new("ltr")
            .with_sheet(FakeSheet::new(vec![sel(".editor-styles-wrapper")]).with_id("theme"))
            .with_sheet(FakeSheet::new(vec![sel(".editor-styles-wrapper em")]));

        sync_head(&nested, &host, &config("", &[])).unwrap();
        nested.keep_mirrors_on_replace(true);
        let report = sync_head(&nested, &host, &config("", &[])).unwrap();

        assert!(report.mirrored.is_empty());
        assert_eq!(report.already_mirrored, 2);
        assert_eq!(nested.mirrored_keys().len(), 2);
    }

    #[test]
    fn test_sheet_already_in_head_markup_is_not_mirrored() {
        let nested = FakeNested::new();
        let host = FakeHost::new("ltr").with_sheet(
            FakeSheet::new(vec![sel(".editor-styles-wrapper p")]).with_id("theme"),
        );

        let report =
            sync_head(&nested, &host, &config(r#"<style id="theme"></style>"#, &[])).unwrap();

        assert!(report.mirrored.is_empty());
        assert_eq!(report.already_mirrored, 1);
        assert_eq!(
            nested.head(),
            vec![HeadEntry::Markup(r#"<style id="theme"></style>"#.to_string())]
        );
    }

    #[test]
    fn test_platform_failure_propagates() {
        let nested = FakeNested::new();
        nested.fail_styles(true);
        let host = FakeHost::new("ltr");

        let err = sync_head(&nested, &host, &config("", &["A"])).unwrap_err();
        assert!(matches!(err, FrameError::Platform(_)));
    }
}
