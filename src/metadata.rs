//! Section metadata parsing.
//!
//! The module/section titles come from the page breadcrumb, the indices
//! from the first `M.N` display-index label. Both are parsed once per
//! extraction, before any content is touched or any asset fetch begins;
//! failure here aborts the whole run.

use crate::dom::{self, Document, Selection};
use crate::error::{ExtractError, Result};
use crate::markup;

/// Identity of the extracted section, used to name the output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionMetadata {
    /// Module number, the `M` of the `M.N` index label.
    pub module_index: u32,
    /// Module title from the breadcrumb (trimmed, non-empty).
    pub module_title: String,
    /// Section number, the `N` of the `M.N` index label.
    pub section_index: u32,
    /// Section title from the breadcrumb (trimmed, non-empty).
    pub section_title: String,
}

/// Parse section metadata from breadcrumb and index label.
pub fn parse_section_metadata(doc: &Document) -> Result<SectionMetadata> {
    let crumbs = doc.select(markup::BREADCRUMB_ITEMS);
    let crumb_nodes = crumbs.nodes();
    if crumb_nodes.len() < 2 {
        return Err(ExtractError::MissingMetadata(
            "couldn't find module and section title in breadcrumb".to_string(),
        ));
    }

    let module_title = trimmed_text(&Selection::from(crumb_nodes[0]));
    let section_title = trimmed_text(&Selection::from(crumb_nodes[1]));
    if module_title.is_empty() || section_title.is_empty() {
        return Err(ExtractError::MissingMetadata(
            "breadcrumb title is empty".to_string(),
        ));
    }

    let label = doc.select(markup::INDEX_LABEL);
    if !label.exists() {
        return Err(ExtractError::MissingMetadata(
            "couldn't find module and section index label".to_string(),
        ));
    }
    let label_text = trimmed_text(&label);
    let (module_index, section_index) = parse_index_label(&label_text)?;

    Ok(SectionMetadata {
        module_index,
        module_title,
        section_index,
        section_title,
    })
}

/// Split an `M.N` label into module and section numbers.
///
/// Chunk labels carry extra dotted segments (`M.N.C` with a per-chunk
/// counter); only the first two matter, the rest are ignored.
fn parse_index_label(label: &str) -> Result<(u32, u32)> {
    let malformed = || {
        ExtractError::MissingMetadata(format!("index label {label:?} is not of the form M.N"))
    };

    let mut segments = label.split('.');
    let module = segments.next().ok_or_else(malformed)?;
    let section = segments.next().ok_or_else(malformed)?;
    let module_index = module.trim().parse::<u32>().map_err(|_| malformed())?;
    let section_index = section.trim().parse::<u32>().map_err(|_| malformed())?;
    Ok((module_index, section_index))
}

fn trimmed_text(sel: &Selection) -> String {
    dom::text_content(sel).trim().to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn page(breadcrumb: &str, label: &str) -> Document {
        dom::parse(&format!(
            r#"<html><body>
                <ul class="breadcrumb">
                    <li class="home">Home</li>
                    {breadcrumb}
                </ul>
                <div class="container"><span class="current-li">{label}</span></div>
            </body></html>"#
        ))
    }

    #[test]
    fn test_parse_well_formed_metadata() {
        let doc = page("<li>Module Two</li><li>Getting Started</li>", "3.2");
        let meta = parse_section_metadata(&doc).unwrap();
        assert_eq!(meta.module_index, 3);
        assert_eq!(meta.section_index, 2);
        assert_eq!(meta.module_title, "Module Two");
        assert_eq!(meta.section_title, "Getting Started");
    }

    #[test]
    fn test_breadcrumb_text_is_trimmed() {
        let doc = page("<li>  Module Two </li><li> Getting Started\n</li>", "1.1");
        let meta = parse_section_metadata(&doc).unwrap();
        assert_eq!(meta.module_title, "Module Two");
        assert_eq!(meta.section_title, "Getting Started");
    }

    #[test]
    fn test_home_crumb_is_skipped() {
        // Only the home entry plus one title: not enough
        let doc = page("<li>Module Two</li>", "3.2");
        assert!(matches!(
            parse_section_metadata(&doc),
            Err(ExtractError::MissingMetadata(_))
        ));
    }

    #[test]
    fn test_missing_index_label() {
        let doc = dom::parse(
            r#"<ul class="breadcrumb"><li>Mod</li><li>Sec</li></ul><div class="container"></div>"#,
        );
        assert!(matches!(
            parse_section_metadata(&doc),
            Err(ExtractError::MissingMetadata(_))
        ));
    }

    #[test]
    fn test_malformed_index_label() {
        for label in ["3-2", "three.two", "3.", "3"] {
            let doc = page("<li>Mod</li><li>Sec</li>", label);
            assert!(
                matches!(
                    parse_section_metadata(&doc),
                    Err(ExtractError::MissingMetadata(_))
                ),
                "label {label:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_chunk_label_extra_segments_ignored() {
        let doc = page("<li>Mod</li><li>Sec</li>", "3.2.1");
        let meta = parse_section_metadata(&doc).unwrap();
        assert_eq!(meta.module_index, 3);
        assert_eq!(meta.section_index, 2);
    }

    #[test]
    fn test_label_whitespace_tolerated() {
        let doc = page("<li>Mod</li><li>Sec</li>", " 12.34 ");
        let meta = parse_section_metadata(&doc).unwrap();
        assert_eq!(meta.module_index, 12);
        assert_eq!(meta.section_index, 34);
    }
}
