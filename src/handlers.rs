//! Block emitters shared by the chunk scan and the tab expander.
//!
//! Each handler appends the output-HTML rendition of one classified
//! component. Handlers never fail: a component that cannot be emitted
//! (missing source attribute, underivable asset name) is logged and
//! skipped, per the recoverable half of the error taxonomy.

use tracing::warn;

use crate::assets::{AssetFetcher, PendingAsset};
use crate::dom::{self, Selection};
use crate::markup::{self, ContentKind};

/// Append a text block: each child element is cloned verbatim.
///
/// When `title_prefix` still holds the chunk's index label, the first
/// emitted child becomes the chunk title: its text content is flattened
/// and the label is prepended. The prefix is consumed at most once per
/// chunk.
pub(crate) fn handle_text_block(
    sel: &Selection,
    out: &mut String,
    title_prefix: &mut Option<String>,
) {
    for child in dom::element_children(sel) {
        if let Some(label) = title_prefix.take() {
            out.push_str(&retitle(&child, &label));
        } else {
            out.push_str(&dom::outer_html(&child));
        }
    }
}

/// Clone an element and replace its content with `label` + its own
/// flattened text. Tag and attributes survive, nested markup does not.
fn retitle(sel: &Selection, label: &str) -> String {
    let text = dom::text_content(sel);
    let titled = format!("{label} {}", text.trim());

    let clone = dom::clone_element(sel);
    let element = clone.select("body > *");
    element.set_html(dom::escape_text(&titled));
    dom::outer_html(&element).to_string()
}

/// Append an image/graphic placeholder and start its asset fetch.
///
/// Images reference their asset via `src`, graphics via `data-src`. A
/// missing or empty reference, or one with no derivable file name, emits
/// nothing: no placeholder, no collected fetch.
pub(crate) fn handle_media(
    sel: &Selection,
    kind: ContentKind,
    fetcher: &AssetFetcher,
    assets: &mut Vec<PendingAsset>,
    out: &mut String,
) {
    let source_attr = match kind {
        ContentKind::Graphic => "data-src",
        _ => "src",
    };

    let Some(uri) = dom::get_attribute(sel, source_attr).filter(|uri| !uri.trim().is_empty())
    else {
        warn!(attr = source_attr, "could not find URI in media asset, skipping");
        return;
    };

    let pending = fetcher.fetch(&uri);
    let Some(name) = pending.name() else {
        warn!(uri = %uri, "media asset URI invalid, skipping");
        return;
    };

    out.push_str(&format!(
        r#"<img src="{}{}">"#,
        markup::ASSET_BASE_PATH,
        dom::escape_text(name)
    ));
    assets.push(pending);
}

/// Append a code listing verbatim, forcing visual whitespace preservation.
pub(crate) fn handle_code_block(sel: &Selection, out: &mut String) {
    let clone = dom::clone_element(sel);
    let element = clone.select("body > *");

    let style = match dom::get_attribute(&element, "style") {
        Some(existing) => format!("{}; white-space: pre-wrap", existing.trim_end_matches(';')),
        None => "white-space: pre-wrap".to_string(),
    };
    dom::set_attribute(&element, "style", &style);

    out.push_str(&dom::outer_html(&element));
}
