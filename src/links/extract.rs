//! Wikilink extraction from raw markdown text.
//!
//! References use bracket syntax: `[[Target]]` for a regular cross-reference
//! and `![[Target]]` for an embed. Extraction preserves document order and
//! keeps duplicates; deduplication happens when the graph is built.

use pulldown_cmark::{Event as MdEvent, LinkType, Options, Parser as MdParser, Tag as MdTag};

/// A single raw cross-reference as it appears in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRef {
    /// The reference text between the brackets, `#heading` suffix stripped.
    pub reference: String,
    /// Whether the reference was written with the embed marker.
    pub embed: bool,
}

/// Parser options for vault documents.
///
/// Extensions are enabled explicitly instead of using `Options::all()` for
/// better reproducibility.
pub fn md_options() -> Options {
    let mut md_options = Options::empty();
    md_options.insert(Options::ENABLE_FOOTNOTES);
    md_options.insert(Options::ENABLE_STRIKETHROUGH);
    md_options.insert(Options::ENABLE_TABLES);
    md_options.insert(Options::ENABLE_TASKLISTS);
    md_options.insert(Options::ENABLE_WIKILINKS);
    md_options.insert(Options::ENABLE_YAML_STYLE_METADATA_BLOCKS);
    md_options
}

/// Scan `text` for wikilink references, in the order they occur.
///
/// Malformed or unterminated reference syntax is simply not matched. Aliased
/// references (`[[Target|shown]]`) yield the target; same-document anchors
/// (`[[#heading]]`) carry no target and are dropped.
pub fn extract_links(text: &str) -> Vec<LinkRef> {
    let mut links = Vec::new();
    for event in MdParser::new_ext(text, md_options()) {
        let (dest_url, embed) = match event {
            MdEvent::Start(MdTag::Link {
                link_type: LinkType::WikiLink { .. },
                dest_url,
                ..
            }) => (dest_url, false),
            MdEvent::Start(MdTag::Image {
                link_type: LinkType::WikiLink { .. },
                dest_url,
                ..
            }) => (dest_url, true),
            _ => continue,
        };
        let reference = dest_url
            .split('#')
            .next()
            .unwrap_or_default()
            .trim()
            .to_string();
        if reference.is_empty() {
            continue;
        }
        links.push(LinkRef { reference, embed });
    }
    tracing::trace!("Extracted {} wikilink references", links.len());
    links
}
