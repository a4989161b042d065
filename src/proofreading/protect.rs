/*!
 * Markup protection for AI proofreading.
 *
 * Before text is sent to an LLM, embedded HTML is swapped for placeholder
 * tokens so the model cannot corrupt the markup. Comments are hidden
 * entirely behind an opaque token. Ordinary tags keep their name and
 * attribute text in the protected stream as literal words between a
 * start marker and an end-of-tag marker, so typos inside a tag are still
 * visible to the model and correctable like ordinary prose.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Regex for markup constructs worth protecting: comments, then
/// opening/closing tags with an alphabetic name
static MARKUP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<!--[\s\S]*?-->|</?[A-Za-z][A-Za-z0-9]*[^<>]*>")
        .expect("Invalid markup regex")
});

/// Regex splitting a matched tag into slash, name and raw attribute text
static TAG_PARTS_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^<(/?)([A-Za-z][A-Za-z0-9]*)([^<>]*)>$").expect("Invalid tag parts regex")
});

/// Start marker for a skeletal tag region
pub fn tag_start_marker(id: usize) -> String {
    format!("__HTML_TAG_{}__", id)
}

/// End-of-tag marker closing a skeletal tag region
pub fn tag_end_marker(id: usize) -> String {
    format!("__TAG_END_{}__", id)
}

/// Opaque token substituted for a comment
pub fn comment_marker(id: usize) -> String {
    format!("__HTML_COMMENT_{}__", id)
}

/// Kind of placeholder substituted for a markup construct
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// Ordinary tag: brackets hidden, name and attributes left editable
    Skeletal,
    /// Comment: fully hidden, never editable
    Opaque,
}

/// One protected markup construct, indexed by its id
#[derive(Debug, Clone)]
pub struct Placeholder {
    /// Monotonically increasing id, unique within one protect pass
    pub id: usize,
    /// Placeholder kind
    pub kind: PlaceholderKind,
    /// The original markup text, byte-for-byte
    pub raw: String,
}

/// Structured record of a protected tag, correlated to its placeholder
///
/// The descriptor exists so corrections can re-target the tag's internals
/// after the model has only seen the skeletal form.
#[derive(Debug, Clone)]
pub struct TagDescriptor {
    /// Tag element name as it appeared in the input
    pub tag_name: String,
    /// Raw attribute text between the name and the closing bracket,
    /// including any leading whitespace (empty for bare tags)
    pub attributes: String,
    /// Whether this is a closing tag
    pub is_closing: bool,
    /// Id of the placeholder standing in for this tag
    pub placeholder_id: usize,
}

impl TagDescriptor {
    /// Trimmed attribute text as it appears in the protected stream
    pub fn attributes_trimmed(&self) -> &str {
        self.attributes.trim()
    }
}

/// Output bundle of a protect pass
#[derive(Debug, Clone)]
pub struct ProtectedDocument {
    /// The placeholder-protected stream handed to the LLM
    pub text: String,
    /// All placeholders, indexed by id
    pub placeholders: Vec<Placeholder>,
    /// Descriptors for the skeletal (tag) placeholders, in input order
    pub tags: Vec<TagDescriptor>,
}

/// Protect markup in the given text behind placeholder tokens
///
/// Comments are replaced wholesale by an opaque token. Ordinary tags are
/// decomposed: the angle brackets and slash are hidden, while the tag name
/// and any attribute text are re-inserted as literal words between the
/// start and end-of-tag markers. Text that looks like a tag but fails the
/// grammar (unbalanced brackets, non-alphabetic name) is left unprotected
/// and may be altered by the corrector.
///
/// # Arguments
/// * `raw_text` - The original text, possibly containing HTML fragments
///
/// # Returns
/// * `ProtectedDocument` with the protected stream, the placeholder list
///   and the tag descriptors
pub fn protect(raw_text: &str) -> ProtectedDocument {
    let mut text = String::with_capacity(raw_text.len());
    let mut placeholders: Vec<Placeholder> = Vec::new();
    let mut tags: Vec<TagDescriptor> = Vec::new();
    let mut last_end = 0;

    for m in MARKUP_REGEX.find_iter(raw_text) {
        text.push_str(&raw_text[last_end..m.start()]);
        last_end = m.end();

        let raw = m.as_str();
        let id = placeholders.len();

        if raw.starts_with("<!--") {
            text.push_str(&comment_marker(id));
            placeholders.push(Placeholder {
                id,
                kind: PlaceholderKind::Opaque,
                raw: raw.to_string(),
            });
            continue;
        }

        let Some(parts) = TAG_PARTS_REGEX.captures(raw) else {
            debug!("Markup-like fragment failed the tag grammar, left unprotected: {}", raw);
            text.push_str(raw);
            continue;
        };

        let is_closing = !parts[1].is_empty();
        let tag_name = parts[2].to_string();
        let attributes = parts[3].to_string();

        text.push_str(&tag_start_marker(id));
        text.push(' ');
        text.push_str(&tag_name);
        if !is_closing && !attributes.trim().is_empty() {
            text.push(' ');
            text.push_str(attributes.trim());
        }
        text.push(' ');
        text.push_str(&tag_end_marker(id));

        tags.push(TagDescriptor {
            tag_name,
            attributes,
            is_closing,
            placeholder_id: id,
        });
        placeholders.push(Placeholder {
            id,
            kind: PlaceholderKind::Skeletal,
            raw: raw.to_string(),
        });
    }
    text.push_str(&raw_text[last_end..]);

    if text.contains('<') || text.contains('>') {
        debug!("Input contains angle brackets outside well-formed markup; those fragments are unprotected");
    }

    ProtectedDocument {
        text,
        placeholders,
        tags,
    }
}
