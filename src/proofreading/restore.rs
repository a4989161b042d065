/*!
 * Markup restoration with in-tag corrections applied.
 *
 * The corrected text coming back from the model still carries the
 * placeholder tokens produced by the protect pass. Restoration walks the
 * text, splitting it into body segments and placeholder regions, and
 * rebuilds each tag from its descriptor. Corrections targeting a tag name
 * or attribute text are substituted into the rebuilt tag; the records
 * left over are applied to body segments only. Restoring an already
 * fully-resolved text with no corrections is a no-op.
 */

use std::collections::HashMap;

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::annotations::CorrectionRecord;
use super::protect::{ProtectedDocument, TagDescriptor};

/// Regex matching any placeholder token left in the corrected text
static PLACEHOLDER_TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"__HTML_TAG_(\d+)__|__TAG_END_(\d+)__|__HTML_COMMENT_(\d+)__")
        .expect("Invalid placeholder token regex")
});

/// One placeholder token found in the corrected text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    TagStart(usize),
    TagEnd(usize),
    Comment(usize),
}

#[derive(Debug)]
struct Token {
    start: usize,
    end: usize,
    kind: TokenKind,
}

/// Piece of the output under assembly
enum Piece {
    /// Prose between markup constructs; still subject to body corrections
    Body(String),
    /// Resolved literal markup; never touched again
    Markup(String),
}

/// Restore protected markup in `text`, applying matching corrections
///
/// Each skeletal region (`__HTML_TAG_i__ ... __TAG_END_i__`) is replaced
/// by the literal tag rebuilt from its descriptor, with any correction
/// whose `original` equals the tag name or occurs within the attribute
/// text substituted first. Comment tokens are restored byte-for-byte.
/// Corrections not consumed by a tag are then applied to the body
/// segments by literal substitution. A placeholder that never appears in
/// the text yields a non-fatal warning; a token without a matching
/// descriptor falls back to the original, unedited markup.
///
/// # Arguments
/// * `text` - Corrected (or still protected) text containing placeholders
/// * `document` - The protect-pass output for the same source text
/// * `corrections` - Parsed correction records
///
/// # Returns
/// * The final text with all markup resolved
pub fn restore(
    text: &str,
    document: &ProtectedDocument,
    corrections: &[CorrectionRecord],
) -> String {
    let mut consumed = vec![false; corrections.len()];

    let mut resolved: HashMap<usize, String> = HashMap::new();
    for tag in &document.tags {
        let literal = resolve_tag(tag, corrections, &mut consumed);
        resolved.insert(tag.placeholder_id, literal);
    }

    let tokens = scan_tokens(text);
    let mut pieces: Vec<Piece> = Vec::new();
    let mut last_end = 0;
    let mut seen_ids: Vec<usize> = Vec::new();

    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        pieces.push(Piece::Body(text[last_end..token.start].to_string()));

        match token.kind {
            TokenKind::Comment(id) => {
                seen_ids.push(id);
                match original_markup(document, id) {
                    Some(raw) => pieces.push(Piece::Markup(raw.to_string())),
                    None => warn!("Comment placeholder {} has no source entry, token dropped", id),
                }
                last_end = token.end;
            }
            TokenKind::TagStart(id) => {
                seen_ids.push(id);
                // consume through the matching end marker, discarding the
                // skeletal words the model may have edited in between
                if let Some(j) = tokens[i + 1..]
                    .iter()
                    .position(|t| t.kind == TokenKind::TagEnd(id))
                    .map(|offset| i + 1 + offset)
                {
                    last_end = tokens[j].end;
                    i = j;
                } else {
                    last_end = token.end;
                }
                match resolved.get(&id) {
                    Some(tag) => pieces.push(Piece::Markup(tag.clone())),
                    None => match original_markup(document, id) {
                        Some(raw) => {
                            warn!(
                                "Placeholder {} has no tag descriptor, restoring original markup",
                                id
                            );
                            pieces.push(Piece::Markup(raw.to_string()));
                        }
                        None => warn!("Placeholder {} is unknown, token dropped", id),
                    },
                }
            }
            TokenKind::TagEnd(id) => {
                debug!("Dangling end-of-tag marker {} dropped", id);
                last_end = token.end;
            }
        }
        i += 1;
    }
    pieces.push(Piece::Body(text[last_end..].to_string()));

    for tag in &document.tags {
        if !seen_ids.contains(&tag.placeholder_id) {
            warn!(
                "Placeholder {} (<{}{}>) missing from corrected text, tag could not be restored",
                tag.placeholder_id,
                if tag.is_closing { "/" } else { "" },
                tag.tag_name
            );
        }
    }

    apply_body_corrections(&mut pieces, corrections, &consumed);

    let mut out = String::with_capacity(text.len());
    for piece in &pieces {
        match piece {
            Piece::Body(s) | Piece::Markup(s) => out.push_str(s),
        }
    }
    out
}

/// Rebuild the literal tag for a descriptor, substituting corrections
/// that target its name or attribute text
fn resolve_tag(
    tag: &TagDescriptor,
    corrections: &[CorrectionRecord],
    consumed: &mut [bool],
) -> String {
    let mut name = tag.tag_name.clone();
    let mut attributes = tag.attributes.clone();

    for (k, record) in corrections.iter().enumerate() {
        if record.original.is_empty() {
            continue;
        }
        if record.original == tag.tag_name {
            name = record.corrected.clone();
            consumed[k] = true;
        } else if attributes.contains(&record.original) {
            attributes = attributes.replace(&record.original, &record.corrected);
            consumed[k] = true;
        }
    }

    if tag.is_closing {
        format!("</{}{}>", name, attributes)
    } else {
        format!("<{}{}>", name, attributes)
    }
}

/// Apply corrections not consumed by the tag pass to body segments only
fn apply_body_corrections(
    pieces: &mut [Piece],
    corrections: &[CorrectionRecord],
    consumed: &[bool],
) {
    for piece in pieces.iter_mut() {
        let Piece::Body(segment) = piece else { continue };
        for (k, record) in corrections.iter().enumerate() {
            if consumed[k] || record.original.is_empty() {
                continue;
            }
            if segment.contains(&record.original) {
                *segment = segment.replace(&record.original, &record.corrected);
            }
        }
    }
}

fn scan_tokens(text: &str) -> Vec<Token> {
    PLACEHOLDER_TOKEN_REGEX
        .captures_iter(text)
        .map(|caps| {
            let m = caps.get(0).expect("whole-match group always present");
            let kind = if let Some(id) = caps.get(1) {
                TokenKind::TagStart(id.as_str().parse().unwrap_or(usize::MAX))
            } else if let Some(id) = caps.get(2) {
                TokenKind::TagEnd(id.as_str().parse().unwrap_or(usize::MAX))
            } else {
                let id = caps.get(3).map_or("", |g| g.as_str());
                TokenKind::Comment(id.parse().unwrap_or(usize::MAX))
            };
            Token {
                start: m.start(),
                end: m.end(),
                kind,
            }
        })
        .collect()
}

fn original_markup(document: &ProtectedDocument, id: usize) -> Option<&str> {
    document.placeholders.get(id).map(|p| p.raw.as_str())
}
