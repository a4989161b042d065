/*!
 * Highlight rendering over the original text.
 *
 * Each correction is located in the pre-protection original and rendered
 * as an inline interactive unit carrying the original/corrected/reason/
 * category data for a UI layer. Matching follows one explicit policy:
 * a record claims the leftmost occurrence of its `original` that does
 * not overlap a range already claimed by an earlier record, so spans are
 * always non-overlapping and strictly ordered. A record that cannot be
 * located is omitted from the view but stays in the caller's record list.
 */

use std::ops::Range;

use log::debug;

use super::annotations::CorrectionRecord;
use super::escape::escape_html;

/// A located correction over the original text
///
/// Offsets are character offsets into the raw text; spans from one
/// highlight pass are pairwise non-overlapping and strictly increasing.
#[derive(Debug, Clone)]
pub struct HighlightSpan<'a> {
    /// Character offset of the first matched character
    pub start: usize,
    /// Character offset one past the last matched character
    pub end: usize,
    /// The correction rendered at this span
    pub record: &'a CorrectionRecord,
}

/// Locate the spans a highlight pass would render, in char offsets
pub fn locate_spans<'a>(
    raw_text: &str,
    corrections: &'a [CorrectionRecord],
) -> Vec<HighlightSpan<'a>> {
    claim_ranges(raw_text, corrections)
        .into_iter()
        .map(|(range, record)| HighlightSpan {
            start: raw_text[..range.start].chars().count(),
            end: raw_text[..range.end].chars().count(),
            record,
        })
        .collect()
}

/// Render the original text with every locatable correction wrapped as an
/// interactive highlight unit
///
/// All literal text, including the matched substrings and the data
/// attributes, is HTML-escaped. Each unit exposes `data-original`,
/// `data-corrected`, `data-reason` and `data-category`, plus a
/// category-specific class and icon.
pub fn highlight(raw_text: &str, corrections: &[CorrectionRecord]) -> String {
    let claimed = claim_ranges(raw_text, corrections);

    let mut out = String::with_capacity(raw_text.len());
    let mut last_end = 0;
    for (range, record) in &claimed {
        out.push_str(&escape_html(&raw_text[last_end..range.start]));
        out.push_str(&render_unit(&raw_text[range.clone()], record));
        last_end = range.end;
    }
    out.push_str(&escape_html(&raw_text[last_end..]));
    out
}

/// Claim one byte range per locatable record, leftmost-unconsumed policy,
/// returned sorted by start offset
fn claim_ranges<'a>(
    raw_text: &str,
    corrections: &'a [CorrectionRecord],
) -> Vec<(Range<usize>, &'a CorrectionRecord)> {
    let mut claimed: Vec<(Range<usize>, &CorrectionRecord)> = Vec::new();

    for record in corrections {
        if record.original.is_empty() {
            continue;
        }
        let mut search_from = 0;
        let mut found_range = None;
        while let Some(pos) = raw_text[search_from..].find(&record.original) {
            let start = search_from + pos;
            let end = start + record.original.len();
            let overlaps = claimed
                .iter()
                .any(|(range, _)| range.start < end && start < range.end);
            if !overlaps {
                found_range = Some(start..end);
                break;
            }
            // advance one character and keep looking
            search_from = start
                + raw_text[start..]
                    .chars()
                    .next()
                    .map_or(1, |c| c.len_utf8());
        }

        match found_range {
            Some(range) => claimed.push((range, record)),
            None => debug!(
                "No unconsumed match for correction '{}' in original text, omitted from highlight",
                record.original
            ),
        }
    }

    claimed.sort_by_key(|(range, _)| range.start);
    claimed
}

/// Render one highlight unit around the matched text
fn render_unit(matched: &str, record: &CorrectionRecord) -> String {
    format!(
        "<span class=\"correction correction-{category}\" data-original=\"{original}\" data-corrected=\"{corrected}\" data-reason=\"{reason}\" data-category=\"{category}\"><span class=\"correction-icon\">{icon}</span>{text}</span>",
        category = record.category,
        original = escape_html(&record.original),
        corrected = escape_html(&record.corrected),
        reason = escape_html(&record.reason),
        icon = record.category.icon(),
        text = escape_html(matched),
    )
}
