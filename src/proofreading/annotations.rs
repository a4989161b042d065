/*!
 * Correction annotation parsing.
 *
 * The proofreading prompts instruct the model to output the corrected
 * body text followed by a delimiter line and one annotation entry per
 * correction. Two entry grammars are in the wild:
 *
 * - current: `- 行番号: (変更前) -> (変更後): 理由 [カテゴリー: typo]`
 * - legacy:  `- カテゴリー: typo | (変更前) -> (変更後): 理由`
 *
 * Each line is tried against the current grammar first, then the legacy
 * grammar. Unmatched lines are skipped, never fatal: a malformed response
 * yields a partial or empty record list and the pipeline carries on.
 */

use std::collections::HashSet;
use std::str::FromStr;

use anyhow::anyhow;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Delimiter line separating the corrected body from the annotation block
pub const ANNOTATION_DELIMITER: &str = "✅修正箇所：";

/// Current annotation grammar:
/// `- <lineinfo>: (original) -> (corrected): reason [カテゴリー: X]`
static CURRENT_GRAMMAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^-\s*[^:]+:\s*\((?P<original>.*?)\)\s*->\s*\((?P<corrected>.*?)\)(?::\s*(?P<reason>.*?))?\s*\[(?:カテゴリー|category):\s*(?P<category>[A-Za-z]+)\]\s*$",
    )
    .expect("Invalid current annotation grammar regex")
});

/// Legacy annotation grammar:
/// `- カテゴリー: X | (original) -> (corrected): reason`
static LEGACY_GRAMMAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^-\s*(?:カテゴリー|category):\s*(?P<category>[A-Za-z]+)\s*\|\s*\((?P<original>.*?)\)\s*->\s*\((?P<corrected>.*?)\)(?::\s*(?P<reason>.*))?$",
    )
    .expect("Invalid legacy annotation grammar regex")
});

/// Word directly following a skeletal tag-start marker
static MARKER_WORD_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"__HTML_TAG_\d+__\s+(\w+)\s+__TAG_").expect("Invalid marker word regex")
});

/// Element name inside a literal `<tag>` / `</tag>`
static ELEMENT_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"</?(\w+)[^>]*>").expect("Invalid element name regex")
});

/// First `attr="value"` pair; the attribute name is what matters
static ATTRIBUTE_PAIR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(\w+)="?(\w+)"?"#).expect("Invalid attribute pair regex")
});

/// First bare word (Unicode-aware, covers Japanese)
static BARE_WORD_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+").expect("Invalid bare word regex"));

/// Fragments that mean a token still speaks in protected-stream terms
static PLACEHOLDER_FRAGMENT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"__HTML_TAG_\d+__|__TAG_END_\d+__|__HTML_COMMENT_\d+__")
        .expect("Invalid placeholder fragment regex")
});

/// Closed set of correction categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// 言い回しアドバイス: more natural phrasing
    Tone,
    /// 誤字修正: clear typos, including those inside tags
    Typo,
    /// 社内辞書ルール: house-style word replacements
    #[serde(rename = "dict")]
    DictionaryRule,
    /// 矛盾チェック: logical or factual inconsistencies
    Inconsistency,
}

impl Category {
    /// Lowercase identifier used in annotations and CSS classes
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tone => "tone",
            Self::Typo => "typo",
            Self::DictionaryRule => "dict",
            Self::Inconsistency => "inconsistency",
        }
    }

    /// Icon shown on the highlight unit for this category
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Tone => "🟣",
            Self::Typo => "🔴",
            Self::DictionaryRule => "🟡",
            Self::Inconsistency => "🟠",
        }
    }

    /// Japanese display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Tone => "言い回しアドバイス",
            Self::Typo => "誤字修正",
            Self::DictionaryRule => "社内辞書ルール",
            Self::Inconsistency => "矛盾チェック",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "tone" | "expression" => Ok(Self::Tone),
            "typo" => Ok(Self::Typo),
            "dict" | "dictionary" => Ok(Self::DictionaryRule),
            "inconsistency" | "contradiction" => Ok(Self::Inconsistency),
            _ => Err(anyhow!("Unknown correction category: {}", s)),
        }
    }
}

/// One proposed text change with its rationale and category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionRecord {
    /// Text before the change
    pub original: String,
    /// Text after the change
    pub corrected: String,
    /// Why the change is proposed
    pub reason: String,
    /// Correction category
    pub category: Category,
}

/// Split a full response into the corrected body and the annotation block
///
/// Returns the body (delimiter excluded, trailing whitespace trimmed) and
/// the annotation block when the delimiter is present.
pub fn split_response(response_text: &str) -> (&str, Option<&str>) {
    match response_text.split_once(ANNOTATION_DELIMITER) {
        Some((body, annotations)) => (body.trim_end(), Some(annotations)),
        None => (response_text.trim_end(), None),
    }
}

/// Parse correction records out of a full LLM response
///
/// Splits on the annotation delimiter and parses each `-` line against
/// the two grammars in fixed priority order. Records are de-duplicated by
/// the `(original, corrected)` pair, first occurrence wins, order
/// preserved. Never fails: a response without the delimiter, or with only
/// malformed lines, yields an empty list.
pub fn parse_corrections(response_text: &str) -> Vec<CorrectionRecord> {
    let Some(block) = split_response(response_text).1 else {
        debug!("Response has no annotation delimiter, no corrections parsed");
        return Vec::new();
    };

    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut records = Vec::new();

    for line in block.lines() {
        let line = line.trim();
        if !line.starts_with('-') {
            continue;
        }

        let Some(record) = parse_current_grammar(line).or_else(|| parse_legacy_grammar(line))
        else {
            debug!("Skipping unparseable annotation line: {}", line);
            continue;
        };

        if record.original.is_empty() || record.corrected.is_empty() {
            debug!("Skipping annotation with an empty side: {}", line);
            continue;
        }
        if record.original == record.corrected {
            debug!("Skipping annotation with no actual change: {}", line);
            continue;
        }
        let key = (record.original.clone(), record.corrected.clone());
        if seen.insert(key) {
            records.push(record);
        }
    }

    debug!("Parsed {} correction record(s)", records.len());
    records
}

/// Try the current grammar against one annotation line
fn parse_current_grammar(line: &str) -> Option<CorrectionRecord> {
    let caps = CURRENT_GRAMMAR_REGEX.captures(line)?;
    build_record(
        &caps["original"],
        &caps["corrected"],
        caps.name("reason").map_or("", |m| m.as_str()),
        &caps["category"],
    )
}

/// Try the legacy grammar against one annotation line
fn parse_legacy_grammar(line: &str) -> Option<CorrectionRecord> {
    let caps = LEGACY_GRAMMAR_REGEX.captures(line)?;
    build_record(
        &caps["original"],
        &caps["corrected"],
        caps.name("reason").map_or("", |m| m.as_str()),
        &caps["category"],
    )
}

fn build_record(
    original: &str,
    corrected: &str,
    reason: &str,
    category: &str,
) -> Option<CorrectionRecord> {
    let category = Category::from_str(category).ok()?;
    Some(CorrectionRecord {
        original: clean_token(original),
        corrected: clean_token(corrected),
        reason: reason.trim().to_string(),
        category,
    })
}

/// Strip enclosing punctuation and, when the token still speaks in
/// protected-stream or literal-tag terms, reduce it to its core word
fn clean_token(token: &str) -> String {
    let trimmed = token.trim().trim_matches(|c| c == '(' || c == ')').trim();

    if PLACEHOLDER_FRAGMENT_REGEX.is_match(trimmed) || ELEMENT_NAME_REGEX.is_match(trimmed) {
        return extract_core_word(trimmed);
    }

    trimmed.trim_matches(|c| c == '<' || c == '>').trim().to_string()
}

/// Extract the correctable core word from a token the model phrased in
/// terms of the skeletal tokens it was shown
///
/// Priority order: word after a tag-start marker, element name from a
/// literal tag, first attribute name, first bare word, trimmed token.
fn extract_core_word(token: &str) -> String {
    if let Some(caps) = MARKER_WORD_REGEX.captures(token) {
        return caps[1].to_string();
    }
    if let Some(caps) = ELEMENT_NAME_REGEX.captures(token) {
        return caps[1].to_string();
    }
    if let Some(caps) = ATTRIBUTE_PAIR_REGEX.captures(token) {
        return caps[1].to_string();
    }
    if let Some(m) = BARE_WORD_REGEX.find(token) {
        return m.as_str().to_string();
    }
    token.trim().to_string()
}
