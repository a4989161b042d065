/*!
 * Unit tests for highlight rendering
 */

use akaire::proofreading::annotations::{Category, CorrectionRecord};
use akaire::proofreading::highlight::{highlight, locate_spans};

fn record(original: &str, corrected: &str, category: Category) -> CorrectionRecord {
    CorrectionRecord {
        original: original.to_string(),
        corrected: corrected.to_string(),
        reason: "理由の説明".to_string(),
        category,
    }
}

#[test]
fn test_locateSpans_withSingleGreeting_shouldCoverExactCharRange() {
    let corrections = vec![record("こんにちわ", "こんにちは", Category::Typo)];

    let spans = locate_spans("こんにちわ", &corrections);

    assert_eq!(spans.len(), 1);
    assert_eq!((spans[0].start, spans[0].end), (0, 5));
}

#[test]
fn test_locateSpans_withMultipleRecords_shouldBeStrictlyOrdered() {
    let corrections = vec![
        record("世界", "世間", Category::Tone),
        record("こんにちわ", "こんにちは", Category::Typo),
    ];

    let spans = locate_spans("こんにちわ、世界", &corrections);

    assert_eq!(spans.len(), 2);
    assert!(spans[0].start < spans[1].start);
    assert!(spans[0].end <= spans[1].start);
    assert_eq!(spans[0].record.original, "こんにちわ");
}

#[test]
fn test_locateSpans_withRecordInsideClaimedRange_shouldMoveToNextOccurrence() {
    let corrections = vec![
        record("増加期傾向", "増加傾向", Category::Typo),
        record("傾向", "動向", Category::Tone),
    ];
    let text = "増加期傾向という傾向";

    let spans = locate_spans(text, &corrections);

    assert_eq!(spans.len(), 2);
    // the second record may not reuse the range the first one claimed
    assert_eq!(spans[0].start, 0);
    assert_eq!(spans[1].start, 8);
}

#[test]
fn test_highlight_withEachCategory_shouldEmitItsIconAndClass() {
    let cases = [
        (Category::Tone, "correction-tone", "🟣"),
        (Category::Typo, "correction-typo", "🔴"),
        (Category::DictionaryRule, "correction-dict", "🟡"),
        (Category::Inconsistency, "correction-inconsistency", "🟠"),
    ];

    for (category, css_class, icon) in cases {
        let corrections = vec![record("対象", "置換", category)];
        let annotated = highlight("修正の対象です", &corrections);

        assert!(annotated.contains(css_class), "missing class for {}", category);
        assert!(annotated.contains(icon), "missing icon for {}", category);
    }
}

#[test]
fn test_highlight_withHtmlInOriginalAndRecord_shouldEscapeEverything() {
    let corrections = vec![record("<dv>", "<div>", Category::Typo)];

    let annotated = highlight("タグ <dv> を含む", &corrections);

    assert!(annotated.contains("data-original=\"&lt;dv&gt;\""));
    assert!(annotated.contains("data-corrected=\"&lt;div&gt;\""));
    // the matched text itself is escaped inside the unit
    assert!(annotated.contains(">&lt;dv&gt;</span>"));
    assert!(!annotated.contains("<dv>"));
}

#[test]
fn test_highlight_withQuoteInReason_shouldEscapeAttributeValue() {
    let mut corrections = vec![record("対象", "置換", Category::Typo)];
    corrections[0].reason = "引用符 \" を含む理由".to_string();

    let annotated = highlight("対象", &corrections);

    assert!(annotated.contains("data-reason=\"引用符 &quot; を含む理由\""));
}

#[test]
fn test_highlight_withNoCorrections_shouldReturnEscapedOriginal() {
    let annotated = highlight("A & B", &[]);

    assert_eq!(annotated, "A &amp; B");
}

#[test]
fn test_highlight_withUnlocatableRecord_shouldStillRenderOthers() {
    let corrections = vec![
        record("見つからない", "x", Category::Typo),
        record("本文", "本文章", Category::Tone),
    ];

    let annotated = highlight("本文です", &corrections);

    assert!(annotated.contains("data-original=\"本文\""));
    assert!(!annotated.contains("見つからない"));
}
