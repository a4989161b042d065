/*!
 * Unit tests for markup restoration
 */

use akaire::proofreading::annotations::{Category, CorrectionRecord, parse_corrections};
use akaire::proofreading::protect::protect;
use akaire::proofreading::restore::restore;

use crate::common::{annotation_line, build_response};

fn record(original: &str, corrected: &str, category: Category) -> CorrectionRecord {
    CorrectionRecord {
        original: original.to_string(),
        corrected: corrected.to_string(),
        reason: String::new(),
        category,
    }
}

#[test]
fn test_restore_withParsedCorrections_shouldFixTagAndBody() {
    let raw = "<dv class=\"comment\">２０２４年、増加期傾向にある</dv>";
    let document = protect(raw);
    let lines = vec![
        annotation_line("dv", "div", "タグ名の誤字", "typo"),
        annotation_line("増加期傾向", "増加傾向", "不要な「期」を削除", "typo"),
    ];
    let response = build_response(&document.text, &lines);
    let corrections = parse_corrections(&response);

    let restored = restore(&document.text, &document, &corrections);

    assert_eq!(restored, "<div class=\"comment\">２０２４年、増加傾向にある</div>");
}

#[test]
fn test_restore_withAttributeValueCorrection_shouldSubstituteInsideAttributes() {
    let raw = "<div class=\"commnet\">本文</div>";
    let document = protect(raw);
    let corrections = vec![record("commnet", "comment", Category::Typo)];

    let restored = restore(&document.text, &document, &corrections);

    assert_eq!(restored, "<div class=\"comment\">本文</div>");
}

#[test]
fn test_restore_withConsumedTagCorrection_shouldNotTouchBody() {
    // "dv" appears in the body too, but the record is consumed by the tag
    let raw = "<dv>dv という略語</dv>";
    let document = protect(raw);
    let corrections = vec![record("dv", "div", Category::Typo)];

    let restored = restore(&document.text, &document, &corrections);

    assert_eq!(restored, "<div>dv という略語</div>");
}

#[test]
fn test_restore_withDeletedPlaceholder_shouldDropTagAndKeepBody() {
    // the model deleted a protected token entirely
    let raw = "<b>強調</b>";
    let document = protect(raw);
    let without_closing = document
        .text
        .replace("__HTML_TAG_1__ b __TAG_END_1__", "");

    let restored = restore(&without_closing, &document, &[]);

    assert_eq!(restored, "<b>強調");
}

#[test]
fn test_restore_withUnknownPlaceholderId_shouldDropToken() {
    let document = protect("プレーンテキスト");

    let restored = restore("前__HTML_COMMENT_9__後", &document, &[]);

    assert_eq!(restored, "前後");
}

#[test]
fn test_restore_withMultipleIdenticalTags_shouldRestoreEachIndependently() {
    let raw = "<i>一</i>と<i>二</i>";
    let document = protect(raw);

    let restored = restore(&document.text, &document, &[]);

    assert_eq!(restored, raw);
}

#[test]
fn test_restore_withCorrectionsButNoPlaceholders_shouldOnlyTouchBody() {
    let document = protect("こんにちわ、世界");
    let corrections = vec![record("こんにちわ", "こんにちは", Category::Typo)];

    let restored = restore(&document.text, &document, &corrections);

    assert_eq!(restored, "こんにちは、世界");
}

#[test]
fn test_restore_appliedTwice_shouldBeIdempotent() {
    let raw = "<dv class=\"comment\">test</dv>";
    let document = protect(raw);
    let corrections = vec![record("dv", "div", Category::Typo)];
    let once = restore(&document.text, &document, &corrections);

    let twice = restore(&once, &document, &corrections);

    assert_eq!(once, twice);
    assert_eq!(twice, "<div class=\"comment\">test</div>");
}

#[test]
fn test_restore_withCommentAndCorrections_shouldNeverEditComment() {
    let raw = "<!-- dv と書いてある -->本文の dv 表記";
    let document = protect(raw);
    let corrections = vec![record("dv", "div", Category::Typo)];

    let restored = restore(&document.text, &document, &corrections);

    assert_eq!(restored, "<!-- dv と書いてある -->本文の div 表記");
}
