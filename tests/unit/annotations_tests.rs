/*!
 * Unit tests for correction annotation parsing
 */

use akaire::proofreading::annotations::{Category, parse_corrections, split_response};

use crate::common::{annotation_line, build_response};

#[test]
fn test_parseCorrections_withBothGrammarsMixed_shouldParseAll() {
    let response = "本文\n✅修正箇所：\n\
        - 1行目: (こんにちわ) -> (こんにちは): 誤字です。 [カテゴリー: typo]\n\
        - カテゴリー: tone | (ですです) -> (です): 語尾の重複。\n";

    let records = parse_corrections(response);

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].category, Category::Typo);
    assert_eq!(records[1].category, Category::Tone);
}

#[test]
fn test_parseCorrections_withEnglishCategoryLabel_shouldParse() {
    let response = "body\n✅修正箇所：\n- line 1: (teh) -> (the): typo fix [category: typo]\n";

    let records = parse_corrections(response);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].original, "teh");
}

#[test]
fn test_parseCorrections_withAllFourCategories_shouldMapEach() {
    let lines = vec![
        annotation_line("あ", "い", "言い回し", "tone"),
        annotation_line("う", "え", "誤字", "typo"),
        annotation_line("お", "か", "辞書", "dict"),
        annotation_line("き", "く", "矛盾", "inconsistency"),
    ];
    let response = build_response("本文", &lines);

    let records = parse_corrections(&response);

    let categories: Vec<Category> = records.iter().map(|r| r.category).collect();
    assert_eq!(
        categories,
        vec![
            Category::Tone,
            Category::Typo,
            Category::DictionaryRule,
            Category::Inconsistency,
        ]
    );
}

#[test]
fn test_parseCorrections_withLegacyCategoryNames_shouldNormalize() {
    let response = "本文\n✅修正箇所：\n\
        - カテゴリー: expression | (a) -> (b): x\n\
        - カテゴリー: dictionary | (c) -> (d): y\n\
        - カテゴリー: contradiction | (e) -> (f): z\n";

    let records = parse_corrections(response);

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].category, Category::Tone);
    assert_eq!(records[1].category, Category::DictionaryRule);
    assert_eq!(records[2].category, Category::Inconsistency);
}

#[test]
fn test_parseCorrections_withSkeletalTokenAnswer_shouldReduceToCoreWord() {
    // the model answered in terms of the protected stream it was shown
    let response = "本文\n✅修正箇所：\n\
        - 1行目: (__HTML_TAG_0__ dv __TAG_END_0__) -> (__HTML_TAG_0__ div __TAG_END_0__): タグ名の誤字 [カテゴリー: typo]\n";

    let records = parse_corrections(response);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].original, "dv");
    assert_eq!(records[0].corrected, "div");
}

#[test]
fn test_parseCorrections_withLiteralTagAnswer_shouldReduceToElementName() {
    let response = "本文\n✅修正箇所：\n- 1行目: (<dv>) -> (<div>): タグ名 [カテゴリー: typo]\n";

    let records = parse_corrections(response);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].original, "dv");
    assert_eq!(records[0].corrected, "div");
}

#[test]
fn test_parseCorrections_withMissingReason_shouldLeaveReasonEmpty() {
    let response = "本文\n✅修正箇所：\n- カテゴリー: typo | (abc) -> (abd)\n";

    let records = parse_corrections(response);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].reason, "");
}

#[test]
fn test_parseCorrections_withNonEntryLines_shouldIgnoreThem() {
    let response = "本文\n✅修正箇所：\n\
        以下の修正を行いました。\n\
        \n\
        - 1行目: (あ) -> (い): 理由 [カテゴリー: typo]\n\
        以上です。\n";

    let records = parse_corrections(response);

    assert_eq!(records.len(), 1);
}

#[test]
fn test_parseCorrections_shouldNeverPanicOnGarbage() {
    let garbage = "✅修正箇所：\n- ((((( -> )))))\n- : : : [カテゴリー: ]\n- \n";

    let records = parse_corrections(garbage);

    assert!(records.is_empty());
}

#[test]
fn test_splitResponse_withoutDelimiter_shouldReturnWholeBody() {
    let (body, annotations) = split_response("修正済みの本文のみ\n");

    assert_eq!(body, "修正済みの本文のみ");
    assert!(annotations.is_none());
}

#[test]
fn test_parseCorrections_withSamePairDifferentCategories_shouldKeepFirst() {
    let lines = vec![
        annotation_line("ねこ", "猫", "表記統一", "dict"),
        annotation_line("ねこ", "猫", "誤字扱い", "typo"),
    ];
    let response = build_response("本文", &lines);

    let records = parse_corrections(&response);

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].category, Category::DictionaryRule);
}
