/*!
 * Unit tests for markup protection
 */

use akaire::proofreading::protect::{PlaceholderKind, protect};

#[test]
fn test_protect_withMixedContent_shouldProtectEveryConstruct() {
    let raw = "見出し<h1 id=\"title\">記事</h1>と<!-- 下書き -->、それから<p>本文</p>。";

    let document = protect(raw);

    assert_eq!(document.placeholders.len(), 5);
    assert_eq!(document.tags.len(), 4);
    assert!(!document.text.contains('<'));
    assert!(!document.text.contains('>'));
}

#[test]
fn test_protect_withCommentBetweenTags_shouldInterleaveIds() {
    let raw = "<b>a</b><!-- x --><i>b</i>";

    let document = protect(raw);

    let kinds: Vec<PlaceholderKind> = document.placeholders.iter().map(|p| p.kind).collect();
    assert_eq!(
        kinds,
        vec![
            PlaceholderKind::Skeletal,
            PlaceholderKind::Skeletal,
            PlaceholderKind::Opaque,
            PlaceholderKind::Skeletal,
            PlaceholderKind::Skeletal,
        ]
    );
    // descriptor ids skip the comment id
    let descriptor_ids: Vec<usize> = document.tags.iter().map(|t| t.placeholder_id).collect();
    assert_eq!(descriptor_ids, vec![0, 1, 3, 4]);
}

#[test]
fn test_protect_withMultilineComment_shouldHideWholeComment() {
    let raw = "前<!-- 複数行の\nコメント -->後";

    let document = protect(raw);

    assert_eq!(document.text, "前__HTML_COMMENT_0__後");
    assert_eq!(document.placeholders[0].raw, "<!-- 複数行の\nコメント -->");
}

#[test]
fn test_protect_withIrregularSpacing_shouldKeepRawAttributeText() {
    let raw = "<a  href = \"https://example.com\" >リンク</a>";

    let document = protect(raw);

    assert_eq!(document.tags[0].attributes, "  href = \"https://example.com\" ");
    assert_eq!(document.tags[0].attributes_trimmed(), "href = \"https://example.com\"");
}

#[test]
fn test_protect_withTagTypo_shouldExposeTypoAsEditableWord() {
    let document = protect("<dv class=\"comment\">２０２４年、増加期傾向にある</dv>");

    // the typo'd tag name is a literal word the model can rewrite
    assert!(document.text.contains(" dv "));
    assert!(document.text.contains("class=\"comment\""));
    assert!(document.text.contains("２０２４年、増加期傾向にある"));
}

#[test]
fn test_protect_withEmptyInput_shouldReturnEmptyDocument() {
    let document = protect("");

    assert_eq!(document.text, "");
    assert!(document.placeholders.is_empty());
    assert!(document.tags.is_empty());
}

#[test]
fn test_protect_shouldBePureAndDeterministic() {
    let raw = "<div>同じ入力</div>";

    let first = protect(raw);
    let second = protect(raw);

    assert_eq!(first.text, second.text);
    assert_eq!(first.placeholders.len(), second.placeholders.len());
}
