/*!
 * Prompt templates for Japanese proofreading.
 *
 * The templates instruct the model to correct the protected stream in
 * four fixed categories, to fix typos inside the skeletal tag words, and
 * to report every change after the `✅修正箇所：` delimiter in the current
 * annotation grammar.
 */

use super::dictionary::ReplacementDictionary;

/// Prompt template with a `{原文}` placeholder for the protected text
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// The default proofreading prompt
    pub const JAPANESE_PROOFREADER: &'static str = r#"あなたは日本語校正の専門家です。以下の文章を4つのカテゴリーで詳細に校正してください。

校正カテゴリー：
1. 🟣 言い回しアドバイス（tone）：より自然で温かみのある表現への改善・連続語尾の解消
2. 🔴 誤字修正（typo）：明確な誤字脱字の修正（タグ名・属性内も含む）
3. 🟡 社内辞書ルール（dict）：統一表記ルールの適用・固有名詞の表記統一
4. 🟠 矛盾チェック（inconsistency）：論理的・事実的矛盾の検出

本文には `__HTML_TAG_0__ div class="box" __TAG_END_0__` のような保護トークンが含まれます。
- トークン自体（`__HTML_TAG_n__` / `__TAG_END_n__` / `__HTML_COMMENT_n__`）は絶対に変更・削除しないでください
- トークンの間にあるタグ名・属性の単語に誤字があれば修正してください
  例: dv → div、clas → class、hrf → href、scr → src、traget → target

校正ルール：
- 文章全体を出力し、途中で切らない
- 各修正にカテゴリーを明確に分類し、理由を具体的に説明する
- 同じ語尾が2文以上連続する場合は言い回しを調整する

校正対象：
{原文}

修正後の文章をそのまま出力し、その後に修正箇所一覧を以下の形式で記載してください：

✅修正箇所：
- 行番号: (修正前) -> (修正後): 理由 [カテゴリー: tone|typo|dict|inconsistency]"#;

    /// Fast-path prompt without the detailed guidance
    pub const JAPANESE_PROOFREADER_SIMPLE: &'static str = r#"あなたは日本語校正の専門家です。以下の文章を素早く校正してください。

校正カテゴリー：tone（言い回し）、typo（誤字）、dict（辞書ルール）、inconsistency（矛盾）

`__HTML_TAG_n__` などの保護トークンは変更せず、トークン間のタグ名・属性の誤字のみ修正してください。

校正対象：
{原文}

修正後の文章をそのまま出力し、その後に修正箇所一覧を以下の形式で記載してください：

✅修正箇所：
- 行番号: (修正前) -> (修正後): 理由 [カテゴリー: tone|typo|dict|inconsistency]"#;

    /// Create a new prompt template
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Create the default proofreading template
    pub fn proofreader() -> Self {
        Self::new(Self::JAPANESE_PROOFREADER)
    }

    /// Create the fast-path template
    pub fn simple() -> Self {
        Self::new(Self::JAPANESE_PROOFREADER_SIMPLE)
    }

    /// Render the template with the protected text
    pub fn render(&self, protected_text: &str) -> String {
        self.template.replace("{原文}", protected_text)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::proofreader()
    }
}

/// Builder assembling the full prompt from template, dictionary context
/// and the protected text
#[derive(Debug, Clone)]
pub struct ProofreadingPromptBuilder {
    template: PromptTemplate,
    dictionary_context: Option<String>,
}

impl ProofreadingPromptBuilder {
    /// Create a builder over the given template
    pub fn new(template: PromptTemplate) -> Self {
        Self {
            template,
            dictionary_context: None,
        }
    }

    /// Add replacement dictionary context as extra instructions
    pub fn with_dictionary(mut self, dictionary: &ReplacementDictionary) -> Self {
        self.dictionary_context = dictionary.format_for_prompt();
        self
    }

    /// Build the prompt for the given protected text
    pub fn build(&self, protected_text: &str) -> String {
        let rendered = self.template.render(protected_text);
        match &self.dictionary_context {
            Some(context) => format!(
                "{}\n\n社内辞書（以下の表記に統一し、適用した箇所は dict カテゴリーで報告してください）：\n{}",
                rendered, context
            ),
            None => rendered,
        }
    }
}
