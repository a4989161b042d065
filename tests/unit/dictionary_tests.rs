/*!
 * Unit tests for the replacement dictionary
 */

use akaire::proofreading::dictionary::{DictionaryEntry, ReplacementDictionary};

use crate::common::{create_temp_dir, create_test_file};

#[test]
fn test_load_withValidJsonFile_shouldLoadEntries() {
    let temp_dir = create_temp_dir().unwrap();
    let content = r#"[
        {"original_word": "アマゾン", "replacement_word": "Amazon", "is_active": true},
        {"original_word": "グーグル", "replacement_word": "Google", "is_active": false}
    ]"#;
    let path = create_test_file(&temp_dir.path().to_path_buf(), "dictionary.json", content).unwrap();

    let dictionary = ReplacementDictionary::load(&path).unwrap();

    assert_eq!(dictionary.len(), 2);
    assert_eq!(dictionary.active_mappings(), vec![("アマゾン", "Amazon")]);
}

#[test]
fn test_load_withMissingFile_shouldError() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("nope.json");

    assert!(ReplacementDictionary::load(&path).is_err());
}

#[test]
fn test_load_withInvalidJson_shouldError() {
    let temp_dir = create_temp_dir().unwrap();
    let path =
        create_test_file(&temp_dir.path().to_path_buf(), "broken.json", "{not json").unwrap();

    assert!(ReplacementDictionary::load(&path).is_err());
}

#[test]
fn test_formatForPrompt_withMultipleEntries_shouldKeepEntryOrder() {
    let dictionary = ReplacementDictionary::from_entries(vec![
        DictionaryEntry {
            original_word: "ツイッター".to_string(),
            replacement_word: "X（旧Twitter）".to_string(),
            is_active: true,
        },
        DictionaryEntry {
            original_word: "フェイスブック".to_string(),
            replacement_word: "Meta（旧Facebook）".to_string(),
            is_active: true,
        },
    ]);

    let rendered = dictionary.format_for_prompt().unwrap();

    let first = rendered.find("ツイッター").unwrap();
    let second = rendered.find("フェイスブック").unwrap();
    assert!(first < second);
}

#[test]
fn test_isEmpty_withNoEntries_shouldBeTrue() {
    assert!(ReplacementDictionary::new().is_empty());
}
