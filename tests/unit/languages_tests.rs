/*!
 * Tests for language utility functions
 */

use snaptranslate::languages::{
    SUPPORTED_LANGUAGES, get_language_name, is_supported_target, language_codes_match,
    normalize_to_part1, resolve_target_language, supported_names, validate_language_code,
};

/// Test validation of language codes
#[test]
fn test_validate_language_code_withValidCodes_shouldReturnLowercase() {
    assert_eq!(validate_language_code("en").unwrap(), "en");
    assert_eq!(validate_language_code(" TR ").unwrap(), "tr");
    assert_eq!(validate_language_code("deu").unwrap(), "deu");

    // Invalid codes
    assert!(validate_language_code("xx").is_err());
    assert!(validate_language_code("123").is_err());
    assert!(validate_language_code("e").is_err());
    assert!(validate_language_code("").is_err());
}

/// Test normalization to ISO 639-1
#[test]
fn test_normalize_to_part1_withVariousCodes_shouldPreferTwoLetters() {
    assert_eq!(normalize_to_part1("eng").unwrap(), "en");
    assert_eq!(normalize_to_part1("jpn").unwrap(), "ja");
    assert_eq!(normalize_to_part1("KO").unwrap(), "ko");
    assert!(normalize_to_part1("zzzz").is_err());
}

/// Test matching of different language code formats
#[test]
fn test_language_codes_match_withMatchingCodes_shouldReturnTrue() {
    assert!(language_codes_match("tr", "tur"));
    assert!(language_codes_match("TUR", " tr "));
    assert!(language_codes_match("zh", "zho"));

    // Non-matches
    assert!(!language_codes_match("tr", "deu"));
    assert!(!language_codes_match("tr", "invalid"));
}

/// Test retrieval of language names from codes
#[test]
fn test_get_language_name_withValidCodes_shouldReturnCorrectName() {
    assert_eq!(get_language_name("en").unwrap(), "English");
    assert_eq!(get_language_name("tr").unwrap(), "Turkish");
    assert_eq!(get_language_name("deu").unwrap(), "German");
    assert!(get_language_name("xyz1").is_err());
}

/// Test the supported target list
#[test]
fn test_supported_targets_shouldMatchPickerOrder() {
    assert_eq!(SUPPORTED_LANGUAGES.len(), 9);
    assert_eq!(supported_names()[0], "Turkish");
    assert!(is_supported_target("ko"));
    assert!(is_supported_target("rus"));
    assert!(!is_supported_target("en"));
    assert!(!is_supported_target("pt"));
}

/// Test resolving picker entries to codes
#[test]
fn test_resolve_target_language_withNamesAndCodes_shouldReturnPart1() {
    assert_eq!(resolve_target_language("Turkish").unwrap(), "tr");
    assert_eq!(resolve_target_language("japanese").unwrap(), "ja");
    assert_eq!(resolve_target_language("ita").unwrap(), "it");
    assert_eq!(resolve_target_language(" FR ").unwrap(), "fr");

    assert!(resolve_target_language("Portuguese").is_err());
    assert!(resolve_target_language("en").is_err());
}
