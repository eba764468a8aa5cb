use ka::config::{ConfigWarning, Settings};
use pretty_assertions::assert_eq;

#[test]
fn defaults_without_a_file() {
    let (settings, warnings) = Settings::parse("");
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.precision, 6);
    assert!(warnings.is_empty());
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let (settings, warnings) = Settings::parse("# digits\n\n  precision =  12  \n");
    assert_eq!(settings.precision, 12);
    assert!(warnings.is_empty());
}

#[test]
fn bad_lines_are_reported_and_the_rest_applies() {
    let (settings, warnings) = Settings::parse("precision = lots\nprompt = ka>\njust words\nprecision = 3");
    assert_eq!(settings.precision, 3);
    assert_eq!(warnings,
               vec![ConfigWarning::BadInteger { line:  1,
                                                key:   "precision".to_string(),
                                                value: "lots".to_string(), },
                    ConfigWarning::UnknownKey { line: 2,
                                                key:  "prompt".to_string(), },
                    ConfigWarning::Malformed { line: 3 },]);
}
