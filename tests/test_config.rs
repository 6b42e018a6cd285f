use log_sieve::{FilterExpression, load_config, load_config_from_path};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_full_profile() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
profile_name = "bundler"
filters = ["!code:EMPTY_BUNDLE", "level:warn&plugin:commonjs"]

[display]
level_field = "severity"
message_field = "msg"
"#
    )
    .unwrap();

    let config = load_config_from_path(file.path()).unwrap();
    assert_eq!(config.profile_name, "bundler");
    assert_eq!(config.filters.len(), 2);
    assert_eq!(config.display.level_field, "severity");
    assert_eq!(config.display.message_field, "msg");
    // unset fields keep their defaults
    assert_eq!(config.display.code_field, "code");

    // the profile's filters compile as-is
    assert!(FilterExpression::compile(&config.filters).is_ok());
}

#[test]
fn test_missing_fields_fall_back_to_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "profile_name = \"minimal\"").unwrap();

    let config = load_config_from_path(file.path()).unwrap();
    assert_eq!(config.profile_name, "minimal");
    assert!(config.filters.is_empty());
    assert_eq!(config.display.level_field, "level");
}

#[test]
fn test_explicit_path_is_loaded() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "filters = [\"code:A\"]").unwrap();

    let config = load_config(Some(file.path())).unwrap();
    assert_eq!(config.filters, ["code:A"]);
}

#[test]
fn test_unreadable_file_is_a_read_error() {
    let result = load_config_from_path(std::path::Path::new("/nonexistent/log-sieve.toml"));
    assert!(matches!(result, Err(log_sieve::ConfigError::Read { .. })));
}

#[test]
fn test_invalid_toml_is_a_parse_error() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "filters = not an array").unwrap();

    let result = load_config_from_path(file.path());
    assert!(matches!(result, Err(log_sieve::ConfigError::Parse { .. })));
}
