//! Configuration tests
//!
//! Round-trip guards keep `to_toml()` and `FileConfig` in step: when a field
//! is added to one and not the other, these fail.

use super::*;
use crate::highlight::Rgb;
use std::collections::HashMap;
use std::time::Duration;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

fn no_env(_: &str) -> Option<String> {
    None
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).expect("test TOML should parse")
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let reloaded = Config::from_sources(parsed.unwrap(), &no_env);
    assert_eq!(reloaded.provider.base_url, config.provider.base_url);
    assert_eq!(reloaded.provider.model, config.provider.model);
    assert_eq!(reloaded.prompt, config.prompt);
    assert_eq!(reloaded.highlight, config.highlight);
    assert_eq!(reloaded.logging.file_rotation, config.logging.file_rotation);
}

#[test]
fn test_config_roundtrip_custom_values() {
    let mut config = Config::default();
    config.prompt.temperature = 1.0;
    config.prompt.language = "English".to_string();
    config.highlight.selected = Rgb::from_hex(0xff8800);
    config.logging.file_rotation = LogRotation::Hourly;

    let reloaded = Config::from_sources(parse(&config.to_toml()), &no_env);
    assert_eq!(reloaded.prompt.temperature, 1.0);
    assert_eq!(reloaded.prompt.language, "English");
    assert_eq!(reloaded.highlight.selected, Rgb::from_hex(0xff8800));
    assert_eq!(reloaded.logging.file_rotation, LogRotation::Hourly);
}

#[test]
fn test_to_toml_never_writes_key() {
    let mut config = Config::default();
    config.provider.credential = Some(Credential::new("sk-secret-value"));
    let toml_str = config.to_toml();
    assert!(!toml_str.contains("sk-secret-value"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let config = Config::from_sources(FileConfig::default(), &no_env);
    assert_eq!(config.provider.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.provider.model, DEFAULT_MODEL);
    assert_eq!(config.provider.key_env, DEFAULT_KEY_ENV);
    assert_eq!(config.prompt, PromptConfig::default());
    assert!(config.provider.credential.is_none());
}

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
[provider]
base_url = "https://file.example/v1"
model = "file-model"
"#,
    );
    let env = env_from(&[
        ("NEUROMUSCLE_BASE_URL", "https://env.example/v1"),
        ("NEUROMUSCLE_MODEL", "env-model"),
    ]);
    let config = Config::from_sources(file, &env);
    assert_eq!(config.provider.base_url, "https://env.example/v1");
    assert_eq!(config.provider.model, "env-model");
}

#[test]
fn test_credential_env_beats_file_key() {
    let file = parse(
        r#"
[provider]
key_env = "MY_KEY"
key = "from-file"
"#,
    );
    let config = Config::from_sources(file, &env_from(&[("MY_KEY", "from-env")]));
    assert_eq!(
        config.provider.credential.as_ref().map(|c| c.expose()),
        Some("from-env")
    );
}

#[test]
fn test_credential_from_file_key() {
    let file = parse("[provider]\nkey = \"from-file\"\n");
    let config = Config::from_sources(file, &no_env);
    assert_eq!(
        config.provider.credential.as_ref().map(|c| c.expose()),
        Some("from-file")
    );
    assert!(config.warnings.is_empty());
}

#[test]
fn test_blank_credential_is_missing() {
    let config = Config::from_sources(
        FileConfig::default(),
        &env_from(&[(DEFAULT_KEY_ENV, "   ")]),
    );
    assert!(config.provider.credential.is_none());
    assert!(config.warnings.iter().any(|w| w.contains(DEFAULT_KEY_ENV)));
}

#[test]
fn test_log_level_env_override() {
    let file = parse("[logging]\nlevel = \"warn\"\n");
    let config = Config::from_sources(file, &env_from(&[(LOG_LEVEL_ENV, "debug")]));
    assert_eq!(config.logging.level, "debug");
}

// ─────────────────────────────────────────────────────────────────────────────
// Section parsing
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_prompt_values_are_clamped() {
    let file = parse(
        r#"
[prompt]
temperature = 9.5
max_tokens = 0
exercise_count = 99
language = ""
"#,
    );
    let prompt = Config::from_sources(file, &no_env).prompt;
    assert_eq!(prompt.temperature, 2.0);
    assert_eq!(prompt.max_tokens, 800);
    assert_eq!(prompt.exercise_count, 10);
    assert_eq!(prompt.language, "Simplified Chinese");
}

#[test]
fn test_invalid_highlight_colour_warns_and_keeps_default() {
    let file = parse(
        r##"
[highlight]
selected = "blue"
hover = "#ffffff"
pulse_period_ms = 0
"##,
    );
    let config = Config::from_sources(file, &no_env);
    let defaults = crate::highlight::HighlightPalette::default();
    assert_eq!(config.highlight.selected, defaults.selected);
    assert_eq!(config.highlight.hover, Rgb::from_hex(0xffffff));
    assert_eq!(config.highlight.pulse_period, defaults.pulse_period);
    assert!(config.warnings.iter().any(|w| w.contains("highlight.selected")));
    assert!(config.warnings.iter().any(|w| w.contains("pulse_period_ms")));
}

#[test]
fn test_custom_pulse_period() {
    let file = parse("[highlight]\npulse_period_ms = 2000\n");
    let config = Config::from_sources(file, &no_env);
    assert_eq!(config.highlight.pulse_period, Duration::from_millis(2000));
}

#[test]
fn test_timeout_and_endpoint() {
    let file = parse(
        r#"
[provider]
base_url = "https://api.example.com/v1/"
api_path = "chat/completions"
timeout_secs = 5
"#,
    );
    let provider = Config::from_sources(file, &no_env).provider;
    assert_eq!(provider.timeout, Duration::from_secs(5));
    assert_eq!(
        provider.endpoint_url(),
        "https://api.example.com/v1/chat/completions"
    );
}

#[test]
fn test_log_rotation_parse() {
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
    assert_eq!(LogRotation::parse("never"), LogRotation::Never);
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
}

#[test]
fn test_unknown_sections_are_rejected_only_by_type() {
    // unknown keys are ignored; wrong types are errors
    assert!(toml::from_str::<FileConfig>("[theme]\nname = \"x\"\n").is_ok());
    assert!(toml::from_str::<FileConfig>("[prompt]\nmax_tokens = \"lots\"\n").is_err());
}

#[test]
fn test_read_missing_file_is_default() {
    let path = std::env::temp_dir().join("neuromuscle-does-not-exist/config.toml");
    let file = Config::read_file_config(&path).unwrap();
    assert!(file.provider.is_none());
}

#[test]
fn test_read_broken_file_is_error() {
    let dir = std::env::temp_dir().join(format!("neuromuscle-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, "[provider\nbase_url = ").unwrap();

    let err = Config::read_file_config(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse config file"));

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_credential_debug_is_redacted() {
    let credential = Credential::new("sk-very-secret");
    let debug = format!("{:?}", credential);
    assert!(!debug.contains("sk-very-secret"));
    assert_eq!(credential.fingerprint().len(), 8);
}

// ─────────────────────────────────────────────────────────────────────────────
// Rewriting an existing file
// ─────────────────────────────────────────────────────────────────────────────

fn scratch_file(name: &str, contents: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("neuromuscle-{}-{}", name, std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("config.toml");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_updated_toml_keeps_file_key_and_file_values() {
    let path = scratch_file(
        "update",
        r#"
[provider]
model = "file-model"
key = "sk-user-file-key"

[prompt]
exercise_count = 3
"#,
    );

    let updated = Config::updated_toml(&path).unwrap();
    let reloaded = Config::from_sources(parse(&updated), &no_env);

    assert_eq!(
        reloaded.provider.credential.as_ref().map(|c| c.expose()),
        Some("sk-user-file-key")
    );
    assert_eq!(reloaded.provider.model, "file-model");
    assert_eq!(reloaded.prompt.exercise_count, 3);

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_updated_toml_without_key_keeps_it_commented() {
    let path = scratch_file("update-nokey", "[provider]\nmodel = \"file-model\"\n");

    let updated = Config::updated_toml(&path).unwrap();
    assert!(updated.contains("# key = "));
    assert!(parse(&updated).provider.unwrap().key.is_none());

    let _ = std::fs::remove_dir_all(path.parent().unwrap());
}

#[test]
fn test_to_toml_escapes_strings() {
    let mut config = Config::default();
    config.prompt.language = r#"Chinese "Simplified""#.to_string();
    config.logging.file_dir = std::path::PathBuf::from(r"C:\logs\neuromuscle");
    config.provider.model = "org/model\tv2".to_string();

    let reloaded = Config::from_sources(parse(&config.to_toml()), &no_env);
    assert_eq!(reloaded.prompt.language, r#"Chinese "Simplified""#);
    assert_eq!(
        reloaded.logging.file_dir,
        std::path::PathBuf::from(r"C:\logs\neuromuscle")
    );
    assert_eq!(reloaded.provider.model, "org/model\tv2");
}
