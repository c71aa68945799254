//! Tier 4: loggers from `safelog.toml`

use safelog::{SafeLogConfig, SafeLogger, SinkKind, Value, CONFIG_FILE_NAME};
use tempfile::TempDir;

#[test]
fn config_default_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);

    SafeLogConfig::write_default_if_missing(&path).unwrap();
    let config = SafeLogConfig::from_file(&path).unwrap();
    assert_eq!(config.sink_kind().unwrap(), SinkKind::Console);

    let logger = SafeLogger::from_config(&config).unwrap();
    logger.log("config:", &Value::Bool(true));
}

#[test]
fn config_compact_indent_applies() {
    let config = SafeLogConfig::from_toml_str("[stringify]\nindent = 0\n").unwrap();
    let text = safelog::Stringifier::new(config.stringify.clone())
        .stringify(&Value::from(vec![Value::Int(1), Value::Int(2)]));
    assert_eq!(text, "[1,2]");
}

#[test]
fn config_unknown_sink_rejected() {
    assert!(SafeLogConfig::from_toml_str("sink = \"file\"").is_err());
}
