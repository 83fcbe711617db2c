use std::io;

use crate::field::FieldKind;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    // Surfaced verbatim: missing file, permissions, executable path, invalid UTF-8
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("empty config string")]
    EmptyInput,

    #[error("invalid config key/value on line {line}: `{content}`")]
    MalformedInput { line: usize, content: String },

    #[error("cannot set field {field}")]
    FieldNotSettable { field: &'static str },

    #[error("failed to convert value `{value}` to {kind} for field {field}: {reason}")]
    Conversion {
        field: &'static str,
        kind: FieldKind,
        value: String,
        reason: String,
    },

    #[error("unsupported field type: {type_name} (field {field})")]
    UnsupportedFieldType {
        field: &'static str,
        type_name: &'static str,
    },
}
