//! Loads flat `key:value` config text into a typed record.
//!
//! Each record declares a tag per field (see [`configurable!`]); parsed keys
//! are matched against those tags and the text is coerced into the field's
//! string, integer, float or bool type.

pub mod config;
pub mod error;
pub mod extract;
pub mod field;
mod macros;

pub use config::{
    executable_dir, parse_config, parse_config_from_exe_folder, parse_config_from_file,
    read_config_file, render_config,
};
pub use error::{ConfigError, Result};
pub use extract::{extract_value_map, strip_whitespace, ValueMap};
pub use field::{duplicate_tags, set_field, tags, Configurable, Field, FieldKind, FieldValue};
