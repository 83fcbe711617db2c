use std::collections::HashMap;

use crate::error::{ConfigError, Result};

pub type ValueMap = HashMap<String, String>;

pub const SEPARATOR: char = ':';

// Horizontal whitespace only; '\n' is kept as the line separator
fn is_stripped(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\x0C' | '\x0B')
}

/// Removes every space, tab, carriage return, form feed and vertical tab
/// from `text`, leaving line breaks in place.
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !is_stripped(*c)).collect()
}

/// Turns `key:value` lines into a map.
///
/// Whitespace is insignificant anywhere on a line and blank lines are
/// skipped. Every other line must contain exactly one `:`, otherwise the
/// whole call fails and no partial map is returned. A repeated key keeps
/// the last value seen.
pub fn extract_value_map(text: &str) -> Result<ValueMap> {
    if text.is_empty() {
        return Err(ConfigError::EmptyInput);
    }

    let stripped = strip_whitespace(text);
    let mut map = ValueMap::new();
    for (index, line) in stripped.split('\n').enumerate() {
        if line.is_empty() {
            continue;
        }
        let (key, value) = match line.split_once(SEPARATOR) {
            Some((key, value)) if !value.contains(SEPARATOR) => (key, value),
            _ => {
                return Err(ConfigError::MalformedInput {
                    line: index + 1,
                    content: line.to_string(),
                })
            }
        };
        map.insert(key.to_string(), value.to_string());
    }
    Ok(map)
}
