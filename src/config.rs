use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::extract::{extract_value_map, SEPARATOR};
use crate::field::{set_field, Configurable};

// Config loading propagates every failure to the caller: nothing here prints,
// exits, or retries. A failure part way through binding leaves the fields
// assigned so far in place.

/// Populates `record` from `key:value` text.
pub fn parse_config<R: Configurable>(record: &mut R, config_str: &str) -> Result<()> {
    let key_values = extract_value_map(config_str)?;
    for (key, value) in &key_values {
        set_field(record, key, value)?;
    }
    Ok(())
}

/// Populates `record` from the file at `path`. The record is untouched if
/// the file cannot be read.
pub fn parse_config_from_file<R: Configurable>(
    record: &mut R,
    path: impl AsRef<Path>,
) -> Result<()> {
    let config_str = read_config_file(path)?;
    parse_config(record, &config_str)
}

/// Populates `record` from `file_name` in the directory holding the running
/// executable.
pub fn parse_config_from_exe_folder<R: Configurable>(
    record: &mut R,
    file_name: &str,
) -> Result<()> {
    let path = executable_dir()?.join(file_name);
    parse_config_from_file(record, path)
}

pub fn read_config_file(path: impl AsRef<Path>) -> io::Result<String> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    debug!(path = %path.display(), bytes = content.len(), "read config file");
    Ok(content)
}

/// Directory containing the current executable, resolved on every call.
pub fn executable_dir() -> io::Result<PathBuf> {
    let executable = std::env::current_exe()?;
    executable.parent().map(Path::to_path_buf).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "executable has no parent directory",
        )
    })
}

/// Writes every renderable field of `record` as a `tag:value` line, in
/// declaration order.
pub fn render_config<R: Configurable>(record: &R) -> String {
    let mut out = String::new();
    for field in R::fields() {
        if let Some(value) = field.render(record) {
            out.push_str(field.tag());
            out.push(SEPARATOR);
            out.push_str(&value);
            out.push('\n');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[derive(Debug, Default, PartialEq)]
    struct TestStruct {
        config_str: String,
        config_int: i64,
        config_float: f64,
        config_bool: bool,
    }

    crate::configurable! {
        TestStruct {
            config_str: String => "config1",
            config_int: i64 => "config2",
            config_float: f64 => "config3",
            config_bool: bool => "config4",
        }
    }

    #[test]
    fn parse_config_no_error() {
        let mut result = TestStruct::default();
        parse_config(
            &mut result,
            "config1: /path/to/folder/\nconfig2:123\nconfig3:1.23\nconfig4:  false",
        )
        .unwrap();
        assert_eq!(
            result,
            TestStruct {
                config_str: "/path/to/folder/".to_string(),
                config_int: 123,
                config_float: 1.23,
                config_bool: false,
            }
        );
    }

    #[test]
    fn parse_config_empty_string() {
        let mut result = TestStruct::default();
        assert!(matches!(
            parse_config(&mut result, ""),
            Err(ConfigError::EmptyInput)
        ));
        assert_eq!(result, TestStruct::default());
    }

    #[test]
    fn malformed_line_binds_nothing() {
        let mut result = TestStruct::default();
        assert!(matches!(
            parse_config(&mut result, "config2:1\nconfig1:a:b"),
            Err(ConfigError::MalformedInput { line: 2, .. })
        ));
        assert_eq!(result, TestStruct::default());
    }

    #[test]
    fn missing_tags_keep_defaults() {
        let mut result = TestStruct {
            config_int: 9,
            ..Default::default()
        };
        parse_config(&mut result, "config1:x\nunknown:1").unwrap();
        assert_eq!(result.config_str, "x");
        assert_eq!(result.config_int, 9);
    }

    #[test]
    fn binding_error_is_surfaced() {
        let mut result = TestStruct::default();
        assert!(matches!(
            parse_config(&mut result, "config2:not a number"),
            Err(ConfigError::Conversion { field: "config_int", .. })
        ));
    }

    #[test]
    fn render_then_parse_round_trips() {
        let original = TestStruct {
            config_str: "/srv/data".to_string(),
            config_int: -42,
            config_float: 1.23,
            config_bool: true,
        };
        let text = render_config(&original);
        assert_eq!(text, "config1:/srv/data\nconfig2:-42\nconfig3:1.23\nconfig4:true\n");

        let mut reparsed = TestStruct::default();
        parse_config(&mut reparsed, &text).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_config_file(dir.path().join("absent.conf")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn executable_dir_contains_test_binary() {
        let dir = executable_dir().unwrap();
        let exe = std::env::current_exe().unwrap();
        assert_eq!(exe.parent().unwrap(), dir.as_path());
    }

    #[test]
    fn exe_folder_missing_file_is_io_error() {
        let mut result = TestStruct::default();
        let err = parse_config_from_exe_folder(&mut result, "shrmpl-conf-does-not-exist.conf")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io(ref e) if e.kind() == io::ErrorKind::NotFound));
        assert_eq!(result, TestStruct::default());
    }
}
