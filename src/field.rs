use std::fmt;

use tracing::trace;

use crate::error::{ConfigError, Result};

/// Primitive kinds a config value can be coerced into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Float,
    Bool,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKind::String => "string",
            FieldKind::Integer => "int",
            FieldKind::Float => "float",
            FieldKind::Bool => "bool",
        };
        f.write_str(name)
    }
}

/// A field type that can be filled from, and written back to, config text.
pub trait FieldValue {
    const KIND: FieldKind;

    /// Parses `raw` and stores it in place. The error is a human readable reason.
    fn assign(&mut self, raw: &str) -> std::result::Result<(), String>;

    fn render(&self) -> String;
}

impl FieldValue for String {
    const KIND: FieldKind = FieldKind::String;

    fn assign(&mut self, raw: &str) -> std::result::Result<(), String> {
        self.clear();
        self.push_str(raw);
        Ok(())
    }

    fn render(&self) -> String {
        self.clone()
    }
}

macro_rules! integer_field_value {
    ($($ty:ty),+) => {
        $(
            impl FieldValue for $ty {
                const KIND: FieldKind = FieldKind::Integer;

                fn assign(&mut self, raw: &str) -> std::result::Result<(), String> {
                    *self = raw.parse::<$ty>().map_err(|e| e.to_string())?;
                    Ok(())
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

integer_field_value!(i8, i16, i32, i64, isize);

fn is_infinity_literal(raw: &str) -> bool {
    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

macro_rules! float_field_value {
    ($($ty:ty),+) => {
        $(
            impl FieldValue for $ty {
                const KIND: FieldKind = FieldKind::Float;

                fn assign(&mut self, raw: &str) -> std::result::Result<(), String> {
                    let parsed = raw.parse::<$ty>().map_err(|e| e.to_string())?;
                    // Overflowing literals parse to infinity
                    if parsed.is_infinite() && !is_infinity_literal(raw) {
                        return Err(format!("value out of range for {}", stringify!($ty)));
                    }
                    *self = parsed;
                    Ok(())
                }

                fn render(&self) -> String {
                    self.to_string()
                }
            }
        )+
    };
}

float_field_value!(f32, f64);

impl FieldValue for bool {
    const KIND: FieldKind = FieldKind::Bool;

    fn assign(&mut self, raw: &str) -> std::result::Result<(), String> {
        *self = match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => true,
            "0" | "f" | "F" | "FALSE" | "false" | "False" => false,
            _ => return Err(format!("invalid boolean literal `{}`", raw)),
        };
        Ok(())
    }

    fn render(&self) -> String {
        self.to_string()
    }
}

pub type Setter<R> = fn(&mut R, &str) -> std::result::Result<(), String>;
pub type Renderer<R> = fn(&R) -> String;

enum Slot<R> {
    Writable {
        kind: FieldKind,
        set: Setter<R>,
        render: Renderer<R>,
    },
    ReadOnly {
        kind: FieldKind,
        render: Renderer<R>,
    },
    Unsupported {
        type_name: &'static str,
    },
}

/// Static description of one field of a record: its name, its tag and how
/// to reach it.
pub struct Field<R> {
    name: &'static str,
    tag: &'static str,
    slot: Slot<R>,
}

impl<R> Field<R> {
    pub const fn new(
        name: &'static str,
        tag: &'static str,
        kind: FieldKind,
        set: Setter<R>,
        render: Renderer<R>,
    ) -> Self {
        Self {
            name,
            tag,
            slot: Slot::Writable { kind, set, render },
        }
    }

    /// A tagged field that is rendered but refuses assignment.
    pub const fn read_only(
        name: &'static str,
        tag: &'static str,
        kind: FieldKind,
        render: Renderer<R>,
    ) -> Self {
        Self {
            name,
            tag,
            slot: Slot::ReadOnly { kind, render },
        }
    }

    /// A tagged field whose type has no text coercion.
    pub const fn unsupported(
        name: &'static str,
        tag: &'static str,
        type_name: &'static str,
    ) -> Self {
        Self {
            name,
            tag,
            slot: Slot::Unsupported { type_name },
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn kind(&self) -> Option<FieldKind> {
        match self.slot {
            Slot::Writable { kind, .. } | Slot::ReadOnly { kind, .. } => Some(kind),
            Slot::Unsupported { .. } => None,
        }
    }

    pub fn is_settable(&self) -> bool {
        matches!(self.slot, Slot::Writable { .. })
    }

    pub fn render(&self, record: &R) -> Option<String> {
        match &self.slot {
            Slot::Writable { render, .. } | Slot::ReadOnly { render, .. } => Some(render(record)),
            Slot::Unsupported { .. } => None,
        }
    }

    pub fn assign(&self, record: &mut R, value: &str) -> Result<()> {
        match &self.slot {
            Slot::Writable { kind, set, .. } => {
                set(record, value).map_err(|reason| ConfigError::Conversion {
                    field: self.name,
                    kind: *kind,
                    value: value.to_string(),
                    reason,
                })?;
                trace!(field = self.name, tag = self.tag, "assigned config value");
                Ok(())
            }
            Slot::ReadOnly { .. } => Err(ConfigError::FieldNotSettable { field: self.name }),
            Slot::Unsupported { type_name } => Err(ConfigError::UnsupportedFieldType {
                field: self.name,
                type_name: *type_name,
            }),
        }
    }
}

/// A record that can be populated from config text.
///
/// Implement it with the [`configurable!`](crate::configurable) macro or by
/// hand when a field needs to be read-only or has no text coercion.
pub trait Configurable: Sized + 'static {
    /// The record's fields in declaration order.
    fn fields() -> &'static [Field<Self>];
}

/// Assigns `value` to every field of `record` tagged `tag`.
///
/// Fields are visited in declaration order and the first failure aborts
/// the call; fields assigned before it keep their new value. A tag that no
/// field declares is not an error.
pub fn set_field<R: Configurable>(record: &mut R, tag: &str, value: &str) -> Result<()> {
    let mut matched = false;
    for field in R::fields().iter().filter(|field| field.tag == tag) {
        field.assign(record, value)?;
        matched = true;
    }
    if !matched {
        trace!(tag, "ignoring key with no matching field");
    }
    Ok(())
}

pub fn tags<R: Configurable>() -> Vec<&'static str> {
    R::fields().iter().map(Field::tag).collect()
}

/// Tags declared by more than one field, sorted. Callers that do not want
/// one key feeding several fields can reject the record type at start-up.
pub fn duplicate_tags<R: Configurable>() -> Vec<&'static str> {
    let mut all = tags::<R>();
    all.sort_unstable();
    let mut duplicates: Vec<&'static str> = all
        .windows(2)
        .filter(|pair| pair[0] == pair[1])
        .map(|pair| pair[0])
        .collect();
    duplicates.dedup();
    duplicates
}
