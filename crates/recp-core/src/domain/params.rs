//! Transformation parameters.
//!
//! Parameters arrive from recipe files as an ordered mapping. Order is part
//! of the contract: `replace` applies its pairs in exactly the order the
//! caller wrote them, so [`Params`] is a list of entries rather than a hash
//! map.

use std::fmt;

use crate::domain::error::DomainError;

/// A single parameter value as written in a recipe.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ParamValue>),
    Map(Params),
}

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render a scalar as the text that will be spliced into a command.
    ///
    /// Lists, maps and nulls have no textual form and return `None`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Self::String(s) => Some(s.clone()),
            Self::Integer(i) => Some(i.to_string()),
            Self::Float(f) => Some(f.to_string()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Null | Self::List(_) | Self::Map(_) => None,
        }
    }

    /// Name of the value's kind, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "mapping",
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl<T: Into<ParamValue>> From<Vec<T>> for ParamValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(params) => write!(f, "{{{} entries}}", params.len()),
            scalar => f.write_str(&scalar.to_text().unwrap_or_default()),
        }
    }
}

/// Insertion-ordered parameter mapping.
///
/// Inserting an existing key replaces its value in place, keeping the
/// original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── typed accessors ──────────────────────────────────────────────────

    pub fn require_str(&self, transformation: &str, key: &str) -> Result<&str, DomainError> {
        match self.get(key) {
            Some(value) => value.as_str().ok_or_else(|| {
                DomainError::invalid(
                    transformation,
                    key,
                    format!("expected a string, found {}", value.kind()),
                )
            }),
            None => Err(DomainError::MissingParameter {
                transformation: transformation.to_string(),
                parameter: key.to_string(),
            }),
        }
    }

    pub fn optional_str(&self, transformation: &str, key: &str) -> Result<Option<&str>, DomainError> {
        match self.get(key) {
            None | Some(ParamValue::Null) => Ok(None),
            Some(_) => self.require_str(transformation, key).map(Some),
        }
    }

    pub fn optional_bool(&self, transformation: &str, key: &str) -> Result<Option<bool>, DomainError> {
        match self.get(key) {
            None | Some(ParamValue::Null) => Ok(None),
            Some(ParamValue::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(DomainError::invalid(
                transformation,
                key,
                format!("expected true or false, found {}", other.kind()),
            )),
        }
    }

    pub fn require_int(&self, transformation: &str, key: &str) -> Result<i64, DomainError> {
        match self.get(key) {
            Some(ParamValue::Integer(i)) => Ok(*i),
            Some(ParamValue::String(s)) => s.trim().parse().map_err(|_| {
                DomainError::invalid(transformation, key, format!("'{s}' is not an integer"))
            }),
            Some(other) => Err(DomainError::invalid(
                transformation,
                key,
                format!("expected an integer, found {}", other.kind()),
            )),
            None => Err(DomainError::MissingParameter {
                transformation: transformation.to_string(),
                parameter: key.to_string(),
            }),
        }
    }

    /// A parameter that accepts either one string or a list of strings.
    pub fn string_list(&self, transformation: &str, key: &str) -> Result<Option<Vec<String>>, DomainError> {
        match self.get(key) {
            None | Some(ParamValue::Null) => Ok(None),
            Some(ParamValue::String(s)) => Ok(Some(vec![s.clone()])),
            Some(ParamValue::List(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        DomainError::invalid(
                            transformation,
                            key,
                            format!("list items must be strings, found {}", item.kind()),
                        )
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            Some(other) => Err(DomainError::invalid(
                transformation,
                key,
                format!("expected a string or a list of strings, found {}", other.kind()),
            )),
        }
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_order_is_preserved() {
        let params = Params::new().with("b", "2").with("a", "1").with("c", "3");
        assert_eq!(params.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
    }

    #[test]
    fn reinserting_keeps_position() {
        let params = Params::new().with("a", "1").with("b", "2").with("a", "9");
        let entries: Vec<_> = params.iter().map(|(k, v)| (k, v.to_text())).collect();
        assert_eq!(
            entries,
            vec![("a", Some("9".to_string())), ("b", Some("2".to_string()))]
        );
    }

    #[test]
    fn string_list_accepts_scalar_and_list() {
        let one = Params::new().with("ext", ".wav");
        let many = Params::new().with("ext", vec![".wav", ".flac"]);

        assert_eq!(
            one.string_list("dir_files", "ext").unwrap(),
            Some(vec![".wav".to_string()])
        );
        assert_eq!(
            many.string_list("dir_files", "ext").unwrap(),
            Some(vec![".wav".to_string(), ".flac".to_string()])
        );
    }

    #[test]
    fn string_list_rejects_numbers() {
        let params = Params::new().with("ext", 3_i64);
        assert!(matches!(
            params.string_list("dir_files", "ext"),
            Err(DomainError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn require_str_reports_missing() {
        let err = Params::new().require_str("date", "token").unwrap_err();
        assert_eq!(
            err,
            DomainError::MissingParameter {
                transformation: "date".into(),
                parameter: "token".into()
            }
        );
    }

    #[test]
    fn require_int_parses_numeric_strings() {
        let params = Params::new().with("n", "4");
        assert_eq!(params.require_int("repeat", "n").unwrap(), 4);
    }

    #[test]
    fn to_text_renders_scalars_only() {
        assert_eq!(ParamValue::Integer(7).to_text().as_deref(), Some("7"));
        assert_eq!(ParamValue::Bool(true).to_text().as_deref(), Some("true"));
        assert_eq!(ParamValue::List(vec![]).to_text(), None);
    }
}
