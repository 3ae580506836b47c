//! Outcome of reading a single source.

use serde::{Serialize, Serializer};

/// Text emitted in the document in place of a source that could not be read.
pub const NOT_AVAILABLE: &str = "not available";

/// Either the data read from a source, or the `Unavailable` sentinel.
///
/// A missing file, a command that could not be spawned, a non-zero exit and a
/// timeout all collapse into `Unavailable`. Parsers are only ever applied via
/// [`Collected::map`], so they never see the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Collected<T> {
    Data(T),
    Unavailable,
}

/// Unparsed text content of a file or command.
pub type RawText = Collected<String>;

impl<T> Collected<T> {
    /// Applies `f` to the data, passing `Unavailable` through untouched.
    pub fn map<U, F>(self, f: F) -> Collected<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Collected::Data(value) => Collected::Data(f(value)),
            Collected::Unavailable => Collected::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Collected::Data(_))
    }

    /// Returns the data, if any.
    pub fn data(&self) -> Option<&T> {
        match self {
            Collected::Data(value) => Some(value),
            Collected::Unavailable => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            Collected::Data(value) => Some(value),
            Collected::Unavailable => None,
        }
    }
}

impl<T> From<Option<T>> for Collected<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Collected::Data(value),
            None => Collected::Unavailable,
        }
    }
}

impl<T: Serialize> Serialize for Collected<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Collected::Data(value) => value.serialize(serializer),
            Collected::Unavailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FlatMap;

    #[test]
    fn test_map_skips_unavailable() {
        let mut called = false;
        let result: Collected<usize> = RawText::Unavailable.map(|s| {
            called = true;
            s.len()
        });
        assert_eq!(result, Collected::Unavailable);
        assert!(!called);
    }

    #[test]
    fn test_map_applies_to_data() {
        let result = RawText::Data("abc".to_string()).map(|s| s.len());
        assert_eq!(result, Collected::Data(3));
    }

    #[test]
    fn test_unavailable_serializes_as_sentinel_text() {
        let section: Collected<FlatMap> = Collected::Unavailable;
        let json = serde_json::to_string(&section).unwrap();
        assert_eq!(json, "\"not available\"");
    }

    #[test]
    fn test_data_serializes_transparently() {
        let mut map = FlatMap::new();
        map.insert("a".to_string(), "1".to_string());
        let json = serde_json::to_string(&Collected::Data(map)).unwrap();
        assert_eq!(json, r#"{"a":"1"}"#);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Collected::from(Some(1)), Collected::Data(1));
        assert_eq!(Collected::<u8>::from(None), Collected::Unavailable);
    }
}
