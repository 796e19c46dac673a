use serde_json::{Map, Value};

/// How absent optional fields are written when encoding a record.
///
/// Decoding accepts either convention: a missing key and an explicit `null`
/// both decode to `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OptionalFields {
    /// Leave the key out of the object entirely.
    #[default]
    Omit,
    /// Write the key with a `null` value.
    ExplicitNull,
}

impl OptionalFields {
    pub(crate) fn insert(self, map: &mut Map<String, Value>, key: &str, value: Option<Value>) {
        match (value, self) {
            (Some(value), _) => {
                map.insert(key.to_owned(), value);
            },
            (None, Self::ExplicitNull) => {
                map.insert(key.to_owned(), Value::Null);
            },
            (None, Self::Omit) => {},
        }
    }
}
