//! Normalized employee records.
//!
//! Whatever parses the upload (CSV, JSON, a spreadsheet export) hands over one [`Record`] per
//! row. Field names are matched case-insensitively, so keys are stored trimmed and uppercased.

use crate::Result;
use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Identifier aliases, in priority order.
pub const ID_FIELDS: &[&str] = &["EMPLOYEENUMBER", "EMPLOYEE ID"];
/// Manager reference aliases, in priority order.
pub const MANAGER_FIELDS: &[&str] = &["SUPERVISORPARTYID", "MANAGER ID", "SUPERVISOR ID"];
/// Display name aliases, in priority order.
pub const NAME_FIELDS: &[&str] = &["FIRSTNAME", "NAME", "FULL NAME"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: IndexMap<String, String>,
}

fn normalize_key(key: &str) -> String {
    key.trim().to_ascii_uppercase()
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut record = Self::new();
        for (k, v) in pairs {
            record.insert(k.as_ref(), v.as_ref());
        }
        record
    }

    /// Inserts a field; a key that normalizes to an existing one replaces its value.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.fields
            .insert(normalize_key(key), value.trim().to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(&normalize_key(key)).map(String::as_str)
    }

    /// Returns the value of the first alias that is present with a non-empty value.
    pub fn first_of(&self, aliases: &[&str]) -> Option<&str> {
        aliases
            .iter()
            .filter_map(|alias| self.get(alias))
            .find(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Record {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self::from_pairs(iter)
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Spreadsheet exports routinely type numeric ids as JSON numbers; keep them as text.
        let raw = IndexMap::<String, Value>::deserialize(deserializer)?;
        let mut record = Record::new();
        for (key, value) in raw {
            match value {
                Value::Null => {}
                Value::String(s) => record.insert(&key, &s),
                Value::Number(n) => record.insert(&key, &n.to_string()),
                Value::Bool(b) => record.insert(&key, if b { "true" } else { "false" }),
                Value::Array(_) | Value::Object(_) => {
                    return Err(de::Error::custom(format!(
                        "field `{key}` must be a scalar value"
                    )));
                }
            }
        }
        Ok(record)
    }
}

/// Parses a JSON array of flat objects into records.
pub fn records_from_json(text: &str) -> Result<Vec<Record>> {
    Ok(serde_json::from_str(text)?)
}
