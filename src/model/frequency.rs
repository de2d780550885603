//! Per-character occurrence counts
//!
//! The table maps a single character to how often it appeared in male and
//! female names. Totals are summed once at load time so the scorer can turn
//! counts into conditional frequencies without walking the table again.

use crate::error::{NGenderError, NGenderResult};
use crate::model::Gender;
use rustc_hash::FxHashMap;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::debug;

/// Occurrence counts for one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequencyEntry {
    pub male: u64,
    pub female: u64,
}

impl FrequencyEntry {
    /// Add-one counts used for characters the table has never seen
    pub const FALLBACK: FrequencyEntry = FrequencyEntry { male: 1, female: 1 };

    pub fn count(&self, gender: Gender) -> u64 {
        match gender {
            Gender::Male => self.male,
            Gender::Female => self.female,
        }
    }
}

/// Immutable character frequency table
#[derive(Debug, Clone)]
pub struct FrequencyTable {
    entries: FxHashMap<char, FrequencyEntry>,
    male_total: u64,
    female_total: u64,
}

impl FrequencyTable {
    /// Load and validate a table from a JSON file
    pub fn load(path: &Path) -> NGenderResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NGenderError::io(path, e))?;
        let table = Self::from_json_str(&content)?;
        debug!(
            "Loaded {} characters from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn from_json_str(content: &str) -> NGenderResult<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(&value)
    }

    /// Validate a parsed JSON document of the form
    /// `{"字": {"male": 12, "female": 3}, ...}`
    pub fn from_value(value: &Value) -> NGenderResult<Self> {
        let map = match value.as_object() {
            Some(map) if !map.is_empty() => map,
            _ => {
                return Err(NGenderError::DataFormat(
                    "expected a non-empty object of character -> {male, female}".to_string(),
                ))
            }
        };

        let mut entries = FxHashMap::default();
        entries.reserve(map.len());

        for (key, data) in map {
            let mut chars = key.chars();
            let ch = match (chars.next(), chars.next()) {
                (Some(ch), None) => ch,
                _ => {
                    return Err(NGenderError::DataFormat(format!(
                        "key '{key}' must be exactly one character"
                    )))
                }
            };

            let fields = data.as_object();
            let male = fields.and_then(|f| parse_count(f, "male"));
            let female = fields.and_then(|f| parse_count(f, "female"));
            match (male, female) {
                (Some(male), Some(female)) => {
                    entries.insert(ch, FrequencyEntry { male, female });
                }
                _ => {
                    return Err(NGenderError::DataFormat(format!(
                        "character '{key}' needs numeric male/female counts"
                    )))
                }
            }
        }

        Self::from_entries(entries)
    }

    /// Build a table from already-typed entries, computing totals
    pub fn from_entries(entries: FxHashMap<char, FrequencyEntry>) -> NGenderResult<Self> {
        if entries.is_empty() {
            return Err(NGenderError::DataFormat(
                "frequency table is empty".to_string(),
            ));
        }

        let (male_total, female_total) = entries.values().fold((0u64, 0u64), |(m, f), e| {
            (m.saturating_add(e.male), f.saturating_add(e.female))
        });

        if male_total == 0 || female_total == 0 {
            return Err(NGenderError::DataIntegrity(format!(
                "totals must be positive (male={male_total}, female={female_total})"
            )));
        }

        Ok(Self {
            entries,
            male_total,
            female_total,
        })
    }

    pub fn get(&self, ch: char) -> Option<&FrequencyEntry> {
        self.entries.get(&ch)
    }

    /// Entry for `ch`, or the add-one fallback when unseen
    pub fn entry_or_fallback(&self, ch: char) -> FrequencyEntry {
        self.entries
            .get(&ch)
            .copied()
            .unwrap_or(FrequencyEntry::FALLBACK)
    }

    pub fn total(&self, gender: Gender) -> u64 {
        match gender {
            Gender::Male => self.male_total,
            Gender::Female => self.female_total,
        }
    }

    pub fn male_total(&self) -> u64 {
        self.male_total
    }

    pub fn female_total(&self) -> u64 {
        self.female_total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accepts JSON numbers and numeric strings; fractional values are
/// truncated, negative values rejected.
fn parse_count(fields: &Map<String, Value>, key: &str) -> Option<u64> {
    let number = match fields.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() || number < 0.0 {
        return None;
    }
    Some(number.trunc() as u64)
}
