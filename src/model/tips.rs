//! Confidence-tiered captions
//!
//! A caption bank holds six buckets of templates, one per gender and
//! confidence tier. Templates use `{targetG}` for the reported gender and
//! `{targetRG}` for the other one.

use crate::error::{NGenderError, NGenderResult};
use crate::model::Gender;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

const TARGET_PLACEHOLDER: &str = "{targetG}";
const OPPOSITE_PLACEHOLDER: &str = "{targetRG}";

/// Above this the verdict is `Sure`
const SURE_THRESHOLD: f64 = 0.6;
/// At or above this (and not `Sure`) the verdict is `Uncertain`
const UNCERTAIN_THRESHOLD: f64 = 0.4;

/// Confidence bucket used to choose a caption's tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Sure,
    Uncertain,
    Reverse,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Sure, Tier::Uncertain, Tier::Reverse];

    pub fn from_probability(prob: f64) -> Self {
        if prob > SURE_THRESHOLD {
            Self::Sure
        } else if prob >= UNCERTAIN_THRESHOLD {
            Self::Uncertain
        } else {
            Self::Reverse
        }
    }

    fn suffix(self) -> &'static str {
        match self {
            Self::Sure => "sure",
            Self::Uncertain => "uncertain",
            Self::Reverse => "reverse",
        }
    }
}

/// Bank key such as `male_uncertain`
pub fn bucket_key(gender: Gender, tier: Tier) -> String {
    format!("{}_{}", gender.code(), tier.suffix())
}

/// Validated caption templates
#[derive(Debug, Clone)]
pub struct CaptionBank {
    buckets: HashMap<(Gender, Tier), Vec<String>>,
}

impl CaptionBank {
    pub fn load(path: &Path) -> NGenderResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| NGenderError::io(path, e))?;
        let bank = Self::from_json_str(&content)?;
        debug!("Loaded caption bank from {}", path.display());
        Ok(bank)
    }

    pub fn from_json_str(content: &str) -> NGenderResult<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|e| NGenderError::Config(format!("caption bank is not valid JSON: {e}")))?;
        Self::from_value(&value)
    }

    /// Every one of the six buckets must be a non-empty array of
    /// non-blank strings. Unknown keys are ignored.
    pub fn from_value(value: &Value) -> NGenderResult<Self> {
        let map = value.as_object().ok_or_else(|| {
            NGenderError::Config("caption bank must be a JSON object".to_string())
        })?;

        let mut buckets = HashMap::new();
        for gender in Gender::ALL {
            for tier in Tier::ALL {
                let key = bucket_key(gender, tier);
                let templates = map
                    .get(&key)
                    .and_then(Value::as_array)
                    .and_then(|items| {
                        items
                            .iter()
                            .map(|item| item.as_str().map(str::to_string))
                            .collect::<Option<Vec<_>>>()
                    });

                match templates {
                    Some(list)
                        if !list.is_empty() && list.iter().all(|t| !t.trim().is_empty()) =>
                    {
                        buckets.insert((gender, tier), list);
                    }
                    _ => {
                        return Err(NGenderError::Config(format!(
                            "caption bank bucket '{key}' must be a non-empty array of non-blank strings"
                        )))
                    }
                }
            }
        }

        Ok(Self { buckets })
    }

    /// Templates for a bucket, falling back to the gender's `Sure` bucket
    pub fn templates(&self, gender: Gender, tier: Tier) -> &[String] {
        match self.buckets.get(&(gender, tier)) {
            Some(list) if !list.is_empty() => list,
            _ => self
                .buckets
                .get(&(gender, Tier::Sure))
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    pub fn bucket_len(&self, gender: Gender, tier: Tier) -> usize {
        self.buckets.get(&(gender, tier)).map_or(0, Vec::len)
    }

    /// Pick a caption using the thread-local RNG
    pub fn pick(&self, final_prob: f64, gender: Gender) -> String {
        self.pick_with(&mut rand::rng(), final_prob, gender)
    }

    /// Pick a caption with an explicit random source
    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R, final_prob: f64, gender: Gender) -> String {
        let tier = Tier::from_probability(final_prob);
        self.templates(gender, tier)
            .choose(rng)
            .map(|template| render(template, gender))
            .unwrap_or_default()
    }
}

fn render(template: &str, gender: Gender) -> String {
    template
        .replace(TARGET_PLACEHOLDER, gender.label())
        .replace(OPPOSITE_PLACEHOLDER, gender.opposite().label())
}
