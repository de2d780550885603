//! Presentation modes applied on top of a score
//!
//! - `Normal`: the scorer's verdict as-is
//! - `Reverse`: inverts the reported confidence and flips the label, folding
//!   anything above 0.4 back below the midline
//! - `Opposite`: swaps the two raw probabilities and re-derives the verdict

use crate::model::scorer::{round6, ScoreResult};
use crate::model::Gender;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fold point for `Reverse` mode
const REVERSE_FOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Reverse,
    Opposite,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Normal, Mode::Reverse, Mode::Opposite];

    /// Map a numeric mode code; anything outside 0..=2 is `Normal`
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Reverse,
            2 => Self::Opposite,
            _ => Self::Normal,
        }
    }

    /// Parse a caller-supplied parameter, never failing
    ///
    /// Unparsable input behaves like an integer cast of garbage: `Normal`.
    pub fn from_param(param: &str) -> Self {
        param
            .trim()
            .parse::<i64>()
            .map(Self::from_code)
            .unwrap_or_default()
    }

    pub fn code(self) -> u8 {
        match self {
            Self::Normal => 0,
            Self::Reverse => 1,
            Self::Opposite => 2,
        }
    }

    /// Display label shown next to results
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "正常",
            Self::Reverse => "反转性别",
            Self::Opposite => "反向性别",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Reverse => "reverse",
            Self::Opposite => "opposite",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parser for CLI arguments: accepts names or numeric codes
impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "0" => Ok(Self::Normal),
            "reverse" | "1" => Ok(Self::Reverse),
            "opposite" | "2" => Ok(Self::Opposite),
            other => Err(format!(
                "'{}' is not a valid mode (normal, reverse, opposite or 0-2)",
                other
            )),
        }
    }
}

/// Verdict after the mode transform
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdjustedResult {
    pub gender: Gender,
    pub final_prob: f64,
    pub mode: Mode,
}

/// Apply `mode` to a scorer result
pub fn apply(result: &ScoreResult, mode: Mode) -> AdjustedResult {
    match mode {
        Mode::Normal => AdjustedResult {
            gender: result.gender,
            final_prob: result.final_prob,
            mode,
        },
        Mode::Reverse => {
            let mut prob = 1.0 - result.final_prob;
            if prob > REVERSE_FOLD {
                prob = REVERSE_FOLD - (prob - REVERSE_FOLD);
            }
            AdjustedResult {
                gender: result.gender.opposite(),
                final_prob: round6(prob.clamp(0.0, 1.0)),
                mode,
            }
        }
        Mode::Opposite => {
            let swapped = result.swapped();
            AdjustedResult {
                gender: swapped.gender,
                final_prob: swapped.final_prob,
                mode,
            }
        }
    }
}
