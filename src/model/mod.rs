//! Name gender classifier
//!
//! Scores a name with a per-character naive Bayes model, applies one of
//! three presentation modes, then annotates the verdict with a caption.
//!
//! Pipeline: FrequencyTable → Scorer → mode::apply → CaptionBank::pick
//!
//! All reference data is injected as immutable values, so a `Classifier`
//! can be shared freely across threads. Reloading swaps the whole value
//! through [`ClassifierHandle`].

pub mod frequency;
mod gender;
pub mod mode;
pub mod scorer;
pub mod tips;

pub use frequency::{FrequencyEntry, FrequencyTable};
pub use gender::Gender;
pub use mode::{AdjustedResult, Mode};
pub use scorer::{BasePriors, ScoreResult, Scorer};
pub use tips::{CaptionBank, Tier};

use crate::error::NGenderResult;
use rand::Rng;
use std::sync::{Arc, RwLock};
use tracing::{info, trace};

/// Sample frequency table shipped with the crate
pub const BUNDLED_CHARFREQ: &str = include_str!("../../data/charfreq.json");

/// Caption bank shipped with the crate
pub const BUNDLED_TIPS: &str = include_str!("../../data/tips.json");

/// Full result of classifying one name
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub score: ScoreResult,
    pub adjusted: AdjustedResult,
    pub tip: String,
}

/// Immutable bundle of everything needed to classify names
#[derive(Debug, Clone)]
pub struct Classifier {
    table: FrequencyTable,
    priors: BasePriors,
    captions: CaptionBank,
}

impl Classifier {
    pub fn new(table: FrequencyTable, priors: BasePriors, captions: CaptionBank) -> Self {
        Self {
            table,
            priors,
            captions,
        }
    }

    /// Classifier over the bundled sample data and default priors
    pub fn bundled() -> NGenderResult<Self> {
        Ok(Self::new(
            FrequencyTable::from_json_str(BUNDLED_CHARFREQ)?,
            BasePriors::default(),
            CaptionBank::from_json_str(BUNDLED_TIPS)?,
        ))
    }

    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    pub fn priors(&self) -> BasePriors {
        self.priors
    }

    pub fn captions(&self) -> &CaptionBank {
        &self.captions
    }

    pub fn scorer(&self) -> Scorer<'_> {
        Scorer::new(&self.table, self.priors)
    }

    /// Raw scorer output for a name
    pub fn guess(&self, name: &str) -> ScoreResult {
        self.scorer().guess(name)
    }

    /// Score, apply `mode`, and pick a caption
    ///
    /// `name` must already be validated (non-empty).
    pub fn classify(&self, name: &str, mode: Mode) -> Classification {
        self.classify_with(&mut rand::rng(), name, mode)
    }

    pub fn classify_with<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        name: &str,
        mode: Mode,
    ) -> Classification {
        let score = self.guess(name);
        let adjusted = mode::apply(&score, mode);
        let tip = self
            .captions
            .pick_with(rng, adjusted.final_prob, adjusted.gender);

        trace!(
            name,
            mode = %mode,
            gender = %adjusted.gender,
            prob = adjusted.final_prob,
            "classified"
        );

        Classification {
            score,
            adjusted,
            tip,
        }
    }
}

/// Shared, replaceable classifier
///
/// Readers take an `Arc` snapshot; `replace` swaps the pointer so in-flight
/// work keeps the table it started with.
#[derive(Debug)]
pub struct ClassifierHandle {
    current: RwLock<Arc<Classifier>>,
}

impl ClassifierHandle {
    pub fn new(classifier: Classifier) -> Self {
        Self {
            current: RwLock::new(Arc::new(classifier)),
        }
    }

    pub fn snapshot(&self) -> Arc<Classifier> {
        let guard = self
            .current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    /// Install a new classifier, returning the previous one
    pub fn replace(&self, classifier: Classifier) -> Arc<Classifier> {
        let next = Arc::new(classifier);
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        info!(
            "Reloaded classifier ({} characters)",
            next.table().len()
        );
        std::mem::replace(&mut *guard, next)
    }
}
