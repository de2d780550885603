//! ngender - guess the likely gender of a Chinese personal name
//!
//! A per-character naive Bayes scorer with three presentation modes and
//! confidence-tiered captions. Reference data (frequency table, caption
//! bank) is loaded once into an immutable [`Classifier`].
//!
//! ```rust,ignore
//! use ngender::{Classifier, Mode};
//!
//! let classifier = Classifier::bundled()?;
//! let result = classifier.classify("王伟", Mode::Normal);
//! println!("{} {:.4} {}", result.adjusted.gender, result.adjusted.final_prob, result.tip);
//! ```

pub mod config;
pub mod error;
pub mod model;
pub mod request;
pub mod share;

pub use config::NGenderConfig;
pub use error::{NGenderError, NGenderResult};
pub use model::{
    AdjustedResult, BasePriors, CaptionBank, Classification, Classifier, ClassifierHandle,
    FrequencyEntry, FrequencyTable, Gender, Mode, ScoreResult, Tier,
};
pub use request::{handle, validate_name, ApiEnvelope, GuessRequest, GuessResponse, NameError};
