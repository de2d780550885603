//! Request-level validation and response shaping
//!
//! The classifier trusts its input; everything a caller can get wrong
//! (missing names, non-ideographic characters, odd mode values) is handled
//! here before a name reaches the scorer.

use crate::model::{Classifier, Gender, Mode};
use serde::Serialize;
use thiserror::Error;

const MIN_NAME_CHARS: usize = 2;
const MAX_NAME_CHARS: usize = 4;

/// Why a name was rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    #[error("missing parameter: name")]
    Missing,

    #[error("name must contain only Chinese characters")]
    InvalidCharacters,

    #[error("name must be 2-4 Chinese characters")]
    InvalidLength,
}

impl NameError {
    /// Status code reported in the response envelope
    pub fn code(&self) -> u16 {
        400
    }
}

/// CJK Unified Ideographs, basic block
pub fn is_ideograph(ch: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&ch)
}

/// Trim and validate a raw name
///
/// With `nolimit` any number of ideographs (at least one) is accepted;
/// otherwise the name must be 2 to 4 characters long.
pub fn validate_name(raw: &str, nolimit: bool) -> Result<String, NameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameError::Missing);
    }
    if !name.chars().all(is_ideograph) {
        return Err(NameError::InvalidCharacters);
    }
    let len = name.chars().count();
    if !nolimit && !(MIN_NAME_CHARS..=MAX_NAME_CHARS).contains(&len) {
        return Err(NameError::InvalidLength);
    }
    Ok(name.to_string())
}

/// Loose boolean flag: `true`, `1`, `yes`, `on` (any case)
pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "on"
    )
}

/// One classification request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessRequest {
    pub name: String,
    pub mode: Mode,
    pub nolimit: bool,
}

impl GuessRequest {
    pub fn new(name: impl Into<String>, mode: Mode, nolimit: bool) -> Self {
        Self {
            name: name.into(),
            mode,
            nolimit,
        }
    }
}

/// Payload returned for a successful guess
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuessResponse {
    pub name: String,
    pub gender: Gender,
    pub gender_cn: &'static str,
    pub probability: f64,
    pub fun_tip: String,
    pub nolimit_used: bool,
    pub mode: u8,
    pub mode_label: &'static str,
}

/// Validate and classify a request
pub fn handle(classifier: &Classifier, request: &GuessRequest) -> Result<GuessResponse, NameError> {
    let name = validate_name(&request.name, request.nolimit)?;
    let result = classifier.classify(&name, request.mode);
    let adjusted = result.adjusted;

    Ok(GuessResponse {
        name,
        gender: adjusted.gender,
        gender_cn: adjusted.gender.label(),
        probability: adjusted.final_prob,
        fun_tip: result.tip,
        nolimit_used: request.nolimit,
        mode: adjusted.mode.code(),
        mode_label: adjusted.mode.label(),
    })
}

/// `{code, msg, data}` wrapper used for JSON output
#[derive(Debug, Clone, Serialize)]
pub struct ApiEnvelope<T: Serialize> {
    pub code: u16,
    pub msg: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            code: 200,
            msg: "success".to_string(),
            data: Some(data),
        }
    }

    pub fn error(code: u16, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            data: None,
        }
    }
}

impl ApiEnvelope<GuessResponse> {
    pub fn from_result(result: Result<GuessResponse, NameError>) -> Self {
        match result {
            Ok(response) => Self::ok(response),
            Err(e) => Self::error(e.code(), e.to_string()),
        }
    }
}
