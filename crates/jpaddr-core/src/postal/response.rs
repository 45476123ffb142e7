//! JSON bodies for zipcode lookups.
//!
//! Success and error bodies share the `status` field and are told apart by
//! shape, so both enums are untagged.

use serde::{Deserialize, Serialize};

use super::{KanjiEntry, RomeEntry};

pub const INVALID_ZIPCODE: &str = "invalid zipcode";
pub const NO_LOCAL_DATASET: &str = "no_local_dataset";
pub const ROME_DATASET_MISSING: &str = "rome_dataset_missing";

/// Kanji lookup body: `{status:200, message:null, results:[...]}` or
/// `{status, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KanjiResponse {
    Found {
        status: u16,
        message: Option<String>,
        results: Vec<KanjiEntry>,
    },
    Error {
        status: u16,
        message: String,
    },
}

impl KanjiResponse {
    pub fn ok(results: Vec<KanjiEntry>) -> Self {
        Self::Found {
            status: 200,
            message: None,
            results,
        }
    }

    pub fn invalid_zipcode() -> Self {
        Self::Error {
            status: 400,
            message: INVALID_ZIPCODE.to_string(),
        }
    }

    pub fn no_dataset() -> Self {
        Self::Error {
            status: 501,
            message: NO_LOCAL_DATASET.to_string(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Found { status, .. } | Self::Error { status, .. } => *status,
        }
    }

    pub fn results(&self) -> &[KanjiEntry] {
        match self {
            Self::Found { results, .. } => results,
            Self::Error { .. } => &[],
        }
    }
}

/// Romanized lookup body: `{status:200, results:[...]}` or `{status, message}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RomeResponse {
    Found {
        status: u16,
        results: Vec<RomeEntry>,
    },
    Error {
        status: u16,
        message: String,
    },
}

impl RomeResponse {
    pub fn ok(results: Vec<RomeEntry>) -> Self {
        Self::Found {
            status: 200,
            results,
        }
    }

    pub fn invalid_zipcode() -> Self {
        Self::Error {
            status: 400,
            message: INVALID_ZIPCODE.to_string(),
        }
    }

    pub fn dataset_missing() -> Self {
        Self::Error {
            status: 501,
            message: ROME_DATASET_MISSING.to_string(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            Self::Found { status, .. } | Self::Error { status, .. } => *status,
        }
    }

    pub fn results(&self) -> &[RomeEntry] {
        match self {
            Self::Found { results, .. } => results,
            Self::Error { .. } => &[],
        }
    }
}
