//! Zipcode datasets: entry types, the on-disk index, and lazy loading.
//!
//! Two dataset kinds exist. The kanji dataset carries Japanese names and
//! katakana readings; the romanized dataset carries the uppercase
//! romanizations Japan Post publishes. Both are stored as one JSON object
//! mapping a 7-digit zipcode to its entries.

pub mod response;
mod service;


use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub use service::{DatasetState, HintLookup, HintTracker, LazyDataset, PostalService, Ticket};

#[derive(Debug, thiserror::Error)]
pub enum PostalError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Common view over dataset entries.
pub trait PostalEntry {
    fn zipcode(&self) -> &str;
    /// Town-level (町域) name, possibly a "no town data" sentinel.
    fn town(&self) -> &str;
}

/// Romanized entry: `SHIBUYA KU`, `JINNAN`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RomeEntry {
    pub zipcode: String,
    pub prefecture: String,
    pub city: String,
    pub town: String,
}

impl PostalEntry for RomeEntry {
    fn zipcode(&self) -> &str {
        &self.zipcode
    }
    fn town(&self) -> &str {
        &self.town
    }
}

/// Kanji entry. `address1..3` are prefecture, municipality and area;
/// `kana1..3` their katakana readings when the source had them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KanjiEntry {
    pub zipcode: String,
    pub address1: String,
    pub address2: String,
    pub address3: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kana1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kana2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kana3: Option<String>,
}

impl PostalEntry for KanjiEntry {
    fn zipcode(&self) -> &str {
        &self.zipcode
    }
    fn town(&self) -> &str {
        &self.address3
    }
}

/// First entry with real town data, else the first entry.
///
/// A zipcode can map to several entries; some carry only a sentinel such as
/// `IKANIKEISAIGANAIBAAI` ("no listing below") instead of a town.
pub fn select_best<'a, E: PostalEntry>(entries: &'a [E], no_town: &str) -> Option<&'a E> {
    entries
        .iter()
        .find(|e| {
            let town = e.town().trim();
            !town.is_empty() && town != no_town
        })
        .or_else(|| entries.first())
}

/// Zipcode → entries, loaded once and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostalIndex<E> {
    entries: BTreeMap<String, Vec<E>>,
}

impl<E> Default for PostalIndex<E> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<E: PostalEntry> PostalIndex<E> {
    /// Group entries by zipcode, keeping their input order.
    pub fn from_entries(entries: impl IntoIterator<Item = E>) -> Self {
        let mut index = Self::default();
        for entry in entries {
            index
                .entries
                .entry(entry.zipcode().to_string())
                .or_default()
                .push(entry);
        }
        index
    }
}

impl<E> PostalIndex<E> {
    /// Entries for a 7-digit zipcode; empty if unknown.
    pub fn lookup(&self, zip7: &str) -> &[E] {
        self.entries.get(zip7).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct zipcodes.
    pub fn zip_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of entries across all zipcodes.
    pub fn entry_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Zipcodes in ascending order.
    pub fn zipcodes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl<E: DeserializeOwned> PostalIndex<E> {
    pub fn from_json(json: &str) -> Result<Self, PostalError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn open(path: &Path) -> Result<Self, PostalError> {
        let file = fs::File::open(path)?;
        Ok(serde_json::from_reader(io::BufReader::new(file))?)
    }
}

impl<E: Serialize> PostalIndex<E> {
    pub fn to_json(&self) -> Result<String, PostalError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Atomic write: write to .tmp then rename.
    pub fn save(&self, path: &Path) -> Result<(), PostalError> {
        let json = self.to_json()?;
        let tmp = path.with_extension("tmp");
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&tmp, json)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
