use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::thread::{self, JoinHandle};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::response::{KanjiResponse, RomeResponse};
use super::{select_best, KanjiEntry, PostalIndex, RomeEntry};
use crate::merge::Hints;
use crate::normalize::{to_zip7, to_zip7_strict};
use crate::settings::settings;

/// Load state of a [`LazyDataset`], observable without blocking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetState {
    /// Not loaded yet (or a load is in flight).
    Loading,
    Ready,
    /// No candidate file could be read. Terminal: never retried.
    Unavailable,
}

/// A dataset read from the first existing candidate path, at most once.
///
/// Concurrent `load()` callers block on the same initialisation. A failed
/// load is cached like a successful one.
pub struct LazyDataset<E> {
    name: &'static str,
    candidates: Vec<PathBuf>,
    cell: OnceLock<Option<Arc<PostalIndex<E>>>>,
    started: AtomicBool,
}

impl<E> LazyDataset<E> {
    pub fn new(name: &'static str, candidates: Vec<PathBuf>) -> Self {
        Self {
            name,
            candidates,
            cell: OnceLock::new(),
            started: AtomicBool::new(false),
        }
    }

    /// A dataset that is already in memory.
    pub fn preloaded(name: &'static str, index: PostalIndex<E>) -> Self {
        Self {
            name,
            candidates: Vec::new(),
            cell: OnceLock::from(Some(Arc::new(index))),
            started: AtomicBool::new(true),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    pub fn state(&self) -> DatasetState {
        match self.cell.get() {
            None => DatasetState::Loading,
            Some(Some(_)) => DatasetState::Ready,
            Some(None) => DatasetState::Unavailable,
        }
    }

    /// The index if loading already finished successfully.
    pub fn get(&self) -> Option<Arc<PostalIndex<E>>> {
        self.cell.get().cloned().flatten()
    }
}

impl<E: DeserializeOwned> LazyDataset<E> {
    /// Load on first call; later calls return the cached outcome.
    pub fn load(&self) -> Option<Arc<PostalIndex<E>>> {
        self.cell.get_or_init(|| self.read_first()).clone()
    }

    // The first candidate that exists is the dataset; if it cannot be
    // parsed the dataset is unavailable rather than falling through.
    fn read_first(&self) -> Option<Arc<PostalIndex<E>>> {
        let Some(path) = self.candidates.iter().find(|p| p.is_file()) else {
            warn!(dataset = self.name, candidates = ?self.candidates, "no postal dataset found");
            return None;
        };
        match PostalIndex::open(path) {
            Ok(index) => {
                info!(
                    dataset = self.name,
                    path = %path.display(),
                    zipcodes = index.zip_count(),
                    entries = index.entry_count(),
                    "loaded postal dataset"
                );
                Some(Arc::new(index))
            }
            Err(e) => {
                warn!(dataset = self.name, path = %path.display(), error = %e, "unreadable postal dataset");
                None
            }
        }
    }
}

impl<E: DeserializeOwned + Send + Sync + 'static> LazyDataset<E> {
    /// Start loading on a background thread.
    pub fn spawn_load(self: &Arc<Self>) -> io::Result<JoinHandle<()>> {
        let this = Arc::clone(self);
        thread::Builder::new()
            .name(format!("jpaddr-load-{}", self.name))
            .spawn(move || {
                this.load();
            })
    }

    /// Start a background load unless one was already started or the
    /// dataset is settled. Returns immediately.
    pub fn ensure_loading(self: &Arc<Self>) {
        if self.cell.get().is_some() || self.started.swap(true, Ordering::AcqRel) {
            return;
        }
        if let Err(e) = self.spawn_load() {
            warn!(dataset = self.name, error = %e, "could not start background load");
            self.started.store(false, Ordering::Release);
        }
    }
}

/// Outcome of a hint lookup for one zipcode.
#[derive(Debug, Clone, PartialEq)]
pub enum HintLookup {
    /// The input is not a 7-digit zipcode.
    Skipped,
    /// A dataset has not finished loading.
    Loading,
    /// Neither dataset could be loaded.
    Unavailable,
    NotFound,
    Found(Hints),
}

/// Both zipcode datasets plus the sentinels used to pick entries.
pub struct PostalService {
    kanji: Arc<LazyDataset<KanjiEntry>>,
    rome: Arc<LazyDataset<RomeEntry>>,
    kanji_no_town: String,
    rome_no_town: String,
}

impl PostalService {
    pub fn new(kanji: LazyDataset<KanjiEntry>, rome: LazyDataset<RomeEntry>) -> Self {
        let postal = &settings().postal;
        Self {
            kanji: Arc::new(kanji),
            rome: Arc::new(rome),
            kanji_no_town: postal.kanji_no_town.clone(),
            rome_no_town: postal.rome_no_town.clone(),
        }
    }

    /// Datasets at the configured paths, relative paths resolved against
    /// `base_dir`. The kanji dataset falls back to the sample file.
    pub fn from_settings(base_dir: &Path) -> Self {
        let postal = &settings().postal;
        let mut kanji_paths = vec![base_dir.join(&postal.kanji_dataset)];
        if let Some(fallback) = &postal.kanji_fallback_dataset {
            kanji_paths.push(base_dir.join(fallback));
        }
        let rome_paths = vec![base_dir.join(&postal.rome_dataset)];
        Self::new(
            LazyDataset::new("kanji", kanji_paths),
            LazyDataset::new("rome", rome_paths),
        )
    }

    pub fn kanji(&self) -> &Arc<LazyDataset<KanjiEntry>> {
        &self.kanji
    }

    pub fn rome(&self) -> &Arc<LazyDataset<RomeEntry>> {
        &self.rome
    }

    /// Kick off background loads of both datasets.
    pub fn preload(&self) -> io::Result<()> {
        self.kanji.spawn_load()?;
        self.rome.spawn_load()?;
        Ok(())
    }

    /// Kanji lookup: exactly seven digits after stripping punctuation.
    pub fn kanji_response(&self, zipcode: &str) -> KanjiResponse {
        let Some(zip7) = to_zip7_strict(zipcode) else {
            return KanjiResponse::invalid_zipcode();
        };
        match self.kanji.load() {
            Some(index) => {
                let results = index.lookup(&zip7).to_vec();
                debug!(zipcode = %zip7, results = results.len(), "kanji lookup");
                KanjiResponse::ok(results)
            }
            None => KanjiResponse::no_dataset(),
        }
    }

    /// Romanized lookup: six digits are restored with a leading zero.
    pub fn rome_response(&self, zipcode: &str) -> RomeResponse {
        let Some(zip7) = to_zip7(zipcode) else {
            return RomeResponse::invalid_zipcode();
        };
        match self.rome.load() {
            Some(index) => {
                let results = index.lookup(&zip7).to_vec();
                debug!(zipcode = %zip7, results = results.len(), "rome lookup");
                RomeResponse::ok(results)
            }
            None => RomeResponse::dataset_missing(),
        }
    }

    /// Hints for a zipcode without blocking on dataset loads. While a dataset
    /// is still loading this starts its background load (once) and returns
    /// `Loading`; poll again later.
    pub fn lookup_hints(&self, zipcode: &str) -> HintLookup {
        let Some(zip7) = to_zip7_strict(zipcode) else {
            return HintLookup::Skipped;
        };
        match (self.kanji.state(), self.rome.state()) {
            (DatasetState::Loading, _) | (_, DatasetState::Loading) => {
                self.kanji.ensure_loading();
                self.rome.ensure_loading();
                return HintLookup::Loading;
            }
            (DatasetState::Unavailable, DatasetState::Unavailable) => {
                return HintLookup::Unavailable
            }
            _ => {}
        }
        self.hints_for(&zip7)
    }

    /// Hints for a zipcode, loading the datasets first if needed.
    pub fn lookup_hints_blocking(&self, zipcode: &str) -> HintLookup {
        let Some(zip7) = to_zip7_strict(zipcode) else {
            return HintLookup::Skipped;
        };
        let kanji = self.kanji.load();
        let rome = self.rome.load();
        if kanji.is_none() && rome.is_none() {
            return HintLookup::Unavailable;
        }
        self.hints_for(&zip7)
    }

    fn hints_for(&self, zip7: &str) -> HintLookup {
        let kanji_index = self.kanji.get();
        let rome_index = self.rome.get();
        let kanji = kanji_index
            .as_deref()
            .and_then(|index| select_best(index.lookup(zip7), &self.kanji_no_town));
        let rome = rome_index
            .as_deref()
            .and_then(|index| select_best(index.lookup(zip7), &self.rome_no_town));

        if kanji.is_none() && rome.is_none() {
            debug!(zipcode = zip7, "no postal entry");
            return HintLookup::NotFound;
        }
        let hints = Hints::from_entries(rome, kanji);
        debug!(zipcode = zip7, ?hints, "postal hints");
        HintLookup::Found(hints)
    }
}

/// Handle for one in-flight lookup, ordered by issue time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Last-writer-wins holder for the current hints.
///
/// Every zipcode change takes a ticket with `begin()`. A lookup finishing
/// late publishes with its old ticket and is dropped if a newer result was
/// already accepted.
#[derive(Debug, Default)]
pub struct HintTracker {
    issued: AtomicU64,
    current: Mutex<(u64, Option<Hints>)>,
}

impl HintTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Store `hints` unless a newer ticket already published. Returns whether
    /// the result was accepted.
    pub fn publish(&self, ticket: Ticket, hints: Option<Hints>) -> bool {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        if ticket.0 < current.0 {
            debug!(ticket = ticket.0, latest = current.0, "stale hints dropped");
            return false;
        }
        *current = (ticket.0, hints);
        true
    }

    pub fn current(&self) -> Option<Hints> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .1
            .clone()
    }
}
