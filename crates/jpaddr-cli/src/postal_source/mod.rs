mod ken_all;
mod ken_all_rome;

use std::borrow::Cow;
use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use encoding_rs::SHIFT_JIS;
use serde::Serialize;

use jpaddr_core::postal::{PostalError, PostalIndex};

pub use ken_all::KenAllSource;
pub use ken_all_rome::KenAllRomeSource;

/// A Japan Post table that can be downloaded and turned into a JSON index.
pub trait PostalSource {
    fn name(&self) -> &'static str;

    /// Parse the raw table at `input` and write the zipcode index to `output`.
    fn build(&self, input: &Path, output: &Path) -> Result<BuildStats, PostalSourceError>;

    /// Download the official archive and extract its table into `dest`.
    /// Returns the path of the extracted table.
    fn fetch(&self, dest: &Path) -> Result<PathBuf, PostalSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PostalSourceError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("ZIP error: {0}")]
    Zip(String),

    #[error("write error: {0}")]
    Write(#[from] PostalError),
}

/// Rows read from a raw table, grouped by zipcode.
pub struct ParsedTable<E> {
    pub index: PostalIndex<E>,
    pub rows: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildStats {
    pub zipcodes: usize,
    pub entries: usize,
    pub skipped: usize,
}

/// Create a `PostalSource` by name. Returns `None` for unknown names.
pub fn from_name(name: &str) -> Option<Box<dyn PostalSource>> {
    match name {
        "ken-all" => Some(Box::new(KenAllSource)),
        "ken-all-rome" => Some(Box::new(KenAllRomeSource)),
        _ => None,
    }
}

pub const SOURCE_NAMES: &str = "ken-all, ken-all-rome";

/// Decode table bytes. Japan Post distributes Shift_JIS; converted copies
/// are usually UTF-8 (with or without BOM).
pub(crate) fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(_) => SHIFT_JIS.decode_without_bom_handling(bytes).0,
    }
}

/// Read, parse and write in one go, logging progress like a long build.
pub(crate) fn build_with<E: Serialize>(
    input: &Path,
    output: &Path,
    parse: impl Fn(&str) -> Result<ParsedTable<E>, PostalSourceError>,
) -> Result<BuildStats, PostalSourceError> {
    eprintln!("Reading {}...", input.display());
    let bytes = fs::read(input)?;
    let table = parse(&decode_text(&bytes))?;
    eprintln!("  (skipped {} of {} rows)", table.skipped, table.rows);

    let stats = BuildStats {
        zipcodes: table.index.zip_count(),
        entries: table.index.entry_count(),
        skipped: table.skipped,
    };
    table.index.save(output)?;
    Ok(stats)
}

/// Download a ZIP and extract the first entry whose name ends with `suffix`
/// (case-insensitive) into `dest`. Uses the basename only (zip-slip safe).
pub(crate) fn download_and_extract(
    url: &str,
    suffix: &str,
    dest: &Path,
) -> Result<PathBuf, PostalSourceError> {
    eprintln!("Downloading {url}...");
    let body = ureq::get(url)
        .call()
        .map_err(|e| PostalSourceError::Http(format!("{url}: {e}")))?
        .into_body()
        .with_config()
        .limit(64 * 1024 * 1024)
        .read_to_vec()
        .map_err(|e| PostalSourceError::Http(format!("{url}: {e}")))?;

    extract_entry(Cursor::new(body), suffix, dest)
}

pub(crate) fn extract_entry<R: io::Read + io::Seek>(
    reader: R,
    suffix: &str,
    dest: &Path,
) -> Result<PathBuf, PostalSourceError> {
    let mut archive = zip::ZipArchive::new(reader).map_err(zip_err)?;
    let suffix = suffix.to_ascii_lowercase();
    for i in 0..archive.len() {
        let mut file = archive.by_index(i).map_err(zip_err)?;
        let raw_name = file.name().to_string();
        if !raw_name.to_ascii_lowercase().ends_with(&suffix) {
            continue;
        }
        let basename = Path::new(&raw_name)
            .file_name()
            .ok_or_else(|| PostalSourceError::Zip(format!("invalid ZIP entry name: {raw_name}")))?
            .to_string_lossy()
            .into_owned();
        fs::create_dir_all(dest)?;
        let out_path = dest.join(&basename);
        let mut out = fs::File::create(&out_path)?;
        io::copy(&mut file, &mut out)?;
        eprintln!("    → {basename}");
        return Ok(out_path);
    }
    Err(PostalSourceError::Zip(format!("no *{suffix} entry in archive")))
}

fn zip_err(e: impl std::fmt::Display) -> PostalSourceError {
    PostalSourceError::Zip(e.to_string())
}
