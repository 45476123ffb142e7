use std::path::{Path, PathBuf};

use super::{build_with, download_and_extract, BuildStats, ParsedTable, PostalSource, PostalSourceError};
use jpaddr_core::normalize::to_zip7;
use jpaddr_core::postal::{PostalIndex, RomeEntry};

const KEN_ALL_ROME_URL: &str = "https://www.post.japanpost.jp/zipcode/dl/roman/ken_all_rome.zip";

/// Japan Post romanized table (ローマ字版).
///
/// Two layouts are accepted:
/// - the official CSV: zip(0), pref(1), city(2), town(3) in kanji, then
///   the romanized pref(4), city(5), town(6);
/// - a tab-separated export with `postcode, prefecture, city, town`
///   columns, optionally preceded by a header row.
///
/// Zipcodes may have lost their leading zero (six digits).
pub struct KenAllRomeSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    Official,
    Tabbed,
}

impl Layout {
    fn detect(text: &str) -> Self {
        let first = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
        if first.contains('\t') {
            Layout::Tabbed
        } else {
            Layout::Official
        }
    }

    /// Column positions of (zip, prefecture, city, town).
    fn columns(self) -> [usize; 4] {
        match self {
            Layout::Official => [0, 4, 5, 6],
            Layout::Tabbed => [0, 1, 2, 3],
        }
    }
}

impl KenAllRomeSource {
    pub fn parse(text: &str) -> Result<ParsedTable<RomeEntry>, PostalSourceError> {
        let layout = Layout::detect(text);
        let mut builder = csv::ReaderBuilder::new();
        builder.has_headers(false).flexible(true);
        if layout == Layout::Tabbed {
            builder.delimiter(b'\t').quoting(false);
        }
        let mut reader = builder.from_reader(text.as_bytes());

        let [zip_col, pref_col, city_col, town_col] = layout.columns();
        let mut entries = Vec::new();
        let mut rows = 0;
        let mut skipped = 0;
        for (i, record) in reader.records().enumerate() {
            let record = record?;
            let field = |col: usize| record.get(col).map(str::trim).unwrap_or("");
            if i == 0 && field(0).to_ascii_lowercase().starts_with("postcode") {
                continue;
            }
            rows += 1;
            if record.len() <= town_col {
                skipped += 1;
                continue;
            }
            let Some(zipcode) = to_zip7(field(zip_col)) else {
                skipped += 1;
                continue;
            };
            entries.push(RomeEntry {
                zipcode,
                prefecture: field(pref_col).to_string(),
                city: field(city_col).to_string(),
                town: field(town_col).to_string(),
            });
        }

        Ok(ParsedTable {
            index: PostalIndex::from_entries(entries),
            rows,
            skipped,
        })
    }
}

impl PostalSource for KenAllRomeSource {
    fn name(&self) -> &'static str {
        "ken-all-rome"
    }

    fn build(&self, input: &Path, output: &Path) -> Result<BuildStats, PostalSourceError> {
        build_with(input, output, Self::parse)
    }

    fn fetch(&self, dest: &Path) -> Result<PathBuf, PostalSourceError> {
        download_and_extract(KEN_ALL_ROME_URL, ".csv", dest)
    }
}
