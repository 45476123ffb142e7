use std::fs;
use std::path::Path;
use std::process;

use crate::postal_source::{self, PostalSource};
use jpaddr_core::postal::{KanjiEntry, PostalError, PostalIndex, RomeEntry};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

const SAMPLE_LOOKUPS: usize = 3;

fn source_or_exit(source_name: &str) -> Box<dyn PostalSource> {
    postal_source::from_name(source_name).unwrap_or_else(|| {
        eprintln!(
            "Error: unknown source '{source_name}' (available: {})",
            postal_source::SOURCE_NAMES
        );
        process::exit(1);
    })
}

pub fn fetch(source_name: &str, output_dir: &str) {
    let source = source_or_exit(source_name);
    let path = die!(
        source.fetch(Path::new(output_dir)),
        "Error fetching postal table: {}"
    );
    eprintln!("Saved {}", path.display());
}

pub fn build(source_name: &str, input_file: &str, output_file: &str) {
    let source = source_or_exit(source_name);
    let input = Path::new(input_file);
    if !input.is_file() {
        eprintln!("Error: {input_file} is not a file");
        process::exit(1);
    }

    eprintln!("Source: {}", source.name());
    let stats = die!(
        source.build(input, Path::new(output_file)),
        "Error building postal index: {}"
    );

    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!(
        "Wrote {output_file} ({} zipcodes, {} entries, {:.1} MB)",
        stats.zipcodes,
        stats.entries,
        file_size as f64 / 1_048_576.0
    );
}

/// Dataset kind of an index file, told apart by the entry fields.
enum AnyIndex {
    Kanji(PostalIndex<KanjiEntry>),
    Rome(PostalIndex<RomeEntry>),
}

fn open_any(path: &Path) -> Result<AnyIndex, PostalError> {
    let json = fs::read_to_string(path)?;
    match PostalIndex::<KanjiEntry>::from_json(&json) {
        Ok(index) => Ok(AnyIndex::Kanji(index)),
        Err(_) => Ok(AnyIndex::Rome(PostalIndex::<RomeEntry>::from_json(&json)?)),
    }
}

pub fn info(file: &str) {
    let index = die!(open_any(Path::new(file)), "Error opening {file}: {}");
    let file_size = fs::metadata(file).map(|m| m.len()).unwrap_or(0);
    println!("File: {file} ({:.1} MB)", file_size as f64 / 1_048_576.0);

    match index {
        AnyIndex::Kanji(index) => {
            println!("Kind: kanji");
            println!("Zipcodes: {}", index.zip_count());
            println!("Entries: {}", index.entry_count());
            for zip in index.zipcodes().take(SAMPLE_LOOKUPS) {
                for e in index.lookup(zip) {
                    println!(
                        "  {zip}  {}{}{}  {}",
                        e.address1,
                        e.address2,
                        e.address3,
                        e.kana3.as_deref().unwrap_or("-")
                    );
                }
            }
        }
        AnyIndex::Rome(index) => {
            println!("Kind: rome");
            println!("Zipcodes: {}", index.zip_count());
            println!("Entries: {}", index.entry_count());
            for zip in index.zipcodes().take(SAMPLE_LOOKUPS) {
                for e in index.lookup(zip) {
                    println!("  {zip}  {} / {} / {}", e.prefecture, e.city, e.town);
                }
            }
        }
    }
}
