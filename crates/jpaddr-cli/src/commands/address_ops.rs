use std::path::Path;
use std::process;

use serde::Serialize;
use tracing::debug;

use jpaddr_core::numeric::parse_numeral;
use jpaddr_core::postal::{HintLookup, PostalService};
use jpaddr_core::romaji::{area_to_romaji, kana_to_romaji, municipality_to_romaji, romaji_to_kana};
use jpaddr_core::{compose, merge_hints, parse_address, AddressFields, Hints, MergedAddress};

/// One flag per form field, for `convert` without free text.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct FieldArgs {
    /// Postal code (〒 digits, full-width allowed)
    #[arg(long, default_value = "")]
    pub postal: String,
    /// Prefecture, Japanese or English
    #[arg(long, default_value = "")]
    pub prefecture: String,
    /// Municipality (市区町村)
    #[arg(long, default_value = "")]
    pub municipality: String,
    /// Area (町域)
    #[arg(long, default_value = "")]
    pub area: String,
    /// 丁目 number
    #[arg(long, default_value = "")]
    pub chome: String,
    /// 番 number
    #[arg(long, default_value = "")]
    pub ban: String,
    /// 号 number
    #[arg(long, default_value = "")]
    pub go: String,
    /// Building and room
    #[arg(long, default_value = "")]
    pub building: String,
}

impl From<FieldArgs> for AddressFields {
    fn from(f: FieldArgs) -> Self {
        Self {
            postal: f.postal,
            prefecture: f.prefecture,
            municipality: f.municipality,
            area: f.area,
            chome: f.chome,
            ban: f.ban,
            go: f.go,
            building: f.building,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum RomanizeAs {
    /// Plain kana text
    #[default]
    Plain,
    /// Municipality name with 市/区/郡/町/村 suffix rewriting
    Municipality,
    /// Area (町域) name
    Area,
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error encoding output: {e}");
            process::exit(1);
        }
    }
}

pub fn parse(text: &str) {
    print_json(&parse_address(text));
}

/// Hints for `zipcode` from the datasets configured relative to `data_dir`.
fn dataset_hints(data_dir: &Path, zipcode: Option<&str>) -> Option<Hints> {
    let zipcode = zipcode?;
    let service = PostalService::from_settings(data_dir);
    match service.lookup_hints_blocking(zipcode) {
        HintLookup::Found(hints) => Some(hints),
        HintLookup::Unavailable => {
            eprintln!(
                "Note: no postal dataset under {}; converting without hints",
                data_dir.display()
            );
            None
        }
        other => {
            debug!(zipcode, outcome = ?other, "no hints");
            None
        }
    }
}

/// Convert free text or form fields. With `data_dir`, blank fields are
/// filled from the postal datasets found there.
pub fn convert(text: Option<&str>, fields: FieldArgs, data_dir: Option<&str>, json: bool) {
    let parsed = match text {
        Some(text) => parse_address(text),
        None => AddressFields::from(fields).to_parsed(),
    };
    let zip7 = parsed.zip7();
    let hints = data_dir.and_then(|dir| dataset_hints(Path::new(dir), zip7.as_deref()));

    let merged = merge_hints(&MergedAddress::from(parsed), hints.as_ref());
    let composed = compose(&merged);
    if json {
        print_json(&composed);
    } else {
        println!("english: {}", composed.english);
        println!("romaji:  {}", composed.romaji);
    }
}

pub fn romanize(kana: &str, mode: RomanizeAs) {
    let romaji = match mode {
        RomanizeAs::Plain => kana_to_romaji(kana),
        RomanizeAs::Municipality => municipality_to_romaji(kana),
        RomanizeAs::Area => area_to_romaji(kana),
    };
    println!("{romaji}");
}

pub fn numeral(text: &str) {
    match parse_numeral(text) {
        Some(n) => println!("{n}"),
        None => {
            eprintln!("Error: '{text}' is not a number");
            process::exit(1);
        }
    }
}

pub fn reverse(romaji: &str) {
    println!("{}", romaji_to_kana(romaji));
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_field_args_into_address_fields() {
        let args = FieldArgs {
            postal: "１５０－００４１".into(),
            chome: "一".into(),
            ..FieldArgs::default()
        };
        let parsed = AddressFields::from(args).to_parsed();
        assert_eq!(parsed.postal.as_deref(), Some("150-0041"));
        assert_eq!(parsed.chome, Some(1));

        // Extra digits beyond seven are dropped, not shifted in.
        let args = FieldArgs {
            postal: "１５００００４１".into(),
            ..FieldArgs::default()
        };
        let parsed = AddressFields::from(args).to_parsed();
        assert_eq!(parsed.postal.as_deref(), Some("150-0004"));
    }

    #[test]
    fn test_dataset_hints_from_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let postal = dir.path().join("data/postal");
        fs::create_dir_all(&postal).unwrap();
        fs::write(
            postal.join("ken_all.min.json"),
            r#"{"1500041":[{"zipcode":"1500041","address1":"東京都","address2":"渋谷区","address3":"神南","kana2":"シブヤク","kana3":"ジンナン"}]}"#,
        )
        .unwrap();

        let hints = dataset_hints(dir.path(), Some("1500041")).unwrap();
        assert_eq!(hints.municipality.as_deref(), Some("渋谷区"));
        assert_eq!(hints.area.as_deref(), Some("神南"));

        assert!(dataset_hints(dir.path(), Some("9999999")).is_none());
        assert!(dataset_hints(dir.path(), None).is_none());
    }

    #[test]
    fn test_dataset_hints_without_datasets() {
        let dir = tempfile::tempdir().unwrap();
        assert!(dataset_hints(dir.path(), Some("1500041")).is_none());
    }
}
