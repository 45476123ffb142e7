use std::path::PathBuf;
use std::process;

use serde::Serialize;

use jpaddr_core::postal::{LazyDataset, PostalService};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LookupKind {
    /// Japanese names and katakana readings
    Kanji,
    /// Japan Post romanizations
    Rome,
}

/// Service with only the dataset of `kind` available.
fn service_for(kind: LookupKind, dataset: &str) -> PostalService {
    let path = vec![PathBuf::from(dataset)];
    match kind {
        LookupKind::Kanji => PostalService::new(
            LazyDataset::new("kanji", path),
            LazyDataset::new("rome", Vec::new()),
        ),
        LookupKind::Rome => PostalService::new(
            LazyDataset::new("kanji", Vec::new()),
            LazyDataset::new("rome", path),
        ),
    }
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error encoding response: {e}");
            process::exit(1);
        }
    }
}

/// Print the lookup response body. Exits 1 unless the status is 200.
pub fn lookup(kind: LookupKind, dataset: &str, zipcode: &str) {
    let service = service_for(kind, dataset);
    let status = match kind {
        LookupKind::Kanji => {
            let response = service.kanji_response(zipcode);
            print_json(&response);
            response.status()
        }
        LookupKind::Rome => {
            let response = service.rome_response(zipcode);
            print_json(&response);
            response.status()
        }
    };
    if status != 200 {
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_service_for_only_loads_requested_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rome.json");
        fs::write(
            &path,
            r#"{"0600042":[{"zipcode":"0600042","prefecture":"HOKKAIDO","city":"SAPPORO SHI CHUO KU","town":"ODORINISHI"}]}"#,
        )
        .unwrap();

        let service = service_for(LookupKind::Rome, path.to_str().unwrap());
        let rome = service.rome_response("600042");
        assert_eq!(rome.status(), 200);
        assert_eq!(rome.results()[0].town, "ODORINISHI");
        assert_eq!(service.kanji_response("0600042").status(), 501);
    }
}
