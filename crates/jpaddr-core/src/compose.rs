//! Western-order address rendering.
//!
//! Segments are emitted smallest first (building, block, area, municipality,
//! prefecture, postal code, country); empty segments are skipped. Two
//! renderings are produced: `english` prefers dataset English names, `romaji`
//! prefers transliteration of the Japanese fields.

use serde::Serialize;

use crate::address::{AddressFields, ParsedAddress};
use crate::merge::{merge_hints, Hints, MergedAddress};
use crate::prefecture::{self, normalize_city_en, normalize_pref_en, proper_case};
use crate::romaji::{area_to_romaji, kana_to_romaji, municipality_to_romaji};
use crate::segment::parse_address;
use crate::settings::settings;
use crate::unicode::has_kanji;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComposedAddress {
    pub english: String,
    pub romaji: String,
}

/// Block numbers as written in English: `1-chome 2-3`, or `2-3` without a
/// 丁目. With a 丁目 but no 番 only the 丁目 is written.
pub fn block_descriptor(chome: Option<u32>, ban: Option<u32>, go: Option<u32>) -> Option<String> {
    match chome {
        Some(c) => Some(match (ban, go) {
            (Some(b), Some(g)) => format!("{c}-chome {b}-{g}"),
            (Some(b), None) => format!("{c}-chome {b}"),
            (None, _) => format!("{c}-chome"),
        }),
        None => {
            let parts: Vec<String> = [ban, go].iter().flatten().map(u32::to_string).collect();
            (!parts.is_empty()).then(|| parts.join("-"))
        }
    }
}

/// Render a merged address.
pub fn compose(m: &MergedAddress) -> ComposedAddress {
    let a = &m.address;
    let output = &settings().output;
    let mut english: Vec<String> = Vec::new();
    let mut romaji: Vec<String> = Vec::new();

    if let Some(building) = non_blank(&a.building) {
        let ro = kana_to_romaji(building);
        if !has_kanji(&ro) {
            english.push(ro.clone());
        }
        romaji.push(ro);
    }

    if let Some(block) = block_descriptor(a.chome, a.ban, a.go) {
        english.push(block.clone());
        romaji.push(block);
    }

    if let Some(area) = non_blank(&a.area) {
        let source = non_blank(&m.area_kana).unwrap_or(area);
        let hint_en = non_blank(&m.area_en).map(proper_case);
        let (en, ro) = render_name(source, hint_en, area_to_romaji);
        english.push(en);
        romaji.push(ro);
    }

    if let Some(municipality) = non_blank(&a.municipality) {
        let source = non_blank(&m.municipality_kana).unwrap_or(municipality);
        let hint_en = non_blank(&m.municipality_en).and_then(normalize_city_en);
        let (en, ro) = render_name(source, hint_en, municipality_to_romaji);
        english.push(en);
        romaji.push(ro);
    }

    if let Some(pref) = prefecture_name(m) {
        english.push(pref.clone());
        romaji.push(pref);
    }

    if let Some(postal) = non_blank(&a.postal) {
        english.push(postal.to_string());
        romaji.push(postal.to_string());
    }

    english.push(output.country.clone());
    romaji.push(output.country.clone());

    ComposedAddress {
        english: join(&english, &output.separator),
        romaji: join(&romaji, &output.separator),
    }
}

// A Han source cannot be transliterated, so an English hint stands in for
// the romaji too.
fn render_name(source: &str, hint_en: Option<String>, romanize: fn(&str) -> String) -> (String, String) {
    let ro = match &hint_en {
        Some(en) if has_kanji(source) => en.clone(),
        _ => romanize(source),
    };
    let en = hint_en.unwrap_or_else(|| ro.clone());
    (en, ro)
}

fn prefecture_name(m: &MergedAddress) -> Option<String> {
    let a = &m.address;
    let name = non_blank(&m.prefecture_en_strict)
        .or_else(|| non_blank(&a.prefecture_en))
        .or_else(|| {
            non_blank(&a.prefecture_kanji).and_then(|jp| prefecture::english_name(jp.trim()))
        })
        .or_else(|| non_blank(&a.prefecture_kanji))?;
    normalize_pref_en(name)
}

fn join(parts: &[String], separator: &str) -> String {
    parts
        .iter()
        .filter(|p| !p.trim().is_empty())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(separator)
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

/// Parse free text and render it.
pub fn convert_text(raw: &str) -> ComposedAddress {
    compose(&MergedAddress::from(parse_address(raw)))
}

/// Render form fields, filling blanks from lookup hints.
pub fn convert_fields(fields: &AddressFields, hints: Option<&Hints>) -> ComposedAddress {
    let typed = MergedAddress::from(fields.to_parsed());
    compose(&merge_hints(&typed, hints))
}

/// Render a parsed address as-is.
pub fn convert_parsed(parsed: ParsedAddress) -> ComposedAddress {
    compose(&MergedAddress::from(parsed))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::numeric::parse_numeral;
    use crate::postal::{KanjiEntry, RomeEntry};

    fn shibuya_hints() -> Hints {
        let rome = RomeEntry {
            zipcode: "1500041".into(),
            prefecture: "TOKYO TO".into(),
            city: "SHIBUYA KU".into(),
            town: "JINNAN".into(),
        };
        let kanji = KanjiEntry {
            zipcode: "1500041".into(),
            address1: "東京都".into(),
            address2: "渋谷区".into(),
            address3: "神南".into(),
            kana1: None,
            kana2: Some("シブヤク".into()),
            kana3: Some("ジンナン".into()),
        };
        Hints::from_entries(Some(&rome), Some(&kanji))
    }

    #[test]
    fn test_convert_text_without_hints() {
        let out = convert_text("〒150-0041 東京都渋谷区神南1丁目2-3 パークビル201");
        assert_eq!(
            out.english,
            "paakubiru201, 1-chome 2-3, 神南, 渋谷-ku, Tokyo, 150-0041, Japan"
        );
        assert_eq!(out.romaji, out.english);
    }

    #[test]
    fn test_fields_with_hints() {
        let fields = AddressFields {
            postal: "1500041".into(),
            chome: "1".into(),
            ban: "2".into(),
            go: "3".into(),
            building: "パークビル201".into(),
            ..Default::default()
        };
        let out = convert_fields(&fields, Some(&shibuya_hints()));
        assert_eq!(
            out.english,
            "paakubiru201, 1-chome 2-3, Jinnan, Shibuya-ku, Tokyo, 150-0041, Japan"
        );
        assert_eq!(
            out.romaji,
            "paakubiru201, 1-chome 2-3, jinnan, shibuya-ku, Tokyo, 150-0041, Japan"
        );
    }

    #[test]
    fn test_typed_municipality_survives_conflicting_hint() {
        let fields = AddressFields {
            postal: "1500041".into(),
            municipality: "Shinjuku-ku".into(),
            ..Default::default()
        };
        let out = convert_fields(&fields, Some(&shibuya_hints()));
        assert!(out.english.contains("Shinjuku-ku"));
        assert!(!out.english.contains("Shibuya"));
        assert!(out.romaji.contains("Shinjuku-ku"));
    }

    #[test]
    fn test_han_building_only_in_romaji() {
        let parsed = ParsedAddress {
            building: Some("渋谷ビル".into()),
            ..Default::default()
        };
        let out = convert_parsed(parsed);
        assert_eq!(out.english, "Japan");
        assert_eq!(out.romaji, "渋谷biru, Japan");
    }

    #[test]
    fn test_han_source_uses_english_hint_for_romaji() {
        let m = MergedAddress {
            address: ParsedAddress {
                municipality: Some("渋谷区".into()),
                ..Default::default()
            },
            municipality_en: Some("SHIBUYA KU".into()),
            ..Default::default()
        };
        let out = compose(&m);
        assert_eq!(out.english, "Shibuya-ku, Japan");
        assert_eq!(out.romaji, "Shibuya-ku, Japan");
    }

    #[test]
    fn test_prefecture_fallbacks() {
        let kanji_only = ParsedAddress {
            prefecture_kanji: Some("大阪府".into()),
            ..Default::default()
        };
        assert_eq!(convert_parsed(kanji_only).english, "Osaka, Japan");

        let unknown = ParsedAddress {
            prefecture_kanji: Some("東京".into()),
            ..Default::default()
        };
        assert_eq!(convert_parsed(unknown).english, "東京, Japan");

        let strict = MergedAddress {
            address: ParsedAddress {
                prefecture_en: Some("Tokyo".into()),
                ..Default::default()
            },
            prefecture_en_strict: Some("HOKKAIDO".into()),
            ..Default::default()
        };
        assert_eq!(compose(&strict).english, "Hokkaido, Japan");
    }

    #[test]
    fn test_ordering_all_segments() {
        let parsed = ParsedAddress {
            postal: Some("100-0001".into()),
            prefecture_kanji: Some("東京都".into()),
            prefecture_en: Some("Tokyo".into()),
            municipality: Some("チヨダク".into()),
            area: Some("チヨダ".into()),
            building: Some("Tower A".into()),
            chome: Some(1),
            ban: Some(1),
            go: Some(1),
        };
        let out = convert_parsed(parsed);
        assert_eq!(
            out.english,
            "Tower A, 1-chome 1-1, chiyoda, chiyoda-ku, Tokyo, 100-0001, Japan"
        );
        assert!(!out.english.contains(", ,"));
    }

    #[test]
    fn test_empty_address() {
        assert_eq!(convert_text("").english, "Japan");
    }

    #[test]
    fn test_block_descriptor() {
        assert_eq!(block_descriptor(Some(1), Some(2), Some(3)).as_deref(), Some("1-chome 2-3"));
        assert_eq!(block_descriptor(Some(1), Some(2), None).as_deref(), Some("1-chome 2"));
        assert_eq!(block_descriptor(Some(1), None, Some(3)).as_deref(), Some("1-chome"));
        assert_eq!(block_descriptor(None, Some(2), Some(3)).as_deref(), Some("2-3"));
        assert_eq!(block_descriptor(None, None, Some(3)).as_deref(), Some("3"));
        assert_eq!(block_descriptor(None, None, None), None);
    }

    proptest! {
        #[test]
        fn prop_block_descriptor_reparses(c in 1u32..100, b in 1u32..1000, g in 1u32..1000) {
            let descriptor = block_descriptor(Some(c), Some(b), Some(g)).unwrap();
            let (chome, rest) = descriptor.split_once("-chome ").unwrap();
            let (ban, go) = rest.split_once('-').unwrap();
            prop_assert_eq!(parse_numeral(chome), Some(c));
            prop_assert_eq!(parse_numeral(ban), Some(b));
            prop_assert_eq!(parse_numeral(go), Some(g));

            let reparsed = parse_address(&descriptor.replace("-chome ", "丁目"));
            prop_assert_eq!((reparsed.chome, reparsed.ban, reparsed.go), (Some(c), Some(b), Some(g)));
        }
    }
}
