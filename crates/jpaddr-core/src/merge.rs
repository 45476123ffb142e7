//! Merging zipcode-lookup hints into user-entered address fields.
//!
//! Typed values always win. A blank field is filled from the hint, and the
//! English/kana companions of a field come along only when the field ends up
//! holding the hint's own value, so a hint for one municipality never
//! supplies the English name of another.

use serde::Serialize;

use crate::address::ParsedAddress;
use crate::postal::{KanjiEntry, RomeEntry};
use crate::prefecture;
use crate::romaji::romaji_to_kana;
use crate::settings::settings;

/// Suggestions derived from the datasets for one zipcode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Hints {
    pub prefecture_kanji: Option<String>,
    /// Table English name of `prefecture_kanji`.
    pub prefecture_en: Option<String>,
    pub municipality: Option<String>,
    pub area: Option<String>,
    pub municipality_kana: Option<String>,
    pub area_kana: Option<String>,
    /// Romanized dataset spelling, e.g. `SHIBUYA KU`.
    pub municipality_en: Option<String>,
    pub area_en: Option<String>,
    /// Romanized dataset prefecture, e.g. `TOKYO TO`.
    pub prefecture_en_strict: Option<String>,
}

impl Hints {
    /// Build hints from the best entry of each dataset.
    ///
    /// Japanese names and kana come from the kanji entry. Without one, the
    /// Japanese names are guessed from the romanization (`SHIBUYA KU` →
    /// `しぶや区`) and the prefecture is recovered through the table.
    pub fn from_entries(rome: Option<&RomeEntry>, kanji: Option<&KanjiEntry>) -> Self {
        let postal = &settings().postal;
        let mut hints = Hints::default();

        if let Some(r) = rome {
            hints.prefecture_en_strict = non_blank(&r.prefecture);
            hints.municipality_en = non_blank(&r.city);
            hints.area_en = non_blank(&r.town).filter(|t| *t != postal.rome_no_town);
        }

        match kanji {
            Some(k) => {
                let area_is_real = {
                    let town = k.address3.trim();
                    !town.is_empty() && town != postal.kanji_no_town
                };
                hints.prefecture_kanji = non_blank(&k.address1);
                hints.municipality = non_blank(&k.address2);
                hints.municipality_kana = k.kana2.as_deref().and_then(non_blank);
                if area_is_real {
                    hints.area = non_blank(&k.address3);
                    hints.area_kana = k.kana3.as_deref().and_then(non_blank);
                }
            }
            None => {
                if let Some(r) = rome {
                    hints.prefecture_kanji =
                        prefecture::kanji_name(&r.prefecture).map(str::to_string);
                }
                hints.municipality = hints.municipality_en.as_deref().map(romaji_to_kana);
                hints.area = hints.area_en.as_deref().map(romaji_to_kana);
            }
        }

        hints.prefecture_en = hints
            .prefecture_kanji
            .as_deref()
            .and_then(prefecture::english_name)
            .map(str::to_string);
        hints
    }

    pub fn is_empty(&self) -> bool {
        *self == Hints::default()
    }
}

/// A parsed address plus the companions the composer can use.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergedAddress {
    #[serde(flatten)]
    pub address: ParsedAddress,
    pub municipality_kana: Option<String>,
    pub area_kana: Option<String>,
    pub municipality_en: Option<String>,
    pub area_en: Option<String>,
    pub prefecture_en_strict: Option<String>,
}

impl From<ParsedAddress> for MergedAddress {
    fn from(address: ParsedAddress) -> Self {
        Self {
            address,
            ..Default::default()
        }
    }
}

/// Fill blank fields of `typed` from `hints`. Each field is decided on its
/// own; a non-blank typed value is never replaced.
pub fn merge_hints(typed: &MergedAddress, hints: Option<&Hints>) -> MergedAddress {
    let mut out = typed.clone();
    let Some(h) = hints else {
        return out;
    };
    let a = &mut out.address;

    if fill(&mut a.prefecture_kanji, &h.prefecture_kanji) {
        fill(&mut a.prefecture_en, &h.prefecture_en);
        fill(&mut out.prefecture_en_strict, &h.prefecture_en_strict);
    } else if is_blank(&a.prefecture_kanji) {
        // Prefecture unknown to the hint in Japanese; English is still usable.
        fill(&mut a.prefecture_en, &h.prefecture_en);
        fill(&mut out.prefecture_en_strict, &h.prefecture_en_strict);
    }

    if fill(&mut a.municipality, &h.municipality) {
        fill(&mut out.municipality_kana, &h.municipality_kana);
        fill(&mut out.municipality_en, &h.municipality_en);
    }

    if fill(&mut a.area, &h.area) {
        fill(&mut out.area_kana, &h.area_kana);
        fill(&mut out.area_en, &h.area_en);
    }

    out
}

/// Fill a blank field from the hint. Returns true when the field now holds
/// the hint's value, whether it was filled or already equal.
fn fill(field: &mut Option<String>, hint: &Option<String>) -> bool {
    let Some(hint) = hint.as_deref().map(str::trim).filter(|h| !h.is_empty()) else {
        return false;
    };
    if is_blank(field) {
        *field = Some(hint.to_string());
        return true;
    }
    field.as_deref().map(str::trim) == Some(hint)
}

fn is_blank(field: &Option<String>) -> bool {
    field.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}
