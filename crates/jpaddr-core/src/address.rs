use serde::{Deserialize, Serialize};

use crate::normalize::{format_postal, to_halfwidth_digits, zip_digits};
use crate::numeric::parse_numeral;
use crate::prefecture;

/// A Japanese address split into its components.
///
/// Every field is optional; segmentation never fails, it only leaves pieces
/// out. `chome`, `ban` and `go` are the 丁目 / 番 / 号 block numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAddress {
    /// Canonical `NNN-NNNN` when seven digits were found.
    pub postal: Option<String>,
    pub prefecture_kanji: Option<String>,
    pub prefecture_en: Option<String>,
    pub municipality: Option<String>,
    pub area: Option<String>,
    pub building: Option<String>,
    pub chome: Option<u32>,
    pub ban: Option<u32>,
    pub go: Option<u32>,
}

impl ParsedAddress {
    /// Seven ASCII digits of the postal code, if it has them.
    pub fn zip7(&self) -> Option<String> {
        let digits = zip_digits(self.postal.as_deref()?);
        (digits.len() == 7).then_some(digits)
    }
}

/// Raw strings of a form with one input per component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressFields {
    #[serde(default)]
    pub postal: String,
    #[serde(default)]
    pub prefecture: String,
    #[serde(default)]
    pub municipality: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub chome: String,
    #[serde(default)]
    pub ban: String,
    #[serde(default)]
    pub go: String,
    #[serde(default)]
    pub building: String,
}

impl AddressFields {
    /// Interpret the raw strings.
    ///
    /// Postal digits may be full-width; seven or more render as `NNN-NNNN`
    /// of the first seven, fewer are kept as typed digits. Block numbers go
    /// through digit folding and the numeral parser, so `二` and `２` both
    /// read as 2. A prefecture given in Japanese also fills its English name.
    pub fn to_parsed(&self) -> ParsedAddress {
        let digits = zip_digits(&self.postal);
        let postal = match digits.len() {
            0 => None,
            n if n >= 7 => format_postal(&digits[..7]),
            _ => Some(digits),
        };

        let prefecture_kanji = non_blank(&self.prefecture);
        let prefecture_en = prefecture_kanji
            .as_deref()
            .and_then(prefecture::english_name)
            .map(str::to_string);

        ParsedAddress {
            postal,
            prefecture_kanji,
            prefecture_en,
            municipality: non_blank(&self.municipality),
            area: non_blank(&self.area),
            building: non_blank(&self.building),
            chome: field_number(&self.chome),
            ban: field_number(&self.ban),
            go: field_number(&self.go),
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    (!t.is_empty()).then(|| t.to_string())
}

fn field_number(s: &str) -> Option<u32> {
    parse_numeral(to_halfwidth_digits(s.trim()).as_str())
}
