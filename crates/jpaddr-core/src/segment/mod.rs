//! Free-text address segmentation.
//!
//! The pipeline is a fixed chain of pure steps, each taking the remaining
//! text and returning what it recognised plus the text left over:
//!
//! 1. postal code (`〒150-0041`, `1500041`)
//! 2. prefecture (one of the 47 table names, as a prefix)
//! 3. municipality (up to the first 市/区/郡, through the following 町/村 after 郡)
//! 4. block numbers (丁目, 番/号, then a hyphen run such as `1-2-3`)
//! 5. area and building (split at the first whitespace)
//!
//! Nothing here fails. Unrecognised pieces stay in the remainder and
//! eventually land in the area or building.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::address::ParsedAddress;
use crate::normalize::normalize;
use crate::numeric::{parse_numeral, KANJI_NUMERAL_CLASS};
use crate::prefecture;


/// 丁目 / 番 / 号 numbers found in an address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Block {
    pub chome: Option<u32>,
    pub ban: Option<u32>,
    pub go: Option<u32>,
}

static POSTAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"〒?\s*([0-9]{3})-?([0-9]{4})").unwrap());

static CHOME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"([0-9]+|[{KANJI_NUMERAL_CLASS}]+)丁目")).unwrap()
});

static BAN_GO_RE: LazyLock<Regex> = LazyLock::new(|| {
    let num = format!("([0-9]+|[{KANJI_NUMERAL_CLASS}]+)");
    Regex::new(&format!("{num}番{num}号?")).unwrap()
});

// Hyphen-like separators seen in typed addresses, including the katakana
// prolonged sound mark that IMEs often produce instead of a minus.
static HYPHEN_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
    let h = "[-‐‑‒–—−ーｰ－]";
    Regex::new(&format!(
        r"([0-9]+)\s*{h}\s*([0-9]+)(?:\s*{h}\s*([0-9]+))?"
    ))
    .unwrap()
});

static GUN_TOWN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^町村]*[町村]").unwrap());

/// Parse a free-text Japanese address.
pub fn parse_address(raw: &str) -> ParsedAddress {
    segment(&normalize(raw.trim()))
}

/// Run the segmentation pipeline on already normalized text.
pub fn segment(text: &str) -> ParsedAddress {
    let (postal, rest) = extract_postal(text);
    let (pref, rest) = extract_prefecture(&rest);
    let (municipality, rest) = extract_municipality(&rest);
    let (block, rest) = extract_block(&rest);
    let (area, building) = split_area_building(&rest);

    let parsed = ParsedAddress {
        postal,
        prefecture_kanji: pref.map(|(jp, _)| jp.to_string()),
        prefecture_en: pref.map(|(_, en)| en.to_string()),
        municipality,
        area,
        building,
        chome: block.chome,
        ban: block.ban,
        go: block.go,
    };
    debug!(?parsed, "segmented address");
    parsed
}

/// Remove the first postal code and return it as `NNN-NNNN`.
pub fn extract_postal(text: &str) -> (Option<String>, String) {
    match POSTAL_RE.captures(text) {
        Some(caps) => {
            let postal = format!("{}-{}", &caps[1], &caps[2]);
            (Some(postal), cut(text, span_of(&caps)).trim().to_string())
        }
        None => (None, text.trim().to_string()),
    }
}

/// Strip a leading prefecture name. Returns its Japanese and English names.
pub fn extract_prefecture(text: &str) -> (Option<(&'static str, &'static str)>, String) {
    match prefecture::match_prefix(text) {
        Some((jp, en, rest)) => (Some((jp, en)), rest.to_string()),
        None => (None, text.to_string()),
    }
}

/// Split off the municipality: everything up to the first 市, 区 or 郡.
/// A 郡 is a district, so the town or village after it (up to the next
/// 町/村) belongs to the municipality too: `三浦郡葉山町`.
pub fn extract_municipality(text: &str) -> (Option<String>, String) {
    let Some((idx, marker)) = text
        .char_indices()
        .find(|&(_, c)| matches!(c, '市' | '区' | '郡'))
    else {
        return (None, text.to_string());
    };

    let mut end = idx + marker.len_utf8();
    if marker == '郡' {
        if let Some(m) = GUN_TOWN_RE.find(&text[end..]) {
            end += m.end();
        }
    }
    (Some(text[..end].to_string()), text[end..].to_string())
}

/// Pull the 丁目 / 番 / 号 numbers out of the text.
///
/// Explicit markers are read first. A hyphen run then fills only what is
/// still missing: three numbers supply the 丁目 when none was written, two
/// supply 番 and 号. With both 丁目 and 番 written the run is left alone,
/// and a run that fills nothing stays in the text (it is usually a room
/// number).
pub fn extract_block(text: &str) -> (Block, String) {
    let mut block = Block::default();
    let mut rest = text.trim().to_string();

    let chome = CHOME_RE
        .captures(&rest)
        .map(|caps| (parse_numeral(&caps[1]), span_of(&caps)));
    if let Some((value, span)) = chome {
        block.chome = value;
        rest = cut(&rest, span);
    }

    let ban_go = BAN_GO_RE
        .captures(&rest)
        .map(|caps| (parse_numeral(&caps[1]), parse_numeral(&caps[2]), span_of(&caps)));
    if let Some((ban, go, span)) = ban_go {
        block.ban = ban;
        block.go = go;
        rest = cut(&rest, span);
    }

    if block.chome.is_some() && block.ban.is_some() {
        return (block, rest);
    }

    let run = HYPHEN_RUN_RE.captures(&rest).map(|caps| {
        let n = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
        (n(1), n(2), n(3), span_of(&caps))
    });
    if let Some((n1, n2, n3, span)) = run {
        let used = match n3 {
            Some(n3) if block.chome.is_none() => {
                block.chome = n1;
                if block.ban.is_none() {
                    block.ban = n2;
                    block.go = Some(n3);
                }
                true
            }
            _ if block.ban.is_none() => {
                block.ban = n1;
                block.go = n2;
                true
            }
            _ => false,
        };
        if used {
            rest = cut(&rest, span);
        }
    }

    (block, rest)
}

/// Split what is left into area and building at the first whitespace.
///
/// `神南 パークビル201` → (`神南`, `パークビル201`). Without whitespace the
/// whole remainder is the area, so `神南パークビル201` keeps the building
/// name inside the area.
pub fn split_area_building(text: &str) -> (Option<String>, Option<String>) {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return (None, None);
    }
    match trimmed.split_once(char::is_whitespace) {
        Some((area, building)) => {
            let building = building.trim();
            (
                Some(area.to_string()),
                (!building.is_empty()).then(|| building.to_string()),
            )
        }
        None => (Some(trimmed.to_string()), None),
    }
}

fn span_of(caps: &regex::Captures) -> Range<usize> {
    caps.get(0).map_or(0..0, |m| m.range())
}

fn cut(text: &str, span: Range<usize>) -> String {
    let mut out = String::with_capacity(text.len());
    out.push_str(&text[..span.start]);
    out.push_str(&text[span.end..]);
    out
}
