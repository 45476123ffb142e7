//! The 47 prefectures and English casing helpers for postal romanizations.

use std::sync::LazyLock;

use regex::Regex;

/// Japanese name → English name, in JIS prefecture-code order.
pub const PREFECTURES: &[(&str, &str)] = &[
    ("北海道", "Hokkaido"),
    ("青森県", "Aomori"),
    ("岩手県", "Iwate"),
    ("宮城県", "Miyagi"),
    ("秋田県", "Akita"),
    ("山形県", "Yamagata"),
    ("福島県", "Fukushima"),
    ("茨城県", "Ibaraki"),
    ("栃木県", "Tochigi"),
    ("群馬県", "Gunma"),
    ("埼玉県", "Saitama"),
    ("千葉県", "Chiba"),
    ("東京都", "Tokyo"),
    ("神奈川県", "Kanagawa"),
    ("新潟県", "Niigata"),
    ("富山県", "Toyama"),
    ("石川県", "Ishikawa"),
    ("福井県", "Fukui"),
    ("山梨県", "Yamanashi"),
    ("長野県", "Nagano"),
    ("岐阜県", "Gifu"),
    ("静岡県", "Shizuoka"),
    ("愛知県", "Aichi"),
    ("三重県", "Mie"),
    ("滋賀県", "Shiga"),
    ("京都府", "Kyoto"),
    ("大阪府", "Osaka"),
    ("兵庫県", "Hyogo"),
    ("奈良県", "Nara"),
    ("和歌山県", "Wakayama"),
    ("鳥取県", "Tottori"),
    ("島根県", "Shimane"),
    ("岡山県", "Okayama"),
    ("広島県", "Hiroshima"),
    ("山口県", "Yamaguchi"),
    ("徳島県", "Tokushima"),
    ("香川県", "Kagawa"),
    ("愛媛県", "Ehime"),
    ("高知県", "Kochi"),
    ("福岡県", "Fukuoka"),
    ("佐賀県", "Saga"),
    ("長崎県", "Nagasaki"),
    ("熊本県", "Kumamoto"),
    ("大分県", "Oita"),
    ("宮崎県", "Miyazaki"),
    ("鹿児島県", "Kagoshima"),
    ("沖縄県", "Okinawa"),
];

/// English name of a prefecture given its full Japanese name.
pub fn english_name(kanji: &str) -> Option<&'static str> {
    PREFECTURES
        .iter()
        .find(|(jp, _)| *jp == kanji)
        .map(|&(_, en)| en)
}

/// Japanese name of a prefecture from its English name, case-insensitive.
/// Accepts postal-data forms such as `TOKYO TO` or `AKITA KEN`.
pub fn kanji_name(english: &str) -> Option<&'static str> {
    let cleaned = strip_pref_suffix(english.trim());
    PREFECTURES
        .iter()
        .find(|(_, en)| en.eq_ignore_ascii_case(cleaned))
        .map(|&(jp, _)| jp)
}

/// Split a known prefecture off the front of `text`.
pub fn match_prefix(text: &str) -> Option<(&'static str, &'static str, &str)> {
    PREFECTURES.iter().find_map(|&(jp, en)| {
        text.strip_prefix(jp).map(|rest| (jp, en, rest))
    })
}

static PREF_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(TO|FU|KEN)$").unwrap());

static WORD_START_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[a-z]").unwrap());

static SMALL_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(No|Of|And|To|In|On|At|By|For|Or)\b").unwrap());

fn strip_pref_suffix(s: &str) -> &str {
    match PREF_SUFFIX_RE.find(s) {
        Some(m) => &s[..m.start()],
        None => s,
    }
}

/// Title-case ASCII words, keeping short connective words lowercase:
/// `NISHI SHINJUKU` → `Nishi Shinjuku`, `JIMBO CHO` → `Jimbo Cho`.
pub fn proper_case(s: &str) -> String {
    let lower = s.to_lowercase();
    let out = WORD_START_RE.replace_all(&lower, |caps: &regex::Captures| caps[0].to_uppercase());
    SMALL_WORD_RE
        .replace_all(&out, |caps: &regex::Captures| caps[1].to_lowercase())
        .into_owned()
}

/// English prefecture name from a postal romanization or a table name:
/// `TOKYO TO` → `Tokyo`, `HOKKAIDO` → `Hokkaido`.
pub fn normalize_pref_en(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(proper_case(strip_pref_suffix(trimmed)))
}

/// English municipality name from a postal romanization, folding
/// administrative suffix words onto the previous word:
/// `SHIBUYA KU` → `Shibuya-ku`, `MIURA GUN HAYAMA MACHI` → `Miura-gun Hayama-cho`.
pub fn normalize_city_en(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut words: Vec<String> = Vec::new();
    for word in trimmed.split_whitespace() {
        let suffix = match word.to_uppercase().as_str() {
            "SHI" => Some("-shi"),
            "KU" => Some("-ku"),
            "GUN" => Some("-gun"),
            "CHO" | "MACHI" => Some("-cho"),
            "MURA" => Some("-mura"),
            _ => None,
        };
        match (suffix, words.last_mut()) {
            (Some(suffix), Some(prev)) => prev.push_str(suffix),
            (Some(suffix), None) => words.push(suffix.to_string()),
            (None, _) => words.push(proper_case(word)),
        }
    }
    Some(words.join(" "))
}
