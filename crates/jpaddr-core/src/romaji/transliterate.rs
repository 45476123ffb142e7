use unicode_normalization::UnicodeNormalization;

use super::table::KanaTable;

fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'i' | 'u' | 'e' | 'o')
}

/// Romanize hiragana/katakana, passing through anything the tables do not
/// cover (kanji, digits, Latin, punctuation).
///
/// The scan handles yōon digraphs (しゃ → sha), sokuon (っぷ → ppu) and the
/// long-vowel mark (らー → raa). Afterwards `n` before b/m/p becomes `m`
/// (しんばし → shimbashi) and hyphen runs collapse to one.
pub fn kana_to_romaji(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }
    let table = KanaTable::global();
    let chars: Vec<char> = input.nfkc().collect();
    let mut out = String::with_capacity(chars.len() * 3);

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];

        if let Some(&next) = chars.get(i + 1) {
            if let Some(romaji) = table.digraph(ch, next) {
                out.push_str(romaji);
                i += 2;
                continue;
            }
        }

        match ch {
            // Sokuon: double the first letter of the following syllable,
            // which is then romanized on its own turn.
            'っ' | 'ッ' => {
                let first = chars
                    .get(i + 1)
                    .and_then(|&next| table.syllable(next))
                    .and_then(|romaji| romaji.chars().next());
                if let Some(c) = first {
                    out.push(c);
                }
            }
            'ー' => {
                if let Some(v) = out.chars().last().filter(|&c| is_vowel(c)) {
                    out.push(v);
                }
            }
            _ => match table.syllable(ch) {
                Some(romaji) => out.push_str(romaji),
                None => out.push(ch),
            },
        }
        i += 1;
    }

    collapse_hyphens(&assimilate_nasals(&out))
}

/// `n` directly before b, m or p is pronounced and written `m`.
fn assimilate_nasals(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    for (i, &c) in chars.iter().enumerate() {
        let before_labial = matches!(chars.get(i + 1), Some('b' | 'm' | 'p'));
        out.push(if c == 'n' && before_labial { 'm' } else { c });
    }
    out
}

fn collapse_hyphens(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_hyphen = false;
    for c in s.chars() {
        if c == '-' {
            if prev_hyphen {
                continue;
            }
            prev_hyphen = true;
        } else {
            prev_hyphen = false;
        }
        out.push(c);
    }
    out
}

/// Trailing administrative markers of a municipality, in kanji or katakana
/// reading, and their romanized suffix.
const MUNICIPALITY_SUFFIXES: &[(&str, &str)] = &[
    ("市", "-shi"),
    ("シ", "-shi"),
    ("区", "-ku"),
    ("ク", "-ku"),
    ("郡", "-gun"),
    ("グン", "-gun"),
    ("町", "-cho"),
    ("チョウ", "-cho"),
    ("マチ", "-cho"),
    ("村", "-mura"),
    ("ムラ", "-mura"),
];

/// Romanize a municipality name, rewriting its trailing 市/区/郡/町/村 (or the
/// katakana reading of one) as `-shi`, `-ku`, `-gun`, `-cho`, `-mura`.
pub fn municipality_to_romaji(municipality: &str) -> String {
    if municipality.is_empty() {
        return String::new();
    }
    let normalized: String = municipality.nfkc().collect();
    let rewritten = MUNICIPALITY_SUFFIXES
        .iter()
        .find_map(|&(suffix, romaji)| {
            normalized
                .strip_suffix(suffix)
                .map(|stem| format!("{stem}{romaji}"))
        })
        .unwrap_or(normalized);
    kana_to_romaji(&rewritten)
}

/// Romanize an area (町域) name.
pub fn area_to_romaji(area: &str) -> String {
    kana_to_romaji(area)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_hiragana() {
        assert_eq!(kana_to_romaji("しぶや"), "shibuya");
        assert_eq!(kana_to_romaji("とうきょう"), "toukyou");
    }

    #[test]
    fn test_katakana() {
        assert_eq!(kana_to_romaji("ジンナン"), "jinnan");
        assert_eq!(kana_to_romaji("シブヤ"), "shibuya");
    }

    #[test]
    fn test_halfwidth_katakana() {
        assert_eq!(kana_to_romaji("ｼﾞﾝﾅﾝ"), "jinnan");
    }

    #[test]
    fn test_digraphs() {
        assert_eq!(kana_to_romaji("きょうと"), "kyouto");
        assert_eq!(kana_to_romaji("ジュク"), "juku");
        assert_eq!(kana_to_romaji("ちゃや"), "chaya");
    }

    #[test]
    fn test_gemination() {
        assert_eq!(kana_to_romaji("きっぷ"), "kippu");
        assert_eq!(kana_to_romaji("ホッカイドウ"), "hokkaidou");
        assert_eq!(kana_to_romaji("っ"), "");
    }

    #[test]
    fn test_long_vowel_mark() {
        assert_eq!(kana_to_romaji("らーめん"), "raamen");
        assert_eq!(kana_to_romaji("パークビル"), "paakubiru");
        // Nothing to lengthen at the start.
        assert_eq!(kana_to_romaji("ーあ"), "a");
    }

    #[test]
    fn test_nasal_assimilation() {
        assert_eq!(kana_to_romaji("しんばし"), "shimbashi");
        assert_eq!(kana_to_romaji("てんぷら"), "tempura");
        assert_eq!(kana_to_romaji("ほんまち"), "hommachi");
        assert_eq!(kana_to_romaji("かんだ"), "kanda");
    }

    #[test]
    fn test_passthrough() {
        assert_eq!(kana_to_romaji("神南"), "神南");
        assert_eq!(kana_to_romaji("パークビル201"), "paakubiru201");
        assert_eq!(kana_to_romaji("Tower A"), "Tower A");
        assert_eq!(kana_to_romaji(""), "");
    }

    #[test]
    fn test_middle_dot_and_hyphens() {
        assert_eq!(kana_to_romaji("ナカノ・シマ"), "nakano shima");
        assert_eq!(kana_to_romaji("a--b---c"), "a-b-c");
    }

    #[test]
    fn test_municipality_suffixes() {
        assert_eq!(municipality_to_romaji("しぶや区"), "shibuya-ku");
        assert_eq!(municipality_to_romaji("シブヤク"), "shibuya-ku");
        assert_eq!(municipality_to_romaji("よこはま市"), "yokohama-shi");
        assert_eq!(municipality_to_romaji("ハヤママチ"), "hayama-cho");
        assert_eq!(municipality_to_romaji("ミウラグン"), "miura-gun");
        assert_eq!(municipality_to_romaji("ひのはら村"), "hinohara-mura");
        assert_eq!(municipality_to_romaji("渋谷区"), "渋谷-ku");
        assert_eq!(municipality_to_romaji(""), "");
    }

    #[test]
    fn test_area_is_plain_transliteration() {
        assert_eq!(area_to_romaji("ジンナン"), "jinnan");
        assert_eq!(area_to_romaji("神南"), "神南");
    }
}
