//! Best-effort romaji → Japanese guess for postal-data romanizations.
//!
//! This is lossy by construction: romanized postal data drops vowel length
//! (TOKYO for とうきょう) and has no kanji, so the output is hiragana with
//! kanji administrative suffixes, e.g. `SHIBUYA KU` → `しぶや区`. It is a
//! placeholder for a Japanese-script field, never an authoritative spelling.

use super::trie::RomajiTrie;

/// Romanized administrative suffix tokens and their kanji.
const SUFFIX_TOKENS: &[(&str, &str)] = &[
    ("shi", "市"),
    ("ku", "区"),
    ("gun", "郡"),
    ("cho", "町"),
    ("machi", "町"),
    ("mura", "村"),
];

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'i' | b'u' | b'e' | b'o')
}

/// Approximate the Japanese spelling of a romanized city or town name.
///
/// Tokens are split on whitespace and hyphens. Any token after the first that
/// is an administrative suffix becomes its kanji; the others are converted
/// syllable by syllable with longest match first.
pub fn romaji_to_kana(romaji: &str) -> String {
    let lower = romaji.trim().to_lowercase();
    let tokens: Vec<&str> = lower
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|t| !t.is_empty())
        .collect();

    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        let suffix = SUFFIX_TOKENS
            .iter()
            .find(|(romaji, _)| romaji == token)
            .map(|&(_, kanji)| kanji);
        match suffix {
            Some(kanji) if i > 0 => out.push_str(kanji),
            _ => out.push_str(&syllables_to_hiragana(token)),
        }
    }
    out
}

/// Longest-match-first conversion of one lowercase token.
fn syllables_to_hiragana(token: &str) -> String {
    let trie = RomajiTrie::global();
    let bytes = token.as_bytes();
    let mut out = String::new();
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii() {
            // Keep non-ASCII characters whole.
            let ch = token[i..].chars().next().unwrap_or_default();
            out.push(ch);
            i += ch.len_utf8().max(1);
            continue;
        }

        let next = bytes.get(i + 1).copied();
        if b == b'm' && matches!(next, Some(b'b' | b'm' | b'p')) {
            out.push('ん');
            i += 1;
            continue;
        }
        if b.is_ascii_alphabetic() && !is_vowel(b) && b != b'n' && next == Some(b) {
            out.push('っ');
            i += 1;
            continue;
        }

        match trie.longest_match(&token[i..]) {
            Some((len, kana)) => {
                out.push_str(kana);
                i += len;
            }
            None => {
                out.push(b as char);
                i += 1;
            }
        }
    }
    out
}
