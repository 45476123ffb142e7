use std::collections::BTreeMap;
use std::sync::OnceLock;

use lexime_trie::{DoubleArray, TrieSearch};

use super::table::{DIGRAPHS, SYLLABLES};

/// Romaji → hiragana trie, the inverse of the forward kana table.
pub struct RomajiTrie {
    da: DoubleArray<u8>,
    values: Vec<String>,
}

impl RomajiTrie {
    /// Get or initialize the global singleton.
    pub fn global() -> &'static RomajiTrie {
        static INSTANCE: OnceLock<RomajiTrie> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            // BTreeMap iterates in key order, which DoubleArray::build requires.
            let map = inverted_mappings();
            let keys: Vec<&[u8]> = map.keys().map(|r| r.as_bytes()).collect();
            let values: Vec<String> = map.values().cloned().collect();
            let da = DoubleArray::<u8>::build(&keys);
            RomajiTrie { da, values }
        })
    }

    /// Longest key that prefixes `input`. Returns the matched byte length and
    /// its kana.
    pub fn longest_match(&self, input: &str) -> Option<(usize, &str)> {
        self.da
            .common_prefix_search(input.as_bytes())
            .max_by_key(|m| m.len)
            .map(|m| (m.len, self.values[m.value_id as usize].as_str()))
    }
}

/// Invert the forward tables. Small kana and sokuon have no standalone
/// reading and are skipped; when two kana share a romanization (じ/ぢ, お/を)
/// the first in table order wins.
fn inverted_mappings() -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();

    let singles = SYLLABLES
        .iter()
        .filter(|(kana, romaji)| !romaji.is_empty() && !is_small_kana(*kana))
        .map(|&(kana, romaji)| (romaji, kana.to_string()));
    let pairs = DIGRAPHS
        .iter()
        .map(|&(kana, romaji)| (romaji, kana.to_string()));

    for (romaji, kana) in singles.chain(pairs) {
        out.entry(romaji.to_string()).or_insert(kana);
    }
    out
}

fn is_small_kana(c: char) -> bool {
    matches!(c, 'ぁ' | 'ぃ' | 'ぅ' | 'ぇ' | 'ぉ' | 'ゃ' | 'ゅ' | 'ょ' | 'っ')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vowel() {
        let trie = RomajiTrie::global();
        assert_eq!(trie.longest_match("a"), Some((1, "あ")));
    }

    #[test]
    fn test_longest_wins() {
        let trie = RomajiTrie::global();
        assert_eq!(trie.longest_match("shibuya"), Some((3, "し")));
        assert_eq!(trie.longest_match("shamo"), Some((3, "しゃ")));
        assert_eq!(trie.longest_match("nan"), Some((2, "な")));
    }

    #[test]
    fn test_first_mapping_wins() {
        let trie = RomajiTrie::global();
        assert_eq!(trie.longest_match("ji"), Some((2, "じ")));
        assert_eq!(trie.longest_match("zu"), Some((2, "ず")));
        assert_eq!(trie.longest_match("o"), Some((1, "お")));
        assert_eq!(trie.longest_match("ya"), Some((2, "や")));
    }

    #[test]
    fn test_prefix_without_match() {
        let trie = RomajiTrie::global();
        assert_eq!(trie.longest_match("k"), None);
        assert_eq!(trie.longest_match("xyz"), None);
        assert_eq!(trie.longest_match(""), None);
    }

    #[test]
    fn test_all_forward_digraphs_invert() {
        let trie = RomajiTrie::global();
        for &(kana, romaji) in DIGRAPHS {
            assert_eq!(
                trie.longest_match(romaji),
                Some((romaji.len(), kana)),
                "mapping mismatch for romaji={romaji}"
            );
        }
    }

    #[test]
    fn test_every_inverted_key_matches_itself() {
        let trie = RomajiTrie::global();
        for (romaji, kana) in inverted_mappings() {
            assert_eq!(
                trie.longest_match(&romaji),
                Some((romaji.len(), kana.as_str())),
                "mapping mismatch for romaji={romaji}"
            );
        }
    }
}
