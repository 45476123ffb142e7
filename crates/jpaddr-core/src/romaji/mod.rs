//! Kana ↔ romaji conversion.
//!
//! The forward direction romanizes hiragana/katakana with a table-driven scan
//! (yōon, sokuon, long vowels, nasal assimilation). The reverse direction
//! guesses kana from postal-data romanizations through a trie built by
//! inverting the same tables.

mod reverse;
mod table;
mod transliterate;
mod trie;

pub use reverse::romaji_to_kana;
pub use transliterate::{area_to_romaji, kana_to_romaji, municipality_to_romaji};
pub use trie::RomajiTrie;
