use std::collections::HashMap;
use std::sync::OnceLock;

/// Hiragana → Hepburn-style romanization. Katakana entries are derived from
/// these at table construction, see [`derive_katakana`].
pub(crate) const SYLLABLES: &[(char, &str)] = &[
    ('あ', "a"),
    ('い', "i"),
    ('う', "u"),
    ('え', "e"),
    ('お', "o"),
    ('か', "ka"),
    ('き', "ki"),
    ('く', "ku"),
    ('け', "ke"),
    ('こ', "ko"),
    ('さ', "sa"),
    ('し', "shi"),
    ('す', "su"),
    ('せ', "se"),
    ('そ', "so"),
    ('た', "ta"),
    ('ち', "chi"),
    ('つ', "tsu"),
    ('て', "te"),
    ('と', "to"),
    ('な', "na"),
    ('に', "ni"),
    ('ぬ', "nu"),
    ('ね', "ne"),
    ('の', "no"),
    ('は', "ha"),
    ('ひ', "hi"),
    ('ふ', "fu"),
    ('へ', "he"),
    ('ほ', "ho"),
    ('ま', "ma"),
    ('み', "mi"),
    ('む', "mu"),
    ('め', "me"),
    ('も', "mo"),
    ('や', "ya"),
    ('ゆ', "yu"),
    ('よ', "yo"),
    ('ら', "ra"),
    ('り', "ri"),
    ('る', "ru"),
    ('れ', "re"),
    ('ろ', "ro"),
    ('わ', "wa"),
    ('を', "o"),
    ('ん', "n"),
    ('が', "ga"),
    ('ぎ', "gi"),
    ('ぐ', "gu"),
    ('げ', "ge"),
    ('ご', "go"),
    ('ざ', "za"),
    ('じ', "ji"),
    ('ず', "zu"),
    ('ぜ', "ze"),
    ('ぞ', "zo"),
    ('だ', "da"),
    ('ぢ', "ji"),
    ('づ', "zu"),
    ('で', "de"),
    ('ど', "do"),
    ('ば', "ba"),
    ('び', "bi"),
    ('ぶ', "bu"),
    ('べ', "be"),
    ('ぼ', "bo"),
    ('ぱ', "pa"),
    ('ぴ', "pi"),
    ('ぷ', "pu"),
    ('ぺ', "pe"),
    ('ぽ', "po"),
    ('ぁ', "a"),
    ('ぃ', "i"),
    ('ぅ', "u"),
    ('ぇ', "e"),
    ('ぉ', "o"),
    ('ゃ', "ya"),
    ('ゅ', "yu"),
    ('ょ', "yo"),
    ('っ', ""),
];

/// Symbols shared by both scripts; not shifted. The long-vowel mark ー is
/// handled by the transliterator itself.
const SYMBOLS: &[(char, &str)] = &[('・', " ")];

/// Palatalized two-kana syllables (yōon), hiragana only.
pub(crate) const DIGRAPHS: &[(&str, &str)] = &[
    ("きゃ", "kya"),
    ("きゅ", "kyu"),
    ("きょ", "kyo"),
    ("しゃ", "sha"),
    ("しゅ", "shu"),
    ("しょ", "sho"),
    ("ちゃ", "cha"),
    ("ちゅ", "chu"),
    ("ちょ", "cho"),
    ("にゃ", "nya"),
    ("にゅ", "nyu"),
    ("にょ", "nyo"),
    ("ひゃ", "hya"),
    ("ひゅ", "hyu"),
    ("ひょ", "hyo"),
    ("みゃ", "mya"),
    ("みゅ", "myu"),
    ("みょ", "myo"),
    ("りゃ", "rya"),
    ("りゅ", "ryu"),
    ("りょ", "ryo"),
    ("ぎゃ", "gya"),
    ("ぎゅ", "gyu"),
    ("ぎょ", "gyo"),
    ("じゃ", "ja"),
    ("じゅ", "ju"),
    ("じょ", "jo"),
    ("びゃ", "bya"),
    ("びゅ", "byu"),
    ("びょ", "byo"),
    ("ぴゃ", "pya"),
    ("ぴゅ", "pyu"),
    ("ぴょ", "pyo"),
];

/// Codepoint distance between a hiragana and its katakana counterpart.
const KATAKANA_OFFSET: u32 = 0x60;

/// Lookup tables for kana → romaji, both scripts.
pub(crate) struct KanaTable {
    syllables: HashMap<char, &'static str>,
    digraphs: HashMap<[char; 2], &'static str>,
}

impl KanaTable {
    /// Get or initialize the global table.
    pub fn global() -> &'static KanaTable {
        static INSTANCE: OnceLock<KanaTable> = OnceLock::new();
        INSTANCE.get_or_init(KanaTable::build)
    }

    fn build() -> Self {
        let mut syllables: HashMap<char, &'static str> = HashMap::new();
        for &(kana, romaji) in SYLLABLES {
            syllables.insert(kana, romaji);
            syllables.insert(derive_katakana(kana), romaji);
        }
        for &(symbol, romaji) in SYMBOLS {
            syllables.insert(symbol, romaji);
        }

        let mut digraphs: HashMap<[char; 2], &'static str> = HashMap::new();
        for &(pair, romaji) in DIGRAPHS {
            let mut chars = pair.chars();
            let (Some(a), Some(b)) = (chars.next(), chars.next()) else {
                continue;
            };
            digraphs.insert([a, b], romaji);
            digraphs.insert([derive_katakana(a), derive_katakana(b)], romaji);
        }

        Self {
            syllables,
            digraphs,
        }
    }

    pub fn syllable(&self, c: char) -> Option<&'static str> {
        self.syllables.get(&c).copied()
    }

    pub fn digraph(&self, a: char, b: char) -> Option<&'static str> {
        self.digraphs.get(&[a, b]).copied()
    }
}

/// Shift a hiragana in ぁ..=ん to its katakana counterpart; other characters
/// are returned unchanged.
pub(crate) fn derive_katakana(c: char) -> char {
    if ('ぁ'..='ん').contains(&c) {
        char::from_u32(c as u32 + KATAKANA_OFFSET).unwrap_or(c)
    } else {
        c
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_katakana() {
        assert_eq!(derive_katakana('あ'), 'ア');
        assert_eq!(derive_katakana('ん'), 'ン');
        assert_eq!(derive_katakana('っ'), 'ッ');
        assert_eq!(derive_katakana('ー'), 'ー');
        assert_eq!(derive_katakana('a'), 'a');
    }

    #[test]
    fn test_katakana_mirrors_hiragana() {
        let table = KanaTable::global();
        for &(kana, romaji) in SYLLABLES {
            assert_eq!(
                table.syllable(derive_katakana(kana)),
                Some(romaji),
                "katakana mismatch for {kana}"
            );
        }
    }

    #[test]
    fn test_digraphs_both_scripts() {
        let table = KanaTable::global();
        assert_eq!(table.digraph('し', 'ゃ'), Some("sha"));
        assert_eq!(table.digraph('シ', 'ャ'), Some("sha"));
        assert_eq!(table.digraph('ジ', 'ョ'), Some("jo"));
        assert_eq!(table.digraph('し', 'ャ'), None);
    }

    #[test]
    fn test_symbols() {
        let table = KanaTable::global();
        assert_eq!(table.syllable('・'), Some(" "));
        assert_eq!(table.syllable('ー'), None);
        assert_eq!(table.syllable('漢'), None);
    }
}
