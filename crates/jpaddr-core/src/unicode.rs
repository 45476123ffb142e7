/// Han ideographs, including the iteration mark 々 and the kanji zero 〇
/// that appear in place names.
pub fn is_kanji(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
        || ('\u{20000}'..='\u{2A6DF}').contains(&c)
        || ('\u{F900}'..='\u{FAFF}').contains(&c)
        || c == '々'
        || c == '〇'
}

/// True if any character of `s` is a Han ideograph. Romanized output that
/// still has one could not be fully transliterated.
pub fn has_kanji(s: &str) -> bool {
    s.chars().any(is_kanji)
}
