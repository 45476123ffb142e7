//! Kanji-numeral and Arabic-digit parsing for block numbers.
//!
//! Parses runs like 二百三十四, 十二, 〇 or 2034 into integers. Place values
//! are limited to 十/百/千: chōme, ban and gō never need 万.

/// Parse a kanji-numeral or ASCII-digit run into a number.
///
/// Returns `None` for empty input, for any character outside the digit and
/// unit glyph sets, and on overflow.
pub fn parse_numeral(text: &str) -> Option<u32> {
    if text.is_empty() {
        return None;
    }
    if text.bytes().all(|b| b.is_ascii_digit()) {
        return text.parse().ok();
    }

    let mut total: u32 = 0;
    let mut current: u32 = 0;
    for ch in text.chars() {
        if let Some(d) = digit_value(ch) {
            current = current.checked_add(d)?;
        } else if let Some(unit) = unit_value(ch) {
            // Bare 十 means 1×10.
            let multiplier = if current == 0 { 1 } else { current };
            total = total.checked_add(multiplier.checked_mul(unit)?)?;
            current = 0;
        } else {
            return None;
        }
    }
    total.checked_add(current)
}

fn digit_value(ch: char) -> Option<u32> {
    let value = match ch {
        '〇' | '零' => 0,
        '一' => 1,
        '二' => 2,
        '三' => 3,
        '四' => 4,
        '五' => 5,
        '六' => 6,
        '七' => 7,
        '八' => 8,
        '九' => 9,
        _ => return None,
    };
    Some(value)
}

fn unit_value(ch: char) -> Option<u32> {
    match ch {
        '十' => Some(10),
        '百' => Some(100),
        '千' => Some(1000),
        _ => None,
    }
}

/// Characters accepted by [`parse_numeral`] besides ASCII digits, as a regex
/// character-class body.
pub(crate) const KANJI_NUMERAL_CLASS: &str = "〇零一二三四五六七八九十百千";

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_simple_digits() {
        assert_eq!(parse_numeral("〇"), Some(0));
        assert_eq!(parse_numeral("零"), Some(0));
        assert_eq!(parse_numeral("一"), Some(1));
        assert_eq!(parse_numeral("五"), Some(5));
        assert_eq!(parse_numeral("九"), Some(9));
    }

    #[test]
    fn test_units() {
        assert_eq!(parse_numeral("十"), Some(10));
        assert_eq!(parse_numeral("百"), Some(100));
        assert_eq!(parse_numeral("千"), Some(1000));
        assert_eq!(parse_numeral("十二"), Some(12));
        assert_eq!(parse_numeral("二十"), Some(20));
    }

    #[test]
    fn test_compound() {
        assert_eq!(parse_numeral("二百三十四"), Some(234));
        assert_eq!(parse_numeral("千二百三十四"), Some(1234));
        assert_eq!(parse_numeral("九千九百九十九"), Some(9999));
        assert_eq!(parse_numeral("三百五"), Some(305));
    }

    #[test]
    fn test_arabic() {
        assert_eq!(parse_numeral("0"), Some(0));
        assert_eq!(parse_numeral("007"), Some(7));
        assert_eq!(parse_numeral("2034"), Some(2034));
    }

    #[test]
    fn test_rejects_foreign_characters() {
        assert_eq!(parse_numeral(""), None);
        assert_eq!(parse_numeral("1a"), None);
        assert_eq!(parse_numeral("二丁"), None);
        assert_eq!(parse_numeral("万"), None);
        assert_eq!(parse_numeral("１"), None);
    }

    #[test]
    fn test_overflow_is_absent() {
        assert_eq!(parse_numeral("99999999999"), None);
    }

    proptest! {
        #[test]
        fn arabic_roundtrip(n in 0u32..=9999) {
            prop_assert_eq!(parse_numeral(&n.to_string()), Some(n));
        }
    }
}
