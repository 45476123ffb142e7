//! Input normalization: digit width and Unicode compatibility forms.

use unicode_normalization::UnicodeNormalization;

/// Fold full-width digits (U+FF10..U+FF19) to ASCII, leaving everything else.
pub fn to_halfwidth_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from_u32(c as u32 - '０' as u32 + '0' as u32).unwrap_or(c),
            _ => c,
        })
        .collect()
}

/// NFKC followed by digit folding.
///
/// NFKC already folds full-width digits, half-width katakana (ｼﾌﾞﾔ → シブヤ),
/// full-width Latin and the ideographic space; the explicit digit pass keeps
/// the contract independent of the normalization form.
pub fn normalize(input: &str) -> String {
    let nfkc: String = input.nfkc().collect();
    to_halfwidth_digits(&nfkc)
}

/// ASCII digits of a zipcode string, full-width folded, everything else dropped.
pub fn zip_digits(input: &str) -> String {
    to_halfwidth_digits(input)
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect()
}

/// Seven-digit zipcode from user input. Six digits are taken as a code whose
/// leading zero was dropped (spreadsheet exports do this).
pub fn to_zip7(input: &str) -> Option<String> {
    let digits = zip_digits(input);
    match digits.len() {
        7 => Some(digits),
        6 => Some(format!("0{digits}")),
        _ => None,
    }
}

/// Strict variant: exactly seven digits after folding.
pub fn to_zip7_strict(input: &str) -> Option<String> {
    let digits = zip_digits(input);
    (digits.len() == 7).then_some(digits)
}

/// Render a seven-digit zipcode as `NNN-NNNN`. Returns `None` for anything
/// that is not exactly seven ASCII digits.
pub fn format_postal(zip7: &str) -> Option<String> {
    if zip7.len() != 7 || !zip7.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{}-{}", &zip7[..3], &zip7[3..]))
}
