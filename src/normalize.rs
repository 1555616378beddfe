//! Text normalization for entity equality testing.
//!
//! Two canonical forms are produced here:
//!
//! - [`fold`]: lowercase + ASCII transliteration, used by the vocabulary
//!   mapper before word lookup (digits and punctuation survive).
//! - [`normalize`]: [`fold`] plus stripping of everything that is not a
//!   lowercase ASCII letter, used as the equality key for alignment and
//!   clustering. Never shown to a user.
//!
//! Both are pure and deterministic.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercase and transliterate accented characters to their ASCII base form.
///
/// Decomposes via NFKD and drops combining marks, then maps the handful of
/// Latin letters that do not decompose to an ASCII base.
///
/// # Examples
///
/// ```
/// use salience::normalize::fold;
///
/// assert_eq!(fold("Citroën"), "citroen");
/// assert_eq!(fold("Łódź 42!"), "lodz 42!");
/// ```
#[must_use]
pub fn fold(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.nfkd().filter(|c| !is_combining_mark(*c)) {
        match ch {
            'ø' | 'Ø' => out.push('o'),
            'đ' | 'Đ' => out.push('d'),
            'ł' | 'Ł' => out.push('l'),
            'æ' | 'Æ' => out.push_str("ae"),
            'œ' | 'Œ' => out.push_str("oe"),
            'ß' => out.push_str("ss"),
            _ => {
                for lower in ch.to_lowercase() {
                    out.push(lower);
                }
            }
        }
    }
    out
}

/// Canonical equality key: [`fold`], then keep only `a..=z`.
///
/// # Examples
///
/// ```
/// use salience::normalize::normalize;
///
/// assert_eq!(normalize("New York City"), "newyorkcity");
/// assert_eq!(normalize("A.C. Milan"), "acmilan");
/// assert_eq!(normalize("42"), "");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    fold(text).chars().filter(char::is_ascii_lowercase).collect()
}
