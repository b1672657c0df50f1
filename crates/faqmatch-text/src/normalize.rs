use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold `text` into the canonical form used at build and query time.
///
/// Lowercases, decomposes (NFD) and drops combining marks, turns every
/// non-word character into a separator, then collapses separators to a
/// single space with no leading or trailing space.
pub fn normalize(text: &str) -> String {
    let folded = text.to_lowercase();
    let mut out = String::with_capacity(folded.len());
    let mut gap = false;
    // every mark category is dropped (Mn, Mc, Me): spacing vowel signs
    // vanish with the accents instead of splitting the word
    for ch in folded.nfd().filter(|c| !is_combining_mark(*c)) {
        if is_word_char(ch) {
            if gap && !out.is_empty() {
                out.push(' ');
            }
            gap = false;
            out.push(ch);
        } else {
            gap = true;
        }
    }
    out
}

pub(crate) fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}
