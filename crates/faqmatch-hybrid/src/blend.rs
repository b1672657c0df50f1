/// Queries at or under this many characters count as short.
pub const SHORT_QUERY_CHARS: usize = 5;
/// Ceiling on the lexical weight for short or single-token queries.
pub const SHORT_QUERY_ALPHA_CAP: f64 = 0.5;

/// Lexical weight for a normalized query.
///
/// Greetings and one-word queries carry too little signal for tf-idf, so
/// their lexical weight is capped and fuzzy matching gets at least half.
pub fn blend_weight(normalized_query: &str, base_alpha: f64) -> f64 {
    let short = normalized_query.chars().count() <= SHORT_QUERY_CHARS
        || normalized_query.split_whitespace().count() <= 1;
    if short {
        base_alpha.min(SHORT_QUERY_ALPHA_CAP)
    } else {
        base_alpha
    }
}

/// `alpha * cosine + (1 - alpha) * fuzzy`, position by position.
pub fn blend(cosine: &[f64], fuzzy: &[f64], alpha: f64) -> Vec<f64> {
    debug_assert_eq!(cosine.len(), fuzzy.len());
    cosine
        .iter()
        .zip(fuzzy)
        .map(|(c, f)| alpha * c + (1.0 - alpha) * f)
        .collect()
}

/// Positions of the `k` highest scores, best first. Equal scores keep
/// corpus order.
pub fn top_k(scores: &[f64], k: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order.truncate(k);
    order
}
