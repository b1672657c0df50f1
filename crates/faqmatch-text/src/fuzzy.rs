//! Approximate string similarity, every score in `[0, 1]`.
//!
//! All measures are built on the Indel distance (insertions and deletions
//! only), computed over Unicode scalar values.

use std::collections::{BTreeSet, HashMap};

/// Best of the partial, token-set and whole-string ratios.
///
/// Each measure suits a different query shape (truncated, reordered,
/// generally close), so the query keeps whichever fits best.
pub fn fuzzy_score(query: &str, reference: &str) -> f64 {
    partial_ratio(query, reference)
        .max(token_set_ratio(query, reference))
        .max(ratio(query, reference))
}

/// Whole-string Indel similarity; 0 when either side is empty.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    indel_similarity(&a, &b)
}

/// Best alignment of the shorter string against any window of the longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let (needle, haystack) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
    let best = best_window(needle, haystack);
    if best < 1.0 && needle.len() == haystack.len() {
        return best.max(best_window(haystack, needle));
    }
    best
}

/// Compares token sets, ignoring order and repetition.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0.0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).copied().collect();
    let diff_ab: Vec<&str> = tokens_a.difference(&tokens_b).copied().collect();
    let diff_ba: Vec<&str> = tokens_b.difference(&tokens_a).copied().collect();

    // one side's tokens are contained in the other's
    if !intersection.is_empty() && (diff_ab.is_empty() || diff_ba.is_empty()) {
        return 1.0;
    }

    let diff_ab: Vec<char> = diff_ab.join(" ").chars().collect();
    let diff_ba: Vec<char> = diff_ba.join(" ").chars().collect();
    let ab_len = diff_ab.len();
    let ba_len = diff_ba.len();
    let sect_len = intersection.join(" ").chars().count();
    let separator = usize::from(sect_len != 0);

    let sect_ab_len = sect_len + separator + ab_len;
    let sect_ba_len = sect_len + separator + ba_len;

    let dist = indel_distance(&diff_ab, &diff_ba);
    let result = normalized(dist, sect_ab_len + sect_ba_len);
    if sect_len == 0 {
        return result;
    }

    // only the shared section matches, so the distance is the length gap
    let sect_ab_ratio = normalized(separator + ab_len, sect_len + sect_ab_len);
    let sect_ba_ratio = normalized(separator + ba_len, sect_len + sect_ba_len);
    result.max(sect_ab_ratio).max(sect_ba_ratio)
}

/// Slides `needle` over `haystack` (`needle.len() <= haystack.len()`),
/// including partial overlaps at both ends. Windows whose outer edge char
/// does not occur in the needle cannot be the best and are skipped.
fn best_window(needle: &[char], haystack: &[char]) -> f64 {
    let pattern = Pattern::new(needle);
    let n = needle.len();
    let m = haystack.len();
    let mut best = 0.0_f64;

    let consider = |window: &[char], best: &mut f64| -> bool {
        let lcs = pattern.lcs(window);
        let sim = normalized(n + window.len() - 2 * lcs, n + window.len());
        if sim > *best {
            *best = sim;
        }
        *best >= 1.0
    };

    for i in 1..n {
        if pattern.contains(haystack[i - 1]) && consider(&haystack[..i], &mut best) {
            return best;
        }
    }
    for i in 0..m - n {
        if pattern.contains(haystack[i + n - 1])
            && consider(&haystack[i..i + n], &mut best)
        {
            return best;
        }
    }
    for i in m - n..m {
        if pattern.contains(haystack[i]) && consider(&haystack[i..], &mut best) {
            return best;
        }
    }
    best
}

fn indel_similarity(a: &[char], b: &[char]) -> f64 {
    normalized(indel_distance(a, b), a.len() + b.len())
}

fn normalized(dist: usize, lensum: usize) -> f64 {
    if lensum == 0 {
        1.0
    } else {
        1.0 - dist as f64 / lensum as f64
    }
}

fn indel_distance(a: &[char], b: &[char]) -> usize {
    a.len() + b.len() - 2 * Pattern::new(a).lcs(b)
}

/// Bit-parallel LCS (Hyyrö): one bit per pattern char, 64 per word, so a
/// text of length `t` costs `O(t * ceil(p / 64))`.
struct Pattern {
    len: usize,
    masks: HashMap<char, Vec<u64>>,
}

impl Pattern {
    fn new(pattern: &[char]) -> Self {
        let words = pattern.len().div_ceil(64);
        let mut masks: HashMap<char, Vec<u64>> = HashMap::new();
        for (i, &c) in pattern.iter().enumerate() {
            masks.entry(c).or_insert_with(|| vec![0; words])[i / 64] |= 1u64 << (i % 64);
        }
        Self {
            len: pattern.len(),
            masks,
        }
    }

    fn contains(&self, c: char) -> bool {
        self.masks.contains_key(&c)
    }

    fn lcs(&self, text: &[char]) -> usize {
        let words = self.len.div_ceil(64);
        if words == 0 || text.is_empty() {
            return 0;
        }
        let mut state = vec![u64::MAX; words];
        for c in text {
            let Some(mask) = self.masks.get(c) else {
                continue;
            };
            let mut carry = false;
            for (s, &m) in state.iter_mut().zip(mask) {
                let matched = *s & m;
                let (sum, c1) = s.overflowing_add(matched);
                let (sum, c2) = sum.overflowing_add(u64::from(carry));
                carry = c1 || c2;
                *s = sum | (*s - matched);
            }
        }
        let tail = self.len % 64;
        state
            .iter()
            .enumerate()
            .map(|(k, s)| {
                let valid = if k + 1 == words && tail != 0 {
                    (1u64 << tail) - 1
                } else {
                    u64::MAX
                };
                (!s & valid).count_ones() as usize
            })
            .sum()
    }
}
