//! String similarity used to compare post-office names with address fragments.
//!
//! A comparison is made of two named rules, applied in order:
//!
//! 1. [`ScoreRule::TokenContainment`]: the reference is split into words and,
//!    if every word appears *somewhere* in the candidate (plain substring
//!    containment, not word boundaries), the score is `1.0`.
//! 2. [`ScoreRule::EditDistance`]: otherwise the score is the Levenshtein
//!    distance normalized by the longer input: `1 - distance / max_len`.
//!
//! Both inputs are trimmed and lowercased first. Lengths are counted in
//! Unicode scalar values, never bytes.
//!
//! The rule is directional: `reference` is tokenized, `candidate` is searched.
//!
//! ```rust
//! use matcher::similarity::score;
//!
//! assert_eq!(score("Mumbai", "mumbai central"), 1.0);
//! assert!(score("mumbai central", "Mumbai") < 1.0);
//! ```

use serde::{Deserialize, Serialize};

/// Which rule produced a [`Similarity`] value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    /// Every reference token occurs as a substring of the candidate.
    TokenContainment,
    /// Normalized Levenshtein similarity.
    EditDistance,
}

/// A similarity value in `[0, 1]` together with the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Similarity {
    pub value: f64,
    pub rule: ScoreRule,
}

impl Similarity {
    /// True when the comparison is a perfect match.
    pub fn is_exact(&self) -> bool {
        self.value == 1.0
    }
}

/// ECMAScript whitespace and line terminators.
///
/// Unicode `White_Space` plus U+FEFF, minus U+0085.
pub fn is_separator_space(ch: char) -> bool {
    match ch {
        '\u{feff}' => true,
        '\u{85}' => false,
        other => other.is_whitespace(),
    }
}

/// Trim surrounding whitespace and lowercase.
pub fn normalize(text: &str) -> String {
    text.trim_matches(is_separator_space).to_lowercase()
}

/// Split a normalized reference into the words checked by the containment rule.
///
/// Separators are a run of whitespace or a single comma, so `"a, b"` yields
/// `["a", "", "b"]`. Empty tokens are kept: an empty token is contained in
/// every string, which makes `""` match anything.
pub fn reference_tokens(reference: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut chars = reference.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        if is_separator_space(ch) {
            tokens.push(&reference[start..idx]);
            let mut end = idx + ch.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !is_separator_space(next) {
                    break;
                }
                end = next_idx + next.len_utf8();
                chars.next();
            }
            start = end;
        } else if ch == ',' {
            tokens.push(&reference[start..idx]);
            start = idx + ch.len_utf8();
        }
    }

    tokens.push(&reference[start..]);
    tokens
}

/// Exact-word shortcut over normalized inputs.
pub fn contains_all_tokens(reference: &str, candidate: &str) -> bool {
    reference_tokens(reference)
        .into_iter()
        .all(|token| candidate.contains(token))
}

/// Levenshtein distance between `s` and `t`, counted in chars.
pub fn levenshtein(s: &str, t: &str) -> usize {
    let s: Vec<char> = s.chars().collect();
    let t: Vec<char> = t.chars().collect();

    if s.is_empty() {
        return t.len();
    }
    if t.is_empty() {
        return s.len();
    }

    // Two rows of the (len(t)+1) x (len(s)+1) table.
    let mut prev: Vec<usize> = (0..=s.len()).collect();
    let mut curr = vec![0usize; s.len() + 1];

    for (i, tc) in t.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in s.iter().enumerate() {
            let cost = usize::from(sc != tc);
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[s.len()]
}

/// Edit-distance similarity over normalized inputs.
///
/// Two empty strings are identical and score `1.0`.
pub fn edit_similarity(reference: &str, candidate: &str) -> f64 {
    let max_len = reference.chars().count().max(candidate.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(reference, candidate);
    1.0 - distance as f64 / max_len as f64
}

/// Score `candidate` against `reference` and report which rule decided it.
pub fn explain(reference: &str, candidate: &str) -> Similarity {
    let reference = normalize(reference);
    let candidate = normalize(candidate);

    let exact = contains_all_tokens(&reference, &candidate);
    tracing::trace!(reference = %reference, candidate = %candidate, exact, "similarity");

    if exact {
        return Similarity {
            value: 1.0,
            rule: ScoreRule::TokenContainment,
        };
    }

    Similarity {
        value: edit_similarity(&reference, &candidate),
        rule: ScoreRule::EditDistance,
    }
}

/// Similarity of `candidate` to `reference` in `[0, 1]`.
pub fn score(reference: &str, candidate: &str) -> f64 {
    explain(reference, candidate).value
}
