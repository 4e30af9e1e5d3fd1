//! Token statistics shared by the content filter and the ranker.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Words excluded from keyword extraction.
pub const STOP_WORDS: &[&str] = &[
    "the", "and", "for", "that", "with", "this", "you", "are", "was", "from", "have", "has", "not",
    "but", "all", "any", "can", "your", "our", "use", "using", "will", "into", "about", "over",
    "under", "more", "less", "than", "then", "when", "what", "why", "how", "they", "them", "their",
    "there", "here", "who", "which", "also", "like", "just", "onto", "out", "in", "on", "to", "of",
    "a", "an", "as", "is", "it", "be", "or", "if", "at", "by", "we", "i",
];

static STOP_SET: Lazy<HashSet<&'static str>> = Lazy::new(|| STOP_WORDS.iter().copied().collect());

/// Lowercased ASCII alphanumeric runs, any length.
///
/// Non-ASCII letters act as separators.
pub fn word_runs(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_ascii_lowercase)
}

/// Lowercased ASCII alphanumeric runs longer than two characters.
pub fn tokenize(text: &str) -> Vec<String> {
    word_runs(text).filter(|w| w.len() > 2).collect()
}

/// Distinct query tokens, keeping single- and two-character words.
pub fn query_tokens(query: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    word_runs(query).filter(|w| seen.insert(w.clone())).collect()
}

/// The `max` most frequent non-stop-word tokens of `text`.
///
/// Ties keep first-occurrence order.
pub fn top_tokens(text: &str, max: usize) -> Vec<String> {
    let mut order: Vec<String> = Vec::new();
    let mut freq: HashMap<String, usize> = HashMap::new();

    for token in tokenize(text) {
        if STOP_SET.contains(token.as_str()) {
            continue;
        }
        let count = freq.entry(token.clone()).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    // stable: equal counts stay in first-seen order
    order.sort_by(|a, b| freq[b].cmp(&freq[a]));
    order.truncate(max);
    order
}
