//! Anchor-preserving content filter.
//!
//! Long captures often carry navigation chrome (sidebars, menus, history
//! lists) around the content the user cared about. The filter keeps the
//! first half of the text as an anchor and scores every later block against
//! keywords drawn from that anchor, dropping blocks that look like chrome.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

use crate::tokens::{tokenize, top_tokens};

/// Number of anchor keywords blocks are scored against.
pub const KEYWORD_COUNT: usize = 40;
/// Minimum score for a non-anchor block to be kept.
pub const KEEP_THRESHOLD: i32 = 4;

pub const KEYWORD_WEIGHT: i32 = 2;
pub const TAG_WEIGHT: i32 = 5;
pub const SHORT_LINES_PENALTY: i32 = 6;
pub const CHROME_PENALTY: i32 = 8;
pub const ROLE_MARKER_BONUS: i32 = 2;

/// Lines with at most this many tokens count as menu-like.
const SHORT_LINE_TOKENS: usize = 5;
/// Share of short lines at which a block is treated as a menu.
const SHORT_LINE_RATIO: f64 = 0.6;

static BLOCK_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n\s*\n+").unwrap());
static NEW_CHAT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^new chat$").unwrap());
static CHROME_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)history|extensions|apps|explore|settings").unwrap());
static ROLE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?im)^(user|assistant|model)[:\-]").unwrap());

/// Split text on blank lines into trimmed, non-empty blocks.
pub fn split_blocks(text: &str) -> Vec<&str> {
    BLOCK_SPLIT
        .split(text)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect()
}

/// Number of leading blocks forming the anchor.
///
/// Block lengths accumulate until they reach half of `total_chars`; the block
/// that crosses the line is part of the anchor. When the blocks never reach
/// it (heavy whitespace), every block is anchor.
pub fn anchor_len(blocks: &[&str], total_chars: usize) -> usize {
    let half = total_chars as f64 / 2.0;
    let mut acc = 0usize;
    for (i, &block) in blocks.iter().enumerate() {
        acc += block.chars().count();
        if acc as f64 >= half {
            return i + 1;
        }
    }
    blocks.len()
}

/// Scores blocks against anchor keywords and caller-supplied tags.
#[derive(Debug, Clone)]
pub struct BlockScorer {
    keywords: HashSet<String>,
    tags: Vec<String>,
}

impl BlockScorer {
    /// Build a scorer from anchor text and tags. Tags are lowercased; blank
    /// tags never match.
    pub fn new(anchor_text: &str, tags: &[String]) -> Self {
        let keywords = top_tokens(anchor_text, KEYWORD_COUNT).into_iter().collect();
        let mut seen = HashSet::new();
        let tags = tags
            .iter()
            .map(|t| t.to_lowercase())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();
        Self { keywords, tags }
    }

    pub fn keywords(&self) -> &HashSet<String> {
        &self.keywords
    }

    /// Relevance score of one block.
    pub fn score(&self, block: &str) -> i32 {
        let mut score = 0;

        let keyword_hits = tokenize(block)
            .iter()
            .filter(|t| self.keywords.contains(*t))
            .count() as i32;
        score += KEYWORD_WEIGHT * keyword_hits;

        let lower = block.to_lowercase();
        let tag_hits = self.tags.iter().filter(|t| lower.contains(t.as_str())).count() as i32;
        score += TAG_WEIGHT * tag_hits;

        if is_menu_like(block) {
            score -= SHORT_LINES_PENALTY;
        }
        if NEW_CHAT.is_match(block) || CHROME_WORDS.is_match(block) {
            score -= CHROME_PENALTY;
        }
        if ROLE_MARKER.is_match(block) {
            score += ROLE_MARKER_BONUS;
        }

        score
    }
}

/// Most lines of the block hold only a handful of tokens.
fn is_menu_like(block: &str) -> bool {
    let lines: Vec<&str> = block.split('\n').filter(|l| !l.is_empty()).collect();
    let short = lines
        .iter()
        .filter(|l| tokenize(l).len() <= SHORT_LINE_TOKENS)
        .count();
    let needed = ((lines.len() as f64 * SHORT_LINE_RATIO).floor() as usize).max(1);
    short >= needed
}

/// Prune likely-irrelevant blocks while keeping the first half verbatim.
///
/// Blank input is returned unchanged. Otherwise the output is the anchor
/// blocks plus every later block scoring at least [`KEEP_THRESHOLD`], in
/// original order, with consecutive duplicates collapsed and blocks joined
/// by a blank line.
pub fn filter_by_first_half(text: &str, tags: &[String]) -> String {
    if text.trim().is_empty() {
        return text.to_string();
    }

    let blocks = split_blocks(text);
    let anchor = anchor_len(&blocks, text.chars().count());
    let scorer = BlockScorer::new(&blocks[..anchor].join("\n\n"), tags);

    let mut kept: Vec<&str> = Vec::with_capacity(blocks.len());
    for (i, &block) in blocks.iter().enumerate() {
        if i < anchor {
            kept.push(block);
            continue;
        }
        let score = scorer.score(block);
        trace!(block = i, score, "block scored");
        if score >= KEEP_THRESHOLD {
            kept.push(block);
        }
    }
    kept.dedup();

    debug!(
        subsystem = "filter",
        block_count = blocks.len(),
        anchor_blocks = anchor,
        kept_blocks = kept.len(),
        "content filtered"
    );

    kept.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_split_blocks() {
        assert_eq!(
            split_blocks("  one\n\n two \n \n\nthree\n"),
            vec!["one", "two", "three"]
        );
        assert_eq!(split_blocks("single\nline break"), vec!["single\nline break"]);
    }

    #[test]
    fn test_anchor_len() {
        // 10 + 10 of 24 total: the first block alone does not reach 12
        assert_eq!(anchor_len(&["aaaaaaaaaa", "bbbbbbbbbb"], 24), 2);
        assert_eq!(anchor_len(&["aaaaaaaaaaaaaa", "bbbb"], 20), 1);
        assert_eq!(anchor_len(&["a"], 100), 1);
        assert_eq!(anchor_len(&[], 0), 0);
    }

    #[test]
    fn test_blank_text_returned_unchanged() {
        assert_eq!(filter_by_first_half("", &[]), "");
        assert_eq!(filter_by_first_half(" \n\n ", &[]), " \n\n ");
    }

    #[test]
    fn test_keyword_scoring() {
        let scorer = BlockScorer::new("database migration database rollback", &[]);
        // two keyword occurrences, one long line (not menu-like)
        let block = "We planned the database migration carefully over several long weeks";
        assert_eq!(scorer.score(block), 2 * KEYWORD_WEIGHT);
    }

    #[test]
    fn test_tag_scoring_counts_each_tag_once() {
        let scorer = BlockScorer::new("", &tags(&["Rust", "rust", "", "tokio"]));
        let block = "rust rust and tokio are mentioned in a fairly long line of prose here";
        assert_eq!(scorer.score(block), 2 * TAG_WEIGHT);
    }

    #[test]
    fn test_menu_penalty() {
        let scorer = BlockScorer::new("", &[]);
        assert_eq!(scorer.score("Home\nAbout\nContact"), -SHORT_LINES_PENALTY);
    }

    #[test]
    fn test_chrome_penalty() {
        let scorer = BlockScorer::new("", &[]);
        assert_eq!(
            scorer.score("New chat"),
            -SHORT_LINES_PENALTY - CHROME_PENALTY
        );
        let long = "Open your browser Settings page and scroll down to find the sync option";
        assert_eq!(scorer.score(long), -CHROME_PENALTY);
    }

    #[test]
    fn test_role_marker_bonus() {
        let scorer = BlockScorer::new("", &[]);
        let block = "intro line that is long enough to avoid penalties here\nAssistant: here is a longer answer line for you";
        assert_eq!(scorer.score(block), ROLE_MARKER_BONUS);
    }

    #[test]
    fn test_anchor_kept_and_chrome_dropped() {
        let anchor = "Rust ownership rules explain how memory is managed without a garbage \
                      collector. Ownership, borrowing and lifetimes work together.";
        let text = format!("{anchor}\n\nHistory\nSettings\nExplore apps");
        assert_eq!(filter_by_first_half(&text, &[]), anchor);
    }

    #[test]
    fn test_low_scoring_block_dropped_then_rescued_by_tag() {
        let anchor = "Quarterly planning notes for the platform team covering hiring budgets \
                      and the roadmap for next year in considerable detail.";
        let tail = "Remember to water the office plants every Friday afternoon";
        let text = format!("{anchor}\n\n{tail}");

        assert_eq!(filter_by_first_half(&text, &[]), anchor);

        let kept = filter_by_first_half(&text, &tags(&["plants"]));
        assert_eq!(kept, format!("{anchor}\n\n{tail}"));
    }

    #[test]
    fn test_consecutive_duplicates_collapsed() {
        let text = "same block\n\nsame block\n\nsame block";
        assert_eq!(filter_by_first_half(text, &[]), "same block");
    }
}
