//! On-demand fuzzy search over a conversation's messages.
//!
//! Rebuilt per query — no incremental index maintenance at this data
//! scale. Only the `content` field is matched.

use std::cmp::Ordering;
use widget_types::message::Message;

/// Minimum relevance for a message to count as a match
pub const MATCH_THRESHOLD: f64 = 0.7;

/// Filter a message sequence by an approximate-match query.
///
/// An empty (or whitespace) query returns the identity sequence. Matches
/// are ordered by descending relevance; insertion order is preserved among
/// equal scores.
pub fn filter_messages(messages: &[Message], query: &str) -> Vec<Message> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return messages.to_vec();
    }

    let mut scored: Vec<(f64, &Message)> = messages
        .iter()
        .filter_map(|m| {
            let score = relevance(&m.content, &query);
            (score >= MATCH_THRESHOLD).then_some((score, m))
        })
        .collect();

    // sort_by is stable, so ties keep insertion order
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
    scored.into_iter().map(|(_, m)| m.clone()).collect()
}

/// Relevance of a message body for a lowercased query: 1.0 for a substring
/// hit, otherwise the mean over query tokens of the best Jaro-Winkler
/// similarity against the content's tokens.
fn relevance(content: &str, query: &str) -> f64 {
    let content = content.to_lowercase();
    if content.contains(query) {
        return 1.0;
    }

    let content_tokens = tokenize(&content);
    if content_tokens.is_empty() {
        return 0.0;
    }

    let query_tokens = tokenize(query);
    if query_tokens.is_empty() {
        return 0.0;
    }

    let sum: f64 = query_tokens
        .iter()
        .map(|q| {
            content_tokens
                .iter()
                .map(|c| strsim::jaro_winkler(c, q))
                .fold(0.0f64, f64::max)
        })
        .sum();
    sum / query_tokens.len() as f64
}

fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect()
}
