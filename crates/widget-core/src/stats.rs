//! Pure statistics derivation over a message sequence.

use chrono::DateTime;
use widget_types::conversation::ConversationStats;
use widget_types::message::{Message, Role};

/// Derive aggregate statistics for a conversation.
///
/// The average response time is the mean timestamp delta over adjacent
/// (user, assistant) pairs, in milliseconds, 0 when no such pair exists.
pub fn compute(messages: &[Message]) -> ConversationStats {
    let user_message_count = messages.iter().filter(|m| m.role == Role::User).count();
    let assistant_message_count = messages.len() - user_message_count;

    let mut total_ms = 0.0;
    let mut pair_count = 0u32;
    for pair in messages.windows(2) {
        if pair[0].role == Role::User && pair[1].role == Role::Assistant {
            pair_count += 1;
            total_ms += response_millis(&pair[0].timestamp, &pair[1].timestamp);
        }
    }

    ConversationStats {
        message_count: messages.len(),
        user_message_count,
        assistant_message_count,
        average_response_time: if pair_count > 0 {
            total_ms / pair_count as f64
        } else {
            0.0
        },
        last_active: messages.last().map(|m| m.timestamp.clone()),
    }
}

/// Elapsed milliseconds between a user message and its reply.
/// Unparsable timestamps and negative deltas (clock skew) contribute 0
/// instead of failing the whole computation.
fn response_millis(user_ts: &str, assistant_ts: &str) -> f64 {
    match (
        DateTime::parse_from_rfc3339(user_ts),
        DateTime::parse_from_rfc3339(assistant_ts),
    ) {
        (Ok(user), Ok(assistant)) => (assistant - user).num_milliseconds().max(0) as f64,
        _ => 0.0,
    }
}
