//! Client-side conversation filtering.
//!
//! Filtering is a pure function over the cached conversation list; it never
//! calls the server and never mutates the cache.

use super::model::Conversation;

/// Filters conversations by participant display name, case-insensitively.
///
/// `display_name` resolves a conversation to the name shown for its
/// counterpart; the match is a substring test on the lowercased forms.
/// A blank query returns the full list unchanged.
pub fn filter_by_participant<F>(
    conversations: &[Conversation],
    query: &str,
    display_name: F,
) -> Vec<Conversation>
where
    F: Fn(&Conversation) -> String,
{
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return conversations.to_vec();
    }

    conversations
        .iter()
        .filter(|conv| display_name(conv).to_lowercase().contains(&query))
        .cloned()
        .collect()
}
