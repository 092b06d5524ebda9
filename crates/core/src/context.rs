use crate::models::{ConversationTurn, Role};

pub const DEFAULT_CONTEXT_TURNS: usize = 3;

/// Messages longer than this are treated as self-contained questions.
const MAX_FOLLOW_UP_WORDS: usize = 5;

/// Prefixes a short follow-up with the most recent user turns so it inherits their topic.
pub fn build_contextual_query(
    current_message: &str,
    history: &[ConversationTurn],
    max_turns: usize,
) -> String {
    if history.is_empty() || current_message.split_whitespace().count() > MAX_FOLLOW_UP_WORDS {
        return current_message.to_string();
    }

    let user_turns: Vec<&str> = history
        .iter()
        .filter(|turn| turn.role == Role::User)
        .map(|turn| turn.content.as_str())
        .collect();
    let recent = &user_turns[user_turns.len().saturating_sub(max_turns)..];

    if recent.is_empty() {
        return current_message.to_string();
    }

    let mut parts = recent.to_vec();
    parts.push(current_message);
    parts.join(" ")
}
