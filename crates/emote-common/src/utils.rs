//! Shared utility functions.

/// Maximum length of a single chat message accepted by Discord.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Truncates a string to at most `max_chars` characters, ending with an
/// ellipsis when something was cut.
pub fn truncate_string(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Wraps text in a fenced code block.
///
/// Backticks inside the text are removed so the fence cannot be closed early.
pub fn code_block(input: &str) -> String {
    format!("```\n{}\n```", input.replace('`', ""))
}
