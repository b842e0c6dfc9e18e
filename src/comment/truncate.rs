/// Appended to a comment that had to be cut to fit the provider limit
pub const TRUNCATION_WARNING: &str =
    "\n```\n\n**Warning**: Output was truncated because it exceeds the maximum comment length.";

/// Cut `content` so that it fits into `max_length` characters
///
/// Content that fits is returned untouched. Otherwise it is cut at a
/// character boundary to `max_length - len(TRUNCATION_WARNING)` characters
/// and the warning is appended, so the result is exactly `max_length`
/// characters long.
pub fn truncate(content: &str, max_length: usize) -> String {
    let warning_length = TRUNCATION_WARNING.chars().count();
    let limit = max_length.saturating_sub(warning_length);

    let Some((cut, _)) = content.char_indices().nth(limit) else {
        return content.to_string();
    };

    tracing::warn!(
        max_length,
        "Comment exceeds the maximum length and will be truncated"
    );

    let mut truncated = String::with_capacity(cut + TRUNCATION_WARNING.len());
    truncated.push_str(&content[..cut]);
    truncated.push_str(TRUNCATION_WARNING);
    truncated
}
