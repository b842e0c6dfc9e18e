use crate::error::{NotifierError, NotifierResult};
use crate::provider::header_tag_id;

/// Appended to every chunk that is followed by another one
pub const SEP_FOOTER: &str = "\n```\n</details>\n<br>\n\n**Warning**: Output length greater than max comment size. Continued in next comment.";

const SEP_HEADER: &str =
    "Continued from previous comment.\n<details><summary>Show Output</summary>\n\n```diff\n";

/// Prepended to every chunk that follows another one
///
/// Starts with the comment header so every chunk can be found by tag id.
pub fn sep_header_id(tag_id: &str) -> String {
    format!("{}\n{}", header_tag_id(tag_id), SEP_HEADER)
}

/// Split a comment into chunks of at most `max_size` characters
///
/// Every chunk except the last gets `sep_end` appended and every chunk except
/// the first gets `sep_start` prepended. Chunk boundaries are character based
/// and may fall in the middle of a line.
pub fn split_comment(
    comment: &str,
    max_size: usize,
    sep_end: &str,
    sep_start: &str,
) -> NotifierResult<Vec<String>> {
    let chars: Vec<char> = comment.chars().collect();
    if chars.len() <= max_size {
        return Ok(vec![comment.to_string()]);
    }

    let separators_len = sep_end.chars().count() + sep_start.chars().count();
    let chunk_size = max_size.saturating_sub(separators_len);
    if chunk_size == 0 {
        return Err(NotifierError::CommentBudget {
            max_size,
            separators_len,
        });
    }

    let count = chars.len().div_ceil(chunk_size);
    tracing::info!(count, max_size, "Splitting comment into multiple comments");

    let comments = chars
        .chunks(chunk_size)
        .enumerate()
        .map(|(i, chunk)| {
            let mut portion = String::new();
            if i > 0 {
                portion.push_str(sep_start);
            }
            portion.extend(chunk);
            if i < count - 1 {
                portion.push_str(sep_end);
            }
            portion
        })
        .collect();

    Ok(comments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_comment_is_single_chunk() {
        let result = split_comment("short", 100, "<end>", "<start>").unwrap();
        assert_eq!(result, vec!["short".to_string()]);
    }

    #[test]
    fn test_split_adds_separators() {
        // 20 chars, budget of 5 chars per chunk next to 3 + 2 separator chars
        let comment = "abcdefghijklmnopqrst";
        let result = split_comment(comment, 10, "END", "ST").unwrap();

        assert_eq!(
            result,
            vec![
                "abcdeEND".to_string(),
                "STfghijEND".to_string(),
                "STklmnoEND".to_string(),
                "STpqrst".to_string(),
            ]
        );
    }

    #[test]
    fn test_chunks_fit_and_round_trip() {
        let comment = "line ✨ with some content\n".repeat(200);
        let sep_start = sep_header_id("my-stack");
        let max_size = 700;

        let chunks = split_comment(&comment, max_size, SEP_FOOTER, &sep_start).unwrap();

        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.chars().count() <= max_size));
        assert!(!chunks[0].starts_with(&sep_start));
        assert!(!chunks.last().unwrap().ends_with(SEP_FOOTER));

        let restored: String = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                let chunk = if i > 0 {
                    chunk.strip_prefix(sep_start.as_str()).unwrap()
                } else {
                    chunk.as_str()
                };
                if i < chunks.len() - 1 {
                    chunk.strip_suffix(SEP_FOOTER).unwrap()
                } else {
                    chunk
                }
            })
            .collect();
        assert_eq!(restored, comment);
    }

    #[test]
    fn test_budget_too_small() {
        let result = split_comment(&"x".repeat(50), 10, "123456", "7890");
        assert!(matches!(
            result,
            Err(NotifierError::CommentBudget {
                max_size: 10,
                separators_len: 10
            })
        ));
    }

    #[test]
    fn test_sep_header_contains_tag() {
        let header = sep_header_id("api");
        assert!(header.starts_with("## cdk diff for api\n"));
        assert!(header.ends_with("```diff\n"));
    }
}
