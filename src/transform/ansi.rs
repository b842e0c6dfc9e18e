use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // CSI sequences (colors, cursor movement) and BEL terminated OSC sequences
    static ref ANSI_ESCAPE: Regex = Regex::new(
        r"[\x1b\x{9b}][\[\]()#;?]*(?:(?:(?:[a-zA-Z\d]*(?:;[a-zA-Z\d]*)*)?\x07)|(?:(?:\d{1,4}(?:;\d{0,4})*)?[\dA-PRZcf-ntqry=><~]))"
    )
    .expect("Invalid ANSI escape regex");
}

/// Remove ANSI color and control sequences written by `cdk diff`
pub fn strip_ansi(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_color_codes() {
        assert_eq!(strip_ansi("\u{1b}[32m[+]\u{1b}[39m"), "[+]");
        assert_eq!(strip_ansi("\u{1b}[31mhelloworld\u{1b}[39m"), "helloworld");
    }

    #[test]
    fn test_strip_bold_and_reset() {
        assert_eq!(
            strip_ansi("\u{1b}[1mStack\u{1b}[22m MyStack\u{1b}[0m"),
            "Stack MyStack"
        );
    }

    #[test]
    fn test_plain_text_untouched() {
        let text = "[~] AWS::S3::Bucket Bucket Bucket83908E77\n │ + │ x │";
        assert_eq!(strip_ansi(text), text);
    }
}
