//! Noise filter: strip engine diagnostic lines from raw output.
//!
//! At least one conversion engine prints internal diagnostics on its
//! primary output stream, interleaved with the converted document and with
//! no separator. Two line shapes cover what it emits:
//!
//! - length reports such as `len(pages)=1, 0-0` or `len(valid_pages)=1`
//! - bare numeric range lists such as `0-0` or `1, 2-3`
//!
//! There is no structural marker distinguishing these from content, only
//! the syntax. A legitimate content line that happens to match one of the
//! patterns is indistinguishable from noise and WILL be dropped — that is
//! an accepted false positive of a best-effort heuristic, not a bug.

use once_cell::sync::Lazy;
use regex::Regex;

/// `len(...)=` length reports, anchored at the start of the trimmed line.
static RE_LENGTH_REPORT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^len\([^)]+\)=").unwrap());

/// Lines that are nothing but comma-separated numeric range tokens.
static RE_RANGE_TOKENS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+(-\d+)?(,\s*\d+(-\d+)?)*\s*$").unwrap());

/// True when a line (after trimming) matches one of the noise patterns.
pub fn is_noise_line(line: &str) -> bool {
    let trimmed = line.trim();
    RE_LENGTH_REPORT.is_match(trimmed) || RE_RANGE_TOKENS.is_match(trimmed)
}

/// Remove noise lines, preserving the relative order and original bytes of
/// every kept line.
///
/// The match is tested against the trimmed line only; kept lines keep their
/// original leading/trailing whitespace. Blank lines that end up leading
/// the document once the noise is gone are removed as well — the engine
/// prints its diagnostics before any content, so dropping them routinely
/// exposes a blank prologue.
pub fn strip_noise_lines(input: &str) -> String {
    let mut lines: Vec<&str> = input
        .split('\n')
        .filter(|line| !is_noise_line(line))
        .collect();

    let leading_blanks = lines
        .iter()
        .take_while(|line| line.trim().is_empty())
        .count();
    // A trailing "" from a final newline is a line terminator, not a blank
    // prologue; keep it when it is all that remains.
    if leading_blanks < lines.len() {
        lines.drain(..leading_blanks);
    } else {
        lines.clear();
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_passes_through_unchanged() {
        let input = "# Title\n\nSome paragraph with numbers 1-2 inline.\nAnother line.\n";
        assert_eq!(strip_noise_lines(input), input);
    }

    #[test]
    fn drops_length_reports_and_range_lines() {
        let input = "len(pages)=1, 0-0\nReal content\n1, 2-3\n";
        assert_eq!(strip_noise_lines(input), "Real content\n");
    }

    #[test]
    fn matches_trimmed_lines_but_keeps_original_whitespace() {
        let input = "  len(valid_pages)=1\n  indented content  \n\t0-0\n";
        assert_eq!(strip_noise_lines(input), "  indented content  \n");
    }

    #[test]
    fn removes_blank_lines_exposed_at_the_top() {
        let input = "len(pages)=3\n\n\n# Heading\nbody\n";
        assert_eq!(strip_noise_lines(input), "# Heading\nbody\n");
    }

    #[test]
    fn all_noise_yields_empty() {
        assert_eq!(strip_noise_lines("len(x)=2\n0-0\n1, 2-3\n"), "");
        assert_eq!(strip_noise_lines(""), "");
    }

    #[test]
    fn range_pattern_requires_whole_line() {
        // Ranges embedded in prose are content, not noise.
        assert!(!is_noise_line("pages 1-3 cover the intro"));
        assert!(is_noise_line("1-3"));
        assert!(is_noise_line(" 0-0, 4, 7-9 "));
        assert!(!is_noise_line("1-3,"));
    }

    #[test]
    fn accepted_false_positive_is_dropped() {
        // A legitimate content line shaped like a range list is
        // indistinguishable from noise; the heuristic drops it.
        let input = "Chapter ranges:\n1-10\nEnd.\n";
        assert_eq!(strip_noise_lines(input), "Chapter ranges:\nEnd.\n");
    }
}
