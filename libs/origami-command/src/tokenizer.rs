//! # Tokenizer
//!
//! The command language is flat: statements separated by `)`, `;` or a
//! newline, words separated by whitespace, line comments starting with
//! `//`. The tokenizer strips comments, rewrites every statement separator
//! into an explicit [`EOC`] marker, and splits on whitespace.

/// The end-of-command marker token.
pub const EOC: &str = "eoc";

/// Tokenizes a command string into a flat token queue.
///
/// # Example
///
/// ```rust
/// use origami_command::tokenize;
///
/// let tokens = tokenize("d 400 400 // a sheet\nr 0 90 2)");
/// assert_eq!(
///     tokens,
///     vec!["d", "400", "400", "eoc", "r", "0", "90", "2", "eoc"]
/// );
/// ```
pub fn tokenize(input: &str) -> Vec<String> {
    let stripped: Vec<&str> = input
        .lines()
        .map(|line| line.split("//").next().unwrap_or(""))
        .collect();
    stripped
        .join(" eoc ")
        .replace(')', " eoc ")
        .replace(';', " eoc ")
        .split_whitespace()
        .map(str::to_owned)
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_splitting() {
        assert_eq!(tokenize("r  0   90 \t 2"), vec!["r", "0", "90", "2"]);
    }

    #[test]
    fn test_separators_become_eoc() {
        assert_eq!(
            tokenize("a; b) c\nd"),
            vec!["a", "eoc", "b", "eoc", "c", "eoc", "d"]
        );
    }

    #[test]
    fn test_comments_are_stripped_to_end_of_line() {
        assert_eq!(
            tokenize("d 400 400 // define the sheet\nc3d 0 1"),
            vec!["d", "400", "400", "eoc", "c3d", "0", "1"]
        );
    }

    #[test]
    fn test_comment_only_line_leaves_just_the_separator() {
        assert_eq!(tokenize("// nothing here\nu"), vec!["eoc", "u"]);
    }

    #[test]
    fn test_mixed_script_token_count() {
        // Multi-line script with comments, semicolons and a trailing `)`
        let script = "\
d -200 -200 200 200 // unit sheet
c3d 0 1; c2d 0 3
t 1000 r 6 90 1 2)";
        let tokens = tokenize(script);
        assert_eq!(tokens.len(), 22);
        assert_eq!(tokens.iter().filter(|t| *t == EOC).count(), 4);
        assert_eq!(tokens.last().map(String::as_str), Some(EOC));
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }
}
