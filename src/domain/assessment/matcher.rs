//! Transcript-to-option matching
//!
//! Maps a free-text transcript onto the closest option by token overlap.
//! A token counts for an option when it appears anywhere inside the
//! option's lower-cased text, so partial words match too. Short tokens
//! can therefore hit options they share letters with; that looseness is
//! deliberate and pinned by tests, since spoken answers rarely repeat an
//! option verbatim.

/// Pick the option best matching the transcript.
///
/// Always returns a valid index into `options`: the first index with the
/// strictly highest token score, or 0 when nothing matches. Ties break
/// toward the lower index because only a strictly greater score replaces
/// the current best.
pub fn best_match<S: AsRef<str>>(transcript: &str, options: &[S]) -> usize {
    let transcript = transcript.to_lowercase();
    let tokens: Vec<&str> = transcript.split_whitespace().collect();

    let mut best_index = 0;
    let mut highest_score = 0usize;

    for (index, option) in options.iter().enumerate() {
        let option = option.as_ref().to_lowercase();
        let score = tokens.iter().filter(|token| option.contains(**token)).count();
        if score > highest_score {
            highest_score = score;
            best_index = index;
        }
    }

    best_index
}

#[cfg(test)]
mod tests {
    use super::*;

    fn security_options() -> Vec<&'static str> {
        vec![
            "Protecting systems and finding security vulnerabilities",
            "Creating visual designs",
            "Analyzing data",
            "Building hardware",
        ]
    }

    #[test]
    fn two_token_overlap_wins() {
        assert_eq!(best_match("security protect", &security_options()), 0);
    }

    #[test]
    fn zero_overlap_defaults_to_first() {
        assert_eq!(best_match("xylophone quartz", &security_options()), 0);
    }

    #[test]
    fn empty_transcript_defaults_to_first() {
        assert_eq!(best_match("", &security_options()), 0);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(best_match("SECURITY Protect", &security_options()), 0);
    }

    #[test]
    fn partial_words_count() {
        // "analyz" is a substring of "analyzing"
        assert_eq!(best_match("analyz", &security_options()), 2);
    }

    #[test]
    fn ties_resolve_to_lower_index() {
        let options = vec!["red apple", "green apple"];
        assert_eq!(best_match("apple", &options), 0);
    }

    #[test]
    fn higher_score_beats_earlier_option() {
        let options = vec!["data", "data patterns and predictions"];
        assert_eq!(best_match("data patterns", &options), 1);
    }

    #[test]
    fn short_token_looseness_is_preserved() {
        // A one-letter token matches any option containing that letter;
        // the first such option wins
        let options = vec!["bbb", "aaa"];
        assert_eq!(best_match("a", &options), 1);
        assert_eq!(best_match("b", &options), 0);
    }

    #[test]
    fn empty_options_yield_zero() {
        let options: Vec<&str> = vec![];
        assert_eq!(best_match("anything", &options), 0);
    }
}
