//! Transcript cleanup ahead of annotation.
//!
//! The annotators choke on typographic punctuation and lose precision on
//! contracted or disfluent speech, so transcripts are cleaned before
//! either server sees them. The graph itself keeps the original
//! transcript; only the annotators receive the cleaned form.

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use std::collections::BTreeMap;

/// Run the full cleanup: typographic characters first, since the later
/// passes cannot match against them, then contraction expansion,
/// interjection removal, aside removal, and whitespace normalization.
pub fn clean_transcript(text: &str) -> String {
    let cleaned = replace_problematic_characters(text);
    let cleaned = expand_contractions(&cleaned);
    let cleaned = remove_interjections(&cleaned);
    let cleaned = remove_irrelevant_text(&cleaned);
    let cleaned = cleaned.trim().to_string();
    tracing::debug!(original = text.len(), cleaned = cleaned.len(), "cleaned transcript");
    cleaned
}

/// Replace typographic characters with their plain ASCII forms, e.g.
/// curly apostrophes with straight ones.
pub fn replace_problematic_characters(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2019}' | '\u{2018}' | '\u{201a}' | '\u{00b4}' | '`' => cleaned.push('\''),
            '\u{201c}' | '\u{201d}' | '\u{201e}' => cleaned.push('"'),
            '\u{2013}' | '\u{2014}' | '\u{2015}' => cleaned.push('-'),
            '\u{2026}' => cleaned.push_str("..."),
            '\u{00a0}' | '\u{200b}' | '\u{feff}' => cleaned.push(' '),
            _ => cleaned.push(c),
        }
    }
    cleaned
}

/// Expand contractions ("it's" to "it is") so the parsers see full
/// words. Matching is case-insensitive and the expansion keeps a leading
/// capital.
pub fn expand_contractions(text: &str) -> String {
    lazy_static! {
        static ref TABLE: BTreeMap<&'static str, &'static str> = [
            ("ain't", "is not"),
            ("aren't", "are not"),
            ("can't", "cannot"),
            ("couldn't", "could not"),
            ("didn't", "did not"),
            ("doesn't", "does not"),
            ("don't", "do not"),
            ("hadn't", "had not"),
            ("hasn't", "has not"),
            ("haven't", "have not"),
            ("he'd", "he would"),
            ("he'll", "he will"),
            ("he's", "he is"),
            ("here's", "here is"),
            ("i'd", "i would"),
            ("i'll", "i will"),
            ("i'm", "i am"),
            ("i've", "i have"),
            ("isn't", "is not"),
            ("it'll", "it will"),
            ("it's", "it is"),
            ("let's", "let us"),
            ("mightn't", "might not"),
            ("mustn't", "must not"),
            ("needn't", "need not"),
            ("she'd", "she would"),
            ("she'll", "she will"),
            ("she's", "she is"),
            ("shouldn't", "should not"),
            ("that'll", "that will"),
            ("that's", "that is"),
            ("there's", "there is"),
            ("they'd", "they would"),
            ("they'll", "they will"),
            ("they're", "they are"),
            ("they've", "they have"),
            ("wasn't", "was not"),
            ("we'd", "we would"),
            ("we'll", "we will"),
            ("we're", "we are"),
            ("we've", "we have"),
            ("weren't", "were not"),
            ("what's", "what is"),
            ("where's", "where is"),
            ("who's", "who is"),
            ("won't", "will not"),
            ("wouldn't", "would not"),
            ("you'd", "you would"),
            ("you'll", "you will"),
            ("you're", "you are"),
            ("you've", "you have"),
        ]
        .into_iter()
        .collect();
        static ref CONTRACTION: Regex = {
            let mut keys: Vec<&str> = TABLE.keys().copied().collect();
            keys.sort_by_key(|k| std::cmp::Reverse(k.len()));
            let alternation = keys
                .iter()
                .map(|k| regex::escape(k))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
        };
    }

    CONTRACTION
        .replace_all(text, |caps: &Captures<'_>| {
            let found = &caps[0];
            let expansion = TABLE[found.to_lowercase().as_str()];
            preserve_leading_case(found, expansion)
        })
        .into_owned()
}

/// Remove filler interjections ("um", "uhm", "mm") and tidy the
/// punctuation they leave behind. A filler contracted with 's ("um's")
/// expands to "um is" first, so the removal leaves no dangling 's.
pub fn remove_interjections(text: &str) -> String {
    const FILLERS: &str = "uh-huh|mhm|um+|uh+m*|er+m*|hm+|mm+|ah+|eh+|ooh";
    lazy_static! {
        static ref INTERJECTION: Regex =
            Regex::new(&format!(r"(?i)\b(?:{FILLERS})\b")).unwrap();
        static ref CONTRACTED_FILLER: Regex =
            Regex::new(&format!(r"(?i)\b({FILLERS})'s\b")).unwrap();
    }
    let expanded = CONTRACTED_FILLER.replace_all(text, "${1} is");
    tidy_punctuation(&INTERJECTION.replace_all(&expanded, ""))
}

/// Remove transcriber asides: anything in square brackets, and
/// parenthesized annotation markers like "(inaudible)" or "(laughs)".
/// Parenthesized speech is left alone.
pub fn remove_irrelevant_text(text: &str) -> String {
    lazy_static! {
        static ref BRACKETED: Regex = Regex::new(r"\[[^\]]*\]").unwrap();
        static ref PAREN_MARKER: Regex = Regex::new(
            r"(?i)\((?:inaudible|unintelligible|laughs?|laughter|coughs?|sighs?|pause|crosstalk)\)"
        )
        .unwrap();
    }
    let stripped = BRACKETED.replace_all(text, " ");
    let stripped = PAREN_MARKER.replace_all(&stripped, " ");
    tidy_punctuation(&stripped)
}

fn preserve_leading_case(found: &str, expansion: &str) -> String {
    let starts_upper = found.chars().next().is_some_and(|c| c.is_uppercase());
    if !starts_upper {
        return expansion.to_string();
    }
    let mut chars = expansion.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Collapse whitespace and repair punctuation orphaned by a removal,
/// e.g. "ran . , and" becomes "ran. and".
fn tidy_punctuation(text: &str) -> String {
    lazy_static! {
        static ref SPACE_BEFORE_PUNCT: Regex = Regex::new(r"\s+([.,;:!?])").unwrap();
        static ref PUNCT_THEN_COMMA: Regex = Regex::new(r"([.;:!?])(\s*,)+").unwrap();
        static ref REPEATED_COMMA: Regex = Regex::new(r",(\s*,)+").unwrap();
        static ref LEADING_PUNCT: Regex = Regex::new(r"^[\s,;:]+").unwrap();
    }
    let tidied = SPACE_BEFORE_PUNCT.replace_all(text, "$1");
    let tidied = PUNCT_THEN_COMMA.replace_all(&tidied, "$1");
    let tidied = REPEATED_COMMA.replace_all(&tidied, ",");
    let tidied = LEADING_PUNCT.replace_all(&tidied, "");
    tidied.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_typographic_characters() {
        assert_eq!(replace_problematic_characters("it\u{2019}s"), "it's");
        assert_eq!(
            replace_problematic_characters("\u{201c}fine\u{201d} \u{2014} sure\u{2026}"),
            "\"fine\" - sure..."
        );
    }

    #[test]
    fn test_expands_contractions_preserving_case() {
        assert_eq!(expand_contractions("It's fine"), "It is fine");
        assert_eq!(
            expand_contractions("they won't and she can't"),
            "they will not and she cannot"
        );
        assert_eq!(expand_contractions("Don't!"), "Do not!");
    }

    #[test]
    fn test_contractions_match_whole_words_only() {
        assert_eq!(expand_contractions("its fur"), "its fur");
        assert_eq!(expand_contractions("whats-it"), "whats-it");
    }

    #[test]
    fn test_removes_interjections_and_tidies_punctuation() {
        assert_eq!(
            remove_interjections("Um, the dog ran, uh, fast."),
            "the dog ran, fast."
        );
        assert_eq!(remove_interjections("He was, hmm, tired."), "He was, tired.");
    }

    #[test]
    fn test_removes_uhm_and_stretched_fillers() {
        assert_eq!(remove_interjections("Uhm, the dog ran."), "the dog ran.");
        assert_eq!(remove_interjections("Uhmm, sure, uhh, fine."), "sure, fine.");
    }

    #[test]
    fn test_contracted_fillers_leave_no_dangling_s() {
        assert_eq!(remove_interjections("Um's the word."), "is the word.");
        assert_eq!(remove_interjections("Uhm's fine, I guess."), "is fine, I guess.");
    }

    #[test]
    fn test_interjections_do_not_eat_real_words() {
        assert_eq!(remove_interjections("the umbrella"), "the umbrella");
        assert_eq!(remove_interjections("in summer"), "in summer");
    }

    #[test]
    fn test_removes_bracketed_asides() {
        assert_eq!(
            remove_irrelevant_text("the dog [laughs] ran (inaudible) home"),
            "the dog ran home"
        );
        assert_eq!(
            remove_irrelevant_text("she said (quietly) hello"),
            "she said (quietly) hello",
            "parenthesized speech stays"
        );
    }

    #[test]
    fn test_clean_transcript_composes_all_passes() {
        let raw = "Um, it\u{2019}s  a dog [coughs] and he won\u{2019}t stop.";
        assert_eq!(
            clean_transcript(raw),
            "it is a dog and he will not stop."
        );
    }
}
