//! Final cosmetic pass over the selected candidate: name casing, sentence
//! capitalization and terminal punctuation.

use crate::normalizer::{is_edge_punctuation, TranscriptionNormalizer};
use crate::resources::NameLexicon;

/// First words that turn a sentence into a question.
pub const QUESTION_WORDS: &[&str] = &[
    "can", "shall", "will", "could", "would", "is", "are", "do", "does", "did", "should", "what",
    "where", "when", "why", "who", "how",
];

pub struct Postformatter {
    lexicon: NameLexicon,
}

impl Postformatter {
    pub fn new(lexicon: NameLexicon) -> Self {
        Self { lexicon }
    }

    fn format_token(&self, token: &str) -> String {
        if token.contains('@') {
            return token.to_string();
        }

        let lowered = token.to_lowercase();
        if self
            .lexicon
            .contains_folded(lowered.trim_matches(is_edge_punctuation))
        {
            capitalize(token)
        } else {
            token.to_string()
        }
    }

    pub fn format(&self, text: &str) -> String {
        let joined = text
            .split_whitespace()
            .map(|token| self.format_token(token))
            .collect::<Vec<_>>()
            .join(" ");

        let trimmed = joined.trim();
        if trimmed.is_empty() {
            return ".".to_string();
        }

        let mut sentence = uppercase_first(trimmed);
        if sentence.ends_with(&['?', '.', ','][..]) {
            return sentence;
        }

        let lowered = sentence.to_lowercase();
        let first_word = lowered.split_whitespace().next().unwrap_or("");
        if QUESTION_WORDS.contains(&first_word) {
            sentence.push('?');
        } else {
            sentence.push('.');
        }
        sentence
    }
}

impl TranscriptionNormalizer for Postformatter {
    fn normalize(&self, text: &str) -> String {
        self.format(text)
    }

    fn name(&self) -> &'static str {
        "Postformatter"
    }
}

/// Upper-case the first character and lower-case the rest.
fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Upper-case the first character, leaving the rest untouched.
fn uppercase_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(names: &[&str]) -> Postformatter {
        Postformatter::new(NameLexicon::from_names(names.iter().map(|n| n.to_string())))
    }

    #[test]
    fn test_empty_input_is_a_period() {
        let f = formatter(&[]);
        assert_eq!(f.format(""), ".");
        assert_eq!(f.format("   "), ".");
    }

    #[test]
    fn test_names_are_capitalized() {
        let f = formatter(&["Alok"]);
        assert_eq!(f.format("i met alok today"), "I met Alok today.");
        assert_eq!(f.format("thanks ALOK!"), "Thanks Alok!.");
    }

    #[test]
    fn test_emails_are_untouched() {
        let f = formatter(&["Alok"]);
        assert_eq!(
            f.format("mail alok@gmail.com and alok."),
            "Mail alok@gmail.com and Alok."
        );
    }

    #[test]
    fn test_question_words_get_question_mark() {
        let f = formatter(&[]);
        assert_eq!(f.format("can you call me"), "Can you call me?");
        assert_eq!(f.format("How is it going"), "How is it going?");
        assert_eq!(f.format("please call me"), "Please call me.");
    }

    #[test]
    fn test_existing_terminal_punctuation_is_kept() {
        let f = formatter(&[]);
        assert_eq!(f.format("what time is it?"), "What time is it?");
        assert_eq!(f.format("done."), "Done.");
        assert_eq!(f.format("well,"), "Well,");
    }

    #[test]
    fn test_whitespace_is_collapsed() {
        let f = formatter(&[]);
        assert_eq!(f.format("  send   it  "), "Send it.");
    }

    #[test]
    fn test_capitalize_lowercases_tail() {
        assert_eq!(capitalize("mCdonald"), "Mcdonald");
        assert_eq!(capitalize(""), "");
        assert_eq!(uppercase_first("ümit is here"), "Ümit is here");
    }
}
