use tracing::debug;

use crate::normalizer::TranscriptionNormalizer;

/// Collapses spoken digit sequences ("nine eight double seven") into digits.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberNormalizer;

impl NumberNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl TranscriptionNormalizer for NumberNormalizer {
    fn normalize(&self, text: &str) -> String {
        normalize_numbers_spoken(text)
    }

    fn name(&self) -> &'static str {
        "NumberNormalizer"
    }
}

fn digit_for(word: &str) -> Option<char> {
    let digit = match word.to_lowercase().as_str() {
        "zero" | "oh" => '0',
        "one" => '1',
        "two" => '2',
        "three" => '3',
        "four" => '4',
        "five" => '5',
        "six" => '6',
        "seven" => '7',
        "eight" => '8',
        "nine" => '9',
        _ => return None,
    };
    Some(digit)
}

fn repeat_count(word: &str) -> Option<usize> {
    match word.to_lowercase().as_str() {
        "double" => Some(2),
        "triple" => Some(3),
        _ => None,
    }
}

/// Greedily read digit words from the front of `tokens`.
///
/// Returns the digits produced and how many tokens were consumed. A
/// "double"/"triple" only counts together with the digit word after it;
/// without one the scan stops before the multiplier.
pub fn words_to_digits<S: AsRef<str>>(tokens: &[S]) -> (String, usize) {
    let mut digits = String::new();
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i].as_ref();

        if let Some(times) = repeat_count(token) {
            if let Some(next) = tokens.get(i + 1) {
                match digit_for(next.as_ref()) {
                    Some(digit) => {
                        digits.extend(std::iter::repeat(digit).take(times));
                        i += 2;
                        continue;
                    }
                    None => break,
                }
            }
        }

        match digit_for(token) {
            Some(digit) => {
                digits.push(digit);
                i += 1;
            }
            None => break,
        }
    }

    (digits, i)
}

/// Replace every run of spoken digits that yields at least two digits.
///
/// A single number word ("one apple") is kept as a word.
pub fn normalize_numbers_spoken(text: &str) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());

    let mut i = 0;
    while i < tokens.len() {
        let (digits, consumed) = words_to_digits(&tokens[i..]);
        if consumed > 0 && digits.len() >= 2 {
            debug!("Collapsed {} number words into {}", consumed, digits);
            out.push(digits);
            i += consumed;
        } else {
            out.push(tokens[i].to_string());
            i += 1;
        }
    }

    out.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_to_digits_multipliers() {
        assert_eq!(words_to_digits(&["triple", "nine"]), ("999".to_string(), 2));
        assert_eq!(
            words_to_digits(&["nine", "double", "eight", "oh"]),
            ("9880".to_string(), 4)
        );
    }

    #[test]
    fn test_words_to_digits_dangling_multiplier() {
        assert_eq!(words_to_digits(&["double"]), (String::new(), 0));
        assert_eq!(words_to_digits(&["five", "double", "apple"]), ("5".to_string(), 1));
        assert_eq!(words_to_digits(&["five", "triple"]), ("5".to_string(), 1));
    }

    #[test]
    fn test_words_to_digits_stops_at_unknown_word() {
        assert_eq!(
            words_to_digits(&["Two", "three", "please", "four"]),
            ("23".to_string(), 2)
        );
        let empty: [&str; 0] = [];
        assert_eq!(words_to_digits(&empty), (String::new(), 0));
    }

    #[test]
    fn test_normalize_double_pairs() {
        assert_eq!(
            normalize_numbers_spoken("call double five double five"),
            "call 5555"
        );
    }

    #[test]
    fn test_single_number_word_is_kept() {
        assert_eq!(normalize_numbers_spoken("i need one apple"), "i need one apple");
        assert_eq!(normalize_numbers_spoken("double trouble"), "double trouble");
    }

    #[test]
    fn test_double_digit_alone_collapses() {
        assert_eq!(normalize_numbers_spoken("room double two"), "room 22");
    }

    #[test]
    fn test_phone_number_in_sentence() {
        assert_eq!(
            normalize_numbers_spoken("my number is nine eight seven six five four three two one oh ok"),
            "my number is 9876543210 ok"
        );
    }
}
