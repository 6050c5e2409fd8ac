use anyhow::{Context, Result};
use regex::{Captures, Regex};
use tracing::debug;

use crate::normalizer::rewrite_rule::{apply_chain, RewriteRule};
use crate::normalizer::TranscriptionNormalizer;

const RUPEE: &str = "₹";
const LAKH: f64 = 100_000.0;
const CRORE: f64 = 10_000_000.0;
const THOUSAND: f64 = 1_000.0;

/// Indian-locale money formatting: lakh/crore/thousand expansion, the rupee
/// symbol and 2-2-3 digit grouping.
pub struct CurrencyNormalizer {
    small_numbers: Vec<RewriteRule>,
    indian_unit: Regex,
    thousand: Regex,
    currency_word: Regex,
    currency_amount: Regex,
}

impl CurrencyNormalizer {
    pub fn new() -> Result<Self> {
        let small_numbers = vec![
            RewriteRule::new("one", r"(?i)\bone\b", "1")?,
            RewriteRule::new("two", r"(?i)\btwo\b", "2")?,
        ];

        Ok(Self {
            small_numbers,
            indian_unit: Regex::new(r"(?i)(\d[\d,.]*)\s+(lakh|crore)\b")
                .context("Failed to compile lakh/crore pattern")?,
            thousand: Regex::new(r"(?i)(\d[\d,.]*)\s+thousand\b")
                .context("Failed to compile thousand pattern")?,
            currency_word: Regex::new(r"(?i)\b(rupees|rs)\b\s*")
                .context("Failed to compile currency word pattern")?,
            currency_amount: Regex::new(r"(₹)\s*([0-9,]+)\b")
                .context("Failed to compile currency amount pattern")?,
        })
    }

    /// Expand "2 lakh", "1.5 crore" and "3 thousand" into plain integers.
    ///
    /// A number that does not parse is left exactly as written.
    pub fn normalize_indian_units(&self, text: &str) -> String {
        let text = apply_chain(&self.small_numbers, text);

        let text = self.indian_unit.replace_all(&text, |caps: &Captures| {
            let multiplier = if caps[2].eq_ignore_ascii_case("crore") {
                CRORE
            } else {
                LAKH
            };
            scale(&caps[1], multiplier).unwrap_or_else(|| caps[0].to_string())
        });

        self.thousand
            .replace_all(&text, |caps: &Captures| {
                scale(&caps[1], THOUSAND).unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Expand units, turn "rupees"/"rs" into "₹" and group every rupee amount.
    pub fn normalize_currency(&self, text: &str) -> String {
        let text = self.normalize_indian_units(text);
        let text = self.currency_word.replace_all(&text, RUPEE);

        self.currency_amount
            .replace_all(&text, |caps: &Captures| {
                let raw: String = caps[2].chars().filter(|c| *c != ',').collect();
                if is_ascii_digits(&raw) {
                    format!("{}{}", RUPEE, indian_group(&raw))
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned()
    }
}

impl TranscriptionNormalizer for CurrencyNormalizer {
    fn normalize(&self, text: &str) -> String {
        let normalized = self.normalize_currency(text);
        if normalized != text {
            debug!("Currency normalization rewrote {:?} to {:?}", text, normalized);
        }
        normalized
    }

    fn name(&self) -> &'static str {
        "CurrencyNormalizer"
    }
}

fn scale(number: &str, multiplier: f64) -> Option<String> {
    let value: f64 = number.parse().ok()?;
    let total = (value * multiplier).round();
    if !total.is_finite() || total < 0.0 || total >= u64::MAX as f64 {
        return None;
    }
    Some(format!("{}", total as u64))
}

fn is_ascii_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Group digits the Indian way: the last three together, the rest in pairs.
///
/// "1234567" becomes "12,34,567". Anything that is not a plain digit string,
/// or has three digits or fewer, is returned unchanged.
pub fn indian_group(digits: &str) -> String {
    if !is_ascii_digits(digits) || digits.len() <= 3 {
        return digits.to_string();
    }

    let (rest, last3) = digits.split_at(digits.len() - 3);
    let lead = match rest.len() % 2 {
        0 => 2,
        odd => odd,
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    grouped.push_str(&rest[..lead]);
    for pair in rest.as_bytes()[lead..].chunks(2) {
        grouped.push(',');
        grouped.extend(pair.iter().map(|b| *b as char));
    }
    grouped.push(',');
    grouped.push_str(last3);

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> CurrencyNormalizer {
        CurrencyNormalizer::new().unwrap()
    }

    #[test]
    fn test_indian_group() {
        assert_eq!(indian_group("1234567"), "12,34,567");
        assert_eq!(indian_group("12"), "12");
        assert_eq!(indian_group("123"), "123");
        assert_eq!(indian_group("1234"), "1,234");
        assert_eq!(indian_group("123456"), "1,23,456");
        assert_eq!(indian_group("100000000"), "10,00,00,000");
    }

    #[test]
    fn test_indian_group_rejects_non_digits() {
        assert_eq!(indian_group("12a456"), "12a456");
        assert_eq!(indian_group("1,234"), "1,234");
        assert_eq!(indian_group(""), "");
    }

    #[test]
    fn test_currency_symbol_and_grouping() {
        assert_eq!(normalizer().normalize_currency("rupees 200000"), "₹2,00,000");
        assert_eq!(
            normalizer().normalize_currency("pay Rs 12,50,000 today"),
            "pay ₹12,50,000 today"
        );
    }

    #[test]
    fn test_units_expand() {
        let n = normalizer();
        assert_eq!(n.normalize_indian_units("2 lakh"), "200000");
        assert_eq!(n.normalize_indian_units("two lakh"), "200000");
        assert_eq!(n.normalize_indian_units("1.5 crore"), "15000000");
        assert_eq!(n.normalize_indian_units("3 thousand"), "3000");
        assert_eq!(n.normalize_indian_units("2.3 lakh"), "230000");
    }

    #[test]
    fn test_units_then_currency() {
        assert_eq!(
            normalizer().normalize_currency("send rs 5 crore now"),
            "send ₹5,00,00,000 now"
        );
        assert_eq!(normalizer().normalize_currency("rupees 3 thousand"), "₹3,000");
    }

    #[test]
    fn test_unparsable_numbers_are_untouched() {
        let n = normalizer();
        assert_eq!(n.normalize_indian_units("1,5 lakh"), "1,5 lakh");
        assert_eq!(n.normalize_indian_units("2.5.1 thousand"), "2.5.1 thousand");
    }

    #[test]
    fn test_amounts_past_u64_are_untouched() {
        let n = normalizer();
        assert_eq!(
            n.normalize_indian_units("99999999999999999999 crore"),
            "99999999999999999999 crore"
        );
        assert_eq!(
            n.normalize_currency("rupees 99999999999999999999 crore"),
            "₹9,99,99,99,99,99,99,99,99,999 crore"
        );
    }

    #[test]
    fn test_non_numeric_after_symbol_is_kept() {
        assert_eq!(normalizer().normalize_currency("rupees only"), "₹only");
    }
}
