use rapidfuzz::fuzz;
use tracing::debug;

use crate::normalizer::TranscriptionNormalizer;
use crate::resources::NameLexicon;

pub const DEFAULT_NAME_THRESHOLD: u8 = 90;

/// Punctuation that may cling to a token and is put back after correction.
pub(crate) fn is_edge_punctuation(c: char) -> bool {
    matches!(c, '.' | ',' | '?' | '!')
}

struct LexiconEntry {
    canonical: String,
    folded: String,
    len: usize,
}

/// Best ratio two strings of these lengths could reach.
fn ratio_upper_bound(len_a: usize, len_b: usize) -> f64 {
    let total = len_a + len_b;
    if total == 0 {
        return 100.0;
    }
    200.0 * len_a.min(len_b) as f64 / total as f64
}

/// Fuzzy-corrects alphabetic tokens to the closest name in the lexicon.
pub struct NameCorrector {
    entries: Vec<LexiconEntry>,
    threshold: f64,
}

impl NameCorrector {
    pub fn new(lexicon: &NameLexicon, threshold: u8) -> Self {
        let entries = lexicon
            .names()
            .iter()
            .map(|name| {
                let folded = name.to_lowercase();
                LexiconEntry {
                    canonical: name.clone(),
                    len: folded.chars().count(),
                    folded,
                }
            })
            .collect();

        Self {
            entries,
            threshold: f64::from(threshold),
        }
    }

    /// Closest lexicon spelling for `word` and its 0-100 Indel ratio, first
    /// entry winning ties. Entries too long or too short to ever reach the
    /// threshold are skipped before scoring.
    pub fn best_match(&self, word: &str) -> Option<(&str, f64)> {
        let folded = word.to_lowercase();
        let len = folded.chars().count();
        let mut best: Option<(&str, f64)> = None;

        for entry in &self.entries {
            if ratio_upper_bound(len, entry.len) < self.threshold {
                continue;
            }
            let score = fuzz::ratio(folded.chars(), entry.folded.chars()) * 100.0;
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((entry.canonical.as_str(), score));
            }
        }

        best
    }

    fn correct_token(&self, token: &str) -> String {
        let core = token.trim_matches(is_edge_punctuation);
        if core.chars().count() <= 2 || !core.chars().all(char::is_alphabetic) {
            return token.to_string();
        }

        match self.best_match(core) {
            Some((name, score)) if score >= self.threshold => {
                let start = token.len() - token.trim_start_matches(is_edge_punctuation).len();
                let end = start + core.len();
                if name != core {
                    debug!("Name match {:?} -> {:?} ({:.1})", core, name, score);
                }
                format!("{}{}{}", &token[..start], name, &token[end..])
            }
            _ => token.to_string(),
        }
    }
}

impl TranscriptionNormalizer for NameCorrector {
    fn normalize(&self, text: &str) -> String {
        text.split_whitespace()
            .map(|token| self.correct_token(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn name(&self) -> &'static str {
        "NameCorrector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector(names: &[&str]) -> NameCorrector {
        let lexicon = NameLexicon::from_names(names.iter().map(|n| n.to_string()));
        NameCorrector::new(&lexicon, DEFAULT_NAME_THRESHOLD)
    }

    #[test]
    fn test_exact_match_takes_lexicon_spelling() {
        let c = corrector(&["Alok", "Priya"]);
        assert_eq!(c.normalize("hi alok how are you"), "hi Alok how are you");
    }

    #[test]
    fn test_close_long_name_is_corrected() {
        let c = corrector(&["Venkatesh", "Krishnamurthy"]);
        assert_eq!(c.normalize("call krishnamurty please"), "call Krishnamurthy please");
    }

    #[test]
    fn test_punctuation_is_reattached() {
        let c = corrector(&["Ansh"]);
        assert_eq!(c.normalize("is that ansh?"), "is that Ansh?");
        assert_eq!(c.normalize("ansh, come"), "Ansh, come");
    }

    #[test]
    fn test_short_and_non_alphabetic_tokens_are_skipped() {
        let c = corrector(&["Al", "Ravi"]);
        assert_eq!(c.normalize("al ravi2 ravi"), "al ravi2 Ravi");
    }

    #[test]
    fn test_below_threshold_is_kept() {
        let c = corrector(&["Priyanka"]);
        assert_eq!(c.normalize("priyanca"), "priyanca");
    }

    #[test]
    fn test_score_equal_to_threshold_is_replaced() {
        // one substituted letter in ten: LCS 9, ratio 200 * 9 / 20 = 90
        let c = corrector(&["Rajkishore"]);
        let (name, score) = c.best_match("rajkishori").unwrap();
        assert_eq!(name, "Rajkishore");
        assert!((score - 90.0).abs() < 1e-9);
        assert_eq!(c.normalize("ask rajkishori today"), "ask Rajkishore today");
    }

    #[test]
    fn test_ratio_matches_indel_metric() {
        let c = corrector(&["Priyanka"]);
        let (_, score) = c.best_match("priyanca").unwrap();
        assert!((score - 87.5).abs() < 1e-9);
    }

    #[test]
    fn test_length_bound_skips_unreachable_entries() {
        assert!((ratio_upper_bound(6, 7) - 1200.0 / 13.0).abs() < 1e-9);
        let c = corrector(&["Al", "Alokananda"]);
        assert_eq!(c.best_match("alok"), None);
    }

    #[test]
    fn test_best_match_prefers_first_on_tie() {
        let c = corrector(&["Rahul", "RAHUL"]);
        assert_eq!(c.best_match("rahul"), Some(("Rahul", 100.0)));
    }

    #[test]
    fn test_empty_lexicon_is_noop() {
        let c = corrector(&[]);
        assert_eq!(c.normalize("nothing  to   see"), "nothing to see");
    }
}
