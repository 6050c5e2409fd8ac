use anyhow::Result;
use tracing::debug;

use crate::normalizer::rewrite_rule::{apply_chain, RewriteRule};
use crate::normalizer::TranscriptionNormalizer;

/// Rebuilds email-like tokens from spelled-out ASR output.
///
/// "r a m m e h t a @ g mail dot com" becomes "ram.mehta@gmail.com" in three
/// steps: letter runs are collapsed, spoken symbol words become symbols, then
/// the cleanup chain fixes provider names, surname dots, TLDs and spacing.
pub struct EmailNormalizer {
    symbol_rules: Vec<RewriteRule>,
    cleanup_rules: Vec<RewriteRule>,
}

impl EmailNormalizer {
    pub fn new() -> Result<Self> {
        let symbol_rules = vec![
            RewriteRule::new("dot", r"(?i)\bdot\b", ".")?,
            RewriteRule::new("underscore", r"(?i)\bunderscore\b", "_")?,
        ];

        // Order matters: provider names must be joined before the surname and
        // TLD rules look at them, and the specific acin/coin suffixes must be
        // expanded before the generic TLD rule can claim their trailing "in".
        // The surname and TLD prefixes must end on a non-dot character so an
        // address that is already dotted is left alone.
        let cleanup_rules = vec![
            RewriteRule::new("gmail", r"(?i)\b(g)\s+(mail)\b", "gmail")?,
            RewriteRule::new("yahoo", r"(?i)\b(y)\s+(hoo)\b", "yahoo")?,
            RewriteRule::new(
                "surname-dot",
                r"(?i)([a-zA-Z0-9.-]*[a-zA-Z0-9-])(mehta|sharma|patel|gupta|singh|kumar|verma)\b",
                "${1}.${2}",
            )?,
            RewriteRule::new(
                "tld-ac-in",
                r"(?i)(@[a-zA-Z0-9.-]*[a-zA-Z0-9-])(acin)\b",
                "${1}.ac.in",
            )?,
            RewriteRule::new(
                "tld-co-in",
                r"(?i)(@[a-zA-Z0-9.-]*[a-zA-Z0-9-])(coin)\b",
                "${1}.co.in",
            )?,
            RewriteRule::new(
                "tld-generic",
                r"(?i)(@[a-zA-Z0-9.-]*[a-zA-Z0-9-])(com|in|org|net|edu)\b",
                "${1}.${2}",
            )?,
            RewriteRule::new("symbol-spacing", r"\s*([@.])\s*", "${1}")?,
        ];

        Ok(Self {
            symbol_rules,
            cleanup_rules,
        })
    }

    /// Names of the cleanup rules in the order they run.
    pub fn cleanup_order(&self) -> Vec<&'static str> {
        self.cleanup_rules.iter().map(RewriteRule::name).collect()
    }
}

impl TranscriptionNormalizer for EmailNormalizer {
    fn normalize(&self, text: &str) -> String {
        let collapsed = collapse_spelled_letters(text);
        let symbols = apply_chain(&self.symbol_rules, &collapsed);
        let cleaned = apply_chain(&self.cleanup_rules, &symbols);

        if cleaned != text {
            debug!("Email cleanup rewrote {:?} to {:?}", text, cleaned);
        }

        cleaned
    }

    fn name(&self) -> &'static str {
        "EmailNormalizer"
    }
}

/// Join every maximal run of two or more single-letter tokens into one token.
///
/// A lone single letter ("a", "i") is left as is. Tokens are re-joined with
/// single spaces.
pub fn collapse_spelled_letters(text: &str) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());

    let mut i = 0;
    while i < tokens.len() {
        if !is_single_letter(tokens[i]) {
            out.push(tokens[i].to_string());
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < tokens.len() && is_single_letter(tokens[j]) {
            j += 1;
        }

        if j - i >= 2 {
            out.push(tokens[i..j].concat());
            i = j;
        } else {
            out.push(tokens[i].to_string());
            i += 1;
        }
    }

    out.join(" ")
}

fn is_single_letter(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
}
