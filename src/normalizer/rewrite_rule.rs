use anyhow::{Context, Result};
use regex::Regex;

/// One `(pattern, replacement)` step of an ordered rewrite chain.
///
/// The replacement uses `regex` expansion syntax (`${1}`, `${2}`).
#[derive(Debug, Clone)]
pub struct RewriteRule {
    name: &'static str,
    pattern: Regex,
    replacement: &'static str,
}

impl RewriteRule {
    pub fn new(name: &'static str, pattern: &str, replacement: &'static str) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("Invalid pattern for rewrite rule '{}'", name))?;

        Ok(Self {
            name,
            pattern,
            replacement,
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn apply(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, self.replacement)
            .into_owned()
    }
}

/// Apply every rule in order, each one seeing the previous rule's output.
pub fn apply_chain(rules: &[RewriteRule], text: &str) -> String {
    rules
        .iter()
        .fold(text.to_string(), |acc, rule| rule.apply(&acc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_uses_capture_expansion() {
        let rule = RewriteRule::new("swap", r"(\w+)-(\w+)", "${2}-${1}").unwrap();
        assert_eq!(rule.apply("left-right"), "right-left");
        assert_eq!(rule.name(), "swap");
    }

    #[test]
    fn test_chain_is_applied_in_order() {
        let rules = vec![
            RewriteRule::new("a-to-b", "a", "b").unwrap(),
            RewriteRule::new("b-to-c", "b", "c").unwrap(),
        ];
        assert_eq!(apply_chain(&rules, "a"), "c");

        let reversed = vec![rules[1].clone(), rules[0].clone()];
        assert_eq!(apply_chain(&reversed, "a"), "b");
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let err = RewriteRule::new("broken", "(unclosed", "").unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
