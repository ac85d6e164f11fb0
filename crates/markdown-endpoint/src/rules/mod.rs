//! Rule system for HTML to Markdown conversion.

mod block;
mod inline;
mod rule;

pub use block::block_rules;
pub use inline::inline_rules;
pub use rule::{Context, Element, Filter, ReplacementFn, Rule, TransformFn};

use indexmap::IndexMap;
use tracing::trace;

/// Ordered collection of rules for conversion
pub struct Rules {
    /// Custom rules added by the user (applied first)
    custom_rules: IndexMap<String, Rule>,
    /// Built-in block rules
    block_rules: IndexMap<String, Rule>,
    /// Built-in inline rules
    inline_rules: IndexMap<String, Rule>,
}

impl Rules {
    /// Create a new Rules instance with the built-in block and inline rules
    pub fn new() -> Self {
        Self {
            custom_rules: IndexMap::new(),
            block_rules: keyed(block_rules()),
            inline_rules: keyed(inline_rules()),
        }
    }

    /// Add a custom rule. Re-adding a key replaces the rule in place.
    pub fn add(&mut self, key: &str, rule: Rule) {
        self.custom_rules.insert(key.to_string(), rule);
    }

    /// Remove a custom or built-in rule by key
    pub fn remove(&mut self, key: &str) -> Option<Rule> {
        self.custom_rules
            .shift_remove(key)
            .or_else(|| self.block_rules.shift_remove(key))
            .or_else(|| self.inline_rules.shift_remove(key))
    }

    /// Keys of all rules in application order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.custom_rules
            .keys()
            .chain(self.block_rules.keys())
            .chain(self.inline_rules.keys())
            .map(String::as_str)
    }

    /// Run custom rules, then block rules, then inline rules
    pub fn apply(&self, input: &str, ctx: &mut Context<'_>) -> String {
        let mut output = input.to_string();
        for (stage, rules) in [
            ("custom", &self.custom_rules),
            ("block", &self.block_rules),
            ("inline", &self.inline_rules),
        ] {
            for (key, rule) in rules {
                output = rule.apply(&output, ctx);
                trace!(stage, rule = %key, len = output.len(), "rule applied");
            }
        }
        output
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::new()
    }
}

fn keyed(rules: Vec<(&'static str, Rule)>) -> IndexMap<String, Rule> {
    rules
        .into_iter()
        .map(|(key, rule)| (key.to_string(), rule))
        .collect()
}
