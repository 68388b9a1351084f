//! Rule compilation.
//!
//! This module holds the *static* side of the merger: the structures derived
//! once from the full rule list so that a pass over a sentence never touches
//! the condition registry or re-inspects a pattern.
//!
//! Merging is split into two phases:
//!
//! 1. **Compile rules** (this module): resolve every condition name against a
//!    [`ConditionRegistry`] and record the category set each pattern needs.
//! 2. **Run** (see `merger.rs`): per pass, drop the rules whose categories
//!    cannot occur in the sequence, then scan.
//!
//! ## Invariants
//!
//! - `CompiledRules::rules` keeps the priority order of the input slice.
//! - A rule whose condition name is not registered, or whose pattern is
//!   empty, is never compiled; it lands in `disabled` and is reported once.
//! - `produces` is the union of the result categories of compiled rules.

use crate::rules::ConditionFn;
use crate::{CategorySet, ConditionRegistry, Rule};

/// A rule with its condition resolved.
#[derive(Clone, Copy)]
pub struct CompiledRule<'r> {
    pub rule: &'r Rule,
    pub condition: ConditionFn,
    /// Categories the pattern requires to be present.
    pub categories: CategorySet,
}

impl std::fmt::Debug for CompiledRule<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledRule")
            .field("rule", &self.rule.to_string())
            .field("condition", &self.rule.condition_name())
            .finish()
    }
}

/// Pre-compiled rule set.
#[derive(Debug, Clone, Default)]
pub struct CompiledRules<'r> {
    pub rules: Vec<CompiledRule<'r>>,
    /// Rules that can never fire (unknown condition or empty pattern).
    pub disabled: Vec<&'r Rule>,
    /// Every category a merge can introduce.
    pub produces: CategorySet,
}

impl<'r> CompiledRules<'r> {
    /// Compile `rules` against `registry`, keeping their order.
    pub fn new(rules: &'r [Rule], registry: &ConditionRegistry) -> Self {
        let mut compiled = CompiledRules::default();

        for rule in rules {
            if rule.pattern.is_empty() {
                tracing::warn!(rule = %rule.id, "rule has an empty pattern; disabled");
                compiled.disabled.push(rule);
                continue;
            }
            let Some(condition) = registry.get(rule.condition_name()) else {
                tracing::warn!(rule = %rule.id, condition = rule.condition_name(), "unknown condition; rule disabled");
                compiled.disabled.push(rule);
                continue;
            };

            compiled.produces |= rule.result.flag();
            compiled.rules.push(CompiledRule { rule, condition, categories: CategorySet::of(&rule.pattern) });
        }

        compiled
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rules that can still match a sequence whose chunks cover `present`.
    ///
    /// A merge only adds its result category, so a pattern needing a category
    /// that is neither present nor producible can be skipped for the pass.
    pub fn active(&self, present: CategorySet) -> Vec<&CompiledRule<'r>> {
        let reachable = present | self.produces;
        self.rules.iter().filter(|r| reachable.contains(r.categories)).collect()
    }
}
