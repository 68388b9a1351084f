//! Level 2: rule-driven merging of Level 1 chunks.
//!
//! This module is the operational core of Level 2:
//!
//! - Compile the rule list once (see `compiled_rules.rs`).
//! - Scan the chunk sequence left to right; at each position try the rules in
//!   priority order and splice in the first one whose pattern and condition
//!   hold.
//! - Repeat passes until a pass merges nothing (a fixpoint) or the pass bound
//!   is reached.
//!
//! ## Pass structure
//!
//! ```text
//! i = 0
//! while i < len(seq):
//!     for rule in active rules (priority order):
//!         if pattern matches at i and condition holds:
//!             seq[i .. i+k] = merged chunk
//!             break
//!     i += 1            // always advance past the position
//! ```
//!
//! Within a pass the scan advances past a fresh merge, so a merged chunk can
//! only take part in another merge to its right or in the next pass. Cascades
//! ("18 h 30" + "ce lundi" + "27 janvier") therefore need multi-pass mode.
//!
//! The output is deterministic for a given sequence, rule list and options:
//! rule order is the only tie-break.

use std::time::Instant;

use super::compiled_rules::CompiledRules;
use super::metrics::{MergeEvent, MergeMetrics, PassMetrics};
use crate::{CategorySet, Chunk, ConditionRegistry, Lexicon, Rule};

/// Pass settings for [`Merger`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Run passes until no merge happens instead of exactly one pass.
    pub multi_pass: bool,
    /// Upper bound on passes in multi-pass mode; `0` is treated as `1`.
    pub max_passes: usize,
}

impl Default for MergeOptions {
    fn default() -> Self {
        MergeOptions { multi_pass: false, max_passes: 10 }
    }
}

impl MergeOptions {
    pub fn multi_pass() -> Self {
        MergeOptions { multi_pass: true, ..Self::default() }
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }
}

/// Merged sequence bundled with pass metrics.
#[derive(Debug, Clone)]
pub struct MergeOutcome<'s> {
    pub chunks: Vec<Chunk<'s>>,
    pub metrics: MergeMetrics,
}

/// Level 2 merger.
///
/// Usage: create with `Merger::new(&rules, &lexicon, options)` then call
/// `merge(chunks)` for each sentence. The merger only reads its rules and
/// lexicon, so one instance can serve many threads.
#[derive(Debug, Clone)]
pub struct Merger<'r> {
    compiled: CompiledRules<'r>,
    lexicon: &'r Lexicon,
    options: MergeOptions,
}

impl<'r> Merger<'r> {
    /// Create a merger using the built-in condition registry.
    pub fn new(rules: &'r [Rule], lexicon: &'r Lexicon, options: MergeOptions) -> Self {
        Self::with_registry(rules, &ConditionRegistry::builtin(), lexicon, options)
    }

    pub fn with_registry(
        rules: &'r [Rule],
        registry: &ConditionRegistry,
        lexicon: &'r Lexicon,
        options: MergeOptions,
    ) -> Self {
        Self::new_compiled(CompiledRules::new(rules, registry), lexicon, options)
    }

    /// Create a merger from pre-compiled rules.
    pub fn new_compiled(compiled: CompiledRules<'r>, lexicon: &'r Lexicon, options: MergeOptions) -> Self {
        if compiled.is_empty() {
            tracing::warn!("no usable merge rules; Level 2 passes chunks through unchanged");
        }
        tracing::debug!(
            rules = compiled.len(),
            disabled = compiled.disabled.len(),
            multi_pass = options.multi_pass,
            max_passes = options.max_passes,
            "merger ready"
        );
        Merger { compiled, lexicon, options }
    }

    pub fn options(&self) -> MergeOptions {
        self.options
    }

    pub fn rules(&self) -> &CompiledRules<'r> {
        &self.compiled
    }

    /// Merge `chunks`, discarding metrics.
    pub fn merge<'s>(&self, chunks: Vec<Chunk<'s>>) -> Vec<Chunk<'s>> {
        self.merge_with_metrics(chunks).chunks
    }

    /// Merge `chunks` and report what every pass did.
    pub fn merge_with_metrics<'s>(&self, chunks: Vec<Chunk<'s>>) -> MergeOutcome<'s> {
        let start = Instant::now();
        let mut sequence = chunks;
        let mut metrics = MergeMetrics::default();

        if self.compiled.is_empty() {
            metrics.converged = true;
            metrics.total = start.elapsed();
            return MergeOutcome { chunks: sequence, metrics };
        }

        let max_passes = self.options.max_passes.max(1);
        loop {
            let pass = self.apply_rules_once(&mut sequence, metrics.passes.len() + 1);
            let merges = pass.merges;
            tracing::debug!(
                pass = pass.pass,
                merges,
                rules = pass.rules_considered,
                chunks = pass.chunks_after,
                "pass complete"
            );
            metrics.total_merges += merges;
            metrics.passes.push(pass);

            if merges == 0 {
                tracing::debug!(passes = metrics.passes.len(), "converged");
                metrics.converged = true;
                break;
            }
            if !self.options.multi_pass {
                break;
            }
            if metrics.passes.len() >= max_passes {
                tracing::warn!(max_passes, chunks = sequence.len(), "pass limit reached before convergence");
                break;
            }
        }

        metrics.total = start.elapsed();
        MergeOutcome { chunks: sequence, metrics }
    }

    /// One left-to-right pass over `sequence`.
    fn apply_rules_once<'s>(&self, sequence: &mut Vec<Chunk<'s>>, pass: usize) -> PassMetrics {
        let pass_start = Instant::now();
        let chunks_before = sequence.len();
        let present = sequence.iter().fold(CategorySet::empty(), |set, c| set | c.category().flag());
        let active = self.compiled.active(present);
        let mut events = Vec::new();

        let mut i = 0;
        while i < sequence.len() {
            for compiled in &active {
                let rule = compiled.rule;
                if !rule.matches_at(sequence.as_slice(), i) {
                    continue;
                }
                let end = i + rule.pattern.len();
                if !(compiled.condition)(&sequence[i..end], self.lexicon) {
                    tracing::trace!(rule = %rule.id, position = i, "condition rejected match");
                    continue;
                }

                let merged = rule.apply(&sequence[i..end]);
                let event = MergeEvent {
                    pass,
                    position: i,
                    rule_id: rule.id.clone(),
                    consumed: end - i,
                    text: merged.to_string(),
                };
                tracing::debug!(pass, position = i, rule = %rule.id, merged = %event.text, "merge");
                events.push(event);
                sequence[i] = merged;
                sequence.drain(i + 1..end);
                break;
            }
            i += 1;
        }

        PassMetrics {
            pass,
            duration: pass_start.elapsed(),
            merges: events.len(),
            chunks_before,
            chunks_after: sequence.len(),
            rules_considered: active.len(),
            events,
        }
    }
}
