use crate::engine::{MergeMetrics, MergeOptions, Merger, PhraseChunker, PhraseConfig};
use crate::{Category, Chunk, ConditionRegistry, Lexicon, Rule, Sentence, french_rules, load_rules, render};
use once_cell::sync::Lazy;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

static DEFAULT_RULES: Lazy<Vec<Rule>> = Lazy::new(french_rules);

/// Options for a [`Pipeline`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// When false, Level 2 is a copy of Level 1 and no pass runs.
    pub enable_level2: bool,
    pub merge: MergeOptions,
    pub phrase: PhraseConfig,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self { enable_level2: true, merge: MergeOptions::default(), phrase: PhraseConfig::default() }
    }
}

/// Both chunk levels for one sentence.
#[derive(Debug, Clone)]
pub struct Analysis<'s> {
    pub sentence: &'s Sentence,
    pub level1: Vec<Chunk<'s>>,
    pub level2: Vec<Chunk<'s>>,
    /// Level 2 pass metrics (empty when Level 2 is disabled).
    pub metrics: MergeMetrics,
}

impl Analysis<'_> {
    /// Canonical `[CODE] text` rendering of Level 1.
    pub fn level1_text(&self) -> String {
        render(&self.level1)
    }

    pub fn level2_text(&self) -> String {
        render(&self.level2)
    }
}

/// Chunk and token counts over one or more chunk sequences.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkStats {
    pub sentences: usize,
    pub chunks: usize,
    pub tokens: usize,
    pub by_category: BTreeMap<Category, usize>,
}

impl ChunkStats {
    pub fn of(chunks: &[Chunk<'_>]) -> Self {
        let mut stats = ChunkStats::default();
        stats.add(chunks);
        stats
    }

    /// Count one more sentence's chunks.
    pub fn add(&mut self, chunks: &[Chunk<'_>]) {
        self.sentences += 1;
        self.chunks += chunks.len();
        for chunk in chunks {
            self.tokens += chunk.len();
            *self.by_category.entry(chunk.category()).or_default() += 1;
        }
    }

    pub fn count(&self, category: Category) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }

    pub fn tokens_per_chunk(&self) -> f64 {
        if self.chunks == 0 { 0.0 } else { self.tokens as f64 / self.chunks as f64 }
    }

    /// Chunks removed going from `self` (Level 1) to `merged` (Level 2), as
    /// `(removed, percent of self)`.
    pub fn reduction(&self, merged: &ChunkStats) -> (usize, f64) {
        let removed = self.chunks.saturating_sub(merged.chunks);
        let percent = if self.chunks == 0 { 0.0 } else { removed as f64 * 100.0 / self.chunks as f64 };
        (removed, percent)
    }
}

/// Level 1 chunker plus Level 2 merger, configured once and shared across
/// sentences.
///
/// Rules and lexicon are borrowed; [`Pipeline::french`] borrows the built-in
/// ones.
#[derive(Debug, Clone)]
pub struct Pipeline<'r> {
    chunker: PhraseChunker,
    merger: Merger<'r>,
    enable_level2: bool,
}

impl Pipeline<'static> {
    /// Pipeline over the default French rules and lexicon.
    pub fn french(options: PipelineOptions) -> Self {
        Pipeline::new(&DEFAULT_RULES, Lexicon::french(), options)
    }
}

impl<'r> Pipeline<'r> {
    pub fn new(rules: &'r [Rule], lexicon: &'r Lexicon, options: PipelineOptions) -> Self {
        Self::with_registry(rules, &ConditionRegistry::builtin(), lexicon, options)
    }

    pub fn with_registry(
        rules: &'r [Rule],
        registry: &ConditionRegistry,
        lexicon: &'r Lexicon,
        options: PipelineOptions,
    ) -> Self {
        Pipeline {
            chunker: PhraseChunker::new(options.phrase),
            merger: Merger::with_registry(rules, registry, lexicon, options.merge),
            enable_level2: options.enable_level2,
        }
    }

    pub fn merger(&self) -> &Merger<'r> {
        &self.merger
    }

    pub fn analyze<'s>(&self, sentence: &'s Sentence) -> Analysis<'s> {
        let level1 = self.chunker.chunk(sentence);
        if !self.enable_level2 {
            let level2 = level1.clone();
            return Analysis { sentence, level1, level2, metrics: MergeMetrics::default() };
        }

        let outcome = self.merger.merge_with_metrics(level1.clone());
        tracing::debug!(
            sent_id = %sentence.sent_id,
            level1 = level1.len(),
            level2 = outcome.chunks.len(),
            passes = outcome.metrics.pass_count(),
            "sentence analysed"
        );
        Analysis { sentence, level1, level2: outcome.chunks, metrics: outcome.metrics }
    }

    /// Analyse `sentences` in parallel; output order matches input order.
    pub fn analyze_batch<'s>(&self, sentences: &'s [Sentence]) -> Vec<Analysis<'s>> {
        sentences.par_iter().map(|sentence| self.analyze(sentence)).collect()
    }
}

/// Level 1 chunks of `sentence` under the default relation sets.
pub fn chunk_sentence(sentence: &Sentence) -> Vec<Chunk<'_>> {
    PhraseChunker::default().chunk(sentence)
}

/// Level 2 merge of `chunks` with `rules`.
pub fn merge_chunks<'s>(
    chunks: Vec<Chunk<'s>>,
    rules: &[Rule],
    lexicon: &Lexicon,
    options: MergeOptions,
) -> Vec<Chunk<'s>> {
    Merger::new(rules, lexicon, options).merge(chunks)
}

/// Analyse `sentence` with the default French rules, single pass.
pub fn analyze(sentence: &Sentence) -> Analysis<'_> {
    analyze_with(sentence, PipelineOptions::default())
}

pub fn analyze_with(sentence: &Sentence, options: PipelineOptions) -> Analysis<'_> {
    Pipeline::french(options).analyze(sentence)
}

/// Load a rule file, falling back to an empty rule list (Level 2 passthrough)
/// when the file is unreadable or malformed.
pub fn load_rules_or_passthrough(path: impl AsRef<Path>) -> Vec<Rule> {
    load_rules(path).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "rule configuration unusable; Level 2 disabled");
        Vec::new()
    })
}
