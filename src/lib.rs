extern crate self as syntagma;

#[macro_use]
mod macros;
mod api;
mod conllu;
mod engine;
mod rules;
mod sentence;

pub use api::{
    Analysis, ChunkStats, Pipeline, PipelineOptions, analyze, analyze_with, chunk_sentence,
    load_rules_or_passthrough, merge_chunks,
};
pub use conllu::{ConllError, parse_conllu, read_conllu_file};
pub use engine::{
    CompiledRule, CompiledRules, MergeEvent, MergeMetrics, MergeOptions, MergeOutcome, Merger, PassMetrics,
    PhraseChunker, PhraseConfig, category_for,
};
pub use rules::{
    ConditionFn, ConditionRegistry, ConfigError, Lexicon, Rule, french_rules, load_lexicon, load_rules,
    parse_lexicon, parse_rules,
};
pub use sentence::{Sentence, Token, Upos, base_relation};

use std::fmt;
use std::str::FromStr;

// --- Categories --------------------------------------------------------------

/// Chunk category (closed set).
///
/// `Display`/`FromStr` use the short codes that appear in rule files and in
/// the canonical `[CODE] text` rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    /// Noun phrase (`SN`).
    NounPhrase,
    /// Verb phrase (`SV`).
    VerbPhrase,
    /// Prepositional phrase (`SP`).
    PrepPhrase,
    /// Adjective phrase (`SAdj`).
    AdjPhrase,
    /// Adverb phrase (`SAdv`).
    AdvPhrase,
    /// Subject pronoun (`SujV`).
    SubjectPronoun,
    /// Object pronoun (`Pro_Obj`).
    ObjectPronoun,
    /// Subordinating conjunction (`CSub`).
    Subordinator,
    /// Coordinating conjunction (`Coord`).
    Coordinator,
    /// Punctuation (`Pct`).
    Punct,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::NounPhrase,
        Category::VerbPhrase,
        Category::PrepPhrase,
        Category::AdjPhrase,
        Category::AdvPhrase,
        Category::SubjectPronoun,
        Category::ObjectPronoun,
        Category::Subordinator,
        Category::Coordinator,
        Category::Punct,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Category::NounPhrase => "SN",
            Category::VerbPhrase => "SV",
            Category::PrepPhrase => "SP",
            Category::AdjPhrase => "SAdj",
            Category::AdvPhrase => "SAdv",
            Category::SubjectPronoun => "SujV",
            Category::ObjectPronoun => "Pro_Obj",
            Category::Subordinator => "CSub",
            Category::Coordinator => "Coord",
            Category::Punct => "Pct",
        }
    }

    pub(crate) fn flag(self) -> CategorySet {
        match self {
            Category::NounPhrase => CategorySet::SN,
            Category::VerbPhrase => CategorySet::SV,
            Category::PrepPhrase => CategorySet::SP,
            Category::AdjPhrase => CategorySet::SADJ,
            Category::AdvPhrase => CategorySet::SADV,
            Category::SubjectPronoun => CategorySet::SUJV,
            Category::ObjectPronoun => CategorySet::PRO_OBJ,
            Category::Subordinator => CategorySet::CSUB,
            Category::Coordinator => CategorySet::COORD,
            Category::Punct => CategorySet::PCT,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL.iter().copied().find(|c| c.code() == s).ok_or_else(|| format!("unknown category '{s}'"))
    }
}

bitflags::bitflags! {
    /// Set of categories, used to skip rules that cannot match a sequence.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CategorySet: u16 {
        const SN      = 1 << 0;
        const SV      = 1 << 1;
        const SP      = 1 << 2;
        const SADJ    = 1 << 3;
        const SADV    = 1 << 4;
        const SUJV    = 1 << 5;
        const PRO_OBJ = 1 << 6;
        const CSUB    = 1 << 7;
        const COORD   = 1 << 8;
        const PCT     = 1 << 9;
    }
}

impl CategorySet {
    pub fn of<'c>(categories: impl IntoIterator<Item = &'c Category>) -> Self {
        categories.into_iter().fold(CategorySet::empty(), |set, c| set | c.flag())
    }
}

// --- Chunks ------------------------------------------------------------------

/// A categorized group of tokens borrowed from one [`Sentence`].
///
/// Tokens are kept sorted by id. Chunks are never mutated: merging builds a
/// new chunk from the tokens of the chunks it replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk<'s> {
    category: Category,
    tokens: Vec<&'s Token>,
}

impl<'s> Chunk<'s> {
    pub fn new(category: Category, mut tokens: Vec<&'s Token>) -> Self {
        tokens.sort_by_key(|t| t.id);
        Chunk { category, tokens }
    }

    /// Concatenate the tokens of `parts` under a new category.
    pub fn merged(category: Category, parts: &[Chunk<'s>]) -> Self {
        let tokens = parts.iter().flat_map(|c| c.tokens.iter().copied()).collect();
        Chunk::new(category, tokens)
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn tokens(&self) -> &[&'s Token] {
        &self.tokens
    }

    pub fn first(&self) -> Option<&'s Token> {
        self.tokens.first().copied()
    }

    /// Smallest contained token id (chunks are ordered by this).
    pub fn min_id(&self) -> u32 {
        self.tokens.first().map(|t| t.id).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Surface text: token texts joined by single spaces.
    pub fn text(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ")
    }
}

impl fmt::Display for Chunk<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.category, self.text())
    }
}

/// Canonical rendering consumed by downstream reporting: `[SV] Il est [SN] 18 h 30`.
pub fn render(chunks: &[Chunk<'_>]) -> String {
    chunks.iter().map(Chunk::to_string).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_round_trip() {
        for cat in Category::ALL {
            assert_eq!(cat.code().parse::<Category>(), Ok(cat));
        }
        assert!("NP".parse::<Category>().is_err());
    }

    #[test]
    fn merged_chunk_keeps_token_order() {
        let a = Token::new(1, "Il", "il", Upos::Pron, 2, "nsubj");
        let b = Token::new(2, "est", "être", Upos::Aux, 0, "root");
        let subj = Chunk::new(Category::SubjectPronoun, vec![&a]);
        let verb = Chunk::new(Category::VerbPhrase, vec![&b]);

        let merged = Chunk::merged(Category::VerbPhrase, &[verb.clone(), subj.clone()]);
        assert_eq!(merged.to_string(), "[SV] Il est");
        assert_eq!(merged.min_id(), 1);
        assert_eq!(render(&[subj, verb]), "[SujV] Il [SV] est");
    }

    #[test]
    fn category_set_collects_flags() {
        let set = CategorySet::of(&[Category::NounPhrase, Category::Punct]);
        assert!(set.contains(CategorySet::SN | CategorySet::PCT));
        assert!(!set.contains(CategorySet::SV));
    }
}
