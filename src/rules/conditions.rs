use std::collections::HashMap;

use crate::rules::Lexicon;
use crate::rules::helpers::{
    chunk_has_preposition, chunk_has_proper_noun, chunk_has_speech_verb, chunk_has_title, chunk_is_comma,
    chunk_is_quantity, chunk_is_temporal, chunk_starts_with_relative,
};
use crate::{Category, Chunk};

/// A rule condition: a pure predicate over the chunks a pattern matched.
pub type ConditionFn = for<'a, 's> fn(&'a [Chunk<'s>], &'a Lexicon) -> bool;

/// Name -> predicate table used to resolve `Rule::condition`.
#[derive(Clone)]
pub struct ConditionRegistry {
    conditions: HashMap<String, ConditionFn>,
}

impl std::fmt::Debug for ConditionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&str> = self.conditions.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("ConditionRegistry").field("conditions", &names).finish()
    }
}

impl Default for ConditionRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ConditionRegistry {
    pub fn empty() -> Self {
        ConditionRegistry { conditions: HashMap::new() }
    }

    /// Registry holding every built-in condition.
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register("adjacent", always);
        registry.register("both_temporal", all_temporal);
        registry.register("both_have_preposition", all_have_preposition);
        registry.register("adjacent_no_punctuation", no_punctuation);
        registry.register("title_followed_by_propn", title_followed_by_propn);
        registry.register("first_is_quantity_second_has_prep", quantity_then_preposition);
        registry.register("sv_starts_with_relative", verb_phrase_starts_with_relative);
        registry.register("is_speech_verb", any_speech_verb);
        registry.register("first_is_adverbial_and_comma", adverbial_then_comma);
        registry.register("pct_is_comma", any_comma);
        registry.register("same_np_structure", all_noun_phrases);
        registry
    }

    /// Add or replace a condition.
    pub fn register(&mut self, name: impl Into<String>, condition: ConditionFn) -> &mut Self {
        self.conditions.insert(name.into(), condition);
        self
    }

    pub fn get(&self, name: &str) -> Option<ConditionFn> {
        self.conditions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.conditions.contains_key(name)
    }
}

// --- Built-in conditions -----------------------------------------------------

/// Unconditional.
pub fn always(_: &[Chunk<'_>], _: &Lexicon) -> bool {
    true
}

/// Every matched chunk contains a temporal word.
pub fn all_temporal(chunks: &[Chunk<'_>], lexicon: &Lexicon) -> bool {
    chunks.iter().all(|c| chunk_is_temporal(c, lexicon))
}

/// Every matched chunk contains an adposition.
pub fn all_have_preposition(chunks: &[Chunk<'_>], lexicon: &Lexicon) -> bool {
    chunks.iter().all(|c| chunk_has_preposition(c, lexicon))
}

/// No matched chunk is punctuation.
pub fn no_punctuation(chunks: &[Chunk<'_>], _: &Lexicon) -> bool {
    !chunks.iter().any(|c| c.category() == Category::Punct)
}

/// First chunk carries a title word and the second a proper noun.
pub fn title_followed_by_propn(chunks: &[Chunk<'_>], lexicon: &Lexicon) -> bool {
    match chunks {
        [first, second, ..] => chunk_has_title(first, lexicon) && chunk_has_proper_noun(second),
        _ => false,
    }
}

/// First chunk is a quantity expression and the second has a preposition.
pub fn quantity_then_preposition(chunks: &[Chunk<'_>], lexicon: &Lexicon) -> bool {
    match chunks {
        [first, second, ..] => chunk_is_quantity(first, lexicon) && chunk_has_preposition(second, lexicon),
        _ => false,
    }
}

/// The first `SV` chunk of the match starts with a relative pronoun.
pub fn verb_phrase_starts_with_relative(chunks: &[Chunk<'_>], lexicon: &Lexicon) -> bool {
    chunks
        .iter()
        .find(|c| c.category() == Category::VerbPhrase)
        .is_some_and(|c| chunk_starts_with_relative(c, lexicon))
}

/// Some matched chunk contains a speech verb lemma.
pub fn any_speech_verb(chunks: &[Chunk<'_>], lexicon: &Lexicon) -> bool {
    chunks.iter().any(|c| chunk_has_speech_verb(c, lexicon))
}

/// First chunk is prepositional and the second is exactly a comma.
pub fn adverbial_then_comma(chunks: &[Chunk<'_>], lexicon: &Lexicon) -> bool {
    match chunks {
        [first, second, ..] => chunk_has_preposition(first, lexicon) && chunk_is_comma(second),
        _ => false,
    }
}

/// Some matched chunk is a comma.
pub fn any_comma(chunks: &[Chunk<'_>], _: &Lexicon) -> bool {
    chunks.iter().any(chunk_is_comma)
}

/// Every matched chunk is a noun phrase.
pub fn all_noun_phrases(chunks: &[Chunk<'_>], _: &Lexicon) -> bool {
    chunks.iter().all(|c| c.category() == Category::NounPhrase)
}
