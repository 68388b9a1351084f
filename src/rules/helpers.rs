use crate::rules::Lexicon;
use crate::{Category, Chunk, Upos};

/// Returns true when any token of the chunk is in the temporal lexicon.
pub fn chunk_is_temporal(chunk: &Chunk<'_>, lexicon: &Lexicon) -> bool {
    chunk.tokens().iter().any(|t| lexicon.is_temporal(&t.text))
}

/// Returns true when the chunk holds an adposition, by tag or by lexicon.
pub fn chunk_has_preposition(chunk: &Chunk<'_>, lexicon: &Lexicon) -> bool {
    chunk.tokens().iter().any(|t| t.upos == Upos::Adp || lexicon.is_preposition(&t.text))
}

/// Returns true when the chunk holds a numeral or a measure word.
pub fn chunk_is_quantity(chunk: &Chunk<'_>, lexicon: &Lexicon) -> bool {
    chunk.tokens().iter().any(|t| t.upos == Upos::Num || lexicon.is_quantity(&t.text))
}

pub fn chunk_starts_with_relative(chunk: &Chunk<'_>, lexicon: &Lexicon) -> bool {
    chunk.first().is_some_and(|t| lexicon.is_relative_pronoun(&t.text))
}

/// Returns true when any token's lemma is a speech/quotation verb.
pub fn chunk_has_speech_verb(chunk: &Chunk<'_>, lexicon: &Lexicon) -> bool {
    chunk.tokens().iter().any(|t| lexicon.is_speech_verb(&t.lemma))
}

pub fn chunk_has_title(chunk: &Chunk<'_>, lexicon: &Lexicon) -> bool {
    chunk.tokens().iter().any(|t| lexicon.is_title(&t.text))
}

pub fn chunk_has_proper_noun(chunk: &Chunk<'_>) -> bool {
    chunk.tokens().iter().any(|t| t.upos == Upos::Propn)
}

/// Returns true for a punctuation chunk whose whole text is a comma.
pub fn chunk_is_comma(chunk: &Chunk<'_>) -> bool {
    chunk.category() == Category::Punct && chunk.text().trim() == ","
}
