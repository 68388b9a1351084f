//! Sentence model: parser-annotated tokens and the lookups the chunker needs.
//!
//! A [`Sentence`] is an arena of [`Token`]s. Everything downstream addresses
//! tokens by their *index* in that arena rather than by the parser-assigned
//! id, so malformed input (duplicate ids, dangling heads) can never cause a
//! token to be lost or emitted twice.
//!
//! ```text
//! tokens:   [ 1:le  2:chat  3:noir ]      (arena, input order)
//! by_id:    { 1 -> 0, 2 -> 1, 3 -> 2 }
//! children: { 0 -> [1], 2 -> [0, 2] }     (head id -> child indices, sorted by id)
//! ```

use std::collections::HashMap;
use std::fmt;

/// Universal POS tag.
///
/// Tags the parser emits that are not part of the UD tag set map to [`Upos::X`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Upos {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl Upos {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "ADJ" => Upos::Adj,
            "ADP" => Upos::Adp,
            "ADV" => Upos::Adv,
            "AUX" => Upos::Aux,
            "CCONJ" => Upos::Cconj,
            "DET" => Upos::Det,
            "INTJ" => Upos::Intj,
            "NOUN" => Upos::Noun,
            "NUM" => Upos::Num,
            "PART" => Upos::Part,
            "PRON" => Upos::Pron,
            "PROPN" => Upos::Propn,
            "PUNCT" => Upos::Punct,
            "SCONJ" => Upos::Sconj,
            "SYM" => Upos::Sym,
            "VERB" => Upos::Verb,
            _ => Upos::X,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Upos::Adj => "ADJ",
            Upos::Adp => "ADP",
            Upos::Adv => "ADV",
            Upos::Aux => "AUX",
            Upos::Cconj => "CCONJ",
            Upos::Det => "DET",
            Upos::Intj => "INTJ",
            Upos::Noun => "NOUN",
            Upos::Num => "NUM",
            Upos::Part => "PART",
            Upos::Pron => "PRON",
            Upos::Propn => "PROPN",
            Upos::Punct => "PUNCT",
            Upos::Sconj => "SCONJ",
            Upos::Sym => "SYM",
            Upos::Verb => "VERB",
            Upos::X => "X",
        }
    }
}

impl fmt::Display for Upos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_tag())
    }
}

/// One parser-annotated word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// 1-indexed ordinal position in the sentence.
    pub id: u32,
    pub text: String,
    pub lemma: String,
    pub upos: Upos,
    /// Id of the syntactic head; `0` is the sentence root.
    pub head: u32,
    /// Full relation label as produced by the parser (e.g. `nsubj:pass`).
    pub deprel: String,
    /// Base relation with any subtype stripped (e.g. `nsubj`).
    pub relation: String,
}

impl Token {
    pub fn new(
        id: u32,
        text: impl Into<String>,
        lemma: impl Into<String>,
        upos: Upos,
        head: u32,
        deprel: impl Into<String>,
    ) -> Self {
        let deprel = deprel.into();
        let relation = base_relation(&deprel).to_string();
        Token { id, text: text.into(), lemma: lemma.into(), upos, head, deprel, relation }
    }

    pub fn is_root(&self) -> bool {
        self.head == 0
    }

    pub fn is_punct(&self) -> bool {
        self.upos == Upos::Punct
    }
}

/// Strip a relation subtype: `nsubj:pass` -> `nsubj`.
pub fn base_relation(deprel: &str) -> &str {
    deprel.split(':').next().unwrap_or(deprel)
}

/// A parsed sentence with id and head lookups built once at construction.
#[derive(Debug, Clone)]
pub struct Sentence {
    pub sent_id: String,
    pub text: String,
    tokens: Vec<Token>,
    by_id: HashMap<u32, usize>,
    children: HashMap<u32, Vec<usize>>,
}

impl Sentence {
    pub fn new(sent_id: impl Into<String>, text: impl Into<String>, tokens: Vec<Token>) -> Self {
        let mut by_id = HashMap::with_capacity(tokens.len());
        let mut children: HashMap<u32, Vec<usize>> = HashMap::new();

        for (idx, token) in tokens.iter().enumerate() {
            if by_id.insert(token.id, idx).is_some() {
                tracing::warn!(id = token.id, "duplicate token id; lookups resolve to the last occurrence");
            }
            children.entry(token.head).or_default().push(idx);
        }
        for kids in children.values_mut() {
            kids.sort_by_key(|&idx| (tokens[idx].id, idx));
        }

        Sentence { sent_id: sent_id.into(), text: text.into(), tokens, by_id, children }
    }

    /// Build a sentence whose text is the tokens' surface forms joined by spaces.
    pub fn from_tokens(sent_id: impl Into<String>, tokens: Vec<Token>) -> Self {
        let text = tokens.iter().map(|t| t.text.as_str()).collect::<Vec<_>>().join(" ");
        Self::new(sent_id, text, tokens)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&Token> {
        self.by_id.get(&id).map(|&idx| &self.tokens[idx])
    }

    pub fn has_token(&self, id: u32) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Arena index of the token with `id`.
    pub(crate) fn index_of(&self, id: u32) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    /// Arena indices of the tokens whose head is `id`, sorted by token id.
    pub(crate) fn child_indices(&self, id: u32) -> &[usize] {
        self.children.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tokens whose head is `id`, sorted by token id.
    pub fn children(&self, id: u32) -> impl Iterator<Item = &Token> + '_ {
        self.child_indices(id).iter().map(move |&idx| &self.tokens[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tok(id: u32, text: &str, upos: Upos, head: u32, deprel: &str) -> Token {
        Token::new(id, text, text, upos, head, deprel)
    }

    #[test]
    fn subtype_is_stripped_from_relation() {
        let t = tok(1, "il", Upos::Pron, 2, "nsubj:pass");
        assert_eq!(t.relation, "nsubj");
        assert_eq!(t.deprel, "nsubj:pass");
        assert_eq!(base_relation("root"), "root");
    }

    #[test]
    fn children_are_sorted_by_id() {
        let sentence = Sentence::from_tokens(
            "1",
            vec![
                tok(3, "noir", Upos::Adj, 2, "amod"),
                tok(1, "le", Upos::Det, 2, "det"),
                tok(2, "chat", Upos::Noun, 0, "root"),
            ],
        );
        let kids: Vec<u32> = sentence.children(2).map(|t| t.id).collect();
        assert_eq!(kids, vec![1, 3]);
        assert_eq!(sentence.get(2).map(|t| t.text.as_str()), Some("chat"));
        assert!(sentence.get(9).is_none());
        assert_eq!(sentence.text, "noir le chat");
    }

    #[test]
    fn unknown_tags_map_to_x() {
        assert_eq!(Upos::from_tag("PROPN"), Upos::Propn);
        assert_eq!(Upos::from_tag("_"), Upos::X);
        assert_eq!(Upos::Sconj.to_string(), "SCONJ");
    }
}
