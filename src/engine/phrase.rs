//! Level 1: dependency-tree phrase chunking.
//!
//! Every token is assigned to exactly one chunk. Punctuation always forms its
//! own chunk; every other token joins the phrase of its *phrase head*:
//!
//! ```text
//! le ──det──▶ chat ◀──amod── noir        => [SN] le chat noir
//!             (root)
//! ```
//!
//! Head resolution walks *up* the tree while the current token hangs from its
//! parent by a merge relation (or as a proper noun under a nominal); collection
//! walks *down* from the head along the same edges. Both walks are iterative over the sentence's token arena
//! and carry a visited set, so malformed trees (cycles, dangling heads)
//! terminate and still yield full token coverage.

use std::collections::HashSet;

use crate::{Category, Chunk, Sentence, Token, Upos};

const MERGE_RELATIONS: [&str; 10] =
    ["det", "amod", "nummod", "nmod", "flat", "fixed", "compound", "aux", "case", "appos"];
const EXCLUDED_RELATIONS: [&str; 1] = ["cop"];
const PROPER_NOUN_RELATIONS: [&str; 2] = ["nmod", "appos"];

/// Relation sets driving Level 1. Relations are compared on their base form
/// (`nmod:poss` counts as `nmod`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhraseConfig {
    /// Relations that attach a token to its parent's phrase.
    pub merge_relations: HashSet<String>,
    /// Relations that make a token head its own phrase, whatever else holds.
    pub excluded_relations: HashSet<String>,
    /// Relations under which a proper noun joins a nominal head's phrase.
    pub proper_noun_relations: HashSet<String>,
}

impl Default for PhraseConfig {
    fn default() -> Self {
        let set = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        PhraseConfig {
            merge_relations: set(&MERGE_RELATIONS),
            excluded_relations: set(&EXCLUDED_RELATIONS),
            proper_noun_relations: set(&PROPER_NOUN_RELATIONS),
        }
    }
}

impl PhraseConfig {
    fn merges(&self, token: &Token) -> bool {
        self.merge_relations.contains(token.relation.as_str())
    }

    fn excludes(&self, token: &Token) -> bool {
        self.excluded_relations.contains(token.relation.as_str())
    }

    /// Proper-noun child of a nominal head, attached by an allowed relation.
    fn attaches_proper_noun(&self, head: &Token, child: &Token) -> bool {
        matches!(head.upos, Upos::Noun | Upos::Propn)
            && child.upos == Upos::Propn
            && self.proper_noun_relations.contains(child.relation.as_str())
    }
}

/// Map a phrase head to the category of its chunk.
pub fn category_for(head: &Token) -> Category {
    match head.upos {
        Upos::Pron => match head.relation.as_str() {
            "obj" | "iobj" | "obl" | "expl" => Category::ObjectPronoun,
            _ => Category::SubjectPronoun,
        },
        Upos::Verb | Upos::Aux => Category::VerbPhrase,
        Upos::Noun | Upos::Propn | Upos::Num | Upos::Det => Category::NounPhrase,
        Upos::Adp => Category::PrepPhrase,
        Upos::Adj => Category::AdjPhrase,
        Upos::Adv => Category::AdvPhrase,
        Upos::Sconj => Category::Subordinator,
        Upos::Cconj => Category::Coordinator,
        Upos::Punct => Category::Punct,
        other => {
            tracing::warn!(token = head.id, upos = %other, text = %head.text, "unmapped part of speech; using SN");
            Category::NounPhrase
        }
    }
}

/// Level 1 chunker.
#[derive(Debug, Clone, Default)]
pub struct PhraseChunker {
    config: PhraseConfig,
}

impl PhraseChunker {
    pub fn new(config: PhraseConfig) -> Self {
        PhraseChunker { config }
    }

    /// Chunk `sentence`, returning chunks ordered by their first token id.
    pub fn chunk<'s>(&self, sentence: &'s Sentence) -> Vec<Chunk<'s>> {
        let tokens = sentence.tokens();
        let detached: Vec<bool> = tokens.iter().map(|t| !t.is_root() && !sentence.has_token(t.head)).collect();
        let mut processed = vec![false; tokens.len()];
        let mut chunks = Vec::new();

        for (idx, token) in tokens.iter().enumerate() {
            if token.is_punct() {
                processed[idx] = true;
                chunks.push(Chunk::new(Category::Punct, vec![token]));
            }
        }

        for idx in 0..tokens.len() {
            if processed[idx] {
                continue;
            }

            let mut head = self.phrase_head(sentence, idx, &detached);
            if processed[head] {
                head = idx;
            }
            let members = self.collect(sentence, head, &detached, &processed);
            for &m in &members {
                processed[m] = true;
            }
            chunks.push(Chunk::new(category_for(&tokens[head]), members.iter().map(|&m| &tokens[m]).collect()));

            // The head's phrase may not reach back down to `idx` on a malformed tree.
            if !processed[idx] {
                tracing::debug!(token = tokens[idx].id, "token not reached from its head; emitting singleton");
                processed[idx] = true;
                chunks.push(Chunk::new(category_for(&tokens[idx]), vec![&tokens[idx]]));
            }
        }

        chunks.sort_by_key(Chunk::min_id);
        chunks
    }

    /// Arena index of the phrase head of the token at `idx`.
    fn phrase_head(&self, sentence: &Sentence, idx: usize, detached: &[bool]) -> usize {
        let tokens = sentence.tokens();
        let mut visited = vec![false; tokens.len()];
        let mut current = idx;

        loop {
            visited[current] = true;
            let token = &tokens[current];
            if detached[current] {
                tracing::warn!(token = token.id, head = token.head, "head id not found in sentence; token detached");
                return current;
            }
            if token.is_root() || self.config.excludes(token) {
                return current;
            }
            let Some(parent) = sentence.index_of(token.head) else { return current };
            if tokens[parent].is_punct() || detached[parent] {
                return current;
            }
            if !self.config.merges(token) && !self.config.attaches_proper_noun(&tokens[parent], token) {
                return current;
            }
            if visited[parent] {
                tracing::warn!(token = tokens[idx].id, "cycle in head chain; token heads its own phrase");
                return idx;
            }
            current = parent;
        }
    }

    /// Arena indices of the phrase headed by `head`, head first.
    fn collect(&self, sentence: &Sentence, head: usize, detached: &[bool], processed: &[bool]) -> Vec<usize> {
        let tokens = sentence.tokens();
        let mut members = vec![head];
        if detached[head] {
            return members;
        }

        let mut seen = vec![false; tokens.len()];
        seen[head] = true;
        let mut stack = vec![head];
        while let Some(current) = stack.pop() {
            let parent = &tokens[current];
            for &child in sentence.child_indices(parent.id) {
                if seen[child] || processed[child] {
                    continue;
                }
                let token = &tokens[child];
                if token.is_punct() || self.config.excludes(token) {
                    continue;
                }
                if self.config.merges(token) || self.config.attaches_proper_noun(parent, token) {
                    seen[child] = true;
                    members.push(child);
                    stack.push(child);
                }
            }
        }
        members
    }
}
