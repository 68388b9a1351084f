use super::*;
use crate::{
    Category, CategorySet, Chunk, ConditionRegistry, Lexicon, Rule, Sentence, Token, Upos, french_rules, render,
};

fn sentence(tokens: &[(u32, &str, &str, Upos, u32, &str)]) -> Sentence {
    let tokens = tokens
        .iter()
        .map(|&(id, text, lemma, upos, head, deprel)| Token::new(id, text, lemma, upos, head, deprel))
        .collect();
    Sentence::from_tokens("test", tokens)
}

fn level1(sentence: &Sentence) -> Vec<Chunk<'_>> {
    PhraseChunker::default().chunk(sentence)
}

fn token_ids(chunks: &[Chunk<'_>]) -> Vec<u32> {
    let mut ids: Vec<u32> = chunks.iter().flat_map(|c| c.tokens().iter().map(|t| t.id)).collect();
    ids.sort_unstable();
    ids
}

fn singletons<'s>(sentence: &'s Sentence, categories: &[Category]) -> Vec<Chunk<'s>> {
    sentence.tokens().iter().zip(categories).map(|(t, &c)| Chunk::new(c, vec![t])).collect()
}

// --- Level 1 -------------------------------------------------------------------

#[test]
fn determiner_and_adjective_join_their_noun() {
    let s = sentence(&[
        (1, "le", "le", Upos::Det, 2, "det"),
        (2, "chat", "chat", Upos::Noun, 0, "root"),
        (3, "noir", "noir", Upos::Adj, 2, "amod"),
    ]);
    let chunks = level1(&s);
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].category(), Category::NounPhrase);
    assert_eq!(chunks[0].text(), "le chat noir");
}

#[test]
fn dangling_head_becomes_singleton() {
    let s = sentence(&[
        (1, "le", "le", Upos::Det, 2, "det"),
        (2, "chat", "chat", Upos::Noun, 0, "root"),
        (3, "noir", "noir", Upos::Adj, 9, "amod"),
        (4, "si", "si", Upos::Det, 3, "det"),
    ]);
    let chunks = level1(&s);
    assert_eq!(render(&chunks), "[SN] le chat [SAdj] noir [SN] si");
    assert_eq!(token_ids(&chunks), vec![1, 2, 3, 4]);
}

#[test]
fn simple_clause_chunks() {
    let s = sentence(&[
        (1, "Le", "le", Upos::Det, 2, "det"),
        (2, "chat", "chat", Upos::Noun, 4, "nsubj"),
        (3, "noir", "noir", Upos::Adj, 2, "amod"),
        (4, "mange", "manger", Upos::Verb, 0, "root"),
        (5, "la", "le", Upos::Det, 6, "det"),
        (6, "souris", "souris", Upos::Noun, 4, "obj"),
        (7, ".", ".", Upos::Punct, 4, "punct"),
    ]);
    assert_eq!(render(&level1(&s)), "[SN] Le chat noir [SV] mange [SN] la souris [Pct] .");
}

#[test]
fn copula_heads_its_own_phrase() {
    let s = sentence(&[
        (1, "Il", "il", Upos::Pron, 3, "nsubj"),
        (2, "est", "être", Upos::Aux, 3, "cop"),
        (3, "malade", "malade", Upos::Adj, 0, "root"),
    ]);
    assert_eq!(render(&level1(&s)), "[SujV] Il [SV] est [SAdj] malade");
}

#[test]
fn auxiliary_and_case_use_base_relation() {
    let s = sentence(&[
        (1, "Elle", "elle", Upos::Pron, 3, "nsubj:pass"),
        (2, "a", "avoir", Upos::Aux, 3, "aux:pass"),
        (3, "appelée", "appeler", Upos::Verb, 0, "root"),
        (4, "à", "à", Upos::Adp, 5, "case"),
        (5, "Paris", "Paris", Upos::Propn, 3, "obl:mod"),
    ]);
    assert_eq!(render(&level1(&s)), "[SujV] Elle [SV] a appelée [SN] à Paris");
}

#[test]
fn pronoun_category_follows_relation() {
    let s = sentence(&[
        (1, "Il", "il", Upos::Pron, 3, "nsubj"),
        (2, "la", "le", Upos::Pron, 3, "obj"),
        (3, "voit", "voir", Upos::Verb, 0, "root"),
        (4, "se", "se", Upos::Pron, 3, "expl:comp"),
        (5, "lui", "lui", Upos::Pron, 3, "dislocated"),
    ]);
    let categories: Vec<Category> = level1(&s).iter().map(Chunk::category).collect();
    assert_eq!(
        categories,
        vec![
            Category::SubjectPronoun,
            Category::ObjectPronoun,
            Category::VerbPhrase,
            Category::ObjectPronoun,
            Category::SubjectPronoun,
        ]
    );
}

#[test]
fn proper_noun_joins_nominal_head_outside_merge_relations() {
    let mut config = PhraseConfig::default();
    config.merge_relations.remove("nmod");
    let chunker = PhraseChunker::new(config);

    let s = sentence(&[
        (1, "le", "le", Upos::Det, 2, "det"),
        (2, "docteur", "docteur", Upos::Noun, 0, "root"),
        (3, "Moulin", "Moulin", Upos::Propn, 2, "nmod"),
    ]);
    assert_eq!(render(&chunker.chunk(&s)), "[SN] le docteur Moulin");

    let s = sentence(&[
        (1, "appelle", "appeler", Upos::Verb, 0, "root"),
        (2, "Moulin", "Moulin", Upos::Propn, 1, "nmod"),
    ]);
    assert_eq!(render(&chunker.chunk(&s)), "[SV] appelle [SN] Moulin");
}

#[test]
fn proper_noun_before_its_head_joins_the_same_phrase() {
    let mut config = PhraseConfig::default();
    config.merge_relations.remove("nmod");
    let chunker = PhraseChunker::new(config);

    let s = sentence(&[
        (1, "Moulin", "Moulin", Upos::Propn, 3, "nmod"),
        (2, "le", "le", Upos::Det, 3, "det"),
        (3, "docteur", "docteur", Upos::Noun, 0, "root"),
    ]);
    assert_eq!(render(&chunker.chunk(&s)), "[SN] Moulin le docteur");

    let s = sentence(&[
        (1, "Moulin", "Moulin", Upos::Propn, 2, "nmod"),
        (2, "appelle", "appeler", Upos::Verb, 0, "root"),
    ]);
    assert_eq!(render(&chunker.chunk(&s)), "[SN] Moulin [SV] appelle");
}

#[test]
fn category_for_every_part_of_speech() {
    let cases = [
        (Upos::Adj, "amod", Category::AdjPhrase),
        (Upos::Adp, "case", Category::PrepPhrase),
        (Upos::Adv, "advmod", Category::AdvPhrase),
        (Upos::Aux, "aux", Category::VerbPhrase),
        (Upos::Cconj, "cc", Category::Coordinator),
        (Upos::Det, "det", Category::NounPhrase),
        (Upos::Intj, "discourse", Category::NounPhrase),
        (Upos::Noun, "obj", Category::NounPhrase),
        (Upos::Num, "nummod", Category::NounPhrase),
        (Upos::Part, "advmod", Category::NounPhrase),
        (Upos::Pron, "nsubj", Category::SubjectPronoun),
        (Upos::Pron, "iobj", Category::ObjectPronoun),
        (Upos::Propn, "root", Category::NounPhrase),
        (Upos::Punct, "punct", Category::Punct),
        (Upos::Sconj, "mark", Category::Subordinator),
        (Upos::Sym, "dep", Category::NounPhrase),
        (Upos::Verb, "root", Category::VerbPhrase),
        (Upos::X, "dep", Category::NounPhrase),
    ];

    for (upos, deprel, expected) in cases {
        let token = Token::new(1, "w", "w", upos, 0, deprel);
        assert_eq!(category_for(&token), expected, "{upos} / {deprel}");
    }
}

#[test]
fn function_words_head_their_own_chunks() {
    let s = sentence(&[
        (1, "oh", "oh", Upos::Intj, 0, "root"),
        (2, "que", "que", Upos::Sconj, 1, "mark"),
        (3, "et", "et", Upos::Cconj, 1, "cc"),
        (4, "vite", "vite", Upos::Adv, 1, "advmod"),
    ]);
    assert_eq!(render(&level1(&s)), "[SN] oh [CSub] que [Coord] et [SAdv] vite");
}

#[test]
fn punctuation_is_always_isolated() {
    let s = sentence(&[
        (1, "«", "«", Upos::Punct, 3, "punct"),
        (2, "la", "le", Upos::Det, 3, "det"),
        (3, "ville", "ville", Upos::Noun, 0, "root"),
        (4, "-", "-", Upos::Punct, 3, "punct"),
        (5, "haute", "haut", Upos::Adj, 4, "amod"),
    ]);
    let chunks = level1(&s);
    assert_eq!(render(&chunks), "[Pct] « [SN] la ville [Pct] - [SAdj] haute");
    assert!(chunks.iter().filter(|c| c.category() == Category::Punct).all(|c| c.len() == 1));
}

#[test]
fn head_cycles_terminate_with_full_coverage() {
    let s = sentence(&[
        (1, "x", "x", Upos::Noun, 2, "nmod"),
        (2, "y", "y", Upos::Noun, 1, "nmod"),
        (3, "z", "z", Upos::Det, 3, "det"),
        (4, "w", "w", Upos::Adj, 0, "root"),
    ]);
    let chunks = level1(&s);
    assert_eq!(token_ids(&chunks), vec![1, 2, 3, 4]);
    assert_eq!(render(&chunks), "[SN] x y [SN] z [SAdj] w");
}

#[test]
fn empty_sentence_yields_no_chunks() {
    let s = Sentence::from_tokens("empty", Vec::new());
    assert!(level1(&s).is_empty());
}

// --- Level 2 -------------------------------------------------------------------

#[test]
fn subject_verb_merge_single_pass() {
    let s = sentence(&[
        (1, "Il", "il", Upos::Pron, 2, "nsubj"),
        (2, "est", "être", Upos::Aux, 0, "root"),
        (3, "18 h 30", "18 h 30", Upos::Num, 2, "obl"),
    ]);
    let chunks = singletons(&s, &[Category::SubjectPronoun, Category::VerbPhrase, Category::NounPhrase]);
    let rules = vec![rule! { id: "subject_verb", pattern: [SubjectPronoun, VerbPhrase] => VerbPhrase }];
    let merger = Merger::new(&rules, Lexicon::french(), MergeOptions::default());

    let merged = merger.merge(chunks);
    assert_eq!(merged.len(), 2);
    assert_eq!(render(&merged), "[SV] Il est [SN] 18 h 30");
}

#[test]
fn temporal_cascade_needs_multi_pass() {
    let s = sentence(&[
        (1, "18 h 30", "18 h 30", Upos::Noun, 0, "root"),
        (2, "lundi", "lundi", Upos::Noun, 1, "nmod"),
        (3, "janvier", "janvier", Upos::Noun, 1, "nmod"),
    ]);
    let categories = [Category::NounPhrase; 3];
    let rules = vec![rule! {
        id: "temporal_merge",
        pattern: [NounPhrase, NounPhrase] => NounPhrase,
        condition: "both_temporal",
    }];
    // "18 h 30" is one token here, so it is not itself in the lexicon.
    let lexicon = {
        let mut lexicon = Lexicon::french().clone();
        lexicon.temporal.insert("18 h 30".to_string());
        lexicon
    };

    let single =
        Merger::new(&rules, &lexicon, MergeOptions::default()).merge_with_metrics(singletons(&s, &categories));
    assert_eq!(single.chunks.len(), 2);
    assert_eq!(render(&single.chunks), "[SN] 18 h 30 lundi [SN] janvier");
    assert_eq!(single.metrics.pass_count(), 1);
    assert!(!single.metrics.converged);

    let multi =
        Merger::new(&rules, &lexicon, MergeOptions::multi_pass()).merge_with_metrics(singletons(&s, &categories));
    assert_eq!(multi.chunks.len(), 1);
    assert_eq!(multi.metrics.total_merges, 2);
    assert_eq!(multi.metrics.pass_count(), 3);
    assert!(multi.metrics.converged);
    let events: Vec<(usize, usize)> = multi.metrics.events().map(|e| (e.pass, e.position)).collect();
    assert_eq!(events, vec![(1, 0), (2, 0)]);
}

#[test]
fn first_matching_rule_wins() {
    let s = sentence(&[(1, "a", "a", Upos::Noun, 0, "root"), (2, "b", "b", Upos::Noun, 1, "nmod")]);
    let rules = vec![
        rule! { id: "never", pattern: [NounPhrase, NounPhrase] => VerbPhrase, condition: "both_temporal" },
        rule! { id: "first", pattern: [NounPhrase, NounPhrase] => AdjPhrase },
        rule! { id: "second", pattern: [NounPhrase, NounPhrase] => NounPhrase },
    ];
    let outcome = Merger::new(&rules, Lexicon::french(), MergeOptions::default())
        .merge_with_metrics(singletons(&s, &[Category::NounPhrase; 2]));

    assert_eq!(render(&outcome.chunks), "[SAdj] a b");
    let event = &outcome.metrics.passes[0].events[0];
    assert_eq!(event.rule_id, "first");
    assert_eq!(event.consumed, 2);
    assert_eq!(event.text, "[SAdj] a b");
}

#[test]
fn scan_advances_past_a_merge() {
    let s = sentence(&[
        (1, "a", "a", Upos::Noun, 0, "root"),
        (2, "b", "b", Upos::Noun, 1, "nmod"),
        (3, "c", "c", Upos::Noun, 1, "nmod"),
        (4, "d", "d", Upos::Noun, 1, "nmod"),
        (5, "e", "e", Upos::Noun, 1, "nmod"),
    ]);
    let rules = vec![rule! { id: "pair", pattern: [NounPhrase, NounPhrase] => NounPhrase }];
    let merged = Merger::new(&rules, Lexicon::french(), MergeOptions::default())
        .merge(singletons(&s, &[Category::NounPhrase; 5]));
    assert_eq!(render(&merged), "[SN] a b [SN] c d [SN] e");
}

#[test]
fn pass_limit_stops_without_error() {
    let words = ["a", "b", "c", "d", "e", "f", "g", "h"];
    let tokens: Vec<Token> =
        (1u32..).zip(words).map(|(id, w)| Token::new(id, w, w, Upos::Noun, 0, "root")).collect();
    let s = Sentence::from_tokens("limit", tokens);
    let rules = vec![rule! { id: "pair", pattern: [NounPhrase, NounPhrase] => NounPhrase }];

    let bounded = MergeOptions::multi_pass().with_max_passes(2);
    let outcome = Merger::new(&rules, Lexicon::french(), bounded).merge_with_metrics(level1(&s));
    assert_eq!(outcome.chunks.len(), 2);
    assert_eq!(outcome.metrics.total_merges, 6);
    assert!(!outcome.metrics.converged);

    let zero = MergeOptions::multi_pass().with_max_passes(0);
    let outcome = Merger::new(&rules, Lexicon::french(), zero).merge_with_metrics(level1(&s));
    assert_eq!(outcome.chunks.len(), 4);
    assert_eq!(outcome.metrics.pass_count(), 1);
}

#[test]
fn unknown_condition_disables_rule() {
    let s = sentence(&[(1, "Il", "il", Upos::Pron, 2, "nsubj"), (2, "dort", "dormir", Upos::Verb, 0, "root")]);
    let rules = vec![rule! {
        id: "subject_verb",
        pattern: [SubjectPronoun, VerbPhrase] => VerbPhrase,
        condition: "no_such_condition",
    }];
    let merger = Merger::new(&rules, Lexicon::french(), MergeOptions::multi_pass());
    assert_eq!(merger.rules().disabled.len(), 1);

    let outcome = merger.merge_with_metrics(level1(&s));
    assert_eq!(render(&outcome.chunks), "[SujV] Il [SV] dort");
    assert_eq!(outcome.metrics.total_merges, 0);
}

#[test]
fn empty_rule_list_passes_through() {
    let s = sentence(&[(1, "Il", "il", Upos::Pron, 2, "nsubj"), (2, "dort", "dormir", Upos::Verb, 0, "root")]);
    let chunks = level1(&s);
    let outcome = Merger::new(&[], Lexicon::french(), MergeOptions::multi_pass()).merge_with_metrics(chunks.clone());
    assert_eq!(outcome.chunks, chunks);
    assert!(outcome.metrics.passes.is_empty());
}

#[test]
fn custom_registry_conditions_are_used() {
    fn never(_: &[Chunk<'_>], _: &Lexicon) -> bool {
        false
    }

    let s = sentence(&[(1, "Il", "il", Upos::Pron, 2, "nsubj"), (2, "dort", "dormir", Upos::Verb, 0, "root")]);
    let mut registry = ConditionRegistry::builtin();
    registry.register("adjacent", never);
    let rules = vec![rule! { id: "subject_verb", pattern: [SubjectPronoun, VerbPhrase] => VerbPhrase }];

    let merger = Merger::with_registry(&rules, &registry, Lexicon::french(), MergeOptions::default());
    assert_eq!(render(&merger.merge(level1(&s))), "[SujV] Il [SV] dort");
}

#[test]
fn category_gating_skips_unreachable_rules() {
    let rules = vec![
        Rule::new("adverb_verb", vec![Category::AdvPhrase, Category::VerbPhrase], Category::VerbPhrase),
        Rule::new("noun_adjective", vec![Category::NounPhrase, Category::AdjPhrase], Category::NounPhrase),
        Rule::new("pair", vec![Category::NounPhrase, Category::NounPhrase], Category::NounPhrase),
    ];
    let compiled = CompiledRules::new(&rules, &ConditionRegistry::builtin());
    assert_eq!(compiled.produces, CategorySet::SV | CategorySet::SN);

    let active = compiled.active(CategorySet::SN);
    let ids: Vec<&str> = active.iter().map(|r| r.rule.id.as_str()).collect();
    assert_eq!(ids, vec!["pair"]);

    let all = compiled.active(CategorySet::SN | CategorySet::SADV | CategorySet::SADJ);
    assert_eq!(all.len(), 3);
}

#[test]
fn french_rules_on_a_clause() {
    let s = sentence(&[
        (1, "Il", "il", Upos::Pron, 2, "nsubj"),
        (2, "mange", "manger", Upos::Verb, 0, "root"),
        (3, "la", "le", Upos::Det, 4, "det"),
        (4, "souris", "souris", Upos::Noun, 2, "obj"),
        (5, "grise", "gris", Upos::Adj, 4, "acl"),
        (6, ".", ".", Upos::Punct, 2, "punct"),
    ]);
    let rules = french_rules();
    let chunks = level1(&s);
    assert_eq!(render(&chunks), "[SujV] Il [SV] mange [SN] la souris [SAdj] grise [Pct] .");

    let single = Merger::new(&rules, Lexicon::french(), MergeOptions::default()).merge(chunks.clone());
    assert_eq!(render(&single), "[SV] Il mange [SN] la souris grise [Pct] .");

    let multi = Merger::new(&rules, Lexicon::french(), MergeOptions::multi_pass()).merge(chunks);
    assert_eq!(render(&multi), "[SV] Il mange la souris grise [Pct] .");
}

#[test]
fn coordinated_noun_phrases_merge() {
    let s = sentence(&[
        (1, "le", "le", Upos::Det, 2, "det"),
        (2, "chat", "chat", Upos::Noun, 0, "root"),
        (3, "et", "et", Upos::Cconj, 5, "cc"),
        (4, "le", "le", Upos::Det, 5, "det"),
        (5, "chien", "chien", Upos::Noun, 2, "conj"),
    ]);
    let chunks = level1(&s);
    assert_eq!(render(&chunks), "[SN] le chat [Coord] et [SN] le chien");

    let rules = french_rules();
    let outcome = Merger::new(&rules, Lexicon::french(), MergeOptions::default()).merge_with_metrics(chunks);
    assert_eq!(render(&outcome.chunks), "[SN] le chat et le chien");
    let fired: Vec<&str> = outcome.metrics.events().map(|e| e.rule_id.as_str()).collect();
    assert_eq!(fired, vec!["coordination"]);
}

#[test]
fn converged_output_is_a_fixpoint() {
    let s = sentence(&[
        (1, "Il", "il", Upos::Pron, 2, "nsubj"),
        (2, "dit", "dire", Upos::Verb, 0, "root"),
        (3, "le", "le", Upos::Det, 4, "det"),
        (4, "docteur", "docteur", Upos::Noun, 2, "nsubj"),
        (5, "Moulin", "Moulin", Upos::Propn, 2, "obj"),
    ]);
    let rules = french_rules();
    let merger = Merger::new(&rules, Lexicon::french(), MergeOptions::multi_pass());
    let first = merger.merge_with_metrics(level1(&s));
    assert!(first.metrics.converged);

    let again = merger.merge_with_metrics(first.chunks.clone());
    assert_eq!(again.metrics.total_merges, 0);
    assert_eq!(again.chunks, first.chunks);
    assert_eq!(token_ids(&again.chunks), vec![1, 2, 3, 4, 5]);
}
