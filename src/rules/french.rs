use crate::Rule;

/// Default French merge rules, in priority order.
///
/// Order matters: at each position the merger applies the first rule whose
/// pattern and condition both hold, so longer and more specific patterns
/// come first.
pub fn french_rules() -> Vec<Rule> {
    vec![
        // "De retour aux urgences , les médecins sont" -> one SV
        rule! {
            id: "adverbial_introducer",
            pattern: [NounPhrase, Punct, NounPhrase, VerbPhrase] => VerbPhrase,
            condition: "first_is_adverbial_and_comma",
            description: "Sentence-initial prepositional phrase, comma, subject and verb",
        },
        rule! {
            id: "subject_object_verb",
            pattern: [SubjectPronoun, ObjectPronoun, VerbPhrase] => VerbPhrase,
            description: "Subject pronoun, object clitic and verb",
        },
        rule! {
            id: "subject_verb",
            pattern: [SubjectPronoun, VerbPhrase] => VerbPhrase,
            condition: "adjacent",
            description: "Merge subject pronoun with verb",
        },
        rule! {
            id: "object_pronoun_verb",
            pattern: [ObjectPronoun, VerbPhrase] => VerbPhrase,
            description: "Object clitic attached to its verb",
        },
        rule! {
            id: "adverb_verb",
            pattern: [AdvPhrase, VerbPhrase] => VerbPhrase,
        },
        rule! {
            id: "verb_adverb",
            pattern: [VerbPhrase, AdvPhrase] => VerbPhrase,
            condition: "adjacent_no_punctuation",
        },
        // "le docteur" + "Moulin"
        rule! {
            id: "title_name",
            pattern: [NounPhrase, NounPhrase] => NounPhrase,
            condition: "title_followed_by_propn",
        },
        // "18 h 30" + "ce lundi 27 janvier"
        rule! {
            id: "temporal_merge",
            pattern: [NounPhrase, NounPhrase] => NounPhrase,
            condition: "both_temporal",
        },
        rule! {
            id: "quantity_complement",
            pattern: [NounPhrase, NounPhrase] => NounPhrase,
            condition: "first_is_quantity_second_has_prep",
        },
        // "en urgences" + "à l'hôpital"
        rule! {
            id: "prepositional_chain",
            pattern: [NounPhrase, NounPhrase] => NounPhrase,
            condition: "both_have_preposition",
        },
        rule! {
            id: "preposition_completion",
            pattern: [PrepPhrase, NounPhrase] => PrepPhrase,
        },
        rule! {
            id: "relative_clause",
            pattern: [NounPhrase, VerbPhrase] => NounPhrase,
            condition: "sv_starts_with_relative",
        },
        // "poursuit le docteur"
        rule! {
            id: "speech_inversion",
            pattern: [VerbPhrase, NounPhrase] => VerbPhrase,
            condition: "is_speech_verb",
        },
        rule! {
            id: "verb_direct_object",
            pattern: [VerbPhrase, NounPhrase] => VerbPhrase,
            condition: "adjacent_no_punctuation",
        },
        rule! {
            id: "noun_adjective",
            pattern: [NounPhrase, AdjPhrase] => NounPhrase,
        },
        rule! {
            id: "coordination",
            pattern: [NounPhrase, Coordinator, NounPhrase] => NounPhrase,
        },
        rule! {
            id: "enumeration",
            pattern: [NounPhrase, Punct, NounPhrase] => NounPhrase,
            condition: "pct_is_comma",
        },
    ]
}
