use once_cell::sync::Lazy;
use serde::Deserialize;
use std::collections::HashSet;

static FRENCH: Lazy<Lexicon> = Lazy::new(Lexicon::build_french);

/// Word lists consulted by the built-in conditions.
///
/// Entries are stored lowercased; lookups lowercase their argument, so
/// "Lundi" and "lundi" both hit. A lexicon is read-only once built and is
/// shared by reference across every sentence of a run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Lexicon {
    /// Temporal expressions: time units, parts of day, weekdays, months...
    pub temporal: HashSet<String>,
    pub prepositions: HashSet<String>,
    pub relative_pronouns: HashSet<String>,
    /// Speech/quotation verbs, matched against lemmas.
    pub speech_verbs: HashSet<String>,
    /// Units and measure words.
    pub quantity: HashSet<String>,
    /// Title words (docteur, madame, ...).
    pub titles: HashSet<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Lexicon::french().clone()
    }
}

fn word_set(words: &[&str]) -> HashSet<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}

impl Lexicon {
    /// Shared French lexicon.
    pub fn french() -> &'static Lexicon {
        &FRENCH
    }

    fn build_french() -> Self {
        Lexicon {
            temporal: word_set(&[
                // Time units
                "h",
                "heure",
                "heures",
                "minute",
                "minutes",
                "seconde",
                "secondes",
                // Parts of day
                "matin",
                "midi",
                "après-midi",
                "soir",
                "nuit",
                "minuit",
                // Days
                "lundi",
                "mardi",
                "mercredi",
                "jeudi",
                "vendredi",
                "samedi",
                "dimanche",
                "jour",
                "jours",
                "journée",
                // Months
                "janvier",
                "février",
                "mars",
                "avril",
                "mai",
                "juin",
                "juillet",
                "août",
                "septembre",
                "octobre",
                "novembre",
                "décembre",
                // Periods
                "mois",
                "an",
                "ans",
                "année",
                "années",
                "semaine",
                "semaines",
                // References
                "hier",
                "aujourd'hui",
                "demain",
                "maintenant",
                "ce",
                "cette",
                "dernier",
                "dernière",
                "prochain",
                "prochaine",
            ]),
            prepositions: word_set(&[
                "à", "de", "en", "dans", "sur", "sous", "pour", "par", "avec", "sans", "chez", "vers", "contre",
                "depuis", "pendant", "avant", "après", "devant", "derrière", "entre", "parmi", "selon",
            ]),
            relative_pronouns: word_set(&[
                "qui",
                "que",
                "qu'",
                "dont",
                "où",
                "lequel",
                "laquelle",
                "lesquels",
                "lesquelles",
                "auquel",
                "duquel",
                "auxquels",
            ]),
            speech_verbs: word_set(&[
                "dire",
                "confier",
                "rappeler",
                "poursuivre",
                "ajouter",
                "conclure",
                "affirmer",
                "déclarer",
                "expliquer",
                "raconter",
                "répondre",
                "demander",
                "interroger",
                "préciser",
            ]),
            quantity: word_set(&[
                "kilo",
                "kilos",
                "gramme",
                "grammes",
                "litre",
                "litres",
                "mètre",
                "mètres",
                "centimètre",
                "kilomètre",
                "heure",
                "heures",
                "minute",
                "minutes",
                "jour",
                "jours",
            ]),
            titles: word_set(&["docteur", "professeur", "monsieur", "madame", "mademoiselle"]),
        }
    }

    pub fn is_temporal(&self, word: &str) -> bool {
        self.temporal.contains(&word.to_lowercase())
    }

    pub fn is_preposition(&self, word: &str) -> bool {
        self.prepositions.contains(&word.to_lowercase())
    }

    pub fn is_relative_pronoun(&self, word: &str) -> bool {
        self.relative_pronouns.contains(&word.to_lowercase())
    }

    pub fn is_speech_verb(&self, lemma: &str) -> bool {
        self.speech_verbs.contains(&lemma.to_lowercase())
    }

    pub fn is_quantity(&self, word: &str) -> bool {
        self.quantity.contains(&word.to_lowercase())
    }

    pub fn is_title(&self, word: &str) -> bool {
        self.titles.contains(&word.to_lowercase())
    }

    /// Lowercase every entry (lexicons loaded from JSON may not be).
    pub(crate) fn normalized(self) -> Self {
        let lower = |set: HashSet<String>| set.into_iter().map(|w| w.to_lowercase()).collect();
        Lexicon {
            temporal: lower(self.temporal),
            prepositions: lower(self.prepositions),
            relative_pronouns: lower(self.relative_pronouns),
            speech_verbs: lower(self.speech_verbs),
            quantity: lower(self.quantity),
            titles: lower(self.titles),
        }
    }
}
