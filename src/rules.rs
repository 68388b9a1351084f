//! Level 2 rule model and the data it runs on.
//!
//! A [`Rule`] is plain configuration: a category pattern, a result category
//! and the *name* of a condition. Names are resolved against a
//! [`ConditionRegistry`] when the merger compiles its rule list, so adding a
//! condition means registering one more function, not touching the matcher.
//!
//! - `model.rs`: the `Rule` record and its pattern/merge contract.
//! - `conditions.rs`: the registry and the built-in predicates.
//! - `helpers.rs`: chunk-level lexical tests shared by the predicates.
//! - `lexicon.rs`: word lists injected into the predicates.
//! - `french.rs`: the default French rule set.
//! - `config.rs`: JSON loading for rules and lexicons.

#[path = "rules/conditions.rs"]
mod conditions;
#[path = "rules/config.rs"]
mod config;
#[path = "rules/french.rs"]
mod french;
#[path = "rules/helpers.rs"]
pub(crate) mod helpers;
#[path = "rules/lexicon.rs"]
mod lexicon;
#[path = "rules/model.rs"]
mod model;


pub use conditions::{ConditionFn, ConditionRegistry};
pub use config::{ConfigError, load_lexicon, load_rules, parse_lexicon, parse_rules};
pub use french::french_rules;
pub use lexicon::Lexicon;
pub use model::Rule;
