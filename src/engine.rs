//! Chunking and merging engine.
//!
//! The engine is split into focused submodules under `src/engine/`; this file
//! is the public entry point and keeps the paths stable
//! (`crate::engine::Merger`, `crate::engine::PhraseChunker`, ...).
//!
//! ## How the parts work together
//!
//! Analysing one sentence is a two-level pipeline:
//!
//! ```text
//! Sentence (token arena + children map)
//!     │
//!     │  PhraseChunker::chunk                 (phrase.rs)
//!     │    - resolve each token's phrase head (walk up merge relations)
//!     │    - collect the head's phrase (walk down merge relations)
//!     │    - punctuation -> singleton chunks
//!     v
//! Level 1 chunks (sorted by first token id)
//!     │
//! rules ──┐  CompiledRules::new               (compiled_rules.rs)
//!         └── resolve condition names, category sets
//!     │
//!     │  Merger::merge                        (merger.rs)
//!     │    - left-to-right scan, first matching rule wins
//!     │    - repeat passes until no merge happens (multi-pass)
//!     v
//! Level 2 chunks
//! ```
//!
//! Merging is a **fixpoint** computation: every merge strictly reduces the
//! number of chunks, so the pass loop always terminates; `max_passes` only
//! bounds the work on pathological rule sets.
//!
//! ## Responsibilities by module
//!
//! - `phrase.rs`: Level 1 phrase chunking over a dependency tree.
//! - `compiled_rules.rs`: derives `CompiledRules` from `Rule`s, resolving each
//!   condition name once and recording which categories a rule needs.
//! - `merger.rs`: the Level 2 pass loop.
//! - `metrics.rs`: per-pass timing and merge events.
//!
//! ## Debugging
//!
//! Merge decisions are emitted as `debug` events on the `syntagma` tracing
//! target; run the CLI with `--debug` or `RUST_LOG=syntagma=debug`.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/merger.rs"]
mod merger;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/phrase.rs"]
mod phrase;

#[cfg(test)]
#[path = "engine/tests.rs"]
mod tests;

pub use compiled_rules::{CompiledRule, CompiledRules};
pub use merger::{MergeOptions, MergeOutcome, Merger};
pub use metrics::{MergeEvent, MergeMetrics, PassMetrics};
pub use phrase::{PhraseChunker, PhraseConfig, category_for};
