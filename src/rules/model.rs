use crate::{Category, Chunk};

/// Condition name used when a rule does not name one.
pub(crate) const UNCONDITIONAL: &str = "adjacent";

/// A Level 2 merge rule: when the chunk categories starting at some position
/// equal `pattern` and the named condition holds over those chunks, replace
/// them with one chunk of category `result`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Diagnostic label (shows up in merge events and logs).
    pub id: String,
    pub pattern: Vec<Category>,
    pub result: Category,
    /// Condition name; `None` means unconditional.
    pub condition: Option<String>,
    pub description: Option<String>,
}

impl Rule {
    pub fn new(id: impl Into<String>, pattern: Vec<Category>, result: Category) -> Self {
        Rule { id: id.into(), pattern, result, condition: None, description: None }
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = Some(condition.into());
        self
    }

    /// Condition name, with absent/empty names reported as `adjacent`.
    pub fn condition_name(&self) -> &str {
        match self.condition.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => UNCONDITIONAL,
        }
    }

    /// Exact, contiguous, bounds-checked category match at `start`.
    pub fn matches_at(&self, chunks: &[Chunk<'_>], start: usize) -> bool {
        let Some(window) = start.checked_add(self.pattern.len()).and_then(|end| chunks.get(start..end)) else {
            return false;
        };
        !self.pattern.is_empty() && window.iter().zip(&self.pattern).all(|(chunk, &cat)| chunk.category() == cat)
    }

    /// Merge `matched` (the window a successful match covers) into one chunk.
    pub fn apply<'s>(&self, matched: &[Chunk<'s>]) -> Chunk<'s> {
        Chunk::merged(self.result, matched)
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pattern = self.pattern.iter().map(|c| c.code()).collect::<Vec<_>>().join(" + ");
        write!(f, "{}({} -> {})", self.id, pattern, self.result)
    }
}
