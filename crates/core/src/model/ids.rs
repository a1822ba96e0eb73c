use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Separator between the module name and the position inside the module.
pub const ID_SEPARATOR: &str = "::";

/// Stable identifier for a Question: `module::index`.
///
/// Derived from where the record sits in its source module, so reloading an
/// unchanged bank yields the same ids.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(String);

impl QuestionId {
    /// Creates a `QuestionId` for the record at `index` inside `module`.
    #[must_use]
    pub fn new(module: &str, index: usize) -> Self {
        Self(format!("{module}{ID_SEPARATOR}{index}"))
    }

    /// Returns the id as it is persisted.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Module part of the id.
    #[must_use]
    pub fn module(&self) -> &str {
        self.0
            .rsplit_once(ID_SEPARATOR)
            .map_or(self.0.as_str(), |(module, _)| module)
    }

    /// Position of the record inside its module.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        self.0
            .rsplit_once(ID_SEPARATOR)
            .and_then(|(_, index)| index.parse().ok())
    }
}

impl fmt::Debug for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QuestionId({})", self.0)
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ─── FromStr Implementation ────────────────────────────────────────────────────

/// Error type for parsing a `QuestionId` from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    raw: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse QuestionId from {:?}", self.raw)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for QuestionId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseIdError { raw: s.to_string() };
        let (module, index) = s.rsplit_once(ID_SEPARATOR).ok_or_else(err)?;
        if module.is_empty() {
            return Err(err());
        }
        let index = index.parse::<usize>().map_err(|_| err())?;
        Ok(Self::new(module, index))
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────
