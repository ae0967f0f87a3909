//! Core entities: documents and relevance grades.
//!
//! A [`Document`] is one retrievable search result, identified by an opaque
//! unique `id` (often a URL or a backend-assigned key). Everything else the
//! backend returns (score, stored fields) is carried as opaque pass-through.
//! A [`Grade`] is the assessor-assigned relevance level attached to a
//! document; `-1` means unjudged.


use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Highest defined relevance level. Judged grades are `0..=MAX_LEVEL`.
pub const MAX_GRADE_LEVEL: i8 = 2;

/// A grade value outside `-1..=MAX_GRADE_LEVEL` was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid grade {0}: must be -1 (ungraded) or 0..={MAX_GRADE_LEVEL}")]
pub struct InvalidGrade(pub i8);

/// Assessor-assigned relevance level.
///
/// `-1` is the ungraded sentinel ([`Grade::UNGRADED`]); judged levels run
/// from `0` (not relevant) to [`MAX_GRADE_LEVEL`] (highly relevant).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub struct Grade(i8);

impl Grade {
    /// The "not yet judged" sentinel.
    pub const UNGRADED: Grade = Grade(-1);

    /// Creates a judged grade. Returns `None` above [`MAX_GRADE_LEVEL`].
    #[inline]
    pub fn level(level: u8) -> Option<Grade> {
        let level = i8::try_from(level).ok()?;
        (level <= MAX_GRADE_LEVEL).then_some(Grade(level))
    }

    /// Returns `true` if this grade has been judged (not `-1`).
    #[inline]
    pub fn is_judged(&self) -> bool {
        self.0 >= 0
    }

    /// Returns the raw grade value (`-1` for ungraded).
    #[inline]
    pub fn value(&self) -> i8 {
        self.0
    }
}

impl Default for Grade {
    fn default() -> Self {
        Self::UNGRADED
    }
}

impl TryFrom<i8> for Grade {
    type Error = InvalidGrade;

    fn try_from(value: i8) -> Result<Self, Self::Error> {
        if (-1..=MAX_GRADE_LEVEL).contains(&value) {
            Ok(Grade(value))
        } else {
            Err(InvalidGrade(value))
        }
    }
}

impl From<Grade> for i8 {
    fn from(grade: Grade) -> Self {
        grade.0
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One retrievable search result with its current grade.
///
/// Identity is the `id` field across all components: grade carry-over on
/// re-query, grade mutation, and export all key on it. `score` and `fields`
/// are backend pass-through and never interpreted by the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Opaque unique identifier (e.g. a crawled URL).
    pub id: String,

    /// Backend relevance score, if the backend returned one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Remaining backend-returned fields (snippet, source, ...), untouched.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub fields: serde_json::Map<String, serde_json::Value>,

    /// Current relevance grade. Defaults to ungraded on first appearance.
    #[serde(default)]
    pub grade: Grade,
}

impl Document {
    /// Creates an ungraded document with no rank metadata.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            score: None,
            fields: serde_json::Map::new(),
            grade: Grade::UNGRADED,
        }
    }

    /// Attaches a backend score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Attaches backend pass-through fields.
    pub fn with_fields(mut self, fields: serde_json::Map<String, serde_json::Value>) -> Self {
        self.fields = fields;
        self
    }

    /// Sets the grade.
    pub fn with_grade(mut self, grade: Grade) -> Self {
        self.grade = grade;
        self
    }
}
