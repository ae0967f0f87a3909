use serde::Serialize;

use crate::model::{Document, Grade};

/// A discrete user intent routed through the session controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Raw query input changed (every keystroke).
    TextChanged(String),
    /// A relevance grade was clicked for a visible document.
    GradeClicked {
        /// Target document id.
        id: String,
        /// New grade.
        grade: Grade,
    },
    /// The export dialog was opened.
    DialogOpened,
    /// The export dialog was closed.
    DialogClosed,
    /// The query-id export label changed.
    QueryIdChanged(String),
    /// The assessor-id export label changed.
    AssessorIdChanged(String),
}

/// Immutable view-state handed to the presentation layer after every
/// mutation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Current raw query text.
    pub text: String,
    /// Current graded result list in backend order.
    pub documents: Vec<Document>,
    /// Whether the export dialog is open.
    pub dialog_open: bool,
    /// Query-id label attached at export time.
    pub query_id: String,
    /// Assessor-id label attached at export time.
    pub assessor_id: String,
    /// Last non-fatal backend error, cleared by the next applied result.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
}
