//! Grade tracking across re-queries.
//!
//! The store holds exactly one thing: the current result list with grades
//! attached. Merging a fresh result set carries grades over by document id;
//! a document that drops out of the result set loses its grade with it
//! (grades live only as long as the document stays visible).


use std::collections::HashMap;

use tracing::debug;

use crate::model::{Document, Grade};

/// The current graded result list.
#[derive(Debug, Default)]
pub struct GradeStore {
    documents: Vec<Document>,
}

impl GradeStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the held list with a freshly fetched one, carrying grades
    /// over from any previously known document sharing the same id.
    ///
    /// Fresh documents arrive ungraded; ids not seen before stay ungraded.
    /// Backend order is preserved.
    pub fn merge(&mut self, fresh: Vec<Document>) -> &[Document] {
        let prior: HashMap<String, Grade> = self
            .documents
            .drain(..)
            .map(|d| (d.id, d.grade))
            .collect();

        self.documents = fresh
            .into_iter()
            .map(|mut doc| {
                if let Some(grade) = prior.get(&doc.id) {
                    doc.grade = *grade;
                }
                doc
            })
            .collect();

        &self.documents
    }

    /// Sets the grade of the document with the given id.
    ///
    /// Every other document and the list order are untouched. An unknown id
    /// is a no-op returning `false`.
    pub fn set_grade(&mut self, id: &str, grade: Grade) -> bool {
        match self.documents.iter_mut().find(|d| d.id == id) {
            Some(doc) => {
                doc.grade = grade;
                true
            }
            None => {
                debug!(id, "grade for unknown document id ignored");
                false
            }
        }
    }

    /// Returns the current graded result list in backend order.
    #[inline]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Returns the number of held documents.
    #[inline]
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Returns `true` if the result list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Returns the number of judged documents.
    pub fn judged_count(&self) -> usize {
        self.documents.iter().filter(|d| d.grade.is_judged()).count()
    }
}
