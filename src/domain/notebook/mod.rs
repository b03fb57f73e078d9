//! Notebook aggregate

pub mod model;
pub mod repository;

pub use model::{
    Notebook, NotebookChanges, NotebookEvaluation, NotebookEvaluationRow, NotebookState,
    Reflection,
};
pub use repository::NotebookRepository;
