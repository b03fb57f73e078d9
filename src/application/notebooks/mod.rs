//! Notebook evaluation lifecycle

pub mod service;

pub use service::NotebookService;
