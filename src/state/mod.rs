/// State management module
///
/// This module handles all application state, including:
/// - The SQLite contact store and its live snapshot (store.rs)
/// - The repository boundary over the store (repository.rs)
/// - The view model the screens bind to (view_model.rs)
/// - Shared data structures (data.rs)
/// - Screen navigation and the add-contact form (navigation.rs, form.rs)

pub mod data;
pub mod form;
pub mod navigation;
pub mod repository;
pub mod store;
pub mod view_model;
