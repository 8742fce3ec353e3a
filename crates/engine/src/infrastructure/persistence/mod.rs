//! File persistence for exported homebrew documents.

mod json_file;

pub use json_file::{write_to_file, PersistenceError};
