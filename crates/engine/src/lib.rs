//! Bestiary Engine library.
//!
//! Server-side code for the monster authoring backend.
//!
//! ## Structure
//!
//! - `use_cases/` - Form parsing, monster submission, character export
//! - `stores/` - Shared in-memory collections
//! - `infrastructure/` - Clock, configuration and file output
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
