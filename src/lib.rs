//! ABCU course advisor.
//!
//! Loads a comma-separated course catalog into an in-memory table, rejects the whole file if
//! any row is malformed, duplicated or names an unknown prerequisite, and answers two queries
//! over the committed catalog: the full list sorted by course id, and a single course with its
//! prerequisites.

pub mod catalog;
pub mod config;
pub mod course;
pub mod loader;
pub mod textinterface;

pub use catalog::{Catalog, CatalogError, CatalogStore};
pub use config::Config;
pub use course::{Course, CourseView};
pub use loader::{load, load_file, FormatError, LoadError};
pub use textinterface::{TextInterface, TextInterfaceError};
