use std::collections::HashMap;
use std::path::Path;

use chrono::prelude::*;
use thiserror::Error;
use tracing::info;

use crate::course::{Course, CourseView};
use crate::loader;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Validated mapping from course id to course.  Only the loader builds one, so every
/// prerequisite in a `Catalog` names another key of the same catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    courses: HashMap<String, Course>,
}

impl Catalog {
    pub fn empty() -> Self {
        Catalog {
            courses: HashMap::new(),
        }
    }

    pub(crate) fn from_courses(courses: Vec<Course>) -> Self {
        Catalog {
            courses: courses
                .into_iter()
                .map(|course| (String::from(course.id()), course))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Course> {
        self.courses.get(id)
    }

    /// Every course, ordered by id.
    pub fn sorted(&self) -> Vec<&Course> {
        let mut list: Vec<&Course> = self.courses.values().collect();
        list.sort_by(|a, b| a.id().cmp(b.id()));
        list
    }
}

/// CatalogStore owns the committed catalog and is the only way the rest of the program reads
/// or replaces it.  A new catalog is swapped in whole; a failed load leaves the previous one
/// in place.
pub struct CatalogStore {
    catalog: Catalog,
    loaded_at: Option<NaiveDateTime>,
}

impl CatalogStore {
    /// Start with an empty, never-loaded catalog.
    pub fn init() -> Self {
        CatalogStore {
            catalog: Catalog::empty(),
            loaded_at: None,
        }
    }

    /// Commit `catalog` in place of the current one.
    pub fn replace(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.loaded_at = Some(Local::now().naive_local());
    }

    /// Load the file at `path` and commit it on success.  Returns the number of committed
    /// courses.  On any error the current catalog is left untouched.
    pub fn load_from_path(&mut self, path: &Path) -> loader::Result<usize> {
        let staged = loader::load_file(path)?;
        let count = staged.len();

        self.replace(staged);
        info!(courses = count, path = %path.display(), "catalog committed");

        Ok(count)
    }

    /// (id, title) for every course, sorted by id.
    pub fn list_all(&self) -> Vec<(&str, &str)> {
        self.catalog
            .sorted()
            .into_iter()
            .map(|course| (course.id(), course.title()))
            .collect()
    }

    pub fn describe(&self, id: &str) -> Result<CourseView<'_>> {
        self.catalog
            .get(id)
            .map(Course::view)
            .ok_or_else(|| CatalogError::NotFound(String::from(id)))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Local time of the last successful commit, `None` if nothing was ever loaded.
    pub fn loaded_at(&self) -> Option<NaiveDateTime> {
        self.loaded_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Course {0} not found")]
    NotFound(String),
}
