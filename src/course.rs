use std::fmt;

/// A single catalog entry.  The id is the primary key and is compared case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: String,
    title: String,
    prerequisites: Vec<String>,
}

impl Course {
    pub fn new(id: &str, title: &str, prerequisites: Vec<String>) -> Self {
        Course {
            id: String::from(id),
            title: String::from(title),
            prerequisites,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Prerequisite ids in the order they appeared on the source line.
    pub fn prerequisites(&self) -> &[String] {
        &self.prerequisites
    }

    pub fn view(&self) -> CourseView<'_> {
        CourseView {
            id: &self.id,
            title: &self.title,
            prerequisites: &self.prerequisites,
        }
    }
}

/// Read-only view of a course, handed out by `CatalogStore::describe`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseView<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub prerequisites: &'a [String],
}

impl<'a> fmt::Display for CourseView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{}: {}", self.id, self.title)?;

        if self.prerequisites.is_empty() {
            return write!(f, "   Prerequisites: none");
        }

        write!(f, "   Prerequisites:")?;
        for prereq in self.prerequisites {
            write!(f, "\n      {}", prereq)?;
        }
        Ok(())
    }
}
