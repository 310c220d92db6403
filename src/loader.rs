//! Builds a `Catalog` from comma-separated course lines.
//!
//! Every line is parsed into a staged course list first; prerequisite references are only
//! checked once the whole stream has been read, so a course may name a prerequisite that is
//! defined further down the file.  Format errors are collected rather than returned on first
//! sight, and a load with any error never produces a catalog.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::course::Course;

pub type Result<T> = std::result::Result<T, LoadError>;

const FIELD_DELIMITER: char = ',';

/// Parse and validate every line of `source`.  Returns the staged catalog only if the stream
/// produced no format errors.
pub fn load<R: BufRead>(source: R) -> Result<Catalog> {
    let mut staged: Vec<Course> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut errors: Vec<FormatError> = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let line = line?;
        let line_no = index + 1;

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // A single trailing delimiter does not open another field.
        let fields: Vec<&str> = line
            .split_terminator(FIELD_DELIMITER)
            .map(str::trim)
            .collect();

        if fields.len() < 2 {
            debug!(line = line_no, "rejecting line with fewer than two fields");
            errors.push(FormatError::TooFewFields { line: line_no });
            continue;
        }

        let id = fields[0];
        if seen.contains(id) {
            debug!(line = line_no, id, "rejecting duplicate course id");
            errors.push(FormatError::DuplicateId {
                line: line_no,
                id: String::from(id),
            });
            continue;
        }
        seen.insert(String::from(id));

        let prerequisites = fields[2..]
            .iter()
            .filter(|field| !field.is_empty())
            .map(|field| String::from(*field))
            .collect();

        staged.push(Course::new(id, fields[1], prerequisites));
    }

    for course in &staged {
        for prereq in course.prerequisites() {
            if !seen.contains(prereq) {
                errors.push(FormatError::UnknownPrerequisite {
                    course: String::from(course.id()),
                    prerequisite: prereq.clone(),
                });
            }
        }
    }

    if !errors.is_empty() {
        warn!(errors = errors.len(), "catalog rejected");
        return Err(LoadError::Format(errors));
    }

    info!(courses = staged.len(), "catalog validated");
    Ok(Catalog::from_courses(staged))
}

/// Open `path` and run `load` over it.  Failure to open or read the file is reported as
/// `LoadError::Unavailable`.
pub fn load_file(path: &Path) -> Result<Catalog> {
    let file = File::open(path).map_err(|source| LoadError::Unavailable {
        path: path.to_path_buf(),
        source,
    })?;

    load(BufReader::new(file)).map_err(|e| match e {
        LoadError::Read(source) => LoadError::Unavailable {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Line {line}: fewer than 2 fields")]
    TooFewFields { line: usize },

    #[error("Line {line}: duplicate course {id}")]
    DuplicateId { line: usize, id: String },

    #[error("Course {course} lists unknown prerequisite {prerequisite}")]
    UnknownPrerequisite { course: String, prerequisite: String },
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read \"{}\": {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read error: {0}")]
    Read(#[from] io::Error),

    #[error("{} format error(s) in catalog file", .0.len())]
    Format(Vec<FormatError>),
}

impl LoadError {
    /// The collected format errors, or an empty slice for I/O failures.
    pub fn format_errors(&self) -> &[FormatError] {
        match self {
            LoadError::Format(errors) => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogStore;
    use pretty_assertions::assert_eq;
    use std::io::{Cursor, Write};

    fn load_str(input: &str) -> Result<Catalog> {
        load(Cursor::new(input))
    }

    fn errors_of(input: &str) -> Vec<FormatError> {
        match load_str(input) {
            Err(LoadError::Format(errors)) => errors,
            Err(e) => panic!("unexpected error: {}", e),
            Ok(_) => panic!("load unexpectedly succeeded"),
        }
    }

    #[test]
    fn loads_course_with_prerequisite() {
        let catalog = load_str("CSCI100,Intro to CS\nCSCI200,Data Structures,CSCI100\n").unwrap();

        assert_eq!(catalog.len(), 2);
        let course = catalog.get("CSCI200").unwrap();
        assert_eq!(course.title(), "Data Structures");
        assert_eq!(course.prerequisites(), &[String::from("CSCI100")]);
    }

    #[test]
    fn forward_references_are_legal() {
        let catalog = load_str("CSCI300,Algorithms,CSCI200\nCSCI200,Data Structures\n").unwrap();

        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn trims_lines_and_fields_and_drops_empty_prerequisites() {
        let input = "\n   \n  CSCI400 ,  Large Software ,CSCI300, ,  CSCI200 ,\r\n\
                     CSCI300,Algorithms\nCSCI200,Data Structures\n";
        let catalog = load_str(input).unwrap();

        let course = catalog.get("CSCI400").unwrap();
        assert_eq!(course.title(), "Large Software");
        assert_eq!(
            course.prerequisites(),
            &[String::from("CSCI300"), String::from("CSCI200")]
        );
    }

    #[test]
    fn prerequisites_keep_duplicates_and_order() {
        let catalog = load_str("B,Second\nA,First\nC,Third,B,A,B\n").unwrap();

        assert_eq!(
            catalog.get("C").unwrap().prerequisites(),
            &[String::from("B"), String::from("A"), String::from("B")]
        );
    }

    #[test]
    fn empty_input_is_an_empty_catalog() {
        assert!(load_str("").unwrap().is_empty());
        assert!(load_str("\n  \n\t\n").unwrap().is_empty());
    }

    #[test]
    fn single_field_line_is_too_few_fields() {
        assert_eq!(
            errors_of("CSCI100,Intro to CS\nOnlyOneField\n"),
            vec![FormatError::TooFewFields { line: 2 }]
        );
    }

    #[test]
    fn trailing_comma_does_not_add_a_field() {
        assert_eq!(
            errors_of("CSCI100,\n"),
            vec![FormatError::TooFewFields { line: 1 }]
        );
    }

    #[test]
    fn empty_title_is_accepted() {
        let catalog = load_str("A,,\n").unwrap();

        let course = catalog.get("A").unwrap();
        assert_eq!(course.title(), "");
        assert!(course.prerequisites().is_empty());
    }

    #[test]
    fn line_numbers_count_blank_lines() {
        assert_eq!(
            errors_of("\n\nCSCI100\n"),
            vec![FormatError::TooFewFields { line: 3 }]
        );
    }

    #[test]
    fn duplicate_id_is_reported_on_second_occurrence() {
        assert_eq!(
            errors_of("CSCI100,Intro to CS\nCSCI100,Something Else\n"),
            vec![FormatError::DuplicateId {
                line: 2,
                id: String::from("CSCI100"),
            }]
        );
    }

    #[test]
    fn ids_are_case_sensitive() {
        let catalog = load_str("csci100,lower\nCSCI100,upper\n").unwrap();

        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn unknown_prerequisite_is_reported() {
        assert_eq!(
            errors_of("CSCI300,Algorithms,CSCI999\n"),
            vec![FormatError::UnknownPrerequisite {
                course: String::from("CSCI300"),
                prerequisite: String::from("CSCI999"),
            }]
        );
    }

    #[test]
    fn all_errors_are_collected_in_one_pass() {
        let input = "CSCI100,Intro to CS\n\
                     Broken\n\
                     CSCI100,Again\n\
                     CSCI200,Data Structures,CSCI100,MATH999\n";

        assert_eq!(
            errors_of(input),
            vec![
                FormatError::TooFewFields { line: 2 },
                FormatError::DuplicateId {
                    line: 3,
                    id: String::from("CSCI100"),
                },
                FormatError::UnknownPrerequisite {
                    course: String::from("CSCI200"),
                    prerequisite: String::from("MATH999"),
                },
            ]
        );
    }

    #[test]
    fn skipped_line_does_not_satisfy_references() {
        // The too-few-fields row never becomes a known id.
        let errors = errors_of("MATH100\nCSCI100,Intro,MATH100\n");

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[1],
            FormatError::UnknownPrerequisite {
                course: String::from("CSCI100"),
                prerequisite: String::from("MATH100"),
            }
        );
    }

    #[test]
    fn invalid_utf8_is_a_read_error() {
        let result = load(Cursor::new(vec![b'A', b',', 0xff, 0xfe, b'\n']));

        assert!(matches!(result, Err(LoadError::Read(_))));
    }

    #[test]
    fn missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.csv");

        match load_file(&path) {
            Err(LoadError::Unavailable { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Unavailable, got {:?}", other.map(|c| c.len())),
        }
    }

    #[test]
    fn undecodable_file_is_unavailable_and_keeps_committed_catalog() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"A,Intro\nB,\xff\xfe\n").unwrap();

        match load_file(file.path()) {
            Err(LoadError::Unavailable { path, .. }) => assert_eq!(path, file.path()),
            other => panic!("expected Unavailable, got {:?}", other.map(|c| c.len())),
        }

        let mut store = CatalogStore::init();
        store.replace(load_str("CSCI100,Intro to CS\n").unwrap());
        let before = store.catalog().clone();

        let err = store.load_from_path(file.path()).unwrap_err();

        assert!(matches!(err, LoadError::Unavailable { .. }));
        assert_eq!(store.catalog(), &before);
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "MATH201,Discrete Mathematics").unwrap();
        writeln!(file, "CSCI300,Algorithms,MATH201").unwrap();

        let catalog = load_file(file.path()).unwrap();

        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn format_errors_accessor() {
        let err = load_str("X\n").unwrap_err();

        assert_eq!(err.format_errors(), &[FormatError::TooFewFields { line: 1 }]);
        assert_eq!(err.to_string(), "1 format error(s) in catalog file");
    }
}
