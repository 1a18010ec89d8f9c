//! Data types produced by the aggregation pipeline.

use serde::Serialize;

use crate::analyzers::grade::parse_grade;
use crate::error::{GradeError, ParseFailure};

/// A successfully parsed grade together with the text it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedGrade {
    pub value: f64,
    pub display: String,
}

impl ParsedGrade {
    /// Parses a display string, keeping it alongside the numeric value.
    pub fn from_display(display: &str) -> Result<Self, ParseFailure> {
        let value = parse_grade(Some(display))?;
        Ok(Self {
            value,
            display: display.to_string(),
        })
    }
}

/// Statistics for one subject. Grades are ordered by value, highest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectSummary {
    pub name: String,
    pub mean: f64,
    pub stddev: f64,
    pub count: usize,
    pub grades: Vec<ParsedGrade>,
}

impl SubjectSummary {
    /// `true` if the subject mean reaches `pass_mark`.
    pub fn is_passing(&self, pass_mark: f64) -> bool {
        self.mean >= pass_mark
    }

    /// Display strings in presentation order.
    pub fn displays(&self) -> impl Iterator<Item = &str> {
        self.grades.iter().map(|g| g.display.as_str())
    }
}

/// Presentation model for a whole set of grade records.
///
/// `overall_mean` is 0 when nothing parsed; check `has_grades` (or use
/// [`GradeReport::overall`]) before presenting it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeReport {
    pub subjects: Vec<SubjectSummary>,
    pub overall_mean: f64,
    pub has_grades: bool,
    pub parsed: usize,
    pub skipped: usize,
}

impl GradeReport {
    /// The overall mean, or [`GradeError::EmptyDataset`] if no grade parsed.
    pub fn overall(&self) -> Result<f64, GradeError> {
        if self.has_grades {
            Ok(self.overall_mean)
        } else {
            Err(GradeError::EmptyDataset)
        }
    }

    pub fn subject(&self, name: &str) -> Option<&SubjectSummary> {
        self.subjects.iter().find(|s| s.name == name)
    }

    /// Flat `(subject, mean, grades)` view in presentation order.
    pub fn rows(&self) -> Vec<(&str, f64, Vec<(f64, &str)>)> {
        self.subjects
            .iter()
            .map(|s| {
                let grades = s
                    .grades
                    .iter()
                    .map(|g| (g.value, g.display.as_str()))
                    .collect();
                (s.name.as_str(), s.mean, grades)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_grade_keeps_display() {
        let g = ParsedGrade::from_display("6,5+").unwrap();
        assert_eq!(g.value, 6.75);
        assert_eq!(g.display, "6,5+");
    }

    #[test]
    fn test_parsed_grade_failure() {
        assert_eq!(ParsedGrade::from_display(""), Err(ParseFailure::Empty));
    }

    #[test]
    fn test_overall_on_empty_report() {
        let report = GradeReport {
            subjects: vec![],
            overall_mean: 0.0,
            has_grades: false,
            parsed: 0,
            skipped: 3,
        };
        assert_eq!(report.overall(), Err(GradeError::EmptyDataset));
    }

    #[test]
    fn test_overall_real_zero_is_ok() {
        let report = GradeReport {
            subjects: vec![],
            overall_mean: 0.0,
            has_grades: true,
            parsed: 1,
            skipped: 0,
        };
        assert_eq!(report.overall(), Ok(0.0));
    }

    #[test]
    fn test_is_passing_boundary() {
        let s = SubjectSummary {
            name: "Math".into(),
            mean: 6.0,
            stddev: 0.0,
            count: 1,
            grades: vec![],
        };
        assert!(s.is_passing(6.0));
        assert!(!s.is_passing(6.01));
    }
}
