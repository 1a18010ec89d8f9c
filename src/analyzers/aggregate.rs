use crate::analyzers::types::{GradeReport, ParsedGrade, SubjectSummary};
use crate::analyzers::utility::{mean, stddev};
use crate::record::RawGradeRecord;
use std::collections::BTreeMap;
use tracing::debug;

/// Aggregates raw grade records into a [`GradeReport`].
///
/// Records whose value does not parse are dropped and counted in
/// `skipped`. Subjects come out in ascending key order and each subject's
/// grades by descending value, ties keeping input order. Subjects with no
/// parsed grade are omitted.
///
/// Means are summed over the value-sorted lists, so any permutation of
/// `records` yields bit-identical statistics.
pub fn aggregate(records: &[RawGradeRecord]) -> GradeReport {
    let mut groups: BTreeMap<String, Vec<ParsedGrade>> = BTreeMap::new();
    let mut skipped = 0usize;

    for (index, record) in records.iter().enumerate() {
        let display = record.display_value();

        match ParsedGrade::from_display(&display) {
            Ok(grade) => groups.entry(record.subject()).or_default().push(grade),
            Err(reason) => {
                skipped += 1;
                debug!(index, subject = %record.subject(), %reason, "Dropping unparseable grade");
            }
        }
    }

    let mut all_values = Vec::new();
    let subjects: Vec<SubjectSummary> = groups
        .into_iter()
        .map(|(name, mut grades)| {
            grades.sort_by(|a, b| b.value.total_cmp(&a.value));

            let values: Vec<f64> = grades.iter().map(|g| g.value).collect();
            let avg = mean(&values);
            let sd = stddev(&values, avg);
            all_values.extend_from_slice(&values);

            SubjectSummary {
                name,
                mean: avg,
                stddev: sd,
                count: values.len(),
                grades,
            }
        })
        .collect();

    GradeReport {
        subjects,
        overall_mean: mean(&all_values),
        has_grades: !all_values.is_empty(),
        parsed: all_values.len(),
        skipped,
    }
}
