use grade_stats::analyzers::aggregate::aggregate;
use grade_stats::error::GradeError;
use grade_stats::output::{OutputFormat, render};
use grade_stats::parser::parse_records;

#[test]
fn test_full_pipeline() {
    let bytes = include_bytes!("fixtures/grades.json");
    let records = parse_records(bytes).expect("Failed to parse payload");
    let report = aggregate(&records);

    assert_eq!(records.len(), 9);
    assert_eq!(report.parsed, 7);
    assert_eq!(report.skipped, 2);

    let names: Vec<&str> = report.subjects.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["INGLESE", "ITALIANO", "MATEMATICA", "STORIA", "Unknown"]);

    assert_eq!(report.subject("MATEMATICA").unwrap().mean, 6.875);
    assert_eq!(report.subject("ITALIANO").unwrap().mean, 6.875);
    assert_eq!(report.subject("STORIA").unwrap().mean, 5.5);
    assert_eq!(report.subject("INGLESE").unwrap().mean, 9.0);
    assert!(report.subject("ARTE").is_none());

    // 8 + 5.75 + 7.25 + 6.5 + 5.5 + 9 + 6.5 = 48.5
    assert!((report.overall().unwrap() - 48.5 / 7.0).abs() < 1e-12);

    for subject in &report.subjects {
        assert!(subject.grades.windows(2).all(|w| w[0].value >= w[1].value));
    }
}

#[test]
fn test_reference_scenario_from_json() {
    let bytes = br#"[
        {"subjectDesc":"Math","displayValue":"8"},
        {"subjectDesc":"Math","displayValue":"6-"},
        {"subjectDesc":"Italian","displayValue":"7+"}
    ]"#;
    let report = aggregate(&parse_records(bytes).unwrap());

    assert_eq!(report.subject("Math").unwrap().mean, 6.875);
    assert_eq!(report.subject("Italian").unwrap().mean, 7.25);
    assert_eq!(report.overall(), Ok(7.0));
}

#[test]
fn test_all_unparseable_payload() {
    let bytes = br#"[{"subjectDesc":"Math","displayValue":"NV"},{"subjectDesc":"Art"}]"#;
    let report = aggregate(&parse_records(bytes).unwrap());

    assert_eq!(report.overall_mean, 0.0);
    assert!(!report.has_grades);
    assert_eq!(report.overall(), Err(GradeError::EmptyDataset));

    let text = String::from_utf8(render(&report, OutputFormat::Text, 6.0).unwrap()).unwrap();
    assert!(text.contains("n/a"));
}

#[test]
fn test_csv_render_matches_presentation_order() {
    let bytes = include_bytes!("fixtures/grades.json");
    let report = aggregate(&parse_records(bytes).unwrap());
    let csv = String::from_utf8(render(&report, OutputFormat::Csv, 6.0).unwrap()).unwrap();

    let subjects: Vec<&str> = csv
        .lines()
        .skip(1)
        .map(|l| l.split(',').next().unwrap())
        .collect();
    assert_eq!(subjects.len(), 7);
    assert_eq!(subjects.first(), Some(&"INGLESE"));
    assert_eq!(subjects.last(), Some(&"Unknown"));
}
