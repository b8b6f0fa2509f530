use std::fs;
use std::path::Path;

use anyhow::Result;
use chrono::{DateTime, Local};

use crate::compare::compare_elements;
use crate::element::{load_document, Element, LoadError};

#[derive(Debug)]
pub enum PairOutcome {
    Compared(Vec<String>),
    Failed(LoadError),
}

pub fn render_report(
    file1: &Path,
    file2: &Path,
    generated_at: DateTime<Local>,
    outcome: &PairOutcome,
) -> String {
    let mut lines = vec![
        format!(
            "Comparison Report: {}",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        ),
        format!("File 1: {}", file1.display()),
        format!("File 2: {}", file2.display()),
        String::new(),
    ];

    match outcome {
        PairOutcome::Compared(diffs) if diffs.is_empty() => {
            lines.push("✅ The XML files are identical.".to_string());
        }
        PairOutcome::Compared(diffs) => {
            lines.push("Differences found:".to_string());
            for diff in diffs {
                lines.push(format!("🔸 {diff}"));
            }
        }
        PairOutcome::Failed(err) => {
            lines.push(format!("❌ {err}"));
        }
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

/// Compares one file pair and persists its report. Load failures become
/// report content, not errors; only report-persistence I/O propagates.
pub fn compare_pair(file1: &Path, file2: &Path, report_path: &Path) -> Result<PairOutcome> {
    let outcome = match load_pair(file1, file2) {
        Ok((a, b)) => PairOutcome::Compared(compare_elements(&a, &b, "")),
        Err(err) => PairOutcome::Failed(err),
    };

    match &outcome {
        PairOutcome::Compared(diffs) if diffs.is_empty() => {
            let name = file1
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            println!("✅ Files '{name}' are identical.");
        }
        PairOutcome::Compared(diffs) => {
            for diff in diffs {
                println!("🔸 {diff}");
            }
        }
        PairOutcome::Failed(err) => {
            println!("❌ {err}");
        }
    }

    let report = render_report(file1, file2, Local::now(), &outcome);
    if let Some(parent) = report_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(report_path, report)?;
    println!("📄 Saved result to: {}\n", report_path.display());

    Ok(outcome)
}

// file1 is loaded first; when both sides fail its error wins
fn load_pair(file1: &Path, file2: &Path) -> Result<(Element, Element), LoadError> {
    let a = load_document(file1)?;
    let b = load_document(file2)?;
    Ok((a, b))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn stamp() -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn identical_report_has_header_and_sentinel() {
        let report = render_report(
            Path::new("a/x.xml"),
            Path::new("b/x.xml"),
            stamp(),
            &PairOutcome::Compared(vec![]),
        );

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[0], "Comparison Report: 2026-03-01 12:00:00");
        assert_eq!(lines[1], "File 1: a/x.xml");
        assert_eq!(lines[2], "File 2: b/x.xml");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "✅ The XML files are identical.");
        assert_eq!(lines.len(), 5);
        assert!(report.ends_with('\n'));
    }

    #[test]
    fn differing_report_lists_bullets_in_order() {
        let outcome = PairOutcome::Compared(vec![
            "Tag mismatch at x: 'x' != 'y'".to_string(),
            "Text mismatch at x: 'a' != 'b'".to_string(),
        ]);
        let report = render_report(Path::new("1.xml"), Path::new("2.xml"), stamp(), &outcome);

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[4], "Differences found:");
        assert_eq!(lines[5], "🔸 Tag mismatch at x: 'x' != 'y'");
        assert_eq!(lines[6], "🔸 Text mismatch at x: 'a' != 'b'");
        assert_eq!(lines.len(), 7);
    }

    #[test]
    fn failed_report_body_is_a_single_error_line() {
        let outcome = PairOutcome::Failed(LoadError::Parse("tag not closed".into()));
        let report = render_report(Path::new("1.xml"), Path::new("2.xml"), stamp(), &outcome);

        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines[4], "❌ XML Parse Error: tag not closed");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn compare_pair_writes_report_even_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file1 = dir.path().join("a.xml");
        let file2 = dir.path().join("b.xml");
        std::fs::write(&file1, "<root").unwrap();
        std::fs::write(&file2, "<root/>").unwrap();

        let report_path = dir.path().join("out/nested/a.txt");
        let outcome = compare_pair(&file1, &file2, &report_path).unwrap();

        assert!(matches!(outcome, PairOutcome::Failed(LoadError::Parse(_))));
        let body = std::fs::read_to_string(&report_path).unwrap();
        assert!(body.contains("❌ XML Parse Error:"));
    }

    #[test]
    fn compare_pair_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let file1 = dir.path().join("gone.xml");
        let file2 = dir.path().join("b.xml");
        std::fs::write(&file2, "<root/>").unwrap();

        let report_path = dir.path().join("gone.txt");
        let outcome = compare_pair(&file1, &file2, &report_path).unwrap();

        assert!(matches!(
            outcome,
            PairOutcome::Failed(LoadError::NotFound(_))
        ));
        let body = std::fs::read_to_string(&report_path).unwrap();
        assert!(body.contains("❌ File Not Found:"));
    }
}
