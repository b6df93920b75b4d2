//! Plain-text import summary

use std::fmt::Write;
use std::path::Path;

use domain_import::{ImportOutcome, ImportReport};

/// Error messages listed before the rest are only counted
pub const SHOWN_ERRORS: usize = 5;

const RULE_WIDTH: usize = 50;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Lines printed before the import starts
pub fn banner(source: &Path) -> String {
    format!("Starting data import from: {}\n{}\n", source.display(), rule())
}

/// Lines printed once the import has finished
pub fn render(outcome: &ImportOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}\nIMPORT COMPLETED\n{}", rule(), rule());

    match outcome {
        ImportOutcome::Fatal(fatal) => {
            let _ = writeln!(out, "FATAL ERROR: {}", fatal.error);
        }
        ImportOutcome::Completed(report) => {
            render_report(&mut out, report);
            let _ = writeln!(out, "{}\nData import completed successfully!", rule());
        }
    }
    out
}

fn render_report(out: &mut String, report: &ImportReport) {
    let _ = writeln!(out, "Rows processed: {}", report.rows_processed);
    let _ = writeln!(out, "Insureds created: {}", report.insureds_created);
    let _ = writeln!(out, "Policies created: {}", report.policies_created);
    let _ = writeln!(out, "Vehicles created: {}", report.vehicles_created);
    let _ = writeln!(out, "Incidents created: {}", report.incidents_created);
    let _ = writeln!(out, "Claims created: {}", report.claims_created);
    let _ = writeln!(out, "Cases created: {}", report.cases_created);

    if report.errors.is_empty() {
        return;
    }
    let _ = writeln!(out, "Errors encountered: {}", report.errors.len());
    for error in report.errors.iter().take(SHOWN_ERRORS) {
        let _ = writeln!(out, "   - {}", error);
    }
    if report.errors.len() > SHOWN_ERRORS {
        let _ = writeln!(out, "   ... and {} more errors", report.errors.len() - SHOWN_ERRORS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_import::FatalReport;

    fn report_with_errors(n: usize) -> ImportReport {
        ImportReport {
            rows_processed: 3,
            cases_created: 3,
            errors: (1..=n).map(|i| format!("Error processing row {}: bad", i)).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_clean_report() {
        let text = render(&ImportOutcome::Completed(report_with_errors(0)));

        assert!(text.contains("Rows processed: 3\n"));
        assert!(text.contains("Cases created: 3\n"));
        assert!(!text.contains("Errors encountered"));
        assert!(text.ends_with("Data import completed successfully!\n"));
    }

    #[test]
    fn test_only_first_errors_listed() {
        let text = render(&ImportOutcome::Completed(report_with_errors(8)));

        assert!(text.contains("Errors encountered: 8\n"));
        assert!(text.contains("   - Error processing row 5: bad\n"));
        assert!(!text.contains("row 6"));
        assert!(text.contains("   ... and 3 more errors\n"));
    }

    #[test]
    fn test_exactly_five_errors_has_no_remainder_line() {
        let text = render(&ImportOutcome::Completed(report_with_errors(5)));
        assert!(!text.contains("more errors"));
    }

    #[test]
    fn test_fatal_outcome() {
        let text = render(&ImportOutcome::Fatal(FatalReport {
            error: "cannot read source missing.csv: No such file".to_string(),
            rows_processed: 0,
        }));

        assert!(text.contains("FATAL ERROR: cannot read source missing.csv"));
        assert!(!text.contains("Rows processed"));
        assert!(!text.contains("successfully"));
    }

    #[test]
    fn test_banner_names_source() {
        let text = banner(Path::new("data/claims.csv"));
        assert!(text.starts_with("Starting data import from: data/claims.csv\n"));
    }
}
