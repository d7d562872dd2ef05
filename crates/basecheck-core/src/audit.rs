use crate::allowlist::AllowList;
use crate::parser::{self, FromDirective, ParsedLine};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

/// Verdict for one `FROM` line of a Dockerfile. Lines that are not `FROM`
/// directives produce no outcome at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LineOutcome {
    /// The image is on the allow-list.
    Allowed { directive: FromDirective },
    /// The image is not on the allow-list.
    Violation { directive: FromDirective },
    /// The line starts with `FROM` but could not be parsed. Counted as a
    /// violation so a broken directive can never slip through unreported.
    Malformed { line_number: usize, reason: String },
}

impl LineOutcome {
    pub fn line_number(&self) -> usize {
        match self {
            LineOutcome::Allowed { directive } | LineOutcome::Violation { directive } => {
                directive.line_number
            }
            LineOutcome::Malformed { line_number, .. } => *line_number,
        }
    }

    pub fn is_violation(&self) -> bool {
        !matches!(self, LineOutcome::Allowed { .. })
    }
}

/// Audit result for one Dockerfile, outcomes in source line order.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub outcomes: Vec<LineOutcome>,
    pub violations: usize,
}

/// Whole-run totals; decides the process exit status.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub files_scanned: usize,
    pub total_violations: usize,
}

impl RunSummary {
    pub fn record(&mut self, report: &FileReport) {
        self.files_scanned += 1;
        self.total_violations += report.violations;
    }

    pub fn exit_code(&self) -> i32 {
        if self.total_violations > 0 {
            1
        } else {
            0
        }
    }
}

/// Complete run result, serialized as-is for `--format json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    pub summary: RunSummary,
}

/// Audit Dockerfile content against the allow-list.
///
/// Pure: no I/O, deterministic for a given (content, allowlist) pair. A file
/// with no `FROM` directives yields an empty outcome list and zero
/// violations.
pub fn audit_content(path: &str, content: &str, allowlist: &AllowList) -> FileReport {
    let mut outcomes = Vec::new();
    let mut violations = 0;

    for (idx, raw) in content.lines().enumerate() {
        let line_number = idx + 1;
        match parser::parse_line(raw, line_number) {
            ParsedLine::NotADirective => {}
            ParsedLine::Directive(directive) => {
                if allowlist.contains(&directive.image) {
                    outcomes.push(LineOutcome::Allowed { directive });
                } else {
                    violations += 1;
                    outcomes.push(LineOutcome::Violation { directive });
                }
            }
            ParsedLine::Malformed { reason } => {
                violations += 1;
                outcomes.push(LineOutcome::Malformed {
                    line_number,
                    reason,
                });
            }
        }
    }

    FileReport {
        path: path.to_string(),
        outcomes,
        violations,
    }
}

/// Read and audit one discovered Dockerfile. A file that cannot be read is
/// fatal for the run.
pub fn audit_file(path: &Path, allowlist: &AllowList) -> Result<FileReport> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    Ok(audit_content(
        &path.display().to_string(),
        &content,
        allowlist,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn allowlist(images: &[&str]) -> AllowList {
        images.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_file_with_no_directives_is_clean() {
        let content = "# comment\nRUN apt-get update\nCOPY . .\n";
        let report = audit_content("Dockerfile", content, &allowlist(&["ubuntu:16.04"]));
        assert!(report.outcomes.is_empty());
        assert_eq!(report.violations, 0);
    }

    #[test]
    fn test_violation_count_matches_denied_directives() {
        let content = "\
FROM ubuntu:16.04 AS base
RUN make
FROM debian:12
FROM ubuntu:16.04
";
        let report = audit_content("Dockerfile", content, &allowlist(&["ubuntu:16.04"]));
        assert_eq!(report.outcomes.len(), 3);
        assert_eq!(report.violations, 1);
        assert!(matches!(
            report.outcomes[1],
            LineOutcome::Violation { ref directive } if directive.image == "debian:12"
        ));
    }

    #[test]
    fn test_outcomes_in_line_order() {
        let content = "FROM a:1\n\nFROM b:2\nRUN true\nFROM c:3\n";
        let report = audit_content("Dockerfile", content, &allowlist(&[]));
        let lines: Vec<usize> = report.outcomes.iter().map(|o| o.line_number()).collect();
        assert_eq!(lines, vec![1, 3, 5]);
    }

    #[test]
    fn test_malformed_counts_as_violation() {
        let content = "FROM\nFROM ubuntu:16.04\n";
        let report = audit_content("Dockerfile", content, &allowlist(&["ubuntu:16.04"]));
        assert_eq!(report.violations, 1);
        assert!(matches!(
            report.outcomes[0],
            LineOutcome::Malformed { line_number: 1, .. }
        ));
        assert!(!report.outcomes[1].is_violation());
    }

    #[test]
    fn test_run_summary_accumulates_and_maps_exit_code() {
        let list = allowlist(&["ubuntu:16.04"]);
        let clean = audit_content("a/Dockerfile", "FROM ubuntu:16.04\n", &list);
        let dirty = audit_content("b/Dockerfile", "FROM debian:12\nFROM alpine:3\n", &list);

        let mut summary = RunSummary::default();
        summary.record(&clean);
        assert_eq!(summary.exit_code(), 0);

        summary.record(&dirty);
        assert_eq!(summary.files_scanned, 2);
        assert_eq!(summary.total_violations, 2);
        assert_eq!(summary.exit_code(), 1);
    }

    #[test]
    fn test_audit_file_unreadable_is_error() {
        let list = allowlist(&[]);
        assert!(audit_file(Path::new("/nonexistent/Dockerfile"), &list).is_err());
    }

    #[test]
    fn test_json_shape() {
        let list = allowlist(&["ubuntu:16.04"]);
        let report = audit_content("Dockerfile", "FROM debian:12 AS base\n", &list);
        let mut summary = RunSummary::default();
        summary.record(&report);

        let run = RunReport {
            files: vec![report],
            summary,
        };
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["summary"]["total_violations"], 1);
        assert_eq!(json["files"][0]["outcomes"][0]["status"], "violation");
        assert_eq!(
            json["files"][0]["outcomes"][0]["directive"]["image"],
            "debian:12"
        );
    }
}
