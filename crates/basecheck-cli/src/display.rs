use basecheck_core::{FileReport, FromDirective, LineOutcome, RunSummary};
use colored::{ColoredString, Colorize};

// Semantic styling roles. Rendering goes through these so the verdict-to-color
// mapping lives in one place and the core stays free of styling concerns.

fn ok(s: &str) -> ColoredString {
    s.green()
}

fn warn(s: &str) -> ColoredString {
    s.yellow()
}

fn heading(s: &str) -> ColoredString {
    s.cyan().underline()
}

fn note(s: &str) -> ColoredString {
    s.blue().italic()
}

pub fn print_banner() {
    println!();
    println!("{}", "⛭ Checking Dockerfiles...".bold());
    println!();
}

/// Print one file's audit: the path as a heading, then each `FROM` outcome
/// in line order, then a blank separator. Files without directives still get
/// their heading so the reader can see they were scanned.
pub fn print_file_report(report: &FileReport) {
    println!("{}", heading(&report.path));
    for outcome in &report.outcomes {
        match outcome {
            LineOutcome::Allowed { directive } => {
                println!("  {}", format_directive(directive, true));
            }
            LineOutcome::Violation { directive } => {
                println!("  {}", format_directive(directive, false).bold());
            }
            LineOutcome::Malformed {
                line_number,
                reason,
            } => {
                println!(
                    "  {}: {} {}",
                    line_number,
                    warn("FROM"),
                    warn(&format!("(malformed: {})", reason))
                );
            }
        }
    }
    println!();
}

fn format_directive(directive: &FromDirective, allowed: bool) -> String {
    let (before, after) = directive.clause_around_image();
    let image = if allowed {
        ok(&directive.image)
    } else {
        warn(&directive.image)
    };
    format!(
        "{}: {}{}{}",
        directive.line_number, before, image, after
    )
}

pub fn print_summary(summary: &RunSummary) {
    if summary.total_violations > 0 {
        println!(
            "{}",
            warn(&format!(
                "⚠ Found {} Docker image(s) not in allowed list",
                summary.total_violations
            ))
        );
        println!(
            "{}",
            note("ℹ For more information see: https://github.com/basecheck/basecheck#readme")
        );
        println!();
    } else {
        println!("{}", ok("✓ All base images are OK"));
        println!();
    }
}

pub fn print_config_error(err: &dyn std::error::Error) {
    eprintln!("{} {}", "error:".red().bold(), err);
    let mut source = err.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {}", cause);
        source = cause.source();
    }
}
