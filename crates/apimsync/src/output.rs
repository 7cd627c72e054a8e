//! Terminal output utilities

use apimsync_pipeline::StageReport;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Print a success message
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().bold(), msg);
}

/// Print a warning message
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().bold(), msg);
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}

/// Print a header
pub fn header(msg: &str) {
    println!("\n{}", style(msg).bold().underlined());
}

/// Print a key-value pair
pub fn kv(key: &str, value: &str) {
    println!("  {}: {}", style(key).dim(), value);
}

/// Create a spinner
pub fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let template = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(template.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Print the outcome of one pipeline stage
pub fn report(report: &StageReport) {
    let label = format!("{} ({})", report.stage, report.platform);

    if let Some(problem) = &report.problem {
        warning(&format!("{}: {}", label, problem));
        return;
    }

    let mut summary = format!("{}: {} processed", label, report.processed.len());
    if !report.skipped.is_empty() {
        summary.push_str(&format!(", {} skipped", report.skipped.len()));
    }

    if report.errors.is_empty() {
        success(&summary);
    } else {
        summary.push_str(&format!(", {} failed", report.errors.len()));
        warning(&summary);
        for failure in &report.errors {
            error(&format!("{}: {}", failure.api, failure.message));
        }
    }
}
