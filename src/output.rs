//! User-facing output formatting.
//!
//! Styled progress and status messages for the pipeline stages.

use console::style;

/// Print the banner shown before the pipeline starts.
pub fn print_run_header(target: &str, ports: &str, stem: &str) {
    println!();
    println!(
        "{} {} v{}",
        style("Starting").cyan(),
        style("dragnet").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "{} Target: {}",
        style("•").dim(),
        style(target).white().bold()
    );
    println!("{} Ports: {}", style("•").dim(), style(ports).yellow());
    println!("{} Output stem: {}", style("•").dim(), style(stem).dim());
    println!();
}

/// Print a stage transition message.
pub fn print_stage(msg: &str) {
    println!("{} {}", style("==>").cyan().bold(), msg);
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}

/// Print a warning message.
pub fn print_warning(msg: &str) {
    eprintln!("{} {}", style("Warning:").yellow().bold(), msg);
}

/// Print a success message.
pub fn print_success(msg: &str) {
    println!("{} {}", style("✓").green().bold(), msg);
}

/// Print an info message.
pub fn print_info(msg: &str) {
    println!("{} {}", style("ℹ").blue().bold(), msg);
}
