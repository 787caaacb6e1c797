//! accesslint - Static accessibility analyzer for HTML

use std::fs;
use std::process::ExitCode;

use clap::Parser;

use accesslint::{analyze_bytes_with_css, Report};

#[derive(Parser)]
#[command(name = "accesslint")]
#[command(version, about = "Static accessibility analyzer for HTML", long_about = None)]
#[command(after_help = "EXAMPLES:
    accesslint page.html                Analyze and print a summary
    accesslint page.html --json         Print the full JSON report
    accesslint page.html --css site.css Include an external stylesheet")]
struct Cli {
    /// Input HTML file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,

    /// External stylesheet files to include in the cascade (repeatable)
    #[arg(long, value_name = "FILE")]
    css: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        eprintln!("error: {e}");
                        return ExitCode::from(2);
                    }
                }
            } else {
                print_summary(&report);
            }

            if report.summary.grade == "C" {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<Report, String> {
    let html = fs::read(&cli.input).map_err(|e| format!("{}: {e}", cli.input))?;

    let mut css_sources = Vec::new();
    for path in &cli.css {
        let css = fs::read_to_string(path).map_err(|e| format!("{path}: {e}"))?;
        css_sources.push(css);
    }
    let css_refs: Vec<&str> = css_sources.iter().map(String::as_str).collect();

    analyze_bytes_with_css(&html, &css_refs).map_err(|e| e.to_string())
}

fn print_summary(report: &Report) {
    let s = &report.summary;
    println!("Score: {}/100 ({})", s.score, s.grade);
    println!(
        "Critical: {}  Warnings: {}",
        s.critical_count, s.warning_count
    );

    for finding in &report.critical {
        print_finding("CRITICAL", finding);
    }
    for finding in &report.warnings {
        print_finding("WARNING", finding);
    }
}

fn print_finding(label: &str, finding: &accesslint::ReportedFinding) {
    let mut location = String::new();
    if let Some(ref element) = finding.element {
        location.push_str(&format!(" <{element}>"));
    }
    if let Some(line) = finding.line_number {
        location.push_str(&format!(" (line {line})"));
    }
    println!();
    println!("{label} [{}]{location}", finding.rule);
    println!("  {}", finding.description);
    if let Some(ref suggestion) = finding.suggestion {
        println!("  fix: {suggestion}");
    }
}
