use anyhow::Result;
use colored::*;
use serde_json::json;
use verify_core::{Kind, StructuralError, VerificationReport};
use verify_parser::Clause;

pub fn print_verification_reports(
    reports: &[(&str, VerificationReport)],
    format: &str,
) -> Result<()> {
    match format {
        "json" => print_json_reports(reports),
        _ => {
            for (path, report) in reports {
                print_text_report(path, report);
            }
            if reports.len() > 1 {
                print_totals(reports);
            }
            Ok(())
        }
    }
}

fn print_text_report(path: &str, report: &VerificationReport) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VERIFICATION REPORT".bold());
    println!("{}", "═".repeat(60));
    println!(
        "  Record: {} ({})",
        report.record.as_deref().unwrap_or("N/A"),
        path
    );

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Verification PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Verification FAILED".red().bold()
        );
    }

    if let Some(error) = &report.error {
        let heading = if report.structural {
            "Rule declaration error:"
        } else {
            "Violations:"
        };
        println!("\n{}", heading.red().bold());
        println!("  {}", error.red());
    }

    println!("\n{}", "Summary:".bold());
    println!("  Fields checked:    {}", report.stats.fields_checked);
    println!("  Fields skipped:    {}", report.stats.fields_skipped);
    println!("  Clauses evaluated: {}", report.stats.clauses_evaluated);
    println!("  Duration:          {} ms", report.stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_totals(reports: &[(&str, VerificationReport)]) {
    let failed = reports.iter().filter(|(_, r)| !r.passed).count();
    let line = format!(
        "{} of {} records passed",
        reports.len() - failed,
        reports.len()
    );

    if failed == 0 {
        print_success(&line);
    } else {
        print_error(&line);
    }
}

fn print_json_reports(reports: &[(&str, VerificationReport)]) -> Result<()> {
    let output = json!({
        "passed": reports.iter().all(|(_, r)| r.passed),
        "reports": reports
            .iter()
            .map(|(path, report)| json!({ "path": path, "report": report }))
            .collect::<Vec<_>>(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

pub fn print_rule_lint(
    expression: &str,
    kind: Kind,
    clauses: &[Clause<'_>],
    problems: &[StructuralError],
    format: &str,
) -> Result<()> {
    match format {
        "json" => {
            let output = json!({
                "expression": expression,
                "kind": kind.name(),
                "valid": problems.is_empty(),
                "clauses": clauses
                    .iter()
                    .map(|c| json!({
                        "keyword": c.name,
                        "recognized": c.keyword.is_some(),
                        "value": c.value,
                    }))
                    .collect::<Vec<_>>(),
                "problems": problems.iter().map(|p| p.to_string()).collect::<Vec<_>>(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => {
            println!("\n{} {} ({})", "Rules:".bold(), expression, kind);
            for (i, clause) in clauses.iter().enumerate() {
                let status = match clause.keyword {
                    Some(_) => "recognized".green(),
                    None => "ignored".yellow(),
                };
                println!("  {}. {:<20} {}", i + 1, clause.to_string(), status);
            }

            if problems.is_empty() {
                println!();
                print_success("Rule expression is valid for this kind");
            } else {
                println!("\n{}", "Problems:".red().bold());
                for (i, problem) in problems.iter().enumerate() {
                    println!("  {}. {}", i + 1, problem.to_string().red());
                }
            }
        }
    }

    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message.red());
}

pub fn print_info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}
