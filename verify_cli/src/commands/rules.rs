use anyhow::{Result, anyhow};
use tracing::info;
use verify_core::{Kind, VerifyOptions};
use verify_parser::parse_rules;
use verify_validator::Verifier;

use crate::output;

pub fn execute(
    expression: &str,
    kind_name: &str,
    field: &str,
    strict_keywords: bool,
    format: &str,
) -> Result<()> {
    info!("Checking rule expression '{}' for kind {}", expression, kind_name);

    let kind = Kind::from_name(kind_name).ok_or_else(|| {
        let known: Vec<_> = Kind::ALL.iter().map(Kind::name).collect();
        anyhow!(
            "Unknown kind '{}', expected one of: {}",
            kind_name,
            known.join(", ")
        )
    })?;

    let verifier =
        Verifier::with_options(VerifyOptions::new().with_strict_keywords(strict_keywords));
    let clauses = parse_rules(expression);
    let problems = verifier.check_rules(field, kind, expression);

    output::print_rule_lint(expression, kind, &clauses, &problems, format)?;

    if !problems.is_empty() {
        std::process::exit(1);
    }

    Ok(())
}
