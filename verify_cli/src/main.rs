mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "field-verify")]
#[command(version, about = "Declarative field-level record verifier", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Verify record documents against their field rules
    Check {
        /// Paths to record documents (YAML, TOML or JSON)
        #[arg(required = true)]
        paths: Vec<String>,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,

        /// Metadata key holding rule expressions
        #[arg(long, default_value = verify_core::VERIFY_TAG)]
        tag_key: String,

        /// Treat unrecognized rule keywords as errors
        #[arg(long)]
        strict_keywords: bool,
    },

    /// Check a rule expression for a field kind without any data
    Rules {
        /// Rule expression, e.g. "required,min=3"
        expression: String,

        /// Field kind: bool, i8..i64, isize, u8..u64, usize, f32, f64, string,
        /// sequence, array, set, map, channel, function, record, reference,
        /// interface
        #[arg(short, long)]
        kind: String,

        /// Field name used in messages
        #[arg(long, default_value = "field")]
        field: String,

        /// Treat unrecognized rule keywords as errors
        #[arg(long)]
        strict_keywords: bool,

        /// Output format: text, json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    match cli.command {
        Commands::Check {
            paths,
            format,
            tag_key,
            strict_keywords,
        } => commands::check::execute(&paths, &format, &tag_key, strict_keywords),

        Commands::Rules {
            expression,
            kind,
            field,
            strict_keywords,
            format,
        } => commands::rules::execute(&expression, &kind, &field, strict_keywords, &format),
    }
}
