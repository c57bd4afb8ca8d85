use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nutriparse::{
    AnalysisError, AnalysisResult, AnalysisWarning, AnalyzerConfig, AuditRecord, FoodTable,
    LogCipher, MealAnalyzer, Nutrient, SqliteAuditLog,
};
use std::io::{IsTerminal, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "nutriparse",
    about = "Estimate nutrition from a free-text meal description"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Food table JSON (defaults to the built-in table)
    #[arg(long, global = true)]
    foods: Option<PathBuf>,

    /// Analyzer config JSON
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite audit log
    #[arg(long, global = true)]
    db: Option<String>,

    /// Key for meal text in the audit log (default: `<db>.key`, or NUTRIPARSE_LOG_KEY)
    #[arg(long, global = true)]
    key_file: Option<PathBuf>,

    /// Print JSON instead of a report
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a meal, e.g. `2 eggs, 1 cup rice and a banana`
    Analyze {
        /// Meal text; read from stdin when omitted
        text: Vec<String>,
    },

    /// Show recent analyses from the audit log
    Logs {
        #[arg(long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Command::Analyze { text } => analyze(&cli, text),
        Command::Logs { limit } => logs(&cli, *limit),
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("nutriparse=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("nutriparse=warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn analyze(cli: &Cli, text: &[String]) -> Result<ExitCode> {
    let foods = match &cli.foods {
        Some(path) => FoodTable::from_json_file(path)?,
        None => FoodTable::builtin()?,
    };
    let config = match &cli.config {
        Some(path) => AnalyzerConfig::from_json_file(path)?,
        None => AnalyzerConfig::default(),
    };

    let mut analyzer = MealAnalyzer::with_config(Arc::new(foods), &config);
    if let Some(db) = &cli.db {
        analyzer = analyzer.audit_sink(Arc::new(open_log(cli, db)?));
    }

    let meal = if text.is_empty() {
        read_stdin()?
    } else {
        text.join(" ")
    };

    let result = match analyzer.analyze(&meal) {
        Ok(result) => result,
        Err(err @ AnalysisError::EmptyInput) => {
            eprintln!("error: {}", err);
            return Ok(ExitCode::from(2));
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result);
    }

    Ok(ExitCode::SUCCESS)
}

fn logs(cli: &Cli, limit: usize) -> Result<ExitCode> {
    let db = cli
        .db
        .as_deref()
        .context("--db is required to read the audit log")?;
    let records = open_log(cli, db)?.recent(limit)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else if records.is_empty() {
        println!("No meals logged yet");
    } else {
        for record in &records {
            print_record(record);
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn open_log(cli: &Cli, db: &str) -> Result<SqliteAuditLog> {
    match &cli.key_file {
        Some(path) => SqliteAuditLog::open_with_cipher(db, LogCipher::load_or_create(path)?),
        None => SqliteAuditLog::open(db),
    }
}

fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut buf = String::new();
    stdin
        .read_to_string(&mut buf)
        .context("Failed to read meal text from stdin")?;
    Ok(buf)
}

fn print_report(result: &AnalysisResult) {
    println!("Items:");
    for item in &result.parsed_items {
        let food = item.food_key.as_deref().unwrap_or("?");
        println!(
            "  {:<28} {:<16} {:>7.1} g  {:>6.1} kcal  (confidence {:.2})",
            item.raw, food, item.grams, item.nutrition.calories, item.confidence
        );
    }

    println!("\nTotals:");
    for nutrient in Nutrient::ALL {
        println!("  {:<10} {:>8.2}", nutrient.name(), result.totals.get(nutrient));
    }

    if !result.flags.is_empty() {
        println!("\nFlags:");
        for flag in &result.flags {
            println!("  - {}", flag);
        }
    }

    if !result.suggestions.is_empty() {
        println!("\nSuggestions:");
        for suggestion in &result.suggestions {
            println!("  - {}", suggestion);
        }
    }

    for warning in &result.warnings {
        match warning {
            AnalysisWarning::UnmatchedFood { clause } => {
                eprintln!("warning: no food matched \"{}\"", clause)
            }
            AnalysisWarning::AuditSinkFailure { message } => {
                eprintln!("warning: meal was not logged: {}", message)
            }
        }
    }
}

fn print_record(record: &AuditRecord) {
    println!(
        "{}  {:>7.1} kcal  {}",
        record.timestamp, record.totals.calories, record.input_text
    );
}
