//! Bruno Translate CLI - Translate Postman scripts to Bruno
//!
//! ```bash
//! bruno-translate translate tests.js          # Translate a file to stdout
//! cat tests.js | bruno-translate translate    # Translate stdin
//! bruno-translate rules --table               # Show the built-in rules
//! bruno-translate last                        # Print the last translated input
//! bruno-translate clear                       # Forget the last input
//! ```

use bruno_translator::diagnostics::{report, report_info, report_warning, Diagnostic};
use bruno_translator::error::CliResult;
use bruno_translator::{
    rules_description, translate_with, RuleSet, ScriptStore, Translation, Translator, TranslatorConfig,
};
use clap::{Parser, Subcommand};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "bruno-translate")]
#[command(about = "Translate Postman test scripts to Bruno", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a Postman script
    Translate {
        /// Input script (stdin if omitted or "-")
        input: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON rule set to use instead of the built-in rules
        #[arg(short, long)]
        rules: Option<PathBuf>,

        /// Don't remember this input
        #[arg(long)]
        no_save: bool,

        /// Print which rules matched
        #[arg(long)]
        report: bool,
    },

    /// Show the built-in rules
    Rules {
        /// Markdown table instead of JSON
        #[arg(long)]
        table: bool,
    },

    /// Print the last input
    Last,

    /// Forget the last input
    Clear,
}

fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = TranslatorConfig::from_env();

    let result = match cli.command {
        Commands::Translate {
            input,
            output,
            rules,
            no_save,
            report,
        } => cmd_translate(
            &config.with_rules_path(rules),
            input.as_deref(),
            output.as_deref(),
            no_save,
            report,
        ),

        Commands::Rules { table } => cmd_rules(table),

        Commands::Last => cmd_last(&config),

        Commands::Clear => cmd_clear(&config),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_translate(
    config: &TranslatorConfig,
    input: Option<&Path>,
    output: Option<&Path>,
    no_save: bool,
    show_report: bool,
) -> CliResult<()> {
    let source = read_input(input)?;

    let translation = match config.rules_path {
        Some(ref path) => {
            report_info(format!("Using rules from: {}", path.display()));
            translate_with(&RuleSet::from_file(path)?, &source)
        }
        None => Translator::postman_to_bruno()?.translate(&source),
    };

    if show_report {
        print_report(&translation);
    }

    write_output(&translation.script, output)?;

    if !no_save {
        ScriptStore::with_dir(&config.store_dir).save_or_warn(&source);
    }
    Ok(())
}

fn print_report(translation: &Translation) {
    if translation.is_fallback() {
        report_warning(translation.summary());
        return;
    }
    report_info(translation.summary());
    for hit in &translation.hits {
        report(Diagnostic::info(format!("{} match(es)", hit.count)).for_rule(&hit.rule));
    }
}

fn cmd_rules(table: bool) -> CliResult<()> {
    if table {
        println!("{}", rules_description());
    } else {
        println!("{}", RuleSet::postman_to_bruno().to_json()?);
    }
    Ok(())
}

fn cmd_last(config: &TranslatorConfig) -> CliResult<()> {
    let store = ScriptStore::with_dir(&config.store_dir);
    println!("{}", store.load_or_default());
    Ok(())
}

fn cmd_clear(config: &TranslatorConfig) -> CliResult<()> {
    let store = ScriptStore::with_dir(&config.store_dir);
    if store.clear()? {
        report_info("Last input cleared");
    } else {
        report_info("No stored input");
    }
    Ok(())
}

fn read_input(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(p) if p != Path::new("-") => Ok(fs::read_to_string(p)?),
        _ => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

fn write_output(content: &str, path: Option<&Path>) -> CliResult<()> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            report_info(format!("Output written to: {}", p.display()));
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
