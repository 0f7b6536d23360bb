use std::{
    fmt::Display,
    io::{self, Write},
    process::ExitCode,
};

use anyhow::Context;
use clap::Parser;
use promptly::utils::{
    Anything, Between, IsType, LineSource, OneOf, Pattern, Prompt, PromptOptions, PromptResult,
    Validate,
};
use tracing_subscriber::EnvFilter;

/// Ask a question on the terminal and validate the answer.
///
/// The question and rejection notices go to stderr; the final answer goes
/// to stdout so the command can be used in scripts.
#[derive(Debug, Parser)]
#[command(name = "promptly-cli", version)]
struct Cli {
    /// Question printed before every read
    #[arg(short, long, default_value = "Input:")]
    message: String,

    /// Answer that leaves the prompt without valid input (case-insensitive)
    #[arg(short, long)]
    safe_word: Option<String>,

    /// Trim surrounding whitespace before validating
    #[arg(long)]
    trim: bool,

    /// Do not print a notice for rejected answers
    #[arg(short, long)]
    quiet: bool,

    /// Accept only these answers (comma separated)
    #[arg(long, value_delimiter = ',', conflicts_with_all = ["pattern", "min", "type_name"])]
    one_of: Vec<String>,

    /// Compare --one-of answers ignoring case
    #[arg(short = 'i', long, requires = "one_of")]
    case_insensitive: bool,

    /// Accept only answers matching this regular expression
    #[arg(short, long, conflicts_with_all = ["min", "type_name"])]
    pattern: Option<String>,

    /// Lower bound of a numeric answer
    #[arg(long, requires = "max", conflicts_with = "type_name", allow_negative_numbers = true)]
    min: Option<f64>,

    /// Upper bound of a numeric answer
    #[arg(long, requires = "min", allow_negative_numbers = true)]
    max: Option<f64>,

    /// Reject answers equal to --min or --max
    #[arg(long, requires = "min")]
    exclusive: bool,

    /// Convert the answer to this type (int8, uint32, float64, complex, ...)
    #[arg(short = 't', long = "type")]
    type_name: Option<String>,

    /// Read a single answer instead of asking until it is valid
    #[arg(long)]
    once: bool,

    /// Print the full result as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    Accepted,
    SafeExit,
    Rejected,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Accepted => ExitCode::SUCCESS,
            Outcome::Rejected => ExitCode::FAILURE,
            Outcome::SafeExit => ExitCode::from(2),
        }
    }
}

impl Cli {
    fn options(&self) -> PromptOptions {
        PromptOptions {
            safe_word: self.safe_word.clone(),
            trim: self.trim,
            show_rejections: !self.quiet,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut prompt = Prompt::new(cli.message.as_str(), io::stdin().lock(), io::stderr())
        .with_options(cli.options());

    match run(&cli, &mut prompt, &mut io::stdout()) {
        Ok(outcome) => outcome.into(),
        Err(e) => {
            tracing::error!(error = %e, "prompt failed");
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Builds the validator selected by the flags and runs the prompt.
fn run<S, W>(cli: &Cli, prompt: &mut Prompt<S, W>, out: &mut impl Write) -> anyhow::Result<Outcome>
where
    S: LineSource,
    W: Write,
{
    if !cli.one_of.is_empty() {
        let one_of = OneOf::new(cli.one_of.iter().cloned()).with_case_sensitive(!cli.case_insensitive);
        report(cli, prompt, &one_of, out)
    } else if let Some(pattern) = &cli.pattern {
        let pattern = Pattern::new(pattern).context("--pattern")?;
        report(cli, prompt, &pattern, out)
    } else if let (Some(min), Some(max)) = (cli.min, cli.max) {
        report(cli, prompt, &Between::new(min, max, !cli.exclusive), out)
    } else if let Some(type_name) = &cli.type_name {
        let is_type = IsType::named(type_name).context("--type")?;
        report(cli, prompt, &is_type, out)
    } else {
        report(cli, prompt, &Anything, out)
    }
}

fn report<S, W, V>(
    cli: &Cli,
    prompt: &mut Prompt<S, W>,
    validator: &V,
    out: &mut impl Write,
) -> anyhow::Result<Outcome>
where
    S: LineSource,
    W: Write,
    V: Validate,
    V::Output: serde::Serialize + Display,
{
    let result: PromptResult<V::Output> = if cli.once {
        prompt.ask_once(validator)?
    } else {
        prompt.ask(validator)?
    };

    if cli.json {
        writeln!(out, "{}", serde_json::to_string(&result)?)?;
    } else if result.safe_exit {
        writeln!(out, "Safe exit: {}", result.raw_input)?;
    } else if let Some(value) = &result.value {
        writeln!(out, "{value}")?;
    } else if let Some(reason) = &result.rejection {
        writeln!(out, "Input '{}' is invalid ({reason})", result.raw_input)?;
    }

    Ok(if result.safe_exit {
        Outcome::SafeExit
    } else if result.accepted {
        Outcome::Accepted
    } else {
        Outcome::Rejected
    })
}
