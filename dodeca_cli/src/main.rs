//! # Dodeca CLI
//!
//! Terminal front end for the dodecahedron calculator, the practice problems
//! and the stored language/theme preferences.
//!
//! ```text
//! dodeca calc --volume 957.89 --surface 516.14
//! dodeca --lang en calc --edge 2 --unit cm --to mm
//! dodeca problems --difficulty hard
//! dodeca check 1 957.9
//! dodeca lang en
//! dodeca theme
//! ```
//!
//! Results go to stdout; logs (`RUST_LOG`, `--verbose`) go to stderr.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use dodeca_core::calculations::{DodecahedronProperties, ParameterSet, QuantityKind};
use dodeca_core::errors::{CalcError, CalcResult};
use dodeca_core::form::CalculatorForm;
use dodeca_core::i18n::{quantity_label, translate, unit_symbol, Language, MessageKey};
use dodeca_core::preferences::{self, Preferences, Theme};
use dodeca_core::problems::{self, Difficulty, Problem};
use dodeca_core::units::LengthUnit;

#[derive(Parser)]
#[command(name = "dodeca")]
#[command(about = "Dodecahedron calculator and practice problems")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results and errors as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Display language for this run (ru, en); defaults to the stored preference
    #[arg(long, global = true)]
    lang: Option<Language>,

    /// Preferences file (defaults to $DODECA_PREFS, then ./dodeca-prefs.json)
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate every measure from one or two known ones
    Calc {
        /// Edge length a
        #[arg(long, allow_negative_numbers = true)]
        edge: Option<String>,

        /// Volume V
        #[arg(long, allow_negative_numbers = true)]
        volume: Option<String>,

        /// Surface area S
        #[arg(long, allow_negative_numbers = true)]
        surface: Option<String>,

        /// Circumscribed sphere radius R
        #[arg(long, allow_negative_numbers = true)]
        circumscribed: Option<String>,

        /// Inscribed sphere radius r
        #[arg(long, allow_negative_numbers = true)]
        inscribed: Option<String>,

        /// Length unit of the given values (mm, cm, m, in)
        #[arg(short, long, default_value = "cm")]
        unit: LengthUnit,

        /// Length unit for the results; defaults to --unit
        #[arg(long)]
        to: Option<LengthUnit>,
    },
    /// Prompt for known values one by one
    Interactive {
        /// Length unit (mm, cm, m, in)
        #[arg(short, long, default_value = "cm")]
        unit: LengthUnit,
    },
    /// List practice problems
    Problems {
        /// Only show one difficulty (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,
    },
    /// Check an answer to a practice problem
    Check {
        /// Problem number
        number: u32,
        /// Your answer
        answer: String,
    },
    /// Set the stored language, or switch RU/EN when none is given
    Lang { language: Option<Language> },
    /// Set the stored theme, or switch light/dark when none is given
    Theme { theme: Option<Theme> },
    /// Show the stored preferences
    Prefs,
}

/// Settings shared by every subcommand
struct Context {
    language: Language,
    json: bool,
    prefs_path: PathBuf,
    prefs: Preferences,
}

#[derive(Serialize)]
struct CalcOutput<'a> {
    input_unit: LengthUnit,
    input: &'a ParameterSet,
    unit: LengthUnit,
    properties: DodecahedronProperties,
}

#[derive(Serialize)]
struct CheckOutput {
    number: u32,
    answer: String,
    feedback: problems::AnswerFeedback,
}

#[derive(Serialize)]
struct PrefsOutput<'a> {
    path: String,
    preferences: &'a Preferences,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let prefs_path = preferences::resolve_path(cli.prefs.as_deref());
    let prefs = preferences::load_or_default(&prefs_path).unwrap_or_else(|e| {
        warn!(error = %e, "could not read preferences, using defaults");
        Preferences::default()
    });

    let ctx = Context {
        language: cli.lang.unwrap_or(prefs.language),
        json: cli.json,
        prefs_path,
        prefs,
    };
    debug!(language = %ctx.language, path = %ctx.prefs_path.display(), "starting");

    match run(cli.command, &ctx) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_error(&e, &ctx);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands, ctx: &Context) -> CalcResult<()> {
    match command {
        Commands::Calc {
            edge,
            volume,
            surface,
            circumscribed,
            inscribed,
            unit,
            to,
        } => {
            let inputs = [
                (QuantityKind::EdgeLength, edge),
                (QuantityKind::Volume, volume),
                (QuantityKind::SurfaceArea, surface),
                (QuantityKind::CircumscribedRadius, circumscribed),
                (QuantityKind::InscribedRadius, inscribed),
            ];
            run_calc(ctx, inputs, unit, to.unwrap_or(unit))
        }
        Commands::Interactive { unit } => run_interactive(ctx, unit),
        Commands::Problems { difficulty } => run_problems(ctx, difficulty),
        Commands::Check { number, answer } => run_check(ctx, number, answer),
        Commands::Lang { language } => {
            let saved = preferences::update_preferences(&ctx.prefs_path, |p| {
                p.language = language.unwrap_or_else(|| p.language.toggled());
            })?;
            print_prefs(ctx, &saved)
        }
        Commands::Theme { theme } => {
            let saved = preferences::update_preferences(&ctx.prefs_path, |p| {
                p.theme = theme.unwrap_or_else(|| p.theme.toggled());
            })?;
            print_prefs(ctx, &saved)
        }
        Commands::Prefs => print_prefs(ctx, &ctx.prefs),
    }
}

fn run_calc(
    ctx: &Context,
    inputs: [(QuantityKind, Option<String>); 5],
    unit: LengthUnit,
    output_unit: LengthUnit,
) -> CalcResult<()> {
    let now = Utc::now();
    let mut form = CalculatorForm::new();
    for (kind, text) in inputs {
        if let Some(text) = text {
            form.set_text(kind, text);
            form.set_selected(kind, true, now)?;
        }
    }

    let props = form.submit(now)?;
    let shown = props.convert(unit, output_unit);

    if ctx.json {
        let output = CalcOutput {
            input_unit: unit,
            input: &form.parameter_set(),
            unit: output_unit,
            properties: shown,
        };
        return print_json(&output);
    }

    println!("{}", translate(MessageKey::CalculatorTitle, ctx.language));
    print_properties(&shown, output_unit, ctx.language);
    if let Some(status) = form.status() {
        println!();
        println!("{}", status.text(ctx.language));
    }
    Ok(())
}

fn run_interactive(ctx: &Context, unit: LengthUnit) -> CalcResult<()> {
    let lang = ctx.language;
    println!("{}", translate(MessageKey::CalculatorTitle, lang));
    println!("{}", translate(MessageKey::ParametersTitle, lang));
    println!();

    let now = Utc::now();
    let mut form = CalculatorForm::new();
    for kind in QuantityKind::ALL {
        let label = format!(
            "{} [{}]: ",
            quantity_label(kind, lang),
            unit_symbol(unit, kind.dimension(), lang)
        );
        let Some(text) = prompt_line(&label) else {
            continue;
        };
        form.set_text(kind, text);
        if let Err(e) = form.set_selected(kind, true, now) {
            println!("  {}", translate(e.message_key(), lang));
        }
    }

    println!();
    let props = form.submit(now)?;
    print_properties(&props, unit, lang);
    if let Some(status) = form.status() {
        println!();
        println!("{}", status.text(lang));
    }
    Ok(())
}

fn run_problems(ctx: &Context, difficulty: Option<Difficulty>) -> CalcResult<()> {
    let selected: Vec<&Problem> = problems::by_difficulty(difficulty).collect();
    if ctx.json {
        return print_json(&selected);
    }

    let lang = ctx.language;
    let filter = difficulty
        .map(|d| d.message_key())
        .unwrap_or(MessageKey::DifficultyAll);
    println!(
        "{} ({})",
        translate(MessageKey::ProblemsTitle, lang),
        translate(filter, lang)
    );
    for problem in selected {
        println!();
        println!(
            "{} {} [{}]",
            translate(MessageKey::ProblemPrefix, lang),
            problem.number,
            translate(problem.difficulty.message_key(), lang)
        );
        println!("  {}", problem.statement(lang));
    }
    Ok(())
}

fn run_check(ctx: &Context, number: u32, answer: String) -> CalcResult<()> {
    let feedback = problems::check_answer(number, &answer)?;
    if ctx.json {
        return print_json(&CheckOutput {
            number,
            answer,
            feedback,
        });
    }
    println!("{}", translate(feedback.message_key(), ctx.language));
    Ok(())
}

fn print_prefs(ctx: &Context, prefs: &Preferences) -> CalcResult<()> {
    if ctx.json {
        return print_json(&PrefsOutput {
            path: ctx.prefs_path.display().to_string(),
            preferences: prefs,
        });
    }
    println!("{}", ctx.prefs_path.display());
    println!("  language: {}", prefs.language);
    println!("  theme:    {}", translate(prefs.theme.message_key(), prefs.language));
    if let Some(saved_at) = prefs.saved_at {
        println!("  saved:    {}", saved_at.to_rfc3339());
    }
    Ok(())
}

fn print_properties(props: &DodecahedronProperties, unit: LengthUnit, lang: Language) {
    println!("{}", translate(MessageKey::ResultsTitle, lang));
    for quantity in props.iter() {
        let kind = quantity.kind();
        println!(
            "  {:<34} {:>14.2} {}",
            quantity_label(kind, lang),
            quantity.value(),
            unit_symbol(unit, kind.dimension(), lang)
        );
    }
}

fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    let json =
        serde_json::to_string_pretty(value).map_err(|e| CalcError::serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}

fn report_error(err: &CalcError, ctx: &Context) {
    match err {
        CalcError::Calculator(e) => {
            eprintln!("{}", translate(e.message_key(), ctx.language));
            eprintln!("  ({})", e);
        }
        other => eprintln!("Error: {}", other),
    }

    if ctx.json {
        if let Ok(json) = serde_json::to_string_pretty(err) {
            eprintln!("{}", json);
        }
    }
}

/// Read one line; `None` when blank or stdin is closed
fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return None;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return None;
    }

    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_calc() {
        let cli = Cli::try_parse_from([
            "dodeca", "--lang", "en", "calc", "--volume", "957.89", "--unit", "mm",
        ])
        .unwrap();
        assert_eq!(cli.lang, Some(Language::En));
        match cli.command {
            Commands::Calc {
                volume, unit, to, edge, ..
            } => {
                assert_eq!(volume.as_deref(), Some("957.89"));
                assert_eq!(unit, LengthUnit::Millimeter);
                assert!(to.is_none());
                assert!(edge.is_none());
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn test_negative_values_reach_the_calculator() {
        let cli = Cli::try_parse_from(["dodeca", "calc", "--edge", "-5", "--volume", "-0.5"]).unwrap();
        match cli.command {
            Commands::Calc { edge, volume, .. } => {
                assert_eq!(edge.as_deref(), Some("-5"));
                assert_eq!(volume.as_deref(), Some("-0.5"));
            }
            _ => panic!("expected calc"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_values() {
        assert!(Cli::try_parse_from(["dodeca", "--lang", "de", "prefs"]).is_err());
        assert!(Cli::try_parse_from(["dodeca", "calc", "--unit", "ft"]).is_err());
        assert!(Cli::try_parse_from(["dodeca", "theme", "sepia"]).is_err());
    }

    #[test]
    fn test_parse_toggle_commands() {
        let cli = Cli::try_parse_from(["dodeca", "lang"]).unwrap();
        assert!(matches!(cli.command, Commands::Lang { language: None }));

        let cli = Cli::try_parse_from(["dodeca", "theme", "dark", "--json"]).unwrap();
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Theme { theme: Some(Theme::Dark) }));
    }

    #[test]
    fn test_parse_check_and_problems() {
        let cli = Cli::try_parse_from(["dodeca", "check", "3", "2,38"]).unwrap();
        assert!(matches!(cli.command, Commands::Check { number: 3, .. }));

        let cli = Cli::try_parse_from(["dodeca", "problems", "-d", "easy"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Problems { difficulty: Some(Difficulty::Easy) }
        ));
    }
}
