use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};
use dough_core::calculate_dough_batch;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod error;
mod profile;
mod recipe;
mod render;

use error::CliError;
use profile::Profile;
use recipe::{Mode, PreFerment, PreFermentKind, RawIngredient, Recipe, Scald};

/// Mode CLI enum mirrors recipe::Mode (derive for Clap).
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum ModeFlag {
    /// Fix the dough weight of one portion
    Dough,
    /// Fix the flour weight of one portion
    Flour,
}

impl From<ModeFlag> for Mode {
    fn from(m: ModeFlag) -> Self {
        match m {
            ModeFlag::Dough => Mode::DoughWeight,
            ModeFlag::Flour => Mode::FlourWeight,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum PreFermentFlag {
    /// Sourdough starter (20%, 100% H)
    Starter,
    /// Poolish (40%, 100% H, 0.25% yeast)
    Poolish,
    /// Biga (50%, 50% H, 0.25% yeast)
    Biga,
}

impl From<PreFermentFlag> for PreFermentKind {
    fn from(p: PreFermentFlag) -> Self {
        match p {
            PreFermentFlag::Starter => PreFermentKind::SourdoughStarter,
            PreFermentFlag::Poolish => PreFermentKind::Poolish,
            PreFermentFlag::Biga => PreFermentKind::Biga,
        }
    }
}

/// Parses `NAME=PERCENT`.
fn parse_ingredient(s: &str) -> Result<RawIngredient, String> {
    let (name, percent) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=PERCENT, got `{s}`"))?;
    let percent = percent
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid percent `{percent}`: {e}"))?;
    Ok(RawIngredient {
        name: name.trim().to_string(),
        percent,
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "dough-cli",
    about = "Baker's percentage calculator: scale a dough formula, pre-ferments included.",
    version
)]
struct Args {
    /// Recipe name
    #[arg(long, default_value = "")]
    name: String,

    /// Which quantity is fixed
    #[arg(long, value_enum, default_value_t = ModeFlag::Dough)]
    mode: ModeFlag,

    /// Dough weight of one portion in grams (dough mode)
    #[arg(long, default_value_t = 800.0)]
    dough_weight: f64,

    /// Flour weight of one portion in grams (flour mode)
    #[arg(long, default_value_t = 500.0)]
    flour_weight: f64,

    /// Number of portions
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Total hydration in %, liquid of pre-ferments included
    #[arg(long, default_value_t = 80.0)]
    hydration: f64,

    /// Salt in % of flour
    #[arg(long, default_value_t = 2.0)]
    salt: f64,

    /// Pre-ferment (at most one)
    #[arg(long, value_enum)]
    preferment: Option<PreFermentFlag>,

    /// Drop the pre-ferment a profile brings
    #[arg(long, conflicts_with = "preferment")]
    no_preferment: bool,

    /// Pre-ferment in % of total flour
    #[arg(long)]
    preferment_percent: Option<f64>,

    /// Pre-ferment hydration in % of its own flour
    #[arg(long)]
    preferment_hydration: Option<f64>,

    /// Pre-ferment yeast in % of its own flour (poolish, biga)
    #[arg(long)]
    preferment_yeast: Option<f64>,

    /// Add a scald (tangzhong)
    #[arg(long)]
    scald: bool,

    /// Drop the scald a profile brings
    #[arg(long, conflicts_with = "scald")]
    no_scald: bool,

    /// Scald in % of total flour
    #[arg(long)]
    scald_percent: Option<f64>,

    /// Scald hydration in % of its own flour
    #[arg(long)]
    scald_hydration: Option<f64>,

    /// Extra ingredient as NAME=PERCENT (repeatable)
    #[arg(long = "ingredient", value_name = "NAME=PERCENT", value_parser = parse_ingredient)]
    ingredients: Vec<RawIngredient>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Load a profile JSON before applying CLI overrides
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Save the current effective parameters to a profile JSON
    #[arg(long)]
    save_profile: Option<PathBuf>,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,
}

impl From<&Args> for Recipe {
    fn from(a: &Args) -> Self {
        Recipe {
            name: a.name.clone(),
            mode: a.mode.into(),
            dough_weight: a.dough_weight,
            flour_weight: a.flour_weight,
            scale: a.scale,
            target_hydration_percent: a.hydration,
            salt_percent: a.salt,
            preferment: a.preferment.map(|kind| {
                PreFerment::new(
                    kind.into(),
                    a.preferment_percent,
                    a.preferment_hydration,
                    a.preferment_yeast,
                )
            }),
            scald: a
                .scald
                .then(|| Scald::new(a.scald_percent, a.scald_hydration)),
            raw_ingredients: a.ingredients.clone(),
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Override flags need their inclusion, possibly supplied by the profile.
fn check_overrides(args: &Args) -> Result<(), CliError> {
    let preferment_flags = [
        ("--preferment-percent", args.preferment_percent),
        ("--preferment-hydration", args.preferment_hydration),
        ("--preferment-yeast", args.preferment_yeast),
    ];
    if args.preferment.is_none() {
        if let Some((flag, _)) = preferment_flags.into_iter().find(|(_, v)| v.is_some()) {
            return Err(CliError::MissingInclusion { flag, needs: "--preferment" });
        }
    }

    let scald_flags = [
        ("--scald-percent", args.scald_percent),
        ("--scald-hydration", args.scald_hydration),
    ];
    if !args.scald {
        if let Some((flag, _)) = scald_flags.into_iter().find(|(_, v)| v.is_some()) {
            return Err(CliError::MissingInclusion { flag, needs: "--scald" });
        }
    }
    Ok(())
}

/// Parses the command line, then merges the profile it names.
fn resolve_args(matches: &ArgMatches) -> Result<Args, CliError> {
    let mut args = Args::from_arg_matches(matches).unwrap_or_else(|e| e.exit());
    // Load profile if present, then apply CLI overrides (CLI wins).
    if let Some(path) = args.profile.clone() {
        profile::load(&path)?.apply_to(&mut args, matches);
    }
    if args.no_preferment {
        args.preferment = None;
    }
    if args.no_scald {
        args.scald = false;
    }
    check_overrides(&args)?;
    Ok(args)
}

fn run(args: Args) -> Result<(), CliError> {
    let recipe = Recipe::from(&args);
    let spec = recipe.to_batch_spec()?;
    debug!(?spec, "batch spec");

    if let Some(path) = &args.save_profile {
        profile::save(path, &Profile::from(&args))?;
        info!(path = %path.display(), "profile saved");
        eprintln!("Profile saved to {}", path.display());
    }

    let result = calculate_dough_batch(&spec);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render::render(&result));
    }
    Ok(())
}

fn main() {
    let matches = Args::command().get_matches();
    init_logging(matches.get_flag("verbose"));

    if let Err(e) = resolve_args(&matches).and_then(run) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

/* ===========================
Unit tests
=========================== */
