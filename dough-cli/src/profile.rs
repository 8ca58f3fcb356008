use std::{fs, path::Path};

use chrono::{Local, SecondsFormat};
use clap::{parser::ValueSource, ArgMatches};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;
use crate::recipe::RawIngredient;
use crate::{Args, ModeFlag, PreFermentFlag};

/// Saved calculator parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub mode: ModeFlag,
    pub dough_weight: f64,
    pub flour_weight: f64,
    pub scale: f64,
    pub hydration: f64,
    pub salt: f64,
    #[serde(default)]
    pub preferment: Option<PreFermentFlag>,
    #[serde(default)]
    pub preferment_percent: Option<f64>,
    #[serde(default)]
    pub preferment_hydration: Option<f64>,
    #[serde(default)]
    pub preferment_yeast: Option<f64>,
    #[serde(default)]
    pub scald: bool,
    #[serde(default)]
    pub scald_percent: Option<f64>,
    #[serde(default)]
    pub scald_hydration: Option<f64>,
    #[serde(default)]
    pub ingredients: Vec<RawIngredient>,
    /// RFC 3339 local time the profile was written.
    #[serde(default)]
    pub saved_at: Option<String>,
}

impl From<&Args> for Profile {
    fn from(a: &Args) -> Self {
        Profile {
            name: a.name.clone(),
            mode: a.mode,
            dough_weight: a.dough_weight,
            flour_weight: a.flour_weight,
            scale: a.scale,
            hydration: a.hydration,
            salt: a.salt,
            preferment: a.preferment,
            preferment_percent: a.preferment_percent,
            preferment_hydration: a.preferment_hydration,
            preferment_yeast: a.preferment_yeast,
            scald: a.scald,
            scald_percent: a.scald_percent,
            scald_hydration: a.scald_hydration,
            ingredients: a.ingredients.clone(),
            saved_at: None,
        }
    }
}

impl Profile {
    /// Fills every argument not given on the command line with the
    /// profile value. `matches` is the parse `args` was built from.
    pub fn apply_to(self, args: &mut Args, matches: &ArgMatches) {
        let p = self;
        let from_cli = |id: &str| matches.value_source(id) == Some(ValueSource::CommandLine);

        macro_rules! take {
            ($field:ident) => {
                if !from_cli(stringify!($field)) {
                    args.$field = p.$field;
                }
            };
        }

        take!(name);
        take!(mode);
        take!(dough_weight);
        take!(flour_weight);
        take!(scale);
        take!(hydration);
        take!(salt);
        take!(preferment);
        take!(preferment_percent);
        take!(preferment_hydration);
        take!(preferment_yeast);
        take!(scald);
        take!(scald_percent);
        take!(scald_hydration);
        take!(ingredients);
    }
}

pub fn load(path: &Path) -> Result<Profile, CliError> {
    let txt = fs::read_to_string(path).map_err(|source| CliError::ReadProfile {
        path: path.to_path_buf(),
        source,
    })?;
    let profile = serde_json::from_str(&txt).map_err(|source| CliError::ParseProfile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "loaded profile");
    Ok(profile)
}

pub fn save(path: &Path, profile: &Profile) -> Result<(), CliError> {
    let profile = Profile {
        saved_at: Some(Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)),
        ..profile.clone()
    };
    let txt = serde_json::to_string_pretty(&profile)?;
    fs::write(path, txt).map_err(|source| CliError::WriteProfile {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "saved profile");
    Ok(())
}

/* ===========================
Unit tests
=========================== */
