use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Formatter};
use std::str::FromStr;

/// Who plays the black pieces.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Both sides are played through [`Session::select`][`crate::game::Session::select`]
    /// and [`Session::confirm`][`crate::game::Session::confirm`].
    #[display(fmt = "human vs human")]
    HumanVsHuman,

    /// Black replies automatically with a move picked uniformly at random.
    #[default]
    #[display(fmt = "human vs automated")]
    HumanVsAutomated,
}

/// Runtime configuration for a [`Session`][`crate::game::Session`].
///
/// Prints and parses as [RON], e.g. `(mode: human_vs_human, seed: Some(7))`.
///
/// [RON]: https://github.com/ron-rs/ron
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The game mode.
    #[serde(default)]
    pub mode: Mode,

    /// Seeds the automated side's random number generator, or draws one from the system if `None`.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&ron::ser::to_string(self).map_err(|_| fmt::Error)?)
    }
}

/// The reason why parsing [`Config`] failed.
#[derive(Debug, Display, Eq, PartialEq, Error, From)]
#[display(fmt = "failed to parse game configuration")]
pub struct ParseConfigError(ron::de::SpannedError);

impl FromStr for Config {
    type Err = ParseConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ron::de::from_str(s)?)
    }
}
