use std::{
	env, fs, io,
	path::{Path, PathBuf},
};

use log::debug;
use serde::Deserialize;
use thiserror::Error;

use crate::util::ext::PathExt;

pub mod config_file {
	use super::*;

	pub const NAME: &str = "config.toml";

	/// Looked up when no `--config` is given and `XDG_CONFIG_HOME` is unset
	pub const DEFAULT_PATH: &str = "~/.config/bytea/config.toml";

	/// Per-user config file: `$XDG_CONFIG_HOME/bytea/config.toml`, else [`DEFAULT_PATH`]
	pub fn default_path() -> PathBuf {
		match env::var_os("XDG_CONFIG_HOME").filter(|dir| !dir.is_empty()) {
			Some(dir) => PathBuf::from(dir).join("bytea").join(NAME),
			None => Path::new(DEFAULT_PATH).tilde_expand(),
		}
	}

	// Use macro to work around include_str not accepting string constants
	macro_rules! TEMPLATE_NAME_MACRO {
		() => {
			"config.toml"
		};
	}

	pub static DATA: &str = include_str!(concat!("../templates/", TEMPLATE_NAME_MACRO!()));
}

#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("unable to read config file {path:?}: {source}")]
	Read { path: PathBuf, source: io::Error },

	#[error("unable to parse config file {path:?}: {source}")]
	Parse {
		path: PathBuf,
		source: toml::de::Error,
	},
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub encode: EncodeCfg,
	pub decode: DecodeCfg,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EncodeCfg {
	pub save_as: PathBuf,
}

impl Default for EncodeCfg {
	fn default() -> Self {
		Self {
			save_as: "image.bytea".into(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DecodeCfg {
	pub save_stem: String,
	pub trim_input: bool,
}

impl Default for DecodeCfg {
	fn default() -> Self {
		Self {
			save_stem: "rendered-image".to_owned(),
			trim_input: true,
		}
	}
}

impl DecodeCfg {
	/// Output path for `--save`, named after the detected content type
	pub fn save_path(&self, extension: &str) -> PathBuf {
		PathBuf::from(format!("{}.{extension}", self.save_stem))
	}
}

impl Config {
	pub fn from_toml(path: &Path, text: &str) -> Result<Config, ConfigError> {
		toml::from_str(text).map_err(|source| ConfigError::Parse {
			path: path.to_owned(),
			source,
		})
	}

	/// Loads `explicit` if given, else `user_path` if it exists, else the defaults
	pub fn load(explicit: Option<&Path>, user_path: &Path) -> Result<Config, ConfigError> {
		let path = match explicit {
			Some(path) => path.tilde_expand(),
			None if user_path.is_file() => user_path.to_owned(),
			None => {
				debug!("no config file at {user_path:?}, using defaults");
				return Ok(Config::default());
			}
		};

		debug!("reading config file {path:?}");
		let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
			path: path.clone(),
			source,
		})?;
		Self::from_toml(&path, &text)
	}
}
