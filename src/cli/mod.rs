//! Contains the argument handling and main logic of the CLI

use std::fs;
use std::io::{stdin, stdout, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use exitcode::{ExitCode, CANTCREAT, CONFIG, DATAERR, IOERR, NOINPUT};
use log::{debug, info, warn};

use bytea::config::{config_file, Config, ConfigError};
use bytea::mime;
use bytea::util::ext::PathExt;

// Structure based on the recommendations in
// https://rust-cli-recommendations.sunshowers.io/handling-arguments.html

#[derive(Parser)]
#[command(
	author,
	version,
	about,
	long_about,
	after_long_help = "\
	1. Logging: is controlled via the BYTEA_LOG environment variable. Set BYTEA_LOG to error, \
	warn, info, debug or trace to adjust verbosity. For examples, see RUST_LOG mentions in \
	https://docs.rs/env_logger/0.10.0/env_logger/\
	\n\
	\n\
	2. Configuration: defaults for --save are read from the file given with --config, else from \
	$XDG_CONFIG_HOME/bytea/config.toml (~/.config/bytea/config.toml if XDG_CONFIG_HOME is unset) \
	if it exists.\
	\n\
	\n\
	3. Paths: `-` reads from stdin instead of a file."
)]
pub struct Bytea {
	#[clap(flatten)]
	pub global_opts: GlobalOpts,

	#[clap(subcommand)]
	command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
	/// Encode a file (usually an image) as BYTEA hex text
	Encode(EncodeArgs),

	/// Decode BYTEA hex text back into the original bytes
	Decode(DecodeArgs),

	/// Print the content type detected from a file's leading bytes
	Detect {
		/// File to inspect, `-` for stdin
		file: PathBuf,

		/// Treat the file as BYTEA hex text and inspect the decoded bytes
		#[arg(long)]
		hex: bool,
	},
}

#[derive(Debug, Args)]
pub struct GlobalOpts {
	/// Verbosity level, can be specified multiple times, equivalent to BYTEA_LOG={info,debug,trace}
	#[arg(group="verbosity", long, short, global=true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Quiet mode, equivalent to BYTEA_LOG=error
	#[arg(group = "verbosity", long, short, global = true)]
	pub quiet: bool,

	/// Silent mode, equivalent to BYTEA_LOG=off
	#[arg(group = "verbosity", long, short, global = true)]
	pub silent: bool,

	/// Config file to use instead of $XDG_CONFIG_HOME/bytea/config.toml
	#[arg(long, global = true)]
	pub config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct OutputArgs {
	/// Write to this file instead of stdout
	#[arg(short, long, conflicts_with = "save")]
	output: Option<PathBuf>,

	/// Write to the default file name from the config instead of stdout
	#[arg(long)]
	save: bool,
}

#[derive(Debug, Args)]
struct EncodeArgs {
	/// Image to encode, `-` for stdin
	image: PathBuf,

	#[clap(flatten)]
	out: OutputArgs,
}

#[derive(Debug, Args)]
struct DecodeArgs {
	/// BYTEA hex text to decode (e.g. a .bytea or .txt file), `-` for stdin
	input: PathBuf,

	#[clap(flatten)]
	out: OutputArgs,
}

impl Bytea {
	pub fn exec(self) {
		self.init_logging();

		info!("version {} starting up", env!("CARGO_PKG_VERSION"));
		info!("log level set to {}", log::max_level());

		let user_path = config_file::default_path();
		let config = match Config::load(self.global_opts.config.as_deref(), &user_path) {
			Ok(config) => config,
			Err(e @ ConfigError::Read { .. }) => die(NOINPUT, &e.to_string()),
			Err(e @ ConfigError::Parse { .. }) => die(CONFIG, &e.to_string()),
		};
		debug!("using {config:?}");

		use Command::*;
		match self.command {
			Encode(args) => Self::encode(&config, args),
			Decode(args) => Self::decode(&config, args),
			Detect { file, hex } => Self::detect(&config, &file, hex),
		}

		info!("process exiting successfully");
	}

	fn init_logging(&self) {
		let mut logging_builder = env_logger::Builder::new();

		logging_builder
			.filter_level(log::LevelFilter::Warn)
			.format_timestamp_nanos()
			.parse_env("BYTEA_LOG");

		// Not using https://crates.io/crates/clap-verbosity-flag as the documentation suggests
		// it may not work with the [default -> env -> cli-args] override path
		let override_log_level = if self.global_opts.silent {
			Some(log::LevelFilter::Off)
		} else if self.global_opts.quiet {
			Some(log::LevelFilter::Error)
		} else {
			match self.global_opts.verbose {
				0 => None,
				1 => Some(log::LevelFilter::Info),
				2 => Some(log::LevelFilter::Debug),
				_ => Some(log::LevelFilter::Trace),
			}
		};

		if let Some(new_level) = override_log_level {
			logging_builder.filter_level(new_level);
		}

		logging_builder.init();
	}

	fn encode(config: &Config, args: EncodeArgs) {
		let bytes = read_input(&args.image);
		let content_type = mime::detect_type(&bytes);
		if !content_type.is_image() {
			warn!("{:?} is not a recognized image, encoding anyway", args.image);
		}
		info!("detected {content_type}");

		let mut text = bytea::encode(&bytes);

		let dest = args.out.resolve(|| config.encode.save_as.clone());
		if dest.is_none() {
			text.push('\n');
		}
		write_output(dest.as_deref(), text.as_bytes());

		info!("done ({})", size_kb(bytes.len()));
	}

	fn decode(config: &Config, args: DecodeArgs) {
		let bytes = decode_or_die(config, &args.input);
		let content_type = mime::detect_type(&bytes);
		if !content_type.is_image() {
			warn!("decoded data is not a recognized image");
		}
		info!("detected {content_type}, {}", size_kb(bytes.len()));

		let dest = args
			.out
			.resolve(|| config.decode.save_path(content_type.extension()));
		write_output(dest.as_deref(), &bytes);

		info!("decode subcommand done");
	}

	fn detect(config: &Config, file: &Path, hex: bool) {
		let content_type = if hex {
			mime::detect_type(&decode_or_die(config, file))
		} else {
			mime::detect_type(&read_input(file))
		};

		write_output(None, format!("{content_type}\n").as_bytes());
	}
}

impl OutputArgs {
	/// `None` means stdout
	fn resolve(&self, save_as: impl FnOnce() -> PathBuf) -> Option<PathBuf> {
		if self.save {
			Some(save_as())
		} else {
			self.output.clone().filter(|path| !path.is_stdio())
		}
	}
}

/// Size in KiB with two decimals, e.g. `1.50kb`
fn size_kb(len: usize) -> String {
	format!("{:.2}kb", len as f64 / 1024.0)
}

fn read_input(path: &Path) -> Vec<u8> {
	let result = if path.is_stdio() {
		debug!("reading stdin");
		let mut buf = Vec::new();
		stdin().lock().read_to_end(&mut buf).map(|_| buf)
	} else {
		debug!("reading {path:?}");
		fs::read(path.tilde_expand())
	};

	match result {
		Ok(bytes) => bytes,
		Err(e) if e.kind() == ErrorKind::NotFound => {
			die(NOINPUT, &format!("{path:?} does not exist, exiting"))
		}
		Err(e) => die(NOINPUT, &format!("unable to read {path:?}: {e}")),
	}
}

fn decode_or_die(config: &Config, path: &Path) -> Vec<u8> {
	let text = read_input(path);
	let text = if config.decode.trim_input {
		text.trim_ascii()
	} else {
		&text[..]
	};

	match bytea::decode(text) {
		Ok(bytes) => bytes,
		Err(e) => die(DATAERR, &format!("{path:?}: {e}")),
	}
}

/// Writes `data` to `dest`, or to stdout if `None`. A closed stdout pipe is not an error.
fn write_output(dest: Option<&Path>, data: &[u8]) {
	let Some(path) = dest else {
		let mut out = stdout().lock();
		match out.write_all(data).and_then(|_| out.flush()) {
			Ok(()) => (),
			Err(e) if e.kind() == ErrorKind::BrokenPipe => debug!("stdout closed early"),
			Err(e) => die(IOERR, &format!("unable to write to stdout: {e}")),
		}
		return;
	};

	debug!("writing {} bytes to {path:?}", data.len());
	if let Err(e) = fs::write(path.tilde_expand(), data) {
		die(CANTCREAT, &format!("unable to write {path:?}: {e}"))
	}
	info!("wrote {path:?}");
}

pub fn die(code: ExitCode, msg: &str) -> ! {
	log::error!("{}", msg);
	std::process::exit(code)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn size_kb_two_decimals() {
		assert_eq!(size_kb(0), "0.00kb");
		assert_eq!(size_kb(1536), "1.50kb");
		assert_eq!(size_kb(100), "0.10kb");
	}

	#[test]
	fn output_resolution() {
		let to_stdout = OutputArgs {
			output: None,
			save: false,
		};
		assert_eq!(to_stdout.resolve(|| "x".into()), None);

		let dash = OutputArgs {
			output: Some("-".into()),
			save: false,
		};
		assert_eq!(dash.resolve(|| "x".into()), None);

		let saved = OutputArgs {
			output: None,
			save: true,
		};
		assert_eq!(saved.resolve(|| "image.bytea".into()), Some("image.bytea".into()));
	}

	#[test]
	fn cli_definition() {
		use clap::CommandFactory;
		Bytea::command().debug_assert();
	}
}
