mod cli;

use clap::Parser;

fn main() {
	cli::Bytea::parse().exec()
}
