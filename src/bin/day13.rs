use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use advent::packet::{decoder_key, ordered_pair_index_sum};
use advent::parser::{owned_lines, read_and_parse};

/// Checks which pairs of distress signal packets are in the right order.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Puzzle input: pairs of packets separated by blank lines.
    #[arg(default_value = "input/day13.txt")]
    input: PathBuf,

    #[arg(short, long)]
    verbose: bool,
}

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    advent::init_logging(args.verbose);

    let lines = read_and_parse(&args.input, owned_lines)?;

    let sum = ordered_pair_index_sum(lines.iter().map(String::as_str))
        .with_context(|| format!("comparing packet pairs in {}", args.input.display()))?;
    println!("Ordered pair index sum: {}", sum);

    let key = decoder_key(lines.iter().map(String::as_str))
        .with_context(|| format!("sorting packets in {}", args.input.display()))?;
    println!("Decoder key: {}", key);

    Ok(())
}
