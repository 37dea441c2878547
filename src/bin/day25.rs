use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use advent::parser::read_and_parse;
use advent::snafu::{parser, powers_of_five, snafu_total};

/// Adds up SNAFU fuel requirements and prints the total in decimal.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Puzzle input: one SNAFU number per line.
    #[arg(default_value = "input/day25.txt")]
    input: PathBuf,

    #[arg(short, long)]
    verbose: bool,

    /// Also print the first N powers of five, largest first.
    #[arg(long, value_name = "N")]
    powers: Option<u32>,
}

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    advent::init_logging(args.verbose);

    let numbers = read_and_parse(&args.input, parser::parse_input)?;

    let total = snafu_total(&numbers)
        .with_context(|| format!("converting {}", args.input.display()))?;

    if let Some(count) = args.powers {
        for p in powers_of_five(count)? {
            println!("{}", p);
        }
    }

    println!("Decimal total: {}", total);

    Ok(())
}
