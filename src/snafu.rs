//! Balanced base-5 ("SNAFU") numbers: each place is a power of five, and the
//! digits run from `=` (-2) through `-` (-1) up to `2`.

use std::fmt;
use std::str::FromStr;

use log::{debug, info};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Digit {
    Two,
    One,
    Zero,
    Minus,
    DoubleMinus,
}

impl Digit {
    pub fn value(self) -> i64 {
        match self {
            Digit::Two => 2,
            Digit::One => 1,
            Digit::Zero => 0,
            Digit::Minus => -1,
            Digit::DoubleMinus => -2,
        }
    }
}

impl TryFrom<char> for Digit {
    type Error = char;

    fn try_from(c: char) -> Result<Digit, char> {
        match c {
            '2' => Ok(Digit::Two),
            '1' => Ok(Digit::One),
            '0' => Ok(Digit::Zero),
            '-' => Ok(Digit::Minus),
            '=' => Ok(Digit::DoubleMinus),
            c => Err(c),
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
pub enum SnafuError {
    Empty,
    InvalidDigit { column: usize, found: char },
    Overflow,
}

impl fmt::Display for SnafuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnafuError::Empty => write!(f, "empty SNAFU number"),
            SnafuError::InvalidDigit { column, found } => {
                write!(f, "invalid SNAFU digit {:?} at column {}", found, column)
            }
            SnafuError::Overflow => write!(f, "SNAFU value does not fit in 64 bits"),
        }
    }
}

impl std::error::Error for SnafuError {}

/// Digits, most significant first.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Snafu(Vec<Digit>);

impl FromStr for Snafu {
    type Err = SnafuError;

    fn from_str(s: &str) -> Result<Snafu, SnafuError> {
        if s.is_empty() {
            return Err(SnafuError::Empty);
        }

        s.chars()
            .enumerate()
            .map(|(i, c)| {
                Digit::try_from(c).map_err(|found| SnafuError::InvalidDigit {
                    column: i + 1,
                    found,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Snafu)
    }
}

impl Snafu {
    /// Sums `digit * 5^place` from the rightmost place up. Every step is
    /// checked, so a value outside `i64` is an error rather than a wrap.
    pub fn to_decimal(&self) -> Result<i64, SnafuError> {
        self.0
            .iter()
            .rev()
            .enumerate()
            .try_fold(0i64, |acc, (place, digit)| {
                let weight = u32::try_from(place)
                    .ok()
                    .and_then(|p| 5i64.checked_pow(p))
                    .ok_or(SnafuError::Overflow)?;

                weight
                    .checked_mul(digit.value())
                    .and_then(|n| acc.checked_add(n))
                    .ok_or(SnafuError::Overflow)
            })
    }
}

pub fn to_decimal(line: &str) -> Result<i64, SnafuError> {
    line.parse::<Snafu>()?.to_decimal()
}

fn checked_total<I>(values: I) -> Result<i64, SnafuError>
where
    I: IntoIterator<Item = Result<i64, SnafuError>>,
{
    let total = values
        .into_iter()
        .try_fold(0i64, |acc, n| acc.checked_add(n?).ok_or(SnafuError::Overflow))?;

    info!("decimal total {}", total);
    Ok(total)
}

/// Decimal sum of every non-empty line.
pub fn decimal_total<'a, I>(lines: I) -> Result<i64, SnafuError>
where
    I: IntoIterator<Item = &'a str>,
{
    checked_total(lines.into_iter().filter(|l| !l.is_empty()).map(|line| {
        to_decimal(line).map(|n| {
            debug!("{} => {}", line, n);
            n
        })
    }))
}

/// Decimal sum of numbers that were already split into digits.
pub fn snafu_total(numbers: &[Snafu]) -> Result<i64, SnafuError> {
    checked_total(numbers.iter().map(Snafu::to_decimal))
}

/// The first `count` powers of five, largest first. This is the table used
/// to turn a decimal total back into SNAFU digits by hand.
pub fn powers_of_five(count: u32) -> Result<Vec<i64>, SnafuError> {
    (0..count)
        .rev()
        .map(|p| 5i64.checked_pow(p).ok_or(SnafuError::Overflow))
        .collect()
}

pub mod parser {
    use super::*;

    use nom::character::complete::{line_ending, one_of};
    use nom::combinator::{eof, map_res};
    use nom::multi::{many0, many1, separated_list0};
    use nom::sequence::{preceded, terminated, tuple};
    use nom::{IResult, Parser};

    fn digit(input: &str) -> IResult<&str, Digit> {
        map_res(one_of("210-="), Digit::try_from).parse(input)
    }

    pub fn snafu_line(input: &str) -> IResult<&str, Snafu> {
        many1(digit).map(Snafu).parse(input)
    }

    /// One SNAFU number per line; blank lines are skipped.
    pub fn parse_input(input: &str) -> IResult<&str, Vec<Snafu>> {
        preceded(
            many0(line_ending),
            terminated(
                separated_list0(many1(line_ending), snafu_line),
                tuple((many0(line_ending), eof)),
            ),
        )
        .parse(input)
    }

}
