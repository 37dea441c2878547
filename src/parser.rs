use std::fmt;
use std::path::{Path, PathBuf};

use nom::character::complete::{line_ending, not_line_ending};
use nom::combinator::{eof, verify};
use nom::multi::{many0, many1, separated_list0};
use nom::sequence::{preceded, terminated, tuple};
use nom::{Finish, IResult, Parser};

#[derive(Debug)]
pub enum InputError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: nom::error::Error<String>,
    },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::Io { path, .. } => write!(f, "unable to read {}", path.display()),
            InputError::Parse { path, .. } => write!(f, "unable to parse {}", path.display()),
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::Io { source, .. } => Some(source),
            InputError::Parse { source, .. } => Some(source),
        }
    }
}

/// Reads the whole puzzle input. The file handle is closed before this returns.
pub fn read_input(path: &Path) -> Result<String, InputError> {
    let input = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_owned(),
        source,
    })?;

    log::debug!("read {} bytes from {}", input.len(), path.display());
    Ok(input)
}

/// Reads the whole puzzle input and runs `parser` over all of it.
pub fn read_and_parse<O, P>(path: &Path, parser: P) -> Result<O, InputError>
where
    P: for<'i> Parser<&'i str, O, nom::error::Error<&'i str>>,
{
    let input = read_input(path)?;

    nom_parse_to_owned(parser, input.as_str()).map_err(|source| InputError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Every non-empty line, in order. Any run of line endings separates two lines.
pub fn nonblank_lines(input: &str) -> IResult<&str, Vec<&str>> {
    let line = verify(not_line_ending, |s: &str| !s.is_empty());

    preceded(
        many0(line_ending),
        terminated(
            separated_list0(many1(line_ending), line),
            tuple((many0(line_ending), eof)),
        ),
    )
    .parse(input)
}

/// [`nonblank_lines`], copied out so the lines outlive the input buffer.
pub fn owned_lines(input: &str) -> IResult<&str, Vec<String>> {
    nonblank_lines
        .map(|lines| lines.into_iter().map(str::to_owned).collect())
        .parse(input)
}

pub fn nom_error_to_owned<I>(e: nom::error::Error<&I>) -> nom::error::Error<I::Owned>
where
    I: ToOwned + ?Sized,
    I::Owned: 'static,
{
    let nom::error::Error { input, code } = e;
    nom::error::Error {
        input: input.to_owned(),
        code,
    }
}

// Lifetime hacks to make the `?` operator usable with nom results.
//
// The output may still borrow from the input, only the error is made owned.
pub fn nom_parse_to_owned<'i, I, O, P>(
    mut parser: P,
    input: &'i I,
) -> Result<O, nom::error::Error<I::Owned>>
where
    I: ToOwned + ?Sized,
    I::Owned: 'static,
    P: Parser<&'i I, O, nom::error::Error<&'i I>>,
{
    match parser.parse(input).finish() {
        Ok((_i, o)) => Ok(o),
        Err(e) => Err(nom_error_to_owned(e)),
    }
}
