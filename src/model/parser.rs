//! Problem-definition file format.
//!
//! Whitespace-separated tokens:
//!
//! ```text
//! <emitter count>
//! <id> <x> <y> <z> <demand>        (repeated <emitter count> times)
//! <separation> <distance>          (repeated until end of input)
//! ```
//!
//! Interference entries are not checked for monotonicity or duplicates;
//! a repeated separation keeps the last distance.

use super::builder::ProblemBuilder;
use super::emitter::Emitter;
use super::problem::ProblemModel;
use crate::error::{FapError, Result};
use std::path::Path;
use std::str::FromStr;

/// Token cursor that reports the 1-based token position on failure.
struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
            position: 0,
        }
    }

    fn next_raw(&mut self, what: &str) -> Result<&'a str> {
        self.position += 1;
        self.inner
            .next()
            .ok_or_else(|| FapError::parse(self.position, format!("unexpected end of input, expected {what}")))
    }

    fn next<T: FromStr>(&mut self, what: &str) -> Result<T> {
        let token = self.next_raw(what)?;
        token
            .parse()
            .map_err(|_| FapError::parse(self.position, format!("expected {what}, found '{token}'")))
    }

    fn next_or_end<T: FromStr>(&mut self, what: &str) -> Result<Option<T>> {
        match self.inner.next() {
            None => Ok(None),
            Some(token) => {
                self.position += 1;
                token.parse().map(Some).map_err(|_| {
                    FapError::parse(self.position, format!("expected {what}, found '{token}'"))
                })
            }
        }
    }
}

/// Parses a problem definition from text.
///
/// No partial model is returned on failure.
///
/// # Examples
///
/// ```
/// let model = u_fap::model::parse_problem("2\nA 0 0 0 1\nB 3 4 0 2\n0 5.0\n1 0\n").unwrap();
/// assert_eq!(model.num_emitters(), 2);
/// assert_eq!(model.total_demand(), 3);
/// assert_eq!(model.interference().min_distance_for(0), 5.0);
/// ```
pub fn parse_problem(input: &str) -> Result<ProblemModel> {
    let mut tokens = Tokens::new(input);
    let count: usize = tokens.next("emitter count")?;

    let mut builder = ProblemBuilder::new();
    for _ in 0..count {
        let id = tokens.next_raw("emitter id")?;
        let x = tokens.next("x coordinate")?;
        let y = tokens.next("y coordinate")?;
        let z = tokens.next("z coordinate")?;
        let demand = tokens.next("demand")?;
        builder.add_emitter(Emitter::new(id, x, y, z, demand));
    }

    while let Some(separation) = tokens.next_or_end::<u32>("separation")? {
        let distance: f64 = tokens.next("interference distance")?;
        if distance.is_nan() {
            return Err(FapError::parse(
                tokens.position,
                "interference distance must be a number, found NaN",
            ));
        }
        builder.add_interference(separation, distance);
    }

    Ok(builder.build())
}

/// Reads and parses a problem definition file.
pub fn load_problem(path: impl AsRef<Path>) -> Result<ProblemModel> {
    let path = path.as_ref();
    let input = std::fs::read_to_string(path)?;
    let model = parse_problem(&input)?;
    tracing::info!(
        path = %path.display(),
        emitters = model.num_emitters(),
        total_demand = model.total_demand(),
        "loaded FAP instance"
    );
    Ok(model)
}

impl FromStr for ProblemModel {
    type Err = FapError;

    fn from_str(s: &str) -> Result<Self> {
        parse_problem(s)
    }
}
