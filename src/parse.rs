//! Parser generators for lists of dice sides, like `6`, `4,6,8`, or `20, 12,`.

use alloc::{
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

use chumsky::prelude::*;

/// Generates a parser that handles a single, optionally negative, side count like "6" or "-1".
///
/// Negative values and zero are accepted here; deciding whether a side count is usable is left to whatever rolls it.
#[must_use]
pub fn side<'src>() -> impl Parser<'src, &'src str, i32, extra::Err<Rich<'src, char>>> + Clone {
	just('-')
		.or_not()
		.then(text::int(10))
		.try_map(|(neg, digits): (Option<char>, &str), span| {
			let val: i64 = digits
				.parse()
				.map_err(|err| Rich::custom(span, format!("Side count: {err}")))?;
			let val = if neg.is_some() { val.saturating_neg() } else { val };
			i32::try_from(val).map_err(|err| Rich::custom(span, format!("Side count: {err}")))
		})
		.labelled("side count")
}

/// Generates a parser that handles comma-separated lists of side counts like "4,6,8".
/// Whitespace around each entry and a trailing comma are allowed. An empty input produces an empty list.
#[must_use]
pub fn sides_part<'src>() -> impl Parser<'src, &'src str, Vec<i32>, extra::Err<Rich<'src, char>>> + Clone {
	side()
		.padded()
		.separated_by(just(','))
		.allow_trailing()
		.collect::<Vec<_>>()
		.padded()
}

/// Generates a parser that handles comma-separated lists of side counts like "4,6,8" and expects end of input
#[must_use]
pub fn sides<'src>() -> impl Parser<'src, &'src str, Vec<i32>, extra::Err<Rich<'src, char>>> + Clone {
	sides_part().then_ignore(end())
}

/// Parses a comma-separated list of side counts, flattening any parser errors into a single [`Error`].
///
/// # Errors
/// If the input isn't a valid list of integers, an error is returned with details from the parser.
///
/// # Examples
/// ```
/// use dicebag::parse::parse_sides;
///
/// assert_eq!(parse_sides("4,6,8")?, vec![4, 6, 8]);
/// assert_eq!(parse_sides(" 20, -1 ")?, vec![20, -1]);
/// assert!(parse_sides("4,six").is_err());
/// # Ok::<(), dicebag::parse::Error>(())
/// ```
pub fn parse_sides(input: &str) -> Result<Vec<i32>, Error> {
	sides().parse(input).into_result().map_err(|errs| Error {
		details: errs.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "),
	})
}

/// Error that can occur while parsing a string into a list of side counts.
/// This is a flattened form of the parser's own errors, for use where spans aren't needed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct Error {
	/// Details of the original parser error(s)
	pub details: String,
}

impl core::error::Error for Error {}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.details)
	}
}
