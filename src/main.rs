use std::{convert::Infallible, ffi::OsString, io, ops::Range, process::ExitCode};

use ariadne::{Label, Report, ReportKind, Source};
use chumsky::Parser;
use dicebag::dice::{roller::FastRand as FastRandRoller, DiceSet, Error as DiceError, RollResult, Roller};
use tracing::debug;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "\
Usage: dicebag [options]
    -n, --number-of-dice N           Number of dice to roll. Default is 1
    -s, --sides SIDES                Comma-separated list of sides for each die. Default is 6
    -h, --help                       Show this help message
";

/// Name of the source used in reports about the sides option
const SIDES_SOURCE: &str = "--sides";

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.with_writer(io::stderr)
		.init();

	let mut args = pico_args::Arguments::from_env();
	if args.contains(["-h", "--help"]) {
		print!("{USAGE}");
		return ExitCode::SUCCESS;
	}

	let mut app = App::new(FastRandRoller::default());
	match Options::parse(args).and_then(|opts| app.run(opts)) {
		Ok(rolled) => {
			println!("{rolled}");
			ExitCode::SUCCESS
		}
		Err(err) => {
			debug!(?err, "unable to roll");
			if let Err(io_err) = err.report() {
				eprintln!("Unable to write error report: {io_err}");
			}
			ExitCode::FAILURE
		}
	}
}

/// Rolls dice for the command line with whatever roller it's given
#[derive(Debug)]
struct App<R: Roller> {
	roller: R,
}

impl<R: Roller> App<R> {
	const fn new(roller: R) -> Self {
		Self { roller }
	}

	/// Rolls the dice described by the options.
	fn run(&mut self, opts: Options) -> Result<RollResult, CliError> {
		let dice = opts.into_dice();
		debug!(%dice, "rolling");
		Ok(self.roller.roll(&dice)?)
	}
}

/// Options given on the command line. Anything not given is [`None`].
#[derive(Debug, Default, PartialEq, Eq)]
struct Options {
	count: Option<i32>,
	sides: Option<Vec<i32>>,
}

impl Options {
	/// Reads the options from the arguments, rejecting any obviously unusable values up front.
	fn parse(mut args: pico_args::Arguments) -> Result<Self, CliError> {
		let count = args.opt_value_from_str(["-n", "--number-of-dice"])?;
		let sides = args
			.opt_value_from_fn(["-s", "--sides"], |s| Ok::<_, Infallible>(s.to_owned()))?
			.map(|input| parse_sides(&input))
			.transpose()?;

		let remaining = args.finish();
		if !remaining.is_empty() {
			return Err(CliError::Unexpected(remaining));
		}

		let opts = Self { count, sides };
		opts.validate()?;
		Ok(opts)
	}

	/// Checks the values that were explicitly given.
	/// An empty list of sides isn't caught here, so it's rejected when rolling instead.
	fn validate(&self) -> Result<(), CliError> {
		if self.count.is_some_and(|count| count <= 0) {
			return Err(CliError::DiceCount);
		}
		if self.sides.as_ref().is_some_and(|sides| sides.iter().any(|&side| side <= 0)) {
			return Err(CliError::Sides);
		}
		Ok(())
	}

	/// Fills in defaults for anything that wasn't given.
	fn into_dice(self) -> DiceSet {
		let defaults = DiceSet::default();
		DiceSet::new(self.count.unwrap_or(defaults.count), self.sides.unwrap_or(defaults.sides))
	}
}

/// Parses the value of the sides option, keeping the location of any problems for reporting.
fn parse_sides(input: &str) -> Result<Vec<i32>, CliError> {
	dicebag::parser().parse(input).into_result().map_err(|errs| CliError::SidesSyntax {
		input: input.to_owned(),
		problems: errs
			.iter()
			.map(|err| (err.span().start..err.span().end, err.to_string()))
			.collect(),
	})
}

/// Reasons the command line couldn't produce a roll
#[derive(thiserror::Error, Debug)]
enum CliError {
	#[error("{0}")]
	Args(#[from] pico_args::Error),

	#[error("Unexpected arguments: {0:?}")]
	Unexpected(Vec<OsString>),

	#[error("Invalid list of sides")]
	SidesSyntax {
		input: String,
		problems: Vec<(Range<usize>, String)>,
	},

	#[error("Number of dice must be specified and greater than 0.")]
	DiceCount,

	#[error("Side count must be specified and all must be greater than 0.")]
	Sides,

	#[error("Unable to roll: {0}")]
	Roll(#[from] DiceError),
}

impl CliError {
	/// Prints the error to stdout, with a source report for syntax problems.
	fn report(&self) -> io::Result<()> {
		match self {
			Self::SidesSyntax { input, problems } => {
				for (span, problem) in problems {
					Report::build(ReportKind::Error, (SIDES_SOURCE, span.clone()))
						.with_message(self.to_string())
						.with_label(Label::new((SIDES_SOURCE, span.clone())).with_message(problem))
						.finish()
						.write((SIDES_SOURCE, Source::from(input.as_str())), io::stdout())?;
				}
			}
			_ => println!("Error: {self}"),
		}
		Ok(())
	}
}
