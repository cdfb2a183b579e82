//! All functionality for describing sets of dice, rolling them, and working with the resulting outcomes.
//!
//! A [`DiceSet`] is a request: how many dice to roll and how many sides each of them has. Rolling one with a
//! [`Roller`] yields a [`RollResult`] made up of one [`DieOutcome`] per die, in the order the dice were requested.

pub mod roller;

use alloc::vec::Vec;
use core::fmt;

pub use self::roller::Roller;

/// Default number of sides for a die when none are specified
pub const DEFAULT_SIDES: i32 = 6;

/// A request to roll some number of dice, each with its own number of sides.
///
/// Dice beyond the end of [`Self::sides`] use the *first* entry of it, not the last.
/// See [`resolve_sides()`] for the details.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[allow(clippy::exhaustive_structs)]
pub struct DiceSet {
	/// Number of dice to roll
	pub count: i32,

	/// Number of sides for each die, in roll order
	pub sides: Vec<i32>,
}

impl DiceSet {
	/// Creates a new set of dice with a given count and list of sides.
	#[must_use]
	pub fn new(count: i32, sides: impl Into<Vec<i32>>) -> Self {
		Self {
			count,
			sides: sides.into(),
		}
	}

	/// Creates a new dice set builder.
	#[must_use]
	#[inline]
	pub fn builder() -> Builder {
		Builder::default()
	}

	/// Determines the number of sides for the die at `index` (0-indexed).
	/// This is [`None`] only when the list of sides is empty.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::DiceSet;
	///
	/// let dice = DiceSet::new(4, [12, 20]);
	/// assert_eq!(dice.sides_for(0), Some(12));
	/// assert_eq!(dice.sides_for(1), Some(20));
	/// assert_eq!(dice.sides_for(2), Some(12));
	/// assert_eq!(dice.sides_for(3), Some(12));
	/// ```
	#[must_use]
	#[inline]
	pub fn sides_for(&self, index: usize) -> Option<i32> {
		resolve_sides(&self.sides, index)
	}

	/// Rolls the dice with the given roller.
	///
	/// # Errors
	/// If the count, the list of sides, or any die's resolved number of sides is invalid,
	/// [`Error::InvalidArgument`] is returned.
	#[inline]
	pub fn roll(&self, roller: &mut impl Roller) -> Result<RollResult, Error> {
		roller.roll(self)
	}
}

impl Default for DiceSet {
	/// Creates the default dice set (a single six-sided die).
	#[inline]
	fn default() -> Self {
		Self::new(1, [DEFAULT_SIDES])
	}
}

impl fmt::Display for DiceSet {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{} dice (sides: ", self.count)?;
		for (i, sides) in self.sides.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{sides}")?;
		}
		f.write_str(")")
	}
}

/// Determines the number of sides for the die at `index` from a list of side counts.
///
/// The entry at `index` is used when there is one. Otherwise the die falls back to the first entry, no matter how
/// far past the end of the list `index` is. [`None`] is returned only for an empty list.
///
/// # Examples
/// ```
/// use dicebag::dice::resolve_sides;
///
/// assert_eq!(resolve_sides(&[4, 6, 8], 2), Some(8));
/// assert_eq!(resolve_sides(&[4, 6, 8], 3), Some(4));
/// assert_eq!(resolve_sides(&[4, 6, 8], 100), Some(4));
/// assert_eq!(resolve_sides(&[], 0), None);
/// ```
#[must_use]
#[inline]
pub fn resolve_sides(sides: &[i32], index: usize) -> Option<i32> {
	sides.get(index).or_else(|| sides.first()).copied()
}

/// Single die produced from rolling a [`DiceSet`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::exhaustive_structs)]
pub struct DieOutcome {
	/// Number of sides the die had
	pub sides: u32,

	/// Value that was rolled, from 1 to [`Self::sides`] (inclusive)
	pub result: u32,
}

impl DieOutcome {
	/// Creates a new die outcome.
	#[must_use]
	pub const fn new(sides: u32, result: u32) -> Self {
		Self { sides, result }
	}
}

impl fmt::Display for DieOutcome {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::DieOutcome;
	///
	/// assert_eq!(DieOutcome::new(20, 17).to_string(), "Die with 20 sides: rolled 17");
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Die with {} sides: rolled {}", self.sides, self.result)
	}
}

/// Representation of the result from rolling a [`DiceSet`].
///
/// [`Self::count`] always matches the length of [`Self::dice`], and [`Self::total`] is always the sum of their
/// results. The dice are in the order they were rolled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub struct RollResult {
	/// Number of dice that were rolled
	pub count: u32,

	/// Sum of all of the rolled values
	pub total: u64,

	/// Each individual die that was rolled
	pub dice: Vec<DieOutcome>,
}

impl RollResult {
	/// Builds a result from die outcomes, deriving the count and total from them.
	///
	/// # Panics
	/// Panics if there are more than [`u32::MAX`] outcomes.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::{DieOutcome, RollResult};
	///
	/// let result = RollResult::from_outcomes([DieOutcome::new(4, 3), DieOutcome::new(8, 7)]);
	/// assert_eq!(result.count, 2);
	/// assert_eq!(result.total, 10);
	/// ```
	#[must_use]
	pub fn from_outcomes(outcomes: impl IntoIterator<Item = DieOutcome>) -> Self {
		let dice: Vec<_> = outcomes.into_iter().collect();
		let count = u32::try_from(dice.len()).unwrap_or_else(|_| panic!("more than {} dice", u32::MAX));
		let total = dice.iter().map(|die| u64::from(die.result)).sum();
		Self { count, total, dice }
	}
}

impl fmt::Display for RollResult {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is a short report: the number of dice, the total, then one line per die.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::{DieOutcome, RollResult};
	///
	/// let result = RollResult::from_outcomes([DieOutcome::new(4, 3), DieOutcome::new(8, 7)]);
	/// assert_eq!(
	/// 	result.to_string(),
	/// 	"Number of dice rolled: 2\nTotal result: 10\nDie with 4 sides: rolled 3\nDie with 8 sides: rolled 7",
	/// );
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "Number of dice rolled: {}\nTotal result: {}", self.count, self.total)?;
		for die in &self.dice {
			write!(f, "\n{die}")?;
		}
		Ok(())
	}
}

/// An error resulting from a dice operation
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
	/// An argument given for a roll was invalid. Nothing is rolled past the point the problem is found.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::{roller::{Max as MaxRoller, Roller}, Error, InvalidArgument};
	///
	/// let result = MaxRoller.roll_set(3, &[6, -2]);
	/// assert_eq!(
	/// 	result,
	/// 	Err(Error::InvalidArgument(InvalidArgument::Sides { index: 1, sides: -2 }))
	/// );
	/// ```
	#[error("invalid argument: {0}")]
	InvalidArgument(#[from] InvalidArgument),
}

/// Details on what made an argument invalid
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum InvalidArgument {
	/// The number of dice to roll was less than 1.
	#[error("number of dice must be at least 1 (got {0})")]
	DiceCount(i32),

	/// There were no side counts to roll dice with.
	#[error("sides must be a non-empty list")]
	EmptySides,

	/// A single die's number of sides was less than 1.
	#[error("number of sides must be greater than 0 (got {0})")]
	DieSides(i32),

	/// The number of sides for a die in a set was less than 1.
	#[error("number of sides must be greater than 0 (die {index} has {sides})")]
	Sides {
		/// Position of the die in the set (0-indexed)
		index: usize,

		/// Number of sides the die resolved to
		sides: i32,
	},
}

/// Builds a [`DiceSet`] with a fluent interface.
///
/// # Examples
///
/// ## Default dice
/// ```
/// use dicebag::dice::DiceSet;
///
/// assert_eq!(DiceSet::builder().build(), DiceSet::new(1, [6]));
/// ```
///
/// ## Mixed dice
/// ```
/// use dicebag::dice::DiceSet;
///
/// let dice = DiceSet::builder().count(3).sides([4, 6]).push_sides(8).build();
/// assert_eq!(dice, DiceSet::new(3, [4, 6, 8]));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder {
	/// Dice set being built
	dice: DiceSet,

	/// Whether the default list of sides has been replaced yet
	custom_sides: bool,
}

impl Builder {
	/// Sets the number of dice to roll.
	#[must_use]
	pub const fn count(mut self, count: i32) -> Self {
		self.dice.count = count;
		self
	}

	/// Replaces the list of sides per die.
	#[must_use]
	pub fn sides(mut self, sides: impl IntoIterator<Item = i32>) -> Self {
		self.dice.sides = sides.into_iter().collect();
		self.custom_sides = true;
		self
	}

	/// Appends the number of sides for one more die to the list of sides.
	/// If the list is still the default one, it is replaced instead.
	#[must_use]
	pub fn push_sides(mut self, sides: i32) -> Self {
		if !self.custom_sides {
			self.dice.sides.clear();
			self.custom_sides = true;
		}
		self.dice.sides.push(sides);
		self
	}

	/// Finalizes the dice set.
	#[must_use]
	pub fn build(self) -> DiceSet {
		self.dice
	}
}
