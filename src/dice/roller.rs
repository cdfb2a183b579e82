//! Abstractions for rolling dice using various sources of values.

use alloc::vec::Vec;
use core::{iter::Peekable, num::NonZeroU32};

#[cfg(feature = "fastrand")]
use fastrand::Rng;
use tracing::{debug, trace};

use super::{resolve_sides, DiceSet, DieOutcome, Error, InvalidArgument, RollResult};

/// Rolls dice - what else is there to say?
///
/// Implementors only need to provide [`Self::sample()`]. Validation and aggregation are handled by the provided
/// methods, so every roller upholds the same rules for what can be rolled.
pub trait Roller {
	/// Produces a single value for a die with the given number of sides.
	/// The value must be between 1 and `sides` (inclusive).
	#[must_use]
	fn sample(&mut self, sides: NonZeroU32) -> u32;

	/// Rolls a single die with the given number of sides.
	///
	/// # Errors
	/// If `sides` is less than 1, [`Error::InvalidArgument`] is returned.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::{roller::{Max as MaxRoller, Roller}, Error, InvalidArgument};
	///
	/// let mut roller = MaxRoller;
	/// assert_eq!(roller.roll_die(20), Ok(20));
	/// assert_eq!(roller.roll_die(0), Err(Error::InvalidArgument(InvalidArgument::DieSides(0))));
	/// ```
	fn roll_die(&mut self, sides: i32) -> Result<u32, Error> {
		let Some(sides) = positive(sides) else {
			debug!(sides, "rejected die");
			return Err(InvalidArgument::DieSides(sides).into());
		};

		Ok(self.sample(sides))
	}

	/// Rolls `count` dice, each with the number of sides at the same position in `sides`.
	/// Dice past the end of `sides` use its first entry (see [`resolve_sides()`]).
	///
	/// Each die's number of sides is checked as it is reached, in order. As soon as an invalid one is found, the
	/// whole roll is abandoned and the dice already rolled are discarded.
	///
	/// # Errors
	/// If `count` is less than 1, `sides` is empty, or any die's number of sides is less than 1,
	/// [`Error::InvalidArgument`] is returned.
	///
	/// # Examples
	/// ```
	/// use dicebag::dice::{roller::{Iter as IterRoller, Roller}, DieOutcome};
	///
	/// let mut roller = IterRoller::new([3, 5, 1]);
	/// let rolled = roller.roll_set(3, &[4, 6])?;
	/// assert_eq!(rolled.count, 3);
	/// assert_eq!(rolled.total, 9);
	/// assert_eq!(
	/// 	rolled.dice,
	/// 	vec![DieOutcome::new(4, 3), DieOutcome::new(6, 5), DieOutcome::new(4, 1)]
	/// );
	/// # Ok::<(), dicebag::dice::Error>(())
	/// ```
	fn roll_set(&mut self, count: i32, sides: &[i32]) -> Result<RollResult, Error> {
		let Some(total_dice) = positive(count) else {
			debug!(count, "rejected dice count");
			return Err(InvalidArgument::DiceCount(count).into());
		};
		if sides.is_empty() {
			debug!(count, "rejected empty sides");
			return Err(InvalidArgument::EmptySides.into());
		}

		debug!(count, sides = sides.len(), "rolling dice set");

		// Roll the dice! Capacity is capped by the sides list since the count is unchecked until each die is reached
		let mut dice = Vec::with_capacity(sides.len().min(total_dice.get() as usize));
		let mut total: u64 = 0;
		for index in 0..total_dice.get() as usize {
			let die_sides = resolve_sides(sides, index).ok_or(InvalidArgument::EmptySides)?;
			let Some(valid_sides) = positive(die_sides) else {
				debug!(index, sides = die_sides, "rejected die");
				return Err(InvalidArgument::Sides {
					index,
					sides: die_sides,
				}
				.into());
			};

			let result = self.sample(valid_sides);
			trace!(index, sides = die_sides, result, "rolled die");
			dice.push(DieOutcome::new(valid_sides.get(), result));
			total = total.saturating_add(u64::from(result));
		}

		Ok(RollResult {
			count: total_dice.get(),
			total,
			dice,
		})
	}

	/// Rolls a [`DiceSet`].
	///
	/// # Errors
	/// See [`Self::roll_set()`].
	#[inline]
	fn roll(&mut self, dice: &DiceSet) -> Result<RollResult, Error> {
		self.roll_set(dice.count, &dice.sides)
	}
}

/// Converts a signed count into a non-zero unsigned one, if it is at least 1.
#[inline]
fn positive(val: i32) -> Option<NonZeroU32> {
	u32::try_from(val).ok().and_then(NonZeroU32::new)
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// Each roller owns its RNG, so separate rollers can be used from separate threads without sharing any state.
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use dicebag::dice::{roller::{FastRand as FastRandRoller, Roller}, DiceSet};
///
/// let mut roller = FastRandRoller::default();
///
/// let dice = DiceSet::new(4, [6]);
/// let _ = roller.roll(&dice)?;
/// let _ = roller.roll(&dice)?;
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use dicebag::dice::{roller::{FastRand as FastRandRoller, Roller}, DiceSet};
///
/// let mut first = FastRandRoller::with_seed(0x750c38d574400);
/// let mut second = FastRandRoller::with_seed(0x750c38d574400);
///
/// let dice = DiceSet::new(4, [6, 8, 10, 12]);
/// assert_eq!(first.roll(&dice)?, second.roll(&dice)?);
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
///
/// ## Custom fastrand roller
/// ```
/// use dicebag::dice::{roller::{FastRand as FastRandRoller, Roller}, DiceSet};
/// use fastrand::Rng;
///
/// let rng = Rng::with_seed(0x750c38d574400);
/// let mut roller = FastRandRoller::new(rng);
///
/// let dice = DiceSet::new(4, [6]);
/// let _ = roller.roll(&dice)?;
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone)]
#[cfg_attr(feature = "std", derive(Default))]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Samples a value uniformly using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn sample(&mut self, sides: NonZeroU32) -> u32 {
		self.0.u32(1..=sides.get())
	}
}

/// Generates rolls that always have a specific value, clamped to the range of the die being rolled.
///
/// # Examples
/// ```
/// use dicebag::dice::{roller::{Roller, Val as ValRoller}, DiceSet};
///
/// let mut roller = ValRoller(4);
///
/// let rolled = roller.roll(&DiceSet::new(4, [6]))?;
/// assert!(rolled.dice.iter().all(|die| die.result == 4));
///
/// let rolled = roller.roll(&DiceSet::new(2, [3]))?;
/// assert!(rolled.dice.iter().all(|die| die.result == 3));
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub u32);

impl Roller for Val {
	/// Samples a value, always the same one unless the die is too small for it.
	#[inline]
	fn sample(&mut self, sides: NonZeroU32) -> u32 {
		self.0.clamp(1, sides.get())
	}
}

/// Generates rolls that always have their max value.
///
/// # Examples
/// ```
/// use dicebag::dice::{roller::{Max as MaxRoller, Roller}, DiceSet};
///
/// let mut roller = MaxRoller;
///
/// let rolled = roller.roll(&DiceSet::new(3, [4, 6, 8]))?;
/// assert_eq!(rolled.total, 18);
/// assert!(rolled.dice.iter().all(|die| die.result == die.sides));
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Samples the max value (same as the number of sides).
	#[inline]
	fn sample(&mut self, sides: NonZeroU32) -> u32 {
		sides.get()
	}
}

/// Generates rolls from an iterator of values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use dicebag::dice::{roller::{Iter as IterRoller, Roller}, DiceSet};
///
/// let mut roller = IterRoller::new(vec![1, 2, 3, 4, 5]);
/// let rolled = roller.roll(&DiceSet::new(5, [6]))?;
/// assert_eq!(rolled.dice.iter().map(|die| die.result).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
/// assert!(!roller.can_roll());
/// # Ok::<(), dicebag::dice::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u32>>(Peekable<I>);

impl<I: Iterator<Item = u32>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}
}

impl<I: Iterator<Item = u32>> Roller for Iter<I> {
	/// Samples the value from the next iteration. The values are used as-is, so they should fit the dice being rolled.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn sample(&mut self, _sides: NonZeroU32) -> u32 {
		self.0.next().expect("iterator is finished")
	}
}
