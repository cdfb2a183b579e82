use std::thread;

use crate::dice::{
	roller::{FastRand as FastRandRoller, Iter as IterRoller, Max as MaxRoller, Roller, Val as ValRoller},
	DiceSet, DieOutcome, Error, InvalidArgument, RollResult,
};

#[test]
fn single_die_in_range() {
	let mut roller = FastRandRoller::default();
	for sides in [1, 2, 6, 20, 100, i32::MAX] {
		for _ in 0..200 {
			let val = roller.roll_die(sides).unwrap();
			assert!((1..=sides.unsigned_abs()).contains(&val));
		}
	}
}

#[test]
fn one_sided_die_always_rolls_one() {
	let mut roller = FastRandRoller::with_seed(42);
	assert!((0..100).all(|_| roller.roll_die(1) == Ok(1)));
}

#[test]
fn all_die_sides_occur() {
	let mut roller = FastRandRoller::with_seed(0x750c38d574400);
	let mut counts = [0_u32; 20];
	for _ in 0..20_000 {
		let val = roller.roll_die(20).unwrap();
		counts[val as usize - 1] += 1;
	}

	// Roughly uniform: every face should land within a generous margin of 1000
	for (face, count) in counts.iter().enumerate() {
		assert!((700..=1300).contains(count), "face {} came up {} times", face + 1, count);
	}
}

#[test]
fn rejects_invalid_die() {
	let mut roller = FastRandRoller::default();
	assert_eq!(roller.roll_die(0), Err(Error::InvalidArgument(InvalidArgument::DieSides(0))));
	assert_eq!(roller.roll_die(-1), Err(Error::InvalidArgument(InvalidArgument::DieSides(-1))));
	assert_eq!(
		roller.roll_die(i32::MIN),
		Err(Error::InvalidArgument(InvalidArgument::DieSides(i32::MIN)))
	);
}

#[test]
fn default_roll() {
	let rolled = FastRandRoller::default().roll(&DiceSet::default()).unwrap();
	assert_eq!(rolled.count, 1);
	assert_eq!(rolled.dice.len(), 1);
	assert_eq!(rolled.dice[0].sides, 6);
	assert!((1..=6).contains(&rolled.dice[0].result));
	assert_eq!(rolled.total, u64::from(rolled.dice[0].result));
}

#[test]
fn sides_are_aligned_with_request() {
	let rolled = FastRandRoller::default().roll_set(3, &[4, 6, 8]).unwrap();
	assert_eq!(rolled.count, 3);
	assert_eq!(rolled.dice.len(), 3);
	assert_eq!(rolled.dice[0].sides, 4);
	assert_eq!(rolled.dice[1].sides, 6);
	assert_eq!(rolled.dice[2].sides, 8);
	assert_eq!(rolled.total, rolled.dice.iter().map(|die| u64::from(die.result)).sum());
}

#[test]
fn extra_dice_use_first_sides() {
	let rolled = FastRandRoller::default().roll_set(3, &[10]).unwrap();
	assert_eq!(rolled.count, 3);
	assert_eq!(rolled.dice.len(), 3);
	assert!(rolled.dice.iter().all(|die| die.sides == 10));

	let rolled = MaxRoller.roll_set(5, &[4, 6]).unwrap();
	assert_eq!(
		rolled.dice.iter().map(|die| die.sides).collect::<Vec<_>>(),
		vec![4, 6, 4, 4, 4]
	);
}

#[test]
fn fewer_dice_than_sides() {
	let rolled = MaxRoller.roll_set(2, &[4, 6, 8, 10]).unwrap();
	assert_eq!(rolled, RollResult::from_outcomes([DieOutcome::new(4, 4), DieOutcome::new(6, 6)]));
}

#[test]
fn results_keep_roll_order() {
	let mut roller = IterRoller::new([2, 9, 1, 5]);
	let rolled = roller.roll_set(4, &[2, 10, 6, 8]).unwrap();
	assert_eq!(
		rolled.dice,
		vec![
			DieOutcome::new(2, 2),
			DieOutcome::new(10, 9),
			DieOutcome::new(6, 1),
			DieOutcome::new(8, 5),
		]
	);
	assert_eq!(rolled.total, 17);
	assert!(!roller.can_roll());
}

#[test]
fn aggregation_holds_for_many_sets() {
	let mut roller = FastRandRoller::with_seed(7);
	for count in 1..=40 {
		let sides: Vec<i32> = (1..=count % 7 + 1).map(|n| n * 3).collect();
		let rolled = roller.roll_set(count, &sides).unwrap();
		assert_eq!(rolled.count as usize, rolled.dice.len());
		assert_eq!(rolled.dice.len(), count as usize);
		assert_eq!(rolled.total, rolled.dice.iter().map(|die| u64::from(die.result)).sum());
		assert!(rolled.dice.iter().all(|die| (1..=die.sides).contains(&die.result)));
	}
}

#[test]
fn rejects_invalid_count() {
	let mut roller = FastRandRoller::default();
	assert_eq!(
		roller.roll_set(0, &[6]),
		Err(Error::InvalidArgument(InvalidArgument::DiceCount(0)))
	);
	assert_eq!(
		roller.roll_set(-1, &[6]),
		Err(Error::InvalidArgument(InvalidArgument::DiceCount(-1)))
	);
}

#[test]
fn rejects_empty_sides() {
	assert_eq!(
		FastRandRoller::default().roll_set(1, &[]),
		Err(Error::InvalidArgument(InvalidArgument::EmptySides))
	);
}

#[test]
fn rejects_invalid_sides() {
	let mut roller = FastRandRoller::default();
	assert_eq!(
		roller.roll_set(1, &[0]),
		Err(Error::InvalidArgument(InvalidArgument::Sides { index: 0, sides: 0 }))
	);
	assert_eq!(
		roller.roll_set(1, &[-1]),
		Err(Error::InvalidArgument(InvalidArgument::Sides { index: 0, sides: -1 }))
	);
}

#[test]
fn invalid_sides_are_found_in_roll_order() {
	// The first two dice are rolled before the third is found to be invalid
	let mut roller = IterRoller::new([1, 2, 3]);
	assert_eq!(
		roller.roll_set(4, &[6, 6, 0, -5]),
		Err(Error::InvalidArgument(InvalidArgument::Sides { index: 2, sides: 0 }))
	);
	assert!(roller.can_roll());

	// Sides past the count are never looked at
	let rolled = MaxRoller.roll_set(2, &[6, 8, 0, -5]).unwrap();
	assert_eq!(rolled.total, 14);
}

#[test]
fn huge_count_fails_on_first_invalid_die() {
	assert_eq!(
		MaxRoller.roll_set(i32::MAX, &[0]),
		Err(Error::InvalidArgument(InvalidArgument::Sides { index: 0, sides: 0 }))
	);
	assert_eq!(
		MaxRoller.roll_set(i32::MAX, &[-1]),
		Err(Error::InvalidArgument(InvalidArgument::Sides { index: 0, sides: -1 }))
	);
	assert_eq!(
		MaxRoller.roll_set(i32::MAX, &[6, 0]),
		Err(Error::InvalidArgument(InvalidArgument::Sides { index: 1, sides: 0 }))
	);
}

#[test]
fn invalid_first_sides_poison_fallback_dice() {
	let mut roller = IterRoller::new([1]);
	assert_eq!(
		roller.roll_set(2, &[0]),
		Err(Error::InvalidArgument(InvalidArgument::Sides { index: 0, sides: 0 }))
	);
	assert!(roller.can_roll());
}

#[test]
fn rollers_produce_expected_values() {
	assert_eq!(MaxRoller.roll_die(12), Ok(12));
	assert_eq!(ValRoller(3).roll_die(12), Ok(3));
	assert_eq!(ValRoller(30).roll_die(12), Ok(12));
	assert_eq!(ValRoller(0).roll_die(12), Ok(1));
	assert_eq!(IterRoller::new([5]).roll_die(6), Ok(5));
}

#[test]
fn seeded_rollers_are_deterministic() {
	let dice = DiceSet::new(10, [4, 6, 8, 10, 12, 20]);
	let first = FastRandRoller::with_seed(1234).roll(&dice).unwrap();
	let second = FastRandRoller::with_seed(1234).roll(&dice).unwrap();
	assert_eq!(first, second);
}

#[test]
fn dice_set_rolls_with_any_roller() {
	let dice = DiceSet::new(3, [4, 6, 8]);
	let rolled = dice.roll(&mut MaxRoller).unwrap();
	assert_eq!(rolled.total, 18);

	let rolled = dice.roll(&mut ValRoller(2)).unwrap();
	assert_eq!(rolled.total, 6);
}

#[test]
fn independent_rollers_across_threads() {
	let handles: Vec<_> = (0..4_u64)
		.map(|seed| {
			thread::spawn(move || {
				let mut roller = FastRandRoller::with_seed(seed);
				(0..100)
					.map(|_| roller.roll_set(5, &[6, 20]).unwrap())
					.collect::<Vec<_>>()
			})
		})
		.collect();

	for handle in handles {
		for rolled in handle.join().unwrap() {
			assert_eq!(rolled.count, 5);
			assert_eq!(rolled.total, rolled.dice.iter().map(|die| u64::from(die.result)).sum());
		}
	}
}
