//! Property tests for the check-in transition.

use chrono::{Duration, NaiveDate};
use orbit_core::{check_in, penalty, Frequency, Habit, Mode, NewHabit, PenaltyPolicy};
use proptest::prelude::*;

fn frequency() -> impl Strategy<Value = Frequency> {
    prop::sample::select(Frequency::ALL.to_vec())
}

fn mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Flexible), Just(Mode::Strict)]
}

fn origin() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

proptest! {
    /// Day offsets between consecutive check-ins; 0 means "same day again".
    #[test]
    fn points_never_negative_and_streak_grows_by_one(
        freq in frequency(),
        mode in mode(),
        gaps in prop::collection::vec(0i64..90, 1..40),
    ) {
        let policy = PenaltyPolicy::default();
        let mut habit = Habit::new(NewHabit::new("H", "C").frequency(freq).mode(mode)).unwrap();
        let mut today = origin();

        for gap in gaps {
            today += Duration::days(gap);
            let before = habit.clone();
            let outcome = check_in(&mut habit, today, &policy);

            if outcome.is_recorded() {
                prop_assert_eq!(habit.streak, before.streak + 1);
                prop_assert_eq!(habit.history.len(), before.history.len() + 1);
                prop_assert!(habit.points <= before.points + policy.points_per_check_in);
                prop_assert!(habit.points >= policy.points_per_check_in);
            } else {
                prop_assert_eq!(&habit, &before);
            }
            prop_assert_eq!(habit.last_completed, Some(today));
            prop_assert!(habit.validate().is_ok());
        }
    }

    #[test]
    fn check_in_is_idempotent_per_day(
        freq in frequency(),
        mode in mode(),
        streak_days in 0u32..20,
        offset in 0i64..60,
    ) {
        let policy = PenaltyPolicy::default();
        let mut habit = Habit::new(NewHabit::new("H", "C").frequency(freq).mode(mode)).unwrap();
        for d in 0..streak_days {
            check_in(&mut habit, origin() + Duration::days(d as i64), &policy);
        }
        let day = origin() + Duration::days(streak_days as i64 + offset);

        let mut once = habit.clone();
        check_in(&mut once, day, &policy);
        let mut twice = once.clone();
        check_in(&mut twice, day, &policy);

        prop_assert_eq!(once, twice);
    }

    #[test]
    fn penalty_matches_formula(streak in 0u32..10_000, missed in 0u32..400, strict in any::<bool>()) {
        let (mode, multiplier) = if strict { (Mode::Strict, 1.5) } else { (Mode::Flexible, 0.5) };
        let expected = (streak as f64 * multiplier * missed as f64).floor() as u32;
        prop_assert_eq!(penalty(streak, mode, missed), expected);
    }
}
