//! Property tests for day counts and rate conventions.

use approx::assert_relative_eq;
use proptest::prelude::*;

use tasa_core::daycounts::DayCountConvention;
use tasa_core::rates::{InterestConvention, Rate, RateConvention};
use tasa_core::types::Date;

fn date_strategy() -> impl Strategy<Value = Date> {
    (1990i32..2060, 1u32..=12, 1u32..=31)
        .prop_filter_map("valid date", |(y, m, d)| Date::from_ymd(y, m, d).ok())
}

fn ordered_pair() -> impl Strategy<Value = (Date, Date)> {
    (date_strategy(), 1i64..20_000).prop_map(|(start, days)| (start, start.add_days(days)))
}

fn interest_strategy() -> impl Strategy<Value = InterestConvention> {
    prop_oneof![
        Just(InterestConvention::Linear),
        Just(InterestConvention::Compounded),
        Just(InterestConvention::Exponential),
    ]
}

fn day_count_strategy() -> impl Strategy<Value = DayCountConvention> {
    prop_oneof![
        Just(DayCountConvention::Actual),
        Just(DayCountConvention::Thirty360A),
        Just(DayCountConvention::Thirty360U),
        Just(DayCountConvention::Thirty360E),
        Just(DayCountConvention::Thirty360EIsda),
    ]
}

fn convention_strategy() -> impl Strategy<Value = RateConvention> {
    (
        interest_strategy(),
        day_count_strategy(),
        prop_oneof![Just(360u32), Just(365u32)],
    )
        .prop_map(|(i, dc, base)| RateConvention::new(i, dc, base))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn actual_day_count_is_additive(
        start in date_strategy(),
        first in 0i64..5_000,
        second in 0i64..5_000,
    ) {
        let middle = start.add_days(first);
        let end = middle.add_days(second);
        let dc = DayCountConvention::Actual;
        prop_assert_eq!(dc.day_count(start, middle) + dc.day_count(middle, end), dc.day_count(start, end));
    }

    #[test]
    fn thirty_360_counts_are_antisymmetric_for_e(
        (start, end) in ordered_pair(),
    ) {
        let dc = DayCountConvention::Thirty360E;
        prop_assert_eq!(dc.day_count(start, end), -dc.day_count(end, start));
    }

    #[test]
    fn batch_matches_scalar(
        pairs in prop::collection::vec(ordered_pair(), 1..20),
        dc in day_count_strategy(),
    ) {
        let (starts, ends): (Vec<Date>, Vec<Date>) = pairs.into_iter().unzip();
        let batch = dc.day_counts(&starts, &ends).unwrap();
        for i in 0..starts.len() {
            prop_assert_eq!(batch[i], dc.day_count(starts[i], ends[i]));
        }
    }

    #[test]
    fn conversion_preserves_wealth_factor(
        (start, end) in ordered_pair(),
        from in convention_strategy(),
        to in convention_strategy(),
        value in -0.02f64..0.25,
    ) {
        let rate = Rate::new(from, value);
        // A 30/360 count can be zero for distinct dates (e.g. the 30th to the 31st)
        prop_assume!(to.year_fraction(start, end) != 0.0);
        prop_assume!(rate.wealth_factor(start, end) > 0.0);

        let converted = rate.convert(to, start, end).unwrap();
        assert_relative_eq!(
            converted.wealth_factor(start, end),
            rate.wealth_factor(start, end),
            max_relative = 1e-10
        );
    }

    #[test]
    fn discount_factor_is_reciprocal(
        (start, end) in ordered_pair(),
        conv in convention_strategy(),
        value in 0.0f64..0.2,
    ) {
        let rate = Rate::new(conv, value);
        assert_relative_eq!(
            rate.discount_factor(start, end) * rate.wealth_factor(start, end),
            1.0,
            epsilon = 1e-12
        );
    }
}
