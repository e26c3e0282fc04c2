//! Property tests for bond valuation.

use approx::assert_relative_eq;
use proptest::prelude::*;

use tasa_bonds::prelude::*;
use tasa_core::prelude::*;
use tasa_curves::{ZeroCouponCurve, ZeroCouponCurvePoint};

fn d(y: i32, m: u32, day: u32) -> Date {
    Date::from_ymd(y, m, day).unwrap()
}

/// Quarterly amortizing bond with `periods` coupons and a flat coupon rate.
fn quarterly(periods: u32, coupon_rate: f64, face: f64) -> Bond {
    let amortization = face / f64::from(periods);
    let mut residual = face;
    let mut coupons = Vec::new();
    for i in 0..periods {
        let start = d(2024, 1, 10).add_months(3 * i32::try_from(i).unwrap()).unwrap();
        let end = start.add_months(3).unwrap();
        let amort = if i + 1 == periods { residual } else { amortization };
        coupons.push(Coupon::new(amort, residual * coupon_rate / 4.0, residual, start, end).unwrap());
        residual -= amort;
    }
    Bond::new(1_000_000.0, Currency::CLP, coupons).unwrap()
}

fn flat_curve(curve_date: Date, value: f64) -> ZeroCouponCurve {
    let conv = RateConvention::compounded_act_365();
    let points = (1..=4)
        .map(|years| ZeroCouponCurvePoint::new(curve_date.add_years(years).unwrap(), Rate::new(conv, value)))
        .collect();
    ZeroCouponCurve::new(curve_date, points).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn irr_inverts_present_value(
        periods in 5u32..12,
        coupon_rate in 0.0f64..0.12,
        yield_value in -0.01f64..0.15,
        offset in 0i64..300,
    ) {
        let bond = quarterly(periods, coupon_rate, 100.0);
        let asof = d(2024, 1, 10).add_days(offset);
        let conv = RateConvention::compounded_act_365();
        let pv = bond.present_value(asof, &Rate::new(conv, yield_value));

        let irr = bond.irr_from_present_value(asof, pv, conv, None).unwrap();
        prop_assert!((irr.value - yield_value).abs() < 1e-8);
    }

    #[test]
    fn normalization_is_face_independent(
        periods in 5u32..12,
        coupon_rate in 0.0f64..0.12,
        face in 1.0f64..1.0e6,
        yield_value in 0.0f64..0.15,
    ) {
        let unit = quarterly(periods, coupon_rate, 100.0);
        let scaled = quarterly(periods, coupon_rate, face);
        let asof = d(2024, 5, 1);
        let irr = Rate::new(RateConvention::compounded_act_365(), yield_value);
        assert_relative_eq!(
            unit.present_value(asof, &irr),
            scaled.present_value(asof, &irr),
            max_relative = 1e-10
        );
    }

    #[test]
    fn z_spread_recovers_shift(
        periods in 5u32..12,
        coupon_rate in 0.01f64..0.12,
        base in 0.01f64..0.08,
        spread_bps in -150.0f64..300.0,
    ) {
        let bond = quarterly(periods, coupon_rate, 100.0);
        let asof = d(2024, 2, 20);
        let mut curve = flat_curve(asof, base);
        let before = curve.discount_factors().to_vec();

        let irr = Rate::new(RateConvention::compounded_act_365(), base).shifted_bps(spread_bps);
        let bps = bond.z_spread(asof, &irr, &mut curve).unwrap();

        // A flat compounded curve shifted in parallel is the flat yield
        prop_assert!((bps - spread_bps).abs() < 1e-5, "{} vs {}", bps, spread_bps);
        prop_assert_eq!(curve.discount_factors(), before.as_slice());
        prop_assert_eq!(curve.shift_bps(), 0.0);
    }

    #[test]
    fn residual_violations_are_rejected(
        periods in 2u32..8,
        error in 0.01f64..10.0,
        victim in 0usize..8,
    ) {
        let good = quarterly(periods, 0.05, 100.0);
        let mut coupons = good.coupons().to_vec();
        let victim = victim % coupons.len();
        let c = coupons[victim];
        coupons[victim] = Coupon::new(c.amortization(), c.interest(), c.residual() + error, c.start(), c.end()).unwrap();

        let result = Bond::new(1_000.0, Currency::CLP, coupons);
        prop_assert!(
            matches!(
                result,
                Err(BondError::ResidualMismatch { .. })
            ),
            "{:?}",
            result
        );
    }
}
