//! Zero-coupon discount curve.

use std::fmt;
use std::ops::Deref;

use tasa_core::rates::{Rate, RateConvention};
use tasa_core::types::Date;
use crate::cache::{AnchorState, DiscountCache};
use crate::error::{CurveError, CurveResult};
use crate::interpolation::{CurveInterpolation, Fitted};
use crate::point::ZeroCouponCurvePoint;

/// Values derived from the stored points and the current shift.
#[derive(Debug, Clone)]
struct Anchors {
    convention: RateConvention,
    dates: Vec<Date>,
    rates: Vec<Rate>,
    year_fractions: Vec<f64>,
    discount_factors: Vec<f64>,
    interpolator: Option<AnchorInterpolator>,
    state: AnchorState,
}

/// Fitted interpolation over the anchor year fractions.
#[derive(Debug, Clone)]
enum AnchorInterpolator {
    DiscountFactors(Fitted),
    /// Rates in the curve convention.
    Rates(Fitted),
}

impl Anchors {
    fn build(
        curve_date: Date,
        points: &[ZeroCouponCurvePoint],
        shift_bps: f64,
        interpolation: CurveInterpolation,
    ) -> CurveResult<Self> {
        let first = points
            .first()
            .ok_or_else(|| CurveError::insufficient_points(1, 0))?;
        let convention = first.rate.convention;

        let n = points.len();
        let mut dates = Vec::with_capacity(n);
        let mut rates = Vec::with_capacity(n);
        let mut year_fractions = Vec::with_capacity(n);
        let mut discount_factors = Vec::with_capacity(n);
        let mut state = Vec::with_capacity(n);

        for point in points {
            let rate = if shift_bps == 0.0 {
                point.rate
            } else {
                point.rate.shifted_bps(shift_bps)
            };
            let df = rate.discount_factor(curve_date, point.date);
            if !(df.is_finite() && df > 0.0) {
                return Err(CurveError::invalid_value(format!(
                    "discount factor {df} at {} from rate {rate}",
                    point.date
                )));
            }
            dates.push(point.date);
            rates.push(rate);
            year_fractions.push(convention.year_fraction(curve_date, point.date));
            discount_factors.push(df);
            state.push((point.date, rate.value.to_bits()));
        }

        let interpolator = if n < 2 {
            None
        } else if interpolation.interpolates_rates() {
            let curve_rates = dates
                .iter()
                .zip(&rates)
                .map(|(&date, rate)| -> CurveResult<f64> {
                    if rate.convention == convention {
                        Ok(rate.value)
                    } else {
                        Ok(rate.convert(convention, curve_date, date)?.value)
                    }
                })
                .collect::<CurveResult<Vec<_>>>()?;
            Some(AnchorInterpolator::Rates(Fitted::fit(
                interpolation.rates,
                &year_fractions,
                &curve_rates,
            )?))
        } else {
            Some(AnchorInterpolator::DiscountFactors(Fitted::fit(
                interpolation.discount_factors,
                &year_fractions,
                &discount_factors,
            )?))
        };

        Ok(Self {
            convention,
            dates,
            rates,
            year_fractions,
            discount_factors,
            interpolator,
            state,
        })
    }

    fn first_date(&self) -> Date {
        self.dates[0]
    }

    fn last_date(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }
}

/// A discount curve anchored on dated zero rates.
///
/// Points are kept sorted, unique by date and strictly after the curve date.
/// The curve convention is the first anchor's [`RateConvention`]; it defines
/// the year-fraction axis of the interpolation.
///
/// Discount factors for dates between the first and last anchor follow the
/// curve's [`CurveInterpolation`], log-linear in that year fraction by
/// default. Dates before the first anchor are discounted with the first
/// anchor's rate, dates after the last anchor with the last anchor's rate.
///
/// Parallel bumps are held as a shift on top of the stored rates; the stored
/// points are never rewritten by a bump.
///
/// Reads take `&self` and memoise discount factor batches; every mutating
/// method clears that cache before returning.
///
/// # Example
///
/// ```rust
/// use tasa_core::prelude::*;
/// use tasa_curves::prelude::*;
///
/// let today = Date::from_ymd(2024, 1, 2).unwrap();
/// let one_year = Date::from_ymd(2025, 1, 2).unwrap();
/// let conv = RateConvention::default();
/// let mut curve = ZeroCouponCurve::new(today, vec![ZeroCouponCurvePoint::new(one_year, Rate::new(conv, 0.05))]).unwrap();
///
/// let base = curve.get_df(one_year).unwrap();
/// {
///     let bumped = curve.bump(100.0).unwrap();
///     assert!(bumped.get_df(one_year).unwrap() < base);
/// }
/// assert_eq!(curve.get_df(one_year).unwrap(), base);
/// ```
#[derive(Debug)]
pub struct ZeroCouponCurve {
    curve_date: Date,
    points: Vec<ZeroCouponCurvePoint>,
    shift_bps: f64,
    interpolation: CurveInterpolation,
    anchors: Anchors,
    cache: DiscountCache,
}

impl ZeroCouponCurve {
    /// Builds a curve from dated zero rates with the default interpolation.
    ///
    /// # Errors
    ///
    /// Fails on an empty point list, a point dated on or before `curve_date`,
    /// two points on the same date, a rate whose discount factor is not
    /// positive, or anchor year fractions that do not increase under the
    /// curve convention.
    pub fn new(curve_date: Date, points: Vec<ZeroCouponCurvePoint>) -> CurveResult<Self> {
        Self::with_interpolation(curve_date, points, CurveInterpolation::default())
    }

    /// Builds a curve from dated zero rates with the given interpolation.
    ///
    /// # Errors
    ///
    /// As [`new`](Self::new), plus an invalid interpolation choice or anchor
    /// values the chosen scheme cannot fit (e.g. a Nelson-Siegel fit with
    /// fewer than 3 anchors).
    pub fn with_interpolation(
        curve_date: Date,
        mut points: Vec<ZeroCouponCurvePoint>,
        interpolation: CurveInterpolation,
    ) -> CurveResult<Self> {
        interpolation.validate()?;
        points.sort_by_key(|p| p.date);
        validate_points(curve_date, &points)?;
        let anchors = Anchors::build(curve_date, &points, 0.0, interpolation)?;
        log::debug!(
            "built zero coupon curve at {curve_date} with {} points ({interpolation})",
            points.len()
        );
        Ok(Self {
            curve_date,
            points,
            shift_bps: 0.0,
            interpolation,
            anchors,
            cache: DiscountCache::default(),
        })
    }

    /// Builds a curve from `(date, discount factor)` pairs.
    ///
    /// Each discount factor is converted to the zero rate under `convention`
    /// from `curve_date` to its date.
    pub fn from_discount_factors(
        curve_date: Date,
        discount_factors: &[(Date, f64)],
        convention: RateConvention,
    ) -> CurveResult<Self> {
        Self::new(curve_date, points_from_discount_factors(curve_date, discount_factors, convention)?)
    }

    /// Valuation date of the curve.
    #[must_use]
    pub fn curve_date(&self) -> Date {
        self.curve_date
    }

    /// Stored anchor points, without any active shift.
    #[must_use]
    pub fn points(&self) -> &[ZeroCouponCurvePoint] {
        &self.points
    }

    /// Anchor points with the active shift applied.
    #[must_use]
    pub fn shifted_points(&self) -> Vec<ZeroCouponCurvePoint> {
        self.anchors
            .dates
            .iter()
            .zip(&self.anchors.rates)
            .map(|(&date, &rate)| ZeroCouponCurvePoint::new(date, rate))
            .collect()
    }

    /// Accumulated parallel shift in basis points.
    #[must_use]
    pub fn shift_bps(&self) -> f64 {
        self.shift_bps
    }

    /// Interpolation choice of the curve.
    #[must_use]
    pub fn interpolation(&self) -> CurveInterpolation {
        self.interpolation
    }

    /// Convention of the first anchor, used for the interpolation axis.
    #[must_use]
    pub fn convention(&self) -> RateConvention {
        self.anchors.convention
    }

    /// Anchor dates in ascending order.
    #[must_use]
    pub fn dates(&self) -> &[Date] {
        &self.anchors.dates
    }

    /// Anchor year fractions under the curve convention.
    #[must_use]
    pub fn year_fractions(&self) -> &[f64] {
        &self.anchors.year_fractions
    }

    /// Anchor discount factors with the active shift applied.
    #[must_use]
    pub fn discount_factors(&self) -> &[f64] {
        &self.anchors.discount_factors
    }

    /// Number of memoised discount factor batches.
    #[must_use]
    pub fn cached_batches(&self) -> usize {
        self.cache.len()
    }

    // ---- Discount and wealth factors ----

    /// Discount factor from `date` back to the curve date.
    pub fn get_df(&self, date: Date) -> CurveResult<f64> {
        Ok(self.get_dfs(&[date])?[0])
    }

    /// Discount factors for `dates`, in the given order.
    ///
    /// Results are memoised per ordered batch of dates.
    pub fn get_dfs(&self, dates: &[Date]) -> CurveResult<Vec<f64>> {
        let values = self
            .cache
            .get_or_try_insert(&self.anchors.state, dates, || self.compute_dfs(dates))?;
        Ok(values.to_vec())
    }

    /// Wealth factor from the curve date to `date`.
    pub fn get_wf(&self, date: Date) -> CurveResult<f64> {
        Ok(1.0 / self.get_df(date)?)
    }

    /// Wealth factors from the curve date to each of `dates`.
    pub fn get_wfs(&self, dates: &[Date]) -> CurveResult<Vec<f64>> {
        Ok(self.get_dfs(dates)?.into_iter().map(|df| 1.0 / df).collect())
    }

    /// Forward discount factor from `end` back to `start`.
    pub fn get_df_fwd(&self, start: Date, end: Date) -> CurveResult<f64> {
        let dfs = self.get_dfs(&[start, end])?;
        Ok(dfs[1] / dfs[0])
    }

    /// Forward discount factors for paired start and end dates.
    pub fn get_dfs_fwds(&self, starts: &[Date], ends: &[Date]) -> CurveResult<Vec<f64>> {
        check_lengths(starts, ends)?;
        let start_dfs = self.get_dfs(starts)?;
        let end_dfs = self.get_dfs(ends)?;
        Ok(end_dfs.iter().zip(&start_dfs).map(|(e, s)| e / s).collect())
    }

    /// Forward wealth factor from `start` to `end`.
    pub fn get_wf_fwd(&self, start: Date, end: Date) -> CurveResult<f64> {
        Ok(1.0 / self.get_df_fwd(start, end)?)
    }

    /// Forward wealth factors for paired start and end dates.
    pub fn get_wfs_fwds(&self, starts: &[Date], ends: &[Date]) -> CurveResult<Vec<f64>> {
        Ok(self
            .get_dfs_fwds(starts, ends)?
            .into_iter()
            .map(|df| 1.0 / df)
            .collect())
    }

    // ---- Rates ----

    /// Forward rates under `convention` for paired start and end dates.
    pub fn get_forward_rates(
        &self,
        starts: &[Date],
        ends: &[Date],
        convention: RateConvention,
    ) -> CurveResult<Vec<Rate>> {
        let wfs = self.get_wfs_fwds(starts, ends)?;
        starts
            .iter()
            .zip(ends)
            .zip(wfs)
            .map(|((&start, &end), wf)| Rate::from_wealth_factor(wf, convention, start, end).map_err(CurveError::from))
            .collect()
    }

    /// Values of [`get_forward_rates`](Self::get_forward_rates).
    pub fn get_forward_rates_values(
        &self,
        starts: &[Date],
        ends: &[Date],
        convention: RateConvention,
    ) -> CurveResult<Vec<f64>> {
        Ok(self
            .get_forward_rates(starts, ends, convention)?
            .into_iter()
            .map(|r| r.value)
            .collect())
    }

    /// Zero rate under `convention` from the curve date to `date`.
    ///
    /// # Errors
    ///
    /// Fails when `convention` gives a zero year fraction for the period,
    /// e.g. at the curve date itself.
    pub fn get_zero_rate(&self, date: Date, convention: RateConvention) -> CurveResult<Rate> {
        let df = self.get_df(date)?;
        Ok(Rate::from_discount_factor(df, convention, self.curve_date, date)?)
    }

    /// Anchor zero rates with the active shift applied, converted to
    /// `convention` when one is given.
    pub fn get_zero_rates(&self, convention: Option<RateConvention>) -> CurveResult<Vec<Rate>> {
        self.anchors
            .dates
            .iter()
            .zip(&self.anchors.rates)
            .map(|(&date, &rate)| match convention {
                Some(conv) if conv != rate.convention => {
                    rate.convert(conv, self.curve_date, date).map_err(CurveError::from)
                }
                _ => Ok(rate),
            })
            .collect()
    }

    /// Values of [`get_zero_rates`](Self::get_zero_rates).
    pub fn get_zero_rates_values(&self, convention: Option<RateConvention>) -> CurveResult<Vec<f64>> {
        Ok(self
            .get_zero_rates(convention)?
            .into_iter()
            .map(|r| r.value)
            .collect())
    }

    // ---- Mutation ----

    /// Shifts every anchor rate by `bps` basis points.
    ///
    /// Shifts accumulate; applying `-bps` afterwards returns to the previous
    /// shift. On error the curve is left unchanged.
    pub fn parallel_bump_rates_bps(&mut self, bps: f64) -> CurveResult<()> {
        let shift = self.shift_bps + bps;
        let anchors = Anchors::build(self.curve_date, &self.points, shift, self.interpolation)?;
        self.shift_bps = shift;
        self.install(anchors);
        log::debug!("bumped curve at {} by {bps}bp (total {shift}bp)", self.curve_date);
        Ok(())
    }

    /// Applies a parallel bump that is undone when the guard is dropped.
    ///
    /// The guard dereferences to the bumped curve. Dropping it restores the
    /// previous shift and anchor values exactly.
    pub fn bump(&mut self, bps: f64) -> CurveResult<BumpGuard<'_>> {
        let previous_shift = self.shift_bps;
        let previous = self.anchors.clone();
        self.parallel_bump_rates_bps(bps)?;
        Ok(BumpGuard {
            curve: self,
            previous_shift,
            previous: Some(previous),
        })
    }

    /// Inserts an anchor point, replacing any point on the same date.
    ///
    /// The point's rate is stored unshifted; an active parallel shift applies
    /// to it as to every other point. On error the curve is left unchanged.
    pub fn add_point(&mut self, point: ZeroCouponCurvePoint) -> CurveResult<()> {
        if point.date <= self.curve_date {
            return Err(CurveError::PointNotAfterCurveDate {
                date: point.date,
                curve_date: self.curve_date,
            });
        }
        let mut points: Vec<_> = self.points.iter().filter(|p| p.date != point.date).copied().collect();
        points.push(point);
        points.sort_by_key(|p| p.date);
        self.replace_points(points)?;
        log::debug!("added curve point {point}");
        Ok(())
    }

    /// Removes and returns the anchor point at `date`.
    ///
    /// # Errors
    ///
    /// Fails when no point is dated `date` or it is the only point.
    pub fn delete_point(&mut self, date: Date) -> CurveResult<ZeroCouponCurvePoint> {
        let index = self
            .points
            .iter()
            .position(|p| p.date == date)
            .ok_or(CurveError::PointNotFound { date })?;
        if self.points.len() == 1 {
            return Err(CurveError::LastPoint { date });
        }
        let mut points = self.points.clone();
        let removed = points.remove(index);
        self.replace_points(points)?;
        log::debug!("deleted curve point {removed}");
        Ok(removed)
    }

    /// Curve seen from `forward_date`.
    ///
    /// Anchors after `forward_date` are kept with their forward discount
    /// factors from `forward_date`, converted to zero rates under the curve
    /// convention. The active shift is baked into the new curve; the
    /// interpolation choice carries over.
    pub fn forward_curve(&self, forward_date: Date) -> CurveResult<ZeroCouponCurve> {
        if forward_date <= self.curve_date {
            return Err(CurveError::InvalidForwardDate {
                forward_date,
                curve_date: self.curve_date,
            });
        }
        let dates: Vec<Date> = self
            .anchors
            .dates
            .iter()
            .copied()
            .filter(|&d| d > forward_date)
            .collect();
        if dates.is_empty() {
            return Err(CurveError::insufficient_points(1, 0));
        }
        let starts = vec![forward_date; dates.len()];
        let fwd_dfs = self.get_dfs_fwds(&starts, &dates)?;
        let pairs: Vec<(Date, f64)> = dates.into_iter().zip(fwd_dfs).collect();
        let points = points_from_discount_factors(forward_date, &pairs, self.convention())?;
        Self::with_interpolation(forward_date, points, self.interpolation)
    }

    fn replace_points(&mut self, points: Vec<ZeroCouponCurvePoint>) -> CurveResult<()> {
        validate_points(self.curve_date, &points)?;
        let anchors = Anchors::build(self.curve_date, &points, self.shift_bps, self.interpolation)?;
        self.points = points;
        self.install(anchors);
        Ok(())
    }

    fn install(&mut self, anchors: Anchors) {
        self.anchors = anchors;
        self.cache.clear();
    }

    fn compute_dfs(&self, dates: &[Date]) -> CurveResult<Vec<f64>> {
        let anchors = &self.anchors;
        let (first, last) = (anchors.first_date(), anchors.last_date());
        let first_rate = anchors.rates[0];
        let last_rate = anchors.rates[anchors.rates.len() - 1];

        let mut dfs = vec![0.0; dates.len()];
        let mut inside = Vec::new();
        let mut inside_yfs = Vec::new();
        for (i, &date) in dates.iter().enumerate() {
            if date < first {
                dfs[i] = first_rate.discount_factor(self.curve_date, date);
            } else if date > last {
                dfs[i] = last_rate.discount_factor(self.curve_date, date);
            } else {
                inside.push(i);
                inside_yfs.push(anchors.convention.year_fraction(self.curve_date, date));
            }
        }

        if !inside.is_empty() {
            match &anchors.interpolator {
                Some(AnchorInterpolator::DiscountFactors(fitted)) => {
                    let values = fitted.interpolate_many(&inside_yfs)?;
                    for (i, df) in inside.into_iter().zip(values) {
                        dfs[i] = df;
                    }
                }
                Some(AnchorInterpolator::Rates(fitted)) => {
                    let values = fitted.interpolate_many(&inside_yfs)?;
                    for (i, value) in inside.into_iter().zip(values) {
                        dfs[i] = Rate::new(anchors.convention, value).discount_factor(self.curve_date, dates[i]);
                    }
                }
                // A single anchor: the only date inside the range is the anchor itself
                None => {
                    for i in inside {
                        dfs[i] = anchors.discount_factors[0];
                    }
                }
            }
        }
        Ok(dfs)
    }
}

impl Clone for ZeroCouponCurve {
    /// Copies the points, shift and derived values; the cache starts empty.
    fn clone(&self) -> Self {
        Self {
            curve_date: self.curve_date,
            points: self.points.clone(),
            shift_bps: self.shift_bps,
            interpolation: self.interpolation,
            anchors: self.anchors.clone(),
            cache: DiscountCache::default(),
        }
    }
}

impl fmt::Display for ZeroCouponCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ZeroCouponCurve({}, {} points, {}",
            self.curve_date,
            self.points.len(),
            self.anchors.convention
        )?;
        if self.shift_bps != 0.0 {
            write!(f, ", {:+}bp", self.shift_bps)?;
        }
        write!(f, ")")
    }
}

/// A temporarily bumped curve, created by [`ZeroCouponCurve::bump`].
///
/// Dropping the guard restores the curve to its state before the bump.
#[derive(Debug)]
pub struct BumpGuard<'a> {
    curve: &'a mut ZeroCouponCurve,
    previous_shift: f64,
    previous: Option<Anchors>,
}

impl Deref for BumpGuard<'_> {
    type Target = ZeroCouponCurve;

    fn deref(&self) -> &ZeroCouponCurve {
        self.curve
    }
}

impl Drop for BumpGuard<'_> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.curve.shift_bps = self.previous_shift;
            self.curve.install(previous);
            log::debug!(
                "restored curve at {} to {}bp",
                self.curve.curve_date,
                self.previous_shift
            );
        }
    }
}

fn validate_points(curve_date: Date, points: &[ZeroCouponCurvePoint]) -> CurveResult<()> {
    if points.is_empty() {
        return Err(CurveError::insufficient_points(1, 0));
    }
    for point in points {
        if point.date <= curve_date {
            return Err(CurveError::PointNotAfterCurveDate {
                date: point.date,
                curve_date,
            });
        }
        if !point.rate.value.is_finite() {
            return Err(CurveError::invalid_value(format!("rate {} at {}", point.rate.value, point.date)));
        }
    }
    if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
        return Err(CurveError::DuplicatePoint { date: pair[1].date });
    }
    Ok(())
}

fn points_from_discount_factors(
    curve_date: Date,
    discount_factors: &[(Date, f64)],
    convention: RateConvention,
) -> CurveResult<Vec<ZeroCouponCurvePoint>> {
    discount_factors
        .iter()
        .map(|&(date, df)| {
            if date <= curve_date {
                return Err(CurveError::PointNotAfterCurveDate { date, curve_date });
            }
            if !(df.is_finite() && df > 0.0) {
                return Err(CurveError::invalid_value(format!("discount factor {df} at {date}")));
            }
            let rate = Rate::from_discount_factor(df, convention, curve_date, date)?;
            Ok(ZeroCouponCurvePoint::new(date, rate))
        })
        .collect()
}

fn check_lengths(starts: &[Date], ends: &[Date]) -> CurveResult<()> {
    if starts.len() == ends.len() {
        Ok(())
    } else {
        Err(CurveError::length_mismatch(starts.len(), ends.len()))
    }
}
