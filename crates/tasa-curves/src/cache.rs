//! Memoised discount factor batches.

use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tasa_core::types::Date;

/// Anchor dates and effective rate values (as bits) the cached entries were
/// computed from.
pub(crate) type AnchorState = Vec<(Date, u64)>;

/// Batches held before the oldest is evicted.
pub(crate) const DEFAULT_CAPACITY: usize = 512;

/// Discount factors keyed by the anchors and the ordered query dates.
///
/// Entries are only valid for the anchor state they were filled under; a
/// lookup under a different state drops everything first. Mutating curve
/// methods also call [`clear`](Self::clear) directly.
///
/// At most `capacity` batches are held; inserting into a full cache evicts
/// the oldest batch.
#[derive(Debug)]
pub(crate) struct DiscountCache {
    inner: Mutex<CacheInner>,
    capacity: usize,
}

impl Default for DiscountCache {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

#[derive(Debug, Default)]
struct CacheInner {
    anchors: AnchorState,
    entries: HashMap<Vec<Date>, Arc<[f64]>>,
    /// Keys in insertion order.
    order: VecDeque<Vec<Date>>,
}

impl CacheInner {
    fn reset(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

impl DiscountCache {
    /// Creates a cache holding at most `capacity` batches (at least one).
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::default(),
            capacity: capacity.max(1),
        }
    }

    /// Returns the cached batch for `dates`, computing it with `compute` on a miss.
    ///
    /// Errors from `compute` are not cached.
    pub(crate) fn get_or_try_insert<E>(
        &self,
        anchors: &[(Date, u64)],
        dates: &[Date],
        compute: impl FnOnce() -> Result<Vec<f64>, E>,
    ) -> Result<Arc<[f64]>, E> {
        {
            let mut inner = self.inner.lock();
            if inner.anchors.as_slice() != anchors {
                inner.reset();
                inner.anchors = anchors.to_vec();
            }
            if let Some(hit) = inner.entries.get(dates) {
                log::trace!("discount cache hit for {} dates", dates.len());
                return Ok(Arc::clone(hit));
            }
        }

        log::trace!("discount cache miss for {} dates", dates.len());
        let values: Arc<[f64]> = compute()?.into();
        let mut inner = self.inner.lock();
        if inner.anchors.as_slice() != anchors {
            return Ok(values);
        }
        if inner.entries.insert(dates.to_vec(), Arc::clone(&values)).is_none() {
            inner.order.push_back(dates.to_vec());
            while inner.order.len() > self.capacity {
                if let Some(oldest) = inner.order.pop_front() {
                    inner.entries.remove(&oldest);
                    log::trace!("discount cache evicted a batch of {} dates", oldest.len());
                }
            }
        }
        Ok(values)
    }

    /// Drops every entry.
    pub(crate) fn clear(&self) {
        let mut inner = self.inner.lock();
        inner.reset();
        inner.anchors.clear();
    }

    /// Number of cached batches.
    pub(crate) fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_hit_and_miss() {
        let cache = DiscountCache::default();
        let anchors = vec![(d(2025, 1, 1), 0.05f64.to_bits())];
        let dates = [d(2024, 6, 1), d(2024, 7, 1)];
        let mut calls = 0;

        for _ in 0..3 {
            let values = cache
                .get_or_try_insert::<()>(&anchors, &dates, || {
                    calls += 1;
                    Ok(vec![0.99, 0.98])
                })
                .unwrap();
            assert_eq!(&*values, &[0.99, 0.98]);
        }
        assert_eq!(calls, 1);
        assert_eq!(cache.len(), 1);

        // Order is part of the key
        let reversed = [dates[1], dates[0]];
        cache
            .get_or_try_insert::<()>(&anchors, &reversed, || Ok(vec![0.98, 0.99]))
            .unwrap();
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_anchor_change_invalidates() {
        let cache = DiscountCache::default();
        let dates = [d(2024, 6, 1)];
        let before = vec![(d(2025, 1, 1), 0.05f64.to_bits())];
        let after = vec![(d(2025, 1, 1), 0.06f64.to_bits())];

        cache.get_or_try_insert::<()>(&before, &dates, || Ok(vec![0.99])).unwrap();
        let values = cache.get_or_try_insert::<()>(&after, &dates, || Ok(vec![0.98])).unwrap();
        assert_eq!(&*values, &[0.98]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let cache = DiscountCache::with_capacity(2);
        let anchors = vec![(d(2025, 1, 1), 0.05f64.to_bits())];
        let batches = [[d(2024, 2, 1)], [d(2024, 3, 1)], [d(2024, 4, 1)]];
        for batch in &batches {
            cache.get_or_try_insert::<()>(&anchors, batch, || Ok(vec![0.99])).unwrap();
        }
        assert_eq!(cache.len(), 2);

        let mut recomputed = false;
        cache
            .get_or_try_insert::<()>(&anchors, &batches[0], || {
                recomputed = true;
                Ok(vec![0.99])
            })
            .unwrap();
        assert!(recomputed);
        assert_eq!(cache.len(), 2);

        // The newest batch survived both evictions
        cache
            .get_or_try_insert::<()>(&anchors, &batches[2], || panic!("should be cached"))
            .unwrap();
    }

    #[test]
    fn test_default_capacity_bounds_growth() {
        let cache = DiscountCache::default();
        let anchors = vec![(d(2030, 1, 1), 0.05f64.to_bits())];
        let start = d(2024, 1, 1);
        for i in 0..(DEFAULT_CAPACITY + 50) {
            let date = start.add_days(i64::try_from(i).unwrap());
            cache.get_or_try_insert::<()>(&anchors, &[date], || Ok(vec![0.9])).unwrap();
        }
        assert_eq!(cache.len(), DEFAULT_CAPACITY);
    }

    #[test]
    fn test_errors_are_not_cached() {
        let cache = DiscountCache::default();
        let anchors = Vec::new();
        let dates = [d(2024, 6, 1)];
        assert!(cache.get_or_try_insert(&anchors, &dates, || Err("boom")).is_err());
        assert_eq!(cache.len(), 0);
        cache.clear();
        assert_eq!(cache.len(), 0);
    }
}
