//! Compute-once store of station forecasts.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use aqi_map_forecast_models::StationForecastResult;

/// Forecasts keyed by station id.
///
/// The compute closure runs while the lock is held, so a key is computed at
/// most once per cache lifetime even when the cache is shared between
/// threads. Failed computations are not stored.
#[derive(Debug, Default)]
pub struct ForecastCache {
    entries: Mutex<BTreeMap<String, Arc<StationForecastResult>>>,
}

impl ForecastCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached forecast for `station_id`, computing and storing it
    /// first if absent.
    ///
    /// # Errors
    ///
    /// * Whatever `compute` returns; nothing is cached in that case
    pub fn get_or_compute<E>(
        &self,
        station_id: &str,
        compute: impl FnOnce() -> Result<StationForecastResult, E>,
    ) -> Result<Arc<StationForecastResult>, E> {
        let mut entries = self.lock();

        if let Some(hit) = entries.get(station_id) {
            log::trace!("Forecast cache hit for {station_id}");
            return Ok(Arc::clone(hit));
        }

        let result = Arc::new(compute()?);
        entries.insert(station_id.to_string(), Arc::clone(&result));
        log::debug!("Cached forecast for {station_id} ({} entries)", entries.len());

        Ok(result)
    }

    /// Whether a forecast for `station_id` is stored.
    #[must_use]
    pub fn has(&self, station_id: &str) -> bool {
        self.lock().contains_key(station_id)
    }

    /// The stored forecast, without computing.
    #[must_use]
    pub fn peek(&self, station_id: &str) -> Option<Arc<StationForecastResult>> {
        self.lock().get(station_id).cloned()
    }

    /// Drops every stored forecast.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Number of stored forecasts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // Entries are only inserted after a successful compute, so a poisoned
    // map is still consistent.
    fn lock(&self) -> MutexGuard<'_, BTreeMap<String, Arc<StationForecastResult>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, convert::Infallible, thread};

    use aqi_map_station::historical::HISTORICAL_YEARS;
    use aqi_map_station_models::{Station, StationCoefficients};

    use super::*;
    use crate::generator::project;

    fn sample(id: &str) -> StationForecastResult {
        let station = Station {
            id: id.to_string(),
            name: id.to_string(),
            lat: 28.6,
            lng: 77.2,
        };
        project(&station, &StationCoefficients::default(), HISTORICAL_YEARS, 7)
    }

    #[test]
    fn computes_once_per_key() {
        let cache = ForecastCache::new();
        let calls = Cell::new(0);

        for _ in 0..3 {
            let result = cache
                .get_or_compute("a", || {
                    calls.set(calls.get() + 1);
                    Ok::<_, Infallible>(sample("a"))
                })
                .unwrap();
            assert_eq!(result.station_id, "a");
        }

        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn returns_the_same_allocation() {
        let cache = ForecastCache::new();
        let first = cache
            .get_or_compute("a", || Ok::<_, Infallible>(sample("a")))
            .unwrap();
        let second = cache
            .get_or_compute("a", || Ok::<_, Infallible>(sample("other")))
            .unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn has_and_peek_do_not_compute() {
        let cache = ForecastCache::new();
        assert!(!cache.has("a"));
        assert!(cache.peek("a").is_none());
        assert!(cache.is_empty());

        cache
            .get_or_compute("a", || Ok::<_, Infallible>(sample("a")))
            .unwrap();

        assert!(cache.has("a"));
        assert_eq!(cache.peek("a").unwrap().station_id, "a");
        assert!(!cache.has("b"));
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = ForecastCache::new();

        let err = cache.get_or_compute("a", || Err("boom")).unwrap_err();
        assert_eq!(err, "boom");
        assert!(!cache.has("a"));

        let ok = cache.get_or_compute("a", || Ok::<_, &str>(sample("a")));
        assert!(ok.is_ok());
        assert!(cache.has("a"));
    }

    #[test]
    fn clear_forces_recompute_with_equal_value() {
        let cache = ForecastCache::new();
        let before = cache
            .get_or_compute("a", || Ok::<_, Infallible>(sample("a")))
            .unwrap();

        cache.clear();
        assert!(cache.is_empty());

        let calls = Cell::new(0);
        let after = cache
            .get_or_compute("a", || {
                calls.set(calls.get() + 1);
                Ok::<_, Infallible>(sample("a"))
            })
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert!(!Arc::ptr_eq(&before, &after));
        assert_eq!(*before, *after);
    }

    #[test]
    fn shared_across_threads() {
        let cache = Arc::new(ForecastCache::new());
        let computed = Arc::new(Mutex::new(0_usize));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                let computed = Arc::clone(&computed);
                thread::spawn(move || {
                    cache
                        .get_or_compute("a", || {
                            *computed.lock().unwrap() += 1;
                            Ok::<_, Infallible>(sample("a"))
                        })
                        .unwrap()
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(*computed.lock().unwrap(), 1);
        assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    }
}
