//! Memoised solving for repeated identical requests.
//!
//! Requests are keyed by a canonical form of their stops and vehicles:
//! coordinates are rounded to 1e-6 degrees and speed factors to 1e-3. Any
//! difference in the key triggers a fresh solve. Matrices are not part of the
//! key, so a [`CachingSolver`] assumes its inner solver always sees the same
//! travel data for the same stops.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use fleetplan_core::{Error, SolveOutcome, SolveRequest, Solver, Stop, Vehicle};
use log::{debug, warn};

/// Default number of outcomes a [`SolveCache`] retains.
pub const DEFAULT_CACHE_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct StopKey {
    name: String,
    longitude: i64,
    latitude: i64,
    demand: u32,
    service_minutes: u32,
    window: Option<(u32, u32)>,
}

impl From<&Stop> for StopKey {
    fn from(stop: &Stop) -> Self {
        Self {
            name: stop.name.clone(),
            longitude: quantise(stop.location.x, 1e6),
            latitude: quantise(stop.location.y, 1e6),
            demand: stop.demand,
            service_minutes: stop.service_minutes,
            window: stop.time_window.map(|w| (w.open, w.close)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct VehicleKey {
    name: String,
    capacity: u32,
    start: usize,
    end: usize,
    max_route_minutes: u32,
    speed_factor: i64,
}

impl From<&Vehicle> for VehicleKey {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            name: vehicle.name.clone(),
            capacity: vehicle.capacity,
            start: vehicle.start,
            end: vehicle.end_index(),
            max_route_minutes: vehicle.route_limit(),
            speed_factor: quantise(vehicle.speed_factor, 1e3),
        }
    }
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    reason = "keys only need a stable integer for each rounded value"
)]
fn quantise(value: f64, scale: f64) -> i64 {
    (value * scale).round() as i64
}

/// Canonical identity of a request.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use fleetplan_core::{SolveRequest, Stop, Vehicle};
/// use fleetplan_solver::CacheKey;
///
/// let stops = |x| vec![
///     Stop::new("Depot", Coord { x: 0.0, y: 0.0 }),
///     Stop::new("Mill", Coord { x, y: 51.5 }).with_demand(1),
/// ];
/// let van = vec![Vehicle::new("Van", 2, 0)];
/// let a = CacheKey::from(&SolveRequest::new(stops(-0.127_000_01), van.clone()));
/// let b = CacheKey::from(&SolveRequest::new(stops(-0.127), van));
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    stops: Vec<StopKey>,
    vehicles: Vec<VehicleKey>,
}

impl From<&SolveRequest> for CacheKey {
    fn from(request: &SolveRequest) -> Self {
        Self {
            stops: request.stops.iter().map(StopKey::from).collect(),
            vehicles: request.vehicles.iter().map(VehicleKey::from).collect(),
        }
    }
}

/// Bounded memo table of solve outcomes; the oldest entry is evicted first.
#[derive(Debug, Clone)]
pub struct SolveCache {
    capacity: usize,
    entries: HashMap<CacheKey, SolveOutcome>,
    order: VecDeque<CacheKey>,
}

impl Default for SolveCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl SolveCache {
    /// Cache holding at most `capacity` outcomes. Zero disables caching.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Outcome stored for `key`, if any.
    #[must_use]
    pub fn get(&self, key: &CacheKey) -> Option<&SolveOutcome> {
        self.entries.get(key)
    }

    /// Store `outcome`, evicting the oldest entry when full.
    pub fn insert(&mut self, key: CacheKey, outcome: SolveOutcome) {
        if self.capacity == 0 {
            return;
        }
        if self.entries.contains_key(&key) {
            self.entries.insert(key, outcome);
            return;
        }
        while self.entries.len() >= self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, outcome);
    }

    /// Number of stored outcomes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every stored outcome.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Wraps a [`Solver`] and answers repeated requests from a [`SolveCache`].
///
/// Errors are never cached; both solved and infeasible outcomes are.
#[derive(Debug)]
pub struct CachingSolver<S> {
    inner: S,
    cache: Mutex<SolveCache>,
}

impl<S: Solver> CachingSolver<S> {
    /// Wrap `inner` with a cache of the default capacity.
    pub fn new(inner: S) -> Self {
        Self::with_cache(inner, SolveCache::default())
    }

    /// Wrap `inner` with an explicit cache.
    pub const fn with_cache(inner: S, cache: SolveCache) -> Self {
        Self {
            inner,
            cache: Mutex::new(cache),
        }
    }

    /// The wrapped solver.
    #[must_use]
    pub const fn inner(&self) -> &S {
        &self.inner
    }

    /// Number of cached outcomes, or zero if the cache is unusable.
    #[must_use]
    pub fn cached(&self) -> usize {
        self.cache.lock().map_or(0, |cache| cache.len())
    }
}

impl<S: Solver> Solver for CachingSolver<S> {
    fn solve(&self, request: &SolveRequest) -> Result<SolveOutcome, Error> {
        let key = CacheKey::from(request);
        match self.cache.lock() {
            Ok(cache) => {
                if let Some(hit) = cache.get(&key) {
                    debug!("serving {} stops from the solve cache", request.stops.len());
                    return Ok(hit.clone());
                }
            }
            Err(_) => warn!("solve cache lock poisoned; solving without it"),
        }

        let outcome = self.inner.solve(request)?;
        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, outcome.clone());
        }
        Ok(outcome)
    }
}
