//! Benchmark support utilities for the native solver.
//!
//! Provides deterministic delivery generation with clustered distributions and
//! distance-based travel matrices for reproducible benchmarks.

use fleetplan_core::{DAY_MINUTES, SolveRequest, Stop, TimeWindow, TravelMatrices, Vehicle};
use fleetplan_solver::SearchConfig;
use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic random number generation in benchmarks.
pub const BENCHMARK_SEED: u64 = 42;

/// Depot location, in the middle of the delivery area (kilometres).
pub const BENCHMARK_DEPOT: Coord<f64> = Coord { x: 10.0, y: 10.0 };

/// Stops served per vehicle when sizing the fleet.
pub const STOPS_PER_VEHICLE: usize = 5;

/// Penalty rounds per benchmark solve.
pub const BENCHMARK_ROUNDS: u32 = 20;

/// Number of cluster centres for stop distribution.
const CLUSTER_COUNT: usize = 5;

/// Standard deviation for stop distribution around cluster centres (km).
const CLUSTER_SPREAD: f64 = 0.8;

/// Side of the square the cluster centres fall in (km).
const AREA_SIZE: f64 = 20.0;

/// Drive time per kilometre at reference speed.
const MINUTES_PER_KM: f64 = 1.5;

/// Every `WINDOW_EVERY`th stop gets a delivery window.
const WINDOW_EVERY: usize = 3;

/// Generate a clustered set of delivery stops for benchmarks.
///
/// Creates `count` stops spread across several clusters, each with a
/// Gaussian-like distribution around the cluster centre. Demand ranges over
/// one to three units, service over three to eight minutes, and every third
/// stop carries a window of at least five hours.
///
/// # Examples
///
/// ```ignore
/// let stops = generate_clustered_stops(50, 42);
/// assert_eq!(stops.len(), 50);
/// ```
#[must_use]
pub fn generate_clustered_stops(count: usize, seed: u64) -> Vec<Stop> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let cluster_centres: Vec<Coord<f64>> = (0..CLUSTER_COUNT)
        .map(|_| Coord {
            x: rng.gen_range(0.0..AREA_SIZE),
            y: rng.gen_range(0.0..AREA_SIZE),
        })
        .collect();

    (0..count)
        .map(|i| {
            #[expect(
                clippy::integer_division_remainder_used,
                reason = "Modulo for cyclic assignment is intentional"
            )]
            let cluster_idx = i % CLUSTER_COUNT;
            let centre = cluster_centres
                .get(cluster_idx)
                .copied()
                .unwrap_or(BENCHMARK_DEPOT);
            let (dx, dy) = box_muller(&mut rng, CLUSTER_SPREAD);

            #[expect(clippy::float_arithmetic, reason = "Required for coordinate offset")]
            let location = Coord {
                x: centre.x + dx,
                y: centre.y + dy,
            };

            let stop = Stop::new(format!("Stop {}", i + 1), location)
                .with_demand(rng.gen_range(1..=3))
                .with_service_minutes(rng.gen_range(3..=8));

            #[expect(
                clippy::integer_division_remainder_used,
                reason = "Modulo for cyclic window assignment is intentional"
            )]
            let windowed = i % WINDOW_EVERY == 0;
            if windowed {
                let open = rng.gen_range(0..180);
                let width = rng.gen_range(300..600);
                stop.with_time_window(TimeWindow {
                    open,
                    close: (open + width).min(DAY_MINUTES),
                })
            } else {
                stop
            }
        })
        .collect()
}

/// Depot stop at [`BENCHMARK_DEPOT`].
#[must_use]
pub fn create_depot() -> Stop {
    Stop::new("Depot", BENCHMARK_DEPOT)
}

/// Generate distance-based travel matrices for benchmarks.
///
/// Distances are Euclidean, read as kilometres and reported in metres.
/// Durations scale distance by a fixed pace with up to ten percent noise and
/// never drop below one minute off the diagonal.
#[must_use]
pub fn generate_travel_matrices(stops: &[Stop], seed: u64) -> TravelMatrices {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let n = stops.len();
    let mut durations = vec![vec![0_u32; n]; n];
    let mut distances = vec![vec![0.0_f64; n]; n];

    for (i, from) in stops.iter().enumerate() {
        for (j, to) in stops.iter().enumerate() {
            if i == j {
                continue;
            }

            #[expect(clippy::float_arithmetic, reason = "Required for distance calculation")]
            let km = (to.location.x - from.location.x).hypot(to.location.y - from.location.y);

            let noise_factor: f64 = rng.gen_range(0.9..1.1);

            #[expect(
                clippy::float_arithmetic,
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "Travel times are bounded and positive"
            )]
            let minutes = (km * MINUTES_PER_KM * noise_factor).round().max(1.0) as u32;

            #[expect(clippy::float_arithmetic, reason = "Required for unit conversion")]
            let metres = km * 1000.0;

            set_matrix_cell(&mut durations, i, j, minutes);
            set_matrix_cell(&mut distances, i, j, metres);
        }
    }

    TravelMatrices::new(durations, distances)
}

/// Build a benchmark request of `count` stops plus the depot.
///
/// The fleet holds one vehicle per [`STOPS_PER_VEHICLE`] stops, each able to
/// carry its share of the total demand plus a few spare units.
#[must_use]
pub fn build_benchmark_request(count: usize, seed: u64) -> (SolveRequest, TravelMatrices) {
    let mut stops = vec![create_depot()];
    stops.extend(generate_clustered_stops(count, seed));
    let matrices = generate_travel_matrices(&stops, seed);

    let total: u32 = stops.iter().map(|stop| stop.demand).sum();
    let fleet_size = u32::try_from(count.div_ceil(STOPS_PER_VEHICLE).max(1)).unwrap_or(u32::MAX);
    let capacity = total.div_ceil(fleet_size).saturating_add(3);
    let vehicles = (1..=fleet_size)
        .map(|n| Vehicle::new(format!("Van {n}"), capacity, 0))
        .collect();

    (SolveRequest::new(stops, vehicles), matrices)
}

/// Search settings for benchmarks: one start bounded by penalty rounds.
#[must_use]
pub fn benchmark_config() -> SearchConfig {
    SearchConfig {
        max_rounds: Some(BENCHMARK_ROUNDS),
        seed: BENCHMARK_SEED,
        ..SearchConfig::default()
    }
}

/// Set a cell in a square matrix, avoiding excessive nesting.
fn set_matrix_cell<T>(matrix: &mut [Vec<T>], i: usize, j: usize, value: T) {
    if let Some(row) = matrix.get_mut(i)
        && let Some(cell) = row.get_mut(j)
    {
        *cell = value;
    }
}

/// Box-Muller transform to generate Gaussian-distributed values.
///
/// Returns a pair of independent standard normal variates scaled by `std_dev`.
fn box_muller<R: Rng>(rng: &mut R, std_dev: f64) -> (f64, f64) {
    let u1: f64 = rng.gen_range(0.0001..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);

    #[expect(clippy::float_arithmetic, reason = "Required for Box-Muller transform")]
    let r = (-2.0 * u1.ln()).sqrt();

    #[expect(clippy::float_arithmetic, reason = "Required for Box-Muller transform")]
    let theta = 2.0 * std::f64::consts::PI * u2;

    #[expect(clippy::float_arithmetic, reason = "Required for Box-Muller transform")]
    let z0 = r * theta.cos() * std_dev;

    #[expect(clippy::float_arithmetic, reason = "Required for Box-Muller transform")]
    let z1 = r * theta.sin() * std_dev;

    (z0, z1)
}
