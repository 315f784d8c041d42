//! Small requests with known answers, shared by solver tests.

use geo::Coord;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::{SolveRequest, Stop, TimeWindow, TravelMatrices, Vehicle};

/// Minutes between neighbouring stops of [`line_request`].
pub const LINE_STEP_MINUTES: u32 = 10;

/// Depot plus `stops` stops on a line, each ten minutes and one kilometer
/// further out.
///
/// Every stop has demand 1 and five minutes of service; each of the
/// `vehicles` vans (named `Van 1`, `Van 2`, …) can carry every stop.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "distances are whole kilometers expressed in meters"
)]
pub fn line_request(stops: usize, vehicles: usize) -> (SolveRequest, TravelMatrices) {
    let locations: Vec<Stop> = (0..=stops)
        .map(|i| {
            let stop = Stop::new(format!("Stop {i}"), Coord { x: 0.0, y: 0.0 });
            if i == 0 {
                stop
            } else {
                stop.with_demand(1).with_service_minutes(5)
            }
        })
        .collect();
    let capacity = u32::try_from(stops.max(1)).unwrap_or(u32::MAX);
    let fleet = (1..=vehicles.max(1))
        .map(|n| Vehicle::new(format!("Van {n}"), capacity, 0))
        .collect();
    let n = locations.len();
    let steps = |i: usize, j: usize| u32::try_from(i.abs_diff(j)).unwrap_or(u32::MAX);
    let durations = (0..n)
        .map(|i| {
            (0..n)
                .map(|j| steps(i, j).saturating_mul(LINE_STEP_MINUTES))
                .collect()
        })
        .collect();
    let distances = (0..n)
        .map(|i| (0..n).map(|j| f64::from(steps(i, j)) * 1_000.0).collect())
        .collect();
    (
        SolveRequest::new(locations, fleet),
        TravelMatrices::new(durations, distances),
    )
}

/// Depot plus `stops` stops scattered over a 10 km square.
///
/// Demands are drawn from 1 to 3 and each vehicle carries a little more than
/// an even share, so every stop always fits somewhere. Drive minutes are
/// two per kilometer, rounded.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "positions and distances are generated in floating point"
)]
pub fn scattered_request(
    stops: usize,
    vehicles: usize,
    seed: u64,
) -> (SolveRequest, TravelMatrices) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut locations = vec![Stop::new("Depot", Coord { x: 5.0, y: 5.0 })];
    for i in 1..=stops {
        let location = Coord {
            x: rng.gen_range(0.0..10.0),
            y: rng.gen_range(0.0..10.0),
        };
        locations.push(
            Stop::new(format!("Stop {i}"), location)
                .with_demand(rng.gen_range(1..=3))
                .with_service_minutes(5),
        );
    }
    let total: u32 = locations.iter().map(|stop| stop.demand).sum();
    let fleet_size = u32::try_from(vehicles.max(1)).unwrap_or(u32::MAX);
    let capacity = total.div_ceil(fleet_size).saturating_add(3);
    let fleet = (1..=fleet_size)
        .map(|n| Vehicle::new(format!("Van {n}"), capacity, 0))
        .collect();
    let matrices = euclidean_matrices(&locations);
    (SolveRequest::new(locations, fleet), matrices)
}

/// Matrices from planar distances between stop locations, read as
/// kilometers, at two minutes per kilometer.
#[must_use]
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "synthetic distances are small, finite and non-negative"
)]
pub fn euclidean_matrices(stops: &[Stop]) -> TravelMatrices {
    let km = |a: &Stop, b: &Stop| {
        let dx = a.location.x - b.location.x;
        let dy = a.location.y - b.location.y;
        dx.hypot(dy)
    };
    let durations = stops
        .iter()
        .map(|a| stops.iter().map(|b| (km(a, b) * 2.0).round() as u32).collect())
        .collect();
    let distances = stops
        .iter()
        .map(|a| stops.iter().map(|b| (km(a, b) * 1_000.0).round()).collect())
        .collect();
    TravelMatrices::new(durations, distances)
}

/// Depot and two unit-demand stops for one van of capacity 3.
#[must_use]
pub fn two_stop_request() -> (SolveRequest, TravelMatrices) {
    let stops = vec![
        Stop::new("Depot", Coord { x: 0.0, y: 0.0 }),
        Stop::new("Baker Street", Coord { x: 0.01, y: 0.0 }).with_demand(1),
        Stop::new("Mill Lane", Coord { x: 0.0, y: 0.01 }).with_demand(1),
    ];
    let matrices = TravelMatrices::new(
        vec![vec![0, 10, 12], vec![10, 0, 8], vec![12, 8, 0]],
        vec![
            vec![0.0, 2_500.0, 3_000.0],
            vec![2_500.0, 0.0, 2_000.0],
            vec![3_000.0, 2_000.0, 0.0],
        ],
    );
    (
        SolveRequest::new(stops, vec![Vehicle::new("Van 1", 3, 0)]),
        matrices,
    )
}

/// Three stops demanding ten units in total for one van of capacity 5.
#[must_use]
pub fn overloaded_request() -> (SolveRequest, TravelMatrices) {
    let (_, matrices) = line_request(3, 1);
    let stops = vec![
        Stop::new("Depot", Coord { x: 0.0, y: 0.0 }),
        Stop::new("North", Coord { x: 0.0, y: 0.01 }).with_demand(3),
        Stop::new("East", Coord { x: 0.01, y: 0.0 }).with_demand(3),
        Stop::new("South", Coord { x: 0.0, y: -0.01 }).with_demand(4),
    ];
    (
        SolveRequest::new(stops, vec![Vehicle::new("Van 1", 5, 0)]),
        matrices,
    )
}

/// A stop open from minute 60 to 90 that is 200 minutes from the depot.
#[must_use]
pub fn unreachable_window_request() -> (SolveRequest, TravelMatrices) {
    let window = TimeWindow { open: 60, close: 90 };
    let stops = vec![
        Stop::new("Depot", Coord { x: 0.0, y: 0.0 }),
        Stop::new("Far Farm", Coord { x: 1.0, y: 0.0 })
            .with_demand(1)
            .with_time_window(window),
    ];
    let matrices = TravelMatrices::new(
        vec![vec![0, 200], vec![200, 0]],
        vec![vec![0.0, 150_000.0], vec![150_000.0, 0.0]],
    );
    (
        SolveRequest::new(stops, vec![Vehicle::new("Van 1", 5, 0)]),
        matrices,
    )
}

/// A twenty-minute round trip for a van limited to five minutes.
#[must_use]
pub fn short_shift_request() -> (SolveRequest, TravelMatrices) {
    let stops = vec![
        Stop::new("Depot", Coord { x: 0.0, y: 0.0 }),
        Stop::new("Corner Shop", Coord { x: 0.02, y: 0.0 }).with_demand(1),
    ];
    let matrices = TravelMatrices::new(
        vec![vec![0, 10], vec![10, 0]],
        vec![vec![0.0, 4_000.0], vec![4_000.0, 0.0]],
    );
    let van = Vehicle::new("Van 1", 5, 0).with_max_route_minutes(5);
    (SolveRequest::new(stops, vec![van]), matrices)
}
