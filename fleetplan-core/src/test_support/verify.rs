//! Solver-independent check of a solution against its inputs.

use std::collections::HashSet;

use crate::{DAY_MINUTES, Solution, SolveRequest, Stop, TravelMatrices};

/// Check every routing invariant of `solution` against the raw inputs.
///
/// The check is written independently of the solver: it recomputes scaled
/// drive times, loads and costs from `request` and `matrices`.
///
/// # Errors
///
/// Returns a description of the first violated invariant.
pub fn verify_solution(
    request: &SolveRequest,
    matrices: &TravelMatrices,
    solution: &Solution,
) -> Result<(), String> {
    let mut anchors = HashSet::from([0]);
    for vehicle in &request.vehicles {
        anchors.insert(vehicle.start);
        anchors.insert(vehicle.end_index());
    }
    let mut seen = HashSet::new();
    let mut objective = 0_u64;

    for route in &solution.routes {
        let vehicle = request
            .vehicles
            .get(route.vehicle)
            .ok_or_else(|| format!("unknown vehicle {}", route.vehicle))?;
        let (first, last) = match (route.visits.first(), route.visits.last()) {
            (Some(first), Some(last)) if route.visits.len() > 2 => (first, last),
            _ => return Err(format!("vehicle {} has an empty route", route.vehicle)),
        };
        if first.location != vehicle.start || last.location != vehicle.end_index() {
            return Err(format!("vehicle {} does not start and end at its anchors", route.vehicle));
        }

        let mut load = 0_u32;
        let mut cost = 0_u64;
        for (previous, next) in route.visits.iter().zip(route.visits.iter().skip(1)) {
            let stop = request
                .stops
                .get(previous.location)
                .ok_or_else(|| format!("unknown location {}", previous.location))?;
            load = load.saturating_add(stop.demand);
            if load > vehicle.capacity {
                return Err(format!("vehicle {} exceeds its capacity", route.vehicle));
            }
            let base = matrices
                .duration(previous.location, next.location)
                .ok_or_else(|| format!("no duration for {} → {}", previous.location, next.location))?;
            let drive = scaled_minutes(base, vehicle.speed_factor);
            let ready = previous
                .arrival_minute
                .saturating_add(stop.service_minutes)
                .saturating_add(drive);
            if next.arrival_minute < ready {
                return Err(format!("location {} is reached too early", next.location));
            }
            cost = cost.saturating_add(u64::from(drive.saturating_add(stop.service_minutes)));
        }
        for visit in &route.visits {
            let window = request
                .stops
                .get(visit.location)
                .map(Stop::window)
                .ok_or_else(|| format!("unknown location {}", visit.location))?;
            if visit.arrival_minute < window.open || visit.arrival_minute > window.close.min(DAY_MINUTES) {
                return Err(format!("location {} is served outside its window", visit.location));
            }
        }
        if route.duration_minutes() > vehicle.route_limit() {
            return Err(format!("vehicle {} exceeds its duration limit", route.vehicle));
        }
        if cost != route.cost {
            return Err(format!("vehicle {} reports cost {} but drives {cost}", route.vehicle, route.cost));
        }
        objective = objective.saturating_add(cost);

        for stop in route.stops() {
            if anchors.contains(&stop) {
                return Err(format!("anchor {stop} is visited as a stop"));
            }
            if !seen.insert(stop) {
                return Err(format!("stop {stop} is visited twice"));
            }
        }
    }

    let expected = request.stops.len().saturating_sub(
        (0..request.stops.len()).filter(|i| anchors.contains(i)).count(),
    );
    if seen.len() != expected {
        return Err(format!("{} of {expected} stops are served", seen.len()));
    }
    if objective != solution.objective {
        return Err(format!("objective {} differs from route costs {objective}", solution.objective));
    }
    Ok(())
}

#[expect(
    clippy::float_arithmetic,
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "speed factors are finite and positive"
)]
fn scaled_minutes(minutes: u32, factor: f64) -> u32 {
    if factor == 1.0 {
        return minutes;
    }
    (f64::from(minutes) * factor).round().clamp(0.0, f64::from(u32::MAX)) as u32
}
