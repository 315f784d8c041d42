//! Global cheapest insertion.
//!
//! Every pending stop keeps its best feasible insertion per vehicle. Each step
//! commits the cheapest of them and refreshes only the entries of the vehicle
//! that changed.

#![expect(
    clippy::indexing_slicing,
    reason = "cache slots are sized from the model's stop and vehicle counts"
)]

use std::iter;

use log::debug;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::model::ProblemModel;
use crate::plan::Plan;

/// Multiplicative noise applied to detours so parallel starts diverge.
#[derive(Debug, Clone)]
pub(crate) struct Jitter {
    vehicles: usize,
    factors: Vec<f64>,
}

impl Jitter {
    /// Draw one factor in `[1 - amplitude, 1 + amplitude]` per stop and
    /// vehicle.
    #[expect(
        clippy::float_arithmetic,
        reason = "jitter factors are drawn around one"
    )]
    pub(crate) fn new(model: &ProblemModel, seed: u64, amplitude: f64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let vehicles = model.vehicle_count();
        let spread = amplitude.clamp(0.0, 0.9);
        let factors = (0..model.visits().len() * vehicles)
            .map(|_| rng.gen_range(1.0 - spread..=1.0 + spread))
            .collect();
        Self { vehicles, factors }
    }

    fn factor(&self, slot: usize, vehicle: usize) -> f64 {
        self.factors
            .get(slot * self.vehicles + vehicle)
            .copied()
            .unwrap_or(1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Insertion {
    detour: i64,
    position: usize,
}

/// Build a plan by repeatedly committing the cheapest feasible insertion.
///
/// Ties go to the lowest stop index, then vehicle, then position. Returns the
/// stops that could not be placed, ascending, if any remain.
pub(crate) fn cheapest_insertion(
    model: &ProblemModel,
    jitter: Option<&Jitter>,
) -> Result<Plan, Vec<usize>> {
    let mut plan = Plan::empty(model);
    let visits = model.visits();
    let vehicles = model.vehicle_count();
    let mut pending = vec![true; visits.len()];
    let mut cache: Vec<Option<Insertion>> = Vec::with_capacity(visits.len() * vehicles);
    for &stop in visits {
        for vehicle in 0..vehicles {
            cache.push(best_insertion(model, &plan, vehicle, stop));
        }
    }

    let mut remaining = visits.len();
    while remaining > 0 {
        let mut choice: Option<(f64, usize, usize, Insertion)> = None;
        for (slot, _) in pending.iter().enumerate().filter(|(_, open)| **open) {
            for vehicle in 0..vehicles {
                let Some(insertion) = cache[slot * vehicles + vehicle] else {
                    continue;
                };
                let factor = jitter.map_or(1.0, |j| j.factor(slot, vehicle));
                let key = weighted(insertion.detour, factor);
                if choice.is_none_or(|(best, ..)| key < best) {
                    choice = Some((key, slot, vehicle, insertion));
                }
            }
        }
        let Some((_, slot, vehicle, insertion)) = choice else {
            break;
        };
        let stop = visits[slot];
        plan.insert(model, vehicle, insertion.position, stop);
        pending[slot] = false;
        remaining -= 1;
        debug!(
            "inserted stop {stop} into vehicle {vehicle} at position {} (detour {})",
            insertion.position, insertion.detour
        );
        for (other, open) in pending.iter().enumerate() {
            if *open {
                cache[other * vehicles + vehicle] =
                    best_insertion(model, &plan, vehicle, visits[other]);
            }
        }
    }

    if remaining == 0 {
        return Ok(plan);
    }
    Err(visits
        .iter()
        .zip(&pending)
        .filter(|(_, open)| **open)
        .map(|(&stop, _)| stop)
        .collect())
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "detours are small integers; jitter only reorders close candidates"
)]
/// Jittered sort key for a detour. Only the positive part is scaled, so a
/// factor above one always makes an insertion less attractive.
fn weighted(detour: i64, factor: f64) -> f64 {
    if detour <= 0 {
        detour as f64
    } else {
        detour as f64 * factor
    }
}

/// Cheapest feasible position for `stop` on `vehicle`, lowest position on ties.
fn best_insertion(
    model: &ProblemModel,
    plan: &Plan,
    vehicle: usize,
    stop: usize,
) -> Option<Insertion> {
    let route = plan.route(vehicle);
    let demand = model.node(stop).demand;
    if route.schedule.total_load().saturating_add(demand) > model.vehicle(vehicle).capacity {
        return None;
    }
    let mut best: Option<Insertion> = None;
    for position in 1..route.nodes.len() {
        let prev = route.nodes[position - 1];
        let next = route.nodes[position];
        let detour = i64::from(model.travel(vehicle, prev, stop))
            + i64::from(model.travel(vehicle, stop, next))
            - i64::from(model.travel(vehicle, prev, next));
        if best.is_some_and(|b| detour >= b.detour) {
            continue;
        }
        let tail = iter::once(stop).chain(route.nodes[position..].iter().copied());
        if route.schedule.accepts(model, vehicle, position, tail) {
            best = Some(Insertion { detour, position });
        }
    }
    best
}
