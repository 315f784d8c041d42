//! Guided local search over arc penalties.
//!
//! After each local optimum the arcs with the highest utility
//! `cost / (1 + penalty)` gain one penalty, and the search descends again on
//! `cost + λ · penalty`. The cheapest plan by true cost is kept.

#![expect(
    clippy::indexing_slicing,
    reason = "penalty slots are addressed by validated location indices"
)]

use log::debug;

use crate::local_search::descend;
use crate::model::{ArcCosts, ProblemModel};
use crate::plan::Plan;
use crate::search::{Budget, SearchConfig};

/// Idle penalty rounds tolerated per arc of the plan before the search gives
/// up on escaping the current local optimum.
pub(crate) const STALL_ROUNDS_PER_ARC: usize = 10;

/// Dense per-arc penalty counters.
#[derive(Debug, Clone)]
pub(crate) struct PenaltyMatrix {
    size: usize,
    counts: Vec<u32>,
}

impl PenaltyMatrix {
    pub(crate) fn new(size: usize) -> Self {
        Self {
            size,
            counts: vec![0; size * size],
        }
    }

    pub(crate) fn get(&self, from: usize, to: usize) -> u32 {
        self.counts[from * self.size + to]
    }

    fn bump(&mut self, from: usize, to: usize) {
        let slot = &mut self.counts[from * self.size + to];
        *slot = slot.saturating_add(1);
    }
}

/// Arc costs with penalties folded in.
pub(crate) struct PenalisedCosts<'a> {
    model: &'a ProblemModel,
    penalties: &'a PenaltyMatrix,
    lambda: u64,
}

impl ArcCosts for PenalisedCosts<'_> {
    fn arc_cost(&self, vehicle: usize, from: usize, to: usize) -> u64 {
        let penalty = u64::from(self.penalties.get(from, to));
        self.model
            .arc_cost(vehicle, from, to)
            .saturating_add(self.lambda.saturating_mul(penalty))
    }
}

/// Result of one guided search.
#[derive(Debug, Clone)]
pub(crate) struct GuidedOutcome {
    pub plan: Plan,
    pub cost: u64,
    pub rounds: u32,
}

/// Penalty weight scaled to the average arc cost of the first local optimum.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "λ is a rounded, non-negative ratio of integer costs"
)]
pub(crate) fn penalty_weight(coefficient: f64, cost: u64, arcs: usize) -> u64 {
    if arcs == 0 {
        return 1;
    }
    let weight = (coefficient * cost as f64 / arcs as f64).round();
    if weight.is_finite() && weight > 1.0 {
        weight.min(u64::MAX as f64) as u64
    } else {
        1
    }
}

/// Penalise the arcs of `plan` with maximal utility.
fn penalise(model: &ProblemModel, plan: &Plan, penalties: &mut PenaltyMatrix) -> usize {
    // Utilities are compared as fractions: a/(1+p) > b/(1+q) ⇔ a(1+q) > b(1+p).
    let mut best: Option<(u64, u64)> = None;
    let mut chosen: Vec<(usize, usize)> = Vec::new();
    for (vehicle, from, to) in plan.arcs() {
        let cost = model.arc_cost(vehicle, from, to);
        let denom = u64::from(penalties.get(from, to)) + 1;
        let ordering = best.map(|(c, d)| {
            (u128::from(cost) * u128::from(d)).cmp(&(u128::from(c) * u128::from(denom)))
        });
        match ordering {
            None | Some(std::cmp::Ordering::Greater) => {
                best = Some((cost, denom));
                chosen.clear();
                chosen.push((from, to));
            }
            Some(std::cmp::Ordering::Equal) => chosen.push((from, to)),
            Some(std::cmp::Ordering::Less) => {}
        }
    }
    for &(from, to) in &chosen {
        penalties.bump(from, to);
    }
    chosen.len()
}

/// Descend, then alternate penalising and descending until the budget or
/// round limit runs out, or until penalties stop producing moves.
///
/// A penalised descent that applies no move leaves the plan unchanged. After
/// `STALL_ROUNDS_PER_ARC` such rounds per arc in a row every arc has had its
/// utility pushed below the others many times over, so no improving move is
/// left to find.
pub(crate) fn guided_local_search(
    model: &ProblemModel,
    mut plan: Plan,
    config: &SearchConfig,
    budget: &Budget<'_>,
) -> GuidedOutcome {
    descend(model, model, &mut plan, budget);
    let mut best_cost = plan.cost(model);
    let mut best = plan.clone();
    let arcs = plan.arcs().count();
    if arcs == 0 {
        return GuidedOutcome {
            plan: best,
            cost: best_cost,
            rounds: 0,
        };
    }

    let lambda = penalty_weight(config.lambda_coefficient, best_cost, arcs);
    debug!("first local optimum costs {best_cost}; penalty weight {lambda}");
    let mut penalties = PenaltyMatrix::new(model.size());
    let stall_limit = arcs.saturating_mul(STALL_ROUNDS_PER_ARC);
    let mut idle: usize = 0;
    let mut rounds: u32 = 0;
    while !budget.expired() && config.max_rounds.is_none_or(|max| rounds < max) {
        penalise(model, &plan, &mut penalties);
        let costs = PenalisedCosts {
            model,
            penalties: &penalties,
            lambda,
        };
        let applied = descend(model, &costs, &mut plan, budget);
        rounds = rounds.saturating_add(1);
        if applied == 0 {
            idle += 1;
            if idle >= stall_limit {
                debug!("no move applied for {idle} rounds; stopping after {rounds}");
                break;
            }
            continue;
        }
        idle = 0;
        let cost = plan.cost(model);
        if cost < best_cost {
            debug!("round {rounds} improved the objective to {cost}");
            best_cost = cost;
            best.clone_from(&plan);
        }
    }
    GuidedOutcome {
        plan: best,
        cost: best_cost,
        rounds,
    }
}
