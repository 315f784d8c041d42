//! First-improvement local search over five neighbourhoods.
//!
//! A sweep asks each neighbourhood in turn for one improving move. A move is
//! applied only when every route it touches stays feasible and the summed
//! cost strictly drops. Sweeps repeat until one applies nothing or the budget
//! expires; the budget is checked between sweeps only.

#![expect(
    clippy::indexing_slicing,
    reason = "route costs are indexed by vehicle, sized from the plan"
)]

mod or_opt;
mod relocate;
mod swap;
mod tail_exchange;
mod two_opt;

use log::trace;

use crate::model::{ArcCosts, ProblemModel};
use crate::plan::Plan;
use crate::search::Budget;

/// Neighbourhoods in the order a sweep visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Relocate,
    Swap,
    TwoOpt,
    OrOpt,
    TailExchange,
}

impl Operator {
    const ALL: [Self; 5] = [
        Self::Relocate,
        Self::Swap,
        Self::TwoOpt,
        Self::OrOpt,
        Self::TailExchange,
    ];

    fn improve<C: ArcCosts>(self, ctx: &mut MoveContext<'_, C>) -> bool {
        match self {
            Self::Relocate => relocate::improve(ctx),
            Self::Swap => swap::improve(ctx),
            Self::TwoOpt => two_opt::improve(ctx),
            Self::OrOpt => or_opt::improve(ctx),
            Self::TailExchange => tail_exchange::improve(ctx),
        }
    }
}

/// A rewritten route proposed by a move.
pub(super) struct Candidate<'a> {
    pub vehicle: usize,
    pub nodes: &'a [usize],
    /// First position that differs from the current route.
    pub from: usize,
}

/// Shared state for evaluating and applying moves.
pub(super) struct MoveContext<'a, C> {
    model: &'a ProblemModel,
    costs: &'a C,
    plan: &'a mut Plan,
    route_costs: Vec<u64>,
    /// Reusable candidate buffers.
    first: Vec<usize>,
    second: Vec<usize>,
}

impl<'a, C: ArcCosts> MoveContext<'a, C> {
    fn new(model: &'a ProblemModel, costs: &'a C, plan: &'a mut Plan) -> Self {
        let route_costs = plan
            .routes()
            .iter()
            .enumerate()
            .map(|(v, route)| costs.route_cost(v, &route.nodes))
            .collect();
        Self {
            model,
            costs,
            plan,
            route_costs,
            first: Vec::new(),
            second: Vec::new(),
        }
    }

    pub(super) const fn model(&self) -> &ProblemModel {
        self.model
    }

    pub(super) fn plan(&self) -> &Plan {
        &*self.plan
    }

    fn feasible(&self, candidate: &Candidate<'_>) -> bool {
        if candidate.nodes.len() <= 2 {
            return true;
        }
        let route = self.plan.route(candidate.vehicle);
        let tail = candidate.nodes.iter().skip(candidate.from).copied();
        route
            .schedule
            .accepts(self.model, candidate.vehicle, candidate.from, tail)
    }

    fn commit(&mut self, candidate: &Candidate<'_>, cost: u64) {
        self.plan
            .replace(self.model, candidate.vehicle, candidate.nodes, candidate.from);
        self.route_costs[candidate.vehicle] = cost;
    }

    /// Apply a single-route rewrite if it is cheaper and feasible.
    pub(super) fn try_route(&mut self, candidate: &Candidate<'_>) -> bool {
        let cost = self.costs.route_cost(candidate.vehicle, candidate.nodes);
        if cost >= self.route_costs[candidate.vehicle] || !self.feasible(candidate) {
            return false;
        }
        self.commit(candidate, cost);
        true
    }

    /// Apply a rewrite of two distinct routes if it is cheaper and feasible.
    pub(super) fn try_pair(&mut self, a: &Candidate<'_>, b: &Candidate<'_>) -> bool {
        let cost_a = self.costs.route_cost(a.vehicle, a.nodes);
        let cost_b = self.costs.route_cost(b.vehicle, b.nodes);
        let before = self.route_costs[a.vehicle] + self.route_costs[b.vehicle];
        if cost_a + cost_b >= before || !self.feasible(a) || !self.feasible(b) {
            return false;
        }
        self.commit(a, cost_a);
        self.commit(b, cost_b);
        true
    }
}

/// Descend to a local optimum of `costs`, returning the number of moves
/// applied.
pub(crate) fn descend<C: ArcCosts>(
    model: &ProblemModel,
    costs: &C,
    plan: &mut Plan,
    budget: &Budget<'_>,
) -> usize {
    let mut ctx = MoveContext::new(model, costs, plan);
    let mut applied = 0;
    loop {
        let mut improved = false;
        for operator in Operator::ALL {
            if operator.improve(&mut ctx) {
                trace!("{operator:?} improved the plan");
                applied += 1;
                improved = true;
            }
        }
        if !improved || budget.expired() {
            break;
        }
    }
    applied
}
