//! Working routes for every vehicle during a search.

#![expect(
    clippy::indexing_slicing,
    reason = "vehicle indices come from the model that sized the plan"
)]

use crate::model::{ArcCosts, ProblemModel};
use crate::schedule::Schedule;

/// One vehicle's node sequence and its dimension state.
///
/// `nodes` always starts at the start anchor and ends at the end anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RoutePlan {
    pub nodes: Vec<usize>,
    pub schedule: Schedule,
}

impl RoutePlan {
    fn empty(model: &ProblemModel, vehicle: usize) -> Self {
        let data = model.vehicle(vehicle);
        let nodes = vec![data.start, data.end];
        let schedule = Schedule::build(model, vehicle, &nodes);
        Self { nodes, schedule }
    }

    /// Whether the route visits any stop.
    pub(crate) fn has_stops(&self) -> bool {
        self.nodes.len() > 2
    }

    /// Location indices of the stops, in order.
    #[cfg(test)]
    pub(crate) fn stops(&self) -> &[usize] {
        let end = self.nodes.len().saturating_sub(1).max(1);
        &self.nodes[1..end]
    }
}

/// Routes for the whole fleet, indexed by vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Plan {
    routes: Vec<RoutePlan>,
}

impl Plan {
    /// Every vehicle driving straight from start to end.
    pub(crate) fn empty(model: &ProblemModel) -> Self {
        Self {
            routes: (0..model.vehicle_count())
                .map(|v| RoutePlan::empty(model, v))
                .collect(),
        }
    }

    pub(crate) fn routes(&self) -> &[RoutePlan] {
        &self.routes
    }

    pub(crate) fn route(&self, vehicle: usize) -> &RoutePlan {
        &self.routes[vehicle]
    }

    /// Insert `node` before position `position` of `vehicle`'s route.
    pub(crate) fn insert(
        &mut self,
        model: &ProblemModel,
        vehicle: usize,
        position: usize,
        node: usize,
    ) {
        let route = &mut self.routes[vehicle];
        route.nodes.insert(position, node);
        route
            .schedule
            .recompute_from(model, vehicle, &route.nodes, position);
    }

    /// Replace `vehicle`'s nodes; positions before `from` are unchanged.
    pub(crate) fn replace(
        &mut self,
        model: &ProblemModel,
        vehicle: usize,
        nodes: &[usize],
        from: usize,
    ) {
        let route = &mut self.routes[vehicle];
        route.nodes.clear();
        route.nodes.extend_from_slice(nodes);
        route
            .schedule
            .recompute_from(model, vehicle, &route.nodes, from);
    }

    /// Objective under `costs`; routes without stops cost nothing.
    pub(crate) fn cost<C: ArcCosts>(&self, costs: &C) -> u64 {
        self.routes
            .iter()
            .enumerate()
            .map(|(v, route)| costs.route_cost(v, &route.nodes))
            .sum()
    }

    /// Arcs driven by routes that visit at least one stop.
    pub(crate) fn arcs(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        self.routes
            .iter()
            .enumerate()
            .filter(|(_, route)| route.has_stops())
            .flat_map(|(v, route)| {
                route
                    .nodes
                    .iter()
                    .zip(route.nodes.iter().skip(1))
                    .map(move |(&from, &to)| (v, from, to))
            })
    }

    /// Whether every route that visits a stop is feasible.
    pub(crate) fn is_feasible(&self) -> bool {
        self.routes
            .iter()
            .filter(|route| route.has_stops())
            .all(|route| route.schedule.is_feasible())
    }
}
