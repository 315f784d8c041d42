//! Immutable per-solve arrays derived from a request and its matrices.

#![expect(
    clippy::indexing_slicing,
    reason = "node and vehicle indices are validated when the model is built"
)]

use fleetplan_core::{ConfigurationError, DAY_MINUTES, SolveRequest, TravelMatrices};

/// Cost of driving an arc, as seen by the search.
///
/// The problem model answers with the true objective; the guided search wraps
/// it in a penalised view. Empty routes cost nothing.
pub(crate) trait ArcCosts {
    /// Cost for `vehicle` to drive from `from` to `to`.
    fn arc_cost(&self, vehicle: usize, from: usize, to: usize) -> u64;

    /// Cost of a whole route, anchors included.
    fn route_cost(&self, vehicle: usize, nodes: &[usize]) -> u64 {
        if nodes.len() <= 2 {
            return 0;
        }
        nodes
            .iter()
            .zip(nodes.iter().skip(1))
            .map(|(&from, &to)| self.arc_cost(vehicle, from, to))
            .sum()
    }
}

/// Per-location constraint data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NodeData {
    pub demand: u32,
    pub service: u32,
    pub open: u32,
    pub close: u32,
}

/// Per-vehicle constraint data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct VehicleData {
    pub capacity: u32,
    pub start: usize,
    pub end: usize,
    pub max_duration: u32,
    /// Index of the scaled travel matrix this vehicle drives on.
    pub speed_class: usize,
}

/// Everything the search reads, built once per solve.
#[derive(Debug, Clone)]
pub(crate) struct ProblemModel {
    size: usize,
    nodes: Vec<NodeData>,
    vehicles: Vec<VehicleData>,
    /// One flat `size × size` matrix per distinct speed factor.
    travel: Vec<Vec<u32>>,
    distances: Vec<f64>,
    visits: Vec<usize>,
}

impl ProblemModel {
    /// Validate `request` against `matrices` and derive the solver arrays.
    pub(crate) fn build(
        request: &SolveRequest,
        matrices: &TravelMatrices,
    ) -> Result<Self, ConfigurationError> {
        request.validate()?;
        let size = request.stops.len();
        matrices.validate(size)?;

        let nodes = request
            .stops
            .iter()
            .map(|stop| {
                let window = stop.window();
                NodeData {
                    demand: stop.demand,
                    service: stop.service_minutes,
                    open: window.open.min(DAY_MINUTES),
                    close: window.close.min(DAY_MINUTES),
                }
            })
            .collect();

        let base: Vec<u32> = matrices.durations_min.iter().flatten().copied().collect();
        let mut factors: Vec<u64> = Vec::new();
        let mut travel: Vec<Vec<u32>> = Vec::new();
        let mut vehicles = Vec::with_capacity(request.vehicles.len());
        for vehicle in &request.vehicles {
            let bits = vehicle.speed_factor.to_bits();
            let speed_class = if let Some(class) = factors.iter().position(|&f| f == bits) {
                class
            } else {
                factors.push(bits);
                travel.push(scaled(&base, vehicle.speed_factor));
                travel.len() - 1
            };
            vehicles.push(VehicleData {
                capacity: vehicle.capacity,
                start: vehicle.start,
                end: vehicle.end_index(),
                max_duration: vehicle.route_limit(),
                speed_class,
            });
        }

        let mut is_anchor = vec![false; size];
        for vehicle in &vehicles {
            is_anchor[vehicle.start] = true;
            is_anchor[vehicle.end] = true;
        }
        let visits = (1..size).filter(|&i| !is_anchor[i]).collect();

        Ok(Self {
            size,
            nodes,
            vehicles,
            travel,
            distances: matrices.distances_m.iter().flatten().copied().collect(),
            visits,
        })
    }

    /// Number of locations.
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    /// Number of vehicles.
    pub(crate) fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    pub(crate) fn node(&self, index: usize) -> &NodeData {
        &self.nodes[index]
    }

    pub(crate) fn vehicle(&self, index: usize) -> &VehicleData {
        &self.vehicles[index]
    }

    /// Locations that must be visited, ascending.
    pub(crate) fn visits(&self) -> &[usize] {
        &self.visits
    }

    /// Scaled drive minutes for `vehicle`.
    pub(crate) fn travel(&self, vehicle: usize, from: usize, to: usize) -> u32 {
        let class = self.vehicles[vehicle].speed_class;
        self.travel[class][from * self.size + to]
    }

    /// Road distance in meters.
    pub(crate) fn distance(&self, from: usize, to: usize) -> f64 {
        self.distances[from * self.size + to]
    }

    /// Elapsed minutes from starting service at `from` to arriving at `to`.
    pub(crate) fn transit(&self, vehicle: usize, from: usize, to: usize) -> u32 {
        self.travel(vehicle, from, to)
            .saturating_add(self.nodes[from].service)
    }

    /// Demand summed over the locations that must be visited.
    pub(crate) fn visit_demand(&self) -> u64 {
        self.visits
            .iter()
            .map(|&i| u64::from(self.nodes[i].demand))
            .sum()
    }

    /// Capacity summed over the fleet.
    pub(crate) fn fleet_capacity(&self) -> u64 {
        self.vehicles.iter().map(|v| u64::from(v.capacity)).sum()
    }

    /// Number of distinct scaled travel matrices.
    #[cfg(test)]
    pub(crate) fn speed_classes(&self) -> usize {
        self.travel.len()
    }
}

impl ArcCosts for ProblemModel {
    fn arc_cost(&self, vehicle: usize, from: usize, to: usize) -> u64 {
        u64::from(self.transit(vehicle, from, to))
    }
}

fn scaled(base: &[u32], factor: f64) -> Vec<u32> {
    #[expect(clippy::float_cmp, reason = "an exact unit factor leaves minutes untouched")]
    let unit = factor == 1.0;
    if unit {
        return base.to_vec();
    }
    base.iter().map(|&minutes| scale_minutes(minutes, factor)).collect()
}

#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "speed factors are finite and positive; the product is rounded and clamped to u32"
)]
fn scale_minutes(minutes: u32, factor: f64) -> u32 {
    let scaled = (f64::from(minutes) * factor).round();
    scaled.clamp(0.0, f64::from(u32::MAX)) as u32
}
