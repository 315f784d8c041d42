//! Request files as written by hand or exported from other tools.
//!
//! A request file carries the stops, an optional fleet and the two travel
//! matrices. Most stop and vehicle fields may be omitted; decoding fills them
//! in so the engine itself never guesses.

use fleetplan_core::{SolveRequest, Stop, TimeWindow, TravelMatrices, Vehicle};
use geo::Coord;
use serde::{Deserialize, Serialize};

/// Demand of a delivery stop that does not state one.
pub(crate) const DEFAULT_DEMAND: u32 = 1;
/// Service minutes of a delivery stop that does not state them.
pub(crate) const DEFAULT_SERVICE_MINUTES: u32 = 5;

/// One stop as it appears in a request file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct StopRecord {
    #[serde(default)]
    pub(crate) name: Option<String>,
    pub(crate) location: Coord<f64>,
    #[serde(default)]
    pub(crate) demand: Option<u32>,
    #[serde(default)]
    pub(crate) service_minutes: Option<u32>,
    #[serde(default)]
    pub(crate) time_window: Option<TimeWindow>,
}

/// One vehicle as it appears in a request file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub(crate) struct VehicleRecord {
    #[serde(default)]
    pub(crate) name: Option<String>,
    #[serde(default)]
    pub(crate) capacity: Option<u32>,
    #[serde(default)]
    pub(crate) start: usize,
    #[serde(default)]
    pub(crate) end: Option<usize>,
    #[serde(default)]
    pub(crate) max_route_minutes: Option<u32>,
    #[serde(default)]
    pub(crate) speed_factor: Option<f64>,
}

/// Contents of a request file.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub(crate) struct RequestFile {
    pub(crate) stops: Vec<StopRecord>,
    #[serde(default)]
    pub(crate) vehicles: Option<Vec<VehicleRecord>>,
    pub(crate) durations_min: Vec<Vec<u32>>,
    pub(crate) distances_m: Vec<Vec<f64>>,
}

impl RequestFile {
    /// Resolve defaults and split into the engine request and its matrices.
    ///
    /// The depot (index 0) defaults to no demand and no service time; every
    /// other stop to [`DEFAULT_DEMAND`] and [`DEFAULT_SERVICE_MINUTES`]. A
    /// missing fleet becomes a single vehicle at the depot, and any vehicle
    /// without a capacity may carry the whole demand.
    pub(crate) fn into_problem(self) -> (SolveRequest, TravelMatrices) {
        let stops: Vec<Stop> = self
            .stops
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_stop(index))
            .collect();
        let total_demand: u32 = stops
            .iter()
            .fold(0_u32, |sum, stop| sum.saturating_add(stop.demand));
        let fallback_capacity = total_demand.max(1);

        let vehicles = self
            .vehicles
            .unwrap_or_else(|| vec![VehicleRecord::default()])
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.into_vehicle(index, fallback_capacity))
            .collect();

        (
            SolveRequest::new(stops, vehicles),
            TravelMatrices::new(self.durations_min, self.distances_m),
        )
    }
}

impl StopRecord {
    fn into_stop(self, index: usize) -> Stop {
        let is_depot = index == 0;
        let name = self.name.unwrap_or_else(|| {
            if is_depot {
                "Depot".to_owned()
            } else {
                format!("Stop {index}")
            }
        });
        let (demand, service) = if is_depot {
            (0, 0)
        } else {
            (DEFAULT_DEMAND, DEFAULT_SERVICE_MINUTES)
        };
        let stop = Stop::new(name, self.location)
            .with_demand(self.demand.unwrap_or(demand))
            .with_service_minutes(self.service_minutes.unwrap_or(service));
        match self.time_window {
            Some(window) => stop.with_time_window(window),
            None => stop,
        }
    }
}

impl VehicleRecord {
    fn into_vehicle(self, index: usize, fallback_capacity: u32) -> Vehicle {
        let name = self
            .name
            .unwrap_or_else(|| format!("Vehicle {}", index.saturating_add(1)));
        let mut vehicle = Vehicle::new(
            name,
            self.capacity.unwrap_or(fallback_capacity),
            self.start,
        );
        vehicle.end = self.end;
        vehicle.max_route_minutes = self.max_route_minutes;
        if let Some(factor) = self.speed_factor {
            vehicle.speed_factor = factor;
        }
        vehicle
    }
}
