//! Vehicle routes and the solution that groups them.

/// Render a minute-of-day as `HH:MM`.
///
/// Minutes past the end of the day keep counting hours rather than wrapping,
/// so `1500` renders as `25:00`.
///
/// # Examples
/// ```
/// use fleetplan_core::format_clock;
///
/// assert_eq!(format_clock(0), "00:00");
/// assert_eq!(format_clock(9 * 60 + 5), "09:05");
/// ```
#[must_use]
pub fn format_clock(minute: u32) -> String {
    format!("{:02}:{:02}", minute.div_euclid(60), minute.rem_euclid(60))
}

/// A location reached by a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Visit {
    /// Index into the request's stop list.
    pub location: usize,
    /// Minute of day at which service begins.
    pub arrival_minute: u32,
    /// Units delivered before reaching this location.
    pub load: u32,
}

impl Visit {
    /// Arrival rendered as `HH:MM`.
    #[must_use]
    pub fn arrival_clock(&self) -> String {
        format_clock(self.arrival_minute)
    }
}

/// Travel between two consecutive visits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteLeg {
    /// Location the leg leaves from.
    pub from: usize,
    /// Location the leg arrives at.
    pub to: usize,
    /// Drive time for this vehicle, after speed scaling.
    pub drive_minutes: u32,
    /// Road distance in meters.
    pub distance_meters: f64,
}

/// The ordered visits of one vehicle, anchors included.
///
/// The first visit is the vehicle's start location and the last its end
/// location; everything in between is a delivery stop.
///
/// # Examples
/// ```
/// use fleetplan_core::{RouteLeg, VehicleRoute, Visit};
///
/// let route = VehicleRoute {
///     vehicle: 0,
///     vehicle_name: "Van 1".into(),
///     visits: vec![
///         Visit { location: 0, arrival_minute: 480, load: 0 },
///         Visit { location: 2, arrival_minute: 495, load: 0 },
///         Visit { location: 0, arrival_minute: 515, load: 1 },
///     ],
///     legs: vec![
///         RouteLeg { from: 0, to: 2, drive_minutes: 15, distance_meters: 4_000.0 },
///         RouteLeg { from: 2, to: 0, drive_minutes: 15, distance_meters: 4_200.0 },
///     ],
///     cost: 35,
/// };
/// assert_eq!(route.stops().collect::<Vec<_>>(), vec![2]);
/// assert_eq!(route.duration_minutes(), 35);
/// assert_eq!(route.total_drive_minutes(), 30);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleRoute {
    /// Index of the vehicle in the request.
    pub vehicle: usize,
    /// Name of the vehicle.
    pub vehicle_name: String,
    /// Start anchor, stops, then end anchor.
    pub visits: Vec<Visit>,
    /// One leg per consecutive pair of visits.
    pub legs: Vec<RouteLeg>,
    /// Sum of arc costs along the route.
    pub cost: u64,
}

impl VehicleRoute {
    /// Location indices of the delivery stops, in visiting order.
    pub fn stops(&self) -> impl Iterator<Item = usize> + '_ {
        let inner = self.visits.len().saturating_sub(2);
        self.visits.iter().skip(1).take(inner).map(|v| v.location)
    }

    /// Number of delivery stops.
    #[must_use]
    pub fn stop_count(&self) -> usize {
        self.visits.len().saturating_sub(2)
    }

    /// Minutes between leaving the start and reaching the end.
    #[must_use]
    pub fn duration_minutes(&self) -> u32 {
        match (self.visits.first(), self.visits.last()) {
            (Some(first), Some(last)) => last.arrival_minute.saturating_sub(first.arrival_minute),
            _ => 0,
        }
    }

    /// Sum of leg drive times.
    #[must_use]
    pub fn total_drive_minutes(&self) -> u32 {
        self.legs.iter().map(|leg| leg.drive_minutes).sum()
    }

    /// Sum of leg distances.
    #[must_use]
    pub fn total_distance_meters(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_meters).sum()
    }

    /// Units delivered over the whole route.
    #[must_use]
    pub fn delivered_load(&self) -> u32 {
        self.visits.last().map_or(0, |v| v.load)
    }
}

/// Routes for every vehicle that serves at least one stop.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Solution {
    /// Used vehicles in ascending vehicle index.
    pub routes: Vec<VehicleRoute>,
    /// Sum of route costs.
    pub objective: u64,
}

impl Solution {
    /// Construct a solution, deriving the objective from the routes.
    #[must_use]
    pub fn new(routes: Vec<VehicleRoute>) -> Self {
        let objective = routes.iter().map(|route| route.cost).sum();
        Self { routes, objective }
    }

    /// Route driven by `vehicle`, if it was used.
    #[must_use]
    pub fn route_for(&self, vehicle: usize) -> Option<&VehicleRoute> {
        self.routes.iter().find(|route| route.vehicle == vehicle)
    }

    /// Total number of delivery stops served.
    #[must_use]
    pub fn served_stops(&self) -> usize {
        self.routes.iter().map(VehicleRoute::stop_count).sum()
    }
}
