//! The stop and fleet description handed to a [`Solver`](crate::Solver).

use crate::{Anchor, ConfigurationError, Stop, Vehicle};

/// Parameters for a solve request.
///
/// The first stop is the depot. Travel matrices are not part of the request:
/// the solver obtains them from its
/// [`TravelMatrixProvider`](crate::TravelMatrixProvider).
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use fleetplan_core::{SolveRequest, Stop, Vehicle};
///
/// let request = SolveRequest::new(
///     vec![
///         Stop::new("Depot", Coord { x: 0.0, y: 0.0 }),
///         Stop::new("Market", Coord { x: 0.1, y: 0.0 }).with_demand(1),
///     ],
///     vec![Vehicle::new("Van 1", 3, 0)],
/// );
/// assert!(request.validate().is_ok());
/// assert_eq!(request.total_demand(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolveRequest {
    /// Depot followed by delivery stops.
    pub stops: Vec<Stop>,
    /// Available vehicles.
    pub vehicles: Vec<Vehicle>,
}

impl SolveRequest {
    /// Construct a request from stops and vehicles.
    #[must_use]
    pub const fn new(stops: Vec<Stop>, vehicles: Vec<Vehicle>) -> Self {
        Self { stops, vehicles }
    }

    /// The depot, if any stops were supplied.
    #[must_use]
    pub fn depot(&self) -> Option<&Stop> {
        self.stops.first()
    }

    /// Sum of all stop demands.
    #[must_use]
    pub fn total_demand(&self) -> u64 {
        self.stops.iter().map(|stop| u64::from(stop.demand)).sum()
    }

    /// Sum of all vehicle capacities.
    #[must_use]
    pub fn total_capacity(&self) -> u64 {
        self.vehicles
            .iter()
            .map(|vehicle| u64::from(vehicle.capacity))
            .sum()
    }

    /// Check the stops and vehicles for malformed values.
    ///
    /// Matrices are validated separately once the provider has produced them.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigurationError`] found.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.stops.is_empty() {
            return Err(ConfigurationError::NoStops);
        }
        if self.vehicles.is_empty() {
            return Err(ConfigurationError::NoVehicles);
        }
        for (index, stop) in self.stops.iter().enumerate() {
            if let Some(window) = stop.time_window
                && !window.is_valid()
            {
                return Err(ConfigurationError::InvalidTimeWindow {
                    stop: index,
                    open: window.open,
                    close: window.close,
                });
            }
        }
        let locations = self.stops.len();
        for (index, vehicle) in self.vehicles.iter().enumerate() {
            if vehicle.capacity == 0 {
                return Err(ConfigurationError::NonPositiveCapacity { vehicle: index });
            }
            for (anchor, location) in [
                (Anchor::Start, vehicle.start),
                (Anchor::End, vehicle.end_index()),
            ] {
                if location >= locations {
                    return Err(ConfigurationError::AnchorOutOfRange {
                        vehicle: index,
                        anchor,
                        index: location,
                        locations,
                    });
                }
            }
            if !vehicle.speed_factor.is_finite() || vehicle.speed_factor <= 0.0 {
                return Err(ConfigurationError::InvalidSpeedFactor {
                    vehicle: index,
                    factor: vehicle.speed_factor,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimeWindow;
    use geo::Coord;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> SolveRequest {
        SolveRequest::new(
            vec![
                Stop::new("Depot", Coord { x: 0.0, y: 0.0 }),
                Stop::new("Market", Coord { x: 0.1, y: 0.0 }).with_demand(2),
                Stop::new("Plaza", Coord { x: 0.2, y: 0.0 }).with_demand(3),
            ],
            vec![Vehicle::new("Van 1", 4, 0), Vehicle::new("Van 2", 4, 0)],
        )
    }

    #[rstest]
    fn valid_request_passes(request: SolveRequest) {
        assert!(request.validate().is_ok());
        assert_eq!(request.total_demand(), 5);
        assert_eq!(request.total_capacity(), 8);
    }

    #[rstest]
    fn rejects_missing_vehicles(mut request: SolveRequest) {
        request.vehicles.clear();
        assert_eq!(request.validate(), Err(ConfigurationError::NoVehicles));
    }

    #[rstest]
    fn rejects_missing_stops(mut request: SolveRequest) {
        request.stops.clear();
        assert_eq!(request.validate(), Err(ConfigurationError::NoStops));
    }

    #[rstest]
    fn rejects_reversed_window(mut request: SolveRequest) {
        request.stops[2].time_window = Some(TimeWindow { open: 90, close: 60 });
        assert_eq!(
            request.validate(),
            Err(ConfigurationError::InvalidTimeWindow {
                stop: 2,
                open: 90,
                close: 60,
            })
        );
    }

    #[rstest]
    fn rejects_zero_capacity(mut request: SolveRequest) {
        request.vehicles[1].capacity = 0;
        assert_eq!(
            request.validate(),
            Err(ConfigurationError::NonPositiveCapacity { vehicle: 1 })
        );
    }

    #[rstest]
    #[case(Anchor::Start)]
    #[case(Anchor::End)]
    fn rejects_out_of_range_anchor(mut request: SolveRequest, #[case] anchor: Anchor) {
        match anchor {
            Anchor::Start => request.vehicles[0].start = 3,
            Anchor::End => request.vehicles[0].end = Some(7),
        }
        let err = request.validate().expect_err("anchor out of range");
        assert!(matches!(
            err,
            ConfigurationError::AnchorOutOfRange { vehicle: 0, anchor: found, .. } if found == anchor
        ));
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.5)]
    #[case(f64::INFINITY)]
    fn rejects_invalid_speed_factor(mut request: SolveRequest, #[case] factor: f64) {
        request.vehicles[0].speed_factor = factor;
        assert!(matches!(
            request.validate(),
            Err(ConfigurationError::InvalidSpeedFactor { vehicle: 0, .. })
        ));
    }
}
