//! Fleet members and their per-vehicle limits.

use crate::DAY_MINUTES;

/// A vehicle available for routing.
///
/// Start and end refer to indices in the request's stop list. A vehicle without
/// an explicit end returns to its start; one without a duration limit may use
/// the whole planning day.
///
/// # Examples
/// ```
/// use fleetplan_core::Vehicle;
///
/// let van = Vehicle::new("Van 1", 20, 0).with_max_route_minutes(600);
/// assert_eq!(van.end_index(), 0);
/// assert_eq!(van.route_limit(), 600);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    /// Human-readable label.
    pub name: String,
    /// Maximum load carried at any point of the route.
    pub capacity: u32,
    /// Index of the location the route starts from.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: usize,
    /// Index of the location the route ends at; `None` returns to `start`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub end: Option<usize>,
    /// Upper bound on elapsed minutes between leaving the start and reaching
    /// the end.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_route_minutes: Option<u32>,
    /// Multiplier applied to every travel time for this vehicle.
    #[cfg_attr(feature = "serde", serde(default = "default_speed_factor"))]
    pub speed_factor: f64,
}

#[cfg(feature = "serde")]
const fn default_speed_factor() -> f64 {
    1.0
}

impl Vehicle {
    /// Construct a vehicle returning to its start, with no duration limit and
    /// unscaled travel times.
    pub fn new(name: impl Into<String>, capacity: u32, start: usize) -> Self {
        Self {
            name: name.into(),
            capacity,
            start,
            end: None,
            max_route_minutes: None,
            speed_factor: 1.0,
        }
    }

    /// End the route at `end` instead of the start location.
    #[must_use]
    pub const fn with_end(mut self, end: usize) -> Self {
        self.end = Some(end);
        self
    }

    /// Limit route duration to `minutes`.
    #[must_use]
    pub const fn with_max_route_minutes(mut self, minutes: u32) -> Self {
        self.max_route_minutes = Some(minutes);
        self
    }

    /// Scale travel times by `factor`.
    #[must_use]
    pub const fn with_speed_factor(mut self, factor: f64) -> Self {
        self.speed_factor = factor;
        self
    }

    /// Index of the location the route ends at.
    #[must_use]
    pub fn end_index(&self) -> usize {
        self.end.unwrap_or(self.start)
    }

    /// Effective maximum route duration in minutes.
    #[must_use]
    pub fn route_limit(&self) -> u32 {
        self.max_route_minutes.unwrap_or(DAY_MINUTES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn end_defaults_to_start() {
        let vehicle = Vehicle::new("Van", 5, 3);
        assert_eq!(vehicle.end_index(), 3);
        assert_eq!(vehicle.with_end(4).end_index(), 4);
    }

    #[rstest]
    fn route_limit_defaults_to_whole_day() {
        let vehicle = Vehicle::new("Van", 5, 0);
        assert_eq!(vehicle.route_limit(), DAY_MINUTES);
    }
}
