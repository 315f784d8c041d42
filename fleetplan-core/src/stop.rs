//! Delivery locations and the time windows that constrain them.

use geo::Coord;
use thiserror::Error;

/// Length of the planning day in minutes.
///
/// Stops without an explicit window may be served at any minute in
/// `[0, DAY_MINUTES]`, and vehicles without a duration limit may drive for the
/// whole day.
pub const DAY_MINUTES: u32 = 24 * 60;

/// Inclusive service window in minutes from the start of the day.
///
/// # Examples
/// ```
/// use fleetplan_core::TimeWindow;
///
/// let window = TimeWindow::new(9 * 60, 17 * 60).expect("valid window");
/// assert!(window.contains(12 * 60));
/// assert!(!window.contains(18 * 60));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    /// Earliest minute at which service may begin.
    pub open: u32,
    /// Latest minute at which service may begin.
    pub close: u32,
}

/// Errors returned by [`TimeWindow::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeWindowError {
    /// The window closes before it opens.
    #[error("time window end {close} is before start {open}")]
    EndBeforeStart {
        /// Requested opening minute.
        open: u32,
        /// Requested closing minute.
        close: u32,
    },
}

impl TimeWindow {
    /// The whole planning day.
    pub const UNRESTRICTED: Self = Self {
        open: 0,
        close: DAY_MINUTES,
    };

    /// Validates and constructs a window.
    pub const fn new(open: u32, close: u32) -> Result<Self, TimeWindowError> {
        if close < open {
            return Err(TimeWindowError::EndBeforeStart { open, close });
        }
        Ok(Self { open, close })
    }

    /// Whether `minute` lies inside the window.
    #[must_use]
    pub const fn contains(&self, minute: u32) -> bool {
        self.open <= minute && minute <= self.close
    }

    /// Whether the bounds are ordered.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.open <= self.close
    }
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self::UNRESTRICTED
    }
}

/// A location the fleet starts from, ends at, or delivers to.
///
/// Index 0 of a request's stop list is the depot. Coordinates are WGS84 with
/// `x = longitude` and `y = latitude`; they are carried for display and are
/// never read by the solver, which relies on the travel matrices instead.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use fleetplan_core::{Stop, TimeWindow};
///
/// let stop = Stop::new("Bab Touma Market", Coord { x: 36.3091, y: 33.5138 })
///     .with_demand(2)
///     .with_service_minutes(5)
///     .with_time_window(TimeWindow::new(540, 720).expect("valid window"));
///
/// assert_eq!(stop.demand, 2);
/// assert_eq!(stop.window().open, 540);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Human-readable label.
    pub name: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Units of capacity consumed by delivering here.
    #[cfg_attr(feature = "serde", serde(default))]
    pub demand: u32,
    /// Minutes spent at the stop before departing.
    #[cfg_attr(feature = "serde", serde(default))]
    pub service_minutes: u32,
    /// Optional arrival window; `None` means the whole day.
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_window: Option<TimeWindow>,
}

impl Stop {
    /// Construct a stop with zero demand, no service time, and no window.
    pub fn new(name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            name: name.into(),
            location,
            demand: 0,
            service_minutes: 0,
            time_window: None,
        }
    }

    /// Set the demand delivered at this stop.
    #[must_use]
    pub const fn with_demand(mut self, demand: u32) -> Self {
        self.demand = demand;
        self
    }

    /// Set the service duration in minutes.
    #[must_use]
    pub const fn with_service_minutes(mut self, minutes: u32) -> Self {
        self.service_minutes = minutes;
        self
    }

    /// Restrict arrival to `window`.
    #[must_use]
    pub const fn with_time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = Some(window);
        self
    }

    /// The effective window, falling back to the whole day.
    #[must_use]
    pub fn window(&self) -> TimeWindow {
        self.time_window.unwrap_or_default()
    }
}
