//! Cumulative load and time along a route.
//!
//! Each route position carries a [`Cumul`]: the load delivered before the
//! position, the earliest minute service can start, the waiting accumulated
//! so far and the forward slack available for starting later. Prefix values
//! never depend on later positions, so a modified route is checked by
//! resuming propagation from the last unchanged position.
//!
//! The duration limit applies to the tightest schedule for the sequence: the
//! start is pushed as late as waiting and window slack allow without
//! delaying arrival at the end.

#![expect(
    clippy::indexing_slicing,
    reason = "positions are bounded by the route length"
)]

use crate::model::ProblemModel;

/// Dimension values at one route position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Cumul {
    pub node: usize,
    /// Demand delivered before reaching this position.
    pub load: u32,
    /// Earliest minute service can begin.
    pub time: u32,
    /// Waiting accumulated up to and including this position.
    pub wait: u32,
    /// Minimum over the prefix of `close - time + wait`.
    pub slack: u32,
    /// Whether capacity and windows hold for the whole prefix.
    pub feasible: bool,
}

impl Cumul {
    /// State at the start anchor of `vehicle`.
    pub(crate) fn origin(model: &ProblemModel, vehicle: usize) -> Self {
        let start = model.vehicle(vehicle).start;
        let node = model.node(start);
        Self {
            node: start,
            load: 0,
            time: node.open,
            wait: 0,
            slack: node.close.saturating_sub(node.open),
            feasible: node.open <= node.close,
        }
    }

    /// Move from this position to `next`, waiting for its window to open.
    pub(crate) fn advance(self, model: &ProblemModel, vehicle: usize, next: usize) -> Self {
        let target = model.node(next);
        let load = self.load.saturating_add(model.node(self.node).demand);
        let arrival = self
            .time
            .saturating_add(model.transit(vehicle, self.node, next));
        let time = arrival.max(target.open);
        let wait = self.wait.saturating_add(time - arrival);
        let slack = self
            .slack
            .min(target.close.saturating_sub(time).saturating_add(wait));
        Self {
            node: next,
            load,
            time,
            wait,
            slack,
            feasible: self.feasible
                && load <= model.vehicle(vehicle).capacity
                && time <= target.close,
        }
    }
}

/// How far the start can be delayed without delaying the end.
const fn start_shift(last: &Cumul) -> u32 {
    if last.wait < last.slack {
        last.wait
    } else {
        last.slack
    }
}

/// Whether `last` is reachable and the tightest schedule from `first` fits
/// the vehicle's duration limit.
fn completes(model: &ProblemModel, vehicle: usize, first: &Cumul, last: &Cumul) -> bool {
    let elapsed = last.time.saturating_sub(first.time);
    last.feasible
        && elapsed.saturating_sub(start_shift(last)) <= model.vehicle(vehicle).max_duration
}

/// Dimension state for every position of a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Schedule {
    cumuls: Vec<Cumul>,
    feasible: bool,
}

impl Schedule {
    /// Propagate along `nodes`, which must begin with the start anchor.
    pub(crate) fn build(model: &ProblemModel, vehicle: usize, nodes: &[usize]) -> Self {
        let mut schedule = Self {
            cumuls: vec![Cumul::origin(model, vehicle)],
            feasible: false,
        };
        schedule.propagate(model, vehicle, nodes);
        schedule
    }

    /// Recompute positions `from..` after `nodes[from..]` changed.
    pub(crate) fn recompute_from(
        &mut self,
        model: &ProblemModel,
        vehicle: usize,
        nodes: &[usize],
        from: usize,
    ) {
        self.cumuls.truncate(from.clamp(1, self.cumuls.len()));
        self.propagate(model, vehicle, nodes);
    }

    fn propagate(&mut self, model: &ProblemModel, vehicle: usize, nodes: &[usize]) {
        let mut current = self.cumuls[self.cumuls.len() - 1];
        for &node in nodes.iter().skip(self.cumuls.len()) {
            current = current.advance(model, vehicle, node);
            self.cumuls.push(current);
        }
        self.feasible = completes(model, vehicle, &self.cumuls[0], &current);
    }

    /// Whether the route respects capacity, windows and duration.
    pub(crate) const fn is_feasible(&self) -> bool {
        self.feasible
    }

    pub(crate) fn cumuls(&self) -> &[Cumul] {
        &self.cumuls
    }

    /// Demand delivered over the whole route.
    pub(crate) fn total_load(&self) -> u32 {
        self.cumuls.last().map_or(0, |last| last.load)
    }

    /// Minutes the start can be delayed in the tightest schedule.
    pub(crate) fn start_shift(&self) -> u32 {
        self.cumuls.last().map_or(0, start_shift)
    }

    /// Service start minutes in the tightest schedule.
    pub(crate) fn arrivals(&self) -> impl Iterator<Item = u32> + '_ {
        let shift = self.start_shift();
        self.cumuls
            .iter()
            .map(move |c| c.time.saturating_add(shift.saturating_sub(c.wait)))
    }

    /// Check a candidate route that keeps positions `..from` of this one and
    /// continues with `tail`, which must end at the end anchor.
    ///
    /// Only the tail is propagated.
    pub(crate) fn accepts<I>(&self, model: &ProblemModel, vehicle: usize, from: usize, tail: I) -> bool
    where
        I: IntoIterator<Item = usize>,
    {
        let Some(&resume) = self.cumuls.get(from.saturating_sub(1)) else {
            return false;
        };
        let mut current = resume;
        for node in tail {
            current = current.advance(model, vehicle, node);
            if !current.feasible {
                return false;
            }
        }
        completes(model, vehicle, &self.cumuls[0], &current)
    }
}
