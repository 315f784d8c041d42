//! Search budget, configuration and the multi-start driver.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use log::debug;
use rayon::prelude::*;

use crate::construction::{Jitter, cheapest_insertion};
use crate::guided::guided_local_search;
use crate::model::ProblemModel;
use crate::plan::Plan;

/// Configuration for [`NativeSolver`](crate::NativeSolver).
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use fleetplan_solver::SearchConfig;
///
/// let config = SearchConfig {
///     time_limit: Duration::from_secs(2),
///     starts: 4,
///     ..SearchConfig::default()
/// };
/// assert_eq!(config.seed, 0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    /// Wall-clock budget for the improvement phase of every start.
    ///
    /// Construction always completes; the budget is checked between local
    /// search sweeps.
    pub time_limit: Duration,
    /// Number of independent construction and search runs. Zero is treated
    /// as one.
    pub starts: usize,
    /// Base seed for the insertion jitter of starts after the first.
    pub seed: u64,
    /// Scales the penalty weight against the average arc cost of the first
    /// local optimum.
    pub lambda_coefficient: f64,
    /// Stop guided search after this many penalty rounds.
    pub max_rounds: Option<u32>,
    /// Relative amplitude of the detour noise used by starts after the first.
    pub insertion_jitter: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(20),
            starts: 1,
            seed: 0,
            lambda_coefficient: 0.1,
            max_rounds: None,
            insertion_jitter: 0.05,
        }
    }
}

impl SearchConfig {
    /// A reproducible search that stops after `max_rounds` penalty rounds.
    ///
    /// The wall-clock limit is raised to a minute so that it only bounds
    /// runaway instances; for everything else the round limit decides.
    #[must_use]
    pub fn bounded(max_rounds: u32) -> Self {
        Self {
            time_limit: Duration::from_secs(60),
            max_rounds: Some(max_rounds),
            ..Self::default()
        }
    }
}

/// Deadline and cancellation flag consulted between sweeps.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Budget<'a> {
    deadline: Option<Instant>,
    cancel: Option<&'a AtomicBool>,
}

impl<'a> Budget<'a> {
    /// Budget of `limit` measured from `started`.
    ///
    /// A limit too large to represent never expires.
    pub(crate) fn new(started: Instant, limit: Duration, cancel: Option<&'a AtomicBool>) -> Self {
        Self {
            deadline: started.checked_add(limit),
            cancel,
        }
    }

    /// A budget that never runs out.
    #[cfg(test)]
    pub(crate) const fn unlimited() -> Self {
        Self {
            deadline: None,
            cancel: None,
        }
    }

    /// A budget that has already run out.
    #[cfg(test)]
    pub(crate) fn expired_now() -> Self {
        Self {
            deadline: Some(Instant::now()),
            cancel: None,
        }
    }

    pub(crate) fn expired(&self) -> bool {
        self.cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
            || self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }
}

/// Best plan found across all starts.
#[derive(Debug, Clone)]
pub(crate) struct SearchOutcome {
    pub plan: Plan,
    pub cost: u64,
    pub construction_cost: u64,
    pub rounds: u32,
    pub starts: usize,
    pub winning_start: usize,
}

struct StartResult {
    index: usize,
    plan: Plan,
    cost: u64,
    construction_cost: u64,
    rounds: u32,
}

fn run_start(
    model: &ProblemModel,
    config: &SearchConfig,
    budget: &Budget<'_>,
    index: usize,
) -> Result<StartResult, Vec<usize>> {
    let jitter = (index > 0).then(|| {
        let offset = u64::try_from(index).unwrap_or(u64::MAX);
        Jitter::new(model, config.seed.wrapping_add(offset), config.insertion_jitter)
    });
    let initial = cheapest_insertion(model, jitter.as_ref())?;
    let construction_cost = initial.cost(model);
    debug!("start {index}: construction objective {construction_cost}");
    let outcome = guided_local_search(model, initial, config, budget);
    debug!(
        "start {index}: objective {} after {} penalty rounds",
        outcome.cost, outcome.rounds
    );
    Ok(StartResult {
        index,
        plan: outcome.plan,
        cost: outcome.cost,
        construction_cost,
        rounds: outcome.rounds,
    })
}

/// Run every start in parallel and keep the cheapest feasible plan.
///
/// Ties go to the lowest start index. When no start places every stop, the
/// unplaced stops of the first start are returned.
pub(crate) fn search(
    model: &ProblemModel,
    config: &SearchConfig,
    budget: &Budget<'_>,
) -> Result<SearchOutcome, Vec<usize>> {
    let starts = config.starts.max(1);
    let results: Vec<Result<StartResult, Vec<usize>>> = (0..starts)
        .into_par_iter()
        .map(|index| run_start(model, config, budget, index))
        .collect();

    let mut first_failure: Option<Vec<usize>> = None;
    let mut best: Option<StartResult> = None;
    for result in results {
        match result {
            Ok(candidate) => {
                if best.as_ref().is_none_or(|current| candidate.cost < current.cost) {
                    best = Some(candidate);
                }
            }
            Err(unplaced) => {
                if first_failure.is_none() {
                    first_failure = Some(unplaced);
                }
            }
        }
    }

    match best {
        Some(winner) => Ok(SearchOutcome {
            plan: winner.plan,
            cost: winner.cost,
            construction_cost: winner.construction_cost,
            rounds: winner.rounds,
            starts,
            winning_start: winner.index,
        }),
        None => Err(first_failure.unwrap_or_default()),
    }
}
