//! Turn a finished plan into per-vehicle routes.

use fleetplan_core::{RouteLeg, Solution, SolveRequest, VehicleRoute, Visit};

use crate::model::{ArcCosts, ProblemModel};
use crate::plan::{Plan, RoutePlan};

/// Build the public solution; vehicles without stops are omitted.
pub(crate) fn extract(request: &SolveRequest, model: &ProblemModel, plan: &Plan) -> Solution {
    let routes = plan
        .routes()
        .iter()
        .enumerate()
        .filter(|(_, route)| route.has_stops())
        .map(|(vehicle, route)| vehicle_route(request, model, vehicle, route))
        .collect();
    Solution::new(routes)
}

fn vehicle_route(
    request: &SolveRequest,
    model: &ProblemModel,
    vehicle: usize,
    route: &RoutePlan,
) -> VehicleRoute {
    let visits = route
        .schedule
        .cumuls()
        .iter()
        .zip(route.schedule.arrivals())
        .map(|(cumul, arrival_minute)| Visit {
            location: cumul.node,
            arrival_minute,
            load: cumul.load,
        })
        .collect();
    let legs = route
        .nodes
        .iter()
        .zip(route.nodes.iter().skip(1))
        .map(|(&from, &to)| RouteLeg {
            from,
            to,
            drive_minutes: model.travel(vehicle, from, to),
            distance_meters: model.distance(from, to),
        })
        .collect();
    let vehicle_name = request
        .vehicles
        .get(vehicle)
        .map(|v| v.name.clone())
        .unwrap_or_default();
    VehicleRoute {
        vehicle,
        vehicle_name,
        visits,
        legs,
        cost: model.route_cost(vehicle, &route.nodes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construction::cheapest_insertion;
    use fleetplan_core::test_support::line_request;
    use rstest::rstest;

    #[rstest]
    fn omits_idle_vehicles_and_reports_legs() {
        let (request, matrices) = line_request(2, 3);
        let model = ProblemModel::build(&request, &matrices).expect("valid model");
        let plan = cheapest_insertion(&model, None).expect("all stops fit");
        let solution = extract(&request, &model, &plan);

        assert_eq!(solution.routes.len(), 1);
        let route = solution.route_for(0).expect("first vehicle is used");
        assert_eq!(route.vehicle_name, "Van 1");
        assert_eq!(route.stops().collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(route.legs.len(), 3);
        assert_eq!(route.total_drive_minutes(), 40);
        assert!((route.total_distance_meters() - 4_000.0).abs() < f64::EPSILON);
        assert_eq!(route.delivered_load(), 2);
        assert_eq!(solution.objective, plan.cost(&model));
    }

    #[rstest]
    fn arrivals_follow_service_and_travel() {
        let (request, matrices) = line_request(2, 1);
        let model = ProblemModel::build(&request, &matrices).expect("valid model");
        let plan = cheapest_insertion(&model, None).expect("all stops fit");
        let solution = extract(&request, &model, &plan);
        let route = solution.route_for(0).expect("route");
        let minutes: Vec<u32> = route.visits.iter().map(|v| v.arrival_minute).collect();
        // 0 → 2 (20 min), service 5, 2 → 1 (10 min), service 5, 1 → 0 (10 min).
        assert_eq!(minutes, vec![0, 20, 35, 50]);
        let loads: Vec<u32> = route.visits.iter().map(|v| v.load).collect();
        assert_eq!(loads, vec![0, 0, 1, 2]);
        assert_eq!(route.duration_minutes(), 50);
        assert_eq!(route.cost, 50);
    }
}
