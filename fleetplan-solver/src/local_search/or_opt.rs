//! Move a run of two or three consecutive stops, within or across routes.

#![expect(
    clippy::indexing_slicing,
    reason = "segments are bounded by the stop slots of the current route"
)]

use std::mem;

use super::{Candidate, MoveContext};
use crate::model::ArcCosts;

const SEGMENT_LENGTHS: [usize; 2] = [2, 3];

pub(super) fn improve<C: ArcCosts>(ctx: &mut MoveContext<'_, C>) -> bool {
    let vehicles = ctx.plan().routes().len();
    for r in 0..vehicles {
        let len = ctx.plan().route(r).nodes.len();
        for k in SEGMENT_LENGTHS {
            // Segment p..p + k must end before the end anchor.
            for p in 1..len.saturating_sub(k) {
                if within_route(ctx, r, p, k) || across_routes(ctx, r, p, k, vehicles) {
                    return true;
                }
            }
        }
    }
    false
}

fn within_route<C: ArcCosts>(ctx: &mut MoveContext<'_, C>, r: usize, p: usize, k: usize) -> bool {
    let nodes = &ctx.plan().route(r).nodes;
    let segment: Vec<usize> = nodes[p..p + k].to_vec();
    let removed: Vec<usize> = nodes[..p].iter().chain(&nodes[p + k..]).copied().collect();
    let mut buf = mem::take(&mut ctx.first);
    let mut applied = false;
    for q in 1..removed.len() {
        if q == p {
            continue;
        }
        buf.clear();
        buf.extend_from_slice(&removed[..q]);
        buf.extend_from_slice(&segment);
        buf.extend_from_slice(&removed[q..]);
        if ctx.try_route(&Candidate {
            vehicle: r,
            nodes: &buf,
            from: p.min(q),
        }) {
            applied = true;
            break;
        }
    }
    ctx.first = buf;
    applied
}

fn across_routes<C: ArcCosts>(
    ctx: &mut MoveContext<'_, C>,
    r: usize,
    p: usize,
    k: usize,
    vehicles: usize,
) -> bool {
    let mut source = mem::take(&mut ctx.first);
    let mut target = mem::take(&mut ctx.second);
    let nodes = &ctx.plan().route(r).nodes;
    let segment: Vec<usize> = nodes[p..p + k].to_vec();
    let demand: u32 = segment
        .iter()
        .map(|&n| ctx.model().node(n).demand)
        .sum();
    source.clear();
    source.extend(nodes[..p].iter().chain(&nodes[p + k..]).copied());
    let mut applied = false;
    'outer: for s in (0..vehicles).filter(|&s| s != r) {
        let route = ctx.plan().route(s);
        if route.schedule.total_load().saturating_add(demand) > ctx.model().vehicle(s).capacity {
            continue;
        }
        let len = route.nodes.len();
        for q in 1..len {
            target.clear();
            let current = &ctx.plan().route(s).nodes;
            target.extend_from_slice(&current[..q]);
            target.extend_from_slice(&segment);
            target.extend_from_slice(&current[q..]);
            if ctx.try_pair(
                &Candidate {
                    vehicle: r,
                    nodes: &source,
                    from: p,
                },
                &Candidate {
                    vehicle: s,
                    nodes: &target,
                    from: q,
                },
            ) {
                applied = true;
                break 'outer;
            }
        }
    }
    ctx.first = source;
    ctx.second = target;
    applied
}
