//! Move one stop to another position, on the same or another route.

#![expect(
    clippy::indexing_slicing,
    reason = "positions range over stop slots of the current routes"
)]

use std::mem;

use super::{Candidate, MoveContext};
use crate::model::ArcCosts;

pub(super) fn improve<C: ArcCosts>(ctx: &mut MoveContext<'_, C>) -> bool {
    let vehicles = ctx.plan().routes().len();
    for r in 0..vehicles {
        let len = ctx.plan().route(r).nodes.len();
        for p in 1..len.saturating_sub(1) {
            if within_route(ctx, r, p) || across_routes(ctx, r, p, vehicles) {
                return true;
            }
        }
    }
    false
}

fn within_route<C: ArcCosts>(ctx: &mut MoveContext<'_, C>, r: usize, p: usize) -> bool {
    let mut buf = mem::take(&mut ctx.first);
    let nodes = &ctx.plan().route(r).nodes;
    let node = nodes[p];
    let mut removed: Vec<usize> = nodes.clone();
    removed.remove(p);
    let mut applied = false;
    for q in 1..removed.len() {
        if q == p {
            continue;
        }
        buf.clear();
        buf.extend_from_slice(&removed[..q]);
        buf.push(node);
        buf.extend_from_slice(&removed[q..]);
        let candidate = Candidate {
            vehicle: r,
            nodes: &buf,
            from: p.min(q),
        };
        if ctx.try_route(&candidate) {
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
    vehicles: usize,
) -> bool {
    let mut source = mem::take(&mut ctx.first);
    let mut target = mem::take(&mut ctx.second);
    source.clear();
    source.extend_from_slice(&ctx.plan().route(r).nodes);
    let node = source.remove(p);
    let demand = ctx.model().node(node).demand;
    let mut applied = false;
    'outer: for s in (0..vehicles).filter(|&s| s != r) {
        let route = ctx.plan().route(s);
        if route.schedule.total_load().saturating_add(demand) > ctx.model().vehicle(s).capacity {
            continue;
        }
        let len = route.nodes.len();
        for q in 1..len {
            target.clear();
            target.extend_from_slice(&ctx.plan().route(s).nodes);
            target.insert(q, node);
            let from_source = Candidate {
                vehicle: r,
                nodes: &source,
                from: p,
            };
            let into_target = Candidate {
                vehicle: s,
                nodes: &target,
                from: q,
            };
            if ctx.try_pair(&from_source, &into_target) {
                applied = true;
                break 'outer;
            }
        }
    }
    ctx.first = source;
    ctx.second = target;
    applied
}
