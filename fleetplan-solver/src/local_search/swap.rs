//! Exchange two stops, on the same or different routes.

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
        let len_r = ctx.plan().route(r).nodes.len();
        for p in 1..len_r.saturating_sub(1) {
            for q in p + 1..len_r.saturating_sub(1) {
                if within_route(ctx, r, p, q) {
                    return true;
                }
            }
            for s in r + 1..vehicles {
                let len_s = ctx.plan().route(s).nodes.len();
                for q in 1..len_s.saturating_sub(1) {
                    if across_routes(ctx, (r, p), (s, q)) {
                        return true;
                    }
                }
            }
        }
    }
    false
}

fn within_route<C: ArcCosts>(ctx: &mut MoveContext<'_, C>, r: usize, p: usize, q: usize) -> bool {
    let mut buf = mem::take(&mut ctx.first);
    buf.clear();
    buf.extend_from_slice(&ctx.plan().route(r).nodes);
    buf.swap(p, q);
    let applied = ctx.try_route(&Candidate {
        vehicle: r,
        nodes: &buf,
        from: p,
    });
    ctx.first = buf;
    applied
}

fn across_routes<C: ArcCosts>(
    ctx: &mut MoveContext<'_, C>,
    (r, p): (usize, usize),
    (s, q): (usize, usize),
) -> bool {
    let mut left = mem::take(&mut ctx.first);
    let mut right = mem::take(&mut ctx.second);
    left.clear();
    left.extend_from_slice(&ctx.plan().route(r).nodes);
    right.clear();
    right.extend_from_slice(&ctx.plan().route(s).nodes);
    mem::swap(&mut left[p], &mut right[q]);
    let applied = ctx.try_pair(
        &Candidate {
            vehicle: r,
            nodes: &left,
            from: p,
        },
        &Candidate {
            vehicle: s,
            nodes: &right,
            from: q,
        },
    );
    ctx.first = left;
    ctx.second = right;
    applied
}
