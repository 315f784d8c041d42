//! Reverse a run of stops within one route.

use std::mem;

use super::{Candidate, MoveContext};
use crate::model::ArcCosts;

pub(super) fn improve<C: ArcCosts>(ctx: &mut MoveContext<'_, C>) -> bool {
    let vehicles = ctx.plan().routes().len();
    for r in 0..vehicles {
        let last_stop = ctx.plan().route(r).nodes.len().saturating_sub(2);
        for i in 1..last_stop {
            for j in i + 1..=last_stop {
                if reverse(ctx, r, i, j) {
                    return true;
                }
            }
        }
    }
    false
}

fn reverse<C: ArcCosts>(ctx: &mut MoveContext<'_, C>, r: usize, i: usize, j: usize) -> bool {
    let mut buf = mem::take(&mut ctx.first);
    buf.clear();
    buf.extend_from_slice(&ctx.plan().route(r).nodes);
    if let Some(segment) = buf.get_mut(i..=j) {
        segment.reverse();
    }
    let applied = ctx.try_route(&Candidate {
        vehicle: r,
        nodes: &buf,
        from: i,
    });
    ctx.first = buf;
    applied
}
