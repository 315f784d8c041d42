//! 2-opt*: swap the tails of two routes after a cut point in each.

#![expect(
    clippy::indexing_slicing,
    reason = "cut points lie strictly before each route's end anchor"
)]

use std::mem;

use super::{Candidate, MoveContext};
use crate::model::ArcCosts;

pub(super) fn improve<C: ArcCosts>(ctx: &mut MoveContext<'_, C>) -> bool {
    let vehicles = ctx.plan().routes().len();
    for r in 0..vehicles {
        for s in r + 1..vehicles {
            let last_r = ctx.plan().route(r).nodes.len().saturating_sub(2);
            let last_s = ctx.plan().route(s).nodes.len().saturating_sub(2);
            for a in 0..=last_r {
                for b in 0..=last_s {
                    if a == last_r && b == last_s {
                        continue;
                    }
                    if exchange(ctx, (r, a), (s, b)) {
                        return true;
                    }
                }
            }
        }
    }
    false
}

/// Keep `nodes[..=a]` of `r` and `nodes[..=b]` of `s`, then swap what follows
/// up to each end anchor.
fn exchange<C: ArcCosts>(
    ctx: &mut MoveContext<'_, C>,
    (r, a): (usize, usize),
    (s, b): (usize, usize),
) -> bool {
    let mut left = mem::take(&mut ctx.first);
    let mut right = mem::take(&mut ctx.second);
    let nodes_r = &ctx.plan().route(r).nodes;
    let nodes_s = &ctx.plan().route(s).nodes;
    let end_r = nodes_r.len() - 1;
    let end_s = nodes_s.len() - 1;

    left.clear();
    left.extend_from_slice(&nodes_r[..=a]);
    left.extend_from_slice(&nodes_s[b + 1..end_s]);
    left.push(nodes_r[end_r]);

    right.clear();
    right.extend_from_slice(&nodes_s[..=b]);
    right.extend_from_slice(&nodes_r[a + 1..end_r]);
    right.push(nodes_s[end_s]);

    let applied = ctx.try_pair(
        &Candidate {
            vehicle: r,
            nodes: &left,
            from: a + 1,
        },
        &Candidate {
            vehicle: s,
            nodes: &right,
            from: b + 1,
        },
    );
    ctx.first = left;
    ctx.second = right;
    applied
}
