//! Warping path reconstruction from a completed cumulative matrix.

use crate::cost::rule_cost;
use crate::matrix::{CumulativeMatrix, PairwiseMatrix};
use crate::path::WarpingStep;
use crate::pattern::{StepPattern, StepRule};
use crate::window::WindowMask;

/// Walk backward from the terminal cell, re-deriving at each cell which rule
/// produced its cost (lowest rule index wins on ties, matching the forward
/// pass), emitting every intermediate chain node, and jumping to the rule's
/// first predecessor.
///
/// `d` is the untrimmed cumulative matrix: with open-begin it still carries
/// the virtual row, and the walk stops on reaching it; virtual-row nodes are
/// then dropped and every query index is decremented to remove the offset.
/// Without open-begin the walk stops at the origin.
///
/// The terminal cell must hold a finite cost.
pub(crate) fn backtrack(
    d: &CumulativeMatrix,
    x: &PairwiseMatrix,
    mask: &WindowMask,
    pattern: &StepPattern,
    terminal_col: usize,
    open_begin: bool,
) -> Vec<WarpingStep> {
    let shift = usize::from(open_begin);
    let mut i = d.rows() - 1;
    let mut j = terminal_col;
    let mut nodes: Vec<(usize, usize)> = vec![(i, j)];

    loop {
        let at_origin = if open_begin { i == 0 } else { i == 0 && j == 0 };
        if at_origin {
            break;
        }

        let mut best = f64::INFINITY;
        let mut best_rule: Option<&StepRule> = None;
        for rule in pattern.rules() {
            if let Some(cost) = rule_cost(d, x, mask, rule, i, j, shift) {
                if cost < best {
                    best = cost;
                    best_rule = Some(rule);
                }
            }
        }
        let rule = match best_rule {
            Some(rule) => rule,
            // every non-origin cell with a finite cost was produced by a rule
            None => unreachable!("no producing rule for a finite cumulative cost"),
        };

        let offsets = rule.offsets();
        for k in (1..offsets.len() - 1).rev() {
            let ci = (i as i64 + i64::from(offsets[k].0)) as usize;
            let cj = (j as i64 + i64::from(offsets[k].1)) as usize;
            nodes.push((ci, cj));
        }
        let (di0, dj0) = rule.first();
        i = (i as i64 + i64::from(di0)) as usize;
        j = (j as i64 + i64::from(dj0)) as usize;
        nodes.push((i, j));
    }

    nodes.reverse();
    if open_begin {
        nodes.retain(|&(i, _)| i > 0);
        for node in &mut nodes {
            node.0 -= 1;
        }
    }
    nodes
        .into_iter()
        .map(|(query, reference)| WarpingStep { query, reference })
        .collect()
}
