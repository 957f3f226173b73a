//! Cumulative cost matrix construction (the DP core).

use crate::matrix::{CumulativeMatrix, PairwiseMatrix};
use crate::pattern::{StepPattern, StepRule};
use crate::window::WindowMask;

/// Fill the cumulative cost matrix over the admissible cells.
///
/// Cells are scanned in row-major order; every rule offset is non-positive
/// in both axes and not all-zero, so predecessors are always computed before
/// they are read. With open-begin a virtual all-zero row is prepended and
/// internal row indices shift by +1 (callers un-shift on output).
///
/// This is the performance-critical inner loop: a single flat allocation,
/// O(cells * rules * chain_len) time.
pub(crate) fn cumulative(
    x: &PairwiseMatrix,
    mask: &WindowMask,
    pattern: &StepPattern,
    open_begin: bool,
) -> CumulativeMatrix {
    let n = x.rows();
    let m = x.cols();
    let shift = usize::from(open_begin);
    let mut d = CumulativeMatrix::filled_inf(n + shift, m);

    if open_begin {
        for j in 0..m {
            d.set(0, j, 0.0);
        }
    }

    for &(i, j) in mask.pairs() {
        let ii = i + shift;
        if !open_begin && i == 0 && j == 0 {
            d.set(0, 0, x.get(0, 0));
            continue;
        }
        let mut best = f64::INFINITY;
        for rule in pattern.rules() {
            if let Some(cost) = rule_cost(&d, x, mask, rule, ii, j, shift) {
                // strict `<` keeps the lowest-indexed rule on ties
                if cost < best {
                    best = cost;
                }
            }
        }
        d.set(ii, j, best);
    }

    d
}

/// Cost of reaching shifted cell `(ii, j)` through `rule`: the cumulative
/// cost at the rule's first predecessor plus the weighted pairwise distances
/// along the rest of the chain.
///
/// Returns `None` when any chain node is out of bounds or inadmissible.
/// Chain nodes on the virtual open-begin row are admissible and contribute
/// zero local cost. The returned cost is `+inf` when the predecessor itself
/// is unreachable.
pub(crate) fn rule_cost(
    d: &CumulativeMatrix,
    x: &PairwiseMatrix,
    mask: &WindowMask,
    rule: &StepRule,
    ii: usize,
    j: usize,
    shift: usize,
) -> Option<f64> {
    let (di0, dj0) = rule.first();
    let pi = ii as i64 + i64::from(di0);
    let pj = j as i64 + i64::from(dj0);
    if pi < 0 || pj < 0 {
        return None;
    }
    let (pi, pj) = (pi as usize, pj as usize);
    if pi >= shift && !mask.contains(pi - shift, pj) {
        return None;
    }

    let mut cost = d.get(pi, pj);
    for (k, &(di, dj)) in rule.offsets().iter().enumerate().skip(1) {
        let ci = ii as i64 + i64::from(di);
        let cj = j as i64 + i64::from(dj);
        if ci < 0 || cj < 0 {
            return None;
        }
        let ri = ci as usize;
        let cj = cj as usize;
        if ri < shift {
            // virtual row: admissible, zero local cost
            continue;
        }
        let ri = ri - shift;
        if !mask.contains(ri, cj) {
            return None;
        }
        cost += rule.weights()[k - 1] * x.get(ri, cj);
    }
    Some(cost)
}
