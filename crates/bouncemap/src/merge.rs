//! Fixpoint merge of rectangle sets into maximal bounding regions.
//!
//! Model
//! - Degenerate rectangles are dropped first.
//! - Scan pairs `(i, j)`; as soon as a pair satisfies the rule, replace both
//!   with their bounding union (appended at the end) and restart the scan.
//! - Stop after a full pass without a merge.
//!
//! Worst case O(n³) predicate calls; `n` is bounded by the number of bounces,
//! so no spatial index is used.
//!
//! `MergeRule::Neighboring` is monotone under growth (bigger rectangles stay
//! neighbours), which makes its result independent of input order.
//! `MergeRule::AreaBound` is not: three unit squares in an L merge into
//! different pairs depending on which pair is scanned first.

use crate::cfg::NEIGHBOR_MARGIN;
use crate::geom::{bounding_union, touching_or_overlapping, union_within_area, Rect};

/// When two rectangles are merged.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MergeRule {
    /// Overlapping, or within `margin` of each other while overlapping on the
    /// perpendicular axis.
    Neighboring { margin: f64 },
    /// The bounding union is no larger than the two areas combined. Used for
    /// safe-area accumulation.
    AreaBound,
}

impl MergeRule {
    /// `Neighboring` with the default gap tolerance.
    pub const fn neighboring() -> Self {
        Self::Neighboring {
            margin: NEIGHBOR_MARGIN,
        }
    }

    #[inline]
    fn applies(self, a: &Rect, b: &Rect) -> bool {
        match self {
            Self::Neighboring { margin } => touching_or_overlapping(a, b, margin),
            Self::AreaBound => union_within_area(a, b),
        }
    }
}

/// Merge `rects` until no pair satisfies `rule`.
pub fn merge_rects(rects: &[Rect], rule: MergeRule) -> Vec<Rect> {
    let mut merged: Vec<Rect> = rects.iter().copied().filter(|r| !r.is_degenerate()).collect();
    while let Some((i, j)) = find_pair(&merged, rule) {
        // j > i, so removing j first keeps i valid
        let b = merged.remove(j);
        let a = merged.remove(i);
        merged.push(bounding_union(&a, &b));
    }
    merged
}

fn find_pair(rects: &[Rect], rule: MergeRule) -> Option<(usize, usize)> {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rule.applies(&rects[i], &rects[j]) {
                return Some((i, j));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted(mut rects: Vec<Rect>) -> Vec<Rect> {
        rects.sort_by(|a, b| {
            (a.x, a.y, a.w, a.h)
                .partial_cmp(&(b.x, b.y, b.w, b.h))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        rects
    }

    fn arb_rect() -> impl Strategy<Value = Rect> {
        (-20i32..20, -20i32..20, 0i32..8, 0i32..8)
            .prop_map(|(x, y, w, h)| Rect::new(x as f64, y as f64, w as f64, h as f64))
    }

    #[test]
    fn drops_degenerate_inputs() {
        let rects = [
            Rect::new(0.0, 0.0, 0.0, 5.0),
            Rect::new(0.0, 0.0, 5.0, -1.0),
            Rect::new(100.0, 100.0, 5.0, 5.0),
        ];
        let out = merge_rects(&rects, MergeRule::AreaBound);
        assert_eq!(out, vec![Rect::new(100.0, 100.0, 5.0, 5.0)]);
    }

    #[test]
    fn area_rule_merges_edge_sharing_strip() {
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(10.0, 0.0, 10.0, 10.0),
            Rect::new(20.0, 0.0, 10.0, 10.0),
        ];
        let out = merge_rects(&rects, MergeRule::AreaBound);
        assert_eq!(out, vec![Rect::new(0.0, 0.0, 30.0, 10.0)]);
    }

    #[test]
    fn area_rule_keeps_l_shape_apart() {
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(10.0, 10.0, 10.0, 10.0),
        ];
        assert_eq!(merge_rects(&rects, MergeRule::AreaBound).len(), 2);
    }

    #[test]
    fn area_rule_depends_on_scan_order() {
        let a = Rect::new(0.0, 0.0, 1.0, 1.0);
        let b = Rect::new(1.0, 0.0, 1.0, 1.0);
        let c = Rect::new(0.0, 1.0, 1.0, 1.0);
        let abc = sorted(merge_rects(&[a, b, c], MergeRule::AreaBound));
        let acb = sorted(merge_rects(&[a, c, b], MergeRule::AreaBound));
        assert_eq!(abc.len(), 2);
        assert_eq!(acb.len(), 2);
        assert_ne!(abc, acb);
    }

    #[test]
    fn neighboring_rule_bridges_small_gaps() {
        let rects = [
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Rect::new(11.0, 0.0, 10.0, 10.0),
            Rect::new(0.0, 50.0, 10.0, 10.0),
        ];
        let out = sorted(merge_rects(&rects, MergeRule::neighboring()));
        assert_eq!(
            out,
            vec![
                Rect::new(0.0, 0.0, 21.0, 10.0),
                Rect::new(0.0, 50.0, 10.0, 10.0)
            ]
        );
    }

    proptest! {
        #[test]
        fn merge_is_idempotent(rects in prop::collection::vec(arb_rect(), 0..12), area in any::<bool>()) {
            let rule = if area {
                MergeRule::AreaBound
            } else {
                MergeRule::neighboring()
            };
            let once = merge_rects(&rects, rule);
            let twice = merge_rects(&once, rule);
            prop_assert_eq!(sorted(once), sorted(twice));
        }

        #[test]
        fn neighboring_merge_ignores_input_order(
            rects in prop::collection::vec(arb_rect(), 0..12),
            rotate in 0usize..12,
        ) {
            let rule = MergeRule::neighboring();
            let mut shuffled = rects.clone();
            shuffled.reverse();
            if !shuffled.is_empty() {
                let k = rotate % shuffled.len();
                shuffled.rotate_left(k);
            }
            prop_assert_eq!(
                sorted(merge_rects(&rects, rule)),
                sorted(merge_rects(&shuffled, rule))
            );
        }

        #[test]
        fn merged_regions_cover_their_inputs(rects in prop::collection::vec(arb_rect(), 0..12)) {
            let out = merge_rects(&rects, MergeRule::AreaBound);
            for r in rects.iter().filter(|r| !r.is_degenerate()) {
                let covered = out.iter().any(|m| {
                    m.x <= r.x && m.y <= r.y && m.right() >= r.right() && m.bottom() >= r.bottom()
                });
                prop_assert!(covered);
            }
        }
    }
}
