//! Deferred join resolution and the post-sweep polygon cleanup passes:
//! `JoinCommonEdges`, `DoSimplePolygons`, `FixupOutPolygon`/`FixupOutPolyline`,
//! and the `FirstLeft` repair family used when building a `PolyTree`.
//!
//! Grounded in `ClipperEx::{JoinCommonEdges, JoinPoints, JoinHorz, GetOverlap,
//! DupOutPt, DoSimplePolygons, FixupOutPolygon, FixupOutPolyline,
//! ParseFirstLeft, FixupFirstLefts1, FixupFirstLefts2, FixupFirstLefts3}`
//! from the original C++ implementation (`clip.cpp`). `DupOutPt`, `JoinHorz`,
//! and `GetOverlap` have no retrievable body in this pack (only forward
//! declarations in `clipper.hpp`); they're reproduced here from the
//! well-established Clipper1 algorithm rather than copied from a specific
//! file — see DESIGN.md.

use crate::clipper::Clipper;
use crate::consts::CInt;
use crate::error::Result;
use crate::geom::{self, IntPoint};
use crate::output::{OutPtIdx, OutRecIdx};
use crate::types::Direction;

impl Clipper {
    fn dup_out_pt(&mut self, out_pt: OutPtIdx, insert_after: bool) -> OutPtIdx {
        let idx = self.base.out_pt(out_pt).idx;
        let pt = self.base.out_pt(out_pt).pt;
        let result = self.base.new_out_pt(idx, pt);
        if insert_after {
            let next = self.base.out_pt(out_pt).next;
            self.base.out_pt_mut(result).next = next;
            self.base.out_pt_mut(result).prev = out_pt;
            self.base.out_pt_mut(next).prev = result;
            self.base.out_pt_mut(out_pt).next = result;
        } else {
            let prev = self.base.out_pt(out_pt).prev;
            self.base.out_pt_mut(result).prev = prev;
            self.base.out_pt_mut(result).next = out_pt;
            self.base.out_pt_mut(prev).next = result;
            self.base.out_pt_mut(out_pt).prev = result;
        }
        result
    }

    fn get_overlap(&self, a1: CInt, a2: CInt, b1: CInt, b2: CInt) -> Option<(CInt, CInt)> {
        let (left, right) = if a1 < a2 {
            if b1 < b2 { (a1.max(b1), a2.min(b2)) } else { (a1.max(b2), a2.min(b1)) }
        } else if b1 < b2 {
            (a2.max(b1), a1.min(b2))
        } else {
            (a2.max(b2), a1.min(b1))
        };
        if left < right { Some((left, right)) } else { None }
    }

    /// Joins two horizontal-overlap output fragments at `pt`, discarding
    /// whichever side `discard_left` selects to avoid leaving a spike.
    fn join_horz(
        &mut self,
        mut op1: OutPtIdx,
        mut op1b: OutPtIdx,
        mut op2: OutPtIdx,
        mut op2b: OutPtIdx,
        pt: IntPoint,
        discard_left: bool,
    ) -> bool {
        let dir1 = if self.base.out_pt(op1).pt.x > self.base.out_pt(op1b).pt.x {
            Direction::RightToLeft
        } else {
            Direction::LeftToRight
        };
        let dir2 = if self.base.out_pt(op2).pt.x > self.base.out_pt(op2b).pt.x {
            Direction::RightToLeft
        } else {
            Direction::LeftToRight
        };
        if dir1 == dir2 {
            return false;
        }

        if dir1 == Direction::LeftToRight {
            while {
                let n = self.base.out_pt(op1).next;
                self.base.out_pt(n).pt.x <= pt.x
                    && self.base.out_pt(n).pt.x >= self.base.out_pt(op1).pt.x
                    && self.base.out_pt(n).pt.y == pt.y
            } {
                op1 = self.base.out_pt(op1).next;
            }
            if discard_left && self.base.out_pt(op1).pt.x != pt.x {
                op1 = self.base.out_pt(op1).next;
            }
            op1b = self.dup_out_pt(op1, !discard_left);
            if self.base.out_pt(op1b).pt != pt {
                op1 = op1b;
                self.base.out_pt_mut(op1).pt = pt;
                op1b = self.dup_out_pt(op1, !discard_left);
            }
        } else {
            while {
                let n = self.base.out_pt(op1).next;
                self.base.out_pt(n).pt.x >= pt.x
                    && self.base.out_pt(n).pt.x <= self.base.out_pt(op1).pt.x
                    && self.base.out_pt(n).pt.y == pt.y
            } {
                op1 = self.base.out_pt(op1).next;
            }
            if !discard_left && self.base.out_pt(op1).pt.x != pt.x {
                op1 = self.base.out_pt(op1).next;
            }
            op1b = self.dup_out_pt(op1, discard_left);
            if self.base.out_pt(op1b).pt != pt {
                op1 = op1b;
                self.base.out_pt_mut(op1).pt = pt;
                op1b = self.dup_out_pt(op1, discard_left);
            }
        }

        if dir2 == Direction::LeftToRight {
            while {
                let n = self.base.out_pt(op2).next;
                self.base.out_pt(n).pt.x <= pt.x
                    && self.base.out_pt(n).pt.x >= self.base.out_pt(op2).pt.x
                    && self.base.out_pt(n).pt.y == pt.y
            } {
                op2 = self.base.out_pt(op2).next;
            }
            if discard_left && self.base.out_pt(op2).pt.x != pt.x {
                op2 = self.base.out_pt(op2).next;
            }
            op2b = self.dup_out_pt(op2, !discard_left);
            if self.base.out_pt(op2b).pt != pt {
                op2 = op2b;
                self.base.out_pt_mut(op2).pt = pt;
                op2b = self.dup_out_pt(op2, !discard_left);
            }
        } else {
            while {
                let n = self.base.out_pt(op2).next;
                self.base.out_pt(n).pt.x >= pt.x
                    && self.base.out_pt(n).pt.x <= self.base.out_pt(op2).pt.x
                    && self.base.out_pt(n).pt.y == pt.y
            } {
                op2 = self.base.out_pt(op2).next;
            }
            if !discard_left && self.base.out_pt(op2).pt.x != pt.x {
                op2 = self.base.out_pt(op2).next;
            }
            op2b = self.dup_out_pt(op2, discard_left);
            if self.base.out_pt(op2b).pt != pt {
                op2 = op2b;
                self.base.out_pt_mut(op2).pt = pt;
                op2b = self.dup_out_pt(op2, discard_left);
            }
        }

        if (dir1 == Direction::LeftToRight) == discard_left {
            self.base.out_pt_mut(op1).prev = op2;
            self.base.out_pt_mut(op2).next = op1;
            self.base.out_pt_mut(op1b).next = op2b;
            self.base.out_pt_mut(op2b).prev = op1b;
        } else {
            self.base.out_pt_mut(op1).next = op2;
            self.base.out_pt_mut(op2).prev = op1;
            self.base.out_pt_mut(op1b).prev = op2b;
            self.base.out_pt_mut(op2b).next = op1b;
        }
        true
    }

    /// Resolves one deferred [`crate::output::Join`] in place (the join's
    /// `out_pt1`/`out_pt2` fields are rewritten to the new split points on
    /// success). Returns `false` when the join turned out not to apply —
    /// the source's silent `return false`, kept as a bool here too since
    /// it's a routine "this candidate didn't pan out", not an error.
    fn join_points(&mut self, join_idx: usize, out_rec1: OutRecIdx, out_rec2: OutRecIdx) -> bool {
        let op1 = self.joins[join_idx].out_pt1;
        let op2 = self.joins[join_idx].out_pt2.unwrap();
        let off_pt = self.joins[join_idx].off_pt;
        let mut op1 = op1;
        let mut op2 = op2;

        let is_horizontal = self.base.out_pt(op1).pt.y == off_pt.y;

        if is_horizontal && self.base.out_pt(op1).pt == off_pt && self.base.out_pt(op2).pt == off_pt {
            // Strictly-simple join: edges touch but aren't collinear, and
            // OutPt1, OutPt2 and OffPt all share the same point.
            if out_rec1 != out_rec2 {
                return false;
            }
            let mut op1b = self.base.out_pt(op1).next;
            while op1b != op1 && self.base.out_pt(op1b).pt == off_pt {
                op1b = self.base.out_pt(op1b).next;
            }
            let reverse1 = self.base.out_pt(op1b).pt.y > off_pt.y;
            let mut op2b = self.base.out_pt(op2).next;
            while op2b != op2 && self.base.out_pt(op2b).pt == off_pt {
                op2b = self.base.out_pt(op2b).next;
            }
            let reverse2 = self.base.out_pt(op2b).pt.y > off_pt.y;
            if reverse1 == reverse2 {
                return false;
            }
            if reverse1 {
                let op1b = self.dup_out_pt(op1, false);
                let op2b = self.dup_out_pt(op2, true);
                self.base.out_pt_mut(op1).prev = op2;
                self.base.out_pt_mut(op2).next = op1;
                self.base.out_pt_mut(op1b).next = op2b;
                self.base.out_pt_mut(op2b).prev = op1b;
                self.joins[join_idx].out_pt1 = op1;
                self.joins[join_idx].out_pt2 = Some(op1b);
            } else {
                let op1b = self.dup_out_pt(op1, true);
                let op2b = self.dup_out_pt(op2, false);
                self.base.out_pt_mut(op1).next = op2;
                self.base.out_pt_mut(op2).prev = op1;
                self.base.out_pt_mut(op1b).prev = op2b;
                self.base.out_pt_mut(op2b).next = op1b;
                self.joins[join_idx].out_pt1 = op1;
                self.joins[join_idx].out_pt2 = Some(op1b);
            }
            true
        } else if is_horizontal {
            // Horizontal joins: OutPt1/OutPt2 may be anywhere along the
            // overlapping horizontal edges, so first walk out to their
            // extremities.
            let op1_start = op1;
            let op2_start = op2;
            let mut op1b = op1;
            while self.base.out_pt(self.base.out_pt(op1).prev).pt.y == self.base.out_pt(op1).pt.y
                && self.base.out_pt(op1).prev != op1b
                && self.base.out_pt(op1).prev != op2_start
            {
                op1 = self.base.out_pt(op1).prev;
            }
            while self.base.out_pt(self.base.out_pt(op1b).next).pt.y == self.base.out_pt(op1b).pt.y
                && self.base.out_pt(op1b).next != op1
                && self.base.out_pt(op1b).next != op2_start
            {
                op1b = self.base.out_pt(op1b).next;
            }
            if self.base.out_pt(op1b).next == op1 || self.base.out_pt(op1b).next == op2_start {
                return false; // a flat 'polygon'
            }

            let mut op2b = op2;
            while self.base.out_pt(self.base.out_pt(op2).prev).pt.y == self.base.out_pt(op2).pt.y
                && self.base.out_pt(op2).prev != op2b
                && self.base.out_pt(op2).prev != op1b
            {
                op2 = self.base.out_pt(op2).prev;
            }
            while self.base.out_pt(self.base.out_pt(op2b).next).pt.y == self.base.out_pt(op2b).pt.y
                && self.base.out_pt(op2b).next != op2
                && self.base.out_pt(op2b).next != op1_start
            {
                op2b = self.base.out_pt(op2b).next;
            }
            if self.base.out_pt(op2b).next == op2 || self.base.out_pt(op2b).next == op1_start {
                return false; // a flat 'polygon'
            }

            let (x1a, x1b) = (self.base.out_pt(op1).pt.x, self.base.out_pt(op1b).pt.x);
            let (x2a, x2b) = (self.base.out_pt(op2).pt.x, self.base.out_pt(op2b).pt.x);
            let Some((left, right)) = self.get_overlap(x1a, x1b, x2a, x2b) else {
                return false;
            };

            // DiscardLeftSide: joining overlapping edges creates a spike
            // that must be cleaned up, picking a side that isn't op1/op2
            // themselves since either may still be needed for other joins.
            let (pt, discard_left);
            if self.base.out_pt(op1).pt.x >= left && self.base.out_pt(op1).pt.x <= right {
                pt = self.base.out_pt(op1).pt;
                discard_left = self.base.out_pt(op1).pt.x > self.base.out_pt(op1b).pt.x;
            } else if self.base.out_pt(op2).pt.x >= left && self.base.out_pt(op2).pt.x <= right {
                pt = self.base.out_pt(op2).pt;
                discard_left = self.base.out_pt(op2).pt.x > self.base.out_pt(op2b).pt.x;
            } else if self.base.out_pt(op1b).pt.x >= left && self.base.out_pt(op1b).pt.x <= right {
                pt = self.base.out_pt(op1b).pt;
                discard_left = self.base.out_pt(op1b).pt.x > self.base.out_pt(op1).pt.x;
            } else {
                pt = self.base.out_pt(op2b).pt;
                discard_left = self.base.out_pt(op2b).pt.x > self.base.out_pt(op2).pt.x;
            }
            self.joins[join_idx].out_pt1 = op1;
            self.joins[join_idx].out_pt2 = Some(op2);
            self.join_horz(op1, op1b, op2, op2b, pt, discard_left)
        } else {
            // Non-horizontal join: OutPt1/OutPt2 sit at the bottom of the
            // overlapping segment, OffPt above.
            let mut op1b = self.base.out_pt(op1).next;
            while self.base.out_pt(op1b).pt == self.base.out_pt(op1).pt && op1b != op1 {
                op1b = self.base.out_pt(op1b).next;
            }
            let mut reverse1 = self.base.out_pt(op1b).pt.y > self.base.out_pt(op1).pt.y
                || !geom::slopes_equal3(
                    self.base.out_pt(op1).pt,
                    self.base.out_pt(op1b).pt,
                    off_pt,
                    self.base.use_full_range,
                );
            if reverse1 {
                op1b = self.base.out_pt(op1).prev;
                while self.base.out_pt(op1b).pt == self.base.out_pt(op1).pt && op1b != op1 {
                    op1b = self.base.out_pt(op1b).prev;
                }
                if self.base.out_pt(op1b).pt.y > self.base.out_pt(op1).pt.y
                    || !geom::slopes_equal3(
                        self.base.out_pt(op1).pt,
                        self.base.out_pt(op1b).pt,
                        off_pt,
                        self.base.use_full_range,
                    )
                {
                    return false;
                }
            }
            let mut op2b = self.base.out_pt(op2).next;
            while self.base.out_pt(op2b).pt == self.base.out_pt(op2).pt && op2b != op2 {
                op2b = self.base.out_pt(op2b).next;
            }
            let reverse2 = self.base.out_pt(op2b).pt.y > self.base.out_pt(op2).pt.y
                || !geom::slopes_equal3(
                    self.base.out_pt(op2).pt,
                    self.base.out_pt(op2b).pt,
                    off_pt,
                    self.base.use_full_range,
                );
            if reverse2 {
                op2b = self.base.out_pt(op2).prev;
                while self.base.out_pt(op2b).pt == self.base.out_pt(op2).pt && op2b != op2 {
                    op2b = self.base.out_pt(op2b).prev;
                }
                if self.base.out_pt(op2b).pt.y > self.base.out_pt(op2).pt.y
                    || !geom::slopes_equal3(
                        self.base.out_pt(op2).pt,
                        self.base.out_pt(op2b).pt,
                        off_pt,
                        self.base.use_full_range,
                    )
                {
                    return false;
                }
            }

            if op1b == op1 || op2b == op2 || op1b == op2b || (out_rec1 == out_rec2 && reverse1 == reverse2) {
                return false;
            }

            if reverse1 {
                let op1b = self.dup_out_pt(op1, false);
                let op2b = self.dup_out_pt(op2, true);
                self.base.out_pt_mut(op1).prev = op2;
                self.base.out_pt_mut(op2).next = op1;
                self.base.out_pt_mut(op1b).next = op2b;
                self.base.out_pt_mut(op2b).prev = op1b;
                self.joins[join_idx].out_pt1 = op1;
                self.joins[join_idx].out_pt2 = Some(op1b);
            } else {
                let op1b = self.dup_out_pt(op1, true);
                let op2b = self.dup_out_pt(op2, false);
                self.base.out_pt_mut(op1).next = op2;
                self.base.out_pt_mut(op2).prev = op1;
                self.base.out_pt_mut(op1b).prev = op2b;
                self.base.out_pt_mut(op2b).next = op1b;
                self.joins[join_idx].out_pt1 = op1;
                self.joins[join_idx].out_pt2 = Some(op1b);
            }
            true
        }
    }

    fn update_out_pt_idxs(&mut self, out_rec: OutRecIdx) {
        let start = self.base.out_recs[out_rec].pts.unwrap();
        let mut op = start;
        loop {
            self.base.out_pt_mut(op).idx = out_rec as i32;
            op = self.base.out_pt(op).next;
            if op == start {
                break;
            }
        }
    }

    pub(crate) fn join_common_edges(&mut self) -> Result<()> {
        for i in 0..self.joins.len() {
            let (op1, op2) = (self.joins[i].out_pt1, self.joins[i].out_pt2.unwrap());
            let out_rec1 = self.base.get_out_rec(self.base.out_pt(op1).idx as usize);
            let out_rec2 = self.base.get_out_rec(self.base.out_pt(op2).idx as usize);

            if self.base.out_recs[out_rec1].pts.is_none() || self.base.out_recs[out_rec2].pts.is_none() {
                continue;
            }
            if self.base.out_recs[out_rec1].is_open || self.base.out_recs[out_rec2].is_open {
                continue;
            }

            // Pin down the fragment with the correct hole state before
            // JoinPoints potentially splits or merges the rings.
            let hole_state_rec = if out_rec1 == out_rec2 {
                out_rec1
            } else if self.out_rec1_right_of_out_rec2(out_rec1, out_rec2) {
                out_rec2
            } else if self.out_rec1_right_of_out_rec2(out_rec2, out_rec1) {
                out_rec1
            } else {
                self.get_lowermost_rec(out_rec1, out_rec2)
            };

            if !self.join_points(i, out_rec1, out_rec2) {
                continue;
            }

            if out_rec1 == out_rec2 {
                // The join split one ring into two rather than merging two
                // rings into one.
                let (new_op1, new_op2) = (self.joins[i].out_pt1, self.joins[i].out_pt2.unwrap());
                self.base.out_recs[out_rec1].pts = Some(new_op1);
                self.base.out_recs[out_rec1].bottom_pt = None;
                let out_rec2 = self.base.create_out_rec();
                self.base.out_recs[out_rec2].pts = Some(new_op2);
                self.update_out_pt_idxs(out_rec2);

                let poly1 = self.ring_to_path(new_op1);
                let poly2 = self.ring_to_path(new_op2);

                if geom::poly2_contains_poly1(&poly2, &poly1) {
                    self.base.out_recs[out_rec2].is_hole = !self.base.out_recs[out_rec1].is_hole;
                    self.base.out_recs[out_rec2].first_left = Some(out_rec1);
                    if self.using_poly_tree {
                        self.fixup_first_lefts2(out_rec2, out_rec1);
                    }
                    let is_hole = self.base.out_recs[out_rec2].is_hole;
                    if (is_hole ^ self.reverse_solution()) == (geom::area(&poly2) > 0.0) {
                        self.reverse_poly_pt_links(new_op2);
                    }
                } else if geom::poly2_contains_poly1(&poly1, &poly2) {
                    self.base.out_recs[out_rec2].is_hole = self.base.out_recs[out_rec1].is_hole;
                    self.base.out_recs[out_rec1].is_hole = !self.base.out_recs[out_rec2].is_hole;
                    self.base.out_recs[out_rec2].first_left = self.base.out_recs[out_rec1].first_left;
                    self.base.out_recs[out_rec1].first_left = Some(out_rec2);
                    if self.using_poly_tree {
                        self.fixup_first_lefts2(out_rec1, out_rec2);
                    }
                    let is_hole = self.base.out_recs[out_rec1].is_hole;
                    if (is_hole ^ self.reverse_solution()) == (geom::area(&poly1) > 0.0) {
                        self.reverse_poly_pt_links(new_op1);
                    }
                } else {
                    self.base.out_recs[out_rec2].is_hole = self.base.out_recs[out_rec1].is_hole;
                    self.base.out_recs[out_rec2].first_left = self.base.out_recs[out_rec1].first_left;
                    if self.using_poly_tree {
                        self.fixup_first_lefts1(out_rec1, out_rec2);
                    }
                }
            } else {
                self.base.out_recs[out_rec2].pts = None;
                self.base.out_recs[out_rec2].bottom_pt = None;
                self.base.out_recs[out_rec2].idx = out_rec1;

                self.base.out_recs[out_rec1].is_hole = self.base.out_recs[hole_state_rec].is_hole;
                if hole_state_rec == out_rec2 {
                    self.base.out_recs[out_rec1].first_left = self.base.out_recs[out_rec2].first_left;
                }
                self.base.out_recs[out_rec2].first_left = Some(out_rec1);

                if self.using_poly_tree {
                    self.fixup_first_lefts3(out_rec2, out_rec1);
                }
            }
        }
        Ok(())
    }

    pub(crate) fn do_simple_polygons(&mut self) -> Result<()> {
        let mut i = 0;
        while i < self.base.out_recs.len() {
            let out_rec = i;
            i += 1;
            if self.base.out_recs[out_rec].pts.is_none() || self.base.out_recs[out_rec].is_open {
                continue;
            }
            let mut op = self.base.out_recs[out_rec].pts.unwrap();
            loop {
                let mut op2 = self.base.out_pt(op).next;
                while op2 != self.base.out_recs[out_rec].pts.unwrap() {
                    if self.base.out_pt(op).pt == self.base.out_pt(op2).pt
                        && self.base.out_pt(op2).next != op
                        && self.base.out_pt(op2).prev != op
                    {
                        // split the ring into two at the duplicate vertex
                        let op3 = self.base.out_pt(op).prev;
                        let op4 = self.base.out_pt(op2).prev;
                        self.base.out_pt_mut(op).prev = op4;
                        self.base.out_pt_mut(op4).next = op;
                        self.base.out_pt_mut(op2).prev = op3;
                        self.base.out_pt_mut(op3).next = op2;

                        self.base.out_recs[out_rec].pts = Some(op);
                        let out_rec2 = self.base.create_out_rec();
                        self.base.out_recs[out_rec2].pts = Some(op2);
                        self.update_out_pt_idxs(out_rec2);

                        let poly1 = self.ring_to_path(op);
                        let poly2 = self.ring_to_path(op2);

                        if geom::poly2_contains_poly1(&poly2, &poly1) {
                            self.base.out_recs[out_rec2].is_hole = !self.base.out_recs[out_rec].is_hole;
                            self.base.out_recs[out_rec2].first_left = Some(out_rec);
                            if self.using_poly_tree {
                                self.fixup_first_lefts2(out_rec2, out_rec);
                            }
                        } else if geom::poly2_contains_poly1(&poly1, &poly2) {
                            self.base.out_recs[out_rec2].is_hole = self.base.out_recs[out_rec].is_hole;
                            self.base.out_recs[out_rec].is_hole = !self.base.out_recs[out_rec2].is_hole;
                            self.base.out_recs[out_rec2].first_left = self.base.out_recs[out_rec].first_left;
                            self.base.out_recs[out_rec].first_left = Some(out_rec2);
                            if self.using_poly_tree {
                                self.fixup_first_lefts2(out_rec, out_rec2);
                            }
                        } else {
                            self.base.out_recs[out_rec2].is_hole = self.base.out_recs[out_rec].is_hole;
                            self.base.out_recs[out_rec2].first_left = self.base.out_recs[out_rec].first_left;
                            if self.using_poly_tree {
                                self.fixup_first_lefts1(out_rec, out_rec2);
                            }
                        }
                        op2 = op; // ready for the next iteration
                    }
                    op2 = self.base.out_pt(op2).next;
                }
                op = self.base.out_pt(op).next;
                if op == self.base.out_recs[out_rec].pts.unwrap() {
                    break;
                }
            }
        }
        Ok(())
    }

    pub(crate) fn fixup_out_polyline(&mut self, out_rec: OutRecIdx) {
        let Some(start) = self.base.out_recs[out_rec].pts else { return };
        let mut pp = start;
        let mut last_pp = self.base.out_pt(pp).prev;
        while pp != last_pp {
            pp = self.base.out_pt(pp).next;
            let prev = self.base.out_pt(pp).prev;
            if self.base.out_pt(pp).pt == self.base.out_pt(prev).pt {
                if pp == last_pp {
                    last_pp = prev;
                }
                let next = self.base.out_pt(pp).next;
                self.base.out_pt_mut(prev).next = next;
                self.base.out_pt_mut(next).prev = prev;
                pp = prev;
            }
        }
        if pp == self.base.out_pt(pp).prev {
            self.base.out_recs[out_rec].pts = None;
        }
    }

    pub(crate) fn fixup_out_polygon(&mut self, out_rec: OutRecIdx) {
        self.base.out_recs[out_rec].bottom_pt = None;
        let Some(start) = self.base.out_recs[out_rec].pts else { return };
        let preserve_col = self.base.preserve_collinear || self.strictly_simple();
        let mut last_ok: Option<OutPtIdx> = None;
        let mut pp = start;
        loop {
            let prev = self.base.out_pt(pp).prev;
            let next = self.base.out_pt(pp).next;
            if prev == pp || prev == next {
                self.base.out_recs[out_rec].pts = None;
                return;
            }

            let (prev_pt, pp_pt, next_pt) =
                (self.base.out_pt(prev).pt, self.base.out_pt(pp).pt, self.base.out_pt(next).pt);
            let dup_or_collinear = pp_pt == next_pt
                || pp_pt == prev_pt
                || (geom::slopes_equal3(prev_pt, pp_pt, next_pt, self.base.use_full_range)
                    && (!preserve_col || !geom::pt2_is_between_pt1_and_pt3(prev_pt, pp_pt, next_pt)));

            if dup_or_collinear {
                last_ok = None;
                self.base.out_pt_mut(prev).next = next;
                self.base.out_pt_mut(next).prev = prev;
                pp = prev;
            } else if Some(pp) == last_ok {
                break;
            } else {
                if last_ok.is_none() {
                    last_ok = Some(pp);
                }
                pp = next;
            }
        }
        self.base.out_recs[out_rec].pts = Some(pp);
    }

    fn parse_first_left(&self, mut first_left: Option<OutRecIdx>) -> Option<OutRecIdx> {
        while let Some(fl) = first_left {
            if self.base.out_recs[fl].pts.is_some() {
                break;
            }
            first_left = self.base.out_recs[fl].first_left;
        }
        first_left
    }

    /// Tests whether `new_out_rec` contains `old_out_rec`'s dependents
    /// before reassigning their `first_left`.
    fn fixup_first_lefts1(&mut self, old_out_rec: OutRecIdx, new_out_rec: OutRecIdx) {
        for i in 0..self.base.out_recs.len() {
            let first_left = self.parse_first_left(self.base.out_recs[i].first_left);
            if self.base.out_recs[i].pts.is_none() || first_left != Some(old_out_rec) {
                continue;
            }
            let poly_i = self.ring_to_path(self.base.out_recs[i].pts.unwrap());
            let poly_new = self.ring_to_path(self.base.out_recs[new_out_rec].pts.unwrap());
            if geom::poly2_contains_poly1(&poly_i, &poly_new) {
                self.base.out_recs[i].first_left = Some(new_out_rec);
            }
        }
    }

    /// A ring split into two such that one is now inner to the other;
    /// re-checks every dependent of the outer ring's old container in case
    /// it's actually become inner to the new inner ring.
    fn fixup_first_lefts2(&mut self, inner_out_rec: OutRecIdx, outer_out_rec: OutRecIdx) {
        let orfl = self.base.out_recs[outer_out_rec].first_left;
        for i in 0..self.base.out_recs.len() {
            if self.base.out_recs[i].pts.is_none() || i == outer_out_rec || i == inner_out_rec {
                continue;
            }
            let first_left = self.parse_first_left(self.base.out_recs[i].first_left);
            if first_left != orfl && first_left != Some(inner_out_rec) && first_left != Some(outer_out_rec) {
                continue;
            }
            let poly_i = self.ring_to_path(self.base.out_recs[i].pts.unwrap());
            let poly_inner = self.ring_to_path(self.base.out_recs[inner_out_rec].pts.unwrap());
            if geom::poly2_contains_poly1(&poly_i, &poly_inner) {
                self.base.out_recs[i].first_left = Some(inner_out_rec);
                continue;
            }
            let poly_outer = self.ring_to_path(self.base.out_recs[outer_out_rec].pts.unwrap());
            if geom::poly2_contains_poly1(&poly_i, &poly_outer) {
                self.base.out_recs[i].first_left = Some(outer_out_rec);
            } else if self.base.out_recs[i].first_left == Some(inner_out_rec)
                || self.base.out_recs[i].first_left == Some(outer_out_rec)
            {
                self.base.out_recs[i].first_left = orfl;
            }
        }
    }

    /// Reassigns `first_left` without testing containment — used when two
    /// rings are known to have just been merged into one.
    fn fixup_first_lefts3(&mut self, old_out_rec: OutRecIdx, new_out_rec: OutRecIdx) {
        for i in 0..self.base.out_recs.len() {
            let first_left = self.parse_first_left(self.base.out_recs[i].first_left);
            if self.base.out_recs[i].pts.is_some() && first_left == Some(old_out_rec) {
                self.base.out_recs[i].first_left = Some(new_out_rec);
            }
        }
    }
}
