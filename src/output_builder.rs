//! Output-ring construction: the §4.5/§4.8 edge/point bookkeeping that turns
//! AEL state transitions into `OutPt` rings, plus the small geometric
//! helpers (`FirstIsBottomPt`, `GetBottomPt`, `GetLowermostRec`,
//! `OutRec1RightOfOutRec2`) that `append_polygon` and `join_common_edges`
//! (see `join.rs`) need to decide hole/first-left state.
//!
//! Grounded in `clipper_v1::mod::Clipper::{AddOutPt, GetLastOutPt,
//! AddLocalMinPoly, AddLocalMaxPoly, SetHoleState, HorzSegmentsOverlap,
//! AddJoin, AppendPolygon, ReversePolyPtLinks, SwapSides, SwapPolyIndexes,
//! FirstIsBottomPt, GetBottomPt, GetLowermostRec, OutRec1RightOfOutRec2,
//! IntersectEdges}` from the reference port, converted from
//! `Rc<RefCell<TEdge>>`/`Rc<RefCell<OutPt>>` links to arena indices.

use crate::clipper::Clipper;
use crate::edge::EdgeIdx;
use crate::error::Result;
use crate::geom::{self, IntPoint};
use crate::output::{OutPtIdx, OutRecIdx};
use crate::types::{ClipType, EdgeSide, PolyFillType, PolyType};

impl Clipper {
    pub(crate) fn add_out_pt(&mut self, e: EdgeIdx, pt: IntPoint) -> OutPtIdx {
        let to_front = self.base.e(e).side == EdgeSide::Left;
        if self.base.e(e).out_idx < 0 {
            let out_rec = self.base.create_out_rec();
            self.base.out_recs[out_rec].is_open = self.base.e(e).wind_delta == 0;
            let new_op = self.base.new_out_pt(out_rec as i32, pt);
            self.base.out_recs[out_rec].pts = Some(new_op);
            if !self.base.out_recs[out_rec].is_open {
                self.set_hole_state(e, out_rec);
            }
            self.base.e_mut(e).out_idx = out_rec as i32;
            new_op
        } else {
            let out_rec = self.base.get_out_rec(self.base.e(e).out_idx as usize);
            // `pts` is the left-most point, `pts.prev` the right-most.
            let op = self.base.out_recs[out_rec].pts.unwrap();
            if to_front && pt == self.base.out_pt(op).pt {
                return op;
            }
            let op_prev = self.base.out_pt(op).prev;
            if !to_front && pt == self.base.out_pt(op_prev).pt {
                return op_prev;
            }

            let new_op = self.base.new_out_pt(out_rec as i32, pt);
            self.base.out_pt_mut(new_op).next = op;
            self.base.out_pt_mut(new_op).prev = op_prev;
            self.base.out_pt_mut(op_prev).next = new_op;
            self.base.out_pt_mut(op).prev = new_op;
            if to_front {
                self.base.out_recs[out_rec].pts = Some(new_op);
            }
            new_op
        }
    }

    pub(crate) fn get_last_out_pt(&mut self, e: EdgeIdx) -> OutPtIdx {
        let out_rec = self.base.get_out_rec(self.base.e(e).out_idx as usize);
        let pts = self.base.out_recs[out_rec].pts.unwrap();
        if self.base.e(e).side == EdgeSide::Left {
            pts
        } else {
            self.base.out_pt(pts).prev
        }
    }

    pub(crate) fn add_local_min_poly(&mut self, e1: EdgeIdx, e2: EdgeIdx, pt: IntPoint) -> OutPtIdx {
        let (result, e, prev_e);
        if self.base.e(e2).is_horizontal() || self.base.e(e1).dx > self.base.e(e2).dx {
            result = self.add_out_pt(e1, pt);
            self.base.e_mut(e2).out_idx = self.base.e(e1).out_idx;
            self.base.e_mut(e1).side = EdgeSide::Left;
            self.base.e_mut(e2).side = EdgeSide::Right;
            e = e1;
            prev_e = if self.base.e(e).prev_in_ael == Some(e2) {
                self.base.e(e2).prev_in_ael
            } else {
                self.base.e(e).prev_in_ael
            };
        } else {
            result = self.add_out_pt(e2, pt);
            self.base.e_mut(e1).out_idx = self.base.e(e2).out_idx;
            self.base.e_mut(e1).side = EdgeSide::Right;
            self.base.e_mut(e2).side = EdgeSide::Left;
            e = e2;
            prev_e = if self.base.e(e).prev_in_ael == Some(e1) {
                self.base.e(e1).prev_in_ael
            } else {
                self.base.e(e).prev_in_ael
            };
        }

        if let Some(prev_e) = prev_e {
            if self.base.e(prev_e).out_idx >= 0
                && self.base.top_x(prev_e, pt.y) == self.base.top_x(e, pt.y)
                && geom::slopes_equal4(
                    self.base.e(e).bot,
                    self.base.e(e).top,
                    self.base.e(prev_e).bot,
                    self.base.e(prev_e).top,
                    self.base.use_full_range,
                )
            {
                let out_pt = self.add_out_pt(prev_e, pt);
                let e_top = self.base.e(e).top;
                self.add_join(result, Some(out_pt), e_top);
            }
        }
        result
    }

    pub(crate) fn add_local_max_poly(&mut self, e1: EdgeIdx, e2: EdgeIdx, pt: IntPoint) {
        self.add_out_pt(e1, pt);
        if self.base.e(e2).wind_delta == 0 {
            self.add_out_pt(e2, pt);
        }
        if self.base.e(e1).out_idx == self.base.e(e2).out_idx {
            self.base.e_mut(e1).out_idx = crate::edge::UNASSIGNED;
            self.base.e_mut(e2).out_idx = crate::edge::UNASSIGNED;
        } else if self.base.e(e1).out_idx < self.base.e(e2).out_idx {
            self.append_polygon(e1, e2);
        } else {
            self.append_polygon(e2, e1);
        }
    }

    pub(crate) fn set_hole_state(&mut self, e: EdgeIdx, out_rec: OutRecIdx) {
        let mut e2 = self.base.e(e).prev_in_ael;
        let mut e_tmp: Option<EdgeIdx> = None;
        while let Some(cur) = e2 {
            if self.base.e(cur).out_idx >= 0 && self.base.e(cur).wind_delta != 0 {
                match e_tmp {
                    None => e_tmp = Some(cur),
                    Some(t) if self.base.e(t).out_idx == self.base.e(cur).out_idx => e_tmp = None,
                    _ => {}
                }
            }
            e2 = self.base.e(cur).prev_in_ael;
        }
        match e_tmp {
            None => {
                self.base.out_recs[out_rec].first_left = None;
                self.base.out_recs[out_rec].is_hole = false;
            }
            Some(e_tmp) => {
                let first_left = self.base.get_out_rec(self.base.e(e_tmp).out_idx as usize);
                self.base.out_recs[out_rec].first_left = Some(first_left);
                self.base.out_recs[out_rec].is_hole = !self.base.out_recs[first_left].is_hole;
            }
        }
    }

    pub(crate) fn horz_segments_overlap(
        &self,
        seg1a: crate::consts::CInt,
        seg1b: crate::consts::CInt,
        seg2a: crate::consts::CInt,
        seg2b: crate::consts::CInt,
    ) -> bool {
        let (seg1a, seg1b) = if seg1a > seg1b { (seg1b, seg1a) } else { (seg1a, seg1b) };
        let (seg2a, seg2b) = if seg2a > seg2b { (seg2b, seg2a) } else { (seg2a, seg2b) };
        seg1a < seg2b && seg2a < seg1b
    }

    pub(crate) fn add_join(&mut self, out_pt1: OutPtIdx, out_pt2: Option<OutPtIdx>, off_pt: IntPoint) {
        self.joins.push(crate::output::Join { out_pt1, out_pt2, off_pt });
    }

    fn get_dx(&self, pt1: IntPoint, pt2: IntPoint) -> f64 {
        if pt1.y == pt2.y {
            crate::consts::HORIZONTAL
        } else {
            (pt2.x - pt1.x) as f64 / (pt2.y - pt1.y) as f64
        }
    }

    /// Tie-break between two candidate bottom-most points of the same ring:
    /// compares the absolute slopes of their neighboring edges, falling back
    /// to orientation when both pairs of slopes match.
    pub(crate) fn first_is_bottom_pt(&self, btm_pt1: OutPtIdx, btm_pt2: OutPtIdx) -> bool {
        let pt1 = self.base.out_pt(btm_pt1).pt;
        let mut p = self.base.out_pt(btm_pt1).prev;
        while self.base.out_pt(p).pt == pt1 && p != btm_pt1 {
            p = self.base.out_pt(p).prev;
        }
        let dx1p = self.get_dx(pt1, self.base.out_pt(p).pt).abs();
        let mut p = self.base.out_pt(btm_pt1).next;
        while self.base.out_pt(p).pt == pt1 && p != btm_pt1 {
            p = self.base.out_pt(p).next;
        }
        let dx1n = self.get_dx(pt1, self.base.out_pt(p).pt).abs();

        let pt2 = self.base.out_pt(btm_pt2).pt;
        let mut p = self.base.out_pt(btm_pt2).prev;
        while self.base.out_pt(p).pt == pt2 && p != btm_pt2 {
            p = self.base.out_pt(p).prev;
        }
        let dx2p = self.get_dx(pt2, self.base.out_pt(p).pt).abs();
        let mut p = self.base.out_pt(btm_pt2).next;
        while self.base.out_pt(p).pt == pt2 && p != btm_pt2 {
            p = self.base.out_pt(p).next;
        }
        let dx2n = self.get_dx(pt2, self.base.out_pt(p).pt).abs();

        if dx1p.max(dx1n) == dx2p.max(dx2n) && dx1p.min(dx1n) == dx2p.min(dx2n) {
            geom::area(&self.ring_to_path(btm_pt1)) > 0.0
        } else {
            (dx1p >= dx2p && dx1p >= dx2n) || (dx1n >= dx2p && dx1n >= dx2n)
        }
    }

    pub(crate) fn get_bottom_pt(&mut self, start: OutPtIdx) -> OutPtIdx {
        let mut pp = start;
        let mut dups: Option<OutPtIdx> = None;
        let mut p = self.base.out_pt(pp).next;
        while p != pp {
            let p_pt = self.base.out_pt(p).pt;
            let pp_pt = self.base.out_pt(pp).pt;
            if p_pt.y > pp_pt.y {
                pp = p;
                dups = None;
            } else if p_pt.y == pp_pt.y && p_pt.x <= pp_pt.x {
                if p_pt.x < pp_pt.x {
                    dups = None;
                    pp = p;
                } else if self.base.out_pt(p).next != pp && self.base.out_pt(p).prev != pp {
                    dups = Some(p);
                }
            }
            p = self.base.out_pt(p).next;
        }
        if let Some(mut dups) = dups {
            while dups != p {
                if !self.first_is_bottom_pt(p, dups) {
                    pp = dups;
                }
                dups = self.base.out_pt(dups).next;
                while self.base.out_pt(dups).pt != self.base.out_pt(pp).pt {
                    dups = self.base.out_pt(dups).next;
                }
            }
        }
        pp
    }

    pub(crate) fn get_lowermost_rec(&mut self, out_rec1: OutRecIdx, out_rec2: OutRecIdx) -> OutRecIdx {
        if self.base.out_recs[out_rec1].bottom_pt.is_none() {
            let pts = self.base.out_recs[out_rec1].pts.unwrap();
            self.base.out_recs[out_rec1].bottom_pt = Some(self.get_bottom_pt(pts));
        }
        if self.base.out_recs[out_rec2].bottom_pt.is_none() {
            let pts = self.base.out_recs[out_rec2].pts.unwrap();
            self.base.out_recs[out_rec2].bottom_pt = Some(self.get_bottom_pt(pts));
        }
        let b_pt1 = self.base.out_recs[out_rec1].bottom_pt.unwrap();
        let b_pt2 = self.base.out_recs[out_rec2].bottom_pt.unwrap();
        let (pt1, pt2) = (self.base.out_pt(b_pt1).pt, self.base.out_pt(b_pt2).pt);

        if pt1.y > pt2.y {
            out_rec1
        } else if pt1.y < pt2.y {
            out_rec2
        } else if pt1.x < pt2.x {
            out_rec1
        } else if pt1.x > pt2.x {
            out_rec2
        } else if self.base.out_pt(b_pt1).next == b_pt1 {
            out_rec2
        } else if self.base.out_pt(b_pt2).next == b_pt2 {
            out_rec1
        } else if self.first_is_bottom_pt(b_pt1, b_pt2) {
            out_rec1
        } else {
            out_rec2
        }
    }

    pub(crate) fn out_rec1_right_of_out_rec2(&mut self, out_rec1: OutRecIdx, out_rec2: OutRecIdx) -> bool {
        let mut cur = self.base.out_recs[out_rec1].first_left;
        loop {
            match cur {
                None => return false,
                Some(c) => {
                    let c = self.base.get_out_rec(c);
                    if c == out_rec2 {
                        return true;
                    }
                    cur = self.base.out_recs[c].first_left;
                }
            }
        }
    }

    pub(crate) fn swap_sides(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        let side = self.base.e(e1).side;
        self.base.e_mut(e1).side = self.base.e(e2).side;
        self.base.e_mut(e2).side = side;
    }

    pub(crate) fn swap_poly_indexes(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        let out_idx = self.base.e(e1).out_idx;
        self.base.e_mut(e1).out_idx = self.base.e(e2).out_idx;
        self.base.e_mut(e2).out_idx = out_idx;
    }

    pub(crate) fn reverse_poly_pt_links(&mut self, pp: OutPtIdx) {
        let mut pp1 = pp;
        loop {
            let pp2 = self.base.out_pt(pp1).next;
            self.base.out_pt_mut(pp1).next = self.base.out_pt(pp1).prev;
            self.base.out_pt_mut(pp1).prev = pp2;
            pp1 = pp2;
            if pp1 == pp {
                break;
            }
        }
    }

    pub(crate) fn append_polygon(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        let out_rec1 = self.base.get_out_rec(self.base.e(e1).out_idx as usize);
        let out_rec2 = self.base.get_out_rec(self.base.e(e2).out_idx as usize);

        let hole_state_rec = if self.out_rec1_right_of_out_rec2(out_rec1, out_rec2) {
            out_rec2
        } else if self.out_rec1_right_of_out_rec2(out_rec2, out_rec1) {
            out_rec1
        } else {
            self.get_lowermost_rec(out_rec1, out_rec2)
        };

        let p1_lft = self.base.out_recs[out_rec1].pts.unwrap();
        let p1_rt = self.base.out_pt(p1_lft).prev;
        let p2_lft = self.base.out_recs[out_rec2].pts.unwrap();
        let p2_rt = self.base.out_pt(p2_lft).prev;

        let e1_side = self.base.e(e1).side;
        let e2_side = self.base.e(e2).side;

        if e1_side == EdgeSide::Left {
            if e2_side == EdgeSide::Left {
                // z y x a b c
                self.reverse_poly_pt_links(p2_lft);
                self.base.out_pt_mut(p2_lft).next = p1_lft;
                self.base.out_pt_mut(p1_lft).prev = p2_lft;
                self.base.out_pt_mut(p1_rt).next = p2_rt;
                self.base.out_pt_mut(p2_rt).prev = p1_rt;
                self.base.out_recs[out_rec1].pts = Some(p2_rt);
            } else {
                // x y z a b c
                self.base.out_pt_mut(p2_rt).next = p1_lft;
                self.base.out_pt_mut(p1_lft).prev = p2_rt;
                self.base.out_pt_mut(p2_lft).prev = p1_rt;
                self.base.out_pt_mut(p1_rt).next = p2_lft;
                self.base.out_recs[out_rec1].pts = Some(p2_lft);
            }
        } else if e2_side == EdgeSide::Right {
            // a b c z y x
            self.reverse_poly_pt_links(p2_lft);
            self.base.out_pt_mut(p1_rt).next = p2_rt;
            self.base.out_pt_mut(p2_rt).prev = p1_rt;
            self.base.out_pt_mut(p2_lft).next = p1_lft;
            self.base.out_pt_mut(p1_lft).prev = p2_lft;
        } else {
            // a b c x y z
            self.base.out_pt_mut(p1_rt).next = p2_lft;
            self.base.out_pt_mut(p2_lft).prev = p1_rt;
            self.base.out_pt_mut(p1_lft).prev = p2_rt;
            self.base.out_pt_mut(p2_rt).next = p1_lft;
        }

        self.base.out_recs[out_rec1].bottom_pt = None;
        if hole_state_rec == out_rec2 {
            if self.base.out_recs[out_rec2].first_left != Some(out_rec1) {
                self.base.out_recs[out_rec1].first_left = self.base.out_recs[out_rec2].first_left;
            }
            self.base.out_recs[out_rec1].is_hole = self.base.out_recs[out_rec2].is_hole;
        }
        self.base.out_recs[out_rec2].pts = None;
        self.base.out_recs[out_rec2].bottom_pt = None;
        self.base.out_recs[out_rec2].first_left = Some(out_rec1);

        let ok_idx = self.base.e(e1).out_idx;
        let obsolete_idx = self.base.e(e2).out_idx;

        self.base.e_mut(e1).out_idx = crate::edge::UNASSIGNED;
        self.base.e_mut(e2).out_idx = crate::edge::UNASSIGNED;

        let mut e = self.base.active_edges;
        while let Some(cur) = e {
            if self.base.e(cur).out_idx == obsolete_idx {
                self.base.e_mut(cur).out_idx = ok_idx;
                self.base.e_mut(cur).side = e1_side;
                break;
            }
            e = self.base.e(cur).next_in_ael;
        }
        self.base.out_recs[out_rec2].idx = out_rec1;
    }

    /// The central §4.5 state transition: updates winding counts for `e1`
    /// and `e2` crossing at `pt`, and emits/extends output rings per the
    /// active clip type and fill rules.
    pub(crate) fn intersect_edges(&mut self, e1: EdgeIdx, e2: EdgeIdx, pt: IntPoint) -> Result<()> {
        let e1_contributing = self.base.e(e1).out_idx >= 0;
        let e2_contributing = self.base.e(e2).out_idx >= 0;

        if self.base.e(e1).wind_delta == 0 || self.base.e(e2).wind_delta == 0 {
            if self.base.e(e1).wind_delta == 0 && self.base.e(e2).wind_delta == 0 {
                return Ok(());
            } else if self.base.e(e1).poly_typ == self.base.e(e2).poly_typ
                && self.base.e(e1).wind_delta != self.base.e(e2).wind_delta
                && self.clip_type == ClipType::Union
            {
                if self.base.e(e1).wind_delta == 0 {
                    if e2_contributing {
                        self.add_out_pt(e1, pt);
                        if e1_contributing {
                            self.base.e_mut(e1).out_idx = crate::edge::UNASSIGNED;
                        }
                    }
                } else if e1_contributing {
                    self.add_out_pt(e2, pt);
                    if e2_contributing {
                        self.base.e_mut(e2).out_idx = crate::edge::UNASSIGNED;
                    }
                }
            } else if self.base.e(e1).poly_typ != self.base.e(e2).poly_typ {
                if self.base.e(e1).wind_delta == 0
                    && self.base.e(e2).wind_cnt.abs() == 1
                    && (self.clip_type != ClipType::Union || self.base.e(e2).wind_cnt2 == 0)
                {
                    self.add_out_pt(e1, pt);
                    if e1_contributing {
                        self.base.e_mut(e1).out_idx = crate::edge::UNASSIGNED;
                    }
                } else if self.base.e(e2).wind_delta == 0
                    && self.base.e(e1).wind_cnt.abs() == 1
                    && (self.clip_type != ClipType::Union || self.base.e(e1).wind_cnt2 == 0)
                {
                    self.add_out_pt(e2, pt);
                    if e2_contributing {
                        self.base.e_mut(e2).out_idx = crate::edge::UNASSIGNED;
                    }
                }
            }
            return Ok(());
        }

        // update winding counts; assumes e1 is to the right of e2 above pt.
        if self.base.e(e1).poly_typ == self.base.e(e2).poly_typ {
            if self.is_even_odd_fill_type(e1) {
                let old_e1_wc = self.base.e(e1).wind_cnt;
                self.base.e_mut(e1).wind_cnt = self.base.e(e2).wind_cnt;
                self.base.e_mut(e2).wind_cnt = old_e1_wc;
            } else {
                let e2_delta = self.base.e(e2).wind_delta;
                if self.base.e(e1).wind_cnt + e2_delta == 0 {
                    self.base.e_mut(e1).wind_cnt = -self.base.e(e1).wind_cnt;
                } else {
                    self.base.e_mut(e1).wind_cnt += e2_delta;
                }
                let e1_delta = self.base.e(e1).wind_delta;
                if self.base.e(e2).wind_cnt - e1_delta == 0 {
                    self.base.e_mut(e2).wind_cnt = -self.base.e(e2).wind_cnt;
                } else {
                    self.base.e_mut(e2).wind_cnt -= e1_delta;
                }
            }
        } else {
            if !self.is_even_odd_fill_type(e2) {
                self.base.e_mut(e1).wind_cnt2 += self.base.e(e2).wind_delta;
            } else {
                self.base.e_mut(e1).wind_cnt2 = if self.base.e(e1).wind_cnt2 == 0 { 1 } else { 0 };
            }
            if !self.is_even_odd_fill_type(e1) {
                self.base.e_mut(e2).wind_cnt2 -= self.base.e(e1).wind_delta;
            } else {
                self.base.e_mut(e2).wind_cnt2 = if self.base.e(e2).wind_cnt2 == 0 { 1 } else { 0 };
            }
        }

        let (e1_fill_type, e1_fill_type2) = if self.base.e(e1).poly_typ == PolyType::Subject {
            (self.subj_fill_type, self.clip_fill_type)
        } else {
            (self.clip_fill_type, self.subj_fill_type)
        };
        let (e2_fill_type, e2_fill_type2) = if self.base.e(e2).poly_typ == PolyType::Subject {
            (self.subj_fill_type, self.clip_fill_type)
        } else {
            (self.clip_fill_type, self.subj_fill_type)
        };

        let e1_wc = match e1_fill_type {
            PolyFillType::Positive => self.base.e(e1).wind_cnt,
            PolyFillType::Negative => -self.base.e(e1).wind_cnt,
            _ => self.base.e(e1).wind_cnt.abs(),
        };
        let e2_wc = match e2_fill_type {
            PolyFillType::Positive => self.base.e(e2).wind_cnt,
            PolyFillType::Negative => -self.base.e(e2).wind_cnt,
            _ => self.base.e(e2).wind_cnt.abs(),
        };

        if e1_contributing && e2_contributing {
            if (e1_wc != 0 && e1_wc != 1)
                || (e2_wc != 0 && e2_wc != 1)
                || (self.base.e(e1).poly_typ != self.base.e(e2).poly_typ && self.clip_type != ClipType::Xor)
            {
                self.add_local_max_poly(e1, e2, pt);
            } else {
                self.add_out_pt(e1, pt);
                self.add_out_pt(e2, pt);
                self.swap_sides(e1, e2);
                self.swap_poly_indexes(e1, e2);
            }
        } else if e1_contributing {
            if e2_wc == 0 || e2_wc == 1 {
                self.add_out_pt(e1, pt);
                self.swap_sides(e1, e2);
                self.swap_poly_indexes(e1, e2);
            }
        } else if e2_contributing {
            if e1_wc == 0 || e1_wc == 1 {
                self.add_out_pt(e2, pt);
                self.swap_sides(e1, e2);
                self.swap_poly_indexes(e1, e2);
            }
        } else if (e1_wc == 0 || e1_wc == 1) && (e2_wc == 0 || e2_wc == 1) {
            let e1_wc2 = match e1_fill_type2 {
                PolyFillType::Positive => self.base.e(e1).wind_cnt2,
                PolyFillType::Negative => -self.base.e(e1).wind_cnt2,
                _ => self.base.e(e1).wind_cnt2.abs(),
            };
            let e2_wc2 = match e2_fill_type2 {
                PolyFillType::Positive => self.base.e(e2).wind_cnt2,
                PolyFillType::Negative => -self.base.e(e2).wind_cnt2,
                _ => self.base.e(e2).wind_cnt2.abs(),
            };

            if self.base.e(e1).poly_typ != self.base.e(e2).poly_typ {
                self.add_local_min_poly(e1, e2, pt);
            } else if e1_wc == 1 && e2_wc == 1 {
                match self.clip_type {
                    ClipType::Intersection => {
                        if e1_wc2 > 0 && e2_wc2 > 0 {
                            self.add_local_min_poly(e1, e2, pt);
                        }
                    }
                    ClipType::Union => {
                        if e1_wc2 <= 0 && e2_wc2 <= 0 {
                            self.add_local_min_poly(e1, e2, pt);
                        }
                    }
                    ClipType::Difference => {
                        let e1_is_clip = self.base.e(e1).poly_typ == PolyType::Clip;
                        if (e1_is_clip && e1_wc2 > 0 && e2_wc2 > 0)
                            || (!e1_is_clip && e1_wc2 <= 0 && e2_wc2 <= 0)
                        {
                            self.add_local_min_poly(e1, e2, pt);
                        }
                    }
                    ClipType::Xor => {
                        self.add_local_min_poly(e1, e2, pt);
                    }
                }
            } else {
                self.swap_sides(e1, e2);
            }
        }
        Ok(())
    }
}
