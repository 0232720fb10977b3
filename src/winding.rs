//! Winding-count propagation, fill-rule contribution tests, and SEL
//! (sorted-edge-list) maintenance.
//!
//! Grounded in `clipper_v1::mod::Clipper::{is_contributing, set_winding_count,
//! add_edge_to_sel, pop_edge_from_sel, copy_ael_to_sel, swap_positions_in_sel,
//! delete_from_sel, insert_local_minima_into_ael}` from the reference port,
//! converted from `Rc<RefCell<TEdge>>` links to `EdgeIdx` arena indices.

use crate::clipper::Clipper;
use crate::edge::EdgeIdx;
use crate::error::Result;
use crate::types::{PolyFillType, PolyType};

impl Clipper {
    pub(crate) fn is_even_odd_fill_type(&self, edge: EdgeIdx) -> bool {
        if self.base.e(edge).poly_typ == PolyType::Subject {
            self.subj_fill_type == PolyFillType::EvenOdd
        } else {
            self.clip_fill_type == PolyFillType::EvenOdd
        }
    }

    pub(crate) fn is_even_odd_alt_fill_type(&self, edge: EdgeIdx) -> bool {
        if self.base.e(edge).poly_typ == PolyType::Subject {
            self.clip_fill_type == PolyFillType::EvenOdd
        } else {
            self.subj_fill_type == PolyFillType::EvenOdd
        }
    }

    pub(crate) fn is_contributing(&self, edge: EdgeIdx) -> bool {
        let e = self.base.e(edge);
        let (pft, pft2) = if e.poly_typ == PolyType::Subject {
            (self.subj_fill_type, self.clip_fill_type)
        } else {
            (self.clip_fill_type, self.subj_fill_type)
        };

        match pft {
            PolyFillType::EvenOdd => {
                if e.wind_delta == 0 && e.wind_cnt != 1 {
                    return false;
                }
            }
            PolyFillType::NonZero => {
                if e.wind_cnt.abs() != 1 {
                    return false;
                }
            }
            PolyFillType::Positive => {
                if e.wind_cnt != 1 {
                    return false;
                }
            }
            PolyFillType::Negative => {
                if e.wind_cnt != -1 {
                    return false;
                }
            }
        }

        match self.clip_type {
            crate::types::ClipType::Intersection => match pft2 {
                PolyFillType::EvenOdd | PolyFillType::NonZero => e.wind_cnt2 != 0,
                PolyFillType::Positive => e.wind_cnt2 > 0,
                PolyFillType::Negative => e.wind_cnt2 < 0,
            },
            crate::types::ClipType::Union => match pft2 {
                PolyFillType::EvenOdd | PolyFillType::NonZero => e.wind_cnt2 == 0,
                PolyFillType::Positive => e.wind_cnt2 <= 0,
                PolyFillType::Negative => e.wind_cnt2 >= 0,
            },
            crate::types::ClipType::Difference => {
                if e.poly_typ == PolyType::Subject {
                    match pft2 {
                        PolyFillType::EvenOdd | PolyFillType::NonZero => e.wind_cnt2 == 0,
                        PolyFillType::Positive => e.wind_cnt2 <= 0,
                        PolyFillType::Negative => e.wind_cnt2 >= 0,
                    }
                } else {
                    match pft2 {
                        PolyFillType::EvenOdd | PolyFillType::NonZero => e.wind_cnt2 != 0,
                        PolyFillType::Positive => e.wind_cnt2 > 0,
                        PolyFillType::Negative => e.wind_cnt2 < 0,
                    }
                }
            }
            crate::types::ClipType::Xor => {
                if e.wind_delta == 0 {
                    match pft2 {
                        PolyFillType::EvenOdd | PolyFillType::NonZero => e.wind_cnt2 == 0,
                        PolyFillType::Positive => e.wind_cnt2 <= 0,
                        PolyFillType::Negative => e.wind_cnt2 >= 0,
                    }
                } else {
                    true
                }
            }
        }
    }

    pub(crate) fn set_winding_count(&mut self, edge: EdgeIdx) {
        let poly_typ = self.base.e(edge).poly_typ;
        let mut e = self.base.e(edge).prev_in_ael;
        while let Some(cur) = e {
            if self.base.e(cur).poly_typ == poly_typ && self.base.e(cur).wind_delta != 0 {
                break;
            }
            e = self.base.e(cur).prev_in_ael;
        }

        let mut e2_cursor;
        match e {
            None => {
                let pft = if poly_typ == PolyType::Subject { self.subj_fill_type } else { self.clip_fill_type };
                let wind_delta = self.base.e(edge).wind_delta;
                self.base.e_mut(edge).wind_cnt = if wind_delta == 0 {
                    if pft == PolyFillType::Negative { -1 } else { 1 }
                } else {
                    wind_delta
                };
                self.base.e_mut(edge).wind_cnt2 = 0;
                e2_cursor = self.base.active_edges;
            }
            Some(prev) if self.base.e(edge).wind_delta == 0 && self.clip_type != crate::types::ClipType::Union => {
                self.base.e_mut(edge).wind_cnt = 1;
                self.base.e_mut(edge).wind_cnt2 = self.base.e(prev).wind_cnt2;
                e2_cursor = self.base.e(prev).next_in_ael;
            }
            Some(prev) if self.is_even_odd_fill_type(edge) => {
                if self.base.e(edge).wind_delta == 0 {
                    let mut inside = true;
                    let mut e2 = self.base.e(prev).prev_in_ael;
                    while let Some(cur) = e2 {
                        if self.base.e(cur).poly_typ == poly_typ && self.base.e(cur).wind_delta != 0 {
                            inside = !inside;
                        }
                        e2 = self.base.e(cur).prev_in_ael;
                    }
                    self.base.e_mut(edge).wind_cnt = if inside { 0 } else { 1 };
                } else {
                    self.base.e_mut(edge).wind_cnt = self.base.e(edge).wind_delta;
                }
                self.base.e_mut(edge).wind_cnt2 = self.base.e(prev).wind_cnt2;
                e2_cursor = self.base.e(prev).next_in_ael;
            }
            Some(prev) => {
                let (prev_wc, prev_delta) = (self.base.e(prev).wind_cnt, self.base.e(prev).wind_delta);
                let edge_delta = self.base.e(edge).wind_delta;
                if prev_wc * prev_delta < 0 {
                    if prev_wc.abs() > 1 {
                        if prev_delta * edge_delta < 0 {
                            self.base.e_mut(edge).wind_cnt = prev_wc;
                        } else {
                            self.base.e_mut(edge).wind_cnt = prev_wc + edge_delta;
                        }
                    } else {
                        self.base.e_mut(edge).wind_cnt = if edge_delta == 0 { 1 } else { edge_delta };
                    }
                } else {
                    if edge_delta == 0 {
                        self.base.e_mut(edge).wind_cnt = if prev_wc < 0 { prev_wc - 1 } else { prev_wc + 1 };
                    } else if prev_delta * edge_delta < 0 {
                        self.base.e_mut(edge).wind_cnt = prev_wc;
                    } else {
                        self.base.e_mut(edge).wind_cnt = prev_wc + edge_delta;
                    }
                }
                self.base.e_mut(edge).wind_cnt2 = self.base.e(prev).wind_cnt2;
                e2_cursor = self.base.e(prev).next_in_ael;
            }
        }

        if self.is_even_odd_alt_fill_type(edge) {
            while let Some(cur) = e2_cursor {
                if self.base.e(cur).poly_typ != poly_typ && self.base.e(cur).wind_delta != 0 {
                    let wc2 = self.base.e(edge).wind_cnt2;
                    self.base.e_mut(edge).wind_cnt2 = if wc2 == 0 { 1 } else { 0 };
                }
                e2_cursor = self.base.e(cur).next_in_ael;
            }
        } else {
            while let Some(cur) = e2_cursor {
                if self.base.e(cur).poly_typ != poly_typ && self.base.e(cur).wind_delta != 0 {
                    self.base.e_mut(edge).wind_cnt2 += self.base.e(cur).wind_delta;
                }
                e2_cursor = self.base.e(cur).next_in_ael;
            }
        }
    }

    // -- SEL maintenance -----------------------------------------------------

    pub(crate) fn add_edge_to_sel(&mut self, edge: EdgeIdx) {
        // Order within SEL doesn't matter for horizontal processing, so new
        // edges are always pushed to the front.
        match self.sorted_edges {
            None => {
                self.base.e_mut(edge).prev_in_sel = None;
                self.base.e_mut(edge).next_in_sel = None;
                self.sorted_edges = Some(edge);
            }
            Some(head) => {
                self.base.e_mut(edge).next_in_sel = Some(head);
                self.base.e_mut(edge).prev_in_sel = None;
                self.base.e_mut(head).prev_in_sel = Some(edge);
                self.sorted_edges = Some(edge);
            }
        }
    }

    pub(crate) fn pop_edge_from_sel(&mut self) -> Option<EdgeIdx> {
        let head = self.sorted_edges?;
        self.sorted_edges = self.base.e(head).next_in_sel;
        if let Some(next) = self.sorted_edges {
            self.base.e_mut(next).prev_in_sel = None;
        }
        self.base.e_mut(head).next_in_sel = None;
        self.base.e_mut(head).prev_in_sel = None;
        Some(head)
    }

    pub(crate) fn copy_ael_to_sel(&mut self) {
        let mut e = self.base.active_edges;
        self.sorted_edges = e;
        while let Some(edge) = e {
            self.base.e_mut(edge).prev_in_sel = self.base.e(edge).prev_in_ael;
            self.base.e_mut(edge).next_in_sel = self.base.e(edge).next_in_ael;
            e = self.base.e(edge).next_in_ael;
        }
    }

    pub(crate) fn swap_positions_in_sel(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        if self.base.e(e1).next_in_sel.is_none() && self.base.e(e1).prev_in_sel.is_none() {
            return;
        }
        if self.base.e(e2).next_in_sel.is_none() && self.base.e(e2).prev_in_sel.is_none() {
            return;
        }

        if self.base.e(e1).next_in_sel == Some(e2) {
            let next = self.base.e(e2).next_in_sel;
            self.base.e_mut(e1).next_in_sel = next;
            if let Some(n) = next {
                self.base.e_mut(n).prev_in_sel = Some(e1);
            }
            let prev = self.base.e(e1).prev_in_sel;
            self.base.e_mut(e2).prev_in_sel = prev;
            if let Some(p) = prev {
                self.base.e_mut(p).next_in_sel = Some(e2);
            }
            self.base.e_mut(e2).next_in_sel = Some(e1);
            self.base.e_mut(e1).prev_in_sel = Some(e2);
        } else if self.base.e(e2).next_in_sel == Some(e1) {
            let next = self.base.e(e1).next_in_sel;
            self.base.e_mut(e2).next_in_sel = next;
            if let Some(n) = next {
                self.base.e_mut(n).prev_in_sel = Some(e2);
            }
            let prev = self.base.e(e2).prev_in_sel;
            self.base.e_mut(e1).prev_in_sel = prev;
            if let Some(p) = prev {
                self.base.e_mut(p).next_in_sel = Some(e1);
            }
            self.base.e_mut(e1).next_in_sel = Some(e2);
            self.base.e_mut(e2).prev_in_sel = Some(e1);
        } else {
            let next1 = self.base.e(e1).next_in_sel;
            let prev1 = self.base.e(e1).prev_in_sel;
            let next2 = self.base.e(e2).next_in_sel;
            let prev2 = self.base.e(e2).prev_in_sel;
            self.base.e_mut(e1).next_in_sel = next2;
            if let Some(n) = next2 {
                self.base.e_mut(n).prev_in_sel = Some(e1);
            }
            self.base.e_mut(e1).prev_in_sel = prev2;
            if let Some(p) = prev2 {
                self.base.e_mut(p).next_in_sel = Some(e1);
            }
            self.base.e_mut(e2).next_in_sel = next1;
            if let Some(n) = next1 {
                self.base.e_mut(n).prev_in_sel = Some(e2);
            }
            self.base.e_mut(e2).prev_in_sel = prev1;
            if let Some(p) = prev1 {
                self.base.e_mut(p).next_in_sel = Some(e2);
            }
        }
        if self.sorted_edges == Some(e1) {
            self.sorted_edges = Some(e2);
        } else if self.sorted_edges == Some(e2) {
            self.sorted_edges = Some(e1);
        }
    }

    pub(crate) fn delete_from_sel(&mut self, edge: EdgeIdx) {
        let prev = self.base.e(edge).prev_in_sel;
        let next = self.base.e(edge).next_in_sel;
        if prev.is_none() && next.is_none() && self.sorted_edges != Some(edge) {
            return;
        }
        match prev {
            Some(p) => self.base.e_mut(p).next_in_sel = next,
            None => self.sorted_edges = next,
        }
        if let Some(n) = next {
            self.base.e_mut(n).prev_in_sel = prev;
        }
        self.base.e_mut(edge).next_in_sel = None;
        self.base.e_mut(edge).prev_in_sel = None;
    }

    // -- local minima ingestion into AEL --------------------------------------

    pub(crate) fn insert_local_minima_into_ael(&mut self, bot_y: crate::consts::CInt) -> Result<()> {
        while let Some(lm) = self.base.minima_list.pop_at(bot_y) {
            let lb = lm.left_bound;
            let rb = lm.right_bound;

            let mut op1 = None;
            match (lb, rb) {
                (None, Some(r)) => {
                    self.base.insert_edge_into_ael(r, None);
                    self.set_winding_count(r);
                    if self.is_contributing(r) {
                        op1 = Some(self.add_out_pt(r, self.base.e(r).bot));
                    }
                }
                (Some(l), None) => {
                    self.base.insert_edge_into_ael(l, None);
                    self.set_winding_count(l);
                    if self.is_contributing(l) {
                        op1 = Some(self.add_out_pt(l, self.base.e(l).bot));
                    }
                    self.base.insert_scanbeam(self.base.e(l).top.y);
                }
                (Some(l), Some(r)) => {
                    self.base.insert_edge_into_ael(l, None);
                    self.base.insert_edge_into_ael(r, Some(l));
                    self.set_winding_count(l);
                    let (wc, wc2) = (self.base.e(l).wind_cnt, self.base.e(l).wind_cnt2);
                    self.base.e_mut(r).wind_cnt = wc;
                    self.base.e_mut(r).wind_cnt2 = wc2;
                    if self.is_contributing(l) {
                        let bot = self.base.e(l).bot;
                        op1 = Some(self.add_local_min_poly(l, r, bot));
                    }
                    self.base.insert_scanbeam(self.base.e(l).top.y);
                }
                (None, None) => {}
            }

            if let Some(r) = rb {
                if self.base.e(r).is_horizontal() {
                    if let Some(next_in_lml) = self.base.e(r).next_in_lml {
                        self.base.insert_scanbeam(self.base.e(next_in_lml).top.y);
                    }
                    self.add_edge_to_sel(r);
                } else {
                    self.base.insert_scanbeam(self.base.e(r).top.y);
                }
            }

            let (Some(lb), Some(rb)) = (lb, rb) else { continue };
            let Some(op1) = op1 else { continue };

            if self.base.e(rb).is_horizontal() && !self.ghost_joins.is_empty() && self.base.e(rb).wind_delta != 0 {
                let (rb_bot_x, rb_top_x) = (self.base.e(rb).bot.x, self.base.e(rb).top.x);
                for j in 0..self.ghost_joins.len() {
                    let (out_pt1, off_pt) = (self.ghost_joins[j].out_pt1, self.ghost_joins[j].off_pt);
                    if self.horz_segments_overlap(self.base.out_pt(out_pt1).pt.x, off_pt.x, rb_bot_x, rb_top_x) {
                        self.add_join(out_pt1, Some(op1), off_pt);
                    }
                }
            }

            if self.base.e(lb).out_idx >= 0 {
                if let Some(prev) = self.base.e(lb).prev_in_ael {
                    let lb_bot = self.base.e(lb).bot;
                    if self.base.e(prev).curr.x == lb_bot.x
                        && self.base.e(prev).out_idx >= 0
                        && crate::geom::slopes_equal4(
                            self.base.e(prev).bot,
                            self.base.e(prev).top,
                            self.base.e(lb).bot,
                            self.base.e(lb).top,
                            self.base.use_full_range,
                        )
                        && self.base.e(lb).wind_delta != 0
                        && self.base.e(prev).wind_delta != 0
                    {
                        let op2 = self.add_out_pt(prev, lb_bot);
                        let lb_top = self.base.e(lb).top;
                        self.add_join(op1, Some(op2), lb_top);
                    }
                }
            }

            if self.base.e(lb).next_in_ael != Some(rb) {
                if self.base.e(rb).out_idx >= 0 {
                    if let Some(prev) = self.base.e(rb).prev_in_ael {
                        if self.base.e(prev).out_idx >= 0
                            && crate::geom::slopes_equal4(
                                self.base.e(prev).bot,
                                self.base.e(prev).top,
                                self.base.e(rb).bot,
                                self.base.e(rb).top,
                                self.base.use_full_range,
                            )
                            && self.base.e(rb).wind_delta != 0
                            && self.base.e(prev).wind_delta != 0
                        {
                            let rb_bot = self.base.e(rb).bot;
                            let op2 = self.add_out_pt(prev, rb_bot);
                            let rb_top = self.base.e(rb).top;
                            self.add_join(op1, Some(op2), rb_top);
                        }
                    }
                }

                let lb_curr = self.base.e(lb).curr;
                let mut e = self.base.e(lb).next_in_ael;
                while let Some(cur) = e {
                    if cur == rb {
                        break;
                    }
                    self.intersect_edges(rb, cur, lb_curr)?;
                    e = self.base.e(cur).next_in_ael;
                }
            }
        }
        Ok(())
    }
}
