//! `ClipperBase`: path ingestion, the edge arena, and AEL primitives shared
//! between clip operations.
//!
//! Grounded in `clipper_v1::clipper_base` from the reference port. Composed
//! into [`crate::clipper::Clipper`] rather than used via inheritance (§9
//! design note "Polymorphism ClipperBase→Clipper").

use crate::consts::{CInt, HI_RANGE, LO_RANGE};
use crate::edge::{EdgeIdx, TEdge, SKIP, UNASSIGNED};
use crate::error::{ClipError, Result};
use crate::geom::{self, IntPoint, IntRect, Path, Paths};
use crate::output::{OutPt, OutPtIdx, OutRec, OutRecIdx};
use crate::sweep::{LocalMinima, LocalMinimaList, ScanbeamQueue};
use crate::types::{EdgeSide, PolyType};

#[derive(Debug, Default)]
pub(crate) struct ClipperBase {
    pub edges: Vec<TEdge>,
    pub use_full_range: bool,
    pub has_open_paths: bool,
    pub preserve_collinear: bool,
    pub minima_list: LocalMinimaList,
    pub scanbeam: ScanbeamQueue,
    pub active_edges: Option<EdgeIdx>,
    pub out_recs: Vec<OutRec>,
    pub out_pts: Vec<OutPt>,
}

impl ClipperBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.use_full_range = false;
        self.has_open_paths = false;
        self.minima_list.clear();
        self.scanbeam.clear();
        self.active_edges = None;
        self.out_recs.clear();
        self.out_pts.clear();
    }

    // -- edge arena accessors -------------------------------------------------

    #[inline]
    pub fn e(&self, i: EdgeIdx) -> &TEdge {
        &self.edges[i]
    }
    #[inline]
    pub fn e_mut(&mut self, i: EdgeIdx) -> &mut TEdge {
        &mut self.edges[i]
    }

    fn push_edge(&mut self) -> EdgeIdx {
        self.edges.push(TEdge::new());
        self.edges.len() - 1
    }

    fn slopes_equal3(&self, p1: IntPoint, p2: IntPoint, p3: IntPoint) -> bool {
        geom::slopes_equal3(p1, p2, p3, self.use_full_range)
    }

    /// `false` signals `InputOverflow` (§7): the coordinate exceeds
    /// `HI_RANGE` even in 128-bit-safe mode. Callers fail the whole
    /// `add_path` by returning `Ok(false)` rather than an error — this
    /// mirrors the source's non-fatal "silently reject this path" contract.
    fn range_test(&mut self, pt: IntPoint) -> bool {
        if self.use_full_range {
            pt.x.abs() <= HI_RANGE && pt.y.abs() <= HI_RANGE
        } else if pt.x.abs() > LO_RANGE || pt.y.abs() > LO_RANGE {
            if pt.x.abs() > HI_RANGE || pt.y.abs() > HI_RANGE {
                false
            } else {
                self.use_full_range = true;
                true
            }
        } else {
            true
        }
    }

    fn init_edge(&mut self, e_idx: EdgeIdx, e_next: EdgeIdx, e_prev: EdgeIdx, pt: IntPoint) {
        self.e_mut(e_idx).next = Some(e_next);
        self.e_mut(e_idx).prev = Some(e_prev);
        self.e_mut(e_idx).curr = pt;
        self.e_mut(e_idx).out_idx = UNASSIGNED;
    }

    fn init_edge2(&mut self, e_idx: EdgeIdx, poly_type: PolyType) {
        if self.e(e_idx).curr.y >= self.e(self.e(e_idx).next.unwrap()).curr.y {
            self.e_mut(e_idx).bot = self.e(e_idx).curr;
            let top = self.e(self.e(e_idx).next.unwrap()).curr;
            self.e_mut(e_idx).top = top;
        } else {
            self.e_mut(e_idx).top = self.e(e_idx).curr;
            let bot = self.e(self.e(e_idx).next.unwrap()).curr;
            self.e_mut(e_idx).bot = bot;
        }
        self.set_dx(e_idx);
        self.e_mut(e_idx).poly_typ = poly_type;
    }

    fn set_dx(&mut self, e_idx: EdgeIdx) {
        let e = self.e(e_idx);
        let delta = IntPoint::new(e.top.x - e.bot.x, e.top.y - e.bot.y);
        let dx = if delta.y == 0 {
            crate::consts::HORIZONTAL
        } else {
            delta.x as f64 / delta.y as f64
        };
        let em = self.e_mut(e_idx);
        em.delta = delta;
        em.dx = dx;
    }

    fn is_horizontal(&self, e_idx: EdgeIdx) -> bool {
        self.e(e_idx).delta.y == 0
    }

    fn remove_edge(&mut self, e_idx: EdgeIdx) -> EdgeIdx {
        let prev = self.e(e_idx).prev.unwrap();
        let next = self.e(e_idx).next.unwrap();
        self.e_mut(prev).next = Some(next);
        self.e_mut(next).prev = Some(prev);
        next
    }

    fn reverse_horizontal(&mut self, e_idx: EdgeIdx) {
        let e = self.e_mut(e_idx);
        std::mem::swap(&mut e.top.x, &mut e.bot.x);
        #[cfg(feature = "usingz")]
        std::mem::swap(&mut e.top.z, &mut e.bot.z);
    }

    fn pt2_is_between_pt1_and_pt3(&self, pt1: IntPoint, pt2: IntPoint, pt3: IntPoint) -> bool {
        geom::pt2_is_between_pt1_and_pt3(pt1, pt2, pt3)
    }

    // -- path ingestion --------------------------------------------------------

    /// Adds one path. Returns `Ok(false)` when the path degenerates (too few
    /// distinct vertices after dedup) — mirrors the source's boolean
    /// "was anything added" contract rather than treating this as an error.
    pub fn add_path(&mut self, pg: &Path, poly_type: PolyType, closed: bool) -> Result<bool> {
        let mut high_i = pg.len() as isize - 1;
        if closed {
            while high_i > 0 && pg[high_i as usize] == pg[0] {
                high_i -= 1;
            }
        }
        while high_i > 0 && pg[high_i as usize] == pg[(high_i - 1) as usize] {
            high_i -= 1;
        }
        if (closed && high_i < 2) || (!closed && high_i < 1) {
            return Ok(false);
        }
        let high_i = high_i as usize;

        let base = self.edges.len();
        for _ in 0..=high_i {
            self.push_edge();
        }
        let idx = |i: usize| base + i;

        self.e_mut(idx(1)).curr = pg[1];
        if !self.range_test(pg[0]) || !self.range_test(pg[high_i]) {
            self.edges.truncate(base);
            return Ok(false);
        }
        self.init_edge(idx(0), idx(1), idx(high_i), pg[0]);
        self.init_edge(idx(high_i), idx(0), idx(high_i - 1), pg[high_i]);
        for i in (1..high_i).rev() {
            if !self.range_test(pg[i]) {
                self.edges.truncate(base);
                return Ok(false);
            }
            self.init_edge(idx(i), idx(i + 1), idx(i - 1), pg[i]);
        }

        let mut e_start = idx(0);
        let mut e = e_start;
        let mut e_loop_stop = e_start;
        loop {
            let next = self.e(e).next.unwrap();
            if self.e(e).curr == self.e(next).curr && (closed || next != e_start) {
                if e == next {
                    break;
                }
                if e == e_start {
                    e_start = next;
                }
                e = self.remove_edge(e);
                e_loop_stop = e;
                continue;
            }
            let prev = self.e(e).prev.unwrap();
            if prev == next {
                break;
            }
            if closed
                && self.slopes_equal3(self.e(prev).curr, self.e(e).curr, self.e(next).curr)
                && (!self.preserve_collinear
                    || !self.pt2_is_between_pt1_and_pt3(
                        self.e(prev).curr,
                        self.e(e).curr,
                        self.e(next).curr,
                    ))
            {
                if e == e_start {
                    e_start = next;
                }
                e = self.remove_edge(e);
                e = self.e(e).prev.unwrap();
                e_loop_stop = e;
                continue;
            }
            e = self.e(e).next.unwrap();
            if e == e_loop_stop {
                break;
            }
        }

        let next_of_e = self.e(e).next.unwrap();
        let prev_of_e = self.e(e).prev.unwrap();
        if (!closed && e == next_of_e) || (closed && prev_of_e == next_of_e) {
            return Ok(false);
        }

        if !closed {
            self.has_open_paths = true;
            let prev = self.e(e_start).prev.unwrap();
            self.e_mut(prev).out_idx = SKIP;
        }

        // stage 2: Dx/Bot/Top for every edge in the ring
        let mut is_flat = true;
        let start_y = {
            self.init_edge2(e_start, poly_type);
            self.e(e_start).curr.y
        };
        e = self.e(e_start).next.unwrap();
        while e != e_start {
            self.init_edge2(e, poly_type);
            if is_flat && self.e(e).curr.y != start_y {
                is_flat = false;
            }
            e = self.e(e).next.unwrap();
        }

        if is_flat {
            if closed {
                return Ok(false);
            }
            let prev = self.e(e).prev.unwrap();
            self.e_mut(prev).out_idx = SKIP;
            let loc_min = LocalMinima {
                y: self.e(e).bot.y,
                left_bound: None,
                right_bound: Some(e),
            };
            self.e_mut(e).side = EdgeSide::Right;
            self.e_mut(e).wind_delta = 0;
            loop {
                let prev_top = self.e(self.e(e).prev.unwrap()).top.x;
                if self.e(e).bot.x != prev_top {
                    self.reverse_horizontal(e);
                }
                let next = self.e(e).next.unwrap();
                if self.e(next).out_idx == SKIP {
                    break;
                }
                self.e_mut(e).next_in_lml = Some(next);
                e = next;
            }
            self.minima_list.push(loc_min);
            return Ok(true);
        }

        let mut left_bound_is_forward;
        let mut e_min: Option<EdgeIdx> = None;

        if self.e(self.e(e).prev.unwrap()).bot == self.e(self.e(e).prev.unwrap()).top {
            e = self.e(e).next.unwrap();
        }

        loop {
            e = self.find_next_loc_min(e);
            if Some(e) == e_min {
                break;
            } else if e_min.is_none() {
                e_min = Some(e);
            }

            let prev = self.e(e).prev.unwrap();
            let (left, right): (EdgeIdx, EdgeIdx);
            if self.e(e).dx < self.e(prev).dx {
                left = prev;
                right = e;
                left_bound_is_forward = false;
            } else {
                left = e;
                right = prev;
                left_bound_is_forward = true;
            }
            self.e_mut(left).side = EdgeSide::Left;
            self.e_mut(right).side = EdgeSide::Right;

            if !closed {
                self.e_mut(left).wind_delta = 0;
            } else if self.e(left).next == Some(right) {
                self.e_mut(left).wind_delta = -1;
            } else {
                self.e_mut(left).wind_delta = 1;
            }
            self.e_mut(right).wind_delta = -self.e(left).wind_delta;

            let y = self.e(left).bot.y;
            let mut result_left = self.process_bound(left, left_bound_is_forward);
            if self.e(result_left).out_idx == SKIP {
                result_left = self.process_bound(result_left, left_bound_is_forward);
            }
            let mut result_right = self.process_bound(right, !left_bound_is_forward);
            if self.e(result_right).out_idx == SKIP {
                result_right = self.process_bound(result_right, !left_bound_is_forward);
            }

            let mut lm_left = Some(left);
            let mut lm_right = Some(right);
            if self.e(left).out_idx == SKIP {
                lm_left = None;
            } else if self.e(right).out_idx == SKIP {
                lm_right = None;
            }
            self.minima_list.push(LocalMinima { y, left_bound: lm_left, right_bound: lm_right });
            e = if !left_bound_is_forward { result_right } else { result_left };
        }
        Ok(true)
    }

    pub fn add_paths(&mut self, paths: &Paths, poly_type: PolyType, closed: bool) -> Result<bool> {
        let mut result = false;
        for p in paths {
            if self.add_path(p, poly_type, closed)? {
                result = true;
            }
        }
        Ok(result)
    }

    fn find_next_loc_min(&mut self, mut e: EdgeIdx) -> EdgeIdx {
        loop {
            loop {
                let prev = self.e(e).prev.unwrap();
                if self.e(e).bot == self.e(prev).bot && self.e(e).curr != self.e(e).top {
                    break;
                }
                e = self.e(e).next.unwrap();
            }
            let prev = self.e(e).prev.unwrap();
            if !self.is_horizontal(e) && !self.is_horizontal(prev) {
                return e;
            }
            while self.is_horizontal(self.e(e).prev.unwrap()) {
                e = self.e(e).prev.unwrap();
            }
            let e2 = e;
            while self.is_horizontal(e) {
                e = self.e(e).next.unwrap();
            }
            let prev = self.e(e).prev.unwrap();
            if self.e(e).top.y == self.e(prev).bot.y {
                continue;
            }
            let e2_prev = self.e(e2).prev.unwrap();
            if self.e(e2_prev).bot.x < self.e(e).bot.x {
                e = e2;
            }
            return e;
        }
    }

    fn process_bound(&mut self, e_in: EdgeIdx, left_bound_is_forward: bool) -> EdgeIdx {
        let mut result = e_in;
        let mut e = e_in;

        if self.e(result).out_idx == SKIP {
            if left_bound_is_forward {
                while self.e(e).top.y == self.e(self.e(e).next.unwrap()).bot.y {
                    e = self.e(e).next.unwrap();
                }
                while e != result && self.is_horizontal(e) {
                    e = self.e(e).prev.unwrap();
                }
            } else {
                while self.e(e).top.y == self.e(self.e(e).prev.unwrap()).bot.y {
                    e = self.e(e).prev.unwrap();
                }
                while e != result && self.is_horizontal(e) {
                    e = self.e(e).next.unwrap();
                }
            }
            if e == result {
                result = if left_bound_is_forward {
                    self.e(e).next.unwrap()
                } else {
                    self.e(e).prev.unwrap()
                };
            } else {
                e = if left_bound_is_forward {
                    self.e(result).next.unwrap()
                } else {
                    self.e(result).prev.unwrap()
                };
                let y = self.e(e).bot.y;
                self.e_mut(e).wind_delta = 0;
                result = self.process_bound(e, left_bound_is_forward);
                self.minima_list.push(LocalMinima { y, left_bound: None, right_bound: Some(e) });
            }
            return result;
        }

        let e_start;
        if self.is_horizontal(e) {
            e_start = if left_bound_is_forward {
                self.e(e).prev.unwrap()
            } else {
                self.e(e).next.unwrap()
            };
            if self.is_horizontal(e_start) {
                let a = self.e(e_start).bot.x != self.e(e).bot.x;
                let b = self.e(e_start).top.x != self.e(e).bot.x;
                if a && b {
                    self.reverse_horizontal(e);
                }
            } else if self.e(e_start).bot.x != self.e(e).bot.x {
                self.reverse_horizontal(e);
            }
        } else {
            e_start = e;
        }

        if left_bound_is_forward {
            while self.e(result).top.y == self.e(self.e(result).next.unwrap()).bot.y
                && self.e(self.e(result).next.unwrap()).out_idx != SKIP
            {
                result = self.e(result).next.unwrap();
            }
            if self.is_horizontal(result) && self.e(self.e(result).next.unwrap()).out_idx != SKIP {
                let mut horz = result;
                while self.is_horizontal(self.e(horz).prev.unwrap()) {
                    horz = self.e(horz).prev.unwrap();
                }
                let horz_prev = self.e(horz).prev.unwrap();
                let result_next = self.e(result).next.unwrap();
                if self.e(horz_prev).top.x > self.e(result_next).top.x {
                    result = horz_prev;
                }
            }
            while e != result {
                let next = self.e(e).next.unwrap();
                self.e_mut(e).next_in_lml = Some(next);
                if self.is_horizontal(e) && e != e_start && self.e(e).bot.x != self.e(self.e(e).prev.unwrap()).top.x {
                    self.reverse_horizontal(e);
                }
                e = next;
            }
            if self.is_horizontal(e) && e != e_start && self.e(e).bot.x != self.e(self.e(e).prev.unwrap()).top.x {
                self.reverse_horizontal(e);
            }
            result = self.e(result).next.unwrap();
        } else {
            while self.e(result).top.y == self.e(self.e(result).prev.unwrap()).bot.y
                && self.e(self.e(result).prev.unwrap()).out_idx != SKIP
            {
                result = self.e(result).prev.unwrap();
            }
            if self.is_horizontal(result) && self.e(self.e(result).prev.unwrap()).out_idx != SKIP {
                let mut horz = result;
                while self.is_horizontal(self.e(horz).next.unwrap()) {
                    horz = self.e(horz).next.unwrap();
                }
                let horz_next = self.e(horz).next.unwrap();
                let result_prev = self.e(result).prev.unwrap();
                if self.e(horz_next).top.x == self.e(result_prev).top.x
                    || self.e(horz_next).top.x > self.e(result_prev).top.x
                {
                    result = horz_next;
                }
            }
            while e != result {
                let prev = self.e(e).prev.unwrap();
                self.e_mut(e).next_in_lml = Some(prev);
                if self.is_horizontal(e) && e != e_start && self.e(e).bot.x != self.e(self.e(e).next.unwrap()).top.x {
                    self.reverse_horizontal(e);
                }
                e = prev;
            }
            if self.is_horizontal(e) && e != e_start && self.e(e).bot.x != self.e(self.e(e).next.unwrap()).top.x {
                self.reverse_horizontal(e);
            }
            result = self.e(result).prev.unwrap();
        }
        result
    }

    // -- reset / scanbeam ------------------------------------------------------

    pub fn reset(&mut self) {
        self.minima_list.sort_descending();
        self.minima_list.reset_cursor();
        self.scanbeam.clear();
        for lm in self.minima_list_items() {
            self.scanbeam.insert(lm.y);
            if let Some(left) = lm.left_bound {
                self.e_mut(left).curr = self.e(left).bot;
                self.e_mut(left).side = EdgeSide::Left;
                self.e_mut(left).out_idx = UNASSIGNED;
            }
            if let Some(right) = lm.right_bound {
                self.e_mut(right).curr = self.e(right).bot;
                self.e_mut(right).side = EdgeSide::Right;
                self.e_mut(right).out_idx = UNASSIGNED;
            }
        }
        self.active_edges = None;
        self.minima_list.reset_cursor();
    }

    fn minima_list_items(&self) -> Vec<LocalMinima> {
        // small helper: the list is only ever a few hundred entries for
        // realistic inputs, so a clone here (once, per reset) is cheap
        // relative to the sweep itself.
        self.minima_list.clone_items()
    }

    pub fn insert_scanbeam(&mut self, y: CInt) {
        self.scanbeam.insert(y);
    }

    pub fn pop_scanbeam(&mut self) -> Option<CInt> {
        self.scanbeam.pop()
    }

    pub fn local_minima_pending(&self) -> bool {
        self.minima_list.pending()
    }

    // -- out rec arena -----------------------------------------------------

    pub fn create_out_rec(&mut self) -> OutRecIdx {
        let idx = self.out_recs.len();
        self.out_recs.push(OutRec::new(idx));
        idx
    }

    /// Disjoint-set find with path compression: merged OutRecs have their
    /// `idx` field redirected at the surviving record.
    pub fn get_out_rec(&mut self, idx: OutRecIdx) -> OutRecIdx {
        let mut root = idx;
        while root != self.out_recs[root].idx {
            root = self.out_recs[root].idx;
        }
        let mut cur = idx;
        while cur != root {
            let next = self.out_recs[cur].idx;
            self.out_recs[cur].idx = root;
            cur = next;
        }
        root
    }

    pub fn out_pt(&self, i: OutPtIdx) -> &OutPt {
        &self.out_pts[i]
    }
    pub fn out_pt_mut(&mut self, i: OutPtIdx) -> &mut OutPt {
        &mut self.out_pts[i]
    }
    pub fn new_out_pt(&mut self, idx: i32, pt: IntPoint) -> OutPtIdx {
        let i = self.out_pts.len();
        self.out_pts.push(OutPt { idx, pt, next: i, prev: i });
        i
    }

    // -- AEL maintenance -----------------------------------------------------

    pub fn insert_edge_into_ael(&mut self, edge: EdgeIdx, start_edge: Option<EdgeIdx>) {
        match (self.active_edges, start_edge) {
            (None, _) => {
                self.e_mut(edge).prev_in_ael = None;
                self.e_mut(edge).next_in_ael = None;
                self.active_edges = Some(edge);
            }
            (Some(_), None) if self.e2_inserts_before_e1(self.active_edges.unwrap(), edge) => {
                self.e_mut(edge).prev_in_ael = None;
                self.e_mut(edge).next_in_ael = self.active_edges;
                let head = self.active_edges.unwrap();
                self.e_mut(head).prev_in_ael = Some(edge);
                self.active_edges = Some(edge);
            }
            _ => {
                let mut start = start_edge.unwrap_or(self.active_edges.unwrap());
                while let Some(next) = self.e(start).next_in_ael {
                    if !self.e2_inserts_before_e1(next, edge) {
                        break;
                    }
                    start = next;
                }
                let next_of_start = self.e(start).next_in_ael;
                self.e_mut(edge).next_in_ael = next_of_start;
                if let Some(n) = next_of_start {
                    self.e_mut(n).prev_in_ael = Some(edge);
                }
                self.e_mut(edge).prev_in_ael = Some(start);
                self.e_mut(start).next_in_ael = Some(edge);
            }
        }
    }

    fn e2_inserts_before_e1(&self, e1: EdgeIdx, e2: EdgeIdx) -> bool {
        if self.e(e2).curr.x == self.e(e1).curr.x {
            if self.e(e2).top.y > self.e(e1).top.y {
                self.top_x(e2, self.e(e1).top.y) < self.e(e1).top.x
            } else {
                self.top_x(e1, self.e(e2).top.y) > self.e(e2).top.x
            }
        } else {
            self.e(e2).curr.x < self.e(e1).curr.x
        }
    }

    pub fn top_x(&self, edge: EdgeIdx, curr_y: CInt) -> CInt {
        let e = self.e(edge);
        if curr_y == e.top.y {
            e.top.x
        } else {
            e.bot.x + (e.dx * (curr_y - e.bot.y) as f64).round() as CInt
        }
    }

    pub fn delete_from_ael(&mut self, edge: EdgeIdx) {
        let prev = self.e(edge).prev_in_ael;
        let next = self.e(edge).next_in_ael;
        if prev.is_none() && next.is_none() && self.active_edges != Some(edge) {
            return; // already removed
        }
        match prev {
            Some(p) => self.e_mut(p).next_in_ael = next,
            None => self.active_edges = next,
        }
        if let Some(n) = next {
            self.e_mut(n).prev_in_ael = prev;
        }
        self.e_mut(edge).next_in_ael = None;
        self.e_mut(edge).prev_in_ael = None;
    }

    pub fn swap_positions_in_ael(&mut self, e1: EdgeIdx, e2: EdgeIdx) {
        if self.e(e1).next_in_ael == Some(e2) {
            let next = self.e(e2).next_in_ael;
            self.e_mut(e1).next_in_ael = next;
            if let Some(n) = next {
                self.e_mut(n).prev_in_ael = Some(e1);
            }
            let prev = self.e(e1).prev_in_ael;
            self.e_mut(e2).prev_in_ael = prev;
            if let Some(p) = prev {
                self.e_mut(p).next_in_ael = Some(e2);
            }
            self.e_mut(e2).next_in_ael = Some(e1);
            self.e_mut(e1).prev_in_ael = Some(e2);
        } else if self.e(e2).next_in_ael == Some(e1) {
            let next = self.e(e1).next_in_ael;
            self.e_mut(e2).next_in_ael = next;
            if let Some(n) = next {
                self.e_mut(n).prev_in_ael = Some(e2);
            }
            let prev = self.e(e2).prev_in_ael;
            self.e_mut(e1).prev_in_ael = prev;
            if let Some(p) = prev {
                self.e_mut(p).next_in_ael = Some(e1);
            }
            self.e_mut(e1).next_in_ael = Some(e2);
            self.e_mut(e2).prev_in_ael = Some(e1);
        } else {
            let next1 = self.e(e1).next_in_ael;
            let prev1 = self.e(e1).prev_in_ael;
            let next2 = self.e(e2).next_in_ael;
            let prev2 = self.e(e2).prev_in_ael;
            self.e_mut(e1).next_in_ael = next2;
            if let Some(n) = next2 {
                self.e_mut(n).prev_in_ael = Some(e1);
            }
            self.e_mut(e1).prev_in_ael = prev2;
            if let Some(p) = prev2 {
                self.e_mut(p).next_in_ael = Some(e1);
            }
            self.e_mut(e2).next_in_ael = next1;
            if let Some(n) = next1 {
                self.e_mut(n).prev_in_ael = Some(e2);
            }
            self.e_mut(e2).prev_in_ael = prev1;
            if let Some(p) = prev1 {
                self.e_mut(p).next_in_ael = Some(e2);
            }
        }
        if self.active_edges == Some(e1) {
            self.active_edges = Some(e2);
        } else if self.active_edges == Some(e2) {
            self.active_edges = Some(e1);
        }
    }

    pub fn update_edge_into_ael(&mut self, edge: EdgeIdx) -> Result<EdgeIdx> {
        let next_in_lml = self.e(edge).next_in_lml.ok_or_else(|| {
            ClipError::InternalInvariantViolation("UpdateEdgeIntoAEL: no next edge".to_string())
        })?;
        let prev_ael = self.e(edge).prev_in_ael;
        let next_ael = self.e(edge).next_in_ael;
        self.e_mut(next_in_lml).out_idx = self.e(edge).out_idx;
        match prev_ael {
            Some(p) => self.e_mut(p).next_in_ael = Some(next_in_lml),
            None => self.active_edges = Some(next_in_lml),
        }
        if let Some(n) = next_ael {
            self.e_mut(n).prev_in_ael = Some(next_in_lml);
        }
        self.e_mut(next_in_lml).prev_in_ael = prev_ael;
        self.e_mut(next_in_lml).next_in_ael = next_ael;
        self.e_mut(next_in_lml).side = self.e(edge).side;
        self.e_mut(next_in_lml).wind_delta = self.e(edge).wind_delta;
        self.e_mut(next_in_lml).wind_cnt = self.e(edge).wind_cnt;
        self.e_mut(next_in_lml).wind_cnt2 = self.e(edge).wind_cnt2;
        self.e_mut(next_in_lml).curr = self.e(next_in_lml).bot;
        if !self.is_horizontal(next_in_lml) {
            self.scanbeam.insert(self.e(next_in_lml).top.y);
        }
        Ok(next_in_lml)
    }

    pub fn get_bounds(&self) -> IntRect {
        if self.edges.is_empty() {
            return IntRect::new(0, 0, 0, 0);
        }
        let mut result = IntRect::new(CInt::MAX, CInt::MIN, CInt::MIN, CInt::MAX);
        for e in &self.edges {
            result.left = result.left.min(e.bot.x).min(e.top.x);
            result.right = result.right.max(e.bot.x).max(e.top.x);
            result.top = result.top.max(e.bot.y).max(e.top.y);
            result.bottom = result.bottom.min(e.bot.y).min(e.top.y);
        }
        result
    }
}
