//! Scanbeam intersection ordering: building the intersect list, resolving
//! adjacency order, and replaying it against the AEL.
//!
//! Grounded in `clipper_v1::mod::Clipper::{BuildIntersectList,
//! FixupIntersectionOrder, EdgesAdjacent, ProcessIntersectList,
//! ProcessIntersections, IntersectPoint}` from the reference port. Per §9,
//! an unresolvable intersection order surfaces as
//! [`ClipError::IntersectionOrderUnresolvable`] instead of the source's
//! silent `return false`.

use crate::clipper::Clipper;
use crate::consts::CInt;
use crate::edge::EdgeIdx;
use crate::error::{ClipError, Result};
use crate::geom::IntPoint;
use crate::sweep::IntersectNode;

impl Clipper {
    fn intersect_point(&self, e1: EdgeIdx, e2: EdgeIdx) -> IntPoint {
        let (dx1, dx2) = (self.base.e(e1).dx, self.base.e(e2).dx);
        let mut x;
        let mut y;

        if dx1 == dx2 {
            y = self.base.e(e1).curr.y;
            x = self.base.top_x(e1, y);
        } else if self.base.e(e1).delta.x == 0 {
            x = self.base.e(e1).bot.x;
            if self.base.e(e2).is_horizontal() {
                y = self.base.e(e2).bot.y;
            } else {
                let b2 = self.base.e(e2).bot.y as f64 - (self.base.e(e2).bot.x as f64 / dx2);
                y = (x as f64 / dx2 + b2).round() as CInt;
            }
        } else if self.base.e(e2).delta.x == 0 {
            x = self.base.e(e2).bot.x;
            if self.base.e(e1).is_horizontal() {
                y = self.base.e(e1).bot.y;
            } else {
                let b1 = self.base.e(e1).bot.y as f64 - (self.base.e(e1).bot.x as f64 / dx1);
                y = (x as f64 / dx1 + b1).round() as CInt;
            }
        } else {
            let b1 = self.base.e(e1).bot.x as f64 - self.base.e(e1).bot.y as f64 * dx1;
            let b2 = self.base.e(e2).bot.x as f64 - self.base.e(e2).bot.y as f64 * dx2;
            let q = (b2 - b1) / (dx1 - dx2);
            y = q.round() as CInt;
            x = if dx1.abs() < dx2.abs() {
                (dx1 * q + b1).round() as CInt
            } else {
                (dx2 * q + b2).round() as CInt
            };
        }

        let (top1, top2) = (self.base.e(e1).top, self.base.e(e2).top);
        if y < top1.y || y < top2.y {
            y = top1.y.max(top2.y);
            x = if dx1.abs() < dx2.abs() {
                self.base.top_x(e1, y)
            } else {
                self.base.top_x(e2, y)
            };
        }

        let curr1 = self.base.e(e1).curr.y;
        if y > curr1 {
            y = curr1;
            x = if dx1.abs() > dx2.abs() {
                self.base.top_x(e2, y)
            } else {
                self.base.top_x(e1, y)
            };
        }

        let mut pt = IntPoint::new(x, y);
        #[cfg(feature = "usingz")]
        self.set_z(&mut pt, e1, e2);
        pt
    }

    /// Populates `pt.z` from the configured callback at a non-vertex
    /// crossing; a no-op if no callback was set.
    #[cfg(feature = "usingz")]
    fn set_z(&mut self, pt: &mut IntPoint, e1: EdgeIdx, e2: EdgeIdx) {
        if pt.z != 0 {
            return;
        }
        let (e1_bot, e1_top) = (self.base.e(e1).bot, self.base.e(e1).top);
        let (e2_bot, e2_top) = (self.base.e(e2).bot, self.base.e(e2).top);
        if let Some(cb) = self.zfill.as_mut() {
            pt.z = cb(e1_bot, e1_top, e2_bot, e2_top);
        }
    }

    fn build_intersect_list(&mut self, top_y: CInt) {
        self.intersect_list.clear();
        let Some(mut e) = self.base.active_edges else { return };
        self.sorted_edges = Some(e);
        loop {
            self.base.e_mut(e).prev_in_sel = self.base.e(e).prev_in_ael;
            self.base.e_mut(e).next_in_sel = self.base.e(e).next_in_ael;
            let x = self.base.top_x(e, top_y);
            self.base.e_mut(e).curr.x = x;
            match self.base.e(e).next_in_ael {
                Some(n) => e = n,
                None => break,
            }
        }

        let mut modified = true;
        while modified && self.sorted_edges.is_some() {
            modified = false;
            let mut e = self.sorted_edges.unwrap();
            loop {
                let Some(e_next) = self.base.e(e).next_in_sel else { break };
                if self.base.e(e).curr.x > self.base.e(e_next).curr.x {
                    let mut pt = self.intersect_point(e, e_next);
                    if pt.y < top_y {
                        pt = IntPoint::new(self.base.top_x(e, top_y), top_y);
                    }
                    self.intersect_list.push(IntersectNode { edge1: e, edge2: e_next, pt });
                    self.swap_positions_in_sel(e, e_next);
                    modified = true;
                } else {
                    e = e_next;
                }
            }
            match self.base.e(e).prev_in_sel {
                Some(p) => self.base.e_mut(p).next_in_sel = None,
                None => break,
            }
        }
        self.sorted_edges = None;
    }

    fn edges_adjacent(&self, node: &IntersectNode) -> bool {
        self.base.e(node.edge1).next_in_sel == Some(node.edge2)
            || self.base.e(node.edge1).prev_in_sel == Some(node.edge2)
    }

    /// `Ok(false)` means the intersect list couldn't be ordered into a
    /// sequence of adjacent swaps; the caller surfaces this as
    /// [`ClipError::IntersectionOrderUnresolvable`].
    fn fixup_intersection_order(&mut self) -> bool {
        self.intersect_list.sort_by(|a, b| b.pt.y.cmp(&a.pt.y));
        self.copy_ael_to_sel();

        let cnt = self.intersect_list.len();
        let mut i = 0;
        while i < cnt {
            if !self.edges_adjacent(&self.intersect_list[i]) {
                let mut j = i + 1;
                while j < cnt && !self.edges_adjacent(&self.intersect_list[j]) {
                    j += 1;
                }
                if j == cnt {
                    return false;
                }
                self.intersect_list.swap(i, j);
            }
            let (e1, e2) = (self.intersect_list[i].edge1, self.intersect_list[i].edge2);
            self.swap_positions_in_sel(e1, e2);
            i += 1;
        }
        true
    }

    fn process_intersect_list(&mut self) -> Result<()> {
        for i in 0..self.intersect_list.len() {
            let (e1, e2, pt) = {
                let n = &self.intersect_list[i];
                (n.edge1, n.edge2, n.pt)
            };
            self.intersect_edges(e1, e2, pt)?;
            self.base.swap_positions_in_ael(e1, e2);
        }
        self.intersect_list.clear();
        Ok(())
    }

    pub(crate) fn process_intersections(&mut self, top_y: CInt) -> Result<bool> {
        if self.base.active_edges.is_none() {
            return Ok(true);
        }
        self.build_intersect_list(top_y);
        if self.intersect_list.is_empty() {
            return Ok(true);
        }
        if self.intersect_list.len() == 1 || self.fixup_intersection_order() {
            self.process_intersect_list()?;
        } else {
            self.sorted_edges = None;
            self.intersect_list.clear();
            return Err(ClipError::IntersectionOrderUnresolvable);
        }
        self.sorted_edges = None;
        Ok(true)
    }
}
