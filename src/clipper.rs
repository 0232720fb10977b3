//! The `Clipper` engine: execute-loop driver and public API surface.
//!
//! Grounded in `clipper_v1::mod::Clipper` from the reference port. Per §9
//! design notes, this is a single parameterized type (no `ClipperEx`
//! duplicate — the Z payload is gated by the `usingz` feature) and
//! `ClipperBase` is composed in rather than inherited from.

use crate::base::ClipperBase;
use crate::edge::{EdgeIdx, UNASSIGNED};
use crate::error::{ClipError, Result};
use crate::geom::{self, IntPoint, Path, Paths};
use crate::output::{Join, OutRecIdx, PolyTree};
use crate::sweep::{IntersectNode, MaximaList};
use crate::types::{ClipType, PolyFillType, PolyType};

/// Init-option flags for [`Clipper::with_options`], mirroring the source's
/// `ioReverseSolution`/`ioStrictlySimple`/`ioPreserveCollinear` bit flags.
pub const REVERSE_SOLUTION: i32 = 1;
pub const STRICTLY_SIMPLE: i32 = 2;
pub const PRESERVE_COLLINEAR: i32 = 4;

pub struct Clipper {
    pub(crate) base: ClipperBase,
    pub(crate) clip_type: ClipType,
    pub(crate) subj_fill_type: PolyFillType,
    pub(crate) clip_fill_type: PolyFillType,
    pub(crate) maxima: MaximaList,
    pub(crate) sorted_edges: Option<EdgeIdx>,
    pub(crate) intersect_list: Vec<IntersectNode>,
    execute_locked: bool,
    pub(crate) joins: Vec<Join>,
    pub(crate) ghost_joins: Vec<Join>,
    pub(crate) using_poly_tree: bool,
    reverse_solution: bool,
    strictly_simple: bool,
    #[cfg(feature = "usingz")]
    pub(crate) zfill: Option<Box<dyn FnMut(IntPoint, IntPoint, IntPoint, IntPoint) -> crate::consts::CInt>>,
}

impl Clipper {
    pub fn new() -> Self {
        Self::with_options(0)
    }

    pub fn with_options(init_options: i32) -> Self {
        let mut base = ClipperBase::new();
        base.preserve_collinear = (init_options & PRESERVE_COLLINEAR) != 0;
        Self {
            base,
            clip_type: ClipType::Intersection,
            subj_fill_type: PolyFillType::EvenOdd,
            clip_fill_type: PolyFillType::EvenOdd,
            maxima: MaximaList::default(),
            sorted_edges: None,
            intersect_list: Vec::new(),
            execute_locked: false,
            joins: Default::default(),
            ghost_joins: Default::default(),
            using_poly_tree: false,
            reverse_solution: (init_options & REVERSE_SOLUTION) != 0,
            strictly_simple: (init_options & STRICTLY_SIMPLE) != 0,
            #[cfg(feature = "usingz")]
            zfill: None,
        }
    }

    pub fn reverse_solution(&self) -> bool {
        self.reverse_solution
    }
    pub fn set_reverse_solution(&mut self, v: bool) {
        self.reverse_solution = v;
    }
    pub fn strictly_simple(&self) -> bool {
        self.strictly_simple
    }
    pub fn set_strictly_simple(&mut self, v: bool) {
        self.strictly_simple = v;
    }
    pub fn preserve_collinear(&self) -> bool {
        self.base.preserve_collinear
    }
    pub fn set_preserve_collinear(&mut self, v: bool) {
        self.base.preserve_collinear = v;
    }

    #[cfg(feature = "usingz")]
    pub fn set_zfill_function(
        &mut self,
        cb: impl FnMut(IntPoint, IntPoint, IntPoint, IntPoint) -> crate::consts::CInt + 'static,
    ) {
        self.zfill = Some(Box::new(cb));
    }

    pub fn add_path(&mut self, path: &Path, poly_type: PolyType, closed: bool) -> Result<bool> {
        self.base.add_path(path, poly_type, closed)
    }

    pub fn add_paths(&mut self, paths: &Paths, poly_type: PolyType, closed: bool) -> Result<bool> {
        self.base.add_paths(paths, poly_type, closed)
    }

    pub fn clear(&mut self) {
        self.base.clear();
        self.maxima.clear();
        self.sorted_edges = None;
        self.intersect_list.clear();
        self.joins.clear();
        self.ghost_joins.clear();
    }

    /// Runs the boolean operation, returning the result as flat `Paths`.
    /// Fails with [`ClipError::OpenPathWithPathsOutput`] if any open path was
    /// added (use [`Clipper::execute_poly_tree`] for open-path output).
    pub fn execute(
        &mut self,
        clip_type: ClipType,
        subj_fill_type: PolyFillType,
        clip_fill_type: PolyFillType,
    ) -> Result<Paths> {
        if self.execute_locked {
            return Err(ClipError::ExecuteReentry);
        }
        if self.base.has_open_paths {
            return Err(ClipError::OpenPathWithPathsOutput);
        }
        self.execute_locked = true;
        self.subj_fill_type = subj_fill_type;
        self.clip_fill_type = clip_fill_type;
        self.clip_type = clip_type;
        self.using_poly_tree = false;

        let result = self.execute_internal().and_then(|succeeded| {
            if succeeded {
                Ok(self.build_result())
            } else {
                Ok(Vec::new())
            }
        });

        self.dispose_all_poly_pts();
        self.execute_locked = false;
        result
    }

    pub fn execute_poly_tree(
        &mut self,
        clip_type: ClipType,
        subj_fill_type: PolyFillType,
        clip_fill_type: PolyFillType,
    ) -> Result<PolyTree> {
        if self.execute_locked {
            return Err(ClipError::ExecuteReentry);
        }
        self.execute_locked = true;
        self.subj_fill_type = subj_fill_type;
        self.clip_fill_type = clip_fill_type;
        self.clip_type = clip_type;
        self.using_poly_tree = true;

        let result = self.execute_internal().map(|succeeded| {
            if succeeded {
                self.build_result_poly_tree()
            } else {
                PolyTree::new()
            }
        });

        self.dispose_all_poly_pts();
        self.execute_locked = false;
        result
    }

    fn dispose_all_poly_pts(&mut self) {
        self.base.out_recs.clear();
        self.base.out_pts.clear();
    }

    fn execute_internal(&mut self) -> Result<bool> {
        self.base.reset();
        self.maxima.clear();
        self.base.out_recs.clear();
        self.base.out_pts.clear();

        if self.base.active_edges.is_none() && !self.base.local_minima_pending() {
            return Ok(true);
        }

        let Some(mut bot_y) = self.base.pop_scanbeam() else {
            return Ok(false);
        };
        self.insert_local_minima_into_ael(bot_y)?;

        loop {
            let top_y = match self.base.pop_scanbeam() {
                Some(y) => y,
                None if self.base.local_minima_pending() => bot_y,
                None => break,
            };

            self.process_horizontals()?;
            self.ghost_joins.clear();

            if !self.process_intersections(top_y)? {
                return Ok(false);
            }
            self.process_edges_at_top_of_scanbeam(top_y)?;
            bot_y = top_y;
            self.insert_local_minima_into_ael(bot_y)?;
        }

        // fix up orientations
        for idx in 0..self.base.out_recs.len() {
            let out_rec_idx = self.base.get_out_rec(idx);
            if out_rec_idx != idx {
                continue;
            }
            let Some(pts) = self.base.out_recs[idx].pts else { continue };
            let poly = self.ring_to_path(pts);
            let is_hole = self.base.out_recs[idx].is_hole;
            let area = geom::area(&poly);
            if (is_hole ^ self.reverse_solution) == (area > 0.0) {
                self.reverse_poly_pt_links(pts);
            }
        }

        self.join_common_edges()?;

        for idx in 0..self.base.out_recs.len() {
            let root = self.base.get_out_rec(idx);
            if root != idx {
                continue;
            }
            if let Some(pts) = self.base.out_recs[idx].pts {
                if self.base.out_recs[idx].is_open {
                    self.fixup_out_polyline(idx);
                } else {
                    self.fixup_out_polygon(idx);
                }
                let _ = pts;
            }
        }

        if self.strictly_simple {
            self.do_simple_polygons()?;
        }

        Ok(true)
    }

    pub(crate) fn ring_to_path(&self, start: crate::output::OutPtIdx) -> Path {
        let mut result = Vec::new();
        let mut p = start;
        loop {
            result.push(self.base.out_pt(p).pt);
            p = self.base.out_pt(p).next;
            if p == start {
                break;
            }
        }
        result
    }

    fn build_result(&mut self) -> Paths {
        let mut result = Vec::with_capacity(self.base.out_recs.len());
        for idx in 0..self.base.out_recs.len() {
            if self.base.get_out_rec(idx) != idx {
                continue;
            }
            let Some(pts) = self.base.out_recs[idx].pts else { continue };
            let poly = self.ring_to_path(pts);
            let min_len = if self.base.out_recs[idx].is_open { 2 } else { 3 };
            if poly.len() >= min_len {
                result.push(poly);
            }
        }
        result
    }

    fn build_result_poly_tree(&mut self) -> PolyTree {
        let mut tree = PolyTree::new();
        self.fix_hole_linkage_all();

        let mut rec_to_node: std::collections::HashMap<OutRecIdx, crate::output::PolyNodeIdx> =
            std::collections::HashMap::new();

        // Attach in an order such that a parent is always attached before
        // its children: repeatedly sweep until no progress, bounded by the
        // record count.
        let n = self.base.out_recs.len();
        let mut attached = vec![false; n];
        let mut progress = true;
        while progress {
            progress = false;
            for idx in 0..n {
                if attached[idx] || self.base.get_out_rec(idx) != idx {
                    continue;
                }
                let Some(pts) = self.base.out_recs[idx].pts else {
                    attached[idx] = true;
                    continue;
                };
                let min_len = if self.base.out_recs[idx].is_open { 2 } else { 3 };
                let poly = self.ring_to_path(pts);
                if poly.len() < min_len {
                    attached[idx] = true;
                    continue;
                }
                let parent_rec = self.base.out_recs[idx].first_left.map(|p| self.base.get_out_rec(p));
                let parent_node = match parent_rec {
                    None => Some(crate::output::POLY_TREE_ROOT),
                    Some(pr) => rec_to_node.get(&pr).copied(),
                };
                if let Some(parent_node) = parent_node {
                    let mut node = crate::output::PolyNode {
                        parent: None,
                        contour: poly,
                        childs: Vec::new(),
                        jointype: crate::types::JoinType::Square,
                        endtype: crate::types::EndType::ClosedPolygon,
                        is_open: self.base.out_recs[idx].is_open,
                    };
                    node.contour.reverse(); // Prev-direction, per §4.9
                    let new_idx = tree.add_node(parent_node, node);
                    rec_to_node.insert(idx, new_idx);
                    attached[idx] = true;
                    progress = true;
                }
            }
        }
        tree
    }

    fn fix_hole_linkage_all(&mut self) {
        for idx in 0..self.base.out_recs.len() {
            if self.base.get_out_rec(idx) != idx {
                continue;
            }
            self.fix_hole_linkage(idx);
        }
    }

    fn fix_hole_linkage(&mut self, idx: OutRecIdx) {
        // climb FirstLeft until it points at a real ring of opposite
        // hole-state, per §4.9.
        let is_hole = self.base.out_recs[idx].is_hole;
        let mut fl = self.base.out_recs[idx].first_left;
        loop {
            match fl {
                None => break,
                Some(f) => {
                    let f = self.base.get_out_rec(f);
                    let f_rec = &self.base.out_recs[f];
                    if f_rec.pts.is_some() && f_rec.is_hole != is_hole {
                        break;
                    }
                    fl = f_rec.first_left;
                    if fl == Some(f) {
                        fl = None;
                        break;
                    }
                }
            }
        }
        self.base.out_recs[idx].first_left = fl;
    }
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new()
    }
}
