//! `ClipperOffset`: polygon inflate/deflate with miter/square/round joins
//! and butt/square/round/closed end caps (§6 offsetter contract).
//!
//! Grounded in `clipper_v1::clipper_offset::ClipperOffset` from the
//! reference port for the public shape (`new`/`add_path`/`add_paths`/
//! `execute`/`clear`), and in `ClipperOffsetEx::{AddPath, FixOrientations,
//! DoOffset, OffsetPoint, DoSquare, DoMiter, DoRound}` (`clip.cpp`) for the
//! join/cap geometry the reference port left as empty stubs (`DoSquare`/
//! `DoMiter`/`DoRound` bodies, and the dynamic arc-tolerance step count)
//! — see DESIGN.md.

use std::f64::consts::PI;

use crate::clipper::Clipper;
use crate::consts::CInt;
use crate::error::Result;
use crate::geom::{self, DoublePoint, IntPoint, Path, Paths};
use crate::output::{PolyTree, POLY_TREE_ROOT};
use crate::types::{ClipType, EndType, JoinType, PolyFillType, PolyType};

const TWO_PI: f64 = PI * 2.0;
const DEFAULT_ARC_TOLERANCE: f64 = 0.25;

struct OffsetNode {
    contour: Path,
    join_type: JoinType,
    end_type: EndType,
}

/// Offsets one or more paths by a signed delta. Closed polygons are
/// inflated (delta>0) or deflated (delta<0); open paths are always
/// "inflated" into a stroke outline whose width is `2*delta`.
pub struct ClipperOffset {
    nodes: Vec<OffsetNode>,
    /// `(node index, vertex index)` of the lowest (max-Y, then min-X)
    /// vertex seen among `ClosedPolygon` nodes — used by `fix_orientations`
    /// exactly as the source's `m_lowest`.
    lowest: Option<(usize, usize)>,
    pub miter_limit: f64,
    pub arc_tolerance: f64,

    // scratch state, rebuilt on every `execute` call.
    src_poly: Path,
    dest_poly: Path,
    dest_polys: Paths,
    normals: Vec<DoublePoint>,
    delta: f64,
    sin_a: f64,
    sin: f64,
    cos: f64,
    miter_lim: f64,
    steps_per_rad: f64,
}

impl ClipperOffset {
    pub fn new(miter_limit: f64, arc_tolerance: f64) -> Self {
        Self {
            nodes: Vec::new(),
            lowest: None,
            miter_limit,
            arc_tolerance,
            src_poly: Vec::new(),
            dest_poly: Vec::new(),
            dest_polys: Vec::new(),
            normals: Vec::new(),
            delta: 0.0,
            sin_a: 0.0,
            sin: 0.0,
            cos: 0.0,
            miter_lim: 0.0,
            steps_per_rad: 0.0,
        }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.lowest = None;
    }

    /// Adds one path. Strips adjacent duplicate vertices; a `ClosedPolygon`
    /// path with fewer than 3 distinct vertices is dropped.
    pub fn add_path(&mut self, path: &Path, join_type: JoinType, end_type: EndType) {
        if path.is_empty() {
            return;
        }
        let mut contour = Vec::with_capacity(path.len());
        contour.push(path[0]);
        let mut k = 0usize;
        for &pt in &path[1..] {
            if *contour.last().unwrap() != pt {
                contour.push(pt);
                let j = contour.len() - 1;
                if pt.y > contour[k].y || (pt.y == contour[k].y && pt.x < contour[k].x) {
                    k = j;
                }
            }
        }
        if end_type == EndType::ClosedPolygon && contour.len() < 3 {
            return;
        }

        let node_idx = self.nodes.len();
        if end_type == EndType::ClosedPolygon {
            let candidate = contour[k];
            let better = match self.lowest {
                None => true,
                Some((ni, ki)) => {
                    let prev = self.nodes[ni].contour[ki];
                    candidate.y > prev.y || (candidate.y == prev.y && candidate.x < prev.x)
                }
            };
            if better {
                self.lowest = Some((node_idx, k));
            }
        }
        self.nodes.push(OffsetNode { contour, join_type, end_type });
    }

    pub fn add_paths(&mut self, paths: &Paths, join_type: JoinType, end_type: EndType) {
        for path in paths {
            self.add_path(path, join_type, end_type);
        }
    }

    /// Runs the offset and feeds the raw shell into a fresh [`Clipper`]
    /// under `Union`/`Positive` (delta>0) to resolve self-overlap at
    /// concave corners, or under `Union`/`Negative` against an expanded
    /// bounding rectangle (delta<0) per §6.
    pub fn execute(&mut self, delta: f64) -> Result<Paths> {
        self.fix_orientations();
        self.do_offset(delta);

        let mut clipper = Clipper::new();
        clipper.add_paths(&self.dest_polys, PolyType::Subject, true)?;
        if delta > 0.0 {
            clipper.execute(ClipType::Union, PolyFillType::Positive, PolyFillType::Positive)
        } else {
            let outer = self.outer_rect(&clipper);
            clipper.add_path(&outer, PolyType::Subject, true)?;
            clipper.set_reverse_solution(true);
            let mut solution =
                clipper.execute(ClipType::Union, PolyFillType::Negative, PolyFillType::Negative)?;
            if !solution.is_empty() {
                solution.remove(0);
            }
            Ok(solution)
        }
    }

    pub fn execute_poly_tree(&mut self, delta: f64) -> Result<PolyTree> {
        self.fix_orientations();
        self.do_offset(delta);

        let mut clipper = Clipper::new();
        clipper.add_paths(&self.dest_polys, PolyType::Subject, true)?;
        if delta > 0.0 {
            clipper.execute_poly_tree(ClipType::Union, PolyFillType::Positive, PolyFillType::Positive)
        } else {
            let outer = self.outer_rect(&clipper);
            clipper.add_path(&outer, PolyType::Subject, true)?;
            clipper.set_reverse_solution(true);
            let mut tree =
                clipper.execute_poly_tree(ClipType::Union, PolyFillType::Negative, PolyFillType::Negative)?;
            discard_outer_rect_node(&mut tree);
            Ok(tree)
        }
    }

    fn outer_rect(&self, clipper: &Clipper) -> Path {
        let r = clipper.base.get_bounds();
        let pad: CInt = 10;
        vec![
            IntPoint::new(r.left - pad, r.bottom - pad),
            IntPoint::new(r.right + pad, r.bottom - pad),
            IntPoint::new(r.right + pad, r.top + pad),
            IntPoint::new(r.left - pad, r.top + pad),
        ]
    }

    /// Reverses any node whose orientation disagrees with the lowermost
    /// `ClosedPolygon` node (or, absent one, makes every `ClosedLine` node
    /// CCW) so concave/convex corners offset consistently.
    fn fix_orientations(&mut self) {
        match self.lowest {
            Some((ni, _)) if !geom::orientation(&self.nodes[ni].contour) => {
                for node in &mut self.nodes {
                    if node.end_type == EndType::ClosedPolygon
                        || (node.end_type == EndType::ClosedLine && geom::orientation(&node.contour))
                    {
                        node.contour.reverse();
                    }
                }
            }
            _ => {
                for node in &mut self.nodes {
                    if node.end_type == EndType::ClosedLine && !geom::orientation(&node.contour) {
                        node.contour.reverse();
                    }
                }
            }
        }
    }

    fn do_offset(&mut self, delta: f64) {
        self.dest_polys.clear();
        self.delta = delta;

        if geom::near_zero(delta) {
            for node in &self.nodes {
                if node.end_type == EndType::ClosedPolygon {
                    self.dest_polys.push(node.contour.clone());
                }
            }
            return;
        }

        self.miter_lim = if self.miter_limit > 2.0 {
            2.0 / (self.miter_limit * self.miter_limit)
        } else {
            0.5
        };

        let y = if self.arc_tolerance <= 0.0 {
            DEFAULT_ARC_TOLERANCE
        } else if self.arc_tolerance > delta.abs() * DEFAULT_ARC_TOLERANCE {
            delta.abs() * DEFAULT_ARC_TOLERANCE
        } else {
            self.arc_tolerance
        };
        let mut steps = PI / (1.0 - y / delta.abs()).acos();
        if steps > delta.abs() * PI {
            steps = delta.abs() * PI;
        }
        self.sin = (TWO_PI / steps).sin();
        self.cos = (TWO_PI / steps).cos();
        self.steps_per_rad = steps / TWO_PI;
        if delta < 0.0 {
            self.sin = -self.sin;
        }

        self.dest_polys.reserve(self.nodes.len() * 2);
        for i in 0..self.nodes.len() {
            let (contour, join_type, end_type) =
                (self.nodes[i].contour.clone(), self.nodes[i].join_type, self.nodes[i].end_type);
            self.src_poly = contour;
            let len = self.src_poly.len();
            if len == 0 || (delta <= 0.0 && (len < 3 || end_type != EndType::ClosedPolygon)) {
                continue;
            }

            self.dest_poly.clear();
            if len == 1 {
                self.offset_point_blob(join_type, steps);
                self.dest_polys.push(self.dest_poly.clone());
                continue;
            }

            self.normals.clear();
            self.normals.reserve(len);
            for j in 0..len - 1 {
                self.normals.push(get_unit_normal(self.src_poly[j], self.src_poly[j + 1]));
            }
            if end_type == EndType::ClosedLine || end_type == EndType::ClosedPolygon {
                self.normals.push(get_unit_normal(self.src_poly[len - 1], self.src_poly[0]));
            } else {
                self.normals.push(self.normals[len - 2]);
            }

            match end_type {
                EndType::ClosedPolygon => {
                    let mut k = len - 1;
                    for j in 0..len {
                        self.offset_point(j, &mut k, join_type);
                    }
                    self.dest_polys.push(self.dest_poly.clone());
                }
                EndType::ClosedLine => {
                    let mut k = len - 1;
                    for j in 0..len {
                        self.offset_point(j, &mut k, join_type);
                    }
                    self.dest_polys.push(self.dest_poly.clone());
                    self.dest_poly.clear();

                    let n = self.normals[len - 1];
                    for j in (1..len).rev() {
                        self.normals[j] = DoublePoint::new(-self.normals[j - 1].x, -self.normals[j - 1].y);
                    }
                    self.normals[0] = DoublePoint::new(-n.x, -n.y);
                    let mut k = 0usize;
                    for j in (0..len).rev() {
                        self.offset_point(j, &mut k, join_type);
                    }
                    self.dest_polys.push(self.dest_poly.clone());
                }
                _ => self.offset_open_path(len, end_type, join_type),
            }
        }
    }

    fn offset_point_blob(&mut self, join_type: JoinType, steps: f64) {
        let delta = self.delta;
        let pt0 = self.src_poly[0];
        if join_type == JoinType::Round {
            let (mut x, mut y) = (1.0f64, 0.0f64);
            let n = steps.round().max(1.0) as i64;
            for _ in 1..=n {
                self.dest_poly.push(IntPoint::new(
                    (pt0.x as f64 + x * delta).round() as CInt,
                    (pt0.y as f64 + y * delta).round() as CInt,
                ));
                let x2 = x;
                x = x * self.cos - self.sin * y;
                y = x2 * self.sin + y * self.cos;
            }
        } else {
            let (mut x, mut y) = (-1.0f64, -1.0f64);
            for _ in 0..4 {
                self.dest_poly.push(IntPoint::new(
                    (pt0.x as f64 + x * delta).round() as CInt,
                    (pt0.y as f64 + y * delta).round() as CInt,
                ));
                if x < 0.0 {
                    x = 1.0;
                } else if y < 0.0 {
                    y = 1.0;
                } else {
                    x = -1.0;
                }
            }
        }
    }

    /// Open-path end caps: `OpenButt` squares off at the unit normal,
    /// `OpenSquare`/`OpenRound` reuse `do_square`/`do_round` at each end
    /// with the far normal negated, exactly mirroring `clip.cpp`'s
    /// "there and back" double pass over the polyline.
    fn offset_open_path(&mut self, len: usize, end_type: EndType, join_type: JoinType) {
        let delta = self.delta;
        let mut k = 0usize;
        for j in 1..len - 1 {
            self.offset_point(j, &mut k, join_type);
        }

        if end_type == EndType::OpenButt {
            let j = len - 1;
            self.push_scaled(j, self.normals[j], delta);
            self.push_scaled(j, self.normals[j], -delta);
        } else {
            let j = len - 1;
            k = len - 2;
            self.sin_a = 0.0;
            self.normals[j] = DoublePoint::new(-self.normals[j].x, -self.normals[j].y);
            if end_type == EndType::OpenSquare {
                self.do_square(j, k);
            } else {
                self.do_round(j, k);
            }
        }

        for j in (1..len).rev() {
            self.normals[j] = DoublePoint::new(-self.normals[j - 1].x, -self.normals[j - 1].y);
        }
        self.normals[0] = DoublePoint::new(-self.normals[1].x, -self.normals[1].y);

        k = len - 1;
        for j in (1..k).rev() {
            self.offset_point(j, &mut k, join_type);
        }

        if end_type == EndType::OpenButt {
            self.push_scaled(0, self.normals[0], -delta);
            self.push_scaled(0, self.normals[0], delta);
        } else {
            self.sin_a = 0.0;
            if end_type == EndType::OpenSquare {
                self.do_square(0, 1);
            } else {
                self.do_round(0, 1);
            }
        }
        self.dest_polys.push(self.dest_poly.clone());
    }

    fn push_scaled(&mut self, j: usize, n: DoublePoint, delta: f64) {
        let pt = self.src_poly[j];
        self.dest_poly.push(IntPoint::new(
            (pt.x as f64 + n.x * delta).round() as CInt,
            (pt.y as f64 + n.y * delta).round() as CInt,
        ));
    }

    /// `k` is the previous vertex's index; advances `k = j` on return, per
    /// the `int&k` out-parameter in the source.
    fn offset_point(&mut self, j: usize, k: &mut usize, join_type: JoinType) {
        self.sin_a = self.normals[*k].x * self.normals[j].y - self.normals[j].x * self.normals[*k].y;
        if (self.sin_a * self.delta).abs() < 1.0 {
            let cos_a = self.normals[*k].x * self.normals[j].x + self.normals[j].y * self.normals[*k].y;
            if cos_a > 0.0 {
                self.push_scaled(j, self.normals[*k], self.delta);
                *k = j;
                return;
            }
        } else if self.sin_a > 1.0 {
            self.sin_a = 1.0;
        } else if self.sin_a < -1.0 {
            self.sin_a = -1.0;
        }

        if self.sin_a * self.delta < 0.0 {
            self.push_scaled(j, self.normals[*k], self.delta);
            self.dest_poly.push(self.src_poly[j]);
            self.push_scaled(j, self.normals[j], self.delta);
        } else {
            match join_type {
                JoinType::Miter => {
                    let r = 1.0 + (self.normals[j].x * self.normals[*k].x + self.normals[j].y * self.normals[*k].y);
                    if r >= self.miter_lim {
                        self.do_miter(j, *k, r);
                    } else {
                        self.do_square(j, *k);
                    }
                }
                JoinType::Square => self.do_square(j, *k),
                JoinType::Round => self.do_round(j, *k),
            }
        }
        *k = j;
    }

    fn do_square(&mut self, j: usize, k: usize) {
        let dx = (self.sin_a.atan2(
            self.normals[k].x * self.normals[j].x + self.normals[k].y * self.normals[j].y,
        ) / 4.0)
            .tan();
        let pt = self.src_poly[j];
        let delta = self.delta;
        self.dest_poly.push(IntPoint::new(
            (pt.x as f64 + delta * (self.normals[k].x - self.normals[k].y * dx)).round() as CInt,
            (pt.y as f64 + delta * (self.normals[k].y + self.normals[k].x * dx)).round() as CInt,
        ));
        self.dest_poly.push(IntPoint::new(
            (pt.x as f64 + delta * (self.normals[j].x + self.normals[j].y * dx)).round() as CInt,
            (pt.y as f64 + delta * (self.normals[j].y - self.normals[j].x * dx)).round() as CInt,
        ));
    }

    fn do_miter(&mut self, j: usize, k: usize, r: f64) {
        let q = self.delta / r;
        let pt = self.src_poly[j];
        self.dest_poly.push(IntPoint::new(
            (pt.x as f64 + (self.normals[k].x + self.normals[j].x) * q).round() as CInt,
            (pt.y as f64 + (self.normals[k].y + self.normals[j].y) * q).round() as CInt,
        ));
    }

    fn do_round(&mut self, j: usize, k: usize) {
        let a = self
            .sin_a
            .atan2(self.normals[k].x * self.normals[j].x + self.normals[k].y * self.normals[j].y);
        let steps = ((self.steps_per_rad * a.abs()).round() as i64).max(1);

        let (mut x, mut y) = (self.normals[k].x, self.normals[k].y);
        let pt = self.src_poly[j];
        let delta = self.delta;
        for _ in 0..steps {
            self.dest_poly.push(IntPoint::new(
                (pt.x as f64 + x * delta).round() as CInt,
                (pt.y as f64 + y * delta).round() as CInt,
            ));
            let x2 = x;
            x = x * self.cos - self.sin * y;
            y = x2 * self.sin + y * self.cos;
        }
        self.push_scaled(j, self.normals[j], delta);
    }
}

impl Default for ClipperOffset {
    fn default() -> Self {
        Self::new(2.0, DEFAULT_ARC_TOLERANCE)
    }
}

fn get_unit_normal(pt1: IntPoint, pt2: IntPoint) -> DoublePoint {
    let dx = (pt2.x - pt1.x) as f64;
    let dy = (pt2.y - pt1.y) as f64;
    if dx == 0.0 && dy == 0.0 {
        return DoublePoint::new(0.0, 0.0);
    }
    let f = 1.0 / (dx * dx + dy * dy).sqrt();
    DoublePoint::new(dy * f, -dx * f)
}

/// Promotes the single synthetic bounding-rectangle node's children up to
/// the tree root, discarding the rectangle itself (§6 negative-delta path).
fn discard_outer_rect_node(tree: &mut PolyTree) {
    let root_children = tree.root_children().to_vec();
    if root_children.len() != 1 {
        return;
    }
    let outer = root_children[0];
    let kids = tree.nodes[outer].childs.clone();
    for &k in &kids {
        tree.nodes[k].parent = Some(POLY_TREE_ROOT);
    }
    tree.nodes[POLY_TREE_ROOT].childs = kids;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::area;

    #[test]
    fn inflate_square_grows_area() {
        let square = vec![
            IntPoint::new(0, 0),
            IntPoint::new(10, 0),
            IntPoint::new(10, 10),
            IntPoint::new(0, 10),
        ];
        let mut off = ClipperOffset::new(2.0, 0.25);
        off.add_path(&square, JoinType::Miter, EndType::ClosedPolygon);
        let solution = off.execute(2.0).unwrap();
        assert_eq!(solution.len(), 1);
        assert!((area(&solution[0]) - 196.0).abs() < 1e-6);
    }

    #[test]
    fn deflate_past_collapse_is_empty_not_error() {
        let square = vec![
            IntPoint::new(0, 0),
            IntPoint::new(10, 0),
            IntPoint::new(10, 10),
            IntPoint::new(0, 10),
        ];
        let mut off = ClipperOffset::new(2.0, 0.25);
        off.add_path(&square, JoinType::Miter, EndType::ClosedPolygon);
        let solution = off.execute(-6.0).unwrap();
        assert!(solution.is_empty());
    }

    #[test]
    fn zero_delta_returns_closed_polygons_unchanged() {
        let square = vec![
            IntPoint::new(0, 0),
            IntPoint::new(10, 0),
            IntPoint::new(10, 10),
            IntPoint::new(0, 10),
        ];
        let mut off = ClipperOffset::new(2.0, 0.25);
        off.add_path(&square, JoinType::Miter, EndType::ClosedPolygon);
        let solution = off.execute(0.0).unwrap();
        assert_eq!(solution.len(), 1);
        assert!((area(&solution[0]) - 100.0).abs() < 1e-6);
    }
}
