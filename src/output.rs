//! Output rings (`OutRec`/`OutPt`), deferred join records, and the
//! `PolyNode`/`PolyTree` containment hierarchy — all arena-indexed.

use crate::geom::{IntPoint, Path};
use crate::types::{EndType, JoinType};

pub type OutPtIdx = usize;
pub type OutRecIdx = usize;
pub type PolyNodeIdx = usize;

/// `OutIdx` sentinel shared with [`crate::edge::UNASSIGNED`].
pub const UNASSIGNED: i32 = -1;

/// A doubly-linked circular list node. Unlike the `Rc<RefCell<>>` port, the
/// circularity is expressed as index links into the shared arena so a
/// singleton starts with `next == prev == self`.
#[derive(Debug, Clone)]
pub(crate) struct OutPt {
    pub idx: i32,
    pub pt: IntPoint,
    pub next: OutPtIdx,
    pub prev: OutPtIdx,
}

#[derive(Debug, Clone)]
pub(crate) struct OutRec {
    /// Self-index, doubling as the disjoint-set parent pointer: once merged,
    /// `idx` is redirected to point at the surviving OutRec's arena slot
    /// instead of at `self` (classic union-find with path compression in
    /// `ClipperBase::get_out_rec`).
    pub idx: OutRecIdx,
    pub is_hole: bool,
    pub is_open: bool,
    pub first_left: Option<OutRecIdx>,
    pub pts: Option<OutPtIdx>,
    pub bottom_pt: Option<OutPtIdx>,
    pub poly_node: Option<PolyNodeIdx>,
}

impl OutRec {
    pub fn new(idx: OutRecIdx) -> Self {
        Self {
            idx,
            is_hole: false,
            is_open: false,
            first_left: None,
            pts: None,
            bottom_pt: None,
            poly_node: None,
        }
    }
}

/// A deferred merge hint. A *ghost* join has `out_pt2 == None` and is
/// resolved when a matching real horizontal appears later in the sweep.
#[derive(Debug, Clone)]
pub(crate) struct Join {
    pub out_pt1: OutPtIdx,
    pub out_pt2: Option<OutPtIdx>,
    pub off_pt: IntPoint,
}

#[derive(Debug, Clone)]
pub struct PolyNode {
    pub(crate) parent: Option<PolyNodeIdx>,
    pub contour: Path,
    pub(crate) childs: Vec<PolyNodeIdx>,
    pub jointype: JoinType,
    pub endtype: EndType,
    pub is_open: bool,
}

impl PolyNode {
    fn new() -> Self {
        Self {
            parent: None,
            contour: Vec::new(),
            childs: Vec::new(),
            jointype: JoinType::Square,
            endtype: EndType::ClosedPolygon,
            is_open: false,
        }
    }

    pub fn child_count(&self) -> usize {
        self.childs.len()
    }
}

/// Output containment hierarchy: holes are children of the outer ring that
/// contains them. Index 0 is always the tree root (an empty placeholder
/// node whose direct children are the top-level outer rings).
#[derive(Debug, Clone, Default)]
pub struct PolyTree {
    pub(crate) nodes: Vec<PolyNode>,
}

pub const POLY_TREE_ROOT: PolyNodeIdx = 0;

impl PolyTree {
    pub fn new() -> Self {
        Self { nodes: vec![PolyNode::new()] }
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(PolyNode::new());
    }

    /// Count of nodes excluding the synthetic root.
    pub fn total(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }

    pub fn node(&self, idx: PolyNodeIdx) -> &PolyNode {
        &self.nodes[idx]
    }

    pub fn root_children(&self) -> &[PolyNodeIdx] {
        &self.nodes[POLY_TREE_ROOT].childs
    }

    /// Children of an arbitrary node (use [`PolyTree::root_children`] for
    /// the top-level outer rings).
    pub fn children(&self, idx: PolyNodeIdx) -> &[PolyNodeIdx] {
        &self.nodes[idx].childs
    }

    pub fn is_hole(&self, idx: PolyNodeIdx) -> bool {
        let mut result = false;
        let mut node = self.nodes[idx].parent;
        while let Some(p) = node {
            if p == POLY_TREE_ROOT {
                break;
            }
            result = !result;
            node = self.nodes[p].parent;
        }
        result
    }

    pub(crate) fn add_node(&mut self, parent: PolyNodeIdx, mut node: PolyNode) -> PolyNodeIdx {
        node.parent = Some(parent);
        let idx = self.nodes.len();
        self.nodes.push(node);
        self.nodes[parent].childs.push(idx);
        idx
    }
}
