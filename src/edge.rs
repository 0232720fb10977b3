//! `TEdge`: one oriented edge record, arena-indexed.
//!
//! Grounded in `clipper_v1::tedge::TEdge` from the reference port; the six
//! `Rc<RefCell<TEdge>>` link fields become `Option<EdgeIdx>` indices into the
//! edge arena owned by [`crate::base::ClipperBase`].

use crate::consts::{CInt, HORIZONTAL};
use crate::geom::IntPoint;
use crate::types::{EdgeSide, PolyType};

/// Index into the edge arena.
pub type EdgeIdx = usize;

/// `OutIdx` sentinel: edge has not yet contributed to any output ring.
pub const UNASSIGNED: i32 = -1;
/// `OutIdx` sentinel: edge is an ingestion-only stub for an open path and is
/// never emitted as a closed-polygon edge.
pub const SKIP: i32 = -2;

#[derive(Debug, Clone)]
pub(crate) struct TEdge {
    pub bot: IntPoint,
    pub curr: IntPoint,
    pub top: IntPoint,
    pub delta: IntPoint,
    pub dx: f64,
    pub poly_typ: PolyType,
    pub side: EdgeSide,
    pub wind_delta: i32,
    pub wind_cnt: i32,
    pub wind_cnt2: i32,
    pub out_idx: i32,

    pub next: Option<EdgeIdx>,
    pub prev: Option<EdgeIdx>,
    pub next_in_lml: Option<EdgeIdx>,
    pub next_in_ael: Option<EdgeIdx>,
    pub prev_in_ael: Option<EdgeIdx>,
    pub next_in_sel: Option<EdgeIdx>,
    pub prev_in_sel: Option<EdgeIdx>,
}

impl TEdge {
    pub fn new() -> Self {
        Self {
            bot: IntPoint::new(0, 0),
            curr: IntPoint::new(0, 0),
            top: IntPoint::new(0, 0),
            delta: IntPoint::new(0, 0),
            dx: 0.0,
            poly_typ: PolyType::Subject,
            side: EdgeSide::Left,
            wind_delta: 0,
            wind_cnt: 0,
            wind_cnt2: 0,
            out_idx: UNASSIGNED,
            next: None,
            prev: None,
            next_in_lml: None,
            next_in_ael: None,
            prev_in_ael: None,
            next_in_sel: None,
            prev_in_sel: None,
        }
    }

    pub fn init(&mut self, pt_bottom: IntPoint, pt_top: IntPoint, poly_type: PolyType) {
        self.poly_typ = poly_type;
        if pt_top.y >= pt_bottom.y {
            self.bot = pt_bottom;
            self.top = pt_top;
        } else {
            self.bot = pt_top;
            self.top = pt_bottom;
        }
        self.curr = self.bot;
        self.update_delta();
    }

    pub fn update_delta(&mut self) {
        self.delta.x = self.top.x - self.bot.x;
        self.delta.y = self.top.y - self.bot.y;
        self.dx = if self.delta.y == 0 {
            HORIZONTAL
        } else {
            self.delta.x as f64 / self.delta.y as f64
        };
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.delta.y == 0
    }

    #[inline]
    pub fn get_x_at_y(&self, y: CInt) -> CInt {
        if y == self.top.y {
            self.top.x
        } else if y == self.bot.y {
            self.bot.x
        } else {
            self.bot.x + ((y - self.bot.y) as f64 * self.dx).round() as CInt
        }
    }
}

impl Default for TEdge {
    fn default() -> Self {
        Self::new()
    }
}
