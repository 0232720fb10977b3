//! Horizontal-edge promotion and the top-of-scanbeam pass.
//!
//! Grounded in `clipper_v1::mod::Clipper::{ProcessHorizontals,
//! ProcessHorizontal, GetHorzDirection, GetNextInAEL, IsMinima, IsMaxima,
//! IsIntermediate, GetMaximaPair, GetMaximaPairEx, DoMaxima,
//! ProcessEdgesAtTopOfScanbeam}` from the reference port. `DoMaxima`'s
//! `throw clipperException("DoMaxima error")` becomes
//! `Err(ClipError::InternalInvariantViolation(..))` per §9. The reference's
//! doubly-linked maxima list (only populated under `StrictlySimple`) is
//! replaced by [`crate::sweep::MaximaList`]'s sorted `Vec<CInt>`; the
//! "insert extra vertices where a maxima touches a horizontal" embellishment
//! in `ProcessHorizontal` is re-expressed as a cursor walk over that sorted
//! snapshot rather than a ported C++ iterator dance.

use crate::clipper::Clipper;
use crate::consts::CInt;
use crate::edge::{EdgeIdx, SKIP, UNASSIGNED};
use crate::error::{ClipError, Result};
use crate::geom::{self, IntPoint};
use crate::output::OutPtIdx;
use crate::types::Direction;

impl Clipper {
    fn get_horz_direction(&self, e: EdgeIdx) -> (Direction, CInt, CInt) {
        let (bot, top) = (self.base.e(e).bot, self.base.e(e).top);
        if bot.x < top.x {
            (Direction::LeftToRight, bot.x, top.x)
        } else {
            (Direction::RightToLeft, top.x, bot.x)
        }
    }

    fn get_next_in_ael(&self, e: EdgeIdx, dir: Direction) -> Option<EdgeIdx> {
        match dir {
            Direction::LeftToRight => self.base.e(e).next_in_ael,
            Direction::RightToLeft => self.base.e(e).prev_in_ael,
        }
    }

    fn is_minima(&self, e: EdgeIdx) -> bool {
        let prev_not_lml = match self.base.e(e).prev {
            Some(p) => self.base.e(p).next_in_lml != Some(e),
            None => true,
        };
        let next_not_lml = match self.base.e(e).next {
            Some(n) => self.base.e(n).next_in_lml != Some(e),
            None => true,
        };
        prev_not_lml && next_not_lml
    }

    fn is_maxima(&self, e: EdgeIdx, y: CInt) -> bool {
        self.base.e(e).top.y == y && self.base.e(e).next_in_lml.is_none()
    }

    fn is_intermediate(&self, e: EdgeIdx, y: CInt) -> bool {
        self.base.e(e).top.y == y && self.base.e(e).next_in_lml.is_some()
    }

    fn get_maxima_pair(&self, e: EdgeIdx) -> Option<EdgeIdx> {
        if let Some(en) = self.base.e(e).next {
            if self.base.e(en).top == self.base.e(e).top && self.base.e(en).next_in_lml.is_none() {
                return Some(en);
            }
        }
        if let Some(ep) = self.base.e(e).prev {
            if self.base.e(ep).top == self.base.e(e).top && self.base.e(ep).next_in_lml.is_none() {
                return Some(ep);
            }
        }
        None
    }

    /// Like [`Clipper::get_maxima_pair`] but returns `None` if the pair is a
    /// skipped open-path stub, or is sitting at the same AEL position as
    /// itself (i.e. not actually present in the AEL) while non-horizontal.
    fn get_maxima_pair_ex(&self, e: EdgeIdx) -> Option<EdgeIdx> {
        let result = self.get_maxima_pair(e)?;
        let same_ael_slot = self.base.e(result).next_in_ael == self.base.e(result).prev_in_ael;
        if self.base.e(result).out_idx == SKIP || (same_ael_slot && !self.base.e(result).is_horizontal()) {
            None
        } else {
            Some(result)
        }
    }

    fn do_maxima(&mut self, e: EdgeIdx) -> Result<()> {
        let Some(e_max_pair) = self.get_maxima_pair_ex(e) else {
            if self.base.e(e).out_idx >= 0 {
                let top = self.base.e(e).top;
                self.add_out_pt(e, top);
            }
            self.base.delete_from_ael(e);
            return Ok(());
        };

        let mut next = self.base.e(e).next_in_ael;
        while let Some(cur) = next {
            if cur == e_max_pair {
                break;
            }
            let top = self.base.e(e).top;
            self.intersect_edges(e, cur, top)?;
            self.base.swap_positions_in_ael(e, cur);
            next = self.base.e(e).next_in_ael;
        }

        let (out1, out2) = (self.base.e(e).out_idx, self.base.e(e_max_pair).out_idx);
        if out1 == UNASSIGNED && out2 == UNASSIGNED {
            self.base.delete_from_ael(e);
            self.base.delete_from_ael(e_max_pair);
        } else if out1 >= 0 && out2 >= 0 {
            let top = self.base.e(e).top;
            self.add_local_max_poly(e, e_max_pair, top);
            self.base.delete_from_ael(e);
            self.base.delete_from_ael(e_max_pair);
        } else if self.base.e(e).wind_delta == 0 {
            if self.base.e(e).out_idx >= 0 {
                let top = self.base.e(e).top;
                self.add_out_pt(e, top);
                self.base.e_mut(e).out_idx = UNASSIGNED;
            }
            self.base.delete_from_ael(e);
            if self.base.e(e_max_pair).out_idx >= 0 {
                let top = self.base.e(e).top;
                self.add_out_pt(e_max_pair, top);
                self.base.e_mut(e_max_pair).out_idx = UNASSIGNED;
            }
            self.base.delete_from_ael(e_max_pair);
        } else {
            return Err(ClipError::InternalInvariantViolation(
                "do_maxima: maxima pair left in an inconsistent open/closed state".to_string(),
            ));
        }
        Ok(())
    }

    /// Adds a join between `horz_edge`'s last output point and a
    /// same-slope, already-visited AEL neighbor sharing `horz_edge`'s bottom
    /// vertex. Shared by `process_horizontal`'s three call sites.
    fn join_adjacent_collinear(&mut self, horz_edge: EdgeIdx, op1: OutPtIdx, is_open: bool) {
        if is_open {
            return;
        }
        let bot = self.base.e(horz_edge).bot;
        let (he_bot, he_top) = (self.base.e(horz_edge).bot, self.base.e(horz_edge).top);
        let he_wind = self.base.e(horz_edge).wind_delta;

        if let Some(prev) = self.base.e(horz_edge).prev_in_ael {
            if self.base.e(prev).curr == bot
                && self.base.e(prev).out_idx >= 0
                && self.base.e(prev).curr.y > self.base.e(prev).top.y
                && he_wind != 0
                && self.base.e(prev).wind_delta != 0
                && geom::slopes_equal4(he_bot, he_top, self.base.e(prev).bot, self.base.e(prev).top, self.base.use_full_range)
            {
                let op2 = self.add_out_pt(prev, bot);
                self.add_join(op1, Some(op2), he_top);
                return;
            }
        }
        if let Some(next) = self.base.e(horz_edge).next_in_ael {
            if self.base.e(next).curr == bot
                && self.base.e(next).out_idx >= 0
                && self.base.e(next).curr.y > self.base.e(next).top.y
                && he_wind != 0
                && self.base.e(next).wind_delta != 0
                && geom::slopes_equal4(he_bot, he_top, self.base.e(next).bot, self.base.e(next).top, self.base.use_full_range)
            {
                let op2 = self.add_out_pt(next, bot);
                self.add_join(op1, Some(op2), he_top);
            }
        }
    }

    fn process_horizontal(&mut self, mut horz_edge: EdgeIdx) -> Result<()> {
        let is_open = self.base.e(horz_edge).wind_delta == 0;
        let (mut dir, mut horz_left, mut horz_right) = self.get_horz_direction(horz_edge);

        let mut e_last_horz = horz_edge;
        while let Some(next) = self.base.e(e_last_horz).next_in_lml {
            if !self.base.e(next).is_horizontal() {
                break;
            }
            e_last_horz = next;
        }
        let e_max_pair = if self.base.e(e_last_horz).next_in_lml.is_none() {
            self.get_maxima_pair(e_last_horz)
        } else {
            None
        };

        let mut maxima: Vec<CInt> = self.maxima.iter().collect();
        maxima.sort_unstable();
        let mut maxima_cursor = 0usize;

        let mut op1: Option<OutPtIdx> = None;

        loop {
            let is_last_horz = horz_edge == e_last_horz;
            let mut e = self.get_next_in_ael(horz_edge, dir);

            while let Some(cur) = e {
                let cur_x = self.base.e(cur).curr.x;

                if !is_open {
                    while maxima_cursor < maxima.len() {
                        let mx = maxima[maxima_cursor];
                        let crossed = match dir {
                            Direction::LeftToRight => mx < cur_x,
                            Direction::RightToLeft => mx > cur_x,
                        };
                        if !crossed {
                            break;
                        }
                        if self.base.e(horz_edge).out_idx >= 0 {
                            let y = self.base.e(horz_edge).bot.y;
                            self.add_out_pt(horz_edge, IntPoint::new(mx, y));
                        }
                        maxima_cursor += 1;
                    }
                }

                if (dir == Direction::LeftToRight && cur_x > horz_right)
                    || (dir == Direction::RightToLeft && cur_x < horz_left)
                {
                    break;
                }

                if cur_x == self.base.e(horz_edge).top.x {
                    if let Some(nil) = self.base.e(horz_edge).next_in_lml {
                        if self.base.e(cur).dx < self.base.e(nil).dx {
                            break;
                        }
                    }
                }

                if self.base.e(horz_edge).out_idx >= 0 && !is_open {
                    let pt = self.base.e(cur).curr;
                    op1 = Some(self.add_out_pt(horz_edge, pt));
                }

                if Some(cur) == e_max_pair && is_last_horz {
                    if self.base.e(horz_edge).out_idx >= 0 {
                        let top = self.base.e(horz_edge).top;
                        self.add_local_max_poly(horz_edge, cur, top);
                    }
                    self.base.delete_from_ael(horz_edge);
                    self.base.delete_from_ael(cur);
                    return Ok(());
                }

                let pt = IntPoint::new(cur_x, self.base.e(horz_edge).curr.y);
                match dir {
                    Direction::LeftToRight => self.intersect_edges(horz_edge, cur, pt)?,
                    Direction::RightToLeft => self.intersect_edges(cur, horz_edge, pt)?,
                }
                let e_next = self.get_next_in_ael(cur, dir);
                self.base.swap_positions_in_ael(horz_edge, cur);
                e = e_next;
            }

            match self.base.e(horz_edge).next_in_lml {
                Some(n) if self.base.e(n).is_horizontal() => {
                    horz_edge = self.base.update_edge_into_ael(horz_edge)?;
                    if self.base.e(horz_edge).out_idx >= 0 {
                        let bot = self.base.e(horz_edge).bot;
                        self.add_out_pt(horz_edge, bot);
                    }
                    let (d2, l2, r2) = self.get_horz_direction(horz_edge);
                    dir = d2;
                    horz_left = l2;
                    horz_right = r2;
                }
                _ => break,
            }
        }

        if self.base.e(horz_edge).out_idx >= 0 && op1.is_none() {
            let op = self.get_last_out_pt(horz_edge);
            self.join_adjacent_collinear(horz_edge, op, is_open);
        }

        if self.base.e(horz_edge).next_in_lml.is_some() {
            if self.base.e(horz_edge).out_idx >= 0 {
                let top = self.base.e(horz_edge).top;
                let op = self.add_out_pt(horz_edge, top);
                horz_edge = self.base.update_edge_into_ael(horz_edge)?;
                if self.base.e(horz_edge).wind_delta == 0 {
                    return Ok(());
                }
                self.join_adjacent_collinear(horz_edge, op, is_open);
            } else {
                horz_edge = self.base.update_edge_into_ael(horz_edge)?;
            }
        } else {
            if self.base.e(horz_edge).out_idx >= 0 {
                let top = self.base.e(horz_edge).top;
                self.add_out_pt(horz_edge, top);
            }
            self.base.delete_from_ael(horz_edge);
        }
        Ok(())
    }

    pub(crate) fn process_horizontals(&mut self) -> Result<()> {
        while let Some(e) = self.pop_edge_from_sel() {
            self.process_horizontal(e)?;
        }
        Ok(())
    }

    pub(crate) fn process_edges_at_top_of_scanbeam(&mut self, top_y: CInt) -> Result<()> {
        let mut e = self.base.active_edges;
        while let Some(cur) = e {
            let mut is_maxima_edge = self.is_maxima(cur, top_y);

            if is_maxima_edge {
                if let Some(pair) = self.get_maxima_pair_ex(cur) {
                    is_maxima_edge = !self.base.e(pair).is_horizontal();
                }
            }

            if is_maxima_edge {
                if self.strictly_simple() {
                    let x = self.base.e(cur).top.x;
                    self.maxima.insert(x);
                }
                let e_prev = self.base.e(cur).prev_in_ael;
                self.do_maxima(cur)?;
                e = match e_prev {
                    Some(p) => self.base.e(p).next_in_ael,
                    None => self.base.active_edges,
                };
                continue;
            }

            let advanced;
            if self.is_intermediate(cur, top_y) {
                let next_in_lml = self.base.e(cur).next_in_lml.unwrap();
                if self.base.e(next_in_lml).is_horizontal() {
                    let updated = self.base.update_edge_into_ael(cur)?;
                    if self.base.e(updated).out_idx >= 0 {
                        let bot = self.base.e(updated).bot;
                        self.add_out_pt(updated, bot);
                    }
                    self.add_edge_to_sel(updated);
                    advanced = updated;
                } else {
                    let x = self.base.top_x(cur, top_y);
                    self.base.e_mut(cur).curr = IntPoint::new(x, top_y);
                    advanced = cur;
                }
            } else {
                let x = self.base.top_x(cur, top_y);
                self.base.e_mut(cur).curr = IntPoint::new(x, top_y);
                advanced = cur;
            }

            if self.strictly_simple() {
                if let Some(prev) = self.base.e(advanced).prev_in_ael {
                    if self.base.e(advanced).out_idx >= 0
                        && self.base.e(advanced).wind_delta != 0
                        && self.base.e(prev).out_idx >= 0
                        && self.base.e(prev).curr.x == self.base.e(advanced).curr.x
                        && self.base.e(prev).wind_delta != 0
                    {
                        let pt = self.base.e(advanced).curr;
                        let op = self.add_out_pt(prev, pt);
                        let op2 = self.add_out_pt(advanced, pt);
                        self.add_join(op, Some(op2), pt);
                    }
                }
            }

            e = self.base.e(advanced).next_in_ael;
        }

        self.process_horizontals()?;
        self.maxima.clear();

        let mut e = self.base.active_edges;
        while let Some(cur) = e {
            if !self.is_intermediate(cur, top_y) {
                e = self.base.e(cur).next_in_ael;
                continue;
            }

            let op = if self.base.e(cur).out_idx >= 0 {
                let top = self.base.e(cur).top;
                Some(self.add_out_pt(cur, top))
            } else {
                None
            };
            let updated = self.base.update_edge_into_ael(cur)?;

            if let Some(op) = op {
                let e_prev = self.base.e(updated).prev_in_ael;
                let e_next = self.base.e(updated).next_in_ael;
                let (u_bot, u_top, u_wind) =
                    (self.base.e(updated).bot, self.base.e(updated).top, self.base.e(updated).wind_delta);

                let mut joined = false;
                if let Some(prev) = e_prev {
                    if self.base.e(prev).curr.x == u_bot.x
                        && self.base.e(prev).curr.y == u_bot.y
                        && self.base.e(prev).out_idx >= 0
                        && self.base.e(prev).curr.y > self.base.e(prev).top.y
                        && u_wind != 0
                        && self.base.e(prev).wind_delta != 0
                        && geom::slopes_equal4(u_bot, u_top, self.base.e(prev).bot, self.base.e(prev).top, self.base.use_full_range)
                    {
                        let op2 = self.add_out_pt(prev, u_bot);
                        self.add_join(op, Some(op2), u_top);
                        joined = true;
                    }
                }
                if !joined {
                    if let Some(next) = e_next {
                        if self.base.e(next).curr.x == u_bot.x
                            && self.base.e(next).curr.y == u_bot.y
                            && self.base.e(next).out_idx >= 0
                            && self.base.e(next).curr.y > self.base.e(next).top.y
                            && u_wind != 0
                            && self.base.e(next).wind_delta != 0
                            && geom::slopes_equal4(u_bot, u_top, self.base.e(next).bot, self.base.e(next).top, self.base.use_full_range)
                        {
                            let op2 = self.add_out_pt(next, u_bot);
                            self.add_join(op, Some(op2), u_top);
                        }
                    }
                }
            }
            e = self.base.e(updated).next_in_ael;
        }
        Ok(())
    }
}
