//! Integer-exact 2D polygon boolean clipping (intersection/union/difference/
//! xor) via a Vatti-style sweep-line algorithm, plus a companion polygon
//! offsetter (inflate/deflate with miter/square/round joins and butt/
//! square/round/closed end caps).
//!
//! The clipper is the crate's core: [`Clipper`] ingests subject and clip
//! paths under a [`PolyType`], then [`Clipper::execute`] (or
//! [`Clipper::execute_poly_tree`] for a hole-aware containment tree) runs
//! the scanbeam sweep and returns the boolean combination chosen by
//! [`ClipType`] and the two [`PolyFillType`] fill rules. [`ClipperOffset`]
//! builds on top of it: it generates an offset shell per path and unions
//! the shells back together through a fresh `Clipper` instance to resolve
//! self-overlap at concave corners.
//!
//! ```
//! use clipper2::{Clipper, ClipType, PolyFillType, PolyType};
//!
//! let subject = vec![(0, 0), (10, 0), (10, 10), (0, 10)]
//!     .into_iter().map(|(x, y)| clipper2::IntPoint::new(x, y)).collect::<Vec<_>>();
//! let clip = vec![(5, 5), (15, 5), (15, 15), (5, 15)]
//!     .into_iter().map(|(x, y)| clipper2::IntPoint::new(x, y)).collect::<Vec<_>>();
//!
//! let mut c = Clipper::new();
//! c.add_path(&subject, PolyType::Subject, true).unwrap();
//! c.add_path(&clip, PolyType::Clip, true).unwrap();
//! let solution = c.execute(ClipType::Intersection, PolyFillType::EvenOdd, PolyFillType::EvenOdd).unwrap();
//! assert_eq!(solution.len(), 1);
//! ```

mod base;
mod clipper;
mod consts;
mod edge;
mod error;
mod geom;
mod horizontal;
mod intersect;
mod join;
mod offset;
mod output;
mod output_builder;
mod sweep;
mod types;
mod winding;

pub use clipper::{Clipper, PRESERVE_COLLINEAR, REVERSE_SOLUTION, STRICTLY_SIMPLE};
pub use error::{ClipError, Result};
pub use geom::{area, orientation, point_in_polygon, poly2_contains_poly1, DoublePoint, IntPoint, IntRect, Path, Paths};
pub use offset::ClipperOffset;
pub use output::{PolyNode, PolyTree};
pub use types::{ClipType, EndType, JoinType, PolyFillType, PolyType};
