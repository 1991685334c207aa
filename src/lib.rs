#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

#[macro_use]
mod typed_vec;

mod contour;
mod geom;
mod num;
mod segment_tree;
mod stitch;
mod sweep;

pub use contour::{Contour, Cycle};
pub use geom::Point;

use kurbo::Rect;

/// The input rectangles were faulty.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// At least one of the inputs was infinite.
    Infinity,
    /// At least one of the inputs was not a number.
    NaN,
}

/// Computes the contour of the union of a collection of rectangles.
///
/// The result is a set of simple, mutually non-intersecting cycles whose
/// interiors add up to exactly the union of the rectangles' interiors; see
/// [`Contour`] for the orientation and nesting conventions.
///
/// Any finite input is fine: the collection may be empty, rectangles may be
/// duplicated, nested, or touching, and rectangles with zero width or height
/// are ignored. Coordinates are compared exactly, with no tolerance; the
/// output vertices are exact copies of input coordinates.
///
/// ```
/// use kurbo::Rect;
///
/// let contour = isocontour::contour([
///     Rect::new(1.0, 2.0, 4.0, 6.0),
///     Rect::new(2.0, 3.0, 7.0, 9.0),
/// ])
/// .unwrap();
/// assert_eq!(contour.cycles().len(), 1);
/// ```
pub fn contour(rects: impl IntoIterator<Item = Rect>) -> Result<Contour, Error> {
    let rects: Vec<Rect> = rects.into_iter().collect();
    for r in &rects {
        for v in [r.x0, r.y0, r.x1, r.y1] {
            if v.is_nan() {
                return Err(Error::NaN);
            }
            if v.is_infinite() {
                return Err(Error::Infinity);
            }
        }
    }

    let edges = sweep::sweep(&rects);
    Ok(Contour::from_cycles(stitch::stitch(&edges)))
}
