//! The public output types: cycles of points, and contours made of cycles.

use kurbo::Affine;

use crate::geom::Point;

fn cyclic_pairs<T>(xs: &[T]) -> impl Iterator<Item = (&T, &T)> {
    xs.windows(2)
        .map(|pair| (&pair[0], &pair[1]))
        .chain(xs.last().zip(xs.first()))
}

/// A simple, closed, axis-aligned polygonal curve.
///
/// The closing edge from the last vertex back to the first is implicit.
/// Edges alternate between horizontal and vertical, so the vertex count is
/// always even: 4 for a plain rectangle, and 4 more for every notch.
///
/// As you walk along a cycle, the occupied part of the set it bounds is on
/// your left (in a Y-down coordinate system). Outer boundaries therefore
/// wind counter-clockwise and holes wind clockwise, which is what
/// [`signed_area`](Cycle::signed_area) measures.
#[derive(Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Cycle {
    points: Vec<Point>,
}

impl std::fmt::Debug for Cycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.points).finish()
    }
}

impl Cycle {
    pub(crate) fn new(points: Vec<Point>) -> Self {
        debug_assert!(!points.is_empty());
        Cycle { points }
    }

    /// The vertices, in traversal order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The number of vertices.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Are there no vertices? (Never true for a cycle produced by
    /// [`contour`](crate::contour()).)
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The signed area enclosed by this cycle: positive for an outer
    /// boundary, negative for a hole.
    pub fn signed_area(&self) -> f64 {
        cyclic_pairs(&self.points)
            .map(|(p, q)| p.x * q.y - q.x * p.y)
            .sum::<f64>()
            / 2.0
    }

    /// Does this cycle bound a hole?
    pub fn is_hole(&self) -> bool {
        self.signed_area() < 0.0
    }

    /// Rotates the vertex sequence so that the smallest vertex (ordered by
    /// `x`, then `y`) comes first.
    ///
    /// This only rotates; it never reverses, so orientation is preserved.
    pub fn normalize(&mut self) {
        // The first minimum, so that a degenerate cycle with a repeated
        // smallest vertex still normalizes to a fixed point.
        let mut min = 0;
        for i in 1..self.points.len() {
            if self.points[i].xy_cmp(&self.points[min]).is_lt() {
                min = i;
            }
        }
        self.points.rotate_left(min);
    }

    /// Returns a [normalized](Cycle::normalize) copy.
    pub fn normalized(&self) -> Cycle {
        let mut ret = self.clone();
        ret.normalize();
        ret
    }

    /// Applies an affine transform to every vertex.
    ///
    /// Transforms that aren't compositions of axis-aligned scales and
    /// translations will break the axis-alignment of the edges, and
    /// reflections flip the orientation convention; this method doesn't try
    /// to repair either.
    pub fn applying(&self, transform: Affine) -> Cycle {
        Cycle {
            points: self
                .points
                .iter()
                .map(|&p| (transform * kurbo::Point::from(p)).into())
                .collect(),
        }
    }

    fn seq_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.points
            .iter()
            .zip(&other.points)
            .map(|(p, q)| p.xy_cmp(q))
            .find(|o| o.is_ne())
            .unwrap_or_else(|| self.len().cmp(&other.len()))
    }
}

/// The boundary of a union of rectangles: a set of [`Cycle`]s.
///
/// Disjoint parts of the union get a cycle each, and holes get their own
/// (clockwise) cycles, so cycles can nest arbitrarily deep, alternating
/// between boundaries and holes:
///
/// ```text
///   ╭───<──────╮
///   │xxxxxxxxxx│
///   │xxx╭>─╮xxx│
///   │xxx│  │xxx│
///   │xxx╰─<╯xxx│
///   │xxxxxxxxxx│
///   ╰──────>───╯
/// ```
///
/// The order of the cycles is an artifact of the sweep; call
/// [`normalize`](Contour::normalize) before comparing two contours.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Contour {
    cycles: Vec<Cycle>,
}

impl Contour {
    pub(crate) fn from_cycles(cycles: Vec<Cycle>) -> Self {
        Contour { cycles }
    }

    /// The cycles making up this contour.
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    /// The number of cycles.
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    /// Is this the contour of an empty union?
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// The total signed area: the area of the union, since holes count
    /// negatively.
    pub fn area(&self) -> f64 {
        self.cycles.iter().map(Cycle::signed_area).sum()
    }

    /// A rectangle bounding every vertex. Returns [`kurbo::Rect::ZERO`] for
    /// an empty contour.
    pub fn bounding_box(&self) -> kurbo::Rect {
        let mut points = self.cycles.iter().flat_map(|c| c.points().iter());
        let Some(first) = points.next() else {
            return kurbo::Rect::ZERO;
        };
        points.fold(
            kurbo::Rect::new(first.x, first.y, first.x, first.y),
            |r, p| kurbo::Rect::new(r.x0.min(p.x), r.y0.min(p.y), r.x1.max(p.x), r.y1.max(p.y)),
        )
    }

    /// Normalizes every cycle, then sorts the cycles lexicographically by
    /// their vertex sequences (ties broken by length).
    ///
    /// Two contours describing the same boundary compare equal after
    /// normalization, whatever order their cycles and vertices were
    /// generated in.
    pub fn normalize(&mut self) {
        for cycle in &mut self.cycles {
            cycle.normalize();
        }
        self.cycles.sort_by(Cycle::seq_cmp);
    }

    /// Returns a [normalized](Contour::normalize) copy.
    pub fn normalized(&self) -> Contour {
        let mut ret = self.clone();
        ret.normalize();
        ret
    }

    /// Applies an affine transform to every cycle.
    pub fn applying(&self, transform: Affine) -> Contour {
        Contour {
            cycles: self.cycles.iter().map(|c| c.applying(transform)).collect(),
        }
    }
}
