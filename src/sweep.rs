//! Coordinate compression, sweep events, and the sweep driver.
//!
//! The sweep moves left to right over the rectangles' vertical edges. Each
//! edge is an event that inserts or removes a y span from the
//! [`CoverageTree`]; the sub-spans the tree reports as changing coverage are
//! collected into [`ContourEdge`]s, the vertical pieces of the output
//! contour.

use kurbo::Rect;

use crate::geom::Point;
use crate::num::CheapOrderedFloat;
use crate::segment_tree::{CoverageTree, Span};

/// The distinct y coordinates of the input, sorted, with a dense index.
pub struct YScale {
    ys: Vec<f64>,
}

impl YScale {
    /// Collects the y coordinates of `rects`, which must all be non-empty.
    pub fn new(rects: &[Rect]) -> Self {
        let mut ys: Vec<f64> = rects.iter().flat_map(|r| [r.y0, r.y1]).collect();
        ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
        ys.dedup();
        YScale { ys }
    }

    /// The number of distinct y values. At least 2, since every non-empty
    /// rectangle has two distinct y coordinates.
    pub fn len(&self) -> usize {
        self.ys.len()
    }

    /// The index of `y`, which must be one of the collected coordinates.
    pub fn index_of(&self, y: f64) -> usize {
        self.ys
            .binary_search_by(|p| CheapOrderedFloat::from(*p).cmp(&CheapOrderedFloat::from(y)))
            .unwrap()
    }

    /// The y value at `idx`.
    pub fn value(&self, idx: usize) -> f64 {
        self.ys[idx]
    }
}

/// Which side of a rectangle a sweep event comes from.
///
/// `Entering` sorts before `Exiting`: when a rectangle's right edge meets
/// another's left edge at the same x, the second rectangle becomes active
/// before the first one goes away, so the shared edge stays interior and the
/// two rectangles fuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CrossingType {
    /// The left edge of a rectangle: its y span becomes active.
    Entering,
    /// The right edge of a rectangle: its y span goes away.
    Exiting,
}

/// One vertical rectangle edge, ready to sweep.
#[derive(Clone, Copy, PartialEq)]
pub struct SweepEvent {
    x: f64,
    crossing: CrossingType,
    span: Span,
}

impl Eq for SweepEvent {}

impl std::fmt::Debug for SweepEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} at x={:?}: {:?}", self.crossing, self.x, self.span)
    }
}

impl Ord for SweepEvent {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        CheapOrderedFloat::from(self.x)
            .cmp(&CheapOrderedFloat::from(other.x))
            .then_with(|| (self.crossing, self.span).cmp(&(other.crossing, other.span)))
    }
}

impl PartialOrd for SweepEvent {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A vertical edge of the contour.
///
/// The edge's orientation keeps the occupied region on its left (y grows
/// downward): an `Entering` edge has the union on its right-hand side in
/// sweep direction, so it runs upward, and an `Exiting` edge runs downward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContourEdge {
    x: f64,
    y_lo: f64,
    y_hi: f64,
    pub(crate) crossing: CrossingType,
}

impl ContourEdge {
    /// The endpoint at which a cycle enters this edge.
    pub fn start(&self) -> Point {
        match self.crossing {
            CrossingType::Entering => Point::new(self.x, self.y_hi),
            CrossingType::Exiting => Point::new(self.x, self.y_lo),
        }
    }

    /// The endpoint at which a cycle leaves this edge.
    pub fn end(&self) -> Point {
        match self.crossing {
            CrossingType::Entering => Point::new(self.x, self.y_lo),
            CrossingType::Exiting => Point::new(self.x, self.y_hi),
        }
    }
}

/// Sweeps over `rects` and returns the vertical edges of the union's
/// contour, in sweep order.
///
/// Rectangles with a zero (or negative) extent in either axis are skipped.
pub fn sweep(rects: &[Rect]) -> Vec<ContourEdge> {
    let rects: Vec<Rect> = rects
        .iter()
        .copied()
        .filter(|r| r.width() > 0.0 && r.height() > 0.0)
        .collect();
    if rects.is_empty() {
        return Vec::new();
    }

    let scale = YScale::new(&rects);
    let mut events = Vec::with_capacity(rects.len() * 2);
    for r in &rects {
        let span = Span::new(scale.index_of(r.y0), scale.index_of(r.y1));
        events.push(SweepEvent {
            x: r.x0,
            crossing: CrossingType::Entering,
            span,
        });
        events.push(SweepEvent {
            x: r.x1,
            crossing: CrossingType::Exiting,
            span,
        });
    }
    events.sort_unstable();

    let mut tree = CoverageTree::new(scale.len() - 1);
    let mut edges = Vec::new();

    // Indices of the endpoints of the spans reported so far in the current
    // event group. When a new span starts exactly where the previous one
    // ended, the shared endpoint cancels and the two merge into one edge.
    let mut endpoints: Vec<usize> = Vec::new();

    // Events sharing an x and a crossing type act on the tree as one group:
    // their reported spans can touch (two stacked rectangles entering at the
    // same x), and flushing them together coalesces such spans into a single
    // edge.
    let mut events = events.into_iter().peekable();
    while let Some(first) = events.next() {
        {
            let mut push_span = |lo: usize, hi: usize| {
                if endpoints.last() == Some(&lo) {
                    endpoints.pop();
                } else {
                    endpoints.push(lo);
                }
                endpoints.push(hi);
            };

            let mut apply = |ev: SweepEvent| match ev.crossing {
                CrossingType::Entering => tree.insert(ev.span, &mut push_span),
                CrossingType::Exiting => tree.remove(ev.span, &mut push_span),
            };

            apply(first);
            while events
                .peek()
                .is_some_and(|ev| ev.x == first.x && ev.crossing == first.crossing)
            {
                let ev = events.next().unwrap();
                apply(ev);
            }
        }

        assert!(
            endpoints.len() % 2 == 0,
            "odd number of contour endpoints at x={:?}",
            first.x
        );

        // The endpoint stack only merges spans that are reported in
        // increasing order. Removals can report out of order (removing an
        // outer span exposes pieces on both sides of a nested one that goes
        // away later in the same group), so merge the rest here; touching
        // collinear edges would otherwise put zero-length connectors in the
        // output cycles.
        let mut spans: Vec<(usize, usize)> = endpoints
            .chunks_exact(2)
            .map(|pair| (pair[0], pair[1]))
            .collect();
        spans.sort_unstable();
        endpoints.clear();

        let mut spans = spans.into_iter().peekable();
        while let Some((lo, mut hi)) = spans.next() {
            while spans.peek().is_some_and(|&(next_lo, _)| next_lo == hi) {
                hi = spans.next().unwrap().1;
            }
            edges.push(ContourEdge {
                x: first.x,
                y_lo: scale.value(lo),
                y_hi: scale.value(hi),
                crossing: first.crossing,
            });
        }
    }

    edges
}
