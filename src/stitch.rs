//! Stitching vertical contour edges into closed cycles.
//!
//! The sweep only produces the vertical edges of the contour. The horizontal
//! edges are implicit: along any horizontal line, the contour crosses an even
//! number of vertical edge endpoints, and sorting those endpoints from left
//! to right pairs each edge leaving the line with the next edge entering it.
//! Linking the pairs end-to-start gives a permutation of the edges whose
//! orbits are the output cycles.

use crate::contour::Cycle;
use crate::geom::Point;
use crate::sweep::ContourEdge;

/// An index into the contour-edge arena.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeIdx(usize);

/// A vector indexed by [`EdgeIdx`].
#[derive(Clone, PartialEq, Eq)]
pub struct EdgeVec<T> {
    inner: Vec<T>,
}

impl_typed_vec!(EdgeVec, EdgeIdx, "e");

#[derive(Clone, Copy, Debug)]
struct Endpoint {
    p: Point,
    edge: EdgeIdx,
    is_end: bool,
}

/// Walks the edges emitted by the sweep and assembles them into cycles.
pub fn stitch(edges: &[ContourEdge]) -> Vec<Cycle> {
    let edges = EdgeVec::from_vec(edges.to_vec());

    let mut endpoints = Vec::with_capacity(edges.len() * 2);
    for (idx, e) in edges.iter() {
        endpoints.push(Endpoint {
            p: e.start(),
            edge: idx,
            is_end: false,
        });
        endpoints.push(Endpoint {
            p: e.end(),
            edge: idx,
            is_end: true,
        });
    }

    // Sort along horizontal lines. Two endpoints can coincide exactly when
    // two rectangles touch at a corner; breaking the tie with Exiting first
    // closes each square off on its own instead of pinching the two cycles
    // together into a figure eight.
    endpoints.sort_by(|a, b| {
        a.p.cmp(&b.p)
            .then_with(|| edges[b.edge].crossing.cmp(&edges[a.edge].crossing))
    });

    // The permutation: the cycle through `e` continues at `links[e]`, via a
    // horizontal connector from `e`'s end to the next edge's start.
    let mut links: EdgeVec<Option<EdgeIdx>> = EdgeVec::with_size(edges.len());
    for pair in endpoints.chunks_exact(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(
            a.is_end != b.is_end,
            "mispaired contour endpoints at {:?} and {:?}",
            a.p,
            b.p
        );
        let (from, to) = if a.is_end { (a, b) } else { (b, a) };
        debug_assert!(links[from.edge].is_none());
        links[from.edge] = Some(to.edge);
    }

    let mut cycles = Vec::new();
    for first in links.indices() {
        if links[first].is_none() {
            continue;
        }

        let mut points = Vec::new();
        points.push(edges[first].end());
        let mut cur = first;
        loop {
            let next = links[cur]
                .take()
                .expect("contour edge chain broke before closing");
            points.push(edges[next].start());
            if next == first {
                break;
            }
            points.push(edges[next].end());
            cur = next;
        }
        cycles.push(Cycle::new(points));
    }

    cycles
}
