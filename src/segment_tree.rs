//! A segment tree over the unit gaps of the compressed y scale.
//!
//! The tree maintains the one-dimensional union of the currently-active
//! y spans. Inserting or removing a span reports the sub-spans whose coverage
//! just changed between "covered" and "exposed"; those are exactly the pieces
//! of vertical rectangle edge that belong to the contour at the sweep's
//! current x position.

/// A half-open interval `[lo, hi)` in y-index space.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    /// Inclusive lower bound.
    pub lo: usize,
    /// Exclusive upper bound.
    pub hi: usize,
}

impl std::fmt::Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.lo, self.hi)
    }
}

impl Span {
    /// Create a new span. `lo` must be strictly less than `hi`.
    pub fn new(lo: usize, hi: usize) -> Self {
        debug_assert!(lo < hi);
        Span { lo, hi }
    }

    fn contains(&self, lo: usize, hi: usize) -> bool {
        self.lo <= lo && hi <= self.hi
    }
}

/// Coverage state of one tree node.
///
/// `Full` means the node's entire range is covered by a span that was
/// registered at this very node (it stopped its descent here). A node all of
/// whose leaves are covered by spans registered further down is only
/// `Partial`; that's fine, because boundary reporting recurses through
/// `Partial` nodes and the `Full` descendants emit nothing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
enum Status {
    /// No leaf below this node is covered by a span registered at or below it.
    #[default]
    Empty,
    /// Some leaf below this node is covered, but not all of them by a span
    /// registered at this node.
    Partial,
    /// A span registered at this node covers its whole range.
    Full,
}

#[derive(Clone, Debug, Default)]
struct Node {
    /// How many active spans fully contain this node's range and stopped
    /// their descent here.
    insertions: u32,
    status: Status,
}

/// The number of leaves in the left subtree of a node with `count` leaves:
/// the largest power of two strictly less than `count`.
///
/// This makes the left child a perfect subtree, so only the right spine can
/// be ragged and the whole tree can live in a flat pre-order array with no
/// child pointers: the left child of node `i` is at `i + 1` and the right
/// child at `i + 2 * split(count)`.
fn split(count: usize) -> usize {
    debug_assert!(count >= 2);
    1 << (usize::BITS - 1 - (count - 1).leading_zeros())
}

/// A segment tree over `leaves` unit segments, supporting span insertion and
/// removal with boundary reporting.
///
/// The `emit` callback passed to [`insert`](CoverageTree::insert) and
/// [`remove`](CoverageTree::remove) receives the maximal node ranges (as
/// `(lo, hi)` index pairs, in increasing order) that changed between exposed
/// and covered. Ranges that merely touch may be reported separately when they
/// straddle a subtree boundary; the sweep driver coalesces them.
#[derive(Clone, Debug)]
pub struct CoverageTree {
    nodes: Vec<Node>,
    leaves: usize,
}

impl CoverageTree {
    /// Creates a tree over `leaves` unit segments, all exposed.
    pub fn new(leaves: usize) -> Self {
        assert!(leaves >= 1);
        CoverageTree {
            nodes: vec![Node::default(); 2 * leaves - 1],
            leaves,
        }
    }

    /// Marks `span` as active, reporting the sub-spans that were exposed
    /// until now.
    ///
    /// Spans may be inserted multiple times; coverage is counted, not
    /// idempotent.
    pub fn insert<F: FnMut(usize, usize)>(&mut self, span: Span, emit: &mut F) {
        debug_assert!(span.hi <= self.leaves);
        self.insert_at(0, 0, self.leaves, span, true, emit);
    }

    /// Un-marks one insertion of `span`, reporting the sub-spans that are
    /// exposed from now on.
    ///
    /// Calls must match inserts: removing a span that isn't active is a bug.
    pub fn remove<F: FnMut(usize, usize)>(&mut self, span: Span, emit: &mut F) {
        debug_assert!(span.hi <= self.leaves);
        self.remove_at(0, 0, self.leaves, span, true, emit);
    }

    fn insert_at<F: FnMut(usize, usize)>(
        &mut self,
        idx: usize,
        lo: usize,
        count: usize,
        span: Span,
        notify: bool,
        emit: &mut F,
    ) {
        if span.contains(lo, lo + count) {
            if notify {
                self.report(idx, lo, count, emit);
            }
            let node = &mut self.nodes[idx];
            node.insertions += 1;
            node.status = Status::Full;
            return;
        }

        // A leaf that overlaps the span is contained in it, so we only get
        // here for internal nodes.
        assert!(count > 1, "span {span:?} fails to contain leaf {lo}");

        // Inside a subtree that's already fully covered, nothing we do can
        // change what's exposed; descend only to keep the counts up to date.
        let notify = notify && self.nodes[idx].status != Status::Full;
        let left = split(count);
        if span.lo < lo + left {
            self.insert_at(idx + 1, lo, left, span, notify, emit);
        }
        if span.hi > lo + left {
            self.insert_at(idx + 2 * left, lo + left, count - left, span, notify, emit);
        }
        let node = &mut self.nodes[idx];
        node.status = node.status.max(Status::Partial);
    }

    fn remove_at<F: FnMut(usize, usize)>(
        &mut self,
        idx: usize,
        lo: usize,
        count: usize,
        span: Span,
        notify: bool,
        emit: &mut F,
    ) {
        if span.contains(lo, lo + count) {
            let node = &mut self.nodes[idx];
            assert!(node.insertions > 0, "removed span {span:?} was never inserted");
            node.insertions -= 1;
            self.refresh_status(idx, count);
            if notify {
                self.report(idx, lo, count, emit);
            }
            return;
        }

        assert!(count > 1, "span {span:?} fails to contain leaf {lo}");

        let notify = notify && self.nodes[idx].status != Status::Full;
        let left = split(count);
        if span.lo < lo + left {
            self.remove_at(idx + 1, lo, left, span, notify, emit);
        }
        if span.hi > lo + left {
            self.remove_at(idx + 2 * left, lo + left, count - left, span, notify, emit);
        }
        self.refresh_status(idx, count);
    }

    fn refresh_status(&mut self, idx: usize, count: usize) {
        let status = if self.nodes[idx].insertions > 0 {
            Status::Full
        } else if count == 1 {
            Status::Empty
        } else {
            let left = split(count);
            if self.nodes[idx + 1].status != Status::Empty
                || self.nodes[idx + 2 * left].status != Status::Empty
            {
                Status::Partial
            } else {
                Status::Empty
            }
        };
        self.nodes[idx].status = status;
    }

    /// Emits the maximal exposed ranges under `idx`.
    ///
    /// On insertion this runs *before* the insertion count is bumped (the
    /// exposed ranges are about to get covered); on removal it runs *after*
    /// the count drops (they just got exposed).
    fn report<F: FnMut(usize, usize)>(&self, idx: usize, lo: usize, count: usize, emit: &mut F) {
        match self.nodes[idx].status {
            Status::Empty => emit(lo, lo + count),
            Status::Full => {}
            Status::Partial => {
                debug_assert!(count > 1);
                let left = split(count);
                self.report(idx + 1, lo, left, emit);
                self.report(idx + 2 * left, lo + left, count - left, emit);
            }
        }
    }
}
