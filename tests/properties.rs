//! Randomized properties of the contour computation, cross-checked against
//! exact rational arithmetic.
//!
//! All generated coordinates are integers, so every computation here (and in
//! the crate: the pipeline only compares and copies coordinates) is exact.

use isocontour::{contour, Contour, Cycle};
use kurbo::{Affine, Rect};
use malachite::Rational;
use proptest::prelude::*;

fn rat(x: f64) -> Rational {
    Rational::try_from(x).unwrap()
}

/// The exact area of the union of `rects`, by brute force on the compressed
/// coordinate grid.
fn union_area_exact(rects: &[Rect]) -> Rational {
    let rects: Vec<&Rect> = rects
        .iter()
        .filter(|r| r.width() > 0.0 && r.height() > 0.0)
        .collect();
    let mut xs: Vec<f64> = rects.iter().flat_map(|r| [r.x0, r.x1]).collect();
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    xs.dedup();
    let mut ys: Vec<f64> = rects.iter().flat_map(|r| [r.y0, r.y1]).collect();
    ys.sort_by(|a, b| a.partial_cmp(b).unwrap());
    ys.dedup();

    let mut total = Rational::from(0);
    for i in 0..xs.len().saturating_sub(1) {
        for j in 0..ys.len().saturating_sub(1) {
            let covered = rects.iter().any(|r| {
                r.x0 <= xs[i] && xs[i + 1] <= r.x1 && r.y0 <= ys[j] && ys[j + 1] <= r.y1
            });
            if covered {
                total += (rat(xs[i + 1]) - rat(xs[i])) * (rat(ys[j + 1]) - rat(ys[j]));
            }
        }
    }
    total
}

/// The exact sum of the signed shoelace areas of all cycles.
fn contour_area_exact(contour: &Contour) -> Rational {
    let mut total = Rational::from(0);
    for cycle in contour.cycles() {
        let pts = cycle.points();
        for k in 0..pts.len() {
            let p = pts[k];
            let q = pts[(k + 1) % pts.len()];
            total += rat(p.x) * rat(q.y) - rat(q.x) * rat(p.y);
        }
    }
    total / Rational::from(2)
}

/// A direction- and rotation-insensitive key for a cycle, for comparisons
/// where the traversal direction legitimately differs (reflections).
///
/// Coordinates are integer-valued here, so the `as i64` casts are exact.
fn loop_key(cycle: &Cycle) -> Vec<(i64, i64)> {
    let pts: Vec<(i64, i64)> = cycle
        .points()
        .iter()
        .map(|p| (p.x as i64, p.y as i64))
        .collect();
    let mut rev = pts.clone();
    rev.reverse();

    let mut best: Option<Vec<(i64, i64)>> = None;
    for seq in [pts, rev] {
        for r in 0..seq.len() {
            let rot: Vec<(i64, i64)> = seq[r..].iter().chain(&seq[..r]).copied().collect();
            if best.as_ref().map_or(true, |b| rot < *b) {
                best = Some(rot);
            }
        }
    }
    best.unwrap()
}

fn sorted_loop_keys(contour: &Contour) -> Vec<Vec<(i64, i64)>> {
    let mut keys: Vec<_> = contour.cycles().iter().map(loop_key).collect();
    keys.sort();
    keys
}

fn arb_rect() -> impl Strategy<Value = Rect> {
    (-40i64..40, -40i64..40, 0i64..25, 0i64..25).prop_map(|(x, y, w, h)| {
        Rect::new(x as f64, y as f64, (x + w) as f64, (y + h) as f64)
    })
}

fn arb_rects() -> impl Strategy<Value = Vec<Rect>> {
    prop::collection::vec(arb_rect(), 0..10)
}

proptest! {
    #[test]
    fn area_is_conserved(rects in arb_rects()) {
        let out = contour(rects.clone()).unwrap();
        prop_assert_eq!(contour_area_exact(&out), union_area_exact(&rects));
    }

    #[test]
    fn cycles_alternate_horizontal_and_vertical(rects in arb_rects()) {
        let out = contour(rects).unwrap();
        for cycle in out.cycles() {
            prop_assert!(cycle.len() >= 4);
            prop_assert_eq!(cycle.len() % 2, 0);
            // Cycles start with a horizontal edge (the connector out of the
            // first vertical edge's end), and strictly alternate from there.
            let pts = cycle.points();
            for k in 0..pts.len() {
                let p = pts[k];
                let q = pts[(k + 1) % pts.len()];
                if k % 2 == 0 {
                    prop_assert!(p.y == q.y && p.x != q.x, "expected horizontal: {:?} -- {:?}", p, q);
                } else {
                    prop_assert!(p.x == q.x && p.y != q.y, "expected vertical: {:?} -- {:?}", p, q);
                }
            }
        }
    }

    #[test]
    fn union_is_idempotent(rects in arb_rects()) {
        let once = contour(rects.clone()).unwrap().normalized();
        let twice = contour(rects.iter().copied().chain(rects.iter().copied()))
            .unwrap()
            .normalized();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn translation_commutes(rects in arb_rects(), dx in -100i64..100, dy in -100i64..100) {
        let (dx, dy) = (dx as f64, dy as f64);
        let translated: Vec<Rect> = rects
            .iter()
            .map(|r| Rect::new(r.x0 + dx, r.y0 + dy, r.x1 + dx, r.y1 + dy))
            .collect();
        let direct = contour(translated).unwrap().normalized();
        let applied = contour(rects)
            .unwrap()
            .applying(Affine::translate((dx, dy)))
            .normalized();
        prop_assert_eq!(direct, applied);
    }

    #[test]
    fn integer_scaling_commutes(rects in arb_rects(), k in 1i64..5) {
        let k = k as f64;
        let scaled: Vec<Rect> = rects
            .iter()
            .map(|r| Rect::new(r.x0 * k, r.y0 * k, r.x1 * k, r.y1 * k))
            .collect();
        let direct = contour(scaled).unwrap().normalized();
        let applied = contour(rects)
            .unwrap()
            .applying(Affine::scale(k))
            .normalized();
        prop_assert_eq!(direct, applied);
    }

    #[test]
    fn reflection_commutes(rects in arb_rects()) {
        // Reflection reverses traversal direction, so compare the cycles as
        // undirected loops and check that the signed areas flip.
        let reflected: Vec<Rect> = rects
            .iter()
            .map(|r| Rect::new(-r.x1, r.y0, -r.x0, r.y1))
            .collect();
        let direct = contour(reflected).unwrap();
        let applied = contour(rects).unwrap().applying(Affine::FLIP_X);
        prop_assert_eq!(sorted_loop_keys(&direct), sorted_loop_keys(&applied));
        prop_assert_eq!(
            contour_area_exact(&direct),
            -contour_area_exact(&applied)
        );
    }

    #[test]
    fn separated_rectangles_contribute_independently(rects in arb_rects()) {
        // Keep a subset of rectangles that are pairwise strictly separated
        // (not even touching); their union contour is the collection of their
        // individual contours.
        let mut kept: Vec<Rect> = Vec::new();
        for r in rects {
            if r.width() <= 0.0 || r.height() <= 0.0 {
                continue;
            }
            let grown = r.inflate(1.0, 1.0);
            if kept.iter().all(|k| k.intersect(grown).is_zero_area()) {
                kept.push(r);
            }
        }

        let combined = contour(kept.iter().copied()).unwrap().normalized();
        let mut individual: Vec<Vec<(f64, f64)>> = Vec::new();
        for r in &kept {
            let single = contour([*r]).unwrap().normalized();
            prop_assert_eq!(single.cycles().len(), 1);
            individual.push(
                single.cycles()[0]
                    .points()
                    .iter()
                    .map(|p| (p.x, p.y))
                    .collect(),
            );
        }
        let mut combined_cycles: Vec<Vec<(f64, f64)>> = combined
            .cycles()
            .iter()
            .map(|c| c.points().iter().map(|p| (p.x, p.y)).collect())
            .collect();
        individual.sort_by(|a, b| a.partial_cmp(b).unwrap());
        combined_cycles.sort_by(|a, b| a.partial_cmp(b).unwrap());
        prop_assert_eq!(combined_cycles, individual);
    }

    #[test]
    fn normalization_is_idempotent(rects in arb_rects()) {
        let once = contour(rects).unwrap().normalized();
        prop_assert_eq!(once.normalized(), once);
    }
}
