//! The divide-and-conquer triangulator itself: split the point set in half,
//! triangulate each half recursively, then walk up from the lower common
//! tangent merging the two halves one cross edge at a time.
//!
//! The recursion bottoms out at two and three points; every larger case
//! delegates to the merge step. Throughout, `left_of`/`right_of` are called
//! with points in the same order the source edge's own `org`/`dest` comes in
//! (no reordering needed), but `in_circle` is the one place a sign trap
//! hides: querying it along an edge's *forward* direction rather than its
//! reverse is what keeps this file's convention (`in_circle` positive means
//! inside, given the first three points in CCW order) consistent with the
//! tangent lines the sweep maintains.

use crate::point::Point;
use crate::predicates::{self, PredicateScalar};
use crate::quadedge::{EdgeId, QuadEdgeStore};

fn in_circle_fwd<T: PredicateScalar>(store: &QuadEdgeStore<T>, base: EdgeId, c: Point<T>, d: Point<T>) -> bool {
  predicates::in_circle(store.org_point(base), store.dest_point(base), c, d)
}

/// Triangulates the points in `[lo, hi)`, returning `(ldo, rdo)`: the
/// counter-clockwise convex-hull edge out of the leftmost point and the
/// clockwise convex-hull edge out of the rightmost point.
pub(crate) fn triangulate<T: PredicateScalar>(store: &mut QuadEdgeStore<T>, lo: u32, hi: u32) -> (EdgeId, EdgeId) {
  let n = hi - lo;
  match n {
    0 | 1 => unreachable!("triangulate requires at least two points"),
    2 => {
      let p0 = store.point_id(lo as usize);
      let p1 = store.point_id((lo + 1) as usize);
      let a = store.make_edge(p0, p1).expect("sorted, deduplicated points are never coincident");
      (a, a.sym())
    }
    3 => {
      let p1 = store.point_id(lo as usize);
      let p2 = store.point_id((lo + 1) as usize);
      let p3 = store.point_id((lo + 2) as usize);
      let a = store.make_edge(p1, p2).expect("sorted, deduplicated points are never coincident");
      let b = store.make_edge(p2, p3).expect("sorted, deduplicated points are never coincident");
      store.splice(a.sym(), b);

      let p3_point = store.point(p3);
      if predicates::right_of(p3_point, store.org_point(a), store.dest_point(a)) {
        store.connect(b, a);
        (a, b.sym())
      } else if predicates::left_of(p3_point, store.org_point(a), store.dest_point(a)) {
        let c = store.connect(b, a).expect("b and a share an endpoint by construction");
        (c.sym(), c)
      } else {
        // Collinear triple: no triangle to close.
        (a, b.sym())
      }
    }
    _ => {
      let m = lo + (n + 1) / 2;
      let (ldo, mut ldi) = triangulate(store, lo, m);
      let (mut rdi, rdo) = triangulate(store, m, hi);

      // Upper common tangent.
      loop {
        if predicates::right_of(store.org_point(rdi), store.org_point(ldi), store.dest_point(ldi)) {
          ldi = store.onext(ldi.sym());
        } else if predicates::left_of(store.org_point(ldi), store.org_point(rdi), store.dest_point(rdi)) {
          rdi = store.oprev(rdi.sym());
        } else {
          break;
        }
      }

      let mut rbase = store.connect(ldi.sym(), rdi).expect("tangent points are distinct by construction");
      let mut ldo = ldo;
      let mut rdo = rdo;
      if store.org(ldi) == store.org(ldo) {
        ldo = rbase;
      }
      if store.org(rdi) == store.org(rdo) {
        rdo = rbase.sym();
      }

      loop {
        let mut rcand = store.onext(rbase.sym());
        let mut lcand = store.oprev(rbase);
        let v_rcand = predicates::right_of(store.dest_point(rcand), store.org_point(rbase), store.dest_point(rbase));
        let v_lcand = predicates::right_of(store.dest_point(lcand), store.org_point(rbase), store.dest_point(rbase));
        if !v_rcand && !v_lcand {
          break;
        }
        if v_rcand {
          while predicates::right_of(store.dest_point(store.onext(rcand)), store.org_point(rbase), store.dest_point(rbase))
            && in_circle_fwd(store, rbase, store.dest_point(rcand), store.dest_point(store.onext(rcand)))
          {
            let t = store.onext(rcand);
            store.delete_edge(rcand);
            rcand = t;
          }
        }
        if v_lcand {
          while predicates::right_of(store.dest_point(store.oprev(lcand)), store.org_point(rbase), store.dest_point(rbase))
            && in_circle_fwd(store, rbase, store.dest_point(lcand), store.dest_point(store.oprev(lcand)))
          {
            let t = store.oprev(lcand);
            store.delete_edge(lcand);
            lcand = t;
          }
        }
        let take_rcand = !v_rcand
          || (v_lcand && predicates::in_circle(store.org_point(rcand), store.dest_point(rcand), store.org_point(lcand), store.dest_point(lcand)));
        rbase = if take_rcand {
          store.connect(lcand, rbase.sym()).expect("lcand and rbase share a triangle by construction")
        } else {
          store.connect(rbase.sym(), rcand.sym()).expect("rbase and rcand share a triangle by construction")
        };
      }

      (ldo, rdo)
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::point::sort_dedup;

  fn build(points: &[(i64, i64)]) -> (QuadEdgeStore<i64>, EdgeId, EdgeId) {
    let mut pts: Vec<Point<i64>> = points.iter().map(|&(x, y)| Point::new(x, y)).collect();
    sort_dedup(&mut pts);
    let n = pts.len() as u32;
    let mut store = QuadEdgeStore::with_points(pts);
    let (ldo, rdo) = triangulate(&mut store, 0, n);
    (store, ldo, rdo)
  }

  #[test]
  fn two_points_make_one_edge() {
    let (store, ldo, rdo) = build(&[(0, 0), (1, 1)]);
    assert_eq!(store.primary_edges().count(), 1);
    assert_eq!(rdo, ldo.sym());
  }

  #[test]
  fn three_ccw_points_close_a_triangle() {
    let (store, ldo, rdo) = build(&[(0, 0), (1, 0), (0, 1)]);
    assert_eq!(store.primary_edges().count(), 3);
    assert_ne!(ldo, rdo);
  }

  #[test]
  fn three_collinear_points_make_a_path() {
    let (store, _, _) = build(&[(0, 0), (1, 0), (2, 0)]);
    assert_eq!(store.primary_edges().count(), 2);
  }

  #[test]
  fn square_triangulates_into_two_triangles() {
    let (store, _, _) = build(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
    // 4 boundary edges + 1 diagonal.
    assert_eq!(store.primary_edges().count(), 5);
  }

  #[test]
  fn grid_triangulation_matches_eulers_formula() {
    // A 5x5 axis-aligned lattice has 16 boundary vertices (4 collinear sides
    // of 5 points each, corners shared); Euler's formula then pins the edge
    // count of any valid triangulation of it to 3V - 3 - H.
    let mut points = vec![];
    for x in 0..5 {
      for y in 0..5 {
        points.push((x, y));
      }
    }
    let (store, _, _) = build(&points);
    let v = points.len() as i64;
    let h = 16;
    assert_eq!(store.primary_edges().count() as i64, 3 * v - 3 - h);
  }
}
