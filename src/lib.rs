//! Divide-and-conquer Delaunay triangulation over a quad-edge data structure.
//!
//! The triangulator follows Guibas & Stolfi: sort the input, split it in
//! half, triangulate each half recursively, and merge the two halves by
//! walking up from their lower common tangent, deleting edges that violate
//! the empty-circumcircle property as it goes. The topology lives in a
//! [`quadedge::QuadEdgeStore`], an arena of directed darts addressed by
//! index rather than pointer, with each dart's twin found by flipping the
//! low bit of its index.
//!
//! ```
//! use quad_delaunay::delaunay;
//!
//! let triangulation = delaunay(vec![(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
//! assert_eq!(triangulation.len(), 5); // 4 hull edges + 1 diagonal
//! ```

pub mod point;
pub mod predicates;
pub mod quadedge;
mod triangulate;

pub use point::Point;
pub use predicates::PredicateScalar;
pub use quadedge::{Edge, EdgeId, PointId};

/// Conditions a well-formed triangulation never actually hits. Every
/// operation that can raise one of these logs a warning and no-ops rather
/// than propagating a `Result`, since by construction the triangulator never
/// asks a topological operator to do something invalid; seeing one of these
/// in the logs means there is a bug upstream, not a bad input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
  /// `make_edge` was asked to connect a point to itself.
  ZeroLengthEdge,
  /// `make_edge` was asked to create an edge that already exists.
  DuplicateEdge,
  /// `splice` was given two edges with different origins.
  SpliceOriginMismatch,
  /// `splice` would have folded one edge ring over another.
  SpliceOverlap,
}

/// A completed triangulation: the quad-edge arena plus the pair of hull
/// edges the divide-and-conquer sweep ends on.
pub struct Triangulation<T: PredicateScalar> {
  store: quadedge::QuadEdgeStore<T>,
  hull: Option<(EdgeId, EdgeId)>,
}

impl<T: PredicateScalar> Triangulation<T> {
  /// Every edge of the triangulation, each appearing once (in the direction
  /// it was first created in; `.sym()` reaches the other direction).
  pub fn edges(&self) -> impl Iterator<Item = Edge<'_, T>> + '_ {
    self.store.primary_edges().map(move |id| self.store.edge(id))
  }

  pub fn edge(&self, id: EdgeId) -> Edge<'_, T> {
    self.store.edge(id)
  }

  pub fn len(&self) -> usize {
    self.store.primary_edges().count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// The counter-clockwise convex-hull edge out of the leftmost point.
  pub fn hull_leftmost_ccw(&self) -> Option<Edge<'_, T>> {
    self.hull.map(|(ldo, _)| self.store.edge(ldo))
  }

  /// The clockwise convex-hull edge out of the rightmost point.
  pub fn hull_rightmost_cw(&self) -> Option<Edge<'_, T>> {
    self.hull.map(|(_, rdo)| self.store.edge(rdo))
  }
}

/// Computes the Delaunay triangulation of `points`.
///
/// Input is sorted lexicographically and deduplicated first, so order and
/// exact duplicates never affect the result. Fewer than two distinct points
/// produce an empty triangulation rather than an error.
pub fn delaunay<T, I>(points: I) -> Triangulation<T>
where
  T: PredicateScalar,
  I: IntoIterator<Item = (T, T)>,
{
  let mut pts: Vec<Point<T>> = points.into_iter().map(Point::from).collect();
  point::sort_dedup(&mut pts);
  let n = pts.len();
  let mut store = quadedge::QuadEdgeStore::with_points(pts);
  if n < 2 {
    return Triangulation { store, hull: None };
  }
  let hull = triangulate::triangulate(&mut store, 0, n as u32);
  Triangulation { store, hull: Some(hull) }
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn empty_and_singleton_inputs_are_not_errors() {
    let empty: Triangulation<f64> = delaunay(Vec::new());
    assert!(empty.is_empty());
    assert!(empty.hull_leftmost_ccw().is_none());

    let one = delaunay(vec![(0.0, 0.0)]);
    assert!(one.is_empty());
  }

  #[test]
  fn duplicate_points_are_collapsed_before_triangulating() {
    let t = delaunay(vec![(0.0, 0.0), (0.0, 0.0), (1.0, 0.0), (0.0, 1.0)]);
    assert_eq!(t.len(), 3);
  }

  #[test]
  fn order_of_input_does_not_affect_edge_count() {
    let a = delaunay(vec![(0i64, 0), (4, 0), (4, 4), (0, 4), (2, 2)]);
    let b = delaunay(vec![(2i64, 2), (0, 4), (4, 4), (4, 0), (0, 0)]);
    assert_eq!(a.len(), b.len());
  }

  #[test]
  fn square_has_four_hull_edges_and_one_diagonal() {
    let t = delaunay(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    assert_eq!(t.len(), 5);
  }
}
