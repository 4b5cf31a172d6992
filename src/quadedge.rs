//! The quad-edge store: an arena of directed darts plus the five topological
//! operators (`make_edge`, `splice`, `connect`, `delete_edge`, `swap`) that the
//! triangulator is built from.
//!
//! Darts are allocated in adjacent pairs, `e` at an even index and `e.sym()` at
//! the next odd one, so the twin of a dart is its index XORed with 1 — no
//! pointer or extra field is needed to find it. `dnext`/`dprev` are never
//! stored; they are computed on demand from `onext`/`oprev` through `sym`,
//! which also means there is nothing to keep in sync when an edge is spliced.

use std::collections::HashSet;

use crate::point::Point;
use crate::predicates::PredicateScalar;
use crate::Error;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(u32);

impl PointId {
  fn index(self) -> usize {
    self.0 as usize
  }
}

impl std::fmt::Debug for PointId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "p{}", self.0)
  }
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(u32);

impl EdgeId {
  const INVALID: EdgeId = EdgeId(u32::MAX);

  /// The dart's twin: same undirected edge, opposite direction.
  pub fn sym(self) -> EdgeId {
    EdgeId(self.0 ^ 1)
  }

  fn index(self) -> usize {
    self.0 as usize
  }

  fn pair_base(self) -> u32 {
    self.0 & !1
  }
}

impl std::fmt::Debug for EdgeId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "e{}", self.0)
  }
}

#[derive(Clone, Copy)]
struct Dart {
  org: PointId,
  onext: EdgeId,
  oprev: EdgeId,
  alive: bool,
}

impl Dart {
  const DEAD: Dart = Dart { org: PointId(u32::MAX), onext: EdgeId::INVALID, oprev: EdgeId::INVALID, alive: false };
}

/// Arena backing every dart and point of a single triangulation run.
pub struct QuadEdgeStore<T> {
  points: Vec<Point<T>>,
  darts: Vec<Dart>,
  free_pairs: Vec<u32>,
  edge_set: HashSet<(PointId, PointId)>,
}

fn canonical(a: PointId, b: PointId) -> (PointId, PointId) {
  if a.0 <= b.0 {
    (a, b)
  } else {
    (b, a)
  }
}

impl<T: PredicateScalar> QuadEdgeStore<T> {
  pub(crate) fn with_points(points: Vec<Point<T>>) -> QuadEdgeStore<T> {
    QuadEdgeStore { points, darts: Vec::new(), free_pairs: Vec::new(), edge_set: HashSet::new() }
  }

  pub(crate) fn point_id(&self, index: usize) -> PointId {
    PointId(index as u32)
  }

  pub fn point(&self, id: PointId) -> Point<T> {
    self.points[id.index()]
  }

  pub fn org(&self, e: EdgeId) -> PointId {
    self.darts[e.index()].org
  }

  pub fn dest(&self, e: EdgeId) -> PointId {
    self.org(e.sym())
  }

  pub fn org_point(&self, e: EdgeId) -> Point<T> {
    self.point(self.org(e))
  }

  pub fn dest_point(&self, e: EdgeId) -> Point<T> {
    self.point(self.dest(e))
  }

  pub fn onext(&self, e: EdgeId) -> EdgeId {
    self.darts[e.index()].onext
  }

  pub fn oprev(&self, e: EdgeId) -> EdgeId {
    self.darts[e.index()].oprev
  }

  /// `e.sym.onext.sym`: the next edge counter-clockwise around `dest(e)`.
  pub fn dnext(&self, e: EdgeId) -> EdgeId {
    self.onext(e.sym()).sym()
  }

  /// `e.sym.oprev.sym`: the previous edge counter-clockwise around `dest(e)`.
  pub fn dprev(&self, e: EdgeId) -> EdgeId {
    self.oprev(e.sym()).sym()
  }

  fn set_onext(&mut self, e: EdgeId, value: EdgeId) {
    self.darts[e.index()].onext = value;
  }

  fn set_oprev(&mut self, e: EdgeId, value: EdgeId) {
    self.darts[e.index()].oprev = value;
  }

  fn set_org(&mut self, e: EdgeId, value: PointId) {
    self.darts[e.index()].org = value;
  }

  fn edge_exists(&self, org: PointId, dest: PointId) -> bool {
    self.edge_set.contains(&canonical(org, dest))
  }

  /// Allocates a new edge `org -> dest`, its ring of one. Returns `None` (after
  /// logging) if the edge is degenerate or already present: both indicate a bug
  /// in the caller, not a condition a well-formed triangulation ever hits.
  pub fn make_edge(&mut self, org: PointId, dest: PointId) -> Option<EdgeId> {
    debug_assert_ne!(org, dest, "{:?}: {:?}", Error::ZeroLengthEdge, org);
    if org == dest {
      log::warn!("{:?}: make_edge({:?}, {:?})", Error::ZeroLengthEdge, org, dest);
      return None;
    }
    debug_assert!(!self.edge_exists(org, dest), "{:?}: {:?}-{:?}", Error::DuplicateEdge, org, dest);
    if self.edge_exists(org, dest) {
      log::warn!("{:?}: make_edge({:?}, {:?})", Error::DuplicateEdge, org, dest);
      return None;
    }

    let base = if let Some(base) = self.free_pairs.pop() {
      base
    } else {
      let base = self.darts.len() as u32;
      self.darts.push(Dart::DEAD);
      self.darts.push(Dart::DEAD);
      base
    };
    let e = EdgeId(base);
    let es = e.sym();
    self.darts[e.index()] = Dart { org, onext: e, oprev: e, alive: true };
    self.darts[es.index()] = Dart { org: dest, onext: es, oprev: es, alive: true };
    self.edge_set.insert(canonical(org, dest));
    Some(e)
  }

  /// Walks `a`'s ring looking for `b`.
  fn same_ring(&self, a: EdgeId, b: EdgeId) -> bool {
    let mut cursor = a;
    loop {
      if cursor == b {
        return true;
      }
      cursor = self.onext(cursor);
      if cursor == a {
        return false;
      }
    }
  }

  fn angle_to(&self, e: EdgeId) -> f64 {
    let o = self.org_point(e);
    let d = self.dest_point(e);
    (d.y.to_f64() - o.y.to_f64()).atan2(d.x.to_f64() - o.x.to_f64())
  }

  fn cw_angle(&self, from: EdgeId, to: EdgeId) -> f64 {
    let delta = self.angle_to(from) - self.angle_to(to);
    let two_pi = std::f64::consts::TAU;
    ((delta % two_pi) + two_pi) % two_pi
  }

  /// The first edge clockwise from `reference` in `b`'s ring.
  fn first_cw(&self, reference: EdgeId, b: EdgeId) -> EdgeId {
    let mut best = b;
    let mut best_angle = self.cw_angle(reference, b);
    let mut cursor = self.onext(b);
    while cursor != b {
      let angle = self.cw_angle(reference, cursor);
      if angle < best_angle {
        best = cursor;
        best_angle = angle;
      }
      cursor = self.onext(cursor);
    }
    best
  }

  /// Merges or splits the rings of `a` and `b`, which must share an origin.
  pub fn splice(&mut self, a: EdgeId, b: EdgeId) {
    if a == b {
      return;
    }
    if self.org(a) != self.org(b) {
      log::warn!("{:?}: splice({:?}, {:?})", Error::SpliceOriginMismatch, a, b);
      return;
    }
    let (mut a, mut b) = (a, b);
    if !self.same_ring(a, b) {
      a = self.first_cw(b, a);
      b = self.first_cw(a, b);
      if self.cw_angle(a, self.onext(b)) < self.cw_angle(a, b) || self.cw_angle(b, self.onext(a)) < self.cw_angle(b, a) {
        log::warn!("{:?}: splice({:?}, {:?})", Error::SpliceOverlap, a, b);
        return;
      }
    }
    let alpha = self.onext(a);
    let beta = self.onext(b);
    self.set_oprev(alpha, b);
    self.set_oprev(beta, a);
    self.set_onext(a, beta);
    self.set_onext(b, alpha);
  }

  /// Creates a new edge `dest(a) -> org(b)` connected into both rings, such
  /// that the left face of `a`, `e` and `b` is the same face.
  pub fn connect(&mut self, a: EdgeId, b: EdgeId) -> Option<EdgeId> {
    let e = self.make_edge(self.dest(a), self.org(b))?;
    self.splice(e, self.oprev(a.sym()));
    self.splice(e.sym(), b);
    Some(e)
  }

  /// Removes `e` from both its rings and returns its pair to the free list.
  pub fn delete_edge(&mut self, e: EdgeId) {
    self.splice(e, self.oprev(e));
    let es = e.sym();
    self.splice(es, self.oprev(es));
    self.edge_set.remove(&canonical(self.org(e), self.dest(e)));
    self.darts[e.index()] = Dart::DEAD;
    self.darts[es.index()] = Dart::DEAD;
    self.free_pairs.push(e.pair_base());
  }

  /// Rotates `e` to the other diagonal of the quadrilateral formed with its
  /// neighbours. Unused by the divide-and-conquer triangulator, kept as part
  /// of the complete topological operator set.
  pub fn swap(&mut self, e: EdgeId) {
    let es = e.sym();
    let a = self.oprev(e);
    let b = self.oprev(es);
    self.splice(e, a);
    self.splice(es, b);
    self.set_org(e, self.dest(a));
    self.set_org(es, self.dest(b));
    let a_target = self.oprev(a.sym());
    let b_target = self.oprev(b.sym());
    self.splice(e, a_target);
    self.splice(es, b_target);
  }

  /// Every primary dart (the direction each edge was created in), in arena order.
  pub(crate) fn primary_edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
    self
      .darts
      .iter()
      .enumerate()
      .filter_map(|(i, dart)| if i % 2 == 0 && dart.alive { Some(EdgeId(i as u32)) } else { None })
  }

  pub fn edge(&self, id: EdgeId) -> Edge<'_, T> {
    Edge { store: self, id }
  }
}

/// A read-only, lifetime-bound view of one directed dart.
#[derive(Clone, Copy)]
pub struct Edge<'a, T> {
  store: &'a QuadEdgeStore<T>,
  id: EdgeId,
}

impl<'a, T: PredicateScalar> Edge<'a, T> {
  pub fn id(&self) -> EdgeId {
    self.id
  }

  pub fn org(&self) -> Point<T> {
    self.store.org_point(self.id)
  }

  pub fn dest(&self) -> Point<T> {
    self.store.dest_point(self.id)
  }

  pub fn sym(&self) -> Edge<'a, T> {
    Edge { store: self.store, id: self.id.sym() }
  }

  pub fn onext(&self) -> Edge<'a, T> {
    Edge { store: self.store, id: self.store.onext(self.id) }
  }

  pub fn oprev(&self) -> Edge<'a, T> {
    Edge { store: self.store, id: self.store.oprev(self.id) }
  }

  pub fn dnext(&self) -> Edge<'a, T> {
    Edge { store: self.store, id: self.store.dnext(self.id) }
  }

  pub fn dprev(&self) -> Edge<'a, T> {
    Edge { store: self.store, id: self.store.dprev(self.id) }
  }
}

impl<'a, T> std::fmt::Debug for Edge<'a, T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "Edge({:?})", self.id)
  }
}

#[cfg(test)]
mod test {
  use super::*;

  fn store_with_square() -> (QuadEdgeStore<i64>, Vec<PointId>) {
    let points = vec![Point::new(0i64, 0), Point::new(1, 0), Point::new(1, 1), Point::new(0, 1)];
    let mut store = QuadEdgeStore::with_points(points);
    let ids: Vec<PointId> = (0..4).map(|i| store.point_id(i)).collect();
    (store, ids)
  }

  #[test]
  fn sym_is_involutive() {
    let (mut store, ids) = store_with_square();
    let e = store.make_edge(ids[0], ids[1]).unwrap();
    assert_eq!(e.sym().sym(), e);
    assert_ne!(e.sym(), e);
  }

  #[test]
  fn fresh_edge_has_singleton_rings() {
    let (mut store, ids) = store_with_square();
    let e = store.make_edge(ids[0], ids[1]).unwrap();
    assert_eq!(store.onext(e), e);
    assert_eq!(store.oprev(e), e);
    assert_eq!(store.onext(e.sym()), e.sym());
  }

  #[test]
  fn make_edge_rejects_zero_length() {
    let (mut store, ids) = store_with_square();
    assert!(store.make_edge(ids[0], ids[0]).is_none());
  }

  #[test]
  fn make_edge_rejects_duplicate() {
    let (mut store, ids) = store_with_square();
    assert!(store.make_edge(ids[0], ids[1]).is_some());
    assert!(store.make_edge(ids[1], ids[0]).is_none());
    assert!(store.make_edge(ids[0], ids[1]).is_none());
  }

  #[test]
  fn splice_merges_and_splits_rings() {
    let (mut store, ids) = store_with_square();
    let a = store.make_edge(ids[0], ids[1]).unwrap();
    let b = store.make_edge(ids[0], ids[2]).unwrap();
    store.splice(a, b);
    // a and b now share org(0)'s ring.
    assert_eq!(store.onext(a), b);
    assert_eq!(store.onext(b), a);
    // splice is its own inverse.
    store.splice(a, b);
    assert_eq!(store.onext(a), a);
    assert_eq!(store.onext(b), b);
  }

  #[test]
  fn connect_creates_edge_between_destinations() {
    let (mut store, ids) = store_with_square();
    let a = store.make_edge(ids[0], ids[1]).unwrap();
    let b = store.make_edge(ids[2], ids[3]).unwrap();
    let c = store.connect(a, b).unwrap();
    assert_eq!(store.org(c), ids[1]);
    assert_eq!(store.dest(c), ids[2]);
  }

  #[test]
  fn delete_edge_frees_the_pair_for_reuse() {
    let (mut store, ids) = store_with_square();
    let a = store.make_edge(ids[0], ids[1]).unwrap();
    store.delete_edge(a);
    assert_eq!(store.primary_edges().count(), 0);
    let b = store.make_edge(ids[0], ids[1]).unwrap();
    assert_eq!(b.0, a.0);
  }

  #[test]
  fn primary_edges_yields_one_direction_per_edge() {
    let (mut store, ids) = store_with_square();
    store.make_edge(ids[0], ids[1]).unwrap();
    store.make_edge(ids[1], ids[2]).unwrap();
    assert_eq!(store.primary_edges().count(), 2);
  }
}
