//! Orientation and in-circle tests.
//!
//! `f64` goes through `geometry-predicates`' adaptive-precision routines so that
//! nearly-degenerate configurations are classified correctly instead of falling
//! prey to floating-point cancellation. Integer scalars are widened to a type
//! with enough headroom to compute the same determinants exactly.

use crate::point::Point;

/// The sign of a predicate determinant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
  Negative,
  Zero,
  Positive,
}

impl Sign {
  fn of_f64(v: f64) -> Sign {
    if v > 0.0 {
      Sign::Positive
    } else if v < 0.0 {
      Sign::Negative
    } else {
      Sign::Zero
    }
  }

  fn of_i128(v: i128) -> Sign {
    use std::cmp::Ordering::*;
    match v.cmp(&0) {
      Greater => Sign::Positive,
      Less => Sign::Negative,
      Equal => Sign::Zero,
    }
  }
}

/// A coordinate type the triangulator can run the two geometric predicates over.
///
/// `orient` computes the sign of `(a.x-p.x)*(b.y-p.y) - (a.y-p.y)*(b.x-p.x)`: positive
/// when `p, a, b` wind counter-clockwise. `in_circle` computes the sign of the
/// standard lifted-paraboloid determinant: positive when `d` lies strictly inside
/// the circle through `a, b, c` (assumed counter-clockwise).
pub trait PredicateScalar: Copy + PartialEq + PartialOrd + std::fmt::Debug {
  fn to_f64(self) -> f64;
  fn orient(p: Point<Self>, a: Point<Self>, b: Point<Self>) -> Sign;
  fn in_circle(a: Point<Self>, b: Point<Self>, c: Point<Self>, d: Point<Self>) -> Sign;
}

pub fn right_of<T: PredicateScalar>(p: Point<T>, a: Point<T>, b: Point<T>) -> bool {
  T::orient(p, a, b) == Sign::Positive
}

pub fn left_of<T: PredicateScalar>(p: Point<T>, a: Point<T>, b: Point<T>) -> bool {
  T::orient(p, a, b) == Sign::Negative
}

pub fn in_circle<T: PredicateScalar>(a: Point<T>, b: Point<T>, c: Point<T>, d: Point<T>) -> bool {
  T::in_circle(a, b, c, d) == Sign::Positive
}

impl PredicateScalar for f64 {
  fn to_f64(self) -> f64 {
    self
  }

  fn orient(p: Point<f64>, a: Point<f64>, b: Point<f64>) -> Sign {
    let det = geometry_predicates::orient2d([p.x, p.y], [a.x, a.y], [b.x, b.y]);
    Sign::of_f64(det)
  }

  fn in_circle(a: Point<f64>, b: Point<f64>, c: Point<f64>, d: Point<f64>) -> Sign {
    let det = geometry_predicates::incircle([a.x, a.y], [b.x, b.y], [c.x, c.y], [d.x, d.y]);
    Sign::of_f64(det)
  }
}

macro_rules! impl_predicate_scalar_int {
  ($ty:ty, $wide:ty) => {
    impl PredicateScalar for $ty {
      fn to_f64(self) -> f64 {
        self as f64
      }

      fn orient(p: Point<$ty>, a: Point<$ty>, b: Point<$ty>) -> Sign {
        let (px, py) = (p.x as $wide, p.y as $wide);
        let (ax, ay) = (a.x as $wide, a.y as $wide);
        let (bx, by) = (b.x as $wide, b.y as $wide);
        let det = (ax - px) * (by - py) - (ay - py) * (bx - px);
        Sign::of_i128(det as i128)
      }

      fn in_circle(a: Point<$ty>, b: Point<$ty>, c: Point<$ty>, d: Point<$ty>) -> Sign {
        let (dx, dy) = (d.x as $wide, d.y as $wide);
        let adx = a.x as $wide - dx;
        let ady = a.y as $wide - dy;
        let bdx = b.x as $wide - dx;
        let bdy = b.y as $wide - dy;
        let cdx = c.x as $wide - dx;
        let cdy = c.y as $wide - dy;
        let al = adx * adx + ady * ady;
        let bl = bdx * bdx + bdy * bdy;
        let cl = cdx * cdx + cdy * cdy;
        let det = adx * (bdy * cl - bl * cdy) - ady * (bdx * cl - bl * cdx) + al * (bdx * cdy - bdy * cdx);
        Sign::of_i128(det as i128)
      }
    }
  };
}

impl_predicate_scalar_int!(i32, i128);
impl_predicate_scalar_int!(i64, i128);
