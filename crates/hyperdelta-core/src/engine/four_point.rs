//! Gromov four-point condition.
//!
//! For a quadruple `(a, b, c, d)` the three pairing sums are
//!
//! ```text
//! d1 = ab + cd,  d2 = ac + bd,  d3 = ad + bc
//! ```
//!
//! Sorted ascending to `e1 ≤ e2 ≤ e3`, the quadruple's contribution is
//! `δ = (e3 − e2) / 2`: half the gap between the two largest sums. Ties need no
//! special handling because equal sums sort adjacently and yield the same gap
//! whichever one is picked.
//!
//! Distances are integer hop counts, so every δ is a multiple of one half.
//! [`Delta`] stores `2δ` as an integer to keep comparisons exact.

use std::fmt;

use super::graph::NodeId;
use super::shortest_path::DistanceOracle;

/// A four-point delta value, stored as the integer `2δ`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delta {
    twice: u32,
}

impl Delta {
    pub const ZERO: Delta = Delta { twice: 0 };

    /// Delta from its doubled value.
    #[inline]
    pub const fn from_twice(twice: u32) -> Self {
        Self { twice }
    }

    /// `2δ`, exact.
    #[inline]
    pub const fn twice(self) -> u32 {
        self.twice
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.twice as f64 / 2.0
    }
}

impl fmt::Display for Delta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.twice % 2 == 0 {
            write!(f, "{}", self.twice / 2)
        } else {
            write!(f, "{}.5", self.twice / 2)
        }
    }
}

/// Four node ids: `a` is the BFS root, `b` from the B pool, `c` and `d` from the
/// CD pool. `c == d` is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quadruple {
    pub a: NodeId,
    pub b: NodeId,
    pub c: NodeId,
    pub d: NodeId,
}

impl Quadruple {
    pub fn new(a: NodeId, b: NodeId, c: NodeId, d: NodeId) -> Self {
        Self { a, b, c, d }
    }
}

impl fmt::Display for Quadruple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.a, self.b, self.c, self.d)
    }
}

/// The three pairing sums of one quadruple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingSums {
    /// `ab + cd`
    pub d1: u32,
    /// `ac + bd`
    pub d2: u32,
    /// `ad + bc`
    pub d3: u32,
}

impl PairingSums {
    /// Sums sorted ascending: `(e1, e2, e3)`.
    pub fn sorted(&self) -> (u32, u32, u32) {
        let mut e = [self.d1, self.d2, self.d3];
        e.sort_unstable();
        (e[0], e[1], e[2])
    }

    /// `(e3 − e2) / 2`.
    pub fn delta(&self) -> Delta {
        let (_, e2, e3) = self.sorted();
        Delta::from_twice(e3 - e2)
    }
}

/// Delta for three raw pairing sums.
#[inline]
pub fn delta_from_sums(d1: u32, d2: u32, d3: u32) -> Delta {
    PairingSums { d1, d2, d3 }.delta()
}

/// Resolves the six pairwise distances of `q` and forms the pairing sums.
///
/// Returns `None` as soon as any pair is unreachable; a disconnected quadruple
/// contributes nothing.
pub fn pairing_sums<O: DistanceOracle + ?Sized>(oracle: &O, q: &Quadruple) -> Option<PairingSums> {
    let ab = oracle.distance(q.a, q.b).hops()?;
    let cd = oracle.distance(q.c, q.d).hops()?;
    let ac = oracle.distance(q.a, q.c).hops()?;
    let bd = oracle.distance(q.b, q.d).hops()?;
    let ad = oracle.distance(q.a, q.d).hops()?;
    let bc = oracle.distance(q.b, q.c).hops()?;
    Some(PairingSums {
        d1: ab + cd,
        d2: ac + bd,
        d3: ad + bc,
    })
}

/// Four-point delta of `q`, or `None` if any of its six distances is unreachable.
pub fn evaluate<O: DistanceOracle + ?Sized>(oracle: &O, q: &Quadruple) -> Option<Delta> {
    pairing_sums(oracle, q).map(|sums| sums.delta())
}
