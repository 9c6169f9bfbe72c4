// Membership functions and linguistic variables

use serde::{Deserialize, Serialize};

/// Shape of a fuzzy set over a real axis
///
/// Breakpoints are non-decreasing. Equal neighbouring breakpoints give a
/// vertical edge (a "shoulder"), e.g. `Triangle([0.0, 0.0, 20.0])` is fully
/// true at 0 and falls to zero at 20.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipFn {
    /// Rises from `a` to the apex `b`, falls to `c`
    Triangle([f32; 3]),
    /// Rises from `a` to `b`, flat until `c`, falls to `d`
    Trapezoid([f32; 4]),
}

impl MembershipFn {
    /// Degree of membership of `x`, always in [0, 1]
    pub fn degree(&self, x: f32) -> f32 {
        let [a, b, c, d] = self.corners();

        if x < a || x > d {
            return 0.0;
        }
        if x >= b && x <= c {
            return 1.0;
        }

        // x < b implies a < b, x > c implies c < d, so neither slope divides by zero
        let degree = if x < b {
            (x - a) / (b - a)
        } else {
            (d - x) / (d - c)
        };
        degree.clamp(0.0, 1.0)
    }

    /// Representative crisp value used by defuzzification
    pub fn peak(&self) -> f32 {
        let [_, b, c, _] = self.corners();
        (b + c) / 2.0
    }

    /// Breakpoints as a trapezoid (a triangle has a zero-width plateau)
    pub fn corners(&self) -> [f32; 4] {
        match *self {
            MembershipFn::Triangle([a, b, c]) => [a, b, b, c],
            MembershipFn::Trapezoid(corners) => corners,
        }
    }

    /// Check breakpoints are finite and non-decreasing
    pub fn validate(&self) -> anyhow::Result<()> {
        let corners = self.corners();
        anyhow::ensure!(
            corners.iter().all(|p| p.is_finite()),
            "breakpoints must be finite: {:?}",
            self
        );
        anyhow::ensure!(
            corners.windows(2).all(|w| w[0] <= w[1]),
            "breakpoints must be non-decreasing: {:?}",
            self
        );
        Ok(())
    }
}

/// A fuzzy input or output axis with `N` named terms
///
/// Term names live in the matching term enum; `terms[i]` is the shape of the
/// term whose `index()` is `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinguisticVariable<const N: usize> {
    pub domain: (f32, f32),
    pub terms: [MembershipFn; N],
}

impl<const N: usize> LinguisticVariable<N> {
    pub fn new(domain: (f32, f32), terms: [MembershipFn; N]) -> Self {
        Self { domain, terms }
    }

    /// Clamp `x` into the domain and evaluate every term
    pub fn fuzzify(&self, x: f32) -> [f32; N] {
        let x = self.clamp(x);
        self.terms.map(|term| term.degree(x))
    }

    /// Nearest point of the domain; NaN maps to the lower edge
    pub fn clamp(&self, x: f32) -> f32 {
        let (lo, hi) = self.domain;
        if x.is_nan() {
            return lo;
        }
        x.clamp(lo, hi)
    }
}
