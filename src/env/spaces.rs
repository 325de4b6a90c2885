//! Box-shaped action and observation spaces.

use crate::Float;

/// The product of closed intervals `[low[i], high[i]]`.
///
/// Describes the convention shared with callers; the model itself never
/// checks it.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSpace<const N: usize> {
    pub low: [Float; N],
    pub high: [Float; N],
}

impl<const N: usize> BoxSpace<N> {
    pub fn new(low: [Float; N], high: [Float; N]) -> Self {
        Self { low, high }
    }

    /// The same interval on every axis.
    pub fn uniform(low: Float, high: Float) -> Self {
        Self::new([low; N], [high; N])
    }

    pub fn contains(&self, x: &[Float; N]) -> bool {
        x.iter()
            .zip(self.low.iter().zip(&self.high))
            .all(|(v, (lo, hi))| *lo <= *v && *v <= *hi)
    }

    pub fn clip(&self, x: &[Float; N]) -> [Float; N] {
        let mut out = *x;
        for i in 0..N {
            out[i] = out[i].max(self.low[i]).min(self.high[i]);
        }
        out
    }

    /// Draw uniformly from a bounded box. Unbounded axes are sampled from
    /// `[low, low + 1)`.
    pub fn sample(&self, rng: &mut fastrand::Rng) -> [Float; N] {
        let mut out = [0.0; N];
        for i in 0..N {
            let width = self.high[i] - self.low[i];
            let width = if width.is_finite() { width } else { 1.0 };
            out[i] = self.low[i] + rng.f64() * width;
        }
        out
    }
}
