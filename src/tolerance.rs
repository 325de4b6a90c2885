//! Scalar or per-component error tolerances.

use std::ops::Index;

use crate::Float;

/// Tolerance applied either uniformly or per state component.
///
/// Built through [`From`] so that both `1e-8` and `[1e-8; 5]` can be passed
/// where a tolerance is expected.
#[derive(Clone, Debug, PartialEq)]
pub enum Tolerance {
    Scalar(Float),
    Vector(Vec<Float>),
}

impl Tolerance {
    /// Check that every entry is positive and, for vectors, that the length
    /// matches the system dimension.
    pub(crate) fn is_valid_for(&self, n: usize) -> bool {
        match self {
            Tolerance::Scalar(v) => *v > 0.0,
            Tolerance::Vector(vs) => vs.len() == n && vs.iter().all(|v| *v > 0.0),
        }
    }
}

impl From<Float> for Tolerance {
    fn from(val: Float) -> Self {
        Tolerance::Scalar(val)
    }
}

impl From<&[Float]> for Tolerance {
    fn from(val: &[Float]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl<const N: usize> From<[Float; N]> for Tolerance {
    fn from(val: [Float; N]) -> Self {
        Tolerance::Vector(val.to_vec())
    }
}

impl From<Vec<Float>> for Tolerance {
    fn from(val: Vec<Float>) -> Self {
        Tolerance::Vector(val)
    }
}

impl Index<usize> for Tolerance {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        match self {
            Tolerance::Scalar(v) => v,
            Tolerance::Vector(vs) => &vs[index],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_indexes_every_component() {
        let tol = Tolerance::from(1e-6);
        assert_eq!(tol[0], 1e-6);
        assert_eq!(tol[4], 1e-6);
        assert!(tol.is_valid_for(5));
    }

    #[test]
    fn vector_must_match_dimension() {
        let tol = Tolerance::from([1e-6, 1e-7]);
        assert_eq!(tol[1], 1e-7);
        assert!(tol.is_valid_for(2));
        assert!(!tol.is_valid_for(5));
        assert!(!Tolerance::from(vec![1e-6, 0.0]).is_valid_for(2));
    }
}
