use std::{
    iter::Sum,
    ops::{Add, AddAssign},
};

use serde::{Deserialize, Serialize};

use crate::constants::NEAR_ZERO_LENGTH;

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct Meters(f64);

impl Meters {
    pub const ZERO: Meters = Meters(0.0);

    pub fn new(value: f64) -> Self {
        Meters(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_near_zero(&self) -> bool {
        self.0 < NEAR_ZERO_LENGTH
    }

    /// Whole meters, rounded half away from zero.
    pub fn rounded(&self) -> u32 {
        self.0.round() as u32
    }

    /// Whole meters, fractional part dropped.
    pub fn truncated(&self) -> u32 {
        self.0 as u32
    }
}

impl From<f64> for Meters {
    fn from(value: f64) -> Self {
        Meters::new(value)
    }
}

impl Add for Meters {
    type Output = Meters;

    fn add(self, other: Meters) -> Meters {
        Meters(self.0 + other.0)
    }
}

impl AddAssign for Meters {
    fn add_assign(&mut self, other: Meters) {
        self.0 += other.0;
    }
}

impl Sum for Meters {
    fn sum<I: Iterator<Item = Meters>>(iter: I) -> Meters {
        iter.fold(Meters::ZERO, |acc, x| acc + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(Meters::new(12.5).rounded(), 13);
        assert_eq!(Meters::new(12.49).rounded(), 12);
        assert_eq!(Meters::new(12.99).truncated(), 12);
    }

    #[test]
    fn test_near_zero() {
        assert!(Meters::ZERO.is_near_zero());
        assert!(Meters::new(1e-9).is_near_zero());
        assert!(!Meters::new(0.01).is_near_zero());
    }

    #[test]
    fn test_sum() {
        let total: Meters = vec![Meters::new(1.5), Meters::new(2.0), Meters::new(0.5)]
            .into_iter()
            .sum();
        assert_eq!(total, Meters::new(4.0));
    }
}
