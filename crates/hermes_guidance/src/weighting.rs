use crate::constants::INVALID_WEIGHT;

/// Travel weight reported by the path search, in tenths of a second.
pub type Weight = u32;

pub fn is_valid_weight(weight: Weight) -> bool {
    weight != INVALID_WEIGHT
}

/// Converts a weight in tenths of a second to whole seconds.
pub fn weight_to_seconds(weight: Weight) -> u32 {
    (weight as f64 / 10.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_to_seconds() {
        assert_eq!(weight_to_seconds(0), 0);
        assert_eq!(weight_to_seconds(14), 1);
        assert_eq!(weight_to_seconds(15), 2);
        assert_eq!(weight_to_seconds(1234), 123);
    }

    #[test]
    fn test_invalid_weight() {
        assert!(is_valid_weight(0));
        assert!(!is_valid_weight(u32::MAX));
    }
}
