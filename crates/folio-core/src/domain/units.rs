use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Unit a weight is expressed in.
///
/// Validation and manual entry work in `Percentage` (`0..=100`); the analysis
/// service consumes `Fraction` (`0..=1`). A unit is always stated, never
/// guessed from the size of the numbers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Percentage,
    Fraction,
}

impl WeightUnit {
    pub const ALL: [Self; 2] = [Self::Percentage, Self::Fraction];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Fraction => "fraction",
        }
    }

    /// Value of a full portfolio in this unit.
    pub const fn full_scale(self) -> f64 {
        match self {
            Self::Percentage => 100.0,
            Self::Fraction => 1.0,
        }
    }

    /// Converts `value`, expressed in `self`, into `target`.
    pub fn convert(self, value: f64, target: Self) -> f64 {
        match (self, target) {
            (Self::Percentage, Self::Fraction) => value / 100.0,
            (Self::Fraction, Self::Percentage) => value * 100.0,
            _ => value,
        }
    }
}

impl Display for WeightUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "percentage" | "percent" | "pct" => Ok(Self::Percentage),
            "fraction" => Ok(Self::Fraction),
            other => Err(ValidationError::InvalidWeightUnit {
                value: other.to_owned(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_between_units() {
        assert_eq!(WeightUnit::Percentage.convert(25.0, WeightUnit::Fraction), 0.25);
        assert_eq!(WeightUnit::Fraction.convert(0.5, WeightUnit::Percentage), 50.0);
        assert_eq!(WeightUnit::Fraction.convert(0.5, WeightUnit::Fraction), 0.5);
    }

    #[test]
    fn small_percentages_stay_percentages() {
        // A 0.8% holding is still a percentage; nothing is inferred from magnitude.
        let converted = WeightUnit::Percentage.convert(0.8, WeightUnit::Fraction);
        assert!((converted - 0.008).abs() < 1e-12);
    }

    #[test]
    fn parses_unit_names() {
        assert_eq!(WeightUnit::from_str("Fraction").expect("must parse"), WeightUnit::Fraction);
        let err = WeightUnit::from_str("basis-points").expect_err("must fail");
        assert!(matches!(err, ValidationError::InvalidWeightUnit { .. }));
    }
}
