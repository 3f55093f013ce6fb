//! Shared utility functions for AquaGuardian crates.

/// Coercion of free-form numeric input coming from text fields and CLI flags.
pub mod input {
    /// Parse a user-typed number, coercing anything malformed to zero.
    ///
    /// Leading/trailing whitespace is ignored. Non-finite values (`NaN`,
    /// `inf`) and negative values also become zero, since every habit
    /// quantity is a non-negative count or duration.
    pub fn coerce_non_negative(raw: &str) -> f64 {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => value,
            _ => 0.0,
        }
    }

    /// Parse a family size, never returning less than one person.
    pub fn coerce_family_size(raw: &str) -> u32 {
        let value = coerce_non_negative(raw).round();
        if value < 1.0 {
            1
        } else if value > u32::MAX as f64 {
            u32::MAX
        } else {
            value as u32
        }
    }

    /// Split a `name=value` pair as passed to `--set`.
    pub fn split_assignment(pair: &str) -> anyhow::Result<(&str, &str)> {
        match pair.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() => Ok((name.trim(), value.trim())),
            _ => anyhow::bail!("expected NAME=VALUE, got '{}'", pair),
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_coerce_non_negative_valid() {
            assert_eq!(coerce_non_negative("8"), 8.0);
            assert_eq!(coerce_non_negative(" 2.5 "), 2.5);
        }

        #[test]
        fn test_coerce_non_negative_malformed() {
            assert_eq!(coerce_non_negative(""), 0.0);
            assert_eq!(coerce_non_negative("ten"), 0.0);
            assert_eq!(coerce_non_negative("NaN"), 0.0);
            assert_eq!(coerce_non_negative("inf"), 0.0);
            assert_eq!(coerce_non_negative("-3"), 0.0);
        }

        #[test]
        fn test_coerce_family_size() {
            assert_eq!(coerce_family_size("4"), 4);
            assert_eq!(coerce_family_size("0"), 1);
            assert_eq!(coerce_family_size("abc"), 1);
            assert_eq!(coerce_family_size("2.6"), 3);
        }

        #[test]
        fn test_split_assignment() {
            assert_eq!(
                split_assignment("showerMinutes=5").unwrap(),
                ("showerMinutes", "5")
            );
            assert_eq!(split_assignment("bath = 1 ").unwrap(), ("bath", "1"));
            assert!(split_assignment("showerMinutes").is_err());
            assert!(split_assignment("=5").is_err());
        }
    }
}

/// Rounding helpers matching how figures are displayed.
pub mod numbers {
    /// Round half away from zero and convert to a whole number of liters.
    ///
    /// Negative and non-finite inputs clamp to zero; values past `u64::MAX`
    /// saturate.
    pub fn round_liters(value: f64) -> u64 {
        if !value.is_finite() || value <= 0.0 {
            return 0;
        }
        // float-to-int `as` saturates at the target bounds
        value.round() as u64
    }

    /// `part / whole` as a rounded percentage. A zero `whole` yields 0.
    pub fn percent_of(part: f64, whole: f64) -> u64 {
        if whole == 0.0 {
            return 0;
        }
        round_liters(part / whole * 100.0)
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_round_liters() {
            assert_eq!(round_liters(925.5), 926);
            assert_eq!(round_liters(925.49), 925);
            assert_eq!(round_liters(-1.0), 0);
            assert_eq!(round_liters(f64::NAN), 0);
            assert_eq!(round_liters(8.6e11), 860_000_000_000);
            assert_eq!(round_liters(1e30), u64::MAX);
        }

        #[test]
        fn test_percent_of() {
            assert_eq!(percent_of(231.5, 135.0), 171);
            assert_eq!(percent_of(135.0, 135.0), 100);
            assert_eq!(percent_of(10.0, 0.0), 0);
        }
    }
}
