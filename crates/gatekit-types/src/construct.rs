//! Fallible construction traits for GateKit types.
//!
//! This module provides the [`TryNew`] trait for types that require
//! validation during construction and may fail.
//!
//! # When to Use Which Pattern
//!
//! | Pattern | Use When |
//! |---------|----------|
//! | `new()` | Construction always succeeds (infallible) |
//! | [`TryNew`] | Construction requires validation (fallible) |
//! | `TryFrom<T>` | Converting from another type (fallible) |
//! | `Default` | Sensible default value exists |
//!
//! # Design Rationale
//!
//! Following Rust's naming conventions:
//!
//! - `new()` - Infallible, always returns `Self`
//! - `try_new()` - Fallible, returns `Result<Self, Error>`
//!
//! This mirrors the standard library's `TryFrom`/`TryInto` pattern but
//! for constructors that don't convert from another type. Sharing
//! rules are the main user in this workspace: a rule name must be
//! non-empty because it is the uniqueness key administrators address
//! rules by.
//!
//! # Example
//!
//! ```
//! use gatekit_types::TryNew;
//!
//! /// Non-empty label wrapper.
//! #[derive(Debug)]
//! struct Label(String);
//!
//! #[derive(Debug, PartialEq)]
//! struct EmptyLabelError;
//!
//! impl TryNew for Label {
//!     type Error = EmptyLabelError;
//!     type Args = String;
//!
//!     fn try_new(value: String) -> Result<Self, Self::Error> {
//!         if value.is_empty() {
//!             return Err(EmptyLabelError);
//!         }
//!         Ok(Label(value))
//!     }
//! }
//!
//! assert!(Label::try_new("west-region".to_string()).is_ok());
//! assert_eq!(Label::try_new(String::new()).unwrap_err(), EmptyLabelError);
//! ```

/// Trait for fallible construction with validation.
///
/// Implement this trait when:
///
/// - Construction requires validation that may fail
/// - You are NOT converting from another type (use `TryFrom` instead)
/// - A plain `new()` cannot guarantee success
///
/// # Naming Convention
///
/// Types implementing `TryNew` should NOT have a plain `new()` method
/// that performs the same validation. The `try_` prefix makes
/// fallibility explicit at the call site.
///
/// # Associated Types
///
/// - `Error`: The error type returned when validation fails
/// - `Args`: The arguments required for construction — a single value,
///   a tuple, or a config struct for multi-field initialization
///
/// # Implementation Guidelines
///
/// 1. **Document invariants**: explain what validation is performed
/// 2. **Use specific errors**: return meaningful error types, not `String`
/// 3. **Keep validation pure**: no side effects in `try_new`
pub trait TryNew {
    /// The error type returned when construction fails.
    ///
    /// Should be a specific error type that describes why validation
    /// failed. Avoid using `String` or generic error types.
    type Error;

    /// Arguments required for construction.
    ///
    /// Can be:
    /// - A single value: `type Args = String;`
    /// - A tuple: `type Args = (String, u32);`
    /// - A config struct: `type Args = MyConfig;`
    type Args;

    /// Attempts to create a new instance.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if validation fails. The error should
    /// contain enough information to understand why construction
    /// failed.
    fn try_new(args: Self::Args) -> Result<Self, Self::Error>
    where
        Self: Sized;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct BoundedLevel(u8);

    #[derive(Debug, PartialEq)]
    struct LevelOutOfRange {
        value: u8,
        max: u8,
    }

    impl TryNew for BoundedLevel {
        type Error = LevelOutOfRange;
        type Args = u8;

        fn try_new(value: u8) -> Result<Self, Self::Error> {
            const MAX: u8 = 32;
            if value > MAX {
                return Err(LevelOutOfRange { value, max: MAX });
            }
            Ok(BoundedLevel(value))
        }
    }

    #[test]
    fn try_new_within_bounds() {
        let level = BoundedLevel::try_new(4).expect("level 4 is within bounds");
        assert_eq!(level.0, 4);
    }

    #[test]
    fn try_new_at_boundary() {
        assert!(BoundedLevel::try_new(32).is_ok());
    }

    #[test]
    fn try_new_over_boundary() {
        let err = BoundedLevel::try_new(33).unwrap_err();
        assert_eq!(err.value, 33);
        assert_eq!(err.max, 32);
    }

    // Test: config struct argument
    struct RuleConfig {
        name: String,
        weight: u32,
    }

    #[derive(Debug)]
    #[allow(dead_code)]
    struct WeightedRule {
        name: String,
        weight: u32,
    }

    #[derive(Debug, PartialEq)]
    enum RuleConfigError {
        EmptyName,
        ZeroWeight,
    }

    impl TryNew for WeightedRule {
        type Error = RuleConfigError;
        type Args = RuleConfig;

        fn try_new(config: RuleConfig) -> Result<Self, Self::Error> {
            if config.name.is_empty() {
                return Err(RuleConfigError::EmptyName);
            }
            if config.weight == 0 {
                return Err(RuleConfigError::ZeroWeight);
            }
            Ok(WeightedRule {
                name: config.name,
                weight: config.weight,
            })
        }
    }

    #[test]
    fn try_new_config_struct_valid() {
        let result = WeightedRule::try_new(RuleConfig {
            name: "emea".to_string(),
            weight: 2,
        });
        assert!(result.is_ok());
    }

    #[test]
    fn try_new_config_struct_empty_name() {
        let result = WeightedRule::try_new(RuleConfig {
            name: String::new(),
            weight: 2,
        });
        assert_eq!(result.unwrap_err(), RuleConfigError::EmptyName);
    }

    #[test]
    fn try_new_config_struct_zero_weight() {
        let result = WeightedRule::try_new(RuleConfig {
            name: "emea".to_string(),
            weight: 0,
        });
        assert_eq!(result.unwrap_err(), RuleConfigError::ZeroWeight);
    }
}
