//! Shared validated leaf types for the triage workspace.
//!
//! These types guarantee their invariants at construction time so that the
//! rest of the workspace can pass them around without re-checking:
//! - [`Confidence`] is always a finite value in `[0, 1]`
//! - [`UrgencyLevel`] is always one of the five Manchester levels
//!
//! Presentation-only concerns that hang off these values (such as the
//! confidence tier labels shown to users) also live here so that the REST and
//! CLI surfaces agree on the boundaries.

/// Errors that can occur when creating validated triage types.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
    /// The value was NaN, infinite, or outside `[0, 1]`.
    #[error("confidence must be a finite value in [0, 1], got {0}")]
    ConfidenceOutOfRange(f64),
    /// The numeric level was outside `1..=5`.
    #[error("urgency level must be between 1 and 5, got {0}")]
    UrgencyLevelOutOfRange(u8),
}

/// A classifier posterior probability, guaranteed finite and in `[0, 1]`.
///
/// Confidence is a property of the classifier's output distribution, not of
/// the input text's actual clarity. It is carried through to the final
/// recommendation record untouched; only presentation code turns it into a
/// [`ConfidenceTier`] label.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Confidence(f64);

impl Confidence {
    /// Creates a new `Confidence`, rejecting NaN, infinities and values
    /// outside `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::ConfidenceOutOfRange`] if the value is not a
    /// finite number in `[0, 1]`.
    pub fn new(value: f64) -> Result<Self, TypeError> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(TypeError::ConfidenceOutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Creates a `Confidence` by clamping the value into `[0, 1]`.
    ///
    /// NaN maps to `0.0`. Use this when the value comes from a source that
    /// already guarantees a probability (such as a normalized distribution)
    /// and only floating-point noise could push it out of range.
    pub fn clamped(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the inner probability.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Returns the caller-facing tier for this confidence value.
    pub fn tier(&self) -> ConfidenceTier {
        if self.0 > 0.8 {
            ConfidenceTier::High
        } else if self.0 >= 0.5 {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}

impl serde::Serialize for Confidence {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> serde::Deserialize<'de> for Confidence {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Confidence::new(value).map_err(serde::de::Error::custom)
    }
}

/// Caller-facing confidence band.
///
/// Boundaries: high is strictly above `0.8`, medium is `[0.5, 0.8]`, low is
/// below `0.5`. These labels are a presentation concern; the engine itself
/// never branches on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
}

impl ConfidenceTier {
    /// Spanish label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceTier::High => "alta",
            ConfidenceTier::Medium => "media",
            ConfidenceTier::Low => "baja",
        }
    }
}

impl std::fmt::Display for ConfidenceTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Manchester triage priority level. Level 1 is the most severe.
///
/// The discriminants match the protocol numbering, so ordering by `Ord`
/// sorts from most to least severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum UrgencyLevel {
    /// Level 1: resuscitation, immediate attention.
    Immediate = 1,
    /// Level 2: very urgent.
    VeryUrgent = 2,
    /// Level 3: urgent.
    Urgent = 3,
    /// Level 4: standard, not urgent but present.
    Standard = 4,
    /// Level 5: non-urgent.
    NonUrgent = 5,
}

impl UrgencyLevel {
    /// Returns the protocol level number (1-5).
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Parses a protocol level number.
    ///
    /// # Errors
    ///
    /// Returns [`TypeError::UrgencyLevelOutOfRange`] for anything outside
    /// `1..=5`.
    pub fn from_u8(level: u8) -> Result<Self, TypeError> {
        match level {
            1 => Ok(UrgencyLevel::Immediate),
            2 => Ok(UrgencyLevel::VeryUrgent),
            3 => Ok(UrgencyLevel::Urgent),
            4 => Ok(UrgencyLevel::Standard),
            5 => Ok(UrgencyLevel::NonUrgent),
            other => Err(TypeError::UrgencyLevelOutOfRange(other)),
        }
    }
}

impl std::fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl serde::Serialize for UrgencyLevel {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> serde::Deserialize<'de> for UrgencyLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let level = u8::deserialize(deserializer)?;
        UrgencyLevel::from_u8(level).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_accepts_bounds() {
        assert!(Confidence::new(0.0).is_ok());
        assert!(Confidence::new(1.0).is_ok());
        assert!(Confidence::new(0.37).is_ok());
    }

    #[test]
    fn test_confidence_rejects_out_of_range() {
        assert!(Confidence::new(-0.01).is_err());
        assert!(Confidence::new(1.01).is_err());
        assert!(Confidence::new(f64::NAN).is_err());
        assert!(Confidence::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_confidence_clamped() {
        assert_eq!(Confidence::clamped(1.2).value(), 1.0);
        assert_eq!(Confidence::clamped(-0.5).value(), 0.0);
        assert_eq!(Confidence::clamped(f64::NAN).value(), 0.0);
        assert_eq!(Confidence::clamped(0.6).value(), 0.6);
    }

    #[test]
    fn test_confidence_tier_boundaries() {
        assert_eq!(Confidence::clamped(0.81).tier(), ConfidenceTier::High);
        assert_eq!(Confidence::clamped(0.8).tier(), ConfidenceTier::Medium);
        assert_eq!(Confidence::clamped(0.5).tier(), ConfidenceTier::Medium);
        assert_eq!(Confidence::clamped(0.49).tier(), ConfidenceTier::Low);
        assert_eq!(Confidence::clamped(0.0).tier(), ConfidenceTier::Low);
    }

    #[test]
    fn test_urgency_level_round_trip() {
        for n in 1..=5u8 {
            let level = UrgencyLevel::from_u8(n).expect("valid level");
            assert_eq!(level.as_u8(), n);
        }
    }

    #[test]
    fn test_urgency_level_rejects_out_of_range() {
        assert!(UrgencyLevel::from_u8(0).is_err());
        assert!(UrgencyLevel::from_u8(6).is_err());
    }

    #[test]
    fn test_urgency_level_orders_most_severe_first() {
        let mut levels = vec![
            UrgencyLevel::Standard,
            UrgencyLevel::Immediate,
            UrgencyLevel::Urgent,
        ];
        levels.sort();
        assert_eq!(levels[0], UrgencyLevel::Immediate);
    }
}
