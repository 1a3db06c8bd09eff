//! Referral derivation policy.
//!
//! Maps an urgency level (and, for low urgency, the predicted specialty) to
//! the recommended tier of care. The mapping follows the national referral
//! network levels (IESS/MSP): resuscitation and very-urgent cases go straight
//! to a tertiary emergency department, urgent cases to a general urgent-care
//! service, and everything else to primary care with an outpatient
//! appointment for the predicted specialty.
//!
//! Pure and total: every urgency level maps to exactly one referral.

use triage_types::UrgencyLevel;

/// Care-facility tier a patient is referred to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FacilityTier {
    TertiaryEmergency,
    GeneralUrgent,
    PrimaryCare,
}

impl FacilityTier {
    /// Stable machine-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            FacilityTier::TertiaryEmergency => "tertiary-emergency",
            FacilityTier::GeneralUrgent => "general-urgent",
            FacilityTier::PrimaryCare => "primary-care",
        }
    }
}

impl std::fmt::Display for FacilityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// The derived referral: where to go and why.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Referral {
    pub tier: FacilityTier,
    /// Facility descriptor shown to the user.
    pub facility: String,
    /// Imperative instruction.
    pub action: String,
    /// Explanatory guidance; names the specialty only for primary care.
    pub message: String,
}

/// Derives the referral for `level` and the predicted `specialty`.
///
/// Severity dominates: for levels 1-3 the specialty is deliberately absent
/// from both action and message. For levels 4-5 the message interpolates the
/// specialty verbatim so the patient books the right outpatient clinic.
pub fn derive(level: UrgencyLevel, specialty: &str) -> Referral {
    match level {
        UrgencyLevel::Immediate | UrgencyLevel::VeryUrgent => Referral {
            tier: FacilityTier::TertiaryEmergency,
            facility: "HOSPITAL DE ESPECIALIDADES / TERCER NIVEL".to_string(),
            action: "ACUDIR A EMERGENCIAS INMEDIATAMENTE".to_string(),
            message: "La condición del paciente pone en riesgo su vida o función vital. \
                      No requiere cita previa. Ingrese directamente por el área de \
                      Emergencias (Shock Room)."
                .to_string(),
        },
        UrgencyLevel::Urgent => Referral {
            tier: FacilityTier::GeneralUrgent,
            facility: "HOSPITAL GENERAL / CENTRO DE SALUD TIPO C".to_string(),
            action: "ACUDIR A URGENCIAS".to_string(),
            message: "Requiere atención médica pronta para evitar complicaciones. Acuda \
                      al servicio de urgencias de su hospital de zona o Materno-Infantil."
                .to_string(),
        },
        UrgencyLevel::Standard | UrgencyLevel::NonUrgent => Referral {
            tier: FacilityTier::PrimaryCare,
            facility: "CENTRO DE SALUD (TIPO A/B) / DISPENSARIO".to_string(),
            action: "AGENDAR CITA (CONSULTA EXTERNA)".to_string(),
            message: format!(
                "No es una emergencia vital. Debe agendar una cita médica para {} o \
                 Medicina General en su dispensario más cercano (IESS/MSP). No sature \
                 las urgencias hospitalarias.",
                specialty
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels_one_and_two_go_to_tertiary_emergency() {
        for level in [UrgencyLevel::Immediate, UrgencyLevel::VeryUrgent] {
            let referral = derive(level, "CARDIOLOGÍA/CIRCULATORIO");
            assert_eq!(referral.tier, FacilityTier::TertiaryEmergency);
            assert!(!referral.action.contains("CARDIOLOGÍA"));
            assert!(!referral.message.contains("CARDIOLOGÍA"));
        }
    }

    #[test]
    fn test_level_three_goes_to_general_urgent() {
        let referral = derive(UrgencyLevel::Urgent, "NEUROLOGÍA");
        assert_eq!(referral.tier, FacilityTier::GeneralUrgent);
        assert!(!referral.message.contains("NEUROLOGÍA"));
    }

    #[test]
    fn test_low_urgency_goes_to_primary_care_with_specialty() {
        for level in [UrgencyLevel::Standard, UrgencyLevel::NonUrgent] {
            let referral = derive(level, "OTORRINOLARINGOLOGÍA");
            assert_eq!(referral.tier, FacilityTier::PrimaryCare);
            assert!(referral.message.contains("OTORRINOLARINGOLOGÍA"));
        }
    }

    #[test]
    fn test_specialty_string_is_interpolated_verbatim() {
        let referral = derive(UrgencyLevel::Standard, "UROLOGÍA/RENAL");
        assert!(referral.message.contains("UROLOGÍA/RENAL"));
    }

    #[test]
    fn test_tier_labels_are_stable() {
        assert_eq!(FacilityTier::TertiaryEmergency.label(), "tertiary-emergency");
        assert_eq!(FacilityTier::GeneralUrgent.label(), "general-urgent");
        assert_eq!(FacilityTier::PrimaryCare.label(), "primary-care");
    }
}
