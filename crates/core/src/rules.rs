//! Manchester-style urgency rule matching.
//!
//! The rule table is an explicit ordered list evaluated most-severe-first
//! (level 1 → 5); the first rule with any matching keyword wins. This is a
//! priority search, not a vote: one level-1 match outranks any number of
//! lower-priority matches.
//!
//! Matching runs on lightly lower-cased **raw** text. Urgency phrases ("no
//! respira", "dolor pecho") are built from exactly the stopwords and
//! negations that normalization rewrites, so the matcher must never see
//! normalizer output.
//!
//! Keyword matching is plain substring containment, not word-boundary aware:
//! a keyword can match inside an unrelated longer word ("paro" inside
//! "disparo"). This mirrors the triage protocol source and is pinned by a
//! test; tightening it to word boundaries would change recall on real inputs
//! and is a deliberate policy decision, not a cleanup.

use crate::error::{TriageError, TriageResult};
use std::path::Path;
use triage_types::UrgencyLevel;

/// One row of the triage protocol table.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UrgencyRule {
    /// Protocol level, 1 = most severe.
    pub level: UrgencyLevel,
    /// Human label for the level.
    pub name: String,
    /// Presentation hex colour associated with the level.
    pub colour: String,
    /// Descriptive target wait-time bound.
    pub target_wait: String,
    /// Lowercase keyword phrases; any one occurring in the input matches the
    /// rule. Order within the list is irrelevant to the result.
    pub keywords: Vec<String>,
}

/// The ordered, validated rule table.
///
/// Invariants (checked by [`RuleTable::new`]): exactly five rules, levels
/// strictly ascending 1 through 5, every rule has at least one non-empty,
/// lowercase keyword. Static once constructed.
#[derive(Debug, Clone)]
pub struct RuleTable {
    rules: Vec<UrgencyRule>,
}

impl RuleTable {
    /// Validates and wraps an ordered rule list.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidRuleTable`] if the invariants above do
    /// not hold.
    pub fn new(rules: Vec<UrgencyRule>) -> TriageResult<Self> {
        if rules.len() != 5 {
            return Err(TriageError::InvalidRuleTable(format!(
                "expected 5 rules, got {}",
                rules.len()
            )));
        }

        for (index, rule) in rules.iter().enumerate() {
            let expected = index as u8 + 1;
            if rule.level.as_u8() != expected {
                return Err(TriageError::InvalidRuleTable(format!(
                    "rule at position {} has level {}, expected {}",
                    index, rule.level, expected
                )));
            }
            if rule.keywords.is_empty() {
                return Err(TriageError::InvalidRuleTable(format!(
                    "rule '{}' has no keywords",
                    rule.name
                )));
            }
            for keyword in &rule.keywords {
                if keyword.trim().is_empty() {
                    return Err(TriageError::InvalidRuleTable(format!(
                        "rule '{}' contains an empty keyword",
                        rule.name
                    )));
                }
                if *keyword != keyword.to_lowercase() {
                    return Err(TriageError::InvalidRuleTable(format!(
                        "keyword '{}' in rule '{}' must be lowercase",
                        keyword, rule.name
                    )));
                }
            }
        }

        Ok(Self { rules })
    }

    /// The built-in table, adapted from the Manchester protocol for
    /// free-text Spanish input. Keywords are written without accents because
    /// patients typically type without them.
    pub fn builtin() -> Self {
        let rules = vec![
            UrgencyRule {
                level: UrgencyLevel::Immediate,
                name: "EMERGENCIA (Resucitación)".to_string(),
                colour: "#FF0000".to_string(),
                target_wait: "Inmediato (0 min)".to_string(),
                keywords: [
                    "paro",
                    "no respira",
                    "inconsciente",
                    "no responde",
                    "convulsion",
                    "sangrado masivo",
                    "hemorragia severa",
                    "azul",
                    "cianosis",
                    "fria",
                    "trauma craneal grave",
                    "electrocutado",
                    "caida altura",
                ]
                .map(str::to_string)
                .to_vec(),
            },
            UrgencyRule {
                level: UrgencyLevel::VeryUrgent,
                name: "MUY URGENTE".to_string(),
                colour: "#FF8C00".to_string(),
                target_wait: "10-15 min".to_string(),
                keywords: [
                    "dolor toracico",
                    "dolor pecho",
                    "infarto",
                    "asfixia",
                    "ahogo",
                    "dificultad respiratoria",
                    "disnea",
                    "quemadura",
                    "fractura expuesta",
                    "sanguinolenta",
                    "vomito sangre",
                    "amputacion",
                    "alteracion mental",
                    "agresivo",
                    "desorientado",
                    "dolor severo",
                    "muy fuerte",
                    "insoportable",
                ]
                .map(str::to_string)
                .to_vec(),
            },
            UrgencyRule {
                level: UrgencyLevel::Urgent,
                name: "URGENTE".to_string(),
                colour: "#FFD700".to_string(),
                target_wait: "60 min".to_string(),
                keywords: [
                    "dolor abdominal",
                    "dolor moderado",
                    "fiebre alta",
                    "mas de 38",
                    "vomito",
                    "diarrea",
                    "deshidratacion",
                    "herida",
                    "corte",
                    "golpe",
                    "trauma",
                    "asma",
                    "crisis",
                    "sangrado",
                ]
                .map(str::to_string)
                .to_vec(),
            },
            UrgencyRule {
                level: UrgencyLevel::Standard,
                name: "ESTÁNDAR (Poco Urgente)".to_string(),
                colour: "#32CD32".to_string(),
                target_wait: "2 horas".to_string(),
                keywords: [
                    "dolor leve",
                    "molestia",
                    "fiebre",
                    "gripe",
                    "tos",
                    "dolor garganta",
                    "cuerpo cortado",
                    "infeccion urinaria",
                    "ardor",
                    "ojo rojo",
                    "alergia",
                    "sarpullido",
                    "ronchas",
                    "esguince",
                    "torcedura",
                ]
                .map(str::to_string)
                .to_vec(),
            },
            UrgencyRule {
                level: UrgencyLevel::NonUrgent,
                name: "NO URGENTE".to_string(),
                colour: "#1E90FF".to_string(),
                target_wait: "4 horas".to_string(),
                keywords: [
                    "revision",
                    "chequeo",
                    "resultados",
                    "certificado",
                    "consulta",
                    "cronico",
                    "hace meses",
                    "receta",
                    "medicacion",
                ]
                .map(str::to_string)
                .to_vec(),
            },
        ];

        // The built-in table satisfies the invariants by construction.
        Self { rules }
    }

    /// Loads a rule table override from a YAML file (a sequence of rules).
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::RulesFileRead`] / [`TriageError::RulesFileParse`]
    /// for I/O and YAML failures, and [`TriageError::InvalidRuleTable`] if the
    /// parsed rules violate the table invariants.
    pub fn from_yaml_file(path: &Path) -> TriageResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(TriageError::RulesFileRead)?;
        let deserializer = serde_yaml::Deserializer::from_str(&contents);
        let rules: Vec<UrgencyRule> =
            serde_path_to_error::deserialize(deserializer).map_err(TriageError::RulesFileParse)?;

        let table = Self::new(rules)?;
        tracing::info!("loaded urgency rule table from {}", path.display());
        Ok(table)
    }

    /// Matches `raw_text` against the table, most severe level first.
    ///
    /// Total function: if nothing matches, the level-4 rule is returned;
    /// unclassified-but-present symptoms must not be assumed to be the
    /// lowest priority, so the fallback is never level 5.
    pub fn match_urgency(&self, raw_text: &str) -> &UrgencyRule {
        let lowered = raw_text.to_lowercase();

        for rule in &self.rules {
            if rule.keywords.iter().any(|k| lowered.contains(k.as_str())) {
                return rule;
            }
        }

        // Index 3 is the level-4 rule; guaranteed by the table invariants.
        &self.rules[3]
    }

    pub fn rules(&self) -> &[UrgencyRule] {
        &self.rules
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_level_one_keyword_matches() {
        let table = RuleTable::builtin();
        let rule = table.match_urgency("paro cardiaco no responde");
        assert_eq!(rule.level, UrgencyLevel::Immediate);
    }

    #[test]
    fn test_priority_beats_later_levels() {
        let table = RuleTable::builtin();
        // "fiebre" (level 4) appears before "no respira" (level 1) in the
        // text; the most severe rule must still win.
        let rule = table.match_urgency("tiene fiebre y no respira");
        assert_eq!(rule.level, UrgencyLevel::Immediate);
    }

    #[test]
    fn test_keyword_order_within_rule_is_irrelevant() {
        let table = RuleTable::builtin();
        let a = table.match_urgency("disnea repentina");
        let b = table.match_urgency("ahogo repentino");
        assert_eq!(a.level, UrgencyLevel::VeryUrgent);
        assert_eq!(b.level, UrgencyLevel::VeryUrgent);
    }

    #[test]
    fn test_chest_pain_is_very_urgent() {
        let table = RuleTable::builtin();
        let rule = table.match_urgency("dolor toracico intenso");
        assert_eq!(rule.level, UrgencyLevel::VeryUrgent);
    }

    #[test]
    fn test_mild_symptoms_are_standard() {
        let table = RuleTable::builtin();
        let rule = table.match_urgency("dolor leve de garganta");
        assert_eq!(rule.level, UrgencyLevel::Standard);
    }

    #[test]
    fn test_default_fallback_is_level_four_not_five() {
        let table = RuleTable::builtin();
        let rule = table.match_urgency("me siento raro desde ayer");
        assert_eq!(rule.level, UrgencyLevel::Standard);
    }

    #[test]
    fn test_empty_input_falls_back_to_level_four() {
        let table = RuleTable::builtin();
        let rule = table.match_urgency("");
        assert_eq!(rule.level, UrgencyLevel::Standard);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let table = RuleTable::builtin();
        let rule = table.match_urgency("PARO CARDIACO");
        assert_eq!(rule.level, UrgencyLevel::Immediate);
    }

    #[test]
    fn test_substring_matching_inside_longer_words() {
        // Known approximation: keywords are not word-boundary aware, so
        // "paro" matches inside "disparo". Changing this changes
        // clinical-safety behaviour and must be deliberate.
        let table = RuleTable::builtin();
        let rule = table.match_urgency("escucho un disparo en la calle");
        assert_eq!(rule.level, UrgencyLevel::Immediate);
    }

    #[test]
    fn test_total_coverage_over_arbitrary_inputs() {
        let table = RuleTable::builtin();
        for text in ["", "xyz", "¿?", "1234", "palabras sin relacion alguna"] {
            let level = table.match_urgency(text).level.as_u8();
            assert!((1..=5).contains(&level));
        }
    }

    #[test]
    fn test_builtin_table_passes_validation() {
        let table = RuleTable::new(RuleTable::builtin().rules().to_vec());
        assert!(table.is_ok());
    }

    #[test]
    fn test_validation_rejects_wrong_rule_count() {
        let mut rules = RuleTable::builtin().rules().to_vec();
        rules.pop();
        assert!(matches!(
            RuleTable::new(rules),
            Err(TriageError::InvalidRuleTable(_))
        ));
    }

    #[test]
    fn test_validation_rejects_out_of_order_levels() {
        let mut rules = RuleTable::builtin().rules().to_vec();
        rules.swap(0, 1);
        assert!(matches!(
            RuleTable::new(rules),
            Err(TriageError::InvalidRuleTable(_))
        ));
    }

    #[test]
    fn test_validation_rejects_uppercase_keywords() {
        let mut rules = RuleTable::builtin().rules().to_vec();
        rules[0].keywords.push("PARO".to_string());
        assert!(matches!(
            RuleTable::new(rules),
            Err(TriageError::InvalidRuleTable(_))
        ));
    }

    #[test]
    fn test_validation_rejects_empty_keyword() {
        let mut rules = RuleTable::builtin().rules().to_vec();
        rules[2].keywords.push("  ".to_string());
        assert!(matches!(
            RuleTable::new(rules),
            Err(TriageError::InvalidRuleTable(_))
        ));
    }

    #[test]
    fn test_from_yaml_file_round_trip() {
        let yaml = serde_yaml::to_string(RuleTable::builtin().rules()).expect("serialize rules");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "{}", yaml).expect("write rules");

        let table = RuleTable::from_yaml_file(file.path()).expect("load rules");
        assert_eq!(table.rules().len(), 5);
        assert_eq!(
            table.match_urgency("dolor pecho").level,
            UrgencyLevel::VeryUrgent
        );
    }

    #[test]
    fn test_from_yaml_file_missing() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = RuleTable::from_yaml_file(&dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(TriageError::RulesFileRead(_))));
    }

    #[test]
    fn test_from_yaml_file_invalid_shape() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, "just a scalar").expect("write rules");
        let result = RuleTable::from_yaml_file(file.path());
        assert!(matches!(result, Err(TriageError::RulesFileParse(_))));
    }
}
