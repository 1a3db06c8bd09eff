//! Per-specialty guidance lookup.
//!
//! Supplements the referral with self-care measures and a specialty urgency
//! hint. Predicted labels do not always match the advice keys exactly (the
//! classifier may emit "CARDIOLOGÍA/CIRCULATORIO" where the table knows
//! "CARDIOLOGÍA"), so the lookup is an explicit substring match in both
//! directions over a fixed, ordered key list (first match wins), with a
//! generic default entry when nothing matches.

/// Guidance block attached to an assessment.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SpecialtyAdvice {
    /// Coarse urgency hint for the specialty as a whole.
    pub urgency_hint: String,
    /// Main advice paragraph.
    pub advice: String,
    /// Suggested self-care measures, in display order.
    pub measures: Vec<String>,
}

struct AdviceEntry {
    key: &'static str,
    urgency_hint: &'static str,
    advice: &'static str,
    measures: [&'static str; 4],
}

/// Ordered: iteration order is the tie-break for ambiguous labels.
const ADVICE_TABLE: &[AdviceEntry] = &[
    AdviceEntry {
        key: "CARDIOLOGÍA/CIRCULATORIO",
        urgency_hint: "ALTA",
        advice: "Si experimentas dolor en el pecho, dificultad para respirar o \
                 palpitaciones intensas, acude INMEDIATAMENTE a urgencias.",
        measures: [
            "Mantente en reposo",
            "No realices esfuerzos físicos",
            "Monitorea tu presión arterial si es posible",
            "En caso de dolor agudo: llama al 911",
        ],
    },
    AdviceEntry {
        key: "RESPIRATORIO/NEUMOLOGÍA",
        urgency_hint: "MEDIA-ALTA",
        advice: "Los problemas respiratorios pueden agravarse rápidamente. Consulta \
                 pronto a un especialista.",
        measures: [
            "Ventila bien los espacios",
            "Evita irritantes (humo, polvo)",
            "Si hay dificultad respiratoria severa: acude a urgencias",
            "Mantente hidratado",
        ],
    },
    AdviceEntry {
        key: "GASTROENTEROLOGÍA/DIGESTIVO",
        urgency_hint: "MEDIA",
        advice: "Los síntomas digestivos pueden indicar diversas condiciones. Se \
                 recomienda consulta médica.",
        measures: [
            "Dieta blanda y ligera",
            "Hidratación constante",
            "Si hay sangrado o dolor intenso: urgencias",
            "Evita alimentos irritantes",
        ],
    },
    AdviceEntry {
        key: "NEUROLOGÍA",
        urgency_hint: "ALTA",
        advice: "Los síntomas neurológicos requieren atención especializada urgente.",
        measures: [
            "No conduzcas ni operes maquinaria",
            "Reposo en lugar seguro",
            "Si hay confusión, parálisis o pérdida de conciencia: 911",
            "Anota cuándo comenzaron los síntomas",
        ],
    },
    AdviceEntry {
        key: "TRAUMATOLOGÍA/MUSCULAR",
        urgency_hint: "MEDIA",
        advice: "Las lesiones musculoesqueléticas necesitan evaluación para evitar \
                 complicaciones.",
        measures: [
            "Reposo de la zona afectada",
            "Aplicar hielo (primeras 48h)",
            "Inmovilizar si hay sospecha de fractura",
            "Si hay deformidad o dolor severo: urgencias",
        ],
    },
    AdviceEntry {
        key: "DERMATOLOGÍA",
        urgency_hint: "BAJA",
        advice: "Los problemas de piel generalmente no son urgentes, pero requieren \
                 diagnóstico profesional.",
        measures: [
            "No rascar ni tocar excesivamente",
            "Mantener la zona limpia y seca",
            "Evitar productos irritantes",
            "Consulta si empeora o se extiende",
        ],
    },
    AdviceEntry {
        key: "UROLOGÍA/RENAL",
        urgency_hint: "MEDIA",
        advice: "Los problemas urinarios o renales pueden ser serios. Consulta médica \
                 necesaria.",
        measures: [
            "Aumenta la ingesta de agua",
            "Evita retener la orina",
            "Si hay sangre en orina o dolor intenso: urgencias",
            "Monitorea la frecuencia urinaria",
        ],
    },
    AdviceEntry {
        key: "OFTALMOLOGÍA/ORL",
        urgency_hint: "MEDIA",
        advice: "Los problemas de visión, oído o garganta requieren evaluación \
                 especializada.",
        measures: [
            "No te frotes los ojos",
            "Evita sonidos muy fuertes",
            "Si hay pérdida súbita de visión/audición: urgencias",
            "Mantén buena higiene",
        ],
    },
    AdviceEntry {
        key: "PSIQUIATRÍA/MENTAL",
        urgency_hint: "MEDIA",
        advice: "La salud mental es igual de importante. Busca apoyo profesional.",
        measures: [
            "Habla con alguien de confianza",
            "Evita el aislamiento",
            "Si hay pensamientos de autolesión: llama a línea de crisis",
            "Mantén rutinas saludables",
        ],
    },
    AdviceEntry {
        key: "ONCOLOGÍA (TUMORES)",
        urgency_hint: "ALTA",
        advice: "Cualquier sospecha de tumor requiere evaluación médica inmediata.",
        measures: [
            "Programa cita con especialista pronto",
            "No ignores síntomas persistentes",
            "Mantén un registro de síntomas",
            "Busca apoyo familiar y profesional",
        ],
    },
    AdviceEntry {
        key: "INFECCIOSAS/PARASITARIAS",
        urgency_hint: "MEDIA-ALTA",
        advice: "Las infecciones pueden propagarse o agravarse. Consulta médica \
                 necesaria.",
        measures: [
            "Aíslate si es contagioso",
            "Hidratación constante",
            "Monitorea la temperatura",
            "Si hay fiebre alta persistente: urgencias",
        ],
    },
];

/// Resolves the advice block for a predicted specialty label.
///
/// Matching is case-insensitive: the label is upper-cased and compared by
/// substring containment in both directions against each known key, in table
/// order. Unknown specialties get generic guidance.
pub fn advice_for(specialty: &str) -> SpecialtyAdvice {
    let upper = specialty.to_uppercase();

    for entry in ADVICE_TABLE {
        if entry.key.contains(upper.as_str()) || upper.contains(entry.key) {
            return SpecialtyAdvice {
                urgency_hint: entry.urgency_hint.to_string(),
                advice: entry.advice.to_string(),
                measures: entry.measures.iter().map(|m| m.to_string()).collect(),
            };
        }
    }

    tracing::warn!(specialty = %specialty, "no advice entry for specialty, using generic guidance");

    SpecialtyAdvice {
        urgency_hint: "MEDIA".to_string(),
        advice: "Se recomienda consulta médica general para evaluación apropiada."
            .to_string(),
        measures: vec![
            "Consulta con tu médico de cabecera".to_string(),
            "Lleva un registro de tus síntomas".to_string(),
            "No te automediques".to_string(),
            "Busca atención si los síntomas empeoran".to_string(),
        ],
    }
}
