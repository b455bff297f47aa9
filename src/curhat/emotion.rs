// Keyword-based emotional state classification

/// Coarse emotional classification, recomputed every turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmotionalState {
    Distressed,
    Angry,
    Sad,
    Confused,
    Calm,
}

const DISTRESSED: [&str; 5] = ["trauma", "takut", "panik", "cemas", "khawatir"];
const ANGRY: [&str; 5] = ["marah", "kesal", "benci", "jengkel", "dongkol"];
const SAD: [&str; 5] = ["sedih", "kecewa", "hancur", "terpukul", "menangis"];
const CONFUSED: [&str; 5] = ["bingung", "tidak tahu", "gimana", "bagaimana", "kenapa"];

/// Classify a message. First matching category wins; anything else is calm.
pub fn classify(text: &str) -> EmotionalState {
    let lower = text.to_lowercase();

    let matches_any = |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if matches_any(&DISTRESSED) {
        EmotionalState::Distressed
    } else if matches_any(&ANGRY) {
        EmotionalState::Angry
    } else if matches_any(&SAD) {
        EmotionalState::Sad
    } else if matches_any(&CONFUSED) {
        EmotionalState::Confused
    } else {
        EmotionalState::Calm
    }
}

const INCIDENT_KEYWORDS: [&str; 14] = [
    "kejadian",
    "terjadi",
    "alami",
    "korban",
    "pelaku",
    "pelecehan",
    "kekerasan",
    "bully",
    "dilecehkan",
    "dipukul",
    "dosen",
    "teman",
    "senior",
    "disakiti",
];

/// Whether the message indicates a reportable incident.
pub fn mentions_incident(text: &str) -> bool {
    let lower = text.to_lowercase();
    INCIDENT_KEYWORDS.iter().any(|k| lower.contains(k))
}
