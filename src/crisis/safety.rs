// Safety sub-flow presented when crisis language is detected
//
// Offers a professional hotline handoff, a breathing-exercise aid, or the
// option to keep chatting. The contact values come from configuration so
// they stay auditable in one place.

use crate::config::EmergencyContacts;

/// The three exits offered after a crisis detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SafetyAction {
    ContactProfessional,
    BreathingExercise,
    ContinueChat,
}

impl SafetyAction {
    pub fn label(&self) -> &'static str {
        match self {
            SafetyAction::ContactProfessional => "Hubungi Profesional",
            SafetyAction::BreathingExercise => "Latihan Pernapasan",
            SafetyAction::ContinueChat => "Tetap Lanjut Chat",
        }
    }

    pub fn all() -> [SafetyAction; 3] {
        [
            SafetyAction::ContactProfessional,
            SafetyAction::BreathingExercise,
            SafetyAction::ContinueChat,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct SafetyFlow {
    contacts: EmergencyContacts,
}

impl SafetyFlow {
    pub fn new(contacts: EmergencyContacts) -> Self {
        Self { contacts }
    }

    /// Messages shown immediately after a crisis detection, before the
    /// action options are presented.
    pub fn crisis_messages(&self) -> Vec<String> {
        vec![
            "Saya sangat prihatin mendengar Anda merasakan hal ini. Keselamatan Anda sangat penting bagi saya.".to_string(),
            "Sepertinya kamu sedang dalam kondisi yang berat. Aku sangat khawatir dengan kamu.".to_string(),
            "Pilih yang kamu butuhkan:".to_string(),
        ]
    }

    /// Response messages for a chosen safety action.
    pub fn respond(&self, action: SafetyAction) -> Vec<String> {
        match action {
            SafetyAction::ContactProfessional => vec![
                format!(
                    "Baik, saya akan menghubungkan kamu dengan tim PPKS profesional kami melalui WhatsApp.\n\nNomor WhatsApp PPKS: {}\nEmail konseling: {}\n\nNomor darurat: {} | Hotline Kemenkes: {}",
                    self.contacts.whatsapp_display,
                    self.contacts.counseling_email,
                    self.contacts.emergency,
                    self.contacts.hotline_kemenkes,
                ),
                format!("Link langsung: {}", self.whatsapp_url()),
            ],
            SafetyAction::BreathingExercise => vec![
                "Latihan Pernapasan Sederhana:\n\n1. Tarik napas dalam-dalam (4 detik)\n2. Tahan (4 detik)\n3. Buang napas perlahan (6 detik)\n4. Ulangi 5-10 kali\n\nFokus pada napasmu dan rasakan tubuhmu lebih rileks.".to_string(),
                "Apakah kamu merasa sedikit lebih baik? Mau lanjut ngobrol?".to_string(),
            ],
            SafetyAction::ContinueChat => vec![
                "Baik, saya di sini untuk mendengarkan. Ceritakan apa yang Anda ingin sampaikan.".to_string(),
            ],
        }
    }

    /// wa.me deep link for the configured PPKS number.
    pub fn whatsapp_url(&self) -> String {
        format!(
            "https://wa.me/{}?text=Halo,%20saya%20butuh%20bantuan%20dari%20PPKS.",
            self.contacts.whatsapp_number.trim_start_matches('+')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hotline_response_carries_configured_number() {
        let flow = SafetyFlow::new(EmergencyContacts::default());
        let messages = flow.respond(SafetyAction::ContactProfessional);

        assert!(messages[0].contains("+62 821-8846-7793"));
        assert!(messages[0].contains("konseling@telkomuniversity.ac.id"));
        assert!(messages[1].contains("wa.me/6282188467793"));
    }

    #[test]
    fn test_breathing_exercise_is_self_contained() {
        let flow = SafetyFlow::new(EmergencyContacts::default());
        let messages = flow.respond(SafetyAction::BreathingExercise);

        assert!(messages[0].contains("Tarik napas"));
    }

    #[test]
    fn test_three_actions_offered() {
        assert_eq!(SafetyAction::all().len(), 3);
    }
}
