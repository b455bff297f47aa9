// Curhat mode: the emotional-support conversational flow
//
// A safe space for venting. Tracks emotional state per turn, remembers
// whether an incident was mentioned, and offers a one-time bridge into the
// guided report flow.

mod emotion;
mod responses;

pub use emotion::{classify, mentions_incident, EmotionalState};
pub use responses::{
    contextual_response, pick_template, FixedPicker, RandomPicker, ResponsePicker,
    CURHAT_SYSTEM_PROMPT, EMPATHY, LISTENING, VALIDATION,
};

/// Who said a turn; maps onto the collaborator's user/assistant roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Bot,
}

#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

/// Reporter's answer to the "create a formal report?" offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionChoice {
    Accept,
    Decline,
    Postpone,
}

/// Per-session curhat state. Mutually exclusive with a guided session.
#[derive(Debug, Clone)]
pub struct CurhatSession {
    pub turn_count: u32,
    pub emotional_state: EmotionalState,
    /// Sticky: set once an incident-indicating turn is seen, never cleared
    pub has_shared_incident: bool,
    /// Guard so the transition offer happens at most once per session
    pub offered_transition: bool,
    history: Vec<ChatTurn>,
}

/// Turns of context forwarded to the text-generation collaborator.
const HISTORY_WINDOW: usize = 6;

/// Turn count after which a shared incident triggers the report offer.
const OFFER_THRESHOLD: u32 = 5;

impl CurhatSession {
    pub fn new() -> Self {
        Self {
            turn_count: 0,
            emotional_state: EmotionalState::Calm,
            has_shared_incident: false,
            offered_transition: false,
            history: Vec::new(),
        }
    }

    /// Opening messages for the mode.
    pub fn opening_messages() -> Vec<String> {
        vec![
            "Ini adalah ruang aman untuk Anda. Anda bisa bercerita tentang apa pun yang Anda rasakan. Saya di sini untuk mendengarkan tanpa menghakimi.".to_string(),
            "Apa yang sedang Anda rasakan hari ini?".to_string(),
        ]
    }

    /// Record an incoming user turn: bump the counter and append history.
    /// Happens before the crisis check, so a crisis turn still counts.
    pub fn note_user_turn(&mut self, text: &str) {
        self.turn_count += 1;
        self.history.push(ChatTurn {
            role: Role::User,
            text: text.to_string(),
        });
    }

    /// Reclassify emotion and update the sticky incident flag.
    pub fn observe(&mut self, text: &str) {
        self.emotional_state = classify(text);
        if mentions_incident(text) {
            self.has_shared_incident = true;
        }
    }

    pub fn note_bot_reply(&mut self, text: &str) {
        self.history.push(ChatTurn {
            role: Role::Bot,
            text: text.to_string(),
        });
    }

    /// Recent turns for the collaborator's context window.
    pub fn recent_history(&self) -> &[ChatTurn] {
        let start = self.history.len().saturating_sub(HISTORY_WINDOW);
        &self.history[start..]
    }

    /// Whether to present the one-time report offer now. Sets the guard
    /// when it fires, so a second call never re-offers.
    pub fn should_offer_transition(&mut self) -> bool {
        if self.turn_count >= OFFER_THRESHOLD && self.has_shared_incident && !self.offered_transition
        {
            self.offered_transition = true;
            return true;
        }
        false
    }

    /// Deterministic reply for this turn: escalating template tiers for the
    /// first three turns, context-aware text afterwards.
    pub fn fallback_reply(&self, text: &str, picker: &dyn ResponsePicker) -> String {
        match self.turn_count {
            0 | 1 => pick_template(&LISTENING, picker),
            2 => pick_template(&EMPATHY, picker),
            3 => pick_template(&VALIDATION, picker),
            _ => contextual_response(text, picker),
        }
    }

    /// Whether this turn should try the text-generation collaborator.
    pub fn wants_generated_reply(&self) -> bool {
        self.turn_count >= 2
    }

    /// Messages for the report-creation offer.
    pub fn offer_messages() -> Vec<String> {
        vec![
            "Terima kasih sudah mau berbagi dengan saya. Berdasarkan cerita Anda, sepertinya ada kejadian yang perlu ditindaklanjuti.".to_string(),
            "Apakah Anda ingin membuat laporan resmi? Laporan akan membantu tim kami mengambil tindakan yang tepat.".to_string(),
        ]
    }

    /// Messages for a given answer to the offer. Declining or postponing
    /// never re-offers within the session.
    pub fn transition_messages(choice: TransitionChoice) -> Vec<String> {
        match choice {
            TransitionChoice::Accept => vec![
                "Baik, saya akan memandu Anda membuat laporan dengan pertanyaan terstruktur.".to_string(),
            ],
            TransitionChoice::Decline => vec![
                "Tidak masalah. Keputusan ada di tangan Anda. Jika suatu saat Anda berubah pikiran, kami siap membantu.".to_string(),
                "Apakah ada hal lain yang ingin Anda ceritakan atau tanyakan?".to_string(),
            ],
            TransitionChoice::Postpone => vec![
                "Baik, tidak masalah. Ambil waktu yang Anda butuhkan. Saya akan tetap di sini jika Anda ingin melanjutkan percakapan.".to_string(),
                "Ingat, Anda bisa membuat laporan kapan saja ketika Anda siap.".to_string(),
            ],
        }
    }
}

impl Default for CurhatSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_count_monotonic() {
        let mut session = CurhatSession::new();
        session.note_user_turn("halo");
        session.note_user_turn("aku mau cerita");
        assert_eq!(session.turn_count, 2);
    }

    #[test]
    fn test_incident_flag_sticky() {
        let mut session = CurhatSession::new();
        session.observe("aku dipukul senior");
        assert!(session.has_shared_incident);

        // later calm turns never clear it
        session.observe("hari ini biasa saja");
        assert!(session.has_shared_incident);
        assert_eq!(session.emotional_state, EmotionalState::Calm);
    }

    #[test]
    fn test_offer_fires_once() {
        let mut session = CurhatSession::new();
        session.turn_count = 5;
        session.has_shared_incident = true;

        assert!(session.should_offer_transition());
        assert!(session.offered_transition);
        // same advance logic again does not re-trigger
        assert!(!session.should_offer_transition());
        assert!(session.offered_transition);
    }

    #[test]
    fn test_offer_requires_incident() {
        let mut session = CurhatSession::new();
        session.turn_count = 9;
        assert!(!session.should_offer_transition());
    }

    #[test]
    fn test_template_tiers_escalate() {
        let picker = FixedPicker(0);
        let mut session = CurhatSession::new();

        session.note_user_turn("halo");
        assert_eq!(session.fallback_reply("halo", &picker), LISTENING[0]);

        session.note_user_turn("lanjut");
        assert_eq!(session.fallback_reply("lanjut", &picker), EMPATHY[0]);

        session.note_user_turn("lagi");
        assert_eq!(session.fallback_reply("lagi", &picker), VALIDATION[0]);

        session.note_user_turn("terus");
        // turn four onward is contextual
        assert!(session
            .fallback_reply("gimana menurutmu?", &picker)
            .contains("konselor"));
    }

    #[test]
    fn test_history_window_bounded() {
        let mut session = CurhatSession::new();
        for i in 0..10 {
            session.note_user_turn(&format!("pesan {}", i));
            session.note_bot_reply("oke");
        }
        assert_eq!(session.recent_history().len(), 6);
    }
}
