// Intake engine
//
// Single entry point for a conversation turn. Owns the crisis detector,
// the safety flow, the reply generator and the report gateway, and turns
// reporter input into an ordered list of bot events. No error escapes a
// turn: provider and gateway failures degrade into fallback events.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::config::Config;
use crate::crisis::{CrisisDetector, SafetyAction, SafetyFlow};
use crate::curhat::{CurhatSession, ResponsePicker, TransitionChoice, CURHAT_SYSTEM_PROMPT};
use crate::flow::{default_flow, GuidedSession, QuickReply, ReportPayload, StepOutcome};
use crate::flow::detailed_report;
use crate::gateway::{build_steps, CaseReport, GatewayError, Outbox, ReportGateway, TimelineStep};
use crate::providers::{ReplyContext, ReplyGenerator};

pub mod sessions;

pub use sessions::{SessionManager, SessionState};

/// One conversation, in exactly one mode at a time.
#[derive(Debug, Clone)]
pub enum Session {
    Guided(GuidedSession),
    Curhat(CurhatSession),
}

/// What the frontend should do, in order, after a turn.
#[derive(Debug, Clone)]
pub enum BotEvent {
    Say(String),
    /// Offer tap-to-answer buttons for the current question
    QuickReplies(Vec<QuickReply>),
    /// Present the three crisis safety options
    SafetyOptions,
    /// Present the report-creation offer (ya / tidak / nanti)
    TransitionOffer,
    /// The guided flow finished; payload awaits send confirmation
    ReportReady(ReportPayload),
    Submitted {
        tracking_id: String,
    },
    SubmissionFailed {
        reason: String,
        saved_to: Option<PathBuf>,
    },
}

pub struct Engine {
    detector: CrisisDetector,
    safety: SafetyFlow,
    generator: Arc<dyn ReplyGenerator>,
    gateway: Arc<dyn ReportGateway>,
    outbox: Outbox,
    picker: Box<dyn ResponsePicker>,
    today: NaiveDate,
}

impl Engine {
    pub fn new(
        config: &Config,
        generator: Arc<dyn ReplyGenerator>,
        gateway: Arc<dyn ReportGateway>,
        picker: Box<dyn ResponsePicker>,
    ) -> anyhow::Result<Self> {
        let detector = match &config.crisis_keywords_path {
            Some(path) => CrisisDetector::load_from_file(path)?,
            None => CrisisDetector::new(),
        };

        Ok(Self {
            detector,
            safety: SafetyFlow::new(config.contacts.clone()),
            generator,
            gateway,
            outbox: Outbox::new(config.outbox_dir.clone()),
            picker,
            today: Local::now().date_naive(),
        })
    }

    /// Pin the reference date for natural-language date answers.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn start_guided(&self) -> (Session, Vec<BotEvent>) {
        let session = GuidedSession::new(default_flow(), self.today);
        let events = match session.start() {
            StepOutcome::Ask {
                prompt,
                quick_replies,
                ..
            } => Self::question_events(None, prompt, quick_replies),
            _ => Vec::new(),
        };
        (Session::Guided(session), events)
    }

    pub fn start_curhat(&self) -> (Session, Vec<BotEvent>) {
        let events = CurhatSession::opening_messages()
            .into_iter()
            .map(BotEvent::Say)
            .collect();
        (Session::Curhat(CurhatSession::new()), events)
    }

    /// Process one free-text turn. Crisis detection runs before anything
    /// else in either mode.
    pub async fn handle_turn(&self, session: &mut Session, input: &str) -> Vec<BotEvent> {
        match session {
            Session::Guided(guided) => {
                if self.detector.detect(input) {
                    // the step cursor stays put; the answer is not consumed
                    return self.crisis_events();
                }
                self.guided_events(guided.answer(input))
            }
            Session::Curhat(curhat) => {
                // a crisis turn still counts toward the turn total
                curhat.note_user_turn(input);
                if self.detector.detect(input) {
                    return self.crisis_events();
                }
                self.curhat_events(curhat, input).await
            }
        }
    }

    /// Process a quick-reply tap in guided mode.
    pub fn handle_quick_reply(&self, session: &mut Session, value: &str) -> Vec<BotEvent> {
        match session {
            Session::Guided(guided) => self.guided_events(guided.quick_reply(value)),
            Session::Curhat(_) => vec![BotEvent::Say(
                "Pilihan itu tidak tersedia di mode curhat.".to_string(),
            )],
        }
    }

    /// Handle the reporter's pick from the crisis safety options.
    pub fn safety_response(&self, action: SafetyAction) -> Vec<BotEvent> {
        self.safety
            .respond(action)
            .into_iter()
            .map(BotEvent::Say)
            .collect()
    }

    /// Handle the answer to the report-creation offer. Accepting is the
    /// only way a curhat session becomes a guided one.
    pub fn transition_choice(
        &self,
        session: &mut Session,
        choice: TransitionChoice,
    ) -> Vec<BotEvent> {
        let mut events: Vec<BotEvent> = CurhatSession::transition_messages(choice)
            .into_iter()
            .map(BotEvent::Say)
            .collect();

        if choice == TransitionChoice::Accept {
            let (guided, start_events) = self.start_guided();
            *session = guided;
            events.extend(start_events);
        }
        events
    }

    /// Submit an assembled report; failure saves to the outbox.
    pub async fn submit(&self, payload: &ReportPayload) -> Vec<BotEvent> {
        match self.gateway.submit(payload).await {
            Ok(tracking_id) => vec![
                BotEvent::Say(format!(
                    "Laporan berhasil dikirim!\n\nID Laporan: {}",
                    tracking_id
                )),
                BotEvent::Say(
                    "Tim kami akan segera menindaklanjuti laporan kamu. Kamu bisa cek status laporan dengan ID di atas.".to_string(),
                ),
                BotEvent::Submitted { tracking_id },
            ],
            Err(e) => {
                tracing::error!("Report submission failed: {}", e);
                let saved_to = match self.outbox.save(payload) {
                    Ok(path) => Some(path),
                    Err(save_err) => {
                        tracing::error!("Outbox save also failed: {}", save_err);
                        None
                    }
                };
                let mut events = vec![BotEvent::Say(match &saved_to {
                    Some(_) => "Koneksi ke server gagal, tapi laporan kamu sudah disimpan sementara di perangkat ini. Tim kami akan mengambil data laporan nanti.".to_string(),
                    None => "Maaf, terjadi kesalahan saat mengirim laporan. Silakan coba lagi.".to_string(),
                })];
                events.push(BotEvent::SubmissionFailed {
                    reason: e.to_string(),
                    saved_to,
                });
                events
            }
        }
    }

    /// Look up a submitted case and derive its handling timeline.
    pub async fn case_status(
        &self,
        tracking_id: &str,
    ) -> Result<(CaseReport, Vec<TimelineStep>), GatewayError> {
        let report = self.gateway.status(tracking_id).await?;
        let steps = build_steps(&report);
        Ok((report, steps))
    }

    pub fn detector(&self) -> &CrisisDetector {
        &self.detector
    }

    pub fn outbox(&self) -> &Outbox {
        &self.outbox
    }

    fn crisis_events(&self) -> Vec<BotEvent> {
        let mut events: Vec<BotEvent> = self
            .safety
            .crisis_messages()
            .into_iter()
            .map(BotEvent::Say)
            .collect();
        events.push(BotEvent::SafetyOptions);
        events
    }

    fn question_events(
        ack: Option<String>,
        prompt: String,
        quick_replies: Vec<QuickReply>,
    ) -> Vec<BotEvent> {
        let mut events = Vec::new();
        if let Some(ack) = ack {
            events.push(BotEvent::Say(ack));
        }
        events.push(BotEvent::Say(prompt));
        if !quick_replies.is_empty() {
            events.push(BotEvent::QuickReplies(quick_replies));
        }
        events
    }

    fn guided_events(&self, outcome: StepOutcome) -> Vec<BotEvent> {
        match outcome {
            StepOutcome::Ask {
                ack,
                prompt,
                quick_replies,
            } => Self::question_events(ack, prompt, quick_replies),
            StepOutcome::Retry { error, prompt } => vec![
                BotEvent::Say(format!("{}\n\nSilakan coba lagi.", error)),
                BotEvent::Say(prompt),
            ],
            StepOutcome::Completed { ack, payload } => {
                let mut events = Vec::new();
                if let Some(ack) = ack {
                    events.push(BotEvent::Say(ack));
                }
                events.push(BotEvent::Say(
                    "Makasih udah melengkapi semua informasi! Ini ringkasan laporan kamu:"
                        .to_string(),
                ));
                events.push(BotEvent::Say(detailed_report(&payload)));
                events.push(BotEvent::ReportReady(payload));
                events
            }
            StepOutcome::AlreadyCompleted => vec![BotEvent::Say(
                "Laporan kamu sudah lengkap. Silakan kirim atau mulai ulang.".to_string(),
            )],
        }
    }

    async fn curhat_events(&self, curhat: &mut CurhatSession, input: &str) -> Vec<BotEvent> {
        curhat.observe(input);

        let reply = if curhat.wants_generated_reply() {
            let ctx = ReplyContext {
                system: CURHAT_SYSTEM_PROMPT.to_string(),
                history: curhat.recent_history().to_vec(),
                user_message: input.to_string(),
            };
            match self.generator.generate_reply(&ctx).await {
                Ok(text) => text,
                Err(e) => {
                    tracing::warn!(
                        "Reply generator '{}' failed, using template fallback: {}",
                        self.generator.name(),
                        e
                    );
                    curhat.fallback_reply(input, self.picker.as_ref())
                }
            }
        } else {
            curhat.fallback_reply(input, self.picker.as_ref())
        };

        curhat.note_bot_reply(&reply);
        let mut events = vec![BotEvent::Say(reply)];

        if curhat.should_offer_transition() {
            for message in CurhatSession::offer_messages() {
                events.push(BotEvent::Say(message));
            }
            events.push(BotEvent::TransitionOffer);
        }
        events
    }
}
