// Guided intake session: the per-session state machine
//
// Holds the step cursor and the answers confirmed so far. One atomic
// transition per user turn: validate, store, decide the next prompt.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::question::{QuestionSpec, QuickReply};
use super::report::{assemble, ReportPayload};
use super::validator::{validate, Normalized};

/// Result of feeding one answer into the session.
#[derive(Debug, Clone)]
pub enum StepOutcome {
    /// Ask (or re-ask after a valid answer) the question at the cursor.
    Ask {
        /// Confirmation of the previous answer, e.g. the resolved date
        ack: Option<String>,
        prompt: String,
        quick_replies: Vec<QuickReply>,
    },
    /// The answer was rejected; same step is re-asked.
    Retry { error: String, prompt: String },
    /// All steps confirmed; the payload is assembled exactly once.
    Completed {
        ack: Option<String>,
        payload: ReportPayload,
    },
    /// The session already finished; no transition happened.
    AlreadyCompleted,
}

#[derive(Debug, Clone)]
pub struct GuidedSession {
    flow: Vec<QuestionSpec>,
    step_index: usize,
    answers: BTreeMap<String, String>,
    awaiting_correction: bool,
    completed: bool,
    /// Reference date for natural-language date answers
    today: NaiveDate,
}

impl GuidedSession {
    pub fn new(flow: Vec<QuestionSpec>, today: NaiveDate) -> Self {
        Self {
            flow,
            step_index: 0,
            answers: BTreeMap::new(),
            awaiting_correction: false,
            completed: false,
            today,
        }
    }

    /// Prompt for the first question.
    pub fn start(&self) -> StepOutcome {
        let question = &self.flow[0];
        StepOutcome::Ask {
            ack: None,
            prompt: question.prompt.clone(),
            quick_replies: question.quick_replies.clone(),
        }
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn answers(&self) -> &BTreeMap<String, String> {
        &self.answers
    }

    pub fn awaiting_correction(&self) -> bool {
        self.awaiting_correction
    }

    pub fn is_complete(&self) -> bool {
        self.completed
    }

    pub fn current_question(&self) -> Option<&QuestionSpec> {
        self.flow.get(self.step_index)
    }

    /// Process one user answer for the current step.
    pub fn answer(&mut self, raw: &str) -> StepOutcome {
        if self.completed {
            return StepOutcome::AlreadyCompleted;
        }

        let question = self.flow[self.step_index].clone();
        self.awaiting_correction = false;

        let normalized = match validate(raw, &question, self.today) {
            Ok(normalized) => normalized,
            Err(err) => {
                self.awaiting_correction = true;
                tracing::debug!(step = self.step_index, "Answer rejected: {}", err);
                return StepOutcome::Retry {
                    error: err.to_string(),
                    prompt: question.prompt.clone(),
                };
            }
        };

        let ack = self.store(&question, &normalized);
        self.step_index += 1;

        if self.step_index == self.flow.len() {
            self.completed = true;
            tracing::debug!("Guided flow completed, assembling report");
            return StepOutcome::Completed {
                ack,
                payload: assemble(&self.answers),
            };
        }

        let next = &self.flow[self.step_index];
        StepOutcome::Ask {
            ack,
            prompt: next.prompt.clone(),
            quick_replies: next.quick_replies.clone(),
        }
    }

    /// Process a quick-reply shortcut. The literal value skips free-text
    /// parsing but is still re-validated defensively.
    pub fn quick_reply(&mut self, value: &str) -> StepOutcome {
        let outcome = self.answer(value);
        if let StepOutcome::Retry { error, .. } = &outcome {
            tracing::error!("Quick reply value failed validation: {}", error);
        }
        outcome
    }

    /// Store a confirmed answer. Keys only accumulate; a date answer also
    /// fills the companion ISO and weekday fields.
    fn store(&mut self, question: &QuestionSpec, normalized: &Normalized) -> Option<String> {
        match normalized {
            Normalized::Date(parsed) => {
                self.answers
                    .insert(question.id.clone(), parsed.iso_string());
                if let Some(weekday_field) = &question.weekday_field {
                    self.answers
                        .insert(weekday_field.clone(), parsed.weekday.to_string());
                }
                Some(format!("Tanggal dicatat: {}", parsed.display_text))
            }
            other => {
                self.answers
                    .insert(question.id.clone(), other.as_field_value());
                None
            }
        }
    }
}
