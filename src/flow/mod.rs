// Guided intake flow
//
// A fixed ordered question sequence, per-answer validation, and the report
// assembled once every step has been confirmed.

mod question;
mod report;
mod session;
mod validator;

pub use question::{default_flow, Constraints, QuestionSpec, QuickReply};
pub use report::{assemble, detailed_report, ReportPayload};
pub use session::{GuidedSession, StepOutcome};
pub use validator::{validate, Normalized, ValidationError};
