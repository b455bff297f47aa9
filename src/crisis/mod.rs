// Crisis language detection and the safety sub-flow
//
// Detection pre-empts normal turn processing in every conversational mode.

mod detector;
mod safety;

pub use detector::{CrisisDetector, CrisisKeywords};
pub use safety::{SafetyAction, SafetyFlow};
