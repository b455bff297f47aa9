// Per-question answer validation and normalization

use chrono::NaiveDate;
use thiserror::Error;

use super::question::{Constraints, QuestionSpec};
use crate::dates::{self, ParsedDate};

/// A validated, normalized answer.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    Text(String),
    /// The canonical-cased option, not the raw reply
    Choice(String),
    Date(ParsedDate),
}

impl Normalized {
    /// The value as stored in the report field.
    pub fn as_field_value(&self) -> String {
        match self {
            Normalized::Text(s) | Normalized::Choice(s) => s.clone(),
            Normalized::Date(d) => d.display_text.clone(),
        }
    }
}

/// Why an answer was rejected. User-correctable; never fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Jawaban tidak boleh kosong.")]
    Empty,
    #[error("Minimal {min} karakter.")]
    TooShort { min: usize },
    #[error("Maksimal {max} karakter.")]
    TooLong { max: usize },
    #[error("Format tidak valid.")]
    PatternMismatch,
    #[error("Pilihan tidak valid. Opsi: {}", options.join(", "))]
    InvalidChoice { options: Vec<String> },
    #[error("Format tanggal tidak valid.")]
    UnparseableDate,
    /// The question's configured message, used in place of the generic one
    #[error("{0}")]
    Custom(String),
}

/// Validate a raw answer against a question's constraints.
///
/// `today` is the reference date for natural-language date resolution.
/// An empty (post-trim) answer is rejected before type dispatch; on any
/// other failure the question's configured error message wins over the
/// generic constraint message.
pub fn validate(
    raw: &str,
    spec: &QuestionSpec,
    today: NaiveDate,
) -> Result<Normalized, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    let result = match &spec.constraints {
        Constraints::Text {
            min_len,
            max_len,
            pattern,
        } => validate_text(trimmed, *min_len, *max_len, pattern.as_ref()),
        Constraints::Choice { options } => validate_choice(trimmed, options),
        Constraints::Date => dates::resolve(trimmed, today)
            .map(Normalized::Date)
            .ok_or(ValidationError::UnparseableDate),
    };

    result.map_err(|err| match &spec.error_message {
        Some(message) => ValidationError::Custom(message.clone()),
        None => err,
    })
}

fn validate_text(
    answer: &str,
    min_len: Option<usize>,
    max_len: Option<usize>,
    pattern: Option<&regex::Regex>,
) -> Result<Normalized, ValidationError> {
    let len = answer.chars().count();

    if let Some(min) = min_len {
        if len < min {
            return Err(ValidationError::TooShort { min });
        }
    }
    if let Some(max) = max_len {
        if len > max {
            return Err(ValidationError::TooLong { max });
        }
    }
    if let Some(re) = pattern {
        if !re.is_match(answer) {
            return Err(ValidationError::PatternMismatch);
        }
    }

    Ok(Normalized::Text(answer.to_string()))
}

/// Case-insensitive match: exact, or the option contained in a verbose
/// reply ("saya korban" matches "Korban"). Returns the canonical option.
fn validate_choice(answer: &str, options: &[String]) -> Result<Normalized, ValidationError> {
    let lower = answer.to_lowercase();

    for option in options {
        let option_lower = option.to_lowercase();
        if lower == option_lower || lower.contains(&option_lower) {
            return Ok(Normalized::Choice(option.clone()));
        }
    }

    Err(ValidationError::InvalidChoice {
        options: options.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::question::QuestionSpec;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 11, 14).unwrap()
    }

    #[test]
    fn test_empty_rejected_before_dispatch() {
        let spec = QuestionSpec::text("nama", "Nama?");
        assert_eq!(validate("   ", &spec, today()), Err(ValidationError::Empty));
    }

    #[test]
    fn test_text_min_length() {
        let spec = QuestionSpec::text("kronologi", "Kronologi?").with_min_len(20);
        let err = validate("cuma5", &spec, today()).unwrap_err();
        assert_eq!(err, ValidationError::TooShort { min: 20 });
        assert!(err.to_string().contains("20"));
    }

    #[test]
    fn test_text_max_length() {
        let spec = QuestionSpec::text("kronologi", "Kronologi?").with_max_len(10);
        let err = validate("jauh lebih panjang dari sepuluh", &spec, today()).unwrap_err();
        assert_eq!(err, ValidationError::TooLong { max: 10 });
    }

    #[test]
    fn test_text_pattern() {
        let spec = QuestionSpec::text("nama", "Nama?").with_pattern(r"^[a-zA-Z\s.]+$");
        assert!(validate("Ahmad Yusuf", &spec, today()).is_ok());
        assert_eq!(
            validate("Ahmad123", &spec, today()),
            Err(ValidationError::PatternMismatch)
        );
    }

    #[test]
    fn test_custom_message_wins() {
        let spec = QuestionSpec::text("nama", "Nama?")
            .with_min_len(3)
            .with_error_message("Nama harus minimal 3 karakter dan hanya berisi huruf.");
        let err = validate("ab", &spec, today()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Nama harus minimal 3 karakter dan hanya berisi huruf."
        );
    }

    #[test]
    fn test_choice_exact_and_containment() {
        let spec = QuestionSpec::choice("jenis_kelamin", "?", &["Laki-laki", "Perempuan"]);

        assert_eq!(
            validate("Perempuan", &spec, today()).unwrap(),
            Normalized::Choice("Perempuan".to_string())
        );
        // verbose reply containing the option still canonicalizes
        assert_eq!(
            validate("saya perempuan", &spec, today()).unwrap(),
            Normalized::Choice("Perempuan".to_string())
        );
        assert_eq!(
            validate("LAKI-LAKI", &spec, today()).unwrap(),
            Normalized::Choice("Laki-laki".to_string())
        );
    }

    #[test]
    fn test_choice_idempotent_on_canonical() {
        let spec = QuestionSpec::choice("kategori", "?", &["Perundungan", "Lainnya"]);
        let first = validate("Perundungan", &spec, today()).unwrap();
        let again = validate(&first.as_field_value(), &spec, today()).unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_invalid_choice_lists_options() {
        let spec = QuestionSpec::choice("jenis_kelamin", "?", &["Laki-laki", "Perempuan"]);
        let err = validate("lainnya", &spec, today()).unwrap_err();
        assert!(err.to_string().contains("Laki-laki"));
    }

    #[test]
    fn test_date_delegates_to_resolver() {
        let spec = QuestionSpec::date("tanggal_kejadian", "Kapan?");
        match validate("hari ini", &spec, today()).unwrap() {
            Normalized::Date(parsed) => {
                assert_eq!(parsed.iso_string(), "2025-11-14");
                assert_eq!(parsed.weekday, "Jumat");
            }
            other => panic!("expected a date, got {:?}", other),
        }
    }

    #[test]
    fn test_date_failure_uses_configured_message() {
        let spec = QuestionSpec::date("tanggal_kejadian", "Kapan?")
            .with_error_message("Format tanggal tidak valid. Coba \"hari ini\".");
        let err = validate("entah", &spec, today()).unwrap_err();
        assert!(err.to_string().starts_with("Format tanggal tidak valid"));
    }
}
