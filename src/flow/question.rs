// Question definitions for the guided intake flow

use regex::Regex;

/// An answer shortcut offered alongside free-text input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickReply {
    pub label: String,
    pub value: String,
}

impl QuickReply {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// Per-field-type validation rules.
#[derive(Debug, Clone)]
pub enum Constraints {
    Text {
        min_len: Option<usize>,
        max_len: Option<usize>,
        pattern: Option<Regex>,
    },
    Choice {
        options: Vec<String>,
    },
    Date,
}

/// One step of the guided flow. Defined statically; immutable per session.
#[derive(Debug, Clone)]
pub struct QuestionSpec {
    /// Report field this answer lands in
    pub id: String,
    pub prompt: String,
    pub constraints: Constraints,
    /// Question-specific error message shown instead of the generic one
    pub error_message: Option<String>,
    pub quick_replies: Vec<QuickReply>,
    /// For date questions: companion field receiving the weekday name
    pub weekday_field: Option<String>,
}

impl QuestionSpec {
    pub fn text(id: &str, prompt: &str) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            constraints: Constraints::Text {
                min_len: None,
                max_len: None,
                pattern: None,
            },
            error_message: None,
            quick_replies: Vec::new(),
            weekday_field: None,
        }
    }

    pub fn choice(id: &str, prompt: &str, options: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            constraints: Constraints::Choice {
                options: options.iter().map(|o| o.to_string()).collect(),
            },
            error_message: None,
            quick_replies: Vec::new(),
            weekday_field: None,
        }
    }

    pub fn date(id: &str, prompt: &str) -> Self {
        Self {
            id: id.to_string(),
            prompt: prompt.to_string(),
            constraints: Constraints::Date,
            error_message: None,
            quick_replies: Vec::new(),
            weekday_field: None,
        }
    }

    pub fn with_min_len(mut self, min: usize) -> Self {
        if let Constraints::Text { min_len, .. } = &mut self.constraints {
            *min_len = Some(min);
        }
        self
    }

    pub fn with_max_len(mut self, max: usize) -> Self {
        if let Constraints::Text { max_len, .. } = &mut self.constraints {
            *max_len = Some(max);
        }
        self
    }

    pub fn with_pattern(mut self, re: &str) -> Self {
        if let Constraints::Text { pattern, .. } = &mut self.constraints {
            *pattern = Some(Regex::new(re).expect("question pattern is valid"));
        }
        self
    }

    pub fn with_error_message(mut self, message: &str) -> Self {
        self.error_message = Some(message.to_string());
        self
    }

    pub fn with_quick_replies(mut self, replies: Vec<QuickReply>) -> Self {
        self.quick_replies = replies;
        self
    }

    pub fn with_weekday_field(mut self, field: &str) -> Self {
        self.weekday_field = Some(field.to_string());
        self
    }
}

/// The standard SIGAP report flow: six questions covering reporter identity,
/// incident date, location, chronology and category.
pub fn default_flow() -> Vec<QuestionSpec> {
    vec![
        QuestionSpec::text(
            "nama",
            "Halo! Aku akan bantu kamu buat laporan. Mari kita mulai.\n\nSiapa nama lengkap kamu?",
        )
        .with_min_len(3)
        .with_pattern(r"^[a-zA-Z\s.]+$")
        .with_error_message("Nama harus minimal 3 karakter dan hanya berisi huruf."),
        QuestionSpec::choice("jenis_kelamin", "Jenis kelamin kamu?", &["Laki-laki", "Perempuan"])
            .with_error_message("Pilihan hanya: \"Laki-laki\" atau \"Perempuan\".")
            .with_quick_replies(vec![
                QuickReply::new("Laki-laki", "Laki-laki"),
                QuickReply::new("Perempuan", "Perempuan"),
            ]),
        QuestionSpec::date(
            "tanggal_kejadian",
            "Kapan kejadian ini terjadi?\n\nKamu bisa ketik tanggal lengkap, atau kata seperti \"hari ini\", \"kemarin\", \"besok\".",
        )
        .with_weekday_field("hari_kejadian")
        .with_error_message(
            "Format tanggal tidak valid. Coba ketik \"hari ini\", \"kemarin\", atau format DD-MM-YYYY.",
        ),
        QuestionSpec::text("lokasi_kejadian", "Di mana lokasi kejadian?")
            .with_min_len(5)
            .with_error_message("Lokasi harus minimal 5 karakter."),
        QuestionSpec::text("kronologi", "Ceritakan kronologi kejadian secara singkat.")
            .with_min_len(20)
            .with_max_len(500)
            .with_error_message(
                "Kronologi harus minimal 20 karakter dan maksimal 500 karakter.",
            ),
        QuestionSpec::choice(
            "kategori",
            "Kategori laporan kamu?",
            &[
                "Pelecehan Seksual",
                "Kekerasan Fisik",
                "Kekerasan Psikis",
                "Perundungan",
                "Lainnya",
            ],
        )
        .with_error_message("Pilih salah satu kategori yang tersedia.")
        .with_quick_replies(vec![
            QuickReply::new("Pelecehan Seksual", "Pelecehan Seksual"),
            QuickReply::new("Kekerasan Fisik", "Kekerasan Fisik"),
            QuickReply::new("Kekerasan Psikis", "Kekerasan Psikis"),
            QuickReply::new("Perundungan", "Perundungan"),
            QuickReply::new("Lainnya", "Lainnya"),
        ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flow_order() {
        let flow = default_flow();
        let ids: Vec<&str> = flow.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(
            ids,
            [
                "nama",
                "jenis_kelamin",
                "tanggal_kejadian",
                "lokasi_kejadian",
                "kronologi",
                "kategori",
            ]
        );
    }

    #[test]
    fn test_date_question_has_weekday_companion() {
        let flow = default_flow();
        let date_q = flow.iter().find(|q| q.id == "tanggal_kejadian").unwrap();
        assert!(matches!(date_q.constraints, Constraints::Date));
        assert_eq!(date_q.weekday_field.as_deref(), Some("hari_kejadian"));
    }

    #[test]
    fn test_choice_question_quick_replies_match_options() {
        let flow = default_flow();
        let gender = flow.iter().find(|q| q.id == "jenis_kelamin").unwrap();
        if let Constraints::Choice { options } = &gender.constraints {
            for reply in &gender.quick_replies {
                assert!(options.contains(&reply.value));
            }
        } else {
            panic!("jenis_kelamin should be a choice question");
        }
    }
}
