// Report assembly: summary text and the final submission payload

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// The assembled submission payload. Immutable once built; handed to the
/// gateway exactly once per completed session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportPayload {
    /// Flat map of question id to normalized value
    pub fields: BTreeMap<String, String>,
    pub summary_text: String,
    /// Assigned once at assembly time, never recomputed
    pub assembled_at: DateTime<Utc>,
}

/// Fixed label order for summary and detailed rendering. Absent optional
/// fields are omitted; present ones keep this relative order.
const DETAIL_LABELS: [(&str, &str); 6] = [
    ("nama", "Nama"),
    ("jenis_kelamin", "Jenis Kelamin"),
    ("tanggal_kejadian", "Tanggal Kejadian"),
    ("lokasi_kejadian", "Lokasi"),
    ("kategori", "Kategori"),
    ("kronologi", "Kronologi"),
];

/// Build the payload from confirmed answers.
///
/// Pure apart from the `assembled_at` timestamp: the same answers always
/// produce the same fields and summary text.
pub fn assemble(answers: &BTreeMap<String, String>) -> ReportPayload {
    ReportPayload {
        fields: answers.clone(),
        summary_text: build_summary(answers),
        assembled_at: Utc::now(),
    }
}

fn build_summary(answers: &BTreeMap<String, String>) -> String {
    let mut summary = String::new();

    if let Some(nama) = answers.get("nama") {
        summary.push_str(&format!("Laporan dari {}", nama));
        if let Some(jk) = answers.get("jenis_kelamin") {
            summary.push_str(&format!(" ({})", jk));
        }
    } else {
        summary.push_str("Laporan");
    }
    if let Some(kategori) = answers.get("kategori") {
        summary.push_str(&format!(" tentang {}", kategori));
    }
    if let Some(lokasi) = answers.get("lokasi_kejadian") {
        summary.push_str(&format!(" di {}", lokasi));
    }
    if let Some(tanggal) = answers.get("tanggal_kejadian") {
        match answers.get("hari_kejadian") {
            Some(hari) => summary.push_str(&format!(" pada {}, {}", hari, tanggal)),
            None => summary.push_str(&format!(" pada {}", tanggal)),
        }
    }
    summary.push('.');

    if let Some(kronologi) = answers.get("kronologi") {
        summary.push_str(&format!("\n\nKronologi: {}", kronologi));
    }

    summary
}

/// Human-readable rendering shown to the reporter before submission.
pub fn detailed_report(payload: &ReportPayload) -> String {
    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━\n");
    report.push_str("RINGKASAN LAPORAN\n");
    report.push_str("━━━━━━━━━━━━━━━━━━\n\n");

    for (id, label) in DETAIL_LABELS {
        let Some(value) = payload.fields.get(id) else {
            continue;
        };
        match id {
            "tanggal_kejadian" => {
                let line = match payload.fields.get("hari_kejadian") {
                    Some(hari) => format!("{}: {} ({})\n", label, value, hari),
                    None => format!("{}: {}\n", label, value),
                };
                report.push_str(&line);
            }
            "kronologi" => report.push_str(&format!("\n{}:\n{}\n", label, value)),
            _ => report.push_str(&format!("{}: {}\n", label, value)),
        }
    }

    report.push_str("\n━━━━━━━━━━━━━━━━━━");
    report
}
