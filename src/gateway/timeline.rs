// Status timeline
//
// Derives the reporter-facing handling timeline purely from the case
// status. The backend stores no per-step history, so every step sequence
// is a deterministic function of (status, created_at, admin note).

use chrono::Datelike;

use super::{CaseReport, CaseStatus};
use crate::dates::MONTHS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineStep {
    pub title: String,
    pub description: String,
    /// false means the step is still in progress
    pub done: bool,
}

pub fn build_steps(report: &CaseReport) -> Vec<TimelineStep> {
    let mut steps = Vec::with_capacity(4);

    let received_on = report
        .created_at
        .map(|dt| {
            format!(
                "{} {} {}",
                dt.day(),
                MONTHS[dt.month0() as usize],
                dt.year()
            )
        })
        .unwrap_or_else(|| "tanggal tidak diketahui".to_string());

    steps.push(TimelineStep {
        title: "Laporan Diterima".to_string(),
        description: format!(
            "Laporan {} telah berhasil diterima oleh sistem pada {}.",
            report.category.as_deref().unwrap_or("kasus"),
            received_on
        ),
        done: true,
    });

    if report.status == CaseStatus::Pending {
        steps.push(TimelineStep {
            title: "Menunggu Verifikasi".to_string(),
            description: "Laporan Anda sedang menunggu verifikasi dari tim kami. Proses ini biasanya memakan waktu 1-2 hari kerja.".to_string(),
            done: false,
        });
        return steps;
    }

    steps.push(TimelineStep {
        title: "Verifikasi Selesai".to_string(),
        description: "Laporan Anda telah diverifikasi dan sedang dalam proses penanganan."
            .to_string(),
        done: true,
    });

    match report.status {
        CaseStatus::Process => {
            steps.push(TimelineStep {
                title: "Dalam Proses Investigasi".to_string(),
                description: "Tim kami sedang melakukan investigasi dan penanganan terhadap laporan Anda. Kami akan menghubungi Anda jika memerlukan informasi tambahan.".to_string(),
                done: false,
            });
        }
        CaseStatus::Complete => {
            steps.push(TimelineStep {
                title: "Investigasi Selesai".to_string(),
                description: "Investigasi telah selesai dilakukan dengan menyeluruh.".to_string(),
                done: true,
            });
            steps.push(TimelineStep {
                title: "Kasus Selesai".to_string(),
                description: report.admin_note.clone().unwrap_or_else(|| {
                    "Penanganan kasus telah selesai. Terima kasih atas kepercayaan Anda kepada SIGAP PPKS.".to_string()
                }),
                done: true,
            });
        }
        CaseStatus::Pending => unreachable!(),
    }

    steps
}
