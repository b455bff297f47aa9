// Crisis keyword detector

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Curated self-harm/suicide-risk phrases, grouped by register.
///
/// The groups mirror how the list was curated: direct phrasing, emotional
/// variants, self-harm actions, slang/abbreviated forms, and English phrases
/// for bilingual users. Matching is a plain case-insensitive substring test
/// over every group; some of the shorter phrases are known to be broad,
/// trading false positives for recall. Deployments that need a different
/// balance can load their own list with [`CrisisDetector::load_from_file`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrisisKeywords {
    pub direct: Vec<String>,
    pub emotional: Vec<String>,
    pub self_harm: Vec<String>,
    pub slang: Vec<String>,
    pub english: Vec<String>,
}

impl Default for CrisisKeywords {
    fn default() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            direct: owned(&[
                "bunuh diri",
                "bunuh dir",
                "mau bunuh diri",
                "pengen bunuh diri",
                "aku mau bunuh diri",
                "aku pengen bunuh diri",
                "aku ingin bunuh diri",
                "aku mau mati",
                "aku pengen mati",
                "aku ingin mati",
                "pengen mati",
                "ingin mati",
                "mau mati",
                "mati aja",
                "mati saja",
                "lebih baik mati",
                "mending mati",
                "mendingan mati",
                "mau ngakhirin hidup",
                "ngakhirin hidup",
                "akhiri hidup",
                "mengakhiri hidup",
                "aku mau ngakhirin semuanya",
                "aku pengen ngilang selamanya",
                "aku mau pergi selamanya",
            ]),
            emotional: owned(&[
                "cape hidup",
                "capek hidup",
                "lelah hidup",
                "bosan hidup",
                "hidup gak ada arti",
                "hidup gak berarti",
                "hidup hampa",
                "hidup sia sia",
                "hidup ini percuma",
                "gak mau hidup lagi",
                "tidak mau hidup lagi",
                "gak pengen hidup",
                "tidak ingin hidup",
                "hidupku hancur",
                "hidupku gak ada gunanya",
                "aku gagal",
                "aku gak berguna",
                "aku cuma beban",
                "aku beban keluarga",
                "aku pengen ngilang",
                "aku mau hilang",
                "aku ingin menghilang",
                "pengen hilang aja",
                "mending aku gak ada",
                "andai aku gak lahir",
                "seandainya aku gak lahir",
                "aku nyerah",
                "aku menyerah",
                "udah gak kuat",
                "udah gak tahan",
                "gak sanggup lagi",
                "udah cukup",
                "cukup sampai sini",
                "aku capek banget",
                "aku udah lelah",
            ]),
            self_harm: owned(&[
                "lukai diri",
                "sakiti diri",
                "nyakitin diri",
                "nyilet tangan",
                "iris tangan",
                "sayat tangan",
                "sayat pergelangan",
                "potong urat",
                "minum obat banyak",
                "minum racun",
                "makan racun",
                "terjun dari",
                "loncat dari",
                "loncat jembatan",
                "loncat gedung",
                "jatuhin diri",
                "tabrak aku",
                "tabrakin diri",
                "nyebur ke sungai",
                "tidur selamanya",
                "hidupku udah berakhir",
                "aku udah selesai",
                "aku udah gak mau apa apa",
                "biarin aja aku mati",
                "biarin aku pergi",
                "aku gak pantas hidup",
                "aku pengen tenang selamanya",
                "aku mau tidur selamanya",
                "aku mau istirahat selamanya",
                "aku gak bisa lanjut",
                "aku udah gak tahan hidup kayak gini",
                "aku gak mau bangun lagi",
                "aku pengen diem selamanya",
                "semoga aku gak bangun lagi",
                "aku udah gak peduli",
                "aku pengen bebas dari semua ini",
                "semua udah gak ada artinya",
                "aku cuma pengen semuanya selesai",
            ]),
            slang: owned(&[
                "pgn mati",
                "pgn ngilang",
                "capek bgt hidup",
                "lelah bgt hidup",
                "udh gk kuat",
                "udh gk tahan",
                "hidup gk ada gunanya",
                "hidup sia2",
                "pgn bunuh diri",
                "mau bunuh dri",
                "mau bundir aja",
                "ngakhirin aja",
                "cukup smpe sini",
                "gak guna aku hidup",
                "aku useless",
                "aku worthless",
                "cape pengen bundir aja",
            ]),
            english: owned(&[
                "suicide",
                "want to die",
                "i want to die",
                "kill myself",
                "end my life",
                "i can't live anymore",
                "life is meaningless",
                "i'm done",
                "i'm tired of living",
                "no reason to live",
                "i hate my life",
                "let me die",
                "wish i could die",
                "life sucks",
                "i'm hopeless",
                "self harm",
                "cut myself",
            ]),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CrisisDetector {
    keywords: CrisisKeywords,
}

impl CrisisDetector {
    /// Detector over the built-in curated phrase list.
    pub fn new() -> Self {
        Self {
            keywords: CrisisKeywords::default(),
        }
    }

    pub fn with_keywords(keywords: CrisisKeywords) -> Self {
        Self { keywords }
    }

    /// Load crisis keywords from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read crisis keywords file: {}", path.display()))?;

        let keywords: CrisisKeywords =
            serde_json::from_str(&contents).context("Failed to parse crisis keywords JSON")?;

        Ok(Self { keywords })
    }

    /// Detect whether the text contains any listed crisis phrase.
    ///
    /// Case-insensitive substring match, no fuzzy matching.
    pub fn detect(&self, text: &str) -> bool {
        let lower = text.to_lowercase();

        for group in [
            &self.keywords.direct,
            &self.keywords.emotional,
            &self.keywords.self_harm,
            &self.keywords.slang,
            &self.keywords.english,
        ] {
            for keyword in group {
                if lower.contains(&keyword.to_lowercase()) {
                    tracing::warn!("Crisis detected: keyword '{}'", keyword);
                    return true;
                }
            }
        }

        false
    }

    /// Get all keywords (for audit display)
    pub fn all_keywords(&self) -> Vec<String> {
        let mut all = Vec::new();
        all.extend(self.keywords.direct.clone());
        all.extend(self.keywords.emotional.clone());
        all.extend(self.keywords.self_harm.clone());
        all.extend(self.keywords.slang.clone());
        all.extend(self.keywords.english.clone());
        all
    }
}

impl Default for CrisisDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_listed_phrases() {
        let detector = CrisisDetector::new();

        assert!(detector.detect("aku mau bunuh diri"));
        assert!(detector.detect("rasanya pengen mati aja"));
        assert!(detector.detect("I want to kill myself"));
        assert!(detector.detect("udh gk kuat sama semuanya"));
    }

    #[test]
    fn test_substring_containment() {
        let detector = CrisisDetector::new();

        // phrase embedded inside a longer sentence still fires
        assert!(detector.detect("jujur akhir-akhir ini aku capek hidup terus"));
    }

    #[test]
    fn test_case_insensitive() {
        let detector = CrisisDetector::new();

        assert!(detector.detect("SUICIDE"));
        assert!(detector.detect("Bunuh Diri"));
    }

    #[test]
    fn test_neutral_text_passes() {
        let detector = CrisisDetector::new();

        assert!(!detector.detect("kemarin saya dipukul senior di gedung A"));
        assert!(!detector.detect("What is the meaning of this form?"));
    }

    #[test]
    fn test_custom_keyword_file_shape() {
        let keywords = CrisisKeywords {
            direct: vec!["contoh frasa".to_string()],
            emotional: vec![],
            self_harm: vec![],
            slang: vec![],
            english: vec![],
        };
        let detector = CrisisDetector::with_keywords(keywords);

        assert!(detector.detect("ada contoh frasa di sini"));
        assert!(!detector.detect("aman"));
        assert_eq!(detector.all_keywords().len(), 1);
    }
}
