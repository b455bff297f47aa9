// Supportive response templates and the deterministic fallback generator
//
// The canned text below is what the reporter sees whenever the
// text-generation collaborator is unavailable or fails; it must stand on
// its own.

use rand::Rng;

pub const LISTENING: [&str; 4] = [
    "Saya mendengarkan Anda. Silakan lanjutkan bercerita...",
    "Terima kasih sudah mau berbagi dengan saya. Saya di sini untuk mendengarkan.",
    "Anda tidak sendirian. Silakan ceritakan apa yang Anda rasakan.",
    "Saya memahami ini tidak mudah. Ambil waktu Anda.",
];

pub const EMPATHY: [&str; 4] = [
    "Saya turut prihatin atas apa yang Anda alami.",
    "Perasaan Anda sangat valid dan wajar dalam situasi ini.",
    "Tidak ada yang salah dengan apa yang Anda rasakan sekarang.",
    "Anda sangat berani sudah menceritakan hal ini.",
];

pub const VALIDATION: [&str; 4] = [
    "Apa yang terjadi pada Anda bukan salah Anda.",
    "Anda berhak merasa aman dan dihormati.",
    "Reaksi Anda sangat manusiawi dan dapat dipahami.",
    "Terima kasih sudah percaya untuk berbagi cerita ini.",
];

/// System instruction for the text-generation collaborator: an experienced,
/// human-sounding counselor voice, 2-4 sentences per reply.
pub const CURHAT_SYSTEM_PROMPT: &str = "Kamu bukan chatbot. Kamu berbicara seperti seorang psikolog manusia yang berpengalaman mendengarkan kisah nyata dengan hati terbuka.\n\nFOKUS:\n- Pahami isi hati pengguna seolah kamu berada di hadapannya.\n- Dengarkan tanpa menilai. Rasakan nada emosinya, bukan hanya katanya.\n- Jawabanmu harus terasa manusiawi: lembut, reflektif, dan mengandung empati yang tulus.\n- Jangan menggunakan frasa seperti \"saya AI\" atau \"terima kasih telah berbagi\".\n- Gunakan gaya percakapan natural seperti terapis yang mengerti rasa sakit dan kelelahan seseorang.\n- Jika pengguna tampak terluka, validasi dulu perasaannya, lalu berikan kalimat peneguhan atau makna kecil yang bisa menenangkan.\n\nPANJANG: 2-4 kalimat, nada pelan, tenang, tapi penuh rasa manusiawi.";

/// Selection seam for canned templates so tests can pin the choice.
pub trait ResponsePicker: Send + Sync {
    /// Pick an index in `0..len` (len is never zero).
    fn pick(&self, len: usize) -> usize;
}

/// Production picker: uniform random choice.
#[derive(Debug, Default)]
pub struct RandomPicker;

impl ResponsePicker for RandomPicker {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}

/// Test picker: always the given index (clamped).
#[derive(Debug)]
pub struct FixedPicker(pub usize);

impl ResponsePicker for FixedPicker {
    fn pick(&self, len: usize) -> usize {
        self.0.min(len - 1)
    }
}

/// Context-aware deterministic reply used from turn four onward (and as the
/// general fallback). Keyword branches mirror the counseling script.
pub fn contextual_response(text: &str, picker: &dyn ResponsePicker) -> String {
    let lower = text.to_lowercase();

    let matches_any =
        |keywords: &[&str]| keywords.iter().any(|k| lower.contains(k));

    if matches_any(&["bagaimana", "gimana", "harus", "apa yang", "saran"]) {
        return "Setiap situasi unik, tapi yang penting Anda tidak sendiri. Anda bisa mempertimbangkan untuk berbicara dengan konselor profesional, melaporkan kejadian jika ada, atau mencari dukungan dari orang-orang terdekat yang Anda percaya.".to_string();
    }
    if matches_any(&["takut", "khawatir", "cemas"]) {
        return "Rasa takut dan cemas yang Anda rasakan sangat wajar. Ingat bahwa Anda berada di ruang yang aman sekarang. Kami di sini untuk mendukung Anda dan memastikan Anda mendapat bantuan yang diperlukan.".to_string();
    }
    if matches_any(&["salah saya", "malu", "bodoh", "seharusnya"]) {
        return "Tolong jangan menyalahkan diri sendiri. Apa yang terjadi BUKAN salah Anda. Tidak ada yang meminta atau pantas mendapat perlakuan buruk. Anda adalah korban, bukan penyebab.".to_string();
    }
    if matches_any(&["pelaku", "dia", "mereka", "orang itu"]) {
        return "Yang dilakukan pelaku adalah tindakan yang salah dan tidak dapat dibenarkan. Anda berhak untuk merasa aman dan mendapat keadilan.".to_string();
    }

    // default: listening and empathy pools combined
    let pool: Vec<&str> = LISTENING.iter().chain(EMPATHY.iter()).copied().collect();
    pool[picker.pick(pool.len())].to_string()
}

/// Pick from a template tier.
pub fn pick_template(tier: &[&str], picker: &dyn ResponsePicker) -> String {
    tier[picker.pick(tier.len())].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_picker_is_deterministic() {
        let picker = FixedPicker(0);
        assert_eq!(pick_template(&LISTENING, &picker), LISTENING[0]);
        assert_eq!(pick_template(&LISTENING, &picker), LISTENING[0]);
    }

    #[test]
    fn test_fixed_picker_clamps() {
        let picker = FixedPicker(99);
        assert_eq!(pick_template(&EMPATHY, &picker), EMPATHY[3]);
    }

    #[test]
    fn test_random_picker_in_range() {
        let picker = RandomPicker;
        for _ in 0..50 {
            assert!(picker.pick(4) < 4);
        }
    }

    #[test]
    fn test_contextual_branches() {
        let picker = FixedPicker(0);

        assert!(contextual_response("gimana ya sebaiknya?", &picker).contains("konselor"));
        assert!(contextual_response("aku takut ketemu dia lagi", &picker).contains("takut"));
        assert!(contextual_response("ini semua salah saya", &picker).contains("BUKAN salah Anda"));
        assert!(contextual_response("orang itu masih di kampus", &picker).contains("pelaku"));
    }

    #[test]
    fn test_contextual_default_uses_picker() {
        let response = contextual_response("hmm", &FixedPicker(0));
        assert_eq!(response, LISTENING[0]);
    }
}
