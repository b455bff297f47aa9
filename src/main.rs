// SIGAP PPKS - Guided intake and report-drafting engine
// Main entry point

use anyhow::Result;
use clap::Parser;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::sync::Arc;

use sigap::config::load_config;
use sigap::crisis::SafetyAction;
use sigap::curhat::{RandomPicker, TransitionChoice};
use sigap::engine::{BotEvent, Engine, SessionManager};
use sigap::flow::{QuickReply, ReportPayload};
use sigap::gateway::{GatewayError, HttpGateway, TimelineStep};
use sigap::providers::{DisabledResponder, GroqProvider, ReplyGenerator};

#[derive(Parser, Debug)]
#[command(name = "sigap")]
#[command(about = "Campus incident-reporting chatbot", version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Parser, Debug)]
enum Command {
    /// Start an interactive chat session (default)
    Chat,
    /// Look up the handling status of a submitted report
    Status {
        /// Tracking id returned at submission, e.g. PPKS123456789
        tracking_id: String,
    },
    /// Print the active crisis keyword list
    Keywords,
    /// List report drafts saved locally after failed submissions
    Drafts,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let engine = build_engine()?;

    match args.command {
        Some(Command::Status { tracking_id }) => run_status(&engine, &tracking_id).await,
        Some(Command::Keywords) => run_keywords(&engine),
        Some(Command::Drafts) => run_drafts(&engine),
        Some(Command::Chat) | None => run_chat(engine).await,
    }
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_engine() -> Result<Engine> {
    let config = load_config()?;

    let generator: Arc<dyn ReplyGenerator> = match &config.groq.api_key {
        Some(key) => Arc::new(GroqProvider::new(&config.groq, key.clone())?),
        None => {
            tracing::warn!("No Groq API key configured; curhat replies use templates only");
            Arc::new(DisabledResponder)
        }
    };

    let gateway = HttpGateway::new(&config.backend)?;

    Engine::new(
        &config,
        generator,
        Arc::new(gateway),
        Box::new(RandomPicker),
    )
}

async fn run_status(engine: &Engine, tracking_id: &str) -> Result<()> {
    match engine.case_status(tracking_id).await {
        Ok((report, steps)) => {
            println!("Laporan {}", report.tracking_id);
            if let Some(category) = &report.category {
                println!("Kategori: {}", category);
            }
            println!();
            print_timeline(&steps);
            Ok(())
        }
        Err(GatewayError::NotFound(id)) => {
            println!("Tidak ada laporan dengan ID {}.", id);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

fn print_timeline(steps: &[TimelineStep]) {
    for step in steps {
        let marker = if step.done { "[v]" } else { "[.]" };
        println!("{} {}", marker, step.title);
        println!("    {}", step.description);
    }
}

fn run_keywords(engine: &Engine) -> Result<()> {
    let keywords = engine.detector().all_keywords();
    println!("{} kata kunci krisis aktif:", keywords.len());
    for keyword in keywords {
        println!("  {}", keyword);
    }
    Ok(())
}

fn run_drafts(engine: &Engine) -> Result<()> {
    let drafts = engine.outbox().pending()?;
    if drafts.is_empty() {
        println!("Tidak ada draf laporan tersimpan.");
        return Ok(());
    }
    println!("{} draf laporan belum terkirim:", drafts.len());
    for path in drafts {
        println!("  {}", path.display());
    }
    Ok(())
}

/// What the REPL expects the next line of input to answer.
enum Pending {
    FreeText,
    /// A quick-reply set is on screen; digits pick an option
    Choices(Vec<QuickReply>),
    Safety,
    Transition,
    SendConfirm(ReportPayload),
    Done,
}

async fn run_chat(engine: Engine) -> Result<()> {
    let manager = SessionManager::new(100, 30);
    manager.start_cleanup_task();

    let mut editor = DefaultEditor::new()?;

    println!("Selamat datang di SIGAP PPKS.");
    println!("Pilih mode percakapan:");
    println!("  1. Mode Pelaporan (pertanyaan terpandu)");
    println!("  2. Mode Curhat (ruang aman untuk bercerita)");

    let (mut session, events) = loop {
        match editor.readline("> ") {
            Ok(line) => match line.trim() {
                "1" => break engine.start_guided(),
                "2" => break engine.start_curhat(),
                _ => println!("Ketik 1 atau 2."),
            },
            Err(_) => return Ok(()),
        }
    };

    let session_id = manager.create(session.clone())?;
    let mut pending = render_events(&events);

    loop {
        let line = match editor.readline("anda> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("keluar") || input.eq_ignore_ascii_case("exit") {
            break;
        }
        editor.add_history_entry(input)?;

        let events = match std::mem::replace(&mut pending, Pending::FreeText) {
            Pending::FreeText => engine.handle_turn(&mut session, input).await,
            Pending::Choices(choices) => match pick_option(input, &choices) {
                Some(value) => engine.handle_quick_reply(&mut session, &value),
                None => engine.handle_turn(&mut session, input).await,
            },
            Pending::Safety => match input {
                "1" => engine.safety_response(SafetyAction::ContactProfessional),
                "2" => engine.safety_response(SafetyAction::BreathingExercise),
                "3" => engine.safety_response(SafetyAction::ContinueChat),
                _ => {
                    println!("Ketik 1, 2, atau 3.");
                    pending = Pending::Safety;
                    continue;
                }
            },
            Pending::Transition => match input.to_lowercase().as_str() {
                "ya" | "iya" | "1" => {
                    engine.transition_choice(&mut session, TransitionChoice::Accept)
                }
                "tidak" | "2" => {
                    engine.transition_choice(&mut session, TransitionChoice::Decline)
                }
                "nanti" | "3" => {
                    engine.transition_choice(&mut session, TransitionChoice::Postpone)
                }
                _ => {
                    println!("Jawab dengan ya, tidak, atau nanti.");
                    pending = Pending::Transition;
                    continue;
                }
            },
            Pending::SendConfirm(payload) => match input.to_lowercase().as_str() {
                "ya" | "kirim" | "1" => engine.submit(&payload).await,
                "tidak" | "2" => {
                    println!("Laporan tidak dikirim. Sesi selesai.");
                    break;
                }
                _ => {
                    println!("Ketik ya untuk mengirim atau tidak untuk membatalkan.");
                    pending = Pending::SendConfirm(payload);
                    continue;
                }
            },
            Pending::Done => break,
        };

        pending = render_events(&events);
        manager.update(&session_id, session.clone())?;

        if matches!(pending, Pending::Done) {
            break;
        }
    }

    manager.delete(&session_id);
    println!("Terima kasih. Jaga diri baik-baik.");
    Ok(())
}

/// Map a typed answer onto a displayed quick-reply set, by number or label.
fn pick_option(input: &str, choices: &[QuickReply]) -> Option<String> {
    if let Ok(n) = input.parse::<usize>() {
        if n >= 1 && n <= choices.len() {
            return Some(choices[n - 1].value.clone());
        }
    }
    choices
        .iter()
        .find(|c| c.label.eq_ignore_ascii_case(input))
        .map(|c| c.value.clone())
}

/// Print a turn's events and return what kind of input comes next.
fn render_events(events: &[BotEvent]) -> Pending {
    let mut next = Pending::FreeText;

    for event in events {
        match event {
            BotEvent::Say(text) => {
                println!("\nbot> {}", text);
            }
            BotEvent::QuickReplies(choices) => {
                for (i, choice) in choices.iter().enumerate() {
                    println!("  {}. {}", i + 1, choice.label);
                }
                next = Pending::Choices(choices.clone());
            }
            BotEvent::SafetyOptions => {
                for (i, action) in SafetyAction::all().iter().enumerate() {
                    println!("  {}. {}", i + 1, action.label());
                }
                next = Pending::Safety;
            }
            BotEvent::TransitionOffer => {
                println!("  (jawab: ya / tidak / nanti)");
                next = Pending::Transition;
            }
            BotEvent::ReportReady(payload) => {
                println!("\nbot> Kirim laporan ini sekarang? (ya/tidak)");
                next = Pending::SendConfirm(payload.clone());
            }
            BotEvent::Submitted { .. } => {
                next = Pending::Done;
            }
            BotEvent::SubmissionFailed { reason, saved_to } => {
                tracing::debug!("Submission failed: {}", reason);
                if let Some(path) = saved_to {
                    println!("  (draf tersimpan di {})", path.display());
                }
                next = Pending::Done;
            }
        }
    }
    next
}
