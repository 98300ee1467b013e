//! Secret Code CLI
//!
//! Interactive terminal front end for the secret code card game.

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use secret_code::request::{format_manual_code, level_selection, parse_card_ids, parse_manual_code};
use secret_code::{
    load_demo_store, CardId, CardStore, Feedback, GameContent, GameId, HintAdvisor, LevelPolicy,
    MemoryStore, PlayRequest, RoundSession, SessionState,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const BANNER_TEXT: &str = include_str!("text/banner.txt");

#[derive(Parser)]
#[command(name = "secret-code")]
#[command(about = "Secret code deduction card game", version)]
struct Args {
    /// JSON deck file (defaults to the bundled demo deck)
    #[arg(long, global = true)]
    deck: Option<PathBuf>,

    /// Seed for deterministic secrets and shuffles
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Play rounds interactively
    Play {
        #[arg(long, default_value = "1")]
        game: String,
        #[arg(long, default_value = "random")]
        mode: String,
        #[arg(long, default_value = "1")]
        level: String,
    },
    /// Score a guess against a secret, both given as comma-separated card ids
    Evaluate { secret: String, guess: String },
    /// List the difficulty levels
    Levels,
    /// List the games in the deck
    Games,
    /// Validate and store a manual code, then print the updated deck
    SaveCode {
        #[arg(long)]
        game: String,
        code: String,
    },
}

struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    fn new(message: &'static str) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();
        let handle = thread::spawn(move || {
            let frames = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
            let mut i = 0;
            while running_clone.load(Ordering::Relaxed) {
                print!("\r{} {}", frames[i % frames.len()], message);
                let _ = io::stdout().flush();
                thread::sleep(Duration::from_millis(80));
                i += 1;
            }
            print!("\r{}\r", " ".repeat(message.len() + 3));
            let _ = io::stdout().flush();
        });
        Self { running, handle: Some(handle) }
    }

    fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn print_banner() {
    for line in BANNER_TEXT.lines().take(6) {
        println!("{}", line);
    }
}

fn print_help() {
    println!("{}", BANNER_TEXT);
}

fn load_store(deck: Option<&PathBuf>) -> Result<MemoryStore, Box<dyn std::error::Error>> {
    match deck {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let store = MemoryStore::from_json(&json)?;
            info!(path = %path.display(), "deck loaded");
            Ok(store)
        }
        None => Ok(load_demo_store()?),
    }
}

fn print_board(session: &RoundSession) {
    println!();
    println!(
        "Nível {} | modo {} | tentativas restantes: {}",
        session.policy().level,
        session.mode(),
        session.attempts_remaining()
    );
    let slots: Vec<String> = session
        .guess()
        .iter()
        .enumerate()
        .map(|(i, slot)| match slot {
            Some(card) => format!("{}:[{}] {}", i + 1, card.id, card.label()),
            None => format!("{}:____", i + 1),
        })
        .collect();
    println!("Palpite: {}", slots.join("  "));
    println!("Cartas disponíveis:");
    for card in session.available() {
        println!("  [{:>3}] {}", card.id, card.label());
    }
    println!();
}

fn print_history(session: &RoundSession) {
    if session.history().is_empty() {
        println!("Nenhuma tentativa ainda.");
        return;
    }
    println!();
    for entry in session.history().entries() {
        let guess: Vec<String> = entry.guess.iter().map(|card| card.label()).collect();
        println!(
            "#{:<2} {:<40} {:<8} {}",
            entry.attempt_number,
            guess.join(" | "),
            entry.feedback.to_marker_string(),
            entry.feedback
        );
    }
    println!();
}

fn print_hint(session: &RoundSession) {
    let pool = session.display_pool();
    let spinner = Spinner::new("Pensando...");
    let advisor = HintAdvisor::from_history(&pool, session.length(), session.history());
    let best = advisor.as_ref().ok().and_then(HintAdvisor::best_guess);
    spinner.stop();

    match (advisor, best) {
        (Ok(advisor), Some(analysis)) => {
            let labels: Vec<String> = analysis
                .code
                .iter()
                .map(|id| {
                    pool.iter()
                        .find(|card| card.id == *id)
                        .map(|card| card.label())
                        .unwrap_or_else(|| format!("#{id}"))
                })
                .collect();
            println!();
            println!("Sugestão: {}", labels.join(" | "));
            println!("  Entropia: {:.3} bits", analysis.entropy);
            println!("  Códigos restantes esperados: {:.1}", analysis.expected_remaining);
            println!("  Códigos ainda possíveis: {}", advisor.remaining_count());
            println!();
        }
        (Ok(_), None) => println!("Nenhum código combina com as respostas até agora."),
        (Err(e), _) => println!("{}", e.player_message()),
    }
}

fn run_interactive(
    content: &GameContent,
    request: &PlayRequest,
    rng: &mut StdRng,
) -> Result<(), Box<dyn std::error::Error>> {
    print_banner();
    println!();
    println!("{}", content.game.title);
    if !content.game.prompt.is_empty() {
        println!("{}", content.game.prompt);
    }
    println!("{}", request.level.describe());

    let mut session = content.start_round(request, rng)?;
    println!("Digite 'ajuda' para ver os comandos ou 'mostrar' para ver o tabuleiro.");
    print_board(&session);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "ajuda" | "help" | "?" => print_help(),
            "sair" | "quit" | "q" => {
                println!("Até logo!");
                break;
            }
            "mostrar" | "show" | "m" => print_board(&session),
            "historico" | "histórico" | "history" => print_history(&session),
            "dica" | "hint" => print_hint(&session),
            "colocar" | "place" | "c" => {
                let slot = parts.get(1).and_then(|s| s.parse::<usize>().ok());
                let id = parts.get(2).and_then(|s| s.parse::<u32>().ok());
                match (slot, id) {
                    (Some(slot), Some(id)) if slot > 0 => {
                        match session.place_card(slot - 1, CardId(id)) {
                            Ok(()) => print_board(&session),
                            Err(e) => println!("{}", e.player_message()),
                        }
                    }
                    _ => println!("Uso: colocar <espaço> <id da carta>"),
                }
            }
            "limpar" | "clear" | "l" => match parts.get(1).and_then(|s| s.parse::<usize>().ok()) {
                Some(slot) if slot > 0 => match session.clear_slot(slot - 1) {
                    Ok(_) => print_board(&session),
                    Err(e) => println!("{}", e.player_message()),
                },
                _ => println!("Uso: limpar <espaço>"),
            },
            "enviar" | "submit" | "e" => match session.submit_guess() {
                Ok(outcome) => {
                    println!();
                    println!(
                        "Tentativa {}: {}  ({})",
                        outcome.attempt_number,
                        outcome.feedback.to_marker_string(),
                        outcome.feedback
                    );
                    match outcome.state {
                        SessionState::Won => {
                            println!();
                            println!("🎉 Parabéns! Você descobriu o código!");
                            if !content.game.explanation.is_empty() {
                                println!("{}", content.game.explanation);
                            }
                            println!("Digite 'novo' para jogar de novo ou 'sair' para terminar.");
                        }
                        SessionState::Lost => {
                            println!();
                            println!("Suas tentativas acabaram.");
                            if let Some(secret) = session.revealed_secret() {
                                let labels: Vec<String> =
                                    secret.cards().iter().map(|card| card.label()).collect();
                                println!("O código era: {}", labels.join(" | "));
                            }
                            println!("Digite 'novo' para jogar de novo ou 'sair' para terminar.");
                        }
                        _ => print_board(&session),
                    }
                }
                Err(e) => println!("{}", e.player_message()),
            },
            "novo" | "new" | "n" => {
                session.reset();
                session = content.start_round(request, rng)?;
                println!("Nova rodada iniciada.");
                print_board(&session);
            }
            _ => {
                println!("Comando desconhecido: {}", parts[0]);
                println!("Digite 'ajuda' para ver os comandos.");
            }
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };

    let command = args.command.unwrap_or(Command::Play {
        game: "1".to_string(),
        mode: "random".to_string(),
        level: "1".to_string(),
    });

    match command {
        Command::Play { game, mode, level } => {
            let store = load_store(args.deck.as_ref())?;
            let request = match PlayRequest::parse(&game, &mode, &level) {
                Ok(request) => request,
                Err(e) => match level_selection(&e) {
                    Some(levels) => {
                        println!("{}", e.player_message());
                        for policy in levels {
                            println!("  {}", policy.describe());
                        }
                        return Ok(());
                    }
                    None => {
                        eprintln!("{}", e.player_message());
                        std::process::exit(2);
                    }
                },
            };
            let content = GameContent::load(&store, request.game_id)?;
            if let Err(e) = content.pool.validate_minimums() {
                warn!(game = %request.game_id, error = %e, "game is not playable");
                eprintln!("{}", e.player_message());
                std::process::exit(1);
            }
            run_interactive(&content, &request, &mut rng)?;
        }
        Command::Evaluate { secret, guess } => {
            let (secret, guess) = match (parse_card_ids(&secret), parse_card_ids(&guess)) {
                (Ok(secret), Ok(guess)) => (secret, guess),
                (Err(e), _) | (_, Err(e)) => {
                    eprintln!("{}", e.player_message());
                    std::process::exit(2);
                }
            };
            if secret.len() != guess.len() {
                eprintln!(
                    "O código e o palpite precisam ter o mesmo tamanho ({} e {}).",
                    secret.len(),
                    guess.len()
                );
                std::process::exit(1);
            }
            let feedback = Feedback::evaluate_ids(&secret, &guess);
            println!("{}  ({})", feedback.to_marker_string(), feedback);
        }
        Command::Levels => {
            for policy in LevelPolicy::all() {
                println!("{}", policy.describe());
            }
        }
        Command::Games => {
            let store = load_store(args.deck.as_ref())?;
            for game in store.games() {
                let cards = store.list_cards(game.id)?;
                let correct = cards.iter().filter(|card| card.is_correct()).count();
                println!(
                    "{:>4}  {:<30} {:<12} {} corretas / {} incorretas{}",
                    game.id,
                    game.title,
                    game.grade,
                    correct,
                    cards.len() - correct,
                    if game.has_manual_code() { "  (código manual)" } else { "" }
                );
            }
        }
        Command::SaveCode { game, code } => {
            let mut store = load_store(args.deck.as_ref())?;
            let game_id = game
                .trim()
                .parse::<u32>()
                .map(GameId)
                .map_err(|_| format!("id de jogo inválido `{game}`"))?;
            let ids = parse_manual_code(&code)?;
            secret_code::flow::save_manual_code(&mut store, game_id, &ids)?;
            eprintln!("Código manual {} salvo para o jogo {}.", format_manual_code(&ids), game_id);
            println!("{}", store.to_json()?);
        }
    }

    Ok(())
}
