use clap::{Parser, Subcommand};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use vocab_trainer::database::db;
use vocab_trainer::export::json;
use vocab_trainer::models::{Difficulty, Language, Word};
use vocab_trainer::{Config, Trainer};

#[derive(Parser)]
#[command(name = "vocab-trainer", about = "Vocabulary flashcards with spaced repetition", version)]
struct Cli {
    /// Database file (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a small Polish word list if the database is empty
    Seed,

    /// List words, optionally with a learner's progress
    Words {
        #[arg(long)]
        difficulty: Option<Difficulty>,
        #[arg(long)]
        learner: Option<String>,
    },

    /// Practice due and new words, answers are read from stdin
    Practice {
        #[arg(long)]
        learner: String,
    },

    /// Show a learner's progress
    Progress {
        #[arg(long)]
        learner: String,
    },

    /// Import a language word list from JSON
    Import { file: PathBuf },

    /// Export a language word list to JSON
    Export { code: String, file: PathBuf },

    /// Skip one day ahead, so words due tomorrow become due now
    AdvanceDay,

    /// Print the current date, including skipped days
    Today,
}

fn sample_language() -> Language {
    let mut language = Language::new("pl", "Polish");
    language.words = vec![
        Word::new("cześć", "hello").with_example("Cześć, jak się masz?"),
        Word::new("dziękuję", "thank you").with_pronunciation("jen-KOO-yeh"),
        Word::new("proszę", "please"),
        Word::new("dobranoc", "good night").with_difficulty(Difficulty::Intermediate),
        Word::new("przepraszam", "sorry")
            .with_difficulty(Difficulty::Intermediate)
            .with_example("Przepraszam, która godzina?"),
        Word::new("źdźbło", "blade of grass").with_difficulty(Difficulty::Advanced),
    ];
    language
}

fn run_practice(trainer: &mut Trainer, learner: &str) -> Result<(), Box<dyn Error>> {
    let Some(batch) = trainer.start_practice(learner)? else {
        println!("Nothing to practice today. Come back tomorrow!");
        return Ok(());
    };

    let max_level = trainer.scheduler().schedule().max_level();
    println!("Session {}: {} words", batch.session.id, batch.items.len());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    for (i, item) in batch.items.iter().enumerate() {
        let marker = if item.is_new { " (new)" } else { "" };
        if item.word.pronunciation.is_empty() {
            print!("{}. {}{} > ", i + 1, item.word.term, marker);
        } else {
            print!(
                "{}. {} [{}]{} > ",
                i + 1,
                item.word.term,
                item.word.pronunciation,
                marker
            );
        }
        io::stdout().flush()?;

        let Some(answer) = lines.next().transpose()? else {
            println!();
            break;
        };

        let feedback = trainer.submit_answer(learner, batch.session.id, item.word_id, &answer)?;
        if feedback.correct {
            println!("   Correct! Mastery {}/{}", feedback.mastery_level, max_level);
        } else {
            println!(
                "   Wrong, it is '{}'. Mastery {}/{}",
                feedback.correct_answer, feedback.mastery_level, max_level
            );
        }
        if let Some(example) = &feedback.example {
            println!("   e.g. {}", example);
        }
    }

    let session = trainer.finish_session(batch.session.id)?;
    println!(
        "Practiced {} words, {}% correct",
        session.words_practiced,
        session.accuracy()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(path) = cli.db {
        config.db_path = path;
    }

    let conn = db::init_database(&config.db_path)?;
    let mut trainer = Trainer::new(conn, &config);

    match cli.command {
        Command::Seed => {
            if db::get_languages(trainer.conn())?.is_empty() {
                let ids = json::save_language(&sample_language(), trainer.conn_mut())?;
                println!("Sample data created! ({} words)", ids.len());
            } else {
                println!("Database already has vocabulary, nothing to seed.");
            }
        }
        Command::Words {
            difficulty,
            learner,
        } => {
            let max_level = trainer.scheduler().schedule().max_level();
            let words = trainer.word_list(learner.as_deref(), difficulty)?;
            println!("{} words", words.len());
            for entry in words {
                let progress = match &entry.review {
                    Some(review) => format!(
                        " - mastery {}/{} ({}% success)",
                        review.mastery_level,
                        max_level,
                        review.success_rate()
                    ),
                    None => String::new(),
                };
                println!(
                    "  [{}] {} - {}{}",
                    entry.word.difficulty, entry.word.term, entry.word.translation, progress
                );
            }
        }
        Command::Practice { learner } => run_practice(&mut trainer, &learner)?,
        Command::Progress { learner } => {
            let progress = trainer.progress(&learner)?;
            println!("Words studied: {}", progress.total_words);
            println!("Average mastery: {:.1}", progress.average_mastery);
            for (level, count) in progress.mastery_distribution.iter().enumerate() {
                println!(
                    "  Level {}: {} words ({}%)",
                    level,
                    count,
                    progress.level_share(level)
                );
            }
            if !progress.recent_sessions.is_empty() {
                println!("Recent sessions:");
                for session in &progress.recent_sessions {
                    println!("  {}", session.summary());
                }
            }
        }
        Command::Import { file } => {
            let language = json::import_into_database(&file, trainer.conn_mut())?;
            println!(
                "Language '{}' imported from '{}' ({} words)",
                language.name,
                file.display(),
                language.words.len()
            );
        }
        Command::Export { code, file } => {
            let language = json::export_from_database(&code, &file, trainer.conn())?;
            println!(
                "Language '{}' exported to '{}' ({} words)",
                language.name,
                file.display(),
                language.words.len()
            );
        }
        Command::AdvanceDay => {
            let today = trainer.advance_day()?;
            println!("{}", today.format("%Y-%m-%d"));
        }
        Command::Today => {
            println!("{}", trainer.today()?.format("%Y-%m-%d"));
        }
    }

    Ok(())
}
