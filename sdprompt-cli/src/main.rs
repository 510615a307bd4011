mod assembler;
mod console;
mod editor;
mod error;
mod session_log;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::Rng;
use sdprompt_advisor::{Enhancement, ModelCatalog, OllamaCli, choose, discover};
use sdprompt_config::{Settings, load_or_init, load_or_init_at};
use sdprompt_store::{CategoryStore, StoreLayout};
use tracing_subscriber::EnvFilter;

use crate::assembler::{PromptPair, collect_parts};
use crate::console::Console;
use crate::editor::edit_categories;
use crate::error::AppError;

/// sdprompt CLI entry point.
///
/// Builds positive and negative prompts for Stable Diffusion style image
/// generators from reusable, user-editable category lists.
#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "sdprompt",
    author,
    version,
    about = "Assemble image-generation prompts from curated category lists.",
    long_about = None
)]
struct Cli {
    /// Settings file to use instead of ~/.sdprompt/config.toml.
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,
    /// Directory holding the category JSON files.
    #[arg(long = "config-dir", value_name = "DIR")]
    config_dir: Option<PathBuf>,
    /// File that generated prompts are appended to.
    #[arg(long = "log-file", value_name = "FILE")]
    log_file: Option<PathBuf>,
}

#[derive(Debug)]
struct RunContext {
    settings: Settings,
    category_dir: PathBuf,
    log_file: PathBuf,
    infos: Vec<String>,
    warnings: Vec<String>,
}

fn resolve(cli: Cli) -> RunContext {
    let Cli {
        settings,
        config_dir,
        log_file,
    } = cli;

    let mut infos = Vec::new();
    let mut warnings = Vec::new();

    let loaded = match settings.as_deref() {
        Some(path) => load_or_init_at(path),
        None => load_or_init(),
    };
    let settings = match loaded {
        Ok(outcome) => {
            if outcome.created {
                infos.push(format!(
                    "Created sdprompt settings at {}",
                    outcome.path.display()
                ));
            }
            outcome.settings
        }
        Err(error) => {
            warnings.push(format!(
                "Warning: failed to load sdprompt settings ({error}). Falling back to defaults."
            ));
            Settings::default()
        }
    };

    let category_dir = config_dir.unwrap_or_else(|| settings.category_dir());
    let log_file = log_file.unwrap_or_else(|| settings.log_file());

    RunContext {
        settings,
        category_dir,
        log_file,
        infos,
        warnings,
    }
}

/// Everything one interactive run needs, with the outside world injectable.
struct Session<C, G> {
    store: CategoryStore,
    catalog: C,
    log_file: PathBuf,
    page_size: usize,
    rng: G,
}

impl<C, G> Session<C, G>
where
    C: ModelCatalog,
    G: Rng,
{
    fn main_menu<R, W>(&mut self, console: &mut Console<R, W>) -> Result<(), AppError>
    where
        R: BufRead,
        W: Write,
    {
        loop {
            console.say("\n=== MAIN MENU ===")?;
            console.say("[1] Generate a prompt")?;
            console.say("[2] Edit categories")?;
            console.say("[3] Exit")?;
            match console.ask("Choose an option: ")?.trim() {
                "1" => {
                    self.generate_prompt(console)?;
                }
                "2" => edit_categories(console, &self.store)?,
                "3" => {
                    console.say("Exiting.")?;
                    return Ok(());
                }
                _ => console.say("Invalid option. Please try again.")?,
            }
        }
    }

    fn negotiate_enhancement<R, W>(
        &self,
        console: &mut Console<R, W>,
    ) -> Result<Enhancement, AppError>
    where
        R: BufRead,
        W: Write,
    {
        let models = match discover(&self.catalog) {
            Ok(models) => models,
            Err(Enhancement::Unavailable) => {
                console.say("Model runner not installed. Continuing without LLM.")?;
                return Ok(Enhancement::Unavailable);
            }
            Err(state) => {
                console.say("No models found. Continuing without LLM.")?;
                return Ok(state);
            }
        };

        console.say("\nAvailable models:")?;
        for (index, model) in models.iter().enumerate() {
            console.say(format_args!("  [{}] {model}", index + 1))?;
        }
        let answer = console.ask("Choose a model number to enhance prompt (or press Enter to skip): ")?;
        Ok(choose(&models, &answer))
    }

    /// Runs one prompt session and logs the result.
    ///
    /// A selected model that rejects the text aborts with [`AppError::Rejected`]
    /// before anything is written to the log.
    fn generate_prompt<R, W>(&mut self, console: &mut Console<R, W>) -> Result<PromptPair, AppError>
    where
        R: BufRead,
        W: Write,
    {
        console.say("\n=== Stable Diffusion Prompt Generator ===")?;
        let enhancement = self.negotiate_enhancement(console)?;
        tracing::debug!(?enhancement, "enhancement state");

        let categories = self.store.load_all()?;
        let parts = collect_parts(console, &categories, self.page_size, &mut self.rng)?;
        let pair = parts.render();

        enhancement.review(&format!("{}{}", pair.positive, pair.negative))?;
        session_log::append_record(&self.log_file, &pair)?;

        console.say("\nPrompt generated!")?;
        console.say(format_args!("Positive Prompt:\n {}", pair.positive))?;
        console.say(format_args!("Negative Prompt:\n {}", pair.negative))?;
        if let Some(model) = enhancement.model() {
            console.say(format_args!(
                "\n[Optional] You can now pass this prompt to '{model}' using the model CLI if desired."
            ))?;
        }

        Ok(pair)
    }
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging();

    let context = resolve(cli);
    for message in &context.infos {
        eprintln!("{message}");
    }
    for warning in &context.warnings {
        eprintln!("{warning}");
    }

    let mut session = Session {
        store: CategoryStore::new(StoreLayout::new(&context.category_dir)),
        catalog: OllamaCli::new(context.settings.model_cli.clone()),
        log_file: context.log_file.clone(),
        page_size: context.settings.effective_page_size(),
        rng: rand::thread_rng(),
    };

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    let outcome = session.main_menu(&mut console);
    ExitCode::from(exit_status(outcome, &mut io::stdout(), &mut io::stderr()))
}

/// Reports how the session ended and returns the process exit status.
///
/// A content rejection is explained on `out`; any other failure goes to `err`.
fn exit_status<O, E>(outcome: Result<(), AppError>, out: &mut O, err: &mut E) -> u8
where
    O: Write,
    E: Write,
{
    match outcome {
        Ok(()) => 0,
        Err(AppError::Rejected(rejection)) => {
            let _ = writeln!(out, "\n{rejection}.");
            let _ = writeln!(
                out,
                "Your input may violate the model's restrictions. Please try again using a different model or with safer terms."
            );
            1
        }
        Err(error) => {
            let _ = writeln!(err, "error: {error}");
            1
        }
    }
}
