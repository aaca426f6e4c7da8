//! Dataset Assistant CLI
//!
//! Asks questions about a CSV file through a remote assistant.
//!
//! Usage:
//!   dataset-assistant --dataset data/sales.csv
//!
//! Commands at the prompt:
//!   /examples        list the example questions
//!   /example <Key>   ask one of them
//!   /quit            leave

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dataset_assistant::adapters::ai::{OpenAIAssistantsConfig, OpenAIAssistantsProvider};
use dataset_assistant::adapters::dataset::CsvFileLoader;
use dataset_assistant::application::ConversationOrchestrator;
use dataset_assistant::config::{
    AppConfig, LogFormat, LoggingConfig, ValidationError, API_KEY_VAR, ASSISTANT_ID_VAR,
};
use dataset_assistant::domain::conversation::{
    example_questions, find_example, Dataset, SessionContext,
};
use dataset_assistant::domain::foundation::AssistantId;
use dataset_assistant::ports::AssistantApi;

/// Conversational assistant over a CSV dataset
#[derive(Parser, Debug)]
#[command(name = "dataset-assistant")]
#[command(about = "Ask questions about a CSV file")]
struct Args {
    /// CSV file to ask questions about
    #[arg(long, short = 'd')]
    dataset: PathBuf,

    /// Override the number of status checks per question
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Override the pause between status checks, in milliseconds
    #[arg(long)]
    poll_interval_ms: Option<u64>,
}

/// What the user typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Quit,
    ListExamples,
    Example(&'a str),
    Ask(&'a str),
    Blank,
}

fn parse_command(line: &str) -> Command<'_> {
    let line = line.trim();
    if line.is_empty() {
        return Command::Blank;
    }
    match line.split_once(char::is_whitespace) {
        Some(("/example", key)) => Command::Example(key.trim()),
        _ => match line {
            "/example" => Command::Example(""),
            "/quit" | "/exit" => Command::Quit,
            "/examples" => Command::ListExamples,
            other => Command::Ask(other),
        },
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mut config = AppConfig::load()?;
    if let Some(max_attempts) = args.max_attempts {
        config.polling.max_attempts = max_attempts;
    }
    if let Some(poll_interval_ms) = args.poll_interval_ms {
        config.polling.poll_interval_ms = poll_interval_ms;
    }
    config.validate()?;
    init_tracing(&config.logging);

    let dataset = CsvFileLoader::new(&args.dataset).load().await?;

    let api_key = config
        .assistant
        .api_key()
        .ok_or(ValidationError::MissingRequired(API_KEY_VAR))?;
    let assistant_id = AssistantId::new(
        config
            .assistant
            .assistant()
            .ok_or(ValidationError::MissingRequired(ASSISTANT_ID_VAR))?,
    )?;
    let provider = OpenAIAssistantsProvider::new(
        OpenAIAssistantsConfig::new(api_key)
            .with_base_url(&config.assistant.base_url)
            .with_timeout(config.assistant.timeout())
            .with_max_retries(config.assistant.max_retries),
    )?;
    let info = provider.provider_info();
    info!(
        provider = %info.name,
        endpoint = %info.endpoint,
        max_attempts = config.polling.max_attempts,
        poll_interval_ms = config.polling.poll_interval_ms,
        "Assistant configured"
    );

    let orchestrator =
        ConversationOrchestrator::new(Arc::new(provider), assistant_id, config.polling.poll_policy());
    let mut session = SessionContext::new();

    run_repl(&orchestrator, &mut session, &dataset).await?;
    Ok(())
}

async fn run_repl<A>(
    orchestrator: &ConversationOrchestrator<A>,
    session: &mut SessionContext,
    dataset: &Dataset,
) -> Result<(), Box<dyn std::error::Error>>
where
    A: AssistantApi + 'static,
{
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let Err(err) = orchestrator.start_session(session).await {
        error!(error = %err, "Could not start session");
        return Err(err.into());
    }
    let mut cursor = render_since(&mut stdout, session, 0).await?;

    loop {
        stdout.write_all(b"> ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        let question = match parse_command(&line) {
            Command::Blank => continue,
            Command::Quit => break,
            Command::ListExamples => {
                for example in example_questions() {
                    let entry = format!("  {:<24} {}\n", example.key, example.question);
                    stdout.write_all(entry.as_bytes()).await?;
                }
                continue;
            }
            Command::Example(key) => match find_example(key) {
                Some(example) => example.question,
                None => {
                    let msg = format!("Unknown example '{}'. Type /examples to list them.\n", key);
                    stdout.write_all(msg.as_bytes()).await?;
                    continue;
                }
            },
            Command::Ask(text) => text,
        };

        // The transcript already carries the ERROR entry; the typed error is for logs.
        if let Err(err) = orchestrator.handle_input(session, question, dataset).await {
            error!(session_id = %session.id(), error = %err, "Question failed");
        }
        cursor = render_since(&mut stdout, session, cursor).await?;
    }

    Ok(())
}

/// Prints the transcript entries appended after `cursor` and returns the new cursor.
async fn render_since(
    stdout: &mut tokio::io::Stdout,
    session: &SessionContext,
    cursor: usize,
) -> std::io::Result<usize> {
    for entry in session.transcript().since(cursor) {
        let block = format!("[{}] {}\n", entry.role(), entry.text());
        stdout.write_all(block.as_bytes()).await?;
    }
    stdout.flush().await?;
    Ok(session.transcript().len())
}
