use prepdeck::cli::{parse_args, CliCommand};
use prepdeck::client::PrepdeckClient;
use prepdeck::config::Config;
use prepdeck::error::ApiError;
use prepdeck::models::QueryRequest;
use prepdeck::sse::StreamHandler;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use std::io::Write;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Handler that prints answer chunks to stdout as they arrive.
#[derive(Default)]
struct StdoutAnswer {
    error: Option<String>,
}

impl StreamHandler for StdoutAnswer {
    fn on_message(&mut self, chunk: &str) {
        print!("{}", chunk);
        let _ = std::io::stdout().flush();
    }

    fn on_complete(&mut self) {
        println!();
    }

    fn on_error(&mut self, error: &ApiError) {
        self.error = Some(error.to_string());
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match parse_args(std::env::args()) {
        CliCommand::Version => {
            println!("prepdeck {}", VERSION);
            Ok(())
        }
        CliCommand::Help => {
            print_usage();
            Ok(())
        }
        command => run_command(command).await,
    }
}

async fn run_command(command: CliCommand) -> Result<()> {
    let config = Config::load();
    let client = PrepdeckClient::new(&config)?;

    match command {
        CliCommand::History => {
            for session in client.list_sessions().await? {
                println!(
                    "{:>6}  {}  [{}] {}",
                    session.id,
                    session.started_at.format("%Y-%m-%d %H:%M"),
                    session.topic,
                    session.title,
                );
            }
        }
        CliCommand::Session { id } => {
            let detail = client.get_session(id).await?;
            println!("# {}", detail.session.title);
            for message in &detail.messages {
                println!("{:?}: {}", message.role, message.content);
            }
        }
        CliCommand::DeleteSession { id } => {
            client.delete_session(id).await?;
            println!("deleted session {}", id);
        }
        CliCommand::KbList => {
            for kb in client.list_knowledge_bases().await? {
                println!(
                    "{:>6}  {} ({} documents)",
                    kb.id, kb.name, kb.document_count
                );
            }
        }
        CliCommand::Ask { question, kb_ids } => {
            let request = QueryRequest::new(question, kb_ids);
            let mut handler = StdoutAnswer::default();
            client.stream_query_with(&request, &mut handler).await;
            if let Some(message) = handler.error {
                return Err(eyre!(message));
            }
        }
        // Handled before the client is built
        CliCommand::Version | CliCommand::Help => {}
    }

    Ok(())
}

fn print_usage() {
    println!("prepdeck {}", VERSION);
    println!();
    println!("Usage:");
    println!("  prepdeck history                     list past interview sessions");
    println!("  prepdeck session <id>                show a session transcript");
    println!("  prepdeck forget <id>                 delete a session");
    println!("  prepdeck kb                          list knowledge bases");
    println!("  prepdeck ask <question> [--kb 1,2]   stream an answer");
    println!("  prepdeck --version                   show version");
    println!();
    println!(
        "The backend URL comes from ~/.prepdeck/config.json or the {} environment variable.",
        prepdeck::config::BASE_URL_ENV
    );
}
