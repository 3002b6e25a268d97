//! Command-line argument parsing for the prepdeck CLI.

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// List past interview sessions
    History,
    /// Show one session with its transcript
    Session { id: i64 },
    /// Delete a session from the history
    DeleteSession { id: i64 },
    /// List knowledge bases
    KbList,
    /// Stream the answer to a question
    Ask { question: String, kb_ids: Vec<i64> },
    /// Show usage (default, and fallback for malformed input)
    Help,
}

/// Parse command-line arguments and return the command to execute.
///
/// # Arguments
///
/// * `args` - Iterator of command-line arguments (typically `std::env::args()`)
pub fn parse_args<I>(args: I) -> CliCommand
where
    I: Iterator<Item = String>,
{
    let args: Vec<String> = args.skip(1).collect(); // Skip the program name

    match args.first().map(String::as_str) {
        Some("--version") | Some("-V") => CliCommand::Version,
        Some("history") => CliCommand::History,
        Some("session") => match parse_id(args.get(1)) {
            Some(id) => CliCommand::Session { id },
            None => CliCommand::Help,
        },
        Some("forget") => match parse_id(args.get(1)) {
            Some(id) => CliCommand::DeleteSession { id },
            None => CliCommand::Help,
        },
        Some("kb") => CliCommand::KbList,
        Some("ask") => parse_ask(&args[1..]),
        _ => CliCommand::Help,
    }
}

fn parse_id(arg: Option<&String>) -> Option<i64> {
    arg.and_then(|s| s.parse().ok())
}

/// Parse `ask <question> [--kb 1,2,...]`.
fn parse_ask(args: &[String]) -> CliCommand {
    let mut question = None;
    let mut kb_ids = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "--kb" {
            let Some(list) = iter.next() else {
                return CliCommand::Help;
            };
            for part in list.split(',') {
                match part.trim().parse() {
                    Ok(id) => kb_ids.push(id),
                    Err(_) => return CliCommand::Help,
                }
            }
        } else if question.is_none() {
            question = Some(arg.clone());
        } else {
            return CliCommand::Help; // More than one positional argument
        }
    }

    match question {
        Some(question) => CliCommand::Ask { question, kb_ids },
        None => CliCommand::Help,
    }
}
