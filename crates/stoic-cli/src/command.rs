use std::path::PathBuf;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text to send
    Message(String),
    New,
    History,
    /// 1-based position in the history listing
    Load(usize),
    Delete(usize),
    Image(PathBuf),
    Unimage,
    Guide,
    Help,
    Quit,
    /// Slash command that could not be understood, with the reason
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('/') else {
            return Command::Message(line.to_string());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };

        match name {
            "new" => Command::New,
            "history" | "h" => Command::History,
            "load" => parse_index(arg).map_or_else(Command::Invalid, Command::Load),
            "delete" | "del" => parse_index(arg).map_or_else(Command::Invalid, Command::Delete),
            "image" | "img" if arg.is_empty() => {
                Command::Invalid("Usage: /image <path>".to_string())
            }
            "image" | "img" => Command::Image(PathBuf::from(arg)),
            "unimage" => Command::Unimage,
            "guide" => Command::Guide,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Invalid(format!("Unknown command: /{}", other)),
        }
    }
}

fn parse_index(arg: &str) -> Result<usize, String> {
    match arg.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("Expected a session number, got '{}'", arg)),
    }
}
