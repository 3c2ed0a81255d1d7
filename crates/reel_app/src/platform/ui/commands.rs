//! Line commands typed at the prompt.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Any line not starting with `:` replaces the search query.
    Query(String),
    /// `:open N`: toggle the N-th result (1-based).
    Open(usize),
    Close,
    Rate(u8),
    Add,
    Help,
    Quit,
    Invalid(String),
}

pub const HELP: &str = "\
Type to search (at least 2 characters). Commands:
  :open N   open or close result N
  :close    close the open movie
  :rate N   rate the open movie (1-10)
  :add      add the open movie to your watched list
  :help     show this help
  :quit     exit";

pub fn parse(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.trim_start().strip_prefix(':') else {
        return Command::Query(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();
    match (name, arg) {
        ("open" | "o", Some(n)) => match n.parse::<usize>() {
            Ok(index) if index > 0 => Command::Open(index),
            _ => Command::Invalid(format!("not a result number: {n}")),
        },
        ("rate" | "r", Some(n)) => match n.parse::<u8>() {
            Ok(value) => Command::Rate(value),
            Err(_) => Command::Invalid(format!("not a rating: {n}")),
        },
        ("close" | "c", None) => Command::Close,
        ("add" | "a", None) => Command::Add,
        ("help" | "h", None) => Command::Help,
        ("quit" | "q", None) => Command::Quit,
        _ => Command::Invalid(format!("unknown command: {}", command.trim())),
    }
}
