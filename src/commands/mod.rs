//! `/`-prefixed REPL commands.
//!
//! The set is fixed. A line that names none of them and does not start with
//! `/` is handed to the engine as a task instruction.

mod ops;

use std::path::Path;

/// What the session looks like, for `/whoami`.
pub struct SessionInfo<'a> {
    pub root: &'a Path,
    pub model: &'a str,
    pub auth_status: &'a str,
    pub formatter: &'a str,
}

/// What the REPL should do with the line it just read.
#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    NotACommand,
    Handled,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Builtin {
    Help,
    Ops,
    Whoami,
    Quit,
}

impl Builtin {
    const ALL: [Builtin; 4] = [Builtin::Help, Builtin::Ops, Builtin::Whoami, Builtin::Quit];

    /// Accepted spellings; the first is shown as the name in `/help`.
    fn triggers(self) -> &'static [&'static str] {
        match self {
            Builtin::Help => &["/help", "/h", "/?"],
            Builtin::Ops => &["/ops", "/operations"],
            Builtin::Whoami => &["/whoami"],
            Builtin::Quit => &["/quit", "/exit", "quit", "exit"],
        }
    }

    fn summary(self) -> &'static str {
        match self {
            Builtin::Help => "show available commands",
            Builtin::Ops => "list operations in match order",
            Builtin::Whoami => "show data root, model, and auth status",
            Builtin::Quit => "exit the REPL",
        }
    }

    fn parse(input: &str) -> Option<Builtin> {
        Builtin::ALL
            .into_iter()
            .find(|b| b.triggers().contains(&input))
    }
}

/// Run the command named by `input`, if any.
pub fn dispatch(input: &str, info: &SessionInfo<'_>) -> CommandResult {
    let input = input.trim();
    match Builtin::parse(input) {
        Some(Builtin::Help) => print!("{}", help_text()),
        Some(Builtin::Ops) => print!("{}", ops::listing()),
        Some(Builtin::Whoami) => print!("{}", whoami_text(info)),
        Some(Builtin::Quit) => return CommandResult::Quit,
        None if input.starts_with('/') => {
            println!("unknown command: {input}");
            println!("type /help for commands, /ops for operations");
        }
        None => return CommandResult::NotACommand,
    }
    CommandResult::Handled
}

/// `/help` output: one row per command, aliases in parentheses.
fn help_text() -> String {
    let rows: Vec<(String, &str)> = Builtin::ALL
        .into_iter()
        .filter_map(|b| {
            let (name, aliases) = b.triggers().split_first()?;
            let label = if aliases.is_empty() {
                name.to_string()
            } else {
                format!("{name} ({})", aliases.join(", "))
            };
            Some((label, b.summary()))
        })
        .collect();
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    rows.iter()
        .map(|(label, summary)| format!("  {label:<width$}  {summary}\n"))
        .collect()
}

fn whoami_text(info: &SessionInfo<'_>) -> String {
    format!(
        "  root      {}\n  model     {}\n  auth      {}\n  format    {}\n",
        info.root.display(),
        info.model,
        info.auth_status,
        info.formatter
    )
}
