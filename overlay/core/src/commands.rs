//! Command Table
//!
//! The fixed set of keywords the overlay understands. The set is closed and
//! known up front, so it is an enum rather than a registry.

use crate::extract::{extract_contacts, extract_projects, extract_section, NOT_FOUND};
use crate::page::PageContent;

/// Confirmation shown by `enter`
pub const ENTER_CONFIRMATION: &str =
    "Entering site… (type 'help' again after reopening terminal)";

/// Hint shown after an unknown command
pub const UNKNOWN_COMMAND_HINT: &str = "Type \"help\" for a list of commands.";

/// A terminal keyword
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// List every command
    Help,
    /// The about section
    AboutMe,
    /// Personal project cards
    Projects,
    /// The awards section
    Awards,
    /// The education section
    Education,
    /// Contact links
    Contact,
    /// Hide the overlay and show the site
    Enter,
    /// Empty the scrollback
    Clear,
}

/// What running a command asks the controller to do
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Render this text as one block
    Output(String),
    /// Hide the overlay and confirm with a single line
    EnterSite,
    /// Empty the scrollback
    ClearScreen,
}

impl Command {
    /// Every command, in table order
    pub const ALL: [Command; 8] = [
        Command::Help,
        Command::AboutMe,
        Command::Projects,
        Command::Awards,
        Command::Education,
        Command::Contact,
        Command::Enter,
        Command::Clear,
    ];

    /// Keyword typed at the prompt
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::AboutMe => "aboutme",
            Command::Projects => "projects",
            Command::Awards => "awards",
            Command::Education => "education",
            Command::Contact => "contact",
            Command::Enter => "enter",
            Command::Clear => "clear",
        }
    }

    /// One-line description for the help listing
    #[must_use]
    pub fn summary(self) -> &'static str {
        match self {
            Command::Help => "Show this help",
            Command::AboutMe => "About Ali",
            Command::Projects => "Side projects",
            Command::Awards => "Awards",
            Command::Education => "Education",
            Command::Contact => "Contact links",
            Command::Enter => "Hide terminal and view the site",
            Command::Clear => "Clear the screen",
        }
    }

    /// Exact, case-insensitive keyword lookup
    #[must_use]
    pub fn lookup(token: &str) -> Option<Command> {
        let token = token.to_lowercase();
        Self::ALL.into_iter().find(|cmd| cmd.name() == token)
    }

    /// Keywords starting with `prefix`, in table order
    #[must_use]
    pub fn completions(prefix: &str) -> Vec<&'static str> {
        Self::ALL
            .into_iter()
            .map(Command::name)
            .filter(|name| name.starts_with(prefix))
            .collect()
    }

    /// Run the command against the page
    pub fn run<P: PageContent + ?Sized>(self, page: &P) -> CommandOutcome {
        match self {
            Command::Help => CommandOutcome::Output(help_text()),
            Command::AboutMe => CommandOutcome::Output(extract_section(page, "#about", NOT_FOUND)),
            Command::Projects => CommandOutcome::Output(extract_projects(page)),
            Command::Awards => CommandOutcome::Output(extract_section(page, "#Awards", NOT_FOUND)),
            Command::Education => {
                CommandOutcome::Output(extract_section(page, "#education", NOT_FOUND))
            }
            Command::Contact => CommandOutcome::Output(extract_contacts(page)),
            Command::Enter => CommandOutcome::EnterSite,
            Command::Clear => CommandOutcome::ClearScreen,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The fixed help listing
#[must_use]
pub fn help_text() -> String {
    let mut lines = vec!["Available commands:".to_string()];
    lines.extend(
        Command::ALL
            .into_iter()
            .map(|cmd| format!("  {:<13}{}", cmd.name(), cmd.summary())),
    );
    lines.join("\n")
}

/// First whitespace-delimited token, lowercased
///
/// Returns `None` for blank input.
#[must_use]
pub fn command_token(input: &str) -> Option<String> {
    input.split_whitespace().next().map(str::to_lowercase)
}
