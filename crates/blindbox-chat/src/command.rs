//! Command tokenizer and action resolution.
//!
//! One entry command with sub-actions: the raw text is split on whitespace,
//! a leading command-name token is discarded, and the first remaining token
//! picks the action. Chinese tokens are the primary spelling; ASCII aliases
//! match case-insensitively.

/// A resolved sub-action of the entry command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Show all categories with their pool status.
    List,
    /// Select a category for this session.
    Select,
    /// Open a numbered box, drawing from the selected category's pool.
    Open,
    /// Show a category's pool status.
    Status,
}

/// Result of tokenizing one raw command text.
///
/// `action` is `None` for empty input and unrecognized tokens; both fall
/// through to the help text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedCommand {
    pub action: Option<Action>,
    pub args: Vec<String>,
}

/// Tokenizer for the entry command.
pub struct CommandParser {
    command_name: String,
}

impl CommandParser {
    /// Create a parser for the given entry command name.
    pub fn new(command_name: impl Into<String>) -> Self {
        Self {
            command_name: command_name.into(),
        }
    }

    /// Parse raw message text into an action and its arguments.
    ///
    /// The leading token is discarded when it equals the command name after
    /// stripping leading `/` characters, so both `/方舟盲盒 列表` and a
    /// pre-stripped `列表` parse the same way.
    pub fn parse(&self, raw: &str) -> ParsedCommand {
        let mut tokens = raw.split_whitespace().peekable();

        if let Some(first) = tokens.peek() {
            if first.trim_start_matches('/') == self.command_name {
                tokens.next();
            }
        }

        let action = tokens.next().and_then(resolve_action);
        let args = tokens.map(str::to_string).collect();

        ParsedCommand { action, args }
    }
}

/// Map an action token to its action, or `None` for unrecognized tokens.
fn resolve_action(token: &str) -> Option<Action> {
    match token.to_lowercase().as_str() {
        "列表" | "list" | "types" => Some(Action::List),
        "选择" | "select" => Some(Action::Select),
        "开" | "开启" | "open" => Some(Action::Open),
        "状态" | "status" => Some(Action::Status),
        _ => None,
    }
}
