//! Console command parsing

use session_core::{BattleCommand, Target};
use thiserror::Error;

pub const HELP: &str = "\
commands:
  attack <target>
  ability <id> <target|all>
  item <id> <target|all>
  give <id> <target>
  explore | ready
  context | reload | reconnect | create | status | help";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Battle(BattleCommand),
    /// Ask the bot for a fresh snapshot
    Context,
    Reload,
    Reconnect,
    Create,
    Status,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Unknown command '{0}', try `help`")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

fn target(word: &str) -> Target {
    if word.eq_ignore_ascii_case("all") {
        Target::All
    } else {
        Target::named(word)
    }
}

/// Parse one console line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Action>, InputError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&head, args)) = words.split_first() else {
        return Ok(None);
    };

    let action = match (head.to_ascii_lowercase().as_str(), args) {
        ("attack", [t]) => Action::Battle(BattleCommand::Attack {
            target: t.to_string(),
        }),
        ("attack", _) => return Err(InputError::Usage("attack <target>")),
        ("ability", [id, t]) => Action::Battle(BattleCommand::UseAbility {
            ability: id.to_string(),
            target: target(t),
        }),
        ("ability", _) => return Err(InputError::Usage("ability <id> <target|all>")),
        ("item", [id, t]) => Action::Battle(BattleCommand::UseItem {
            item: id.to_string(),
            target: target(t),
        }),
        ("item", _) => return Err(InputError::Usage("item <id> <target|all>")),
        ("give", [id, t]) => Action::Battle(BattleCommand::GiveItem {
            item: id.to_string(),
            target: t.to_string(),
        }),
        ("give", _) => return Err(InputError::Usage("give <id> <target>")),
        ("explore", []) => Action::Battle(BattleCommand::Explore),
        ("ready", []) => Action::Battle(BattleCommand::Ready),
        ("context", []) => Action::Context,
        ("reload", []) => Action::Reload,
        ("reconnect", []) => Action::Reconnect,
        ("create", []) => Action::Create,
        ("status", []) => Action::Status,
        ("help", _) => Action::Help,
        _ => return Err(InputError::Unknown(head.to_string())),
    };
    Ok(Some(action))
}
