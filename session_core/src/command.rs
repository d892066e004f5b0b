//! Chat commands understood by the battle bot

use std::fmt;

/// Target of an ability or item use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Every valid target; the bot picks the side from the ability
    All,
    Named(String),
}

impl Target {
    pub fn named(name: impl Into<String>) -> Self {
        Target::Named(name.into())
    }
}

impl From<&str> for Target {
    fn from(s: &str) -> Self {
        if s == "ALL" {
            Target::All
        } else {
            Target::Named(s.to_string())
        }
    }
}

/// A viewer action, rendered as the chat line the bot parses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BattleCommand {
    Attack { target: String },
    UseAbility { ability: String, target: Target },
    UseItem { item: String, target: Target },
    GiveItem { item: String, target: String },
    Explore,
    Ready,
}

impl BattleCommand {
    /// Chat line carried in the `message` field of a COMMAND frame
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for BattleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BattleCommand::Attack { target } => write!(f, "!attack {}", target),
            BattleCommand::UseAbility { ability, target } => match target {
                Target::All => write!(f, "!use {}", ability),
                Target::Named(name) => write!(f, "!use {} {}", ability, name),
            },
            // Items are addressed with a leading '#'
            BattleCommand::UseItem { item, target } => match target {
                Target::All => write!(f, "!use #{}", item),
                Target::Named(name) => write!(f, "!use #{} {}", item, name),
            },
            BattleCommand::GiveItem { item, target } => write!(f, "!give {} {}", item, target),
            BattleCommand::Explore => write!(f, "!explore"),
            BattleCommand::Ready => write!(f, "!ready"),
        }
    }
}
