//! What the viewer sees, derived from liveness and the character view

use crate::refresh::CharacterView;
use item_core::{AbilityGroup, ItemType};
use session_core::ContextSnapshot;
use std::fmt;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelStatus {
    NoCharacter,
    Unavailable,
    BotAsleep,
    Loading,
    NotReady,
    Active,
}

impl fmt::Display for PanelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PanelStatus::NoCharacter => "no battler yet, run `create`",
            PanelStatus::Unavailable => "server unavailable",
            PanelStatus::BotAsleep => "bot is asleep",
            PanelStatus::Loading => "loading",
            PanelStatus::NotReady => "waiting, run `ready` to enter the dungeon",
            PanelStatus::Active => "active",
        };
        write!(f, "{}", s)
    }
}

/// Owned by the main task; replaced piecewise as events arrive
#[derive(Debug, Clone, Default)]
pub struct PanelState {
    pub view: CharacterView,
    pub live: bool,
    pub context: ContextSnapshot,
    pub ready: bool,
}

impl PanelState {
    pub fn status(&self) -> PanelStatus {
        match &self.view {
            CharacterView::Missing => PanelStatus::NoCharacter,
            CharacterView::Unavailable => PanelStatus::Unavailable,
            _ if !self.live => PanelStatus::BotAsleep,
            CharacterView::Loading => PanelStatus::Loading,
            CharacterView::Loaded(_) if !self.ready => PanelStatus::NotReady,
            CharacterView::Loaded(_) => PanelStatus::Active,
        }
    }

    /// A viewer is ready once the bot lists them among its players
    pub fn apply_context(&mut self, snapshot: ContextSnapshot) {
        self.ready = self
            .view
            .character()
            .is_some_and(|c| snapshot.has_player(&c.name));
        self.context = snapshot;
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    pub fn summary(&self) -> String {
        let mut out = format!("status: {}\n", self.status());
        let Some(c) = self.view.character() else {
            return out;
        };

        let _ = writeln!(
            out,
            "{} the {}  HP {}/{}  AC {}  STR {} DEX {} INT {} HIT {}  cooldown {}s",
            c.name,
            c.current_job.name,
            c.hp,
            c.max_hp,
            c.total_ac,
            c.strength,
            c.dexterity,
            c.intelligence,
            c.hit,
            c.action_cooldown
        );
        match c.damage_range() {
            Ok(Some(range)) => {
                let _ = writeln!(out, "damage: {}", range);
            }
            Ok(None) => {}
            Err(e) => {
                let _ = writeln!(out, "damage: ? ({})", e);
            }
        }
        for (slot, item) in &c.equipment {
            let _ = writeln!(out, "  [{}] {}", slot, item);
        }
        for group in [AbilityGroup::Attack, AbilityGroup::Healing, AbilityGroup::Buff] {
            let names: Vec<&str> = c.abilities_in(group).map(|a| a.id.as_str()).collect();
            if !names.is_empty() {
                let _ = writeln!(out, "{}: {}", group, names.join(", "));
            }
        }
        let consumables: Vec<&str> = c
            .inventory_of(ItemType::Consumable)
            .map(|i| i.id.as_str())
            .collect();
        if !consumables.is_empty() {
            let _ = writeln!(out, "items: {}", consumables.join(", "));
        }
        if !self.context.players.is_empty() {
            let _ = writeln!(out, "players: {}", self.context.players.join(", "));
        }
        if !self.context.monsters.is_empty() {
            let _ = writeln!(out, "monsters: {}", self.context.monsters.join(", "));
        }
        out
    }
}
