use crate::host::scene_model::NodeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Opponent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    Hand,
    Battlefield,
    Graveyard,
    Exile,
    Stack,
}

/// Navigable zone cycle, in the order the zone keys step through them.
/// The stack is shared; it appears once under the player side.
pub const ZONE_ORDER: &[(ZoneKind, Owner)] = &[
    (ZoneKind::Hand, Owner::Player),
    (ZoneKind::Battlefield, Owner::Player),
    (ZoneKind::Battlefield, Owner::Opponent),
    (ZoneKind::Graveyard, Owner::Player),
    (ZoneKind::Graveyard, Owner::Opponent),
    (ZoneKind::Exile, Owner::Player),
    (ZoneKind::Exile, Owner::Opponent),
    (ZoneKind::Stack, Owner::Player),
];

impl ZoneKind {
    /// Name of the host node that roots this zone's card layout.
    pub fn root_name(self, owner: Owner) -> &'static str {
        match (self, owner) {
            (ZoneKind::Hand, Owner::Player) => "PlayerHand",
            (ZoneKind::Hand, Owner::Opponent) => "OpponentHand",
            (ZoneKind::Battlefield, Owner::Player) => "PlayerBattlefield",
            (ZoneKind::Battlefield, Owner::Opponent) => "OpponentBattlefield",
            (ZoneKind::Graveyard, Owner::Player) => "PlayerGraveyard",
            (ZoneKind::Graveyard, Owner::Opponent) => "OpponentGraveyard",
            (ZoneKind::Exile, Owner::Player) => "PlayerExile",
            (ZoneKind::Exile, Owner::Opponent) => "OpponentExile",
            (ZoneKind::Stack, _) => "TheStack",
        }
    }
}

/// Transient reference to a card's host node plus the text read off it.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRef {
    pub node: NodeId,
    pub name: String,
    pub type_line: String,
}

/// A named region of the duel, rebuilt from the live layout every time it
/// is (re)entered.
#[derive(Debug, Clone)]
pub struct Zone {
    pub kind: ZoneKind,
    pub owner: Owner,
    pub cards: Vec<CardRef>,
}

impl Zone {
    pub fn display_name(&self) -> String {
        let base = match self.kind {
            ZoneKind::Hand => "hand",
            ZoneKind::Battlefield => "battlefield",
            ZoneKind::Graveyard => "graveyard",
            ZoneKind::Exile => "exile",
            ZoneKind::Stack => return "Stack".to_string(),
        };
        match self.owner {
            Owner::Player => capitalize(base),
            Owner::Opponent => format!("Opponent's {}", base),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

// ---------------------------------------------------------------------------
// Card-type heuristics, read off the displayed type line. The mod has no
// authoritative card data, so localized or late-loading type lines can
// misread; that is a bounded, visible limitation, not something to guess
// around.
// ---------------------------------------------------------------------------

pub fn is_land(type_line: &str) -> bool {
    type_line.to_lowercase().contains("land")
}

pub fn is_creature(type_line: &str) -> bool {
    type_line.to_lowercase().contains("creature")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_display_names() {
        let zone = Zone {
            kind: ZoneKind::Graveyard,
            owner: Owner::Opponent,
            cards: vec![],
        };
        assert_eq!(zone.display_name(), "Opponent's graveyard");

        let stack = Zone {
            kind: ZoneKind::Stack,
            owner: Owner::Player,
            cards: vec![],
        };
        assert_eq!(stack.display_name(), "Stack");
    }

    #[test]
    fn type_line_heuristics() {
        assert!(is_land("Basic Land — Forest"));
        assert!(is_creature("Legendary Creature — Elf Druid"));
        assert!(!is_land("Instant"));
    }
}
