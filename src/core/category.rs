// ChatScribe - core/category.rs
//
// The closed set of chat/event categories. Every incoming message carries
// exactly one of these; the category drives both profile filtering and
// line formatting. Unknown host channel codes must be mapped to one of
// these by the host before ingestion (or dropped).

use serde::{Deserialize, Serialize};

/// Channel/type classification of a chat message.
///
/// Serialised by variant name so persisted profile maps stay readable
/// and stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChatCategory {
    Say,
    Shout,
    Yell,
    Party,
    CrossParty,
    Alliance,
    TellIncoming,
    TellOutgoing,
    CustomEmote,
    StandardEmote,
    CrossLinkshell1,
    CrossLinkshell2,
    CrossLinkshell3,
    CrossLinkshell4,
    CrossLinkshell5,
    CrossLinkshell6,
    CrossLinkshell7,
    CrossLinkshell8,
    Linkshell1,
    Linkshell2,
    Linkshell3,
    Linkshell4,
    Linkshell5,
    Linkshell6,
    Linkshell7,
    Linkshell8,
    PvpTeam,
    NoviceNetwork,
    FreeCompany,
    Echo,
    SystemMessage,
    SystemError,
    Notice,
}

impl ChatCategory {
    /// Returns all variants in display order.
    pub fn all() -> &'static [ChatCategory] {
        use ChatCategory::*;
        &[
            Say,
            Shout,
            Yell,
            Party,
            CrossParty,
            Alliance,
            TellIncoming,
            TellOutgoing,
            CustomEmote,
            StandardEmote,
            CrossLinkshell1,
            CrossLinkshell2,
            CrossLinkshell3,
            CrossLinkshell4,
            CrossLinkshell5,
            CrossLinkshell6,
            CrossLinkshell7,
            CrossLinkshell8,
            Linkshell1,
            Linkshell2,
            Linkshell3,
            Linkshell4,
            Linkshell5,
            Linkshell6,
            Linkshell7,
            Linkshell8,
            PvpTeam,
            NoviceNetwork,
            FreeCompany,
            Echo,
            SystemMessage,
            SystemError,
            Notice,
        ]
    }

    /// Human-readable label for configuration display.
    pub fn label(&self) -> &'static str {
        use ChatCategory::*;
        match self {
            Say => "Say",
            Shout => "Shout",
            Yell => "Yell",
            Party => "Party",
            CrossParty => "Cross World Party",
            Alliance => "Alliance",
            TellIncoming => "Tell Incoming",
            TellOutgoing => "Tell Outgoing",
            CustomEmote => "Custom Emotes",
            StandardEmote => "Standard Emotes",
            CrossLinkshell1 => "Cross Link Shell 1",
            CrossLinkshell2 => "Cross Link Shell 2",
            CrossLinkshell3 => "Cross Link Shell 3",
            CrossLinkshell4 => "Cross Link Shell 4",
            CrossLinkshell5 => "Cross Link Shell 5",
            CrossLinkshell6 => "Cross Link Shell 6",
            CrossLinkshell7 => "Cross Link Shell 7",
            CrossLinkshell8 => "Cross Link Shell 8",
            Linkshell1 => "Linkshell 1",
            Linkshell2 => "Linkshell 2",
            Linkshell3 => "Linkshell 3",
            Linkshell4 => "Linkshell 4",
            Linkshell5 => "Linkshell 5",
            Linkshell6 => "Linkshell 6",
            Linkshell7 => "Linkshell 7",
            Linkshell8 => "Linkshell 8",
            PvpTeam => "PVP Team",
            NoviceNetwork => "Novice Network",
            FreeCompany => "Free Company",
            Echo => "Echo (Some System Messages)",
            SystemMessage => "System Messages",
            SystemError => "System Error",
            Notice => "Notice",
        }
    }

    /// Short bracket tag for group channels (`[FC]`, `[LS3]`, ...).
    ///
    /// `None` for categories whose formatted line carries no tag.
    pub fn short_tag(&self) -> Option<&'static str> {
        use ChatCategory::*;
        match self {
            FreeCompany => Some("FC"),
            NoviceNetwork => Some("NN"),
            CrossLinkshell1 => Some("CWLS1"),
            CrossLinkshell2 => Some("CWLS2"),
            CrossLinkshell3 => Some("CWLS3"),
            CrossLinkshell4 => Some("CWLS4"),
            CrossLinkshell5 => Some("CWLS5"),
            CrossLinkshell6 => Some("CWLS6"),
            CrossLinkshell7 => Some("CWLS7"),
            CrossLinkshell8 => Some("CWLS8"),
            Linkshell1 => Some("LS1"),
            Linkshell2 => Some("LS2"),
            Linkshell3 => Some("LS3"),
            Linkshell4 => Some("LS4"),
            Linkshell5 => Some("LS5"),
            Linkshell6 => Some("LS6"),
            Linkshell7 => Some("LS7"),
            Linkshell8 => Some("LS8"),
            PvpTeam => Some("PvP"),
            _ => None,
        }
    }

    /// Whether a freshly created profile includes this category.
    ///
    /// Conversational categories start enabled; overflow channels
    /// (linkshells, cross-world linkshells, FC, NN, PvP team) and
    /// system-style categories start disabled.
    pub fn default_enabled(&self) -> bool {
        use ChatCategory::*;
        matches!(
            self,
            Say | Shout
                | Yell
                | Party
                | CrossParty
                | Alliance
                | TellIncoming
                | TellOutgoing
                | CustomEmote
                | StandardEmote
        )
    }
}

impl std::fmt::Display for ChatCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
