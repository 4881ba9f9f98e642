#[cfg(test)]
#[path = "channel_test.rs"]
mod channel_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Chat channel; one tab and one message container per variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    #[default]
    World,
    Location,
    Private,
    Trade,
    Groupchat,
    Group,
    Clan,
    Alliance,
}

impl Channel {
    /// Every channel, in tab-strip order.
    pub const ALL: [Channel; 8] = [
        Channel::World,
        Channel::Location,
        Channel::Private,
        Channel::Trade,
        Channel::Groupchat,
        Channel::Group,
        Channel::Clan,
        Channel::Alliance,
    ];

    /// Wire name, also used as the `data-tab` attribute value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::World => "world",
            Self::Location => "location",
            Self::Private => "private",
            Self::Trade => "trade",
            Self::Groupchat => "groupchat",
            Self::Group => "group",
            Self::Clan => "clan",
            Self::Alliance => "alliance",
        }
    }

    /// Position in [`Channel::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Tab caption shown in the strip.
    pub fn label(self) -> &'static str {
        match self {
            Self::World => "World",
            Self::Location => "Location",
            Self::Private => "Private",
            Self::Trade => "Trade",
            Self::Groupchat => "Group chat",
            Self::Group => "Underworld",
            Self::Clan => "Clan",
            Self::Alliance => "Alliance",
        }
    }

    /// Only the `group` channel shows the auxiliary group panel.
    pub fn shows_group_panel(self) -> bool {
        self == Self::Group
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown chat channel: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownChannel(s.to_owned()))
    }
}
