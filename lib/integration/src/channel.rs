//! Communication channel types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category of communication an integration delivers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    /// Email delivery (SMTP or provider API).
    Email,
    /// SMS delivery.
    Sms,
    /// Chat destinations (e.g. Slack, Discord webhooks).
    Chat,
    /// Mobile/web push notifications.
    Push,
    /// In-app notification feed.
    InApp,
}

impl ChannelType {
    /// Returns the stable text form used in database columns and cache keys.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
            Self::Chat => "chat",
            Self::Push => "push",
            Self::InApp => "in_app",
        }
    }

    /// Whether several integrations on this channel may be active at once.
    ///
    /// Chat and push fan out to multiple destinations, so they are exempt
    /// from the single-active rule that governs the other channels.
    #[must_use]
    pub const fn allows_concurrent_active(&self) -> bool {
        matches!(self, Self::Chat | Self::Push)
    }
}

impl fmt::Display for ChannelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a channel from its text form fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseChannelError {
    /// The text that failed to parse.
    pub value: String,
}

impl fmt::Display for ParseChannelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown channel type: '{}'", self.value)
    }
}

impl std::error::Error for ParseChannelError {}

impl FromStr for ChannelType {
    type Err = ParseChannelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(Self::Email),
            "sms" => Ok(Self::Sms),
            "chat" => Ok(Self::Chat),
            "push" => Ok(Self::Push),
            "in_app" => Ok(Self::InApp),
            other => Err(ParseChannelError {
                value: other.to_string(),
            }),
        }
    }
}
