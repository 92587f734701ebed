//! Topic naming.
//!
//! Both sides of the subscription derive the same topic from a kind and,
//! for per-restaurant menu topics, a restaurant id. The string form is
//! what clients see in `subscribed`/`unsubscribed` frames:
//!
//! ```text
//! order-updates
//! support-updates
//! notification-updates
//! restaurant-updates
//! menu-updates:<restaurantId>
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::application::errors::CommandError;
use crate::domain::foundation::RestaurantId;

const ORDER_UPDATES: &str = "order-updates";
const SUPPORT_UPDATES: &str = "support-updates";
const NOTIFICATION_UPDATES: &str = "notification-updates";
const RESTAURANT_UPDATES: &str = "restaurant-updates";
const MENU_UPDATES: &str = "menu-updates";

/// The class of topic a client asks to join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TopicKind {
    #[serde(rename = "order-updates")]
    Order,
    #[serde(rename = "support-updates")]
    Support,
    #[serde(rename = "notification-updates")]
    Notification,
    #[serde(rename = "restaurant-updates")]
    Restaurant,
    #[serde(rename = "menu-updates")]
    Menu,
}

impl TopicKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TopicKind::Order => ORDER_UPDATES,
            TopicKind::Support => SUPPORT_UPDATES,
            TopicKind::Notification => NOTIFICATION_UPDATES,
            TopicKind::Restaurant => RESTAURANT_UPDATES,
            TopicKind::Menu => MENU_UPDATES,
        }
    }
}

impl fmt::Display for TopicKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete topic sessions subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    OrderUpdates,
    SupportUpdates,
    NotificationUpdates,
    RestaurantUpdates,
    MenuUpdates(RestaurantId),
}

/// Reasons a topic could not be built from client input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TopicError {
    #[error("Unknown topic '{0}'")]
    Unknown(String),

    #[error("Topic 'menu-updates' requires a restaurant id")]
    MissingRestaurantId,

    #[error("Invalid restaurant id '{0}'")]
    InvalidRestaurantId(String),
}

impl From<TopicError> for CommandError {
    fn from(err: TopicError) -> Self {
        let field = match err {
            TopicError::Unknown(_) => "topic",
            TopicError::MissingRestaurantId | TopicError::InvalidRestaurantId(_) => {
                "restaurantId"
            }
        };
        CommandError::invalid_argument(field, err.to_string())
    }
}

impl Topic {
    /// Builds the topic for `kind`. Only `Menu` uses the restaurant id;
    /// the other kinds ignore it.
    pub fn from_kind(kind: TopicKind, restaurant_id: Option<RestaurantId>) -> Result<Self, TopicError> {
        Ok(match kind {
            TopicKind::Order => Topic::OrderUpdates,
            TopicKind::Support => Topic::SupportUpdates,
            TopicKind::Notification => Topic::NotificationUpdates,
            TopicKind::Restaurant => Topic::RestaurantUpdates,
            TopicKind::Menu => {
                Topic::MenuUpdates(restaurant_id.ok_or(TopicError::MissingRestaurantId)?)
            }
        })
    }

    pub fn kind(&self) -> TopicKind {
        match self {
            Topic::OrderUpdates => TopicKind::Order,
            Topic::SupportUpdates => TopicKind::Support,
            Topic::NotificationUpdates => TopicKind::Notification,
            Topic::RestaurantUpdates => TopicKind::Restaurant,
            Topic::MenuUpdates(_) => TopicKind::Menu,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::MenuUpdates(restaurant_id) => write!(f, "{}:{}", MENU_UPDATES, restaurant_id),
            other => f.write_str(other.kind().as_str()),
        }
    }
}

impl FromStr for Topic {
    type Err = TopicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.split_once(':') {
            Some((MENU_UPDATES, id)) => id
                .parse::<RestaurantId>()
                .map(Topic::MenuUpdates)
                .map_err(|_| TopicError::InvalidRestaurantId(id.to_string())),
            Some(_) => Err(TopicError::Unknown(s.to_string())),
            None => match s {
                ORDER_UPDATES => Ok(Topic::OrderUpdates),
                SUPPORT_UPDATES => Ok(Topic::SupportUpdates),
                NOTIFICATION_UPDATES => Ok(Topic::NotificationUpdates),
                RESTAURANT_UPDATES => Ok(Topic::RestaurantUpdates),
                MENU_UPDATES => Err(TopicError::MissingRestaurantId),
                _ => Err(TopicError::Unknown(s.to_string())),
            },
        }
    }
}
