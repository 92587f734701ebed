//! Topic registry: which sessions are subscribed to which topics.
//!
//! # Architecture
//!
//! ```text
//! Topic: order-updates       Topic: menu-updates:3
//! ├── session-a              ├── session-a
//! └── session-b              └── session-c
//! ```
//!
//! A reverse index (session → topics) makes `drop_session` independent of
//! the number of topics. Both indexes live behind one lock so they never
//! disagree.

use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;

use crate::ports::SessionId;

use super::topics::Topic;

#[derive(Default)]
struct RegistryState {
    topics: HashMap<Topic, HashSet<SessionId>>,
    sessions: HashMap<SessionId, HashSet<Topic>>,
}

/// Tracks topic subscriptions of live sessions.
///
/// # Thread Safety
///
/// Uses a single `RwLock`: dispatch reads vastly outnumber subscription
/// changes. Readers receive owned snapshots, never a view into the map.
#[derive(Default)]
pub struct TopicRegistry {
    state: RwLock<RegistryState>,
}

impl TopicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a connected session with no subscriptions.
    pub async fn add_session(&self, session_id: SessionId) {
        self.state
            .write()
            .await
            .sessions
            .entry(session_id)
            .or_default();
    }

    /// Adds the session to the topic. Returns `false` if it was already
    /// subscribed.
    pub async fn subscribe(&self, session_id: SessionId, topic: Topic) -> bool {
        let mut state = self.state.write().await;
        state.sessions.entry(session_id).or_default().insert(topic);
        state.topics.entry(topic).or_default().insert(session_id)
    }

    /// Removes the session from the topic. Returns `false` if it was not
    /// subscribed.
    pub async fn unsubscribe(&self, session_id: SessionId, topic: Topic) -> bool {
        let mut state = self.state.write().await;
        if let Some(topics) = state.sessions.get_mut(&session_id) {
            topics.remove(&topic);
        }
        remove_subscriber(&mut state.topics, &topic, &session_id)
    }

    /// Forgets the session entirely, returning the topics it was on.
    pub async fn drop_session(&self, session_id: SessionId) -> Vec<Topic> {
        let mut state = self.state.write().await;
        let topics: Vec<Topic> = state
            .sessions
            .remove(&session_id)
            .map(|t| t.into_iter().collect())
            .unwrap_or_default();
        for topic in &topics {
            remove_subscriber(&mut state.topics, topic, &session_id);
        }
        topics
    }

    /// Snapshot of the topic's subscribers. Empty for a topic nobody has
    /// joined.
    pub async fn subscribers_of(&self, topic: &Topic) -> HashSet<SessionId> {
        self.state
            .read()
            .await
            .topics
            .get(topic)
            .cloned()
            .unwrap_or_default()
    }

    /// Topics with at least one subscriber.
    pub async fn topics(&self) -> Vec<Topic> {
        self.state.read().await.topics.keys().copied().collect()
    }

    /// Topics the session is subscribed to.
    pub async fn topics_of(&self, session_id: SessionId) -> HashSet<Topic> {
        self.state
            .read()
            .await
            .sessions
            .get(&session_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of known sessions, subscribed or not.
    pub async fn session_count(&self) -> usize {
        self.state.read().await.sessions.len()
    }
}

/// Removes one subscriber and garbage-collects the topic once empty.
fn remove_subscriber(
    topics: &mut HashMap<Topic, HashSet<SessionId>>,
    topic: &Topic,
    session_id: &SessionId,
) -> bool {
    let Some(subscribers) = topics.get_mut(topic) else {
        return false;
    };
    let removed = subscribers.remove(session_id);
    if subscribers.is_empty() {
        topics.remove(topic);
    }
    removed
}
