//! Event dispatcher: routes domain events to topic subscribers.
//!
//! # Event Flow
//!
//! ```text
//! Command handler publishes DomainEvent
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  Serialize once    │
//! │  to EventMessage   │
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  Route to topic(s) │
//! │  (fixed table)     │
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  Snapshot          │
//! │  subscribers       │
//! └────────────────────┘
//!          │
//!          ▼
//! ┌────────────────────┐
//! │  Push to each      │
//! │  session, drop the │
//! │  ones that fail    │
//! └────────────────────┘
//! ```
//!
//! Dispatches to the same topic are serialized, so every subscriber sees
//! a topic's events in publish order. Different topics dispatch in
//! parallel.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use tokio::sync::Mutex;

use crate::domain::events::DomainEvent;
use crate::ports::{ConnectionTransport, EventPublisher, SessionId};

use super::registry::TopicRegistry;
use super::topics::Topic;

/// Outcome of dispatching one event to one topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub topic: Topic,
    pub delivered: usize,
    pub failed: Vec<SessionId>,
}

/// Fans domain events out to subscribed sessions.
pub struct EventDispatcher {
    registry: Arc<TopicRegistry>,
    transport: Arc<dyn ConnectionTransport>,
    topic_locks: Mutex<HashMap<Topic, Arc<Mutex<()>>>>,
}

impl EventDispatcher {
    pub fn new(registry: Arc<TopicRegistry>, transport: Arc<dyn ConnectionTransport>) -> Self {
        Self {
            registry,
            transport,
            topic_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Topics an event is published on.
    pub fn route(event: &DomainEvent) -> Vec<Topic> {
        match event {
            DomainEvent::OrderStatusChanged(_) => vec![Topic::OrderUpdates],
            DomainEvent::SupportResponded(_) | DomainEvent::SupportDeleted(_) => {
                vec![Topic::SupportUpdates]
            }
            DomainEvent::NotificationOpened(_) | DomainEvent::NotificationCreated(_) => {
                vec![Topic::NotificationUpdates]
            }
            DomainEvent::RestaurantChanged(_) => vec![Topic::RestaurantUpdates],
            DomainEvent::MenuChanged(e) => vec![Topic::MenuUpdates(e.change.restaurant_id)],
        }
    }

    /// Pushes the event to every current subscriber of its topics.
    ///
    /// Sessions whose push fails are dropped from the registry and closed.
    /// Never fails; the reports say what happened.
    pub async fn dispatch(&self, event: &DomainEvent) -> Vec<DispatchReport> {
        let payload = match encode(event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!(
                    event_type = %event.event_type(),
                    subject_id = %event.subject_id(),
                    error = %e,
                    "Failed to serialize event, not dispatched"
                );
                return Vec::new();
            }
        };

        let mut reports = Vec::new();
        for topic in Self::route(event) {
            reports.push(self.dispatch_to_topic(topic, payload.clone()).await);
        }
        reports
    }

    async fn dispatch_to_topic(&self, topic: Topic, payload: Arc<str>) -> DispatchReport {
        if self.registry.subscribers_of(&topic).await.is_empty() {
            return DispatchReport {
                topic,
                delivered: 0,
                failed: Vec::new(),
            };
        }

        let lock = self.topic_lock(topic).await;
        let report = {
            let _guard = lock.lock().await;
            // Re-read under the lock so pushes follow publish order.
            let subscribers = self.registry.subscribers_of(&topic).await;
            self.push_all(topic, &subscribers, payload).await
        };
        drop(lock);
        self.release_topic_lock(topic).await;

        tracing::debug!(
            topic = %topic,
            delivered = report.delivered,
            failed = report.failed.len(),
            "Event dispatched"
        );
        report
    }

    async fn push_all(
        &self,
        topic: Topic,
        subscribers: &HashSet<SessionId>,
        payload: Arc<str>,
    ) -> DispatchReport {
        let pushes = subscribers.iter().map(|session_id| {
            let payload = payload.clone();
            async move { (*session_id, self.transport.send(session_id, payload).await) }
        });
        let results = join_all(pushes).await;

        let mut delivered = 0;
        let mut failed = Vec::new();
        for (session_id, result) in results {
            match result {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id,
                        topic = %topic,
                        error = %e,
                        "Push failed, dropping session"
                    );
                    self.registry.drop_session(session_id).await;
                    self.transport.close(&session_id).await;
                    failed.push(session_id);
                }
            }
        }

        DispatchReport {
            topic,
            delivered,
            failed,
        }
    }

    async fn topic_lock(&self, topic: Topic) -> Arc<Mutex<()>> {
        self.topic_locks
            .lock()
            .await
            .entry(topic)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Forgets the topic's lock once no dispatch holds or waits on it.
    async fn release_topic_lock(&self, topic: Topic) {
        let mut locks = self.topic_locks.lock().await;
        if locks
            .get(&topic)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(&topic);
        }
    }

    #[cfg(test)]
    async fn topic_lock_count(&self) -> usize {
        self.topic_locks.lock().await.len()
    }
}

/// Serializes the wire message once for all recipients.
pub(crate) fn encode(event: &DomainEvent) -> Result<Arc<str>, serde_json::Error> {
    let message = event.to_message()?;
    Ok(Arc::from(serde_json::to_string(&message)?))
}

#[async_trait]
impl EventPublisher for EventDispatcher {
    async fn publish(&self, event: DomainEvent) {
        self.dispatch(&event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::websocket::hub::ConnectionHub;
    use crate::domain::catalog::{ChangeKind, MenuChange};
    use crate::domain::events::{MenuChanged, OrderStatusChanged};
    use crate::domain::foundation::{MenuItemId, OrderId, RestaurantId, Timestamp};
    use crate::domain::order::OrderStatus;
    use crate::ports::DeliveryError;
    use std::time::Duration;

    fn order_event(order_id: u64) -> DomainEvent {
        DomainEvent::OrderStatusChanged(OrderStatusChanged {
            order_id: OrderId::new(order_id),
            restaurant_id: RestaurantId::new(1),
            old_status: OrderStatus::New,
            new_status: OrderStatus::InProgress,
            changed_at: Timestamp::now(),
            stats: None,
        })
    }

    fn menu_event(restaurant_id: u64) -> DomainEvent {
        DomainEvent::MenuChanged(MenuChanged {
            change: MenuChange {
                restaurant_id: RestaurantId::new(restaurant_id),
                menu_item_id: MenuItemId::new(1),
                kind: ChangeKind::Created,
                name: None,
            },
            changed_at: Timestamp::now(),
        })
    }

    fn setup() -> (Arc<TopicRegistry>, Arc<ConnectionHub>, EventDispatcher) {
        let registry = Arc::new(TopicRegistry::new());
        let hub = Arc::new(ConnectionHub::new(8, Duration::from_millis(20)));
        let dispatcher = EventDispatcher::new(registry.clone(), hub.clone());
        (registry, hub, dispatcher)
    }

    /// Transport that refuses every push.
    struct RefusingTransport;

    #[async_trait]
    impl ConnectionTransport for RefusingTransport {
        async fn send(&self, session_id: &SessionId, _payload: Arc<str>) -> Result<(), DeliveryError> {
            Err(DeliveryError::Closed(*session_id))
        }

        async fn close(&self, _session_id: &SessionId) {}
    }

    #[test]
    fn routing_table_is_fixed() {
        assert_eq!(EventDispatcher::route(&order_event(1)), vec![Topic::OrderUpdates]);
        assert_eq!(
            EventDispatcher::route(&menu_event(3)),
            vec![Topic::MenuUpdates(RestaurantId::new(3))]
        );
    }

    #[tokio::test]
    async fn subscriber_receives_exactly_one_push() {
        let (registry, hub, dispatcher) = setup();
        let session = SessionId::new();
        let mut rx = hub.register(session).await;
        registry.subscribe(session, Topic::OrderUpdates).await;

        let reports = dispatcher.dispatch(&order_event(7)).await;

        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].delivered, 1);
        let payload = rx.recv().await.unwrap();
        let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(json["type"], "order_status_changed");
        assert_eq!(json["data"]["orderId"], 7);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn topic_without_subscribers_is_noop() {
        let (_, _, dispatcher) = setup();

        let reports = dispatcher.dispatch(&order_event(1)).await;

        assert_eq!(reports[0].delivered, 0);
        assert!(reports[0].failed.is_empty());
    }

    #[tokio::test]
    async fn menu_events_stay_within_their_restaurant() {
        let (registry, hub, dispatcher) = setup();
        let on_three = SessionId::new();
        let on_four = SessionId::new();
        let mut rx_three = hub.register(on_three).await;
        let mut rx_four = hub.register(on_four).await;
        registry
            .subscribe(on_three, Topic::MenuUpdates(RestaurantId::new(3)))
            .await;
        registry
            .subscribe(on_four, Topic::MenuUpdates(RestaurantId::new(4)))
            .await;

        dispatcher.dispatch(&menu_event(3)).await;

        assert!(rx_three.try_recv().is_ok());
        assert!(rx_four.try_recv().is_err());
    }

    #[tokio::test]
    async fn failed_session_is_dropped_and_siblings_still_served() {
        let (registry, hub, dispatcher) = setup();
        let healthy = SessionId::new();
        let gone = SessionId::new();
        let mut rx = hub.register(healthy).await;
        drop(hub.register(gone).await);
        registry.subscribe(healthy, Topic::OrderUpdates).await;
        registry.subscribe(gone, Topic::OrderUpdates).await;
        registry.subscribe(gone, Topic::SupportUpdates).await;

        let reports = dispatcher.dispatch(&order_event(1)).await;

        assert_eq!(reports[0].delivered, 1);
        assert_eq!(reports[0].failed, vec![gone]);
        assert!(rx.try_recv().is_ok());
        assert!(registry.topics_of(gone).await.is_empty());
        assert!(registry.subscribers_of(&Topic::SupportUpdates).await.is_empty());
        assert!(!hub.is_connected(&gone).await);
    }

    #[tokio::test]
    async fn publish_swallows_delivery_failures() {
        let registry = Arc::new(TopicRegistry::new());
        let dispatcher = EventDispatcher::new(registry.clone(), Arc::new(RefusingTransport));
        let session = SessionId::new();
        registry.subscribe(session, Topic::OrderUpdates).await;

        dispatcher.publish(order_event(1)).await;

        assert_eq!(registry.session_count().await, 0);
    }

    #[tokio::test]
    async fn same_topic_events_keep_publish_order() {
        let (registry, hub, dispatcher) = setup();
        let dispatcher = Arc::new(dispatcher);
        let session = SessionId::new();
        let mut rx = hub.register(session).await;
        registry.subscribe(session, Topic::OrderUpdates).await;

        for id in 1..=5 {
            dispatcher.dispatch(&order_event(id)).await;
        }

        for id in 1..=5 {
            let payload = rx.recv().await.unwrap();
            let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
            assert_eq!(json["data"]["orderId"], id);
        }
    }

    #[tokio::test]
    async fn topic_locks_do_not_accumulate() {
        let (registry, hub, dispatcher) = setup();
        for restaurant_id in 1..=200 {
            dispatcher.dispatch(&menu_event(restaurant_id)).await;
        }
        assert_eq!(dispatcher.topic_lock_count().await, 0);

        let session = SessionId::new();
        let mut rx = hub.register(session).await;
        registry
            .subscribe(session, Topic::MenuUpdates(RestaurantId::new(7)))
            .await;
        dispatcher.dispatch(&menu_event(7)).await;

        assert!(rx.try_recv().is_ok());
        assert_eq!(dispatcher.topic_lock_count().await, 0);
    }

    #[tokio::test]
    async fn stalled_subscriber_is_abandoned_after_push_timeout() {
        let registry = Arc::new(TopicRegistry::new());
        let push_timeout = Duration::from_millis(50);
        let hub = Arc::new(ConnectionHub::new(1, push_timeout));
        let dispatcher = EventDispatcher::new(registry.clone(), hub.clone());
        let stalled = SessionId::new();
        let healthy = SessionId::new();
        let _stalled_rx = hub.register(stalled).await;
        let mut healthy_rx = hub.register(healthy).await;
        hub.send(&stalled, Arc::from("backlog")).await.unwrap();
        registry.subscribe(stalled, Topic::OrderUpdates).await;
        registry.subscribe(healthy, Topic::OrderUpdates).await;

        let started = tokio::time::Instant::now();
        let reports = dispatcher.dispatch(&order_event(1)).await;
        let elapsed = started.elapsed();

        assert_eq!(reports[0].delivered, 1);
        assert_eq!(reports[0].failed, vec![stalled]);
        assert!(healthy_rx.try_recv().is_ok());
        assert!(elapsed >= push_timeout);
        assert!(elapsed < Duration::from_secs(1));
        assert!(!hub.is_connected(&stalled).await);
        assert!(registry.topics_of(stalled).await.is_empty());
    }

    /// Hub wrapper that yields a session-specific number of times before
    /// each push, so unserialized pushes would interleave differently per
    /// session.
    struct YieldingTransport {
        hub: Arc<ConnectionHub>,
        slow: SessionId,
    }

    #[async_trait]
    impl ConnectionTransport for YieldingTransport {
        async fn send(&self, session_id: &SessionId, payload: Arc<str>) -> Result<(), DeliveryError> {
            let yields = if *session_id == self.slow { 5 } else { 1 };
            for _ in 0..yields {
                tokio::task::yield_now().await;
            }
            self.hub.send(session_id, payload).await
        }

        async fn close(&self, session_id: &SessionId) {
            self.hub.close(session_id).await;
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn overlapping_dispatches_reach_every_session_in_one_order() {
        let registry = Arc::new(TopicRegistry::new());
        let hub = Arc::new(ConnectionHub::new(64, Duration::from_secs(1)));
        let fast = SessionId::new();
        let slow = SessionId::new();
        let mut fast_rx = hub.register(fast).await;
        let mut slow_rx = hub.register(slow).await;
        registry.subscribe(fast, Topic::OrderUpdates).await;
        registry.subscribe(slow, Topic::OrderUpdates).await;
        let transport = Arc::new(YieldingTransport {
            hub: hub.clone(),
            slow,
        });
        let dispatcher = Arc::new(EventDispatcher::new(registry.clone(), transport));

        let tasks: Vec<_> = (1..=20)
            .map(|id| {
                let dispatcher = dispatcher.clone();
                tokio::spawn(async move { dispatcher.dispatch(&order_event(id)).await })
            })
            .collect();
        for task in tasks {
            assert_eq!(task.await.unwrap()[0].delivered, 2);
        }

        let order_ids = |rx: &mut crate::adapters::websocket::hub::Outbound| {
            let mut ids = Vec::new();
            while let Ok(payload) = rx.try_recv() {
                let json: serde_json::Value = serde_json::from_str(&payload).unwrap();
                ids.push(json["data"]["orderId"].as_u64().unwrap());
            }
            ids
        };
        let seen_fast = order_ids(&mut fast_rx);
        let seen_slow = order_ids(&mut slow_rx);

        assert_eq!(seen_fast, seen_slow);
        let mut sorted = seen_fast.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=20).collect::<Vec<u64>>());
        assert_eq!(dispatcher.topic_lock_count().await, 0);
    }
}
