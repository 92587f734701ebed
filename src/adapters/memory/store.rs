//! In-memory storage for orders, tickets and notifications.
//!
//! Backs every storage port with a single `tokio::sync::RwLock`, so each
//! write is atomic and each statistics read sees one consistent snapshot.
//! Used by the standalone server and by integration tests.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, NotificationId, OrderId, TicketId, Timestamp,
};
use crate::domain::notification::{Notification, NotificationDraft};
use crate::domain::order::{Order, OrderStatus};
use crate::domain::stats::NotificationTally;
use crate::domain::support::{SupportTicket, TicketStatus};
use crate::ports::{
    NotificationRepository, OrderRepository, StatisticsReader, SupportTicketRepository,
    TicketStatusChange,
};

#[derive(Default)]
struct StoreState {
    orders: HashMap<OrderId, Order>,
    tickets: HashMap<TicketId, SupportTicket>,
    notifications: BTreeMap<NotificationId, Notification>,
}

impl StoreState {
    fn next_notification_id(&self) -> NotificationId {
        let last = self
            .notifications
            .keys()
            .next_back()
            .map(|id| id.value())
            .unwrap_or(0);
        NotificationId::new(last + 1)
    }
}

/// In-memory implementation of the storage ports.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryStore::new());
/// store.insert_order(order).await;
/// let handler = ApplyOrderStatusHandler::new(store.clone(), stats, publisher);
/// ```
pub struct InMemoryStore {
    state: RwLock<StoreState>,
    available: AtomicBool,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            available: AtomicBool::new(true),
        }
    }

    // === Seeding ===

    pub async fn insert_order(&self, order: Order) {
        self.state.write().await.orders.insert(order.id, order);
    }

    pub async fn insert_ticket(&self, ticket: SupportTicket) {
        self.state.write().await.tickets.insert(ticket.id, ticket);
    }

    pub async fn insert_notification(&self, notification: Notification) {
        self.state
            .write()
            .await
            .notifications
            .insert(notification.id, notification);
    }

    /// Simulates losing (or regaining) the backing store. While
    /// unavailable every port call fails with `StorageUnavailable`.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn ensure_available(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::unavailable("in-memory store is offline"))
        }
    }
}

fn not_found(code: ErrorCode, entity: &str, id: impl ToString) -> DomainError {
    let id = id.to_string();
    DomainError::new(code, format!("{} {} not found", entity, id)).with_detail("id", id)
}

fn stale(entity: &str, id: impl ToString, expected: impl ToString, actual: impl ToString) -> DomainError {
    DomainError::conflict(format!(
        "{} {} is {}, expected {}",
        entity,
        id.to_string(),
        actual.to_string(),
        expected.to_string()
    ))
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        self.ensure_available()?;
        Ok(self.state.read().await.orders.get(&id).cloned())
    }

    async fn set_order_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        status: OrderStatus,
        at: Timestamp,
    ) -> Result<Order, DomainError> {
        self.ensure_available()?;
        let mut state = self.state.write().await;
        let order = state
            .orders
            .get_mut(&id)
            .ok_or_else(|| not_found(ErrorCode::OrderNotFound, "Order", id))?;
        if order.status != expected {
            return Err(stale("Order", id, expected, order.status));
        }
        order.status = status;
        order.updated_at = at;
        Ok(order.clone())
    }
}

#[async_trait]
impl SupportTicketRepository for InMemoryStore {
    async fn get_ticket(&self, id: TicketId) -> Result<Option<SupportTicket>, DomainError> {
        self.ensure_available()?;
        Ok(self.state.read().await.tickets.get(&id).cloned())
    }

    async fn set_ticket_response(
        &self,
        id: TicketId,
        expected: TicketStatus,
        text: &str,
        at: Timestamp,
    ) -> Result<SupportTicket, DomainError> {
        self.ensure_available()?;
        let mut state = self.state.write().await;
        let ticket = state
            .tickets
            .get_mut(&id)
            .ok_or_else(|| not_found(ErrorCode::TicketNotFound, "Ticket", id))?;
        if ticket.status != expected {
            return Err(stale("Ticket", id, expected, ticket.status));
        }
        ticket.status = TicketStatus::Responded;
        ticket.response = Some(text.to_string());
        ticket.responded_at = Some(at);
        Ok(ticket.clone())
    }

    async fn set_ticket_status(
        &self,
        id: TicketId,
        status: TicketStatus,
    ) -> Result<TicketStatusChange, DomainError> {
        self.ensure_available()?;
        let mut state = self.state.write().await;
        let ticket = state
            .tickets
            .get_mut(&id)
            .ok_or_else(|| not_found(ErrorCode::TicketNotFound, "Ticket", id))?;
        let previous_status = ticket.status;
        let updated = match status {
            TicketStatus::Deleted => ticket.deleted(),
            other => SupportTicket {
                status: other,
                ..ticket.clone()
            },
        };
        if !updated.is_consistent() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Ticket {} cannot become {} without a response", id, status),
            ));
        }
        *ticket = updated;
        Ok(TicketStatusChange {
            ticket: ticket.clone(),
            previous_status,
        })
    }
}

#[async_trait]
impl NotificationRepository for InMemoryStore {
    async fn get_notification(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, DomainError> {
        self.ensure_available()?;
        Ok(self.state.read().await.notifications.get(&id).cloned())
    }

    async fn create_notification(
        &self,
        draft: NotificationDraft,
    ) -> Result<Notification, DomainError> {
        self.ensure_available()?;
        let mut state = self.state.write().await;
        let id = state.next_notification_id();
        let notification = draft.into_notification(id, Timestamp::now());
        state.notifications.insert(id, notification.clone());
        Ok(notification)
    }

    async fn increment_notification_open(
        &self,
        id: NotificationId,
    ) -> Result<Notification, DomainError> {
        self.ensure_available()?;
        let mut state = self.state.write().await;
        let notification = state
            .notifications
            .get_mut(&id)
            .ok_or_else(|| not_found(ErrorCode::NotificationNotFound, "Notification", id))?;
        *notification = notification.opened();
        Ok(notification.clone())
    }
}

#[async_trait]
impl StatisticsReader for InMemoryStore {
    async fn order_statuses(&self) -> Result<Vec<OrderStatus>, DomainError> {
        self.ensure_available()?;
        let state = self.state.read().await;
        Ok(state.orders.values().map(|o| o.status).collect())
    }

    async fn ticket_statuses(&self) -> Result<Vec<TicketStatus>, DomainError> {
        self.ensure_available()?;
        let state = self.state.read().await;
        Ok(state.tickets.values().map(|t| t.status).collect())
    }

    async fn notification_tallies(&self) -> Result<Vec<NotificationTally>, DomainError> {
        self.ensure_available()?;
        let state = self.state.read().await;
        Ok(state
            .notifications
            .values()
            .map(|n| NotificationTally {
                total_sent: n.total_sent,
                open_count: n.open_count,
                created_at: n.created_at,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CustomerId, RestaurantId};
    use crate::domain::notification::Recipient;
    use std::sync::Arc;

    fn order(id: u64) -> Order {
        Order::new(OrderId::new(id), CustomerId::new(1), RestaurantId::new(3))
    }

    fn draft(total_sent: u32) -> NotificationDraft {
        NotificationDraft::new("Lunch", "Half price until 2pm", Recipient::All, total_sent)
            .unwrap()
    }

    #[tokio::test]
    async fn compare_and_set_rejects_stale_expected_status() {
        let store = InMemoryStore::new();
        store.insert_order(order(7)).await;
        let at = Timestamp::now();

        store
            .set_order_status(OrderId::new(7), OrderStatus::New, OrderStatus::InProgress, at)
            .await
            .unwrap();
        let err = store
            .set_order_status(OrderId::new(7), OrderStatus::New, OrderStatus::Canceled, at)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::Conflict);
        let stored = store.get_order(OrderId::new(7)).await.unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::InProgress);
    }

    #[tokio::test]
    async fn missing_order_reports_not_found_with_id() {
        let store = InMemoryStore::new();

        let err = store
            .set_order_status(
                OrderId::new(8),
                OrderStatus::New,
                OrderStatus::InProgress,
                Timestamp::now(),
            )
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::OrderNotFound);
        assert_eq!(err.details.get("id").map(String::as_str), Some("8"));
    }

    #[tokio::test]
    async fn notification_ids_are_sequential() {
        let store = InMemoryStore::new();

        let first = store.create_notification(draft(1)).await.unwrap();
        let second = store.create_notification(draft(1)).await.unwrap();

        assert_eq!(first.id, NotificationId::new(1));
        assert_eq!(second.id, NotificationId::new(2));
    }

    #[tokio::test]
    async fn concurrent_opens_never_exceed_total_sent() {
        let store = Arc::new(InMemoryStore::new());
        let id = store.create_notification(draft(5)).await.unwrap().id;

        let mut tasks = Vec::new();
        for _ in 0..20 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store.increment_notification_open(id).await
            }));
        }
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        let stored = store.get_notification(id).await.unwrap().unwrap();
        assert_eq!(stored.open_count, 5);
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = InMemoryStore::new();
        store.insert_order(order(1)).await;
        store.set_available(false);

        let err = store.get_order(OrderId::new(1)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StorageUnavailable);
        assert!(store.order_statuses().await.is_err());

        store.set_available(true);
        assert!(store.get_order(OrderId::new(1)).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn snapshot_includes_deleted_tickets() {
        let store = InMemoryStore::new();
        let ticket = SupportTicket::open(TicketId::new(1), CustomerId::new(1), None, "cold food");
        store.insert_ticket(ticket).await;
        store
            .set_ticket_status(TicketId::new(1), TicketStatus::Deleted)
            .await
            .unwrap();

        let statuses = store.ticket_statuses().await.unwrap();
        assert_eq!(statuses, vec![TicketStatus::Deleted]);
    }

    #[tokio::test]
    async fn status_write_reports_the_status_it_replaced() {
        let store = InMemoryStore::new();
        let ticket = SupportTicket::open(TicketId::new(1), CustomerId::new(1), None, "cold food");
        store.insert_ticket(ticket).await;
        store
            .set_ticket_response(TicketId::new(1), TicketStatus::Pending, "Refund issued", Timestamp::now())
            .await
            .unwrap();

        let change = store
            .set_ticket_status(TicketId::new(1), TicketStatus::Deleted)
            .await
            .unwrap();

        assert_eq!(change.previous_status, TicketStatus::Responded);
        assert_eq!(change.ticket.status, TicketStatus::Deleted);
        assert_eq!(change.ticket.response.as_deref(), Some("Refund issued"));
    }

    #[tokio::test]
    async fn status_write_cannot_answer_without_a_response() {
        let store = InMemoryStore::new();
        let ticket = SupportTicket::open(TicketId::new(1), CustomerId::new(1), None, "cold food");
        store.insert_ticket(ticket).await;

        let err = store
            .set_ticket_status(TicketId::new(1), TicketStatus::Responded)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        let stored = store.get_ticket(TicketId::new(1)).await.unwrap().unwrap();
        assert_eq!(stored.status, TicketStatus::Pending);
    }
}
