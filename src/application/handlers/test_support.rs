//! Mock ports shared by handler tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use crate::domain::events::DomainEvent;
use crate::domain::foundation::{
    DomainError, ErrorCode, NotificationId, OrderId, TicketId, Timestamp,
};
use crate::domain::notification::{Notification, NotificationDraft};
use crate::domain::order::{Order, OrderStatus};
use crate::domain::stats::NotificationTally;
use crate::domain::support::{SupportTicket, TicketStatus};
use crate::ports::{
    EventPublisher, NotificationRepository, OrderRepository, StatisticsReader,
    SupportTicketRepository, TicketStatusChange,
};

// ════════════════════════════════════════════════════════════════════════════
// Mock store
// ════════════════════════════════════════════════════════════════════════════

/// One mock backing every storage port, with switches for failure modes.
#[derive(Default)]
pub struct MockStore {
    orders: Mutex<HashMap<OrderId, Order>>,
    tickets: Mutex<HashMap<TicketId, SupportTicket>>,
    notifications: Mutex<Vec<Notification>>,
    fail_storage: AtomicBool,
    fail_stats: AtomicBool,
    conflict_on_write: AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_order(&self, order: Order) {
        self.orders.lock().unwrap().insert(order.id, order);
    }

    pub fn put_ticket(&self, ticket: SupportTicket) {
        self.tickets.lock().unwrap().insert(ticket.id, ticket);
    }

    pub fn put_notification(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }

    pub fn order(&self, id: OrderId) -> Option<Order> {
        self.orders.lock().unwrap().get(&id).cloned()
    }

    pub fn ticket(&self, id: TicketId) -> Option<SupportTicket> {
        self.tickets.lock().unwrap().get(&id).cloned()
    }

    pub fn notification(&self, id: NotificationId) -> Option<Notification> {
        self.notifications
            .lock()
            .unwrap()
            .iter()
            .find(|n| n.id == id)
            .cloned()
    }

    pub fn fail_storage(&self, fail: bool) {
        self.fail_storage.store(fail, Ordering::SeqCst);
    }

    pub fn fail_stats(&self, fail: bool) {
        self.fail_stats.store(fail, Ordering::SeqCst);
    }

    /// Makes every compare-and-set write lose to a simulated concurrent writer.
    pub fn conflict_on_write(&self, conflict: bool) {
        self.conflict_on_write.store(conflict, Ordering::SeqCst);
    }

    fn check_storage(&self) -> Result<(), DomainError> {
        if self.fail_storage.load(Ordering::SeqCst) {
            return Err(DomainError::unavailable("mock storage offline"));
        }
        Ok(())
    }

    fn check_stats(&self) -> Result<(), DomainError> {
        if self.fail_stats.load(Ordering::SeqCst) {
            return Err(DomainError::unavailable("mock stats offline"));
        }
        Ok(())
    }

    fn check_conflict(&self) -> Result<(), DomainError> {
        if self.conflict_on_write.load(Ordering::SeqCst) {
            return Err(DomainError::conflict("changed by another writer"));
        }
        Ok(())
    }
}

fn not_found(code: ErrorCode, id: impl ToString) -> DomainError {
    DomainError::new(code, "not found").with_detail("id", id.to_string())
}

#[async_trait]
impl OrderRepository for MockStore {
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>, DomainError> {
        self.check_storage()?;
        Ok(self.order(id))
    }

    async fn set_order_status(
        &self,
        id: OrderId,
        expected: OrderStatus,
        status: OrderStatus,
        at: Timestamp,
    ) -> Result<Order, DomainError> {
        self.check_storage()?;
        self.check_conflict()?;
        let mut orders = self.orders.lock().unwrap();
        let order = orders
            .get_mut(&id)
            .ok_or_else(|| not_found(ErrorCode::OrderNotFound, id))?;
        if order.status != expected {
            return Err(DomainError::conflict("status changed"));
        }
        order.status = status;
        order.updated_at = at;
        Ok(order.clone())
    }
}

#[async_trait]
impl SupportTicketRepository for MockStore {
    async fn get_ticket(&self, id: TicketId) -> Result<Option<SupportTicket>, DomainError> {
        self.check_storage()?;
        Ok(self.ticket(id))
    }

    async fn set_ticket_response(
        &self,
        id: TicketId,
        expected: TicketStatus,
        text: &str,
        at: Timestamp,
    ) -> Result<SupportTicket, DomainError> {
        self.check_storage()?;
        self.check_conflict()?;
        let mut tickets = self.tickets.lock().unwrap();
        let ticket = tickets
            .get_mut(&id)
            .ok_or_else(|| not_found(ErrorCode::TicketNotFound, id))?;
        if ticket.status != expected {
            return Err(DomainError::conflict("status changed"));
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
        self.check_storage()?;
        let mut tickets = self.tickets.lock().unwrap();
        let ticket = tickets
            .get_mut(&id)
            .ok_or_else(|| not_found(ErrorCode::TicketNotFound, id))?;
        let previous_status = ticket.status;
        ticket.status = status;
        Ok(TicketStatusChange {
            ticket: ticket.clone(),
            previous_status,
        })
    }
}

#[async_trait]
impl NotificationRepository for MockStore {
    async fn get_notification(
        &self,
        id: NotificationId,
    ) -> Result<Option<Notification>, DomainError> {
        self.check_storage()?;
        Ok(self.notification(id))
    }

    async fn create_notification(
        &self,
        draft: NotificationDraft,
    ) -> Result<Notification, DomainError> {
        self.check_storage()?;
        let mut notifications = self.notifications.lock().unwrap();
        let id = NotificationId::new(notifications.len() as u64 + 1);
        let notification = draft.into_notification(id, Timestamp::now());
        notifications.push(notification.clone());
        Ok(notification)
    }

    async fn increment_notification_open(
        &self,
        id: NotificationId,
    ) -> Result<Notification, DomainError> {
        self.check_storage()?;
        let mut notifications = self.notifications.lock().unwrap();
        let notification = notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| not_found(ErrorCode::NotificationNotFound, id))?;
        *notification = notification.opened();
        Ok(notification.clone())
    }
}

#[async_trait]
impl StatisticsReader for MockStore {
    async fn order_statuses(&self) -> Result<Vec<OrderStatus>, DomainError> {
        self.check_stats()?;
        Ok(self.orders.lock().unwrap().values().map(|o| o.status).collect())
    }

    async fn ticket_statuses(&self) -> Result<Vec<TicketStatus>, DomainError> {
        self.check_stats()?;
        Ok(self.tickets.lock().unwrap().values().map(|t| t.status).collect())
    }

    async fn notification_tallies(&self) -> Result<Vec<NotificationTally>, DomainError> {
        self.check_stats()?;
        Ok(self
            .notifications
            .lock()
            .unwrap()
            .iter()
            .map(|n| NotificationTally {
                total_sent: n.total_sent,
                open_count: n.open_count,
                created_at: n.created_at,
            })
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Mock publisher
// ════════════════════════════════════════════════════════════════════════════

/// Records every published event, in the order the publishes finish.
#[derive(Default)]
pub struct MockEventPublisher {
    events: Mutex<Vec<DomainEvent>>,
    first_delay: Mutex<Option<Duration>>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next publish stall for `delay` before it is recorded.
    pub fn delay_first_publish(&self, delay: Duration) {
        *self.first_delay.lock().unwrap() = Some(delay);
    }

    pub fn published_events(&self) -> Vec<DomainEvent> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: DomainEvent) {
        let delay = self.first_delay.lock().unwrap().take();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.events.lock().unwrap().push(event);
    }
}
