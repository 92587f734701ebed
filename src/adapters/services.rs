//! Composition root for the in-process deployment.
//!
//! Wires the in-memory store, the topic registry, the connection hub and
//! the dispatcher into the command handlers, so the host application and
//! the binary share one set of collaborators.

use std::sync::Arc;

use crate::application::{
    ApplyOrderStatusHandler, CatalogChangeHandler, CreateNotificationHandler,
    DeleteTicketHandler, RecordNotificationOpenHandler, RespondToTicketHandler,
    StatisticsAggregator,
};
use crate::config::RealtimeConfig;
use crate::ports::EventPublisher;

use super::memory::InMemoryStore;
use super::websocket::{ConnectionHub, EventDispatcher, RealtimeState, SessionGateway, TopicRegistry};

/// Every collaborator of the live channel, built once at startup.
#[derive(Clone)]
pub struct RealtimeServices {
    pub store: Arc<InMemoryStore>,
    pub registry: Arc<TopicRegistry>,
    pub hub: Arc<ConnectionHub>,
    pub dispatcher: Arc<EventDispatcher>,
    pub gateway: Arc<SessionGateway>,
    pub stats: Arc<StatisticsAggregator>,
    pub apply_order_status: Arc<ApplyOrderStatusHandler>,
    pub respond_to_ticket: Arc<RespondToTicketHandler>,
    pub delete_ticket: Arc<DeleteTicketHandler>,
    pub record_notification_open: Arc<RecordNotificationOpenHandler>,
    pub create_notification: Arc<CreateNotificationHandler>,
    pub catalog: Arc<CatalogChangeHandler>,
    realtime_config: RealtimeConfig,
}

impl RealtimeServices {
    /// Builds the graph on top of a fresh [`InMemoryStore`].
    pub fn in_memory(config: &RealtimeConfig) -> Self {
        Self::with_store(Arc::new(InMemoryStore::new()), config)
    }

    /// Builds the graph on top of an existing store.
    pub fn with_store(store: Arc<InMemoryStore>, config: &RealtimeConfig) -> Self {
        let registry = Arc::new(TopicRegistry::new());
        let hub = Arc::new(ConnectionHub::from_config(config));
        let dispatcher = Arc::new(EventDispatcher::new(registry.clone(), hub.clone()));
        let gateway = Arc::new(SessionGateway::new(registry.clone(), hub.clone()));
        let stats = Arc::new(StatisticsAggregator::new(
            store.clone(),
            config.new_notification_window_days,
        ));
        let publisher: Arc<dyn EventPublisher> = dispatcher.clone();

        Self {
            apply_order_status: Arc::new(ApplyOrderStatusHandler::new(
                store.clone(),
                stats.clone(),
                publisher.clone(),
            )),
            respond_to_ticket: Arc::new(RespondToTicketHandler::new(
                store.clone(),
                stats.clone(),
                publisher.clone(),
            )),
            delete_ticket: Arc::new(DeleteTicketHandler::new(
                store.clone(),
                stats.clone(),
                publisher.clone(),
            )),
            record_notification_open: Arc::new(RecordNotificationOpenHandler::new(
                store.clone(),
                stats.clone(),
                publisher.clone(),
            )),
            create_notification: Arc::new(CreateNotificationHandler::new(
                store.clone(),
                stats.clone(),
                publisher.clone(),
            )),
            catalog: Arc::new(CatalogChangeHandler::new(publisher)),
            store,
            registry,
            hub,
            dispatcher,
            gateway,
            stats,
            realtime_config: config.clone(),
        }
    }

    /// State for the WebSocket router.
    pub fn realtime_state(&self) -> RealtimeState {
        RealtimeState::new(self.gateway.clone(), &self.realtime_config)
    }
}
