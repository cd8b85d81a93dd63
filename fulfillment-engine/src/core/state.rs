//! Engine wiring
//!
//! [`Engine`] assembles the fulfillment services around a record store
//! adapter and a notifier. It holds no domain state of its own: every
//! operation reads current records through the adapter and returns its
//! outputs explicitly.

use std::sync::Arc;

use crate::core::EngineConfig;
use crate::fulfillment::{
    CommunicationLog, DeliveryService, LifecycleController, StockMatcher, StockService,
};
use crate::services::{NotificationService, Notifier, NullNotifier, StoreNotifier};
use crate::store::RecordStore;

/// Wired fulfillment engine
pub struct Engine {
    pub orders: LifecycleController,
    pub matcher: StockMatcher,
    pub stock: StockService,
    pub delivery: DeliveryService,
    pub communications: CommunicationLog,
    pub notifications: NotificationService,
}

impl Engine {
    /// Wire the engine against a record store using the given config.
    ///
    /// With `notifications_enabled` the notifier persists through the same
    /// record store; otherwise events fan out to a no-op sink.
    pub fn new(store: Arc<dyn RecordStore>, config: &EngineConfig) -> Self {
        let notifier: Arc<dyn Notifier> = if config.notifications_enabled {
            Arc::new(StoreNotifier::new(store.clone()))
        } else {
            Arc::new(NullNotifier)
        };
        Self::with_notifier(store, notifier, config)
    }

    /// Wire the engine with an explicit notifier implementation.
    pub fn with_notifier(
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn Notifier>,
        config: &EngineConfig,
    ) -> Self {
        tracing::debug!(
            environment = %config.environment,
            notifications = config.notifications_enabled,
            "wiring fulfillment engine"
        );

        Self {
            orders: LifecycleController::new(
                store.clone(),
                notifier.clone(),
                config.order_number_prefix.clone(),
            ),
            matcher: StockMatcher::new(store.clone(), notifier.clone()),
            stock: StockService::new(store.clone()),
            delivery: DeliveryService::new(store.clone(), notifier),
            communications: CommunicationLog::new(store.clone()),
            notifications: NotificationService::new(store),
        }
    }
}
