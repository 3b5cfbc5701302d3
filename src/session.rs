//! Session context: one live channel plus one view model, constructed
//! once and torn down explicitly. The event loop here is the single
//! writer of view state; channel events are applied strictly in arrival
//! order.

use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

use crate::channel::{ChannelEvent, ChannelHandle, ChannelManager};
use crate::models::ConnectionStatus;
use crate::view::ShelfViewModel;

pub struct Session {
    view: Arc<ShelfViewModel>,
    channel: ChannelHandle,
    events: mpsc::UnboundedReceiver<ChannelEvent>,
}

impl Session {
    /// Open the channel and bind it to a fresh view model. Connection
    /// establishment is asynchronous; failures arrive as channel events.
    pub fn create(endpoint: String) -> Self {
        let view = ShelfViewModel::new();
        let (channel, events) = ChannelManager::open(endpoint);
        view.on_connection_status_changed(ConnectionStatus::Connecting);
        Self {
            view,
            channel,
            events,
        }
    }

    pub fn view(&self) -> Arc<ShelfViewModel> {
        self.view.clone()
    }

    /// Drain channel events into the view model until the channel closes
    /// or errors. Returns the terminal status.
    pub async fn run(&mut self) -> ConnectionStatus {
        while let Some(event) = self.events.recv().await {
            apply_channel_event(&self.view, event);
            let status = self.view.current().connection_status;
            if matches!(status, ConnectionStatus::Closed | ConnectionStatus::Errored) {
                return status;
            }
        }
        // Producer dropped without a close frame; treat as closed.
        self.view.on_connection_status_changed(ConnectionStatus::Closed);
        ConnectionStatus::Closed
    }

    /// Tear the session down, closing the channel.
    pub fn teardown(self) {
        info!("session teardown, closing shelf-state channel");
        self.channel.close();
    }
}

/// Apply one channel event to the view model.
pub fn apply_channel_event(view: &ShelfViewModel, event: ChannelEvent) {
    match event {
        ChannelEvent::Connected => {
            view.on_connection_status_changed(ConnectionStatus::Connected);
        }
        ChannelEvent::Message(payload) => {
            view.on_snapshot_received(&payload);
        }
        ChannelEvent::Closed => {
            view.on_connection_status_changed(ConnectionStatus::Closed);
        }
        ChannelEvent::Errored(reason) => {
            let err = crate::models::SyncError::ConnectionFailure(reason);
            tracing::warn!(error = %err, "shelf-state channel errored");
            view.on_connection_status_changed(ConnectionStatus::Errored);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ShelfName;

    #[test]
    fn test_lifecycle_transitions_in_order() {
        let view = ShelfViewModel::new();
        assert_eq!(
            view.current().connection_status,
            ConnectionStatus::Disconnected
        );

        apply_channel_event(&view, ChannelEvent::Connected);
        assert_eq!(view.current().connection_status, ConnectionStatus::Connected);

        apply_channel_event(&view, ChannelEvent::Closed);
        assert_eq!(view.current().connection_status, ConnectionStatus::Closed);
    }

    #[test]
    fn test_error_event_marks_status_errored() {
        let view = ShelfViewModel::new();
        apply_channel_event(&view, ChannelEvent::Errored("refused".to_string()));
        assert_eq!(view.current().connection_status, ConnectionStatus::Errored);
        assert_eq!(view.current().connection_status.status_line(), "Not Connected");
    }

    #[test]
    fn test_message_event_feeds_view_model() {
        let view = ShelfViewModel::new();
        apply_channel_event(&view, ChannelEvent::Connected);
        apply_channel_event(
            &view,
            ChannelEvent::Message(
                r#"{"wastedOrdersDecay":2,"hot":[{"id":"o1","name":"Soup","temp":"hot","normalizedHealth":0.73}]}"#
                    .to_string(),
            ),
        );

        let state = view.current();
        assert_eq!(state.wasted_orders_decay, 2);
        assert_eq!(state.shelves[&ShelfName::Hot].len(), 1);
    }
}
