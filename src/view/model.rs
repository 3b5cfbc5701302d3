//! Shelf view model: the single source of truth for what is displayed.
//!
//! Every inbound snapshot is authoritative and replaces the local state
//! wholesale. A snapshot that fails to parse is discarded and counted;
//! the operator keeps the last known-good state rather than a corrupted
//! display.

use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::models::{ConnectionStatus, Order, ShelfName, SyncError};

const WASTED_ORDERS_DECAY_KEY: &str = "wastedOrdersDecay";
const WASTED_ORDERS_NOSPACE_KEY: &str = "wastedOrdersNoSpace";

/// Notification to the presentation layer that state changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    StateChanged,
    StatusChanged(ConnectionStatus),
}

/// Renderable state, replaced wholesale on each valid snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ShelfViewState {
    pub shelves: BTreeMap<ShelfName, Vec<Order>>,
    pub wasted_orders_decay: u64,
    pub wasted_orders_no_space: u64,
    pub connection_status: ConnectionStatus,
}

impl Default for ShelfViewState {
    fn default() -> Self {
        // Display default before the first snapshot: all shelves shown
        // empty, counters at zero.
        let shelves = ShelfName::ALL
            .into_iter()
            .map(|shelf| (shelf, Vec::new()))
            .collect();
        Self {
            shelves,
            wasted_orders_decay: 0,
            wasted_orders_no_space: 0,
            connection_status: ConnectionStatus::Disconnected,
        }
    }
}

/// A snapshot parsed and validated against the shelf allow-list.
#[derive(Debug)]
struct ParsedSnapshot {
    shelves: BTreeMap<ShelfName, Vec<Order>>,
    wasted_orders_decay: u64,
    wasted_orders_no_space: u64,
    unrecognized_keys: Vec<String>,
}

#[derive(Debug)]
pub struct ShelfViewModel {
    state: RwLock<ShelfViewState>,
    // Kept outside ShelfViewState so state comparisons stay value-pure.
    last_snapshot_at: RwLock<Option<chrono::DateTime<chrono::Utc>>>,
    malformed_snapshots: AtomicU64,
    unrecognized_shelf_keys: AtomicU64,
    update_tx: broadcast::Sender<ViewEvent>,
}

impl ShelfViewModel {
    pub fn new() -> Arc<Self> {
        let (update_tx, _) = broadcast::channel(64);
        Arc::new(Self {
            state: RwLock::new(ShelfViewState::default()),
            last_snapshot_at: RwLock::new(None),
            malformed_snapshots: AtomicU64::new(0),
            unrecognized_shelf_keys: AtomicU64::new(0),
            update_tx,
        })
    }

    /// Subscribe to view change notifications for reactive rendering.
    pub fn subscribe(&self) -> broadcast::Receiver<ViewEvent> {
        self.update_tx.subscribe()
    }

    /// Clone of the current renderable state.
    pub fn current(&self) -> ShelfViewState {
        self.state.read().clone()
    }

    /// Count of inbound payloads discarded as malformed. Observable
    /// indicator for the availability-over-freshness policy.
    pub fn malformed_snapshots(&self) -> u64 {
        self.malformed_snapshots.load(Ordering::Relaxed)
    }

    /// Count of snapshot keys rejected by the shelf allow-list.
    pub fn unrecognized_shelf_keys(&self) -> u64 {
        self.unrecognized_shelf_keys.load(Ordering::Relaxed)
    }

    /// When the last valid snapshot was applied, for staleness display.
    pub fn last_snapshot_at(&self) -> Option<chrono::DateTime<chrono::Utc>> {
        *self.last_snapshot_at.read()
    }

    /// Pure state write plus observer notification.
    pub fn on_connection_status_changed(&self, status: ConnectionStatus) {
        {
            let mut state = self.state.write();
            state.connection_status = status;
        }
        debug!(status = %status, "connection status changed");
        let _ = self.update_tx.send(ViewEvent::StatusChanged(status));
    }

    /// Reconcile one inbound payload. On parse failure the previous
    /// shelves and counters are left untouched.
    pub fn on_snapshot_received(&self, raw: &str) {
        let parsed = match parse_snapshot(raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                self.malformed_snapshots.fetch_add(1, Ordering::Relaxed);
                warn!(error = %e, "discarding snapshot, keeping last known-good state");
                return;
            }
        };

        if !parsed.unrecognized_keys.is_empty() {
            self.unrecognized_shelf_keys
                .fetch_add(parsed.unrecognized_keys.len() as u64, Ordering::Relaxed);
            warn!(
                keys = ?parsed.unrecognized_keys,
                "snapshot carried shelf names outside the allow-list; rejected"
            );
        }

        {
            let mut state = self.state.write();
            state.shelves = parsed.shelves;
            state.wasted_orders_decay = parsed.wasted_orders_decay;
            state.wasted_orders_no_space = parsed.wasted_orders_no_space;
        }
        *self.last_snapshot_at.write() = Some(chrono::Utc::now());

        let _ = self.update_tx.send(ViewEvent::StateChanged);
    }
}

/// Parse a wire payload into shelves plus the two waste counters.
///
/// The counters are removed from the object first; their absence means 0
/// (the upstream may omit zero-valued counters). Every remaining key is
/// checked against the shelf allow-list; recognized keys must hold an
/// array of orders or the whole snapshot is malformed.
fn parse_snapshot(raw: &str) -> Result<ParsedSnapshot, SyncError> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| SyncError::MalformedSnapshot(e.to_string()))?;

    let serde_json::Value::Object(mut fields) = value else {
        return Err(SyncError::MalformedSnapshot(
            "payload is not a JSON object".to_string(),
        ));
    };

    let wasted_orders_decay = take_counter(&mut fields, WASTED_ORDERS_DECAY_KEY)?;
    let wasted_orders_no_space = take_counter(&mut fields, WASTED_ORDERS_NOSPACE_KEY)?;

    let mut shelves = BTreeMap::new();
    let mut unrecognized_keys = Vec::new();

    for (key, value) in fields {
        let Some(shelf) = ShelfName::from_label(&key) else {
            unrecognized_keys.push(key);
            continue;
        };
        let orders: Vec<Order> = serde_json::from_value(value).map_err(|e| {
            SyncError::MalformedSnapshot(format!("shelf {key}: {e}"))
        })?;
        shelves.insert(shelf, orders);
    }

    Ok(ParsedSnapshot {
        shelves,
        wasted_orders_decay,
        wasted_orders_no_space,
        unrecognized_keys,
    })
}

fn take_counter(
    fields: &mut serde_json::Map<String, serde_json::Value>,
    key: &str,
) -> Result<u64, SyncError> {
    match fields.remove(key) {
        None => Ok(0),
        Some(value) => value.as_u64().ok_or_else(|| {
            SyncError::MalformedSnapshot(format!("{key} is not a non-negative integer"))
        }),
    }
}
