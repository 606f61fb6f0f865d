// ============================================================================
// Event Handler Interface
// Defines the contract for handling committed exchange events
// ============================================================================

use crate::domain::{AccountId, FeeKind, SwapReceipt, TokenId};
use crate::numeric::Wad;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Events emitted by the exchange engine after a state change commits
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ExchangeEvent {
    /// Token listed with a fresh share pool
    TokenRegistered {
        token: TokenId,
        share_name: String,
        share_symbol: String,
        timestamp: DateTime<Utc>,
    },

    /// Liquidity deposited and shares minted
    Deposited {
        token: TokenId,
        depositor: AccountId,
        amount: Wad,
        timestamp: DateTime<Utc>,
    },

    /// Shares burned and liquidity withdrawn
    Withdrawn {
        token: TokenId,
        holder: AccountId,
        amount: Wad,
        timestamp: DateTime<Utc>,
    },

    /// Swap settled
    Swapped {
        receipt: SwapReceipt,
    },

    /// Fee rate changed by an admin
    FeeRateUpdated {
        kind: FeeKind,
        previous: Wad,
        current: Wad,
        updated_by: AccountId,
        timestamp: DateTime<Utc>,
    },
}

/// Event handler trait for processing exchange events
/// Implementations can handle logging, metrics, notifications, etc.
pub trait EventHandler: Send + Sync {
    /// Handle an exchange event
    fn on_event(&self, event: ExchangeEvent);

    /// Batch event handler (optional optimization)
    fn on_events(&self, events: Vec<ExchangeEvent>) {
        for event in events {
            self.on_event(event);
        }
    }
}

/// No-op event handler for testing
pub struct NoOpEventHandler;

impl EventHandler for NoOpEventHandler {
    fn on_event(&self, _event: ExchangeEvent) {
        // Do nothing
    }
}

/// Logging event handler
pub struct LoggingEventHandler;

impl EventHandler for LoggingEventHandler {
    fn on_event(&self, event: ExchangeEvent) {
        tracing::debug!("Exchange event: {:?}", event);
    }
}

/// Keeps every event in memory, in emission order
#[derive(Debug, Default)]
pub struct RecordingEventHandler {
    events: Mutex<Vec<ExchangeEvent>>,
}

impl RecordingEventHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of all events recorded so far
    pub fn events(&self) -> Vec<ExchangeEvent> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventHandler for RecordingEventHandler {
    fn on_event(&self, event: ExchangeEvent) {
        self.events.lock().push(event);
    }
}
