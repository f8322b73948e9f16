//! Outbound dispatch
//!
//! Every command leaves through [`Dispatcher::submit`]: the packet is
//! serialized, the bytes are validated, and only bytes that pass reach the
//! sink. A rejected packet is logged and dropped; nothing is retried.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};

use camccu_core::{validate, Integrity, Packet};

use crate::error::Result;
use crate::sink::PacketSink;

/// Outcome of submitting a packet
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum DispatchState {
    /// Not submitted yet
    #[default]
    Pending,
    /// Validated and handed to the sink
    Sent,
    /// Dropped before reaching the sink
    Rejected,
}

impl DispatchState {
    pub fn is_sent(self) -> bool {
        self == Self::Sent
    }
}

/// Serializes, validates and forwards packets to a sink
///
/// Cheap to clone; clones share the sink.
#[derive(Clone)]
pub struct Dispatcher {
    sink: Arc<dyn PacketSink>,
    integrity: Integrity,
}

impl Dispatcher {
    /// Create a dispatcher writing to `sink`
    pub fn new(sink: impl PacketSink + 'static) -> Self {
        Self::from_shared(Arc::new(sink))
    }

    /// Create a dispatcher from an already shared sink
    pub fn from_shared(sink: Arc<dyn PacketSink>) -> Self {
        Self {
            sink,
            integrity: Integrity::default(),
        }
    }

    /// Set the integrity trailer appended to and checked on every packet
    pub fn with_integrity(mut self, integrity: Integrity) -> Self {
        self.integrity = integrity;
        self
    }

    pub fn integrity(&self) -> Integrity {
        self.integrity
    }

    /// Serialize, validate and send a packet
    pub fn submit(&self, packet: &Packet) -> DispatchState {
        debug!(packet = %packet, "Submitting packet");
        self.submit_bytes(packet.serialize_with(self.integrity))
    }

    /// Validate and send already serialized bytes
    pub fn submit_bytes(&self, bytes: Bytes) -> DispatchState {
        if let Err(reason) = validate::check(&bytes, self.integrity) {
            warn!(
                reason = %reason,
                bytes = %hex::encode(&bytes),
                "Dropping invalid packet"
            );
            return DispatchState::Rejected;
        }

        debug!(len = bytes.len(), "Packet sent to sink");
        self.sink.on_packet_encoded(bytes);
        DispatchState::Sent
    }

    /// Submit the output of a command constructor
    ///
    /// A construction error is logged and reported as rejected.
    pub fn dispatch(&self, command: Result<Packet>) -> DispatchState {
        match command {
            Ok(packet) => self.submit(&packet),
            Err(e) => {
                warn!(error = %e, kind = ?e.kind(), "Command rejected before dispatch");
                DispatchState::Rejected
            }
        }
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("integrity", &self.integrity)
            .finish_non_exhaustive()
    }
}
