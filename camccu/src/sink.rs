//! Transmission collaborators
//!
//! The dispatcher hands every validated packet to a [`PacketSink`]. The
//! physical link (BLE characteristic, SDI embedder, serial port) lives
//! behind it and is owned by the application.

use std::sync::Arc;

use bytes::Bytes;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::warn;

/// Receives serialized, validated packets
#[cfg_attr(test, mockall::automock)]
pub trait PacketSink: Send + Sync {
    /// Called exactly once per accepted packet
    fn on_packet_encoded(&self, packet: Bytes);
}

impl<F> PacketSink for F
where
    F: Fn(Bytes) + Send + Sync,
{
    fn on_packet_encoded(&self, packet: Bytes) {
        self(packet)
    }
}

/// Sink that keeps every packet in memory
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    packets: Arc<Mutex<Vec<Bytes>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every packet received so far
    pub fn packets(&self) -> Vec<Bytes> {
        self.packets.lock().clone()
    }

    /// Remove and return every packet received so far
    pub fn take(&self) -> Vec<Bytes> {
        std::mem::take(&mut *self.packets.lock())
    }

    pub fn len(&self) -> usize {
        self.packets.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.packets.lock().is_empty()
    }
}

impl PacketSink for MemorySink {
    fn on_packet_encoded(&self, packet: Bytes) {
        self.packets.lock().push(packet);
    }
}

/// Sink that forwards packets to a transport task over a channel
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Bytes>,
}

impl ChannelSink {
    /// Create a sink and the receiver the transport task reads from
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Bytes>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Check if the receiving side is gone
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

impl From<mpsc::UnboundedSender<Bytes>> for ChannelSink {
    fn from(tx: mpsc::UnboundedSender<Bytes>) -> Self {
        Self { tx }
    }
}

impl PacketSink for ChannelSink {
    fn on_packet_encoded(&self, packet: Bytes) {
        if let Err(e) = self.tx.send(packet) {
            warn!(len = e.0.len(), "Transport channel closed, packet dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memory_sink_shares_buffer() {
        let sink = MemorySink::new();
        let handle = sink.clone();

        sink.on_packet_encoded(Bytes::from_static(&[1, 2, 3, 4]));

        assert_eq!(handle.len(), 1);
        assert_eq!(handle.take(), vec![Bytes::from_static(&[1, 2, 3, 4])]);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_closure_sink() {
        let seen = Arc::new(Mutex::new(0usize));
        let counter = Arc::clone(&seen);
        let sink = move |packet: Bytes| *counter.lock() += packet.len();

        sink.on_packet_encoded(Bytes::from_static(&[0; 8]));
        assert_eq!(*seen.lock(), 8);
    }

    #[tokio::test]
    async fn test_channel_sink() {
        let (sink, mut rx) = ChannelSink::channel();

        sink.on_packet_encoded(Bytes::from_static(&[255, 4, 0, 0, 1, 3, 0, 0]));

        let packet = rx.recv().await.unwrap();
        assert_eq!(packet.len(), 8);
    }

    #[test]
    fn test_channel_sink_closed() {
        let (sink, rx) = ChannelSink::channel();
        drop(rx);

        assert!(sink.is_closed());
        // Must not panic
        sink.on_packet_encoded(Bytes::from_static(&[0; 8]));
    }
}
