//! The process-internal queue feeding the worker (spec §4.9). A
//! `tokio::sync::mpsc` channel stands in for the abstract "ordered
//! queue" spec.md leaves external-collaborator-shaped; `QUEUE_CAPACITY`
//! selects bounded vs unbounded, mirroring the donor's
//! environment-driven `WorkerConfig`.

use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub struct IndexMessage {
    pub request_id: String,
    pub player: String,
    pub platform: String,
    pub start_month: String,
    pub end_month: String,
}

pub type IndexSender = mpsc::Sender<IndexMessage>;
pub type IndexReceiver = mpsc::Receiver<IndexMessage>;

/// `capacity == 0` means unbounded (spec §6's `QUEUE_CAPACITY`).
pub fn channel(capacity: usize) -> (IndexSender, IndexReceiver) {
    if capacity == 0 {
        // mpsc has no unbounded *bounded-trait* sibling with the same
        // Sender/Receiver types, so an effectively-unbounded channel is
        // approximated with a large fixed capacity.
        mpsc::channel(usize::from(u16::MAX))
    } else {
        mpsc::channel(capacity)
    }
}
