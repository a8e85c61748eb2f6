//! Debounced, queued batching of per-region data fetches.
//!
//! Map interactions can demand data for many regions in quick succession
//! (ctrl-clicking polygons, dragging a date slider). Instead of one request
//! per region, pending ids accumulate here and a single batched call is
//! issued per flush. The queue is a plain state machine driven by caller
//! supplied timestamps: the UI loop asks [`FetchBatcher::time_until_due`]
//! how long to sleep and then calls [`FetchBatcher::poll`], so the same code
//! runs unchanged under a wasm timer or a test clock.
//!
//! Ordering contract: at most one batch is outstanding per queue. Ids
//! enqueued while a batch is in flight form the next batch, which is issued
//! immediately when [`FetchBatcher::complete`] is called. Batches are never
//! dropped and never overlap. A failed batch is simply completed without a
//! merge; there are no retries.

use crate::region::RegionId;
use crate::selection::DataSink;
use log::debug;

/// Debounce window for queues driven by slider-like date/range controls.
pub const RANGE_DEBOUNCE_MS: u64 = 1000;
/// Debounce window for chart-data refresh queues.
pub const REFRESH_DEBOUNCE_MS: u64 = 300;

/// One flush worth of region ids, stamped with the generation used to
/// detect stale responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    generation: u64,
    regions: Vec<RegionId>,
}

impl Batch {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn regions(&self) -> &[RegionId] {
        &self.regions
    }

    /// Comma-joined ids for the single `id=` query parameter.
    pub fn join_ids(&self) -> String {
        self.regions
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Sliding-debounce fetch queue with strictly sequential batch issuance.
#[derive(Debug, Clone)]
pub struct FetchBatcher {
    debounce_ms: u64,
    pending: Vec<RegionId>,
    /// Absolute time (ms) at which the pending set becomes due.
    deadline: Option<u64>,
    in_flight: Option<Batch>,
    next_generation: u64,
    /// Batches issued before this generation are stale; their results must
    /// be discarded (the selection context has moved on).
    stale_before: u64,
}

impl FetchBatcher {
    pub fn new(debounce_ms: u64) -> FetchBatcher {
        FetchBatcher {
            debounce_ms,
            pending: Vec::new(),
            deadline: None,
            in_flight: None,
            next_generation: 1,
            stale_before: 0,
        }
    }

    /// Add a region to the pending set unless it is already pending or part
    /// of the in-flight batch. Every call restarts the debounce window.
    pub fn enqueue(&mut self, region: RegionId, now_ms: u64) {
        let in_flight = self
            .in_flight
            .as_ref()
            .is_some_and(|batch| batch.regions.contains(&region));
        if !in_flight && !self.pending.contains(&region) {
            self.pending.push(region);
        }
        if !self.pending.is_empty() {
            self.deadline = Some(now_ms + self.debounce_ms);
        }
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn is_idle(&self) -> bool {
        self.in_flight.is_none()
    }

    /// How long the driver should sleep before the pending set is due, or
    /// `None` when there is nothing for a timer to do (no pending work, or a
    /// batch in flight whose completion will trigger the next issue).
    pub fn time_until_due(&self, now_ms: u64) -> Option<u64> {
        if self.in_flight.is_some() || self.pending.is_empty() {
            return None;
        }
        self.deadline.map(|d| d.saturating_sub(now_ms))
    }

    /// Issue a batch if the debounce window has elapsed and the queue is
    /// idle. Returns `None` otherwise.
    pub fn poll(&mut self, now_ms: u64) -> Option<Batch> {
        if self.in_flight.is_some() || self.pending.is_empty() {
            return None;
        }
        match self.deadline {
            Some(deadline) if now_ms >= deadline => Some(self.issue()),
            _ => None,
        }
    }

    /// Mark the given batch as finished. Ids enqueued while it was in flight
    /// are issued immediately as the next batch, without another debounce
    /// wait. Returns that follow-up batch, if any.
    pub fn complete(&mut self, batch: &Batch) -> Option<Batch> {
        match &self.in_flight {
            Some(current) if current.generation == batch.generation => {
                self.in_flight = None;
            }
            _ => return None,
        }
        if self.pending.is_empty() {
            None
        } else {
            Some(self.issue())
        }
    }

    /// Whether a batch's results are still applicable. False once
    /// [`FetchBatcher::invalidate`] has been called after issuance.
    pub fn is_current(&self, batch: &Batch) -> bool {
        batch.generation >= self.stale_before
    }

    /// Mark every outstanding batch stale. Called when the selection context
    /// (date, depth, range) moves on while a fetch is in flight, so a late
    /// response cannot rewind the display.
    pub fn invalidate(&mut self) {
        self.stale_before = self.next_generation;
    }

    fn issue(&mut self) -> Batch {
        let batch = Batch {
            generation: self.next_generation,
            regions: std::mem::take(&mut self.pending),
        };
        self.next_generation += 1;
        self.deadline = None;
        self.in_flight = Some(batch.clone());
        debug!(
            "issuing batch generation {} for {} region(s)",
            batch.generation,
            batch.regions.len()
        );
        batch
    }
}

/// Adapter feeding selection-state signals into a batcher with the event's
/// timestamp.
pub struct BatcherSink<'a> {
    batcher: &'a mut FetchBatcher,
    now_ms: u64,
}

impl<'a> BatcherSink<'a> {
    pub fn new(batcher: &'a mut FetchBatcher, now_ms: u64) -> BatcherSink<'a> {
        BatcherSink { batcher, now_ms }
    }
}

impl DataSink for BatcherSink<'_> {
    fn need_data(&mut self, region: RegionId) {
        self.batcher.enqueue(region, self.now_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Region;
    use crate::selection::Selection;

    #[test]
    fn sliding_debounce_flushes_once_after_the_last_enqueue() {
        let mut queue = FetchBatcher::new(1000);
        queue.enqueue(42, 0);
        queue.enqueue(43, 400);
        queue.enqueue(44, 800);

        // The window slides: nothing is due 1000ms after the *first* call.
        assert_eq!(queue.poll(1000), None);
        assert_eq!(queue.time_until_due(1000), Some(800));

        let batch = queue.poll(1800).expect("due after quiet window");
        assert_eq!(batch.regions(), &[42, 43, 44]);

        // Exactly one flush: the queue is drained afterwards.
        queue.complete(&batch);
        assert_eq!(queue.poll(5000), None);
    }

    #[test]
    fn repeated_enqueues_deduplicate_but_reset_the_window() {
        let mut queue = FetchBatcher::new(300);
        queue.enqueue(42, 0);
        queue.enqueue(42, 200);
        assert_eq!(queue.poll(300), None, "second call must reset the timer");
        let batch = queue.poll(500).unwrap();
        assert_eq!(batch.regions(), &[42]);
    }

    #[test]
    fn one_call_per_flush_carries_all_ids() {
        let mut queue = FetchBatcher::new(300);
        queue.enqueue(42, 0);
        queue.enqueue(43, 10);
        let batch = queue.poll(310).unwrap();
        assert_eq!(batch.join_ids(), "42,43");
    }

    #[test]
    fn no_overlapping_batches() {
        let mut queue = FetchBatcher::new(300);
        queue.enqueue(42, 0);
        let first = queue.poll(300).unwrap();

        // New work arrives while the first batch is outstanding.
        queue.enqueue(43, 350);
        assert_eq!(queue.poll(1000), None, "queue must stay sequential");
        assert_eq!(queue.time_until_due(1000), None);

        // Completion issues the accumulated batch immediately.
        let second = queue.complete(&first).expect("follow-up batch");
        assert_eq!(second.regions(), &[43]);
        assert!(second.generation() > first.generation());
        assert_eq!(queue.complete(&second), None);
    }

    #[test]
    fn enqueue_of_in_flight_region_is_dropped() {
        let mut queue = FetchBatcher::new(300);
        queue.enqueue(42, 0);
        let batch = queue.poll(300).unwrap();
        queue.enqueue(42, 350);
        assert_eq!(queue.complete(&batch), None, "no follow-up for a dropped id");
    }

    #[test]
    fn invalidate_marks_outstanding_batches_stale() {
        let mut queue = FetchBatcher::new(300);
        queue.enqueue(42, 0);
        let batch = queue.poll(300).unwrap();
        assert!(queue.is_current(&batch));

        // The date changed while the fetch was in flight.
        queue.invalidate();
        assert!(!queue.is_current(&batch), "late response must be discarded");

        queue.enqueue(42, 400);
        let next = queue.complete(&batch).unwrap();
        assert!(queue.is_current(&next));
    }

    #[test]
    fn completing_an_unknown_batch_does_not_release_the_queue() {
        let mut queue = FetchBatcher::new(300);
        queue.enqueue(42, 0);
        let batch = queue.poll(300).unwrap();
        let forged = Batch {
            generation: batch.generation() + 7,
            regions: vec![42],
        };
        assert_eq!(queue.complete(&forged), None);
        assert!(!queue.is_idle(), "real batch is still outstanding");
    }

    #[test]
    fn ctrl_selecting_two_regions_yields_one_batched_fetch() {
        let mut selection = Selection::new();
        let mut queue = FetchBatcher::new(REFRESH_DEBOUNCE_MS);

        let r1 = Region::new(42, "Gully");
        let r2 = Region::new(43, "Basin");

        let mut sink = BatcherSink::new(&mut queue, 0);
        selection.select_region(&r1, false, &mut sink);
        let mut sink = BatcherSink::new(&mut queue, 50);
        selection.select_region(&r2, true, &mut sink);

        assert_eq!(selection.regions(), &[42, 43]);
        let batch = queue.poll(50 + REFRESH_DEBOUNCE_MS).unwrap();
        assert_eq!(batch.join_ids(), "42,43");
        assert_eq!(queue.complete(&batch), None, "a single round trip");
    }

    #[test]
    fn invalid_date_triggers_no_fetch() {
        let mut selection = Selection::new();
        let mut queue = FetchBatcher::new(RANGE_DEBOUNCE_MS);

        let mut sink = BatcherSink::new(&mut queue, 0);
        selection.select_region(&Region::new(42, "Gully"), false, &mut sink);
        let batch = queue.poll(RANGE_DEBOUNCE_MS).unwrap();
        queue.complete(&batch);

        let mut sink = BatcherSink::new(&mut queue, 2000);
        assert!(!selection.set_date("2024-02-30", &mut sink));
        assert!(!queue.has_pending());
        assert_eq!(queue.poll(u64::MAX), None);
    }
}
