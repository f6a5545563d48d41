// src/chan/core.rs

//! The shared state of a single channel: the FIFO buffer, the two
//! wait-queues, and the close flag, all guarded by one `parking_lot::Mutex`.
//!
//! ### Design principles
//!
//! 1.  **One lock per channel**: every mutation of the buffer, the
//!     wait-queues, and the close flag happens under the channel's own
//!     mutex. Independent channels never contend, and nothing is ever
//!     woken or dropped while the lock is held.
//! 2.  **Direct slot hand-off**: a blocked operation parks with a value
//!     slot of its own. The operation that unblocks it moves the value
//!     under the lock (into the front receiver's slot, or from the front
//!     sender's slot into the buffer) before waking it. Because the
//!     transfer is done by the waker rather than re-attempted by the woken
//!     thread, a newly arriving caller can never barge ahead of a longer
//!     waiter, which keeps completion order equal to arrival order.
//! 3.  **Explicit close**: `closed` moves from false to true exactly once.
//!     It is never inferred from handle counts; dropping handles only
//!     releases memory.
//!
//! Invariants that hold whenever the lock is held:
//! - `waiting_receivers` non-empty implies the buffer is empty.
//! - `waiting_senders` non-empty implies the buffer is full (bounded) or
//!   the channel is a rendezvous channel.
//! - a rendezvous channel's buffer is always empty, and at most one of the
//!   two wait-queues is non-empty.

use crate::error::{CloseError, TryRecvError, TrySendError};

use parking_lot::Mutex;
use std::cell::UnsafeCell;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, Thread};

/// Capacity sentinel for a channel with no buffer limit.
pub(crate) const UNBOUNDED: usize = usize::MAX;

// --- Waiter ---

/// A parked send or receive operation.
///
/// The slot carries the value across the hand-off: a parked sender stores
/// the value it wants to deliver, a parked receiver parks with an empty
/// slot for a value to be delivered into.
///
/// Slot access protocol: the slot is only touched while holding the
/// channel's mutex, or by the parked thread itself either before the
/// waiter has been enqueued or after it has observed `done` with Acquire
/// ordering. `done` is stored with Release before the unpark, so the slot
/// transfer happens-before the woken thread's read.
pub(crate) struct Waiter<T> {
  thread: Thread,
  done: AtomicBool,
  closed: AtomicBool,
  slot: UnsafeCell<Option<T>>,
}

unsafe impl<T: Send> Send for Waiter<T> {}
unsafe impl<T: Send> Sync for Waiter<T> {}

impl<T> Waiter<T> {
  /// A waiter for a blocked send, carrying the value to hand off.
  pub(crate) fn sender(item: T) -> Arc<Self> {
    Arc::new(Waiter {
      thread: thread::current(),
      done: AtomicBool::new(false),
      closed: AtomicBool::new(false),
      slot: UnsafeCell::new(Some(item)),
    })
  }

  /// A waiter for a blocked receive, with an empty slot to deliver into.
  pub(crate) fn receiver() -> Arc<Self> {
    Arc::new(Waiter {
      thread: thread::current(),
      done: AtomicBool::new(false),
      closed: AtomicBool::new(false),
      slot: UnsafeCell::new(None),
    })
  }

  /// Moves a value into the slot.
  ///
  /// # Safety
  /// The caller must hold the channel lock, and the slot must be empty.
  pub(crate) unsafe fn put(&self, item: T) {
    debug_assert!((*self.slot.get()).is_none());
    *self.slot.get() = Some(item);
  }

  /// Takes the value out of the slot.
  ///
  /// # Safety
  /// The caller must hold the channel lock, or be the owning thread while
  /// the waiter is not enqueued, or be the owning thread after observing
  /// `is_done()`.
  pub(crate) unsafe fn take(&self) -> Option<T> {
    (*self.slot.get()).take()
  }

  #[inline]
  pub(crate) fn is_done(&self) -> bool {
    self.done.load(Ordering::Acquire)
  }

  /// Whether the waiter was woken by the channel closing rather than by a
  /// completed hand-off. Only meaningful after `is_done()`.
  #[inline]
  pub(crate) fn was_closed(&self) -> bool {
    self.closed.load(Ordering::Acquire)
  }

  /// Marks the hand-off complete and unparks the owner. Must be called
  /// with the channel lock released.
  pub(crate) fn complete(&self) {
    self.done.store(true, Ordering::Release);
    self.thread.unpark();
  }

  /// Wakes the owner with the closed indication. A parked sender keeps its
  /// value in the slot; the owner reclaims it on its own thread. Must be
  /// called with the channel lock released.
  pub(crate) fn complete_closed(&self) {
    self.closed.store(true, Ordering::Release);
    self.complete();
  }
}

// --- Channel state ---

/// The mutable channel state, protected by the mutex in `ChannelShared`.
pub(crate) struct ChannelInternal<T> {
  /// The FIFO buffer. Always empty for rendezvous channels.
  pub(crate) queue: VecDeque<T>,
  /// Monotonic close flag: false to true, exactly once.
  pub(crate) closed: bool,
  /// Parked senders in arrival order, each holding its value.
  pub(crate) waiting_senders: VecDeque<Arc<Waiter<T>>>,
  /// Parked receivers in arrival order, each with an empty slot.
  pub(crate) waiting_receivers: VecDeque<Arc<Waiter<T>>>,
}

/// The shared owner of a channel's state, wrapped in an `Arc` and held by
/// every handle.
pub(crate) struct ChannelShared<T> {
  pub(crate) internal: Mutex<ChannelInternal<T>>,
  /// `0` means rendezvous, `UNBOUNDED` means no limit. Immutable.
  pub(crate) capacity: usize,
}

impl<T: Send> ChannelShared<T> {
  pub(crate) fn new(capacity: usize) -> Self {
    ChannelShared {
      internal: Mutex::new(ChannelInternal {
        queue: VecDeque::with_capacity(if capacity == UNBOUNDED { 32 } else { capacity }),
        closed: false,
        waiting_senders: VecDeque::new(),
        waiting_receivers: VecDeque::new(),
      }),
      capacity,
    }
  }

  #[inline]
  pub(crate) fn is_unbounded(&self) -> bool {
    self.capacity == UNBOUNDED
  }

  /// The non-blocking send path. In order:
  /// 1. Fail if the channel is closed.
  /// 2. Deliver straight into the slot of the longest-waiting receiver.
  /// 3. Push onto the buffer if there is free capacity.
  /// Otherwise the channel is full for this caller.
  pub(crate) fn try_send_core(&self, item: T) -> Result<(), TrySendError<T>> {
    let mut guard = self.internal.lock();

    if guard.closed {
      return Err(TrySendError::Closed(item));
    }

    // A parked receiver implies an empty buffer, so handing the value to
    // the front receiver preserves FIFO delivery.
    if let Some(waiter) = guard.waiting_receivers.pop_front() {
      debug_assert!(guard.queue.is_empty());
      unsafe { waiter.put(item) };
      drop(guard);
      waiter.complete();
      return Ok(());
    }

    if self.capacity == 0 {
      // Rendezvous: with no receiver parked there is nobody to take the
      // value, so the send would have to block.
      return Err(TrySendError::Full(item));
    }
    if self.is_unbounded() || guard.queue.len() < self.capacity {
      guard.queue.push_back(item);
      return Ok(());
    }

    Err(TrySendError::Full(item))
  }

  /// The non-blocking receive path. In order:
  /// 1. Pop the oldest buffered value; the freed slot is granted to the
  ///    longest-waiting sender by moving its value into the buffer.
  /// 2. With an empty buffer, take a parked rendezvous sender's value
  ///    directly.
  /// 3. Report exhaustion if the channel is closed.
  /// Otherwise the channel is merely empty right now.
  pub(crate) fn try_recv_core(&self) -> Result<T, TryRecvError> {
    let mut guard = self.internal.lock();

    if let Some(item) = guard.queue.pop_front() {
      if let Some(waiter) = guard.waiting_senders.pop_front() {
        let moved = unsafe { waiter.take() }.expect("parked sender must hold a value");
        guard.queue.push_back(moved);
        drop(guard);
        waiter.complete();
      }
      return Ok(item);
    }

    // Buffer empty. A parked sender at this point can only mean a
    // rendezvous channel; buffered senders park only against a full buffer.
    if let Some(waiter) = guard.waiting_senders.pop_front() {
      debug_assert_eq!(self.capacity, 0);
      let item = unsafe { waiter.take() }.expect("parked sender must hold a value");
      drop(guard);
      waiter.complete();
      return Ok(item);
    }

    if guard.closed {
      return Err(TryRecvError::Exhausted);
    }
    Err(TryRecvError::Empty)
  }

  /// Flips the close flag and wakes every parked operation. Parked senders
  /// are failed; parked receivers observe the end of the stream (a parked
  /// receiver implies the buffer is already empty). Buffered values stay
  /// receivable until drained.
  pub(crate) fn close_core(&self) -> Result<(), CloseError> {
    let senders;
    let receivers;
    {
      let mut guard = self.internal.lock();
      if guard.closed {
        return Err(CloseError);
      }
      guard.closed = true;
      senders = std::mem::take(&mut guard.waiting_senders);
      receivers = std::mem::take(&mut guard.waiting_receivers);
    }
    // Wake outside the lock. A failed sender reclaims and drops its value
    // on its own thread, so no destructor runs under the channel lock.
    for waiter in senders {
      waiter.complete_closed();
    }
    for waiter in receivers {
      waiter.complete_closed();
    }
    Ok(())
  }

  /// Withdraws a parked sender that gave up waiting, returning the value
  /// still in its slot. Returns `None` if a hand-off or close claimed the
  /// waiter first; the caller must then wait for `is_done()`.
  pub(crate) fn cancel_send(&self, waiter: &Arc<Waiter<T>>) -> Option<T> {
    let mut guard = self.internal.lock();
    if let Some(pos) = guard
      .waiting_senders
      .iter()
      .position(|w| Arc::ptr_eq(w, waiter))
    {
      guard.waiting_senders.remove(pos);
      let item = unsafe { waiter.take() };
      debug_assert!(item.is_some());
      return item;
    }
    None
  }

  /// Withdraws a parked receiver that gave up waiting. Returns `false` if
  /// a delivery or close claimed the waiter first; the caller must then
  /// wait for `is_done()`.
  pub(crate) fn cancel_recv(&self, waiter: &Arc<Waiter<T>>) -> bool {
    let mut guard = self.internal.lock();
    if let Some(pos) = guard
      .waiting_receivers
      .iter()
      .position(|w| Arc::ptr_eq(w, waiter))
    {
      guard.waiting_receivers.remove(pos);
      true
    } else {
      false
    }
  }

  // --- Advisory snapshots ---
  // These are consistent at the instant the lock is held but may be stale
  // by the time the caller looks at them.

  #[inline]
  pub(crate) fn len(&self) -> usize {
    self.internal.lock().queue.len()
  }

  #[inline]
  pub(crate) fn is_closed(&self) -> bool {
    self.internal.lock().closed
  }
}
