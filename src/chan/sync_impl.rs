// src/chan/sync_impl.rs

//! The blocking send/receive operations, plus the timed variants that act
//! as the cancellation path for a parked operation.
//!
//! Each operation follows the same shape: a non-blocking fast path, then a
//! slow path that re-checks the channel state under the lock before
//! committing to park. The re-check closes the window where the state
//! changed between the failed fast path and the enqueue, which would
//! otherwise lose a wakeup.
//!
//! A woken waiter never re-runs the fast path: the thread that woke it
//! already moved the value (see `chan::core`), so being woken with `done`
//! set is definitive. The `closed` flag on the waiter distinguishes a
//! completed hand-off from a close that failed the wait.

use super::backoff;
use super::core::{ChannelShared, Waiter};
use crate::error::{
  RecvError, RecvErrorTimeout, SendError, SendErrorTimeout, TryRecvError, TrySendError,
};

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Blocking send. Parks until the value is handed off or the channel is
/// closed.
pub(crate) fn send<T: Send>(shared: &ChannelShared<T>, item: T) -> Result<(), SendError> {
  let mut item = Some(item);

  loop {
    // --- Phase 1: non-blocking fast path ---
    let attempt = item.take().expect("value present at loop start");
    match shared.try_send_core(attempt) {
      Ok(()) => return Ok(()),
      Err(TrySendError::Closed(_)) => return Err(SendError::Closed),
      Err(TrySendError::Full(returned)) => item = Some(returned),
    }

    // --- Phase 2: move the value into a waiter and commit to parking ---
    // Safety for the slot accesses below: the waiter is not enqueued yet,
    // so this thread is its sole owner.
    let waiter = Waiter::sender(item.take().expect("value present after full fast path"));
    {
      let mut guard = shared.internal.lock();

      if guard.closed {
        return Err(SendError::Closed);
      }

      // Re-check under the lock: a receiver may have parked, or a buffer
      // slot may have opened, since the fast path failed.
      if !guard.waiting_receivers.is_empty()
        || (shared.capacity > 0
          && (shared.is_unbounded() || guard.queue.len() < shared.capacity))
      {
        item = unsafe { waiter.take() };
        continue;
      }

      guard.waiting_senders.push_back(Arc::clone(&waiter));
    }

    // --- Phase 3: wait outside the lock ---
    backoff::wait_until(|| waiter.is_done());

    // --- Phase 4: the wakeup is definitive ---
    if waiter.was_closed() {
      // Reclaim the value so it drops here, on this thread, with no lock
      // held.
      let _unsent = unsafe { waiter.take() };
      return Err(SendError::Closed);
    }
    return Ok(());
  }
}

/// Blocking receive. Parks until a value arrives or the channel is closed
/// and drained.
pub(crate) fn recv<T: Send>(shared: &ChannelShared<T>) -> Result<T, RecvError> {
  loop {
    // --- Phase 1: non-blocking fast path ---
    match shared.try_recv_core() {
      Ok(item) => return Ok(item),
      Err(TryRecvError::Exhausted) => return Err(RecvError::Exhausted),
      Err(TryRecvError::Empty) => {}
    }

    // --- Phase 2: commit to parking ---
    let waiter = Waiter::receiver();
    {
      let mut guard = shared.internal.lock();

      // Re-check under the lock: a value may have been buffered, or a
      // rendezvous sender may have parked, since the fast path failed.
      if !guard.queue.is_empty() || !guard.waiting_senders.is_empty() {
        continue;
      }
      if guard.closed {
        return Err(RecvError::Exhausted);
      }

      guard.waiting_receivers.push_back(Arc::clone(&waiter));
    }

    // --- Phase 3: wait outside the lock ---
    backoff::wait_until(|| waiter.is_done());

    // --- Phase 4: the wakeup is definitive ---
    if waiter.was_closed() {
      return Err(RecvError::Exhausted);
    }
    // Safety: `done` was observed with Acquire, so the delivering thread's
    // slot write happens-before this read.
    let item = unsafe { waiter.take() }.expect("completed receive must hold a value");
    return Ok(item);
  }
}

/// Blocking send with a timeout. On expiry the waiter withdraws from the
/// wait-queue and the value comes back to the caller; the channel is left
/// exactly as if the call had never been made.
pub(crate) fn send_timeout<T: Send>(
  shared: &ChannelShared<T>,
  item: T,
  timeout: Duration,
) -> Result<(), SendErrorTimeout<T>> {
  let deadline = Instant::now() + timeout;
  let mut item = Some(item);

  loop {
    let attempt = item.take().expect("value present at loop start");
    match shared.try_send_core(attempt) {
      Ok(()) => return Ok(()),
      Err(TrySendError::Closed(v)) => return Err(SendErrorTimeout::Closed(v)),
      Err(TrySendError::Full(returned)) => item = Some(returned),
    }

    let waiter = Waiter::sender(item.take().expect("value present after full fast path"));
    {
      let mut guard = shared.internal.lock();

      if guard.closed {
        drop(guard);
        let v = unsafe { waiter.take() }.expect("un-enqueued sender still holds its value");
        return Err(SendErrorTimeout::Closed(v));
      }
      if !guard.waiting_receivers.is_empty()
        || (shared.capacity > 0
          && (shared.is_unbounded() || guard.queue.len() < shared.capacity))
      {
        item = unsafe { waiter.take() };
        continue;
      }

      guard.waiting_senders.push_back(Arc::clone(&waiter));
    }

    park_until_done_or_deadline(&waiter, deadline, || {
      shared.cancel_send(&waiter).map(SendErrorTimeout::Timeout)
    })?;

    if waiter.was_closed() {
      let v = unsafe { waiter.take() }.expect("value restored to a closed-out sender");
      return Err(SendErrorTimeout::Closed(v));
    }
    return Ok(());
  }
}

/// Blocking receive with a timeout. On expiry the waiter withdraws without
/// consuming a value or a wait-queue position belonging to anyone else.
pub(crate) fn recv_timeout<T: Send>(
  shared: &ChannelShared<T>,
  timeout: Duration,
) -> Result<T, RecvErrorTimeout> {
  let deadline = Instant::now() + timeout;

  loop {
    match shared.try_recv_core() {
      Ok(item) => return Ok(item),
      Err(TryRecvError::Exhausted) => return Err(RecvErrorTimeout::Exhausted),
      Err(TryRecvError::Empty) => {}
    }

    let waiter = Waiter::receiver();
    {
      let mut guard = shared.internal.lock();

      if !guard.queue.is_empty() || !guard.waiting_senders.is_empty() {
        continue;
      }
      if guard.closed {
        return Err(RecvErrorTimeout::Exhausted);
      }

      guard.waiting_receivers.push_back(Arc::clone(&waiter));
    }

    park_until_done_or_deadline(&waiter, deadline, || {
      if shared.cancel_recv(&waiter) {
        Some(RecvErrorTimeout::Timeout)
      } else {
        None
      }
    })?;

    if waiter.was_closed() {
      return Err(RecvErrorTimeout::Exhausted);
    }
    let item = unsafe { waiter.take() }.expect("completed receive must hold a value");
    return Ok(item);
  }
}

/// Parks until the waiter completes or the deadline passes. On expiry,
/// `cancel` tries to withdraw the waiter under the lock; if it reports the
/// waiter already claimed (a hand-off or close is in flight), the wait is
/// extended until `done` is set, which the claimant does imminently.
fn park_until_done_or_deadline<T: Send, E>(
  waiter: &Arc<Waiter<T>>,
  deadline: Instant,
  cancel: impl Fn() -> Option<E>,
) -> Result<(), E> {
  loop {
    if waiter.is_done() {
      return Ok(());
    }
    let now = Instant::now();
    if now >= deadline {
      if let Some(err) = cancel() {
        return Err(err);
      }
      backoff::wait_until(|| waiter.is_done());
      return Ok(());
    }
    thread::park_timeout(deadline - now);
  }
}
