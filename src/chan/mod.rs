// src/chan/mod.rs

//! The channel handles and constructors.
//!
//! A channel is created with [`bounded`] or [`unbounded`] and starts out as
//! a bidirectional [`Channel`] handle. Send-only [`Sender`] and
//! receive-only [`Receiver`] handles are derived from it with
//! [`Channel::sender`] and [`Channel::receiver`]; cloning any handle
//! multiplies holders of the same channel, never creates a new one.
//!
//! Capability restriction is a property of the handle type. A `Receiver`
//! has no way to send and, deliberately, no way to close: closing is the
//! producing side's move (the `Sender` and the bidirectional `Channel`
//! carry it), mirroring the convention that whoever writes the stream
//! decides when it ends.
//!
//! Dropping handles never closes the channel; close is explicit. The
//! channel's memory is reclaimed when the last handle drops, at which
//! point no operation can be parked on it (a parked operation holds a
//! handle through which it was called).

mod backoff;
mod core;
mod iter;
mod sync_impl;

pub use iter::{IntoIter, Iter, TryIter};

use self::core::{ChannelShared, UNBOUNDED};
use crate::error::{
  CloseError, RecvError, RecvErrorTimeout, SendError, SendErrorTimeout, TryRecvError,
  TrySendError,
};

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// A bidirectional handle to a channel: full send, receive, and close
/// capability.
pub struct Channel<T: Send> {
  shared: Arc<ChannelShared<T>>,
}

/// A send-only handle. Can be cloned to create multiple producers.
pub struct Sender<T: Send> {
  shared: Arc<ChannelShared<T>>,
}

/// A receive-only handle. Can be cloned to create multiple consumers.
pub struct Receiver<T: Send> {
  shared: Arc<ChannelShared<T>>,
}

// --- Constructors ---

/// Creates a channel with a fixed capacity.
///
/// A capacity of `0` creates a rendezvous channel: a `send` blocks until a
/// `recv` is ready to take the value, and the two complete together.
pub fn bounded<T: Send>(capacity: usize) -> Channel<T> {
  Channel {
    shared: Arc::new(ChannelShared::new(capacity)),
  }
}

/// Creates a channel with no capacity limit.
///
/// Sends never block for space; in reality the channel is bounded by
/// available memory.
pub fn unbounded<T: Send>() -> Channel<T> {
  Channel {
    shared: Arc::new(ChannelShared::new(UNBOUNDED)),
  }
}

// --- Channel (bidirectional) ---

impl<T: Send> Channel<T> {
  /// Derives a send-only handle to this channel.
  pub fn sender(&self) -> Sender<T> {
    Sender {
      shared: Arc::clone(&self.shared),
    }
  }

  /// Derives a receive-only handle to this channel.
  pub fn receiver(&self) -> Receiver<T> {
    Receiver {
      shared: Arc::clone(&self.shared),
    }
  }

  /// Sends a value, blocking the current thread until the value is handed
  /// off or the channel is closed.
  pub fn send(&self, item: T) -> Result<(), SendError> {
    sync_impl::send(&self.shared, item)
  }

  /// Attempts to send a value without blocking.
  pub fn try_send(&self, item: T) -> Result<(), TrySendError<T>> {
    self.shared.try_send_core(item)
  }

  /// Sends a value, blocking for at most `timeout`. On expiry the value
  /// comes back inside the error and the channel is unchanged.
  pub fn send_timeout(&self, item: T, timeout: Duration) -> Result<(), SendErrorTimeout<T>> {
    sync_impl::send_timeout(&self.shared, item, timeout)
  }

  /// Receives the oldest value, blocking the current thread until a value
  /// arrives or the channel is closed and drained.
  pub fn recv(&self) -> Result<T, RecvError> {
    sync_impl::recv(&self.shared)
  }

  /// Attempts to receive a value without blocking.
  pub fn try_recv(&self) -> Result<T, TryRecvError> {
    self.shared.try_recv_core()
  }

  /// Receives a value, blocking for at most `timeout`. A timed-out call
  /// consumes nothing.
  pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvErrorTimeout> {
    sync_impl::recv_timeout(&self.shared, timeout)
  }

  /// Closes the channel. Parked senders are failed, parked receivers see
  /// the end of the stream, and buffered values remain receivable until
  /// drained.
  ///
  /// # Errors
  ///
  /// Returns `Err(CloseError)` if the channel was already closed.
  pub fn close(&self) -> Result<(), CloseError> {
    self.shared.close_core()
  }

  /// A blocking iterator over received values; see [`Receiver::iter`].
  pub fn iter(&self) -> Iter<'_, T> {
    Iter::new(&self.shared)
  }

  /// Returns the channel capacity. `None` for unbounded channels; `Some(0)`
  /// for rendezvous channels.
  pub fn capacity(&self) -> Option<usize> {
    if self.shared.is_unbounded() {
      None
    } else {
      Some(self.shared.capacity)
    }
  }

  /// The number of buffered values. Advisory: may be stale immediately
  /// after returning when other holders are active.
  #[inline]
  pub fn len(&self) -> usize {
    self.shared.len()
  }

  /// Whether the buffer is currently empty. Advisory.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Whether the buffer is currently full. Always `false` for unbounded
  /// channels. Advisory.
  #[inline]
  pub fn is_full(&self) -> bool {
    if self.shared.is_unbounded() {
      false
    } else {
      self.len() == self.shared.capacity
    }
  }

  /// Whether `close` has been called on this channel.
  #[inline]
  pub fn is_closed(&self) -> bool {
    self.shared.is_closed()
  }
}

impl<T: Send> Clone for Channel<T> {
  fn clone(&self) -> Self {
    Channel {
      shared: Arc::clone(&self.shared),
    }
  }
}

impl<T: Send> IntoIterator for Channel<T> {
  type Item = T;
  type IntoIter = IntoIter<T>;

  /// Consumes the handle into a blocking iterator that ends once the
  /// channel is closed and drained.
  fn into_iter(self) -> IntoIter<T> {
    IntoIter::new(self.shared)
  }
}

impl<'a, T: Send> IntoIterator for &'a Channel<T> {
  type Item = T;
  type IntoIter = Iter<'a, T>;

  fn into_iter(self) -> Iter<'a, T> {
    self.iter()
  }
}

impl<T: Send> fmt::Debug for Channel<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Channel")
      .field("capacity", &self.capacity())
      .field("len", &self.len())
      .field("closed", &self.is_closed())
      .finish()
  }
}

// --- Sender ---

impl<T: Send> Sender<T> {
  /// Sends a value, blocking the current thread until the value is handed
  /// off or the channel is closed.
  pub fn send(&self, item: T) -> Result<(), SendError> {
    sync_impl::send(&self.shared, item)
  }

  /// Attempts to send a value without blocking.
  pub fn try_send(&self, item: T) -> Result<(), TrySendError<T>> {
    self.shared.try_send_core(item)
  }

  /// Sends a value, blocking for at most `timeout`. On expiry the value
  /// comes back inside the error and the channel is unchanged.
  pub fn send_timeout(&self, item: T, timeout: Duration) -> Result<(), SendErrorTimeout<T>> {
    sync_impl::send_timeout(&self.shared, item, timeout)
  }

  /// Closes the channel from the sending side; see [`Channel::close`].
  pub fn close(&self) -> Result<(), CloseError> {
    self.shared.close_core()
  }

  /// Returns the channel capacity. `None` for unbounded channels.
  pub fn capacity(&self) -> Option<usize> {
    if self.shared.is_unbounded() {
      None
    } else {
      Some(self.shared.capacity)
    }
  }

  /// The number of buffered values. Advisory.
  #[inline]
  pub fn len(&self) -> usize {
    self.shared.len()
  }

  /// Whether the buffer is currently empty. Advisory.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Whether the buffer is currently full. Advisory.
  #[inline]
  pub fn is_full(&self) -> bool {
    if self.shared.is_unbounded() {
      false
    } else {
      self.len() == self.shared.capacity
    }
  }

  /// Whether the channel has been closed.
  #[inline]
  pub fn is_closed(&self) -> bool {
    self.shared.is_closed()
  }
}

impl<T: Send> Clone for Sender<T> {
  fn clone(&self) -> Self {
    Sender {
      shared: Arc::clone(&self.shared),
    }
  }
}

impl<T: Send> fmt::Debug for Sender<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Sender")
      .field("capacity", &self.capacity())
      .field("len", &self.len())
      .field("closed", &self.is_closed())
      .finish()
  }
}

// --- Receiver ---

impl<T: Send> Receiver<T> {
  /// Receives the oldest value, blocking the current thread until a value
  /// arrives or the channel is closed and drained.
  pub fn recv(&self) -> Result<T, RecvError> {
    sync_impl::recv(&self.shared)
  }

  /// Attempts to receive a value without blocking.
  pub fn try_recv(&self) -> Result<T, TryRecvError> {
    self.shared.try_recv_core()
  }

  /// Receives a value, blocking for at most `timeout`. A timed-out call
  /// consumes nothing.
  pub fn recv_timeout(&self, timeout: Duration) -> Result<T, RecvErrorTimeout> {
    sync_impl::recv_timeout(&self.shared, timeout)
  }

  /// A blocking iterator: yields values as they arrive and ends once the
  /// channel is closed and drained. Lazy, finite, and non-restartable.
  pub fn iter(&self) -> Iter<'_, T> {
    Iter::new(&self.shared)
  }

  /// A non-blocking iterator: yields only values that are immediately
  /// available, then ends.
  pub fn try_iter(&self) -> TryIter<'_, T> {
    TryIter::new(&self.shared)
  }

  /// Returns the channel capacity. `None` for unbounded channels.
  pub fn capacity(&self) -> Option<usize> {
    if self.shared.is_unbounded() {
      None
    } else {
      Some(self.shared.capacity)
    }
  }

  /// The number of buffered values. Advisory.
  #[inline]
  pub fn len(&self) -> usize {
    self.shared.len()
  }

  /// Whether the buffer is currently empty. Advisory.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Whether the channel has been closed. Buffered values may still be
  /// receivable; see [`Receiver::recv`].
  #[inline]
  pub fn is_closed(&self) -> bool {
    self.shared.is_closed()
  }
}

impl<T: Send> Clone for Receiver<T> {
  fn clone(&self) -> Self {
    Receiver {
      shared: Arc::clone(&self.shared),
    }
  }
}

impl<T: Send> IntoIterator for Receiver<T> {
  type Item = T;
  type IntoIter = IntoIter<T>;

  /// Consumes the handle into a blocking iterator that ends once the
  /// channel is closed and drained.
  fn into_iter(self) -> IntoIter<T> {
    IntoIter::new(self.shared)
  }
}

impl<'a, T: Send> IntoIterator for &'a Receiver<T> {
  type Item = T;
  type IntoIter = Iter<'a, T>;

  fn into_iter(self) -> Iter<'a, T> {
    self.iter()
  }
}

impl<T: Send> fmt::Debug for Receiver<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Receiver")
      .field("capacity", &self.capacity())
      .field("len", &self.len())
      .field("closed", &self.is_closed())
      .finish()
  }
}
