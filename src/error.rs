// src/error.rs

//! The error taxonomy for channel operations.
//!
//! Every failure mode is reported to the immediate caller; the channel core
//! never retries internally and never swallows an error. Note that
//! [`RecvError::Exhausted`] is the designed end-of-stream signal of a
//! closed, drained channel rather than a fault.

use core::fmt;

/// Error returned by a blocking `send` on a closed channel.
///
/// A send observing a closed channel fails immediately; the calling thread
/// is never blocked in this case. A sender already parked when the channel
/// closes is woken with this same error.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SendError {
  /// The channel has been closed.
  Closed,
}

impl std::error::Error for SendError {}
impl fmt::Display for SendError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SendError::Closed => write!(f, "channel closed"),
    }
  }
}

/// Error returned by `try_send` when the value could not be accepted
/// immediately. The value being sent is handed back in either variant.
#[derive(PartialEq, Eq, Clone)]
pub enum TrySendError<T> {
  /// The buffer is at capacity (or, for a rendezvous channel, no receiver
  /// is currently waiting).
  Full(T),
  /// The channel has been closed.
  Closed(T),
}

impl<T> TrySendError<T> {
  /// Consumes the error, returning the value that failed to send.
  #[inline]
  pub fn into_inner(self) -> T {
    match self {
      TrySendError::Full(v) | TrySendError::Closed(v) => v,
    }
  }
}

impl<T> fmt::Debug for TrySendError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TrySendError::Full(_) => write!(f, "TrySendError::Full(..)"),
      TrySendError::Closed(_) => write!(f, "TrySendError::Closed(..)"),
    }
  }
}

impl<T> fmt::Display for TrySendError<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TrySendError::Full(_) => f.write_str("channel full"),
      TrySendError::Closed(_) => f.write_str("channel closed"),
    }
  }
}

impl<T: fmt::Debug> std::error::Error for TrySendError<T> {}

/// Error returned by `send_timeout`.
///
/// `Timeout` is the cancellation path for a blocked send: the waiter is
/// withdrawn from the wait-queue and the channel is left exactly as if the
/// call had never been made. The value is handed back in either variant.
#[derive(PartialEq, Eq, Clone)]
pub enum SendErrorTimeout<T> {
  /// The channel has been closed.
  Closed(T),
  /// The timeout elapsed before the value could be handed off.
  Timeout(T),
}

impl<T> SendErrorTimeout<T> {
  /// Consumes the error, returning the value that failed to send.
  #[inline]
  pub fn into_inner(self) -> T {
    match self {
      SendErrorTimeout::Closed(v) | SendErrorTimeout::Timeout(v) => v,
    }
  }
}

impl<T> fmt::Debug for SendErrorTimeout<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SendErrorTimeout::Closed(_) => write!(f, "SendErrorTimeout::Closed(..)"),
      SendErrorTimeout::Timeout(_) => write!(f, "SendErrorTimeout::Timeout(..)"),
    }
  }
}

impl<T> fmt::Display for SendErrorTimeout<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SendErrorTimeout::Closed(_) => f.write_str("channel closed"),
      SendErrorTimeout::Timeout(_) => f.write_str("send operation timed out"),
    }
  }
}

impl<T: fmt::Debug> std::error::Error for SendErrorTimeout<T> {}

/// Signal returned by a blocking `recv` once the channel is closed and
/// fully drained. This is the end-of-stream marker, not a failure.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RecvError {
  /// The channel is closed and its buffer is empty; no further value will
  /// ever arrive.
  Exhausted,
}

impl std::error::Error for RecvError {}
impl fmt::Display for RecvError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RecvError::Exhausted => write!(f, "channel exhausted (closed and drained)"),
    }
  }
}

/// Error returned by `try_recv` when no value could be taken immediately.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum TryRecvError {
  /// The channel is open but currently holds no value.
  Empty,
  /// The channel is closed and its buffer is empty.
  Exhausted,
}

impl std::error::Error for TryRecvError {}
impl fmt::Display for TryRecvError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TryRecvError::Empty => write!(f, "channel empty"),
      TryRecvError::Exhausted => write!(f, "channel exhausted (closed and drained)"),
    }
  }
}

/// Error returned by `recv_timeout`.
///
/// `Timeout` is the cancellation path for a blocked receive: the waiter is
/// withdrawn without consuming a value or disturbing the wait order of
/// other receivers.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum RecvErrorTimeout {
  /// The channel is closed and its buffer is empty.
  Exhausted,
  /// The timeout elapsed before a value arrived.
  Timeout,
}

impl std::error::Error for RecvErrorTimeout {}
impl fmt::Display for RecvErrorTimeout {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      RecvErrorTimeout::Exhausted => write!(f, "channel exhausted (closed and drained)"),
      RecvErrorTimeout::Timeout => write!(f, "receive operation timed out"),
    }
  }
}

/// Error returned when closing a channel that is already closed.
///
/// The close transition happens at most once; a redundant close is reported
/// rather than silently ignored so callers can detect double-close bugs.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct CloseError;

impl std::error::Error for CloseError {}
impl fmt::Display for CloseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "channel is already closed")
  }
}
