// src/chan/iter.rs

//! Iterators over a channel's receiving side.
//!
//! The blocking iterators are the loop form of `recv`: each `next` parks
//! until a value arrives and returns `None` once the channel is closed and
//! drained. They are fused; a finished iterator stays finished because the
//! exhausted state is terminal.

use super::core::ChannelShared;
use super::sync_impl;

use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

/// Blocking iterator borrowed from a [`Receiver`](super::Receiver) or
/// [`Channel`](super::Channel).
pub struct Iter<'a, T: Send> {
  shared: &'a ChannelShared<T>,
}

impl<'a, T: Send> Iter<'a, T> {
  pub(crate) fn new(shared: &'a ChannelShared<T>) -> Self {
    Iter { shared }
  }
}

impl<'a, T: Send> Iterator for Iter<'a, T> {
  type Item = T;

  fn next(&mut self) -> Option<T> {
    sync_impl::recv(self.shared).ok()
  }
}

impl<'a, T: Send> FusedIterator for Iter<'a, T> {}

impl<'a, T: Send> fmt::Debug for Iter<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Iter { .. }")
  }
}

/// Non-blocking iterator: yields the values available right now, then ends.
pub struct TryIter<'a, T: Send> {
  shared: &'a ChannelShared<T>,
}

impl<'a, T: Send> TryIter<'a, T> {
  pub(crate) fn new(shared: &'a ChannelShared<T>) -> Self {
    TryIter { shared }
  }
}

impl<'a, T: Send> Iterator for TryIter<'a, T> {
  type Item = T;

  fn next(&mut self) -> Option<T> {
    self.shared.try_recv_core().ok()
  }
}

impl<'a, T: Send> fmt::Debug for TryIter<'a, T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("TryIter { .. }")
  }
}

/// Owning blocking iterator, created by consuming a handle with
/// `into_iter()`.
pub struct IntoIter<T: Send> {
  shared: Arc<ChannelShared<T>>,
}

impl<T: Send> IntoIter<T> {
  pub(crate) fn new(shared: Arc<ChannelShared<T>>) -> Self {
    IntoIter { shared }
  }
}

impl<T: Send> Iterator for IntoIter<T> {
  type Item = T;

  fn next(&mut self) -> Option<T> {
    sync_impl::recv(&self.shared).ok()
  }
}

impl<T: Send> FusedIterator for IntoIter<T> {}

impl<T: Send> fmt::Debug for IntoIter<T> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("IntoIter { .. }")
  }
}
