// src/chan/backoff.rs

use std::thread;

const SPIN_LIMIT: u32 = 16;
const YIELD_LIMIT: u32 = 8;

/// Waits until `cond` returns true: a short spin, a few scheduler yields,
/// then indefinite parking. The parked thread is only woken by the
/// `unpark()` issued by whoever makes the condition true, and the loop
/// re-checks the condition to absorb spurious wakeups.
pub(crate) fn wait_until<F>(cond: F)
where
  F: Fn() -> bool,
{
  for _ in 0..SPIN_LIMIT {
    if cond() {
      return;
    }
    std::hint::spin_loop();
  }

  for _ in 0..YIELD_LIMIT {
    if cond() {
      return;
    }
    thread::yield_now();
  }

  while !cond() {
    thread::park();
  }
}
