mod common;
use common::*;

use handoff::error::{TryRecvError, TrySendError};
use handoff::bounded;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

#[test]
fn fifo_order_within_capacity() {
  let chan = bounded(ITEMS_LOW);
  for i in 0..ITEMS_LOW {
    chan.send(i).unwrap();
  }
  for i in 0..ITEMS_LOW {
    assert_eq!(chan.recv().unwrap(), i);
  }
}

#[test]
fn try_send_reports_full_and_returns_value() {
  let chan = bounded(2);
  chan.try_send(1).unwrap();
  chan.try_send(2).unwrap();
  match chan.try_send(3) {
    Err(TrySendError::Full(v)) => assert_eq!(v, 3),
    other => panic!("expected Full, got {:?}", other),
  }
  assert_eq!(chan.len(), 2);
  assert!(chan.is_full());
}

#[test]
fn try_recv_reports_empty() {
  let chan = bounded::<u32>(4);
  assert_eq!(chan.try_recv(), Err(TryRecvError::Empty));
  chan.send(7).unwrap();
  assert_eq!(chan.try_recv(), Ok(7));
  assert_eq!(chan.try_recv(), Err(TryRecvError::Empty));
}

#[test]
fn capacity_and_len_snapshots() {
  let chan = bounded::<u8>(3);
  assert_eq!(chan.capacity(), Some(3));
  assert_eq!(chan.len(), 0);
  assert!(chan.is_empty());
  assert!(!chan.is_full());

  chan.send(1).unwrap();
  chan.send(2).unwrap();
  assert_eq!(chan.len(), 2);

  chan.send(3).unwrap();
  assert!(chan.is_full());
}

// The capacity-3 scenario: a producer attempts five sends before the
// consumer starts. The first three succeed immediately, the fourth and
// fifth each complete only as a receive frees a slot, and the consumer
// observes 1..=5 in order.
#[test]
fn backpressure_scenario_capacity_three() {
  let chan = bounded::<u32>(3);
  let tx = chan.sender();
  let sent = Arc::new(AtomicUsize::new(0));
  let sent_clone = Arc::clone(&sent);

  let producer = thread::spawn(move || {
    for i in 1..=5 {
      tx.send(i).unwrap();
      sent_clone.fetch_add(1, Ordering::SeqCst);
    }
  });

  // Give the producer time to fill the buffer and park on the fourth send.
  thread::sleep(SETTLE);
  assert_eq!(sent.load(Ordering::SeqCst), 3);
  assert_eq!(chan.len(), 3);

  assert_eq!(chan.recv().unwrap(), 1);
  thread::sleep(SETTLE);
  assert_eq!(sent.load(Ordering::SeqCst), 4);

  assert_eq!(chan.recv().unwrap(), 2);
  thread::sleep(SETTLE);
  assert_eq!(sent.load(Ordering::SeqCst), 5);

  assert_eq!(chan.recv().unwrap(), 3);
  assert_eq!(chan.recv().unwrap(), 4);
  assert_eq!(chan.recv().unwrap(), 5);
  producer.join().unwrap();
}

// Blocked senders must complete in arrival order. The buffer is filled
// first, then senders are parked one at a time with a settle delay so
// their arrival order is the spawn order.
#[test]
fn blocked_senders_unblock_in_arrival_order() {
  let chan = bounded::<usize>(1);
  chan.try_send(999).unwrap();

  let mut handles = Vec::new();
  for i in 0..4 {
    let tx = chan.sender();
    handles.push(thread::spawn(move || {
      tx.send(i).unwrap();
    }));
    thread::sleep(SETTLE);
  }

  assert_eq!(chan.recv().unwrap(), 999);
  for i in 0..4 {
    assert_eq!(chan.recv().unwrap(), i);
  }
  for handle in handles {
    handle.join().unwrap();
  }
}

// Blocked receivers must be served in arrival order: values are delivered
// straight into the slot of the receiver that has waited longest.
#[test]
fn blocked_receivers_served_in_arrival_order() {
  let chan = bounded::<usize>(4);
  let order = Arc::new(std::sync::Mutex::new(Vec::new()));

  let mut handles = Vec::new();
  for i in 0..3 {
    let rx = chan.receiver();
    let order_clone = Arc::clone(&order);
    handles.push(thread::spawn(move || {
      let v = rx.recv().unwrap();
      order_clone.lock().unwrap().push((i, v));
    }));
    thread::sleep(SETTLE);
  }

  for v in 10..13 {
    chan.send(v).unwrap();
    // Let the woken receiver record its value before the next send.
    thread::sleep(SETTLE);
  }
  for handle in handles {
    handle.join().unwrap();
  }

  let order = order.lock().unwrap();
  assert_eq!(*order, vec![(0, 10), (1, 11), (2, 12)]);
}

#[test]
fn unbounded_sends_never_block() {
  let chan = handoff::unbounded();
  assert_eq!(chan.capacity(), None);
  for i in 0..ITEMS_HIGH {
    chan.send(i).unwrap();
  }
  assert_eq!(chan.len(), ITEMS_HIGH);
  assert!(!chan.is_full());
  for i in 0..ITEMS_HIGH {
    assert_eq!(chan.recv().unwrap(), i);
  }
}

#[test]
fn cloned_handles_share_one_channel() {
  let chan = bounded::<&'static str>(2);
  let tx = chan.sender();
  let tx2 = tx.clone();
  let rx = chan.receiver();
  let rx2 = rx.clone();

  tx.send("a").unwrap();
  tx2.send("b").unwrap();
  assert_eq!(rx.recv().unwrap(), "a");
  assert_eq!(rx2.recv().unwrap(), "b");
  assert_eq!(chan.len(), 0);
}
