//! Fan-out/fan-in over a small bounded channel: worker threads compute
//! factorials and hand the results back through a capacity-3 channel,
//! which the main thread drains with a for-loop until the channel is
//! closed.

use handoff::bounded;
use std::thread;

fn factorial(n: u64) -> u64 {
  (2..=n).product()
}

fn main() {
  let chan = bounded::<(u64, u64)>(3);
  let tx = chan.sender();

  let producer = thread::spawn(move || {
    for n in 1..=20 {
      tx.send((n, factorial(n))).unwrap();
    }
    tx.close().unwrap();
  });

  for (n, f) in chan.receiver() {
    println!("factorial of {} is {}", n, f);
  }

  producer.join().unwrap();
}
