use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use handoff::bounded;
use std::thread;

fn bench_uncontended(c: &mut Criterion) {
  let mut group = c.benchmark_group("uncontended");
  group.throughput(Throughput::Elements(1));

  group.bench_function("send_recv_cap1024", |b| {
    let chan = bounded::<u64>(1024);
    b.iter(|| {
      chan.send(1).unwrap();
      chan.recv().unwrap();
    });
  });

  group.bench_function("try_send_try_recv_cap1024", |b| {
    let chan = bounded::<u64>(1024);
    b.iter(|| {
      chan.try_send(1).unwrap();
      chan.try_recv().unwrap();
    });
  });

  group.finish();
}

fn bench_spsc_throughput(c: &mut Criterion) {
  const ITEMS: usize = 10_000;

  let mut group = c.benchmark_group("spsc");
  group.throughput(Throughput::Elements(ITEMS as u64));

  for capacity in [1usize, 16, 256] {
    group.bench_with_input(
      BenchmarkId::from_parameter(capacity),
      &capacity,
      |b, &capacity| {
        b.iter(|| {
          let chan = bounded::<u64>(capacity);
          let tx = chan.sender();
          let producer = thread::spawn(move || {
            for i in 0..ITEMS as u64 {
              tx.send(i).unwrap();
            }
          });
          for _ in 0..ITEMS {
            chan.recv().unwrap();
          }
          producer.join().unwrap();
        });
      },
    );
  }

  group.finish();
}

fn bench_rendezvous(c: &mut Criterion) {
  const ITEMS: usize = 1_000;

  let mut group = c.benchmark_group("rendezvous");
  group.throughput(Throughput::Elements(ITEMS as u64));

  group.bench_function("handoff_pair", |b| {
    b.iter(|| {
      let chan = bounded::<u64>(0);
      let tx = chan.sender();
      let producer = thread::spawn(move || {
        for i in 0..ITEMS as u64 {
          tx.send(i).unwrap();
        }
      });
      for _ in 0..ITEMS {
        chan.recv().unwrap();
      }
      producer.join().unwrap();
    });
  });

  group.finish();
}

criterion_group!(
  benches,
  bench_uncontended,
  bench_spsc_throughput,
  bench_rendezvous
);
criterion_main!(benches);
