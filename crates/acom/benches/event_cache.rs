// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 acom developers

//! Event cache hot-path benchmark.
//!
//! Measures the reactor-side enqueue (the bounded critical section the
//! reactor thread pays per notification) and the application-side batch
//! retrieval, for payload sizes typical of automotive signal groups.

use acom::{
    ClientId, EventId, InstanceId, InvisibleSampleCache, NotificationHeader, NotificationMessage,
    ServiceId, SessionId,
};
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::hint::black_box as bb;

fn bench_message(session: u32, payload_size: usize) -> NotificationMessage {
    NotificationMessage::new(
        NotificationHeader {
            service_id: ServiceId::new(0x1234),
            instance_id: InstanceId::new(1),
            event_id: EventId::new(0x8001),
            client_id: ClientId::new(7),
            session_id: SessionId::new(session),
        },
        vec![0xCD; payload_size],
    )
}

/// Enqueue into a saturated cache: steady-state cost including eviction.
fn bench_enqueue(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_cache_enqueue");

    for payload_size in [16usize, 256, 4096] {
        group.bench_with_input(
            BenchmarkId::from_parameter(payload_size),
            &payload_size,
            |b, &payload_size| {
                let cache: InvisibleSampleCache<NotificationMessage> = InvisibleSampleCache::new();
                cache.resize(64);
                let mut session = 0u32;
                b.iter_batched(
                    || {
                        session = session.wrapping_add(1);
                        bench_message(session, payload_size)
                    },
                    |msg| bb(cache.enqueue(msg)),
                    BatchSize::SmallInput,
                );
            },
        );
    }

    group.finish();
}

/// Batch retrieval of a full cache: trim + migrate + hand-off.
fn bench_get_samples(c: &mut Criterion) {
    let mut group = c.benchmark_group("event_cache_get_samples");

    for batch in [1usize, 10, 64] {
        group.bench_with_input(BenchmarkId::from_parameter(batch), &batch, |b, &batch| {
            let cache: InvisibleSampleCache<u64> = InvisibleSampleCache::new();
            cache.resize(64);
            b.iter_batched(
                || {
                    for seq in 0..64u64 {
                        cache.enqueue(seq);
                    }
                },
                |()| {
                    let mut samples = cache.get_samples(batch);
                    while let Some(seq) = samples.pop_front() {
                        bb(seq);
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_enqueue, bench_get_samples);
criterion_main!(benches);
