// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 acom developers

//! Cross-thread event flow tests.
//!
//! Exercises the reactor/application hand-off under real contention:
//! - one reactor thread enqueueing while an application thread pulls
//!   batches in a loop (no reordering, no duplication, suffix consistency);
//! - the full backend path from notification arrival to consumed payload.

use acom::{
    ClientId, EventId, InstanceId, InvisibleSampleCache, NotificationHeader, NotificationMessage,
    ProxyEventBackend, ServiceId, SessionId,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

const STREAM_LEN: u64 = 1000;

fn message(session: u32) -> NotificationMessage {
    NotificationMessage::new(
        NotificationHeader {
            service_id: ServiceId::new(0x1234),
            instance_id: InstanceId::new(1),
            event_id: EventId::new(0x8001),
            client_id: ClientId::new(7),
            session_id: SessionId::new(session),
        },
        session.to_le_bytes().to_vec(),
    )
}

/// Reactor enqueues a monotonically numbered stream while the application
/// pulls batches of 10. Every observed sequence must be strictly increasing
/// (no reordering, no duplication); drop-oldest only ever skips forward.
#[test]
fn reactor_and_application_threads_contend_without_reordering() {
    let cache: Arc<InvisibleSampleCache<u64>> = Arc::new(InvisibleSampleCache::new());
    cache.resize(16);

    let observed = thread::scope(|scope| {
        let producer_cache = Arc::clone(&cache);
        let producer = scope.spawn(move || {
            for seq in 0..STREAM_LEN {
                assert!(producer_cache.enqueue(seq));
                if fastrand::u8(..) < 8 {
                    thread::yield_now();
                }
            }
        });

        let consumer_cache = Arc::clone(&cache);
        let consumer = scope.spawn(move || {
            let mut observed = Vec::new();
            loop {
                let mut batch = consumer_cache.get_samples(10);
                while let Some(seq) = batch.pop_front() {
                    observed.push(seq);
                }
                drop(batch);

                if observed.last() == Some(&(STREAM_LEN - 1)) {
                    break;
                }
                thread::yield_now();
            }
            observed
        });

        producer.join().expect("producer thread");
        consumer.join().expect("consumer thread")
    });

    assert!(!observed.is_empty());
    assert_eq!(*observed.last().expect("non-empty"), STREAM_LEN - 1);
    for window in observed.windows(2) {
        assert!(
            window[0] < window[1],
            "reordered or duplicated samples: {} then {}",
            window[0],
            window[1]
        );
    }

    // Everything enqueued was either observed or dropped by eviction.
    assert_eq!(
        observed.len() + cache.dropped_samples(),
        STREAM_LEN as usize
    );
}

/// Full backend path: subscribe, ACK, notifications from a reactor thread,
/// receive-handler signals, application consumption in order.
#[test]
fn backend_end_to_end_delivery() {
    let backend = Arc::new(ProxyEventBackend::new(EventId::new(0x8001)));
    backend.set_connection_state(true);
    backend.set_service_state(true);
    backend.subscribe(64).expect("fresh backend");
    backend.on_subscribe_ack_received();

    let signals = Arc::new(AtomicUsize::new(0));
    let signal_counter = Arc::clone(&signals);
    backend.set_receive_handler(Arc::new(move || {
        signal_counter.fetch_add(1, Ordering::Relaxed);
    }));

    let reactor_backend = Arc::clone(&backend);
    let reactor = thread::spawn(move || {
        for session in 0..64u32 {
            reactor_backend.on_notification_received(message(session));
        }
    });
    reactor.join().expect("reactor thread");

    let mut sessions = Vec::new();
    while sessions.len() < 64 {
        let mut batch = backend.get_new_samples(16);
        while let Some(sample) = batch.pop_front() {
            sessions.push(sample.header.session_id.get());
        }
    }

    assert_eq!(sessions, (0..64).collect::<Vec<_>>());
    assert_eq!(signals.load(Ordering::Relaxed), 64);
    assert_eq!(backend.stats().notifications_cached, 64);
    assert_eq!(backend.stats().samples_dropped, 0);
}

/// The application holding a checked-out batch never blocks the reactor:
/// enqueue makes progress while the batch is alive on another thread.
#[test]
fn enqueue_progresses_while_batch_checked_out() {
    let cache: Arc<InvisibleSampleCache<u64>> = Arc::new(InvisibleSampleCache::new());
    cache.resize(8);
    assert!(cache.enqueue(0));

    let batch = cache.get_samples(1);
    assert_eq!(batch.front(), Some(&0));

    let reactor_cache = Arc::clone(&cache);
    let reactor = thread::spawn(move || {
        for seq in 1..=4u64 {
            assert!(reactor_cache.enqueue(seq));
        }
    });
    // Joining while the batch is held: this would deadlock if enqueue
    // needed the app-cache lock.
    reactor.join().expect("reactor thread");
    drop(batch);

    let mut batch = cache.get_samples(8);
    let mut remaining = Vec::new();
    while let Some(seq) = batch.pop_front() {
        remaining.push(seq);
    }
    assert_eq!(remaining, vec![0, 1, 2, 3, 4]);
}
