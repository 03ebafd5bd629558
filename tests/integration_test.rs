use fixedpool::{Error, ThreadPool};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

#[test]
fn every_accepted_submission_completes() {
    let mut pool = ThreadPool::new(3, 32).unwrap();

    let futures: Vec<_> = (0..20)
        .map(|i| pool.submit(move || i + 100).unwrap())
        .collect();

    for (i, future) in futures.iter().enumerate() {
        assert_eq!(*future.wait().unwrap(), i + 100);
    }

    pool.shutdown().unwrap();
}

#[test]
fn doubling_callable_mutates_argument() {
    let pool = ThreadPool::new(2, 8).unwrap();

    let value = Arc::new(AtomicI64::new(21));
    let captured = value.clone();
    let future = pool
        .submit(move || {
            let doubled = captured.load(Ordering::SeqCst) * 2;
            captured.store(doubled, Ordering::SeqCst);
            doubled
        })
        .unwrap();

    assert_eq!(*future.wait().unwrap(), 42);
    assert_eq!(value.load(Ordering::SeqCst), 42);
}

#[test]
fn uppercase_in_place_returns_same_handle() {
    let pool = ThreadPool::new(1, 4).unwrap();

    let text = Arc::new(Mutex::new(String::from("hello pool")));
    let captured = text.clone();
    let future = pool
        .submit(move || {
            let mut s = captured.lock();
            *s = s.to_uppercase();
            drop(s);
            captured
        })
        .unwrap();

    // `wait` hands back `Arc<T>`, so the callable's return value is one
    // level down.
    let returned = future.wait().unwrap();
    assert!(Arc::ptr_eq(&*returned, &text));
    assert_eq!(*text.lock(), "HELLO POOL");
}

// Single worker, capacity 2: while the worker is pinned on the first task,
// two queued submissions fit and the third is rejected.
#[test]
fn full_queue_rejects_submission() {
    let pool = ThreadPool::new(1, 2).unwrap();

    let (started_tx, started_rx) = mpsc::channel();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let blocker = pool
        .submit(move || {
            started_tx.send(()).unwrap();
            release_rx.recv().unwrap();
        })
        .unwrap();

    // Worker is now busy and the queue is empty.
    started_rx.recv().unwrap();

    let second = pool.submit(|| 2).unwrap();
    let third = pool.submit(|| 3).unwrap();
    assert_eq!(pool.pending_tasks(), 2);

    let overflow = pool.submit(|| 4);
    assert!(matches!(overflow, Err(Error::QueueFull)));
    // Rejection leaves the queue untouched.
    assert_eq!(pool.pending_tasks(), 2);

    release_tx.send(()).unwrap();
    blocker.wait().unwrap();
    assert_eq!(*second.wait().unwrap(), 2);
    assert_eq!(*third.wait().unwrap(), 3);

    let metrics = pool.metrics();
    assert_eq!(metrics.tasks_rejected, 1);
    assert_eq!(metrics.tasks_submitted, 3);
}

#[test]
fn shutdown_waits_for_long_running_tasks() {
    let mut pool = ThreadPool::new(3, 4).unwrap();
    let completed = Arc::new(AtomicUsize::new(0));

    for _ in 0..3 {
        let completed = completed.clone();
        pool.submit(move || {
            thread::sleep(Duration::from_millis(150));
            completed.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    }

    pool.shutdown().unwrap();
    assert_eq!(completed.load(Ordering::SeqCst), 3);
}

#[test]
fn shutdown_drains_submission_burst() {
    let mut pool = ThreadPool::new(4, 100).unwrap();
    let completed = Arc::new(AtomicUsize::new(0));

    for _ in 0..50 {
        let completed = completed.clone();
        pool.submit(move || {
            completed.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();
    }

    pool.shutdown().unwrap();
    assert_eq!(completed.load(Ordering::SeqCst), 50);

    let metrics = pool.metrics();
    assert_eq!(metrics.tasks_submitted, 50);
    assert_eq!(metrics.tasks_completed, 50);
    assert_eq!(metrics.pending, 0);
}

#[test]
fn submit_after_shutdown_rejected() {
    let mut pool = ThreadPool::new(2, 4).unwrap();
    pool.shutdown().unwrap();

    assert!(matches!(pool.submit(|| 1), Err(Error::ShuttingDown)));
    assert!(matches!(pool.shutdown(), Err(Error::AlreadyShutdown)));
}

#[test]
fn wait_is_idempotent() {
    let pool = ThreadPool::new(1, 2).unwrap();
    let future = pool.submit(|| 7).unwrap();

    let first = future.wait().unwrap();
    let second = future.wait().unwrap();
    assert_eq!(*first, 7);
    assert!(Arc::ptr_eq(&first, &second));

    // Already complete, so a timed wait returns immediately.
    let third = future.wait_timeout(Duration::from_millis(1)).unwrap();
    assert_eq!(*third.unwrap(), 7);
}

#[test]
fn fifo_order_with_single_worker() {
    let mut pool = ThreadPool::new(1, 16).unwrap();
    let order = Arc::new(Mutex::new(Vec::new()));

    for i in 0..10 {
        let order = order.clone();
        pool.submit(move || order.lock().push(i)).unwrap();
    }

    pool.shutdown().unwrap();
    assert_eq!(*order.lock(), (0..10).collect::<Vec<_>>());
}

#[test]
fn panicking_task_surfaces_error_and_pool_survives() {
    let pool = ThreadPool::new(2, 8).unwrap();

    let doomed = pool.submit(|| -> () { panic!("kaboom") }).unwrap();
    match doomed.wait() {
        Err(Error::TaskPanicked(message)) => assert!(message.contains("kaboom")),
        other => panic!("unexpected outcome: {:?}", other),
    }

    // The worker that caught the panic keeps serving tasks.
    let healthy = pool.submit(|| 5).unwrap();
    assert_eq!(*healthy.wait().unwrap(), 5);
    assert_eq!(pool.metrics().tasks_panicked, 1);
}

#[test]
fn wait_timeout_expires_then_succeeds() {
    let pool = ThreadPool::new(1, 2).unwrap();
    let (release_tx, release_rx) = mpsc::channel::<()>();

    let future = pool
        .submit(move || {
            release_rx.recv().unwrap();
            9
        })
        .unwrap();

    assert!(future.wait_timeout(Duration::from_millis(20)).is_none());
    assert!(!future.is_complete());

    release_tx.send(()).unwrap();
    assert_eq!(*future.wait().unwrap(), 9);
    assert!(future.is_complete());
}

#[test]
fn futures_outlive_queue_slot_reuse() {
    let mut pool = ThreadPool::new(1, 2).unwrap();

    // Cycle the two-slot ring several times over while holding on to every
    // future; each handle owns its completion record, so earlier results
    // stay readable after the slots have been reused.
    let futures: Vec<_> = (0..12)
        .map(|i| loop {
            match pool.submit(move || i) {
                Ok(future) => break future,
                Err(Error::QueueFull) => thread::yield_now(),
                Err(e) => panic!("unexpected error: {e}"),
            }
        })
        .collect();

    pool.shutdown().unwrap();

    for (i, future) in futures.iter().enumerate() {
        assert_eq!(*future.wait().unwrap(), i);
    }
}

#[test]
fn independent_pools_coexist() {
    let mut a = ThreadPool::new(1, 4).unwrap();
    let mut b = ThreadPool::new(2, 4).unwrap();

    let fa = a.submit(|| "a").unwrap();
    let fb = b.submit(|| "b").unwrap();

    assert_eq!(*fa.wait().unwrap(), "a");
    assert_eq!(*fb.wait().unwrap(), "b");

    a.shutdown().unwrap();
    // Pool b is unaffected by a's shutdown.
    let fb2 = b.submit(|| "still up").unwrap();
    assert_eq!(*fb2.wait().unwrap(), "still up");
    b.shutdown().unwrap();
}
