//! Engine behaviour: attempt counts, sleeps, and outcome propagation.

use std::cell::Cell;
use std::time::{Duration, Instant};

use super::*;

fn counting<'a, T: 'a, E: 'a, F>(calls: &'a Cell<u32>, mut f: F) -> impl FnMut() -> Outcome<T, E> + 'a
where
    F: FnMut(u32) -> Outcome<T, E> + 'a,
{
    move || {
        calls.set(calls.get() + 1);
        f(calls.get())
    }
}

#[test]
fn immediate_success_is_one_call_for_any_budget() {
    for n in 0..5 {
        let calls = Cell::new(0);
        let policy = RetryPolicy::new(n, Duration::ZERO);
        let res: Result<&str, RetryError<String>> = do_with_retry(
            "ok",
            &policy,
            &DiscardLog,
            counting(&calls, |_| Outcome::Success("done")),
        );
        assert_eq!(res.unwrap(), "done");
        assert_eq!(calls.get(), 1, "n = {}", n);
    }
}

#[test]
fn fatal_is_one_call_for_any_budget() {
    for n in 0..5 {
        let calls = Cell::new(0);
        let policy = RetryPolicy::new(n, Duration::ZERO);
        let res: Result<(), _> = do_with_retry(
            "fatal",
            &policy,
            &DiscardLog,
            counting(&calls, |_| Outcome::Fatal("phase Failed".to_string())),
        );
        let err = res.unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "phase Failed");
        assert_eq!(calls.get(), 1, "n = {}", n);
    }
}

#[test]
fn always_retriable_is_n_plus_one_calls() {
    for n in 0..5 {
        let calls = Cell::new(0);
        let policy = RetryPolicy::new(n, Duration::ZERO);
        let res: Result<(), _> = do_with_retry(
            "never",
            &policy,
            &DiscardLog,
            counting(&calls, |i| Outcome::Retriable(format!("not ready ({})", i))),
        );
        let err = res.unwrap_err();
        assert!(err.is_exhausted());
        assert_eq!(err.attempts(), n + 1);
        assert_eq!(calls.get(), n + 1);
        assert_eq!(err.into_inner(), format!("not ready ({})", n + 1));
    }
}

#[test]
fn k_failures_then_success_is_k_plus_one_calls() {
    let n = 4;
    for k in 0..=n {
        let calls = Cell::new(0);
        let policy = RetryPolicy::new(n, Duration::ZERO);
        let res: Result<u32, RetryError<&str>> = do_with_retry(
            "eventually",
            &policy,
            &DiscardLog,
            counting(&calls, |i| {
                if i <= k {
                    Outcome::Retriable("pending")
                } else {
                    Outcome::Success(i)
                }
            }),
        );
        assert_eq!(res.unwrap(), k + 1);
        assert_eq!(calls.get(), k + 1);
    }
}

#[test]
fn exhausted_run_sleeps_n_times_not_after_last() {
    let policy = RetryPolicy::new(3, Duration::from_millis(20));
    let log = MemoryLog::new();
    let start = Instant::now();
    let res: Result<(), _> = do_with_retry("slow", &policy, &log, || Outcome::Retriable("no"));
    let elapsed = start.elapsed();
    assert!(res.is_err());
    assert!(elapsed >= Duration::from_millis(60), "elapsed {:?}", elapsed);
    // A fourth sleep would push past 80ms; leave headroom for slow CI.
    assert!(elapsed < Duration::from_millis(60 + 500), "elapsed {:?}", elapsed);
    let statuses: Vec<_> = log.records().iter().map(|r| r.status).collect();
    assert_eq!(
        statuses,
        vec![
            AttemptStatus::Retrying,
            AttemptStatus::Retrying,
            AttemptStatus::Retrying,
            AttemptStatus::Exhausted
        ]
    );
}

#[test]
fn succeeds_on_fourth_call_after_three_sleeps() {
    let policy = RetryPolicy::new(3, Duration::from_millis(10));
    let calls = Cell::new(0);
    let start = Instant::now();
    let res: Result<&str, RetryError<&str>> = do_with_retry(
        "wait-for-X",
        &policy,
        &DiscardLog,
        counting(&calls, |i| {
            if i < 4 {
                Outcome::Retriable("not yet")
            } else {
                Outcome::Success("up")
            }
        }),
    );
    assert_eq!(res.unwrap(), "up");
    assert_eq!(calls.get(), 4);
    assert!(start.elapsed() >= Duration::from_millis(30));
}

#[test]
fn fatal_on_second_call_stops_after_one_sleep() {
    let policy = RetryPolicy::new(3, Duration::from_millis(10));
    let calls = Cell::new(0);
    let log = MemoryLog::new();
    let res: Result<(), _> = do_with_retry(
        "wait-for-X",
        &policy,
        &log,
        counting(&calls, |i| {
            if i == 1 {
                Outcome::Retriable("pending")
            } else {
                Outcome::Fatal("failed")
            }
        }),
    );
    let err = res.unwrap_err();
    assert!(err.is_fatal());
    assert_eq!(err.attempts(), 2);
    assert_eq!(calls.get(), 2);
    let records = log.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].status, AttemptStatus::Fatal);
    assert_eq!(records[1].detail.as_deref(), Some("failed"));
}

#[test]
fn one_log_record_per_attempt() {
    let log = MemoryLog::new();
    let calls = Cell::new(0);
    let policy = RetryPolicy::new(5, Duration::ZERO);
    let _ = do_with_retry(
        "count",
        &policy,
        &log,
        counting(&calls, |i| {
            if i < 3 {
                Outcome::Retriable("x")
            } else {
                Outcome::Success(())
            }
        }),
    );
    let records = log.records();
    assert_eq!(records.len() as u32, calls.get());
    assert!(records.iter().all(|r| r.description == "count" && r.max_attempts == 6));
    assert_eq!(records.last().map(|r| r.status), Some(AttemptStatus::Succeeded));
    assert_eq!(
        records.iter().map(|r| r.attempt).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
}

#[test]
fn plain_result_actions_retry_every_error() {
    let calls = Cell::new(0);
    let policy = RetryPolicy::new(2, Duration::ZERO);
    let res: Result<(), _> = do_with_retry_result("plain", &policy, &DiscardLog, || {
        calls.set(calls.get() + 1);
        Err("malformed input")
    });
    assert!(res.unwrap_err().is_exhausted());
    assert_eq!(calls.get(), 3);
}

#[test]
fn probe_reports_success_flag() {
    let policy = RetryPolicy::new(1, Duration::ZERO);
    assert!(probe_with_retry("p", &policy, &DiscardLog, || {
        Outcome::<(), &str>::Success(())
    }));
    assert!(!probe_with_retry("p", &policy, &DiscardLog, || {
        Outcome::<(), &str>::Fatal("gone")
    }));
}

#[test]
fn or_fail_returns_value() {
    let policy = RetryPolicy::new(0, Duration::ZERO);
    let v = do_with_retry_or_fail("v", &policy, &DiscardLog, || Outcome::<u8, &str>::Success(7));
    assert_eq!(v, 7);
}

#[test]
#[should_panic(expected = "'doomed' unsuccessful after 2 attempts: still pending")]
fn or_fail_panics_with_error_message() {
    let policy = RetryPolicy::new(1, Duration::ZERO);
    do_with_retry_or_fail("doomed", &policy, &DiscardLog, || {
        Outcome::<(), _>::Retriable("still pending")
    });
}

#[test]
fn independent_runs_in_parallel_threads() {
    let handles: Vec<_> = (0..4u32)
        .map(|t| {
            std::thread::spawn(move || {
                let mut calls = 0;
                let policy = RetryPolicy::new(t, Duration::from_millis(1));
                let res: Result<(), _> = do_with_retry("par", &policy, &TracingLog, || {
                    calls += 1;
                    Outcome::Retriable("busy")
                });
                assert!(res.is_err());
                calls
            })
        })
        .collect();
    for (t, h) in handles.into_iter().enumerate() {
        assert_eq!(h.join().unwrap(), t as u32 + 1);
    }
}
