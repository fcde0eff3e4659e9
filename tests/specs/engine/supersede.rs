//! Overlapping attempts
//!
//! The timer does not wait for a slow fetch. When the next tick fires the
//! old attempt is cancelled, and only the newest attempt may change state.

use crate::prelude::*;

/// Attempt 0 takes `slow` and ignores cancellation; later attempts answer at once
fn slow_first_attempt(slow: Duration, tokens: Arc<Mutex<Vec<AttemptToken>>>) -> PollConfig<String> {
    PollConfig::new(fetch_fn(move |token: AttemptToken| {
        tokens.lock().unwrap().push(token.clone());
        async move {
            let attempt = token.attempt();
            if attempt.0 == 0 {
                sleep(slow).await;
            }
            Ok::<_, FetchError>(format!("reply to {attempt}"))
        }
    }))
}

#[tokio::test(start_paused = true)]
async fn late_reply_from_superseded_attempt_is_dropped() {
    let tokens = Arc::new(Mutex::new(Vec::new()));
    let log = Log::default();
    let config = slow_first_attempt(ms(1500), Arc::clone(&tokens)).settings(settings(ms(1000), 5));
    let poller = Poller::configure(log.watch(config)).unwrap();

    poller.start();
    sleep(ms(999)).await;
    assert!(poller.is_loading());
    assert_eq!(poller.data(), None);

    // Tick at 1000ms supersedes attempt #0
    sleep(ms(2)).await;
    assert_eq!(poller.data(), Some("reply to #1".to_string()));

    // Attempt #0 would have answered at 1500ms
    sleep(ms(700)).await;
    assert_eq!(poller.data(), Some("reply to #1".to_string()));
    assert_eq!(log.entries(), ["success reply to #1"]);

    let tokens = tokens.lock().unwrap();
    assert!(tokens[0].is_cancelled());
    assert!(!tokens[1].is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn superseded_attempt_still_counts_toward_the_budget() {
    let tokens = Arc::new(Mutex::new(Vec::new()));
    let config = slow_first_attempt(ms(5000), Arc::clone(&tokens)).settings(settings(ms(1000), 2));
    let poller = Poller::configure(config).unwrap();

    poller.start();
    let last = poller.wait_until_stopped().await;

    assert_eq!(last.attempts, 2);
    assert_eq!(last.stop_reason, Some(StopReason::MaxAttempts));
    assert_eq!(last.data, Some("reply to #1".to_string()));
}

#[tokio::test(start_paused = true)]
async fn final_attempt_still_pending_gives_up_at_the_next_tick() {
    let log = Log::default();
    let config = PollConfig::new(fetch_fn(|_token: AttemptToken| async move {
        sleep(Duration::from_secs(60)).await;
        Ok::<_, FetchError>("never")
    }))
    .settings(settings(ms(1000), 2));
    let poller = Poller::configure(log.watch(config)).unwrap();

    let start = Instant::now();
    poller.start();
    let last = poller.wait_until_stopped().await;

    assert_eq!(start.elapsed(), ms(2000));
    assert_eq!(last.stop_reason, Some(StopReason::MaxAttempts));
    assert!(!last.is_loading);
    assert_eq!(log.entries(), ["max attempts 2", "stopped: max attempts reached"]);
}

#[tokio::test(start_paused = true)]
async fn refetch_supersedes_a_scheduled_attempt() {
    let tokens = Arc::new(Mutex::new(Vec::new()));
    let log = Log::default();
    let config = slow_first_attempt(ms(5000), Arc::clone(&tokens)).settings(settings(ms(10_000), 3));
    let poller = Poller::configure(log.watch(config)).unwrap();

    poller.start();
    sleep(ms(100)).await;
    poller.refetch();
    sleep(ms(100)).await;

    assert_eq!(poller.data(), Some("reply to #1".to_string()));
    assert_eq!(poller.attempts(), 1);
    assert!(tokens.lock().unwrap()[0].is_cancelled());

    sleep(ms(6000)).await;
    assert_eq!(log.entries(), ["success reply to #1"]);
}
