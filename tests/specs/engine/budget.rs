//! Attempt and error budgets
//!
//! A session ends on the first terminal result, after its last budgeted
//! attempt, or after too many failures in a row, whichever comes first.

use crate::prelude::*;

fn until_not_pending(config: PollConfig<&'static str>) -> PollConfig<&'static str> {
    config.stop_when(|status| *status != "PENDING")
}

#[tokio::test(start_paused = true)]
async fn pending_forever_exhausts_attempts_on_schedule() {
    let provider = Provider::always("PENDING");
    let log = Log::default();
    let poller = Poller::configure(log.watch(until_not_pending(
        provider.config().settings(settings(ms(1000), 3)),
    )))
    .unwrap();

    let start = Instant::now();
    poller.start();
    let last = poller.wait_until_stopped().await;

    assert_eq!(provider.call_times(), [ms(0), ms(1000), ms(2000)]);
    assert_eq!(start.elapsed(), ms(2000));
    assert_eq!(last.stop_reason, Some(StopReason::MaxAttempts));
    assert_eq!(log.count("success"), 3);
    assert_eq!(log.count("max attempts"), 1);
    assert_eq!(
        log.entries(),
        [
            "success PENDING",
            "success PENDING",
            "success PENDING",
            "max attempts 3",
            "stopped: max attempts reached",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn terminal_status_stops_before_the_next_tick() {
    let provider = Provider::new(vec![Ok("PENDING"), Ok("PAID")]);
    let log = Log::default();
    let poller = Poller::configure(log.watch(until_not_pending(
        provider.config().settings(settings(ms(1000), 3)),
    )))
    .unwrap();

    poller.start();
    let last = poller.wait_until_stopped().await;
    sleep(ms(10_000)).await;

    assert_eq!(last.attempts, 2);
    assert_eq!(last.data, Some("PAID"));
    assert_eq!(last.stop_reason, Some(StopReason::ConditionMet));
    assert_eq!(provider.calls(), 2);
    assert_eq!(log.count("max attempts"), 0);
}

#[tokio::test(start_paused = true)]
async fn terminal_status_on_the_last_attempt_is_not_exhaustion() {
    let provider = Provider::new(vec![Ok("PENDING"), Ok("PENDING"), Ok("PAID")]);
    let log = Log::default();
    let poller = Poller::configure(log.watch(until_not_pending(
        provider.config().settings(settings(ms(1000), 3)),
    )))
    .unwrap();

    poller.start();
    let last = poller.wait_until_stopped().await;

    assert_eq!(last.stop_reason, Some(StopReason::ConditionMet));
    assert_eq!(log.count("max attempts"), 0);
}

#[tokio::test(start_paused = true)]
async fn consecutive_failures_stop_before_the_next_attempt() {
    let provider = Provider::new(vec![
        Err(FetchError::transport("connection refused")),
        Err(FetchError::transport("connection refused")),
        Ok("PAID"),
    ]);
    let log = Log::default();
    let poller = Poller::configure(log.watch(until_not_pending(
        provider
            .config()
            .settings(settings(ms(1000), 10).with_max_consecutive_errors(2)),
    )))
    .unwrap();

    poller.start();
    let last = poller.wait_until_stopped().await;
    sleep(ms(10_000)).await;

    assert_eq!(provider.calls(), 2);
    assert_eq!(last.stop_reason, Some(StopReason::MaxConsecutiveErrors));
    assert_eq!(log.count("error"), 2);
    assert_eq!(log.count("success"), 0);
}

#[tokio::test(start_paused = true)]
async fn a_success_resets_the_error_streak() {
    let provider = Provider::new(vec![
        Err(FetchError::transport("reset")),
        Ok("PENDING"),
        Err(FetchError::transport("reset")),
        Ok("PENDING"),
        Err(FetchError::transport("reset")),
        Ok("PAID"),
    ]);
    let poller = Poller::configure(until_not_pending(
        provider
            .config()
            .settings(settings(ms(1000), 10).with_max_consecutive_errors(2)),
    ))
    .unwrap();

    poller.start();
    let last = poller.wait_until_stopped().await;

    assert_eq!(last.stop_reason, Some(StopReason::ConditionMet));
    assert_eq!(last.attempts, 6);
    assert_eq!(last.consecutive_errors, 0);
    assert_eq!(last.last_error, None);
}

#[tokio::test(start_paused = true)]
async fn default_budget_is_forty_attempts_three_seconds_apart() {
    let provider = Provider::always("PENDING");
    let poller = Poller::configure(until_not_pending(provider.config())).unwrap();

    let start = Instant::now();
    poller.start();
    let last = poller.wait_until_stopped().await;

    assert_eq!(last.attempts, 40);
    assert_eq!(start.elapsed(), Duration::from_secs(3 * 39));
    assert_eq!(last.stop_reason, Some(StopReason::MaxAttempts));
}

#[tokio::test(start_paused = true)]
async fn deadline_caps_wall_clock_time() {
    let provider = Provider::always("PENDING");
    let log = Log::default();
    let poller = Poller::configure(log.watch(until_not_pending(
        provider
            .config()
            .settings(settings(ms(1000), 40).with_deadline(Duration::from_secs(5))),
    )))
    .unwrap();

    let start = Instant::now();
    poller.start();
    let last = poller.wait_until_stopped().await;

    assert_eq!(start.elapsed(), Duration::from_secs(5));
    assert_eq!(last.attempts, 5);
    assert_eq!(last.stop_reason, Some(StopReason::DeadlineElapsed));
    assert_eq!(log.count("max attempts"), 0);
    assert_eq!(log.entries().last().unwrap(), "stopped: deadline elapsed");
}
