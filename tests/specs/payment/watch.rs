//! Watching a payment until it settles
//!
//! Paid, failed and expired end the watch. Running out of attempts or
//! errors shows "unknown" and leaves room for a manual check.

use crate::prelude::*;
use settle_payment::{
    parse_script, PaymentHandlers, PaymentId, PaymentPoller, PaymentStatus, PaymentView,
    ScriptedStatusSource,
};

fn handlers(log: &Log) -> PaymentHandlers {
    let (a, b, c, d, e) = (log.clone(), log.clone(), log.clone(), log.clone(), log.clone());
    PaymentHandlers::new()
        .on_paid(move |id| a.push(format!("paid {id}")))
        .on_failed(move |id| b.push(format!("failed {id}")))
        .on_expired(move |id| c.push(format!("expired {id}")))
        .on_pending(move |id| d.push(format!("pending {id}")))
        .on_unknown(move |id, reason| e.push(format!("unknown {id}: {reason}")))
}

fn watch(script: &str, settings: PollSettings, log: &Log) -> (PaymentPoller, ScriptedStatusSource) {
    let source = ScriptedStatusSource::new(parse_script(script).unwrap());
    let poller =
        PaymentPoller::new(source.clone(), PaymentId::new("pay_42"), settings, handlers(log)).unwrap();
    (poller, source)
}

#[tokio::test(start_paused = true)]
async fn checkout_confirms_a_paid_order() {
    let log = Log::default();
    let (poller, source) = watch("pending, pending, paid", settings(ms(3000), 40), &log);

    let start = Instant::now();
    poller.start();
    assert_eq!(poller.settled().await, PaymentView::Paid);

    assert_eq!(start.elapsed(), ms(6000));
    assert_eq!(source.call_count(), 3);
    assert_eq!(poller.status(), Some(PaymentStatus::Paid));
    assert_eq!(
        log.entries(),
        ["pending pay_42", "pending pay_42", "paid pay_42"]
    );
}

#[tokio::test(start_paused = true)]
async fn every_terminal_status_ends_the_watch() {
    for (script, view) in [
        ("failed", PaymentView::Failed),
        ("pending,expired", PaymentView::Expired),
        ("pending,pending,paid", PaymentView::Paid),
    ] {
        let log = Log::default();
        let (poller, _source) = watch(script, settings(ms(1000), 5), &log);
        poller.start();
        assert_eq!(poller.settled().await, view, "script {script}");
        assert_eq!(log.count("unknown"), 0);
    }
}

#[tokio::test(start_paused = true)]
async fn provider_that_never_settles_shows_unknown() {
    let log = Log::default();
    let (poller, source) = watch("pending", settings(ms(1000), 3), &log);

    poller.start();
    assert_eq!(poller.settled().await, PaymentView::Unknown);

    assert_eq!(source.call_count(), 3);
    assert_eq!(log.entries().last().unwrap(), "unknown pay_42: max attempts reached");
}

#[tokio::test(start_paused = true)]
async fn failing_provider_shows_unknown_with_the_last_error() {
    let log = Log::default();
    let (poller, source) = watch(
        "error",
        settings(ms(1000), 40).with_max_consecutive_errors(3),
        &log,
    );

    poller.start();
    assert_eq!(poller.settled().await, PaymentView::Unknown);

    assert_eq!(source.call_count(), 3);
    assert_eq!(poller.last_error(), Some(FetchError::transport("scripted failure")));
    assert_eq!(
        log.entries(),
        ["unknown pay_42: too many consecutive errors"]
    );
}

#[tokio::test(start_paused = true)]
async fn check_again_after_unknown_can_still_confirm() {
    let log = Log::default();
    let (poller, source) = watch("pending,pending,paid", settings(ms(1000), 2), &log);

    poller.start();
    assert_eq!(poller.settled().await, PaymentView::Unknown);

    poller.check_again();
    poller.poller().flush().await;
    sleep(ms(1)).await;

    assert_eq!(source.call_count(), 3);
    assert_eq!(poller.view(), PaymentView::Paid);
    assert!(!poller.is_polling());
    assert_eq!(poller.attempts(), 2);
    assert_eq!(log.entries().last().unwrap(), "paid pay_42");
}

#[tokio::test(start_paused = true)]
async fn leaving_the_page_does_not_report_unknown() {
    let log = Log::default();
    let (poller, _source) = watch("pending", settings(ms(1000), 10), &log);

    poller.start();
    sleep(ms(1500)).await;
    poller.stop();
    // Finished without a terminal status, but nobody gave up
    assert_eq!(poller.settled().await, PaymentView::Unknown);
    assert_eq!(poller.snapshot().stop_reason, Some(StopReason::Requested));
    assert_eq!(log.count("unknown"), 0);

    assert_eq!(poller.shutdown().await, PaymentView::Unknown);
    assert_eq!(log.count("unknown"), 0);
}

#[tokio::test(start_paused = true)]
async fn hidden_tab_pauses_the_watch() {
    let log = Log::default();
    let signal = VisibilitySignal::new(true);
    let source = ScriptedStatusSource::new(parse_script("pending,pending,paid").unwrap());
    let poller = PaymentPoller::with_visibility(
        source.clone(),
        PaymentId::new("pay_42"),
        settings(ms(1000), 10),
        handlers(&log),
        signal.clone(),
    )
    .unwrap();

    poller.start();
    sleep(ms(500)).await;
    signal.hide();
    sleep(ms(30_000)).await;
    assert_eq!(source.call_count(), 1);
    assert_eq!(poller.view(), PaymentView::Pending);

    signal.show();
    assert_eq!(poller.settled().await, PaymentView::Paid);
    assert_eq!(source.call_count(), 3);
}
