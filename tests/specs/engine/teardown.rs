//! Stopping, restarting and tearing down
//!
//! Stop is idempotent, a restart opens a fresh session, and nothing keeps
//! running once the poller handle is gone.

use crate::prelude::*;
use settle_core::{SequentialSessionIds, SessionId, TokioClock};

/// Fetcher that never answers and hands its tokens to the test
fn hanging(tokens: Arc<Mutex<Vec<AttemptToken>>>) -> PollConfig<&'static str> {
    PollConfig::new(fetch_fn(move |token: AttemptToken| {
        tokens.lock().unwrap().push(token);
        async move {
            sleep(Duration::from_secs(3600)).await;
            Ok::<_, FetchError>("late")
        }
    }))
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_the_live_fetch_and_is_idempotent() {
    let tokens = Arc::new(Mutex::new(Vec::new()));
    let log = Log::default();
    let poller = Poller::configure(log.watch(hanging(Arc::clone(&tokens)).settings(settings(ms(1000), 5))))
        .unwrap();

    poller.start();
    sleep(ms(100)).await;
    assert!(poller.is_loading());

    poller.stop();
    poller.stop();
    poller.flush().await;

    assert!(tokens.lock().unwrap()[0].is_cancelled());
    assert!(!poller.is_loading());
    assert_eq!(poller.stop_reason(), Some(StopReason::Requested));

    sleep(ms(10_000)).await;
    assert_eq!(tokens.lock().unwrap().len(), 1);
    assert_eq!(log.entries(), ["stopped: requested"]);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_cancels_everything() {
    let tokens = Arc::new(Mutex::new(Vec::new()));
    let log = Log::default();
    let poller = Poller::configure(log.watch(hanging(Arc::clone(&tokens)).settings(settings(ms(1000), 5))))
        .unwrap();

    poller.start();
    sleep(ms(100)).await;
    drop(poller);
    sleep(ms(10_000)).await;

    let tokens = tokens.lock().unwrap();
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_cancelled());
    assert_eq!(log.entries(), ["stopped: shutdown"]);
}

#[tokio::test(start_paused = true)]
async fn shutdown_waits_for_the_driver() {
    let tokens = Arc::new(Mutex::new(Vec::new()));
    let poller = Poller::configure(hanging(Arc::clone(&tokens)).settings(settings(ms(1000), 5))).unwrap();

    poller.start();
    sleep(ms(100)).await;
    let last = poller.shutdown().await;

    assert!(!last.is_polling());
    assert!(!last.is_loading);
    assert_eq!(last.stop_reason, Some(StopReason::Shutdown));
    assert!(tokens.lock().unwrap()[0].is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn restart_opens_a_fresh_session_and_keeps_the_last_data() {
    let provider = Provider::always("PENDING");
    let poller = Poller::configure_with(
        provider.config().settings(settings(ms(1000), 2)),
        TokioClock,
        SequentialSessionIds::new("s"),
    )
    .unwrap();

    poller.start();
    let first = poller.wait_until_stopped().await;
    assert_eq!(first.session_id, Some(SessionId::new("s-1")));
    assert_eq!(first.attempts, 2);

    poller.start();
    poller.flush().await;
    let second = poller.snapshot();
    assert_eq!(second.session_id, Some(SessionId::new("s-2")));
    assert_eq!(second.attempts, 1);
    assert_eq!(second.stop_reason, None);
    assert_eq!(second.data, Some("PENDING"));
}

#[tokio::test(start_paused = true)]
async fn start_while_polling_keeps_the_session() {
    let provider = Provider::always("PENDING");
    let poller = Poller::configure_with(
        provider.config().settings(settings(ms(1000), 5)),
        TokioClock,
        SequentialSessionIds::new("s"),
    )
    .unwrap();

    poller.start();
    sleep(ms(1500)).await;
    poller.start();
    poller.flush().await;

    assert_eq!(poller.session_id(), Some(SessionId::new("s-1")));
    assert_eq!(poller.attempts(), 2);
    assert_eq!(provider.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn refetch_after_stop_updates_data_only() {
    let provider = Provider::new(vec![Ok("PENDING"), Ok("PAID")]);
    let log = Log::default();
    let poller = Poller::configure(log.watch(provider.config().settings(settings(ms(1000), 5)))).unwrap();

    poller.start();
    sleep(ms(10)).await;
    poller.stop();
    poller.refetch();
    poller.flush().await;
    sleep(ms(10)).await;

    assert_eq!(poller.data(), Some("PAID"));
    assert!(!poller.is_polling());
    assert_eq!(poller.attempts(), 1);
    assert_eq!(
        log.entries(),
        ["success PENDING", "stopped: requested", "success PAID"]
    );
}
