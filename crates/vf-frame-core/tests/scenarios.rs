//! End-to-end widget scenarios against the scripted host.

use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

use vf_frame_core::{FrameConfig, FrameWidget};
use vf_frame_host::testing::RecordingHost;
use vf_frame_host::{HostError, ProviderDiscovery};
use vf_frame_types::{
    ActionStatus, AddFrameOutcome, ClientInfo, HostEvent, MemeUrl, ProviderInfo, SafeAreaInsets,
    SessionContext,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

fn context(added: bool) -> SessionContext {
    SessionContext {
        client: ClientInfo {
            added,
            ..ClientInfo::default()
        },
        ..SessionContext::default()
    }
}

fn widget(host: &Rc<RecordingHost>) -> FrameWidget {
    let discovery: Rc<dyn ProviderDiscovery> = host.clone();
    FrameWidget::new(host.clone(), Some(discovery), FrameConfig::default())
}

#[tokio::test]
async fn added_context_picks_one_meme_from_catalogue() {
    init_tracing();
    let host = RecordingHost::with_context(context(true));
    let mut frame = widget(&host);

    frame.load().await;

    let meme = frame.current_meme().expect("meme displayed");
    assert!(frame.config().memes.contains(&meme));
    assert!(!frame.is_saved());
    assert_eq!(host.add_frame_calls(), 0);
    assert_eq!(host.ready_calls(), 1);
}

#[tokio::test]
async fn not_added_prompts_install_once_and_defers_display() {
    let host = RecordingHost::with_context(context(false));
    let mut frame = widget(&host);

    frame.load().await;

    assert_eq!(host.add_frame_calls(), 1);
    assert!(frame.current_meme().is_none());
    assert!(frame.add_frame_result().is_none());
    assert_eq!(host.ready_calls(), 1);
}

#[tokio::test]
async fn frame_added_event_triggers_exactly_one_pick() {
    let host = RecordingHost::with_context(context(false));
    let mut frame = widget(&host);
    frame.load().await;

    host.emit(&HostEvent::FrameAdded {
        notification_details: None,
    });

    assert!(frame.is_added());
    let first = frame.current_meme().expect("meme displayed after install");
    assert!(frame.config().memes.contains(&first));

    // A duplicate installed signal must not re-pick.
    host.emit(&HostEvent::FrameAdded {
        notification_details: None,
    });
    assert_eq!(frame.current_meme().as_ref(), Some(&first));
}

#[tokio::test]
async fn save_success_is_idempotent() {
    init_tracing();
    let host = RecordingHost::with_context(context(true));
    let mut frame = widget(&host);
    frame.load().await;

    let displayed = frame.current_meme().unwrap();
    frame.save().await;

    assert!(frame.is_saved());
    assert_eq!(frame.save_status(), ActionStatus::Succeeded);
    assert_eq!(frame.current_meme().as_ref(), Some(&displayed));

    let submissions = host.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].chain_id.0, "eip155:10");
    assert_eq!(submissions[0].method, "eth_sendTransaction");
    assert_eq!(submissions[0].params.value.as_deref(), Some("0.0005"));
    assert!(submissions[0].params.data.is_none());

    // Further clicks submit nothing and change nothing.
    frame.save().await;
    frame.save().await;
    assert_eq!(host.submissions().len(), 1);
    assert_eq!(frame.current_meme().as_ref(), Some(&displayed));
}

#[tokio::test]
async fn save_failure_keeps_state_and_allows_retry_by_user() {
    let host = RecordingHost::with_context(context(true));
    host.script_submit(Err(HostError::RejectedByUser));
    let mut frame = widget(&host);
    frame.load().await;

    let displayed = frame.current_meme().unwrap();
    frame.save().await;

    assert!(!frame.is_saved());
    assert_eq!(frame.save_status(), ActionStatus::Failed);
    assert_eq!(frame.current_meme().as_ref(), Some(&displayed));
    assert_eq!(host.submissions().len(), 1);

    // A later click is a fresh attempt, not a replay.
    frame.save().await;
    assert!(frame.is_saved());
    assert_eq!(host.submissions().len(), 2);
}

#[tokio::test]
async fn save_click_during_inflight_save_submits_nothing() {
    let host = RecordingHost::with_context(context(true));
    let gate = host.hold_submissions();
    let mut frame = widget(&host);
    frame.load().await;

    let mut cx = Context::from_waker(Waker::noop());

    let mut first = pin!(frame.save());
    assert!(first.as_mut().poll(&mut cx).is_pending());
    assert_eq!(frame.save_status(), ActionStatus::Pending);
    assert_eq!(host.submissions().len(), 1);

    // Second click while the first submission is still in flight.
    let second = pin!(frame.save());
    assert!(matches!(second.poll(&mut cx), Poll::Ready(())));
    assert_eq!(host.submissions().len(), 1);
    assert!(!frame.is_saved());

    gate.release();
    assert!(matches!(first.as_mut().poll(&mut cx), Poll::Ready(())));
    assert!(frame.is_saved());
    assert_eq!(host.submissions().len(), 1);
}

#[tokio::test]
async fn mint_is_never_deduplicated() {
    let host = RecordingHost::with_context(context(true));
    let mut frame = widget(&host);
    frame.load().await;

    for _ in 0..3 {
        frame.mint().await;
    }

    let mints = host.submissions();
    assert_eq!(mints.len(), 3);
    for req in &mints {
        assert_eq!(req.chain_id.0, "eip155:8453");
        assert_eq!(req.params.data.as_deref(), Some("0x1249c58b"));
        assert!(req.params.value.is_none());
    }
    assert_eq!(frame.mint_status(), ActionStatus::Succeeded);
}

#[tokio::test]
async fn mint_failure_is_log_only() {
    let host = RecordingHost::with_context(context(true));
    host.script_submit(Err(HostError::Host("insufficient funds".to_owned())));
    let mut frame = widget(&host);
    frame.load().await;

    let displayed = frame.current_meme().unwrap();
    frame.mint().await;

    assert_eq!(frame.mint_status(), ActionStatus::Failed);
    assert_eq!(frame.current_meme().as_ref(), Some(&displayed));
    assert!(!frame.is_saved());
}

#[tokio::test]
async fn unload_releases_every_subscription() {
    let host = RecordingHost::with_context(context(true));
    let mut frame = widget(&host);
    frame.load().await;

    assert_eq!(host.active_subscriptions(), 6);
    frame.unload();
    assert_eq!(host.active_subscriptions(), 0);
}

#[tokio::test]
async fn drop_releases_subscriptions_too() {
    let host = RecordingHost::with_context(context(true));
    {
        let mut frame = widget(&host);
        frame.load().await;
        assert_eq!(host.active_subscriptions(), 6);
    }
    assert_eq!(host.active_subscriptions(), 0);
}

#[tokio::test]
async fn absent_context_is_terminal() {
    let host = RecordingHost::new();
    let mut frame = widget(&host);
    frame.load().await;

    assert_eq!(host.context_calls(), 1);
    assert_eq!(host.ready_calls(), 0);
    assert_eq!(host.add_frame_calls(), 0);
    assert_eq!(host.active_subscriptions(), 0);
    assert!(frame.current_meme().is_none());
}

#[tokio::test]
async fn context_error_degrades_to_not_ready() {
    let host = RecordingHost::new();
    host.fail_context("bridge unavailable");
    let mut frame = widget(&host);
    frame.load().await;

    assert_eq!(host.ready_calls(), 0);
    assert!(frame.current_meme().is_none());
}

#[tokio::test]
async fn load_runs_once_per_lifetime() {
    let host = RecordingHost::with_context(context(true));
    let mut frame = widget(&host);

    frame.load().await;
    frame.load().await;

    assert_eq!(host.context_calls(), 1);
    assert_eq!(host.ready_calls(), 1);
    assert_eq!(host.active_subscriptions(), 6);
}

#[tokio::test]
async fn install_rejections_become_status_strings() {
    for (outcome, expected) in [
        (
            AddFrameOutcome::RejectedByUser {
                reason: "declined".to_owned(),
            },
            "Not added: declined",
        ),
        (
            AddFrameOutcome::InvalidManifest {
                reason: "bad manifest".to_owned(),
            },
            "Not added: bad manifest",
        ),
        (
            AddFrameOutcome::Failed {
                detail: "timeout".to_owned(),
            },
            "Error: timeout",
        ),
    ] {
        let host = RecordingHost::with_context(context(false));
        host.script_add_frame(outcome);
        let mut frame = widget(&host);
        frame.load().await;

        assert_eq!(frame.add_frame_result().as_deref(), Some(expected));
        // Informational only: no retry, no display change.
        assert_eq!(host.add_frame_calls(), 1);
        assert!(frame.current_meme().is_none());
    }
}

#[tokio::test]
async fn frame_removed_flips_added_but_keeps_display() {
    let host = RecordingHost::with_context(context(true));
    let mut frame = widget(&host);
    frame.load().await;

    let displayed = frame.current_meme().unwrap();
    host.emit(&HostEvent::FrameRemoved);

    assert!(!frame.is_added());
    assert_eq!(frame.current_meme().as_ref(), Some(&displayed));
}

#[tokio::test]
async fn saved_selection_wins_over_fresh_draw() {
    let host = RecordingHost::with_context(context(false));
    let mut frame = widget(&host);
    frame.load().await;

    let saved = MemeUrl("https://i.imgflip.com/7q3y0b.jpg".to_owned());
    frame.state().borrow_mut().saved_meme = Some(saved.clone());

    host.emit(&HostEvent::FrameAdded {
        notification_details: None,
    });

    assert_eq!(frame.current_meme(), Some(saved));
    assert!(frame.is_saved());
}

#[tokio::test]
async fn safe_area_insets_apply_and_clamp() {
    let mut with_insets = context(true);
    with_insets.client.safe_area_insets = Some(SafeAreaInsets {
        top: 12,
        bottom: 34,
        left: 5,
        right: 6,
    });
    let host = RecordingHost::with_context(with_insets);
    let mut frame = widget(&host);
    frame.load().await;
    assert_eq!(frame.safe_area_insets().top, 12);
    assert_eq!(frame.safe_area_insets().bottom, 34);

    // Absent insets clamp to zero.
    let host = RecordingHost::with_context(context(true));
    let mut frame = widget(&host);
    frame.load().await;
    assert_eq!(frame.safe_area_insets(), SafeAreaInsets::default());
}

#[tokio::test]
async fn provider_announcements_gate_nothing() {
    let host = RecordingHost::with_context(context(true));
    host.announce_provider(ProviderInfo {
        uuid: "5d1c2a3b".to_owned(),
        name: "Rabby".to_owned(),
        rdns: "io.rabby".to_owned(),
    });
    let mut frame = widget(&host);
    frame.load().await;

    assert!(frame.current_meme().is_some());
    assert_eq!(host.ready_calls(), 1);
}
