//! 分发器测试：策略选择、带会话的缓冲下载、失败回退、对象 URL 与锚点的释放、重复点击去重。

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use reqwest::StatusCode;
use wiremock::matchers::{header, method, path, path_regex, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::card::TriggerEvent;
use crate::dispatcher::{DispatchFailure, DispatchOutcome, SkipReason};
use crate::download_url::{BackendConfig, construct_download_url};
use crate::file_descriptor::{FileDescriptor, FileType};
use crate::tests::{BUCKET_ID, ErrorEventCounter, Harness, PROJECT_ID, RecordingNavigator};

const MIB: u64 = 1024 * 1024;

async fn mount_file(harness: &Harness, bucket_file_id: &str, body: &'static [u8]) {
    Mock::given(method("GET"))
        .and(path(harness.download_path(bucket_file_id)))
        .and(query_param("project", PROJECT_ID))
        .and(header("cookie", "a_session_proj1=secret-session"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body))
        .expect(1)
        .mount(&harness.server)
        .await;
}

/// 一个监听后立即关闭的本地端口，连接必然被拒绝。
fn unreachable_backend() -> BackendConfig {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    BackendConfig::new(&format!("http://127.0.0.1:{port}/v1"), PROJECT_ID, BUCKET_ID).unwrap()
}

#[tokio::test]
async fn small_document_is_fetched_with_session_and_saved() {
    let harness = Harness::start().await;
    mount_file(&harness, "abc", b"%PDF-1.7 report").await;

    let dispatcher = harness.dispatcher();
    let file = FileDescriptor::new("abc", "report.pdf", FileType::Document, 1024);
    let mut event = TriggerEvent::default();

    let outcome = dispatcher.dispatch_download(&file, &mut event).await;

    let saved = match outcome {
        DispatchOutcome::Saved(saved) => saved,
        other => panic!("预期为 Saved，得到 {other:?}"),
    };
    assert_eq!(saved.path, harness.save_dir.path().join("report.pdf"));
    assert_eq!(saved.size, 15);
    assert_eq!(std::fs::read(&saved.path).unwrap(), b"%PDF-1.7 report");

    assert!(event.default_prevented());
    assert!(event.propagation_stopped());
    assert!(harness.navigator.opened().is_empty());
    assert_eq!(harness.received_count().await, 1);

    let activations = harness.surface.activations();
    assert_eq!(activations.len(), 1);
    let (anchor, resolvable_during_activation) = &activations[0];
    assert_eq!(anchor.download, "report.pdf");
    assert!(anchor.href.starts_with("blob:"));
    assert!(anchor.hidden);
    assert!(resolvable_during_activation);

    // 锚点已移除，对象 URL 已撤销
    assert_eq!(harness.surface.attached_now(), 0);
    assert_eq!(harness.registry.live_count(), 0);
}

#[tokio::test]
async fn video_is_opened_directly_without_fetch() {
    let harness = Harness::start().await;
    let dispatcher = harness.dispatcher();
    let file = FileDescriptor::new("vid1", "clip.mp4", FileType::Video, 1024);

    let outcome = dispatcher
        .dispatch_download(&file, &mut TriggerEvent::default())
        .await;

    assert!(matches!(outcome, DispatchOutcome::Navigated));
    assert_eq!(
        harness.navigator.opened(),
        vec![construct_download_url(&harness.backend, "vid1")]
    );
    assert_eq!(harness.received_count().await, 0);
    assert_eq!(*harness.surface.attach_count.lock().unwrap(), 0);
}

#[tokio::test]
async fn large_document_is_opened_directly_without_fetch() {
    let harness = Harness::start().await;
    let dispatcher = harness.dispatcher();
    let file = FileDescriptor::new("big1", "dump.sql", FileType::Document, 60 * MIB);

    let outcome = dispatcher
        .dispatch_download(&file, &mut TriggerEvent::default())
        .await;

    assert!(matches!(outcome, DispatchOutcome::Navigated));
    assert_eq!(
        harness.navigator.opened(),
        vec![construct_download_url(&harness.backend, "big1")]
    );
    assert_eq!(harness.received_count().await, 0);
}

#[tokio::test]
async fn network_error_falls_back_to_navigation_and_logs_once() {
    let (errors, _guard) = ErrorEventCounter::install();
    let harness = Harness::start().await;
    let backend = unreachable_backend();
    let auth = crate::auth::SessionAuth::new(&backend, Some("s")).unwrap();

    let fallbacks = Arc::new(AtomicUsize::new(0));
    let counter = fallbacks.clone();
    let dispatcher = crate::DownloadDispatcher::new(
        backend.clone(),
        auth,
        harness.navigator.clone(),
        harness.surface.clone(),
        harness.registry.clone(),
    )
    .with_on_fallback_hook(move |file, failure| {
        assert_eq!(file.bucket_file_id, "x");
        assert!(matches!(failure, DispatchFailure::FetchFailed(_)));
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let file = FileDescriptor::new("x", "photo.png", FileType::Image, 500);
    let outcome = dispatcher
        .dispatch_download(&file, &mut TriggerEvent::default())
        .await;

    assert!(matches!(
        outcome,
        DispatchOutcome::FellBack(DispatchFailure::FetchFailed(_))
    ));
    assert!(outcome.navigated());
    assert_eq!(
        harness.navigator.opened(),
        vec![construct_download_url(&backend, "x")]
    );
    assert_eq!(fallbacks.load(Ordering::SeqCst), 1);
    assert_eq!(errors.count(), 1, "回退路径应恰好记录一条错误日志");
    assert!(harness.surface.activations().is_empty());
}

#[tokio::test]
async fn non_success_status_falls_back_to_navigation() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path(harness.download_path("denied")))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&harness.server)
        .await;

    let dispatcher = harness.dispatcher();
    let file = FileDescriptor::new("denied", "notes.txt", FileType::Document, 10);
    let outcome = dispatcher
        .dispatch_download(&file, &mut TriggerEvent::default())
        .await;

    match outcome {
        DispatchOutcome::FellBack(DispatchFailure::DownloadFailed { status }) => {
            assert_eq!(status, StatusCode::UNAUTHORIZED)
        }
        other => panic!("预期为 DownloadFailed 回退，得到 {other:?}"),
    }
    assert_eq!(
        harness.navigator.opened(),
        vec![construct_download_url(&harness.backend, "denied")]
    );
    assert_eq!(harness.registry.live_count(), 0);
}

#[tokio::test]
async fn object_url_is_revoked_when_activation_fails() {
    let harness = Harness::start_with(RecordingNavigator::default(), true).await;
    mount_file(&harness, "abc", b"hello").await;

    let dispatcher = harness.dispatcher();
    let file = FileDescriptor::new("abc", "hello.txt", FileType::Document, 5);
    let outcome = dispatcher
        .dispatch_download(&file, &mut TriggerEvent::default())
        .await;

    assert!(matches!(
        outcome,
        DispatchOutcome::FellBack(DispatchFailure::SaveFailed(_))
    ));

    let activations = harness.surface.activations();
    assert_eq!(activations.len(), 1);
    assert!(activations[0].1, "激活时对象 URL 应仍可解析");
    assert_eq!(harness.surface.attached_now(), 0);
    assert_eq!(harness.registry.live_count(), 0);
    assert_eq!(harness.navigator.opened().len(), 1);
}

#[tokio::test]
async fn fallback_navigation_failure_is_not_propagated() {
    let harness = Harness::start_with(RecordingNavigator::failing(), false).await;
    let dispatcher = harness.dispatcher();
    let file = FileDescriptor::new("vid1", "clip.mp4", FileType::Video, 1);

    let outcome = dispatcher
        .dispatch_download(&file, &mut TriggerEvent::default())
        .await;

    assert!(matches!(outcome, DispatchOutcome::Navigated));
    assert_eq!(harness.navigator.opened().len(), 1);
}

#[tokio::test]
async fn repeated_trigger_is_ignored_while_in_flight() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path(harness.download_path("slow")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"slow body".as_slice())
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&harness.server)
        .await;

    let dispatcher = harness.dispatcher();
    let file = FileDescriptor::new("slow", "slow.txt", FileType::Document, 9);
    let mut first_event = TriggerEvent::default();
    let mut second_event = TriggerEvent::default();

    let (first, second) = tokio::join!(
        dispatcher.dispatch_download(&file, &mut first_event),
        dispatcher.dispatch_download(&file, &mut second_event),
    );

    assert!(matches!(first, DispatchOutcome::Saved(_)));
    assert!(matches!(
        second,
        DispatchOutcome::Skipped(SkipReason::AlreadyInFlight)
    ));
    assert!(second_event.default_prevented());
    assert_eq!(harness.received_count().await, 1);
    assert!(dispatcher.in_flight().get_current().unwrap().is_empty());
}

#[tokio::test]
async fn repeated_trigger_runs_concurrently_when_dedupe_disabled() {
    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path(harness.download_path("dup")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(b"dup".as_slice())
                .set_delay(Duration::from_millis(100)),
        )
        .expect(2)
        .mount(&harness.server)
        .await;

    let dispatcher = harness.dispatcher().dedupe_in_flight(false);
    let file = FileDescriptor::new("dup", "dup.txt", FileType::Document, 3);
    let mut first_event = TriggerEvent::default();
    let mut second_event = TriggerEvent::default();

    let (first, second) = tokio::join!(
        dispatcher.dispatch_download(&file, &mut first_event),
        dispatcher.dispatch_download(&file, &mut second_event),
    );

    let (first, second) = match (first, second) {
        (DispatchOutcome::Saved(a), DispatchOutcome::Saved(b)) => (a, b),
        other => panic!("预期两次都为 Saved，得到 {other:?}"),
    };
    assert_ne!(first.path, second.path);
    assert_eq!(std::fs::read(&first.path).unwrap(), b"dup");
    assert_eq!(std::fs::read(&second.path).unwrap(), b"dup");
    assert_eq!(harness.received_count().await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_same_name_downloads_never_overwrite_each_other() {
    const COUNT: usize = 16;

    let harness = Harness::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/v1/storage/buckets/files/files/doc-\d+/download$"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"same name".as_slice()))
        .expect(COUNT as u64)
        .mount(&harness.server)
        .await;

    let dispatcher = Arc::new(harness.dispatcher());
    let tasks: Vec<_> = (0..COUNT)
        .map(|i| {
            let dispatcher = dispatcher.clone();
            tokio::spawn(async move {
                let file =
                    FileDescriptor::new(format!("doc-{i}"), "report.pdf", FileType::Document, 9);
                dispatcher
                    .dispatch_download(&file, &mut TriggerEvent::default())
                    .await
            })
        })
        .collect();

    let mut paths = Vec::new();
    for task in tasks {
        match task.await.unwrap() {
            DispatchOutcome::Saved(saved) => paths.push(saved.path),
            other => panic!("预期为 Saved，得到 {other:?}"),
        }
    }

    paths.sort();
    paths.dedup();
    assert_eq!(paths.len(), COUNT, "每次保存都应得到独立的文件");
    assert_eq!(
        std::fs::read_dir(harness.save_dir.path()).unwrap().count(),
        COUNT
    );
    assert!(harness.navigator.opened().is_empty());
}

#[tokio::test]
async fn progress_is_published_for_buffered_download() {
    let harness = Harness::start().await;
    mount_file(&harness, "abc", b"0123456789").await;

    let seen = Arc::new(AtomicUsize::new(0));
    let seen_in_hook = seen.clone();
    let dispatcher = harness
        .dispatcher()
        .with_on_progress_hook(move |done, total| {
            assert_eq!(total, Some(10));
            seen_in_hook.store(done as usize, Ordering::SeqCst);
        });
    let progress = dispatcher.progress();

    let file = FileDescriptor::new("abc", "digits.txt", FileType::Document, 10);
    let outcome = dispatcher
        .dispatch_download(&file, &mut TriggerEvent::default())
        .await;
    assert!(matches!(outcome, DispatchOutcome::Saved(_)));

    let last = progress.get_current().unwrap();
    assert_eq!(last.bucket_file_id.as_deref(), Some("abc"));
    assert_eq!(last.bytes_done, 10);
    assert_eq!(last.pct(), 100.0);
    assert_eq!(seen.load(Ordering::SeqCst), 10);
}

#[tokio::test]
async fn threshold_can_be_lowered() {
    let harness = Harness::start().await;
    let dispatcher = harness.dispatcher().large_file_threshold(100);
    let file = FileDescriptor::new("abc", "report.pdf", FileType::Document, 101);

    let outcome = dispatcher
        .dispatch_download(&file, &mut TriggerEvent::default())
        .await;

    assert!(matches!(outcome, DispatchOutcome::Navigated));
    assert_eq!(harness.received_count().await, 0);
}
