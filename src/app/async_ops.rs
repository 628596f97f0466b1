//! Async operations for the TUI
//!
//! Uses channels to communicate between the sync TUI loop and async tasks.

use std::time::Duration;
use tokio::sync::mpsc;

use crate::ai::{MockSuggester, Suggester};
use crate::config::Config;
use crate::images::{self, FileInput, IngestReport};
use crate::publish::{MockPublisher, PublishReceipt, PublishRequest};

/// Commands sent from the TUI to the async worker
#[derive(Debug, Clone)]
pub enum AsyncCommand {
    /// Ask for an AI rewrite of the body; `request` tags the status reset
    Suggest { content: String, request: u64 },
    /// Publish a validated request
    Publish { request: PublishRequest },
    /// Read image files into attachments
    Attach { files: Vec<FileInput> },
    /// Fill in the demo body after the start-up delay
    SeedDemo,
    /// Shutdown the worker
    Shutdown,
}

/// Results sent back from the async worker to the TUI
#[derive(Debug)]
pub enum AsyncResult {
    /// Suggestion ready
    Suggested { text: String },
    /// Suggestion failed
    SuggestFailed { message: String },
    /// AI indicator should go back to ready, if `request` is still the latest
    AiStatusReset { request: u64 },
    /// Publish finished
    Published { receipt: PublishReceipt },
    /// Publish button should go back to idle
    PublishReset,
    /// Images were read
    Attached { report: IngestReport },
    /// Demo delay elapsed
    DemoSeeded,
}

/// Channel handles for communicating with the async worker
pub struct AsyncHandle {
    /// Send commands to the worker
    pub cmd_tx: mpsc::Sender<AsyncCommand>,
    /// Receive results from the worker
    pub result_rx: mpsc::Receiver<AsyncResult>,
}

/// Latencies the worker simulates
#[derive(Debug, Clone, Copy)]
pub struct WorkerTimings {
    pub ai_delay: Duration,
    pub ai_status_reset: Duration,
    pub publish_delay: Duration,
    pub publish_reset: Duration,
    pub demo_seed_delay: Duration,
}

impl From<&Config> for WorkerTimings {
    fn from(config: &Config) -> Self {
        Self {
            ai_delay: config.ai_delay(),
            ai_status_reset: config.ai_status_reset(),
            publish_delay: config.publish_delay(),
            publish_reset: config.publish_reset(),
            demo_seed_delay: config.demo_seed_delay(),
        }
    }
}

/// Spawn the async worker and return handles
///
/// Each command runs in its own task so a slow publish never holds up
/// a suggestion. Attach batches share one queue and finish in submission
/// order. Must be called from within a tokio runtime.
pub fn spawn_worker(timings: WorkerTimings, suggester: MockSuggester) -> AsyncHandle {
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<AsyncCommand>(32);
    let (result_tx, result_rx) = mpsc::channel::<AsyncResult>(32);
    let (attach_tx, mut attach_rx) = mpsc::channel::<Vec<FileInput>>(32);

    let publisher = MockPublisher::new(timings.publish_delay);

    let attach_results = result_tx.clone();
    tokio::spawn(async move {
        while let Some(files) = attach_rx.recv().await {
            let report = images::ingest(files).await;
            if attach_results
                .send(AsyncResult::Attached { report })
                .await
                .is_err()
            {
                break;
            }
        }
    });

    tokio::spawn(async move {
        while let Some(cmd) = cmd_rx.recv().await {
            let tx = result_tx.clone();
            match cmd {
                AsyncCommand::Shutdown => break,
                AsyncCommand::Suggest { content, request } => {
                    let suggester = suggester.clone();
                    tokio::spawn(async move {
                        handle_suggest(&tx, &suggester, &content, request, timings.ai_status_reset)
                            .await;
                    });
                }
                AsyncCommand::Publish { request } => {
                    let publisher = publisher.clone();
                    tokio::spawn(async move {
                        handle_publish(&tx, &publisher, request, timings.publish_reset).await;
                    });
                }
                AsyncCommand::Attach { files } => {
                    let _ = attach_tx.send(files).await;
                }
                AsyncCommand::SeedDemo => {
                    tokio::spawn(async move {
                        tokio::time::sleep(timings.demo_seed_delay).await;
                        let _ = tx.send(AsyncResult::DemoSeeded).await;
                    });
                }
            }
        }
    });

    AsyncHandle { cmd_tx, result_rx }
}

async fn handle_suggest(
    result_tx: &mpsc::Sender<AsyncResult>,
    suggester: &MockSuggester,
    content: &str,
    request: u64,
    reset_after: Duration,
) {
    let result = match suggester.suggest(content).await {
        Ok(text) => AsyncResult::Suggested { text },
        Err(e) => {
            tracing::error!("AI generation error: {e}");
            AsyncResult::SuggestFailed {
                message: e.to_string(),
            }
        }
    };
    if result_tx.send(result).await.is_err() {
        return;
    }

    tokio::time::sleep(reset_after).await;
    let _ = result_tx.send(AsyncResult::AiStatusReset { request }).await;
}

async fn handle_publish(
    result_tx: &mpsc::Sender<AsyncResult>,
    publisher: &MockPublisher,
    request: PublishRequest,
    reset_after: Duration,
) {
    let receipt = publisher.publish(request).await;
    if result_tx
        .send(AsyncResult::Published { receipt })
        .await
        .is_err()
    {
        return;
    }

    tokio::time::sleep(reset_after).await;
    let _ = result_tx.send(AsyncResult::PublishReset).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Platform;

    fn timings() -> WorkerTimings {
        WorkerTimings::from(&Config::default())
    }

    fn suggester() -> MockSuggester {
        MockSuggester::new(timings().ai_delay)
    }

    #[tokio::test(start_paused = true)]
    async fn test_suggest_then_reset() {
        let mut handle = spawn_worker(timings(), suggester());
        handle
            .cmd_tx
            .send(AsyncCommand::Suggest {
                content: "Handmade mugs".to_string(),
                request: 1,
            })
            .await
            .unwrap();

        match handle.result_rx.recv().await.unwrap() {
            AsyncResult::Suggested { text } => assert!(text.contains("Handmade mugs")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            handle.result_rx.recv().await.unwrap(),
            AsyncResult::AiStatusReset { request: 1 }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_suggest_then_reset() {
        let timings = timings();
        let mut handle = spawn_worker(
            timings,
            MockSuggester::failing(timings.ai_delay, "model offline"),
        );
        handle
            .cmd_tx
            .send(AsyncCommand::Suggest {
                content: "Handmade mugs".to_string(),
                request: 7,
            })
            .await
            .unwrap();

        let start = tokio::time::Instant::now();
        match handle.result_rx.recv().await.unwrap() {
            AsyncResult::SuggestFailed { message } => {
                assert_eq!(message, "AI content generation failed: model offline");
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(start.elapsed() >= timings.ai_delay);

        assert!(matches!(
            handle.result_rx.recv().await.unwrap(),
            AsyncResult::AiStatusReset { request: 7 }
        ));
        assert!(start.elapsed() >= timings.ai_delay + timings.ai_status_reset);
    }

    #[tokio::test(start_paused = true)]
    async fn test_publish_then_reset() {
        let mut handle = spawn_worker(timings(), suggester());
        let request = PublishRequest {
            platforms: vec![Platform::Etsy, Platform::Blogger],
            content: "Shop update".to_string(),
            image_count: 0,
        };
        handle
            .cmd_tx
            .send(AsyncCommand::Publish { request })
            .await
            .unwrap();

        match handle.result_rx.recv().await.unwrap() {
            AsyncResult::Published { receipt } => {
                assert_eq!(receipt.platforms, vec![Platform::Etsy, Platform::Blogger]);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            handle.result_rx.recv().await.unwrap(),
            AsyncResult::PublishReset
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_demo_seed_waits() {
        let mut handle = spawn_worker(timings(), suggester());
        handle.cmd_tx.send(AsyncCommand::SeedDemo).await.unwrap();

        let start = tokio::time::Instant::now();
        assert!(matches!(
            handle.result_rx.recv().await.unwrap(),
            AsyncResult::DemoSeeded
        ));
        assert!(start.elapsed() >= Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_attach_reports_skips() {
        let mut handle = spawn_worker(timings(), suggester());
        let files = vec![
            FileInput::from_bytes("a.png", "image/png", vec![1, 2, 3]),
            FileInput::from_bytes("notes.txt", "text/plain", b"hi".to_vec()),
        ];
        handle
            .cmd_tx
            .send(AsyncCommand::Attach { files })
            .await
            .unwrap();

        match handle.result_rx.recv().await.unwrap() {
            AsyncResult::Attached { report } => {
                assert_eq!(report.added.len(), 1);
                assert_eq!(report.skipped.len(), 1);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_attach_batches_keep_submission_order() {
        let dir = tempfile::tempdir().unwrap();
        let big = dir.path().join("big.png");
        std::fs::write(&big, vec![0u8; 4 * 1024 * 1024]).unwrap();

        let mut handle = spawn_worker(timings(), suggester());
        handle
            .cmd_tx
            .send(AsyncCommand::Attach {
                files: vec![FileInput::from_path(&big)],
            })
            .await
            .unwrap();
        handle
            .cmd_tx
            .send(AsyncCommand::Attach {
                files: vec![FileInput::from_bytes("small.png", "image/png", vec![1])],
            })
            .await
            .unwrap();

        let mut names = Vec::new();
        for _ in 0..2 {
            match handle.result_rx.recv().await.unwrap() {
                AsyncResult::Attached { report } => names.push(report.added[0].name.clone()),
                other => panic!("unexpected result: {other:?}"),
            }
        }
        assert_eq!(names, vec!["big.png", "small.png"]);
    }
}
