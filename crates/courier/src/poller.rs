//! Long-poll retrieval of updates.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use courier_core::{ApiError, Transport, Update};

/// Fetches update batches over long polls and feeds them to the dispatcher.
///
/// The confirmed offset lives behind an `Arc`, so clones handed to poll
/// tasks share it: stopping and restarting the gateway never re-fetches
/// updates already delivered to the queue.
#[derive(Debug, Clone)]
pub struct LongPoller {
    limit: usize,
    timeout: Duration,
    last_update_id: Arc<AtomicI64>,
}

impl Default for LongPoller {
    fn default() -> Self {
        Self::new(100, Duration::from_secs(10))
    }
}

impl LongPoller {
    pub fn new(limit: usize, timeout: Duration) -> Self {
        Self {
            limit,
            timeout,
            last_update_id: Arc::new(AtomicI64::new(0)),
        }
    }

    /// Highest update id delivered to the queue so far.
    pub fn last_update_id(&self) -> i64 {
        self.last_update_id.load(Ordering::SeqCst)
    }

    fn offset(&self) -> i64 {
        self.last_update_id.load(Ordering::SeqCst) + 1
    }

    // fetch_max keeps the offset monotonic even if a batch arrives out of
    // order relative to a concurrent restart.
    fn advance(&self, update_id: i64) {
        self.last_update_id.fetch_max(update_id, Ordering::SeqCst);
    }

    /// Polls until cancelled or the receiving side of `dest` is dropped.
    ///
    /// Retrieval failures are reported and the loop retries; the offset is
    /// advanced per update only after the update is accepted by the queue,
    /// so a full queue applies backpressure to retrieval instead of
    /// dropping updates.
    pub async fn poll(
        &self,
        api: Arc<dyn Transport>,
        dest: mpsc::Sender<Update>,
        stop: CancellationToken,
        report: impl Fn(ApiError) + Send,
    ) {
        loop {
            let batch = tokio::select! {
                _ = stop.cancelled() => return,
                result = api.get_updates(self.offset(), self.limit, self.timeout) => result,
            };
            let batch = match batch {
                Ok(batch) => batch,
                Err(err) => {
                    // Retry immediately; the long-poll timeout itself
                    // paces the loop on persistent failures.
                    report(err);
                    continue;
                }
            };
            debug!(count = batch.len(), offset = self.offset(), "fetched updates");
            for update in batch {
                let id = update.id;
                if dest.send(update).await.is_err() {
                    return;
                }
                self.advance(id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;

    use courier_core::{
        ApiResult, InputDocument, Message, SendOptions, UpdateKind, User,
    };

    /// Serves scripted batches and records the offset of every call.
    struct ScriptedTransport {
        batches: Mutex<Vec<ApiResult<Vec<i64>>>>,
        offsets: Mutex<Vec<i64>>,
    }

    impl ScriptedTransport {
        fn new(batches: Vec<ApiResult<Vec<i64>>>) -> Self {
            Self {
                batches: Mutex::new(batches),
                offsets: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn get_me(&self) -> ApiResult<User> {
            Ok(User::default())
        }

        async fn get_updates(
            &self,
            offset: i64,
            _limit: usize,
            _timeout: Duration,
        ) -> ApiResult<Vec<Update>> {
            self.offsets.lock().unwrap().push(offset);
            // Scope the guard so it is released before any await point,
            // keeping the returned future `Send`.
            let next = {
                let mut batches = self.batches.lock().unwrap();
                if batches.is_empty() {
                    None
                } else {
                    Some(batches.remove(0))
                }
            };
            let Some(batch) = next else {
                // Script exhausted: park until the test cancels the poll.
                futures::future::pending::<()>().await;
                unreachable!()
            };
            batch.map(|ids| {
                ids.into_iter()
                    .map(|id| Update::new(id, UpdateKind::Message(Message::default())))
                    .collect()
            })
        }

        async fn send_message(
            &self,
            _chat_id: i64,
            _text: &str,
            _options: &SendOptions,
        ) -> ApiResult<Message> {
            Ok(Message::default())
        }

        async fn send_document(
            &self,
            _chat_id: i64,
            _document: &InputDocument,
            _options: &SendOptions,
        ) -> ApiResult<Message> {
            Ok(Message::default())
        }
    }

    #[tokio::test]
    async fn offset_advances_past_delivered_updates() {
        let api = Arc::new(ScriptedTransport::new(vec![
            Ok(vec![3, 7]),
            Err(ApiError::Http("connection reset".into())),
            Ok(vec![9]),
        ]));
        let poller = LongPoller::new(100, Duration::from_millis(10));
        let (tx, mut rx) = mpsc::channel(16);
        let stop = CancellationToken::new();
        let errors = Arc::new(AtomicUsize::new(0));

        let poll = {
            let errors = errors.clone();
            let stop = stop.clone();
            let poller = poller.clone();
            let api = api.clone();
            tokio::spawn(async move {
                poller
                    .poll(api, tx, stop, move |_err| {
                        errors.fetch_add(1, Ordering::SeqCst);
                    })
                    .await;
            })
        };

        let mut delivered = Vec::new();
        for _ in 0..3 {
            delivered.push(rx.recv().await.unwrap().id);
        }
        stop.cancel();
        poll.await.unwrap();

        assert_eq!(delivered, vec![3, 7, 9]);
        assert_eq!(errors.load(Ordering::SeqCst), 1);
        assert_eq!(poller.last_update_id(), 9);
        // A failed fetch never rewinds the confirmed offset.
        let offsets = api.offsets.lock().unwrap().clone();
        assert_eq!(&offsets[..3], &[1, 8, 8]);
    }

    #[tokio::test]
    async fn full_queue_applies_backpressure_without_loss() {
        let api = Arc::new(ScriptedTransport::new(vec![Ok(vec![1, 2, 3])]));
        let poller = LongPoller::new(100, Duration::from_millis(10));
        let (tx, mut rx) = mpsc::channel(1);
        let stop = CancellationToken::new();

        let poll = {
            let stop = stop.clone();
            let poller = poller.clone();
            tokio::spawn(async move {
                poller.poll(api, tx, stop, |_err| {}).await;
            })
        };

        let mut delivered = Vec::new();
        for _ in 0..3 {
            delivered.push(rx.recv().await.unwrap().id);
        }
        stop.cancel();
        poll.await.unwrap();

        assert_eq!(delivered, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn offset_holds_for_updates_the_queue_never_took() {
        let api = Arc::new(ScriptedTransport::new(vec![Ok(vec![5])]));
        let poller = LongPoller::new(100, Duration::from_millis(10));
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let stop = CancellationToken::new();

        poller.poll(api, tx, stop, |_err| {}).await;

        // The update was fetched but never delivered; a restart fetches it
        // again instead of skipping it.
        assert_eq!(poller.last_update_id(), 0);
    }

    #[tokio::test]
    async fn cancelled_poll_returns_promptly() {
        let api = Arc::new(ScriptedTransport::new(vec![]));
        let poller = LongPoller::default();
        let (tx, _rx) = mpsc::channel(1);
        let stop = CancellationToken::new();
        stop.cancel();

        poller.poll(api, tx, stop, |_err| {}).await;
    }
}
