//! The gateway: registration surface, lifecycle and outbound sending.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use courier_api::ApiClient;
use courier_core::{
    Endpoint, Error, Message, ParseMode, Recipient, Result, SendOptions, Transport, User,
};

use crate::context::Context;
use crate::poller::LongPoller;
use crate::registry::{BoxedHandler, HandlerRegistry, into_handler};
use crate::sendable::Sendable;

/// The failure sink: receives every handler and retrieval error.
///
/// Retrieval errors carry no context. The sink must not panic; it runs on
/// dispatch and retrieval tasks.
pub type OnError = Arc<dyn Fn(&Error, Option<&Context>) + Send + Sync>;

// ============================================================================
// Settings
// ============================================================================

/// Construction-time settings for a [`Bot`].
pub struct Settings {
    /// Bot API token.
    pub token: String,
    /// Update retrieval strategy.
    pub poller: LongPoller,
    /// Capacity of the retrieval → dispatch queue.
    pub queue_capacity: usize,
    /// Run handlers inline on the dispatch loop instead of spawning them.
    pub synchronous: bool,
    /// Default parse mode applied to sends that do not set their own.
    pub parse_mode: ParseMode,
    /// Raises tracing detail for every processed update.
    pub verbose: bool,
    /// Override of the platform API base URL.
    pub api_url: Option<String>,
    /// Failure sink; defaults to a `tracing` error log.
    pub on_error: Option<OnError>,
}

impl Settings {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            poller: LongPoller::default(),
            queue_capacity: 100,
            synchronous: false,
            parse_mode: ParseMode::Default,
            verbose: false,
            api_url: None,
            on_error: None,
        }
    }
}

// ============================================================================
// Bot
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PollState {
    Idle,
    Polling,
    Stopping,
}

struct LifeCycle {
    state: PollState,
    stop: Option<CancellationToken>,
    retrieval: Option<JoinHandle<()>>,
}

/// The update dispatch engine.
///
/// Cheap to clone; clones share the registry, the transport and the poll
/// lifecycle. Typical use: register handlers with [`Bot::handle`], then
/// run [`Bot::start`] until another task calls [`Bot::stop`].
#[derive(Clone)]
pub struct Bot {
    inner: Arc<BotInner>,
}

struct BotInner {
    api: Arc<dyn Transport>,
    me: User,
    registry: HandlerRegistry,
    on_error: OnError,
    synchronous: bool,
    parse_mode: ParseMode,
    verbose: bool,
    poller: LongPoller,
    queue_capacity: usize,
    lifecycle: Mutex<LifeCycle>,
}

fn default_on_error(err: &Error, ctx: Option<&Context>) {
    match ctx {
        Some(ctx) => error!(update_id = ctx.update().id, error = %err, "handler failed"),
        None => error!(error = %err, "update retrieval failed"),
    }
}

impl Bot {
    /// Builds a gateway over the HTTP transport and authenticates it.
    pub async fn new(settings: Settings) -> Result<Self> {
        let api = match &settings.api_url {
            Some(url) => ApiClient::with_api_url(&settings.token, url),
            None => ApiClient::new(&settings.token),
        };
        Self::with_transport(Arc::new(api), settings).await
    }

    /// Builds a gateway over an arbitrary transport.
    ///
    /// Fetches the bot's own identity up front; a failure here is fatal,
    /// nothing else works without it.
    pub async fn with_transport(api: Arc<dyn Transport>, settings: Settings) -> Result<Self> {
        let me = api.get_me().await.map_err(Error::Api)?;
        info!(
            id = me.id,
            username = me.username.as_deref().unwrap_or(""),
            "authorized"
        );
        Ok(Self {
            inner: Arc::new(BotInner {
                api,
                me,
                registry: HandlerRegistry::new(),
                on_error: settings.on_error.unwrap_or_else(|| Arc::new(default_on_error)),
                synchronous: settings.synchronous,
                parse_mode: settings.parse_mode,
                verbose: settings.verbose,
                poller: settings.poller,
                queue_capacity: settings.queue_capacity,
                lifecycle: Mutex::new(LifeCycle {
                    state: PollState::Idle,
                    stop: None,
                    retrieval: None,
                }),
            }),
        })
    }

    /// The authenticated bot account.
    pub fn me(&self) -> &User {
        &self.inner.me
    }

    // ========================================================================
    // Registration
    // ========================================================================

    /// Registers `handler` for `endpoint`: a command (`"/start"`), an
    /// `endpoint::*` route constant, literal message text, or a button.
    ///
    /// Re-registering an endpoint replaces the previous handler.
    pub fn handle<E, F, Fut>(&self, endpoint: E, handler: F)
    where
        E: Into<Endpoint>,
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<()>> + Send + 'static,
    {
        self.inner
            .registry
            .register(endpoint.into().into_key(), into_handler(handler));
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Retrieves and dispatches updates until [`Bot::stop`] is called.
    ///
    /// Retrieval runs on its own task; this future runs the dispatch loop
    /// and resolves once the queue drains after a stop. Calling `start`
    /// while already polling returns immediately.
    pub async fn start(&self) {
        let mut queue = {
            let mut life = self.inner.lifecycle.lock();
            if life.state != PollState::Idle {
                return;
            }
            let (tx, rx) = mpsc::channel(self.inner.queue_capacity);
            let token = CancellationToken::new();
            let poller = self.inner.poller.clone();
            let api = self.inner.api.clone();
            let sink = self.inner.on_error.clone();
            let stop = token.clone();
            life.retrieval = Some(tokio::spawn(async move {
                poller
                    .poll(api, tx, stop, move |err| {
                        sink(&Error::CouldNotUpdate(err), None);
                    })
                    .await;
            }));
            life.stop = Some(token);
            life.state = PollState::Polling;
            rx
        };

        info!(
            username = self.inner.me.username.as_deref().unwrap_or(""),
            "polling started"
        );
        while let Some(update) = queue.recv().await {
            self.process_update(update).await;
        }
        info!("polling finished");

        self.inner.lifecycle.lock().state = PollState::Idle;
    }

    /// Stops retrieval and lets the dispatch loop drain.
    ///
    /// Waits for the retrieval task to exit; already-queued updates are
    /// still dispatched by the `start` future before it resolves.
    pub async fn stop(&self) {
        let retrieval = {
            let mut life = self.inner.lifecycle.lock();
            if life.state != PollState::Polling {
                return;
            }
            life.state = PollState::Stopping;
            if let Some(token) = life.stop.take() {
                token.cancel();
            }
            life.retrieval.take()
        };
        if let Some(handle) = retrieval {
            // The task only returns, so a join error means it panicked.
            if let Err(err) = handle.await {
                error!(error = %err, "retrieval task failed");
            }
        }
    }

    pub fn is_polling(&self) -> bool {
        self.inner.lifecycle.lock().state == PollState::Polling
    }

    // ========================================================================
    // Sending
    // ========================================================================

    /// Sends `what` to `to` with default options.
    pub async fn send(&self, to: &dyn Recipient, what: impl Sendable) -> Result<Message> {
        what.send_to(self, to.chat_id(), SendOptions::new()).await
    }

    pub async fn send_with(
        &self,
        to: &dyn Recipient,
        what: impl Sendable,
        options: SendOptions,
    ) -> Result<Message> {
        what.send_to(self, to.chat_id(), options).await
    }

    pub(crate) async fn deliver_text(
        &self,
        chat_id: i64,
        text: &str,
        options: SendOptions,
    ) -> Result<Message> {
        let options = self.finalize_options(options);
        let message = self.inner.api.send_message(chat_id, text, &options).await?;
        Ok(message)
    }

    pub(crate) async fn deliver_document(
        &self,
        chat_id: i64,
        document: &courier_core::InputDocument,
        options: SendOptions,
    ) -> Result<Message> {
        let options = self.finalize_options(options);
        let message = self
            .inner
            .api
            .send_document(chat_id, document, &options)
            .await?;
        Ok(message)
    }

    /// Applies the gateway-wide defaults and encodes button addresses.
    fn finalize_options(&self, mut options: SendOptions) -> SendOptions {
        if options.parse_mode == ParseMode::Default {
            options.parse_mode = self.inner.parse_mode;
        }
        if let Some(markup) = &mut options.reply_markup {
            markup.encode_callbacks();
        }
        options
    }

    // ========================================================================
    // Internals shared with dispatch
    // ========================================================================

    pub(crate) fn registry(&self) -> &HandlerRegistry {
        &self.inner.registry
    }

    pub(crate) fn lookup(&self, key: &str) -> Option<BoxedHandler> {
        self.inner.registry.lookup(key)
    }

    pub(crate) fn on_error_sink(&self) -> &OnError {
        &self.inner.on_error
    }

    pub(crate) fn is_synchronous(&self) -> bool {
        self.inner.synchronous
    }

    pub(crate) fn is_verbose(&self) -> bool {
        self.inner.verbose
    }
}

impl std::fmt::Debug for Bot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bot")
            .field("me", &self.inner.me.username)
            .field("handlers", &self.inner.registry.len())
            .finish()
    }
}
