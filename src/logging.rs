//! Logging setup
//!
//! Installs a `tracing-subscriber` fmt subscriber on stderr. The filter comes
//! from `PRELAUNCH_LOG` and defaults to `warn,prelaunch=info`.
//!
//! A [`ForwardingLayer`] sits next to the fmt layer. The next stage can attach
//! a sink to its [`LogForwarder`] handle to receive every formatted event,
//! which is how a splash screen or a plugin's log callback sees bootstrap
//! output.

use std::fmt::{self, Write as _};
use std::sync::{Arc, RwLock};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "PRELAUNCH_LOG";

const DEFAULT_FILTER: &str = "warn,prelaunch=info";
const VERBOSE_FILTER: &str = "warn,prelaunch=debug";

/// Receiver of formatted log lines
pub type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Install the global subscriber and return the forwarding handle.
///
/// Calling this again leaves the first subscriber in place; the returned
/// handle is then detached from any subscriber.
pub fn init_logging(verbose: bool) -> LogForwarder {
    let default = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let forwarder = LogForwarder::new();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(forwarder.layer())
        .try_init();

    forwarder
}

/// Handle to the sink of a [`ForwardingLayer`]
#[derive(Clone, Default)]
pub struct LogForwarder {
    sink: Arc<RwLock<Option<LogSink>>>,
}

impl LogForwarder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer forwarding events to this handle's sink
    pub fn layer(&self) -> ForwardingLayer {
        ForwardingLayer {
            forwarder: self.clone(),
        }
    }

    /// Route formatted events to `sink`, replacing any previous sink
    pub fn attach(&self, sink: impl Fn(&str) + Send + Sync + 'static) {
        if let Ok(mut slot) = self.sink.write() {
            *slot = Some(Arc::new(sink));
        }
    }

    pub fn detach(&self) {
        if let Ok(mut slot) = self.sink.write() {
            *slot = None;
        }
    }

    pub fn is_attached(&self) -> bool {
        self.sink.read().is_ok_and(|slot| slot.is_some())
    }

    fn forward(&self, line: &str) {
        let sink = match self.sink.read() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        if let Some(sink) = sink {
            sink(line);
        }
    }
}

impl fmt::Debug for LogForwarder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogForwarder")
            .field("attached", &self.is_attached())
            .finish()
    }
}

/// `tracing` layer forwarding formatted events to a [`LogForwarder`]
#[derive(Debug, Clone)]
pub struct ForwardingLayer {
    forwarder: LogForwarder,
}

impl<S: Subscriber> Layer<S> for ForwardingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        if !self.forwarder.is_attached() {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let line = format!("[{}] {}", event.metadata().level(), visitor.finish());
        self.forwarder.forward(&line);
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else {
            format!("{}{}", self.message, self.fields)
        }
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            let _ = write!(self.fields, " {}={}", field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            let _ = write!(self.message, "{value:?}");
        } else {
            let _ = write!(self.fields, " {}={:?}", field.name(), value);
        }
    }
}
