//! Structured logging with view context.
//!
//! Views log through a [`ViewLogger`], which tags every event with the view
//! name and route and forwards it to `tracing`. The host installs a
//! subscriber once with [`init_tracing`].

use std::collections::BTreeMap;

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

/// Severity of a view event, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// `EnvFilter` directive for this level.
    pub fn as_directive(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// How the subscriber writes events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON lines, for log aggregation.
    Json,
    /// Human-readable, for development.
    #[default]
    Human,
}

/// Logging section of the storefront config.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level; `RUST_LOG` overrides it.
    #[serde(default)]
    pub level: LogLevel,
    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

/// Install the global `tracing` subscriber.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_directive()));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Human => builder.try_init(),
    }
    .map_err(|e| anyhow!("failed to install tracing subscriber: {e}"))
}

/// Logger bound to one storefront view.
///
/// Every event carries the view name and route as `tracing` fields.
#[derive(Debug, Clone)]
pub struct ViewLogger {
    view: &'static str,
    route: Option<String>,
    min_level: LogLevel,
}

impl ViewLogger {
    pub fn new(view: &'static str) -> Self {
        Self {
            view,
            route: None,
            min_level: LogLevel::Trace,
        }
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    /// Drop events below `level` before they reach `tracing`.
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn view(&self) -> &'static str {
        self.view
    }

    /// Start an event; nothing is written until [`ViewEvent::emit`].
    pub fn event(&self, level: LogLevel, message: impl Into<String>) -> ViewEvent<'_> {
        ViewEvent {
            logger: self,
            level,
            message: message.into(),
            fields: BTreeMap::new(),
        }
    }

    fn enabled(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }
}

/// A pending log event with extra key/value context.
#[must_use = "call `emit` to write the event"]
pub struct ViewEvent<'a> {
    logger: &'a ViewLogger,
    level: LogLevel,
    message: String,
    fields: BTreeMap<&'static str, serde_json::Value>,
}

impl ViewEvent<'_> {
    pub fn field(mut self, key: &'static str, value: impl Into<serde_json::Value>) -> Self {
        self.fields.insert(key, value.into());
        self
    }

    pub fn emit(self) {
        if !self.logger.enabled(self.level) {
            return;
        }
        let view = self.logger.view;
        let route = self.logger.route.as_deref().unwrap_or("");
        let context = context_json(self.fields);
        let message = self.message.as_str();

        match self.level {
            LogLevel::Trace => tracing::trace!(view, route, context = %context, "{message}"),
            LogLevel::Debug => tracing::debug!(view, route, context = %context, "{message}"),
            LogLevel::Info => tracing::info!(view, route, context = %context, "{message}"),
            LogLevel::Warn => tracing::warn!(view, route, context = %context, "{message}"),
            LogLevel::Error => tracing::error!(view, route, context = %context, "{message}"),
        }
    }
}

/// Event fields as one JSON object; values keep their JSON types.
fn context_json(fields: BTreeMap<&'static str, serde_json::Value>) -> serde_json::Value {
    serde_json::Value::Object(
        fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect(),
    )
}
