#![forbid(unsafe_code)]

//! Tracing capture for log assertions.
//!
//! A `tracing-subscriber` layer that records span names, event levels,
//! targets, and fields as strings. Install it for the duration of a closure
//! with [`with_captured_tracing`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

/// A span as it was opened.
#[derive(Debug, Clone)]
pub struct CapturedSpan {
    pub name: String,
    pub target: String,
    pub fields: HashMap<String, String>,
}

/// An emitted event.
#[derive(Debug, Clone)]
pub struct CapturedEvent {
    pub level: tracing::Level,
    pub target: String,
    pub message: String,
    pub fields: HashMap<String, String>,
    /// Innermost span active when the event fired.
    pub span: Option<String>,
}

/// Layer that appends everything it sees to shared buffers.
pub struct SpanCapture {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl SpanCapture {
    pub fn new() -> (Self, CaptureHandle) {
        let spans = Arc::new(Mutex::new(Vec::new()));
        let events = Arc::new(Mutex::new(Vec::new()));
        let handle = CaptureHandle {
            spans: spans.clone(),
            events: events.clone(),
        };
        (Self { spans, events }, handle)
    }
}

/// Read side of a [`SpanCapture`].
#[derive(Clone)]
pub struct CaptureHandle {
    spans: Arc<Mutex<Vec<CapturedSpan>>>,
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

// A poisoned buffer still holds everything recorded before the panic.
fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl CaptureHandle {
    pub fn spans(&self) -> Vec<CapturedSpan> {
        lock(&self.spans).clone()
    }

    pub fn events(&self) -> Vec<CapturedEvent> {
        lock(&self.events).clone()
    }

    /// Spans with the given name.
    pub fn spans_named(&self, name: &str) -> Vec<CapturedSpan> {
        lock(&self.spans)
            .iter()
            .filter(|s| s.name == name)
            .cloned()
            .collect()
    }

    /// Events emitted under `target`.
    pub fn events_for(&self, target: &str) -> Vec<CapturedEvent> {
        lock(&self.events)
            .iter()
            .filter(|e| e.target == target)
            .cloned()
            .collect()
    }

    /// Events at `level` whose message contains `needle`.
    pub fn find(&self, level: tracing::Level, needle: &str) -> Vec<CapturedEvent> {
        lock(&self.events)
            .iter()
            .filter(|e| e.level == level && e.message.contains(needle))
            .cloned()
            .collect()
    }
}

struct FieldVisitor(Vec<(String, String)>);

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
    fn record_f64(&mut self, field: &tracing::field::Field, value: f64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_u64(&mut self, field: &tracing::field::Field, value: u64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_i64(&mut self, field: &tracing::field::Field, value: i64) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
    fn record_bool(&mut self, field: &tracing::field::Field, value: bool) {
        self.0.push((field.name().to_string(), value.to_string()));
    }
}

impl<S> tracing_subscriber::Layer<S> for SpanCapture
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::span::Id,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = FieldVisitor(Vec::new());
        attrs.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        for field in attrs.metadata().fields() {
            fields.entry(field.name().to_string()).or_default();
        }
        lock(&self.spans).push(CapturedSpan {
            name: attrs.metadata().name().to_string(),
            target: attrs.metadata().target().to_string(),
            fields,
        });
    }

    fn on_event(&self, event: &tracing::Event<'_>, ctx: tracing_subscriber::layer::Context<'_, S>) {
        let mut visitor = FieldVisitor(Vec::new());
        event.record(&mut visitor);
        let mut fields: HashMap<String, String> = visitor.0.into_iter().collect();
        let message = fields.remove("message").unwrap_or_default();
        let span = ctx.lookup_current().map(|s| s.name().to_string());
        lock(&self.events).push(CapturedEvent {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message,
            fields,
            span,
        });
    }
}

/// Run `f` with a capturing subscriber as the thread default.
pub fn with_captured_tracing<F>(f: F) -> CaptureHandle
where
    F: FnOnce(),
{
    let (layer, handle) = SpanCapture::new();
    let subscriber = tracing_subscriber::registry().with(layer);
    tracing::subscriber::with_default(subscriber, f);
    handle
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_spans_and_events() {
        let handle = with_captured_tracing(|| {
            let span = tracing::debug_span!(target: "demo", "outer", step = 3_u64);
            let _guard = span.enter();
            tracing::warn!(target: "demo", node = "#4", "target missing");
        });

        let spans = handle.spans_named("outer");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].target, "demo");
        assert_eq!(spans[0].fields.get("step").map(String::as_str), Some("3"));

        let warns = handle.find(tracing::Level::WARN, "missing");
        assert_eq!(warns.len(), 1);
        assert_eq!(warns[0].span.as_deref(), Some("outer"));
        assert_eq!(warns[0].fields.get("node").map(String::as_str), Some("#4"));
    }

    #[test]
    fn filters_by_target() {
        let handle = with_captured_tracing(|| {
            tracing::info!(target: "a", "one");
            tracing::info!(target: "b", "two");
        });
        assert_eq!(handle.events().len(), 2);
        assert_eq!(handle.events_for("b")[0].message, "two");
    }
}
