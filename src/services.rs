//! Host-side effects the core triggers but never waits on.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyKind {
    Success,
    Error,
}

/// Short user-facing messages (toasts).
pub trait Notifier {
    fn notify(&mut self, kind: NotifyKind, message: &str);
}

/// Destination for copied text.
pub trait ClipboardSink {
    fn write(&mut self, text: &str);
}
