//! Transient notifications.

use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }
}

pub trait ToastSink: Send + Sync {
    fn dispatch(&self, toast: Toast);
}

/// A sink that keeps every toast, for tests and the demo binary.
#[derive(Debug, Clone, Default)]
pub struct ToastLog {
    entries: Arc<Mutex<Vec<Toast>>>,
}

impl ToastLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> Vec<Toast> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Toast> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl ToastSink for ToastLog {
    fn dispatch(&self, toast: Toast) {
        tracing::debug!(kind = ?toast.kind, message = %toast.message, "Toast");
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(toast);
    }
}
