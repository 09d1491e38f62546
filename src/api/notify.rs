//! Transient operator notifications ("toasts")

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastVariant {
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: ToastVariant::Success,
        }
    }

    pub fn destructive(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

/// Sink for toasts raised by the API client
pub trait Notifier: Send + Sync {
    fn notify(&self, toast: &Toast);
}

/// Records toasts in the log only
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, toast: &Toast) {
        match toast.variant {
            ToastVariant::Success => tracing::info!(toast = %toast.message, "Operation succeeded"),
            ToastVariant::Destructive => tracing::warn!(toast = %toast.message, "Operation failed"),
        }
    }
}

/// Prints toasts to the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, toast: &Toast) {
        match toast.variant {
            ToastVariant::Success => println!("✔ {}", toast.message),
            ToastVariant::Destructive => eprintln!("✘ {}", toast.message),
        }
    }
}
