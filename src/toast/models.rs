//! Toast Notification Models

use serde::{Deserialize, Serialize};

/// Visual style of a toast
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Success,
    Error,
    Info,
    #[default]
    Default,
}

/// A queued notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Toast {
    /// Unique within the process
    pub id: String,

    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub variant: ToastVariant,

    /// Lifetime in milliseconds; 0 keeps the toast until dismissed
    pub duration: u64,
}

/// What a caller provides when raising a toast
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct ToastSpec {
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub variant: ToastVariant,

    /// Milliseconds; the notifier default applies when absent
    #[serde(default)]
    pub duration: Option<u64>,
}

impl ToastSpec {
    pub fn new(variant: ToastVariant, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            variant,
            ..Default::default()
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastVariant::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastVariant::Error, title)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(ToastVariant::Info, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the lifetime in milliseconds (0 = persistent).
    pub fn with_duration(mut self, millis: u64) -> Self {
        self.duration = Some(millis);
        self
    }
}
