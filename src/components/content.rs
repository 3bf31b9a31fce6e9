// Notification content: text, buttons, progress, images and style resolution

use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use super::{NotificationError, NotificationResult};

/// Maximum number of action buttons on one notification
pub const MAX_BUTTONS: usize = 3;

/// Visual template of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum NotificationStyle {
    #[default]
    #[serde(rename = "simple")]
    Simple,
    #[serde(rename = "progress")]
    Progress,
    #[serde(rename = "inbox")]
    Inbox,
    #[serde(rename = "big_text")]
    BigText,
    #[serde(rename = "large_icon")]
    LargeIcon,
    #[serde(rename = "big_picture")]
    BigPicture,
    #[serde(rename = "both_imgs")]
    BothImages,
}

impl NotificationStyle {
    /// Style name understood by the native library
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationStyle::Simple => "simple",
            NotificationStyle::Progress => "progress",
            NotificationStyle::Inbox => "inbox",
            NotificationStyle::BigText => "big_text",
            NotificationStyle::LargeIcon => "large_icon",
            NotificationStyle::BigPicture => "big_picture",
            NotificationStyle::BothImages => "both_imgs",
        }
    }
}

impl std::fmt::Display for NotificationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Callback invoked when the user taps a notification button
pub type ButtonCallback = Arc<dyn Fn() + Send + Sync>;

/// Action button shown under the notification
#[derive(Clone)]
pub struct NotificationButton {
    pub label: String,
    pub callback: ButtonCallback,
}

impl NotificationButton {
    pub fn new(label: impl Into<String>, callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            label: label.into(),
            callback: Arc::new(callback),
        }
    }

    /// Run the button's callback
    pub fn press(&self) {
        (self.callback)()
    }
}

impl std::fmt::Debug for NotificationButton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationButton")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Progress bar values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressBounds {
    pub current: i64,
    pub max: i64,
    pub indeterminate: bool,
}

impl ProgressBounds {
    /// Determinate progress; `max` must be positive and `current` within `[0, max]`
    pub fn new(current: i64, max: i64) -> NotificationResult<Self> {
        if max <= 0 {
            return Err(NotificationError::invalid(
                "progress.max",
                format!("max must be greater than zero (got {})", max),
            ));
        }
        let bounds = Self {
            current: 0,
            max,
            indeterminate: false,
        };
        bounds.check(current)?;
        Ok(Self { current, ..bounds })
    }

    /// Indeterminate progress bar with no meaningful position
    pub fn indeterminate() -> Self {
        Self {
            current: 0,
            max: 100,
            indeterminate: true,
        }
    }

    /// Validate a new position against the recorded max
    pub fn check(&self, current: i64) -> NotificationResult<()> {
        if current < 0 || current > self.max {
            return Err(NotificationError::invalid(
                "progress.current",
                format!("{} is outside [0, {}]", current, self.max),
            ));
        }
        Ok(())
    }

    pub fn fraction(&self) -> f64 {
        self.current as f64 / self.max as f64
    }
}

/// Image reference for icons and pictures
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSource {
    /// Path inside the app's assets or on disk
    File(PathBuf),
    /// Remote or content URL
    Url(Url),
}

impl ImageSource {
    /// Interpret a string as a URL when it parses as one with a scheme,
    /// otherwise as a file path
    pub fn parse(source: &str) -> Self {
        match Url::parse(source) {
            Ok(url) if url.scheme().len() > 1 => ImageSource::Url(url),
            _ => ImageSource::File(PathBuf::from(source)),
        }
    }

    /// String handed to the native library
    pub fn to_native(&self) -> String {
        match self {
            ImageSource::File(path) => path.display().to_string(),
            ImageSource::Url(url) => url.to_string(),
        }
    }
}

impl From<&str> for ImageSource {
    fn from(source: &str) -> Self {
        ImageSource::parse(source)
    }
}

impl From<String> for ImageSource {
    fn from(source: String) -> Self {
        ImageSource::parse(&source)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::File(path)
    }
}

impl From<Url> for ImageSource {
    fn from(url: Url) -> Self {
        ImageSource::Url(url)
    }
}

/// Everything a notification shows, accumulated by the builder
#[derive(Debug, Clone, Default)]
pub struct NotificationContent {
    pub title: String,
    pub message: String,
    pub app_icon: Option<ImageSource>,
    pub buttons: Vec<NotificationButton>,
    pub progress: Option<ProgressBounds>,
    pub inbox_lines: Vec<String>,
    pub big_text: Option<String>,
    pub large_icon: Option<ImageSource>,
    pub big_picture: Option<ImageSource>,
}

impl NotificationContent {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            ..Default::default()
        }
    }

    /// Whether the fields backing `style` are populated
    pub fn supports_style(&self, style: NotificationStyle) -> bool {
        match style {
            NotificationStyle::Simple => true,
            NotificationStyle::Progress => self.progress.is_some(),
            NotificationStyle::Inbox => !self.inbox_lines.is_empty(),
            NotificationStyle::BigText => self.big_text.is_some(),
            NotificationStyle::LargeIcon => self.large_icon.is_some(),
            NotificationStyle::BigPicture => self.big_picture.is_some(),
            NotificationStyle::BothImages => {
                self.large_icon.is_some() && self.big_picture.is_some()
            },
        }
    }

    /// Inbox lines in the native newline-joined form
    pub fn inbox_text(&self) -> String {
        self.inbox_lines.join("\n")
    }
}

/// Precedence among styles when several style-determining fields are set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePolicy {
    precedence: Vec<NotificationStyle>,
}

impl StylePolicy {
    /// Custom ordering, most specific first. `Simple` is always the last resort
    /// and is appended if missing; duplicates are dropped.
    pub fn new(order: impl IntoIterator<Item = NotificationStyle>) -> Self {
        let mut precedence: Vec<NotificationStyle> = Vec::new();
        for style in order {
            if !precedence.contains(&style) {
                precedence.push(style);
            }
        }
        precedence.retain(|s| *s != NotificationStyle::Simple);
        precedence.push(NotificationStyle::Simple);
        Self { precedence }
    }

    pub fn precedence(&self) -> &[NotificationStyle] {
        &self.precedence
    }

    /// Pick the first style in precedence order whose fields are populated
    pub fn resolve(&self, content: &NotificationContent) -> NotificationStyle {
        self.precedence
            .iter()
            .copied()
            .find(|style| content.supports_style(*style))
            .unwrap_or(NotificationStyle::Simple)
    }
}

impl Default for StylePolicy {
    fn default() -> Self {
        Self::new([
            NotificationStyle::BothImages,
            NotificationStyle::BigPicture,
            NotificationStyle::LargeIcon,
            NotificationStyle::BigText,
            NotificationStyle::Inbox,
            NotificationStyle::Progress,
        ])
    }
}
