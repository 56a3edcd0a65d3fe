//! Clipboard abstraction layer.
//!
//! Provides a trait-based interface for clipboard operations so the editor can be
//! driven headlessly in tests and by any host with its own platform clipboard.

pub mod codec;
mod html;

pub use codec::{Block, deserialize, serialize};

use crate::error::{GridError, Result};
use tracing::warn;

/// What travels through the clipboard: a TSV rendition and, optionally, an HTML table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClipboardPayload {
    pub plain_text: String,
    pub html: Option<String>,
}

impl ClipboardPayload {
    pub fn text(text: impl Into<String>) -> Self {
        ClipboardPayload {
            plain_text: text.into(),
            html: None,
        }
    }

    pub fn with_html(text: impl Into<String>, html: impl Into<String>) -> Self {
        ClipboardPayload {
            plain_text: text.into(),
            html: Some(html.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.plain_text.is_empty() && self.html.as_deref().is_none_or(str::is_empty)
    }
}

/// Trait for clipboard operations.
pub trait ClipboardProvider {
    /// Write every format in the payload at once.
    fn write(&mut self, payload: &ClipboardPayload) -> Result<()>;

    /// Write plain text only.
    fn write_text(&mut self, text: &str) -> Result<()>;

    /// Read whatever the clipboard currently holds.
    fn read(&mut self) -> Result<ClipboardPayload>;
}

/// How much of a payload made it onto the clipboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Full,
    TextOnly,
    Failed,
}

/// Write a payload, falling back to text-only and finally to a log line.
///
/// Never returns an error: a failed copy must not interrupt editing.
pub fn copy_payload(provider: &mut dyn ClipboardProvider, payload: &ClipboardPayload) -> CopyOutcome {
    match provider.write(payload) {
        Ok(()) => CopyOutcome::Full,
        Err(err) => {
            warn!(error = %err, "multi-format clipboard write failed, retrying as text");
            match provider.write_text(&payload.plain_text) {
                Ok(()) => CopyOutcome::TextOnly,
                Err(err) => {
                    warn!(error = %err, "clipboard write failed");
                    CopyOutcome::Failed
                }
            }
        }
    }
}

/// In-process clipboard, used headlessly and in tests.
#[derive(Clone, Debug)]
pub struct MemoryClipboard {
    contents: Option<ClipboardPayload>,
    html_supported: bool,
    available: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        MemoryClipboard {
            contents: None,
            html_supported: true,
            available: true,
        }
    }

    /// A clipboard that rejects multi-format writes.
    pub fn text_only() -> Self {
        MemoryClipboard {
            html_supported: false,
            ..Self::new()
        }
    }

    /// A clipboard that rejects every write and read.
    pub fn unavailable() -> Self {
        MemoryClipboard {
            available: false,
            ..Self::new()
        }
    }

    pub fn contents(&self) -> Option<&ClipboardPayload> {
        self.contents.as_ref()
    }

    pub fn set_contents(&mut self, payload: ClipboardPayload) {
        self.contents = Some(payload);
    }

    fn check_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(GridError::ClipboardUnavailable("clipboard disabled".to_string()))
        }
    }
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn write(&mut self, payload: &ClipboardPayload) -> Result<()> {
        self.check_available()?;
        if !self.html_supported && payload.html.is_some() {
            return Err(GridError::ClipboardUnavailable(
                "text/html not supported".to_string(),
            ));
        }
        self.contents = Some(payload.clone());
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        self.check_available()?;
        self.contents = Some(ClipboardPayload::text(text));
        Ok(())
    }

    fn read(&mut self) -> Result<ClipboardPayload> {
        self.check_available()?;
        Ok(self.contents.clone().unwrap_or_default())
    }
}
