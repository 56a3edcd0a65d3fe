//! System clipboard backed by arboard.
//!
//! arboard can write HTML alongside plain text but cannot read HTML back on every
//! platform. The provider remembers the last payload it wrote: when the system
//! clipboard still holds that payload's text, the HTML rendition is returned too.

use tabgrid_core::{ClipboardPayload, ClipboardProvider, GridError, Result};
use tracing::debug;

#[derive(Default)]
pub struct SystemClipboard {
    last_written: Option<ClipboardPayload>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

fn open() -> Result<arboard::Clipboard> {
    arboard::Clipboard::new().map_err(unavailable)
}

fn unavailable(err: arboard::Error) -> GridError {
    GridError::ClipboardUnavailable(err.to_string())
}

impl ClipboardProvider for SystemClipboard {
    fn write(&mut self, payload: &ClipboardPayload) -> Result<()> {
        let mut cb = open()?;
        match payload.html.as_deref() {
            Some(html) => cb
                .set_html(html, Some(payload.plain_text.as_str()))
                .map_err(unavailable)?,
            None => cb
                .set_text(payload.plain_text.as_str())
                .map_err(unavailable)?,
        }
        self.last_written = Some(payload.clone());
        Ok(())
    }

    fn write_text(&mut self, text: &str) -> Result<()> {
        open()?.set_text(text).map_err(unavailable)?;
        self.last_written = Some(ClipboardPayload::text(text));
        Ok(())
    }

    fn read(&mut self) -> Result<ClipboardPayload> {
        let text = open()?.get_text().map_err(unavailable)?;
        if let Some(last) = self.last_written.as_ref() {
            if last.plain_text == text {
                debug!("clipboard unchanged since last copy");
                return Ok(last.clone());
            }
        }
        Ok(ClipboardPayload::text(text))
    }
}
