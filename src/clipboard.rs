// Clipboard access for reports and exported logs

use copypasta::{ClipboardContext, ClipboardProvider};

use crate::error::ProphetError;

pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), ProphetError>;
}

/// System clipboard. A fresh context is opened per write, the OS handle is not kept around.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ProphetError> {
        let mut ctx = ClipboardContext::new()
            .map_err(|e| ProphetError::Clipboard(format!("Clipboard init failed: {}", e)))?;
        ctx.set_contents(text.to_string())
            .map_err(|e| ProphetError::Clipboard(format!("Clipboard write failed: {}", e)))
    }
}
