// Console buffer for user-facing lines (phase notices, report lines)

use once_cell::sync::Lazy;
use std::sync::Mutex;

use crate::clipboard::ClipboardWriter;
use crate::error::ProphetError;

const CONSOLE_CAPACITY: usize = 2000;

// Global in-memory console buffer
static CONSOLE_BUFFER: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn append_console(message: &str) {
    tracing::info!(target: "prophet::console", "{}", message);
    if let Ok(mut buf) = CONSOLE_BUFFER.lock() {
        buf.push(message.to_string());
        // Keep buffer bounded to last 2000 lines
        if buf.len() > CONSOLE_CAPACITY {
            let excess = buf.len() - CONSOLE_CAPACITY;
            buf.drain(0..excess);
        }
    }
}

pub fn console_snapshot() -> Vec<String> {
    CONSOLE_BUFFER
        .lock()
        .map(|buf| buf.clone())
        .unwrap_or_default()
}

/// Copy the whole buffer to the clipboard. Returns the number of lines copied.
pub fn copy_console_to_clipboard(clipboard: &dyn ClipboardWriter) -> Result<usize, ProphetError> {
    let lines = console_snapshot();
    if lines.is_empty() {
        return Err(ProphetError::Clipboard("No logs available".to_string()));
    }
    clipboard.write_text(&lines.join("\n"))?;
    Ok(lines.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::MockClipboard;

    #[test]
    fn buffer_is_bounded_and_exportable() {
        for i in 0..(CONSOLE_CAPACITY + 10) {
            append_console(&format!("console line {}", i));
        }
        let lines = console_snapshot();
        assert!(lines.len() <= CONSOLE_CAPACITY);
        let newest = format!("console line {}", CONSOLE_CAPACITY + 9);
        assert!(lines.contains(&newest));
        assert!(!lines.contains(&"console line 0".to_string()));

        let clipboard = MockClipboard::default();
        let copied = copy_console_to_clipboard(&clipboard).unwrap();
        assert_eq!(copied, clipboard.writes()[0].lines().count());
    }
}
