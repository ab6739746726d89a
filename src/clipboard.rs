//! System clipboard access for the contact card's copy shortcut.
//!
//! Keeps the `arboard` platform backend out of the component code.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("clipboard backend error: {0}")]
pub struct ClipboardError(#[from] arboard::Error);

/// Put `text` on the system clipboard.
pub fn copy(text: &str) -> Result<(), ClipboardError> {
    arboard::Clipboard::new()?.set_text(text.to_owned())?;
    Ok(())
}
