//! Reply extraction from fetched thread messages.

use crate::ports::{MessageRole, ThreadMessage};

/// Extracts the assistant's reply from a fetched message list.
///
/// Scans the list in its given order and returns the value of the first
/// text-typed content part found on an assistant-role message. First-match,
/// not best-match: later or longer candidates are never preferred. Empty
/// text parts are skipped.
pub fn extract_reply(messages: &[ThreadMessage]) -> Option<String> {
    for message in messages {
        if message.role != MessageRole::Assistant {
            continue;
        }
        for part in &message.content {
            if let Some(text) = part.as_text() {
                if !text.is_empty() {
                    return Some(text.to_string());
                }
            }
        }
    }
    None
}
