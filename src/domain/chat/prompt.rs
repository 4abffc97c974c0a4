//! System prompt and completion message assembly.

use std::path::Path;

use crate::ports::{ChatMessage, MessageRole};

use super::turn::Turn;

/// Label inserted between the base instructions and the reference document.
const REFERENCE_HEADER: &str = "Reference File Content:";

/// Composes the system prompt from the base instruction text and the static
/// reference document.
///
/// The reference text is appended after the instructions, separated by a
/// blank line and a labeling header. An empty reference document yields the
/// instructions alone.
pub fn compose_system_prompt(instructions: &str, reference: &str) -> String {
    if reference.is_empty() {
        return instructions.to_string();
    }
    format!("{instructions}\n\n{REFERENCE_HEADER}\n{reference}")
}

/// Builds the ordered message sequence for a stateless completion call.
///
/// One system entry, then a (user, assistant) entry pair per prior turn in
/// original order, then the new user message: exactly `2N + 2` entries for
/// N prior turns.
pub fn build_messages(system_prompt: &str, history: &[Turn], message: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(2 * history.len() + 2);
    messages.push(ChatMessage::system(system_prompt));
    for turn in history {
        messages.push(ChatMessage::user(&turn.user));
        messages.push(ChatMessage::assistant(&turn.reply));
    }
    messages.push(ChatMessage::user(message));
    messages
}

/// Loads the static reference document embedded into every system prompt.
///
/// Read once at process start. A read failure is non-fatal: empty content is
/// substituted and a warning logged, so the chat route still answers.
pub fn load_reference_document(path: Option<&str>) -> String {
    let Some(path) = path else {
        return String::new();
    };
    match std::fs::read_to_string(Path::new(path)) {
        Ok(content) => {
            tracing::info!(path, bytes = content.len(), "Loaded reference document");
            content
        }
        Err(err) => {
            tracing::warn!(path, error = %err, "Could not read reference document");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn system_prompt_without_reference_is_instructions_only() {
        let prompt = compose_system_prompt("Be helpful.", "");
        assert_eq!(prompt, "Be helpful.");
    }

    #[test]
    fn system_prompt_embeds_reference_after_header() {
        let prompt = compose_system_prompt("Be helpful.", "Company facts.");
        assert_eq!(
            prompt,
            "Be helpful.\n\nReference File Content:\nCompany facts."
        );
    }

    #[test]
    fn empty_history_yields_system_and_user() {
        let messages = build_messages("sys", &[], "hello");
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::System);
        assert_eq!(messages[0].content, "sys");
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content, "hello");
    }

    #[test]
    fn history_turns_expand_in_order() {
        let history = vec![Turn::new("q1", "a1"), Turn::new("q2", "a2")];
        let messages = build_messages("sys", &history, "q3");

        assert_eq!(messages.len(), 6);
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[1].content, "q1");
        assert_eq!(messages[2].role, MessageRole::Assistant);
        assert_eq!(messages[2].content, "a1");
        assert_eq!(messages[3].content, "q2");
        assert_eq!(messages[4].content, "a2");
        assert_eq!(messages[5].role, MessageRole::User);
        assert_eq!(messages[5].content, "q3");
    }

    #[test]
    fn loads_reference_document_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reference.txt");
        std::fs::write(&path, "reference body").unwrap();

        let content = load_reference_document(Some(path.to_str().unwrap()));
        assert_eq!(content, "reference body");
    }

    #[test]
    fn missing_reference_document_yields_empty() {
        assert_eq!(load_reference_document(None), "");
        assert_eq!(
            load_reference_document(Some("/nonexistent/reference.txt")),
            ""
        );
    }

    proptest! {
        #[test]
        fn built_sequence_has_2n_plus_2_entries(
            history in prop::collection::vec((".*", ".*"), 0..20),
            message in ".*",
        ) {
            let history: Vec<Turn> = history
                .into_iter()
                .map(|(user, reply)| Turn::new(user, reply))
                .collect();
            let messages = build_messages("sys", &history, &message);

            prop_assert_eq!(messages.len(), 2 * history.len() + 2);
            prop_assert_eq!(messages[0].role, MessageRole::System);
            prop_assert_eq!(messages.last().unwrap().role, MessageRole::User);
            prop_assert_eq!(&messages.last().unwrap().content, &message);
            for (i, turn) in history.iter().enumerate() {
                prop_assert_eq!(messages[2 * i + 1].role, MessageRole::User);
                prop_assert_eq!(&messages[2 * i + 1].content, &turn.user);
                prop_assert_eq!(messages[2 * i + 2].role, MessageRole::Assistant);
                prop_assert_eq!(&messages[2 * i + 2].content, &turn.reply);
            }
        }
    }
}
