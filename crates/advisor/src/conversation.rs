//! Conversation-related types.

use routine_model::ChatMessage;

/// The chat transcript of the current routine.
///
/// It only lives in memory: the history starts empty, is cleared when a
/// new routine is generated, and grows with every message shown to the
/// user afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Returns the messages, oldest first.
    #[inline]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Returns the number of messages.
    #[inline]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Returns whether the conversation has no messages.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    #[inline]
    pub(crate) fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    #[inline]
    pub(crate) fn reset(&mut self) {
        self.messages.clear();
    }
}
