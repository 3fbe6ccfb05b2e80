//! Message assembly for the two kinds of chat requests.

use std::fmt::Write as _;

use routine_model::{CatalogItem, ChatMessage, ChatRequest, Role};

use crate::conversation::Conversation;

/// System instructions for generating a routine.
pub const ROUTINE_SYSTEM_PROMPT: &str = "You are a helpful beauty and \
    skincare advisor specializing in L'Oréal products. Provide personalized \
    routines and answer questions about skincare, haircare, makeup, and \
    fragrance.";

/// System instructions for follow-up questions.
pub const FOLLOW_UP_SYSTEM_PROMPT: &str = "You are a helpful beauty and \
    skincare advisor specializing in L'Oréal products. Answer questions \
    about the routine and related beauty topics.";

/// Formats the user message asking for a routine built from `selection`.
pub fn routine_prompt(selection: &[CatalogItem]) -> String {
    let mut products = String::new();
    for (idx, item) in selection.iter().enumerate() {
        if idx > 0 {
            products.push('\n');
        }
        // Writing into a `String` never fails.
        let _ = write!(
            products,
            "- {} {} ({}): {}",
            item.brand, item.name, item.category, item.description
        );
    }

    format!(
        "I have the following skincare/beauty products:\n\n{products}\n\n\
         Please create a personalized routine that explains when and how to \
         use each product for best results. Include morning and evening \
         steps if applicable."
    )
}

/// Builds the request that starts a new routine.
pub fn routine_request(selection: &[CatalogItem]) -> ChatRequest {
    ChatRequest::new(vec![
        ChatMessage::system(ROUTINE_SYSTEM_PROMPT),
        ChatMessage::user(routine_prompt(selection)),
    ])
}

/// Builds a follow-up request replaying the whole `history`.
pub fn follow_up_request(history: &Conversation, message: &str) -> ChatRequest {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::system(FOLLOW_UP_SYSTEM_PROMPT));
    messages.extend(history.messages().iter().map(|msg| ChatMessage {
        // Anything that isn't the user's is replayed as the assistant's.
        role: if msg.role == Role::User {
            Role::User
        } else {
            Role::Assistant
        },
        content: msg.content.clone(),
    }));
    messages.push(ChatMessage::user(message));
    ChatRequest::new(messages)
}
