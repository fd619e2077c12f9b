//! Chat collaborator contract.
//!
//! Defines the interface to the remote chat endpoints, decoupling the
//! conversation state machine from the transport (HTTP in production,
//! in-memory mocks in tests).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::model::{Conversation, Message};
use crate::error::Result;

/// Outgoing message payload.
///
/// `conversation_id` is absent for the first message to a participant;
/// the server creates the conversation and returns its id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessage {
    pub text: String,
    pub receiver_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}

/// Server acknowledgement of a sent message.
///
/// The message carried here is the server's authoritative copy, appended
/// locally without a refetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentMessage {
    pub message: Message,
    pub conversation_id: String,
}

/// A conversation's full message history plus its metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageHistory {
    pub messages: Vec<Message>,
    pub conversation: Conversation,
}

/// An abstract client for the remote chat endpoints.
#[async_trait]
pub trait ChatApi: Send + Sync {
    /// Fetches every conversation for the current user.
    async fn conversations(&self) -> Result<Vec<Conversation>>;

    /// Fetches the full message list for one conversation.
    async fn messages(&self, conversation_id: &str) -> Result<MessageHistory>;

    /// Sends a message; the server resolves or creates the conversation.
    async fn send_message(&self, payload: SendMessage) -> Result<SentMessage>;

    /// Acknowledges the whole conversation as read by the current user.
    async fn mark_as_read(&self, conversation_id: &str) -> Result<()>;

    /// Explicitly creates a conversation with a participant.
    async fn create_conversation(
        &self,
        participant_id: &str,
        product_id: Option<&str>,
    ) -> Result<Conversation>;

    /// Deletes a conversation server-side.
    async fn delete_conversation(&self, conversation_id: &str) -> Result<()>;

    /// Deletes a single message server-side.
    async fn delete_message(&self, message_id: &str) -> Result<()>;
}
