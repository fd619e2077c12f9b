//! HTTP implementation of the chat collaborator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use swapmarket_core::chat::{ChatApi, Conversation, MessageHistory, SendMessage, SentMessage};
use swapmarket_core::error::Result;

use crate::client::ApiClient;

/// Chat endpoints over REST.
#[derive(Clone)]
pub struct HttpChatApi {
    client: ApiClient,
}

impl HttpChatApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[derive(Deserialize)]
struct ConversationsResponse {
    conversations: Vec<Conversation>,
}

#[derive(Deserialize)]
struct CreateConversationResponse {
    conversation: Conversation,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateConversationRequest<'a> {
    participant_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    product_id: Option<&'a str>,
}

#[async_trait]
impl ChatApi for HttpChatApi {
    async fn conversations(&self) -> Result<Vec<Conversation>> {
        let response: ConversationsResponse = self.client.get("/chat/conversations").await?;
        Ok(response.conversations)
    }

    async fn messages(&self, conversation_id: &str) -> Result<MessageHistory> {
        self.client
            .get(&format!("/chat/conversations/{conversation_id}/messages"))
            .await
    }

    async fn send_message(&self, payload: SendMessage) -> Result<SentMessage> {
        self.client.post("/chat/messages", &payload).await
    }

    async fn mark_as_read(&self, conversation_id: &str) -> Result<()> {
        self.client
            .put_unit(&format!("/chat/conversations/{conversation_id}/read"))
            .await
    }

    async fn create_conversation(
        &self,
        participant_id: &str,
        product_id: Option<&str>,
    ) -> Result<Conversation> {
        let response: CreateConversationResponse = self
            .client
            .post(
                "/chat/conversations",
                &CreateConversationRequest {
                    participant_id,
                    product_id,
                },
            )
            .await?;
        Ok(response.conversation)
    }

    async fn delete_conversation(&self, conversation_id: &str) -> Result<()> {
        self.client
            .delete_unit(&format!("/chat/conversations/{conversation_id}"))
            .await
    }

    async fn delete_message(&self, message_id: &str) -> Result<()> {
        self.client
            .delete_unit(&format!("/chat/messages/{message_id}"))
            .await
    }
}
