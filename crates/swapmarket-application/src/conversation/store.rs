//! Conversation store: cached conversations and the open message thread.
//!
//! Holds the client's view of the user's conversations as a read-through
//! cache over the remote chat API. The store is the single writer of its
//! state; concurrent readers take snapshots. Thread fetches carry an epoch
//! so a response for a thread the user has already navigated away from is
//! discarded instead of clobbering the newer one.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use swapmarket_core::chat::{
    ChatApi, Conversation, Message, SendMessage, filter_by_participant,
};
use swapmarket_core::error::{MarketError, Result};
use tokio::sync::RwLock;

use super::state::{ChatState, ThreadState};
use crate::session::SessionManager;

pub struct ConversationStore {
    chat_api: Arc<dyn ChatApi>,
    session: Arc<SessionManager>,
    state: Arc<RwLock<ChatState>>,
    /// Bumped on every thread fetch; a response whose epoch no longer
    /// matches is stale and must not be applied.
    thread_epoch: AtomicU64,
}

impl ConversationStore {
    pub fn new(chat_api: Arc<dyn ChatApi>, session: Arc<SessionManager>) -> Self {
        Self {
            chat_api,
            session,
            state: Arc::new(RwLock::new(ChatState::default())),
            thread_epoch: AtomicU64::new(0),
        }
    }

    /// Returns a snapshot of the current conversation state.
    pub async fn state(&self) -> ChatState {
        self.state.read().await.clone()
    }

    /// Sum of unread counts across all cached conversations, for badges.
    pub async fn total_unread(&self) -> u32 {
        self.state
            .read()
            .await
            .conversations
            .iter()
            .map(|conv| conv.unread_count)
            .sum()
    }

    /// Replaces the cached conversation list with the server's.
    ///
    /// On failure the previous cache is kept and the error is recorded.
    pub async fn fetch_conversations(&self) -> Result<()> {
        match self.chat_api.conversations().await {
            Ok(mut conversations) => {
                sort_by_activity(&mut conversations);
                let mut state = self.state.write().await;
                state.conversations = conversations;
                state.error = None;
                Ok(())
            }
            Err(err) => Err(self.record_failure(err).await),
        }
    }

    /// Opens a conversation: fetches its full message history and makes it
    /// the current thread.
    ///
    /// When fetches interleave, only the most recently requested thread
    /// wins; earlier responses are discarded on arrival. On failure the
    /// previously loaded messages are kept.
    pub async fn fetch_messages(&self, conversation_id: &str) -> Result<()> {
        let epoch = self.thread_epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().await.thread = ThreadState::Loading;

        let fetched = self.chat_api.messages(conversation_id).await;

        let mut guard = self.state.write().await;
        if self.thread_epoch.load(Ordering::SeqCst) != epoch {
            tracing::debug!("Discarding stale message fetch for {conversation_id}");
            return Ok(());
        }
        let state = &mut *guard;
        match fetched {
            Ok(history) => {
                state.messages = history.messages;
                state.current_conversation = Some(history.conversation);
                state.thread = settled_thread(&state.messages);
                state.error = None;
                Ok(())
            }
            Err(err) => {
                state.thread = settled_thread(&state.messages);
                drop(guard);
                Err(self.record_failure(err).await)
            }
        }
    }

    /// Sends a message and applies the server's acknowledged copy locally.
    ///
    /// The acknowledged message is appended to the open thread only when
    /// the server's conversation is the one currently open; the matching
    /// cached conversation gets its `last_message` and activity timestamp
    /// updated (or is created, for a first message) and the list is
    /// re-sorted. One's own sends never count as unread.
    pub async fn send_message(
        &self,
        text: &str,
        receiver_id: &str,
        conversation_id: Option<String>,
        product_id: Option<String>,
    ) -> Result<Message> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MarketError::validation("Message text is required"));
        }
        let Some(sender) = self.session.current_user().await else {
            return Err(MarketError::unauthorized(
                "You must be signed in to send messages",
            ));
        };

        self.state.write().await.thread = ThreadState::Sending;

        let payload = SendMessage {
            text: text.to_string(),
            receiver_id: receiver_id.to_string(),
            conversation_id: conversation_id.clone(),
            product_id: product_id.clone(),
        };
        match self.chat_api.send_message(payload).await {
            Ok(sent) => {
                let mut guard = self.state.write().await;
                let state = &mut *guard;
                let message = sent.message;

                let open_thread = match &state.current_conversation {
                    Some(current) => current.id == sent.conversation_id,
                    // First message of a brand-new thread the user is composing
                    None => conversation_id.is_none(),
                };
                if open_thread {
                    state.messages.push(message.clone());
                }

                match state
                    .conversations
                    .iter()
                    .position(|conv| conv.id == sent.conversation_id)
                {
                    Some(idx) => {
                        let conv = &mut state.conversations[idx];
                        conv.last_message = Some(message.clone());
                        conv.updated_at = message.timestamp.clone();
                    }
                    None => {
                        let created = Conversation {
                            id: sent.conversation_id.clone(),
                            participants: vec![sender.id, receiver_id.to_string()],
                            last_message: Some(message.clone()),
                            unread_count: 0,
                            updated_at: message.timestamp.clone(),
                            product_id,
                        };
                        // A first message opens its newly created thread
                        if open_thread && state.current_conversation.is_none() {
                            state.current_conversation = Some(created.clone());
                        }
                        state.conversations.push(created);
                    }
                }
                sort_by_activity(&mut state.conversations);

                if let Some(current) = state
                    .current_conversation
                    .as_mut()
                    .filter(|current| current.id == sent.conversation_id)
                {
                    current.last_message = Some(message.clone());
                    current.updated_at = message.timestamp.clone();
                }

                state.thread = settled_thread(&state.messages);
                state.error = None;
                Ok(message)
            }
            Err(err) => {
                let mut guard = self.state.write().await;
                guard.thread = settled_thread(&guard.messages);
                drop(guard);
                Err(self.record_failure(err).await)
            }
        }
    }

    /// Acknowledges the whole conversation as read by the current user.
    ///
    /// On success the cached unread count drops to zero and, when the
    /// conversation is the open thread, every held message flips to read.
    /// The acknowledgement covers the whole thread, not individual
    /// messages, so no per-message distinction is made here.
    pub async fn mark_as_read(&self, conversation_id: &str) -> Result<()> {
        match self.chat_api.mark_as_read(conversation_id).await {
            Ok(()) => {
                let mut guard = self.state.write().await;
                let state = &mut *guard;

                if let Some(conv) = state
                    .conversations
                    .iter_mut()
                    .find(|conv| conv.id == conversation_id)
                {
                    conv.unread_count = 0;
                }
                if let Some(current) = state
                    .current_conversation
                    .as_mut()
                    .filter(|current| current.id == conversation_id)
                {
                    current.unread_count = 0;
                    for message in state.messages.iter_mut() {
                        message.is_read = true;
                    }
                }
                Ok(())
            }
            Err(err) => Err(self.record_failure(err).await),
        }
    }

    /// Creates a conversation with a participant ahead of any message,
    /// e.g. from a product listing's "contact seller" action.
    pub async fn create_conversation(
        &self,
        participant_id: &str,
        product_id: Option<&str>,
    ) -> Result<Conversation> {
        match self
            .chat_api
            .create_conversation(participant_id, product_id)
            .await
        {
            Ok(conversation) => {
                let mut state = self.state.write().await;
                if !state.conversations.iter().any(|c| c.id == conversation.id) {
                    state.conversations.push(conversation.clone());
                    sort_by_activity(&mut state.conversations);
                }
                Ok(conversation)
            }
            Err(err) => Err(self.record_failure(err).await),
        }
    }

    /// Deletes a conversation and, when it is the open thread, closes it.
    pub async fn delete_conversation(&self, conversation_id: &str) -> Result<()> {
        self.chat_api.delete_conversation(conversation_id).await?;

        let mut state = self.state.write().await;
        state.conversations.retain(|conv| conv.id != conversation_id);
        if state
            .current_conversation
            .as_ref()
            .is_some_and(|current| current.id == conversation_id)
        {
            state.current_conversation = None;
            state.messages.clear();
            state.thread = ThreadState::Idle;
        }
        Ok(())
    }

    /// Deletes a single message from the open thread.
    pub async fn delete_message(&self, message_id: &str) -> Result<()> {
        self.chat_api.delete_message(message_id).await?;
        let mut state = self.state.write().await;
        state.messages.retain(|message| message.id != message_id);
        Ok(())
    }

    /// Resolves the counterpart of the current user in a conversation.
    pub async fn other_participant(&self, conversation: &Conversation) -> Option<String> {
        let user = self.session.current_user().await?;
        conversation
            .other_participant(&user.id)
            .map(str::to_string)
    }

    /// Filters cached conversations by counterpart display name.
    ///
    /// `participant_name` maps a participant id to the name shown for it;
    /// conversations whose counterpart cannot be resolved never match a
    /// non-blank query.
    pub async fn search_conversations<F>(&self, query: &str, participant_name: F) -> Vec<Conversation>
    where
        F: Fn(&str) -> String,
    {
        let current_id = self.session.current_user().await.map(|user| user.id);
        let state = self.state.read().await;
        filter_by_participant(&state.conversations, query, |conv| {
            current_id
                .as_deref()
                .and_then(|id| conv.other_participant(id))
                .map(&participant_name)
                .unwrap_or_default()
        })
    }

    /// Makes a conversation current without fetching, e.g. when navigating
    /// with data already at hand. `None` closes the thread.
    pub async fn set_current_conversation(&self, conversation: Option<Conversation>) {
        let mut state = self.state.write().await;
        if conversation.is_none() {
            state.messages.clear();
            state.thread = ThreadState::Idle;
        }
        state.current_conversation = conversation;
    }

    /// Empties the open thread, e.g. when leaving the conversation screen.
    pub async fn clear_messages(&self) {
        let mut state = self.state.write().await;
        state.messages.clear();
        state.thread = ThreadState::Idle;
    }

    /// Clears the recorded error, e.g. after the UI has displayed it.
    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    /// Records a failed operation: an authentication rejection ends the
    /// session, everything else surfaces as a display error.
    async fn record_failure(&self, err: MarketError) -> MarketError {
        if err.is_unauthorized() {
            self.session.invalidate().await;
        }
        self.state.write().await.error = Some(err.user_message());
        err
    }
}

/// Keeps the conversation list ordered by most recent activity first.
/// Timestamps are ISO 8601, so lexicographic order is chronological.
fn sort_by_activity(conversations: &mut [Conversation]) {
    conversations.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
}

fn settled_thread(messages: &[Message]) -> ThreadState {
    if messages.is_empty() {
        ThreadState::Idle
    } else {
        ThreadState::Loaded
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
