//! Messaging Use Cases
//!
//! Buyer-seller conversations, optionally anchored to a product.

use std::sync::Arc;

use auth::models::account_id::AccountId;
use kernel::id::{MessageId, ProductId};

use crate::application::config::MarketConfig;
use crate::domain::entities::{ConversationSummary, MessageView, NewMessage};
use crate::domain::repository::MessageRepository;
use crate::error::{MarketError, MarketResult};

/// Input for sending a message
pub struct SendMessageInput {
    pub receiver_id: i64,
    pub product_id: Option<i64>,
    pub body: String,
}

/// Messaging use case
pub struct MessagingUseCase<R>
where
    R: MessageRepository,
{
    repo: Arc<R>,
    config: Arc<MarketConfig>,
}

impl<R> MessagingUseCase<R>
where
    R: MessageRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<MarketConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn send(
        &self,
        sender_id: AccountId,
        input: SendMessageInput,
    ) -> MarketResult<MessageId> {
        let body = input.body.trim().to_string();
        if body.is_empty() {
            return Err(MarketError::InvalidInput("Message cannot be empty".into()));
        }

        let receiver_id = AccountId::from_i64(input.receiver_id);
        if sender_id == receiver_id {
            return Err(MarketError::InvalidInput(
                "Cannot send message to yourself".into(),
            ));
        }

        if !self.repo.receiver_exists(&receiver_id).await? {
            return Err(MarketError::NotFound("Receiver"));
        }

        let product_id = input.product_id.map(ProductId::from_i64);
        if let Some(product_id) = product_id {
            if !self.repo.product_exists(product_id).await? {
                return Err(MarketError::NotFound("Product"));
            }
        }

        let message_id = self
            .repo
            .send(&NewMessage {
                sender_id,
                receiver_id,
                product_id,
                body,
            })
            .await?;

        tracing::debug!(
            message_id = %message_id,
            sender_id = %sender_id,
            receiver_id = %receiver_id,
            "Message sent"
        );

        Ok(message_id)
    }

    /// Fetch one page of a conversation; incoming messages become read
    pub async fn conversation(
        &self,
        user_id: AccountId,
        other_user_id: i64,
        product_id: Option<i64>,
        page: u32,
    ) -> MarketResult<Vec<MessageView>> {
        let other = AccountId::from_i64(other_user_id);
        let product_id = product_id.map(ProductId::from_i64);

        let messages = self
            .repo
            .conversation(
                &user_id,
                &other,
                product_id,
                page.max(1),
                self.config.messages_per_page,
            )
            .await?;

        self.repo.mark_read(&user_id, &other, product_id).await?;

        Ok(messages)
    }

    pub async fn conversations(
        &self,
        user_id: AccountId,
    ) -> MarketResult<Vec<ConversationSummary>> {
        self.repo.conversations(&user_id).await
    }

    pub async fn unread_count(&self, user_id: AccountId) -> MarketResult<i64> {
        self.repo.unread_count(&user_id).await
    }

    pub async fn mark_read(&self, user_id: AccountId, other_user_id: i64) -> MarketResult<()> {
        self.repo
            .mark_read(&user_id, &AccountId::from_i64(other_user_id), None)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, user_id: AccountId, message_id: i64) -> MarketResult<()> {
        let deleted = self
            .repo
            .delete(MessageId::from_i64(message_id), &user_id)
            .await?;
        if !deleted {
            return Err(MarketError::NotFound("Message"));
        }
        Ok(())
    }
}
