//! Short conversational replies for voice chat.

use crate::constants::CHAT_SYSTEM_PROMPT;
use crate::provider::{ChatMessage, ProviderClient, ProviderError, Sampling};

/// Sampling tuned for short, casual replies.
pub const CHAT_SAMPLING: Sampling = Sampling {
    temperature: 0.8,
    max_tokens: 150,
};

/// Sends the user's message with the assistant persona and returns the reply as-is.
pub async fn reply(client: &ProviderClient, message: &str) -> Result<String, ProviderError> {
    let messages = [
        ChatMessage::system(CHAT_SYSTEM_PROMPT),
        ChatMessage::user(message),
    ];
    client.complete(&messages, CHAT_SAMPLING).await
}
