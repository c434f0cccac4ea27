//! ChatSession - transcript of a conversation with the MSC assistant.

use chrono::{DateTime, Utc};
use msc_core::chatbot::{self, QuickReply, ReplyPicker, RngPicker, WELCOME_MESSAGE};
use msc_core::error::{MscError, Result};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// One line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// A conversation that always starts with the welcome message.
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    picker: Box<dyn ReplyPicker>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Creates a session choosing replies at random.
    pub fn new() -> Self {
        Self::with_picker(Box::new(RngPicker::from_entropy()))
    }

    pub fn with_picker(picker: Box<dyn ReplyPicker>) -> Self {
        Self {
            messages: vec![welcome()],
            picker,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Suggestions offered alongside the input box.
    pub fn quick_replies(&self) -> &'static [QuickReply] {
        chatbot::QUICK_REPLIES
    }

    /// Appends the person's message and the assistant's answer.
    ///
    /// Blank input is ignored and returns `None`.
    pub fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        if text.trim().is_empty() {
            return None;
        }
        let reply = chatbot::bot_reply(text, self.picker.as_mut());
        self.messages.push(ChatMessage::new(text, Sender::User));
        self.messages.push(ChatMessage::new(reply, Sender::Bot));
        tracing::debug!("[ChatSession] {} messages", self.messages.len());
        self.messages.last()
    }

    /// Appends a quick reply question and its fixed answer.
    pub fn choose_quick_reply(&mut self, id: &str) -> Result<&ChatMessage> {
        let reply = chatbot::quick_reply(id).ok_or_else(|| MscError::not_found("quick reply", id))?;
        self.messages.push(ChatMessage::new(reply.text, Sender::User));
        self.messages.push(ChatMessage::new(reply.response, Sender::Bot));
        self.messages
            .last()
            .ok_or_else(|| MscError::internal("transcript is empty"))
    }

    /// Drops the transcript back to the welcome message.
    pub fn reset(&mut self) {
        self.messages = vec![welcome()];
    }
}

fn welcome() -> ChatMessage {
    ChatMessage {
        id: "welcome".to_string(),
        ..ChatMessage::new(WELCOME_MESSAGE, Sender::Bot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use msc_core::chatbot::FixedPicker;

    fn session() -> ChatSession {
        ChatSession::with_picker(Box::new(FixedPicker(1)))
    }

    #[test]
    fn test_starts_with_welcome() {
        let chat = session();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].id, "welcome");
        assert_eq!(chat.messages()[0].sender, Sender::Bot);
    }

    #[test]
    fn test_blank_input_ignored() {
        let mut chat = session();
        assert!(chat.send("   ").is_none());
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn test_greeting_reply_uses_picker() {
        let mut chat = session();
        let reply = chat.send("Xin chào").unwrap().text.clone();
        assert_eq!(reply, "Chào bạn! Rất vui được hỗ trợ bạn hôm nay! 🌟");

        let messages = chat.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].text, "Xin chào");
        assert_ne!(messages[1].id, messages[2].id);
    }

    #[test]
    fn test_quick_reply_and_reset() {
        let mut chat = session();
        let answer = chat.choose_quick_reply("mentors").unwrap().text.clone();
        assert!(answer.contains("mentors"));
        assert_eq!(chat.messages()[1].text, "👨‍🏫 Thông tin về mentors");

        assert!(chat.choose_quick_reply("pricing").unwrap_err().is_not_found());

        chat.reset();
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].text, WELCOME_MESSAGE);
    }
}
