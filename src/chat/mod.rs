pub mod client;
pub mod session;

pub use client::{ChatEndpoint, ChatError, ChatReply, HttpChatEndpoint};
pub use session::{ChatSession, Conversation, Rejected, SessionState, SubmitOutcome, FALLBACK_REPLY};
