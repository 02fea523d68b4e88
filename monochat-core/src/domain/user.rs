//! User-scoped store keys

use std::fmt;

use uuid::Uuid;

/// Key into the key-value store. Every value the bot keeps is namespaced
/// by the owning user, or by chat for the chat-to-user link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Category mapping table
    Mapping(Uuid),
    /// Bank API token
    Token(Uuid),
    /// Default bank account id
    Account(Uuid),
    /// Chat id to user id link
    ChatUser(i64),
    /// Registered user marker
    User(Uuid),
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreKey::Mapping(id) => write!(f, "mapping_{id}"),
            StoreKey::Token(id) => write!(f, "token_{id}"),
            StoreKey::Account(id) => write!(f, "account_{id}"),
            StoreKey::ChatUser(chat_id) => write!(f, "chat_user_{chat_id}"),
            StoreKey::User(id) => write!(f, "user_{id}"),
        }
    }
}
