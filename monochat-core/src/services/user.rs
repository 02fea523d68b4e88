//! User service - registration, chat links and bank credentials

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::result::{Error, Result};
use crate::domain::StoreKey;
use crate::ports::KeyValueStore;

pub struct UserService {
    store: Arc<dyn KeyValueStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Mark `user_id` as known
    pub fn register(&self, user_id: Uuid) -> Result<()> {
        let registered_at = chrono::Utc::now().to_rfc3339();
        self.store.set(&StoreKey::User(user_id).to_string(), &registered_at)
    }

    pub fn exists(&self, user_id: Uuid) -> Result<bool> {
        Ok(self.store.get(&StoreKey::User(user_id).to_string())?.is_some())
    }

    /// Point a chat at a user. The user does not have to be registered.
    pub fn link_chat(&self, chat_id: i64, user_id: Uuid) -> Result<()> {
        self.store
            .set(&StoreKey::ChatUser(chat_id).to_string(), &user_id.to_string())
    }

    /// Parse the argument of a `/user` command and link it
    pub fn link_chat_str(&self, chat_id: i64, user_id: &str) -> Result<Uuid> {
        let user_id = Uuid::parse_str(user_id.trim()).map_err(|e| Error::parse(user_id, e))?;
        self.link_chat(chat_id, user_id)?;
        Ok(user_id)
    }

    pub fn user_for_chat(&self, chat_id: i64) -> Result<Uuid> {
        let key = StoreKey::ChatUser(chat_id).to_string();
        let value = self
            .store
            .get(&key)?
            .ok_or_else(|| Error::not_found(format!("no user linked to chat {chat_id}")))?;

        Uuid::parse_str(&value).map_err(|e| Error::parse(value.as_str(), e))
    }

    pub fn set_token(&self, user_id: Uuid, token: &str) -> Result<()> {
        let token = non_empty("token", token)?;
        self.store.set(&StoreKey::Token(user_id).to_string(), token)
    }

    pub fn get_token(&self, user_id: Uuid) -> Result<String> {
        self.store
            .get(&StoreKey::Token(user_id).to_string())?
            .ok_or_else(|| Error::not_found("token is not set"))
    }

    pub fn set_account(&self, user_id: Uuid, account: &str) -> Result<()> {
        let account = non_empty("account", account)?;
        self.store.set(&StoreKey::Account(user_id).to_string(), account)
    }

    pub fn get_account(&self, user_id: Uuid) -> Result<String> {
        self.store
            .get(&StoreKey::Account(user_id).to_string())?
            .ok_or_else(|| Error::not_found("account is not set"))
    }
}

fn non_empty<'a>(what: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::validation(format!("{what} must not be empty")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryStore;

    fn service() -> (UserService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        (UserService::new(store.clone()), store)
    }

    #[test]
    fn test_register_and_exists() {
        let (service, _) = service();
        let user = Uuid::new_v4();

        assert!(!service.exists(user).unwrap());
        service.register(user).unwrap();
        assert!(service.exists(user).unwrap());
    }

    #[test]
    fn test_chat_link() {
        let (service, store) = service();
        let user = Uuid::new_v4();

        assert!(service.user_for_chat(42).unwrap_err().is_not_found());

        service.link_chat(42, user).unwrap();
        assert_eq!(service.user_for_chat(42).unwrap(), user);
        assert_eq!(store.get("chat_user_42").unwrap(), Some(user.to_string()));
    }

    #[test]
    fn test_link_chat_str_rejects_garbage() {
        let (service, _) = service();
        let err = service.link_chat_str(1, "not-a-uuid").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_corrupt_chat_link() {
        let (service, store) = service();
        store.set("chat_user_7", "garbage").unwrap();
        assert!(matches!(service.user_for_chat(7), Err(Error::Parse { .. })));
    }

    #[test]
    fn test_token_and_account() {
        let (service, store) = service();
        let user = Uuid::new_v4();

        assert!(service.get_token(user).unwrap_err().is_not_found());
        assert!(service.get_account(user).unwrap_err().is_not_found());

        service.set_token(user, " uXpDkk1n ").unwrap();
        service.set_account(user, "kKGVoZuHWzqVoZuH").unwrap();

        assert_eq!(service.get_token(user).unwrap(), "uXpDkk1n");
        assert_eq!(service.get_account(user).unwrap(), "kKGVoZuHWzqVoZuH");
        assert_eq!(
            store.get(&format!("token_{user}")).unwrap().as_deref(),
            Some("uXpDkk1n")
        );
    }

    #[test]
    fn test_empty_token_rejected() {
        let (service, _) = service();
        let err = service.set_token(Uuid::new_v4(), "  ").unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
