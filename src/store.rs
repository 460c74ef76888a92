use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;

/// A stored user record. The password is accepted on write but this type
/// deliberately has no `Serialize` impl; responses go out as [`UserView`],
/// which carries no password field.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Response shape for a user: every field except the password.
#[derive(Serialize)]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<User> for UserView {
    fn from(user: User) -> UserView {
        UserView {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

pub struct UserStore {
    inner: RwLock<HashMap<String, User>>,
}

impl UserStore {
    pub fn new() -> UserStore {
        UserStore {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Inserts or replaces the record keyed by its id.
    pub fn put(&self, user: User) {
        let mut inner = self.inner.write().unwrap();
        inner.insert(user.id.clone(), user);
    }

    pub fn get(&self, id: &str) -> Option<User> {
        let inner = self.inner.read().unwrap();
        inner.get(id).cloned()
    }

    /// Snapshot of all records, in no particular order. The returned Vec is
    /// a copy and does not change if the store is mutated afterwards.
    pub fn list(&self) -> Vec<User> {
        let inner = self.inner.read().unwrap();
        inner.values().cloned().collect()
    }

    /// Replaces the record at `user.id` only if one exists, returning
    /// whether it did. Presence check and write happen under one write
    /// lock so no delete can slip in between.
    pub fn update(&self, user: User) -> bool {
        let mut inner = self.inner.write().unwrap();
        if !inner.contains_key(&user.id) {
            return false;
        }
        inner.insert(user.id.clone(), user);
        true
    }

    /// Removes the record at `id`, returning whether it was present.
    pub fn delete(&self, id: &str) -> bool {
        let mut inner = self.inner.write().unwrap();
        inner.remove(id).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn user(id: &str) -> User {
        User {
            id: id.to_string(),
            name: format!("name-{}", id),
            email: format!("{}@example.com", id),
            password: "hunter2".to_string(),
        }
    }

    #[test]
    fn put_then_get_returns_the_record() {
        let store = UserStore::new();
        store.put(user("1"));
        assert_eq!(store.get("1"), Some(user("1")));
    }

    #[test]
    fn put_replaces_existing_record_wholesale() {
        let store = UserStore::new();
        store.put(user("1"));
        let mut replacement = user("1");
        replacement.name = "renamed".to_string();
        store.put(replacement.clone());
        assert_eq!(store.get("1"), Some(replacement));
    }

    #[test]
    fn get_of_unknown_id_is_none() {
        let store = UserStore::new();
        assert_eq!(store.get("missing"), None);
    }

    #[test]
    fn delete_reports_presence() {
        let store = UserStore::new();
        store.put(user("1"));
        assert!(store.delete("1"));
        assert_eq!(store.get("1"), None);
        assert!(!store.delete("1"));
    }

    #[test]
    fn update_of_unknown_id_leaves_store_untouched() {
        let store = UserStore::new();
        store.put(user("1"));
        assert!(!store.update(user("2")));
        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, "1");
    }

    #[test]
    fn update_of_known_id_replaces() {
        let store = UserStore::new();
        store.put(user("1"));
        let mut replacement = user("1");
        replacement.email = "new@example.com".to_string();
        assert!(store.update(replacement.clone()));
        assert_eq!(store.get("1"), Some(replacement));
    }

    #[test]
    fn list_counts_puts_minus_deletes() {
        let store = UserStore::new();
        assert!(store.list().is_empty());
        for id in ["a", "b", "c"] {
            store.put(user(id));
        }
        store.delete("b");
        assert_eq!(store.list().len(), 2);
    }

    #[test]
    fn list_snapshot_is_isolated_from_later_mutation() {
        let store = UserStore::new();
        store.put(user("1"));
        let snapshot = store.list();
        store.delete("1");
        store.put(user("2"));
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "1");
    }

    #[test]
    fn concurrent_puts_with_distinct_ids_lose_nothing() {
        let store = Arc::new(UserStore::new());
        let handles: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || store.put(user(&i.to_string())))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(store.list().len(), 32);
    }

    #[test]
    fn empty_string_id_is_a_legal_key() {
        let store = UserStore::new();
        store.put(user(""));
        assert!(store.get("").is_some());
        assert!(store.delete(""));
    }
}
