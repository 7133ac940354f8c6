use serenity::{async_trait, model::id::UserId, prelude::RwLock};
use std::collections::HashMap;

/// Each user's list of movies saved for later, in the order they were saved.
///
/// Operations never fail: a user with no entry simply has an empty list.
#[async_trait]
pub trait SavedListStore: Send + Sync {
    /// The user's saved titles, oldest first
    async fn get(&self, user: UserId) -> Vec<String>;

    /// Add a title to the end of the user's list. Duplicates are kept.
    async fn append(&self, user: UserId, title: String);

    /// Empty the user's list. Returns `false` if there was nothing to clear.
    async fn clear(&self, user: UserId) -> bool;
}

/// Saved lists held in memory for the life of the process.
///
/// Every mutation takes the write lock, so two saves for the same user never interleave.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    lists: RwLock<HashMap<UserId, Vec<String>>>,
}

#[async_trait]
impl SavedListStore for InMemoryStore {
    async fn get(&self, user: UserId) -> Vec<String> {
        self.lists
            .read()
            .await
            .get(&user)
            .cloned()
            .unwrap_or_default()
    }

    async fn append(&self, user: UserId, title: String) {
        self.lists
            .write()
            .await
            .entry(user)
            .or_insert_with(Vec::new)
            .push(title);
    }

    async fn clear(&self, user: UserId) -> bool {
        match self.lists.write().await.get_mut(&user) {
            Some(list) if !list.is_empty() => {
                list.clear();
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const ALICE: UserId = UserId(1);
    const BOB: UserId = UserId(2);

    #[tokio::test]
    async fn saves_keep_insertion_order() {
        let store = InMemoryStore::default();
        store.append(ALICE, "A".to_owned()).await;
        store.append(ALICE, "B".to_owned()).await;
        store.append(ALICE, "A".to_owned()).await;
        assert_eq!(store.get(ALICE).await, ["A", "B", "A"]);
    }

    #[tokio::test]
    async fn lists_are_per_user() {
        let store = InMemoryStore::default();
        store.append(ALICE, "A".to_owned()).await;
        assert!(store.get(BOB).await.is_empty());
    }

    #[tokio::test]
    async fn clear_empties_then_reports_nothing_to_clear() {
        let store = InMemoryStore::default();
        store.append(ALICE, "A".to_owned()).await;
        store.append(ALICE, "B".to_owned()).await;
        assert!(store.clear(ALICE).await);
        assert!(store.get(ALICE).await.is_empty());
        assert!(!store.clear(ALICE).await);
    }

    #[tokio::test]
    async fn clear_unknown_user_is_a_no_op() {
        let store = InMemoryStore::default();
        assert!(!store.clear(BOB).await);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_saves_are_all_kept() {
        let store: Arc<dyn SavedListStore> = Arc::new(InMemoryStore::default());
        let saves = (0..50).map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.append(ALICE, format!("Movie {}", i)).await })
        });
        for save in saves.collect::<Vec<_>>() {
            save.await.unwrap();
        }
        let mut saved = store.get(ALICE).await;
        saved.sort();
        let mut expected: Vec<String> = (0..50).map(|i| format!("Movie {}", i)).collect();
        expected.sort();
        assert_eq!(saved, expected);
    }
}
