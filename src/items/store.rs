use crate::error::ItemError;
use crate::items::models::Item;
use chrono::Utc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct ItemList {
    items: Vec<Item>,
    last_id: i64,
}

impl ItemList {
    /// Millisecond clock, bumped past the last issued id when the clock has not moved.
    fn next_id(&mut self) -> i64 {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }

    fn insert(&mut self, text: &str) -> Result<Item, ItemError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ItemError::EmptyInput);
        }
        if self.items.iter().any(|item| item.text == text) {
            return Err(ItemError::DuplicateItem);
        }

        let item = Item {
            id: self.next_id(),
            text: text.to_string(),
        };
        self.items.push(item.clone());
        Ok(item)
    }
}

/// Ordered in-memory item collection shared by all workers.
///
/// Every operation holds the lock for its full check-and-mutate sequence.
#[derive(Debug, Default)]
pub struct ItemStore {
    inner: RwLock<ItemList>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `texts`, applying the same rules as `create`.
    pub fn with_items<I, S>(texts: I) -> Result<Self, ItemError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = ItemList::default();
        for text in texts {
            list.insert(text.as_ref())?;
        }
        Ok(Self {
            inner: RwLock::new(list),
        })
    }

    pub async fn list(&self) -> Vec<Item> {
        self.inner.read().await.items.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.items.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn create(&self, text: &str) -> Result<Item, ItemError> {
        self.inner.write().await.insert(text)
    }

    /// Replaces an item's text in place. Unlike `create`, duplicate text is allowed.
    pub async fn update(&self, id: i64, text: &str) -> Result<Item, ItemError> {
        let mut list = self.inner.write().await;
        let item = list
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or(ItemError::NotFound)?;

        let text = text.trim();
        if text.is_empty() {
            return Err(ItemError::EmptyInput);
        }

        item.text = text.to_string();
        Ok(item.clone())
    }

    pub async fn delete(&self, id: i64) -> Result<(), ItemError> {
        let mut list = self.inner.write().await;
        let index = list
            .items
            .iter()
            .position(|item| item.id == id)
            .ok_or(ItemError::NotFound)?;

        list.items.remove(index);
        Ok(())
    }

    /// Drops every item. Ids issued afterwards still never repeat earlier ones.
    pub async fn reset(&self) {
        self.inner.write().await.items.clear();
    }
}
