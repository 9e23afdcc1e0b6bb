use {
    crate::model::types::{Account, FreeTierDowngrade},
    async_trait::async_trait,
    error::StoreError,
};

pub mod appwrite;
pub mod error;

/// The two capabilities the sweep needs from the profile collection.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Active accounts ordered ascending by document id, `limit` at most,
    /// skipping the first `offset` matches.
    async fn list_active(&self, limit: usize, offset: usize) -> Result<Vec<Account>, StoreError>;

    /// Partial update of a single account by document id.
    async fn apply_downgrade(
        &self,
        id: &str,
        downgrade: &FreeTierDowngrade,
    ) -> Result<(), StoreError>;
}
