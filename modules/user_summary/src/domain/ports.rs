use async_trait::async_trait;

use crate::contract::error::SourceError;
use crate::contract::model::UserRecord;

/// Port for retrieving user records from an external source.
///
/// One call performs one retrieval; there is no caching and no retry. A
/// failed round trip surfaces immediately to the caller.
#[async_trait]
pub trait UserSource: Send + Sync {
    async fn fetch_users(&self) -> Result<Vec<UserRecord>, SourceError>;
}
