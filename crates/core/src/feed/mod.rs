pub mod error;
pub mod nasa;
pub mod types;

use crate::domain::asteroid::FeedResult;
use crate::domain::range::DateRange;

pub use error::FeedError;

#[async_trait::async_trait]
pub trait NeoFeedClient: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// One upstream call for `range`, reshaped into a [`FeedResult`]. Never retries.
    async fn fetch_feed(&self, range: &DateRange) -> Result<FeedResult, FeedError>;
}
