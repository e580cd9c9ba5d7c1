pub mod http;

use crate::domain::catalog::Category;

/// Something that can produce the raw listing text for a category.
#[async_trait::async_trait]
pub trait PageSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    async fn fetch_category(&self, category: &Category) -> anyhow::Result<String>;
}
