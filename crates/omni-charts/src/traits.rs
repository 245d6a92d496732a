//! Chart rendering trait.

use async_trait::async_trait;
use omni_common::{Result, StockSnapshot};

/// Turns a stock snapshot into an image.
#[async_trait]
pub trait ChartRenderer: Send + Sync {
    /// Render `snapshot` as PNG bytes.
    async fn render(&self, snapshot: &StockSnapshot) -> Result<Vec<u8>>;

    /// Renderer name for logs
    fn name(&self) -> &'static str;
}
