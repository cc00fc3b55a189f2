use crate::cache::CacheInfo;
use crate::commands::Out;
use crate::{Config, Result};

/// Reports how many raw sheets are cached and when the oldest was written.
pub async fn cache_info(config: &Config) -> Result<Out<CacheInfo>> {
    let info = config.cache().info().await?;
    Ok(Out::new(info.to_string(), info))
}

/// Deletes every cached raw sheet.
pub async fn cache_clear(config: &Config) -> Result<Out<()>> {
    let removed = config.cache().clear().await?;
    Ok(format!(
        "Removed {removed} cached files from '{}'",
        config.cache_dir().display()
    )
    .into())
}
