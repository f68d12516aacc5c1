/// Memoizes the result of an async block in a [`Cache`](crate::cache::Cache).
///
/// If the key is present the cached value is returned without running the
/// block. Otherwise the block is awaited, its value stored under the key and
/// returned.
///
/// # Example
/// ```rust,ignore
/// let artwork = cached!(self.cache, CacheKey::Artwork(title.to_string()), async move {
///     self.fetch(title).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $block:expr) => {{
        let key = $key;
        if let Some(cached) = $cache.get(&key).await {
            cached
        } else {
            let value = $block.await;
            $cache.insert(&key, value.clone()).await;
            value
        }
    }};
}
