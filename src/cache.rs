//! Rule code caching.

use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use crate::ast::RuleCode;

/// Global cache for parsed rule codes.
static CACHE: Mutex<Option<LruCache<String, Arc<RuleCode>>>> = Mutex::new(None);

const CACHE_SIZE: NonZeroUsize = match NonZeroUsize::new(256) {
    Some(size) => size,
    None => panic!("cache size must be non-zero"),
};

/// Get or parse a rule code, using the cache.
///
/// A poisoned cache lock is not fatal: the code is parsed without caching.
pub fn get_or_parse(code: &str) -> Arc<RuleCode> {
    let Ok(mut cache_guard) = CACHE.lock() else {
        return Arc::new(RuleCode::parse(code));
    };

    let cache = cache_guard.get_or_insert_with(|| LruCache::new(CACHE_SIZE));

    if let Some(parsed) = cache.get(code) {
        return Arc::clone(parsed);
    }

    let parsed = Arc::new(RuleCode::parse(code));
    cache.put(code.to_string(), Arc::clone(&parsed));
    parsed
}
