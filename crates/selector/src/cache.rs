//! Process-wide memoization of compiled selectors.
//!
//! Compilation is total: selector text that does not parse falls back to a
//! raw `descendant-or-self::` prefix of the trimmed input, so a bad selector
//! surfaces as zero matches rather than an error.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock};

use crate::emit::emit_xpath;
use crate::parser::parse_selector;

static CACHE: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
static COMPILED: AtomicUsize = AtomicUsize::new(0);

/// Compiles selector text to an XPath expression string, memoized on the
/// raw selector text.
pub fn compile(selector: &str) -> String {
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut cache = cache.lock().unwrap_or_else(|e| e.into_inner());

    if let Some(xpath) = cache.get(selector) {
        return xpath.clone();
    }

    let xpath = compile_uncached(selector);
    cache.insert(selector.to_string(), xpath.clone());
    xpath
}

fn compile_uncached(selector: &str) -> String {
    COMPILED.fetch_add(1, Ordering::Relaxed);
    match parse_selector(selector) {
        Ok(list) => emit_xpath(&list),
        Err(e) => {
            log::debug!("selector fallback: {e}");
            format!("descendant-or-self::{}", selector.trim())
        }
    }
}

/// Number of selectors compiled from scratch so far, cache hits excluded.
pub fn compiled_count() -> usize {
    COMPILED.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    // The recompilation counter is process-global, so every assertion that
    // touches it lives in this single test.
    #[test]
    fn repeated_compiles_hit_the_cache() {
        let before = compiled_count();
        let first = compile("section.cache-probe > a");
        let second = compile("section.cache-probe > a");
        assert_eq!(first, second);
        assert_eq!(compiled_count(), before + 1);

        let _ = compile("section.cache-probe > b");
        assert_eq!(compiled_count(), before + 2);

        let _ = compile("section.cache-probe > a");
        assert_eq!(compiled_count(), before + 2);

        // Unparseable text compiles too, to a raw passthrough expression.
        assert_eq!(compile("  p:hover "), "descendant-or-self::p:hover");
    }
}
