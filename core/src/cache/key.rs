//! Cache key derivation
//!
//! A key is derived from the view name and the fully-resolved SQL text:
//! `{view}/{fnv}_{digest}.cache`, where `fnv` is a byte-order-reversed
//! FNV-1a 64 fold forced non-negative by signed inversion, and `digest`
//! is the base64-encoded MD5 of the same text. The resolved text has every
//! positional placeholder substituted left-to-right with its bound value,
//! so the same template with different bindings produces different keys.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::core::constants::CACHE_FILE_EXTENSION;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Derive the cache key for a view and its resolved SQL text
pub fn cache_key(view: &str, resolved_sql: &str) -> String {
    let fold = (fnv_fold(resolved_sql) as i64).unsigned_abs();
    let digest = URL_SAFE_NO_PAD.encode(md5::compute(resolved_sql).0);
    format!("{view}/{fold}_{digest}.{CACHE_FILE_EXTENSION}")
}

/// Substitute `?` placeholders left-to-right with the string form of the
/// bound values
///
/// Placeholders beyond the argument list are left untouched.
pub fn resolve_sql(sql: &str, args: &[String]) -> String {
    let mut out = String::with_capacity(sql.len());
    let mut remaining = args.iter();
    for ch in sql.chars() {
        if ch == '?'
            && let Some(arg) = remaining.next()
        {
            out.push_str(arg);
            continue;
        }
        out.push(ch);
    }
    out
}

/// FNV-1a 64 accumulated over the input bytes in reverse order
fn fnv_fold(text: &str) -> u64 {
    let mut hash = FNV_OFFSET;
    for b in text.bytes().rev() {
        hash ^= u64::from(b);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
