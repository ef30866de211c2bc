use sha2::{Digest, Sha256};

/// Stable numeric id for a listing.
///
/// SHA-256 over the UTF-8 bytes of `url` followed by `title`; the first four
/// digest bytes, big-endian, form the id. No seed, so the same pair maps to
/// the same id in every run and process.
pub fn make_id(url: &str, title: &str) -> u32 {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hasher.update(title.as_bytes());
    let digest = hasher.finalize();
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}
