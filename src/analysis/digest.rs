//! Deterministic content digest for uploaded symptom photos.
//!
//! djb2-style rolling hash over the filename (UTF-16 code units), the
//! declared byte length, and a bounded prefix of the file bytes.

/// Number of leading file bytes folded into the digest.
pub const DIGEST_PREFIX_LEN: usize = 64;

/// djb2 seed.
const DIGEST_SEED: u32 = 5381;

/// Compute the content digest of an upload.
///
/// Only the first [`DIGEST_PREFIX_LEN`] bytes of `bytes` are read.
/// `byte_len` is the full file size as reported by the uploader and is
/// truncated to 32 bits before folding.
pub fn content_digest(bytes: &[u8], file_name: &str, byte_len: u64) -> u32 {
    let mut acc = DIGEST_SEED;

    for unit in file_name.encode_utf16() {
        acc = fold(acc, u32::from(unit));
    }

    acc = fold(acc, byte_len as u32);

    for &byte in bytes.iter().take(DIGEST_PREFIX_LEN) {
        acc = fold(acc, u32::from(byte));
    }

    acc
}

/// `acc * 33 + value` with u32 wraparound.
#[inline]
fn fold(acc: u32, value: u32) -> u32 {
    (acc << 5).wrapping_add(acc).wrapping_add(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_HEADER: [u8; 16] = [
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52,
    ];

    #[test]
    fn digest_is_deterministic() {
        let a = content_digest(&PNG_HEADER, "rash.png", 2048);
        let b = content_digest(&PNG_HEADER, "rash.png", 2048);
        assert_eq!(a, b);
    }

    #[test]
    fn golden_png_fixture() {
        assert_eq!(content_digest(&PNG_HEADER, "test.png", 12345), 3_346_305_934);
    }

    #[test]
    fn empty_file_uses_name_and_length_only() {
        // 5381 * 33 + 'a', then * 33 + 0
        assert_eq!(content_digest(&[], "a", 0), 5_863_110);
    }

    #[test]
    fn empty_name_and_file() {
        assert_eq!(content_digest(&[], "", 0), 177_573);
    }

    #[test]
    fn only_prefix_bytes_contribute() {
        let mut long = vec![7u8; DIGEST_PREFIX_LEN];
        let base = content_digest(&long, "x.jpg", 500);
        long.extend_from_slice(&[1, 2, 3, 4]);
        assert_eq!(content_digest(&long, "x.jpg", 500), base);
    }

    #[test]
    fn filename_changes_digest() {
        let a = content_digest(&PNG_HEADER, "rash.png", 12345);
        let b = content_digest(&PNG_HEADER, "wound.jpg", 12345);
        assert_ne!(a, b);
    }

    #[test]
    fn length_changes_digest() {
        let a = content_digest(&PNG_HEADER, "rash.png", 100);
        let b = content_digest(&PNG_HEADER, "rash.png", 101);
        assert_ne!(a, b);
    }

    #[test]
    fn non_ascii_names_use_utf16_units() {
        assert_eq!(content_digest(&[], "é.png", 0), 719_368_737);
    }

    #[test]
    fn large_lengths_wrap_instead_of_panicking() {
        let d = content_digest(&[0xFF; 64], "huge.tiff", u64::MAX);
        assert_eq!(d, content_digest(&[0xFF; 64], "huge.tiff", u64::MAX));
    }
}
