//! Legacy sheet/workbook protection password hash

/// Compute the legacy 16-bit password verifier as lowercase hex.
///
/// This is the digest stored in `password` attributes of protection
/// records. Characters are folded in reverse order into a 15-bit rolling
/// accumulator; the character count and `0xCE4B` are mixed in at the end.
///
/// ```
/// use tabula_core::protection::legacy_password_hash;
///
/// assert_eq!(legacy_password_hash("Test"), "cbab");
/// ```
pub fn legacy_password_hash(password: &str) -> String {
    let mut hash: u64 = 0;
    let mut len: u64 = 0;
    for c in password.chars().rev() {
        hash ^= c as u64;
        hash = hash.wrapping_shl(1);
        if hash > 0x7FFF {
            hash -= 0x7FFF;
        }
        len += 1;
    }
    format!("{:x}", hash ^ len ^ 0xCE4B)
}
