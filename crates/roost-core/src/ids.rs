//! Record id generation.
//!
//! Ids are 32 lowercase hex characters drawn from the OS random source.
//! They carry no prefix or structure; the storage key pairs them with the
//! class tag (`"State.<id>"`), so the id alone never needs to identify the
//! kind.

/// Length of a generated id in bytes (hex-encoded to twice this).
const ID_BYTES: usize = 16;

/// Generate a fresh record id.
///
/// # Panics
///
/// Panics only if the OS random source is unavailable, which is not a
/// recoverable condition for id generation.
#[must_use]
pub fn new_id() -> String {
    use std::fmt::Write;

    let mut bytes = [0u8; ID_BYTES];
    getrandom::fill(&mut bytes).expect("OS random source unavailable");
    let mut id = String::with_capacity(ID_BYTES * 2);
    for byte in bytes {
        let _ = write!(id, "{byte:02x}");
    }
    id
}
