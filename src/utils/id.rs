//! Record id generation

use rand::Rng;

/// Length of generated book ids
pub const ID_LENGTH: usize = 16;

/// URL-safe alphabet, 64 symbols
const ALPHABET: &[u8] = b"useandom-26T198340PX75pxJACKVERYMINDBUSHWOLF_GQZbfghjklqvwyzrict";

/// Generate a random URL-safe token of `ID_LENGTH` characters
pub fn generate_id() -> String {
    let mut rng = rand::thread_rng();
    (0..ID_LENGTH)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}
