//! Command handlers, one module per command group.

mod fields;
mod notes;
mod setup;

pub use fields::{handle_decrypt, handle_encrypt, handle_inspect};
pub use notes::{handle_open_note, handle_seal_note};
pub use setup::{handle_check, handle_completions, handle_gen_key, handle_init};
