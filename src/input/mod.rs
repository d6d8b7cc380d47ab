//! Input handling
//!
//! Key decoding, the modal text input session and the background reader.

pub mod dialog;
pub mod keys;
pub mod source;
mod text_field;

pub use dialog::InputDialogSession;
pub use keys::Command;
pub use source::InputSource;
pub use text_field::TextField;
