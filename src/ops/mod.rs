//! Operations that touch repositories on behalf of the panes

pub mod copy;
pub mod delete;

pub use copy::{ConfirmAnswer, ConfirmPrompt, CopyOrchestrator};
pub use delete::delete_selection;
