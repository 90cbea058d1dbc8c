mod bundle;
mod format;
mod render;

pub use bundle::{DEFAULT_LANG, apply_document_lang, current_lang, set_lang};
pub use format::{fmt_count, fmt_money};
pub use render::{t, tr};
