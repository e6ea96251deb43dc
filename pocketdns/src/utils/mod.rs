//! Helpers around the codec: hex dumps and the interactive prompt.
pub mod hex;
pub mod sanitize;
pub mod terminal;

pub use hex::{HexError, format_bytes, parse_hex};
pub use sanitize::{FilterError, Sanitize, Validate};
pub use terminal::Terminal;
