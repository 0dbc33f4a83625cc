//! Output formatting module.

mod human;

pub use human::HumanFormatter;
pub use human::format_bytes;
