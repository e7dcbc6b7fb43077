pub mod entry;
pub mod record;

pub use entry::{CommandEntry, CommandKind};
pub use record::Record;
