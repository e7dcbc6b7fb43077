pub mod queue_render;

pub use queue_render::{print_queue, render_entry, PrintFormat, PrintReport};
