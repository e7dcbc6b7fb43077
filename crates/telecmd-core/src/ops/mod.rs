pub mod execute_ops;
pub mod mutation_ops;
pub mod reverse_ops;
pub mod sort_ops;
pub mod store;

pub use execute_ops::{execute_queue, EntryEffect, ExecutionReport};
pub use mutation_ops::{delete_by_target, enqueue, modify_by_target};
pub use reverse_ops::reverse_queue;
pub use sort_ops::sort_queue;
pub use store::QueueStore;
