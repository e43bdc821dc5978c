mod arrayvec;
mod assert;
mod thread;

pub use arrayvec::ArrayVec;
pub use thread::{ThreadPriority, thread_boot};
