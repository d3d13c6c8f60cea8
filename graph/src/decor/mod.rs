pub mod refs;

pub use refs::attach_references;
