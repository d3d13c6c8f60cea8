pub mod filter;
pub mod window;

pub use filter::relevant_nodes;
pub use window::{TimeWindow, DEFAULT_SPAN_HOURS};
