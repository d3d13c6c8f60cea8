pub mod branch;
pub mod edge;
pub mod graph;
pub mod node;
pub mod priority;
pub mod state;

pub use branch::BranchDescriptor;
pub use edge::{GraphLink, LinkKind};
pub use graph::Graph;
pub use node::{placeholder_id, GraphNode, NodeKind, NodeRef};
pub use priority::classify_priority;
pub use state::{Checkpoint, GraphState};
