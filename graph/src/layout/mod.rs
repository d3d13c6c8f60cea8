pub mod spine;
pub mod walker;

pub use spine::link_spines;
pub use walker::AncestryWalker;
