pub mod history;

pub use history::GitHistory;
