pub mod coordinator;
pub mod registry;
pub mod scheduler;
pub mod watcher;
