//! Storage backends implementing the `ListModel` trait

pub mod in_memory;

pub use in_memory::InMemoryModel;
