pub mod fs;
pub mod memory;
pub mod traits;

pub use fs::JsonFileStore;
pub use memory::InMemoryStore;
pub use traits::StateStore;
