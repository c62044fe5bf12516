pub mod descriptor;
pub mod memory;
pub mod source;

pub use descriptor::DatasetDescriptor;
pub use memory::InMemoryDataSource;
pub use source::{Batch, DataSource};
