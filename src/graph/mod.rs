//! 图谱层：实体类型、存储契约与内存实现

pub mod memory;
pub mod store;
pub mod types;

pub use memory::MemoryGraphStore;
pub use store::{GraphError, GraphStore};
pub use types::{NodeRecord, PathRecord, Properties, RelationshipRecord};
