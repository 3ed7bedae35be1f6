//! 工具层：图谱工具目录、注册表与存储适配

pub mod adapter;
pub mod catalog;
pub mod node_tools;
pub mod query_tools;
pub mod registry;
pub mod relationship_tools;
pub mod schema;

pub use adapter::GraphAdapter;
pub use catalog::{actor_registry, evaluator_registry, ACTOR_TOOLS, EVALUATOR_TOOLS};
pub use registry::{Tool, ToolRegistry};
pub use schema::tool_call_schema_json;
