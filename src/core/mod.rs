//! 核心层：错误类型、运行事件与迭代编排

pub mod error;
pub mod events;
pub mod orchestrator;

pub use error::AgentError;
pub use events::{IterationRecord, RunEvent};
pub use orchestrator::Orchestrator;
