//! 固定工具目录
//!
//! 目录在进程启动时构造一次，Actor 与 Evaluator 共享只读引用；Evaluator
//! 只拿只读子集（不能改图，只能评图）。构造后立即校验注册结果与声明的
//! 目录一致，缺了处理器在启动时就报 ConfigError，而不是运行期查表落空。

use std::sync::Arc;

use crate::core::AgentError;
use crate::graph::GraphStore;
use crate::tools::adapter::GraphAdapter;
use crate::tools::node_tools::{CreateNodeTool, GetNodeTool, RemoveNodeTool, UpdateNodeTool};
use crate::tools::query_tools::{
    FindPathTool, GetIsolatedNodesTool, GetNearbyNodesTool, GetRandomNearbyNodesTool,
    GetRandomNodesTool, SearchNodesTool,
};
use crate::tools::relationship_tools::{
    ConnectNodesTool, CreateLinkTool, GetLinkTool, RemoveLinkTool, UpdateLinkTool,
};
use crate::tools::ToolRegistry;

/// Actor 的完整目录（含变更类工具）
pub const ACTOR_TOOLS: &[&str] = &[
    "create_node",
    "get_node",
    "get_nearby_nodes",
    "create_link",
    "get_link",
    "remove_node",
    "update_node",
    "find_path",
    "connect_nodes",
    "get_random_nodes",
    "get_random_nearby_nodes",
    "remove_link",
    "update_link",
    "search_nodes",
    "get_isolated_nodes",
];

/// Evaluator 的只读子集
pub const EVALUATOR_TOOLS: &[&str] = &[
    "get_node",
    "get_nearby_nodes",
    "get_link",
    "find_path",
    "get_random_nodes",
    "get_random_nearby_nodes",
    "search_nodes",
    "get_isolated_nodes",
];

fn verify(registry: &ToolRegistry, expected: &[&str]) -> Result<(), AgentError> {
    for name in expected {
        if !registry.contains(name) {
            return Err(AgentError::ConfigError(format!(
                "tool catalogue is missing declared tool '{}'",
                name
            )));
        }
    }
    let registered = registry.tool_names();
    if registered.len() != expected.len() {
        return Err(AgentError::ConfigError(format!(
            "tool catalogue mismatch: declared {} tools, registered {}",
            expected.len(),
            registered.len()
        )));
    }
    Ok(())
}

/// 构造 Actor 目录
pub fn actor_registry(
    store: Arc<dyn GraphStore>,
    timeout_secs: u64,
) -> Result<ToolRegistry, AgentError> {
    let adapter = GraphAdapter::new(store);
    let mut registry = ToolRegistry::new(timeout_secs);
    registry.register(CreateNodeTool::new(adapter.clone()));
    registry.register(GetNodeTool::new(adapter.clone()));
    registry.register(UpdateNodeTool::new(adapter.clone()));
    registry.register(RemoveNodeTool::new(adapter.clone()));
    registry.register(CreateLinkTool::new(adapter.clone()));
    registry.register(ConnectNodesTool::new(adapter.clone()));
    registry.register(GetLinkTool::new(adapter.clone()));
    registry.register(UpdateLinkTool::new(adapter.clone()));
    registry.register(RemoveLinkTool::new(adapter.clone()));
    registry.register(GetNearbyNodesTool::new(adapter.clone()));
    registry.register(GetRandomNodesTool::new(adapter.clone()));
    registry.register(GetRandomNearbyNodesTool::new(adapter.clone()));
    registry.register(SearchNodesTool::new(adapter.clone()));
    registry.register(FindPathTool::new(adapter.clone()));
    registry.register(GetIsolatedNodesTool::new(adapter));
    verify(&registry, ACTOR_TOOLS)?;
    Ok(registry)
}

/// 构造 Evaluator 只读目录
pub fn evaluator_registry(
    store: Arc<dyn GraphStore>,
    timeout_secs: u64,
) -> Result<ToolRegistry, AgentError> {
    let adapter = GraphAdapter::new(store);
    let mut registry = ToolRegistry::new(timeout_secs);
    registry.register(GetNodeTool::new(adapter.clone()));
    registry.register(GetLinkTool::new(adapter.clone()));
    registry.register(GetNearbyNodesTool::new(adapter.clone()));
    registry.register(GetRandomNodesTool::new(adapter.clone()));
    registry.register(GetRandomNearbyNodesTool::new(adapter.clone()));
    registry.register(SearchNodesTool::new(adapter.clone()));
    registry.register(FindPathTool::new(adapter.clone()));
    registry.register(GetIsolatedNodesTool::new(adapter));
    verify(&registry, EVALUATOR_TOOLS)?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MemoryGraphStore;

    #[test]
    fn test_actor_catalogue_complete() {
        let store = Arc::new(MemoryGraphStore::new());
        let registry = actor_registry(store, 5).unwrap();
        assert_eq!(registry.tool_names().len(), ACTOR_TOOLS.len());
        for name in ACTOR_TOOLS {
            assert!(registry.contains(name), "missing {}", name);
        }
    }

    #[test]
    fn test_evaluator_catalogue_is_read_only_subset() {
        let store = Arc::new(MemoryGraphStore::new());
        let registry = evaluator_registry(store, 5).unwrap();
        for name in EVALUATOR_TOOLS {
            assert!(ACTOR_TOOLS.contains(name));
            assert!(registry.contains(name), "missing {}", name);
        }
        for mutating in ["create_node", "update_node", "remove_node", "create_link",
                         "update_link", "remove_link", "connect_nodes"] {
            assert!(!registry.contains(mutating), "{} must not be exposed", mutating);
        }
    }
}
