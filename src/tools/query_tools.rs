//! 只读查询工具：邻域、随机采样、搜索、路径、孤立节点
//!
//! 这组工具同时进入 Actor 与 Evaluator 的目录；Evaluator 只拿得到这组
//! 加上 get_node / get_link（最小权限边界）。

use async_trait::async_trait;
use serde_json::Value;

use crate::tools::adapter::{opt_usize, require_i64, require_str, GraphAdapter};
use crate::tools::Tool;

/// get_nearby_nodes：max_depth 跳以内的全部邻居
pub struct GetNearbyNodesTool {
    adapter: GraphAdapter,
}

impl GetNearbyNodesTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for GetNearbyNodesTool {
    fn name(&self) -> &str {
        "get_nearby_nodes"
    }

    fn description(&self) -> &str {
        "Get all nodes near a node. Args: {\"node_id\": 1, \"max_depth\": 2}"
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let id = require_i64(&args, "node_id")?;
        let max_depth = opt_usize(&args, "max_depth", 2);
        Ok(self.adapter.neighborhood(id, max_depth).await)
    }
}

/// get_random_nodes：全图随机采样
pub struct GetRandomNodesTool {
    adapter: GraphAdapter,
}

impl GetRandomNodesTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for GetRandomNodesTool {
    fn name(&self) -> &str {
        "get_random_nodes"
    }

    fn description(&self) -> &str {
        "Get a random sample of nodes. Args: {\"count\": 5}"
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let count = opt_usize(&args, "count", 5);
        if count < 1 {
            return Err("invalid arguments: 'count' must be greater than 0".to_string());
        }
        Ok(self.adapter.random_nodes(count).await)
    }
}

/// get_random_nearby_nodes：邻域内随机采样
pub struct GetRandomNearbyNodesTool {
    adapter: GraphAdapter,
}

impl GetRandomNearbyNodesTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for GetRandomNearbyNodesTool {
    fn name(&self) -> &str {
        "get_random_nearby_nodes"
    }

    fn description(&self) -> &str {
        "Get random nodes near a node. Args: {\"node_id\": 1, \"count\": 3, \"max_depth\": 2}"
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let id = require_i64(&args, "node_id")?;
        let count = opt_usize(&args, "count", 3);
        let max_depth = opt_usize(&args, "max_depth", 2);
        if count < 1 {
            return Err("invalid arguments: 'count' must be greater than 0".to_string());
        }
        Ok(self.adapter.random_neighborhood(id, count, max_depth).await)
    }
}

/// search_nodes：按 name 模糊搜索
pub struct SearchNodesTool {
    adapter: GraphAdapter,
}

impl SearchNodesTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for SearchNodesTool {
    fn name(&self) -> &str {
        "search_nodes"
    }

    fn description(&self) -> &str {
        "Fuzzy-search nodes by name. Args: {\"name\": \"Ada\", \"limit\": 3}"
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let name = require_str(&args, "name")?;
        let limit = opt_usize(&args, "limit", 3);
        Ok(self.adapter.search_nodes(&name, limit).await)
    }
}

/// find_path：沿关系方向查找两节点间路径
pub struct FindPathTool {
    adapter: GraphAdapter,
}

impl FindPathTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for FindPathTool {
    fn name(&self) -> &str {
        "find_path"
    }

    fn description(&self) -> &str {
        "Find a directed path between two nodes. Args: {\"start_node_id\": 1, \"end_node_id\": 2}"
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let start = require_i64(&args, "start_node_id")?;
        let end = require_i64(&args, "end_node_id")?;
        Ok(self.adapter.find_path(start, end).await)
    }
}

/// get_isolated_nodes：没有任何关系连接的节点
pub struct GetIsolatedNodesTool {
    adapter: GraphAdapter,
}

impl GetIsolatedNodesTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for GetIsolatedNodesTool {
    fn name(&self) -> &str {
        "get_isolated_nodes"
    }

    fn description(&self) -> &str {
        "List nodes that have no relationships at all. Args: {}"
    }

    async fn execute(&self, _args: Value) -> Result<String, String> {
        Ok(self.adapter.isolated_nodes().await)
    }
}
