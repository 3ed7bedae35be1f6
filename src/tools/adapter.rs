//! 图谱存储适配层
//!
//! ToolInvocation 与 GraphStore 契约之间的薄翻译层：把存储结果与三类失败
//! （实体缺失 / 参数为空 / 下游故障）归一化为带固定前缀的自描述文本，保留
//! 排障信息但不泄漏内部错误类型。成功文本必须回显受影响的实体 id。

use std::sync::Arc;

use serde_json::Value;

use crate::graph::store::GraphError;
use crate::graph::{GraphStore, NodeRecord, Properties};

/// 适配器：所有图谱工具共享一份，内部只是 Arc 的克隆
#[derive(Clone)]
pub struct GraphAdapter {
    store: Arc<dyn GraphStore>,
}

impl GraphAdapter {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// 统一的失败文本：实体缺失与后端故障用不同前缀，供推理循环分流处理
    fn describe_failure(e: &GraphError) -> String {
        match e {
            GraphError::NodeNotFound(id) => format!(
                "no node with id {} exists; check the id or use search_nodes to look it up by name",
                id
            ),
            GraphError::RelationshipNotFound(id) => {
                format!("no relationship with id {} exists; check the id", id)
            }
            GraphError::Backend(msg) => format!("graph store error: {}", msg),
        }
    }

    fn render_nodes(nodes: &[NodeRecord]) -> String {
        let rendered: Vec<String> = nodes.iter().map(|n| n.render()).collect();
        format!("[{}]", rendered.join(", "))
    }

    pub async fn create_node(&self, labels: Vec<String>, properties: Properties) -> String {
        match self.store.create_node(labels, properties).await {
            Ok(node) => format!(
                "node created: {}. Remember its id and connect it to related nodes.",
                node.render()
            ),
            Err(e) => Self::describe_failure(&e),
        }
    }

    pub async fn get_node(&self, id: i64) -> String {
        match self.store.get_node(id).await {
            Ok(node) => format!("node found: {}. Continue with your planned operations.", node.render()),
            Err(e) => Self::describe_failure(&e),
        }
    }

    pub async fn update_node(
        &self,
        id: i64,
        properties: Properties,
        labels: Option<Vec<String>>,
    ) -> String {
        match self.store.update_node(id, properties, labels).await {
            Ok(node) => format!("node updated: {}. Continue with your planned operations.", node.render()),
            Err(e) => Self::describe_failure(&e),
        }
    }

    pub async fn remove_node(&self, id: i64) -> String {
        match self.store.remove_node(id).await {
            Ok(_) => format!("node {} removed, together with its relationships.", id),
            Err(e) => Self::describe_failure(&e),
        }
    }

    pub async fn neighborhood(&self, id: i64, max_depth: usize) -> String {
        match self.store.get_neighborhood(id, max_depth).await {
            Ok(nodes) if nodes.is_empty() => format!(
                "node {} has no neighbors within depth {}; it may be an isolated node",
                id, max_depth
            ),
            Ok(nodes) => format!("neighbors of node {}: {}", id, Self::render_nodes(&nodes)),
            Err(e) => Self::describe_failure(&e),
        }
    }

    pub async fn random_nodes(&self, count: usize) -> String {
        match self.store.get_random_nodes(count).await {
            Ok(nodes) if nodes.is_empty() => "the graph has no nodes yet".to_string(),
            Ok(nodes) => format!("random node sample: {}", Self::render_nodes(&nodes)),
            Err(e) => Self::describe_failure(&e),
        }
    }

    pub async fn random_neighborhood(&self, id: i64, count: usize, max_depth: usize) -> String {
        match self.store.get_random_neighborhood(id, count, max_depth).await {
            Ok(nodes) if nodes.is_empty() => format!(
                "node {} has no neighbors within depth {}; it may be an isolated node",
                id, max_depth
            ),
            Ok(nodes) => format!(
                "random neighbors of node {}: {}",
                id,
                Self::render_nodes(&nodes)
            ),
            Err(e) => Self::describe_failure(&e),
        }
    }

    pub async fn search_nodes(&self, name: &str, limit: usize) -> String {
        match self.store.search_nodes(name, limit).await {
            Ok(nodes) if nodes.is_empty() => {
                format!("no nodes matching '{}' were found", name)
            }
            Ok(nodes) => format!("nodes matching '{}': {}", name, Self::render_nodes(&nodes)),
            Err(e) => Self::describe_failure(&e),
        }
    }

    pub async fn isolated_nodes(&self) -> String {
        match self.store.get_isolated_nodes().await {
            Ok(nodes) if nodes.is_empty() => "the graph has no isolated nodes".to_string(),
            Ok(nodes) => format!(
                "found {} isolated node(s): {}",
                nodes.len(),
                Self::render_nodes(&nodes)
            ),
            Err(e) => Self::describe_failure(&e),
        }
    }

    pub async fn get_relationship(&self, id: i64) -> String {
        match self.store.get_relationship(id).await {
            Ok(rel) => format!(
                "relationship found: {}. Continue with your planned operations.",
                rel.render()
            ),
            Err(e) => Self::describe_failure(&e),
        }
    }

    pub async fn create_relationship(
        &self,
        start_id: i64,
        end_id: i64,
        rel_type: String,
        properties: Properties,
    ) -> String {
        match self
            .store
            .create_relationship(start_id, end_id, rel_type, properties)
            .await
        {
            Ok(rel) => format!("relationship created: {}", rel.render()),
            Err(e) => Self::describe_failure(&e),
        }
    }

    pub async fn update_relationship(&self, id: i64, properties: Properties) -> String {
        match self.store.update_relationship(id, properties).await {
            Ok(rel) => format!("relationship updated: {}", rel.render()),
            Err(e) => Self::describe_failure(&e),
        }
    }

    pub async fn remove_relationship(&self, id: i64) -> String {
        match self.store.remove_relationship(id).await {
            Ok(_) => format!("relationship {} removed.", id),
            Err(e) => Self::describe_failure(&e),
        }
    }

    pub async fn find_path(&self, start_id: i64, end_id: i64) -> String {
        match self.store.find_path(start_id, end_id).await {
            Ok(Some(path)) => format!(
                "path from node {} to node {}: {}",
                start_id,
                end_id,
                path.render()
            ),
            Ok(None) => format!(
                "no path was found from node {} to node {}; note that relationships are directional",
                start_id, end_id
            ),
            Err(e) => format!("{}; no path was found", Self::describe_failure(&e)),
        }
    }
}

// ---- 参数提取辅助：缺失/类型错误统一为 "invalid arguments: ..." 前缀 ----

pub fn require_i64(args: &Value, key: &str) -> Result<i64, String> {
    args.get(key)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| format!("invalid arguments: missing required integer argument '{}'", key))
}

pub fn opt_usize(args: &Value, key: &str, default: usize) -> usize {
    args.get(key)
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .unwrap_or(default)
}

pub fn require_str(args: &Value, key: &str) -> Result<String, String> {
    let s = args
        .get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("invalid arguments: missing required string argument '{}'", key))?;
    if s.trim().is_empty() {
        return Err(format!("invalid arguments: argument '{}' must not be empty", key));
    }
    Ok(s.to_string())
}

pub fn opt_str(args: &Value, key: &str, default: &str) -> String {
    args.get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default)
        .to_string()
}

/// properties 参数：缺省为空表；给了但不是对象则报参数错误
pub fn opt_props(args: &Value, key: &str) -> Result<Properties, String> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(Properties::new()),
        Some(Value::Object(map)) => Ok(map.clone()),
        Some(_) => Err(format!("invalid arguments: argument '{}' must be an object", key)),
    }
}

/// 必填且非空的 properties（update 类工具：不提供要更新的属性没有意义）
pub fn require_props(args: &Value, key: &str) -> Result<Properties, String> {
    let props = opt_props(args, key)?;
    if props.is_empty() {
        return Err(format!(
            "invalid arguments: argument '{}' must be a non-empty object",
            key
        ));
    }
    Ok(props)
}

/// labels 参数：字符串数组，至少一个
pub fn require_labels(args: &Value, key: &str) -> Result<Vec<String>, String> {
    let arr = args
        .get(key)
        .and_then(|v| v.as_array())
        .ok_or_else(|| format!("invalid arguments: missing required array argument '{}'", key))?;
    let labels: Vec<String> = arr
        .iter()
        .filter_map(|v| v.as_str())
        .map(String::from)
        .collect();
    if labels.is_empty() {
        return Err(format!(
            "invalid arguments: argument '{}' must contain at least one label",
            key
        ));
    }
    Ok(labels)
}
