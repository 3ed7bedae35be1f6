//! 图谱实体类型
//!
//! 节点 = id + 标签集 + 自由属性；关系 = id + 类型 + 属性 + 起止节点 id。
//! id 由存储端分配（整数，沿用 Neo4j 风格的内部 id）。

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 自由属性表
pub type Properties = serde_json::Map<String, Value>;

/// 节点记录
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: i64,
    pub labels: Vec<String>,
    pub properties: Properties,
}

/// 关系记录（有向：start -> end）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RelationshipRecord {
    pub id: i64,
    pub rel_type: String,
    pub properties: Properties,
    pub start_id: i64,
    pub end_id: i64,
}

/// 节点间路径：按序的节点 id 列表（含两端）
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PathRecord {
    pub node_ids: Vec<i64>,
}

impl NodeRecord {
    /// 渲染为自描述文本（JSON），供 ToolResult 使用；必须能让人检索到 id
    pub fn render(&self) -> String {
        serde_json::json!({
            "id": self.id,
            "labels": self.labels,
            "properties": self.properties,
        })
        .to_string()
    }
}

impl RelationshipRecord {
    pub fn render(&self) -> String {
        serde_json::json!({
            "id": self.id,
            "type": self.rel_type,
            "properties": self.properties,
            "start_id": self.start_id,
            "end_id": self.end_id,
        })
        .to_string()
    }
}

impl PathRecord {
    pub fn render(&self) -> String {
        let hops: Vec<String> = self.node_ids.iter().map(|id| id.to_string()).collect();
        hops.join(" -> ")
    }
}
