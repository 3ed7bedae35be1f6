//! 节点 CRUD 工具

use async_trait::async_trait;
use serde_json::Value;

use crate::tools::adapter::{
    opt_props, require_i64, require_labels, require_props, GraphAdapter,
};
use crate::tools::Tool;

/// create_node：labels + properties 创建新节点
pub struct CreateNodeTool {
    adapter: GraphAdapter,
}

impl CreateNodeTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for CreateNodeTool {
    fn name(&self) -> &str {
        "create_node"
    }

    fn description(&self) -> &str {
        "Create a new node. Args: {\"labels\": [\"Person\"], \"properties\": {\"name\": \"Ada\"}}"
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let labels = require_labels(&args, "labels")?;
        let properties = opt_props(&args, "properties")?;
        Ok(self.adapter.create_node(labels, properties).await)
    }
}

/// get_node：按 id 获取节点
pub struct GetNodeTool {
    adapter: GraphAdapter,
}

impl GetNodeTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for GetNodeTool {
    fn name(&self) -> &str {
        "get_node"
    }

    fn description(&self) -> &str {
        "Get a node by id. Args: {\"node_id\": 1}"
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let id = require_i64(&args, "node_id")?;
        Ok(self.adapter.get_node(id).await)
    }
}

/// update_node：合并更新属性，可选整体替换标签
pub struct UpdateNodeTool {
    adapter: GraphAdapter,
}

impl UpdateNodeTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for UpdateNodeTool {
    fn name(&self) -> &str {
        "update_node"
    }

    fn description(&self) -> &str {
        "Update a node's properties (and optionally replace its labels). Args: {\"node_id\": 1, \"properties\": {\"age\": 30}, \"labels\": [\"Person\"]}"
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let id = require_i64(&args, "node_id")?;
        let properties = require_props(&args, "properties")?;
        let labels = match args.get("labels") {
            None | Some(Value::Null) => None,
            Some(_) => Some(require_labels(&args, "labels")?),
        };
        Ok(self.adapter.update_node(id, properties, labels).await)
    }
}

/// remove_node：删除节点（级联删除其关系）
pub struct RemoveNodeTool {
    adapter: GraphAdapter,
}

impl RemoveNodeTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for RemoveNodeTool {
    fn name(&self) -> &str {
        "remove_node"
    }

    fn description(&self) -> &str {
        "Remove a node by id (its relationships are removed too). Args: {\"node_id\": 1}"
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let id = require_i64(&args, "node_id")?;
        Ok(self.adapter.remove_node(id).await)
    }
}
