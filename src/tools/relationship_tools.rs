//! 关系 CRUD 工具与节点连接

use async_trait::async_trait;
use serde_json::Value;

use crate::tools::adapter::{
    opt_props, opt_str, require_i64, require_props, require_str, GraphAdapter,
};
use crate::tools::Tool;

/// connect_nodes 未指定类型时的默认关系类型（沿用原系统）
const DEFAULT_REL_TYPE: &str = "CONNECTS_TO";

/// create_link：在两个已有节点之间创建关系
pub struct CreateLinkTool {
    adapter: GraphAdapter,
}

impl CreateLinkTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for CreateLinkTool {
    fn name(&self) -> &str {
        "create_link"
    }

    fn description(&self) -> &str {
        "Create a relationship between two existing nodes. Args: {\"start_node_id\": 1, \"end_node_id\": 2, \"rel_type\": \"KNOWS\", \"properties\": {}}"
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let start = require_i64(&args, "start_node_id")?;
        let end = require_i64(&args, "end_node_id")?;
        let rel_type = require_str(&args, "rel_type")?;
        let properties = opt_props(&args, "properties")?;
        Ok(self
            .adapter
            .create_relationship(start, end, rel_type, properties)
            .await)
    }
}

/// connect_nodes：create_link 的便捷形式，类型缺省为 CONNECTS_TO
pub struct ConnectNodesTool {
    adapter: GraphAdapter,
}

impl ConnectNodesTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for ConnectNodesTool {
    fn name(&self) -> &str {
        "connect_nodes"
    }

    fn description(&self) -> &str {
        "Connect two nodes (rel_type defaults to CONNECTS_TO). Args: {\"start_node_id\": 1, \"end_node_id\": 2, \"rel_type\": \"CONNECTS_TO\"}"
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let start = require_i64(&args, "start_node_id")?;
        let end = require_i64(&args, "end_node_id")?;
        let rel_type = opt_str(&args, "rel_type", DEFAULT_REL_TYPE);
        let properties = opt_props(&args, "properties")?;
        Ok(self
            .adapter
            .create_relationship(start, end, rel_type, properties)
            .await)
    }
}

/// get_link：按 id 获取关系
pub struct GetLinkTool {
    adapter: GraphAdapter,
}

impl GetLinkTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for GetLinkTool {
    fn name(&self) -> &str {
        "get_link"
    }

    fn description(&self) -> &str {
        "Get a relationship by id. Args: {\"relationship_id\": 1}"
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let id = require_i64(&args, "relationship_id")?;
        Ok(self.adapter.get_relationship(id).await)
    }
}

/// update_link：合并更新关系属性
pub struct UpdateLinkTool {
    adapter: GraphAdapter,
}

impl UpdateLinkTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for UpdateLinkTool {
    fn name(&self) -> &str {
        "update_link"
    }

    fn description(&self) -> &str {
        "Update a relationship's properties. Args: {\"relationship_id\": 1, \"properties\": {\"since\": \"2020\"}}"
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let id = require_i64(&args, "relationship_id")?;
        let properties = require_props(&args, "properties")?;
        Ok(self.adapter.update_relationship(id, properties).await)
    }
}

/// remove_link：删除关系
pub struct RemoveLinkTool {
    adapter: GraphAdapter,
}

impl RemoveLinkTool {
    pub fn new(adapter: GraphAdapter) -> Self {
        Self { adapter }
    }
}

#[async_trait]
impl Tool for RemoveLinkTool {
    fn name(&self) -> &str {
        "remove_link"
    }

    fn description(&self) -> &str {
        "Remove a relationship by id. Args: {\"relationship_id\": 1}"
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let id = require_i64(&args, "relationship_id")?;
        Ok(self.adapter.remove_relationship(id).await)
    }
}
