//! 图谱存储契约
//!
//! 核心只依赖这份请求/响应契约，不关心查询语言与后端实现；实现方负责
//! 并发写入的串行化。所有查询类操作无副作用。

use async_trait::async_trait;
use thiserror::Error;

use crate::graph::{NodeRecord, PathRecord, Properties, RelationshipRecord};

/// 存储层错误：实体缺失与后端故障分开，便于适配层给出不同的文本前缀
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("node {0} not found")]
    NodeNotFound(i64),

    #[error("relationship {0} not found")]
    RelationshipNotFound(i64),

    #[error("graph backend error: {0}")]
    Backend(String),
}

/// 图谱存储能力，内存实现与未来的数据库后端共用这一套接口
#[async_trait]
pub trait GraphStore: Send + Sync {
    async fn get_node(&self, id: i64) -> Result<NodeRecord, GraphError>;

    async fn create_node(
        &self,
        labels: Vec<String>,
        properties: Properties,
    ) -> Result<NodeRecord, GraphError>;

    /// 更新属性（合并写入）；labels 传 Some 时整体替换标签
    async fn update_node(
        &self,
        id: i64,
        properties: Properties,
        labels: Option<Vec<String>>,
    ) -> Result<NodeRecord, GraphError>;

    /// 删除节点及其关联关系，返回删除前的记录
    async fn remove_node(&self, id: i64) -> Result<NodeRecord, GraphError>;

    /// 返回 id 在 max_depth 跳以内可达的节点（不含自身）
    async fn get_neighborhood(&self, id: i64, max_depth: usize)
        -> Result<Vec<NodeRecord>, GraphError>;

    async fn get_random_nodes(&self, count: usize) -> Result<Vec<NodeRecord>, GraphError>;

    async fn get_random_neighborhood(
        &self,
        id: i64,
        count: usize,
        max_depth: usize,
    ) -> Result<Vec<NodeRecord>, GraphError>;

    /// 按 name 属性模糊搜索
    async fn search_nodes(&self, name: &str, limit: usize)
        -> Result<Vec<NodeRecord>, GraphError>;

    /// 没有任何关系连接的节点
    async fn get_isolated_nodes(&self) -> Result<Vec<NodeRecord>, GraphError>;

    async fn get_relationship(&self, id: i64) -> Result<RelationshipRecord, GraphError>;

    async fn create_relationship(
        &self,
        start_id: i64,
        end_id: i64,
        rel_type: String,
        properties: Properties,
    ) -> Result<RelationshipRecord, GraphError>;

    async fn update_relationship(
        &self,
        id: i64,
        properties: Properties,
    ) -> Result<RelationshipRecord, GraphError>;

    async fn remove_relationship(&self, id: i64) -> Result<RelationshipRecord, GraphError>;

    /// 沿关系方向查找 start -> end 的一条路径；不存在返回 None
    async fn find_path(&self, start_id: i64, end_id: i64)
        -> Result<Option<PathRecord>, GraphError>;
}
