//! 内存图谱存储
//!
//! 测试与本地运行用的 GraphStore 实现：BTreeMap 存节点/关系，id 自增分配。
//! 邻域按无向 BFS 展开，路径查找沿关系方向（与原系统"注意关系单向性"一致）。

use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::graph::store::{GraphError, GraphStore};
use crate::graph::{NodeRecord, PathRecord, Properties, RelationshipRecord};

#[derive(Default)]
struct Inner {
    next_node_id: i64,
    next_rel_id: i64,
    nodes: BTreeMap<i64, NodeRecord>,
    rels: BTreeMap<i64, RelationshipRecord>,
}

impl Inner {
    /// 无向展开：id 在 max_depth 跳以内可达的节点 id（不含自身）
    fn neighborhood_ids(&self, id: i64, max_depth: usize) -> Vec<i64> {
        let mut seen: HashSet<i64> = HashSet::from([id]);
        let mut out = Vec::new();
        let mut frontier = VecDeque::from([(id, 0usize)]);
        while let Some((cur, depth)) = frontier.pop_front() {
            if depth >= max_depth {
                continue;
            }
            for rel in self.rels.values() {
                let next = if rel.start_id == cur {
                    rel.end_id
                } else if rel.end_id == cur {
                    rel.start_id
                } else {
                    continue;
                };
                if seen.insert(next) {
                    out.push(next);
                    frontier.push_back((next, depth + 1));
                }
            }
        }
        out
    }
}

/// 内存实现：Mutex 串行化全部读写（契约要求存储端自行串行化冲突写入）
#[derive(Default)]
pub struct MemoryGraphStore {
    inner: Mutex<Inner>,
}

impl MemoryGraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 当前节点/关系数量（测试观测用）
    pub fn counts(&self) -> (usize, usize) {
        let inner = self.inner.lock().unwrap();
        (inner.nodes.len(), inner.rels.len())
    }
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn get_node(&self, id: i64) -> Result<NodeRecord, GraphError> {
        let inner = self.inner.lock().unwrap();
        inner.nodes.get(&id).cloned().ok_or(GraphError::NodeNotFound(id))
    }

    async fn create_node(
        &self,
        labels: Vec<String>,
        properties: Properties,
    ) -> Result<NodeRecord, GraphError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_node_id += 1;
        let node = NodeRecord {
            id: inner.next_node_id,
            labels,
            properties,
        };
        inner.nodes.insert(node.id, node.clone());
        Ok(node)
    }

    async fn update_node(
        &self,
        id: i64,
        properties: Properties,
        labels: Option<Vec<String>>,
    ) -> Result<NodeRecord, GraphError> {
        let mut inner = self.inner.lock().unwrap();
        let node = inner
            .nodes
            .get_mut(&id)
            .ok_or(GraphError::NodeNotFound(id))?;
        for (k, v) in properties {
            node.properties.insert(k, v);
        }
        if let Some(labels) = labels {
            node.labels = labels;
        }
        Ok(node.clone())
    }

    async fn remove_node(&self, id: i64) -> Result<NodeRecord, GraphError> {
        let mut inner = self.inner.lock().unwrap();
        let node = inner.nodes.remove(&id).ok_or(GraphError::NodeNotFound(id))?;
        // 级联删除挂在该节点上的关系
        inner.rels.retain(|_, r| r.start_id != id && r.end_id != id);
        Ok(node)
    }

    async fn get_neighborhood(
        &self,
        id: i64,
        max_depth: usize,
    ) -> Result<Vec<NodeRecord>, GraphError> {
        let inner = self.inner.lock().unwrap();
        if !inner.nodes.contains_key(&id) {
            return Err(GraphError::NodeNotFound(id));
        }
        let ids = inner.neighborhood_ids(id, max_depth);
        Ok(ids
            .iter()
            .filter_map(|nid| inner.nodes.get(nid).cloned())
            .collect())
    }

    async fn get_random_nodes(&self, count: usize) -> Result<Vec<NodeRecord>, GraphError> {
        let inner = self.inner.lock().unwrap();
        let all: Vec<&NodeRecord> = inner.nodes.values().collect();
        let mut rng = rand::thread_rng();
        Ok(all
            .choose_multiple(&mut rng, count.min(all.len()))
            .map(|n| (*n).clone())
            .collect())
    }

    async fn get_random_neighborhood(
        &self,
        id: i64,
        count: usize,
        max_depth: usize,
    ) -> Result<Vec<NodeRecord>, GraphError> {
        let inner = self.inner.lock().unwrap();
        if !inner.nodes.contains_key(&id) {
            return Err(GraphError::NodeNotFound(id));
        }
        let ids = inner.neighborhood_ids(id, max_depth);
        let mut rng = rand::thread_rng();
        Ok(ids
            .choose_multiple(&mut rng, count.min(ids.len()))
            .filter_map(|nid| inner.nodes.get(nid).cloned())
            .collect())
    }

    async fn search_nodes(
        &self,
        name: &str,
        limit: usize,
    ) -> Result<Vec<NodeRecord>, GraphError> {
        let needle = name.to_lowercase();
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .nodes
            .values()
            .filter(|n| {
                n.properties
                    .get("name")
                    .and_then(|v| v.as_str())
                    .map(|s| s.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn get_isolated_nodes(&self) -> Result<Vec<NodeRecord>, GraphError> {
        let inner = self.inner.lock().unwrap();
        let connected: HashSet<i64> = inner
            .rels
            .values()
            .flat_map(|r| [r.start_id, r.end_id])
            .collect();
        Ok(inner
            .nodes
            .values()
            .filter(|n| !connected.contains(&n.id))
            .cloned()
            .collect())
    }

    async fn get_relationship(&self, id: i64) -> Result<RelationshipRecord, GraphError> {
        let inner = self.inner.lock().unwrap();
        inner
            .rels
            .get(&id)
            .cloned()
            .ok_or(GraphError::RelationshipNotFound(id))
    }

    async fn create_relationship(
        &self,
        start_id: i64,
        end_id: i64,
        rel_type: String,
        properties: Properties,
    ) -> Result<RelationshipRecord, GraphError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.nodes.contains_key(&start_id) {
            return Err(GraphError::NodeNotFound(start_id));
        }
        if !inner.nodes.contains_key(&end_id) {
            return Err(GraphError::NodeNotFound(end_id));
        }
        inner.next_rel_id += 1;
        let rel = RelationshipRecord {
            id: inner.next_rel_id,
            rel_type,
            properties,
            start_id,
            end_id,
        };
        inner.rels.insert(rel.id, rel.clone());
        Ok(rel)
    }

    async fn update_relationship(
        &self,
        id: i64,
        properties: Properties,
    ) -> Result<RelationshipRecord, GraphError> {
        let mut inner = self.inner.lock().unwrap();
        let rel = inner
            .rels
            .get_mut(&id)
            .ok_or(GraphError::RelationshipNotFound(id))?;
        for (k, v) in properties {
            rel.properties.insert(k, v);
        }
        Ok(rel.clone())
    }

    async fn remove_relationship(&self, id: i64) -> Result<RelationshipRecord, GraphError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .rels
            .remove(&id)
            .ok_or(GraphError::RelationshipNotFound(id))
    }

    async fn find_path(
        &self,
        start_id: i64,
        end_id: i64,
    ) -> Result<Option<PathRecord>, GraphError> {
        let inner = self.inner.lock().unwrap();
        if !inner.nodes.contains_key(&start_id) {
            return Err(GraphError::NodeNotFound(start_id));
        }
        if !inner.nodes.contains_key(&end_id) {
            return Err(GraphError::NodeNotFound(end_id));
        }
        // 有向 BFS，回溯前驱得到最短（按跳数）路径
        let mut prev: BTreeMap<i64, i64> = BTreeMap::new();
        let mut seen: HashSet<i64> = HashSet::from([start_id]);
        let mut frontier = VecDeque::from([start_id]);
        while let Some(cur) = frontier.pop_front() {
            if cur == end_id {
                let mut path = vec![end_id];
                let mut at = end_id;
                while let Some(&p) = prev.get(&at) {
                    path.push(p);
                    at = p;
                }
                path.reverse();
                return Ok(Some(PathRecord { node_ids: path }));
            }
            for rel in inner.rels.values() {
                if rel.start_id == cur && seen.insert(rel.end_id) {
                    prev.insert(rel.end_id, cur);
                    frontier.push_back(rel.end_id);
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(pairs: &[(&str, serde_json::Value)]) -> Properties {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let store = MemoryGraphStore::new();
        let created = store
            .create_node(vec!["Person".into()], props(&[("name", json!("Ada"))]))
            .await
            .unwrap();
        let fetched = store.get_node(created.id).await.unwrap();
        assert_eq!(fetched.labels, vec!["Person".to_string()]);
        assert_eq!(fetched.properties.get("name"), Some(&json!("Ada")));
    }

    #[tokio::test]
    async fn test_remove_node_cascades_relationships() {
        let store = MemoryGraphStore::new();
        let a = store.create_node(vec!["N".into()], Properties::new()).await.unwrap();
        let b = store.create_node(vec!["N".into()], Properties::new()).await.unwrap();
        let rel = store
            .create_relationship(a.id, b.id, "CONNECTS_TO".into(), Properties::new())
            .await
            .unwrap();
        store.remove_node(a.id).await.unwrap();
        assert!(matches!(
            store.get_relationship(rel.id).await,
            Err(GraphError::RelationshipNotFound(_))
        ));
        // b 失去了唯一的连接，成为孤立节点
        let isolated = store.get_isolated_nodes().await.unwrap();
        assert_eq!(isolated.len(), 1);
        assert_eq!(isolated[0].id, b.id);
    }

    #[tokio::test]
    async fn test_find_path_respects_direction() {
        let store = MemoryGraphStore::new();
        let a = store.create_node(vec!["N".into()], Properties::new()).await.unwrap();
        let b = store.create_node(vec!["N".into()], Properties::new()).await.unwrap();
        let c = store.create_node(vec!["N".into()], Properties::new()).await.unwrap();
        store
            .create_relationship(a.id, b.id, "TO".into(), Properties::new())
            .await
            .unwrap();
        store
            .create_relationship(b.id, c.id, "TO".into(), Properties::new())
            .await
            .unwrap();

        let path = store.find_path(a.id, c.id).await.unwrap().unwrap();
        assert_eq!(path.node_ids, vec![a.id, b.id, c.id]);
        // 逆向不可达
        assert!(store.find_path(c.id, a.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_neighborhood_is_undirected_and_depth_bounded() {
        let store = MemoryGraphStore::new();
        let a = store.create_node(vec!["N".into()], Properties::new()).await.unwrap();
        let b = store.create_node(vec!["N".into()], Properties::new()).await.unwrap();
        let c = store.create_node(vec!["N".into()], Properties::new()).await.unwrap();
        store
            .create_relationship(b.id, a.id, "TO".into(), Properties::new())
            .await
            .unwrap();
        store
            .create_relationship(b.id, c.id, "TO".into(), Properties::new())
            .await
            .unwrap();

        let depth1: Vec<i64> = store
            .get_neighborhood(a.id, 1)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(depth1, vec![b.id]);

        let mut depth2: Vec<i64> = store
            .get_neighborhood(a.id, 2)
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.id)
            .collect();
        depth2.sort();
        assert_eq!(depth2, vec![b.id, c.id]);
    }

    #[tokio::test]
    async fn test_search_nodes_is_idempotent_without_mutation() {
        let store = MemoryGraphStore::new();
        store
            .create_node(vec!["N".into()], props(&[("name", json!("graph db"))]))
            .await
            .unwrap();
        store
            .create_node(vec!["N".into()], props(&[("name", json!("Graph Theory"))]))
            .await
            .unwrap();
        let first = store.search_nodes("graph", 10).await.unwrap();
        let second = store.search_nodes("graph", 10).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
    }
}
