//! Graphmind - 双智能体知识图谱管理系统
//!
//! Actor 智能体通过固定的工具目录操作属性图，Evaluator 智能体用只读子集
//! 评估操作结果，评语改写下一轮目标，如此有界迭代、自我纠偏。
//!
//! 模块划分：
//! - **agents**: Actor / Evaluator 会话、ReAct 循环、输出解析、会话工厂
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 迭代编排、运行事件、错误类型
//! - **graph**: 图谱实体、存储契约与内存实现
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Mock）
//! - **tools**: 图谱工具目录、注册表与存储适配

pub mod agents;
pub mod config;
pub mod core;
pub mod graph;
pub mod llm;
pub mod observability;
pub mod tools;

pub use agents::SessionFactory;
pub use crate::core::{AgentError, IterationRecord, Orchestrator, RunEvent};
