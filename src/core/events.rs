//! 运行过程事件
//!
//! 编排器对外的增量输出：每个迭代阶段一条、可独立序列化的记录，传输层
//! 可以逐条转发而无需缓冲整个运行。调用方看到的要么是完整的有序事件流，
//! 要么是一个前缀接一条显式的终止错误记录——绝不无声截断。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 一次完成的迭代：序号与该轮的目标文本（只追加，不回放进提示词）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: usize,
    pub objective: String,
    pub at: DateTime<Utc>,
}

/// 运行事件（可序列化为 JSON 供传输层逐条转发）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RunEvent {
    /// Acting 阶段完成：本轮目标与 Actor 产出
    ActorPhase {
        iteration: usize,
        objective: String,
        output: String,
    },
    /// Evaluating 阶段完成：Evaluator 的评语（最后一轮没有该事件）
    EvaluatorPhase { iteration: usize, critique: String },
    /// 运行级失败（LLM 故障、步数超限、取消）；终止记录，之后不再有事件
    RunFailed { text: String },
    /// 正常收尾：迭代总数与累计的迭代历史
    RunComplete {
        iterations: usize,
        history: Vec<IterationRecord>,
    },
}
