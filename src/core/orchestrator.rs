//! 迭代编排器
//!
//! Start -> Acting -> (Evaluating | Done) 状态机：Actor 执行当前目标，
//! Evaluator 评估其产出，评语改写下一轮目标；最后一轮跳过评估（没有下一轮
//! 可应用评语，沿用原系统的既定策略）。初始目标在整个运行期间保持不变并
//! 原样传给每次 Actor 调用。进度经有界 mpsc 逐条交付：惰性、有限、不可
//! 重放；读端掉线则下一次发送失败，循环随即停止，不会再发起新的 LLM 调用。

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::agents::SessionFactory;
use crate::core::{AgentError, IterationRecord, RunEvent};

/// 事件通道容量：足够小以保持背压，足够大以避免单轮内的等待
const CHANNEL_CAPACITY: usize = 16;

/// 迭代编排器：唯一知道迭代计数与历史的组件，会话本身跨迭代无状态
pub struct Orchestrator {
    factory: Arc<SessionFactory>,
}

impl Orchestrator {
    pub fn new(factory: SessionFactory) -> Self {
        Self {
            factory: Arc::new(factory),
        }
    }

    /// 启动一次运行，返回事件接收端（惰性流）。配置非法时在启动前拒绝，
    /// 不产生任何部分执行。
    pub fn run(
        &self,
        objective: impl Into<String>,
        max_iterations: usize,
        cancel: CancellationToken,
    ) -> Result<mpsc::Receiver<RunEvent>, AgentError> {
        let objective = objective.into();
        if objective.trim().is_empty() {
            return Err(AgentError::ConfigError(
                "objective must not be empty".to_string(),
            ));
        }
        if max_iterations < 1 {
            return Err(AgentError::ConfigError(
                "max_iterations must be at least 1".to_string(),
            ));
        }

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let factory = self.factory.clone();
        tokio::spawn(async move {
            run_loop(factory, objective, max_iterations, cancel, tx).await;
        });
        Ok(rx)
    }

    /// 驱动整个流并返回有序的完整事件列表（CLI 与测试的便捷入口）
    pub async fn run_collect(
        &self,
        objective: impl Into<String>,
        max_iterations: usize,
        cancel: CancellationToken,
    ) -> Result<Vec<RunEvent>, AgentError> {
        let mut rx = self.run(objective, max_iterations, cancel)?;
        let mut events = Vec::new();
        while let Some(ev) = rx.recv().await {
            events.push(ev);
        }
        Ok(events)
    }
}

async fn run_loop(
    factory: Arc<SessionFactory>,
    initial_objective: String,
    max_iterations: usize,
    cancel: CancellationToken,
    tx: mpsc::Sender<RunEvent>,
) {
    let mut current_objective = initial_objective.clone();
    let mut history: Vec<IterationRecord> = Vec::new();

    for i in 0..max_iterations {
        if cancel.is_cancelled() {
            let _ = tx.send(RunEvent::RunFailed { text: "Cancelled".into() }).await;
            return;
        }

        tracing::info!(iteration = i, objective = %current_objective, "acting");
        let actor = factory.actor();
        let output = match actor.run(&current_objective, &initial_objective, &cancel).await {
            Ok(output) => output,
            Err(e) => {
                let _ = tx.send(RunEvent::RunFailed { text: e.to_string() }).await;
                return;
            }
        };

        if tx
            .send(RunEvent::ActorPhase {
                iteration: i,
                objective: current_objective.clone(),
                output: output.clone(),
            })
            .await
            .is_err()
        {
            // 读端已放弃，剩余迭代丢弃
            tracing::info!(iteration = i, "receiver dropped, stopping run");
            return;
        }
        history.push(IterationRecord {
            iteration: i,
            objective: current_objective.clone(),
            at: Utc::now(),
        });

        // 最后一轮不评估：评语没有下一轮可应用
        if i == max_iterations - 1 {
            break;
        }

        if cancel.is_cancelled() {
            let _ = tx.send(RunEvent::RunFailed { text: "Cancelled".into() }).await;
            return;
        }

        tracing::info!(iteration = i, "evaluating");
        let evaluator = factory.evaluator();
        let target = format!(
            "Evaluate the actor's operation for objective: {}\nResult: {}",
            current_objective, output
        );
        let critique = match evaluator.run(&target, &cancel).await {
            Ok(critique) => critique,
            Err(e) => {
                let _ = tx.send(RunEvent::RunFailed { text: e.to_string() }).await;
                return;
            }
        };

        if tx
            .send(RunEvent::EvaluatorPhase {
                iteration: i,
                critique: critique.clone(),
            })
            .await
            .is_err()
        {
            tracing::info!(iteration = i, "receiver dropped, stopping run");
            return;
        }

        // 评语改写下一轮目标
        current_objective = format!("Improve based on evaluation: {}", critique);
    }

    tracing::info!(iterations = max_iterations, "run complete");
    let _ = tx
        .send(RunEvent::RunComplete {
            iterations: max_iterations,
            history,
        })
        .await;
}
