//! Evaluator 会话：用只读工具评估 Actor 的操作结果
//!
//! 与 Actor 同一个循环形状，但目录被限制为只读子集——能评图、不能改图，
//! 这是刻意的最小权限边界。

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::agents::prompts::render_evaluator_prompt;
use crate::agents::session::run_react;
use crate::core::AgentError;
use crate::llm::LlmClient;
use crate::tools::ToolRegistry;

/// Evaluator 会话（短生命周期、无状态）
pub struct EvaluatorSession {
    llm: Arc<dyn LlmClient>,
    registry: Arc<ToolRegistry>,
    prompt_template: String,
    max_steps: usize,
}

impl EvaluatorSession {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        registry: Arc<ToolRegistry>,
        prompt_template: String,
        max_steps: usize,
    ) -> Self {
        Self {
            llm,
            registry,
            prompt_template,
            max_steps,
        }
    }

    /// 评估目标文本（含被评估的目标与 Actor 的执行结果），返回自由文本评语
    pub async fn run(
        &self,
        evaluation_target: &str,
        cancel: &CancellationToken,
    ) -> Result<String, AgentError> {
        let system = render_evaluator_prompt(
            &self.prompt_template,
            evaluation_target,
            &self.registry,
        );
        run_react(
            &self.llm,
            &self.registry,
            &system,
            evaluation_target,
            self.max_steps,
            cancel,
        )
        .await
    }
}
