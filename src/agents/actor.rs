//! Actor 会话：朝目标执行图谱操作
//!
//! 每次调用都是一个全新的推理回合：只带当前目标与不变的初始目标（作为
//! previous objectives 上下文），不跨迭代携带任何状态。

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::agents::prompts::render_actor_prompt;
use crate::agents::session::run_react;
use crate::core::AgentError;
use crate::llm::LlmClient;
use crate::tools::ToolRegistry;

/// Actor 会话（短生命周期，产出答案后即销毁）
pub struct ActorSession {
    llm: Arc<dyn LlmClient>,
    registry: Arc<ToolRegistry>,
    prompt_template: String,
    max_steps: usize,
}

impl ActorSession {
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

    /// 执行目标；initial_objective 是本次运行最初的目标，每次调用原样传入
    pub async fn run(
        &self,
        objective: &str,
        initial_objective: &str,
        cancel: &CancellationToken,
    ) -> Result<String, AgentError> {
        let system = render_actor_prompt(
            &self.prompt_template,
            objective,
            initial_objective,
            &self.registry,
        );
        run_react(
            &self.llm,
            &self.registry,
            &system,
            objective,
            self.max_steps,
            cancel,
        )
        .await
    }
}
