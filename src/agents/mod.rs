//! 智能体层：解析、提示词、ReAct 会话与会话工厂

pub mod actor;
pub mod evaluator;
pub mod parser;
pub mod prompts;
pub mod session;

pub use actor::ActorSession;
pub use evaluator::EvaluatorSession;
pub use parser::{parse_step_output, StepOutput, ToolCall};

use std::sync::Arc;

use crate::core::AgentError;
use crate::graph::GraphStore;
use crate::llm::LlmClient;
use crate::tools::{actor_registry, evaluator_registry, ToolRegistry};

/// 会话工厂：显式构造，持有 LLM 句柄与两份工具目录，按需产出短生命周期会话。
/// 没有任何进程级单例；目录在构造时校验完成。
pub struct SessionFactory {
    llm: Arc<dyn LlmClient>,
    actor_tools: Arc<ToolRegistry>,
    evaluator_tools: Arc<ToolRegistry>,
    actor_prompt: String,
    evaluator_prompt: String,
    max_steps: usize,
}

impl SessionFactory {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn GraphStore>,
        tool_timeout_secs: u64,
        max_steps: usize,
    ) -> Result<Self, AgentError> {
        Ok(Self {
            llm,
            actor_tools: Arc::new(actor_registry(store.clone(), tool_timeout_secs)?),
            evaluator_tools: Arc::new(evaluator_registry(store, tool_timeout_secs)?),
            actor_prompt: prompts::ACTOR_PROMPT.to_string(),
            evaluator_prompt: prompts::EVALUATOR_PROMPT.to_string(),
            max_steps,
        })
    }

    /// 覆盖默认提示词（配置层注入）
    pub fn with_prompts(mut self, actor: Option<String>, evaluator: Option<String>) -> Self {
        if let Some(p) = actor {
            self.actor_prompt = p;
        }
        if let Some(p) = evaluator {
            self.evaluator_prompt = p;
        }
        self
    }

    pub fn actor(&self) -> ActorSession {
        ActorSession::new(
            self.llm.clone(),
            self.actor_tools.clone(),
            self.actor_prompt.clone(),
            self.max_steps,
        )
    }

    pub fn evaluator(&self) -> EvaluatorSession {
        EvaluatorSession::new(
            self.llm.clone(),
            self.evaluator_tools.clone(),
            self.evaluator_prompt.clone(),
            self.max_steps,
        )
    }
}
