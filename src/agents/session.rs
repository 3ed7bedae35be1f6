//! ReAct 会话循环
//!
//! Actor 与 Evaluator 共用的推理主循环：问 LLM 下一步 -> 解析 -> 最终答案则
//! 返回；工具调用则派发并把 (tool, args, result) 写回对话，继续下一步。
//! 工具失败从不中止会话（结果只是描述失败的文本）；LLM 调用失败不掩盖，
//! 直接向上传递。步数受 max_steps 约束，超限是独立的终止结果。

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::agents::parser::{parse_step_output, StepOutput};
use crate::core::AgentError;
use crate::llm::{LlmClient, Message};
use crate::tools::ToolRegistry;

/// 执行一次有界 ReAct 会话，返回 LLM 的最终答案文本
pub async fn run_react(
    llm: &Arc<dyn LlmClient>,
    registry: &ToolRegistry,
    system_prompt: &str,
    seed: &str,
    max_steps: usize,
    cancel: &CancellationToken,
) -> Result<String, AgentError> {
    let mut transcript = vec![Message::user(seed)];

    for step in 0..max_steps {
        if cancel.is_cancelled() {
            return Err(AgentError::Cancelled);
        }

        let mut messages = vec![Message::system(system_prompt)];
        messages.extend(transcript.iter().cloned());

        let output = llm
            .complete(&messages)
            .await
            .map_err(AgentError::LlmError)?;

        match parse_step_output(&output) {
            Ok(StepOutput::Final(answer)) => {
                tracing::debug!(step, "session finished");
                return Ok(answer);
            }
            Ok(StepOutput::ToolCall(tc)) => {
                tracing::debug!(step, tool = %tc.tool, "tool call");
                let observation = registry.invoke(&tc.tool, tc.args.clone()).await;
                transcript.push(Message::assistant(format!(
                    "Tool call: {} | Result: {}",
                    tc.tool, observation
                )));
                transcript.push(Message::user(format!(
                    "Observation from {}: {}",
                    tc.tool, observation
                )));
            }
            Err(e) => {
                // 解析失败：注入纠偏提示让 LLM 重试，消耗一步
                tracing::debug!(step, error = %e, "unparseable step output");
                transcript.push(Message::assistant(output));
                transcript.push(Message::user(format!(
                    "Your last reply could not be parsed ({}). Reply with exactly \
                     one JSON tool call, or with your final answer as plain text.",
                    e
                )));
            }
        }
    }

    Err(AgentError::StepLimitExceeded(max_steps))
}
