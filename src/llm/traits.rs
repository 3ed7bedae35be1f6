//! LLM 客户端抽象
//!
//! Completion Service 的最小契约：给定消息序列返回一段文本。文本中若包含
//! `{"tool": "...", "args": {...}}` JSON，则由会话层解析为工具调用请求。

use async_trait::async_trait;

use crate::llm::Message;

/// LLM 客户端 trait：非流式完成；错误以 String 承载，由会话层映射为 AgentError
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, messages: &[Message]) -> Result<String, String>;

    /// 获取累计 token 使用统计：(prompt_tokens, completion_tokens, total_tokens)
    /// 默认返回 (0, 0, 0)，具体实现可覆盖
    fn token_usage(&self) -> (u64, u64, u64) {
        (0, 0, 0)
    }
}
