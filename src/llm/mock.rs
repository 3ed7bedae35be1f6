//! Mock LLM 客户端（用于测试，无需 API）
//!
//! 按脚本顺序逐条返回预设回复，并记录收到的全部消息序列，便于测试断言
//! 提示词内容与 Completion 调用次数；脚本耗尽后返回固定的收尾文本。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{LlmClient, Message};

/// Mock 客户端：脚本化回复 + 调用录制
#[derive(Debug, Default)]
pub struct MockLlmClient {
    script: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// 以预设脚本创建：第 n 次 complete 调用返回脚本第 n 条
    pub fn with_script(script: Vec<impl Into<String>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().map(Into::into).collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 追加脚本条目
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.script.lock().unwrap().push_back(reply.into());
    }

    /// 已发生的 complete 调用次数
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// 录制的全部请求（每次调用的完整消息序列）
    pub fn recorded_requests(&self) -> Vec<Vec<Message>> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, messages: &[Message]) -> Result<String, String> {
        self.requests.lock().unwrap().push(messages.to_vec());
        Ok(self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "Done.".to_string()))
    }
}
