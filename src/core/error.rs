//! Agent 错误类型
//!
//! 仅覆盖会话层以上的失败：工具层失败永远不会成为 AgentError（按约定渲染为
//! 描述性文本喂回推理循环），这里只描述必须中止当前运行的情况。

use thiserror::Error;

/// 会话 / 编排层错误（LLM 调用失败、解析失败、步数超限、取消、配置问题）
#[derive(Error, Debug)]
pub enum AgentError {
    /// Completion Service 不可用或返回失败；不掩盖，向上传递并中止本次运行
    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    /// 单次会话内 ReAct 步数达到上限（可配置），作为独立的终止结果上报
    #[error("Step limit exceeded after {0} steps")]
    StepLimitExceeded(usize),

    #[error("Cancelled")]
    Cancelled,

    #[error("Config error: {0}")]
    ConfigError(String),
}
