//! 工具注册表
//!
//! 所有工具实现 Tool trait（name / description / execute），
//! 由 ToolRegistry 按名注册与查找。invoke 是会话层唯一入口：任何失败（未知
//! 工具、参数缺失、执行超时、下游故障）都渲染为描述性文本返回——推理循环
//! 只有文本一条通道，绝不向会话层抛出错误。每次调用输出结构化审计日志。

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tokio::time::timeout;

/// 工具 trait：名称、描述（供 LLM 理解，含参数示例）、异步执行（args 为 JSON）
///
/// Ok 为渲染好的 ToolResult 文本；Err 用于参数级失败（如缺少必填参数），
/// 由 invoke 统一转为 "tool <name> failed: ..." 文本。
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    async fn execute(&self, args: Value) -> Result<String, String>;
}

/// 工具注册表：按名称存储 Arc<dyn Tool>，BTreeMap 保证目录顺序稳定
pub struct ToolRegistry {
    tools: BTreeMap<String, Arc<dyn Tool>>,
    timeout: Duration,
}

impl ToolRegistry {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            tools: BTreeMap::new(),
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// 返回 (name, description) 列表，用于生成 prompt 中的 Available tools 段落
    pub fn tool_descriptions(&self) -> Vec<(String, String)> {
        self.tools
            .iter()
            .map(|(name, tool)| (name.clone(), tool.description().to_string()))
            .collect()
    }

    /// 执行指定工具，总是返回文本；超时、失败、未知名称都渲染为描述性结果
    pub async fn invoke(&self, tool_name: &str, args: Value) -> String {
        let start = Instant::now();
        let args_preview = args_preview(&args);

        let (outcome, text) = match self.tools.get(tool_name) {
            None => (
                "unknown",
                format!(
                    "unknown tool '{}'; available tools: {}",
                    tool_name,
                    self.tool_names().join(", ")
                ),
            ),
            Some(tool) => match timeout(self.timeout, tool.execute(args)).await {
                Ok(Ok(result)) => ("ok", result),
                Ok(Err(e)) => ("error", format!("tool {} failed: {}", tool_name, e)),
                Err(_) => (
                    "timeout",
                    format!(
                        "tool {} timed out after {}s; the graph may or may not have been changed",
                        tool_name,
                        self.timeout.as_secs()
                    ),
                ),
            },
        };

        let audit = serde_json::json!({
            "event": "tool_audit",
            "tool": tool_name,
            "ok": outcome == "ok",
            "outcome": outcome,
            "duration_ms": start.elapsed().as_millis() as u64,
            "args_preview": args_preview,
        });
        tracing::info!(audit = %audit.to_string(), "tool");

        text
    }
}

fn args_preview(args: &Value) -> String {
    let s = args.to_string();
    if s.len() > 200 {
        format!("{}...", s.chars().take(200).collect::<String>())
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingTool;

    #[async_trait]
    impl Tool for FailingTool {
        fn name(&self) -> &str {
            "failing"
        }

        fn description(&self) -> &str {
            "always fails"
        }

        async fn execute(&self, _args: Value) -> Result<String, String> {
            Err("invalid arguments: missing required argument 'id'".to_string())
        }
    }

    #[tokio::test]
    async fn test_unknown_tool_renders_as_text() {
        let registry = ToolRegistry::new(5);
        let result = registry.invoke("nope", serde_json::json!({})).await;
        assert!(result.starts_with("unknown tool 'nope'"));
    }

    #[tokio::test]
    async fn test_tool_error_renders_as_text() {
        let mut registry = ToolRegistry::new(5);
        registry.register(FailingTool);
        let result = registry.invoke("failing", serde_json::json!({})).await;
        assert!(result.contains("tool failing failed"));
        assert!(result.contains("invalid arguments"));
    }
}
