//! Completion 输出解析
//!
//! LLM 只有文本一条通道：回复里含 `{"tool": "...", "args": {...}}` JSON 则视为
//! 工具调用请求，否则整段文本就是最终答案。支持 ```json 围栏与裸 JSON。

use serde::{Deserialize, Serialize};

use crate::core::AgentError;

/// LLM 请求的工具调用（简化 JSON：{"tool": "get_node", "args": {"node_id": 1}}）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// 单步推理输出
#[derive(Debug, Clone)]
pub enum StepOutput {
    /// 最终答案，会话结束
    Final(String),
    /// 需要执行工具
    ToolCall(ToolCall),
}

/// 解析 LLM 输出：若含有效 JSON 且 tool 非空则为 ToolCall，否则为 Final
pub fn parse_step_output(output: &str) -> Result<StepOutput, AgentError> {
    let trimmed = output.trim();

    let json_str = if let Some(start) = trimmed.find("```json") {
        let rest = &trimmed[start + 7..];
        rest.find("```")
            .map(|end| rest[..end].trim())
            .unwrap_or(rest.trim())
    } else if let Some(start) = trimmed.find('{') {
        // 只在 '{' 之后找配对的 '}'，前面的孤立 '}' 不算
        match trimmed[start..].rfind('}') {
            Some(end) => &trimmed[start..=start + end],
            None => trimmed,
        }
    } else {
        return Ok(StepOutput::Final(trimmed.to_string()));
    };

    let parsed: ToolCall = serde_json::from_str(json_str)
        .map_err(|e| AgentError::JsonParseError(format!("{}: {}", e, json_str)))?;

    if parsed.tool.is_empty() {
        Ok(StepOutput::Final(trimmed.to_string()))
    } else {
        Ok(StepOutput::ToolCall(parsed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_final() {
        match parse_step_output("All nodes are connected now.").unwrap() {
            StepOutput::Final(text) => assert_eq!(text, "All nodes are connected now."),
            other => panic!("expected final, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_json_is_tool_call() {
        let out = r#"{"tool": "get_node", "args": {"node_id": 3}}"#;
        match parse_step_output(out).unwrap() {
            StepOutput::ToolCall(tc) => {
                assert_eq!(tc.tool, "get_node");
                assert_eq!(tc.args["node_id"], 3);
            }
            other => panic!("expected tool call, got {:?}", other),
        }
    }

    #[test]
    fn test_fenced_json_is_tool_call() {
        let out = "I will look it up.\n```json\n{\"tool\": \"search_nodes\", \"args\": {\"name\": \"Ada\"}}\n```";
        match parse_step_output(out).unwrap() {
            StepOutput::ToolCall(tc) => assert_eq!(tc.tool, "search_nodes"),
            other => panic!("expected tool call, got {:?}", other),
        }
    }

    #[test]
    fn test_close_brace_before_open_is_parse_error_not_panic() {
        let out = "I removed the stray } and added a new block {";
        assert!(matches!(
            parse_step_output(out),
            Err(AgentError::JsonParseError(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let out = r#"{"tool": "get_node", "args": {node_id: }}"#;
        assert!(matches!(
            parse_step_output(out),
            Err(AgentError::JsonParseError(_))
        ));
    }
}
