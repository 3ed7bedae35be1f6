//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `GRAPHMIND__*` 覆盖（双下划线表示
//! 嵌套，如 `GRAPHMIND__LLM__PROVIDER=mock`）。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub llm: LlmSection,
    pub agents: AgentsSection,
}

/// [app] 段
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppSection {
    pub name: Option<String>,
}

/// [llm] 段：后端选择
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    /// 后端：openai（任意兼容端点）/ mock（本地脚本，联调用）
    pub provider: String,
    pub model: String,
    pub base_url: Option<String>,
    /// 不设置时回退到 OPENAI_API_KEY 环境变量
    pub api_key: Option<String>,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            base_url: None,
            api_key: None,
        }
    }
}

/// [agents] 段：迭代与会话边界
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentsSection {
    /// 编排器迭代次数缺省值（无人值守运行用大上限，交互式调用可逐次传入）
    pub max_iterations: usize,
    /// 单次会话内最大 ReAct 步数，防止无界推理循环
    pub max_steps: usize,
    /// 单次工具调用超时（秒）
    pub tool_timeout_secs: u64,
    /// 覆盖内置 Actor 提示词模板
    pub actor_prompt: Option<String>,
    /// 覆盖内置 Evaluator 提示词模板
    pub evaluator_prompt: Option<String>,
}

impl Default for AgentsSection {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            max_steps: 20,
            tool_timeout_secs: 30,
            actor_prompt: None,
            evaluator_prompt: None,
        }
    }
}

/// 从 config 目录加载配置，环境变量 GRAPHMIND__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 GRAPHMIND__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("GRAPHMIND")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}
