//! Graphmind - 双智能体知识图谱管理系统
//!
//! 入口：初始化日志与配置，从标准输入读取初始目标，流式打印每轮迭代的
//! Actor 产出与 Evaluator 评语。Ctrl-C 触发取消：当前在途调用完成后停止，
//! 不再发起新的 LLM 调用。

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;
use tokio_util::sync::CancellationToken;

use graphmind::agents::SessionFactory;
use graphmind::config::load_config;
use graphmind::core::{Orchestrator, RunEvent};
use graphmind::graph::{GraphStore, MemoryGraphStore};
use graphmind::llm::{LlmClient, MockLlmClient, OpenAiClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    graphmind::observability::init();

    let config = load_config(None).context("Failed to load config")?;

    // 迭代次数：第一个命令行参数覆盖配置缺省值
    let max_iterations = std::env::args()
        .nth(1)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(config.agents.max_iterations);

    let llm: Arc<dyn LlmClient> = match config.llm.provider.as_str() {
        "mock" => Arc::new(MockLlmClient::new()),
        _ => Arc::new(OpenAiClient::new(
            config.llm.base_url.as_deref(),
            &config.llm.model,
            config.llm.api_key.as_deref(),
        )),
    };

    let store: Arc<dyn GraphStore> = Arc::new(MemoryGraphStore::new());
    let factory = SessionFactory::new(
        llm,
        store,
        config.agents.tool_timeout_secs,
        config.agents.max_steps,
    )
    .context("Failed to build sessions")?
    .with_prompts(
        config.agents.actor_prompt.clone(),
        config.agents.evaluator_prompt.clone(),
    );
    let orchestrator = Orchestrator::new(factory);

    print!("Initial objective: ");
    io::stdout().flush()?;
    let objective = io::stdin()
        .lock()
        .lines()
        .next()
        .transpose()?
        .unwrap_or_default();

    let cancel = CancellationToken::new();
    let ctrlc_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("ctrl-c received, cancelling run");
            ctrlc_cancel.cancel();
        }
    });

    let mut rx = orchestrator
        .run(objective, max_iterations, cancel)
        .context("Run rejected")?;

    while let Some(event) = rx.recv().await {
        match event {
            RunEvent::ActorPhase {
                iteration,
                objective,
                output,
            } => {
                println!("\n=== Iteration {} ===", iteration + 1);
                println!("Objective: {}", objective);
                println!("[Actor] {}", output);
            }
            RunEvent::EvaluatorPhase { iteration, critique } => {
                println!("[Evaluator {}] {}", iteration + 1, critique);
            }
            RunEvent::RunFailed { text } => {
                println!("\nRun failed: {}", text);
            }
            RunEvent::RunComplete { iterations, .. } => {
                println!("\nRun complete after {} iteration(s).", iterations);
            }
        }
    }

    Ok(())
}
