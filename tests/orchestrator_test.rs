//! 编排器端到端测试：脚本化 Mock LLM + 内存图谱存储

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use graphmind::agents::SessionFactory;
use graphmind::core::{AgentError, Orchestrator, RunEvent};
use graphmind::graph::{GraphStore, MemoryGraphStore};
use graphmind::llm::{LlmClient, Message, MockLlmClient, Role};

fn build_orchestrator(
    llm: Arc<MockLlmClient>,
    store: Arc<MemoryGraphStore>,
    max_steps: usize,
) -> Orchestrator {
    let factory = SessionFactory::new(
        llm as Arc<dyn LlmClient>,
        store as Arc<dyn GraphStore>,
        5,
        max_steps,
    )
    .unwrap();
    Orchestrator::new(factory)
}

fn actor_phases(events: &[RunEvent]) -> Vec<&RunEvent> {
    events
        .iter()
        .filter(|e| matches!(e, RunEvent::ActorPhase { .. }))
        .collect()
}

fn evaluator_phases(events: &[RunEvent]) -> Vec<&RunEvent> {
    events
        .iter()
        .filter(|e| matches!(e, RunEvent::EvaluatorPhase { .. }))
        .collect()
}

#[tokio::test]
async fn test_n_acting_phases_and_n_minus_one_evaluating_phases() {
    // 3 轮：actor / evaluator 交替，最后一轮不评估
    let llm = Arc::new(MockLlmClient::with_script(vec![
        "done 1",
        "critique 1",
        "done 2",
        "critique 2",
        "done 3",
    ]));
    let store = Arc::new(MemoryGraphStore::new());
    let orchestrator = build_orchestrator(llm.clone(), store, 20);

    let events = orchestrator
        .run_collect("curate the graph", 3, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(actor_phases(&events).len(), 3);
    assert_eq!(evaluator_phases(&events).len(), 2);
    assert_eq!(llm.call_count(), 5);

    // 目标改写：第二轮 Acting 的目标由第一轮评语生成
    match &events[2] {
        RunEvent::ActorPhase { iteration, objective, .. } => {
            assert_eq!(*iteration, 1);
            assert_eq!(objective, "Improve based on evaluation: critique 1");
        }
        other => panic!("expected second actor phase, got {:?}", other),
    }

    // 正常收尾：历史完整、事件流以 RunComplete 结束
    match events.last().unwrap() {
        RunEvent::RunComplete { iterations, history } => {
            assert_eq!(*iterations, 3);
            assert_eq!(history.len(), 3);
            assert_eq!(history[0].objective, "curate the graph");
        }
        other => panic!("expected run complete, got {:?}", other),
    }
}

#[tokio::test]
async fn test_initial_objective_resupplied_to_every_actor_invocation() {
    let llm = Arc::new(MockLlmClient::with_script(vec![
        "done 1", "critique 1", "done 2", "critique 2", "done 3",
    ]));
    let store = Arc::new(MemoryGraphStore::new());
    let orchestrator = build_orchestrator(llm.clone(), store, 20);

    orchestrator
        .run_collect("build a graph about Rust", 3, CancellationToken::new())
        .await
        .unwrap();

    // 请求顺序：actor0, eval0, actor1, eval1, actor2
    let requests = llm.recorded_requests();
    for idx in [0usize, 2, 4] {
        let system = &requests[idx][0];
        assert_eq!(system.role, Role::System);
        assert!(
            system.content.contains("build a graph about Rust"),
            "actor request {} lost the initial objective",
            idx
        );
    }
    // evaluator 的目标文本是固定的评估句式
    assert!(requests[1][0].content.contains("Evaluate the actor's operation for objective"));
}

#[tokio::test]
async fn test_tool_failure_is_prose_and_run_continues() {
    let llm = Arc::new(MockLlmClient::with_script(vec![
        r#"{"tool": "get_node", "args": {"node_id": 99}}"#,
        "nothing to do",
    ]));
    let store = Arc::new(MemoryGraphStore::new());
    let orchestrator = build_orchestrator(llm.clone(), store, 20);

    let events = orchestrator
        .run_collect("inspect node 99", 1, CancellationToken::new())
        .await
        .unwrap();

    // 失败后仍继续征询下一步，最终正常完成
    assert_eq!(llm.call_count(), 2);
    match &events[0] {
        RunEvent::ActorPhase { output, .. } => assert_eq!(output, "nothing to do"),
        other => panic!("expected actor phase, got {:?}", other),
    }
    assert!(matches!(events.last().unwrap(), RunEvent::RunComplete { .. }));

    // 失败以文本形式出现在第二次请求的上下文里，并点名缺失的 id
    let second_request = &llm.recorded_requests()[1];
    let observation = &second_request.last().unwrap().content;
    assert!(observation.contains("no node with id 99 exists"));
}

#[tokio::test]
async fn test_create_two_nodes_and_connect_scenario() {
    let llm = Arc::new(MockLlmClient::with_script(vec![
        r#"{"tool": "create_node", "args": {"labels": ["Node"], "properties": {"name": "A"}}}"#,
        r#"{"tool": "create_node", "args": {"labels": ["Node"], "properties": {"name": "B"}}}"#,
        r#"{"tool": "connect_nodes", "args": {"start_node_id": 1, "end_node_id": 2}}"#,
        "Created node 1 and node 2 and connected them with relationship 1.",
    ]));
    let store = Arc::new(MemoryGraphStore::new());
    let orchestrator = build_orchestrator(llm.clone(), store.clone(), 20);

    let events = orchestrator
        .run_collect(
            "create two nodes named A and B and connect them",
            1,
            CancellationToken::new(),
        )
        .await
        .unwrap();

    // 恰好 1 个 Acting、0 个 Evaluating
    assert_eq!(actor_phases(&events).len(), 1);
    assert_eq!(evaluator_phases(&events).len(), 0);

    // 存储观察到 2 次建点 + 1 次连接，且关系引用返回的两个 id
    assert_eq!(store.counts(), (2, 1));
    let rel = store.get_relationship(1).await.unwrap();
    assert_eq!((rel.start_id, rel.end_id), (1, 2));
    assert_eq!(rel.rel_type, "CONNECTS_TO");
}

#[tokio::test]
async fn test_find_path_on_missing_node_names_the_id() {
    let llm = Arc::new(MockLlmClient::with_script(vec![
        r#"{"tool": "find_path", "args": {"start_node_id": 424, "end_node_id": 1}}"#,
        "no path exists",
    ]));
    let store = Arc::new(MemoryGraphStore::new());
    let orchestrator = build_orchestrator(llm.clone(), store, 20);

    let events = orchestrator
        .run_collect("check reachability", 1, CancellationToken::new())
        .await
        .unwrap();

    assert!(matches!(events.last().unwrap(), RunEvent::RunComplete { .. }));
    let requests = llm.recorded_requests();
    let observation = &requests[1].last().unwrap().content;
    assert!(observation.contains("no node with id 424 exists"));
    assert!(observation.contains("no path was found"));
}

#[tokio::test]
async fn test_step_limit_exceeded_is_a_run_failure() {
    // max_steps = 2，脚本里全是工具调用，永远到不了最终答案
    let llm = Arc::new(MockLlmClient::new());
    for _ in 0..3 {
        llm.push_reply(r#"{"tool": "get_isolated_nodes", "args": {}}"#);
    }
    let store = Arc::new(MemoryGraphStore::new());
    let orchestrator = build_orchestrator(llm.clone(), store, 2);

    let events = orchestrator
        .run_collect("loop forever", 3, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(llm.call_count(), 2);
    match events.last().unwrap() {
        RunEvent::RunFailed { text } => assert!(text.contains("Step limit")),
        other => panic!("expected run failure, got {:?}", other),
    }
    // 失败是显式的终止记录，前面没有发出过任何 Acting 事件
    assert_eq!(actor_phases(&events).len(), 0);
}

#[tokio::test]
async fn test_invalid_config_rejected_before_start() {
    let llm = Arc::new(MockLlmClient::new());
    let store = Arc::new(MemoryGraphStore::new());
    let orchestrator = build_orchestrator(llm.clone(), store, 20);

    assert!(matches!(
        orchestrator.run("   ", 3, CancellationToken::new()),
        Err(AgentError::ConfigError(_))
    ));
    assert!(matches!(
        orchestrator.run("valid objective", 0, CancellationToken::new()),
        Err(AgentError::ConfigError(_))
    ));
    // 拒绝发生在启动前：没有任何 LLM 调用
    assert_eq!(llm.call_count(), 0);
}

/// 在 complete 入口处等待放行的 LLM：进入时先发信号，再等许可。
/// 测试据此确定性地控制「第 k 次 completion 正在途中」这一时刻。
struct GatedLlm {
    inner: MockLlmClient,
    gate: tokio::sync::Semaphore,
    entered: tokio::sync::mpsc::UnboundedSender<()>,
}

impl GatedLlm {
    fn new(
        script: Vec<&str>,
    ) -> (Arc<Self>, tokio::sync::mpsc::UnboundedReceiver<()>) {
        let (entered, entered_rx) = tokio::sync::mpsc::unbounded_channel();
        let gated = Arc::new(Self {
            inner: MockLlmClient::with_script(script),
            gate: tokio::sync::Semaphore::new(0),
            entered,
        });
        (gated, entered_rx)
    }
}

#[async_trait::async_trait]
impl LlmClient for GatedLlm {
    async fn complete(&self, messages: &[Message]) -> Result<String, String> {
        let _ = self.entered.send(());
        let permit = self.gate.acquire().await.map_err(|e| e.to_string())?;
        permit.forget();
        self.inner.complete(messages).await
    }
}

fn build_gated_orchestrator(gated: Arc<GatedLlm>) -> Orchestrator {
    let store = Arc::new(MemoryGraphStore::new());
    let factory = SessionFactory::new(
        gated as Arc<dyn LlmClient>,
        store as Arc<dyn GraphStore>,
        5,
        20,
    )
    .unwrap();
    Orchestrator::new(factory)
}

#[tokio::test]
async fn test_cancellation_prevents_further_completion_calls() {
    let (gated, mut entered_rx) = GatedLlm::new(vec!["done 1", "critique 1", "done 2"]);
    let orchestrator = build_gated_orchestrator(gated.clone());

    let cancel = CancellationToken::new();
    let mut rx = orchestrator.run("curate", 2, cancel.clone()).unwrap();

    // 等第一次 completion 进入在途状态，再取消并放行
    entered_rx.recv().await.unwrap();
    cancel.cancel();
    gated.gate.add_permits(8);

    let mut events = Vec::new();
    while let Some(ev) = rx.recv().await {
        events.push(ev);
    }

    // 在途调用允许完成，但观察到取消后不再发起新的 completion
    assert_eq!(gated.inner.call_count(), 1);
    assert!(matches!(events.last().unwrap(), RunEvent::RunFailed { .. }));
}

#[tokio::test]
async fn test_dropped_receiver_stops_the_run() {
    let (gated, mut entered_rx) =
        GatedLlm::new(vec!["done 1", "critique 1", "done 2", "critique 2", "done 3"]);
    let orchestrator = build_gated_orchestrator(gated.clone());

    let mut rx = orchestrator
        .run("curate", 3, CancellationToken::new())
        .unwrap();

    // 放行第一次 completion，收到首条记录后读端直接消失
    entered_rx.recv().await.unwrap();
    gated.gate.add_permits(1);
    let first = rx.recv().await.unwrap();
    assert!(matches!(first, RunEvent::ActorPhase { .. }));
    drop(rx);

    // 第二次 completion（Evaluator）已在途：放行它，其结果的发送会失败，循环停止
    entered_rx.recv().await.unwrap();
    gated.gate.add_permits(8);

    // 不会再有第三次 completion（等一小段时间确认 entered 信号不再出现）
    let third = tokio::time::timeout(
        std::time::Duration::from_millis(100),
        entered_rx.recv(),
    )
    .await;
    assert!(third.is_err(), "run kept calling the LLM after reader left");
    assert_eq!(gated.inner.call_count(), 2);
}
