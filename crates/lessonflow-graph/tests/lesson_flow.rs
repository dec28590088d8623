//! Integration tests for the lesson flow: routing, iteration bound, failures and events.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use lessonflow_graph::{
    ContentGenerator, FeedbackScorer, FixedScorer, FlowError, FlowEvent, FlowStatus, Graph,
    GraphConfig, LessonState, NodeType, TemplateGenerator,
};

/// Template generator that counts its invocations
#[derive(Default)]
struct CountingGenerator {
    calls: AtomicUsize,
}

impl CountingGenerator {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContentGenerator for CountingGenerator {
    async fn generate(&self, query: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        TemplateGenerator.generate(query).await
    }
}

/// Counting generator that takes a while per call
#[derive(Default)]
struct SlowGenerator {
    calls: AtomicUsize,
}

#[async_trait]
impl ContentGenerator for SlowGenerator {
    async fn generate(&self, query: &str) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(20)).await;
        TemplateGenerator.generate(query).await
    }
}

struct FailingGenerator;

#[async_trait]
impl ContentGenerator for FailingGenerator {
    async fn generate(&self, _query: &str) -> Result<String> {
        anyhow::bail!("AI service unavailable")
    }
}

/// Returns scores in order, repeating the last one once exhausted
struct ScriptedScorer {
    scores: Vec<f64>,
    next: Mutex<usize>,
}

impl ScriptedScorer {
    fn new(scores: &[f64]) -> Self {
        Self {
            scores: scores.to_vec(),
            next: Mutex::new(0),
        }
    }
}

#[async_trait]
impl FeedbackScorer for ScriptedScorer {
    async fn score(&self, _content: &str) -> Result<f64> {
        let mut next = self.next.lock().unwrap();
        let score = self.scores[(*next).min(self.scores.len() - 1)];
        *next += 1;
        Ok(score)
    }
}

struct FailingScorer;

#[async_trait]
impl FeedbackScorer for FailingScorer {
    async fn score(&self, _content: &str) -> Result<f64> {
        anyhow::bail!("grader offline")
    }
}

struct SlowScorer;

#[async_trait]
impl FeedbackScorer for SlowScorer {
    async fn score(&self, _content: &str) -> Result<f64> {
        tokio::time::sleep(Duration::from_secs(10)).await;
        Ok(1.0)
    }
}

fn graph_with(
    generator: Arc<dyn ContentGenerator>,
    scorer: Arc<dyn FeedbackScorer>,
    config: GraphConfig,
) -> Graph {
    Graph::lesson_flow(generator, scorer, config).unwrap()
}

#[tokio::test]
async fn photosynthesis_single_iteration() {
    let graph = graph_with(
        Arc::new(TemplateGenerator),
        Arc::new(FixedScorer(0.8)),
        GraphConfig::default(),
    );

    let outcome = graph.run(LessonState::new("Explain photosynthesis")).await.unwrap();

    assert_eq!(outcome.state.user_query(), "Explain photosynthesis");
    assert_eq!(outcome.state.lesson_content(), "Lesson on: Explain photosynthesis");
    assert_eq!(outcome.state.quiz_score(), 0.8);
    assert_eq!(outcome.iterations, 1);
    assert_eq!(outcome.status, FlowStatus::Completed);
    assert!(outcome.is_completed());
    assert!(!outcome.run_id.is_empty());
}

#[tokio::test]
async fn high_first_score_runs_exactly_one_cycle() {
    let generator = Arc::new(CountingGenerator::default());
    let graph = graph_with(
        generator.clone(),
        Arc::new(ScriptedScorer::new(&[0.9, 0.1])),
        GraphConfig::default(),
    );

    let outcome = graph.run(LessonState::new("Fractions")).await.unwrap();

    assert_eq!(generator.calls(), 1);
    assert_eq!(outcome.iterations, 1);
    assert_eq!(outcome.state.quiz_score(), 0.9);
}

#[tokio::test]
async fn constant_low_score_stops_at_bound() {
    let generator = Arc::new(CountingGenerator::default());
    let graph = graph_with(
        generator.clone(),
        Arc::new(FixedScorer(0.1)),
        GraphConfig::new().with_max_iterations(5),
    );

    let outcome = graph.run(LessonState::new("Quantum tunnelling")).await.unwrap();

    assert_eq!(generator.calls(), 5);
    assert_eq!(outcome.iterations, 5);
    assert_eq!(outcome.status, FlowStatus::MaxIterationsExceeded);
    assert_eq!(outcome.state.quiz_score(), 0.1);
    assert_eq!(outcome.state.lesson_content(), "Lesson on: Quantum tunnelling");
}

#[tokio::test]
async fn loops_until_threshold_met() {
    let generator = Arc::new(CountingGenerator::default());
    let graph = graph_with(
        generator.clone(),
        Arc::new(ScriptedScorer::new(&[0.2, 0.5, 0.7])),
        GraphConfig::default(),
    );

    let outcome = graph.run(LessonState::new("Algebra")).await.unwrap();

    assert_eq!(generator.calls(), 3);
    assert_eq!(outcome.status, FlowStatus::Completed);
    assert_eq!(outcome.state.quiz_score(), 0.7);
}

#[tokio::test]
async fn just_below_threshold_loops_once_more() {
    let graph = graph_with(
        Arc::new(TemplateGenerator),
        Arc::new(ScriptedScorer::new(&[0.69999, 0.95])),
        GraphConfig::default(),
    );

    let outcome = graph.run(LessonState::new("Gravity")).await.unwrap();

    assert_eq!(outcome.iterations, 2);
    assert_eq!(outcome.state.quiz_score(), 0.95);
}

#[tokio::test]
async fn content_depends_only_on_query() {
    let graph = graph_with(
        Arc::new(TemplateGenerator),
        Arc::new(ScriptedScorer::new(&[0.3, 0.4, 0.99])),
        GraphConfig::default(),
    );

    let looped = graph.run(LessonState::new("Cells")).await.unwrap();
    let direct = graph_with(
        Arc::new(TemplateGenerator),
        Arc::new(FixedScorer(1.0)),
        GraphConfig::default(),
    )
    .run(LessonState::new("Cells"))
    .await
    .unwrap();

    assert_eq!(looped.state.lesson_content(), direct.state.lesson_content());
}

#[tokio::test]
async fn blank_query_rejected_before_generation() {
    let generator = Arc::new(CountingGenerator::default());
    let graph = graph_with(generator.clone(), Arc::new(FixedScorer(0.9)), GraphConfig::default());

    let err = graph.run(LessonState::new("  ")).await.unwrap_err();

    assert!(matches!(err, FlowError::EmptyQuery));
    assert_eq!(generator.calls(), 0);
}

#[tokio::test]
async fn generator_failure_surfaces_as_typed_error() {
    let graph = graph_with(Arc::new(FailingGenerator), Arc::new(FixedScorer(0.9)), GraphConfig::default());

    let err = graph.run(LessonState::new("Cells")).await.unwrap_err();

    assert!(matches!(err, FlowError::Generation(_)));
    assert!(err.is_collaborator_failure());
    assert!(err.to_string().contains("AI service unavailable"));
}

#[tokio::test]
async fn scorer_failure_surfaces_as_typed_error() {
    let graph = graph_with(Arc::new(TemplateGenerator), Arc::new(FailingScorer), GraphConfig::default());

    let err = graph.run(LessonState::new("Cells")).await.unwrap_err();

    assert!(matches!(err, FlowError::Scoring(_)));
}

#[tokio::test]
async fn out_of_range_score_rejected() {
    let graph = graph_with(Arc::new(TemplateGenerator), Arc::new(FixedScorer(1.2)), GraphConfig::default());

    let err = graph.run(LessonState::new("Cells")).await.unwrap_err();

    assert!(matches!(err, FlowError::ScoreOutOfRange(s) if s == 1.2));
}

#[tokio::test]
async fn execution_timeout_fires() {
    let timeout = Duration::from_millis(50);
    let graph = graph_with(
        Arc::new(TemplateGenerator),
        Arc::new(SlowScorer),
        GraphConfig::new().with_timeout(timeout),
    );

    let err = graph.run(LessonState::new("Cells")).await.unwrap_err();

    assert!(matches!(err, FlowError::Timeout(d) if d == timeout));
}

#[tokio::test]
async fn entry_at_content_generation_skips_input_check() {
    let graph = Graph::builder()
        .entry_point(NodeType::ContentGeneration)
        .generator(Arc::new(TemplateGenerator))
        .scorer(Arc::new(FixedScorer(0.75)))
        .lesson_router()
        .build()
        .unwrap();

    let outcome = graph.run(LessonState::new("")).await.unwrap();

    assert_eq!(outcome.state.lesson_content(), "Lesson on: ");
    assert_eq!(outcome.iterations, 1);
}

#[tokio::test]
async fn custom_threshold_from_config() {
    let graph = graph_with(
        Arc::new(TemplateGenerator),
        Arc::new(ScriptedScorer::new(&[0.4, 0.6])),
        GraphConfig::new().with_score_threshold(0.5),
    );

    let outcome = graph.run(LessonState::new("Cells")).await.unwrap();

    assert_eq!(outcome.iterations, 2);
    assert_eq!(outcome.state.quiz_score(), 0.6);
}

#[tokio::test]
async fn concurrent_runs_own_their_state() {
    let graph = graph_with(Arc::new(TemplateGenerator), Arc::new(FixedScorer(0.9)), GraphConfig::default());

    let (a, b) = tokio::join!(
        graph.run(LessonState::new("Volcanoes")),
        graph.run(LessonState::new("Glaciers")),
    );

    assert_eq!(a.unwrap().state.lesson_content(), "Lesson on: Volcanoes");
    assert_eq!(b.unwrap().state.lesson_content(), "Lesson on: Glaciers");
}

async fn collect(mut rx: tokio::sync::mpsc::Receiver<FlowEvent>) -> Vec<FlowEvent> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}

#[tokio::test]
async fn spawn_run_streams_retry_cycle() {
    let graph = graph_with(
        Arc::new(TemplateGenerator),
        Arc::new(ScriptedScorer::new(&[0.3, 0.8])),
        GraphConfig::default(),
    );

    let events = collect(graph.spawn_run(LessonState::new("Tides"))).await;
    let names: Vec<&str> = events.iter().map(|e| e.name()).collect();

    assert_eq!(
        names,
        vec![
            "init_stream",
            "node_completed",
            "node_completed",
            "lesson_content",
            "node_completed",
            "quiz_score",
            "retry",
            "node_completed",
            "lesson_content",
            "node_completed",
            "quiz_score",
            "end_stream",
        ]
    );

    match events.last().unwrap() {
        FlowEvent::EndStream { status, iterations, quiz_score, .. } => {
            assert_eq!(*status, FlowStatus::Completed);
            assert_eq!(*iterations, 2);
            assert_eq!(*quiz_score, 0.8);
        }
        other => panic!("Expected EndStream, got {other:?}"),
    }

    assert!(events.contains(&FlowEvent::Retry { iteration: 1, score: 0.3, threshold: 0.7 }));
    assert!(events.contains(&FlowEvent::LessonContent {
        iteration: 2,
        content: "Lesson on: Tides".to_string(),
    }));
}

#[tokio::test]
async fn spawn_run_reports_node_failure() {
    let graph = graph_with(Arc::new(FailingGenerator), Arc::new(FixedScorer(0.9)), GraphConfig::default());

    let events = collect(graph.spawn_run(LessonState::new("Tides"))).await;

    match events.last().unwrap() {
        FlowEvent::Error { message, node } => {
            assert!(message.contains("AI service unavailable"));
            assert_eq!(*node, Some(NodeType::ContentGeneration));
        }
        other => panic!("Expected Error, got {other:?}"),
    }
    assert!(events.last().unwrap().is_terminal());
}

#[tokio::test]
async fn spawn_run_reports_bound_in_end_stream() {
    let graph = graph_with(
        Arc::new(TemplateGenerator),
        Arc::new(FixedScorer(0.0)),
        GraphConfig::new().with_max_iterations(2),
    );

    let events = collect(graph.spawn_run(LessonState::new("Tides"))).await;
    let retries = events.iter().filter(|e| matches!(e, FlowEvent::Retry { .. })).count();

    assert_eq!(retries, 1);
    assert!(matches!(
        events.last().unwrap(),
        FlowEvent::EndStream { status: FlowStatus::MaxIterationsExceeded, iterations: 2, .. }
    ));
}

#[tokio::test]
async fn dropping_receiver_stops_spawned_run() {
    let generator = Arc::new(SlowGenerator::default());
    let graph = graph_with(
        generator.clone(),
        Arc::new(FixedScorer(0.1)),
        GraphConfig::new().with_max_iterations(50),
    );

    let mut events = graph.spawn_run(LessonState::new("Fractions"));
    let first = events.recv().await.unwrap();
    assert!(matches!(first, FlowEvent::InitStream { .. }));
    drop(events);

    tokio::time::sleep(Duration::from_millis(300)).await;
    let calls_after_drop = generator.calls.load(Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(300)).await;

    // At most the in-flight generation finishes; the loop never resumes
    assert!(calls_after_drop <= 2, "generator kept running: {calls_after_drop} calls");
    assert_eq!(generator.calls.load(Ordering::SeqCst), calls_after_drop);
}
