use crate::builder::GraphBuilder;
use crate::error::{FlowError, Result};
use crate::generator::ContentGenerator;
use crate::node::{EventSender, Node, NodeType};
use crate::nodes::{ContentGenerationNode, FeedbackAnalyzerNode, UserInputNode};
use crate::router::{NextNode, Router};
use crate::scorer::FeedbackScorer;
use crate::types::{FlowEvent, FlowOutcome, FlowStatus, GraphConfig, LessonState};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Lesson flow executor
///
/// Immutable once built; cheap to clone and safe to share across requests.
/// Every run owns its own `LessonState`.
#[derive(Clone)]
pub struct Graph {
    entry_point: NodeType,
    user_input: UserInputNode,
    content_generation: ContentGenerationNode,
    feedback_analyzer: FeedbackAnalyzerNode,
    router: Arc<dyn Router>,
    config: GraphConfig,
}

impl Graph {
    pub(crate) fn new(
        entry_point: NodeType,
        generator: Arc<dyn ContentGenerator>,
        scorer: Arc<dyn FeedbackScorer>,
        router: Arc<dyn Router>,
        config: GraphConfig,
    ) -> Self {
        Self {
            entry_point,
            user_input: UserInputNode,
            content_generation: ContentGenerationNode::new(generator),
            feedback_analyzer: FeedbackAnalyzerNode::new(scorer),
            router,
            config,
        }
    }

    /// Create a builder for fluent construction
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Standard topology: entry at `user_input`, routed by `LessonRouter`
    pub fn lesson_flow(
        generator: Arc<dyn ContentGenerator>,
        scorer: Arc<dyn FeedbackScorer>,
        config: GraphConfig,
    ) -> Result<Self> {
        GraphBuilder::new()
            .entry_point(NodeType::UserInput)
            .generator(generator)
            .scorer(scorer)
            .lesson_router()
            .config(config)
            .build()
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn entry_point(&self) -> NodeType {
        self.entry_point
    }

    /// Run to the terminal marker and return the final state
    pub async fn run(&self, state: LessonState) -> Result<FlowOutcome> {
        self.execute(state, None).await
    }

    /// Spawn execution in background, return event receiver
    ///
    /// The stream always ends with either `EndStream` or `Error`. Dropping the
    /// receiver cancels the run at the next node boundary.
    pub fn spawn_run(&self, state: LessonState) -> mpsc::Receiver<FlowEvent> {
        let (tx, rx) = mpsc::channel(100);
        let graph = self.clone();

        tokio::spawn(async move {
            if let Err(e) = graph.execute(state, Some(&tx)).await {
                match e {
                    FlowError::Cancelled => tracing::info!("Lesson flow cancelled by client"),
                    other => tracing::error!("Lesson flow failed: {}", other),
                }
            }
        });

        rx
    }

    async fn execute(&self, state: LessonState, events: Option<&EventSender>) -> Result<FlowOutcome> {
        let start_time = Instant::now();
        let run_id = uuid::Uuid::new_v4().to_string();

        tracing::info!(
            run_id = %run_id,
            user_query = %state.user_query(),
            entry_point = %self.entry_point,
            "Starting lesson flow"
        );

        emit(
            events,
            FlowEvent::InitStream {
                run_id: run_id.clone(),
                user_query: state.user_query().to_string(),
                timestamp: chrono::Utc::now().timestamp_millis(),
            },
        )
        .await?;

        let timeout = self.config.execution_timeout;
        let (state, status, iterations) =
            match tokio::time::timeout(timeout, self.execute_loop(state, events)).await {
                Ok(result) => result?,
                Err(_) => {
                    tracing::error!(run_id = %run_id, "Lesson flow timed out after {:?}", timeout);
                    let err = FlowError::Timeout(timeout);
                    emit_error(events, &err, None).await;
                    return Err(err);
                }
            };

        let total_duration = start_time.elapsed().as_millis() as u64;

        tracing::info!(
            run_id = %run_id,
            status = %status,
            iterations,
            quiz_score = state.quiz_score(),
            duration_ms = total_duration,
            "Lesson flow finished"
        );

        emit(
            events,
            FlowEvent::EndStream {
                status,
                iterations,
                quiz_score: state.quiz_score(),
                total_duration_ms: total_duration,
            },
        )
        .await?;

        Ok(FlowOutcome {
            run_id,
            state,
            status,
            iterations,
            duration_ms: total_duration,
        })
    }

    async fn execute_loop(
        &self,
        mut state: LessonState,
        events: Option<&EventSender>,
    ) -> Result<(LessonState, FlowStatus, usize)> {
        let mut current_node = self.entry_point;
        let mut iterations = 0;

        loop {
            if current_node == NodeType::ContentGeneration {
                iterations += 1;
            }

            let node_start = Instant::now();

            if let Err(e) = self.node(current_node).execute(&mut state).await {
                tracing::error!(node = %current_node, iteration = iterations, "Node failed: {}", e);
                emit_error(events, &e, Some(current_node)).await;
                return Err(e);
            }

            let node_duration = node_start.elapsed().as_millis() as u64;
            tracing::debug!(node = %current_node, iteration = iterations, duration_ms = node_duration, "Node completed");

            emit(
                events,
                FlowEvent::NodeCompleted {
                    node: current_node,
                    iteration: iterations,
                    duration_ms: node_duration,
                },
            )
            .await?;

            match current_node {
                NodeType::ContentGeneration => {
                    emit(
                        events,
                        FlowEvent::LessonContent {
                            iteration: iterations,
                            content: state.lesson_content().to_string(),
                        },
                    )
                    .await?;
                }
                NodeType::FeedbackAnalyzer => {
                    emit(
                        events,
                        FlowEvent::QuizScore {
                            iteration: iterations,
                            score: state.quiz_score(),
                        },
                    )
                    .await?;
                }
                NodeType::UserInput => {}
            }

            // Route to next node
            match self.router.next(&state, current_node) {
                NextNode::End => return Ok((state, FlowStatus::Completed, iterations)),
                NextNode::FeedbackAnalyzer => current_node = NodeType::FeedbackAnalyzer,
                NextNode::ContentGeneration => {
                    // Guardrail: max iterations
                    if iterations >= self.config.max_iterations {
                        tracing::warn!(
                            max_iterations = self.config.max_iterations,
                            quiz_score = state.quiz_score(),
                            "Max iterations reached with score below threshold"
                        );
                        return Ok((state, FlowStatus::MaxIterationsExceeded, iterations));
                    }

                    if current_node == NodeType::FeedbackAnalyzer {
                        tracing::info!(
                            iteration = iterations,
                            quiz_score = state.quiz_score(),
                            threshold = self.config.score_threshold,
                            "Quiz score below threshold, regenerating lesson"
                        );
                        emit(
                            events,
                            FlowEvent::Retry {
                                iteration: iterations,
                                score: state.quiz_score(),
                                threshold: self.config.score_threshold,
                            },
                        )
                        .await?;
                    }

                    current_node = NodeType::ContentGeneration;
                }
            }
        }
    }

    fn node(&self, node_type: NodeType) -> &dyn Node {
        match node_type {
            NodeType::UserInput => &self.user_input,
            NodeType::ContentGeneration => &self.content_generation,
            NodeType::FeedbackAnalyzer => &self.feedback_analyzer,
        }
    }
}

async fn emit(events: Option<&EventSender>, event: FlowEvent) -> Result<()> {
    if let Some(tx) = events {
        tx.send(event).await.map_err(|_| FlowError::Cancelled)?;
    }
    Ok(())
}

async fn emit_error(events: Option<&EventSender>, error: &FlowError, node: Option<NodeType>) {
    if let Some(tx) = events {
        let _ = tx
            .send(FlowEvent::Error {
                message: error.to_string(),
                node,
            })
            .await;
    }
}
