//! Analysis graph construction and execution
//!
//! A run walks a fixed shape: fetch, a routing decision, one concurrent
//! fan-out over the selected task nodes, a fold of their patches, and a
//! terminal evaluation. The fan-out is a join, not a race: the engine
//! suspends until every dispatched node has settled, successfully or not.

use crate::error::WorkflowError;
use crate::node::TaskNode;
use crate::route::{RunPhase, dispatch_set};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use trade_core::{AnalysisState, NodeId};

/// The compiled analysis graph
///
/// Holds the node registry; all routing is static. One graph instance can
/// serve any number of concurrent runs, since every run owns its own state.
pub struct AnalysisGraph {
    nodes: HashMap<NodeId, Arc<dyn TaskNode>>,
}

impl AnalysisGraph {
    /// Create a new graph builder
    pub fn builder() -> GraphBuilder {
        GraphBuilder::new()
    }

    /// Execute one run from the given initial state
    ///
    /// Never fails: every node-level fault is absorbed into the returned
    /// state, either as the run-terminal `error` (fetch) or as a
    /// per-branch `node_failures` entry (task nodes).
    pub async fn run(&self, mut state: AnalysisState) -> AnalysisState {
        debug!(phase = %RunPhase::Start, code = %state.code, "starting analysis run");

        // Fetch is unconditional; nothing downstream can proceed without it.
        match self.node(NodeId::Fetch).run(&state).await {
            Ok(patch) => state.apply(patch),
            Err(e) => state.error = Some(e.to_string()),
        }
        debug!(
            phase = %RunPhase::Fetched,
            rows = state.market_data.len(),
            error = state.error.as_deref().unwrap_or(""),
            "fetch settled"
        );

        // A fetch failure short-circuits all task dispatch.
        let selected = if state.error.is_some() {
            &[][..]
        } else {
            dispatch_set(state.analysis_type)
        };

        if !selected.is_empty() {
            debug!(phase = %RunPhase::Dispatching, nodes = selected.len(), "fanning out");

            // Every dispatched node reads the same frozen pre-branch
            // snapshot; sibling writes are invisible within a fan-out.
            let snapshot = state.clone();
            let settled = join_all(selected.iter().map(|id| {
                let node = Arc::clone(self.node(*id));
                let snapshot = &snapshot;
                async move { (node.id(), node.run(snapshot).await) }
            }))
            .await;

            for (id, outcome) in settled {
                match outcome {
                    Ok(patch) => state.apply(patch),
                    Err(e) => {
                        warn!(node = %id, error = %e, "task node failed");
                        state.record_failure(id, format!("{}: {e}", id.failure_prefix()));
                    }
                }
            }
            debug!(phase = %RunPhase::Merged, failures = state.node_failures.len(), "patches folded");
        }

        // Evaluation is always reached exactly once and can never fail the
        // run; a fault here is logged and dropped.
        match self.node(NodeId::Evaluate).run(&state).await {
            Ok(patch) => state.apply(patch),
            Err(e) => debug!(error = %e, "evaluation failed; state unchanged"),
        }
        debug!(phase = %RunPhase::Evaluated, "evaluation settled");

        debug!(phase = %RunPhase::Done, failed = state.is_failed(), "run complete");
        state
    }

    /// Look up a registered node; the builder guarantees presence
    fn node(&self, id: NodeId) -> &Arc<dyn TaskNode> {
        self.nodes
            .get(&id)
            .unwrap_or_else(|| unreachable!("builder validated node {id}"))
    }
}

/// Builder for [`AnalysisGraph`]
pub struct GraphBuilder {
    nodes: HashMap<NodeId, Arc<dyn TaskNode>>,
}

impl GraphBuilder {
    /// Create a new empty builder
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }

    /// Register a node under its own id
    pub fn add_node(mut self, node: Arc<dyn TaskNode>) -> Self {
        self.nodes.insert(node.id(), node);
        self
    }

    /// Build the graph, verifying the registry is complete
    ///
    /// Every identifier reachable from the routing table (plus fetch and
    /// evaluate) must be registered, so execution can never hit a missing
    /// node at runtime.
    pub fn build(self) -> Result<AnalysisGraph, WorkflowError> {
        const REQUIRED: [NodeId; 7] = [
            NodeId::Fetch,
            NodeId::Risk,
            NodeId::Market,
            NodeId::Stability,
            NodeId::Suggestions,
            NodeId::Comparison,
            NodeId::Evaluate,
        ];

        for id in REQUIRED {
            if !self.nodes.contains_key(&id) {
                return Err(WorkflowError::MissingNode(id));
            }
        }

        Ok(AnalysisGraph { nodes: self.nodes })
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use trade_core::{
        AnalysisType, Error, MarketAnalysis, MarketObservation, RiskAnalysis, StabilityAnalysis,
        StatePatch,
    };

    /// What a stub node does when dispatched
    #[derive(Clone)]
    enum Behavior {
        Succeed,
        Fail,
        /// Fail unless the snapshot shows no sibling result slots
        AssertFrozenSnapshot,
    }

    struct StubNode {
        id: NodeId,
        behavior: Behavior,
        calls: Arc<AtomicUsize>,
    }

    impl StubNode {
        fn new(id: NodeId, behavior: Behavior) -> (Arc<Self>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            let node = Arc::new(Self {
                id,
                behavior,
                calls: Arc::clone(&calls),
            });
            (node, calls)
        }

        fn patch(&self) -> StatePatch {
            let mut patch = StatePatch::empty();
            match self.id {
                NodeId::Fetch => {
                    patch.market_data = Some(vec![MarketObservation::new(
                        "690100", "AUSTRALIA", 10.0, 100.0, "2021",
                    )]);
                }
                NodeId::Risk => {
                    patch.risk_analysis = Some(RiskAnalysis {
                        risk_score: 10.0,
                        risk_factors: vec![],
                        summary: String::new(),
                        chart_data: vec![],
                    });
                }
                NodeId::Market => {
                    patch.market_analysis = Some(MarketAnalysis {
                        best_markets: vec![],
                        chart_data: vec![],
                    });
                }
                NodeId::Stability => {
                    patch.stability_analysis = Some(StabilityAnalysis {
                        partners: vec![],
                        summary: String::new(),
                    });
                }
                _ => {}
            }
            patch
        }
    }

    #[async_trait]
    impl TaskNode for StubNode {
        fn id(&self) -> NodeId {
            self.id
        }

        async fn run(&self, state: &AnalysisState) -> trade_core::Result<StatePatch> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.behavior {
                Behavior::Succeed => Ok(self.patch()),
                Behavior::Fail => Err(Error::Inference(format!("{} stub failure", self.id))),
                Behavior::AssertFrozenSnapshot => {
                    if state.risk_analysis.is_some()
                        || state.market_analysis.is_some()
                        || state.stability_analysis.is_some()
                    {
                        Err(Error::Payload("saw a sibling's write".to_string()))
                    } else {
                        Ok(self.patch())
                    }
                }
            }
        }
    }

    struct TestGraph {
        graph: AnalysisGraph,
        calls: HashMap<NodeId, Arc<AtomicUsize>>,
    }

    fn build_graph(behavior_for: impl Fn(NodeId) -> Behavior) -> TestGraph {
        let ids = [
            NodeId::Fetch,
            NodeId::Risk,
            NodeId::Market,
            NodeId::Stability,
            NodeId::Suggestions,
            NodeId::Comparison,
            NodeId::Evaluate,
        ];

        let mut builder = AnalysisGraph::builder();
        let mut calls = HashMap::new();
        for id in ids {
            let (node, counter) = StubNode::new(id, behavior_for(id));
            builder = builder.add_node(node);
            calls.insert(id, counter);
        }

        TestGraph {
            graph: builder.build().unwrap(),
            calls,
        }
    }

    fn initial_state(kind: Option<AnalysisType>) -> AnalysisState {
        AnalysisState {
            code: "690100".to_string(),
            country: Some("AUSTRALIA".to_string()),
            analysis_type: kind,
            ..AnalysisState::default()
        }
    }

    fn count(test: &TestGraph, id: NodeId) -> usize {
        test.calls[&id].load(Ordering::SeqCst)
    }

    #[tokio::test]
    async fn test_risk_dispatches_exactly_its_set() {
        let test = build_graph(|_| Behavior::Succeed);
        let state = test.graph.run(initial_state(Some(AnalysisType::Risk))).await;

        assert_eq!(count(&test, NodeId::Fetch), 1);
        assert_eq!(count(&test, NodeId::Risk), 1);
        assert_eq!(count(&test, NodeId::Market), 1);
        assert_eq!(count(&test, NodeId::Stability), 1);
        assert_eq!(count(&test, NodeId::Suggestions), 0);
        assert_eq!(count(&test, NodeId::Comparison), 0);
        assert_eq!(count(&test, NodeId::Evaluate), 1);

        assert!(state.risk_analysis.is_some());
        assert!(state.market_analysis.is_some());
        assert!(state.stability_analysis.is_some());
        assert!(state.node_failures.is_empty());
    }

    #[tokio::test]
    async fn test_evaluate_reached_once_even_if_all_branches_fail() {
        let test = build_graph(|id| match id {
            NodeId::Fetch | NodeId::Evaluate => Behavior::Succeed,
            _ => Behavior::Fail,
        });
        let state = test.graph.run(initial_state(Some(AnalysisType::Risk))).await;

        assert_eq!(count(&test, NodeId::Evaluate), 1);
        assert_eq!(state.node_failures.len(), 3);
        assert!(state.risk_analysis.is_none());
        // Task-node failures are per-branch; the run itself did not fail.
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_fetch_failure_short_circuits_all_dispatch() {
        let test = build_graph(|id| match id {
            NodeId::Fetch => Behavior::Fail,
            _ => Behavior::Succeed,
        });
        let state = test.graph.run(initial_state(Some(AnalysisType::Risk))).await;

        assert!(state.error.is_some());
        assert_eq!(count(&test, NodeId::Risk), 0);
        assert_eq!(count(&test, NodeId::Market), 0);
        assert_eq!(count(&test, NodeId::Stability), 0);
        assert_eq!(count(&test, NodeId::Evaluate), 1);
    }

    #[tokio::test]
    async fn test_unrecognized_kind_goes_straight_to_evaluate() {
        let test = build_graph(|_| Behavior::Succeed);
        let state = test.graph.run(initial_state(None)).await;

        assert_eq!(count(&test, NodeId::Fetch), 1);
        assert_eq!(count(&test, NodeId::Evaluate), 1);
        for id in [
            NodeId::Risk,
            NodeId::Market,
            NodeId::Stability,
            NodeId::Suggestions,
            NodeId::Comparison,
        ] {
            assert_eq!(count(&test, id), 0, "{id} should not have run");
        }
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_one_failed_branch_does_not_affect_siblings() {
        let test = build_graph(|id| match id {
            NodeId::Risk => Behavior::Fail,
            _ => Behavior::Succeed,
        });
        let state = test.graph.run(initial_state(Some(AnalysisType::Risk))).await;

        assert!(state.risk_analysis.is_none());
        assert!(state.market_analysis.is_some());
        assert!(state.stability_analysis.is_some());
        assert!(state.node_failures.contains_key(&NodeId::Risk));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_dispatched_nodes_see_frozen_snapshot() {
        let test = build_graph(|id| match id {
            NodeId::Risk | NodeId::Market | NodeId::Stability => Behavior::AssertFrozenSnapshot,
            _ => Behavior::Succeed,
        });
        let state = test.graph.run(initial_state(Some(AnalysisType::Risk))).await;

        // Had any node observed a sibling's write, it would have failed.
        assert!(state.node_failures.is_empty());
        assert!(state.risk_analysis.is_some());
        assert!(state.market_analysis.is_some());
        assert!(state.stability_analysis.is_some());
    }

    #[tokio::test]
    async fn test_evaluate_failure_leaves_state_unchanged() {
        let test = build_graph(|id| match id {
            NodeId::Evaluate => Behavior::Fail,
            _ => Behavior::Succeed,
        });
        let state = test
            .graph
            .run(initial_state(Some(AnalysisType::Suggestions)))
            .await;

        assert!(state.error.is_none());
        assert!(state.node_failures.is_empty());
    }

    #[test]
    fn test_builder_rejects_incomplete_registry() {
        let (node, _) = StubNode::new(NodeId::Fetch, Behavior::Succeed);
        let result = AnalysisGraph::builder().add_node(node).build();
        assert!(matches!(result, Err(WorkflowError::MissingNode(_))));
    }
}
