//! Validator - static checks over a story graph.
//!
//! Three passes, reported in this order:
//! 1. **Dangling references**: choices leading to nodes that do not exist
//! 2. **Orphans**: nodes other than the entry that no choice leads to
//! 3. **Cycles**: every elementary cycle in the choice graph
//!
//! Validation never fails and never touches the store. An empty report
//! means the story is clean. Cycles are warnings: narrative loops are a
//! legitimate pattern.

mod cycles;

pub use cycles::find_cycles;

use serde::{Deserialize, Serialize};
use story_graph::{NodeId, NodeStore};
use tracing::debug;

use crate::config::EngineConfig;

/// Kinds of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiagnosticKind {
    DanglingReference,
    Orphan,
    Cycle,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Diagnostic {
    /// A choice leads to a node that does not exist.
    DanglingReference {
        node: NodeId,
        /// 1-based position of the choice within `node`.
        position: usize,
        target: NodeId,
    },

    /// No choice anywhere leads to this node.
    Orphan { node: NodeId },

    /// An elementary cycle, in traversal order.
    Cycle { path: Vec<NodeId> },
}

impl Diagnostic {
    /// Get the kind of this diagnostic.
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            Diagnostic::DanglingReference { .. } => DiagnosticKind::DanglingReference,
            Diagnostic::Orphan { .. } => DiagnosticKind::Orphan,
            Diagnostic::Cycle { .. } => DiagnosticKind::Cycle,
        }
    }

    /// Cycles are warnings; everything else is a structural problem.
    pub fn is_warning(&self) -> bool {
        matches!(self, Diagnostic::Cycle { .. })
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::DanglingReference {
                node,
                position,
                target,
            } => write!(
                f,
                "node '{}' choice {} references missing node '{}'",
                node, position, target
            ),
            Diagnostic::Orphan { node } => {
                write!(f, "node '{}' is orphaned: no choice leads to it", node)
            }
            Diagnostic::Cycle { path } => {
                let names: Vec<_> = path.iter().map(NodeId::as_str).collect();
                write!(f, "cycle detected: {}", names.join(" -> "))?;
                if let Some(first) = path.first() {
                    write!(f, " -> {}", first)?;
                }
                Ok(())
            }
        }
    }
}

/// Runs the validation passes.
#[derive(Debug, Clone)]
pub struct Validator {
    entry_node: NodeId,
}

impl Validator {
    /// Create a validator that exempts the configured entry node from the
    /// orphan check.
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            entry_node: config.entry_node.clone(),
        }
    }

    /// Create a validator with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(&EngineConfig::default())
    }

    /// Run every pass and collect the findings.
    pub fn check(&self, store: &NodeStore) -> Vec<Diagnostic> {
        let mut report = self.dangling_references(store);
        report.extend(self.orphans(store));
        report.extend(self.cycles(store));

        debug!(
            nodes = store.len(),
            diagnostics = report.len(),
            "validated story"
        );
        report
    }

    /// Choices whose target is missing, in node then choice order.
    pub fn dangling_references(&self, store: &NodeStore) -> Vec<Diagnostic> {
        store
            .edges()
            .filter(|edge| !store.contains(edge.to.as_str()))
            .map(|edge| Diagnostic::DanglingReference {
                node: edge.from.clone(),
                position: edge.choice_index + 1,
                target: edge.to.clone(),
            })
            .collect()
    }

    /// Non-entry nodes that nothing leads to, in store order.
    pub fn orphans(&self, store: &NodeStore) -> Vec<Diagnostic> {
        store
            .ids()
            .filter(|id| **id != self.entry_node && !store.is_targeted(id.as_str()))
            .map(|id| Diagnostic::Orphan { node: id.clone() })
            .collect()
    }

    /// Every elementary cycle.
    pub fn cycles(&self, store: &NodeStore) -> Vec<Diagnostic> {
        find_cycles(store)
            .into_iter()
            .map(|path| Diagnostic::Cycle { path })
            .collect()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::with_defaults()
    }
}
