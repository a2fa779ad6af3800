// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent context chains for scoped logging.
//!
//! A [`ContextChain`] is an immutable, structurally shared singly linked
//! sequence of enrichments. Forking prepends one node and shares the entire
//! tail, so a fork is O(1) no matter how deep the chain already is; a naive
//! copy-on-fork design would make the request-scoped pattern of forking per
//! unit of work quadratic in total allocation.
//!
//! Nodes are never mutated after creation. Every fork, and every logger
//! holding one, can be used freely across threads without synchronization:
//! there is nothing to race on.

use serde_json::Value;
use std::sync::Arc;

/// One named piece of structured context attached to every record logged
/// through a chain.
///
/// The core stores and forwards enrichments without interpreting them; the
/// `destructure` flag tells record assembly whether to decompose the value
/// or bind it opaque.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrichment {
    pub name: String,
    pub value: Value,
    pub destructure: bool,
}

#[derive(Debug)]
struct ContextNode {
    enrichment: Enrichment,
    next: Option<Arc<ContextNode>>,
}

/// A chain of enrichments identified by its head node. Cloning shares the
/// nodes; the empty chain is [`ContextChain::default`].
#[derive(Debug, Clone, Default)]
pub struct ContextChain {
    head: Option<Arc<ContextNode>>,
}

impl ContextChain {
    /// The empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new chain whose head holds the given enrichment and whose
    /// tail is this chain. This chain is unaffected.
    pub fn fork(&self, name: impl Into<String>, value: Value, destructure: bool) -> ContextChain {
        ContextChain {
            head: Some(Arc::new(ContextNode {
                enrichment: Enrichment {
                    name: name.into(),
                    value,
                    destructure,
                },
                next: self.head.clone(),
            })),
        }
    }

    /// Walks head to root, returning enrichments most-recently-added first.
    pub fn materialize(&self) -> Vec<Enrichment> {
        let mut enrichments = Vec::new();
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            enrichments.push(node.enrichment.clone());
            cursor = node.next.as_deref();
        }
        enrichments
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }
}
