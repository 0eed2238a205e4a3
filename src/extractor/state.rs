//! Scoring state.
//!
//! Gravity scores live in a side table keyed by `NodeId` instead of being
//! written onto the DOM as attributes. The table also remembers the order in
//! which ancestors were first credited, which decides ties.

use std::collections::HashMap;

use dom_query::NodeId;

/// Accumulated weight of one node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Gravity {
    /// Sum of the scores propagated to this node.
    pub score: i64,
    /// Number of scoring descendants that contributed.
    pub nodes: u32,
}

/// Gravity scores for one document.
#[derive(Debug, Default)]
pub struct ScoreTable {
    gravity: HashMap<NodeId, Gravity>,
    /// Nodes in first-credit order.
    visited: Vec<NodeId>,
}

impl ScoreTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `score` to `node` and count one more contributor.
    pub fn credit(&mut self, node: NodeId, score: i64) {
        let entry = self.gravity.entry(node).or_insert_with(|| {
            self.visited.push(node);
            Gravity::default()
        });
        entry.score += score;
        entry.nodes += 1;
    }

    /// Gravity of `node`, if it was ever credited.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<Gravity> {
        self.gravity.get(&node).copied()
    }

    /// Score of `node`, if it was ever credited.
    #[must_use]
    pub fn score(&self, node: NodeId) -> Option<i64> {
        self.get(node).map(|g| g.score)
    }

    /// Highest-scoring node; the last credited wins a tie.
    #[must_use]
    pub fn best(&self) -> Option<NodeId> {
        let mut best: Option<(NodeId, i64)> = None;
        for id in &self.visited {
            let score = self.gravity.get(id).map_or(0, |g| g.score);
            if best.is_none_or(|(_, top)| score >= top) {
                best = Some((*id, score));
            }
        }
        best.map(|(id, _)| id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.visited.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom_query::Document;

    fn ids(doc: &Document, selector: &str) -> Vec<NodeId> {
        doc.select(selector).nodes().iter().map(|n| n.id).collect()
    }

    #[test]
    fn credit_accumulates_score_and_count() {
        let doc = Document::from("<div><p>a</p></div>");
        let div = ids(&doc, "div")[0];
        let mut table = ScoreTable::new();

        table.credit(div, 10);
        table.credit(div, 5);

        assert_eq!(table.get(div), Some(Gravity { score: 15, nodes: 2 }));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn uncredited_node_has_no_score() {
        let doc = Document::from("<div></div><section></section>");
        let table = ScoreTable::new();
        assert!(table.score(ids(&doc, "div")[0]).is_none());
        assert!(table.best().is_none());
        assert!(table.is_empty());
    }

    #[test]
    fn best_prefers_highest_then_last_seen() {
        let doc = Document::from("<div id=a></div><div id=b></div><div id=c></div>");
        let nodes = ids(&doc, "div");
        let mut table = ScoreTable::new();

        table.credit(nodes[0], 7);
        table.credit(nodes[1], 3);
        table.credit(nodes[2], 7);

        assert_eq!(table.best(), Some(nodes[2]));

        table.credit(nodes[1], 10);
        assert_eq!(table.best(), Some(nodes[1]));
    }
}
