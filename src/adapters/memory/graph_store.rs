//! In-memory graph store implementation.
//!
//! Holds the seeded concept taxonomy (nodes plus prerequisite edges) and
//! per-student skill/gap overlays. The recommendation query and the
//! prerequisite-path query run directly over the seeded structures.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use tokio::sync::RwLock;

use crate::domain::foundation::UserId;
use crate::ports::{ConceptNode, GraphError, GraphStore, OverlayUpdate, StudentOverlay};

/// In-memory implementation of the GraphStore port.
pub struct InMemoryGraphStore {
    /// Concept taxonomy keyed by node ID, seeded once.
    nodes: HashMap<String, ConceptNode>,
    /// Stable listing order.
    order: Vec<String>,
    /// Per-student overlays, written by profile merges.
    overlays: RwLock<HashMap<UserId, StudentOverlay>>,
}

impl InMemoryGraphStore {
    /// Creates a store seeded with the given concept taxonomy.
    pub fn new(concepts: Vec<ConceptNode>) -> Self {
        let order = concepts.iter().map(|c| c.id.clone()).collect();
        let nodes = concepts.into_iter().map(|c| (c.id.clone(), c)).collect();
        Self {
            nodes,
            order,
            overlays: RwLock::new(HashMap::new()),
        }
    }

    fn node_by_name(&self, name: &str) -> Option<&ConceptNode> {
        self.nodes.values().find(|c| c.name == name)
    }

    /// Skill score for a concept name in the overlay, if recorded.
    fn overlay_score(overlay: &StudentOverlay, name: &str) -> Option<f64> {
        overlay
            .skills
            .iter()
            .find(|(skill, _)| skill == name)
            .map(|(_, score)| *score)
    }
}

#[async_trait]
impl GraphStore for InMemoryGraphStore {
    async fn sync_student(
        &self,
        user_id: &UserId,
        update: &OverlayUpdate,
    ) -> Result<(), GraphError> {
        let mut overlays = self.overlays.write().await;
        let overlay = overlays.entry(user_id.clone()).or_default();

        for (name, score) in &update.skills {
            match overlay.skills.iter_mut().find(|(skill, _)| skill == name) {
                Some((_, existing)) => *existing = *score,
                None => overlay.skills.push((name.clone(), *score)),
            }
        }
        overlay.gaps = update.gaps.clone();
        Ok(())
    }

    async fn concepts(&self) -> Result<Vec<ConceptNode>, GraphError> {
        Ok(self
            .order
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .cloned()
            .collect())
    }

    async fn student_overlay(&self, user_id: &UserId) -> Result<StudentOverlay, GraphError> {
        Ok(self
            .overlays
            .read()
            .await
            .get(user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn next_concepts(
        &self,
        user_id: &UserId,
        mastery_threshold: f64,
        limit: usize,
    ) -> Result<Vec<ConceptNode>, GraphError> {
        let overlay = self.student_overlay(user_id).await?;

        let mut candidates: Vec<&ConceptNode> = self
            .nodes
            .values()
            .filter(|concept| {
                // Already mastered or flagged as a gap: skip.
                let mastered = Self::overlay_score(&overlay, &concept.name)
                    .is_some_and(|s| s >= mastery_threshold);
                if mastered || overlay.gaps.contains(&concept.name) {
                    return false;
                }
                // Every direct prerequisite must be mastered.
                concept.prerequisite_ids.iter().all(|prereq_id| {
                    self.nodes.get(prereq_id).is_some_and(|prereq| {
                        Self::overlay_score(&overlay, &prereq.name)
                            .is_some_and(|s| s >= mastery_threshold)
                    })
                })
            })
            .collect();

        candidates.sort_by_key(|c| (c.tier, c.difficulty, c.id.clone()));
        Ok(candidates.into_iter().take(limit).cloned().collect())
    }

    async fn concept_by_name(&self, name: &str) -> Result<Option<ConceptNode>, GraphError> {
        Ok(self.node_by_name(name).cloned())
    }

    async fn path_between(&self, from: &str, to: &str) -> Result<Vec<ConceptNode>, GraphError> {
        let start = self
            .node_by_name(from)
            .ok_or_else(|| GraphError::ConceptNotFound(from.to_string()))?;
        let goal = self
            .node_by_name(to)
            .ok_or_else(|| GraphError::ConceptNotFound(to.to_string()))?;

        // BFS over prerequisite edges, treated as undirected: a learning
        // path may descend to shared prerequisites before climbing again.
        let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
        for node in self.nodes.values() {
            for prereq in &node.prerequisite_ids {
                adjacency.entry(node.id.as_str()).or_default().push(prereq);
                adjacency.entry(prereq.as_str()).or_default().push(&node.id);
            }
        }

        let mut visited: HashSet<&str> = HashSet::from([start.id.as_str()]);
        let mut parent: HashMap<&str, &str> = HashMap::new();
        let mut queue: VecDeque<&str> = VecDeque::from([start.id.as_str()]);

        while let Some(current) = queue.pop_front() {
            if current == goal.id {
                let mut path = vec![current];
                let mut cursor = current;
                while let Some(&prev) = parent.get(cursor) {
                    path.push(prev);
                    cursor = prev;
                }
                path.reverse();
                return Ok(path
                    .into_iter()
                    .filter_map(|id| self.nodes.get(id))
                    .cloned()
                    .collect());
            }
            for &next in adjacency.get(current).into_iter().flatten() {
                if visited.insert(next) {
                    parent.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        Ok(Vec::new())
    }
}
