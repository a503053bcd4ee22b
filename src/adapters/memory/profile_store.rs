//! In-memory profile store implementation.
//!
//! Thread-safe via internal locks. Suitable for single-server deployments
//! or testing. Does not persist data across restarts.
//!
//! Concurrent merges for the same user are serialized through a per-user
//! mutex so that list-typed fields never lose an update to interleaved
//! read-modify-write cycles.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::{CoreError, Timestamp, UserId};
use crate::domain::profile::{Profile, ProfileUpdate};
use crate::ports::{GraphStore, OverlayUpdate, ProfileStore};

/// In-memory implementation of the ProfileStore port.
#[derive(Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<HashMap<UserId, Profile>>,
    /// Per-user merge locks; entries are created on first merge and kept.
    merge_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
    /// Optional graph mirror, synced best-effort after merges.
    graph: Option<Arc<dyn GraphStore>>,
}

impl InMemoryProfileStore {
    /// Creates a new empty profile store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a graph store mirror for skill/gap overlay sync.
    pub fn with_graph(mut self, graph: Arc<dyn GraphStore>) -> Self {
        self.graph = Some(graph);
        self
    }

    /// Returns the number of stored profiles.
    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    /// Returns true if no profiles are stored.
    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }

    async fn merge_lock_for(&self, user_id: &UserId) -> Arc<Mutex<()>> {
        let mut locks = self.merge_locks.lock().await;
        locks
            .entry(user_id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Mirrors the merged profile's skills and gaps onto the graph.
    ///
    /// Failures are logged and swallowed; the merge has already committed.
    async fn sync_graph(&self, user_id: &UserId, profile: &Profile) {
        let Some(graph) = &self.graph else {
            return;
        };

        let overlay = OverlayUpdate {
            skills: profile
                .skills
                .iter()
                .map(|(name, score)| (name.clone(), *score))
                .collect(),
            gaps: profile.gaps.clone(),
        };
        if overlay.is_empty() {
            return;
        }

        if let Err(err) = graph.sync_student(user_id, &overlay).await {
            tracing::warn!(
                user_id = %user_id,
                error = %err,
                "graph overlay sync failed, profile merge unaffected"
            );
        }
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, user_id: &UserId) -> Result<Option<Profile>, CoreError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn create_initial(&self, user_id: &UserId) -> Result<Profile, CoreError> {
        let mut profiles = self.profiles.write().await;
        if profiles.contains_key(user_id) {
            return Err(CoreError::DuplicateProfile(user_id.clone()));
        }
        let profile = Profile::empty(user_id.clone(), Timestamp::now());
        profiles.insert(user_id.clone(), profile.clone());
        Ok(profile)
    }

    async fn merge(&self, user_id: &UserId, update: ProfileUpdate) -> Result<Profile, CoreError> {
        let lock = self.merge_lock_for(user_id).await;
        let _guard = lock.lock().await;

        let touches_graph = update.touches_graph();
        let merged = {
            let mut profiles = self.profiles.write().await;
            // Read-repair: a registered user always has a profile.
            let profile = profiles
                .entry(user_id.clone())
                .or_insert_with(|| Profile::empty(user_id.clone(), Timestamp::now()));
            profile.apply(update, Timestamp::now());
            profile.clone()
        };

        if touches_graph {
            self.sync_graph(user_id, &merged).await;
        }

        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{ConceptNode, GraphError, StudentOverlay};

    fn user() -> UserId {
        UserId::new("student-1").unwrap()
    }

    #[tokio::test]
    async fn create_initial_rejects_duplicates() {
        let store = InMemoryProfileStore::new();

        store.create_initial(&user()).await.unwrap();
        let err = store.create_initial(&user()).await.unwrap_err();
        assert!(matches!(err, CoreError::DuplicateProfile(_)));
    }

    #[tokio::test]
    async fn merge_repairs_missing_profile() {
        let store = InMemoryProfileStore::new();

        let merged = store
            .merge(&user(), ProfileUpdate::new().with_skill("Arrays", 0.5))
            .await
            .unwrap();

        assert_eq!(merged.skills.get("Arrays"), Some(&0.5));
        assert!(store.get(&user()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn concurrent_merges_lose_no_hints() {
        let store = Arc::new(InMemoryProfileStore::new());
        store.create_initial(&user()).await.unwrap();

        let mut handles = Vec::new();
        for i in 0..10 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store
                    .merge(&user(), ProfileUpdate::new().with_hint(format!("hint {i}")))
                    .await
                    .unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let profile = store.get(&user()).await.unwrap().unwrap();
        assert_eq!(profile.recent_hints.len(), 10);
    }

    /// Graph store that always fails, to prove merges survive sync failures.
    struct BrokenGraph;

    #[async_trait]
    impl GraphStore for BrokenGraph {
        async fn sync_student(
            &self,
            _: &UserId,
            _: &OverlayUpdate,
        ) -> Result<(), GraphError> {
            Err(GraphError::Unavailable("connection refused".into()))
        }

        async fn concepts(&self) -> Result<Vec<ConceptNode>, GraphError> {
            Ok(Vec::new())
        }

        async fn student_overlay(&self, _: &UserId) -> Result<StudentOverlay, GraphError> {
            Ok(StudentOverlay::default())
        }

        async fn next_concepts(
            &self,
            _: &UserId,
            _: f64,
            _: usize,
        ) -> Result<Vec<ConceptNode>, GraphError> {
            Ok(Vec::new())
        }

        async fn concept_by_name(&self, _: &str) -> Result<Option<ConceptNode>, GraphError> {
            Ok(None)
        }

        async fn path_between(&self, _: &str, _: &str) -> Result<Vec<ConceptNode>, GraphError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn merge_succeeds_when_graph_sync_fails() {
        let store = InMemoryProfileStore::new().with_graph(Arc::new(BrokenGraph));

        let merged = store
            .merge(
                &user(),
                ProfileUpdate::new()
                    .with_skill("Arrays", 0.6)
                    .replace_gaps(vec!["Recursion".to_string()]),
            )
            .await
            .unwrap();

        assert_eq!(merged.skills.get("Arrays"), Some(&0.6));
        assert_eq!(merged.gaps, vec!["Recursion".to_string()]);
    }
}
