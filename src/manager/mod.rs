//! Ingestion Manager: holds one Topic Supervisor per configured topic,
//! supports adding topics at runtime, and coordinates graceful shutdown
//! through the shared `ShutdownService`.

use std::collections::BTreeMap;

use dashmap::DashMap;
use tokio::sync::watch;

use crate::core::ShutdownService;
use crate::data::postgres::PgPool;
use crate::mirror::MirrorClient;
use crate::stream::PushSubscriber;
use crate::supervisor::{self, SupervisorStatus};

struct TrackedSupervisor {
    status: watch::Receiver<SupervisorStatus>,
}

pub struct IngestionManager {
    mirror: MirrorClient,
    grpc_endpoint: String,
    pool: PgPool,
    poll_interval_ms: u64,
    page_delay_ms: u64,
    shutdown: ShutdownService,
    topics: DashMap<String, TrackedSupervisor>,
}

impl IngestionManager {
    pub fn new(
        mirror: MirrorClient,
        grpc_endpoint: impl Into<String>,
        pool: PgPool,
        poll_interval_ms: u64,
        page_delay_ms: u64,
        shutdown: ShutdownService,
    ) -> Self {
        Self {
            mirror,
            grpc_endpoint: grpc_endpoint.into(),
            pool,
            poll_interval_ms,
            page_delay_ms,
            shutdown,
            topics: DashMap::new(),
        }
    }

    /// Start a supervisor for every topic in `topic_ids` that isn't already
    /// tracked. Successive topics are paced `poll_interval_ms` apart so a
    /// large seed list doesn't open every backfill against the mirror REST
    /// endpoint in the same instant.
    pub async fn start<I, S>(&self, topic_ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for (i, topic_id) in topic_ids.into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(std::time::Duration::from_millis(self.poll_interval_ms)).await;
            }
            self.add_topic(topic_id.into()).await;
        }
    }

    /// Add a single topic at runtime. Returns `false` without side effects
    /// if the topic is already tracked.
    ///
    /// Two concurrent callers racing on the same new `topic_id` must result
    /// in at most one Supervisor: the reservation below claims the slot
    /// through `DashMap::entry`'s atomic occupied/vacant check, so only the
    /// caller that wins the race proceeds to spawn one.
    pub async fn add_topic(&self, topic_id: impl Into<String>) -> bool {
        use dashmap::mapref::entry::Entry;

        let topic_id = topic_id.into();
        // Use the entry API for atomic check-and-reserve - prevents a TOCTOU
        // race condition between two concurrent callers adding the same
        // new topic.
        let (_, placeholder_rx) = watch::channel(SupervisorStatus::default());
        match self.topics.entry(topic_id.clone()) {
            Entry::Occupied(_) => return false,
            Entry::Vacant(entry) => {
                entry.insert(TrackedSupervisor {
                    status: placeholder_rx,
                });
            }
        }

        let subscriber = PushSubscriber::new(self.grpc_endpoint.clone());
        let handle = supervisor::spawn(
            topic_id.clone(),
            self.mirror.clone(),
            subscriber,
            self.pool.clone(),
            self.page_delay_ms,
            self.shutdown.subscribe(),
        );

        self.shutdown.register(handle.join).await;
        self.topics.insert(
            topic_id,
            TrackedSupervisor {
                status: handle.status,
            },
        );
        true
    }

    /// Whether a topic is currently tracked (used by tests to observe
    /// registration without waiting on a status snapshot).
    #[cfg(test)]
    fn is_tracked(&self, topic_id: &str) -> bool {
        self.topics.contains_key(topic_id)
    }

    /// A snapshot of every tracked topic's current status.
    pub fn status(&self) -> BTreeMap<String, SupervisorStatus> {
        self.topics
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().status.borrow().clone()))
            .collect()
    }

    /// Signal every supervisor to stop and wait for them to quiesce.
    /// Idempotent — safe to call more than once.
    pub async fn stop(&self) {
        self.shutdown.shutdown().await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn starts_with_no_tracked_topics() {
        let shutdown = ShutdownService::new();
        let manager = IngestionManager::new(
            MirrorClient::new("https://mirror.example"),
            "https://grpc.example",
            test_pool(),
            1000,
            100,
            shutdown,
        );
        assert!(manager.status().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_add_topic_starts_at_most_one_supervisor() {
        let shutdown = ShutdownService::new();
        let manager = Arc::new(IngestionManager::new(
            MirrorClient::new("https://mirror.invalid"),
            "https://grpc.invalid",
            test_pool(),
            1000,
            100,
            shutdown,
        ));

        let a = manager.clone();
        let b = manager.clone();
        let first = tokio::spawn(async move { a.add_topic("topic-x").await });
        let second = tokio::spawn(async move { b.add_topic("topic-x").await });
        let (first, second) = tokio::join!(first, second);

        assert!(first.unwrap() ^ second.unwrap(), "exactly one call should win the race");
        assert!(manager.is_tracked("topic-x"));

        manager.stop().await;
    }

    #[tokio::test]
    async fn start_tracks_every_seed_topic() {
        let shutdown = ShutdownService::new();
        let manager = IngestionManager::new(
            MirrorClient::new("https://mirror.invalid"),
            "https://grpc.invalid",
            test_pool(),
            1,
            100,
            shutdown,
        );

        manager.start(["topic-a", "topic-b", "topic-c"]).await;

        let status = manager.status();
        assert_eq!(status.len(), 3);
        assert!(status.contains_key("topic-a"));
        assert!(status.contains_key("topic-b"));
        assert!(status.contains_key("topic-c"));

        manager.stop().await;
    }

    fn test_pool() -> PgPool {
        // A lazily-connecting pool never touches the network until a query
        // runs, which this test never does.
        PgPool::connect_lazy("postgres://localhost/does-not-matter")
            .expect("lazy pool construction never fails")
    }
}
