//! Topic Supervisor: runs backfill to completion, hands off to the live
//! subscriber, and reconnects through a fresh backfill on any failure.
//! Within one supervisor there is no parallelism — backfill and streaming
//! never overlap, and messages are processed strictly in order.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use futures::StreamExt;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::data::postgres::repositories::cursor;
use crate::data::postgres::PgPool;
use crate::mirror::{MirrorClient, MirrorMessage};
use crate::parser;
use crate::projection::{self, ReceivedMessage};
use crate::stream::{PushSubscriber, SubscribedMessage};
use crate::utils::retry::backoff_delay;
use crate::utils::time::ConsensusTimestamp;

use super::error::SupervisorError;
use super::state::SupervisorState;
use super::status::SupervisorStatus;

/// A running supervisor: the task handle plus a read side for status
/// snapshots and a way to request a stop.
pub struct SupervisorHandle {
    pub topic_id: String,
    pub join: JoinHandle<()>,
    pub status: watch::Receiver<SupervisorStatus>,
}

struct Supervisor {
    topic_id: String,
    mirror: MirrorClient,
    subscriber: PushSubscriber,
    pool: PgPool,
    page_delay: Duration,
    status_tx: watch::Sender<SupervisorStatus>,
}

/// Spawn a supervisor task for `topic_id`. `shutdown_rx` is observed
/// throughout backfill, streaming, and the reconnect backoff wait; once it
/// fires the supervisor finishes its current step and returns to `idle`.
pub fn spawn(
    topic_id: String,
    mirror: MirrorClient,
    subscriber: PushSubscriber,
    pool: PgPool,
    page_delay_ms: u64,
    mut shutdown_rx: watch::Receiver<bool>,
) -> SupervisorHandle {
    let (status_tx, status_rx) = watch::channel(SupervisorStatus::default());
    let supervisor = Supervisor {
        topic_id: topic_id.clone(),
        mirror,
        subscriber,
        pool,
        page_delay: Duration::from_millis(page_delay_ms),
        status_tx,
    };

    let join = tokio::spawn(async move { supervisor.run(&mut shutdown_rx).await });

    SupervisorHandle {
        topic_id,
        join,
        status: status_rx,
    }
}

impl Supervisor {
    async fn run(self, shutdown_rx: &mut watch::Receiver<bool>) {
        let mut attempts: u32 = 0;

        loop {
            if *shutdown_rx.borrow() {
                break;
            }

            self.set_state(SupervisorState::Backfilling);
            if let Err(e) = self.backfill(shutdown_rx).await {
                if *shutdown_rx.borrow() {
                    break;
                }
                attempts += 1;
                self.record_failure(attempts, &e);
                if self.wait_backoff(attempts, shutdown_rx).await {
                    break;
                }
                continue;
            }
            attempts = 0;

            if *shutdown_rx.borrow() {
                break;
            }

            self.set_state(SupervisorState::Streaming);
            if let Err(e) = self.stream(shutdown_rx).await {
                if *shutdown_rx.borrow() {
                    break;
                }
                attempts += 1;
                self.record_failure(attempts, &e);
                if self.wait_backoff(attempts, shutdown_rx).await {
                    break;
                }
                continue;
            }
        }

        self.set_state(SupervisorState::Idle);
        tracing::debug!(topic_id = %self.topic_id, "supervisor stopped");
    }

    async fn backfill(&self, shutdown_rx: &mut watch::Receiver<bool>) -> Result<(), SupervisorError> {
        let cursor = cursor::get_cursor(&self.pool, &self.topic_id).await?;
        let cursor_ts = cursor.map(|(ts, _)| ts);

        let (mut messages, mut next_url) = self
            .mirror
            .fetch_messages(&self.topic_id, cursor_ts.as_deref(), 0)
            .await?;

        loop {
            for raw in &messages {
                if *shutdown_rx.borrow() {
                    return Ok(());
                }
                self.process_mirror_message(raw).await?;
            }

            match next_url.take() {
                Some(url) => {
                    tokio::time::sleep(self.page_delay).await;
                    let (page, next) = self.mirror.fetch_next(&url).await?;
                    messages = page;
                    next_url = next;
                }
                None => break,
            }
        }

        Ok(())
    }

    async fn stream(&self, shutdown_rx: &mut watch::Receiver<bool>) -> Result<(), SupervisorError> {
        let cursor = cursor::get_cursor(&self.pool, &self.topic_id).await?;
        let start = cursor
            .and_then(|(ts, _)| ts.parse::<ConsensusTimestamp>().ok());

        let incoming = self.subscriber.subscribe(&self.topic_id, start).await?;
        tokio::pin!(incoming);

        loop {
            tokio::select! {
                biased;
                _ = shutdown_rx.changed() => {
                    if *shutdown_rx.borrow() {
                        return Ok(());
                    }
                }
                item = incoming.next() => {
                    match item {
                        Some(Ok(message)) => self.process_subscribed_message(message).await?,
                        Some(Err(e)) => return Err(SupervisorError::from(e)),
                        None => return Err(SupervisorError::StreamEnded),
                    }
                }
            }
        }
    }

    async fn process_mirror_message(&self, raw: &MirrorMessage) -> Result<(), SupervisorError> {
        let consensus_timestamp: ConsensusTimestamp = raw
            .consensus_timestamp
            .parse()
            .map_err(|_| SupervisorError::MalformedConsensusTimestamp(raw.consensus_timestamp.clone()))?;

        // A payload that isn't valid base64 is a boundary case, not a
        // supervisor failure: the record is still stored (raw form
        // preserved verbatim) with decoded_payload absent, and the cursor
        // still advances.
        let payload_bytes = BASE64.decode(&raw.message).unwrap_or_default();

        let received = ReceivedMessage {
            topic_id: self.topic_id.clone(),
            consensus_timestamp,
            sequence_number: raw.sequence_number,
            payer_account_id: raw.payer_account_id.clone(),
            raw_base64: raw.message.clone(),
            payload_bytes,
        };

        self.project(received).await
    }

    async fn process_subscribed_message(&self, message: SubscribedMessage) -> Result<(), SupervisorError> {
        let received = ReceivedMessage {
            topic_id: message.topic_id,
            consensus_timestamp: message.consensus_timestamp,
            sequence_number: message.sequence_number,
            payer_account_id: None,
            raw_base64: BASE64.encode(&message.payload_bytes),
            payload_bytes: message.payload_bytes,
        };

        self.project(received).await
    }

    async fn project(&self, received: ReceivedMessage) -> Result<(), SupervisorError> {
        let parsed = parser::parse(&received.payload_bytes);
        projection::write(&self.pool, &received, &parsed).await?;
        Ok(())
    }

    /// Returns `true` if shutdown was requested while waiting.
    async fn wait_backoff(&self, attempts: u32, shutdown_rx: &mut watch::Receiver<bool>) -> bool {
        self.set_reconnecting(attempts);
        let delay = backoff_delay(attempts);
        tokio::select! {
            biased;
            _ = shutdown_rx.changed() => *shutdown_rx.borrow(),
            _ = tokio::time::sleep(delay) => false,
        }
    }

    fn set_state(&self, state: SupervisorState) {
        self.status_tx.send_modify(|status| status.state = state);
    }

    fn set_reconnecting(&self, attempts: u32) {
        self.status_tx.send_modify(|status| {
            status.state = SupervisorState::Reconnecting;
            status.reconnect_attempts = attempts;
        });
    }

    fn record_failure(&self, attempts: u32, error: &SupervisorError) {
        tracing::warn!(topic_id = %self.topic_id, attempts, error = %error, "supervisor failure, reconnecting");
        self.status_tx.send_modify(|status| {
            status.last_error_message = Some(error.to_string());
        });
    }
}
