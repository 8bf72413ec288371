//! Push Subscriber: live gRPC streaming of new messages on a topic, taking
//! over once the Mirror REST Client's backfill has caught up.

use async_stream::stream;
use futures::Stream;
use tonic::transport::Endpoint;

use super::error::SubscriberError;
use super::proto::mirror::consensus_service_client::ConsensusServiceClient;
use super::proto::mirror::ConsensusTopicQuery;
use crate::utils::time::ConsensusTimestamp;

/// One message as delivered over the live subscription.
#[derive(Debug, Clone)]
pub struct SubscribedMessage {
    pub topic_id: String,
    pub consensus_timestamp: ConsensusTimestamp,
    pub sequence_number: i64,
    pub payload_bytes: Vec<u8>,
}

/// Holds the mirror gRPC endpoint; cheap to clone, a fresh channel is dialed
/// per subscription.
#[derive(Clone)]
pub struct PushSubscriber {
    endpoint: String,
}

impl PushSubscriber {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// Subscribe to messages on `topic_id` strictly after `start`. Per the
    /// mirror contract, `start` is exclusive on the wire, so the caller's
    /// last-seen timestamp is advanced by one nanosecond before the query is
    /// built — the subscription must never re-deliver the cursor's own
    /// message.
    pub async fn subscribe(
        &self,
        topic_id: &str,
        start: Option<ConsensusTimestamp>,
    ) -> Result<impl Stream<Item = Result<SubscribedMessage, SubscriberError>>, SubscriberError>
    {
        let channel = Endpoint::from_shared(self.endpoint.clone())?
            .connect()
            .await?;
        let mut client = ConsensusServiceClient::new(channel);

        let query_start = start.map(ConsensusTimestamp::next);
        let query = ConsensusTopicQuery {
            topic_id: topic_id.to_string(),
            consensus_start_time_seconds: query_start.map(|t| t.seconds()).unwrap_or_default(),
            consensus_start_time_nanos: query_start.map(|t| t.nanos()).unwrap_or_default(),
            limit: 0,
        };

        let mut response_stream = client.subscribe_topic(query).await?.into_inner();
        let topic_id = topic_id.to_string();

        Ok(stream! {
            loop {
                match response_stream.message().await {
                    Ok(Some(item)) => {
                        yield Ok(SubscribedMessage {
                            topic_id: topic_id.clone(),
                            consensus_timestamp: ConsensusTimestamp::new(
                                item.consensus_timestamp_seconds,
                                item.consensus_timestamp_nanos,
                            ),
                            sequence_number: item.sequence_number,
                            payload_bytes: item.message,
                        });
                    }
                    Ok(None) => {
                        yield Err(SubscriberError::UnexpectedEof);
                        break;
                    }
                    Err(status) => {
                        yield Err(SubscriberError::Rpc(status));
                        break;
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscriber_holds_endpoint_verbatim() {
        let subscriber = PushSubscriber::new("https://mirror.example:443");
        assert_eq!(subscriber.endpoint, "https://mirror.example:443");
    }
}
