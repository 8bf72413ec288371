//! Push Subscriber: live gRPC streaming handoff once backfill catches up.

mod error;
mod proto;
mod subscriber;

pub use error::SubscriberError;
pub use subscriber::{PushSubscriber, SubscribedMessage};
