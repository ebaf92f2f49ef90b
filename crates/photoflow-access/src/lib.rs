//! Photoflow access library
//!
//! Access control for the upload feature. The access list is the set of
//! confirmed email subscriptions on the notification topic: the
//! registry answers membership queries against it, and the request
//! service lets users add themselves (subject to out-of-band email
//! confirmation by the pub/sub collaborator).

pub mod registry;
pub mod request;

pub use registry::{AccessLookup, TopicAccessRegistry};
pub use request::{AccessRequestOutcome, AccessRequestService};
