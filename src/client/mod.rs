//! Client library for connecting to prasatd.
//!
//! Provides [`ServiceClient`], which forwards classification requests to a
//! remote prasatd instance over gRPC.

mod service_client;

pub use service_client::{ServerHealth, ServiceClient, content_type_for_path};
