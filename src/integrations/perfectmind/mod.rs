//! PerfectMind scheduling/CRM integration: the `PerfectMindApi` credential and
//! a node that fetches one page of appointments.

pub mod credentials;
pub mod description;
pub mod node;

pub const INTEGRATION_NAME: &str = "PerfectMind";
pub const NODE_NAME: &str = "GetAppointments";
pub const NODE_ID: &str = "perfectmind";

pub use credentials::{credential_definition, PerfectMindCredentials};
pub use description::node_description;
pub use node::{ApiEndpoint, AppointmentQuery, Operation, PerfectMindNode, Resource};
