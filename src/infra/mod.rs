//! Clients for third-party forecast providers.

pub mod stormglass;
