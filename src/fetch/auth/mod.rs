//! Request decorators that attach provider credentials.

mod api_key;

pub use api_key::ApiKey;
