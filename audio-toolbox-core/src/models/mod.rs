pub mod error;
pub mod handle;
pub mod resource_kind;
pub mod status;
pub mod stream_description;
