//! Data shapes exchanged with the admin API.

pub mod agent_status;
pub mod business_hour;
pub mod integration;
pub mod message;
pub mod room;
pub mod user;

pub use agent_status::*;
pub use business_hour::*;
pub use integration::*;
pub use message::*;
pub use room::*;
pub use user::*;
