pub mod job;

pub use job::{IdentityKey, Job, RoleType};
