//! Prompt domain
//!
//! Role identities and the data-driven templates every role prompt is
//! rendered from.

pub mod role;
pub mod template;

pub use role::RoleProfile;
pub use template::{PromptFields, PromptTemplates, TemplateId};
