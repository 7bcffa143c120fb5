//! Progress notification port
//!
//! Defines the interface for reporting which role is working while a
//! trial operation waits on the generation backend.

/// Callback for progress updates during trial operations
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called before a role starts producing a statement
    fn on_role_start(&self, role: &str, activity: &str);

    /// Called when the role has finished
    fn on_role_complete(&self, role: &str, success: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_role_start(&self, _role: &str, _activity: &str) {}
    fn on_role_complete(&self, _role: &str, _success: bool) {}
}
