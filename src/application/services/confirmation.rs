use crate::common::result::MgitResult;

/// Asks the user whether to go on.
///
/// Called once per auto-discovered filtering file, before any repository is
/// touched. `Ok(false)` aborts the run.
#[cfg_attr(test, mockall::automock)]
pub trait Confirmer: Send + Sync {
    fn confirm(&self, message: &str) -> MgitResult<bool>;
}

/// Answers yes without asking (`--yes`)
#[derive(Debug, Clone, Copy, Default)]
pub struct AssumeYes;

impl Confirmer for AssumeYes {
    fn confirm(&self, message: &str) -> MgitResult<bool> {
        tracing::info!("Assuming yes: {}", message);
        Ok(true)
    }
}
