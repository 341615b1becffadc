//! Publish Options

/// Options for `PublishUseCase::publish_all`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishOptions {
    /// Push every page even when the ledger says it is unchanged
    pub force: bool,
    /// Work out what would be pushed without calling GitHub
    pub dry_run: bool,
}

impl PublishOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
