//! Site configuration

use app_state::SubmissionConfig;
use app_ui::ScrollSpyConfig;
use storage::KvConfig;

/// Everything needed to start the site core
#[derive(Debug, Clone, Default)]
pub struct SiteConfig {
    /// Where the theme preference is stored
    pub storage: KvConfig,
    /// Active-section detection
    pub scroll_spy: ScrollSpyConfig,
    /// Simulated contact delivery
    pub submission: SubmissionConfig,
}

impl SiteConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the key-value store configuration
    pub fn storage(mut self, storage: KvConfig) -> Self {
        self.storage = storage;
        self
    }

    /// Set the scroll-spy configuration
    pub fn scroll_spy(mut self, scroll_spy: ScrollSpyConfig) -> Self {
        self.scroll_spy = scroll_spy;
        self
    }

    /// Set the submission configuration
    pub fn submission(mut self, submission: SubmissionConfig) -> Self {
        self.submission = submission;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_site_config_defaults() {
        let config = SiteConfig::default();
        assert_eq!(config.storage.path, "welight_kv.db");
        assert_eq!(config.scroll_spy.look_ahead, 100.0);
        assert_eq!(config.submission.delay, Duration::from_millis(2000));
    }

    #[test]
    fn test_site_config_builder() {
        let config = SiteConfig::new()
            .storage(KvConfig::new("prefs.db"))
            .scroll_spy(ScrollSpyConfig::new().look_ahead(64.0))
            .submission(SubmissionConfig::new().delay(Duration::ZERO));

        assert_eq!(config.storage.path, "prefs.db");
        assert_eq!(config.scroll_spy.look_ahead, 64.0);
        assert_eq!(config.submission.delay, Duration::ZERO);
    }
}
