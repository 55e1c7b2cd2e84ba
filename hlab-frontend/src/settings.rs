use std::time::Duration;

pub use crate::model::Page;

pub const DEFAULT_API_URL: &str = "http://localhost:5000";
pub const MIN_POLL_INTERVAL: Duration = Duration::from_secs(30);
pub const MAX_POLL_INTERVAL: Duration = Duration::from_secs(120);

#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub poll_interval: Duration,
    pub request_timeout: Duration,
    pub startup_page: Page,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            poll_interval: Duration::from_secs(60),
            request_timeout: Duration::from_secs(10),
            startup_page: Page::default(),
        }
    }
}

impl Settings {
    /// Sets the poll interval in seconds, clamped to the supported range.
    pub fn set_poll_interval(&mut self, seconds: u64) {
        let interval = Duration::from_secs(seconds);
        self.poll_interval = interval.clamp(MIN_POLL_INTERVAL, MAX_POLL_INTERVAL);
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    #[test]
    fn poll_interval_is_clamped() {
        let mut settings = super::Settings::default();

        settings.set_poll_interval(5);
        assert_eq!(settings.poll_interval, Duration::from_secs(30));

        settings.set_poll_interval(600);
        assert_eq!(settings.poll_interval, Duration::from_secs(120));

        settings.set_poll_interval(45);
        assert_eq!(settings.poll_interval, Duration::from_secs(45));
    }
}
