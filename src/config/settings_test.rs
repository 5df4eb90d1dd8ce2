#[cfg(test)]
mod tests {
    use crate::config::settings::Settings;
    use std::time::Duration;

    #[test]
    fn test_defaults_match_site_timings() {
        let settings = Settings::defaults().expect("defaults should deserialize");

        assert_eq!(settings.server.port, 3000);
        assert_eq!(
            settings.crawler.target_url,
            "https://soco.seoul.go.kr/youth/main/main.do"
        );
        assert_eq!(settings.crawler.navigation_timeout(), Duration::from_secs(60));
        assert_eq!(settings.crawler.initial_wait(), Duration::from_secs(30));
        assert_eq!(settings.crawler.filter_wait(), Duration::from_secs(10));
        assert_eq!(settings.crawler.post_click_delay(), Duration::from_millis(2000));
        assert_eq!(settings.crawler.settle_delay(), Duration::from_millis(1000));
        assert_eq!(settings.crawler.district_delay(), Duration::from_millis(1000));
        assert!(settings.crawler.detail_url_template.contains("{id}"));
        assert!(settings.crawler.districts.is_none());
    }

    #[test]
    fn test_scheduler_runs_hourly_by_default() {
        let settings = Settings::defaults().unwrap();
        assert!(settings.scheduler.enabled);
        assert_eq!(settings.scheduler.interval_secs, 3600);
        assert!(settings.notification.relay_url.is_none());
        assert!(!settings.metrics.enabled);
    }
}
