use super::*;

fn valid_scheduler() -> SchedulerSettings {
    SchedulerSettings {
        dispatch_interval_minutes: 10,
        sweep_hour: 3,
        sweep_window_minutes: 20,
        lookback_days: 7,
        expiry_days: 30,
        recon_weekday: 1,
        recon_hour: 4,
        recon_window_minutes: 20,
        weekly_reconciliation_enabled: true,
        default_timezone: "UTC".to_string(),
        default_daily_minutes: 480,
    }
}

#[test]
fn test_default_settings_load_and_validate() {
    let settings = Settings::new().expect("defaults should load");
    assert_eq!(settings.scheduler.dispatch_interval_minutes, 10);
    assert_eq!(settings.scheduler.recon_weekday, 1);
    assert!(settings.scheduler.weekly_reconciliation_enabled);
    assert_eq!(settings.worker.team_size, 4);
}

#[test]
fn test_valid_scheduler_settings_pass() {
    assert!(valid_scheduler().validate().is_ok());
}

#[test]
fn test_dispatch_interval_out_of_range_rejected() {
    let mut s = valid_scheduler();
    s.dispatch_interval_minutes = 0;
    assert!(s.validate().is_err());
    s.dispatch_interval_minutes = 61;
    assert!(s.validate().is_err());
}

#[test]
fn test_window_minutes_out_of_range_rejected() {
    let mut s = valid_scheduler();
    s.recon_window_minutes = 4;
    assert!(s.validate().is_err());
    s.recon_window_minutes = 181;
    assert!(s.validate().is_err());
    s.recon_window_minutes = 180;
    assert!(s.validate().is_ok());
}

#[test]
fn test_weekday_and_hour_ranges_rejected() {
    let mut s = valid_scheduler();
    s.recon_weekday = 0;
    assert!(s.validate().is_err());
    s.recon_weekday = 8;
    assert!(s.validate().is_err());
    s = valid_scheduler();
    s.recon_hour = 24;
    assert!(s.validate().is_err());
}

#[test]
fn test_lookback_and_expiry_ranges_rejected() {
    let mut s = valid_scheduler();
    s.lookback_days = 15;
    assert!(s.validate().is_err());
    s = valid_scheduler();
    s.expiry_days = 91;
    assert!(s.validate().is_err());
    s.expiry_days = 90;
    assert!(s.validate().is_ok());
}

#[test]
fn test_dispatch_interval_wider_than_narrowest_window_rejected() {
    let mut s = valid_scheduler();
    s.dispatch_interval_minutes = 30;
    s.sweep_window_minutes = 5;
    assert!(s.validate().is_err());

    // 最窄窗口取两者较小值，对账窗口过窄同样拒绝
    s = valid_scheduler();
    s.dispatch_interval_minutes = 30;
    s.recon_window_minutes = 5;
    assert!(s.validate().is_err());
}

#[test]
fn test_dispatch_interval_equal_to_narrowest_window_accepted() {
    let mut s = valid_scheduler();
    s.dispatch_interval_minutes = 20;
    assert!(s.validate().is_ok());
}

#[test]
fn test_worker_settings_ranges() {
    let mut w = WorkerSettings {
        team_size: 4,
        poll_interval_secs: 1,
        stuck_job_timeout_minutes: 15,
    };
    assert!(w.validate().is_ok());
    w.team_size = 0;
    assert!(w.validate().is_err());
    w.team_size = 33;
    assert!(w.validate().is_err());
}

#[test]
fn test_scheduler_defaults_projection() {
    let s = valid_scheduler();
    let d = s.defaults();
    assert_eq!(d.recon_weekday, s.recon_weekday);
    assert_eq!(d.sweep_hour, s.sweep_hour);
    assert_eq!(d.lookback_days, s.lookback_days);
    assert_eq!(d.expiry_days, s.expiry_days);
}
