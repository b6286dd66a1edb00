use super::*;
use chrono::TimeZone;

fn parts_at(tz: Tz, y: i32, mo: u32, d: u32, h: u32, mi: u32) -> LocalParts {
    let local = tz
        .with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("unambiguous local time");
    local_parts(local.with_timezone(&Utc), tz)
}

#[test]
fn test_resolve_time_zone_valid() {
    assert_eq!(resolve_time_zone(Some("Europe/Madrid")), chrono_tz::Europe::Madrid);
    assert_eq!(resolve_time_zone(Some("America/Sao_Paulo")), chrono_tz::America::Sao_Paulo);
}

#[test]
fn test_resolve_time_zone_fallback_never_panics() {
    assert_eq!(resolve_time_zone(None), DEFAULT_TIME_ZONE);
    assert_eq!(resolve_time_zone(Some("")), DEFAULT_TIME_ZONE);
    assert_eq!(resolve_time_zone(Some("   ")), DEFAULT_TIME_ZONE);
    assert_eq!(resolve_time_zone(Some("Not/AZone")), DEFAULT_TIME_ZONE);
    assert_eq!(resolve_time_zone(Some("GMT+25")), DEFAULT_TIME_ZONE);
}

#[test]
fn test_local_parts_offset_zone() {
    // 2025-07-07 02:30 UTC 在马德里（夏令时 UTC+2）是 04:30
    let instant = Utc.with_ymd_and_hms(2025, 7, 7, 2, 30, 0).unwrap();
    let parts = local_parts(instant, chrono_tz::Europe::Madrid);
    assert_eq!(parts.hour, 4);
    assert_eq!(parts.minute, 30);
    assert_eq!(parts.weekday, 1); // 周一
    assert_eq!(parts.date, NaiveDate::from_ymd_opt(2025, 7, 7).unwrap());
}

#[test]
fn test_local_parts_crosses_date_line() {
    // 2025-07-07 23:30 UTC 在圣保罗（UTC-3）仍是 7 号，
    // 在东京（UTC+9）已是 8 号
    let instant = Utc.with_ymd_and_hms(2025, 7, 7, 23, 30, 0).unwrap();
    let sp = local_parts(instant, chrono_tz::America::Sao_Paulo);
    assert_eq!(sp.date, NaiveDate::from_ymd_opt(2025, 7, 7).unwrap());
    let tokyo = local_parts(instant, chrono_tz::Asia::Tokyo);
    assert_eq!(tokyo.date, NaiveDate::from_ymd_opt(2025, 7, 8).unwrap());
    assert_eq!(tokyo.weekday, 2);
}

#[test]
fn test_window_containment_exact_minutes() {
    // 对一整周的每一分钟求值，窗口应恰好命中 window_minutes 次
    let tz = chrono_tz::UTC;
    let start = Utc.with_ymd_and_hms(2025, 7, 7, 0, 0, 0).unwrap();
    let window_minutes: u16 = 20;

    let mut hits = 0;
    for minute in 0..(7 * 24 * 60) {
        let parts = local_parts(start + Duration::minutes(minute), tz);
        if is_within_window(&parts, 1, 4, window_minutes) {
            hits += 1;
        }
    }
    assert_eq!(hits, i64::from(window_minutes));
}

#[test]
fn test_window_requires_weekday_and_hour() {
    let parts = parts_at(chrono_tz::UTC, 2025, 7, 7, 4, 10); // 周一 04:10
    assert!(is_within_window(&parts, 1, 4, 20));
    assert!(!is_within_window(&parts, 2, 4, 20));
    assert!(!is_within_window(&parts, 1, 5, 20));
    // 分钟超出窗口
    let late = parts_at(chrono_tz::UTC, 2025, 7, 7, 4, 25);
    assert!(!is_within_window(&late, 1, 4, 20));
}

#[test]
fn test_window_never_spans_hour_boundary() {
    // 窗口长度 90 分钟时，05:00 在下一个小时，永远不命中
    let next_hour = parts_at(chrono_tz::UTC, 2025, 7, 7, 5, 10);
    assert!(!is_within_window(&next_hour, 1, 4, 90));
    let in_hour = parts_at(chrono_tz::UTC, 2025, 7, 7, 4, 59);
    assert!(is_within_window(&in_hour, 1, 4, 90));
}

#[test]
fn test_daily_window_ignores_weekday() {
    let monday = parts_at(chrono_tz::UTC, 2025, 7, 7, 3, 5);
    let thursday = parts_at(chrono_tz::UTC, 2025, 7, 10, 3, 5);
    assert!(is_within_daily_window(&monday, 3, 20));
    assert!(is_within_daily_window(&thursday, 3, 20));
    assert!(!is_within_daily_window(&thursday, 4, 20));
}

#[test]
fn test_week_start_is_monday() {
    // 2025-07-10 是周四
    let thursday = parts_at(chrono_tz::UTC, 2025, 7, 10, 12, 0);
    assert_eq!(week_start(&thursday), NaiveDate::from_ymd_opt(2025, 7, 7).unwrap());
    // 周一自身
    let monday = parts_at(chrono_tz::UTC, 2025, 7, 7, 0, 0);
    assert_eq!(week_start(&monday), NaiveDate::from_ymd_opt(2025, 7, 7).unwrap());
    // 周日归属同一周
    let sunday = parts_at(chrono_tz::UTC, 2025, 7, 13, 23, 59);
    assert_eq!(week_start(&sunday), NaiveDate::from_ymd_opt(2025, 7, 7).unwrap());
}

#[test]
fn test_week_start_respects_local_zone() {
    // UTC 周日深夜在东京已是周一，两地归属不同的周
    let instant = Utc.with_ymd_and_hms(2025, 7, 6, 22, 0, 0).unwrap();
    let utc_parts = local_parts(instant, chrono_tz::UTC);
    let tokyo_parts = local_parts(instant, chrono_tz::Asia::Tokyo);
    assert_eq!(week_start(&utc_parts), NaiveDate::from_ymd_opt(2025, 6, 30).unwrap());
    assert_eq!(week_start(&tokyo_parts), NaiveDate::from_ymd_opt(2025, 7, 7).unwrap());
}
