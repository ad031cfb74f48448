use chrono::{DateTime, Datelike, Duration, SecondsFormat, TimeZone, Utc};
use contracts::usecases::u601_wc_reports::{RangeToken, ResolvedRange};

/// Разрешить символьный период в абсолютные границы относительно текущего момента
pub fn resolve(
    range: Option<RangeToken>,
    after: Option<&str>,
    before: Option<&str>,
) -> ResolvedRange {
    resolve_at(Utc::now(), range, after, before)
}

/// Разрешить период относительно заданного момента `now`.
///
/// `custom` с обеими непустыми границами возвращает их как есть (без проверки порядка).
/// Всё остальное, включая `custom` без границ или с пустыми границами и неизвестные токены,
/// считается как `last_7_days`.
pub fn resolve_at(
    now: DateTime<Utc>,
    range: Option<RangeToken>,
    after: Option<&str>,
    before: Option<&str>,
) -> ResolvedRange {
    let after = after.filter(|s| !s.trim().is_empty());
    let before = before.filter(|s| !s.trim().is_empty());
    if let (Some(RangeToken::Custom), Some(after), Some(before)) = (range, after, before) {
        return ResolvedRange {
            after: after.to_string(),
            before: before.to_string(),
        };
    }

    let start = match range {
        Some(RangeToken::Last30Days) => now - Duration::days(30),
        Some(RangeToken::Mtd) => start_of_month(now),
        Some(RangeToken::Qtd) => start_of_quarter(now),
        Some(RangeToken::Ytd) => start_of_year(now),
        _ => now - Duration::days(7),
    };

    ResolvedRange {
        after: iso(start),
        before: iso(now),
    }
}

/// ISO-8601 с миллисекундами и суффиксом `Z`
pub fn iso(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn start_of_month(instant: DateTime<Utc>) -> DateTime<Utc> {
    first_instant(instant.year(), instant.month()).unwrap_or(instant)
}

/// Кварталы начинаются с января, апреля, июля и октября
pub fn start_of_quarter(instant: DateTime<Utc>) -> DateTime<Utc> {
    let month = (instant.month0() / 3) * 3 + 1;
    first_instant(instant.year(), month).unwrap_or(instant)
}

pub fn start_of_year(instant: DateTime<Utc>) -> DateTime<Utc> {
    first_instant(instant.year(), 1).unwrap_or(instant)
}

fn first_instant(year: i32, month: u32) -> Option<DateTime<Utc>> {
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_custom_range_is_returned_verbatim() {
        let range = resolve(
            Some(RangeToken::Custom),
            Some("2024-01-01T00:00:00Z"),
            Some("2024-02-01T00:00:00Z"),
        );
        assert_eq!(range.after, "2024-01-01T00:00:00Z");
        assert_eq!(range.before, "2024-02-01T00:00:00Z");

        // Порядок границ не проверяется
        let range = resolve(Some(RangeToken::Custom), Some("2024-03-01"), Some("2024-01-01"));
        assert_eq!(range.after, "2024-03-01");
        assert_eq!(range.before, "2024-01-01");
    }

    #[test]
    fn test_month_quarter_year_starts() {
        let now = at("2024-03-15T12:00:00Z");

        let mtd = resolve_at(now, Some(RangeToken::Mtd), None, None);
        assert_eq!(mtd.after, "2024-03-01T00:00:00.000Z");
        assert_eq!(mtd.before, "2024-03-15T12:00:00.000Z");

        let qtd = resolve_at(now, Some(RangeToken::Qtd), None, None);
        assert_eq!(qtd.after, "2024-01-01T00:00:00.000Z");

        let ytd = resolve_at(now, Some(RangeToken::Ytd), None, None);
        assert_eq!(ytd.after, "2024-01-01T00:00:00.000Z");

        let q4 = resolve_at(at("2023-11-30T23:59:59Z"), Some(RangeToken::Qtd), None, None);
        assert_eq!(q4.after, "2023-10-01T00:00:00.000Z");
    }

    #[test]
    fn test_relative_windows() {
        let now = at("2024-03-15T12:00:00Z");

        let week = resolve_at(now, Some(RangeToken::Last7Days), None, None);
        assert_eq!(week.after, "2024-03-08T12:00:00.000Z");

        let month = resolve_at(now, Some(RangeToken::Last30Days), None, None);
        assert_eq!(month.after, "2024-02-14T12:00:00.000Z");
    }

    #[test]
    fn test_fallback_to_last_7_days() {
        let now = at("2024-03-15T12:00:00Z");
        let expected = resolve_at(now, Some(RangeToken::Last7Days), None, None);

        assert_eq!(resolve_at(now, None, None, None), expected);
        assert_eq!(resolve_at(now, Some(RangeToken::Unknown), None, None), expected);
        assert_eq!(
            resolve_at(now, Some(RangeToken::Custom), Some("2024-01-01T00:00:00Z"), None),
            expected
        );

        // Пустые границы считаются отсутствующими
        let empty = resolve_at(now, Some(RangeToken::Custom), Some(""), Some(""));
        assert_eq!(empty.after, "2024-03-08T12:00:00.000Z");
        assert_eq!(empty.before, "2024-03-15T12:00:00.000Z");
        assert_eq!(
            resolve_at(now, Some(RangeToken::Custom), Some("2024-01-01T00:00:00Z"), Some("  ")),
            expected
        );
    }

    #[test]
    fn test_relative_ranges_end_now() {
        let tokens = [
            RangeToken::Last7Days,
            RangeToken::Last30Days,
            RangeToken::Mtd,
            RangeToken::Qtd,
            RangeToken::Ytd,
        ];
        // Середина месяца, чтобы начало периода было строго раньше
        let now = at("2025-08-20T08:30:00Z");
        for token in tokens {
            let range = resolve_at(now, Some(token), None, None);
            let after = at(&range.after);
            let before = at(&range.before);
            assert!(after < before, "{:?}: {} !< {}", token, range.after, range.before);
            assert_eq!(before, now);
        }

        let live = resolve(Some(RangeToken::Last30Days), None, None);
        assert!(at(&live.after) < at(&live.before));
        assert!(at(&live.before) <= Utc::now());
    }
}
