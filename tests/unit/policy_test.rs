//! Tests for policy value parsing

use chrono::Duration;

use duster::policy::{Period, TimeOfDay, parse_burn_moratorium, parse_sweep_moratorium};

// =============================================================================
// SWEEP MORATORIUM
// =============================================================================

#[test]
fn test_sweep_moratorium_every_valid_unit() {
    let cases = [
        ("0minute", Duration::zero()),
        ("0 minutes", Duration::zero()),
        ("0hour", Duration::zero()),
        ("0 hours", Duration::zero()),
        ("0day", Duration::zero()),
        ("0 days", Duration::zero()),
        ("0week", Duration::zero()),
        ("0 weeks", Duration::zero()),
        ("10minute", Duration::minutes(10)),
        ("10 minutes", Duration::minutes(10)),
        ("2hour", Duration::hours(2)),
        ("2 hours", Duration::hours(2)),
        ("3day", Duration::days(3)),
        ("3 days", Duration::days(3)),
        ("4week", Duration::weeks(4)),
        ("4 weeks", Duration::weeks(4)),
    ];
    for (input, expected) in cases {
        let (duration, _) = parse_sweep_moratorium(input)
            .unwrap_or_else(|e| panic!("{input:?} should parse: {e}"));
        assert_eq!(duration, expected, "input {input:?}");
    }
}

#[test]
fn test_sweep_moratorium_rejections_render_error_marker() {
    for input in ["1second", "1 seconds", "1month", "1 months", "1year", "-1minute", "hourly"] {
        let err = parse_sweep_moratorium(input).expect_err(input);
        assert!(err.to_string().starts_with("ERROR:"), "input {input:?}");
    }
}

// =============================================================================
// BURN MORATORIUM
// =============================================================================

#[test]
fn test_burn_moratorium_whole_days_only() {
    assert_eq!(parse_burn_moratorium("1day").unwrap().0, 1);
    assert_eq!(parse_burn_moratorium("13 days").unwrap().0, 13);
    assert_eq!(parse_burn_moratorium("2weeks").unwrap().0, 14);
}

#[test]
fn test_burn_moratorium_rejects_zero_and_sub_day_units() {
    for input in ["0day", "0 weeks", "1minute", "90 minutes", "1hour", "36 hours", "1second"] {
        assert!(parse_burn_moratorium(input).is_err(), "input {input:?}");
    }
}

// =============================================================================
// PERIOD AND TIME
// =============================================================================

#[test]
fn test_period_allow_list() {
    assert_eq!(Period::parse("daily").unwrap().as_str(), "daily");
    assert_eq!(Period::parse("weekly").unwrap().as_str(), "weekly");
    for input in ["day", "week", "hourly", "monthly", "yearly", "DAILY"] {
        assert!(Period::parse(input).is_err(), "input {input:?}");
    }
}

#[test]
fn test_time_of_day_bounds() {
    assert!(TimeOfDay::parse("00:00").is_ok());
    assert!(TimeOfDay::parse("12:34").is_ok());
    assert!(TimeOfDay::parse("23:59").is_ok());

    for input in ["24:00", "23:60", "99:99", "00:00:00", "7:30", "07:5", "0730"] {
        assert!(TimeOfDay::parse(input).is_err(), "input {input:?}");
    }
}
