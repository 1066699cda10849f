//! Unit tests for hw-optimizer.

use hw_core::{BusId, ClockTime, Constraints, OptimizerConfig, RouteId, Schedule, Trip};
use hw_demand::DemandSample;

// ── Helpers ───────────────────────────────────────────────────────────────────

const EPS: f64 = 1e-9;

fn at(hhmm: &str) -> ClockTime {
    ClockTime::parse_lenient(hhmm)
}

fn trip(bus: u32, hhmm: &str) -> Trip {
    Trip::new(BusId(bus), RouteId(1), at(hhmm), 90)
}

fn route_trip(route: u32, bus: u32, hhmm: &str) -> Trip {
    Trip::new(BusId(bus), RouteId(route), at(hhmm), 90)
}

fn schedule(trips: Vec<Trip>) -> Schedule {
    Schedule::new(trips).unwrap()
}

/// The bunched three-bus timetable: 06:00, 06:20, 06:50.
fn bunched() -> Vec<Trip> {
    vec![trip(1, "06:00"), trip(2, "06:20"), trip(3, "06:50")]
}

fn constraints_5_30_15() -> Constraints {
    Constraints::new(5, 30).with_target(15)
}

fn demand(passengers: f64) -> Vec<DemandSample> {
    (6..9).map(|hour| DemandSample { hour, predicted_passengers: passengers }).collect()
}

// ── Headway statistics ────────────────────────────────────────────────────────

#[cfg(test)]
mod stats {
    use super::*;
    use crate::{HeadwayStats, compute_headways, summarize};

    #[test]
    fn headways_of_bunched_schedule() {
        assert_eq!(compute_headways(&schedule(bunched())), vec![20, 30]);
    }

    #[test]
    fn summary_uses_population_variance() {
        let s = summarize(&[20, 30]);
        assert!((s.average - 25.0).abs() < EPS);
        assert_eq!(s.min, 20);
        assert_eq!(s.max, 30);
        // ((20-25)² + (30-25)²) / 2
        assert!((s.variance - 25.0).abs() < EPS);
    }

    #[test]
    fn empty_and_singleton_are_zero() {
        assert_eq!(summarize(&[]), HeadwayStats::ZERO);
        assert_eq!(HeadwayStats::of(&Schedule::empty()), HeadwayStats::ZERO);
        assert_eq!(HeadwayStats::of(&schedule(vec![trip(1, "08:00")])), HeadwayStats::ZERO);
        assert!(compute_headways(&schedule(vec![trip(1, "08:00")])).is_empty());
    }

    #[test]
    fn constant_headways_have_zero_variance() {
        let s = summarize(&[15, 15, 15, 15]);
        assert!((s.average - 15.0).abs() < EPS);
        assert_eq!(s.variance, 0.0);
    }
}

// ── Efficiency score ──────────────────────────────────────────────────────────

#[cfg(test)]
mod efficiency {
    use crate::{HeadwayStats, efficiency_score};

    fn stats(average: f64, variance: f64) -> HeadwayStats {
        HeadwayStats { average, min: 0, max: 0, variance }
    }

    #[test]
    fn perfect_schedule_scores_100() {
        assert_eq!(efficiency_score(&stats(15.0, 0.0), 15.0), 100.0);
    }

    #[test]
    fn drift_and_variance_penalised() {
        // 100 - 10*2 = 80, penalty 12.5
        assert!((efficiency_score(&stats(25.0, 25.0), 15.0) - 67.5).abs() < 1e-9);
    }

    #[test]
    fn variance_penalty_capped_at_50() {
        assert_eq!(efficiency_score(&stats(15.0, 10_000.0), 15.0), 50.0);
    }

    #[test]
    fn score_never_negative() {
        assert_eq!(efficiency_score(&stats(120.0, 500.0), 15.0), 0.0);
        assert_eq!(efficiency_score(&HeadwayStats::ZERO, 15.0), 70.0);
    }

    #[test]
    fn target_is_a_parameter() {
        assert_eq!(efficiency_score(&stats(10.0, 0.0), 10.0), 100.0);
        assert_eq!(efficiency_score(&stats(10.0, 0.0), 15.0), 90.0);
    }
}

// ── Headway selector ──────────────────────────────────────────────────────────

#[cfg(test)]
mod selector {
    use super::*;
    use crate::{HeadwayRule, demand_headway, resolve_headway, select_headway};

    #[test]
    fn demand_tiers() {
        assert_eq!(demand_headway(31.0), 8);
        assert_eq!(demand_headway(30.0), 12);
        assert_eq!(demand_headway(21.0), 12);
        assert_eq!(demand_headway(20.0), 15);
        assert_eq!(demand_headway(10.5), 15);
        assert_eq!(demand_headway(10.0), 20);
        assert_eq!(demand_headway(0.0), 20);
    }

    #[test]
    fn selection_is_clamped_for_extreme_demand() {
        let c = Constraints::new(10, 18);
        for d in [0.0, 5.0, 15.0, 25.0, 35.0, 10_000.0] {
            let h = select_headway(d, &c);
            assert!((10..=18).contains(&h), "demand {d} gave {h}");
        }
        assert_eq!(select_headway(10_000.0, &c), 10);
        assert_eq!(select_headway(0.0, &c), 18);
    }

    #[test]
    fn forecast_beats_explicit_target() {
        let s = schedule(bunched());
        let f = demand(45.0);
        let r = resolve_headway(Some(&s), &constraints_5_30_15(), Some(&f), &OptimizerConfig::default());
        assert_eq!(r.minutes, 8);
        assert!(matches!(r.rule, HeadwayRule::Demand { average_demand } if (average_demand - 45.0).abs() < EPS));
    }

    #[test]
    fn explicit_target_is_clamped() {
        let c = Constraints::new(5, 12).with_target(20);
        let r = resolve_headway(None, &c, None, &OptimizerConfig::default());
        assert_eq!(r.minutes, 12);
        assert_eq!(r.rule, HeadwayRule::ExplicitTarget);
    }

    #[test]
    fn empty_forecast_counts_as_none() {
        let r = resolve_headway(None, &constraints_5_30_15(), Some(&[]), &OptimizerConfig::default());
        assert_eq!(r.rule, HeadwayRule::ExplicitTarget);
        assert_eq!(r.minutes, 15);
    }

    #[test]
    fn falls_back_to_existing_gap() {
        let s = schedule(bunched());
        let r = resolve_headway(Some(&s), &Constraints::new(5, 30), None, &OptimizerConfig::default());
        assert_eq!(r.minutes, 20);
        assert_eq!(r.rule, HeadwayRule::ExistingGap);
    }

    #[test]
    fn existing_gap_of_zero_is_clamped_to_min() {
        let s = schedule(vec![trip(1, "06:00"), trip(2, "06:00")]);
        let r = resolve_headway(Some(&s), &Constraints::new(5, 30), None, &OptimizerConfig::default());
        assert_eq!(r.minutes, 5);
    }

    #[test]
    fn falls_back_to_default() {
        let s = schedule(vec![trip(1, "06:00")]);
        let cfg = OptimizerConfig { default_headway: 40, ..OptimizerConfig::default() };
        let r = resolve_headway(Some(&s), &Constraints::new(5, 30), None, &cfg);
        assert_eq!(r.minutes, 30);
        assert_eq!(r.rule, HeadwayRule::Default);
    }
}

// ── Rescheduler ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod reschedule {
    use hw_core::ServiceWindow;

    use super::*;
    use crate::{fill_window, reschedule};

    fn irregular() -> Schedule {
        schedule(vec![
            trip(7, "05:58"),
            trip(3, "06:01"),
            trip(9, "06:02"),
            trip(1, "06:40"),
            trip(4, "07:30"),
        ])
    }

    #[test]
    fn empty_stays_empty() {
        assert!(reschedule(&Schedule::empty(), 15, 90).is_empty());
    }

    #[test]
    fn single_trip_keeps_start() {
        let out = reschedule(&schedule(vec![trip(1, "08:10")]), 15, 60);
        assert_eq!(out.len(), 1);
        assert_eq!(out.trips()[0].start(), at("08:10"));
        assert_eq!(out.trips()[0].end(), at("09:10"));
    }

    #[test]
    fn anchor_order_and_spacing_invariants() {
        let input = irregular();
        let out = reschedule(&input, 12, 90);

        assert_eq!(out.len(), input.len());
        assert_eq!(out.trips()[0].start(), input.trips()[0].start());
        for (o, i) in out.iter().zip(input.iter()) {
            assert_eq!(o.bus_id(), i.bus_id());
            assert_eq!(o.route_id(), i.route_id());
            assert_eq!(o.end() - o.start(), 90);
        }
        for w in out.trips().windows(2) {
            assert_eq!(w[1].start() - w[0].start(), 12);
        }
    }

    #[test]
    fn spacing_cascades_from_previous_output() {
        // Trip 2 originally at 06:02 lands at 05:58 + 2*15 = 06:28, not 06:01 + 15.
        let out = reschedule(&irregular(), 15, 90);
        assert_eq!(out.trips()[2].start(), at("06:28"));
    }

    #[test]
    fn oversized_headway_saturates_in_order() {
        let out = reschedule(&schedule(bunched()), u32::MAX, 90);
        assert_eq!(out.trips()[0].start(), at("06:00"));
        assert_eq!(out.trips()[1].start(), ClockTime(i32::MAX));
        assert!(out.trips().is_sorted_by_key(|t| t.start()));
        assert!(Schedule::new(out.trips().to_vec()).is_ok());
    }

    #[test]
    fn window_trip_count_is_floored() {
        let window = ServiceWindow::new(at("06:00"), at("07:00"));
        let out = fill_window(RouteId(4), &window, 25, &Constraints::new(5, 30), 90);
        let starts: Vec<ClockTime> = out.iter().map(Trip::start).collect();
        assert_eq!(starts, vec![at("06:00"), at("06:25")]);
        assert!(out.iter().all(|t| t.bus_id() == BusId::INVALID && t.route_id() == RouteId(4)));
    }

    #[test]
    fn window_end_exclusive() {
        let window = ServiceWindow::new(at("06:00"), at("07:00"));
        let out = fill_window(RouteId(1), &window, 15, &Constraints::new(5, 30), 90);
        assert_eq!(out.len(), 4);
        assert_eq!(out.trips()[3].start(), at("06:45"));
    }

    #[test]
    fn window_headway_is_clamped() {
        let window = ServiceWindow::new(at("06:00"), at("07:00"));
        let out = fill_window(RouteId(1), &window, 2, &Constraints::new(10, 30), 90);
        assert_eq!(out.len(), 6);
        assert_eq!(out.trips()[1].start() - out.trips()[0].start(), 10);
    }
}

// ── Analyzer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod analyze {
    use super::*;
    use crate::{AdjustmentKind, OptimizationReason, analyze, reschedule};

    #[test]
    fn identical_schedules_yield_sentinel() {
        let s = schedule(bunched());
        let r = analyze(&s, s.clone(), &OptimizerConfig::default());
        assert_eq!(r.reasons, vec![OptimizationReason::NoSignificantChange]);
        assert_eq!(r.metrics.schedules_adjusted, 0);
        assert_eq!(r.metrics.average_adjustment_minutes, 0.0);
        assert_eq!(r.metrics.improvement_minutes, 0.0);
        assert!(r.headway.is_none());
    }

    #[test]
    fn reasons_in_priority_order() {
        let before = schedule(bunched());
        let after = reschedule(&before, 15, 90);
        let r = analyze(&before, after, &OptimizerConfig::default());

        assert_eq!(r.reasons.len(), 4);
        assert_eq!(r.reasons[0], OptimizationReason::VarianceReduced);
        assert_eq!(r.reasons[1], OptimizationReason::HeadwayTightened(10.0));
        assert_eq!(r.reasons[2], OptimizationReason::EfficiencyImproved(32.5));
        assert_eq!(r.reasons[3], OptimizationReason::TripsAdjusted { adjusted: 2, total: 3 });

        let text = r.reason_strings();
        assert_eq!(text[0], "Reduced schedule variance to prevent bus bunching");
        assert_eq!(text[2], "Improved overall efficiency by 32.5 points");
        assert_eq!(text[3], "Adjusted 2 out of 3 trips for optimal spacing");
    }

    #[test]
    fn widening_headway_is_reported_as_frequency_decrease() {
        let before = schedule(vec![trip(1, "06:00"), trip(2, "06:10"), trip(3, "06:20")]);
        let after = reschedule(&before, 20, 90);
        let r = analyze(&before, after, &OptimizerConfig::default());

        assert!(r.metrics.improvement_minutes < 0.0);
        assert!(r.reasons.contains(&OptimizationReason::HeadwayWidened(10.0)));
        assert!(!r.reasons.contains(&OptimizationReason::VarianceReduced));
    }

    #[test]
    fn metrics_of_bunched_example() {
        let before = schedule(bunched());
        let after = reschedule(&before, 15, 90);
        let r = analyze(&before, after, &OptimizerConfig::default());

        assert!((r.metrics.improvement_minutes - 10.0).abs() < EPS);
        // (100 - 67.5) / 67.5 * 100
        assert!((r.metrics.efficiency_improvement_pct - 48.148_148_148).abs() < 1e-6);
        assert_eq!(r.metrics.total_trips, 3);
        assert_eq!(r.metrics.schedules_adjusted, 2);
        // |0| + |-5| + |-20| over 3
        assert!((r.metrics.average_adjustment_minutes - 25.0 / 3.0).abs() < EPS);
    }

    #[test]
    fn zero_efficiency_before_reports_zero_pct() {
        // Average headway 90 → drift alone floors the score at 0.
        let before = schedule(vec![trip(1, "06:00"), trip(2, "07:30")]);
        let after = reschedule(&before, 15, 90);
        let r = analyze(&before, after, &OptimizerConfig::default());
        assert_eq!(r.efficiency_before, 0.0);
        assert_eq!(r.metrics.efficiency_improvement_pct, 0.0);
        assert!(r.efficiency_after > 0.0);
    }

    #[test]
    fn per_trip_adjustments_classified() {
        let before = schedule(bunched());
        let after = reschedule(&before, 15, 90);
        let r = analyze(&before, after, &OptimizerConfig::default());

        let kinds: Vec<AdjustmentKind> = r.adjustments.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![AdjustmentKind::Minor, AdjustmentKind::Minor, AdjustmentKind::Advanced(20)]
        );
        assert_eq!(r.adjustments[1].delta_minutes, -5);
        assert_eq!(r.adjustments[2].original_start, at("06:50"));
        assert_eq!(r.adjustments[2].new_start, at("06:30"));
        assert_eq!(
            r.adjustments[2].kind.to_string(),
            "Advanced by 20 minutes to reduce bunching"
        );
    }

    #[test]
    fn classify_threshold_is_exclusive() {
        assert_eq!(AdjustmentKind::classify(5, 5), AdjustmentKind::Minor);
        assert_eq!(AdjustmentKind::classify(6, 5), AdjustmentKind::Delayed(6));
        assert_eq!(AdjustmentKind::classify(-6, 5), AdjustmentKind::Advanced(6));
        assert_eq!(
            AdjustmentKind::Delayed(12).to_string(),
            "Delayed by 12 minutes to improve headway"
        );
    }

    #[test]
    fn empty_schedules_analyze_cleanly() {
        let r = analyze(&Schedule::empty(), Schedule::empty(), &OptimizerConfig::default());
        assert_eq!(r.metrics.average_adjustment_minutes, 0.0);
        assert_eq!(r.reasons, vec![OptimizationReason::NoSignificantChange]);
    }
}

// ── Optimizer entry points ────────────────────────────────────────────────────

#[cfg(test)]
mod optimizer {
    use hw_core::{ServiceWindow, ValidationError};

    use super::*;
    use crate::{
        FrequencyComparison, HeadwayRule, OptimizationReason, generate_fresh_schedule,
        optimize_schedule,
    };

    #[test]
    fn end_to_end_bunched_example() {
        let r = optimize_schedule(&bunched(), &constraints_5_30_15(), None, &OptimizerConfig::default())
            .unwrap();

        let got: Vec<(String, String)> =
            r.schedule.iter().map(|t| (t.start().hhmm(), t.end().hhmm())).collect();
        assert_eq!(
            got,
            vec![
                ("06:00".to_owned(), "07:30".to_owned()),
                ("06:15".to_owned(), "07:45".to_owned()),
                ("06:30".to_owned(), "08:00".to_owned()),
            ]
        );
        assert!((r.stats_before.average - 25.0).abs() < EPS);
        assert!((r.stats_after.average - 15.0).abs() < EPS);
        assert!(r.efficiency_after > r.efficiency_before);
        assert_eq!(r.headway.unwrap().minutes, 15);
        assert_eq!(r.headway.unwrap().rule, HeadwayRule::ExplicitTarget);
    }

    #[test]
    fn reoptimizing_a_perfect_schedule_is_idempotent() {
        let perfect = vec![trip(1, "06:00"), trip(2, "06:15"), trip(3, "06:30"), trip(4, "06:45")];
        let r = optimize_schedule(&perfect, &constraints_5_30_15(), None, &OptimizerConfig::default())
            .unwrap();

        for (o, i) in r.schedule.iter().zip(&perfect) {
            assert_eq!(o.start(), i.start());
            assert_eq!(o.end(), i.end());
        }
        assert_eq!(r.reasons, vec![OptimizationReason::NoSignificantChange]);

        let again = optimize_schedule(r.schedule.trips(), &constraints_5_30_15(), None, &OptimizerConfig::default())
            .unwrap();
        assert_eq!(again.schedule, r.schedule);
    }

    #[test]
    fn unsorted_input_is_rejected() {
        let trips = vec![trip(1, "07:00"), trip(2, "06:00")];
        let err = optimize_schedule(&trips, &constraints_5_30_15(), None, &OptimizerConfig::default())
            .unwrap_err();
        assert!(matches!(err, ValidationError::UnsortedSchedule { index: 1, .. }));
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let err = optimize_schedule(&bunched(), &Constraints::new(30, 5), None, &OptimizerConfig::default())
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidHeadwayBounds { min: 30, max: 5 });
    }

    #[test]
    fn headway_bounds_beyond_one_day_are_rejected() {
        let huge = Constraints::new(5, u32::MAX).with_target(3_000_000_000);
        let err = optimize_schedule(&bunched(), &huge, None, &OptimizerConfig::default()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidHeadwayBounds { min: 5, max: u32::MAX });

        let window = ServiceWindow::new(at("06:00"), at("08:00"));
        let err = generate_fresh_schedule(RouteId(1), &window, &huge, None, &OptimizerConfig::default())
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidHeadwayBounds { .. }));
    }

    #[test]
    fn trip_duration_beyond_one_day_is_rejected() {
        let cfg = OptimizerConfig { trip_duration_min: u32::MAX, ..OptimizerConfig::default() };
        let err = optimize_schedule(&bunched(), &constraints_5_30_15(), None, &cfg).unwrap_err();
        assert_eq!(err, ValidationError::InvalidTripDuration { minutes: u32::MAX });
    }

    #[test]
    fn invalid_forecast_is_rejected() {
        let bad = [DemandSample { hour: 30, predicted_passengers: 10.0 }];
        let err = optimize_schedule(&bunched(), &constraints_5_30_15(), Some(&bad), &OptimizerConfig::default())
            .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDemand { hour: 30, .. }));
    }

    #[test]
    fn high_demand_tightens_spacing() {
        let f = demand(40.0);
        let r = optimize_schedule(&bunched(), &constraints_5_30_15(), Some(&f), &OptimizerConfig::default())
            .unwrap();
        let starts: Vec<ClockTime> = r.schedule.iter().map(Trip::start).collect();
        assert_eq!(starts, vec![at("06:00"), at("06:08"), at("06:16")]);
    }

    #[test]
    fn empty_and_single_trip_inputs_succeed() {
        let cfg = OptimizerConfig::default();
        let r = optimize_schedule(&[], &constraints_5_30_15(), None, &cfg).unwrap();
        assert!(r.schedule.is_empty());

        let r = optimize_schedule(&[trip(1, "09:00")], &constraints_5_30_15(), None, &cfg).unwrap();
        assert_eq!(r.schedule.trips()[0].start(), at("09:00"));
        assert_eq!(r.stats_after, r.stats_before);
    }

    #[test]
    fn trip_duration_comes_from_config() {
        let cfg = OptimizerConfig { trip_duration_min: 45, ..OptimizerConfig::default() };
        let r = optimize_schedule(&bunched(), &constraints_5_30_15(), None, &cfg).unwrap();
        assert!(r.schedule.iter().all(|t| t.end() - t.start() == 45));
    }

    #[test]
    fn fresh_schedule_from_demand() {
        let window = ServiceWindow::new(at("06:00"), at("08:00"));
        let f = demand(25.0);
        let fresh = generate_fresh_schedule(
            RouteId(2),
            &window,
            &Constraints::new(5, 30),
            Some(&f),
            &OptimizerConfig::default(),
        )
        .unwrap();

        assert_eq!(fresh.headway.minutes, 12);
        assert_eq!(fresh.total_trips(), 10);
        assert_eq!(fresh.trip_times()[1], at("06:12"));
        assert_eq!(fresh.reason(), "Optimized for 12-minute headway based on demand");
    }

    #[test]
    fn fresh_schedule_without_forecast_uses_target_then_default() {
        let window = ServiceWindow::new(at("06:00"), at("07:00"));
        let cfg = OptimizerConfig::default();

        let with_target =
            generate_fresh_schedule(RouteId(1), &window, &Constraints::new(5, 30).with_target(20), None, &cfg)
                .unwrap();
        assert_eq!(with_target.headway.minutes, 20);
        assert_eq!(with_target.total_trips(), 3);

        let without = generate_fresh_schedule(RouteId(1), &window, &Constraints::new(5, 30), None, &cfg).unwrap();
        assert_eq!(without.headway.rule, HeadwayRule::Default);
        assert_eq!(without.headway.minutes, 15);
    }

    #[test]
    fn fresh_schedule_rejects_empty_window() {
        let window = ServiceWindow::new(at("08:00"), at("08:00"));
        let err = generate_fresh_schedule(
            RouteId(1),
            &window,
            &constraints_5_30_15(),
            None,
            &OptimizerConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::EmptyWindow { .. }));
    }

    #[test]
    fn frequency_comparison() {
        let window = ServiceWindow::new(at("06:00"), at("08:00"));
        let f = demand(40.0);
        let fresh = generate_fresh_schedule(
            RouteId(1),
            &window,
            &Constraints::new(5, 30),
            Some(&f),
            &OptimizerConfig::default(),
        )
        .unwrap();
        assert_eq!(fresh.total_trips(), 15);

        let cmp = FrequencyComparison::between(20, 6, &fresh);
        assert_eq!(cmp.headway_reduction, 12);
        assert_eq!(cmp.additional_trips, 9);
        assert!((cmp.efficiency_gain - 0.6).abs() < EPS);
        assert!((cmp.wait_time_reduction - 6.0).abs() < EPS);

        let worse = FrequencyComparison::between(5, 40, &fresh);
        assert_eq!(worse.headway_reduction, 0);
        assert_eq!(worse.additional_trips, 0);
        assert!(worse.efficiency_gain < 0.0);

        assert_eq!(FrequencyComparison::between(0, 0, &fresh).efficiency_gain, 0.0);
    }
}

// ── Batch ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod batch {
    use hw_core::ValidationError;
    use hw_demand::{NoForecast, StaticForecast};

    use super::*;
    use crate::{group_by_route, optimize_routes};

    fn mixed() -> Vec<Trip> {
        vec![
            route_trip(2, 21, "07:00"),
            route_trip(1, 11, "06:00"),
            route_trip(2, 22, "07:05"),
            route_trip(1, 12, "06:20"),
            route_trip(1, 13, "06:50"),
            route_trip(3, 31, "09:00"),
            route_trip(3, 32, "08:00"),
        ]
    }

    #[test]
    fn grouping_preserves_order_within_route() {
        let groups = group_by_route(&mixed());
        let buses: Vec<u32> = groups[&RouteId(1)].iter().map(|t| t.bus_id().0).collect();
        assert_eq!(buses, vec![11, 12, 13]);
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![RouteId(1), RouteId(2), RouteId(3)]);
    }

    #[test]
    fn unsorted_route_fails_alone() {
        let out = optimize_routes(&mixed(), &constraints_5_30_15(), &NoForecast, &OptimizerConfig::default())
            .unwrap();
        assert_eq!(out.len(), 3);
        assert!(out[0].result.is_ok());
        assert!(out[1].result.is_ok());
        assert_eq!(out[2].route_id, RouteId(3));
        assert!(matches!(out[2].result, Err(ValidationError::UnsortedSchedule { .. })));
    }

    #[test]
    fn each_route_gets_its_own_forecast() {
        let source = StaticForecast::new()
            .with_route(RouteId(1), demand(40.0))
            .with_route(RouteId(2), demand(5.0));
        let trips: Vec<Trip> = mixed().into_iter().filter(|t| t.route_id() != RouteId(3)).collect();

        let out = optimize_routes(&trips, &Constraints::new(5, 30), &source, &OptimizerConfig::default())
            .unwrap();
        let headways: Vec<u32> = out
            .iter()
            .map(|o| o.result.as_ref().unwrap().headway.unwrap().minutes)
            .collect();
        assert_eq!(headways, vec![8, 20]);
    }

    #[test]
    fn invalid_constraints_fail_the_batch() {
        assert!(optimize_routes(&mixed(), &Constraints::new(0, 5), &NoForecast, &OptimizerConfig::default())
            .is_err());
    }

    #[test]
    fn invalid_config_fails_the_batch() {
        let cfg = OptimizerConfig { trip_duration_min: 2_000, ..OptimizerConfig::default() };
        let err = optimize_routes(&mixed(), &constraints_5_30_15(), &NoForecast, &cfg).unwrap_err();
        assert_eq!(err, ValidationError::InvalidTripDuration { minutes: 2_000 });
    }
}

// ── Cache ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod cache {
    use std::sync::Arc;

    use super::*;
    use crate::{CacheKey, ResultCache};

    #[test]
    fn second_lookup_hits() {
        let cache = ResultCache::new();
        let cfg = OptimizerConfig::default();
        let a = cache.get_or_optimize(&bunched(), &constraints_5_30_15(), None, &cfg).unwrap();
        let b = cache.get_or_optimize(&bunched(), &constraints_5_30_15(), None, &cfg).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn forecast_and_config_change_the_key() {
        let cfg = OptimizerConfig::default();
        let f = demand(40.0);
        let base = CacheKey::for_request(&bunched(), &constraints_5_30_15(), None, &cfg);
        let with_forecast = CacheKey::for_request(&bunched(), &constraints_5_30_15(), Some(&f), &cfg);
        let other_cfg = OptimizerConfig { trip_duration_min: 60, ..cfg.clone() };
        let with_cfg = CacheKey::for_request(&bunched(), &constraints_5_30_15(), None, &other_cfg);

        assert_eq!(base.route_id, RouteId(1));
        assert_ne!(base, with_forecast);
        assert_ne!(base, with_cfg);
    }

    #[test]
    fn errors_are_not_cached() {
        let cache = ResultCache::new();
        let trips = vec![trip(1, "07:00"), trip(2, "06:00")];
        assert!(cache.get_or_optimize(&trips, &constraints_5_30_15(), None, &OptimizerConfig::default()).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn clear_empties_the_cache() {
        let cache = ResultCache::new();
        cache.get_or_optimize(&bunched(), &constraints_5_30_15(), None, &OptimizerConfig::default()).unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }
}

// ── CSV I/O ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_io {
    use std::io::Cursor;

    use hw_core::HwError;
    use tempfile::TempDir;

    use super::*;
    use crate::{load_trips_reader, optimize_schedule, write_results, write_results_csv};

    const TRIPS_CSV: &str = "\
bus_id,route_id,start_time\n\
1,1,06:00\n\
2,1,06:20:00\n\
3,1,06:50\n\
";

    #[test]
    fn load_trips() {
        let trips = load_trips_reader(Cursor::new(TRIPS_CSV), 90).unwrap();
        assert_eq!(trips, bunched());
    }

    #[test]
    fn malformed_time_is_parse_error() {
        let csv = "bus_id,route_id,start_time\n1,1,6h00\n";
        let err = load_trips_reader(Cursor::new(csv), 90).unwrap_err();
        assert!(matches!(err, HwError::Parse(ref m) if m.contains("row 1")), "got {err:?}");
    }

    #[test]
    fn loader_keeps_file_order() {
        let csv = "bus_id,route_id,start_time\n1,1,07:00\n2,1,06:00\n";
        let trips = load_trips_reader(Cursor::new(csv), 90).unwrap();
        assert_eq!(trips[0].start(), at("07:00"));
    }

    #[test]
    fn export_rows() {
        let r = optimize_schedule(&bunched(), &constraints_5_30_15(), None, &OptimizerConfig::default())
            .unwrap();
        let mut buf = Vec::new();
        write_results(&mut buf, [&r]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "bus_id,route_id,start_time,end_time,original_start_time,time_adjustment_minutes,adjustment_reason"
        );
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[3], "3,1,06:30,08:00,06:50,-20,Advanced by 20 minutes to reduce bunching");
    }

    #[test]
    fn export_to_file() {
        let dir: TempDir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("optimized.csv");
        let r = optimize_schedule(&bunched(), &constraints_5_30_15(), None, &OptimizerConfig::default())
            .unwrap();
        write_results_csv(&path, [&r]).unwrap();

        let mut rdr = csv::Reader::from_path(&path).unwrap();
        assert_eq!(rdr.records().count(), 3);
    }
}
