//! Property tests for entity validation and goal progress.

use proptest::prelude::*;

use crate::domain::area_of_focus::AreaOfFocus;
use crate::domain::foundation::{
    rules, AreaOfFocusId, MetricGoalId, PillarId, SeasonAreaMetricId, SeasonId, UserId,
};
use crate::domain::goal::{GoalValues, MetricGoal};
use crate::domain::metric::Unit;
use crate::domain::season::Season;

fn valid_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,98}[A-Za-z0-9]".prop_filter("not reserved", |s| {
        !rules::RESERVED_NAMES.contains(&s.trim().to_lowercase().as_str())
    })
}

proptest! {
    #[test]
    fn valid_names_always_construct(name in valid_name(), weeks in 1i32..=52) {
        let season = Season::new(SeasonId::new(), UserId::new(), name.clone(), Some(weeks)).unwrap();
        prop_assert_eq!(season.name(), name.as_str());
        prop_assert_eq!(season.duration_weeks(), Some(weeks));

        let area = AreaOfFocus::predefined(AreaOfFocusId::new(), PillarId::new(), name.clone(), None).unwrap();
        prop_assert_eq!(area.name(), name.as_str());
    }

    #[test]
    fn overlong_names_never_construct(extra in 1usize..50) {
        let name = "a".repeat(rules::MAX_NAME_LENGTH + extra);
        prop_assert!(Season::new(SeasonId::new(), UserId::new(), name, None).is_err());
    }

    #[test]
    fn reserved_names_never_construct(idx in 0usize..3, upper in any::<bool>()) {
        let base = rules::RESERVED_NAMES[idx];
        let name = if upper { base.to_uppercase() } else { base.to_string() };
        let err = Season::new(SeasonId::new(), UserId::new(), name, None).unwrap_err();
        prop_assert_eq!(err.details.get("field").map(String::as_str), Some("name"));
    }

    #[test]
    fn out_of_range_durations_never_construct(weeks in prop_oneof![i32::MIN..1, 53i32..i32::MAX]) {
        prop_assert!(Season::new(SeasonId::new(), UserId::new(), "Cut", Some(weeks)).is_err());
    }

    #[test]
    fn progress_is_always_a_fraction(
        start in proptest::option::of(-1000.0f64..1000.0),
        goal in -1000.0f64..1000.0,
        current in -5000.0f64..5000.0,
    ) {
        let mut values = GoalValues::new(goal, Unit::Count);
        if let Some(s) = start {
            values = values.with_start(s, Unit::Count);
        }
        let metric_goal = MetricGoal::new(MetricGoalId::new(), SeasonAreaMetricId::new(), values).unwrap();
        let progress = metric_goal.calculate_progress(current);
        prop_assert!((0.0..=1.0).contains(&progress), "progress {}", progress);
    }
}
