//! System seed data: the five pillars plus predefined areas and metrics.
//!
//! Ids are fixed so the in-memory store and `migrations/` agree.

use uuid::Uuid;

use crate::domain::area_of_focus::AreaOfFocus;
use crate::domain::foundation::{AreaOfFocusId, DomainError, MetricId, PillarId, SortOrder};
use crate::domain::metric::{DataType, Metric, MetricDefinition, Unit, UnitType};
use crate::domain::pillar::{Pillar, PillarName};

/// Fixed id of a system pillar.
pub fn pillar_id(name: PillarName) -> PillarId {
    let n: u128 = match name {
        PillarName::HealthAndFitness => 1,
        PillarName::Wealth => 2,
        PillarName::Family => 3,
        PillarName::HeadGame => 4,
        PillarName::Career => 5,
    };
    PillarId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0001_0000_0000 | n))
}

fn area_id(n: u128) -> AreaOfFocusId {
    AreaOfFocusId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0002_0000_0000 | n))
}

fn metric_id(n: u128) -> MetricId {
    MetricId::from_uuid(Uuid::from_u128(0x0000_0000_0000_4000_8000_0003_0000_0000 | n))
}

fn pillar_description(name: PillarName) -> &'static str {
    match name {
        PillarName::HealthAndFitness => "Training, nutrition, sleep and recovery",
        PillarName::Wealth => "Income, savings and investing",
        PillarName::Family => "Partner, children and close relationships",
        PillarName::HeadGame => "Mindset, focus and mental health",
        PillarName::Career => "Skills, work and professional growth",
    }
}

/// The five system pillars with sort orders 0-4.
pub fn system_pillars() -> Result<Vec<Pillar>, DomainError> {
    PillarName::ALL
        .iter()
        .enumerate()
        .map(|(position, name)| {
            let sort_order = SortOrder::try_new(position as i32)?;
            Pillar::new(
                pillar_id(*name),
                *name,
                name.label(),
                Some(pillar_description(*name).to_string()),
                sort_order,
            )
        })
        .collect()
}

/// Predefined areas of focus under Health & Fitness.
pub fn predefined_areas() -> Result<Vec<AreaOfFocus>, DomainError> {
    let health = pillar_id(PillarName::HealthAndFitness);
    [
        (1, "Strength", "Lift heavier and build muscle"),
        (2, "Cardio", "Endurance and heart health"),
        (3, "Body Composition", "Weight and body fat"),
        (4, "Nutrition", "What and how much you eat"),
        (5, "Sleep", "Sleep duration and quality"),
    ]
    .into_iter()
    .map(|(n, name, description)| {
        AreaOfFocus::predefined(area_id(n), health, name, Some(description.to_string()))
    })
    .collect()
}

/// Predefined and app-calculated metrics.
pub fn predefined_metrics() -> Result<Vec<Metric>, DomainError> {
    let definitions = [
        (
            1,
            MetricDefinition::new("Body Weight", UnitType::Weight, Unit::Kg)
                .with_alternative_units([Unit::Lbs]),
        ),
        (
            2,
            MetricDefinition::new("Body Fat", UnitType::Percentage, Unit::PercentValue),
        ),
        (
            3,
            MetricDefinition::new("Bench Press 1RM", UnitType::Weight, Unit::Kg)
                .with_alternative_units([Unit::Lbs]),
        ),
        (
            4,
            MetricDefinition::new("Run Distance", UnitType::Distance, Unit::Km)
                .with_alternative_units([Unit::Miles, Unit::Meters]),
        ),
        (
            5,
            MetricDefinition::new("Sleep Duration", UnitType::Time, Unit::Hours)
                .with_alternative_units([Unit::Minutes]),
        ),
        (
            6,
            MetricDefinition::new("Waist", UnitType::Distance, Unit::Cm)
                .with_alternative_units([Unit::Inches]),
        ),
    ];

    let mut metrics = definitions
        .into_iter()
        .map(|(n, definition)| Metric::predefined(metric_id(n), definition))
        .collect::<Result<Vec<_>, _>>()?;

    metrics.push(Metric::app_calculated(
        metric_id(7),
        MetricDefinition::new("Weekly Workouts", UnitType::Reps, Unit::Count)
            .with_data_type(DataType::Integer),
        "count of completed workouts in the trailing 7 days",
    )?);

    Ok(metrics)
}
