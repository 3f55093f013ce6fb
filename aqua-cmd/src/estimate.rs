//! Household water-usage estimate command.

use aqua_core::dashboard::Dashboard;
use aqua_core::region::{Region, RegionCatalogue};
use aqua_core::usage::{
    Habit, HouseholdProfile, UsageEstimate, NATIONAL_AVERAGE_DAILY_PER_PERSON,
};
use aqua_utils::input::split_assignment;
use log::{info, warn};
use serde::Serialize;
use std::io::Write;

/// Inputs gathered from the command line.
#[derive(Debug, Default, Clone)]
pub struct EstimateRequest {
    pub profile_path: Option<String>,
    pub family_size: Option<u32>,
    pub region: Option<String>,
    /// `HABIT=VALUE` pairs applied after the profile file
    pub overrides: Vec<String>,
}

#[derive(Debug, Serialize)]
struct EstimateReport<'a> {
    region: Option<&'a Region>,
    profile: &'a HouseholdProfile,
    estimate: &'a UsageEstimate,
    tips: &'static [&'static str],
}

/// Build the household profile: file, then family size, then overrides.
pub fn build_profile(request: &EstimateRequest) -> anyhow::Result<HouseholdProfile> {
    let mut profile = match &request.profile_path {
        Some(path) => {
            let contents = std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("Failed to read profile {}: {}", path, e))?;
            info!("Loaded household profile from {}", path);
            HouseholdProfile::from_json(&contents)
                .map_err(|e| anyhow::anyhow!("Failed to parse profile {}: {}", path, e))?
        }
        None => HouseholdProfile::default(),
    };

    if let Some(size) = request.family_size {
        profile.set_family_size(size);
    }

    for pair in &request.overrides {
        let (name, value) = split_assignment(pair)?;
        let habit: Habit = name.parse()?;
        profile.set_habit_input(habit, value);
    }

    for (habit, value) in profile.habits.out_of_range() {
        warn!(
            "{} ({}) = {} is outside the usual range {}",
            habit.label(),
            habit,
            value,
            habit.range()
        );
    }

    Ok(profile)
}

/// Run the estimator and write the result.
pub fn run_estimate<W: Write>(
    out: &mut W,
    catalogue: &RegionCatalogue,
    request: &EstimateRequest,
    json: bool,
) -> anyhow::Result<()> {
    let profile = build_profile(request)?;
    let mut dashboard = Dashboard::with_profile(catalogue, profile);

    if let Some(id) = &request.region {
        if !dashboard.select_region(id) {
            warn!("Unknown region '{}', showing general tips", id);
        }
    }

    let estimate = dashboard.estimate();
    info!(
        "Estimated {} L/day for a household of {}",
        estimate.total_liters, estimate.family_size
    );

    if json {
        let report = EstimateReport {
            region: dashboard.selected_region(),
            profile: dashboard.profile(),
            estimate,
            tips: dashboard.tips(),
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "Your daily water usage: {} L", estimate.total_liters)?;
    writeln!(out, "Per person: {} L/day", estimate.per_person_liters)?;
    writeln!(
        out,
        "Compared to national average ({} L/person/day): {}%",
        NATIONAL_AVERAGE_DAILY_PER_PERSON, estimate.national_average_percent
    )?;
    writeln!(out, "Breakdown (L/day):")?;
    for usage in &estimate.breakdown {
        writeln!(
            out,
            "  {:<20} {:>8.1}",
            usage.activity.name(),
            usage.liters_per_day
        )?;
    }
    match dashboard.selected_region() {
        Some(region) => writeln!(out, "Water conservation tips for {}:", region.name)?,
        None => writeln!(out, "Water conservation tips:")?,
    }
    for tip in dashboard.tips() {
        writeln!(out, "  - {}", tip)?;
    }
    Ok(())
}
