//! View state for the map + calculator page.
//!
//! `Dashboard` owns the household profile and the selected region. Every
//! mutation recomputes the usage estimate and the active tip list, so
//! readers always see values consistent with the current inputs.

use crate::region::{tips_for, Region, RegionCatalogue};
use crate::usage::{Habit, HouseholdProfile, UsageEstimate};
use log::debug;

#[derive(Debug, Clone)]
pub struct Dashboard<'a> {
    catalogue: &'a RegionCatalogue,
    selected: Option<usize>,
    profile: HouseholdProfile,
    estimate: UsageEstimate,
    tips: &'static [&'static str],
}

impl<'a> Dashboard<'a> {
    /// Start with the default profile and no region selected.
    pub fn new(catalogue: &'a RegionCatalogue) -> Self {
        Dashboard::with_profile(catalogue, HouseholdProfile::default())
    }

    pub fn with_profile(catalogue: &'a RegionCatalogue, profile: HouseholdProfile) -> Self {
        Self {
            catalogue,
            selected: None,
            estimate: profile.estimate(),
            tips: tips_for(None),
            profile,
        }
    }

    fn recompute(&mut self) {
        self.estimate = self.profile.estimate();
        self.tips = tips_for(self.selected_region());
        debug!(
            "recomputed estimate: {} L/day, {}% of national average",
            self.estimate.total_liters, self.estimate.national_average_percent
        );
    }

    /// Select a region by id. Unknown ids leave the selection unchanged.
    pub fn select_region(&mut self, id: &str) -> bool {
        match self.catalogue.position(id) {
            Some(idx) => {
                debug!("selected region {}", self.catalogue.regions()[idx].id);
                self.selected = Some(idx);
                self.recompute();
                true
            }
            None => {
                debug!("ignoring selection of unknown region {}", id);
                false
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.recompute();
    }

    pub fn selected_region(&self) -> Option<&'a Region> {
        let catalogue: &'a RegionCatalogue = self.catalogue;
        self.selected.map(|idx| &catalogue.regions()[idx])
    }

    pub fn profile(&self) -> &HouseholdProfile {
        &self.profile
    }

    pub fn set_family_size(&mut self, family_size: u32) {
        self.profile.set_family_size(family_size);
        self.recompute();
    }

    pub fn increment_family(&mut self) {
        let next = self.profile.family_size().saturating_add(1);
        self.set_family_size(next);
    }

    /// Remove one person; stops at one.
    pub fn decrement_family(&mut self) {
        let next = self.profile.family_size().saturating_sub(1);
        self.set_family_size(next);
    }

    pub fn set_habit(&mut self, habit: Habit, value: f64) {
        self.profile.set_habit(habit, value);
        self.recompute();
    }

    /// Update a habit from a text field. Malformed input counts as zero.
    pub fn set_habit_input(&mut self, habit: Habit, raw: &str) {
        self.profile.set_habit_input(habit, raw);
        self.recompute();
    }

    pub fn estimate(&self) -> &UsageEstimate {
        &self.estimate
    }

    /// Conservation tips for the selected region's stress level.
    pub fn tips(&self) -> &'static [&'static str] {
        self.tips
    }
}
