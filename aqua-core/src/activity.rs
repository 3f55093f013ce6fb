use serde::Serialize;

/// How an activity's consumption rate is measured.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "unit", content = "liters", rename_all = "snake_case")]
pub enum Rate {
    PerMinute(f64),
    PerUse(f64),
    PerLoad(f64),
    PerPerson(f64),
}

impl Rate {
    /// Liters per unit, whatever the unit is.
    pub fn liters(&self) -> f64 {
        match *self {
            Rate::PerMinute(l) | Rate::PerUse(l) | Rate::PerLoad(l) | Rate::PerPerson(l) => l,
        }
    }
}

/// A household activity that consumes water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Shower,
    Bath,
    Toilet,
    Teeth,
    Dishwasher,
    HandDishwashing,
    Laundry,
    Drinking,
    Garden,
}

impl Activity {
    pub const ALL: [Activity; 9] = [
        Activity::Shower,
        Activity::Bath,
        Activity::Toilet,
        Activity::Teeth,
        Activity::Dishwasher,
        Activity::HandDishwashing,
        Activity::Laundry,
        Activity::Drinking,
        Activity::Garden,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Activity::Shower => "shower",
            Activity::Bath => "bath",
            Activity::Toilet => "toilet",
            Activity::Teeth => "teeth",
            Activity::Dishwasher => "dishwasher",
            Activity::HandDishwashing => "handwash",
            Activity::Laundry => "laundry",
            Activity::Drinking => "drinking",
            Activity::Garden => "garden",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Activity::Shower => "Shower",
            Activity::Bath => "Bath",
            Activity::Toilet => "Toilet Flush",
            Activity::Teeth => "Brushing Teeth",
            Activity::Dishwasher => "Dishwasher",
            Activity::HandDishwashing => "Hand Washing Dishes",
            Activity::Laundry => "Laundry",
            Activity::Drinking => "Drinking & Cooking",
            Activity::Garden => "Garden/Plants",
        }
    }

    pub fn rate(&self) -> Rate {
        match self {
            Activity::Shower => Rate::PerMinute(15.0),
            Activity::Bath => Rate::PerUse(80.0),
            Activity::Toilet => Rate::PerUse(6.0),
            Activity::Teeth => Rate::PerMinute(6.0),
            Activity::Dishwasher => Rate::PerLoad(15.0),
            Activity::HandDishwashing => Rate::PerMinute(8.0),
            Activity::Laundry => Rate::PerLoad(70.0),
            Activity::Drinking => Rate::PerPerson(5.0),
            Activity::Garden => Rate::PerMinute(12.0),
        }
    }

    /// Whether the activity is done by each household member individually.
    ///
    /// Appliance loads, dishwashing and gardening are shared by the household.
    pub fn scales_with_family(&self) -> bool {
        matches!(
            self,
            Activity::Shower
                | Activity::Bath
                | Activity::Toilet
                | Activity::Teeth
                | Activity::Drinking
        )
    }
}
