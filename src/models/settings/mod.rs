// Settings module
// User configuration of the layout pass

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Layout units per five minutes of schedule time
    pub standard_height: i32,
    /// IANA name of the zone absolute start times are read in
    pub time_zone: String,
    /// Column origin in minutes since day start; derived from the lectures when unset
    pub reference_start: Option<i32>,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            standard_height: 34,
            time_zone: "UTC".to_string(),
            reference_start: None,
        }
    }
}

impl LayoutSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.standard_height <= 0 {
            return Err("Standard height must be positive".to_string());
        }

        self.tz()?;

        if let Some(reference_start) = self.reference_start {
            if reference_start < 0 {
                return Err("Reference start cannot be negative".to_string());
            }
        }

        Ok(())
    }

    /// Parsed `time_zone`
    pub fn tz(&self) -> Result<Tz, String> {
        self.time_zone
            .parse::<Tz>()
            .map_err(|_| format!("Unknown time zone '{}'", self.time_zone))
    }

}
