use serde::Serialize;

/// Coarse weather category used for icons.
///
/// Scoring uses its own ladders (see [`crate::score`]); "overcast" and "mist"
/// matter there but not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ConditionCategory {
    Storm,
    Snow,
    Rain,
    Fog,
    Cloud,
    Clear,
    Other,
}

impl ConditionCategory {
    /// First matching substring wins, case-insensitive.
    pub fn classify(condition: &str) -> Self {
        let c = condition.to_lowercase();

        if c.contains("thunderstorm") {
            ConditionCategory::Storm
        } else if c.contains("snow") {
            ConditionCategory::Snow
        } else if c.contains("rain") || c.contains("drizzle") {
            ConditionCategory::Rain
        } else if c.contains("fog") {
            ConditionCategory::Fog
        } else if c.contains("cloud") {
            ConditionCategory::Cloud
        } else if c.contains("clear") {
            ConditionCategory::Clear
        } else {
            ConditionCategory::Other
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            ConditionCategory::Storm => "⛈️",
            ConditionCategory::Snow => "🌨️",
            ConditionCategory::Rain => "🌧️",
            ConditionCategory::Fog => "🌫️",
            ConditionCategory::Cloud => "☁️",
            ConditionCategory::Clear => "☀️",
            ConditionCategory::Other => "🌤️",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConditionCategory::Storm => "storm",
            ConditionCategory::Snow => "snow",
            ConditionCategory::Rain => "rain",
            ConditionCategory::Fog => "fog",
            ConditionCategory::Cloud => "cloud",
            ConditionCategory::Clear => "clear",
            ConditionCategory::Other => "partly",
        }
    }
}

impl std::fmt::Display for ConditionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_order_first_match_wins() {
        assert_eq!(
            ConditionCategory::classify("Patchy light snow with thunder"),
            ConditionCategory::Snow
        );
        assert_eq!(
            ConditionCategory::classify("Moderate or heavy rain with thunderstorm"),
            ConditionCategory::Storm
        );
        assert_eq!(ConditionCategory::classify("Light sleet and snow"), ConditionCategory::Snow);
        assert_eq!(ConditionCategory::classify("Freezing fog"), ConditionCategory::Fog);
        assert_eq!(ConditionCategory::classify("Cloudy with rain"), ConditionCategory::Rain);
    }

    #[test]
    fn classification_is_case_insensitive() {
        assert_eq!(ConditionCategory::classify("PATCHY LIGHT DRIZZLE"), ConditionCategory::Rain);
        assert_eq!(ConditionCategory::classify("Partly Cloudy"), ConditionCategory::Cloud);
        assert_eq!(ConditionCategory::classify("Clear"), ConditionCategory::Clear);
    }

    #[test]
    fn unmatched_falls_back_to_partly() {
        let cat = ConditionCategory::classify("Sunny");
        assert_eq!(cat, ConditionCategory::Other);
        assert_eq!(cat.icon(), "🌤️");

        // mist and overcast only matter for scoring
        assert_eq!(ConditionCategory::classify("Mist"), ConditionCategory::Other);
        assert_eq!(ConditionCategory::classify("Overcast"), ConditionCategory::Other);
        assert_eq!(ConditionCategory::classify(""), ConditionCategory::Other);
    }

    #[test]
    fn icons() {
        assert_eq!(ConditionCategory::Storm.icon(), "⛈️");
        assert_eq!(ConditionCategory::Clear.icon(), "☀️");
        assert_eq!(ConditionCategory::Fog.icon(), "🌫️");
    }
}
