use serde::Serialize;

use crate::model::RidingSample;

const HIGH_RAIN_CHANCE_PCT: f64 = 50.0;
const STRONG_WIND_KPH: f64 = 30.0;
const COLD_BELOW_C: f64 = 5.0;
const HOT_ABOVE_C: f64 = 30.0;

/// Which recommendation ladder to evaluate.
///
/// The daily summary additionally treats "violent" as heavy rain and reports
/// "light"/"slight" conditions as moderate. Its "mainly clear" rule is
/// already covered by the shared "clear" check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LadderVariant {
    Daily,
    #[default]
    Hourly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    Dangerous,
    Icy,
    HeavyRain,
    HighRainChance,
    StrongWind,
    VeryCold,
    VeryHot,
    Moderate,
    Perfect,
    GenerallyGood,
}

impl Recommendation {
    pub fn message(&self) -> &'static str {
        match self {
            Recommendation::Dangerous => "⚠️ Dangerous conditions - Avoid riding",
            Recommendation::Icy => "❄️ Icy conditions - Not recommended",
            Recommendation::HeavyRain => "🌧️ Heavy rain - Not recommended",
            Recommendation::HighRainChance => "🌦️ High chance of rain - Consider postponing",
            Recommendation::StrongWind => "💨 Strong winds - Ride with caution",
            Recommendation::VeryCold => "🥶 Very cold - Wear proper gear",
            Recommendation::VeryHot => "🌡️ Very hot - Stay hydrated",
            Recommendation::Moderate => "🟡 Moderate conditions - Ride with care",
            Recommendation::Perfect => "✅ Perfect conditions for riding",
            Recommendation::GenerallyGood => "🟢 Generally good conditions",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Pick the first matching recommendation for a sample.
pub fn recommend<S: RidingSample + ?Sized>(sample: &S, variant: LadderVariant) -> Recommendation {
    let c = sample.condition().to_lowercase();
    let daily = variant == LadderVariant::Daily;

    if c.contains("thunderstorm") {
        return Recommendation::Dangerous;
    }
    if c.contains("snow") || c.contains("freezing") {
        return Recommendation::Icy;
    }
    if c.contains("heavy rain") || (daily && c.contains("violent")) {
        return Recommendation::HeavyRain;
    }
    if sample.precipitation() > HIGH_RAIN_CHANCE_PCT {
        return Recommendation::HighRainChance;
    }
    if sample.wind_speed() > STRONG_WIND_KPH {
        return Recommendation::StrongWind;
    }
    if sample.temperature() < COLD_BELOW_C {
        return Recommendation::VeryCold;
    }
    if sample.temperature() > HOT_ABOVE_C {
        return Recommendation::VeryHot;
    }
    if daily && (c.contains("light") || c.contains("slight")) {
        return Recommendation::Moderate;
    }
    if c.contains("clear") {
        return Recommendation::Perfect;
    }

    Recommendation::GenerallyGood
}
