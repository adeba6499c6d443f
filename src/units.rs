// ============================================================================
// SPEED UNITS
// ============================================================================

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

const INPUT_UNITS: &str = "mps, bft, fps, kph, mph, knots, auto";
const OUTPUT_UNITS: &str = "mps, fps, kph, mph, knots";

/// Wind speed units. `Beaufort` and `Auto` are only accepted as input units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedUnit {
    Mps,
    Kph,
    Mph,
    Fps,
    Knots,
    Beaufort,
    Auto,
}

impl SpeedUnit {
    pub const fn token(self) -> &'static str {
        match self {
            Self::Mps => "mps",
            Self::Kph => "kph",
            Self::Mph => "mph",
            Self::Fps => "fps",
            Self::Knots => "knots",
            Self::Beaufort => "bft",
            Self::Auto => "auto",
        }
    }

    /// Default label shown next to converted speeds.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mps => "m/s",
            Self::Kph => "km/h",
            Self::Mph => "mph",
            Self::Fps => "ft/s",
            Self::Knots => "knots",
            Self::Beaufort => "Bft",
            Self::Auto => "",
        }
    }

    pub fn parse_input(token: &str) -> Result<Self, ConfigError> {
        token.parse().map_err(|_| ConfigError::InvalidSpeedUnit {
            unit: token.to_string(),
            valid: INPUT_UNITS,
        })
    }

    pub fn parse_output(token: &str) -> Result<Self, ConfigError> {
        match token.parse() {
            Ok(unit @ (Self::Mps | Self::Kph | Self::Mph | Self::Fps | Self::Knots)) => Ok(unit),
            _ => Err(ConfigError::InvalidSpeedUnit {
                unit: token.to_string(),
                valid: OUTPUT_UNITS,
            }),
        }
    }

    /// Maps a host unit-of-measurement string onto a unit, used to resolve `auto`.
    pub fn from_unit_of_measurement(uom: &str) -> Option<Self> {
        match uom.trim() {
            "m/s" | "mps" => Some(Self::Mps),
            "km/h" | "kph" | "kmh" => Some(Self::Kph),
            "mph" | "mi/h" => Some(Self::Mph),
            "ft/s" | "fps" => Some(Self::Fps),
            "kn" | "kt" | "knots" => Some(Self::Knots),
            "Beaufort" | "bft" | "Bft" => Some(Self::Beaufort),
            _ => None,
        }
    }

    /// Metres per second in one unit. `None` for units without a linear factor.
    const fn mps_factor(self) -> Option<f64> {
        match self {
            Self::Mps => Some(1.0),
            Self::Kph => Some(1.0 / 3.6),
            Self::Mph => Some(0.44704),
            Self::Fps => Some(0.3048),
            Self::Knots => Some(0.514_444),
            Self::Beaufort | Self::Auto => None,
        }
    }
}

impl FromStr for SpeedUnit {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mps" => Ok(Self::Mps),
            "kph" => Ok(Self::Kph),
            "mph" => Ok(Self::Mph),
            "fps" => Ok(Self::Fps),
            "knots" => Ok(Self::Knots),
            "bft" | "beaufort" => Ok(Self::Beaufort),
            "auto" => Ok(Self::Auto),
            _ => Err(()),
        }
    }
}

impl fmt::Display for SpeedUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// ============================================================================
// BEAUFORT SCALE
// ============================================================================

/// Lower bound of every Beaufort class in m/s, force 0 to 12.
pub const BEAUFORT_MPS: [f64; 13] = [
    0.0, 0.5, 1.6, 3.4, 5.5, 8.0, 10.8, 13.9, 17.2, 20.8, 24.5, 28.5, 32.7,
];

/// Beaufort class for a speed in m/s.
pub fn beaufort_from_mps(mps: f64) -> u8 {
    BEAUFORT_MPS
        .iter()
        .rposition(|&lower| mps >= lower)
        .unwrap_or(0) as u8
}

/// Representative m/s speed of a Beaufort class: the class midpoint, or the
/// lower bound for force 12.
pub fn beaufort_to_mps(force: f64) -> f64 {
    let class = force.round().clamp(0.0, 12.0) as usize;
    match BEAUFORT_MPS.get(class + 1) {
        Some(upper) => (BEAUFORT_MPS[class] + upper) / 2.0,
        None => BEAUFORT_MPS[class],
    }
}

/// Converts `value` from `from` to `to`. Returns `None` when either side is
/// `auto` and the conversion cannot be decided.
pub fn convert_speed(value: f64, from: SpeedUnit, to: SpeedUnit) -> Option<f64> {
    if from == to {
        return Some(value);
    }
    let mps = match from {
        SpeedUnit::Beaufort => beaufort_to_mps(value),
        other => value * other.mps_factor()?,
    };
    match to {
        SpeedUnit::Beaufort => Some(f64::from(beaufort_from_mps(mps))),
        other => Some(mps / other.mps_factor()?),
    }
}

// ============================================================================
// COMPASS DIRECTION LETTERS
// ============================================================================

const COMPASS_PATTERN: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Localised letters for north, east, south, west plus the letter shown for
/// an unknown direction. Configured as a five character string, e.g. `NOZWX`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionLetters {
    pub north: char,
    pub east: char,
    pub south: char,
    pub west: char,
    pub unknown: char,
}

impl Default for DirectionLetters {
    fn default() -> Self {
        Self {
            north: 'N',
            east: 'E',
            south: 'S',
            west: 'W',
            unknown: 'X',
        }
    }
}

impl DirectionLetters {
    pub fn parse(letters: &str) -> Result<Self, ConfigError> {
        let chars: Vec<char> = letters.chars().collect();
        match chars.as_slice() {
            &[north, east, south, west, unknown] => Ok(Self {
                north,
                east,
                south,
                west,
                unknown,
            }),
            _ => Err(ConfigError::InvalidDirectionLetters(letters.to_string())),
        }
    }

    fn localise(&self, pattern: &str) -> String {
        pattern
            .chars()
            .map(|c| match c {
                'N' => self.north,
                'E' => self.east,
                'S' => self.south,
                'W' => self.west,
                other => other,
            })
            .collect()
    }

    /// The 16 compass points, clockwise from north.
    pub fn compass_points(&self) -> Vec<String> {
        COMPASS_PATTERN.iter().map(|p| self.localise(p)).collect()
    }

    pub fn degrees_to_letters(&self, degrees: f64) -> String {
        if !degrees.is_finite() {
            return self.unknown.to_string();
        }
        let index = (degrees.rem_euclid(360.0) / 22.5).round() as usize % 16;
        self.localise(COMPASS_PATTERN[index])
    }

    pub fn letters_to_degrees(&self, letters: &str) -> Option<f64> {
        let letters = letters.trim();
        self.compass_points()
            .iter()
            .position(|p| p == letters)
            .map(|index| index as f64 * 22.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn test_parse_input_and_output_units() {
        assert_eq!(SpeedUnit::parse_input("bft"), Ok(SpeedUnit::Beaufort));
        assert_eq!(SpeedUnit::parse_input("auto"), Ok(SpeedUnit::Auto));
        assert!(SpeedUnit::parse_output("bft").is_err());
        assert!(SpeedUnit::parse_output("auto").is_err());
        assert!(SpeedUnit::parse_input("furlongs").is_err());
        assert_eq!(SpeedUnit::parse_output("knots"), Ok(SpeedUnit::Knots));
    }

    #[test]
    fn test_convert_speed() {
        assert!(approx(convert_speed(10.0, SpeedUnit::Mps, SpeedUnit::Kph).unwrap(), 36.0));
        assert!(approx(convert_speed(36.0, SpeedUnit::Kph, SpeedUnit::Mps).unwrap(), 10.0));
        assert!(approx(convert_speed(1.0, SpeedUnit::Mph, SpeedUnit::Mps).unwrap(), 0.44704));
        assert_eq!(convert_speed(4.0, SpeedUnit::Auto, SpeedUnit::Mps), None);
    }

    #[test]
    fn test_beaufort_classes() {
        assert_eq!(beaufort_from_mps(0.2), 0);
        assert_eq!(beaufort_from_mps(5.5), 4);
        assert_eq!(beaufort_from_mps(40.0), 12);
        assert!(approx(beaufort_to_mps(1.0), 1.05));
        assert!(approx(beaufort_to_mps(12.0), 32.7));
        assert_eq!(convert_speed(9.0, SpeedUnit::Mps, SpeedUnit::Beaufort), Some(5.0));
    }

    #[test]
    fn test_degrees_to_letters() {
        let letters = DirectionLetters::default();
        assert_eq!(letters.degrees_to_letters(0.0), "N");
        assert_eq!(letters.degrees_to_letters(190.0), "S");
        assert_eq!(letters.degrees_to_letters(202.5), "SSW");
        assert_eq!(letters.degrees_to_letters(355.0), "N");
        assert_eq!(letters.degrees_to_letters(-90.0), "W");
        assert_eq!(letters.degrees_to_letters(f64::NAN), "X");
    }

    #[test]
    fn test_localised_letters_round_trip() {
        let letters = DirectionLetters::parse("NOZWX").unwrap();
        assert_eq!(letters.degrees_to_letters(90.0), "O");
        assert_eq!(letters.degrees_to_letters(135.0), "ZO");
        assert_eq!(letters.letters_to_degrees("ZO"), Some(135.0));
        assert_eq!(letters.letters_to_degrees("SE"), None);
        assert!(DirectionLetters::parse("NESW").is_err());
    }
}
