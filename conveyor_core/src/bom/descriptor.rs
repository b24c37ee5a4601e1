//! Drivetrain model code parser.
//!
//! Grammar (case-insensitive, whitespace ignored):
//!
//! ```text
//! SK <stages>SI<size>-<adapter>-<motor frame>
//!
//! stages  = 1 | 2
//! size    = 31 | 40 | 50 | 63 | 75
//! adapter = [A-Z0-9]+
//! frame   = [A-Z0-9/]+
//! ```
//!
//! Parsing is all-or-nothing: a code either yields every field or `None`.

use serde::{Deserialize, Serialize};

/// Valid stage counts
pub const STAGE_COUNTS: [u8; 2] = [1, 2];
/// Valid gear unit sizes
pub const GEAR_UNIT_SIZES: [u16; 5] = [31, 40, 50, 63, 75];

/// Structured view of a drivetrain model code.
///
/// ## JSON Example
///
/// ```json
/// { "stage_count": 1, "gear_unit_size": 50, "adapter_code": "56C", "motor_frame": "71S/4" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DrivetrainDescriptor {
    pub stage_count: u8,
    pub gear_unit_size: u16,
    pub adapter_code: String,
    pub motor_frame: String,
}

impl DrivetrainDescriptor {
    /// Parse a model code such as `SK 1SI50-56C-71S/4`.
    pub fn parse(model_code: &str) -> Option<Self> {
        let compact: String = model_code
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase();

        let body = compact.strip_prefix("SK")?;
        let mut parts = body.splitn(3, '-');
        let unit = parts.next()?;
        let adapter = parts.next()?;
        let frame = parts.next()?;

        let (stages, size) = unit.split_once("SI")?;
        let stage_count: u8 = stages.parse().ok()?;
        let gear_unit_size: u16 = size.parse().ok()?;
        if !STAGE_COUNTS.contains(&stage_count) || !GEAR_UNIT_SIZES.contains(&gear_unit_size) {
            return None;
        }

        let adapter_ok = !adapter.is_empty() && adapter.chars().all(|c| c.is_ascii_alphanumeric());
        let frame_ok = !frame.is_empty()
            && frame.chars().any(|c| c.is_ascii_alphanumeric())
            && frame.chars().all(|c| c.is_ascii_alphanumeric() || c == '/');
        if !adapter_ok || !frame_ok {
            return None;
        }

        Some(DrivetrainDescriptor {
            stage_count,
            gear_unit_size,
            adapter_code: adapter.to_string(),
            motor_frame: frame.to_string(),
        })
    }

    /// Gear unit family label, e.g. `SI50`
    pub fn unit_label(&self) -> String {
        format!("SI{}", self.gear_unit_size)
    }
}

impl std::fmt::Display for DrivetrainDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SK {}SI{}-{}-{}",
            self.stage_count, self.gear_unit_size, self.adapter_code, self.motor_frame
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical() {
        let d = DrivetrainDescriptor::parse("SK 1SI50-56C-71S/4").unwrap();
        assert_eq!(d.stage_count, 1);
        assert_eq!(d.gear_unit_size, 50);
        assert_eq!(d.adapter_code, "56C");
        assert_eq!(d.motor_frame, "71S/4");
    }

    #[test]
    fn test_parse_is_case_and_whitespace_tolerant() {
        let d = DrivetrainDescriptor::parse("  sk 2si63 - 140tc - 80l/4 ").unwrap();
        assert_eq!(d.stage_count, 2);
        assert_eq!(d.gear_unit_size, 63);
        assert_eq!(d.adapter_code, "140TC");
        assert_eq!(d.motor_frame, "80L/4");
        assert_eq!(d.to_string(), "SK 2SI63-140TC-80L/4");
    }

    #[test]
    fn test_unparseable_codes() {
        for code in [
            "",
            "SK",
            "SI50-56C-71S/4",
            "SK 3SI50-56C-71S/4",
            "SK 1SI55-56C-71S/4",
            "SK 1SI50-56C",
            "SK 1SI50--71S/4",
            "SK 1SI50-56C-",
            "SK 1SI50-56C-71S-4",
            "SK 1SIXX-56C-71S/4",
        ] {
            assert!(DrivetrainDescriptor::parse(code).is_none(), "{:?}", code);
        }
    }

    #[test]
    fn test_roundtrip_through_display() {
        let d = DrivetrainDescriptor::parse("SK 1SI31-56C-63S/4").unwrap();
        assert_eq!(DrivetrainDescriptor::parse(&d.to_string()), Some(d));
    }
}
