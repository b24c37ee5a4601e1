//! # Vocabulary
//!
//! Closed sets of categorical inputs. Every enumerated value in a conveyor
//! configuration is one variant here, so a rule that forgets a case is a
//! non-exhaustive `match` instead of a silent string mismatch.
//!
//! Each enum serializes as its snake_case code (the stable wire vocabulary)
//! and offers:
//! - `ALL` for UI selection lists
//! - `code()` for the wire string
//! - `display_name()` for prose
//! - `from_str_flexible()` accepting codes, display names and common spellings
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::vocabulary::{TemperatureClass, TrackingMethod};
//!
//! let class = TemperatureClass::from_str_flexible("Red Hot").unwrap();
//! assert_eq!(class, TemperatureClass::RedHot);
//! assert_eq!(TrackingMethod::VGuided.code(), "v_guided");
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, CoreResult};

/// Normalize a user string for flexible matching: lowercase, with spaces,
/// dashes and slashes folded into underscores.
fn fold(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace([' ', '-', '/'], "_")
}

macro_rules! vocabulary_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $code:literal, $display:literal $(| $alias:literal)* ; )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            /// All variants, in declaration order
            pub const ALL: &'static [$name] = &[ $( $name::$variant, )+ ];

            /// Wire code (matches the serde representation)
            pub fn code(&self) -> &'static str {
                match self {
                    $( $name::$variant => $code, )+
                }
            }

            /// Human-readable name
            pub fn display_name(&self) -> &'static str {
                match self {
                    $( $name::$variant => $display, )+
                }
            }

            /// Parse from common string representations
            pub fn from_str_flexible(s: &str) -> CoreResult<Self> {
                let folded = fold(s);
                $(
                    if folded == $code || folded == fold($display) $( || folded == $alias )* {
                        return Ok($name::$variant);
                    }
                )+
                Err(CoreError::malformed_input(
                    stringify!($name),
                    format!("unknown value '{}'", s),
                ))
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.display_name())
            }
        }
    };
}

// ============================================================================
// Product Families
// ============================================================================

vocabulary_enum! {
    /// Product family the configuration is for. Drives message templating,
    /// parameter defaults and which product-gated rules apply.
    ProductKey {
        /// Standard flat belt conveyor
        BeltConveyor => "belt_conveyor", "Belt Conveyor" | "belt";
        /// Low-profile slider bed conveyor
        SliderBed => "slider_bed", "Slider Bed Conveyor" | "slider";
        /// Premium sanitary belt conveyor (stainless, washdown capable)
        SanitaryBelt => "sanitary_belt", "Sanitary Belt Conveyor" | "sanitary";
    }
}

vocabulary_enum! {
    /// Product capability a rule may require before it applies.
    Capability {
        /// Product can be built with cleated belts
        Cleats => "cleats", "Cleated Belts";
        /// Product offers premium build options (stainless frame, washdown package)
        PremiumBuild => "premium_build", "Premium Build Options";
    }
}

impl ProductKey {
    /// Capability descriptor for this product family
    pub fn capabilities(&self) -> &'static [Capability] {
        match self {
            ProductKey::BeltConveyor => &[Capability::Cleats],
            ProductKey::SliderBed => &[],
            ProductKey::SanitaryBelt => &[Capability::Cleats, Capability::PremiumBuild],
        }
    }

    /// Whether this product offers every capability in `required`
    pub fn supports_all(&self, required: &[Capability]) -> bool {
        let offered = self.capabilities();
        required.iter().all(|cap| offered.contains(cap))
    }

    /// Calculation model key stamped into result metadata
    pub fn model_key(&self) -> &'static str {
        match self {
            ProductKey::BeltConveyor => "belt_conveyor_v1",
            ProductKey::SliderBed => "slider_bed_v1",
            ProductKey::SanitaryBelt => "sanitary_belt_v1",
        }
    }
}

impl Default for ProductKey {
    fn default() -> Self {
        ProductKey::BeltConveyor
    }
}

// ============================================================================
// Product / Part Description
// ============================================================================

vocabulary_enum! {
    /// Temperature of the parts placed on the belt
    TemperatureClass {
        Ambient => "ambient", "Ambient" | "room";
        Warm => "warm", "Warm";
        Hot => "hot", "Hot";
        RedHot => "red_hot", "Red Hot" | "redhot";
    }
}

vocabulary_enum! {
    /// Fluid / contamination carried on the parts
    FluidClass {
        None => "none", "None" | "dry";
        Minimal => "minimal", "Minimal" | "light";
        Considerable => "considerable", "Considerable" | "heavy";
    }
}

vocabulary_enum! {
    /// Which part dimension runs along belt travel
    PartOrientation {
        Lengthwise => "lengthwise", "Lengthwise" | "length";
        Crosswise => "crosswise", "Crosswise" | "width" | "widthwise";
    }
}

// ============================================================================
// Operation / Environment
// ============================================================================

vocabulary_enum! {
    /// Belt-centering strategy
    TrackingMethod {
        /// Pulley-shape based, passive
        Crowned => "crowned", "Crowned" | "crown";
        /// Mechanical guide in a grooved bed, active
        VGuided => "v_guided", "V-Guided" | "vguided" | "v_guide";
    }
}

vocabulary_enum! {
    /// How hard parts are pushed onto the belt from the side
    SideLoadSeverity {
        None => "none", "None";
        Light => "light", "Light";
        Moderate => "moderate", "Moderate" | "medium";
        Heavy => "heavy", "Heavy";
    }
}

vocabulary_enum! {
    /// Operating environment
    EnvironmentClass {
        Indoor => "indoor", "Indoor" | "clean";
        Dusty => "dusty", "Dusty" | "dirty";
        Washdown => "washdown", "Washdown" | "wet";
        Outdoor => "outdoor", "Outdoor";
    }
}

vocabulary_enum! {
    /// Belt direction of travel
    DirectionMode {
        OneWay => "one_way", "One Way" | "forward" | "unidirectional";
        Reversing => "reversing", "Reversing" | "bidirectional" | "reverse";
    }
}

// ============================================================================
// Safety / Build Options
// ============================================================================

vocabulary_enum! {
    /// End guards fitted at the pulleys
    EndGuards {
        None => "none", "None";
        HeadOnly => "head_only", "Head End Only" | "head";
        TailOnly => "tail_only", "Tail End Only" | "tail";
        Both => "both", "Both Ends";
    }
}

impl EndGuards {
    /// Whether both pinch points are covered
    pub fn covers_both_ends(&self) -> bool {
        matches!(self, EndGuards::Both)
    }
}

vocabulary_enum! {
    /// Frame material / finish
    FrameFinish {
        PaintedSteel => "painted_steel", "Painted Steel" | "painted" | "steel";
        StainlessSteel => "stainless_steel", "Stainless Steel" | "stainless" | "ss";
        Anodized => "anodized", "Anodized Aluminum" | "aluminum";
    }
}

vocabulary_enum! {
    /// Where the drive pulley sits
    DriveLocation {
        Head => "head", "Head End";
        Tail => "tail", "Tail End";
        Center => "center", "Center Drive";
    }
}

vocabulary_enum! {
    /// How the gearmotor couples to the drive pulley
    MountingStyle {
        /// Hollow-bore gear unit slid directly onto the pulley shaft
        ShaftMounted => "shaft_mounted", "Shaft Mounted" | "direct";
        /// Foot-mounted below the frame, coupled by chain and sprockets
        BottomMount => "bottom_mount", "Bottom Mount" | "chain" | "bottom";
    }
}

// ============================================================================
// Electrical
// ============================================================================

vocabulary_enum! {
    /// Supply phase
    SupplyPhase {
        Single => "single", "Single Phase" | "1ph" | "1";
        Three => "three", "Three Phase" | "3ph" | "3";
    }
}

vocabulary_enum! {
    /// Motor controls package
    ControlsPackage {
        None => "none", "None";
        StartStop => "start_stop", "Start/Stop";
        ReversingStarter => "reversing_starter", "Reversing Starter" | "reversing";
        Vfd => "vfd", "Variable Frequency Drive";
    }
}

impl ControlsPackage {
    /// Whether the controls can run the motor in both directions
    pub fn supports_reversing(&self) -> bool {
        matches!(self, ControlsPackage::ReversingStarter | ControlsPackage::Vfd)
    }
}

// ============================================================================
// Drive Arrangement (BOM selections)
// ============================================================================

vocabulary_enum! {
    /// Output shaft kit option chosen in Drive Arrangement
    ShaftOption {
        SingleExtended => "single_extended", "Single Extended Shaft" | "single";
        DoubleExtended => "double_extended", "Double Extended Shaft" | "double";
    }
}

vocabulary_enum! {
    /// Output shaft end style
    ShaftStyle {
        Keyed => "keyed", "Keyed";
        Smooth => "smooth", "Smooth" | "plain";
        Splined => "splined", "Splined";
    }
}

vocabulary_enum! {
    /// Drivetrain component on a bill of materials. `ALL` is the fixed
    /// order components are resolved and listed in.
    ComponentType {
        GearUnit => "gear_unit", "Gear Unit" | "gearbox" | "reducer";
        Motor => "motor", "Motor";
        Adapter => "adapter", "Adapter" | "motor_adapter";
        OutputShaftKit => "output_shaft_kit", "Output Shaft Kit" | "shaft_kit";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_match_serde() {
        for class in TemperatureClass::ALL {
            let json = serde_json::to_string(class).unwrap();
            assert_eq!(json, format!("\"{}\"", class.code()));
        }
        for method in TrackingMethod::ALL {
            let json = serde_json::to_string(method).unwrap();
            assert_eq!(json, format!("\"{}\"", method.code()));
        }
    }

    #[test]
    fn test_flexible_parsing() {
        assert_eq!(
            TemperatureClass::from_str_flexible("Red Hot").unwrap(),
            TemperatureClass::RedHot
        );
        assert_eq!(
            TrackingMethod::from_str_flexible("V-Guided").unwrap(),
            TrackingMethod::VGuided
        );
        assert_eq!(
            MountingStyle::from_str_flexible("chain").unwrap(),
            MountingStyle::BottomMount
        );
        assert_eq!(SupplyPhase::from_str_flexible("3").unwrap(), SupplyPhase::Three);
        assert!(FluidClass::from_str_flexible("syrup").is_err());
    }

    #[test]
    fn test_product_capabilities() {
        assert!(ProductKey::SanitaryBelt.supports_all(&[Capability::PremiumBuild]));
        assert!(!ProductKey::BeltConveyor.supports_all(&[Capability::PremiumBuild]));
        assert!(ProductKey::BeltConveyor.supports_all(&[Capability::Cleats]));
        assert!(!ProductKey::SliderBed.supports_all(&[Capability::Cleats]));
        assert!(ProductKey::SliderBed.supports_all(&[]));
    }

    #[test]
    fn test_model_keys_unique() {
        let keys: std::collections::HashSet<_> =
            ProductKey::ALL.iter().map(|p| p.model_key()).collect();
        assert_eq!(keys.len(), ProductKey::ALL.len());
    }

    #[test]
    fn test_display() {
        assert_eq!(ProductKey::SliderBed.to_string(), "Slider Bed Conveyor");
        assert_eq!(EndGuards::Both.to_string(), "Both Ends");
    }
}
