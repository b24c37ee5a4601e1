//! Tiered catalog lookups.
//!
//! Each component is looked up through an ordered list of [`LookupTier`]s,
//! most specific first. The first tier that returns a row with an authentic
//! part number wins; rows with synthetic keys are skipped. Fallback tiers
//! only match rows that leave the narrower attribute blank, so a row for a
//! different variant never stands in. A failing query ends the walk: the
//! component degrades instead of falling through to a broader tier.

use crate::bom::catalog::{keys, CatalogQuery, CatalogRow, MetadataFilter, VendorCatalog};
use crate::bom::descriptor::DrivetrainDescriptor;
use crate::bom::{is_authentic_part_number, ResolveContext};
use crate::vocabulary::ComponentType;

/// One lookup strategy
#[derive(Debug, Clone, PartialEq)]
pub struct LookupTier {
    /// Short label used in logs
    pub name: &'static str,
    pub query: CatalogQuery,
}

impl LookupTier {
    fn new(name: &'static str, query: CatalogQuery) -> Self {
        LookupTier { name, query }
    }
}

/// Result of walking a tier list
#[derive(Debug, Clone, PartialEq)]
pub enum LookupOutcome {
    /// An authentic row, and the tier that produced it
    Found { tier: &'static str, row: CatalogRow },
    /// Every tier answered, none with an authentic row
    NotFound,
    /// A tier failed before any authentic row was found
    Faulted { tier: &'static str, reason: String },
}

/// Walk `tiers` in order and return the first authentic row.
///
/// Stops at the first failing tier.
pub async fn first_authentic(
    catalog: &dyn VendorCatalog,
    component: ComponentType,
    tiers: &[LookupTier],
) -> LookupOutcome {
    for tier in tiers {
        let rows = match catalog.query(&tier.query).await {
            Ok(rows) => rows,
            Err(err) => {
                tracing::warn!(
                    component = component.code(),
                    tier = tier.name,
                    error = %err,
                    "catalog tier failed"
                );
                return LookupOutcome::Faulted {
                    tier: tier.name,
                    reason: err.to_string(),
                };
            }
        };

        let candidates = rows.len();
        if let Some(row) = rows
            .into_iter()
            .find(|r| is_authentic_part_number(&r.vendor_part_number))
        {
            tracing::debug!(
                component = component.code(),
                tier = tier.name,
                part_number = %row.vendor_part_number,
                "catalog tier matched"
            );
            return LookupOutcome::Found { tier: tier.name, row };
        }
        if candidates > 0 {
            tracing::debug!(
                component = component.code(),
                tier = tier.name,
                candidates,
                "catalog tier returned only non-authentic part numbers"
            );
        }
    }

    LookupOutcome::NotFound
}

// ============================================================================
// Tier Builders
// ============================================================================

fn size_filter(descriptor: &DrivetrainDescriptor) -> MetadataFilter {
    MetadataFilter::Number(f64::from(descriptor.gear_unit_size))
}

/// Gear unit: size + worm ratio + mounting variant, then size + worm ratio on
/// rows that carry no mounting variant.
pub fn gear_unit_tiers(
    descriptor: &DrivetrainDescriptor,
    worm_ratio: f64,
    ctx: &ResolveContext,
) -> Vec<LookupTier> {
    let base = CatalogQuery::new(&ctx.vendor, ComponentType::GearUnit)
        .with(keys::SIZE, size_filter(descriptor))
        .with(keys::RATIO, MetadataFilter::Ratio(worm_ratio));
    vec![
        LookupTier::new(
            "size+ratio+variant",
            base.clone().with(
                keys::MOUNTING_VARIANT,
                MetadataFilter::Text(ctx.mounting_style.code().to_string()),
            ),
        ),
        LookupTier::new("size+ratio", base.with(keys::MOUNTING_VARIANT, MetadataFilter::Absent)),
    ]
}

/// Motor: frame + HP, then HP on rows that carry no frame.
pub fn motor_tiers(descriptor: &DrivetrainDescriptor, hp: f64, ctx: &ResolveContext) -> Vec<LookupTier> {
    let base = CatalogQuery::new(&ctx.vendor, ComponentType::Motor).with(keys::HP, MetadataFilter::Number(hp));
    vec![
        LookupTier::new(
            "frame+hp",
            base.clone().with(
                keys::MOTOR_FRAME,
                MetadataFilter::Text(descriptor.motor_frame.clone()),
            ),
        ),
        LookupTier::new("hp", base.with(keys::MOTOR_FRAME, MetadataFilter::Absent)),
    ]
}

/// Adapter: adapter code + size, then adapter code.
pub fn adapter_tiers(descriptor: &DrivetrainDescriptor, ctx: &ResolveContext) -> Vec<LookupTier> {
    let base = CatalogQuery::new(&ctx.vendor, ComponentType::Adapter).with(
        keys::ADAPTER_CODE,
        MetadataFilter::Text(descriptor.adapter_code.clone()),
    );
    vec![
        LookupTier::new("code+size", base.clone().with(keys::SIZE, size_filter(descriptor))),
        LookupTier::new("code", base),
    ]
}

/// Output shaft kit: style, then diameter, then size alone. Every tier is
/// scoped to the gear unit size and the selected shaft option. With a style
/// selected, the broader tiers only match rows that carry no style.
///
/// The diameter tier only exists for rows written before shaft styles were
/// catalogued.
pub fn shaft_kit_tiers(descriptor: &DrivetrainDescriptor, ctx: &ResolveContext) -> Vec<LookupTier> {
    let mut base = CatalogQuery::new(&ctx.vendor, ComponentType::OutputShaftKit).with(keys::SIZE, size_filter(descriptor));
    if let Some(option) = ctx.shaft_option {
        base = base.with(keys::SHAFT_OPTION, MetadataFilter::Text(option.code().to_string()));
    }

    let mut tiers = Vec::with_capacity(3);
    if let Some(style) = ctx.shaft_style {
        tiers.push(LookupTier::new(
            "style",
            base.clone()
                .with(keys::SHAFT_STYLE, MetadataFilter::Text(style.code().to_string())),
        ));
        base = base.with(keys::SHAFT_STYLE, MetadataFilter::Absent);
    }
    if let Some(diameter) = ctx.shaft_diameter_in {
        tiers.push(LookupTier::new(
            "diameter",
            base.clone()
                .with(keys::SHAFT_DIAMETER_IN, MetadataFilter::Number(diameter)),
        ));
    }
    tiers.push(LookupTier::new("size", base));
    tiers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bom::catalog::InMemoryCatalog;
    use crate::errors::{CoreError, CoreResult};
    use crate::vocabulary::{MountingStyle, ShaftOption, ShaftStyle};
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn descriptor() -> DrivetrainDescriptor {
        DrivetrainDescriptor::parse("SK 1SI50-56C-71S/4").unwrap()
    }

    fn ctx() -> ResolveContext {
        ResolveContext {
            mounting_style: MountingStyle::ShaftMounted,
            worm_ratio: Some(80.0),
            ..ResolveContext::default()
        }
    }

    fn row(component_type: ComponentType, pn: &str, metadata: Value) -> CatalogRow {
        CatalogRow {
            vendor: "NORD".to_string(),
            component_type,
            vendor_part_number: pn.to_string(),
            description: String::new(),
            metadata: serde_json::from_value(metadata).unwrap(),
        }
    }

    /// Fails the first `failures` queries, then delegates
    struct FlakyCatalog {
        inner: InMemoryCatalog,
        failures: usize,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl VendorCatalog for FlakyCatalog {
        async fn query(&self, query: &CatalogQuery) -> CoreResult<Vec<CatalogRow>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(CoreError::catalog_unavailable("test", "connection reset"));
            }
            self.inner.query(query).await
        }
    }

    #[tokio::test]
    async fn test_specific_tier_wins() {
        let catalog = InMemoryCatalog::new(vec![
            row(ComponentType::GearUnit, "60000002", json!({ "size": 50, "ratio": 80.0 })),
            row(
                ComponentType::GearUnit,
                "60000001",
                json!({ "size": 50, "ratio": 80.0, "mounting_variant": "shaft_mounted" }),
            ),
        ]);
        let tiers = gear_unit_tiers(&descriptor(), 80.0, &ctx());
        match first_authentic(&catalog, ComponentType::GearUnit, &tiers).await {
            LookupOutcome::Found { tier, row } => {
                assert_eq!(tier, "size+ratio+variant");
                assert_eq!(row.vendor_part_number, "60000001");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_synthetic_keys_skipped() {
        let catalog = InMemoryCatalog::new(vec![
            row(ComponentType::Motor, "SI50-0.5", json!({ "hp": 0.5, "motor_frame": "71S/4" })),
            row(ComponentType::Motor, "30000001", json!({ "hp": 0.5 })),
        ]);
        let tiers = motor_tiers(&descriptor(), 0.5, &ctx());
        match first_authentic(&catalog, ComponentType::Motor, &tiers).await {
            LookupOutcome::Found { tier, row } => {
                assert_eq!(tier, "hp");
                assert_eq!(row.vendor_part_number, "30000001");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_hp_tier_ignores_rows_with_other_frame() {
        let catalog = InMemoryCatalog::new(vec![row(
            ComponentType::Motor,
            "30000009",
            json!({ "hp": 0.5, "motor_frame": "80L/4" }),
        )]);
        let tiers = motor_tiers(&descriptor(), 0.5, &ctx());
        assert_eq!(
            first_authentic(&catalog, ComponentType::Motor, &tiers).await,
            LookupOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_faulted_tier_stops_walk() {
        let catalog = FlakyCatalog {
            inner: InMemoryCatalog::new(vec![row(ComponentType::Adapter, "60000003", json!({ "adapter_code": "56C" }))]),
            failures: 1,
            calls: AtomicUsize::new(0),
        };
        let tiers = adapter_tiers(&descriptor(), &ctx());
        match first_authentic(&catalog, ComponentType::Adapter, &tiers).await {
            LookupOutcome::Faulted { tier, reason } => {
                assert_eq!(tier, "code+size");
                assert!(reason.contains("connection reset"));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_gear_unit_fallback_skips_other_variant() {
        let catalog = InMemoryCatalog::new(vec![row(
            ComponentType::GearUnit,
            "60692800",
            json!({ "size": 50, "ratio": 80.0, "mounting_variant": "shaft_mounted" }),
        )]);
        let ctx = ResolveContext {
            mounting_style: MountingStyle::BottomMount,
            ..ctx()
        };
        let tiers = gear_unit_tiers(&descriptor(), 80.0, &ctx);
        assert_eq!(
            first_authentic(&catalog, ComponentType::GearUnit, &tiers).await,
            LookupOutcome::NotFound
        );
    }

    #[tokio::test]
    async fn test_shaft_kit_fallback_skips_other_style() {
        let catalog = InMemoryCatalog::new(vec![
            row(
                ComponentType::OutputShaftKit,
                "60300051",
                json!({ "size": 50, "shaft_option": "single_extended", "shaft_style": "keyed", "shaft_diameter_in": 1.0 }),
            ),
            row(
                ComponentType::OutputShaftKit,
                "60300059",
                json!({ "size": 50, "shaft_option": "single_extended", "shaft_diameter_in": 1.0 }),
            ),
        ]);
        let ctx = ResolveContext {
            mounting_style: MountingStyle::BottomMount,
            shaft_option: Some(ShaftOption::SingleExtended),
            shaft_style: Some(ShaftStyle::Smooth),
            shaft_diameter_in: Some(1.0),
            ..ResolveContext::default()
        };
        let tiers = shaft_kit_tiers(&descriptor(), &ctx);
        match first_authentic(&catalog, ComponentType::OutputShaftKit, &tiers).await {
            LookupOutcome::Found { tier, row } => {
                assert_eq!(tier, "diameter");
                assert_eq!(row.vendor_part_number, "60300059");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_shaft_kit_tier_order() {
        let ctx = ResolveContext {
            mounting_style: MountingStyle::BottomMount,
            shaft_option: Some(ShaftOption::SingleExtended),
            shaft_style: Some(ShaftStyle::Keyed),
            shaft_diameter_in: Some(1.0),
            ..ResolveContext::default()
        };
        let names: Vec<_> = shaft_kit_tiers(&descriptor(), &ctx).iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["style", "diameter", "size"]);

        let ctx = ResolveContext {
            shaft_style: None,
            shaft_diameter_in: None,
            ..ctx
        };
        let names: Vec<_> = shaft_kit_tiers(&descriptor(), &ctx).iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["size"]);
    }
}
