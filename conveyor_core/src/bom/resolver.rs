//! Component resolution.
//!
//! [`resolve`] turns one model code into a [`BomResolution`]. The four
//! components are independent and looked up concurrently. Resolution never
//! fails: catalog faults and gaps surface as Configured or Missing entries.

use tracing::Instrument;

use crate::bom::catalog::VendorCatalog;
use crate::bom::descriptor::DrivetrainDescriptor;
use crate::bom::lookup::{self, first_authentic, LookupOutcome, LookupTier};
use crate::bom::{round_ratio, BomComponent, BomResolution, ResolveContext};
use crate::vocabulary::{ComponentType, MountingStyle};

/// Resolve a drivetrain model code to vendor part numbers.
///
/// `hp` is the motor horsepower; `ctx.worm_ratio` is the ratio of the worm
/// stage alone.
///
/// # Example
///
/// ```rust
/// use conveyor_core::bom::{resolve, InMemoryCatalog, ResolveContext};
/// use conveyor_core::vocabulary::MountingStyle;
///
/// # futures::executor::block_on(async {
/// let catalog = InMemoryCatalog::default();
/// let ctx = ResolveContext { mounting_style: MountingStyle::ShaftMounted, ..Default::default() };
/// let bom = resolve(&catalog, "SK 1SI50-56C-71S/4", 0.5, &ctx).await;
///
/// assert_eq!(bom.components.len(), 4);
/// assert!(!bom.complete);
/// # });
/// ```
pub async fn resolve(
    catalog: &dyn VendorCatalog,
    model_code: &str,
    hp: f64,
    ctx: &ResolveContext,
) -> BomResolution {
    let parsed = DrivetrainDescriptor::parse(model_code);
    let span = tracing::debug_span!("resolve_bom", model_code, parsed = parsed.is_some());

    async {
        let descriptor = parsed.as_ref();
        let (gear_unit, motor, adapter, shaft_kit) = futures::join!(
            resolve_gear_unit(catalog, descriptor, ctx),
            resolve_motor(catalog, descriptor, hp, ctx),
            resolve_adapter(catalog, descriptor, ctx),
            resolve_shaft_kit(catalog, descriptor, ctx)
        );

        let components = vec![gear_unit, motor, adapter, shaft_kit];
        let complete = components.iter().all(|c| c.state.is_settled());
        tracing::debug!(complete, "bom resolved");

        BomResolution {
            model_code: model_code.to_string(),
            parsed: parsed.clone(),
            components,
            complete,
        }
    }
    .instrument(span)
    .await
}

const UNPARSEABLE: &str = "model code could not be parsed";

/// Map a lookup outcome to a component entry; misses keep the selection label.
async fn lookup_component(
    catalog: &dyn VendorCatalog,
    component: ComponentType,
    tiers: Vec<LookupTier>,
    selection: String,
) -> BomComponent {
    match first_authentic(catalog, component, &tiers).await {
        LookupOutcome::Found { row, .. } => BomComponent::resolved(component, &row),
        LookupOutcome::NotFound => BomComponent::configured(
            component,
            selection,
            "no authentic vendor part number in catalog",
        ),
        LookupOutcome::Faulted { reason, .. } => {
            BomComponent::configured(component, selection, format!("catalog unavailable: {}", reason))
        }
    }
}

async fn resolve_gear_unit(
    catalog: &dyn VendorCatalog,
    descriptor: Option<&DrivetrainDescriptor>,
    ctx: &ResolveContext,
) -> BomComponent {
    let component = ComponentType::GearUnit;
    let Some(descriptor) = descriptor else {
        return BomComponent::missing(component, UNPARSEABLE);
    };
    let Some(ratio) = ctx.worm_ratio.filter(|r| r.is_finite() && *r > 0.0) else {
        return BomComponent::missing(component, "worm gear ratio not supplied");
    };

    let selection = format!(
        "{} {}-stage worm gear unit, {:.1}:1",
        descriptor.unit_label(),
        descriptor.stage_count,
        round_ratio(ratio)
    );
    let tiers = lookup::gear_unit_tiers(descriptor, ratio, ctx);
    lookup_component(catalog, component, tiers, selection).await
}

async fn resolve_motor(
    catalog: &dyn VendorCatalog,
    descriptor: Option<&DrivetrainDescriptor>,
    hp: f64,
    ctx: &ResolveContext,
) -> BomComponent {
    let component = ComponentType::Motor;
    let Some(descriptor) = descriptor else {
        return BomComponent::missing(component, UNPARSEABLE);
    };
    if !(hp.is_finite() && hp > 0.0) {
        return BomComponent::missing(component, "motor horsepower not supplied");
    }

    let selection = format!("{} motor, {} HP", descriptor.motor_frame, hp);
    let tiers = lookup::motor_tiers(descriptor, hp, ctx);
    lookup_component(catalog, component, tiers, selection).await
}

async fn resolve_adapter(
    catalog: &dyn VendorCatalog,
    descriptor: Option<&DrivetrainDescriptor>,
    ctx: &ResolveContext,
) -> BomComponent {
    let component = ComponentType::Adapter;
    let Some(descriptor) = descriptor else {
        return BomComponent::missing(component, UNPARSEABLE);
    };

    let selection = format!("{} adapter for {}", descriptor.adapter_code, descriptor.unit_label());
    let tiers = lookup::adapter_tiers(descriptor, ctx);
    lookup_component(catalog, component, tiers, selection).await
}

async fn resolve_shaft_kit(
    catalog: &dyn VendorCatalog,
    descriptor: Option<&DrivetrainDescriptor>,
    ctx: &ResolveContext,
) -> BomComponent {
    let component = ComponentType::OutputShaftKit;
    if ctx.mounting_style == MountingStyle::ShaftMounted {
        return BomComponent::not_required(component, "shaft-mounted drives use the hollow output bore");
    }
    let Some(option) = ctx.shaft_option else {
        return BomComponent::missing(component, "no output shaft option selected");
    };
    let Some(descriptor) = descriptor else {
        return BomComponent::missing(component, UNPARSEABLE);
    };

    let mut selection = format!("{}, {}", option.display_name(), descriptor.unit_label());
    if let Some(style) = ctx.shaft_style {
        selection.push_str(&format!(", {}", style.display_name()));
    }
    let tiers = lookup::shaft_kit_tiers(descriptor, ctx);
    lookup_component(catalog, component, tiers, selection).await
}
