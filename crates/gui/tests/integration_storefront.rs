//! Integration tests for StorefrontHarness.
//!
//! Drives the page shell headlessly through the same actions the UI performs.

use ikarus_gui_lib::fixtures;
use ikarus_gui_lib::harness::StorefrontHarness;
use ikarus_gui_lib::state::{Arrangement, CollapseSource, LayoutMode, Region, SectionId};
use shared::{ArmStyle, HexColor, LegFinish};

#[test]
fn test_fresh_load_to_empty_cart_scenario() {
    let mut h = StorefrontHarness::new();
    let catalog = h.state.catalog().clone();

    // Fresh load
    assert_eq!(h.selection().color, catalog.swatches[0].color);
    assert!(h.cart().is_empty());
    assert!(!h.drawer_open());
    assert_eq!(h.state.layout, LayoutMode::SideBySide);

    // Pick the 4th swatch
    let fourth = catalog.swatches[3].color;
    assert!(h.select_color(fourth));
    assert_eq!(h.selection().color, fourth);
    for instance in h.swatch_instances() {
        assert_eq!(instance.selected, instance.swatch.color == fourth);
    }

    // Add to cart
    let id = h.add_to_cart();
    assert!(h.drawer_open());
    assert_eq!(h.cart().len(), 1);
    assert_eq!(h.cart()[0].color, fourth);
    assert_eq!(h.cart()[0].price, catalog.price.sale);
    assert_eq!(h.cart()[0].quantity, 1);

    // Remove it again
    assert!(h.remove(&id));
    assert!(h.cart().is_empty());
    assert!(h.drawer_open());
}

#[test]
fn test_cart_entries_are_snapshots() {
    let mut h = StorefrontHarness::new();
    let swatches = h.state.catalog().swatches.clone();

    let mut expected = Vec::new();
    for (i, swatch) in swatches.iter().enumerate().take(5) {
        h.select_color(swatch.color);
        h.set_arm_style(if i % 2 == 0 { ArmStyle::Fixed } else { ArmStyle::Adjustable });
        h.set_leg_finish(if i % 3 == 0 { LegFinish::Aluminum } else { LegFinish::Steel });
        expected.push(h.selection().clone());
        h.add_to_cart();
    }

    // Later changes never alter earlier lines
    h.select_color(swatches[9].color);
    h.set_arm_style(ArmStyle::Adjustable);

    assert_eq!(h.cart().len(), expected.len());
    // Newest first
    for (item, selection) in h.cart().iter().zip(expected.iter().rev()) {
        assert_eq!(item.color, selection.color);
        assert_eq!(item.arm_style, selection.arm_style);
        assert_eq!(item.leg_finish, selection.leg_finish);
        assert_eq!(item.name, "Cozy Lounge chair");
    }
}

#[test]
fn test_same_configuration_twice_gives_distinct_ids() {
    let mut h = StorefrontHarness::new();
    let a = h.add_to_cart();
    let b = h.add_to_cart();
    assert_ne!(a, b);
    assert_eq!(h.cart().len(), 2);
    assert_eq!(h.cart()[0].color, h.cart()[1].color);
}

#[test]
fn test_remove_semantics() {
    let mut h = StorefrontHarness::new();
    let first = h.add_to_cart();
    h.select_swatch("Wine");
    let second = h.add_to_cart();
    let selection_before = h.selection().clone();

    assert!(!h.remove("not-an-id"));
    assert_eq!(h.cart().len(), 2);

    assert!(h.remove(&first));
    assert_eq!(h.cart().len(), 1);
    assert_eq!(h.cart()[0].id, second);
    assert_eq!(h.selection(), &selection_before);

    // Removing again is a no-op
    assert!(!h.remove(&first));
    assert_eq!(h.cart().len(), 1);
}

#[test]
fn test_selecting_unknown_color_is_ignored() {
    let mut h = StorefrontHarness::new();
    let before = h.selection().color;
    assert!(!h.select_color(HexColor::from_rgb(1, 2, 3)));
    assert_eq!(h.selection().color, before);
}

#[test]
fn test_duplicate_swatch_instances_share_selection() {
    let mut h = StorefrontHarness::with_settings(fixtures::settings_with_catalog(
        fixtures::catalog_with_swatches(12),
    ));
    let color = h.state.catalog().swatches[11].color;
    h.select_color(color);
    // Leather grid + aluminum row (entries 10..12)
    assert_eq!(h.selected_swatch_count(), 2);

    let color = h.state.catalog().swatches[2].color;
    h.select_color(color);
    // Leather grid + section row
    assert_eq!(h.selected_swatch_count(), 2);
}

#[test]
fn test_collapse_all_closes_every_section() {
    let mut h = StorefrontHarness::new();
    assert_eq!(h.open_sections(), vec![SectionId::ArmFinish]);

    h.toggle_section(SectionId::Arms);
    h.toggle_section(SectionId::LegsFinish);
    assert_eq!(h.open_sections().len(), 3);

    h.collapse_all(CollapseSource::PanelHeader);
    assert!(h.open_sections().is_empty());

    h.toggle_section(SectionId::LegsFinish);
    assert_eq!(h.open_sections(), vec![SectionId::LegsFinish]);

    // Every trigger point publishes the same event
    h.collapse_all(CollapseSource::SectionGroupHeader);
    assert!(h.open_sections().is_empty());
    h.toggle_section(SectionId::Arms);
    h.collapse_all(CollapseSource::Section(SectionId::Arms));
    assert!(h.open_sections().is_empty());
}

#[test]
fn test_collapse_all_when_already_closed() {
    let mut h = StorefrontHarness::new();
    h.collapse_all(CollapseSource::PanelHeader);
    h.collapse_all(CollapseSource::PanelHeader);
    assert!(h.open_sections().is_empty());
    h.toggle_section(SectionId::ArmFinish);
    assert!(h.is_open(SectionId::ArmFinish));
}

#[test]
fn test_layout_arrangements() {
    let mut h = StorefrontHarness::new();
    let wide = h.arrangement_at(1280.0);
    assert_eq!(wide, Arrangement::SideBySide);
    assert_eq!(
        wide.regions(),
        &[Region::GalleryColumn, Region::Stage, Region::Configurator]
    );

    h.set_layout(LayoutMode::Stacked);
    let stacked = h.arrangement_at(1280.0);
    assert_ne!(stacked, wide);
    assert_eq!(stacked.regions(), &[Region::Stage, Region::Configurator]);

    // Below the breakpoint the mode does not matter
    let narrow_stacked = h.arrangement_at(600.0);
    h.set_layout(LayoutMode::SideBySide);
    let narrow_side = h.arrangement_at(600.0);
    assert_eq!(narrow_stacked, narrow_side);
    assert!(narrow_side.regions().contains(&Region::GalleryStrip));

    // Breakpoint is inclusive for the wide layouts
    assert_eq!(h.arrangement_at(768.0), Arrangement::SideBySide);
    assert_eq!(h.arrangement_at(767.9), Arrangement::Narrow);
}

#[test]
fn test_model_follows_selection_color() {
    let mut h = StorefrontHarness::new();
    h.attach_model(fixtures::chair_scene());
    let model = h.model().unwrap();
    assert_eq!(model.applied_color(), Some(h.selection().color));

    assert_eq!(h.sync_model(), None);
    h.select_swatch("Teal 1");
    assert_eq!(h.sync_model(), Some(3));
    let model = h.model().unwrap();
    for item in model.draw_items() {
        assert_eq!(item.material.base_color, h.selection().color.to_f32());
        assert_eq!(item.material.metalness, 0.2);
        assert_eq!(item.material.roughness, 0.7);
        assert!(!item.material.transparent);
    }
}

#[test]
fn test_harness_from_settings_json() {
    let json = r##"{
        "storefront": {
            "catalog": {
                "product_name": "Ottoman",
                "swatches": [
                    {"name": "Sand", "color": "#D2B48C"},
                    {"name": "Slate", "color": "#708090"}
                ],
                "price": {"base": 120, "sale": 99.5}
            },
            "breakpoint": 900
        }
    }"##;
    let mut h = StorefrontHarness::from_settings_json(json).unwrap();
    assert_eq!(h.selection().color.to_string(), "#D2B48C");
    assert_eq!(h.arrangement_at(800.0), Arrangement::Narrow);
    h.add_to_cart();
    assert_eq!(h.cart()[0].name, "Ottoman");
    assert_eq!(h.cart()[0].price, 99.5);

    assert!(StorefrontHarness::from_settings_json("{").is_err());
}
