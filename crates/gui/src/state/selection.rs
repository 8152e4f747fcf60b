use shared::{ArmStyle, Catalog, HexColor, LegFinish, Selection};

/// Shopper selection owned by the page shell.
///
/// The color can only ever hold a value present in the catalog the state was
/// created from; attempts to select anything else are ignored.
#[derive(Debug, Clone)]
pub struct SelectionState {
    current: Selection,
}

impl SelectionState {
    /// Start from the first catalog swatch with default arm and leg options
    pub fn new(catalog: &Catalog) -> Self {
        let color = catalog
            .default_color()
            .unwrap_or(HexColor::from_rgb(0x88, 0x88, 0x88));
        Self {
            current: Selection::new(color),
        }
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    pub fn color(&self) -> HexColor {
        self.current.color
    }

    pub fn arm_style(&self) -> ArmStyle {
        self.current.arm_style
    }

    pub fn leg_finish(&self) -> LegFinish {
        self.current.leg_finish
    }

    /// Check if a swatch color is the selected one
    pub fn is_selected(&self, color: HexColor) -> bool {
        self.current.color == color
    }

    /// Select a catalog color. Returns false (and changes nothing) for colors
    /// outside the catalog.
    pub fn select_color(&mut self, catalog: &Catalog, color: HexColor) -> bool {
        if !catalog.contains_color(color) {
            tracing::warn!("Ignoring color {color} not present in catalog");
            return false;
        }
        self.current.color = color;
        true
    }

    pub fn set_arm_style(&mut self, arm_style: ArmStyle) {
        self.current.arm_style = arm_style;
    }

    pub fn set_leg_finish(&mut self, leg_finish: LegFinish) {
        self.current.leg_finish = leg_finish;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_selection_is_first_swatch() {
        let catalog = Catalog::default();
        let s = SelectionState::new(&catalog);
        assert_eq!(s.color(), catalog.swatches[0].color);
        assert_eq!(s.arm_style(), ArmStyle::Fixed);
        assert_eq!(s.leg_finish(), LegFinish::Steel);
    }

    #[test]
    fn test_select_catalog_color() {
        let catalog = Catalog::default();
        let mut s = SelectionState::new(&catalog);
        let navy = catalog.swatches[4].color;
        assert!(s.select_color(&catalog, navy));
        assert_eq!(s.color(), navy);
        assert!(s.is_selected(navy));
        assert!(!s.is_selected(catalog.swatches[0].color));
    }

    #[test]
    fn test_reject_unknown_color() {
        let catalog = Catalog::default();
        let mut s = SelectionState::new(&catalog);
        let before = s.color();
        assert!(!s.select_color(&catalog, HexColor::from_rgb(1, 2, 3)));
        assert_eq!(s.color(), before);
    }

    #[test]
    fn test_arm_and_leg_choices_keep_color() {
        let catalog = Catalog::default();
        let mut s = SelectionState::new(&catalog);
        let wine = catalog.swatches[8].color;
        assert!(s.select_color(&catalog, wine));
        s.set_arm_style(ArmStyle::Adjustable);
        s.set_leg_finish(LegFinish::Aluminum);
        assert_eq!(s.color(), wine);
        assert_eq!(s.arm_style(), ArmStyle::Adjustable);
        assert_eq!(s.leg_finish(), LegFinish::Aluminum);
    }

    #[test]
    fn test_empty_catalog_falls_back_to_grey() {
        let catalog = Catalog {
            swatches: Vec::new(),
            ..Catalog::default()
        };
        let s = SelectionState::new(&catalog);
        assert_eq!(s.color(), HexColor::from_rgb(0x88, 0x88, 0x88));
    }
}
