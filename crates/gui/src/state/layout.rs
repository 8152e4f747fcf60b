/// Desktop layout chosen by the shopper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    #[default]
    SideBySide,
    Stacked,
}

impl LayoutMode {
    pub fn label(&self) -> &'static str {
        match self {
            LayoutMode::SideBySide => "Side",
            LayoutMode::Stacked => "Stack",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            LayoutMode::SideBySide => "Side by side",
            LayoutMode::Stacked => "Stacked vertically",
        }
    }

    pub fn all() -> &'static [LayoutMode] {
        &[LayoutMode::SideBySide, LayoutMode::Stacked]
    }
}

/// A block of the page body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Vertical thumbnail column left of the stage
    GalleryColumn,
    /// Horizontally scrolling thumbnail strip (narrow windows only)
    GalleryStrip,
    /// 3D model viewer with tool icons
    Stage,
    /// Configurator panel
    Configurator,
}

/// Concrete page structure for a given width and mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrangement {
    SideBySide,
    Stacked,
    /// Below the breakpoint: single column, whatever the mode
    Narrow,
}

impl Arrangement {
    pub fn resolve(width: f32, mode: LayoutMode, breakpoint: f32) -> Self {
        if width < breakpoint {
            return Arrangement::Narrow;
        }
        match mode {
            LayoutMode::SideBySide => Arrangement::SideBySide,
            LayoutMode::Stacked => Arrangement::Stacked,
        }
    }

    /// Regions in display order (left to right for side-by-side, top to bottom otherwise)
    pub fn regions(&self) -> &'static [Region] {
        match self {
            Arrangement::SideBySide => &[Region::GalleryColumn, Region::Stage, Region::Configurator],
            Arrangement::Stacked => &[Region::Stage, Region::Configurator],
            Arrangement::Narrow => &[Region::Stage, Region::GalleryStrip, Region::Configurator],
        }
    }

    pub fn is_narrow(&self) -> bool {
        matches!(self, Arrangement::Narrow)
    }

    /// Stage aspect ratio (width / height)
    pub fn stage_aspect(&self) -> f32 {
        match self {
            Arrangement::SideBySide => 16.0 / 5.0,
            Arrangement::Stacked => 16.0 / 6.0,
            Arrangement::Narrow => 16.0 / 8.0,
        }
    }
}
