pub mod cart_drawer;
pub mod configurator;
pub mod gallery;
pub mod header;
pub mod stage;
pub mod swatch;
