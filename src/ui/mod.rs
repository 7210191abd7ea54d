/// Presentation layer: top bar and filter panel (`panels`), chart rendering
/// (`plot`), and the tabbed central views (`views`). Owns no business logic;
/// everything shown is derived from `data::aggregate` on each frame.
pub mod panels;
pub mod plot;
pub mod views;
