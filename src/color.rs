use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

use crate::data::model::Department;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Fixed series colors
// ---------------------------------------------------------------------------

/// One colour per department, stable across charts and legends.
pub fn department_palette() -> [Color32; Department::ALL.len()] {
    let palette = generate_palette(Department::ALL.len());
    [palette[0], palette[1], palette[2], palette[3]]
}

pub fn department_color(dept: Department) -> Color32 {
    department_palette()[dept.index()]
}

/// Chart colours for the quality metrics and the admission funnel stages.
pub const RETENTION: Color32 = Color32::from_rgb(46, 134, 171);
pub const SATISFACTION: Color32 = Color32::from_rgb(162, 59, 114);
pub const ENROLLMENT: Color32 = Color32::from_rgb(241, 143, 1);
pub const APPLICATIONS: Color32 = Color32::from_rgb(6, 167, 125);
pub const ADMITTED: Color32 = Color32::from_rgb(214, 40, 57);

/// Delta indicator colours (positive / negative changes).
pub const DELTA_UP: Color32 = Color32::from_rgb(63, 160, 90);
pub const DELTA_DOWN: Color32 = Color32::from_rgb(200, 70, 70);
