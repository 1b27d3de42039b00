pub mod keyboard_diagram;
pub mod stroke_hint;
pub mod typing_area;
