pub mod keymap;
pub mod steno;
