/// Offline calibration for lumascii.
///
/// Prints a glyph sheet to screenshot on the target display, then measures
/// the ink coverage of every glyph in that screenshot to build the
/// luminosity → character table.

pub mod analyze;
pub mod sheet;
