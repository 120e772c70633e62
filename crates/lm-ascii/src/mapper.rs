use lm_core::charset::LuminosityTable;
use lm_core::error::CoreError;

/// Map a luminosity to its character.
///
/// The value is truncated toward zero, then reflected (`255 - v`) when
/// `inverted` is set, so one table serves both polarities.
///
/// # Errors
/// `LookupMiss` if the truncated value falls outside [0, 255] (NaN included).
///
/// # Example
/// ```
/// use lm_ascii::mapper::map;
/// use lm_core::charset::LuminosityTable;
///
/// let table = LuminosityTable::from_ramp(" .:#@");
/// assert_eq!(map(255.0, &table, false).unwrap(), '@');
/// assert_eq!(map(255.0, &table, true).unwrap(), ' ');
/// assert_eq!(map(254.9, &table, false).unwrap(), '#');
/// ```
#[inline]
pub fn map(luminosity: f64, table: &LuminosityTable, inverted: bool) -> Result<char, CoreError> {
    let key = luminosity.trunc();
    if !(0.0..=255.0).contains(&key) {
        return Err(CoreError::LookupMiss { luminosity });
    }
    let key = key as u8;
    Ok(table.get(if inverted { 255 - key } else { key }))
}
