//! Mapping from discrete slider steps to filter settings.
//!
//! This is presentation policy: a front end with a six-position slider can
//! turn the selected position into a setting for the adjustable registry.

use crate::core::types::FilterSetting;
use crate::filters::builtin::color::FilterKind;

/// Brightness offsets for slider positions 0 through 5.
pub const BRIGHTNESS_STEPS: [i32; 6] = [-80, -60, -40, -20, 20, 40];

/// Factor for `kind` at slider position `step`.
///
/// Brightness only knows the six positions in [`BRIGHTNESS_STEPS`]. The
/// other kinds use `step + 1`, so position 0 is the identity.
pub fn factor_for_step(kind: FilterKind, step: u32) -> Option<i32> {
    match kind {
        FilterKind::Brightness => BRIGHTNESS_STEPS.get(step as usize).copied(),
        FilterKind::Contrast | FilterKind::Grayscale | FilterKind::Sepia => {
            i32::try_from(step).ok()?.checked_add(1)
        }
    }
}

/// Setting for `kind` at slider position `step`.
pub fn setting_for_step(kind: FilterKind, step: u32) -> Option<FilterSetting> {
    factor_for_step(kind, step).map(|factor| FilterSetting::new(kind.name(), factor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brightness_steps() {
        let factors: Vec<_> = (0..6)
            .map(|s| factor_for_step(FilterKind::Brightness, s).unwrap())
            .collect();
        assert_eq!(factors, BRIGHTNESS_STEPS);
        assert_eq!(factor_for_step(FilterKind::Brightness, 6), None);
    }

    #[test]
    fn test_intensity_steps() {
        assert_eq!(factor_for_step(FilterKind::Contrast, 0), Some(1));
        assert_eq!(factor_for_step(FilterKind::Sepia, 4), Some(5));
        assert_eq!(factor_for_step(FilterKind::Grayscale, u32::MAX), None);
    }

    #[test]
    fn test_setting_uses_kind_name() {
        assert_eq!(
            setting_for_step(FilterKind::Grayscale, 2),
            Some(FilterSetting::new("Grayscale", 3))
        );
        assert_eq!(setting_for_step(FilterKind::Brightness, 9), None);
    }
}
