use crate::error::FitError;
use crate::font::ScalableFace;
use crate::font::TextFont;
use crate::frame::Canvas;

/// Upper bound for the upward scan, in case a face never outgrows the canvas.
pub const MAX_FONT_SIZE: u32 = 512;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitSettings {
    pub initial_size: u32,
    pub padding: u32,
}

impl Default for FitSettings {
    fn default() -> Self {
        Self {
            initial_size: crate::konst::INITIAL_FONT_SIZE,
            padding: crate::konst::PADDING,
        }
    }
}

/// Finds the largest font size at which `text` fits strictly inside `canvas`
/// minus `padding` on every side.
///
/// Scans upward from `initial_size` one size at a time. If `initial_size`
/// already overflows, scans downward instead, so the result is always the
/// largest fitting size and never below 1.
pub fn fit<F>(canvas: Canvas, text: &str, face: &F, settings: FitSettings) -> Result<u32, FitError>
where
    F: ScalableFace,
{
    let bound = canvas
        .inner(settings.padding)
        .ok_or(FitError::CanvasTooSmall {
            canvas,
            padding: settings.padding,
        })?;

    let fits = |size: u32| {
        let measured = face.at_size(size).measure(text);
        measured.width < bound.width && measured.height < bound.height
    };

    let mut size = settings.initial_size.clamp(1, MAX_FONT_SIZE);

    if fits(size) {
        while size < MAX_FONT_SIZE && fits(size + 1) {
            size += 1;
        }
        tracing::trace!(size, %canvas, text, "Fitted font size");
        return Ok(size);
    }

    while size > 1 {
        size -= 1;
        if fits(size) {
            tracing::debug!(
                size,
                initial_size = settings.initial_size,
                %canvas,
                text,
                "Initial font size overflowed, fitted smaller size"
            );
            return Ok(size);
        }
    }

    Err(FitError::TextTooLarge {
        text: text.to_string(),
        canvas,
    })
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::fit;
    use super::FitSettings;
    use crate::error::FitError;
    use crate::font::dejavu_mono_bold;
    use crate::font::BlockFace;
    use crate::font::ScalableFace;
    use crate::font::TextFont;
    use crate::frame::Canvas;

    fn canvas(width: u32, height: u32) -> Canvas {
        Canvas::new(width, height).unwrap()
    }

    #[test]
    fn test_fit_128x32() {
        // Height bound is 28, so size 27 is the last one strictly below it.
        // Width bound is 124: 8 glyphs * (27 / 2 + 1) = 112 fits.
        let size = fit(canvas(128, 32), "10:45 AM", &BlockFace::default(), FitSettings::default());
        assert_eq!(size.unwrap(), 27);
    }

    #[test]
    fn test_fit_width_bound() {
        // 8 glyphs, width bound 60: 8 * (s / 2 + 1) < 60 holds up to s = 13.
        let size = fit(canvas(64, 64), "12:00 PM", &BlockFace::default(), FitSettings::default());
        assert_eq!(size.unwrap(), 13);
    }

    #[test]
    fn test_fit_scans_down_when_initial_overflows() {
        // Height bound is 6, initial size 10 does not fit.
        let size = fit(canvas(100, 10), "1", &BlockFace::default(), FitSettings::default());
        assert_eq!(size.unwrap(), 5);
    }

    #[test]
    fn test_fit_canvas_too_small() {
        let err = fit(canvas(4, 40), "1", &BlockFace::default(), FitSettings::default());
        assert!(matches!(err, Err(FitError::CanvasTooSmall { padding: 2, .. })));

        let err = fit(canvas(40, 3), "1", &BlockFace::default(), FitSettings::default());
        assert!(matches!(err, Err(FitError::CanvasTooSmall { .. })));
    }

    #[test]
    fn test_fit_text_too_large() {
        // Even at size 1 every glyph is 1px wide, 30 glyphs never fit in 6px.
        let text = "x".repeat(30);
        let err = fit(canvas(10, 40), &text, &BlockFace::default(), FitSettings::default());
        assert!(matches!(err, Err(FitError::TextTooLarge { .. })));
    }

    #[test]
    fn test_fit_does_not_load_sizes_for_unusable_canvas() {
        let face = BlockFace::default();
        let err = fit(canvas(4, 4), "1", &face, FitSettings::default());
        assert!(err.is_err());
        assert_eq!(face.loads.get(), 0);
    }

    #[test]
    fn test_fit_scans_one_size_at_a_time() {
        // 10 fits, then 11 ..= 27 fit and 28 is the first that does not.
        let face = BlockFace::default();
        let size = fit(canvas(128, 32), "10:45 AM", &face, FitSettings::default());
        assert_eq!(size.unwrap(), 27);
        assert_eq!(face.loads.get(), 19);
    }

    #[test]
    fn test_fit_truetype() {
        let face = dejavu_mono_bold();
        let settings = FitSettings::default();

        // Height bound: 24 would be 28 tall, not below 28.
        assert_eq!(fit(canvas(128, 32), "10:45 AM", face, settings).unwrap(), 23);
        // Width bound: 26 would be 126 wide, not below 124.
        assert_eq!(fit(canvas(128, 64), "10:45 AM", face, settings).unwrap(), 25);
        // Initial size 10 is 12 tall, which overflows a 12px bound.
        assert_eq!(fit(canvas(64, 16), "12:00 PM", face, settings).unwrap(), 9);
    }

    #[test]
    fn test_fit_zero_initial_size_is_clamped() {
        let settings = FitSettings {
            initial_size: 0,
            padding: 2,
        };
        let size = fit(canvas(128, 32), "10:45 AM", &BlockFace::default(), settings);
        assert_eq!(size.unwrap(), 27);
    }

    fn check_largest_fitting_size<F>(
        face: &F,
        canvas: Canvas,
        text: &str,
    ) -> Result<(), TestCaseError>
    where
        F: ScalableFace,
    {
        let settings = FitSettings::default();
        let bound = canvas.inner(settings.padding).unwrap();
        let fits = |size: u32| {
            let measured = face.at_size(size).measure(text);
            measured.width < bound.width && measured.height < bound.height
        };

        match fit(canvas, text, face, settings) {
            Ok(size) => {
                prop_assert!(size >= 1);
                prop_assert!(fits(size));
                prop_assert!(!fits(size + 1));
            }
            Err(FitError::TextTooLarge { .. }) => prop_assert!(!fits(1)),
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }
        Ok(())
    }

    fn check_monotonic_in_canvas<F>(
        face: &F,
        small: Canvas,
        large: Canvas,
        text: &str,
    ) -> Result<(), TestCaseError>
    where
        F: ScalableFace,
    {
        let settings = FitSettings::default();
        if let Ok(small) = fit(small, text, face, settings) {
            prop_assert!(fit(large, text, face, settings).unwrap() >= small);
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn prop_fit_is_largest_fitting_size(
            width in 5u32..300,
            height in 5u32..120,
            text in "[0-9: APM]{1,10}",
        ) {
            check_largest_fitting_size(&BlockFace::default(), canvas(width, height), &text)?;
        }

        #[test]
        fn prop_truetype_fit_is_largest_fitting_size(
            width in 5u32..300,
            height in 5u32..120,
            text in "[0-9: APM]{1,10}",
        ) {
            check_largest_fitting_size(dejavu_mono_bold(), canvas(width, height), &text)?;
        }

        #[test]
        fn prop_fit_is_monotonic_in_canvas(
            width in 5u32..200,
            height in 5u32..100,
            grow_width in 0u32..50,
            grow_height in 0u32..50,
            text in "[0-9: APM]{1,10}",
        ) {
            check_monotonic_in_canvas(
                &BlockFace::default(),
                canvas(width, height),
                canvas(width + grow_width, height + grow_height),
                &text,
            )?;
        }

        #[test]
        fn prop_truetype_fit_is_monotonic_in_canvas(
            width in 5u32..200,
            height in 5u32..100,
            grow_width in 0u32..50,
            grow_height in 0u32..50,
            text in "[0-9: APM]{1,10}",
        ) {
            check_monotonic_in_canvas(
                dejavu_mono_bold(),
                canvas(width, height),
                canvas(width + grow_width, height + grow_height),
                &text,
            )?;
        }
    }
}
