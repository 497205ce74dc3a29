use crate::rect::Rect;
use crate::units::Pt;

/// Scales an image of `width` x `height` pixels to fit entirely inside `target` while
/// preserving its aspect ratio, and centres it both horizontally and vertically.
///
/// The image is never cropped and never exceeds the target. Returns [None] when the
/// image has no pixels or the target has no area.
pub fn contain_fit(width: u32, height: u32, target: &Rect) -> Option<Rect> {
    let (target_width, target_height) = (target.width(), target.height());
    if width == 0 || height == 0 || target_width <= Pt(0.0) || target_height <= Pt(0.0) {
        return None;
    }

    let scale = (target_width.0 / width as f32).min(target_height.0 / height as f32);
    let fitted_width = Pt(width as f32 * scale).min(target_width);
    let fitted_height = Pt(height as f32 * scale).min(target_height);

    let x = target.x1 + (target_width - fitted_width) / 2.0;
    let y = target.y1 + (target_height - fitted_height) / 2.0;
    Some(Rect::from_origin(x, y, fitted_width, fitted_height))
}
