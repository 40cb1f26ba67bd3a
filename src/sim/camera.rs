//! Horizontal scroll offset

/// Clamp the desired camera x to the map: never left of 0, never past the
/// point where the view's right edge meets the map's right edge.
///
/// Maps narrower than the view pin the camera at 0.
pub fn camera_offset(desired_x: i32, view_width: i32, map_width: i32) -> i32 {
    let max_offset = (map_width - view_width).max(0);
    desired_x.clamp(0, max_offset)
}
