use std::time::Duration;

use ratatui::layout::Rect;

/// Formats a countdown as `MMm:SSs`; minutes keep growing past 99
pub fn format_remaining(remaining: Duration) -> String {
    let total = remaining.as_secs();
    format!("{:02}m:{:02}s", total / 60, total % 60)
}

/// A `width` x `height` rect centered in `area`, shrunk to fit if needed
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_remaining() {
        assert_eq!(format_remaining(Duration::from_secs(600)), "10m:00s");
        assert_eq!(format_remaining(Duration::from_secs(59)), "00m:59s");
        assert_eq!(format_remaining(Duration::ZERO), "00m:00s");
    }

    #[test]
    fn test_format_remaining_drops_fractions() {
        assert_eq!(format_remaining(Duration::from_millis(1999)), "00m:01s");
    }

    #[test]
    fn test_format_remaining_long_sessions() {
        assert_eq!(format_remaining(Duration::from_secs(125 * 60 + 5)), "125m:05s");
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(2, 3, 10, 4);
        assert_eq!(centered_rect(40, 10, area), area);
    }
}
