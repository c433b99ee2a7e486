use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = x0;
    let mut y = y0;

    loop {
        canvas.set_pixel(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;

        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }

        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Draw a circle outline using the midpoint algorithm (distance rings)
pub fn draw_ring(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    if radius <= 0 {
        return;
    }

    let mut x = radius;
    let mut y = 0;
    let mut err = 1 - radius;

    while x >= y {
        canvas.set_pixel(cx + x, cy + y);
        canvas.set_pixel(cx + y, cy + x);
        canvas.set_pixel(cx - y, cy + x);
        canvas.set_pixel(cx - x, cy + y);
        canvas.set_pixel(cx - x, cy - y);
        canvas.set_pixel(cx - y, cy - x);
        canvas.set_pixel(cx + y, cy - x);
        canvas.set_pixel(cx + x, cy - y);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Draw a filled circle (city dots)
pub fn draw_dot(canvas: &mut BrailleCanvas, cx: i32, cy: i32, radius: i32) {
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= radius * radius {
                canvas.set_pixel(cx + dx, cy + dy);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_line_sets_pixels() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        assert!(canvas.lit_pixels() >= 10);
    }

    #[test]
    fn test_negative_coords_are_ignored() {
        let mut canvas = BrailleCanvas::new(2, 2);
        draw_line(&mut canvas, -5, -5, -1, -1);
        assert_eq!(canvas.lit_pixels(), 0);
    }

    #[test]
    fn test_ring_stays_on_radius() {
        let mut canvas = BrailleCanvas::new(20, 10);
        draw_ring(&mut canvas, 20, 20, 10);
        // The center must stay unlit for an outline
        assert!(!canvas.pixel(20, 20));
        assert!(canvas.pixel(30, 20));
        assert!(canvas.pixel(10, 20));
        assert!(canvas.pixel(20, 30));
        assert!(canvas.pixel(20, 10));
    }

    #[test]
    fn test_dot_fills_center() {
        let mut canvas = BrailleCanvas::new(4, 2);
        draw_dot(&mut canvas, 3, 3, 1);
        assert!(canvas.pixel(3, 3));
        assert!(canvas.pixel(4, 3));
        assert!(canvas.pixel(3, 4));
    }
}
