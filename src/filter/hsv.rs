//! 8-bit HSV conversion with hue in 0..180 (two degrees per step).

/// Number of hue steps in a full turn
pub const HUE_RANGE: u16 = 180;

/// Convert one pixel to `[hue, saturation, value]`
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> [u8; 3] {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = (max - min) as f32;

    let v = max;
    let s = if max == 0 {
        0
    } else {
        (255.0 * diff / max as f32).round() as u8
    };

    if diff == 0.0 {
        return [0, s, v];
    }

    let (r, g, b) = (r as f32, g as f32, b as f32);
    let mut degrees = if max as f32 == r {
        60.0 * (g - b) / diff
    } else if max as f32 == g {
        120.0 + 60.0 * (b - r) / diff
    } else {
        240.0 + 60.0 * (r - g) / diff
    };
    if degrees < 0.0 {
        degrees += 360.0;
    }

    let mut h = (degrees / 2.0).round() as u16;
    if h >= HUE_RANGE {
        h -= HUE_RANGE;
    }

    [h as u8, s, v]
}

/// Convert `[hue, saturation, value]` back to `(r, g, b)`
pub fn hsv_to_rgb(h: u8, s: u8, v: u8) -> (u8, u8, u8) {
    if s == 0 {
        return (v, v, v);
    }

    let sector_pos = (h as u16 % HUE_RANGE) as f32 / 30.0;
    let sector = sector_pos.floor();
    let frac = sector_pos - sector;

    let s = s as f32 / 255.0;
    let v = v as f32 / 255.0;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * frac);
    let t = v * (1.0 - s * (1.0 - frac));

    let (r, g, b) = match sector as u8 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    (to_byte(r), to_byte(g), to_byte(b))
}

fn to_byte(unit: f32) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primaries() {
        assert_eq!(rgb_to_hsv(255, 0, 0), [0, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 255, 0), [60, 255, 255]);
        assert_eq!(rgb_to_hsv(0, 0, 255), [120, 255, 255]);
        assert_eq!(rgb_to_hsv(255, 255, 0), [30, 255, 255]);

        assert_eq!(hsv_to_rgb(0, 255, 255), (255, 0, 0));
        assert_eq!(hsv_to_rgb(60, 255, 255), (0, 255, 0));
        assert_eq!(hsv_to_rgb(120, 255, 255), (0, 0, 255));
        assert_eq!(hsv_to_rgb(30, 255, 255), (255, 255, 0));
    }

    #[test]
    fn test_grays_have_no_hue_or_saturation() {
        for level in [0u8, 1, 77, 128, 254, 255] {
            assert_eq!(rgb_to_hsv(level, level, level), [0, 0, level]);
            assert_eq!(hsv_to_rgb(97, 0, level), (level, level, level));
        }
    }

    #[test]
    fn test_partial_saturation() {
        // 255 - 55 = 200 of 255
        assert_eq!(rgb_to_hsv(55, 55, 255), [120, 200, 255]);
        assert_eq!(hsv_to_rgb(60, 20, 255), (235, 255, 235));
    }

    #[test]
    fn test_magenta_wraps_below_full_turn() {
        let [h, _, _] = rgb_to_hsv(255, 0, 1);
        assert!(h < 180);
        assert!(h >= 179 || h == 0);
    }
}
