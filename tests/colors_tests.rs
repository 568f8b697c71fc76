//! Integration tests for the HSV color model and hue spreading

mod common;
use common::*;

use palette::{FromColor, Hsv, Srgb};
use rgb_ambient::{GOLDEN_DISTANCE, HsvColor, SpreadDistance, generate_spread_colors};

#[test]
fn zero_saturation_is_gray_regardless_of_hue() {
    for i in 0..20 {
        let h = i as f64 / 20.0;
        for v in [0.0, 0.1, 0.5, 0.7, 0.999, 1.0] {
            let c = HsvColor::new(h, 0.0, v).to_color().unwrap();
            let expected = (255.0 * v).floor() as u8;
            assert_eq!((c.red, c.green, c.blue), (expected, expected, expected), "h={h} v={v}");
            assert_eq!(c.alpha, 255);
        }
    }
}

#[test]
fn full_saturation_has_one_channel_at_max_and_one_at_zero() {
    // Sample sector interiors; exact sector boundaries put two channels at 255.
    for i in 0..600 {
        let h = (i as f64 + 0.5) / 600.0;
        let c = HsvColor::new(h, 1.0, 1.0).to_color().unwrap();
        let channels = [c.red, c.green, c.blue];
        assert_eq!(channels.iter().filter(|&&x| x == 255).count(), 1, "h={h}");
        assert!(channels.contains(&0), "h={h}");
    }
}

#[test]
fn conversion_agrees_with_palette_within_one_step() {
    for i in 0..72 {
        for (s, v) in [(1.0, 1.0), (0.5, 0.8), (0.99, 0.7), (0.2, 0.3)] {
            let h = i as f64 / 72.0;
            let ours = HsvColor::new(h, s, v).to_color().unwrap();
            let reference: Srgb<u8> =
                Srgb::from_color(Hsv::new((h * 360.0) as f32, s as f32, v as f32)).into_format();

            assert!((ours.red as i16 - reference.red as i16).abs() <= 1, "h={h} s={s} v={v}");
            assert!((ours.green as i16 - reference.green as i16).abs() <= 1, "h={h} s={s} v={v}");
            assert!((ours.blue as i16 - reference.blue as i16).abs() <= 1, "h={h} s={s} v={v}");
        }
    }
}

#[test]
fn out_of_domain_hue_is_an_error() {
    let bad = HsvColor { h: 1.5, s: 0.5, v: 0.5 };
    let err = bad.to_color().unwrap_err();
    assert!(err.to_string().contains("H=1.5"));
}

#[test]
fn spread_with_fixed_distance_is_exact() {
    let colors = generate_spread_colors(5, Some(0.2));
    let expected = [0.6, 0.8, 0.0, 0.2, 0.4];
    for (color, h) in colors.iter().zip(expected) {
        assert!(hues_equal(color.h, h), "{} != {h}", color.h);
        assert_eq!(color.s, 0.99);
        assert_eq!(color.v, 0.7);
    }
}

#[test]
fn default_spread_uses_golden_distance() {
    let colors = generate_spread_colors(3, None);
    assert!(values_equal_epsilon(colors[0].h, 0.6, 1e-12));
    assert!(hues_equal(colors[1].h, 0.6 + GOLDEN_DISTANCE));
    assert!(hues_equal(colors[2].h, 0.6 + 2.0 * GOLDEN_DISTANCE));
}

fn min_gap(colors: &[HsvColor]) -> f64 {
    let mut min = f64::INFINITY;
    for (i, a) in colors.iter().enumerate() {
        for b in &colors[i + 1..] {
            min = min.min(hue_distance(a.h, b.h));
        }
    }
    min
}

#[test]
fn golden_spread_never_repeats_a_hue() {
    for k in 2..=64 {
        let colors = generate_spread_colors(k, None);
        assert!(min_gap(&colors) > 1e-3, "k={k}");
    }
}

#[test]
fn golden_spread_beats_small_denominator_rational_steps() {
    for k in 2..=12 {
        let golden = min_gap(&generate_spread_colors(k, None));
        for q in 1..k {
            for p in 1..q.max(2) {
                let rational = min_gap(&generate_spread_colors(k, Some(p as f64 / q as f64)));
                assert!(golden > rational, "k={k} p/q={p}/{q}");
            }
        }
    }
}

#[test]
fn even_spread_splits_the_wheel() {
    let distance = SpreadDistance::Even.resolve(4);
    let colors = generate_spread_colors(4, Some(distance));
    assert!(values_equal_epsilon(min_gap(&colors), 0.25, 1e-12));
}
