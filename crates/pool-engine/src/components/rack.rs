//! Rack layouts: where the fifteen object balls start.

use crate::core::vector::Vector2D;
use crate::systems::rng::Rng;

/// Standard 8-ball triangle, as (ball_number, row, vertical_offset) with
/// the offset in ball spacings. The apex points LEFT toward the cue ball,
/// rows spread RIGHT.
///
/// ```text
///  1          <- apex (row 0)
///  9   2      <- row 1
///  3   8  10  <- row 2
/// 11  4  5  12 <- row 3
///  6 13 14  7 15 <- row 4
/// ```
const STANDARD_LAYOUT: [(u8, usize, f64); 15] = [
    (1, 0, 0.0),
    (9, 1, -0.5), (2, 1, 0.5),
    (3, 2, -1.0), (8, 2, 0.0), (10, 2, 1.0),
    (11, 3, -1.5), (4, 3, -0.5), (5, 3, 0.5), (12, 3, 1.5),
    (6, 4, -2.0), (13, 4, -1.0), (14, 4, 0.0), (7, 4, 1.0), (15, 4, 2.0),
];

/// Gap left between neighbouring racked balls.
const RACK_GAP: f64 = 0.5;

fn slot_position(apex: Vector2D, ball_radius: f64, row: usize, v_offset: f64) -> Vector2D {
    let spacing = ball_radius * 2.0 + RACK_GAP;
    let row_offset = spacing * 0.866; // sqrt(3)/2 for equilateral triangle
    Vector2D::new(apex.x + row as f64 * row_offset, apex.y + v_offset * spacing)
}

/// Standard rack with its apex at `apex`, as (ball_number, position) pairs.
pub fn standard_rack(apex: Vector2D, ball_radius: f64) -> Vec<(u8, Vector2D)> {
    STANDARD_LAYOUT
        .iter()
        .map(|&(number, row, v)| (number, slot_position(apex, ball_radius, row, v)))
        .collect()
}

/// Same triangle with the balls shuffled. The 8-ball keeps the centre slot.
pub fn shuffled_rack(apex: Vector2D, ball_radius: f64, rng: &mut Rng) -> Vec<(u8, Vector2D)> {
    let mut numbers: Vec<u8> = (1..=15).filter(|&n| n != 8).collect();
    rng.shuffle(&mut numbers);
    let mut numbers = numbers.into_iter();

    STANDARD_LAYOUT
        .iter()
        .map(|&(slot_number, row, v)| {
            let number = if slot_number == 8 {
                8
            } else {
                numbers.next().unwrap_or(slot_number)
            };
            (number, slot_position(apex, ball_radius, row, v))
        })
        .collect()
}
