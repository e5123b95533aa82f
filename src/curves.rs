//! Authored control-point tables for the flying actors
//!
//! Bats sweep back and forth above the forest along near-straight loops; the
//! ghost bobs on a small ring around the scene centre.

use glam::Vec3;

pub const BAT_01: &str = "bat01";
pub const BAT_02: &str = "bat02";
pub const BAT_03: &str = "bat03";
pub const GHOST: &str = "ghost";

/// Heights (z) sampled along the first bat path, x runs 11 -> -13 -> 13
const BAT_01_Z: [f32; 51] = [
    1.8, 1.8, 2.0, 1.9, 2.0, 2.0, 1.8, 1.9, 2.0, 2.0, 2.0, 1.9, 2.0, 2.0, 1.8, 1.9, 1.8, 2.0, 2.0,
    1.9, 1.8, 2.0, 1.8, 1.9, 2.0, 2.0, 2.0, 1.9, 2.0, 2.0, 1.8, 1.9, 2.0, 1.8, 2.0, 1.9, 2.0, 2.0,
    2.0, 1.9, 1.8, 2.0, 2.0, 1.8, 2.0, 2.0, 2.0, 1.8, 2.0, 2.0, 2.0,
];

const BAT_02_Z: [f32; 51] = [
    2.2, 2.2, 2.4, 2.3, 2.4, 2.4, 2.2, 2.3, 2.4, 2.4, 2.4, 2.3, 2.4, 2.4, 2.4, 2.3, 2.2, 2.1, 2.0,
    1.9, 1.8, 2.0, 1.8, 1.9, 2.0, 2.1, 2.2, 2.2, 2.2, 2.1, 1.9, 1.9, 2.0, 1.9, 1.9, 1.9, 1.9, 2.0,
    2.1, 2.1, 2.1, 2.0, 2.0, 2.0, 1.9, 1.9, 1.9, 1.9, 2.0, 2.0, 2.0,
];

const BAT_03_Y: [f32; 51] = [
    4.0, 3.9, 3.8, 3.7, 3.6, 3.5, 3.4, 3.3, 3.2, 3.1, 3.0, 2.9, 2.8, 2.7, 2.6, 2.5, 2.4, 2.3, 2.2,
    2.1, 2.0, 1.9, 1.8, 1.7, 1.5, 1.4, 1.3, 1.2, 1.0, 0.8, 0.9, 0.7, 0.5, 0.4, 0.3, 0.1, 0.0, -0.2,
    -0.4, -0.6, -0.8, -0.9, -1.0, -1.2, -1.4, -1.7, -1.9, -2.0, -2.1, -2.2, -2.4,
];

/// Bat loops wrap after this many points; the last table entry is never reached
const BAT_PATH_LEN: usize = 50;

/// x coordinate of the i-th point of a bat sweep: 11 down to -13, back up to 13
fn sweep_x(i: usize) -> f32 {
    let i = i as f32;
    if i <= 24.0 { 11.0 - i } else { i - 37.0 }
}

/// First bat path (constant y = 4.0)
pub fn bat_01() -> Vec<Vec3> {
    BAT_01_Z
        .iter()
        .take(BAT_PATH_LEN)
        .enumerate()
        .map(|(i, &z)| Vec3::new(sweep_x(i), 4.0, z))
        .collect()
}

/// Second bat path (constant y = 3.7)
pub fn bat_02() -> Vec<Vec3> {
    BAT_02_Z
        .iter()
        .take(BAT_PATH_LEN)
        .enumerate()
        .map(|(i, &z)| Vec3::new(sweep_x(i), 3.7, z))
        .collect()
}

/// Third bat path, drifting across the scene in y
pub fn bat_03() -> Vec<Vec3> {
    BAT_03_Y
        .iter()
        .zip(BAT_02_Z.iter())
        .take(BAT_PATH_LEN)
        .enumerate()
        .map(|(i, (&y, &z))| Vec3::new(sweep_x(i), y, z))
        .collect()
}

/// Ghost ring: radius 1.8, alternating heights, angle stepping by 15 (radians)
pub fn ghost() -> Vec<Vec3> {
    (0..25)
        .map(|i| {
            let angle = (i * 15) as f32;
            let z = if i % 2 == 0 { 0.5 } else { 0.2 };
            Vec3::new(angle.cos() * 1.8, angle.sin() * 1.8, z)
        })
        .collect()
}

/// All authored paths, keyed by name
pub fn authored() -> Vec<(String, Vec<Vec3>)> {
    vec![
        (BAT_01.to_string(), bat_01()),
        (BAT_02.to_string(), bat_02()),
        (BAT_03.to_string(), bat_03()),
        (GHOST.to_string(), ghost()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bat_sweep_turns_at_far_end() {
        let path = bat_01();
        assert_eq!(path.len(), 50);
        assert_eq!(path[0].x, 11.0);
        assert_eq!(path[24].x, -13.0);
        assert_eq!(path[25].x, -12.0);
        assert_eq!(path[49].x, 12.0);
    }

    #[test]
    fn test_bat_03_heights() {
        let path = bat_03();
        assert_eq!(path[0], Vec3::new(11.0, 4.0, 2.2));
        assert_eq!(path[49], Vec3::new(12.0, -2.2, 2.0));
    }

    #[test]
    fn test_ghost_ring_radius() {
        for p in ghost() {
            let r = (p.x * p.x + p.y * p.y).sqrt();
            assert!((r - 1.8).abs() < 1e-4);
        }
    }
}
