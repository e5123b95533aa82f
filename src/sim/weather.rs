//! Weather and lighting switches
//!
//! While it rains (and the user has not forced the sun on) the sun light
//! flashes twice at the start of every lightning cycle.

use serde::{Deserialize, Serialize};

use crate::consts::LIGHTNING_PERIOD_MS;

/// Flash windows within one lightning cycle, in milliseconds `[start, end)`
const LIGHTNING_FLASHES_MS: [(i64, i64); 2] = [(0, 225), (250, 400)];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherState {
    pub rain: bool,
    pub fog: bool,
    /// Daylight; off means moonlight
    pub sun_on: bool,
    /// Sun switched on by the user, lightning leaves it alone
    pub sun_forced: bool,
    /// Camera-mounted flashlight
    pub reflector_on: bool,
}

impl WeatherState {
    pub fn toggle_rain(&mut self) {
        self.rain = !self.rain;
    }

    pub fn toggle_fog(&mut self) {
        self.fog = !self.fog;
    }

    pub fn toggle_sun(&mut self) {
        self.sun_on = !self.sun_on;
        self.sun_forced = !self.sun_forced;
    }

    pub fn toggle_reflector(&mut self) {
        self.reflector_on = !self.reflector_on;
    }

    /// Run the lightning cycle at simulation time `now`
    pub fn update(&mut self, now: f32) {
        if self.rain && !self.sun_forced {
            self.sun_on = lightning_flash(now);
        }
    }

    /// State after a scene reset: everything off except the fog setting
    pub fn after_reset(&self) -> Self {
        Self {
            fog: self.fog,
            ..Self::default()
        }
    }
}

/// Whether a lightning flash is showing at `now` (seconds)
pub fn lightning_flash(now: f32) -> bool {
    let ms = ((now * 1000.0) as i64).rem_euclid(LIGHTNING_PERIOD_MS);
    LIGHTNING_FLASHES_MS
        .iter()
        .any(|&(start, end)| (start..end).contains(&ms))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_windows() {
        for now in [0.0, 0.1, 0.224, 0.25, 0.3, 0.399, 7.1, 14.3] {
            assert!(lightning_flash(now), "now = {now}");
        }
        for now in [0.226, 0.24, 0.4, 0.5, 3.5, 6.999] {
            assert!(!lightning_flash(now), "now = {now}");
        }
    }

    #[test]
    fn test_lightning_only_while_raining() {
        let mut weather = WeatherState::default();
        weather.update(0.1);
        assert!(!weather.sun_on);

        weather.toggle_rain();
        weather.update(0.1);
        assert!(weather.sun_on);
        weather.update(0.24);
        assert!(!weather.sun_on);
        weather.update(7.3);
        assert!(weather.sun_on);
        weather.update(8.0);
        assert!(!weather.sun_on);
    }

    #[test]
    fn test_forced_sun_ignores_lightning() {
        let mut weather = WeatherState::default();
        weather.toggle_rain();
        weather.toggle_sun();
        assert!(weather.sun_on && weather.sun_forced);
        weather.update(3.5);
        assert!(weather.sun_on);

        weather.toggle_sun();
        assert!(!weather.sun_on && !weather.sun_forced);
        weather.update(0.3);
        assert!(weather.sun_on);
    }

    #[test]
    fn test_reset_keeps_only_fog() {
        let weather = WeatherState {
            rain: true,
            fog: true,
            sun_on: true,
            sun_forced: true,
            reflector_on: true,
        };
        let reset = weather.after_reset();
        assert_eq!(
            reset,
            WeatherState {
                fog: true,
                ..WeatherState::default()
            }
        );
    }
}
