//! Calendar domain — the in-game day clock.
//!
//! Crops grow on a day cycle, not per frame: the clock accumulates real
//! seconds and fires one `DayEndEvent` per `SECONDS_PER_DAY`. The world
//! domain reacts to the event; nothing else owns day boundaries.

use bevy::prelude::*;
use crate::shared::*;

#[derive(Resource, Debug, Clone)]
pub struct DayClock {
    pub day: u32,
    /// Accumulator for sub-day ticks, in real seconds.
    pub elapsed: f32,
}

impl Default for DayClock {
    fn default() -> Self {
        Self { day: 1, elapsed: 0.0 }
    }
}

pub struct CalendarPlugin;

impl Plugin for CalendarPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DayClock>().add_systems(
            Update,
            tick_day_clock.run_if(in_state(GameState::Playing)),
        );
    }
}

fn tick_day_clock(
    time: Res<Time>,
    mut clock: ResMut<DayClock>,
    mut day_end_events: EventWriter<DayEndEvent>,
) {
    clock.elapsed += time.delta_secs();
    while clock.elapsed >= SECONDS_PER_DAY {
        clock.elapsed -= SECONDS_PER_DAY;
        clock.day += 1;
        day_end_events.send(DayEndEvent { day: clock.day - 1 });
        info!("[Calendar] Day {} begins", clock.day);
    }
}
