//! Character animation state machine.
//!
//! A dense (activity × facing) table of clip timings, and a per-entity
//! runtime that advances frames from delta time. The renderer reads
//! `frame_descriptor()` to pick a sprite-sheet region; nothing here touches
//! pixels.

use bevy::prelude::*;
use crate::shared::*;

/// Frame count and per-frame duration for one (activity, facing) pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClip {
    pub frame_count: u32,
    pub frame_secs: f32,
}

/// Clip table indexed by `(ActivityState, Facing)`. Dense, so every pair
/// always resolves; a zero-frame clip is a data-authoring bug caught by
/// `validate` at startup.
#[derive(Resource, Debug, Clone)]
pub struct AnimationSet {
    clips: [[AnimationClip; FACING_COUNT]; ACTIVITY_COUNT],
}

impl AnimationSet {
    /// The character sheet's timings: a slow 4-frame idle, a brisk 4-frame
    /// walk cycle, and 3-frame swings for every tool.
    pub fn standard() -> Self {
        let mut clips =
            [[AnimationClip { frame_count: 0, frame_secs: 0.0 }; FACING_COUNT]; ACTIVITY_COUNT];
        for activity in ActivityState::ALL {
            let clip = match activity {
                ActivityState::Idle => AnimationClip { frame_count: 4, frame_secs: 0.4 },
                ActivityState::Walk => AnimationClip { frame_count: 4, frame_secs: 0.15 },
                _ => AnimationClip { frame_count: 3, frame_secs: 0.2 },
            };
            for facing in Facing::ALL {
                clips[activity.index()][facing.index()] = clip;
            }
        }
        Self { clips }
    }

    pub fn clip(&self, activity: ActivityState, facing: Facing) -> AnimationClip {
        self.clips[activity.index()][facing.index()]
    }

    /// Fails loudly on an unusable clip — a broken animation table is a
    /// configuration error, not something to limp past at runtime.
    pub fn validate(&self) {
        for activity in ActivityState::ALL {
            for facing in Facing::ALL {
                let clip = self.clip(activity, facing);
                if clip.frame_count == 0 || clip.frame_secs <= 0.0 {
                    error!(
                        "[Player] Unusable animation clip for {:?}/{:?}: {:?}",
                        activity, facing, clip
                    );
                    panic!("animation table is incomplete");
                }
            }
        }
    }
}

impl Default for AnimationSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Per-entity animation state. Owned exclusively by the entity it animates.
#[derive(Component, Debug, Clone)]
pub struct AnimationRuntime {
    activity: ActivityState,
    facing: Facing,
    frame: u32,
    elapsed: f32,
}

impl AnimationRuntime {
    pub fn new(activity: ActivityState, facing: Facing) -> Self {
        Self {
            activity,
            facing,
            frame: 0,
            elapsed: 0.0,
        }
    }

    pub fn activity(&self) -> ActivityState {
        self.activity
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Switch clips. Any change to activity OR facing restarts the sequence
    /// from frame 0, so tool and walk animations never start mid-cycle.
    /// An unchanged (activity, facing) pair keeps the current frame/timer.
    pub fn set_state(&mut self, activity: ActivityState, facing: Facing) {
        if activity == self.activity && facing == self.facing {
            return;
        }
        self.activity = activity;
        self.facing = facing;
        self.frame = 0;
        self.elapsed = 0.0;
    }

    /// Advance the frame timer by `dt` seconds, wrapping the frame index
    /// within the active clip.
    pub fn tick(&mut self, dt: f32, set: &AnimationSet) {
        let clip = set.clip(self.activity, self.facing);
        self.elapsed += dt;
        while self.elapsed >= clip.frame_secs {
            self.elapsed -= clip.frame_secs;
            self.frame = (self.frame + 1) % clip.frame_count;
        }
    }

    /// What the renderer needs to pick an image region.
    pub fn frame_descriptor(&self) -> (ActivityState, Facing, u32) {
        (self.activity, self.facing, self.frame)
    }
}

/// Tick every animated player once per frame, after movement and tool
/// dispatch have settled the (activity, facing) state.
pub fn animate_player(
    time: Res<Time>,
    set: Res<AnimationSet>,
    mut query: Query<&mut AnimationRuntime, With<Player>>,
) {
    for mut anim in query.iter_mut() {
        anim.tick(time.delta_secs(), &set);
    }
}
