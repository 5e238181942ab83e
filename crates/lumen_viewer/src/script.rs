//! Scripted keyboard input.
//!
//! A script is a list of steps, each holding a set of keys for a number of
//! frames. Movement keys are held for the whole step; toggle keys fire once
//! on the step's first frame.
//!
//! | Key | Action |
//! |-----|--------|
//! | W / S | forward / back |
//! | D / A | right / left |
//! | E / Q | up / down |
//! | L / J | yaw right / left |
//! | I / K | pitch up / down |
//! | 1 | toggle shadows |
//! | 2 | cycle lighting mode |

use lumen_renderer::CameraInput;
use serde::{Deserialize, Serialize};

const KNOWN_KEYS: &str = "WSADEQLJIK12";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptStep {
    pub frames: u32,
    pub keys: String,
}

impl ScriptStep {
    fn pressed(&self, key: char) -> bool {
        self.keys.chars().any(|c| c.eq_ignore_ascii_case(&key))
    }

    pub(crate) fn warn_unknown_keys(&self) {
        for c in self.keys.chars() {
            if !KNOWN_KEYS.contains(c.to_ascii_uppercase()) {
                log::warn!("Ignoring unknown script key '{c}'");
            }
        }
    }
}

/// Everything the frame loop needs from the script for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub camera: CameraInput,
    pub toggle_shadows: bool,
    pub cycle_lighting: bool,
}

/// Input for `frame` (0-based). Frames past the end of the script are idle.
pub fn frame_input(script: &[ScriptStep], frame: u32) -> FrameInput {
    let mut start = 0;
    for step in script {
        if frame < start + step.frames {
            return step_input(step, frame == start);
        }
        start += step.frames;
    }
    FrameInput::default()
}

fn step_input(step: &ScriptStep, first_frame: bool) -> FrameInput {
    let axis = |positive: char, negative: char| {
        let mut value = 0.0;
        if step.pressed(positive) {
            value += 1.0;
        }
        if step.pressed(negative) {
            value -= 1.0;
        }
        value
    };

    FrameInput {
        camera: CameraInput {
            move_forward: axis('W', 'S'),
            move_right: axis('D', 'A'),
            move_up: axis('E', 'Q'),
            yaw: axis('L', 'J'),
            pitch: axis('I', 'K'),
        },
        toggle_shadows: first_frame && step.pressed('1'),
        cycle_lighting: first_frame && step.pressed('2'),
    }
}
