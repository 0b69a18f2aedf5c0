//! Avatar state machine.
//!
//! The visual state is derived purely from a [`MoodTag`]: [`describe`] maps a
//! mood to a [`RenderDescriptor`] that the rendering layer consumes. The
//! [`Avatar`] wrapper only tracks which mood is active and the transient
//! "clicked" pulse, which is independent of the mood.

use std::time::{Duration, Instant};

use crate::core::emotion::MoodTag;

/// How long the click pulse stays visible.
pub const PULSE_DURATION: Duration = Duration::from_millis(400);

/// Shape of both eyes for a given mood.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeShape {
    /// Upward arcs, shared by happy and excited.
    Smiling,
    /// Downward arcs.
    Drooping,
    /// Open almond eyes used by every other state.
    Open,
}

impl EyeShape {
    pub fn for_mood(mood: MoodTag) -> Self {
        match mood {
            MoodTag::Happy | MoodTag::Excited => EyeShape::Smiling,
            MoodTag::Sad => EyeShape::Drooping,
            MoodTag::Idle | MoodTag::Thinking | MoodTag::Talking | MoodTag::Confused => {
                EyeShape::Open
            }
        }
    }

    /// Path data for the left and right eye on a 120x100 canvas.
    pub fn paths(self) -> (&'static str, &'static str) {
        match self {
            EyeShape::Smiling => ("M 35 50 Q 45 45, 55 50", "M 65 50 Q 75 45, 85 50"),
            EyeShape::Drooping => ("M 35 50 Q 45 55, 55 50", "M 65 50 Q 75 55, 85 50"),
            EyeShape::Open => (
                "M 35 50 C 40 45, 50 45, 55 50 C 50 55, 40 55, 35 50",
                "M 65 50 C 70 45, 80 45, 85 50 C 80 55, 70 55, 65 50",
            ),
        }
    }
}

/// Everything a renderer needs to draw the avatar in a given mood.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderDescriptor {
    pub mood: MoodTag,
    pub eyes: EyeShape,
    pub style_class: String,
    pub left_eye: &'static str,
    pub right_eye: &'static str,
}

pub fn describe(mood: MoodTag) -> RenderDescriptor {
    let eyes = EyeShape::for_mood(mood);
    let (left_eye, right_eye) = eyes.paths();
    RenderDescriptor {
        mood,
        eyes,
        style_class: format!("pet-{}", mood.as_str()),
        left_eye,
        right_eye,
    }
}

#[derive(Debug, Clone)]
pub struct Avatar {
    descriptor: RenderDescriptor,
    pulse_until: Option<Instant>,
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new(MoodTag::Idle)
    }
}

impl Avatar {
    pub fn new(mood: MoodTag) -> Self {
        Self {
            descriptor: describe(mood),
            pulse_until: None,
        }
    }

    pub fn mood(&self) -> MoodTag {
        self.descriptor.mood
    }

    pub fn descriptor(&self) -> &RenderDescriptor {
        &self.descriptor
    }

    /// Switch to `mood`. Returns `false` when it was already active.
    pub fn set_state(&mut self, mood: MoodTag) -> bool {
        if self.descriptor.mood == mood {
            return false;
        }
        self.descriptor = describe(mood);
        true
    }

    pub fn pulse(&mut self, now: Instant) {
        self.pulse_until = Some(now + PULSE_DURATION);
    }

    pub fn is_pulsing(&self, now: Instant) -> bool {
        self.pulse_until.is_some_and(|until| now < until)
    }
}
