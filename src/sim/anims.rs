//! Sprite-sheet animation clips
//!
//! Clips are registered once per scene and referenced by key. Each sprite
//! owns an `Animator` that tracks the playing clip and its current frame.

/// Animation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimKey {
    /// Walk left
    Left,
    /// Idle, facing the camera
    Turn,
    /// Walk right
    Right,
}

/// A named run of sprite-sheet frames
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationClip {
    pub key: AnimKey,
    /// Sheet frame indices in playback order
    pub frames: Vec<u32>,
    /// Frames per second
    pub frame_rate: f32,
    /// Loop forever instead of holding the last frame
    pub repeat: bool,
}

impl AnimationClip {
    /// Clip over an inclusive frame range
    pub fn range(key: AnimKey, start: u32, end: u32, frame_rate: f32, repeat: bool) -> Self {
        Self {
            key,
            frames: (start..=end).collect(),
            frame_rate,
            repeat,
        }
    }

    /// Single-frame clip
    pub fn single(key: AnimKey, frame: u32, frame_rate: f32) -> Self {
        Self {
            key,
            frames: vec![frame],
            frame_rate,
            repeat: false,
        }
    }

    fn frame_duration(&self) -> f32 {
        if self.frame_rate > 0.0 {
            1.0 / self.frame_rate
        } else {
            f32::INFINITY
        }
    }
}

/// Clip registry
#[derive(Debug, Clone, Default)]
pub struct AnimationSet {
    clips: Vec<AnimationClip>,
}

impl AnimationSet {
    pub fn new() -> Self {
        Self { clips: Vec::new() }
    }

    /// The player's walk-left / idle / walk-right clips
    pub fn player() -> Self {
        let mut set = Self::new();
        set.add(AnimationClip::range(AnimKey::Left, 0, 3, 10.0, true));
        set.add(AnimationClip::single(AnimKey::Turn, 4, 20.0));
        set.add(AnimationClip::range(AnimKey::Right, 5, 8, 10.0, true));
        set
    }

    /// Register a clip; an existing clip with the same key is kept
    pub fn add(&mut self, clip: AnimationClip) -> bool {
        if self.get(clip.key).is_some() {
            log::warn!("Animation {:?} already registered", clip.key);
            return false;
        }
        self.clips.push(clip);
        true
    }

    pub fn get(&self, key: AnimKey) -> Option<&AnimationClip> {
        self.clips.iter().find(|c| c.key == key)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Per-sprite playback state
#[derive(Debug, Clone, Default)]
pub struct Animator {
    current: Option<AnimKey>,
    frame_index: usize,
    elapsed: f32,
}

impl Animator {
    pub fn current(&self) -> Option<AnimKey> {
        self.current
    }

    /// Start a clip from its first frame. With `ignore_if_playing`, a clip
    /// that is already running keeps its progress.
    pub fn play(&mut self, key: AnimKey, ignore_if_playing: bool) {
        if ignore_if_playing && self.current == Some(key) {
            return;
        }
        self.current = Some(key);
        self.frame_index = 0;
        self.elapsed = 0.0;
    }

    /// Advance playback by `dt` seconds
    pub fn advance(&mut self, set: &AnimationSet, dt: f32) {
        let Some(clip) = self.current.and_then(|key| set.get(key)) else {
            return;
        };
        if clip.frames.len() < 2 {
            return;
        }

        self.elapsed += dt;
        let step = clip.frame_duration();
        while self.elapsed >= step {
            self.elapsed -= step;
            if self.frame_index + 1 < clip.frames.len() {
                self.frame_index += 1;
            } else if clip.repeat {
                self.frame_index = 0;
            } else {
                self.elapsed = 0.0;
                break;
            }
        }
    }

    /// Sheet frame currently shown, if a known clip is playing
    pub fn frame(&self, set: &AnimationSet) -> Option<u32> {
        let clip = set.get(self.current?)?;
        clip.frames.get(self.frame_index).copied()
    }
}
