// Animation kinds and their sprite sheet descriptors

use crate::config::{AnimationsConfig, SheetConfig};

/// The four mutually exclusive animations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationKind {
    #[default]
    Idle,
    Run,
    Attack,
    Jump,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 4] = [
        AnimationKind::Idle,
        AnimationKind::Run,
        AnimationKind::Attack,
        AnimationKind::Jump,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Run => "run",
            Self::Attack => "attack",
            Self::Jump => "jump",
        }
    }

    /// Plays once, then hands back to idle
    pub fn is_one_shot(&self) -> bool {
        matches!(self, Self::Attack | Self::Jump)
    }

    fn index(&self) -> usize {
        match self {
            Self::Idle => 0,
            Self::Run => 1,
            Self::Attack => 2,
            Self::Jump => 3,
        }
    }
}

/// Immutable per-kind record: how the kind's sprite sheet is laid out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationDescriptor {
    pub kind: AnimationKind,
    /// Frames in one playthrough
    pub frame_count: usize,
    /// Columns the sheet is sliced into
    pub column_count: u32,
    /// Sheet file name under the textures directory
    pub sheet: String,
    /// Sound file name under the sounds directory
    pub sound: Option<String>,
}

impl AnimationDescriptor {
    fn from_config(kind: AnimationKind, config: &SheetConfig) -> Self {
        Self {
            kind,
            frame_count: config.frames.max(1) as usize,
            column_count: config.columns.max(1),
            sheet: config.sheet.clone(),
            sound: config.sound.clone(),
        }
    }
}

/// One descriptor per kind
#[derive(Debug, Clone)]
pub struct AnimationSet {
    descriptors: [AnimationDescriptor; 4],
}

impl AnimationSet {
    pub fn from_config(config: &AnimationsConfig) -> Self {
        Self {
            descriptors: [
                AnimationDescriptor::from_config(AnimationKind::Idle, &config.idle),
                AnimationDescriptor::from_config(AnimationKind::Run, &config.run),
                AnimationDescriptor::from_config(AnimationKind::Attack, &config.attack),
                AnimationDescriptor::from_config(AnimationKind::Jump, &config.jump),
            ],
        }
    }

    pub fn get(&self, kind: AnimationKind) -> &AnimationDescriptor {
        &self.descriptors[kind.index()]
    }

    pub fn frame_count(&self, kind: AnimationKind) -> usize {
        self.get(kind).frame_count
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationDescriptor> {
        self.descriptors.iter()
    }

    /// Distinct sheet files, in kind order
    pub fn sheet_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for descriptor in &self.descriptors {
            if !names.contains(&descriptor.sheet.as_str()) {
                names.push(&descriptor.sheet);
            }
        }
        names
    }
}

impl Default for AnimationSet {
    fn default() -> Self {
        Self::from_config(&AnimationsConfig::default())
    }
}
