// Character animation state machine

use super::kind::{AnimationKind, AnimationSet};

/// Render ticks per animation frame unless configured otherwise
pub const DEFAULT_TICKS_PER_FRAME: u32 = 10;

/// A request to change what the character is doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Run,
    Attack,
    Jump,
    /// The run input was let go
    ReleaseRun,
}

/// An applied state change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: AnimationKind,
    pub to: AnimationKind,
}

/// What the sound board should do because of a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Play(AnimationKind),
    /// Pause and rewind
    Stop(AnimationKind),
}

impl Transition {
    /// Silence the kind being left, then start the kind being entered
    pub fn sound_cues(&self) -> [SoundCue; 2] {
        [SoundCue::Stop(self.from), SoundCue::Play(self.to)]
    }
}

/// A request whose guard did not hold. The state is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{request:?} ignored while {}", .state.name())]
pub struct RejectedRequest {
    pub request: Request,
    pub state: AnimationKind,
}

/// Which animation is showing, which frame of it, and how close the next frame is.
///
/// Running, attacking and jumping are all read off `kind`, so at most one of
/// them can hold at a time.
#[derive(Debug, Clone)]
pub struct AnimationState {
    kind: AnimationKind,
    frame: usize,
    frames_since_advance: u32,
    ticks_per_frame: u32,
}

impl Default for AnimationState {
    fn default() -> Self {
        Self::new(DEFAULT_TICKS_PER_FRAME)
    }
}

impl AnimationState {
    pub fn new(ticks_per_frame: u32) -> Self {
        Self {
            kind: AnimationKind::Idle,
            frame: 0,
            frames_since_advance: 0,
            ticks_per_frame: ticks_per_frame.max(1),
        }
    }

    pub fn kind(&self) -> AnimationKind {
        self.kind
    }

    #[cfg(test)]
    pub fn frame(&self) -> usize {
        self.frame
    }

    #[cfg(test)]
    pub fn frames_since_advance(&self) -> u32 {
        self.frames_since_advance
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.kind == AnimationKind::Run
    }

    #[cfg(test)]
    pub fn is_attacking(&self) -> bool {
        self.kind == AnimationKind::Attack
    }

    #[cfg(test)]
    pub fn is_jumping(&self) -> bool {
        self.kind == AnimationKind::Jump
    }

    /// Guard table. `None` means the request is ignored from `from`.
    ///
    /// Attack and jump may cut a run short; run never interrupts anything.
    fn target(from: AnimationKind, request: Request) -> Option<AnimationKind> {
        use AnimationKind as Kind;

        match (request, from) {
            (Request::Run, Kind::Idle) => Some(Kind::Run),
            (Request::Attack, Kind::Idle | Kind::Run) => Some(Kind::Attack),
            (Request::Jump, Kind::Idle | Kind::Run) => Some(Kind::Jump),
            (Request::ReleaseRun, Kind::Run) => Some(Kind::Idle),
            _ => None,
        }
    }

    /// Apply a request if its guard holds
    pub fn request(&mut self, request: Request) -> Result<Transition, RejectedRequest> {
        let to = Self::target(self.kind, request).ok_or(RejectedRequest {
            request,
            state: self.kind,
        })?;

        let transition = Transition { from: self.kind, to };
        self.kind = to;

        // Releasing run keeps the frame; idle picks it up modulo its own length
        if request != Request::ReleaseRun {
            self.frame = 0;
            self.frames_since_advance = 0;
        }

        Ok(transition)
    }

    /// Bring the frame index into range for the current kind and return it
    pub fn wrap_frame(&mut self, animations: &AnimationSet) -> usize {
        self.frame %= animations.frame_count(self.kind);
        self.frame
    }

    /// Count one rendered tick, step the frame when due, and finish a
    /// one-shot animation that has reached its last frame.
    pub fn advance(&mut self, animations: &AnimationSet) -> Option<Transition> {
        let frame_count = animations.frame_count(self.kind);

        self.frames_since_advance += 1;
        if self.frames_since_advance >= self.ticks_per_frame {
            self.frame += 1;
            self.frames_since_advance = 0;
        }

        let finished = self.kind.is_one_shot() && self.frame == frame_count - 1;
        let transition = finished.then(|| {
            let transition = Transition {
                from: self.kind,
                to: AnimationKind::Idle,
            };
            self.kind = AnimationKind::Idle;
            transition
        });

        self.wrap_frame(animations);
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn tick(state: &mut AnimationState, set: &AnimationSet, times: usize) -> Vec<Transition> {
        let mut transitions = Vec::new();
        for _ in 0..times {
            state.wrap_frame(set);
            transitions.extend(state.advance(set));
        }
        transitions
    }

    fn active_flags(state: &AnimationState) -> usize {
        [state.is_running(), state.is_attacking(), state.is_jumping()]
            .iter()
            .filter(|flag| **flag)
            .count()
    }

    #[test]
    fn test_initial_state() {
        let state = AnimationState::default();
        assert_eq!(state.kind(), AnimationKind::Idle);
        assert_eq!(state.frame(), 0);
        assert_eq!(active_flags(&state), 0);
    }

    #[test]
    fn test_run_from_idle() {
        let mut state = AnimationState::default();
        let transition = state.request(Request::Run).unwrap();
        assert_eq!(
            transition,
            Transition {
                from: AnimationKind::Idle,
                to: AnimationKind::Run
            }
        );
        assert!(state.is_running());
        assert_eq!(state.frame(), 0);
    }

    #[test]
    fn test_run_ignored_while_attacking() {
        let mut state = AnimationState::default();
        state.request(Request::Attack).unwrap();

        let err = state.request(Request::Run).unwrap_err();
        assert_eq!(err.state, AnimationKind::Attack);
        assert!(state.is_attacking());
        assert!(!state.is_running());
    }

    #[test]
    fn test_run_ignored_while_running_or_jumping() {
        let mut state = AnimationState::default();
        state.request(Request::Run).unwrap();
        assert!(state.request(Request::Run).is_err());

        let mut state = AnimationState::default();
        state.request(Request::Jump).unwrap();
        assert!(state.request(Request::Run).is_err());
        assert!(state.is_jumping());
    }

    #[test]
    fn test_attack_interrupts_run() {
        let mut state = AnimationState::default();
        state.request(Request::Run).unwrap();
        let set = AnimationSet::default();
        tick(&mut state, &set, 25);
        assert_eq!(state.frame(), 2);

        let transition = state.request(Request::Attack).unwrap();
        assert_eq!(transition.from, AnimationKind::Run);
        assert!(state.is_attacking());
        assert!(!state.is_running());
        assert_eq!(state.frame(), 0);
        assert_eq!(state.frames_since_advance(), 0);
    }

    #[test]
    fn test_jump_interrupts_run() {
        let mut state = AnimationState::default();
        state.request(Request::Run).unwrap();
        state.request(Request::Jump).unwrap();
        assert!(state.is_jumping());
    }

    #[test]
    fn test_attack_and_jump_block_each_other() {
        let mut state = AnimationState::default();
        state.request(Request::Attack).unwrap();
        assert!(state.request(Request::Jump).is_err());
        assert!(state.request(Request::Attack).is_err());

        let mut state = AnimationState::default();
        state.request(Request::Jump).unwrap();
        assert!(state.request(Request::Attack).is_err());
        assert!(state.request(Request::Jump).is_err());
    }

    #[test]
    fn test_release_run_returns_to_idle_keeping_frame() {
        let set = AnimationSet::default();
        let mut state = AnimationState::default();
        state.request(Request::Run).unwrap();
        tick(&mut state, &set, 30);
        assert_eq!(state.frame(), 3);

        state.request(Request::ReleaseRun).unwrap();
        assert_eq!(state.kind(), AnimationKind::Idle);
        assert_eq!(state.frame(), 3);
    }

    #[test]
    fn test_release_run_ignored_during_attack_and_jump() {
        let mut state = AnimationState::default();
        state.request(Request::Run).unwrap();
        state.request(Request::Attack).unwrap();
        assert!(state.request(Request::ReleaseRun).is_err());
        assert!(state.is_attacking());

        let mut state = AnimationState::default();
        state.request(Request::Jump).unwrap();
        assert!(state.request(Request::ReleaseRun).is_err());
        assert!(state.is_jumping());
    }

    #[test]
    fn test_release_run_while_idle_is_ignored() {
        let mut state = AnimationState::default();
        assert!(state.request(Request::ReleaseRun).is_err());
        assert_eq!(state.kind(), AnimationKind::Idle);
    }

    #[test]
    fn test_frame_advances_every_ten_ticks() {
        let set = AnimationSet::default();
        let mut state = AnimationState::default();

        tick(&mut state, &set, 9);
        assert_eq!(state.frame(), 0);
        assert_eq!(state.frames_since_advance(), 9);

        tick(&mut state, &set, 1);
        assert_eq!(state.frame(), 1);
        assert_eq!(state.frames_since_advance(), 0);
    }

    #[test]
    fn test_idle_loops() {
        let set = AnimationSet::default();
        let mut state = AnimationState::default();
        let transitions = tick(&mut state, &set, 100);
        assert!(transitions.is_empty());
        assert_eq!(state.frame(), 0);
        assert_eq!(state.kind(), AnimationKind::Idle);
    }

    #[test]
    fn test_attack_returns_to_idle_after_thirty_ticks() {
        let set = AnimationSet::default();
        let mut state = AnimationState::default();
        state.request(Request::Attack).unwrap();

        assert!(tick(&mut state, &set, 29).is_empty());
        assert!(state.is_attacking());
        assert_eq!(state.frame(), 2);

        let transitions = tick(&mut state, &set, 1);
        assert_eq!(
            transitions,
            vec![Transition {
                from: AnimationKind::Attack,
                to: AnimationKind::Idle
            }]
        );
        assert!(!state.is_attacking());
        assert_eq!(state.kind(), AnimationKind::Idle);
        // Last attack frame carries over into idle
        assert_eq!(state.frame(), 3);
    }

    #[test]
    fn test_jump_returns_to_idle_on_last_frame() {
        let set = AnimationSet::default();
        let mut state = AnimationState::default();
        state.request(Request::Jump).unwrap();
        assert_eq!(state.kind(), AnimationKind::Jump);
        assert_eq!(state.frame(), 0);

        assert!(tick(&mut state, &set, 10).is_empty());
        assert_eq!(state.frame(), 1);

        assert!(tick(&mut state, &set, 9).is_empty());
        assert!(state.is_jumping());

        let transitions = tick(&mut state, &set, 1);
        assert_eq!(transitions.len(), 1);
        assert_eq!(state.kind(), AnimationKind::Idle);
        assert_eq!(state.frame(), 2);
    }

    #[test]
    fn test_request_resets_throttle() {
        let set = AnimationSet::default();
        let mut state = AnimationState::default();
        tick(&mut state, &set, 7);

        state.request(Request::Attack).unwrap();
        assert!(tick(&mut state, &set, 29).is_empty());
        assert_eq!(tick(&mut state, &set, 1).len(), 1);
    }

    #[test]
    fn test_single_frame_one_shot_ends_on_first_tick() {
        let mut config = crate::config::AnimationsConfig::default();
        config.attack.frames = 1;
        config.attack.columns = 1;
        let set = AnimationSet::from_config(&config);

        let mut state = AnimationState::default();
        state.request(Request::Attack).unwrap();
        assert_eq!(tick(&mut state, &set, 1).len(), 1);
        assert_eq!(state.kind(), AnimationKind::Idle);
    }

    #[test]
    fn test_custom_ticks_per_frame() {
        let set = AnimationSet::default();
        let mut state = AnimationState::new(2);
        state.request(Request::Attack).unwrap();
        assert!(tick(&mut state, &set, 5).is_empty());
        assert_eq!(tick(&mut state, &set, 1).len(), 1);
    }

    #[test]
    fn test_sound_cues_stop_then_play() {
        let transition = Transition {
            from: AnimationKind::Run,
            to: AnimationKind::Attack,
        };
        assert_eq!(
            transition.sound_cues(),
            [
                SoundCue::Stop(AnimationKind::Run),
                SoundCue::Play(AnimationKind::Attack)
            ]
        );
    }

    #[test]
    fn test_rejection_message() {
        let err = RejectedRequest {
            request: Request::Run,
            state: AnimationKind::Jump,
        };
        assert_eq!(err.to_string(), "Run ignored while jump");
    }

    #[test]
    fn test_invariants_hold_for_mixed_sequences() {
        let set = AnimationSet::default();
        let requests = [
            Request::Run,
            Request::Attack,
            Request::Jump,
            Request::ReleaseRun,
        ];

        for seed in 1..=20u64 {
            let mut state = AnimationState::default();
            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..500 {
                if rng.gen_bool(1.0 / 3.0) {
                    let _ = state.request(requests[rng.gen_range(0..requests.len())]);
                    assert!(active_flags(&state) <= 1);
                } else {
                    tick(&mut state, &set, 1);
                    assert!(state.frame() < set.frame_count(state.kind()));
                    assert!(active_flags(&state) <= 1);
                }
            }
        }
    }
}
