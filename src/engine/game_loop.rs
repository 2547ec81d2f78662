/// Frame timing and diagnostics
///
/// The animation loop is driven by display refresh: one tick per redraw.
/// `GameLoop` does not gate ticks; it counts them and keeps a rolling
/// FPS figure for logging.
use std::time::{Duration, Instant};

/// FPS tracking window (average over last N frames)
const FPS_WINDOW_SIZE: usize = 60;

/// Log the FPS once every this many frames
const FPS_LOG_INTERVAL: u64 = 600;

pub struct GameLoop {
    /// Time of last frame
    last_frame_time: Instant,

    /// Frame timing history for FPS calculation
    frame_times: Vec<Duration>,

    /// Frames begun so far
    frame_count: u64,

    /// Current FPS (updated every 10 frames)
    current_fps: f32,
}

impl GameLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_frame_time: now,
            frame_times: Vec::with_capacity(FPS_WINDOW_SIZE),
            frame_count: 0,
            current_fps: 0.0,
        }
    }

    /// Begin a new frame, returns the time since the previous one
    pub fn begin_frame(&mut self) -> Duration {
        let now = Instant::now();
        let frame_time = now.duration_since(self.last_frame_time);
        self.record_frame(frame_time);
        self.last_frame_time = now;
        frame_time
    }

    fn record_frame(&mut self, frame_time: Duration) {
        self.frame_count += 1;

        self.frame_times.push(frame_time);
        if self.frame_times.len() > FPS_WINDOW_SIZE {
            self.frame_times.remove(0);
        }

        if self.frame_count % 10 == 0 {
            self.update_fps();
        }

        if self.frame_count % FPS_LOG_INTERVAL == 0 {
            log::debug!("frame {}: {:.1} fps", self.frame_count, self.current_fps);
        }
    }

    pub fn fps(&self) -> f32 {
        self.current_fps
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn update_fps(&mut self) {
        if self.frame_times.is_empty() {
            self.current_fps = 0.0;
            return;
        }

        let total: Duration = self.frame_times.iter().sum();
        let avg_frame_time = total / self.frame_times.len() as u32;

        self.current_fps = if avg_frame_time.as_secs_f32() > 0.0 {
            1.0 / avg_frame_time.as_secs_f32()
        } else {
            0.0
        };
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::thread;

    #[test]
    fn test_game_loop_creation() {
        let game_loop = GameLoop::new();
        assert_eq!(game_loop.frame_count(), 0);
        assert_eq!(game_loop.fps(), 0.0);
    }

    #[test]
    fn test_frame_counting() {
        let mut game_loop = GameLoop::new();
        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 1);

        game_loop.begin_frame();
        assert_eq!(game_loop.frame_count(), 2);
    }

    #[test]
    fn test_fps_from_steady_frames() {
        let mut game_loop = GameLoop::new();
        for _ in 0..10 {
            game_loop.record_frame(Duration::from_millis(20));
        }
        assert_relative_eq!(game_loop.fps(), 50.0, epsilon = 0.01);
    }

    #[test]
    fn test_fps_window_is_bounded() {
        let mut game_loop = GameLoop::new();
        for _ in 0..FPS_WINDOW_SIZE * 2 {
            game_loop.record_frame(Duration::from_millis(10));
        }
        assert_eq!(game_loop.frame_times.len(), FPS_WINDOW_SIZE);
        assert_relative_eq!(game_loop.fps(), 100.0, epsilon = 0.01);
    }

    #[test]
    fn test_begin_frame_reports_delta() {
        let mut game_loop = GameLoop::new();
        thread::sleep(Duration::from_millis(5));
        assert!(game_loop.begin_frame() >= Duration::from_millis(5));
    }
}
