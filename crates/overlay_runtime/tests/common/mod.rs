//! Shared fakes and a deterministic App harness for the runtime tests.
//!
//! Time is driven by hand (`Time::advance_by`) so throttle windows are exact;
//! nothing here installs the real clock.

// Each test binary uses a different slice of this module.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use bevy::prelude::*;
use hand_inference::retry::RetryPolicy;
use overlay_core::prelude::{
    Anchor, EstimateOptions, Frame, HandEstimate, HandPredictor, PredictorConfig, PredictorError,
    PredictorFactory, TrackingConfig, TrackingError, TrackingEvent, TrackingFactory,
    TrackingProvider,
};
use overlay_runtime::prelude::*;

pub type SampleScript = Arc<Mutex<VecDeque<Result<Vec<HandEstimate>, PredictorError>>>>;

pub fn hand(score: f32) -> Result<Vec<HandEstimate>, PredictorError> {
    Ok(vec![HandEstimate {
        score,
        landmarks: Vec::new(),
    }])
}

pub fn no_hands() -> Result<Vec<HandEstimate>, PredictorError> {
    Ok(Vec::new())
}

/// Records every presentation call for assertions.
#[derive(Clone, Default)]
pub struct RecordingStatus {
    inner: Arc<Mutex<StatusLog>>,
}

#[derive(Default)]
pub struct StatusLog {
    pub loading: Vec<bool>,
    pub statuses: Vec<String>,
    pub errors: Vec<String>,
}

impl RecordingStatus {
    pub fn statuses(&self) -> Vec<String> {
        self.inner.lock().unwrap().statuses.clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.inner.lock().unwrap().errors.clone()
    }

    pub fn loading(&self) -> Vec<bool> {
        self.inner.lock().unwrap().loading.clone()
    }
}

impl StatusSink for RecordingStatus {
    fn set_loading(&mut self, loading: bool) {
        self.inner.lock().unwrap().loading.push(loading);
    }

    fn update_status(&mut self, text: &str) {
        self.inner.lock().unwrap().statuses.push(text.to_string());
    }

    fn show_error(&mut self, text: &str) {
        self.inner.lock().unwrap().errors.push(text.to_string());
    }
}

/// Knobs and counters shared by every provider a factory hands out.
#[derive(Clone, Default)]
pub struct TrackingScript {
    pub events: Arc<Mutex<VecDeque<TrackingEvent>>>,
    pub renders: Arc<AtomicUsize>,
    pub started: Arc<AtomicUsize>,
    pub stopped: Arc<AtomicUsize>,
    /// Remaining `create` calls that should fail.
    pub fail_creates: Arc<AtomicUsize>,
    /// When true, `video_frame` reports the source as down.
    pub drop_video: Arc<Mutex<bool>>,
}

pub struct FakeTracking {
    script: TrackingScript,
    frame_id: u64,
}

impl TrackingProvider for FakeTracking {
    fn start(&mut self) -> Result<(), TrackingError> {
        self.script.started.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn stop(&mut self) -> Result<(), TrackingError> {
        self.script.stopped.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn video_frame(&mut self) -> Option<Frame> {
        if *self.script.drop_video.lock().unwrap() {
            return None;
        }
        self.frame_id += 1;
        Some(Frame {
            id: self.frame_id,
            timestamp: self.frame_id as f64 / 60.0,
            rgba: Some(vec![0; 16]),
            size: (2, 2),
            path: None,
        })
    }

    fn add_anchor(&mut self, index: usize) -> Result<Anchor, TrackingError> {
        Ok(Anchor { index })
    }

    fn poll_events(&mut self) -> Vec<TrackingEvent> {
        self.script.events.lock().unwrap().drain(..).collect()
    }

    fn render_scene(&mut self) -> Result<(), TrackingError> {
        self.script.renders.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct FakeTrackingFactory {
    pub script: TrackingScript,
}

impl TrackingFactory for FakeTrackingFactory {
    fn create(
        &self,
        _config: &TrackingConfig,
    ) -> Result<Box<dyn TrackingProvider + Send + Sync>, TrackingError> {
        let remaining = self.script.fail_creates.load(Ordering::SeqCst);
        if remaining > 0 {
            if remaining != usize::MAX {
                self.script.fail_creates.store(remaining - 1, Ordering::SeqCst);
            }
            return Err(TrackingError::Backend("scripted create failure".into()));
        }
        Ok(Box::new(FakeTracking {
            script: self.script.clone(),
            frame_id: 0,
        }))
    }
}

/// Plays back scripted sample results; reports no hands once exhausted.
pub struct ScriptedPredictor {
    calls: Arc<AtomicUsize>,
    script: SampleScript,
}

impl HandPredictor for ScriptedPredictor {
    fn estimate_hands(
        &mut self,
        _frame: &Frame,
        _options: &EstimateOptions,
    ) -> Result<Vec<HandEstimate>, PredictorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.script.lock().unwrap().pop_front() {
            Some(result) => result,
            None => Ok(Vec::new()),
        }
    }
}

pub struct ScriptedPredictorFactory {
    pub loads: Arc<AtomicUsize>,
    /// Remaining `load` calls that should fail; `usize::MAX` fails forever.
    pub fail_loads: Arc<AtomicUsize>,
    pub sample_calls: Arc<AtomicUsize>,
    pub script: SampleScript,
}

impl PredictorFactory for ScriptedPredictorFactory {
    fn load(
        &self,
        _config: &PredictorConfig,
    ) -> Result<Box<dyn HandPredictor + Send + Sync>, PredictorError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let remaining = self.fail_loads.load(Ordering::SeqCst);
        if remaining > 0 {
            if remaining != usize::MAX {
                self.fail_loads.store(remaining - 1, Ordering::SeqCst);
            }
            return Err(PredictorError::Load("scripted load failure".into()));
        }
        Ok(Box::new(ScriptedPredictor {
            calls: self.sample_calls.clone(),
            script: self.script.clone(),
        }))
    }
}

/// Runtime config with a zero retry delay so failing-acquisition paths do
/// not sleep for real inside tests.
pub fn test_config() -> RuntimeConfig {
    RuntimeConfig {
        acquisition: RetryPolicy {
            max_attempts: 3,
            delay: Duration::ZERO,
        },
        ..Default::default()
    }
}

pub struct Harness {
    pub app: App,
    pub status: RecordingStatus,
    pub tracking: TrackingScript,
    pub loads: Arc<AtomicUsize>,
    pub fail_loads: Arc<AtomicUsize>,
    pub sample_calls: Arc<AtomicUsize>,
    pub script: SampleScript,
}

impl Harness {
    pub fn new(config: RuntimeConfig) -> Self {
        let status = RecordingStatus::default();
        let tracking = TrackingScript::default();
        let loads = Arc::new(AtomicUsize::new(0));
        let fail_loads = Arc::new(AtomicUsize::new(0));
        let sample_calls = Arc::new(AtomicUsize::new(0));
        let script: SampleScript = Arc::default();

        let mut app = App::new();
        app.init_resource::<Time>();
        app.insert_resource(config);
        app.insert_resource(RuntimeDeps {
            tracking_factory: Box::new(FakeTrackingFactory {
                script: tracking.clone(),
            }),
            predictor_factory: Box::new(ScriptedPredictorFactory {
                loads: loads.clone(),
                fail_loads: fail_loads.clone(),
                sample_calls: sample_calls.clone(),
                script: script.clone(),
            }),
        });
        app.insert_resource(StatusSurface::new(status.clone()));
        app.add_plugins(OverlayRuntimePlugin);
        app.world_mut()
            .spawn((Visibility::Inherited, Indicator::Idle));
        app.world_mut()
            .spawn((Visibility::Hidden, Indicator::HandPresent));

        Self {
            app,
            status,
            tracking,
            loads,
            fail_loads,
            sample_calls,
            script,
        }
    }

    /// Runs the startup schedule (initialization) plus one zero-delta frame.
    pub fn boot(&mut self) {
        self.app.update();
    }

    pub fn tick(&mut self, ms: u64) {
        self.app
            .world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_millis(ms));
        self.app.update();
    }

    pub fn push_samples(&mut self, samples: Vec<Result<Vec<HandEstimate>, PredictorError>>) {
        self.script.lock().unwrap().extend(samples);
    }

    pub fn push_event(&mut self, event: TrackingEvent) {
        self.tracking.events.lock().unwrap().push_back(event);
    }

    pub fn sample_count(&self) -> usize {
        self.sample_calls.load(Ordering::SeqCst)
    }

    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    pub fn render_count(&self) -> usize {
        self.tracking.renders.load(Ordering::SeqCst)
    }

    pub fn indicator(&mut self, which: Indicator) -> Visibility {
        let mut query = self.app.world_mut().query::<(&Visibility, &Indicator)>();
        for (visibility, indicator) in query.iter(self.app.world()) {
            if *indicator == which {
                return *visibility;
            }
        }
        panic!("indicator {which:?} not spawned");
    }

    pub fn with_session<R>(&mut self, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut session = self.app.world_mut().resource_mut::<Session>();
        f(&mut session)
    }
}
