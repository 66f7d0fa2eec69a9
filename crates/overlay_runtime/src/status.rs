use std::sync::{Arc, Mutex};

use bevy::prelude::*;

/// Presentation sink for loading, status, and error text. Implementations
/// carry no contract beyond accepting the strings.
pub trait StatusSink {
    fn set_loading(&mut self, loading: bool);
    fn update_status(&mut self, text: &str);
    fn show_error(&mut self, text: &str);
}

/// Boxed sink resource consumed by the runtime systems.
#[derive(Resource)]
pub struct StatusSurface(pub Box<dyn StatusSink + Send + Sync>);

impl StatusSurface {
    pub fn new(sink: impl StatusSink + Send + Sync + 'static) -> Self {
        Self(Box::new(sink))
    }
}

impl std::ops::Deref for StatusSurface {
    type Target = Box<dyn StatusSink + Send + Sync>;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::ops::DerefMut for StatusSurface {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Sink that only logs; the default when the app wires no HUD.
#[derive(Default)]
pub struct LogStatus;

impl StatusSink for LogStatus {
    fn set_loading(&mut self, loading: bool) {
        info!("loading: {loading}");
    }
    fn update_status(&mut self, text: &str) {
        info!("status: {text}");
    }
    fn show_error(&mut self, text: &str) {
        error!("{text}");
    }
}

/// Snapshot of the presentation state for HUD rendering.
#[derive(Debug, Default, Clone)]
pub struct StatusModel {
    pub loading: bool,
    pub status: String,
    pub error: Option<String>,
}

/// Sink that records into a shared model a UI system can read each frame.
#[derive(Clone, Default)]
pub struct BufferedStatus {
    model: Arc<Mutex<StatusModel>>,
}

impl BufferedStatus {
    pub fn handle(&self) -> Arc<Mutex<StatusModel>> {
        self.model.clone()
    }

    pub fn snapshot(&self) -> StatusModel {
        self.model.lock().expect("status mutex poisoned").clone()
    }
}

impl StatusSink for BufferedStatus {
    fn set_loading(&mut self, loading: bool) {
        self.model.lock().expect("status mutex poisoned").loading = loading;
    }

    fn update_status(&mut self, text: &str) {
        let mut model = self.model.lock().expect("status mutex poisoned");
        model.status = text.to_string();
    }

    fn show_error(&mut self, text: &str) {
        let mut model = self.model.lock().expect("status mutex poisoned");
        model.error = Some(text.to_string());
    }
}
