// background loader for generated splines
// producer/consumer queue between the render loop and a worker thread

use std::sync::mpsc::{self, Sender};
use std::thread;

use bevy::prelude::*;

// request to stream one generation result into renderable assets
pub struct LoadRequest {
    pub seed: u64,
    pub path_count: usize,
}

// the worker accepts requests but performs no real work yet
// generation results are immutable snapshots, so the thread never touches
// a graph that is still being built
#[derive(Resource)]
pub struct SplineLoader {
    requests: Sender<LoadRequest>,
}

impl SplineLoader {
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<LoadRequest>();

        let _ = thread::Builder::new()
            .name("spline-loader".to_string())
            .spawn(move || {
                while let Ok(request) = rx.recv() {
                    info!(
                        "handling new load request: seed {} with {} paths",
                        request.seed, request.path_count
                    );
                    info!("request finished");
                }
            });

        Self { requests: tx }
    }

    pub fn request(&self, request: LoadRequest) {
        // the receiver only goes away at shutdown, nothing to do then
        let _ = self.requests.send(request);
    }
}

pub struct LoaderPlugin;

impl Plugin for LoaderPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(SplineLoader::spawn());
    }
}
