//! Test utilities for server tests.

#![allow(dead_code)]

pub mod mock_collaborators;

pub use mock_collaborators::{ScriptedStory, SelectiveRenderer};

use hokusai_compose::ComicComposer;
use hokusai_pipeline::{ComicStudio, PanelGenerationPipeline, PipelineConfig};
use hokusai_server::{AppState, bind, create_router, serve};
use hokusai_storage::MemoryArtifactStore;
use std::net::SocketAddr;
use std::sync::Arc;

/// Running test server.
pub struct TestServer {
    /// Base URL, e.g. `http://127.0.0.1:40123`
    pub base_url: String,
    /// Store behind `/artifacts`
    pub store: Arc<MemoryArtifactStore>,
}

/// Start a server on an ephemeral port over the given collaborators.
pub async fn spawn_server(story: ScriptedStory, renderer: SelectiveRenderer) -> TestServer {
    let store = Arc::new(MemoryArtifactStore::new("/artifacts"));
    let pipeline =
        PanelGenerationPipeline::new(Arc::new(story), Arc::new(renderer), PipelineConfig::default());
    let studio = ComicStudio::new(pipeline, Arc::new(ComicComposer::new(None)), store.clone());

    let listener = bind("127.0.0.1:0").await.expect("bind test listener");
    let address: SocketAddr = listener.local_addr().expect("local address");
    let router = create_router(AppState::new(Arc::new(studio)));
    tokio::spawn(async move {
        let _ = serve(listener, router).await;
    });

    TestServer {
        base_url: format!("http://{}", address),
        store,
    }
}
