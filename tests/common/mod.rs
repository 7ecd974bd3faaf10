use arena_reader::engine::Engine;
use arena_reader::host::fake::{
    FakeInput, FakeNode, FakeSceneGraph, RecordingSink, SharedScene, SpeechLog,
};
use arena_reader::host::locale::StaticLocale;
use arena_reader::speech::announcer::Announcer;
use arena_reader::trace::logger::TraceLogger;

/// Everything a navigation test needs: the shared fake scene, the speech
/// log, and an engine wired to both.
pub struct Harness {
    pub scene: SharedScene,
    pub log: SpeechLog,
    pub engine: Engine,
}

#[allow(dead_code)]
pub fn harness(nodes: Vec<FakeNode>, screen: &str) -> Harness {
    let scene = SharedScene::new(FakeSceneGraph::with_nodes(nodes));
    let log = SpeechLog::new();
    let mut engine = Engine::new(
        Box::new(scene.clone()),
        Box::new(FakeInput::new(scene.clone())),
        Box::new(RecordingSink::new(log.clone())),
        Box::new(StaticLocale),
        TraceLogger::disabled(),
    );
    engine.on_scene_loaded(screen);
    Harness { scene, log, engine }
}

/// A standalone announcer writing into the given log, for unit-style tests
/// that drive a navigator directly.
#[allow(dead_code)]
pub fn announcer(log: &SpeechLog) -> Announcer {
    Announcer::new(
        Box::new(RecordingSink::new(log.clone())),
        Box::new(StaticLocale),
    )
}
