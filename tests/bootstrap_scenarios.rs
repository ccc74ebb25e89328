use hanzi_host::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct CountingView {
    mounts: Arc<AtomicUsize>,
    renders: Arc<AtomicUsize>,
}

impl CountingView {
    fn new() -> (Self, Arc<AtomicUsize>, Arc<AtomicUsize>) {
        let mounts = Arc::new(AtomicUsize::new(0));
        let renders = Arc::new(AtomicUsize::new(0));
        let view = Self {
            mounts: mounts.clone(),
            renders: renders.clone(),
        };
        (view, mounts, renders)
    }
}

impl RootView for CountingView {
    fn mount(&mut self, _core: &Core) {
        self.mounts.fetch_add(1, Ordering::SeqCst);
    }

    fn render(&self, core: &Core) -> String {
        self.renders.fetch_add(1, Ordering::SeqCst);
        core.list().collect::<Vec<_>>().join(" ")
    }
}

#[test]
fn test_full_bootstrap_mounts_once() {
    let (view, mounts, renders) = CountingView::new();
    let mut host = Host::default();
    host.add_plugins(default_plugins());

    let mounted = host.mount(view).ok().unwrap();
    assert_eq!(mounts.load(Ordering::SeqCst), 1);
    assert_eq!(mounted.render(), "ordering polyphone drawing");
    assert_eq!(renders.load(Ordering::SeqCst), 1);

    let drawing = mounted.core().get_as::<StrokeDrawing>(DRAWING).unwrap();
    assert!(drawing.plan('人', &DrawOptions::default()).is_some());
}

#[test]
fn test_missing_required_never_renders() {
    let (view, mounts, renders) = CountingView::new();
    let mut host = Host::default();
    host.add_plugin(OrderingPlugin::default())
        .add_plugin(PolyphonePlugin::default());

    let err = match host.mount(view) {
        Ok(_) => panic!("mount should fail without drawing"),
        Err(err) => err,
    };

    assert_eq!(err.capability, DRAWING);
    assert_eq!(err.reason, BootstrapReason::MissingRequired);
    assert_eq!(mounts.load(Ordering::SeqCst), 0);
    assert_eq!(renders.load(Ordering::SeqCst), 0);
}

#[test]
fn test_required_from_config_json() {
    let config = HostConfig::from_json_str(r##"{ "mount_point": "#root", "required": ["ordering"] }"##)
        .unwrap();
    let mut host = Host::new(config);
    host.add_plugin(OrderingPlugin::default());

    let mounted = host.mount(CharacterPanel::new("十")).ok().unwrap();
    assert_eq!(mounted.mount_point(), "#root");
    assert_eq!(mounted.root().degraded(), &[POLYPHONE, DRAWING]);
    assert_eq!(mounted.render(), "十  strokes: 横 竖 (2)\ndegraded: polyphone, drawing\n");
}

#[test]
fn test_panel_with_all_capabilities() {
    let mut host = Host::default();
    host.add_plugins(default_plugins());

    let output = host.run(CharacterPanel::new("大")).unwrap();
    assert_eq!(
        output,
        "大  strokes: 横 撇 捺 (3)  pinyin: dà*  frames: 3\n"
    );
}

#[test]
fn test_run_returns_diagnostic() {
    let host = Host::default();
    let diagnostic = host.run(CharacterPanel::new("大")).unwrap_err();
    assert!(diagnostic.starts_with("Application failed to start"));
    assert!(diagnostic.contains("capability: ordering"));
}
