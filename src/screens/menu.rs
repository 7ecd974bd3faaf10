use crate::host::graph::SceneGraph;
use crate::nav::navigator::GroupedNavigator;
use crate::screens::element_index::ElementIndex;
use crate::screens::scan::scan_elements;
use crate::speech::announcer::Announcer;

/// Per-screen navigation state for menu-style screens: the element cache,
/// the grouped navigator, and the screen's name for scene-change routing.
pub struct MenuScreen {
    pub name: String,
    index: ElementIndex,
    pub nav: GroupedNavigator,
}

impl MenuScreen {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            index: ElementIndex::new(),
            nav: GroupedNavigator::new(),
        }
    }

    /// Rescan the live tree and rebuild the navigator's group set.
    pub fn rescan(&mut self, scene: &dyn SceneGraph, announcer: &mut Announcer) {
        let elements = scan_elements(scene, &mut self.index);
        self.nav.rebuild(elements, announcer);
    }

    /// Tear down all screen-scoped state. Called on scene unload; cached
    /// node ids from the old scene must never leak into the next one.
    pub fn reset(&mut self) {
        self.index.reset();
        self.nav = GroupedNavigator::new();
    }
}
