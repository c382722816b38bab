use super::*;
use crate::scene::containment_violations;

#[test]
fn every_kind_builds_its_own_scene() {
    for kind in SceneKind::ALL {
        let scene = build(kind, &SceneInit::seeded(1));
        assert_eq!(scene.kind(), kind);
    }
}

#[test]
fn rebuilding_restores_initial_counts() {
    for kind in SceneKind::ALL {
        let init = SceneInit::seeded(8);
        let fresh = census(build(kind, &init).as_ref());
        let mut scene = build(kind, &init);
        for _ in 0..200 {
            scene.update();
        }
        let rebuilt = build(kind, &init);
        assert_eq!(census(rebuilt.as_ref()), fresh, "{kind}");
        assert!(containment_violations(rebuilt.as_ref()).is_empty(), "{kind}");
    }
}
