use super::*;
use crate::foundation::core::SURFACE_SIZE;
use crate::scene::{SceneInit, SceneKind, registry};

#[test]
fn outside_the_sphere_stays_transparent() {
    let scene = registry::build(SceneKind::Winter, &SceneInit::seeded(1));
    let mut r = GlobeRenderer::globe();
    let frame = r
        .render(scene.as_ref(), &Engraving::new("Magic World"))
        .unwrap()
        .unwrap();
    assert_eq!(frame.data.len(), (SURFACE_SIZE * SURFACE_SIZE * 4) as usize);
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(SURFACE_SIZE - 1, 0), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(SURFACE_SIZE / 2, SURFACE_SIZE / 2).unwrap()[3], 255);
}

#[test]
fn shutdown_turns_render_into_a_no_op() {
    let scene = registry::build(SceneKind::Bamboo, &SceneInit::seeded(1));
    let mut r = GlobeRenderer::new(Canvas {
        width: 64,
        height: 64,
    })
    .unwrap();
    assert!(r.is_mounted());
    assert!(r.render(scene.as_ref(), &Engraving::new("")).unwrap().is_some());
    r.shutdown();
    assert!(!r.is_mounted());
    assert!(r.render(scene.as_ref(), &Engraving::new("")).unwrap().is_none());
}

#[test]
fn surface_size_is_validated() {
    let zero = GlobeRenderer::new(Canvas {
        width: 0,
        height: 10,
    });
    assert!(matches!(zero, Err(MicrocosmError::Validation(_))));
    let huge = GlobeRenderer::new(Canvas {
        width: 70_000,
        height: 10,
    });
    assert!(matches!(huge, Err(MicrocosmError::Validation(_))));
}

fn surface_px(frame: &FrameRGBA, local: (f64, f64)) -> [u8; 4] {
    let x = (f64::from(frame.width) / 2.0 + local.0) as u32;
    let y = (f64::from(frame.height) / 2.0 + local.1) as u32;
    frame.pixel(x, y).unwrap()
}

#[test]
fn weather_draws_over_people() {
    use crate::foundation::core::{Rgba8, Vec2};
    use crate::scene::particles::Snowflake;
    use crate::scene::winter::{PersonState, WinterVillage};

    let mut scene = WinterVillage::new(&SceneInit::seeded(4));
    scene.village.people.truncate(1);
    let person = &mut scene.village.people[0];
    person.pos = Vec2::new(0.0, 100.0);
    person.state = PersonState::Idle;
    person.color = Rgba8::rgb(255, 0, 0);
    scene.snow.flakes = vec![Snowflake {
        pos: Vec2::new(0.5, 94.5),
        radius: 3.0,
        speed: 1.0,
        wind: 0.0,
        opacity: 1.0,
    }];

    let mut r = GlobeRenderer::globe();
    let frame = r.render(&scene, &Engraving::new("")).unwrap().unwrap();
    // Body pixel next to the flake is the person's color.
    let body = surface_px(&frame, (-3.5, 89.0));
    assert!(body[0] > 240 && body[1] < 16 && body[3] == 255, "{body:?}");
    // Under the flake the white wins.
    let px = surface_px(&frame, (0.0, 94.0));
    assert_eq!(px[3], 255);
    assert!(px[1] > 200 && px[2] > 200, "flake hidden by person: {px:?}");
}

#[test]
fn chrome_draws_outside_the_scene_clip() {
    let scene = registry::build(SceneKind::Winter, &SceneInit::seeded(2));
    let mut r = GlobeRenderer::globe();
    let frame = r
        .render(scene.as_ref(), &Engraving::new("Magic World"))
        .unwrap()
        .unwrap();
    // Pedestal below the disc.
    assert_eq!(surface_px(&frame, (0.0, 330.0))[3], 255);
    // Beside the pedestal and outside the disc.
    assert_eq!(surface_px(&frame, (-250.0, 330.0)), [0, 0, 0, 0]);
    // Just past the rim: the scene backdrop is clipped away.
    assert_eq!(surface_px(&frame, (0.0, -305.0)), [0, 0, 0, 0]);
}
