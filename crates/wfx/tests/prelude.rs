//! The prelude alone is enough to wire a reveal, a carousel and a lightbox.

use wfx::prelude::*;

#[test]
fn reveal_from_prelude() {
    let observer = VisibilityObserver::default();
    let motion = ReducedMotionSignal::init(Some(true), MemoryStorage::new());
    let element = ElementId::new();
    let reveal = Reveal::mount(
        &observer,
        &motion,
        &MotionCatalog::new(),
        element,
        RevealOptions::new().variant(VariantName::ScaleIn),
    );
    assert!(reveal.frame().is_revealed());
}

#[test]
fn carousel_and_lightbox_from_prelude() {
    let t0 = Instant::now();
    let mut carousel = CarouselEngine::new(vec![1, 2, 3], CarouselConfig::tour_images(), t0);
    carousel.handle_key(&KeyEvent::press(KeyCode::Right), t0);
    assert_eq!(carousel.index(), Some(1));

    let media = vec![MediaRef::image("/a.jpg", "a"), MediaRef::image("/b.jpg", "b")];
    let mut lightbox = LightboxEngine::headless(media, LightboxConfig::image());
    assert!(lightbox.open_at(1));
    lightbox.handle_key(&KeyEvent::press(KeyCode::Escape));
    assert_eq!(lightbox.state(), LightboxState::Closed);
}

#[cfg(feature = "forms")]
#[test]
fn form_kinds_reachable() {
    assert_eq!(FormKind::Newsletter.path(), "/api/newsletter");
}
