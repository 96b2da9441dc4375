use super::*;

#[test]
fn default_screen_is_reference_window() {
    let s = ScreenSize::default();
    assert_eq!((s.width, s.height), (1200, 900));
    assert_eq!(s.center(), Vec2::new(600.0, 450.0));
    assert_eq!(s.pixel_count(), 1_080_000);
}

#[test]
fn zero_sized_screen_is_rejected() {
    assert!(ScreenSize::new(0, 10).is_err());
    assert!(ScreenSize::new(10, 0).is_err());
    assert!(ScreenSize::new(1, 1).is_ok());
}

#[test]
fn contains_is_half_open() {
    let s = ScreenSize::new(4, 3).unwrap();
    assert!(s.contains(0, 0));
    assert!(s.contains(3, 2));
    assert!(!s.contains(4, 2));
    assert!(!s.contains(3, 3));
    assert!(!s.contains(-1, 0));
}

#[test]
fn rgba_packs_as_rrggbbaa() {
    assert_eq!(Rgba8::GREY.to_packed(), 0x7373_73ff);
    assert_eq!(Rgba8::WHITE.to_packed(), 0xffff_ffff);
    assert_eq!(Rgba8::BLACK.to_packed(), 0x0000_00ff);
    assert_eq!(Rgba8::from_packed(0x1122_3344), Rgba8::new(0x11, 0x22, 0x33, 0x44));
}
