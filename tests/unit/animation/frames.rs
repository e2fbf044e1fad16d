use super::*;
use crate::assets::store::MemoryAssetLoader;

const MAGENTA: Rgba8 = Rgba8::rgb(255, 0, 255);

fn two_tone(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_fn(w, h, |x, _| {
        if x % 2 == 0 {
            image::Rgba([255, 0, 255, 255])
        } else {
            image::Rgba([10, 20, 30, 255])
        }
    })
}

#[test]
fn colorkey_marks_only_matching_pixels_transparent() {
    let out = apply_colorkey(&two_tone(4, 1), MAGENTA);
    assert_eq!(out.get_pixel(0, 0).0, [255, 0, 255, 0]);
    assert_eq!(out.get_pixel(1, 0).0, [10, 20, 30, 255]);
    assert_eq!(out.get_pixel(2, 0).0[3], 0);
    assert_eq!(out.get_pixel(3, 0).0, [10, 20, 30, 255]);
}

#[test]
fn near_miss_colors_are_unaffected() {
    let img = RgbaImage::from_pixel(1, 1, image::Rgba([254, 0, 255, 255]));
    let out = apply_colorkey(&img, MAGENTA);
    assert_eq!(out.get_pixel(0, 0).0, [254, 0, 255, 255]);
}

#[test]
fn keyed_image_is_computed_once() {
    let mut loader = MemoryAssetLoader::new();
    loader.insert("f.png", two_tone(2, 2));
    let mut cache = FrameCache::new();

    let AssetPoll::Ready(a) = cache.image(&loader, "f.png", Some(MAGENTA)) else {
        panic!("expected ready frame");
    };
    loader.remove("f.png");
    let AssetPoll::Ready(b) = cache.image(&loader, "f.png", Some(MAGENTA)) else {
        panic!("cached frame should not need the loader");
    };
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);
}

#[test]
fn sequence_waits_for_every_frame() {
    let mut loader = MemoryAssetLoader::new();
    loader.insert("a.png", two_tone(1, 1));
    loader.mark_pending("b.png");
    let keys = vec!["a.png".to_string(), "b.png".to_string(), "a.png".to_string()];
    let mut cache = FrameCache::new();

    assert!(matches!(
        cache.sequence(&loader, &keys, None),
        FramePoll::Pending
    ));

    loader.insert("b.png", two_tone(1, 1));
    let FramePoll::Ready(frames) = cache.sequence(&loader, &keys, None) else {
        panic!("expected ready sequence");
    };
    assert_eq!(frames.len(), 3);
    assert!(Arc::ptr_eq(&frames[0], &frames[2]));
}

#[test]
fn sequence_reports_failed_asset() {
    let mut loader = MemoryAssetLoader::new();
    loader.mark_failed("a.png", "corrupt");
    let mut cache = FrameCache::new();
    let poll = cache.sequence(&loader, &["a.png".to_string()], None);
    assert!(matches!(
        poll,
        FramePoll::Unavailable(DiagnosticKind::AssetUnavailable { ref key, .. }) if key == "a.png"
    ));
}

#[test]
fn spritesheet_frames_are_keyed_and_cached() {
    let mut loader = MemoryAssetLoader::new();
    loader.insert("sheet.png", two_tone(64, 16));
    let geom = SpriteGeometry::new(16, 16).unwrap();
    let mut cache = FrameCache::new();

    let FramePoll::Ready(frames) = cache.spritesheet(&loader, "sheet.png", geom, Some(MAGENTA))
    else {
        panic!("expected sliced frames");
    };
    assert_eq!(frames.len(), 4);
    assert_eq!(frames[1].get_pixel(0, 0).0[3], 0);
    assert_eq!(frames[1].get_pixel(1, 0).0[3], 255);
    assert_eq!(cache.len(), 4);

    let FramePoll::Ready(again) = cache.spritesheet(&loader, "sheet.png", geom, Some(MAGENTA))
    else {
        panic!("expected cached frames");
    };
    assert!(Arc::ptr_eq(&frames[0], &again[0]));
}

#[test]
fn spritesheet_geometry_error_is_permanent() {
    let mut loader = MemoryAssetLoader::new();
    loader.insert("sheet.png", two_tone(8, 8));
    let geom = SpriteGeometry::new(16, 16).unwrap();
    let mut cache = FrameCache::new();
    assert!(matches!(
        cache.spritesheet(&loader, "sheet.png", geom, None),
        FramePoll::Invalid(DiagnosticKind::InvalidSpritesheetGeometry { .. })
    ));
}
