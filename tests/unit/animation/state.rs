use std::sync::Arc;

use image::RgbaImage;

use super::*;
use crate::assets::store::MemoryAssetLoader;

fn frame_keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("f{i}.png")).collect()
}

fn loader_with(keys: &[String]) -> MemoryAssetLoader {
    let mut loader = MemoryAssetLoader::new();
    for (i, key) in keys.iter().enumerate() {
        loader.insert(key, RgbaImage::from_pixel(2, 2, image::Rgba([i as u8, 0, 0, 255])));
    }
    loader
}

fn ready_state(frames: usize, delay: Option<f64>) -> AnimationState {
    let keys = frame_keys(frames);
    let loader = loader_with(&keys);
    let mut cache = FrameCache::new();
    let mut state = AnimationState::new(FrameSource::Images { keys }, delay, None);
    assert_eq!(state.poll_frames(&loader, &mut cache), None);
    assert!(state.is_ready());
    state
}

#[test]
fn sub_delay_ticks_accumulate_before_stepping() {
    let mut state = ready_state(4, Some(50.0));
    for _ in 0..5 {
        state.advance(49.0);
    }
    // 245 ms elapsed: four whole delays, back to frame 0 after wrapping.
    assert_eq!(state.current_index(), 0);
    assert!((state.elapsed() - 45.0).abs() < 1e-9);
}

#[test]
fn single_tick_steps_once_per_whole_delay() {
    let mut state = ready_state(4, Some(50.0));
    state.advance(49.0);
    assert_eq!(state.current_index(), 0);
    state.advance(1.0);
    assert_eq!(state.current_index(), 1);
    state.advance(120.0);
    assert_eq!(state.current_index(), 3);
    assert!((state.elapsed() - 20.0).abs() < 1e-9);
}

#[test]
fn huge_tick_wraps_without_looping() {
    let mut state = ready_state(3, Some(10.0));
    state.advance(10.0 * 3_000_001.0);
    assert_eq!(state.current_index(), 3_000_001 % 3);
}

#[test]
fn missing_or_invalid_delay_stays_on_first_frame() {
    for delay in [None, Some(0.0), Some(-5.0), Some(f64::NAN)] {
        let mut state = ready_state(4, delay);
        assert!(state.is_static());
        state.advance(1_000.0);
        assert_eq!(state.current_index(), 0);
        assert!(state.current_frame().is_some());
    }
}

#[test]
fn time_does_not_accumulate_while_pending() {
    let keys = frame_keys(2);
    let mut loader = MemoryAssetLoader::new();
    loader.mark_pending(&keys[0]);
    loader.mark_pending(&keys[1]);
    let mut cache = FrameCache::new();
    let mut state = AnimationState::new(FrameSource::Images { keys: keys.clone() }, Some(10.0), None);

    assert_eq!(state.poll_frames(&loader, &mut cache), None);
    state.advance(500.0);
    assert!(state.is_pending());
    assert_eq!(state.elapsed(), 0.0);
    assert!(state.current_frame().is_none());

    let loader = loader_with(&keys);
    assert_eq!(state.poll_frames(&loader, &mut cache), None);
    assert_eq!(state.frame_count(), 2);
    assert_eq!(state.current_index(), 0);
}

#[test]
fn empty_sequence_is_dead_from_the_start() {
    let state = AnimationState::new(FrameSource::Images { keys: Vec::new() }, Some(10.0), None);
    assert!(!state.is_pending());
    assert!(!state.is_ready());
    assert_eq!(state.frame_count(), 0);
}

#[test]
fn loader_failure_is_reported_once_then_recovers() {
    let keys = frame_keys(1);
    let mut loader = MemoryAssetLoader::new();
    loader.mark_failed(&keys[0], "network down");
    let mut cache = FrameCache::new();
    let mut state = AnimationState::new(FrameSource::Images { keys: keys.clone() }, Some(10.0), None);

    assert!(matches!(
        state.poll_frames(&loader, &mut cache),
        Some(DiagnosticKind::AssetUnavailable { .. })
    ));
    assert_eq!(state.poll_frames(&loader, &mut cache), None);
    assert!(state.is_pending());

    let loader = loader_with(&keys);
    assert_eq!(state.poll_frames(&loader, &mut cache), None);
    assert!(state.is_ready());
}

#[test]
fn bad_spritesheet_geometry_stops_polling() {
    let mut loader = MemoryAssetLoader::new();
    loader.insert("sheet.png", RgbaImage::new(8, 8));
    let mut cache = FrameCache::new();
    let geometry = SpriteGeometry::new(16, 16).unwrap();
    let mut state = AnimationState::new(
        FrameSource::Spritesheet { key: "sheet.png".into(), geometry },
        Some(10.0),
        None,
    );

    assert!(matches!(
        state.poll_frames(&loader, &mut cache),
        Some(DiagnosticKind::InvalidSpritesheetGeometry { .. })
    ));
    assert!(!state.is_pending());
    assert_eq!(state.poll_frames(&loader, &mut cache), None);
}

#[test]
fn shared_sheet_frames_come_from_the_cache() {
    let mut loader = MemoryAssetLoader::new();
    loader.insert("sheet.png", RgbaImage::new(64, 16));
    let mut cache = FrameCache::new();
    let geometry = SpriteGeometry::new(16, 16).unwrap();
    let source = FrameSource::Spritesheet { key: "sheet.png".into(), geometry };

    let mut a = AnimationState::new(source.clone(), Some(10.0), None);
    let mut b = AnimationState::new(source, Some(20.0), None);
    a.poll_frames(&loader, &mut cache);
    b.poll_frames(&loader, &mut cache);

    assert_eq!(a.frame_count(), 4);
    assert!(Arc::ptr_eq(&a.frames()[2], &b.frames()[2]));
}
