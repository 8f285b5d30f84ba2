use bubbletea_ring::prelude::*;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Counts(Arc<Mutex<(u32, u32, u32)>>);

impl Counts {
    fn get(&self) -> (u32, u32, u32) {
        *self.0.lock().unwrap()
    }
}

impl ProgressListener for Counts {
    fn on_progress_start(&mut self) {
        self.0.lock().unwrap().0 += 1;
    }
    fn on_progress_complete(&mut self) {
        self.0.lock().unwrap().1 += 1;
    }
    fn on_progress_cancel(&mut self) {
        self.0.lock().unwrap().2 += 1;
    }
}

fn drive(ring: &mut Ring, max_frames: usize) {
    for _ in 0..max_frames {
        if ring.update(Box::new(ring.frame_msg())).is_none() {
            break;
        }
    }
}

#[test]
fn test_attributes_to_view() {
    let config = RingConfig::from_attributes([
        ("strokeWidth", "2"),
        ("progress", "50"),
        ("progressbarColor", "#FF0000"),
        ("backgroundColor", "lightgray"),
        ("max", "200"),
    ]);
    let mut ring = ring_from_config(&config);
    assert_eq!(ring.resize(12.0, 20.0), 12.0);
    assert_eq!(ring.bounds(), RectF::new(1.0, 1.0, 11.0, 11.0));
    assert_eq!(ring.sweep_angle(), 90.0);

    let mut canvas = CellCanvas::new(12, 12);
    ring.render(&mut canvas);
    assert!(canvas.count(Color::rgb(0xFF, 0, 0)) > 0);
    assert!(canvas.count(Color::LIGHT_GRAY) > canvas.count(Color::rgb(0xFF, 0, 0)));

    let plain = strip_ansi_escapes::strip_str(ring.view());
    assert_eq!(plain.lines().count(), 12);
}

#[test]
fn test_animate_then_complete() {
    let counts = Counts::default();
    let mut ring = ring_new(&[]);
    let _cmd = ring.animate_progress_to(80.0, Some(Box::new(counts.clone())));
    assert_eq!(counts.get(), (1, 0, 0));

    drive(&mut ring, 1000);
    assert_eq!(ring.progress(), 80.0);
    assert_eq!(ring.animator_state(), AnimatorState::Completed);
    assert_eq!(counts.get(), (1, 1, 0));
}

#[test]
fn test_reset_cancels_session() {
    let counts = Counts::default();
    let mut ring = ring_new(&[with_duration(2000)]);
    let _cmd = ring.animate_progress_to(80.0, Some(Box::new(counts.clone())));
    drive(&mut ring, 10);
    assert!(ring.is_animating());

    ring.reset_progress();
    assert_eq!(ring.progress(), 0.0);
    assert!(!ring.is_animating());
    assert_eq!(ring.animator_state(), AnimatorState::Cancelled);

    drive(&mut ring, 1000);
    assert_eq!(counts.get(), (1, 0, 1));
}

#[test]
fn test_color_helpers() {
    let c = Color::argb(0x80, 0x20, 0x40, 0x60);
    assert_eq!(lighten(c, 0.0), Color::argb(0x80, 0, 0, 0));
    assert_eq!(lighten(c, 1.0), c);
    assert_eq!(adjust_alpha(c, 1.0), c);
    assert_eq!(adjust_alpha(c, 0.0), Color::argb(0, 0x20, 0x40, 0x60));
}
