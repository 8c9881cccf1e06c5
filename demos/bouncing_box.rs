//! A box bouncing across a small canvas, rendered to the terminal.
//!
//! Demonstrates the full pipeline: a scene with a compound root, the
//! frame driver ticking at a fixed cadence, and damage pulled after each
//! tick. Run with `RUST_LOG=debug` to watch render decisions.

use pixelframe::{
    Component, ComponentHandle, CompoundComponent, FillComponent, Frame, FrameConfig, Point,
    Rgba, Scene, Size,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const CANVAS: Size = Size::new(48, 16);
const BOX_SIZE: Size = Size::new(4, 3);

struct BouncingScene {
    root: ComponentHandle,
    moving: Arc<Mutex<FillComponent>>,
    velocity: Point,
}

impl BouncingScene {
    fn new() -> Self {
        let moving = Arc::new(Mutex::new(FillComponent::new(
            Point::new(1, 1),
            BOX_SIZE,
            Rgba::WHITE,
        )));

        let mut group = CompoundComponent::new(Point::ORIGIN, CANVAS);
        group.add(ComponentHandle::new(FillComponent::new(
            Point::ORIGIN,
            CANVAS,
            Rgba::opaque(24, 24, 48),
        )));
        group.add(ComponentHandle::from_arc(moving.clone()));

        Self {
            root: ComponentHandle::new(group),
            moving,
            velocity: Point::new(1, 1),
        }
    }
}

impl Scene for BouncingScene {
    fn root(&mut self) -> ComponentHandle {
        self.root.clone()
    }

    fn on_update(&mut self, _delta: Duration) -> bool {
        let mut moving = self.moving.lock().unwrap();
        let mut position = moving.core().position() + self.velocity;

        if position.x <= 0 || position.x + BOX_SIZE.width as i32 >= CANVAS.width as i32 {
            self.velocity.x = -self.velocity.x;
            position.x += 2 * self.velocity.x;
        }
        if position.y <= 0 || position.y + BOX_SIZE.height as i32 >= CANVAS.height as i32 {
            self.velocity.y = -self.velocity.y;
            position.y += 2 * self.velocity.y;
        }

        moving.core_mut().set_position(position);
        true
    }
}

fn print_viewport(frame: &Frame<BouncingScene>) {
    let mut out = String::new();
    for row in frame.viewport().rows() {
        for pixel in row {
            out.push(if pixel.r > 128 { '#' } else { '.' });
        }
        out.push('\n');
    }
    print!("\x1b[H\x1b[2J{out}");
}

fn main() {
    env_logger::init();

    let config = FrameConfig::new(CANVAS).with_update_interval(Duration::from_millis(33));
    let mut frame = Frame::new(BouncingScene::new(), config).expect("valid frame config");

    for _ in 0..300 {
        frame.tick(false);
        if frame.has_damage() {
            let damage = frame.pull_damage();
            log::debug!("flushed {} damaged sections", damage.len());
            print_viewport(&frame);
        }
        std::thread::sleep(Duration::from_millis(33));
    }
}
