//! Animated Background
//!
//! Draws the particle field and wireframe shapes onto `#three-canvas`
//! once per display frame. The camera drifts toward the pointer.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use medibook::lifecycle::{Subscriptions, Subsystem, SubsystemError};
use medibook::reveal::Capabilities;
use medibook::scene::{
    Frame, Pointer, Scene, ShapeKind, Viewport, PARTICLE_COLOR, PARTICLE_OPACITY, PARTICLE_SIZE,
};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use crate::dom::{self, FrameLoop};

pub const CANVAS_ID: &str = "three-canvas";

pub struct Background {
    caps: Capabilities,
    particle_count: usize,
    seed: u64,
    frames: Option<FrameLoop>,
    subs: Subscriptions,
}

impl Background {
    pub fn new(caps: Capabilities, particle_count: usize, seed: u64) -> Self {
        Self {
            caps,
            particle_count,
            seed,
            frames: None,
            subs: Subscriptions::new(),
        }
    }
}

impl Subsystem for Background {
    fn name(&self) -> &'static str {
        "background"
    }

    fn init(&mut self) -> Result<(), SubsystemError> {
        let canvas: HtmlCanvasElement = dom::require_id(CANVAS_ID)?;
        let Some(ctx) = self.caps.render_surface.then(|| context_2d(&canvas)).flatten() else {
            dom::set_style(&canvas, "display", "none");
            return Err(SubsystemError::Unsupported("2d render surface".into()));
        };

        let window = dom::window()?;
        let scene = Rc::new(RefCell::new(Scene::generate(
            &mut SmallRng::seed_from_u64(self.seed),
            self.particle_count,
        )));
        let viewport = Rc::new(Cell::new(measure(&window)));
        resize(&canvas, viewport.get());

        {
            let canvas = canvas.clone();
            let viewport = Rc::clone(&viewport);
            let win = window.clone();
            dom::listen(&window, "resize", &mut self.subs, move |_: web_sys::Event| {
                viewport.set(measure(&win));
                resize(&canvas, viewport.get());
            })?;
        }
        {
            let scene = Rc::clone(&scene);
            let viewport = Rc::clone(&viewport);
            dom::listen(&window, "mousemove", &mut self.subs, move |e: MouseEvent| {
                let vp = viewport.get();
                scene.borrow_mut().set_pointer(Pointer::from_client(
                    f64::from(e.client_x()),
                    f64::from(e.client_y()),
                    vp.width,
                    vp.height,
                ));
            })?;
        }

        self.frames = Some(FrameLoop::start(move |time_ms| {
            let vp = viewport.get();
            let frame = {
                let mut scene = scene.borrow_mut();
                scene.step(time_ms);
                scene.project(&vp)
            };
            draw(&ctx, &vp, &frame);
        })?);

        tracing::debug!(particles = self.particle_count, "background running");
        Ok(())
    }

    fn dispose(&mut self) {
        if let Some(frames) = self.frames.take() {
            frames.stop();
        }
        self.subs.clear();
    }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn measure(window: &Window) -> Viewport {
    let size = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Viewport::new(
        size(window.inner_width()),
        size(window.inner_height()),
        window.device_pixel_ratio(),
    )
}

fn resize(canvas: &HtmlCanvasElement, viewport: Viewport) {
    let (width, height) = viewport.backing_size();
    canvas.set_width(width);
    canvas.set_height(height);
    dom::set_style(canvas, "width", &format!("{}px", viewport.width));
    dom::set_style(canvas, "height", &format!("{}px", viewport.height));
}

fn draw(ctx: &CanvasRenderingContext2d, viewport: &Viewport, frame: &Frame) {
    let ratio = viewport.pixel_ratio;
    let _ = ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);

    // Particles
    ctx.set_global_alpha(PARTICLE_OPACITY);
    ctx.set_fill_style(&PARTICLE_COLOR.into());
    for p in &frame.particles {
        let size = (PARTICLE_SIZE * p.scale).max(1.0);
        ctx.fill_rect(p.x - size / 2.0, p.y - size / 2.0, size, size);
    }

    // Wireframes, one path per shape kind
    ctx.set_line_width(1.0);
    for kind in [ShapeKind::Torus, ShapeKind::Cross] {
        ctx.set_global_alpha(kind.opacity());
        ctx.set_stroke_style(&kind.color().into());
        ctx.begin_path();
        for line in frame.lines.iter().filter(|l| l.kind == kind) {
            ctx.move_to(line.from.x, line.from.y);
            ctx.line_to(line.to.x, line.to.y);
        }
        ctx.stroke();
    }

    ctx.set_global_alpha(1.0);
}
