//! Pineapple Panic entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use pineapple_panic::consts::*;
    use pineapple_panic::hud::Hud;
    use pineapple_panic::renderer::{RenderState, scene_vertices};
    use pineapple_panic::sim::{GameEvent, Scene, SceneLayout, TickInput, tick};
    use pineapple_panic::{AssetManifest, GameConfig};

    /// Game instance holding all state
    struct Game {
        scene: Scene,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        hud: Hud,
        debug: bool,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.scene, &self.input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            for event in self.scene.drain_events() {
                match event {
                    GameEvent::GameOver { score, .. } => log::info!("Final score: {}", score),
                    GameEvent::Restarted { seed } => {
                        self.accumulator = 0.0;
                        log::debug!("Restarted with seed {}", seed);
                    }
                    other => log::debug!("{:?}", other),
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene_vertices(&self.scene, self.debug);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update held-key state; returns true when the key belongs to the game
        fn set_key(&mut self, key: &str, down: bool) -> bool {
            let slot = match key {
                "ArrowLeft" => &mut self.input.left,
                "ArrowRight" => &mut self.input.right,
                "ArrowUp" => &mut self.input.up,
                "ArrowDown" => &mut self.input.down,
                "Shift" => &mut self.input.spawn_bomb,
                " " => &mut self.input.restart,
                _ => return false,
            };
            *slot = down;
            true
        }
    }

    fn js_err(context: &str, e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&format!("{}: {}", context, e))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| js_err("Failed to init logger", e))?;

        log::info!("Pineapple Panic starting...");

        let config = GameConfig::load();
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let container: web_sys::Element = match document.get_element_by_id(&config.parent) {
            Some(el) => el,
            None => {
                log::warn!("No #{} element, mounting into <body>", config.parent);
                document.body().ok_or("no body")?.into()
            }
        };
        container.set_attribute("style", "position:relative;display:inline-block;")?;

        // Canvas at the configured size, backing store scaled for the display
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_id("canvas");
        let dpr = window.device_pixel_ratio();
        let width = (config.width as f64 * dpr) as u32;
        let height = (config.height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        canvas.set_attribute(
            "style",
            &format!(
                "display:block;width:{}px;height:{}px;",
                config.width, config.height
            ),
        )?;
        container.append_child(&canvas)?;

        let mut assets = AssetManifest::default();
        assets.preload(&document).await;
        let layout = SceneLayout::new(&config, &assets);

        let seed = js_sys::Date::now() as u64;
        let scene = Scene::create(layout, seed);
        log::info!("Scene created with seed: {}", seed);

        // Initialize WebGPU (or WebGL fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: config.renderer.backends(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| js_err("Failed to create surface", e))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| js_err("Failed to get adapter", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, scene.layout.world_size)
            .await
            .map_err(|e| js_err("Failed to create device", e))?;

        let hud = Hud::mount(&document, &container)?;

        let game = Rc::new(RefCell::new(Game {
            scene,
            render_state: Some(render_state),
            accumulator: 0.0,
            last_time: 0.0,
            input: TickInput::default(),
            hud,
            debug: config.physics.debug,
        }));

        setup_input_handlers(&window, game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Pineapple Panic running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                if game.borrow_mut().set_key(&key, true) && key != "Shift" {
                    // Arrows and space would scroll the page
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().set_key(&event.key(), false);
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: key-up events never arrive, so release everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input = TickInput::default();
                log::debug!("Input released (window blur)");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();

            let Game { hud, scene, .. } = &mut *g;
            hud.sync(scene);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Pineapple Panic failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Pineapple Panic (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    headless_session(0x5eed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted run without a renderer: walk, call in hazards, restart
#[cfg(not(target_arch = "wasm32"))]
fn headless_session(seed: u64) {
    use pineapple_panic::consts::SIM_DT;
    use pineapple_panic::hud::HudView;
    use pineapple_panic::sim::{GameEvent, Scene, SceneLayout, TickInput, tick};

    let mut scene = Scene::create(SceneLayout::default(), seed);
    log::info!(
        "Scene ready: {} platforms, {} pineapples",
        scene.platforms.len(),
        scene.active_star_count()
    );

    let script: [(&str, TickInput, u32); 5] = [
        ("settle", TickInput::default(), 120),
        (
            "run right",
            TickInput {
                right: true,
                ..Default::default()
            },
            180,
        ),
        (
            "climb",
            TickInput {
                up: true,
                ..Default::default()
            },
            60,
        ),
        (
            "spawn hazards",
            TickInput {
                spawn_bomb: true,
                ..Default::default()
            },
            3,
        ),
        ("wait", TickInput::default(), 600),
    ];

    for (label, input, ticks) in script {
        for _ in 0..ticks {
            tick(&mut scene, &input, SIM_DT);
        }
        for event in scene.drain_events() {
            if let GameEvent::GameOver { score, .. } = event {
                log::info!("Game over during '{}' with score {}", label, score);
            }
        }
        let view = HudView::of(&scene);
        log::info!(
            "After '{}': {} | player at ({:.0}, {:.0}) | {} hazards | {} pineapples left",
            label,
            view.score,
            scene.player.body.pos.x,
            scene.player.body.pos.y,
            scene.bomb_count(),
            scene.active_star_count()
        );
    }

    let restart = TickInput {
        restart: true,
        ..Default::default()
    };
    tick(&mut scene, &restart, SIM_DT);
    log::info!(
        "Restarted with seed {}: score {}, {} hazards",
        scene.seed,
        scene.score,
        scene.bomb_count()
    );
}
