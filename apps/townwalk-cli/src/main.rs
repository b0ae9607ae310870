use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use townwalk_game::{GameConfig, Session, COLLISION_CELL_SIZE};
use townwalk_input::{InputEvent, PointerButton};
use townwalk_render::DebugTextRenderer;
use townwalk_scene::{CollisionWorld, Scene};
use townwalk_world::OpenWorld;

#[derive(Parser)]
#[command(name = "townwalk-cli", about = "Headless tools for the townwalk demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML game configuration
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Walk the player with a held joystick and print the final frame
    Simulate {
        /// Number of frames to run
        #[arg(short, long, default_value = "120")]
        frames: u64,
        /// Seconds per frame
        #[arg(long, default_value = "0.016666668")]
        dt: f32,
        /// Joystick drag offset in pixels, x then y (negative y walks forward)
        #[arg(long, num_args = 2, default_values_t = [0.0, -80.0], allow_negative_numbers = true)]
        drag: Vec<f32>,
        /// Frame at which to switch between third- and first-person
        #[arg(long)]
        toggle_at: Option<u64>,
        /// List every visible mesh in the final frame
        #[arg(long)]
        list: bool,
    },
    /// Build the town and print what was placed
    Layout,
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<GameConfig> {
    Ok(match path {
        Some(p) => GameConfig::load(p)?,
        None => GameConfig::default(),
    })
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("townwalk-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", townwalk_render::crate_info());
            let config = load_config(cli.config.as_ref())?;
            println!(
                "player: speed={} deadzone={} collisions={}",
                config.player.max_speed, config.player.deadzone, config.player.collisions
            );
            println!(
                "camera: radius={} fov={}/{} transition={}s",
                config.camera.initial_radius,
                config.camera.third_person_fov,
                config.camera.first_person_fov,
                config.camera.transition_duration
            );
        }
        Commands::Simulate {
            frames,
            dt,
            drag,
            toggle_at,
            list,
        } => {
            let config = load_config(cli.config.as_ref())?;
            let mut session = Session::new(config)?;
            let (dx, dy) = (drag.first().copied().unwrap_or(0.0), drag.get(1).copied().unwrap_or(0.0));
            println!("Simulate: frames={frames}, dt={dt}, drag=({dx}, {dy})");

            let origin = (200.0, 200.0);
            session.handle_input(InputEvent::MouseDown {
                x: origin.0,
                y: origin.1,
                button: PointerButton::Primary,
            });
            session.handle_input(InputEvent::MouseMove {
                x: origin.0 + dx,
                y: origin.1 + dy,
            });

            for i in 0..frames {
                if toggle_at == Some(i) {
                    let started = session.toggle_view()?;
                    println!("frame {i}: toggle to {} (started={started})", session.mode().other().label());
                }
                session.frame(dt);
            }
            session.handle_input(InputEvent::MouseUp {
                button: PointerButton::Primary,
            });

            let player = session.state().player();
            let p = player.position();
            println!(
                "Player: pos=({:.2}, {:.2}, {:.2}) rotation={:.3} mode={}",
                p.x,
                p.y,
                p.z,
                player.rotation(),
                session.mode().label()
            );

            let renderer = if list {
                DebugTextRenderer::verbose()
            } else {
                DebugTextRenderer::new()
            };
            if let Some(out) = session.frame_and_render(0.0, &renderer) {
                print!("{out}");
            }
            let removed = session.dispose();
            println!("Disposed: nodes={removed}");
        }
        Commands::Layout => {
            let mut scene = Scene::new();
            let world = OpenWorld::build(&mut scene)?;
            let s = world.summary();
            println!(
                "Town: roads={} stripes={} houses={} buildings={} shops={}",
                s.roads, s.stripes, s.houses, s.buildings, s.shops
            );
            println!(
                "Props: trees={} benches={} fences={} lamps={}",
                s.trees, s.benches, s.fences, s.lamps
            );
            println!(
                "Scene: nodes={} meshes={} shadow_casters={}",
                scene.node_count(),
                scene.mesh_count(),
                scene.shadow_caster_count()
            );
            let collision = CollisionWorld::from_scene(&scene, COLLISION_CELL_SIZE);
            println!("Collision: obstacles={}", collision.len());
            for (i, door) in world.doors().iter().enumerate() {
                let p = scene.world_position(door.pivot)?;
                println!("  door {i:>2}: pivot=({:.2}, {:.2})", p.x, p.z);
            }
        }
    }

    Ok(())
}
