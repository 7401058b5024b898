use clap::Parser;
use crossterm::{cursor, terminal, ExecutableCommand, QueueableCommand};
use image::{ImageBuffer, Rgb};
use log::{debug, info, warn};
use std::error::Error;
use std::io::{stdout, Write};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};
use ultraviolet::{Vec3, Vec4};

use marchtracer::{
    render::cast_ray, Background, Cone, Config, Cuboid, Fractal, HorPlane, Light, Material, Ray,
    Scene, Sphere, Texture, TracerError,
};

#[derive(Parser, Debug)]
#[command(about = "Ray tracer mixing analytic shapes with sphere traced distance fields")]
struct CliArguments {
    /// TOML file with tolerances, render settings and texture paths.
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    #[arg(short = 'W', long)]
    width: Option<usize>,

    #[arg(short = 'H', long)]
    height: Option<usize>,

    #[arg(short = 's', long)]
    samples: Option<usize>,

    #[arg(short = 'o', long, default_value = "render.png")]
    output: String,

    #[arg(short = 't', long)]
    tile_size: Option<usize>,

    #[arg(long, action)]
    incremental: bool,

    #[arg(long)]
    threads: Option<usize>,
}

impl CliArguments {
    /// Flags win over the config file.
    fn apply(&self, config: &mut Config) {
        let render = &mut config.render;
        render.width = self.width.unwrap_or(render.width);
        render.height = self.height.unwrap_or(render.height);
        render.samples = self.samples.unwrap_or(render.samples).max(1);
        render.tile_size = self.tile_size.unwrap_or(render.tile_size).max(1);
    }
}

struct RenderTile {
    pixel_x: usize,
    pixel_y: usize,
    pixel_width: usize,
    pixel_height: usize,
}

impl RenderTile {
    fn x_range(&self) -> Range<usize> {
        self.pixel_x..self.pixel_x + self.pixel_width
    }
    fn y_range(&self) -> Range<usize> {
        self.pixel_y..self.pixel_y + self.pixel_height
    }
}

#[derive(Clone)]
struct RenderImage {
    width: usize,
    height: usize,
    samples: usize,
    depth: u32,
    tile_size: usize,
    tile_count_x: usize,
    tile_count_y: usize,
    buffer: Arc<Mutex<ImageBuffer<Rgb<u8>, Vec<u8>>>>,
    next_tile: Arc<AtomicUsize>,
    finished_tiles: Arc<AtomicUsize>,
    aspect_ratio: f32,
}

impl RenderImage {
    fn new(config: &Config) -> Self {
        let settings = &config.render;
        Self {
            width: settings.width,
            height: settings.height,
            samples: settings.samples,
            depth: settings.depth,
            tile_size: settings.tile_size,
            tile_count_x: settings.width.div_ceil(settings.tile_size),
            tile_count_y: settings.height.div_ceil(settings.tile_size),
            next_tile: Arc::new(AtomicUsize::new(0)),
            finished_tiles: Arc::new(AtomicUsize::new(0)),
            buffer: Arc::new(Mutex::new(ImageBuffer::new(
                settings.width as u32,
                settings.height as u32,
            ))),
            aspect_ratio: settings.width as f32 / settings.height as f32,
        }
    }

    fn tile_count(&self) -> usize {
        self.tile_count_x * self.tile_count_y
    }

    fn get_tile(&self) -> Option<RenderTile> {
        let index = self.next_tile.fetch_add(1, Ordering::Relaxed);
        if index >= self.tile_count() {
            return None;
        }

        let tile_x = index.rem_euclid(self.tile_count_x);
        let tile_y = index.div_euclid(self.tile_count_x);

        let pixel_x = tile_x * self.tile_size;
        let pixel_y = tile_y * self.tile_size;
        let tile_width = (pixel_x + self.tile_size).min(self.width) - pixel_x;
        let tile_height = (pixel_y + self.tile_size).min(self.height) - pixel_y;

        Some(RenderTile {
            pixel_x,
            pixel_y,
            pixel_width: tile_width,
            pixel_height: tile_height,
        })
    }

    fn write_tile(&self, tile: RenderTile, data: &[Rgb<u8>]) -> marchtracer::Result<()> {
        let mut buffer = self
            .buffer
            .lock()
            .map_err(|_| TracerError::Poisoned("image buffer"))?;
        let mut source = data.iter();
        for y in tile.y_range() {
            for x in tile.x_range() {
                if let Some(pixel) = source.next() {
                    buffer.put_pixel(x as u32, y as u32, *pixel);
                }
            }
        }
        self.finished_tiles.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn save(&self, output_path: &Path) -> marchtracer::Result<()> {
        let buffer = self
            .buffer
            .lock()
            .map_err(|_| TracerError::Poisoned("image buffer"))?;
        buffer.save(output_path)?;
        Ok(())
    }
}

fn to_rgb(col: Vec3) -> Rgb<u8> {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0) as u8;
    Rgb([channel(col.x), channel(col.y), channel(col.z)])
}

fn spawn_render_thread(
    render_image: RenderImage,
    scene: Arc<Scene>,
    exit_flag: Arc<AtomicBool>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let camera = Vec3::new(0.0, 0.0, 0.0);
        let fov = std::f32::consts::FRAC_PI_3;
        let scale = (fov / 2.0).tan();
        let mut tile_buffer = Vec::with_capacity(render_image.tile_size * render_image.tile_size);

        while let Some(render_tile) = render_image.get_tile() {
            tile_buffer.clear();
            for y in render_tile.y_range() {
                for x in render_tile.x_range() {
                    if exit_flag.load(Ordering::Relaxed) {
                        return;
                    }
                    let mut col = Vec3::zero();
                    for _ in 0..render_image.samples {
                        let px = x as f32 + fastrand::f32();
                        let py = y as f32 + fastrand::f32();
                        let dir_x = (2.0 * px / render_image.width as f32 - 1.0)
                            * scale
                            * render_image.aspect_ratio;
                        let dir_y = (1.0 - 2.0 * py / render_image.height as f32) * scale;
                        let ray = Ray::new(camera, Vec3::new(dir_x, dir_y, -1.0));
                        col += cast_ray(&scene, &ray, render_image.depth);
                    }
                    tile_buffer.push(to_rgb(col / render_image.samples as f32));
                }
            }
            if let Err(err) = render_image.write_tile(render_tile, &tile_buffer) {
                warn!("Render thread stopping: {err}");
                return;
            }
        }
    })
}

fn floor_texture(config: &Config) -> marchtracer::Result<Texture> {
    if let Some(path) = &config.textures.floor {
        match Texture::load(path) {
            Ok(texture) => return Ok(texture),
            Err(err) => warn!("Floor texture unavailable ({err}), using checkerboard"),
        }
    }
    Texture::checkerboard(
        64,
        64,
        32,
        Vec3::new(1.0, 0.7, 0.3),
        Vec3::new(0.3, 0.2, 0.1),
    )
}

fn environment_texture(config: &Config) -> marchtracer::Result<Texture> {
    if let Some(path) = &config.textures.environment {
        match Texture::load(path) {
            Ok(texture) => return Ok(texture),
            Err(err) => warn!("Environment texture unavailable ({err}), using gradient sky"),
        }
    }
    let (width, height) = (256, 128);
    let apex = Vec3::new(0.5, 0.7, 0.8);
    let horizon = Vec3::new(1.0, 1.0, 1.0);
    let ground = Vec3::new(0.1, 0.1, 0.1);
    let pixels = (0..height)
        .flat_map(|y| {
            (0..width).map(move |_| {
                let a = y as f32 / (height - 1) as f32;
                if a < 0.5 {
                    apex + (horizon - apex) * (2.0 * a)
                } else {
                    horizon + (ground - horizon) * (2.0 * a - 1.0)
                }
            })
        })
        .collect();
    Texture::new(pixels, width, height)
}

fn build_scene(config: &Config) -> marchtracer::Result<Scene> {
    let ivory = Material::new(Vec4::new(0.6, 0.3, 0.1, 0.0), Vec3::new(0.4, 0.4, 0.3), 50.0, 1.0);
    let glass = Material::new(Vec4::new(0.0, 0.5, 0.1, 0.8), Vec3::new(0.6, 0.7, 0.8), 125.0, 1.5);
    let red_rubber = Material::new(
        Vec4::new(0.9, 0.1, 0.0, 0.0),
        Vec3::new(0.3, 0.1, 0.1),
        10.0,
        1.0,
    );
    let mirror = Material::new(
        Vec4::new(0.0, 10.0, 0.8, 0.0),
        Vec3::new(1.0, 1.0, 1.0),
        1425.0,
        1.0,
    );
    let floor = Material::new(Vec4::new(0.9, 0.1, 0.0, 0.0), Vec3::one(), 10.0, 1.0);

    let mut scene = Scene::new(config.tolerances);
    scene
        .push(Sphere::new(Vec3::new(-3.0, 0.0, -16.0), 2.0, ivory))
        .push(Sphere::new(Vec3::new(-1.0, -1.5, -12.0), 2.0, glass))
        .push(Sphere::new(Vec3::new(7.0, 5.0, -18.0), 4.0, mirror))
        .push(Cone::from_angle(Vec3::new(1.5, 1.0, -14.0), 3.0, 0.35, red_rubber))
        .push(Cuboid::new(Vec3::new(5.0, -2.5, -13.0), Vec3::new(1.0, 1.5, 1.0), ivory))
        .push(Fractal::new(Vec3::new(-6.0, 3.0, -15.0), red_rubber).with_scale(2.0))
        .push(HorPlane::textured(-4.0, floor, Arc::new(floor_texture(config)?), 4.0))
        .add_light(Light::new(Vec3::new(-20.0, 20.0, 20.0), 1.5))
        .add_light(Light::new(Vec3::new(30.0, 50.0, -25.0), 1.8))
        .add_light(Light::new(Vec3::new(30.0, 20.0, 30.0), 1.7))
        .set_background(Background::new(
            config.tolerances.max_dist,
            Arc::new(environment_texture(config)?),
        ));
    debug!("Scene has {} objects", scene.objects.len());
    Ok(scene)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = CliArguments::parse();
    let output_path = Path::new(&args.output);

    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    args.apply(&mut config);

    let exit_flag = Arc::new(AtomicBool::new(false));
    {
        let handler_exit_flag = exit_flag.clone();
        ctrlc::set_handler(move || {
            let _ = stdout().execute(cursor::Show);
            handler_exit_flag.store(true, Ordering::Relaxed)
        })?;
    }

    let scene = Arc::new(build_scene(&config)?);

    let mut stdout = stdout();
    stdout.execute(cursor::Hide)?;
    let start_time = Instant::now();

    let num_threads = args.threads.unwrap_or(
        thread::available_parallelism()
            .map(|p| p.get())
            .unwrap_or(1),
    );

    let render_image = RenderImage::new(&config);

    info!(
        "Starting render: {}x{}, {} samples, {} threads",
        config.render.width, config.render.height, config.render.samples, num_threads
    );

    let mut threads = (0..num_threads)
        .map(|_| spawn_render_thread(render_image.clone(), scene.clone(), exit_flag.clone()))
        .collect::<Vec<_>>();

    let mut counter: usize = 0;
    let total_tiles = render_image.tile_count();

    loop {
        threads.retain(|thread| !thread.is_finished());
        let done = threads.is_empty();

        let completed_tiles = render_image.finished_tiles.load(Ordering::Relaxed);
        let elapsed = start_time.elapsed().as_secs_f32();
        let total = (elapsed / completed_tiles.max(1) as f32) * total_tiles as f32;

        let term_width = terminal::size().map(|(w, _)| w).unwrap_or(32) as usize;
        let msg_time =
            format!("{completed_tiles}/{total_tiles} Tiles in {elapsed:0.2}s / {total:0.2}s");
        let progress_width = term_width.saturating_sub(msg_time.len() + 3).max(8);
        let render_progress =
            (progress_width as f32 * completed_tiles as f32 / total_tiles as f32).ceil() as usize;

        let msg_progress = (0..progress_width)
            .map(|i| if i <= render_progress { '#' } else { ' ' })
            .collect::<String>();

        stdout.queue(cursor::SavePosition)?;
        stdout.write_all(format!("{msg_time} [{msg_progress}]").as_bytes())?;
        stdout.queue(cursor::RestorePosition)?;
        stdout.flush()?;
        stdout.queue(terminal::Clear(terminal::ClearType::FromCursorDown))?;

        if args.incremental && counter.rem_euclid(8) == 0 {
            render_image.save(output_path)?;
        }

        if done || exit_flag.load(Ordering::Relaxed) {
            break;
        }
        counter += 1;
        thread::sleep(Duration::from_millis(250));
    }

    let duration = start_time.elapsed().as_secs_f32();
    stdout.execute(cursor::Show)?;
    info!("Rendered {total_tiles} tiles in {duration:0.2}s");
    render_image.save(output_path)?;
    info!("Image saved to \"{}\"", output_path.display());
    Ok(())
}
