
mod body;
mod collide;
mod dilate;
mod math;
mod tile;
mod tilemap;
mod world;

use {
    crate::{
        body::Body,
        dilate::Dilate,
        math::*,
        tile::{TileId, TileKind},
        tilemap::TileMap,
        world::{BodyId, Spawner, World},
    },
    ggez::{
        self,
        event, graphics, input::{keyboard, mouse}, timer,
        Context, GameError, GameResult,
    },
    rand_core::RngCore,
};

const KEY_LEFT : keyboard::KeyCode = keyboard::KeyCode::A;
const KEY_RIGHT: keyboard::KeyCode = keyboard::KeyCode::D;
const KEY_JUMP : keyboard::KeyCode = keyboard::KeyCode::W;
const KEY_DROP : keyboard::KeyCode = keyboard::KeyCode::S;
const KEY_RESET: keyboard::KeyCode = keyboard::KeyCode::R;
const KEY_SPAWN: keyboard::KeyCode = keyboard::KeyCode::Space;
const KEY_QUIT : keyboard::KeyCode = keyboard::KeyCode::Escape;

// the integrator works in pixels per step, tuned for 60 steps a second
const FRAMERATE: u32 = 60;
const DT:        f32 = 1. / FRAMERATE as f32;

const TILE_SIZE:  f32   = 32.;
const MAX_BODIES: usize = 64;

const PLAYER_START: (f32, f32) = (4., 9.);

const PLAYER_RADIUS:    f32 = 10.;
const PLAYER_ACC:       f32 = 15.;
const PLAYER_JUMP:      f32 = 360.;
const PLAYER_MAX_SPEED: f32 = 5.;
const PLAYER_REPEL:     f32 = 300.;

// tileset index is the position in this string
const TILESET: &str = r".#/\rn_aAdD";

const SLOPE_MAP: [u8; 11] = [
     0, // . empty
     1, // # full
     3, // / 45 nn
     2, // \ 45 pn
    11, // r convex nn
    10, // n convex pn
    30, // _ half down
    15, // a 22 nn small
    19, // A 22 nn big
    14, // d 22 pn small
    18, // D 22 pn big
];

const LEVEL: &[&str] = &[
    r"#########################",
    r"#.......................#",
    r"#.......................#",
    r"#...........rn..........#",
    r"#...........##..........#",
    r"#.......................#",
    r"#...___.........___.....#",
    r"#.......................#",
    r"#.......................#",
    r"#....................../#",
    r"#\..................../##",
    r"##\.........aADd...../###",
    r"###\......aA####Dd../####",
    r"#########################",
];

fn load_level() -> GameResult<TileMap> {
    let height = LEVEL.len();
    let width = LEVEL.first().map_or(0, |row| row.len());

    let data = LEVEL.iter()
        .flat_map(|row| row.chars())
        .map(|c| TILESET.find(c)
            .map(|index| index as u32)
            .ok_or_else(|| GameError::ResourceLoadError(format!("no tile for {:?} in level", c)))
        )
        .collect::<GameResult<Vec<u32>>>()?;

    TileMap::from_indices(width, height, TILE_SIZE, &data, &SLOPE_MAP)
        .map_err(|err| GameError::ResourceLoadError(err.to_string()))
}

fn tile_mesh(ctx: &mut Context, map: &TileMap) -> GameResult<graphics::Mesh> {
    let mut builder = graphics::MeshBuilder::new();
    for tile in map.tiles().filter(|tile| tile.is_solid()) {
        builder.polygon(graphics::DrawMode::fill(), &tile.outline(), tile_color(tile.kind))?;
    }
    builder.build(ctx)
}

fn player_start() -> P2 {
    P2::new(PLAYER_START.0, PLAYER_START.1) * TILE_SIZE
}

fn tile_color(kind: TileKind) -> graphics::Color {
    use {graphics::Color as C, TileKind::*};
    match kind {
        Full             => C::new(0.30, 0.32, 0.40, 1.),
        Half             => C::new(0.45, 0.35, 0.25, 1.),
        Concave | Convex => C::new(0.25, 0.45, 0.35, 1.),
        _                => C::new(0.35, 0.40, 0.55, 1.),
    }
}

fn body_color(body: &Body, is_player: bool) -> graphics::Color {
    use graphics::Color as C;
    if is_player {
        C::new(1.0, 0.5, 0.0, 1.)
    }
    else if body.touching.none() {
        C::new(0.8, 0.8, 0.8, 1.)
    }
    else {
        C::new(0.6, 0.9, 1.0, 1.)
    }
}

#[derive(Clone, Copy, Debug)]
struct Input {
    dir:   i32,
    jump:  bool,
    drop:  bool,
    reset: bool,
    spawn: bool,
}

struct App {
    world:      World,
    player:     BodyId,
    spawner:    Spawner,
    spawn_held: bool,

    tiles:  graphics::Mesh,
    circle: graphics::Mesh,
}

impl App {
    fn new(ctx: &mut Context, map: TileMap, seed: u64) -> GameResult<App> {
        let tiles = tile_mesh(ctx, &map)?;

        let circle = graphics::Mesh::new_circle(
            ctx,
            graphics::DrawMode::fill(),
            P2::origin(),
            1.,
            0.01,
            graphics::WHITE,
        )?;

        let spawn_area = Rect::new_with_dims(P2::new(1., 1.) * TILE_SIZE, V2::new(23., 2.) * TILE_SIZE);
        let spawner = Spawner::new(seed, spawn_area);

        let mut world = World::new(map);
        let mut player = Body::new(player_start(), PLAYER_RADIUS);
        player.max_speed = PLAYER_MAX_SPEED;
        let player = world.add_body(player);

        Ok(App { world, player, spawner, spawn_held: false, tiles, circle })
    }

    fn step(&mut self, input: Input) {
        if let Some(player) = self.world.body_mut(self.player) {
            match input.dir {
                -1 => player.move_left (PLAYER_ACC, DT),
                 1 => player.move_right(PLAYER_ACC, DT),
                 _ => { }
            }

            if input.jump && player.touching.down {
                player.move_up(PLAYER_JUMP, DT);
            }

            if input.drop {
                player.move_down(PLAYER_ACC, DT);
            }

            if input.reset {
                log::debug!("player reset from {:?}", player.pos());
                player.reset(player_start());
            }
        }

        if input.spawn && !self.spawn_held {
            if self.world.body_count() < MAX_BODIES {
                let body = self.spawner.spawn();
                self.world.add_body(body);
            }
            else {
                log::warn!("not spawning, already {} bodies", MAX_BODIES);
            }
        }
        self.spawn_held = input.spawn;

        self.world.step();

        if let Some(player) = self.world.body(self.player) {
            if player.landed() {
                log::debug!("player landed at {:?}", player.pos());
            }
        }
    }

    // throw the player directly away from `from`
    fn repel_player(&mut self, from: P2) {
        if let Some(player) = self.world.body_mut(self.player) {
            let toward = from - player.pos();
            let angle = toward.y.atan2(toward.x).to_degrees();
            player.move_from(PLAYER_REPEL, angle, DT);
        }
    }

    fn toggle_tile(&mut self, ctx: &mut Context, at: P2) {
        let map = &mut self.world.map;
        let (x, y) = match map.cell_at(at) {
            Some(cell) => cell,
            None       => return,
        };

        if let Some(tile) = map.get_mut(x, y) {
            if tile.is_solid() { tile.clear(); }
            else               { tile.set_id(TileId::Full); }
        }
        log::debug!("tile ({}, {}) is now {:?}", x, y, map.get(x, y).map(|tile| tile.id));

        match tile_mesh(ctx, map) {
            Ok(mesh) => self.tiles = mesh,
            Err(err) => log::warn!("can't rebuild tile mesh: {}", err),
        }
    }
}

impl event::EventHandler for App {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        if keyboard::is_key_pressed(ctx, KEY_QUIT) {
            event::quit(ctx);
            return Ok(());
        }

        let left  = keyboard::is_key_pressed(ctx, KEY_LEFT);
        let right = keyboard::is_key_pressed(ctx, KEY_RIGHT);

        let dir =
            if      left && !right { -1 }
            else if right && !left {  1 }
            else                   {  0 };

        let jump  = keyboard::is_key_pressed(ctx, KEY_JUMP);
        let drop  = keyboard::is_key_pressed(ctx, KEY_DROP);
        let reset = keyboard::is_key_pressed(ctx, KEY_RESET);
        let spawn = keyboard::is_key_pressed(ctx, KEY_SPAWN);

        let input = Input { dir, jump, drop, reset, spawn };

        while timer::check_update_time(ctx, FRAMERATE) {
            self.step(input);
        }

        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let alpha = timer::remaining_update_time(ctx).as_secs_f32() * FRAMERATE as f32;

        graphics::clear(ctx, [0.05, 0.10, 0.15, 1.].into());

        graphics::draw(ctx, &self.tiles, (P2::new(0., 0.),))?;

        for (id, body) in self.world.bodies() {
            let is_player = id == self.player;
            let pos = lerp_point(body.circle.old_pos, body.circle.pos, alpha);
            let r = body.circle.radius;

            let params = graphics::DrawParam::new()
                .dest(pos)
                .scale(V2::new(r, r))
                .color(body_color(body, is_player));

            graphics::draw(ctx, &self.circle, params)?;
        }

        let bounds = self.world.bounds.contract(TILE_SIZE);
        let (speed, angle) = self.world.body(self.player)
            .map_or((0., 0.), |player| (player.speed(), player.angle().to_degrees()));

        let status_line = format!(
            "bodies: {:3}  speed: {:4.2} @ {:4.0}   [A/D] roll  [W] jump  [S] drop  [R] reset  [Space] spawn  [click] toggle tile  [right click] repel",
            self.world.body_count(),
            speed,
            angle,
        );
        let text = graphics::Text::new(status_line);
        graphics::draw(ctx, &text, (bounds.mins + V2::new(4., 4.),))?;

        graphics::present(ctx)?;
        timer::yield_now();
        Ok(())
    }

    fn mouse_button_down_event(&mut self, ctx: &mut Context, button: mouse::MouseButton, x: f32, y: f32) {
        match button {
            mouse::MouseButton::Left  => self.toggle_tile(ctx, P2::new(x, y)),
            mouse::MouseButton::Right => self.repel_player(P2::new(x, y)),
            _                         => { }
        }
    }
}

pub fn main() -> GameResult {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let map = load_level()?;
    let rect = map.rect();

    let seed = rand::rngs::OsRng.next_u64();
    log::info!("level {}x{} tiles, seed {:#018x}", map.width(), map.height(), seed);

    let window_mode = ggez::conf::WindowMode::default()
        .dimensions(rect.width(), rect.height());

    let window_setup = ggez::conf::WindowSetup::default()
        .title("tilephys")
        .vsync(true);

    let (ctx, event_loop) = &mut ggez::ContextBuilder::new("tilephys", "ggez")
        .window_mode(window_mode)
        .window_setup(window_setup)
        .build()?;

    graphics::set_screen_coordinates(ctx, rect.into())?;

    let app = &mut App::new(ctx, map, seed)?;
    event::run(ctx, event_loop, app)
}
