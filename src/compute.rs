//! Pure game-logic functions.
//!
//! Nothing here reads a clock or touches the terminal.  Time arrives as
//! "milliseconds since session start" and all randomness comes through an
//! injected RNG, so a seeded generator makes every function deterministic.

use log::{debug, info, trace};
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bullet, Enemy, GameState, GameStatus, Player, Rect, TickInput};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the session state: player at the bottom centre plus the initial wave.
/// `now_ms` starts the timed-spawn clock.
pub fn init_state(config: GameConfig, now_ms: u64, rng: &mut impl Rng) -> GameState {
    let enemies = (0..config.initial_enemy_count)
        .map(|_| spawn_enemy(&config, rng))
        .collect();

    GameState {
        config,
        player: new_player(&config),
        enemies,
        bullets: Vec::new(),
        score: 0,
        status: GameStatus::Running,
        last_spawn_ms: now_ms,
        shots_fired: 0,
        enemies_destroyed: 0,
        tick: 0,
    }
}

pub fn new_player(config: &GameConfig) -> Player {
    let w = config.player_width;
    let h = config.player_height;
    Player {
        rect: Rect::new(
            config.screen_width / 2 - w / 2,
            config.screen_height - config.player_bottom_margin - h,
            w,
            h,
        ),
        speed: config.player_speed,
        last_shot_ms: None,
        shoot_delay_ms: config.shoot_delay_ms,
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Move by ±speed according to the held keys, then clamp to the screen.
pub fn update_player(player: &mut Player, input: &TickInput, config: &GameConfig) {
    if input.left {
        player.rect.x -= player.speed;
    }
    if input.right {
        player.rect.x += player.speed;
    }
    let max_x = (config.screen_width - player.rect.w).max(0);
    player.rect.x = player.rect.x.clamp(0, max_x);
}

/// Cooldown gate.  Succeeds (and restarts the cooldown) only when strictly
/// more than `shoot_delay_ms` has passed since the last successful shot.
/// The first shot of a session is always allowed.
pub fn request_shot(player: &mut Player, now_ms: u64) -> bool {
    let ready = match player.last_shot_ms {
        None => true,
        Some(last) => now_ms.saturating_sub(last) > player.shoot_delay_ms,
    };
    if ready {
        player.last_shot_ms = Some(now_ms);
    }
    ready
}

// ── Bullet ───────────────────────────────────────────────────────────────────

/// A new bullet centred on the player with its bottom edge on the player's top edge.
pub fn spawn_bullet(player: &Player, config: &GameConfig) -> Bullet {
    let w = config.bullet_width;
    let h = config.bullet_height;
    Bullet {
        rect: Rect::new(player.rect.center_x() - w / 2, player.rect.top() - h, w, h),
        speed: config.bullet_speed,
    }
}

/// Move upward one step.  Returns `false` once the bullet has left the top
/// of the screen (bottom edge above 0) and should be dropped.
pub fn update_bullet(bullet: &mut Bullet) -> bool {
    bullet.rect.y -= bullet.speed;
    bullet.rect.bottom() >= 0
}

// ── Enemy ────────────────────────────────────────────────────────────────────

/// Fresh enemy somewhere above the visible area with a random speed.
pub fn spawn_enemy(config: &GameConfig, rng: &mut impl Rng) -> Enemy {
    let w = config.enemy_width;
    let h = config.enemy_height;
    let (x, y, speed) = random_placement(config, rng);
    Enemy {
        rect: Rect::new(x, y, w, h),
        speed,
    }
}

fn random_placement(config: &GameConfig, rng: &mut impl Rng) -> (i32, i32, i32) {
    let max_x = (config.screen_width - config.enemy_width).max(0);
    let x = rng.gen_range(0..=max_x);
    let y = rng.gen_range(config.enemy_spawn_y_min..=config.enemy_spawn_y_max);
    let speed = rng.gen_range(1..=config.enemy_max_speed.max(1));
    (x, y, speed)
}

/// Move downward one step.  An enemy whose top edge passes the bottom of the
/// screen is recycled in place: new random position and speed, same slot.
/// Returns `true` when a recycle happened.
pub fn update_enemy(enemy: &mut Enemy, config: &GameConfig, rng: &mut impl Rng) -> bool {
    enemy.rect.y += enemy.speed;
    if enemy.rect.top() > config.screen_height {
        let (x, y, speed) = random_placement(config, rng);
        enemy.rect.x = x;
        enemy.rect.y = y;
        enemy.speed = speed;
        true
    } else {
        false
    }
}

// ── Collisions ───────────────────────────────────────────────────────────────

/// Remove every bullet/enemy pair that overlaps.
///
/// Overlaps are judged against the sets as they stand on entry: every bullet
/// touching at least one enemy is consumed, and every enemy touching at least
/// one bullet is destroyed exactly once.  Returns the number of enemies killed.
pub fn resolve_bullet_hits(bullets: &mut Vec<Bullet>, enemies: &mut Vec<Enemy>) -> usize {
    let mut bullet_hit = vec![false; bullets.len()];
    let mut enemy_hit = vec![false; enemies.len()];

    for (bi, bullet) in bullets.iter().enumerate() {
        for (ei, enemy) in enemies.iter().enumerate() {
            if bullet.rect.overlaps(&enemy.rect) {
                bullet_hit[bi] = true;
                enemy_hit[ei] = true;
            }
        }
    }

    let mut hit = bullet_hit.into_iter();
    bullets.retain(|_| !hit.next().unwrap_or(false));

    let kills = enemy_hit.iter().filter(|&&h| h).count();
    let mut hit = enemy_hit.into_iter();
    enemies.retain(|_| !hit.next().unwrap_or(false));

    kills
}

pub fn player_collides(player: &Player, enemies: &[Enemy]) -> bool {
    enemies.iter().any(|e| e.rect.overlaps(&player.rect))
}

// ── Per-tick step ────────────────────────────────────────────────────────────

/// Advance the simulation by one tick at session time `now_ms`.
///
/// Order: shoot request, timed spawn, movement, bullet × enemy hits,
/// player × enemy check.  A finished game is returned unchanged.
pub fn tick(
    state: &GameState,
    input: &TickInput,
    now_ms: u64,
    rng: &mut impl Rng,
) -> GameState {
    if state.status != GameStatus::Running {
        return state.clone();
    }

    let config = state.config;
    let mut next = state.clone();
    next.tick += 1;

    // ── 1. Fire ──────────────────────────────────────────────────────────────
    if input.fire && request_shot(&mut next.player, now_ms) {
        next.bullets.push(spawn_bullet(&next.player, &config));
        next.shots_fired += 1;
        trace!("shot fired at {now_ms} ms");
    }

    // ── 2. Timed spawn ───────────────────────────────────────────────────────
    if now_ms.saturating_sub(next.last_spawn_ms) >= config.enemy_spawn_interval_ms {
        next.enemies.push(spawn_enemy(&config, rng));
        next.last_spawn_ms = now_ms;
        debug!("timed spawn at {now_ms} ms, {} enemies", next.enemies.len());
    }

    // ── 3. Move everything ───────────────────────────────────────────────────
    update_player(&mut next.player, input, &config);
    for enemy in next.enemies.iter_mut() {
        if update_enemy(enemy, &config, rng) {
            trace!("enemy recycled to x={}", enemy.rect.x);
        }
    }
    next.bullets.retain_mut(update_bullet);

    // ── 4. Bullets ↔ enemies ─────────────────────────────────────────────────
    let kills = resolve_bullet_hits(&mut next.bullets, &mut next.enemies);
    for _ in 0..kills {
        next.enemies.push(spawn_enemy(&config, rng));
    }
    if kills > 0 {
        next.score += config.score_per_kill * kills as u32;
        next.enemies_destroyed += kills as u32;
        debug!("{kills} enemies destroyed, score {}", next.score);
    }

    // ── 5. Player ↔ enemies ──────────────────────────────────────────────────
    if player_collides(&next.player, &next.enemies) {
        next.status = GameStatus::GameOver;
        info!("game over at {now_ms} ms with score {}", next.score);
    }

    next
}
