mod common;

use common::{body, config, ids, make_state};
use space_invaders::collision::*;
use space_invaders::compute::reduce;
use space_invaders::entities::*;

fn enemy_bullet(id: &str, x: f64, y: f64) -> Body {
    body(id, Category::EnemyBullet, x, y)
}

fn player_bullet(id: &str, x: f64, y: f64) -> Body {
    body(id, Category::PlayerBullet, x, y)
}

// ── Ship ──────────────────────────────────────────────────────────────────────

#[test]
fn each_enemy_bullet_costs_the_ship_a_life() {
    let mut s = make_state();
    s.bullets.push(enemy_bullet("enemy-bullet1", 300.0, 545.0));
    s.bullets.push(enemy_bullet("enemy-bullet2", 305.0, 550.0));

    let s2 = resolve_collisions(&s, &config());
    assert_eq!(s2.ship.lives, 1);
    assert!(s2.bullets.is_empty());
    assert_eq!(s2.exited.len(), 2);
}

#[test]
fn ship_lives_saturate_at_zero() {
    let mut s = make_state();
    s.ship.lives = 1;
    s.bullets.push(enemy_bullet("enemy-bullet1", 300.0, 545.0));
    s.bullets.push(enemy_bullet("enemy-bullet2", 305.0, 550.0));

    let s2 = resolve_collisions(&s, &config());
    assert_eq!(s2.ship.lives, 0);
}

#[test]
fn last_life_lost_during_tick_ends_game() {
    let cfg = config();
    let mut s = make_state();
    s.ship.lives = 1;
    s.aliens.push(body("alien1", Category::Basic, 300.0, 100.0));
    s.bullets.push(enemy_bullet("enemy-bullet2", 300.0, 550.0));

    let s2 = reduce(&s, &Event::Tick(1), &cfg);
    assert_eq!(s2.status, GameStatus::Loss);
    assert_eq!(s2.ship.lives, 0);
    assert!(s2.aliens.is_empty());
    assert!(s2.bullets.is_empty());
}

#[test]
fn player_bullets_pass_through_ship() {
    let mut s = make_state();
    s.bullets.push(player_bullet("player-bullet1", 300.0, 550.0));
    let s2 = resolve_collisions(&s, &config());
    assert_eq!(s2.ship.lives, 3);
    assert_eq!(ids(&s2.bullets), vec!["player-bullet1"]);
}

#[test]
fn alien_touching_ship_flags_loss() {
    let mut s = make_state();
    s.aliens.push(body("alien1", Category::Basic, 300.0, 540.0));

    let report = detect(&s, &config());
    assert!(report.ship_rammed);

    let s2 = resolve_collisions(&s, &config());
    assert_eq!(s2.status, GameStatus::Loss);
}

#[test]
fn ram_freezes_board_in_same_tick() {
    let cfg = config();
    let mut s = make_state();
    s.aliens.push(body("alien1", Category::Basic, 300.0, 540.0));
    s.shields.push(body("shield2", Category::Shield, 70.0, 499.0));

    let s2 = reduce(&s, &Event::Tick(1), &cfg);
    assert_eq!(s2.status, GameStatus::Loss);
    assert_eq!(s2.ship.lives, 0);
    assert_eq!(s2.ship.y, cfg.ship.offscreen_y);
    let mut gone = ids(&s2.exited);
    gone.sort();
    assert_eq!(gone, vec!["alien1", "shield2"]);
}

// ── Shields ───────────────────────────────────────────────────────────────────

#[test]
fn enemy_bullet_wears_shield_down() {
    let mut s = make_state();
    s.shields.push(body("shield1", Category::Shield, 70.0, 499.0));
    s.bullets.push(enemy_bullet("enemy-bullet2", 70.0, 495.0));

    let s2 = resolve_collisions(&s, &config());
    assert_eq!(s2.shields[0].lives, 2);
    assert_eq!(s2.shields[0].id, "shield1");
    assert!(s2.bullets.is_empty());
}

#[test]
fn player_bullets_pass_through_shields() {
    let mut s = make_state();
    s.shields.push(body("shield1", Category::Shield, 70.0, 499.0));
    s.bullets.push(player_bullet("player-bullet2", 70.0, 495.0));

    let s2 = resolve_collisions(&s, &config());
    assert_eq!(s2.shields[0].lives, 3);
    assert_eq!(s2.bullets.len(), 1);
}

#[test]
fn bullet_hitting_ship_and_shield_is_removed_once() {
    let mut s = make_state();
    s.shields.push(body("shield1", Category::Shield, 300.0, 530.0));
    s.bullets.push(enemy_bullet("enemy-bullet2", 300.0, 535.0));

    let report = detect(&s, &config());
    assert_eq!(report.spent_bullets, vec!["enemy-bullet2".to_string()]);

    let s2 = resolve_collisions(&s, &config());
    assert_eq!(s2.ship.lives, 2);
    assert_eq!(s2.shields[0].lives, 2);
    assert!(s2.bullets.is_empty());
    assert_eq!(ids(&s2.exited), vec!["enemy-bullet2"]);
}

#[test]
fn alien_contact_damages_shield_not_alien() {
    let mut s = make_state();
    s.shields.push(body("shield1", Category::Shield, 200.0, 499.0));
    s.aliens.push(body("alien2", Category::Basic, 205.0, 495.0));

    let s2 = resolve_collisions(&s, &config());
    assert_eq!(s2.shields[0].lives, 2);
    assert_eq!(s2.aliens[0].lives, 1);
    assert_eq!(s2.status, GameStatus::Playing);
}

#[test]
fn destroyed_shield_leaves_at_end_of_tick() {
    let cfg = config();
    let mut s = make_state();
    s.aliens.push(body("alien1", Category::Basic, 300.0, 100.0));
    let mut shield = body("shield2", Category::Shield, 70.0, 499.0);
    shield.lives = 1;
    s.shields.push(shield);
    s.bullets.push(enemy_bullet("enemy-bullet3", 70.0, 499.0));

    let s2 = reduce(&s, &Event::Tick(1), &cfg);
    assert!(s2.shields.is_empty());
    let mut gone = ids(&s2.exited);
    gone.sort();
    assert_eq!(gone, vec!["enemy-bullet3", "shield2"]);
}

// ── Aliens ────────────────────────────────────────────────────────────────────

#[test]
fn enemy_bullets_do_not_hurt_aliens() {
    let mut s = make_state();
    s.aliens.push(body("alien1", Category::Basic, 200.0, 200.0));
    s.bullets.push(enemy_bullet("enemy-bullet2", 200.0, 200.0));

    let s2 = resolve_collisions(&s, &config());
    assert_eq!(s2.aliens[0].lives, 1);
    assert_eq!(s2.bullets.len(), 1);
    assert_eq!(s2.score, 0);
}

#[test]
fn tank_pays_out_only_on_final_hit() {
    let cfg = config();
    let mut s = make_state();
    s.aliens.push(body("tank1", Category::Tank, 200.0, 200.0));
    s.bullets.push(player_bullet("player-bullet2", 200.0, 200.0));

    let hit = resolve_collisions(&s, &cfg);
    assert_eq!(hit.aliens[0].lives, 1);
    assert_eq!(hit.aliens[0].id, "tank1");
    assert_eq!(hit.score, 0);
    // a damaged tank is still live, only the bullet left
    assert_eq!(ids(&hit.exited), vec!["player-bullet2"]);

    let mut again = hit.clone();
    again.exited.clear();
    again.bullets.push(player_bullet("player-bullet3", 200.0, 200.0));
    let dead = resolve_collisions(&again, &cfg);
    assert_eq!(dead.aliens[0].lives, 0);
    assert_eq!(dead.score, cfg.scores.tank);
}

#[test]
fn two_bullets_on_tank_pay_once() {
    let cfg = config();
    let mut s = make_state();
    s.aliens.push(body("tank1", Category::Tank, 200.0, 200.0));
    s.bullets.push(player_bullet("player-bullet2", 200.0, 200.0));
    s.bullets.push(player_bullet("player-bullet3", 201.0, 199.0));

    let s2 = resolve_collisions(&s, &cfg);
    assert_eq!(s2.aliens[0].lives, 0);
    assert_eq!(s2.score, cfg.scores.tank);
    assert!(s2.bullets.is_empty());
}

#[test]
fn one_bullet_can_hit_two_aliens() {
    let cfg = config();
    let mut s = make_state();
    s.aliens.push(body("alien1", Category::Basic, 195.0, 200.0));
    s.aliens.push(body("shooter2", Category::Shooter, 205.0, 200.0));
    s.bullets.push(player_bullet("player-bullet3", 200.0, 200.0));

    let s2 = resolve_collisions(&s, &cfg);
    assert!(s2.aliens.iter().all(|a| a.lives == 0));
    assert_eq!(s2.score, cfg.scores.basic + cfg.scores.shooter);
    assert_eq!(ids(&s2.exited), vec!["player-bullet3"]);
}

#[test]
fn reward_follows_configured_table() {
    let mut cfg = config();
    cfg.scores.basic = 10;
    let mut s = make_state();
    s.aliens.push(body("alien1", Category::Basic, 200.0, 200.0));
    s.bullets.push(player_bullet("player-bullet2", 200.0, 200.0));

    let s2 = resolve_collisions(&s, &cfg);
    assert_eq!(s2.score, 10);
}

#[test]
fn no_contact_reports_nothing() {
    let mut s = make_state();
    s.aliens.push(body("alien1", Category::Basic, 100.0, 100.0));
    s.shields.push(body("shield2", Category::Shield, 70.0, 499.0));
    s.bullets.push(player_bullet("player-bullet3", 400.0, 300.0));

    let report = detect(&s, &config());
    assert_eq!(report.ship_hits, 0);
    assert!(!report.ship_rammed);
    assert_eq!(report.alien_hits, vec![0]);
    assert_eq!(report.shield_hits, vec![0]);
    assert!(report.spent_bullets.is_empty());
    assert_eq!(report.score_gain, 0);
}
