use glam::Vec2;
use nosnag::*;

fn main() {
    let mut map = TileMap::new(6, 9, 16.0, 16.0);
    map.load(
        &[
            "WWWWWWWWW",
            "W.......W",
            "W..P....W",
            "W.....WWW",
            "W.......W",
            "WWWWWWWWW",
        ],
        &['W'],
        &[0],
        4,
    )
    .expect("map data is well formed");

    let spawn = map.symbol_positions('P')[0];
    let mut player = Sprite::new(spawn.x, spawn.y, 12.0, 12.0);
    player.physics = Some(Physics {
        velocity: Vec2::new(40.0, 0.0),
        acceleration: Vec2::new(0.0, 300.0),
    });
    println!("spawn at ({:.1},{:.1})", spawn.x, spawn.y);

    let dt = 1.0 / 60.0;
    for frame in 0..120 {
        // Euler step, then let the map push the player back out.
        let physics = player.physics.unwrap();
        player.physics = Some(Physics {
            velocity: physics.velocity + physics.acceleration * dt,
            acceleration: physics.acceleration,
        });
        let vel = player.physics.unwrap().velocity;
        player.move_by(vel.x * dt, vel.y * dt);
        map.prevent_sprite_overlap(&mut player);

        if frame % 20 == 0 {
            let physics = player.physics.unwrap();
            println!(
                "frame {frame:3}: pos=({:6.2},{:6.2}) vel=({:6.2},{:6.2}) grounded={}",
                player.position.x,
                player.position.y,
                physics.velocity.x,
                physics.velocity.y,
                physics.velocity.y == 0.0,
            );
        }
    }

    let mut probe = player.clone();
    probe.move_by(0.0, 2.0);
    println!("probe below player overlaps map: {}", map.check_sprite_overlap(&probe));
}
