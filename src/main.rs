//! Planet Panic entry point
//!
//! Headless autoplay runner: advances the simulation at a fixed cadence
//! with a simple wander policy and reports the outcome. Useful for soak
//! testing and balance tuning without a renderer attached.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use planet_panic::BestScore;
    use planet_panic::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or(0)
        });
    let max_seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(180.0);

    log::info!("Starting run with seed {seed}");
    let mut state = GameState::new(seed);

    let dt = 1.0 / 60.0;
    let mut frame: u64 = 0;
    let mut next_report = 5.0;

    while state.phase == GamePhase::Running && state.game_time < max_seconds {
        // Wander policy: keep moving, weave, spin away when standing in lava
        let input = TickInput {
            move_forward: true,
            turn_left: (frame / 180) % 2 == 0,
            turn_right: (frame / 180) % 2 == 1,
            brake_turn: state.in_lava,
        };
        tick(&mut state, &input, dt);
        frame += 1;

        if state.game_time >= next_report {
            let snap = state.snapshot();
            log::info!(
                "t={:>5.1}s r={:>4.1} score={:>6.0} hits={}/{} meteors={} enemies={} lava={}",
                snap.game_time,
                snap.effective_radius,
                snap.score,
                snap.hits,
                snap.max_hits,
                snap.meteors.len(),
                snap.enemies.len(),
                snap.lava_pools.len(),
            );
            next_report += 5.0;
        }
    }

    let snap = state.snapshot();
    let outcome = match snap.phase {
        GamePhase::Won => "WON",
        GamePhase::Lost => "LOST",
        GamePhase::Running => "TIMED OUT",
    };
    println!(
        "{outcome} after {:.1}s - score {:.0}, radius {:.1}, hits {}/{}",
        snap.game_time, snap.score, snap.effective_radius, snap.hits, snap.max_hits
    );

    if snap.phase != GamePhase::Running {
        let mut best = BestScore::load();
        if best.record(snap.score) {
            best.save();
            println!("New best score: {:.0}", best.score);
        } else {
            println!("Best score remains {:.0}", best.score);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The wasm build is driven by the host page through the library API
}
