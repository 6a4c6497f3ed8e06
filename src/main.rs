//! Pongify headless driver
//!
//! Runs an autoplay match at a simulated 60 fps and logs the result.
//! Usage: `pongify [easy|medium|hard] [seed] [max_score]`

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    use pongify::consts::SIM_DT;
    use pongify::sim::{Match, MatchEvent, TickInput};
    use pongify::{Difficulty, FrameClock, MatchConfig};

    // Ten minutes of play at 60 Hz
    const TICK_LIMIT: u64 = 60 * 60 * 10;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let difficulty: Difficulty = match args.next() {
        Some(name) => name.parse()?,
        None => Difficulty::default(),
    };
    let mut config = MatchConfig::from_difficulty(difficulty);
    if let Some(seed) = args.next() {
        config = config.with_seed(seed.parse()?);
    }
    if let Some(max_score) = args.next() {
        config = config.with_max_score(max_score.parse()?);
    }

    log::info!("Pongify (native) starting on {} difficulty", difficulty);
    let mut game = Match::new(&config)?;
    game.set_autoplay(true);

    let mut clock = FrameClock::new();
    let input = TickInput::default();
    let mut hits = 0u32;

    'frames: while game.is_running() && game.time_ticks < TICK_LIMIT {
        for _ in 0..clock.advance(SIM_DT) {
            game.tick(&input);
            for event in game.events() {
                match event {
                    MatchEvent::PaddleHit(_) => hits += 1,
                    MatchEvent::PointScored(side) => {
                        log::info!(
                            "Point to {:?} after {} hits ({} - {})",
                            side,
                            hits,
                            game.player_score,
                            game.opponent_score
                        );
                        hits = 0;
                    }
                    _ => {}
                }
            }
            if !game.is_running() {
                break 'frames;
            }
        }
    }

    let snapshot = game.snapshot();
    match snapshot.winner() {
        Some(winner) => log::info!(
            "{:?} wins {} - {} in {} ticks (seed {})",
            winner,
            snapshot.player_score,
            snapshot.opponent_score,
            game.time_ticks,
            game.seed
        ),
        None => log::warn!(
            "No winner after {} ticks ({} - {})",
            game.time_ticks,
            snapshot.player_score,
            snapshot.opponent_score
        ),
    }
    println!("{}", serde_json::to_string(&snapshot)?);
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser adapter drives the simulation through the library
}
