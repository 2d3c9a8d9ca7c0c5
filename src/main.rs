//! Sound Trail entry point
//!
//! The browser build is driven through the library's wasm-bindgen
//! surface; this binary is the native harness. It loads a game config
//! (from a path argument, or an embedded demo game), plays a seeded
//! scripted session headlessly, and prints the path and final stats.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;
    use sound_trail::anim::{FeedbackKind, MarkerDriver, MarkerState};
    use sound_trail::consts::*;
    use sound_trail::path::{generate_checkpoints, svg_path_d};
    use sound_trail::persistence::MemoryStore;
    use sound_trail::{GameConfig, GameSession, shuffle};

    env_logger::init();

    let config_json = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(e) => {
                eprintln!("Cannot read config {path}: {e}");
                std::process::exit(1);
            }
        },
        None => DEMO_CONFIG.to_string(),
    };

    let config = match GameConfig::from_json(&config_json) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid game config: {e}");
            std::process::exit(1);
        }
    };

    let seed = sound_trail::now_ms() as u64;
    let mut rng = Pcg32::seed_from_u64(seed);
    log::info!("Playing {:?} with seed {seed}", config.title);

    let style = config.path_style();
    let steps = config.challenges.len();
    let checkpoints = generate_checkpoints(style, steps, MAP_WIDTH, MAP_HEIGHT, MAP_PADDING);
    println!("Path ({}): {}", style.as_str(), svg_path_d(&checkpoints));

    let mut session = GameSession::new(config, Box::new(MemoryStore::new()));
    let mut marker = MarkerDriver::new();
    marker.bind_checkpoints(checkpoints, session.position());

    // Scripted player: picks a random button each turn, like a child
    // guessing. Retreats guarantee this can run a while; cap the turns.
    let mut turns = 0;
    while !session.is_victory() && turns < 200 {
        turns += 1;
        let challenge = session.current_challenge().expect("not at victory");
        let order = shuffle::display_order(&mut rng, challenge.pairs.len());
        let choice = order[rng.random_range(0..order.len())];
        let word = challenge.pairs[choice].word.clone();

        let outcome = session.submit_answer(choice);
        log::info!(
            "Turn {turns}: picked {word:?} - {} (position {})",
            outcome.message,
            outcome.new_position
        );

        marker.pulse(if outcome.correct {
            FeedbackKind::Forward
        } else {
            FeedbackKind::Backward
        });
        marker.move_to(outcome.new_position);
        while marker.state() == MarkerState::Walking {
            marker.advance(16.0);
        }
    }

    if session.is_victory() {
        marker.celebrate();
        while marker.state() == MarkerState::Celebrating {
            marker.advance(16.0);
        }
        println!("Victory in {turns} turns!");
    } else {
        println!("Gave up after {turns} turns.");
    }

    let stats = session.stats();
    println!(
        "Attempts: {} ({} correct, {} wrong), accuracy {:.1}%, progress {:.1}%",
        stats.total_attempts,
        stats.correct_attempts,
        stats.wrong_attempts,
        stats.accuracy,
        stats.progress
    );
}

#[cfg(not(target_arch = "wasm32"))]
const DEMO_CONFIG: &str = r#"{
    "title": "th vs f",
    "challenges": [
        {
            "id": "thin-fin",
            "correctSound": "th",
            "pairs": [
                { "word": "thin", "sound": "th", "image": "images/thin", "alt": "a thin stick" },
                { "word": "fin", "sound": "f", "image": "images/fin", "alt": "a shark fin" }
            ]
        },
        {
            "id": "thor-four",
            "correctSound": "th",
            "pairs": [
                { "word": "four", "sound": "f", "image": "images/four", "alt": "the number four" },
                { "word": "Thor", "sound": "th", "image": "images/thor", "alt": "a hero with a hammer" }
            ]
        },
        {
            "id": "three-free",
            "correctSound": "th",
            "pairs": [
                { "word": "three", "sound": "th", "image": "images/three", "alt": "the number three" },
                { "word": "free", "sound": "f", "image": "images/free", "alt": "a bird flying free" }
            ]
        }
    ],
    "victory": { "message": "You found all the th sounds!" },
    "map": { "pathStyle": "winding", "theme": "forest" }
}"#;

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM builds are driven through the library crate
}
