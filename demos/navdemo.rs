//! Terrain pathfinding demo.
//!
//! Run: cargo run --bin navdemo [seed]
//! Set VOXNAV_LOG=debug to see search traces.

use voxnav_demos::{Algorithm, Demo, DemoConfig, init_logging};

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Error: {e}");
    }

    let mut config = DemoConfig::default();
    if let Some(arg) = std::env::args().nth(1) {
        match arg.parse() {
            Ok(seed) => config.seed = seed,
            Err(e) => {
                eprintln!("Error: bad seed {arg:?}: {e}");
                std::process::exit(2);
            }
        }
    }

    let demo = match Demo::generate(&config) {
        Ok(demo) => demo,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    println!(
        "seed {}: {} nodes, road {} -> {}",
        config.seed,
        demo.grid().len(),
        demo.origin(),
        demo.goal()
    );

    for algorithm in Algorithm::ALL {
        let outcome = match demo.run(algorithm) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("Error: {}: {e}", algorithm.name());
                std::process::exit(1);
            }
        };
        let s = outcome.stats;
        match (&outcome.route, outcome.cost) {
            (Some(route), Some(cost)) => println!(
                "\n{}: {} hops, cost {cost}, {} pops, {} pushes",
                algorithm.name(),
                route.len().saturating_sub(1),
                s.pops,
                s.pushes
            ),
            _ => println!(
                "\n{}: unreachable, {} pops, {} pushes",
                algorithm.name(),
                s.pops,
                s.pushes
            ),
        }
        for (y, rows) in demo.render(&outcome) {
            println!("  y = {y}");
            for row in rows {
                println!("  |{row}|");
            }
        }
    }
}
