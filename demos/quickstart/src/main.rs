//! quickstart — smallest end-to-end run of the transit router.
//!
//! Loads a six-stop network from embedded CSV, builds the all-pairs index,
//! answers a few queries, then writes the index to a snapshot file and checks
//! that a planner restored from it gives the same answers.
//!
//! Run with `RUST_LOG=debug` to see the build phases.

use std::time::Instant;

use anyhow::{Result, bail};

use tc_catalogue::load_catalogue_readers;
use tc_router::{JsonFileStore, PlannerConfig, RouteOutcome, RoutePlanner};

// ── Network CSV ───────────────────────────────────────────────────────────────

const STOPS_CSV: &str = "\
name,lat,lng\n\
Tolstopaltsevo,55.611087,37.20829\n\
Marushkino,55.595884,37.209755\n\
Rasskazovka,55.632761,37.333324\n\
Biryulyovo Zapadnoye,55.574371,37.6517\n\
Biryusinka,55.581065,37.64839\n\
Universam,55.587655,37.645687\n\
";

const DISTANCES_CSV: &str = "\
from,to,meters\n\
Tolstopaltsevo,Marushkino,3900\n\
Marushkino,Rasskazovka,9900\n\
Marushkino,Marushkino,100\n\
Rasskazovka,Marushkino,9500\n\
Biryulyovo Zapadnoye,Biryusinka,1800\n\
Biryusinka,Universam,750\n\
Universam,Biryulyovo Zapadnoye,2400\n\
";

// Line 750 runs there and back; line 256 is a loop.
const LINES_CSV: &str = "\
bus,is_loop,stop\n\
750,false,Tolstopaltsevo\n\
750,false,Marushkino\n\
750,false,Marushkino\n\
750,false,Rasskazovka\n\
256,true,Biryulyovo Zapadnoye\n\
256,true,Biryusinka\n\
256,true,Universam\n\
256,true,Biryulyovo Zapadnoye\n\
";

const CONFIG_JSON: &str = r#"{ "routing_settings": { "bus_wait_time": 6, "bus_velocity": 40 } }"#;

const QUERIES: &[(&str, &str)] = &[
    ("Tolstopaltsevo", "Rasskazovka"),
    ("Rasskazovka", "Tolstopaltsevo"),
    ("Biryusinka", "Biryulyovo Zapadnoye"),
    ("Universam", "Marushkino"),
];

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let catalogue = load_catalogue_readers(
        STOPS_CSV.as_bytes(),
        LINES_CSV.as_bytes(),
        DISTANCES_CSV.as_bytes(),
    )?;

    for line in ["750", "256"] {
        let stats = catalogue.bus_stats(line)?;
        println!(
            "Bus {}: {} stops on route, {} unique stops, {:.0} route length, {:.6} curvature",
            stats.name, stats.stop_count, stats.unique_stop_count, stats.route_length, stats.curvature
        );
    }

    let mut planner = RoutePlanner::new(catalogue);
    let t0 = Instant::now();
    planner.configure(&PlannerConfig::from_json_str(CONFIG_JSON)?)?;
    log::info!("index built in {:.3} ms", t0.elapsed().as_secs_f64() * 1e3);

    let answers = QUERIES
        .iter()
        .map(|&(from, to)| planner.find_route(from, to))
        .collect::<Result<Vec<_>, _>>()?;

    for (&(from, to), outcome) in QUERIES.iter().zip(&answers) {
        match outcome {
            RouteOutcome::Found(it) => {
                println!("{from} -> {to}:\n{}", serde_json::to_string_pretty(it)?);
            }
            RouteOutcome::NoRoute => println!("{from} -> {to}: not found"),
        }
    }

    // ── Persist and restore ──────────────────────────────────────────────
    let store = JsonFileStore::new(std::env::temp_dir().join("quickstart-route-index.json"));
    planner.persist(&store)?;
    let restored = RoutePlanner::load(&store)?;

    for (&(from, to), expected) in QUERIES.iter().zip(&answers) {
        if restored.find_route(from, to)? != *expected {
            bail!("restored index disagrees on {from} -> {to}");
        }
    }
    println!("restored index from {} matches", store.path().display());

    Ok(())
}
