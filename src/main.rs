use dataset::PlayerLoader;
use env_logger::Env;
use log::info;
use optimizer::utils::TimeEstimation;
use optimizer::{
    OptimizationPipeline, OptimizationResult, PlannerOptions, PlayerPool, SearchOptions,
    SquadConstraints, TransferDecision,
};
use std::env;
use std::fs;

fn main() -> color_eyre::Result<()> {
    color_eyre::install().unwrap();

    env_logger::Builder::from_env(Env::default()
        .default_filter_or("debug")
    ).init();

    let (records, estimated) = TimeEstimation::estimate(|| match env::var("PLAYERS_FILE") {
        Ok(path) => {
            info!("loading players from {}", path);
            PlayerLoader::load_from_file(path)
        }
        Err(_) => Ok(PlayerLoader::load()),
    });
    let records = records?;

    info!("players loaded: {} ms", estimated);

    let pool = PlayerPool::from_records(records)?;
    info!(
        "player pool ready: {} players, {} teams, {} gameweeks",
        pool.len(),
        pool.team_count(),
        pool.gameweeks()
    );

    let constraints = SquadConstraints::default();
    let search = SearchOptions {
        seed: env_or("SEED", 0),
        chains: env_or("CHAINS", 1),
        ..SearchOptions::default()
    };

    let (result, estimated) = TimeEstimation::estimate(|| {
        OptimizationPipeline::run(&pool, &constraints, &search, &PlannerOptions::default(), None)
    });
    let result = result?;

    info!("optimization finished: {} ms", estimated);

    report(&result);

    if let Ok(path) = env::var("RESULT_FILE") {
        fs::write(&path, serde_json::to_string_pretty(&result)?)?;
        info!("result written to {}", path);
    }

    Ok(())
}

fn env_or<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(fallback)
}

fn report(result: &OptimizationResult) {
    info!(
        "squad: {:.1} pts for {:.1} cost",
        result.squad_points, result.total_price
    );
    for entry in &result.squad {
        info!(
            "  {} {:<22} {:<16} {:>5.1}  {:>5.1} pts",
            entry.position, entry.name, entry.team, entry.price, entry.expected_points
        );
    }

    info!(
        "starting eleven ({}): {:.1} pts",
        result.lineup.formation, result.lineup.expected_points
    );

    for gameweek in &result.plan.gameweeks {
        match &gameweek.decision {
            TransferDecision::NoChange => {
                info!(
                    "  gw {}: hold ({} free)",
                    gameweek.gameweek, gameweek.free_transfers
                );
            }
            decision => {
                let moves: Vec<String> = decision
                    .transfers()
                    .iter()
                    .map(|t| format!("{} -> {}", t.out_name, t.in_name))
                    .collect();
                info!(
                    "  gw {}: {} ({} hits, {:+.1} net)",
                    gameweek.gameweek,
                    moves.join(", "),
                    gameweek.hits,
                    gameweek.net_benefit
                );
            }
        }
    }

    info!(
        "horizon: {:.1} pts, {} transfers, {} hits",
        result.plan.total_points(),
        result.plan.transfer_count(),
        result.plan.total_hits
    );
}
