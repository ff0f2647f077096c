use dotenv::dotenv;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::env;
use teampredict_rs::{
    Config, OpenDex, OpenValidator, Result, TeamMemberInfo, TeamPredictor, UsageData,
    UsageHeuristic,
};

fn main() -> Result<()> {
    dotenv().ok();
    teampredict_rs::logger::init()?;

    let config = Config::from_env()?;

    let path = config
        .stats_file
        .clone()
        .or_else(|| env::args().nth(1).map(Into::into))
        .ok_or("usage: teampredict_rs <usage.json> [member ...] (or set STATS_FILE)")?;

    let usage = UsageData::from_file(&path)?;
    info!("{} species loaded from {}", usage.species_count(), path.display());

    let known: Vec<TeamMemberInfo> = env::args().skip(2).map(parse_member).collect();
    let budget = config.validation_budget;
    let json = config.json_output;

    let predictor = TeamPredictor::new(&OpenDex, OpenValidator, usage, config);

    let mut rng = match env::var("SEED").ok().and_then(|s| s.parse().ok()) {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };

    let mut heuristics = UsageHeuristic::new(predictor.stats());
    let team = predictor.predict_team(&known, &mut heuristics, &mut rng, budget);

    if json {
        println!("{}", serde_json::to_string_pretty(&team)?);
    } else {
        for set in &team {
            println!("{}", set);
        }
    }

    Ok(())
}

/// `Pidgey@Choice Band:Return,Roost` locks an item and two moves.
/// Everything after the species is optional.
fn parse_member(arg: String) -> TeamMemberInfo {
    let (head, tail) = match arg.find(':') {
        Some(at) => (&arg[..at], Some(&arg[at + 1..])),
        None => (arg.as_str(), None),
    };

    let mut info = match head.find('@') {
        Some(at) => {
            let mut info = TeamMemberInfo::new(head[..at].trim());
            info.item = Some(head[at + 1..].trim().to_string());
            info
        }
        None => TeamMemberInfo::new(head.trim()),
    };

    if let Some(moves) = tail {
        info.moves = moves
            .split(',')
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .collect();
    }

    info
}
