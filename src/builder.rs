use crate::heuristics::{combine, exclude_keys, Heuristic, Scorer};
use crate::pool::WeightedPool;
use crate::types::{PokemonSet, TeamMemberInfo, DEFAULT_LEVEL, MAX_HAPPINESS, MAX_MOVES};
use crate::utils::to_id;
use rand::Rng;
use stats::usage::WeightedMap;
use stats::{SpeciesUsage, Spread, StatLine};

/// Flesh out one full set for a species from its usage distributions.
///
/// Whatever the caller already knows (level, ability, item, some moves)
/// stays untouched; everything else is drawn from the species' spread,
/// ability, item and move statistics, reshaped by the given strategy.
///
/// Thin data never fails the build: a species with no recorded items ends
/// up with an empty item, one with three known moves ends up with three.
pub fn predict_set<H, R>(
    view: &SpeciesUsage,
    info: &TeamMemberInfo,
    heuristics: &H,
    rng: &mut R,
) -> PokemonSet
where
    H: Heuristic + ?Sized,
    R: Rng + ?Sized,
{
    let mut set = PokemonSet {
        species: info.species.clone(),
        name: info.name.clone().unwrap_or_else(|| info.species.clone()),
        level: info.level.unwrap_or(DEFAULT_LEVEL),
        gender: info.gender.clone().unwrap_or_default(),
        ability: info.ability.clone().unwrap_or_default(),
        item: info.item.clone().unwrap_or_default(),
        ivs: StatLine::max_ivs(),
        happiness: MAX_HAPPINESS,
        ..PokemonSet::default()
    };

    // locked moves go in first, deduplicated and capped at the slot limit
    for name in &info.moves {
        if set.moves.len() == MAX_MOVES {
            break;
        }

        if !set.has_move(&to_id(name)) {
            set.moves.push(name.clone());
        }
    }

    pick_spread(&mut set, view, heuristics, rng);

    if set.ability.is_empty() {
        set.ability = pick_one(&view.abilities, heuristics.ability_scorer(), rng);
    }

    if set.item.is_empty() {
        set.item = pick_one(&view.items, heuristics.item_scorer(), rng);
    }

    pick_moves(&mut set, view, heuristics, rng);

    // Frustration runs off inverted happiness; Return on the same set wants
    // the usual maximum and wins the argument
    if set.has_move("frustration") && !set.has_move("return") {
        set.happiness = 0;
    }

    set
}

fn pick_spread<H, R>(set: &mut PokemonSet, view: &SpeciesUsage, heuristics: &H, rng: &mut R)
where
    H: Heuristic + ?Sized,
    R: Rng + ?Sized,
{
    let pool = WeightedPool::from_source(view.spreads.iter(), |key, weight| {
        (key.clone(), *weight)
    });

    let scorer = heuristics.spread_scorer();
    let (choice, _) = pool.select(Some(&scorer), rng);

    let key = match choice {
        Some(key) => key,
        None => return,
    };

    match key.parse::<Spread>() {
        Ok(spread) => {
            set.nature = spread.nature;
            set.evs = spread.evs;
            set.ivs = spread.ivs;
        }
        Err(err) => warn!("skipping unreadable spread `{}`: {}", key, err),
    }
}

fn pick_one<R>(source: &WeightedMap, scorer: Scorer, rng: &mut R) -> String
where
    R: Rng + ?Sized,
{
    let pool = WeightedPool::from_source(source.iter(), |key, weight| {
        (key.clone(), *weight)
    });

    let (choice, _) = pool.select(Some(&scorer), rng);

    // dumps record bare slots under "Nothing"; that's a real outcome, it
    // just reads back as an empty string
    match choice {
        Some(ref key) if to_id(key) == "nothing" => String::new(),
        Some(key) => key,
        None => String::new(),
    }
}

fn pick_moves<H, R>(set: &mut PokemonSet, view: &SpeciesUsage, heuristics: &H, rng: &mut R)
where
    H: Heuristic + ?Sized,
    R: Rng + ?Sized,
{
    let locked = set.moves.clone();

    let mut pool = WeightedPool::from_source(view.moves.iter(), |key, weight| {
        let gone = key.is_empty() || locked.iter().any(|m| to_id(m) == to_id(key));
        (key.clone(), if gone { -1.0 } else { *weight })
    });

    // the opening draw answers to the pool-wide scorer plus one individual
    // scorer per locked move; after that only the freshest move matters
    let mut scorer = combine(exclude_keys(&locked), heuristics.move_pool_scorer(&locked));
    for name in &locked {
        scorer = combine(scorer, heuristics.move_scorer(name));
    }

    while set.moves.len() < MAX_MOVES {
        let (choice, next) = pool.select(Some(&scorer), rng);

        let name = match choice {
            Some(name) => name,
            None => break,
        };

        scorer = heuristics.move_scorer(&name);
        set.moves.push(name);
        pool = next;
    }
}
