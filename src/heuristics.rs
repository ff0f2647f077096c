use crate::types::PokemonSet;
use crate::utils::to_id;
use stats::UsageData;
use std::collections::BTreeMap;

/// Reshapes one candidate's weight right before a draw. Zero or below takes
/// the candidate out of the round entirely.
pub type Scorer<'a> = Box<dyn Fn(&str, f64) -> f64 + 'a>;

/// Leaves every weight alone.
pub fn neutral<'a>() -> Scorer<'a> {
    Box::new(|_, weight| weight)
}

/// Chain two scorers. A veto from the first is final; the second only gets
/// to reshape weights that survived it.
pub fn combine<'a>(a: Scorer<'a>, b: Scorer<'a>) -> Scorer<'a> {
    Box::new(move |key, weight| {
        let scored = a(key, weight);
        if scored <= 0.0 {
            return scored;
        }

        b(key, scored)
    })
}

/// Veto every species the team already runs.
pub fn exclude_species<'a>(team: &'a [PokemonSet]) -> Scorer<'a> {
    Box::new(move |key, weight| {
        let id = to_id(key);
        if team.iter().any(|member| to_id(&member.species) == id) {
            -1.0
        } else {
            weight
        }
    })
}

/// Veto an explicit list of keys. Used for moves the caller already locked.
pub fn exclude_keys<'a>(keys: &'a [String]) -> Scorer<'a> {
    Box::new(move |key, weight| {
        let id = to_id(key);
        if keys.iter().any(|k| to_id(k) == id) {
            -1.0
        } else {
            weight
        }
    })
}

/// What the next species pick should lean on, if anything.
#[derive(Clone, Copy)]
pub enum Bias<'a> {
    /// Nothing to lean on (empty team, or the last draw was thrown out).
    Neutral,
    /// The member added on the previous round.
    Teammate(&'a PokemonSet),
    /// A block of members that arrived together, scored as one unit.
    Core(&'a [PokemonSet]),
}

/// A set-building strategy: one scorer factory per decision, plus a hook
/// that fires whenever a team member is locked in.
///
/// Every method defaults to "no opinion", so an implementation only
/// overrides the decisions it actually cares about.
pub trait Heuristic {
    fn species_scorer<'a>(&'a self, team: &'a [PokemonSet], bias: Bias<'a>) -> Scorer<'a> {
        let _ = (team, bias);
        neutral()
    }

    fn spread_scorer(&self) -> Scorer<'_> {
        neutral()
    }

    fn ability_scorer(&self) -> Scorer<'_> {
        neutral()
    }

    fn item_scorer(&self) -> Scorer<'_> {
        neutral()
    }

    /// Scores the move pool as a whole, given the moves already locked in.
    fn move_pool_scorer<'a>(&'a self, locked: &'a [String]) -> Scorer<'a> {
        let _ = locked;
        neutral()
    }

    /// Scores follow-up move picks, given the most recently added move.
    fn move_scorer<'a>(&'a self, last: &str) -> Scorer<'a> {
        let _ = last;
        neutral()
    }

    /// A member was locked into the team. Strategies with internal state
    /// react here; the next slot sees the updated strategy.
    fn update(&mut self, set: &PokemonSet) {
        let _ = set;
    }
}

/// The default strategy: no opinion on anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ambivalent;

impl Heuristic for Ambivalent {}

/// Leans species picks toward the dump's `Teammates` co-occurrence numbers:
/// partners of the freshly added member (or of a caller-fixed core) get
/// their weights scaled up. `update` folds each locked member's partner
/// table into a running one so later slots favor the team's overall company.
pub struct UsageHeuristic<'s> {
    stats: &'s UsageData,
    company: BTreeMap<String, f64>,
}

impl<'s> UsageHeuristic<'s> {
    pub fn new(stats: &'s UsageData) -> Self {
        Self {
            stats,
            company: BTreeMap::new(),
        }
    }

    fn scale(weight: f64, synergy: f64) -> f64 {
        weight * (1.0 + synergy.max(0.0) / 100.0)
    }
}

impl<'s> Heuristic for UsageHeuristic<'s> {
    fn species_scorer<'a>(&'a self, _team: &'a [PokemonSet], bias: Bias<'a>) -> Scorer<'a> {
        match bias {
            Bias::Neutral => Box::new(move |key, weight| match self.company.get(key) {
                Some(synergy) => Self::scale(weight, *synergy),
                None => weight,
            }),

            Bias::Teammate(mate) => {
                let partners = self.stats.species(&mate.species).map(|view| &view.teammates);

                Box::new(move |key, weight| match partners.and_then(|p| p.get(key)) {
                    Some(synergy) => Self::scale(weight, *synergy),
                    None => weight,
                })
            }

            Bias::Core(core) => Box::new(move |key, weight| {
                let synergy: f64 = core
                    .iter()
                    .filter_map(|member| self.stats.species(&member.species))
                    .map(|view| view.teammate_weight(key))
                    .sum();

                Self::scale(weight, synergy)
            }),
        }
    }

    fn update(&mut self, set: &PokemonSet) {
        let stats = self.stats;
        let view = match stats.species(&set.species) {
            Some(view) => view,
            None => return,
        };

        for (name, weight) in &view.teammates {
            *self.company.entry(name.clone()).or_insert(0.0) += weight;
        }
    }
}
