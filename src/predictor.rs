use crate::builder;
use crate::config::Config;
use crate::heuristics::{combine, exclude_species, Bias, Heuristic};
use crate::pool::WeightedPool;
use crate::traits::{Dex, SpeciesFacts, Validator};
use crate::types::{PokemonSet, Team, TeamMemberInfo, MAX_TEAM_SIZE};
use crate::utils::to_id;
use lazy_static::lazy_static;
use rand::Rng;
use stats::{SpeciesUsage, UsageData};
use std::collections::BTreeMap;

/// What the next species pick leans on, carried from one slot to the next.
enum SlotBias {
    Neutral,
    LastAdded,
    /// The first `n` slots arrived as a block of caller-fixed members.
    FixedCore(usize),
}

/// Guesses a plausible opposing team from aggregate usage statistics and
/// whatever partial knowledge the caller has scouted.
///
/// The rules catalog is consulted once, at construction, to prune species
/// that were banned after the statistics snapshot was taken and to cache
/// per-species facts for the validator. The validator itself is only asked
/// anything while the caller's validation budget lasts.
pub struct TeamPredictor<V> {
    validator: V,
    stats: UsageData,
    config: Config,
    facts: BTreeMap<String, SpeciesFacts>,
    species_pool: WeightedPool,
    lead_pool: WeightedPool,
}

impl<V: Validator> TeamPredictor<V> {
    pub fn new<D: Dex>(dex: &D, validator: V, stats: UsageData, config: Config) -> Self {
        let mut facts = BTreeMap::new();
        let mut banned = Vec::new();

        for name in stats.data.keys() {
            let (invalid, species_facts) = dex.check_species(&to_id(name));

            if invalid {
                debug!("{} is in the snapshot but no longer legal", name);
                banned.push(name.clone());
            } else {
                facts.insert(to_id(name), species_facts);
            }
        }

        let general_pool = species_pool(&stats, &banned, |view| view.usage.weighted);
        let lead_pool = species_pool(&stats, &banned, |view| view.lead.weighted);

        info!(
            "predictor ready: {} species usable, {} with lead data, {} banned",
            general_pool.selectable(),
            lead_pool.selectable(),
            banned.len(),
        );

        Self {
            validator,
            stats,
            config,
            facts,
            species_pool: general_pool,
            lead_pool,
        }
    }

    pub fn stats(&self) -> &UsageData {
        &self.stats
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Predict up to a full team. `partial` holds what is already known,
    /// slot by slot from the front; those members are rebuilt around their
    /// locked attributes instead of being sampled.
    ///
    /// The team comes back shorter than six when the species pool runs dry,
    /// which is an answer, not an error.
    pub fn predict_team<H, R>(
        &self,
        partial: &[TeamMemberInfo],
        heuristics: &mut H,
        rng: &mut R,
        validation_budget: u32,
    ) -> Team
    where
        H: Heuristic + ?Sized,
        R: Rng + ?Sized,
    {
        let mut team: Team = Vec::with_capacity(MAX_TEAM_SIZE);
        let mut pool = self.species_pool.clone();
        let mut budget = validation_budget;
        let mut bias = SlotBias::Neutral;

        while team.len() < MAX_TEAM_SIZE {
            let slot = team.len();
            let fixed = slot < partial.len();

            // the pool advance is held back until the slot actually commits,
            // so a rejected draw rewinds by simply not being kept
            let (mut set, next_pool) = if fixed {
                (self.build_slot(&partial[slot], heuristics, rng), None)
            } else if slot == 0 && self.lead_stats_apply() {
                // too old a generation to have full-team statistics; lead
                // usage is the only signal there is, so take it unscored
                let (choice, _) = self.lead_pool.select(None, rng);

                let name = match choice {
                    Some(name) => name,
                    None => break,
                };

                debug!("lead pick from lead statistics: {}", name);
                (self.build_slot(&TeamMemberInfo::new(name), heuristics, rng), None)
            } else {
                let anchor = match bias {
                    SlotBias::Neutral => Bias::Neutral,
                    SlotBias::LastAdded => {
                        team.last().map(Bias::Teammate).unwrap_or(Bias::Neutral)
                    }
                    SlotBias::FixedCore(n) => Bias::Core(&team[..n.min(team.len())]),
                };

                let scorer = combine(
                    exclude_species(&team),
                    heuristics.species_scorer(&team, anchor),
                );

                let (choice, next) = pool.select(Some(&scorer), rng);

                let name = match choice {
                    Some(name) => name,
                    None => break,
                };

                (
                    self.build_slot(&TeamMemberInfo::new(name), heuristics, rng),
                    Some(next),
                )
            };

            if budget > 0 && !self.gate(&team, &mut set, &mut budget) {
                bias = SlotBias::Neutral;
                continue;
            }

            if let Some(next) = next_pool {
                pool = next;
            }

            bias = if fixed {
                SlotBias::FixedCore(slot + 1)
            } else {
                SlotBias::LastAdded
            };

            team.push(set);

            if team.len() < MAX_TEAM_SIZE {
                heuristics.update(team.last().unwrap());
            }
        }

        debug!("predicted {} of {} slots", team.len(), MAX_TEAM_SIZE);
        team
    }

    /// Build a single member from its species' distributions, honoring
    /// whatever the caller locked in.
    pub fn predict_set<H, R>(&self, info: &TeamMemberInfo, heuristics: &H, rng: &mut R) -> PokemonSet
    where
        H: Heuristic + ?Sized,
        R: Rng + ?Sized,
    {
        self.build_slot(info, heuristics, rng)
    }

    fn build_slot<H, R>(&self, info: &TeamMemberInfo, heuristics: &H, rng: &mut R) -> PokemonSet
    where
        H: Heuristic + ?Sized,
        R: Rng + ?Sized,
    {
        let mut info = info.clone();
        if info.level.is_none() {
            info.level = Some(self.config.default_level);
        }

        match self.species_view(&info.species) {
            Some(view) => builder::predict_set(view, &info, heuristics, rng),
            None => {
                warn!("no usage data for {}, its set will be bare", info.species);
                builder::predict_set(&SpeciesUsage::default(), &info, heuristics, rng)
            }
        }
    }

    /// One pass of the legality gate. Either the candidate goes through, or
    /// it costs a point of budget and the slot is rolled again.
    fn gate(&self, team: &[PokemonSet], set: &mut PokemonSet, budget: &mut u32) -> bool {
        let mut candidate = team.to_vec();
        candidate.push(set.clone());

        let hints: Vec<&SpeciesFacts> = candidate
            .iter()
            .map(|member| self.facts_for(&member.species))
            .collect();

        let problems = match self.validator.validate_team(&candidate, &hints) {
            None => return true,
            Some(problems) => problems,
        };

        // a team under construction is supposed to be short
        if problems.iter().all(|p| is_team_size_complaint(p)) {
            return true;
        }

        debug!("validator rejected {}: {}", set.species, problems.join("; "));

        if let Some(issues) = self.validator.validate_set(set) {
            if issues.len() == 1 && issues[0].contains("must be shiny") {
                debug!("forcing {} shiny and retrying", set.species);
                set.shiny = true;
                *budget -= 1;
                return self.validator.validate_set(set).is_none();
            }
        }

        *budget -= 1;
        false
    }

    fn facts_for(&self, species: &str) -> &SpeciesFacts {
        lazy_static! {
            static ref NO_FACTS: SpeciesFacts = SpeciesFacts::default();
        }

        self.facts.get(&to_id(species)).unwrap_or(&NO_FACTS)
    }

    fn species_view(&self, name: &str) -> Option<&SpeciesUsage> {
        self.stats.species(name).or_else(|| {
            let id = to_id(name);
            self.stats
                .data
                .iter()
                .find(|(key, _)| to_id(key) == id)
                .map(|(_, view)| view)
        })
    }

    fn lead_stats_apply(&self) -> bool {
        self.config.generation.number() < self.config.lead_stats_cutoff
    }
}

fn species_pool<F>(stats: &UsageData, banned: &[String], weight: F) -> WeightedPool
where
    F: Fn(&SpeciesUsage) -> f64,
{
    WeightedPool::from_source(stats.data.iter(), |name, view| {
        let w = if banned.contains(name) {
            -1.0
        } else {
            weight(view)
        };

        (name.clone(), w)
    })
}

fn is_team_size_complaint(problem: &str) -> bool {
    problem.contains("must bring at least")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{OpenDex, OpenValidator};

    #[test]
    fn size_nagging_is_not_a_real_complaint() {
        assert!(is_team_size_complaint("You must bring at least 4 Pokémon."));
        assert!(!is_team_size_complaint("Pidgey is banned by Ubers."));
    }

    #[test]
    fn species_lookup_tolerates_loose_spelling() {
        let usage = stats::UsageData::from_json(
            r#"{ "data": { "Mr. Mime": { "usage": { "weighted": 5.0 } } } }"#,
        )
        .unwrap();

        let predictor = TeamPredictor::new(&OpenDex, OpenValidator, usage, Config::default());

        assert!(predictor.species_view("Mr. Mime").is_some());
        assert!(predictor.species_view("mr mime").is_some());
        assert!(predictor.species_view("MR-MIME").is_some());
        assert!(predictor.species_view("Mime Jr.").is_none());
    }
}
