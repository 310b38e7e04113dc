// ═══════════════════════════════════════════════════════════════════════
// Agent selection — strategies are picked by name when a game is built.
//
// The decision interface itself (`Agent`) lives in the engine; every
// strategy here only ever sees a `PlayerView`: its own hand, the board
// snapshot and public player info. Deck contents are never exposed.
// ═══════════════════════════════════════════════════════════════════════

use crate::greedy::GreedyAgent;
use crate::heuristic::HeuristicAgent;
use serde::{Deserialize, Serialize};
use tranquillity_engine::decision::Agent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Greedy,
    Heuristic,
}

impl AgentKind {
    pub const ALL: [AgentKind; 2] = [AgentKind::Greedy, AgentKind::Heuristic];

    pub fn build(self, seed: u64) -> Box<dyn Agent> {
        match self {
            AgentKind::Greedy => Box::new(GreedyAgent::new(seed)),
            AgentKind::Heuristic => Box::new(HeuristicAgent::new(seed)),
        }
    }

    /// Expand a lineup to one kind per player: a single kind is used for
    /// everyone, otherwise there must be exactly one per player.
    pub fn lineup(kinds: &[AgentKind], n_players: usize) -> Result<Vec<AgentKind>, String> {
        match kinds.len() {
            1 => Ok(vec![kinds[0]; n_players]),
            n if n == n_players => Ok(kinds.to_vec()),
            n => Err(format!("must configure either 1 or {} agents, got {}", n_players, n)),
        }
    }
}

impl std::fmt::Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentKind::Greedy => write!(f, "greedy"),
            AgentKind::Heuristic => write!(f, "heuristic"),
        }
    }
}

impl std::str::FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(AgentKind::Greedy),
            "heuristic" => Ok(AgentKind::Heuristic),
            other => Err(format!("unknown agent '{}' (expected greedy or heuristic)", other)),
        }
    }
}

/// One agent per player; player `i` is seeded with `seed + i`.
pub fn build_agents(kinds: &[AgentKind], seed: u64) -> Vec<Box<dyn Agent>> {
    kinds.iter()
        .enumerate()
        .map(|(i, kind)| kind.build(seed.wrapping_add(i as u64)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_kinds() {
        assert_eq!("greedy".parse::<AgentKind>(), Ok(AgentKind::Greedy));
        assert_eq!("Heuristic".parse::<AgentKind>(), Ok(AgentKind::Heuristic));
        assert!("tommy".parse::<AgentKind>().is_err());
        for kind in AgentKind::ALL {
            assert_eq!(kind.to_string().parse::<AgentKind>(), Ok(kind));
        }
    }

    #[test]
    fn test_lineup() {
        assert_eq!(
            AgentKind::lineup(&[AgentKind::Greedy], 3).unwrap(),
            vec![AgentKind::Greedy; 3]
        );
        let mixed = [AgentKind::Greedy, AgentKind::Heuristic];
        assert_eq!(AgentKind::lineup(&mixed, 2).unwrap(), mixed.to_vec());
        assert!(AgentKind::lineup(&mixed, 4).is_err());
    }

    #[test]
    fn test_build_agents_names() {
        let agents = build_agents(&[AgentKind::Greedy, AgentKind::Heuristic], 1);
        let names: Vec<&str> = agents.iter().map(|a| a.name()).collect();
        assert_eq!(names, vec!["Greedy", "Heuristic"]);
    }
}
