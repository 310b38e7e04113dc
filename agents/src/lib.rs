pub mod agent;
pub mod greedy;
pub mod heuristic;

pub use agent::{build_agents, AgentKind};
pub use greedy::GreedyAgent;
pub use heuristic::HeuristicAgent;
pub use tranquillity_engine::decision::{Agent, Decision};
