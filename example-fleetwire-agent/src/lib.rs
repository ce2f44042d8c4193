pub mod agent_args;
pub mod command_handler;
pub mod report_cycle;

pub use agent_args::AgentArgs;
pub use command_handler::handle_command;
pub use report_cycle::{AgentState, CycleReport, run_cycle};
