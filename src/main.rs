use procargs::status::ExitStatus;
use procargs::{core, ArgumentHolder};

/// Entry point - captures the process arguments and calls core::run()
///
/// Returns ExitStatus directly, which implements std::process::Termination.
fn main() -> ExitStatus {
    core::run(ArgumentHolder::from_env())
}
