//! Version command implementation

use crate::cli::Output;
use crate::parallel::ExecutionStrategy;
use anyhow::Result;

/// Execute the version command
pub async fn execute(output: &Output) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    let name = env!("CARGO_PKG_NAME");

    if output.is_quiet() {
        println!("{name} {version}");
        return Ok(());
    }

    output.header("katas Version Information");
    output.key_value("Version:", &format!("{name} v{version}"), true);
    output.key_value("Description:", env!("CARGO_PKG_DESCRIPTION"), false);
    output.key_value("Repository:", env!("CARGO_PKG_REPOSITORY"), false);

    output.category("Build Information");
    output.key_value("Target:", std::env::consts::ARCH, false);
    output.key_value(
        "Profile:",
        if cfg!(debug_assertions) { "debug" } else { "release" },
        false,
    );
    output.key_value("CPU cores:", &num_cpus::get().to_string(), false);
    output.key_value(
        "Default workers:",
        &ExecutionStrategy::calculate_optimal_workers(0, crate::combos::DEFAULT_THREAD_PERCENTAGE)
            .to_string(),
        false,
    );

    output.blank_line();
    output.success("Run 'katas --help' for usage information");

    Ok(())
}
