use crate::artifacts::ArtifactManager;
use crate::cli::CleanArgs;
use crate::config;
use crate::error::Result;
use tracing::warn;

pub fn run(args: CleanArgs) -> Result<()> {
    let work_dir = config::resolve_work_dir(args.work_dir.as_deref(), &config::process_env)?;
    let report = ArtifactManager::new(&work_dir).clean();

    println!(
        "Removed {} director(ies) and {} file(s) from {}",
        report.removed_dirs,
        report.removed_files,
        work_dir.display()
    );
    if report.failures > 0 {
        warn!("{} item(s) could not be removed.", report.failures);
    }
    Ok(())
}
