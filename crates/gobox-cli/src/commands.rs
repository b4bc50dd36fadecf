use gobox::PipelineMode;
use gobox::engine::Builder;
use gobox::pipeline;

/// Run one pipeline invocation against the local container engine and
/// print whatever it renders.
pub async fn run(mode: &PipelineMode, release: Option<&str>) -> anyhow::Result<()> {
    tracing::debug!(?mode, release, "dispatching");

    if let Some(output) = pipeline::run(mode, release, Builder::connect).await? {
        print!("{output}");
        if !output.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
