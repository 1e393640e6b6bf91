use crate::core::Pipeline;
use crate::utils::error::Result;

/// Runs a pipeline's extract, transform and load steps in order.
pub struct BulletinEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BulletinEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<Option<String>> {
        tracing::info!("Reading schedule...");
        let schedule = self.pipeline.extract().await?;
        tracing::info!("Read {} scheduled week(s)", schedule.rows.len());

        tracing::info!("Selecting bulletin data...");
        let data = self.pipeline.transform(schedule).await?;
        tracing::info!("Prepared {} template variable(s)", data.len());

        let output_path = self.pipeline.load(data).await?;
        match &output_path {
            Some(path) => tracing::info!("Output saved to: {}", path),
            None => tracing::info!("No template given, nothing written"),
        }

        Ok(output_path)
    }
}
