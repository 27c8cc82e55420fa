use crate::domain::model::{BatchReport, ProcessOutcome};
use crate::domain::ports::JobProcessor;

pub struct BatchRunner<P: JobProcessor> {
    processor: P,
}

impl<P: JobProcessor> BatchRunner<P> {
    pub fn new(processor: P) -> Self {
        Self { processor }
    }

    pub async fn run_one(&self, url: &str) -> ProcessOutcome {
        self.processor.run_one(url).await
    }

    /// Processes every URL in order; a failed URL never stops the rest.
    pub async fn run_many(&self, urls: &[String]) -> BatchReport {
        let mut report = BatchReport::default();

        for url in urls {
            println!("\nProcessing: {}", url);
            let outcome = self.processor.run_one(url).await;
            if outcome.success {
                println!("✅ {}", outcome.message);
            } else {
                println!("❌ {}", outcome.message);
            }
            report.outcomes.push(outcome);
        }

        tracing::info!(
            "Batch finished: {}/{} succeeded",
            report.succeeded(),
            report.total()
        );
        println!("\n{}", report.render_summary());

        report
    }
}
