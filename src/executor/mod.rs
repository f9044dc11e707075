//! Probe engine
//!
//! Drives a run: ports in order, `cycles` cycles per port, `ops_per_cycle`
//! connects per cycle. The first failed connect abandons the rest of its
//! port and the engine moves on to the next one. Cycle means go into the
//! shared cycle storage of the [`RunContext`], which later ports overwrite,
//! so the summary describes the last port that completed cycles.

use crate::{
    dns::Resolver,
    error::{AppError, Result},
    logging::ProbeLogger,
    models::{ProbeConfig, RunContext, RunSummary},
    output::Reporter,
    prober::Prober,
    stats::StatisticsAggregator,
    types::{ProbeTarget, Verdict},
};
use std::time::Instant;

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// All ports processed and summarized
    Completed(RunSummary),
    /// A cycle was reported absent; the run stopped without a summary
    Absent,
}

/// How a single port pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PortOutcome {
    Completed,
    Aborted,
    Absent,
}

/// Sequential probe driver
pub struct ProbeEngine<R: Resolver, P: Prober> {
    config: ProbeConfig,
    resolver: R,
    prober: P,
    logger: ProbeLogger,
}

impl<R: Resolver, P: Prober> ProbeEngine<R, P> {
    /// Create an engine for a validated configuration
    pub fn new(config: ProbeConfig, resolver: R, prober: P, logger: ProbeLogger) -> Self {
        Self {
            config,
            resolver,
            prober,
            logger,
        }
    }

    /// Configuration the engine runs with
    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Run every port and report the summary
    pub async fn run(&self, reporter: &mut dyn Reporter) -> Result<RunOutcome> {
        let mut ctx = RunContext::new(self.config.cycles, self.config.host_address.clone());
        self.execute(&mut ctx, reporter).await
    }

    /// Run against caller-owned state
    pub async fn execute(&self, ctx: &mut RunContext, reporter: &mut dyn Reporter) -> Result<RunOutcome> {
        self.logger.log_run_start(&self.config).await;

        for port in &self.config.ports {
            ctx.begin_port(port);

            let target = self.resolve_target(ctx, port, reporter).await?;
            reporter.banner(&self.config, &ctx.host_address)?;

            let port_start = Instant::now();
            let outcome = self.probe_port(ctx, port, &target, reporter).await?;
            if outcome == PortOutcome::Absent {
                return Ok(RunOutcome::Absent);
            }

            let elapsed_ms = port_start.elapsed().as_millis() as u64;
            ctx.finish_port(elapsed_ms, outcome == PortOutcome::Aborted);
            if let Some(record) = ctx.ports.last() {
                self.logger.log_port_finished(record).await;
            }
            reporter.port_elapsed(elapsed_ms)?;
        }

        let stats = StatisticsAggregator::summarize(ctx.cycle_records());
        let summary = RunSummary::new(stats, self.config.total_ops(), ctx.total_elapsed_ms);

        self.logger.log_summary(&summary).await;
        reporter.summary(&self.config, &ctx.host_address, &summary)?;

        Ok(RunOutcome::Completed(summary))
    }

    /// Resolve one port; a failure is reported and the raw pair is dialed instead
    async fn resolve_target(
        &self,
        ctx: &mut RunContext,
        port: &str,
        reporter: &mut dyn Reporter,
    ) -> Result<ProbeTarget> {
        let host = &self.config.host_name;

        match self.resolver.resolve(host, port, self.config.address_family).await {
            Ok(addr) => {
                let address = addr.ip().to_string();
                self.logger.log_resolution(host, port, Ok(&address)).await;
                ctx.note_resolved_address(address);
                Ok(ProbeTarget::Resolved(addr))
            }
            Err(error) => {
                self.logger.log_resolution(host, port, Err(&error)).await;
                reporter.resolve_failure(&error, host, port)?;
                Ok(ProbeTarget::Unresolved {
                    host: host.clone(),
                    port: port.to_string(),
                })
            }
        }
    }

    async fn probe_port(
        &self,
        ctx: &mut RunContext,
        port: &str,
        target: &ProbeTarget,
        reporter: &mut dyn Reporter,
    ) -> Result<PortOutcome> {
        let config = &self.config;
        let target_label = target.to_string();

        for cycle in 1..=config.cycles {
            reporter.cycle_start(cycle)?;
            let mut cycle_total = 0.0;

            for op in 1..=config.ops_per_cycle {
                let sample = self.prober.probe(target, config.address_family, config.timeout()).await;

                if !sample.succeeded {
                    let error = sample
                        .error
                        .unwrap_or_else(|| AppError::network(format!("dial tcp {}: failed", target_label)));
                    self.logger
                        .log_connection(&target_label, cycle, op, sample.elapsed_ms, Some(&error))
                        .await;
                    reporter.connect_failure(&error, port, &config.host_name)?;
                    return Ok(PortOutcome::Aborted);
                }

                self.logger
                    .log_connection(&target_label, cycle, op, sample.elapsed_ms, None)
                    .await;
                if let Some(close_error) = &sample.error {
                    reporter.close_failure(close_error)?;
                }

                cycle_total += sample.elapsed_ms;
            }

            let mean = StatisticsAggregator::cycle_average(cycle_total, config.port_count(), config.ops_per_cycle);
            ctx.record_cycle((cycle - 1) as usize, mean);
            self.logger.log_cycle(port, cycle, cycle_total, mean).await;

            if reporter.report(mean, config, &ctx.host_address)? == Verdict::Absent {
                return Ok(PortOutcome::Absent);
            }
        }

        Ok(PortOutcome::Completed)
    }
}
