//! `update-devices`: one reconciliation pass.

use std::process::ExitCode;

use fleet_health_events::AuditLog;
use fleet_health_monitoring::MonitoringApi;
use fleet_health_registry::RegistryApi;

use crate::cli::UpdateDevicesArgs;
use crate::config::UpdateDevicesConfig;
use crate::reconcile::Reconciler;

pub async fn run(
    args: &UpdateDevicesArgs,
    audit_component: &str,
    audit_system: &str,
) -> anyhow::Result<ExitCode> {
    let config = UpdateDevicesConfig::from_args(args)?;

    let monitoring = MonitoringApi::new(
        &config.monitoring.api_token,
        &config.monitoring.base_url,
        config.monitoring.timeout,
    )?;
    let registry = RegistryApi::new(
        &config.registry.base_url,
        config.registry.credentials.clone(),
        config.registry.timeout,
    )?;

    tracing::info!(
        registry_url = %config.registry.base_url,
        ignored_checks = config.ignored_checks.len(),
        "Starting device health reconciliation"
    );

    let mut audit = AuditLog::stdout(audit_component, audit_system);
    let payload = Reconciler::new(&monitoring, &registry)
        .run(&config.ignored_checks, &mut audit)
        .await?;

    tracing::info!(updated = payload.len(), "Reconciliation finished");
    Ok(ExitCode::SUCCESS)
}
