//! `rigup doctor` — workstation diagnostics.

use anyhow::Result;

use crate::app::AppContext;
use crate::application::ports::ProgressReporter;
use crate::application::services::doctor::run_doctor;
use crate::domain::health::DoctorChecks;
use crate::infra::ProcPlatformProbe;
use crate::output::ConsoleReporter;

/// Reporter for JSON mode — progress chatter must not pollute the document.
struct SilentReporter;

impl ProgressReporter for SilentReporter {
    fn step(&self, _: &str) {}
    fn success(&self, _: &str) {}
    fn warn(&self, _: &str) {}
    fn display(&self, _: &str) {}
}

/// Run the doctor command. Always exits 0: findings are reported, not
/// treated as failures.
pub async fn run(app: &AppContext) -> Result<()> {
    let agent_socket = std::env::var("SSH_AUTH_SOCK").is_ok_and(|v| !v.is_empty());

    if app.is_json() {
        let checks = run_doctor(&app.runner, &ProcPlatformProbe, agent_socket, &SilentReporter).await;
        println!("{}", serde_json::to_string_pretty(&checks)?);
        return Ok(());
    }

    let checks = if app.output.show_progress() {
        let pb = crate::output::progress::spinner("running diagnostics...");
        let checks = run_doctor(&app.runner, &ProcPlatformProbe, agent_socket, &SilentReporter).await;
        crate::output::progress::finish_ok(&pb, "diagnostics complete");
        checks
    } else {
        let reporter = ConsoleReporter::new(&app.output);
        run_doctor(&app.runner, &ProcPlatformProbe, agent_socket, &reporter).await
    };
    render_human(app, &checks);
    Ok(())
}

fn render_human(app: &AppContext, checks: &DoctorChecks) {
    app.output.header("Workstation");
    app.output.kv("platform", &checks.platform.to_string());
    app.output.kv("agent", if checks.agent_socket { "socket present" } else { "no socket" });
    app.output.kv(
        "clipboard",
        checks.clipboard.as_deref().unwrap_or("none found"),
    );

    app.output.header("Tools");
    for tool in &checks.tools {
        let status = match (&tool.found, &tool.version) {
            (true, Some(v)) => format!("found ({v})"),
            (true, None) => "found".to_string(),
            (false, _) => "missing".to_string(),
        };
        app.output.kv(&tool.name, &status);
    }

    let issues = checks.issues();
    if issues.is_empty() {
        app.output.success("everything checks out");
    } else {
        for issue in issues {
            app.output.warn(&issue);
        }
    }
}
