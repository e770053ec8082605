//! The create-secret wizard.
//!
//! Pre-check, prompts, write guard, one secret per environment, context
//! restore. Everything interactive goes through a [`Prompter`] and every
//! external command through a [`CommandRunner`].

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::prompt::TerminalPrompter;
use crate::core::cluster::{ClusterSession, Restore};
use crate::core::config::Config;
use crate::core::constants;
use crate::core::exec::{CommandRunner, SystemRunner};
use crate::core::guard::{self, WriteDecision};
use crate::core::layout::Layout;
use crate::core::materialize::{self, Materializer, Outcome};
use crate::core::precheck::{self, Precheck};
use crate::core::prompt::Prompter;
use crate::core::types::{
    Destination, Environment, OutputMode, SecretRequest, ServiceName, Target,
};
use crate::core::validation::validate_secret_name;
use crate::error::{Error, Result};

/// Summary of a finished run.
#[derive(Debug)]
pub struct Report {
    pub request: Option<SecretRequest>,
    /// Guard decision, only for service output
    pub decision: Option<WriteDecision>,
    pub outcomes: Vec<Outcome>,
    pub restore: Option<Restore>,
}

impl Report {
    fn empty() -> Self {
        Self {
            request: None,
            decision: None,
            outcomes: Vec::new(),
            restore: None,
        }
    }

    /// Error if any environment failed
    pub fn into_result(self) -> Result<()> {
        materialize::summarize(&self.outcomes)
    }
}

/// Run the wizard on the terminal.
pub fn execute(config_path: Option<PathBuf>, root: Option<PathBuf>) -> Result<()> {
    let mut config = Config::load(config_path.as_deref())?;
    if let Some(root) = root {
        config.root = root;
    }

    if !io::stdin().is_terminal() {
        return Err(Error::NotInteractive);
    }

    let layout = Layout::from_config(&config);
    let mut prompter = TerminalPrompter::new();
    let mut runner = SystemRunner;

    run(&config, &layout, &mut prompter, &mut runner)?.into_result()
}

/// Run the wizard with the given prompter and runner.
///
/// Returns `Error::Cancelled` when a prompt is aborted; at that point no
/// file has been written and no context switched.
pub fn run<P: Prompter, R: CommandRunner>(
    config: &Config,
    layout: &Layout,
    prompter: &mut P,
    runner: &mut R,
) -> Result<Report> {
    report_precheck(&precheck::run(&config.tools.kubectl, &*runner, prompter)?);

    let mut session = ClusterSession::capture(runner, &config.tools.kubectl);
    if let Some(ctx) = session.original() {
        output::kv("context", ctx);
    }

    let Some(request) = gather(config, prompter)? else {
        output::warn("no environments selected, nothing to do");
        return Ok(Report::empty());
    };
    debug!(?request, "request gathered");

    let service = match request.mode {
        OutputMode::Service => choose_service(layout, prompter)?,
        OutputMode::Output => None,
    };

    let decision = match request.mode {
        OutputMode::Service => Some(guard::check(
            layout,
            service.as_deref(),
            &request.targets,
            &request.name,
            prompter,
        )?),
        OutputMode::Output => None,
    };

    let destinations = plan(layout, &request, decision.as_ref());
    let approved = decision.as_ref().is_some_and(WriteDecision::can_write);
    if request.mode == OutputMode::Service && !approved {
        output::warn(&format!(
            "not writing to service folders, using {}",
            output::path(layout.output.display())
        ));
    }

    output::section("Creating secrets");
    let outcomes = Materializer::new(
        &config.tools,
        &config.local_context,
        &layout.scratch_file,
        runner,
    )
    .materialize_all(&mut session, &request, &destinations);

    for (outcome, dest) in outcomes.iter().zip(&destinations) {
        report_outcome(outcome, dest, config);
    }

    let restore = restore_context(session, runner);

    output::blank();
    output::hint(constants::KUSTOMIZE_REMINDER);

    Ok(Report {
        request: Some(request),
        decision,
        outcomes,
        restore: Some(restore),
    })
}

/// Ask for environments, name, value and output mode.
///
/// Returns `None` when no environment was selected.
pub fn gather<P: Prompter>(config: &Config, prompter: &mut P) -> Result<Option<SecretRequest>> {
    let labels: Vec<String> = config.environments.iter().map(|e| e.name.clone()).collect();
    let picked = prompter.multi_select(
        "Select one or more environments to create secrets for",
        &labels,
    )?;
    if picked.is_empty() {
        return Ok(None);
    }

    let targets: Vec<Target> = picked
        .into_iter()
        .filter_map(|i| config.environments.get(i))
        .map(|choice| Target::parse(&choice.value, &config.local_environment))
        .collect();

    let name = prompter.input(
        "Enter your secret name (example-secret-format)",
        validate_secret_name,
    )?;
    validate_secret_name(&name)?;

    let value = Zeroizing::new(prompter.password("Enter your secret value")?);

    let modes: Vec<String> = OutputMode::ALL.iter().map(|m| m.label().to_string()).collect();
    let mode = OutputMode::ALL
        .get(prompter.select("Where do you want the output?", &modes)?)
        .copied()
        .unwrap_or(OutputMode::Output);

    Ok(Some(SecretRequest {
        name,
        value,
        targets,
        mode,
    }))
}

/// Pick a service from the services folder.
///
/// With no services available the run continues without one, which routes
/// everything to the generic output folder.
pub fn choose_service<P: Prompter>(
    layout: &Layout,
    prompter: &mut P,
) -> Result<Option<ServiceName>> {
    let mut services = layout.list_services()?;
    if services.is_empty() {
        output::warn(&format!(
            "no services found in {}",
            output::path(layout.services.display())
        ));
        return Ok(None);
    }

    let index = prompter.select("Select a service", &services)?;
    if index >= services.len() {
        return Ok(None);
    }
    Ok(Some(services.swap_remove(index)))
}

/// One destination per selected environment.
pub fn plan(
    layout: &Layout,
    request: &SecretRequest,
    decision: Option<&WriteDecision>,
) -> Vec<Destination> {
    let service = decision.filter(|d| d.can_write()).and_then(WriteDecision::service);

    request
        .targets
        .iter()
        .map(|target| match service {
            Some(service) => layout.service_destination(target, service, &request.name),
            None => layout.output_destination(target, &request.name),
        })
        .collect()
}

fn restore_context<R: CommandRunner>(session: ClusterSession, runner: &mut R) -> Restore {
    let original = session.original().map(str::to_string);
    match session.restore(runner) {
        Ok(restore) => {
            if let Restore::Restored(ctx) = &restore {
                info!(context = %ctx, "context restored");
            }
            restore
        }
        Err(e) => {
            output::warn(&format!("could not restore context: {}", e));
            let ctx = original.unwrap_or_default();
            output::hint(&format!(
                "run: {}",
                output::cmd(&format!("kubectl config use-context {}", ctx))
            ));
            Restore::Failed(ctx)
        }
    }
}

fn report_precheck(result: &Precheck) {
    match result {
        Precheck::Ok(_) => {}
        Precheck::Missing => output::warn("kubectl not found on PATH"),
        Precheck::Renamed { from, to } => output::success(&format!(
            "moved {} to {}",
            output::path(from.display()),
            output::path(to.display())
        )),
        Precheck::Kept(path) => output::warn(&format!(
            "keeping {}, context switches may hang",
            output::path(path.display())
        )),
        Precheck::RenameFailed { path, reason } => {
            output::warn(&format!("could not move {}: {}", output::path(path.display()), reason));
            output::hint(&format!(
                "run: {}",
                output::cmd(&format!(
                    "mv {} {}",
                    path.display(),
                    precheck::backup_path(path).display()
                ))
            ));
        }
    }
}

fn report_outcome(outcome: &Outcome, dest: &Destination, config: &Config) {
    match &outcome.result {
        Ok(path) => output::success(&format!("created secret {}", output::path(path.display()))),
        Err(e) => {
            output::error(&format!("{}: {}", outcome.target, e));
            let context = match &dest.target.environment {
                Environment::LocalDevelopment => config.local_context.as_str(),
                Environment::Remote(ctx) => ctx.as_str(),
            };
            output::hint(&format!(
                "re-run against context {} to create {}",
                output::cmd(context),
                output::path(dest.file.display())
            ));
        }
    }
}
